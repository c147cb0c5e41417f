//! Multipart extraction into a [`ConversionRequest`].
//!
//! File parts are spilled into the request workspace under their (sanitized)
//! client filename; each upload gets its own subdirectory so identical names
//! cannot collide and tool output stems stay predictable. Blank text parts
//! are dropped so handlers see "left blank" and "absent" identically.

use super::error::ApiError;
use crate::models::{ConversionRequest, UploadedFile};
use crate::tools::{sanitize_filename, Workspace};
use axum::extract::Multipart;

pub async fn extract(
    mut multipart: Multipart,
    workspace: &Workspace,
) -> Result<ConversionRequest, ApiError> {
    let mut request = ConversionRequest::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("invalid multipart body: {}", e)))?
    {
        let name = match field.name() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => continue,
        };

        let client_name = field.file_name().map(|f| f.to_string());
        match client_name {
            Some(client_name) if !client_name.is_empty() => {
                let filename = sanitize_filename(&client_name);
                let dir = workspace
                    .path()
                    .join(format!("in-{}", request.files.len()));
                tokio::fs::create_dir_all(&dir)
                    .await
                    .map_err(|e| ApiError::internal(format!("workspace I/O failed: {}", e)))?;
                let path = dir.join(&filename);

                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("upload truncated: {}", e)))?;
                tokio::fs::write(&path, &data)
                    .await
                    .map_err(|e| ApiError::internal(format!("workspace I/O failed: {}", e)))?;

                request.files.push(UploadedFile {
                    field: name,
                    filename,
                    path,
                });
            }
            _ => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("invalid form field: {}", e)))?;
                if !text.is_empty() {
                    request.params.insert(name, text);
                }
            }
        }
    }

    Ok(request)
}
