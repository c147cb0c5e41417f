use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// One file received in a multipart upload, already spilled to the request
/// workspace.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Multipart field the file arrived under ("file", "files", "image").
    pub field: String,
    /// Client-supplied filename, sanitized to a bare name.
    pub filename: String,
    /// Location inside the request workspace.
    pub path: PathBuf,
}

impl UploadedFile {
    /// Filename without its final extension.
    pub fn stem(&self) -> &str {
        Path::new(&self.filename)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("upload")
    }
}

/// The extracted content of one conversion request: uploaded files plus the
/// scalar form parameters. Blank scalar parts are dropped during extraction,
/// so `param` only ever yields non-empty values.
#[derive(Debug, Default)]
pub struct ConversionRequest {
    pub files: Vec<UploadedFile>,
    pub params: HashMap<String, String>,
}

impl ConversionRequest {
    /// Non-empty scalar parameter, if present.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(|s| s.as_str())
    }

    /// All files uploaded under the given field name, in arrival order.
    pub fn files_for(&self, field: &str) -> Vec<&UploadedFile> {
        self.files.iter().filter(|f| f.field == field).collect()
    }
}

/// The file a capability handler produced, ready to stream back.
#[derive(Debug)]
pub struct ConversionOutput {
    pub path: PathBuf,
    pub media_type: &'static str,
    /// Suggested download name for the Content-Disposition header.
    pub filename: String,
}

impl ConversionOutput {
    pub fn new(path: PathBuf, media_type: &'static str, filename: impl Into<String>) -> Self {
        Self {
            path,
            media_type,
            filename: filename.into(),
        }
    }
}
