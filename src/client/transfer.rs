//! Transfer & result handling.
//!
//! Sends a submission plan as multipart, with a timeout sized for slow
//! conversions, and reduces every failure to one human-readable line:
//! structured `detail` from the error body, else the decoded body text, else
//! the transport error's own message.

use super::form::{PartValue, SubmissionPlan};
use crate::tools::sanitize_filename;
use regex::Regex;
use reqwest::header::{HeaderMap, CONTENT_DISPOSITION};
use reqwest::multipart;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;

/// Conversions of large inputs are slow; the request timeout has to outlive
/// the server-side processing, not a UI expectation.
const TRANSFER_TIMEOUT: Duration = Duration::from_secs(600);

/// Suggested name when the response carries none.
pub const DEFAULT_DOWNLOAD_NAME: &str = "transformix-download.bin";

/// A successfully transferred result, not yet written to disk.
#[derive(Debug)]
pub struct Download {
    /// Name suggested by the Content-Disposition header, or the default.
    pub filename: String,
    pub data: Vec<u8>,
}

pub struct TransferHandler {
    client: reqwest::Client,
    api_root: String,
}

impl TransferHandler {
    pub fn new(api_root: &str) -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .timeout(TRANSFER_TIMEOUT)
            .build()
            .map_err(|e| e.to_string())?;
        Ok(Self {
            client,
            api_root: api_root.trim_end_matches('/').to_string(),
        })
    }

    /// POST the plan to `<api-root><endpoint>` and interpret the outcome.
    ///
    /// The error string is the single message the form surfaces; no retries
    /// are attempted.
    pub async fn send(&self, plan: SubmissionPlan) -> Result<Download, String> {
        let url = format!("{}{}", self.api_root, plan.endpoint);
        let form = build_form(&plan.parts).await?;

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        if !status.is_success() {
            return Err(match response.bytes().await {
                Ok(body) => error_message(status, &body),
                // Lowest-fidelity fallback: the transport error itself.
                Err(e) => e.to_string(),
            });
        }

        let filename = filename_from_headers(response.headers())
            .unwrap_or_else(|| DEFAULT_DOWNLOAD_NAME.to_string());
        let data = response
            .bytes()
            .await
            .map_err(|e| e.to_string())?
            .to_vec();

        Ok(Download { filename, data })
    }
}

async fn build_form(parts: &[(String, PartValue)]) -> Result<multipart::Form, String> {
    let mut form = multipart::Form::new();
    for (name, value) in parts {
        match value {
            PartValue::Text(text) => {
                form = form.text(name.clone(), text.clone());
            }
            PartValue::File(path) => {
                let data = tokio::fs::read(path)
                    .await
                    .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
                let filename = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .map(sanitize_filename)
                    .unwrap_or_else(|| "upload".to_string());
                form = form.part(name.clone(), multipart::Part::bytes(data).file_name(filename));
            }
        }
    }
    Ok(form)
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: String,
}

/// Best-effort error extraction over the raw error body.
fn error_message(status: StatusCode, body: &[u8]) -> String {
    if let Ok(parsed) = serde_json::from_slice::<ErrorBody>(body) {
        return parsed.detail;
    }

    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if !text.is_empty() {
        return text.to_string();
    }

    format!("request failed with status {}", status)
}

/// Pull the `filename=` token out of a Content-Disposition header.
fn filename_from_headers(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(CONTENT_DISPOSITION)?.to_str().ok()?;
    let re = Regex::new(r#"filename="?([^";]+)"?"#).ok()?;
    let name = re.captures(raw)?.get(1)?.as_str().trim().to_string();
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}
