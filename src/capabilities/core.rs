use crate::models::{Capability, CapabilityKind, ConversionOutput, ConversionRequest, UploadedFile};
use crate::tools::{ToolError, Workspace};
use async_trait::async_trait;
use std::fmt;

/// Result type for capability execution
pub type CapResult<T> = Result<T, CapError>;

/// Failure of one conversion attempt.
#[derive(Debug)]
pub enum CapError {
    /// The request is at fault: missing upload, bad parameter, or the tool
    /// rejected the input. Maps to HTTP 400.
    BadRequest(String),
    /// The conversion broke on our side: workspace I/O, missing output after
    /// a clean tool exit. Maps to HTTP 500.
    Internal(String),
}

impl CapError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        CapError::BadRequest(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        CapError::Internal(message.into())
    }

    /// The human-readable message, independent of classification.
    pub fn message(&self) -> &str {
        match self {
            CapError::BadRequest(msg) | CapError::Internal(msg) => msg,
        }
    }
}

impl fmt::Display for CapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for CapError {}

impl From<ToolError> for CapError {
    fn from(err: ToolError) -> Self {
        match err {
            // A failing tool almost always means the input was bad.
            ToolError::Failed { .. } => CapError::BadRequest(err.to_string()),
            ToolError::NotFound(_) | ToolError::Io { .. } => CapError::Internal(err.to_string()),
        }
    }
}

impl From<std::io::Error> for CapError {
    fn from(err: std::io::Error) -> Self {
        CapError::Internal(format!("workspace I/O failed: {}", err))
    }
}

/// Core trait for conversion capability handlers.
///
/// All capabilities must implement this trait. Use the `#[capability]` macro
/// to avoid boilerplate code. The endpoint and the advertised form schema are
/// both derived from the handler's [`CapabilityKind`].
#[async_trait]
pub trait CapabilityHandler: Send + Sync {
    /// The kind this handler serves.
    fn kind(&self) -> CapabilityKind;

    /// Human-readable label (e.g. "Merge PDF")
    fn name(&self) -> &str;

    /// Source-format tag (e.g. "pdf[]")
    fn from_type(&self) -> &str;

    /// Target-format tag (e.g. "pdf")
    fn to_type(&self) -> &str;

    fn endpoint(&self) -> &'static str {
        self.kind().endpoint()
    }

    /// The wire record advertised in the capability listing.
    fn descriptor(&self) -> Capability {
        Capability {
            name: self.name().to_string(),
            from_type: self.from_type().to_string(),
            to_type: self.to_type().to_string(),
            endpoint: self.endpoint().to_string(),
            form: self.kind().form(),
        }
    }

    /// Run the conversion inside the request workspace and return the
    /// produced file.
    async fn execute(
        &self,
        request: &ConversionRequest,
        workspace: &Workspace,
    ) -> CapResult<ConversionOutput>;
}

// Parameter access helpers shared by the builtin handlers. Extraction has
// already dropped blank parts, so "absent" and "left blank" look the same
// here and both fall back to the default.

/// The single required upload (multipart field `file`).
pub fn require_file(request: &ConversionRequest) -> CapResult<&UploadedFile> {
    request
        .files_for("file")
        .into_iter()
        .next()
        .ok_or_else(|| CapError::bad_request("no file uploaded"))
}

/// The required upload list (repeated multipart field `files`).
pub fn require_files(request: &ConversionRequest) -> CapResult<Vec<&UploadedFile>> {
    let files = request.files_for("files");
    if files.is_empty() {
        return Err(CapError::bad_request("no files uploaded"));
    }
    Ok(files)
}

/// A required non-empty text parameter.
pub fn require_param<'a>(request: &'a ConversionRequest, name: &str) -> CapResult<&'a str> {
    request
        .param(name)
        .ok_or_else(|| CapError::bad_request(format!("missing required field '{}'", name)))
}

/// An integer parameter with a default.
pub fn int_param(request: &ConversionRequest, name: &str, default: i64) -> CapResult<i64> {
    match request.param(name) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| CapError::bad_request(format!("field '{}' must be a number", name))),
    }
}

/// An optional integer parameter.
pub fn opt_int_param(request: &ConversionRequest, name: &str) -> CapResult<Option<i64>> {
    match request.param(name) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| CapError::bad_request(format!("field '{}' must be a number", name))),
    }
}

/// A float parameter with a default.
pub fn float_param(request: &ConversionRequest, name: &str, default: f64) -> CapResult<f64> {
    match request.param(name) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| CapError::bad_request(format!("field '{}' must be a number", name))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_with(params: &[(&str, &str)]) -> ConversionRequest {
        let mut request = ConversionRequest::default();
        for (k, v) in params {
            request.params.insert(k.to_string(), v.to_string());
        }
        request
    }

    #[test]
    fn test_require_file_missing() {
        let request = ConversionRequest::default();
        let err = require_file(&request).unwrap_err();
        assert!(matches!(err, CapError::BadRequest(_)));
        assert_eq!(err.message(), "no file uploaded");
    }

    #[test]
    fn test_int_param_default_and_parse() {
        let request = request_with(&[("quality", "40")]);
        assert_eq!(int_param(&request, "quality", 85).unwrap(), 40);
        assert_eq!(int_param(&request, "degrees", 90).unwrap(), 90);
    }

    #[test]
    fn test_int_param_rejects_junk() {
        let request = request_with(&[("quality", "high")]);
        let err = int_param(&request, "quality", 85).unwrap_err();
        assert!(err.message().contains("quality"));
    }

    #[test]
    fn test_float_param() {
        let request = request_with(&[("opacity", "0.35")]);
        assert_eq!(float_param(&request, "opacity", 0.2).unwrap(), 0.35);
        assert_eq!(float_param(&request, "size", 48.0).unwrap(), 48.0);
    }

    #[test]
    fn test_tool_error_classification() {
        let failed = ToolError::Failed {
            tool: "qpdf",
            logs: "damaged".to_string(),
        };
        assert!(matches!(CapError::from(failed), CapError::BadRequest(_)));

        let missing = ToolError::NotFound("qpdf");
        assert!(matches!(CapError::from(missing), CapError::Internal(_)));
    }
}
