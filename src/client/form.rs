//! The dynamic upload form.
//!
//! An [`UploadForm`] is the transient draft for one selected capability:
//! chosen files plus scalar values, validated and flattened into a
//! [`SubmissionPlan`] (the exact multipart layout) without any network I/O.
//! Re-opening a form always starts from a pristine draft.

use crate::models::{Capability, InputShape};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

/// A local validation failure: surfaced on the form, no network call issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError(pub String);

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ValidationError {}

/// One part of the multipart submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartValue {
    Text(String),
    File(PathBuf),
}

/// The deterministic multipart layout built from a validated draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionPlan {
    pub endpoint: String,
    pub parts: Vec<(String, PartValue)>,
}

impl SubmissionPlan {
    /// The text value of a named part, if present.
    pub fn text_part(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|(n, v)| match v {
            PartValue::Text(text) if n == name => Some(text.as_str()),
            _ => None,
        })
    }

    /// Number of file parts under the given field name.
    pub fn file_count(&self, name: &str) -> usize {
        self.parts
            .iter()
            .filter(|(n, v)| n == name && matches!(v, PartValue::File(_)))
            .count()
    }
}

/// The upload form for one selected capability.
pub struct UploadForm {
    capability: Capability,
    files: Vec<PathBuf>,
    extra_files: HashMap<String, PathBuf>,
    values: HashMap<String, String>,
    busy: bool,
}

impl UploadForm {
    /// Open a fresh form. Every open starts with an empty draft; nothing
    /// leaks from earlier selections.
    pub fn open(capability: &Capability) -> Self {
        Self {
            capability: capability.clone(),
            files: Vec::new(),
            extra_files: HashMap::new(),
            values: HashMap::new(),
            busy: false,
        }
    }

    pub fn capability(&self) -> &Capability {
        &self.capability
    }

    /// Add a primary file to the draft.
    pub fn add_file(&mut self, path: impl Into<PathBuf>) {
        self.files.push(path.into());
    }

    /// Set a scalar field. The field must exist in the schema and must not
    /// be a file input.
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) -> Result<(), ValidationError> {
        match self.capability.form.field(name) {
            Some(field) if !field.is_file() => {
                self.values.insert(name.to_string(), value.into());
                Ok(())
            }
            Some(_) => Err(ValidationError(format!(
                "field '{}' takes a file, not a value",
                name
            ))),
            None => Err(ValidationError(format!(
                "capability '{}' has no field '{}'",
                self.capability.name, name
            ))),
        }
    }

    /// Attach a secondary file field (e.g. a watermark image).
    pub fn set_extra_file(
        &mut self,
        name: &str,
        path: impl Into<PathBuf>,
    ) -> Result<(), ValidationError> {
        match self.capability.form.field(name) {
            Some(field) if field.is_file() => {
                self.extra_files.insert(name.to_string(), path.into());
                Ok(())
            }
            _ => Err(ValidationError(format!(
                "capability '{}' has no file field '{}'",
                self.capability.name, name
            ))),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Validate the draft and hand out the submission plan, marking the form
    /// busy. A second call while busy is rejected locally.
    pub fn begin_submit(&mut self) -> Result<SubmissionPlan, ValidationError> {
        if self.busy {
            return Err(ValidationError(
                "a submission is already in progress".to_string(),
            ));
        }
        let plan = self.plan()?;
        self.busy = true;
        Ok(plan)
    }

    /// Clear the busy flag once the transfer finished (either way).
    pub fn finish_submit(&mut self) {
        self.busy = false;
    }

    fn plan(&self) -> Result<SubmissionPlan, ValidationError> {
        let form = &self.capability.form;
        let mut parts: Vec<(String, PartValue)> = Vec::new();

        match &form.input {
            InputShape::SingleFile => {
                let file = self
                    .files
                    .first()
                    .ok_or_else(|| ValidationError("choose a file first".to_string()))?;
                parts.push(("file".to_string(), PartValue::File(file.clone())));
            }
            InputShape::FileList { .. } => {
                if self.files.is_empty() {
                    return Err(ValidationError("choose at least one file".to_string()));
                }
                for file in &self.files {
                    parts.push(("files".to_string(), PartValue::File(file.clone())));
                }
            }
            InputShape::TextOnly => {
                let url = self.values.get("url").map(String::as_str).unwrap_or("");
                let html = self.values.get("html").map(String::as_str).unwrap_or("");
                if url.is_empty() && html.is_empty() {
                    return Err(ValidationError(
                        "provide a URL or HTML text".to_string(),
                    ));
                }
            }
        }

        for field in &form.fields {
            if field.is_file() {
                if let Some(path) = self.extra_files.get(&field.name) {
                    parts.push((field.name.clone(), PartValue::File(path.clone())));
                }
                continue;
            }

            // Entered value, else declared default, else an empty part.
            let value = self
                .values
                .get(&field.name)
                .cloned()
                .filter(|v| !v.is_empty())
                .or_else(|| field.default_value())
                .unwrap_or_default();

            if field.required && value.is_empty() {
                return Err(ValidationError(format!(
                    "field '{}' is required",
                    field.name
                )));
            }

            parts.push((field.name.clone(), PartValue::Text(value)));
        }

        Ok(SubmissionPlan {
            endpoint: self.capability.endpoint.clone(),
            parts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CapabilityKind;

    fn capability(kind: CapabilityKind) -> Capability {
        Capability {
            name: format!("{:?}", kind),
            from_type: "pdf".to_string(),
            to_type: "pdf".to_string(),
            endpoint: kind.endpoint().to_string(),
            form: kind.form(),
        }
    }

    #[test]
    fn test_single_file_required() {
        let mut form = UploadForm::open(&capability(CapabilityKind::Compress));
        let err = form.begin_submit().unwrap_err();
        assert_eq!(err.0, "choose a file first");
        assert!(!form.is_busy());
    }

    #[test]
    fn test_file_list_required() {
        let mut form = UploadForm::open(&capability(CapabilityKind::Merge));
        assert_eq!(form.begin_submit().unwrap_err().0, "choose at least one file");
    }

    #[test]
    fn test_html_to_pdf_needs_url_or_html() {
        let mut form = UploadForm::open(&capability(CapabilityKind::HtmlToPdf));
        assert_eq!(form.begin_submit().unwrap_err().0, "provide a URL or HTML text");

        form.set_value("url", "https://example.org").unwrap();
        let plan = form.begin_submit().unwrap();
        assert_eq!(plan.text_part("url"), Some("https://example.org"));
        assert_eq!(plan.text_part("html"), Some(""));
        assert_eq!(plan.file_count("file"), 0);
    }

    #[test]
    fn test_compress_defaults_quality() {
        let mut form = UploadForm::open(&capability(CapabilityKind::Compress));
        form.add_file("in.pdf");
        let plan = form.begin_submit().unwrap();
        assert_eq!(plan.file_count("file"), 1);
        assert_eq!(plan.text_part("quality"), Some("85"));
    }

    #[test]
    fn test_split_submits_empty_to_page() {
        let mut form = UploadForm::open(&capability(CapabilityKind::Split));
        form.add_file("in.pdf");
        form.set_value("from_page", "3").unwrap();
        let plan = form.begin_submit().unwrap();
        assert_eq!(plan.text_part("from_page"), Some("3"));
        assert_eq!(plan.text_part("to_page"), Some(""));
    }

    #[test]
    fn test_merge_repeats_files_field() {
        let mut form = UploadForm::open(&capability(CapabilityKind::Merge));
        form.add_file("a.pdf");
        form.add_file("b.pdf");
        let plan = form.begin_submit().unwrap();
        assert_eq!(plan.file_count("files"), 2);
        assert_eq!(plan.file_count("file"), 0);
    }

    #[test]
    fn test_required_password_enforced() {
        let mut form = UploadForm::open(&capability(CapabilityKind::Protect));
        form.add_file("in.pdf");
        assert_eq!(form.begin_submit().unwrap_err().0, "field 'password' is required");

        form.set_value("password", "hunter2").unwrap();
        let plan = form.begin_submit().unwrap();
        assert_eq!(plan.text_part("password"), Some("hunter2"));
    }

    #[test]
    fn test_watermark_image_part() {
        let mut form = UploadForm::open(&capability(CapabilityKind::Watermark));
        form.add_file("in.pdf");
        form.set_value("text", "DRAFT").unwrap();
        form.set_extra_file("image", "logo.png").unwrap();
        let plan = form.begin_submit().unwrap();
        assert_eq!(plan.file_count("image"), 1);
        assert_eq!(plan.text_part("opacity"), Some("0.2"));
        assert_eq!(plan.text_part("size"), Some("48"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let mut form = UploadForm::open(&capability(CapabilityKind::Compress));
        assert!(form.set_value("qualty", "90").is_err());
        assert!(form.set_extra_file("image", "x.png").is_err());
    }

    #[test]
    fn test_busy_flag_blocks_double_submit() {
        let mut form = UploadForm::open(&capability(CapabilityKind::Compress));
        form.add_file("in.pdf");
        assert!(form.begin_submit().is_ok());
        assert!(form.is_busy());
        assert_eq!(
            form.begin_submit().unwrap_err().0,
            "a submission is already in progress"
        );

        form.finish_submit();
        assert!(form.begin_submit().is_ok());
    }

    #[test]
    fn test_reopen_resets_draft() {
        let cap = capability(CapabilityKind::Split);
        let mut form = UploadForm::open(&cap);
        form.add_file("in.pdf");
        form.set_value("from_page", "7").unwrap();

        let form = UploadForm::open(&cap);
        assert!(!form.is_busy());
        let mut form = form;
        assert_eq!(form.begin_submit().unwrap_err().0, "choose a file first");
    }
}
