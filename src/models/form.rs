//! Typed upload-form schemas.
//!
//! Each capability advertises a [`FormSpec`] in the listing: the shape of the
//! primary upload plus an ordered list of extra fields with defaults and
//! constraints. Clients render forms from the schema alone; the endpoint
//! string is never inspected.

use super::capability::CapabilityKind;
use serde::{Deserialize, Serialize};

/// What the primary upload of a capability looks like.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum InputShape {
    /// Exactly one required file, multipart field `file`.
    SingleFile,
    /// One or more files, repeated multipart field `files`.
    FileList { accept: FileFilter },
    /// No file input; textual fields carry the payload.
    TextOnly,
}

/// Client-side pick filter for file inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileFilter {
    Pdf,
    Image,
}

/// One extra form field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub required: bool,
    #[serde(flatten)]
    pub kind: FieldKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    Number {
        #[serde(skip_serializing_if = "Option::is_none")]
        default: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        step: Option<f64>,
    },
    Text {
        #[serde(skip_serializing_if = "Option::is_none")]
        default: Option<String>,
    },
    Choice {
        options: Vec<String>,
        default: String,
    },
    /// A secondary file input (e.g. a watermark image).
    File { accept: FileFilter },
}

impl FieldSpec {
    pub fn number(name: &str) -> Self {
        Self {
            name: name.to_string(),
            required: false,
            kind: FieldKind::Number {
                default: None,
                min: None,
                max: None,
                step: None,
            },
        }
    }

    pub fn text(name: &str) -> Self {
        Self {
            name: name.to_string(),
            required: false,
            kind: FieldKind::Text { default: None },
        }
    }

    pub fn choice(name: &str, options: &[&str], default: &str) -> Self {
        Self {
            name: name.to_string(),
            required: false,
            kind: FieldKind::Choice {
                options: options.iter().map(|o| o.to_string()).collect(),
                default: default.to_string(),
            },
        }
    }

    pub fn file(name: &str, accept: FileFilter) -> Self {
        Self {
            name: name.to_string(),
            required: false,
            kind: FieldKind::File { accept },
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn default_number(mut self, value: f64) -> Self {
        if let FieldKind::Number { default, .. } = &mut self.kind {
            *default = Some(value);
        }
        self
    }

    pub fn default_text(mut self, value: &str) -> Self {
        if let FieldKind::Text { default } = &mut self.kind {
            *default = Some(value.to_string());
        }
        self
    }

    pub fn range(mut self, lo: f64, hi: f64) -> Self {
        if let FieldKind::Number { min, max, .. } = &mut self.kind {
            *min = Some(lo);
            *max = Some(hi);
        }
        self
    }

    pub fn step(mut self, value: f64) -> Self {
        if let FieldKind::Number { step, .. } = &mut self.kind {
            *step = Some(value);
        }
        self
    }

    /// Default value as it would travel on the wire, if the field has one.
    pub fn default_value(&self) -> Option<String> {
        match &self.kind {
            FieldKind::Number { default, .. } => default.map(format_number),
            FieldKind::Text { default } => default.clone(),
            FieldKind::Choice { default, .. } => Some(default.clone()),
            FieldKind::File { .. } => None,
        }
    }

    /// Whether this field is a secondary file input rather than a scalar.
    pub fn is_file(&self) -> bool {
        matches!(self.kind, FieldKind::File { .. })
    }
}

/// Format a numeric default the way a form would submit it: integral values
/// without a trailing ".0".
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// The complete upload-form schema of one capability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSpec {
    pub input: InputShape,
    pub fields: Vec<FieldSpec>,
}

impl FormSpec {
    /// The fixed schema for a capability kind.
    pub fn for_kind(kind: CapabilityKind) -> FormSpec {
        use CapabilityKind::*;

        let single = |fields: Vec<FieldSpec>| FormSpec {
            input: InputShape::SingleFile,
            fields,
        };

        match kind {
            WordToPdf | PdfToWord | PdfToJpg | JpgToPdf => single(vec![]),
            ImagesToPdf => FormSpec {
                input: InputShape::FileList {
                    accept: FileFilter::Image,
                },
                fields: vec![],
            },
            Merge => FormSpec {
                input: InputShape::FileList {
                    accept: FileFilter::Pdf,
                },
                fields: vec![],
            },
            Compress => single(vec![FieldSpec::number("quality")
                .default_number(85.0)
                .range(0.0, 100.0)]),
            Split => single(vec![
                FieldSpec::number("from_page").default_number(1.0),
                FieldSpec::number("to_page"),
            ]),
            Rotate => single(vec![FieldSpec::number("degrees").default_number(90.0)]),
            Protect | Unlock => single(vec![FieldSpec::text("password").required()]),
            HtmlToPdf => FormSpec {
                input: InputShape::TextOnly,
                fields: vec![FieldSpec::text("url"), FieldSpec::text("html")],
            },
            Watermark => single(vec![
                FieldSpec::text("text"),
                FieldSpec::file("image", FileFilter::Image),
                FieldSpec::number("opacity")
                    .default_number(0.2)
                    .range(0.0, 1.0)
                    .step(0.05),
                FieldSpec::number("size").default_number(48.0),
            ]),
            PageNumbers => single(vec![
                FieldSpec::number("start").default_number(1.0),
                FieldSpec::text("format").default_text("{n}"),
                FieldSpec::choice(
                    "position",
                    &["bottom-right", "bottom-left", "top-right", "top-left"],
                    "bottom-right",
                ),
                FieldSpec::number("size").default_number(10.0),
            ]),
            DeletePages => single(vec![FieldSpec::text("pages").required()]),
            Reorder => single(vec![FieldSpec::text("order").required()]),
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// True when the form takes no file upload at all.
    pub fn is_text_only(&self) -> bool {
        self.input == InputShape::TextOnly
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_file_kinds_have_single_input() {
        for kind in [
            CapabilityKind::WordToPdf,
            CapabilityKind::Compress,
            CapabilityKind::Split,
            CapabilityKind::Watermark,
            CapabilityKind::DeletePages,
        ] {
            assert_eq!(kind.form().input, InputShape::SingleFile, "{:?}", kind);
        }
    }

    #[test]
    fn test_multi_file_kinds_do_not_render_single_input() {
        assert_eq!(
            CapabilityKind::Merge.form().input,
            InputShape::FileList {
                accept: FileFilter::Pdf
            }
        );
        assert_eq!(
            CapabilityKind::ImagesToPdf.form().input,
            InputShape::FileList {
                accept: FileFilter::Image
            }
        );
        assert_eq!(CapabilityKind::HtmlToPdf.form().input, InputShape::TextOnly);
    }

    #[test]
    fn test_compress_quality_default() {
        let form = CapabilityKind::Compress.form();
        let quality = form.field("quality").unwrap();
        assert_eq!(quality.default_value().as_deref(), Some("85"));
        assert!(!quality.required);
    }

    #[test]
    fn test_split_to_page_has_no_default() {
        let form = CapabilityKind::Split.form();
        assert_eq!(
            form.field("from_page").unwrap().default_value().as_deref(),
            Some("1")
        );
        assert_eq!(form.field("to_page").unwrap().default_value(), None);
    }

    #[test]
    fn test_html_to_pdf_fields_individually_optional() {
        let form = CapabilityKind::HtmlToPdf.form();
        assert!(!form.field("url").unwrap().required);
        assert!(!form.field("html").unwrap().required);
    }

    #[test]
    fn test_watermark_schema() {
        let form = CapabilityKind::Watermark.form();
        assert!(form.field("image").unwrap().is_file());
        assert_eq!(
            form.field("opacity").unwrap().default_value().as_deref(),
            Some("0.2")
        );
        assert_eq!(
            form.field("size").unwrap().default_value().as_deref(),
            Some("48")
        );
    }

    #[test]
    fn test_page_numbers_schema() {
        let form = CapabilityKind::PageNumbers.form();
        assert_eq!(
            form.field("format").unwrap().default_value().as_deref(),
            Some("{n}")
        );
        assert_eq!(
            form.field("position").unwrap().default_value().as_deref(),
            Some("bottom-right")
        );
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(85.0), "85");
        assert_eq!(format_number(0.2), "0.2");
        assert_eq!(format_number(0.05), "0.05");
    }

    #[test]
    fn test_schema_wire_round_trip() {
        let form = CapabilityKind::PageNumbers.form();
        let json = serde_json::to_string(&form).unwrap();
        let parsed: FormSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, form);
    }
}
