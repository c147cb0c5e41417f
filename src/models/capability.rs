use super::form::FormSpec;
use serde::{Deserialize, Serialize};

/// A single transformation the server exposes.
///
/// This is the wire record returned by the capability listing. `endpoint` is
/// one-to-one with a [`CapabilityKind`]; `form` carries the typed parameter
/// schema so clients never have to inspect the endpoint string to decide
/// which inputs to render.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capability {
    pub name: String,
    /// Short source-format tag, e.g. "pdf", "docx|doc", "pdf[]".
    pub from_type: String,
    /// Short target-format tag.
    pub to_type: String,
    /// Path fragment identifying the server operation, e.g. "/pdf/merge".
    pub endpoint: String,
    pub form: FormSpec,
}

/// The closed set of operations behind the endpoint strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CapabilityKind {
    WordToPdf,
    PdfToWord,
    PdfToJpg,
    JpgToPdf,
    ImagesToPdf,
    Compress,
    Merge,
    Split,
    Rotate,
    Protect,
    Unlock,
    HtmlToPdf,
    Watermark,
    PageNumbers,
    DeletePages,
    Reorder,
}

impl CapabilityKind {
    /// Every kind, in the order the server lists them.
    pub const ALL: [CapabilityKind; 16] = [
        CapabilityKind::WordToPdf,
        CapabilityKind::PdfToWord,
        CapabilityKind::PdfToJpg,
        CapabilityKind::JpgToPdf,
        CapabilityKind::ImagesToPdf,
        CapabilityKind::Compress,
        CapabilityKind::Merge,
        CapabilityKind::Split,
        CapabilityKind::Rotate,
        CapabilityKind::Protect,
        CapabilityKind::Unlock,
        CapabilityKind::HtmlToPdf,
        CapabilityKind::Watermark,
        CapabilityKind::PageNumbers,
        CapabilityKind::DeletePages,
        CapabilityKind::Reorder,
    ];

    /// The endpoint path this kind is served under.
    pub fn endpoint(&self) -> &'static str {
        match self {
            CapabilityKind::WordToPdf => "/convert/word-to-pdf",
            CapabilityKind::PdfToWord => "/convert/pdf-to-word",
            CapabilityKind::PdfToJpg => "/convert/pdf-to-jpg",
            CapabilityKind::JpgToPdf => "/convert/jpg-to-pdf",
            CapabilityKind::ImagesToPdf => "/convert/images-to-pdf",
            CapabilityKind::Compress => "/compress/pdf",
            CapabilityKind::Merge => "/pdf/merge",
            CapabilityKind::Split => "/pdf/split",
            CapabilityKind::Rotate => "/pdf/rotate",
            CapabilityKind::Protect => "/pdf/protect",
            CapabilityKind::Unlock => "/pdf/unlock",
            CapabilityKind::HtmlToPdf => "/convert/html-to-pdf",
            CapabilityKind::Watermark => "/pdf/watermark",
            CapabilityKind::PageNumbers => "/pdf/page-numbers",
            CapabilityKind::DeletePages => "/pdf/delete-pages",
            CapabilityKind::Reorder => "/pdf/reorder",
        }
    }

    /// Resolve an endpoint path back to its kind.
    pub fn from_endpoint(endpoint: &str) -> Option<CapabilityKind> {
        CapabilityKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.endpoint() == endpoint)
    }

    /// The parameter schema advertised for this kind.
    pub fn form(&self) -> FormSpec {
        FormSpec::for_kind(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_mapping_round_trips() {
        for kind in CapabilityKind::ALL {
            assert_eq!(CapabilityKind::from_endpoint(kind.endpoint()), Some(kind));
        }
    }

    #[test]
    fn test_endpoints_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for kind in CapabilityKind::ALL {
            assert!(seen.insert(kind.endpoint()), "duplicate endpoint for {:?}", kind);
        }
    }

    #[test]
    fn test_unknown_endpoint() {
        assert_eq!(CapabilityKind::from_endpoint("/pdf/frobnicate"), None);
    }

    #[test]
    fn test_capability_serialization() {
        let cap = Capability {
            name: "Merge PDF".to_string(),
            from_type: "pdf[]".to_string(),
            to_type: "pdf".to_string(),
            endpoint: CapabilityKind::Merge.endpoint().to_string(),
            form: CapabilityKind::Merge.form(),
        };

        let json = serde_json::to_string(&cap).unwrap();
        assert!(json.contains("/pdf/merge"));
        assert!(json.contains("pdf[]"));

        let parsed: Capability = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.endpoint, "/pdf/merge");
        assert_eq!(parsed.form, CapabilityKind::Merge.form());
    }
}
