//! Icon selection for capability cards.
//!
//! A fixed, priority-ordered keyword scan over the capability *name*; the
//! first hit wins, so "Merge and Split" is a merge card.

/// Card icons, one per recognized capability family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Merge,
    Split,
    Rotate,
    Lock,
    Image,
    Html,
    Compress,
    Document,
    /// Fallback for anything unrecognized.
    File,
}

impl Icon {
    /// Glyph shown on the card.
    pub fn glyph(&self) -> &'static str {
        match self {
            Icon::Merge => "⧉",
            Icon::Split => "✂",
            Icon::Rotate => "↻",
            Icon::Lock => "🔒",
            Icon::Image => "🖼",
            Icon::Html => "🌐",
            Icon::Compress => "🗜",
            Icon::Document => "📄",
            Icon::File => "📁",
        }
    }
}

/// Choose the icon for a capability name. Checks run in a fixed priority
/// order and the first match wins.
pub fn icon_for(name: &str) -> Icon {
    let name = name.to_lowercase();

    if name.contains("merge") {
        Icon::Merge
    } else if name.contains("split") {
        Icon::Split
    } else if name.contains("rotate") {
        Icon::Rotate
    } else if name.contains("protect") || name.contains("unlock") {
        Icon::Lock
    } else if name.contains("image") || name.contains("jpg") {
        Icon::Image
    } else if name.contains("html") {
        Icon::Html
    } else if name.contains("compress") {
        Icon::Compress
    } else if name.contains("pdf") && name.contains("word") {
        Icon::Document
    } else {
        Icon::File
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_match_wins() {
        assert_eq!(icon_for("Merge and Split"), Icon::Merge);
        assert_eq!(icon_for("Split then merge"), Icon::Merge);
    }

    #[test]
    fn test_family_keywords() {
        assert_eq!(icon_for("Merge PDF"), Icon::Merge);
        assert_eq!(icon_for("Split PDF"), Icon::Split);
        assert_eq!(icon_for("Rotate PDF"), Icon::Rotate);
        assert_eq!(icon_for("Protect PDF"), Icon::Lock);
        assert_eq!(icon_for("Unlock PDF"), Icon::Lock);
        assert_eq!(icon_for("JPG to PDF"), Icon::Image);
        assert_eq!(icon_for("Images to PDF"), Icon::Image);
        assert_eq!(icon_for("HTML to PDF"), Icon::Html);
        assert_eq!(icon_for("Compress PDF"), Icon::Compress);
    }

    #[test]
    fn test_pdf_word_combination_and_fallback() {
        assert_eq!(icon_for("Word to PDF"), Icon::Document);
        assert_eq!(icon_for("PDF to Word"), Icon::Document);
        assert_eq!(icon_for("Something Else"), Icon::File);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(icon_for("MERGE pdf"), Icon::Merge);
    }
}
