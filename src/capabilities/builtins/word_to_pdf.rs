use crate::capabilities::core::{require_file, CapError, CapResult};
use crate::models::{ConversionOutput, ConversionRequest};
use crate::tools::{Tool, Workspace};
use capability_macros::capability;
use std::path::PathBuf;
use walkdir::WalkDir;

/// Handler for the Word→PDF capability.
///
/// Delegates to LibreOffice in headless mode. LibreOffice names the output
/// after the input stem, but rewrites some names, so a single produced PDF is
/// accepted as a fallback.
#[capability(
    kind = "WordToPdf",
    name = "Word to PDF",
    from_type = "docx|doc",
    to_type = "pdf"
)]
async fn word_to_pdf(
    request: &ConversionRequest,
    workspace: &Workspace,
) -> CapResult<ConversionOutput> {
    let upload = require_file(request)?;

    let run = Tool::new("soffice")
        .args(["--headless", "--convert-to", "pdf:writer_pdf_Export", "--outdir"])
        .arg(workspace.path())
        .arg(&upload.path)
        .run()
        .await?;

    let expected = workspace.file(&format!("{}.pdf", upload.stem()));
    let produced = if expected.exists() {
        expected
    } else {
        single_produced_pdf(workspace).ok_or_else(|| {
            CapError::internal(format!(
                "converted file not found; logs: {}",
                run.combined_logs()
            ))
        })?
    };

    let filename = produced
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("output.pdf")
        .to_string();
    Ok(ConversionOutput::new(produced, "application/pdf", filename))
}

/// The lone PDF LibreOffice left in the workspace, if exactly one exists.
fn single_produced_pdf(workspace: &Workspace) -> Option<PathBuf> {
    let mut pdfs: Vec<PathBuf> = WalkDir::new(workspace.path())
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "pdf"))
        .collect();

    if pdfs.len() == 1 {
        Some(pdfs.remove(0))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_produced_pdf() {
        let workspace = Workspace::new().unwrap();
        assert!(single_produced_pdf(&workspace).is_none());

        std::fs::write(workspace.file("out.pdf"), b"%PDF").unwrap();
        assert_eq!(
            single_produced_pdf(&workspace).unwrap(),
            workspace.file("out.pdf")
        );

        std::fs::write(workspace.file("other.pdf"), b"%PDF").unwrap();
        assert!(single_produced_pdf(&workspace).is_none());
    }
}
