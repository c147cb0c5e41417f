use crate::capabilities::core::{require_file, CapError, CapResult};
use crate::models::{ConversionOutput, ConversionRequest};
use crate::tools::{Tool, Workspace};
use capability_macros::capability;

const DOCX_MEDIA_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Handler for the PDF→Word capability.
///
/// LibreOffice again, with the PDF import filter selected explicitly so the
/// document lands in Writer rather than Draw.
#[capability(
    kind = "PdfToWord",
    name = "PDF to Word",
    from_type = "pdf",
    to_type = "docx"
)]
async fn pdf_to_word(
    request: &ConversionRequest,
    workspace: &Workspace,
) -> CapResult<ConversionOutput> {
    let upload = require_file(request)?;

    let run = Tool::new("soffice")
        .args([
            "--headless",
            "--infilter=writer_pdf_import",
            "--convert-to",
            "docx",
            "--outdir",
        ])
        .arg(workspace.path())
        .arg(&upload.path)
        .run()
        .await?;

    let produced = workspace.file(&format!("{}.docx", upload.stem()));
    if !produced.exists() {
        return Err(CapError::internal(format!(
            "converted file not found; logs: {}",
            run.combined_logs()
        )));
    }

    let filename = format!("{}.docx", upload.stem());
    Ok(ConversionOutput::new(produced, DOCX_MEDIA_TYPE, filename))
}
