use crate::capabilities::core::{int_param, require_file, CapError, CapResult};
use crate::models::{ConversionOutput, ConversionRequest};
use crate::tools::{Tool, Workspace};
use capability_macros::capability;

/// Handler for the Compress PDF capability.
///
/// Ghostscript rewrite with ebook presets; `quality` feeds the JPEG encoder.
#[capability(
    kind = "Compress",
    name = "Compress PDF",
    from_type = "pdf",
    to_type = "pdf"
)]
async fn compress_pdf(
    request: &ConversionRequest,
    workspace: &Workspace,
) -> CapResult<ConversionOutput> {
    let upload = require_file(request)?;

    let quality = int_param(request, "quality", 85)?;
    if !(0..=100).contains(&quality) {
        return Err(CapError::bad_request("quality must be between 0 and 100"));
    }

    let filename = format!("compressed_{}.pdf", upload.stem());
    let output = workspace.file(&filename);

    Tool::new("gs")
        .args([
            "-sDEVICE=pdfwrite",
            "-dCompatibilityLevel=1.4",
            "-dPDFSETTINGS=/ebook",
        ])
        .arg(format!("-dJPEGQ={}", quality))
        .args(["-dNOPAUSE", "-dQUIET", "-dBATCH"])
        .arg(format!("-sOutputFile={}", output.display()))
        .arg(&upload.path)
        .run()
        .await?;

    Ok(ConversionOutput::new(output, "application/pdf", filename))
}
