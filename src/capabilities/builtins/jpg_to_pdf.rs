use crate::capabilities::core::{require_file, CapResult};
use crate::models::{ConversionOutput, ConversionRequest};
use crate::tools::{Tool, Workspace};
use capability_macros::capability;

/// Handler for the JPG→PDF capability.
///
/// One image in, one single-page PDF out, via ImageMagick.
#[capability(
    kind = "JpgToPdf",
    name = "JPG to PDF",
    from_type = "jpg|jpeg|png",
    to_type = "pdf"
)]
async fn jpg_to_pdf(
    request: &ConversionRequest,
    workspace: &Workspace,
) -> CapResult<ConversionOutput> {
    let upload = require_file(request)?;

    let filename = format!("{}.pdf", upload.stem());
    let output = workspace.file(&filename);

    Tool::new("magick")
        .arg(&upload.path)
        .arg(&output)
        .run()
        .await?;

    Ok(ConversionOutput::new(output, "application/pdf", filename))
}
