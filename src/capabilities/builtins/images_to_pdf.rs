use crate::capabilities::core::{require_files, CapResult};
use crate::models::{ConversionOutput, ConversionRequest};
use crate::tools::{Tool, Workspace};
use capability_macros::capability;

/// Handler for the Images→PDF capability.
///
/// ImageMagick turns the uploaded images into one PDF, one page per image,
/// in upload order.
#[capability(
    kind = "ImagesToPdf",
    name = "Images to PDF",
    from_type = "jpg|jpeg|png[]",
    to_type = "pdf"
)]
async fn images_to_pdf(
    request: &ConversionRequest,
    workspace: &Workspace,
) -> CapResult<ConversionOutput> {
    let uploads = require_files(request)?;
    log::info!("/convert/images-to-pdf called with {} images", uploads.len());

    let output = workspace.file("images.pdf");

    let mut tool = Tool::new("magick");
    for upload in &uploads {
        tool = tool.arg(&upload.path);
    }
    tool.arg(&output).run().await?;

    Ok(ConversionOutput::new(
        output,
        "application/pdf",
        "images.pdf",
    ))
}
