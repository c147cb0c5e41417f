use crate::capabilities::core::{require_files, CapResult};
use crate::models::{ConversionOutput, ConversionRequest};
use crate::tools::{Tool, Workspace};
use capability_macros::capability;

/// Handler for the Merge PDF capability.
///
/// qpdf concatenates the uploads in arrival order.
#[capability(
    kind = "Merge",
    name = "Merge PDF",
    from_type = "pdf[]",
    to_type = "pdf"
)]
async fn merge_pdf(
    request: &ConversionRequest,
    workspace: &Workspace,
) -> CapResult<ConversionOutput> {
    let uploads = require_files(request)?;
    log::info!("/pdf/merge called with {} files", uploads.len());

    let output = workspace.file("merged.pdf");

    let mut tool = Tool::new("qpdf").args(["--empty", "--pages"]);
    for upload in &uploads {
        tool = tool.arg(&upload.path);
    }
    tool.arg("--").arg(&output).run().await?;

    Ok(ConversionOutput::new(
        output,
        "application/pdf",
        "merged.pdf",
    ))
}
