use super::page_count;
use crate::capabilities::core::{require_file, require_param, CapError, CapResult};
use crate::models::{ConversionOutput, ConversionRequest};
use crate::tools::{Tool, Workspace};
use crate::utils::pages::{parse_page_list, to_range_syntax};
use capability_macros::capability;

/// Handler for the Reorder Pages capability.
///
/// The order list is a page selection, applied in written order. Pages may
/// repeat and pages left out are dropped; every index must exist in the
/// document.
#[capability(
    kind = "Reorder",
    name = "Reorder Pages",
    from_type = "pdf",
    to_type = "pdf"
)]
async fn reorder_pdf(
    request: &ConversionRequest,
    workspace: &Workspace,
) -> CapResult<ConversionOutput> {
    let upload = require_file(request)?;
    let spec = require_param(request, "order")?;

    let npages = page_count(&upload.path).await?;
    let order = parse_page_list(spec, npages).map_err(CapError::bad_request)?;

    let output = workspace.file("reordered.pdf");

    Tool::new("qpdf")
        .arg(&upload.path)
        .args(["--pages", "."])
        .arg(to_range_syntax(&order))
        .arg("--")
        .arg(&output)
        .run()
        .await?;

    Ok(ConversionOutput::new(
        output,
        "application/pdf",
        "reordered.pdf",
    ))
}
