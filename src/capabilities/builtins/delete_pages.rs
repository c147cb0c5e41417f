use super::page_count;
use crate::capabilities::core::{require_file, require_param, CapError, CapResult};
use crate::models::{ConversionOutput, ConversionRequest};
use crate::tools::{Tool, Workspace};
use crate::utils::pages::{complement, parse_page_list, to_range_syntax};
use capability_macros::capability;

/// Handler for the Delete Pages capability.
///
/// qpdf has no removal primitive, so the kept pages are selected instead:
/// parse the range list, complement it against the page count, and keep the
/// rest.
#[capability(
    kind = "DeletePages",
    name = "Delete Pages",
    from_type = "pdf",
    to_type = "pdf"
)]
async fn delete_pages_pdf(
    request: &ConversionRequest,
    workspace: &Workspace,
) -> CapResult<ConversionOutput> {
    let upload = require_file(request)?;
    let spec = require_param(request, "pages")?;

    let npages = page_count(&upload.path).await?;
    let doomed = parse_page_list(spec, npages).map_err(CapError::bad_request)?;

    let kept = complement(&doomed, npages);
    if kept.is_empty() {
        return Err(CapError::bad_request("cannot delete every page"));
    }

    let output = workspace.file("trimmed.pdf");

    Tool::new("qpdf")
        .arg(&upload.path)
        .args(["--pages", "."])
        .arg(to_range_syntax(&kept))
        .arg("--")
        .arg(&output)
        .run()
        .await?;

    Ok(ConversionOutput::new(
        output,
        "application/pdf",
        "trimmed.pdf",
    ))
}
