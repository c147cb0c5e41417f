use super::page_count;
use crate::capabilities::core::{int_param, opt_int_param, require_file, CapError, CapResult};
use crate::models::{ConversionOutput, ConversionRequest};
use crate::tools::{Tool, Workspace};
use capability_macros::capability;

/// Handler for the Split PDF capability.
///
/// Extracts an inclusive 1-based page window. `to_page` defaults to the last
/// page of the document.
#[capability(
    kind = "Split",
    name = "Split PDF",
    from_type = "pdf",
    to_type = "pdf[]"
)]
async fn split_pdf(
    request: &ConversionRequest,
    workspace: &Workspace,
) -> CapResult<ConversionOutput> {
    let upload = require_file(request)?;

    let npages = page_count(&upload.path).await?;
    let from_page = int_param(request, "from_page", 1)?;
    let to_page = opt_int_param(request, "to_page")?.unwrap_or(npages as i64);

    if from_page < 1 {
        return Err(CapError::bad_request("from_page must be at least 1"));
    }
    if to_page < from_page {
        return Err(CapError::bad_request("to_page must not precede from_page"));
    }
    if to_page > npages as i64 {
        return Err(CapError::bad_request(format!(
            "to_page {} is out of range (document has {} pages)",
            to_page, npages
        )));
    }

    let filename = format!("split_{}_{}.pdf", from_page, to_page);
    let output = workspace.file(&filename);

    Tool::new("qpdf")
        .arg(&upload.path)
        .args(["--pages", "."])
        .arg(format!("{}-{}", from_page, to_page))
        .arg("--")
        .arg(&output)
        .run()
        .await?;

    Ok(ConversionOutput::new(output, "application/pdf", filename))
}
