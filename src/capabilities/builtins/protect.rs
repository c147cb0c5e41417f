use crate::capabilities::core::{require_file, require_param, CapResult};
use crate::models::{ConversionOutput, ConversionRequest};
use crate::tools::{Tool, Workspace};
use capability_macros::capability;

/// Handler for the Protect PDF capability.
///
/// AES-256 encryption via qpdf; the same password serves as user and owner
/// password.
#[capability(
    kind = "Protect",
    name = "Protect PDF",
    from_type = "pdf",
    to_type = "pdf"
)]
async fn protect_pdf(
    request: &ConversionRequest,
    workspace: &Workspace,
) -> CapResult<ConversionOutput> {
    let upload = require_file(request)?;
    let password = require_param(request, "password")?;

    let output = workspace.file("protected.pdf");

    Tool::new("qpdf")
        .arg("--encrypt")
        .arg(password)
        .arg(password)
        .args(["256", "--"])
        .arg(&upload.path)
        .arg(&output)
        .run()
        .await?;

    Ok(ConversionOutput::new(
        output,
        "application/pdf",
        "protected.pdf",
    ))
}
