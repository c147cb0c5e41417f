use crate::capabilities::core::{require_file, require_param, CapResult};
use crate::models::{ConversionOutput, ConversionRequest};
use crate::tools::{Tool, Workspace};
use capability_macros::capability;

/// Handler for the Unlock PDF capability.
///
/// qpdf decrypts with the supplied password; a wrong password surfaces as a
/// tool failure carrying qpdf's own message.
#[capability(
    kind = "Unlock",
    name = "Unlock PDF",
    from_type = "pdf",
    to_type = "pdf"
)]
async fn unlock_pdf(
    request: &ConversionRequest,
    workspace: &Workspace,
) -> CapResult<ConversionOutput> {
    let upload = require_file(request)?;
    let password = require_param(request, "password")?;

    let output = workspace.file("unlocked.pdf");

    Tool::new("qpdf")
        .arg(format!("--password={}", password))
        .arg("--decrypt")
        .arg(&upload.path)
        .arg(&output)
        .run()
        .await?;

    Ok(ConversionOutput::new(
        output,
        "application/pdf",
        "unlocked.pdf",
    ))
}
