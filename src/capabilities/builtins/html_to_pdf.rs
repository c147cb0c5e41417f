use crate::capabilities::core::{CapError, CapResult};
use crate::models::{ConversionOutput, ConversionRequest};
use crate::tools::{Tool, Workspace};
use capability_macros::capability;

/// Arguments shared by both wkhtmltopdf invocations.
const COMMON_ARGS: [&str; 7] = [
    "--enable-local-file-access",
    "--encoding",
    "utf-8",
    "--quiet",
    "--custom-header",
    "User-Agent",
    "Mozilla/5.0 Transformix",
];

/// Handler for the HTML→PDF capability.
///
/// Takes either a URL to render or raw HTML text; raw HTML is written to the
/// workspace and rendered from disk. The only capability with no file upload.
#[capability(
    kind = "HtmlToPdf",
    name = "HTML to PDF",
    from_type = "html|url",
    to_type = "pdf"
)]
async fn html_to_pdf(
    request: &ConversionRequest,
    workspace: &Workspace,
) -> CapResult<ConversionOutput> {
    let url = request.param("url");
    let html = request.param("html");
    log::info!(
        "/convert/html-to-pdf called: url? {}, html? {}",
        url.is_some(),
        html.is_some()
    );

    let output = workspace.file("page.pdf");

    let source = match (url, html) {
        (Some(url), _) => url.to_string(),
        (None, Some(html)) => {
            let html_path = workspace.file("index.html");
            std::fs::write(&html_path, html)?;
            html_path.display().to_string()
        }
        (None, None) => return Err(CapError::bad_request("Provide html or url")),
    };

    Tool::new("wkhtmltopdf")
        .args(COMMON_ARGS)
        .arg(&source)
        .arg(&output)
        .run()
        .await?;

    let size = std::fs::metadata(&output).map(|m| m.len()).unwrap_or(0);
    if size == 0 {
        return Err(CapError::bad_request("wkhtmltopdf produced empty output"));
    }
    log::info!("/convert/html-to-pdf produced {} bytes", size);

    Ok(ConversionOutput::new(output, "application/pdf", "page.pdf"))
}
