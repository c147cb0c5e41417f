use crate::capabilities::core::{float_param, int_param, require_file, CapError, CapResult};
use crate::models::{ConversionOutput, ConversionRequest};
use crate::tools::{Tool, Workspace};
use crate::utils::postscript::ps_escape;
use capability_macros::capability;
use std::path::{Path, PathBuf};

/// Handler for the Watermark capability.
///
/// Text marks are drawn by a Ghostscript page hook, centered and rotated 45°,
/// with opacity approximated by the gray level. Image marks become a stamp
/// PDF (ImageMagick, alpha multiplied by the opacity) overlaid on every page
/// with qpdf. When both are supplied the text pass runs first and the image
/// is stamped onto its result.
#[capability(
    kind = "Watermark",
    name = "Watermark PDF",
    from_type = "pdf",
    to_type = "pdf"
)]
async fn watermark_pdf(
    request: &ConversionRequest,
    workspace: &Workspace,
) -> CapResult<ConversionOutput> {
    let upload = require_file(request)?;

    let text = request.param("text");
    let image = request.files_for("image").into_iter().next();
    if text.is_none() && image.is_none() {
        return Err(CapError::bad_request("provide watermark text or image"));
    }

    let opacity = float_param(request, "opacity", 0.2)?.clamp(0.0, 1.0);
    let size = int_param(request, "size", 48)?;

    let mut current: PathBuf = upload.path.clone();

    if let Some(text) = text {
        let output = workspace.file("text-marked.pdf");
        run_text_mark(&current, &output, text, opacity, size).await?;
        current = output;
    }

    if let Some(image) = image {
        let stamp = workspace.file("stamp.pdf");
        Tool::new("magick")
            .arg(&image.path)
            .args(["-alpha", "set", "-channel", "A", "-evaluate", "multiply"])
            .arg(format!("{}", opacity))
            .arg("+channel")
            .arg(&stamp)
            .run()
            .await?;

        let output = workspace.file("watermarked.pdf");
        Tool::new("qpdf")
            .arg(&current)
            .arg("--overlay")
            .arg(&stamp)
            .args(["--repeat=1-z", "--"])
            .arg(&output)
            .run()
            .await?;
        current = output;
    }

    Ok(ConversionOutput::new(
        current,
        "application/pdf",
        "watermarked.pdf",
    ))
}

async fn run_text_mark(
    input: &Path,
    output: &Path,
    text: &str,
    opacity: f64,
    size: i64,
) -> CapResult<()> {
    let program = text_mark_program(text, opacity, size);
    Tool::new("gs")
        .args(["-q", "-dNOPAUSE", "-dBATCH", "-sDEVICE=pdfwrite"])
        .arg(format!("-sOutputFile={}", output.display()))
        .arg("-c")
        .arg(program)
        .arg("-f")
        .arg(input)
        .run()
        .await?;
    Ok(())
}

/// PostScript page hook drawing `text` across the center of every page.
///
/// Opacity is approximated by lightening the fill gray: pdfwrite flattens
/// real transparency groups, a light gray survives every viewer.
fn text_mark_program(text: &str, opacity: f64, size: i64) -> String {
    let gray = 1.0 - opacity.clamp(0.0, 1.0);
    format!(
        "<< /EndPage {{ exch pop 0 eq {{ \
         gsave \
         currentpagedevice /PageSize get aload pop /ph exch def /pw exch def \
         /Helvetica {size} selectfont {gray:.3} setgray \
         pw 2 div ph 2 div moveto 45 rotate \
         ({text}) dup stringwidth pop 2 div neg 0 rmoveto show \
         grestore true }} {{ false }} ifelse }} >> setpagedevice",
        size = size,
        gray = gray,
        text = ps_escape(text),
    )
}
