use crate::capabilities::core::{int_param, require_file, CapError, CapResult};
use crate::models::{ConversionOutput, ConversionRequest};
use crate::tools::{Tool, Workspace};
use crate::utils::postscript::ps_escape;
use capability_macros::capability;

/// Page corners a number can be placed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    BottomRight,
    BottomLeft,
    TopRight,
    TopLeft,
}

impl Position {
    fn parse(text: &str) -> Option<Position> {
        match text {
            "bottom-right" => Some(Position::BottomRight),
            "bottom-left" => Some(Position::BottomLeft),
            "top-right" => Some(Position::TopRight),
            "top-left" => Some(Position::TopLeft),
            _ => None,
        }
    }
}

/// Handler for the Page Numbers capability.
///
/// A generated Ghostscript page hook draws the label on every page. The
/// `format` text may contain `{n}`, replaced by the page counter (counting
/// from `start`); without a placeholder the counter is appended.
#[capability(
    kind = "PageNumbers",
    name = "Add Page Numbers",
    from_type = "pdf",
    to_type = "pdf"
)]
async fn page_numbers_pdf(
    request: &ConversionRequest,
    workspace: &Workspace,
) -> CapResult<ConversionOutput> {
    let upload = require_file(request)?;

    let start = int_param(request, "start", 1)?;
    let size = int_param(request, "size", 10)?;
    let format = request.param("format").unwrap_or("{n}");
    let position = match request.param("position") {
        None => Position::BottomRight,
        Some(raw) => Position::parse(raw).ok_or_else(|| {
            CapError::bad_request(format!("unknown position '{}'", raw))
        })?,
    };

    let output = workspace.file("numbered.pdf");
    let program = page_number_program(start, format, position, size);

    Tool::new("gs")
        .args(["-q", "-dNOPAUSE", "-dBATCH", "-sDEVICE=pdfwrite"])
        .arg(format!("-sOutputFile={}", output.display()))
        .arg("-c")
        .arg(program)
        .arg("-f")
        .arg(&upload.path)
        .run()
        .await?;

    Ok(ConversionOutput::new(
        output,
        "application/pdf",
        "numbered.pdf",
    ))
}

/// Build the PostScript page hook.
///
/// The label is assembled per page as `prefix + counter + suffix`; x/y are
/// computed against the live page size so mixed-size documents come out
/// right. Margins: 36 pt horizontal, 24 pt above the bottom edge, 36 pt
/// below the top edge.
fn page_number_program(start: i64, format: &str, position: Position, size: i64) -> String {
    let (prefix, suffix) = match format.split_once("{n}") {
        Some((prefix, suffix)) => (prefix, suffix),
        None => (format, ""),
    };

    let x = match position {
        Position::BottomRight | Position::TopRight => "pw 36 sub label stringwidth pop sub",
        Position::BottomLeft | Position::TopLeft => "36",
    };
    let y = match position {
        Position::BottomRight | Position::BottomLeft => "24",
        Position::TopRight | Position::TopLeft => "ph 36 sub",
    };

    format!(
        "/pagenum {counter} def \
         << /EndPage {{ exch pop 0 eq {{ \
         /pagenum pagenum 1 add def \
         gsave \
         currentpagedevice /PageSize get aload pop /ph exch def /pw exch def \
         /Helvetica {size} selectfont 0 setgray \
         /label ({prefix}) pagenum 10 string cvs concatstrings ({suffix}) concatstrings def \
         {x} {y} moveto label show \
         grestore true }} {{ false }} ifelse }} >> setpagedevice",
        counter = start - 1,
        size = size,
        prefix = ps_escape(prefix),
        suffix = ps_escape(suffix),
        x = x,
        y = y,
    )
}
