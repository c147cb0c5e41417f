use crate::capabilities::core::{int_param, require_file, CapError, CapResult};
use crate::models::{ConversionOutput, ConversionRequest};
use crate::tools::{Tool, Workspace};
use capability_macros::capability;

/// Handler for the Rotate PDF capability.
///
/// Applies the same clockwise rotation to every page via qpdf.
#[capability(
    kind = "Rotate",
    name = "Rotate PDF",
    from_type = "pdf",
    to_type = "pdf"
)]
async fn rotate_pdf(
    request: &ConversionRequest,
    workspace: &Workspace,
) -> CapResult<ConversionOutput> {
    let upload = require_file(request)?;

    let degrees = int_param(request, "degrees", 90)?;
    let normalized = normalize_degrees(degrees)
        .ok_or_else(|| CapError::bad_request("degrees must be a non-zero multiple of 90"))?;

    let filename = format!("rotated_{}.pdf", degrees);
    let output = workspace.file(&filename);

    Tool::new("qpdf")
        .arg(&upload.path)
        .arg(&output)
        .arg(format!("--rotate=+{}:1-z", normalized))
        .run()
        .await?;

    Ok(ConversionOutput::new(output, "application/pdf", filename))
}

/// Reduce an arbitrary multiple of 90 to the 90/180/270 qpdf accepts.
fn normalize_degrees(degrees: i64) -> Option<i64> {
    if degrees % 90 != 0 {
        return None;
    }
    match degrees.rem_euclid(360) {
        0 => None,
        normalized => Some(normalized),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(90), Some(90));
        assert_eq!(normalize_degrees(270), Some(270));
        assert_eq!(normalize_degrees(450), Some(90));
        assert_eq!(normalize_degrees(-90), Some(270));
    }

    #[test]
    fn test_normalize_rejects_non_right_angles() {
        assert_eq!(normalize_degrees(45), None);
        assert_eq!(normalize_degrees(0), None);
        assert_eq!(normalize_degrees(360), None);
    }
}
