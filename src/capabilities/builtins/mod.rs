mod compress;
mod delete_pages;
mod html_to_pdf;
mod images_to_pdf;
mod jpg_to_pdf;
mod merge;
mod page_numbers;
mod pdf_to_jpg;
mod pdf_to_word;
mod protect;
mod reorder;
mod rotate;
mod split;
mod unlock;
mod watermark;
mod word_to_pdf;

pub use compress::CompressCapability;
pub use delete_pages::DeletePagesCapability;
pub use html_to_pdf::HtmlToPdfCapability;
pub use images_to_pdf::ImagesToPdfCapability;
pub use jpg_to_pdf::JpgToPdfCapability;
pub use merge::MergeCapability;
pub use page_numbers::PageNumbersCapability;
pub use pdf_to_jpg::PdfToJpgCapability;
pub use pdf_to_word::PdfToWordCapability;
pub use protect::ProtectCapability;
pub use reorder::ReorderCapability;
pub use rotate::RotateCapability;
pub use split::SplitCapability;
pub use unlock::UnlockCapability;
pub use watermark::WatermarkCapability;
pub use word_to_pdf::WordToPdfCapability;

use super::core::{CapError, CapResult};
use crate::tools::Tool;
use std::path::Path;

/// Number of pages in a PDF, via qpdf.
async fn page_count(path: &Path) -> CapResult<u32> {
    let run = Tool::new("qpdf")
        .arg("--show-npages")
        .arg(path)
        .run()
        .await?;
    run.stdout_text().parse().map_err(|_| {
        CapError::internal(format!(
            "unexpected qpdf page count output: {}",
            run.stdout_text()
        ))
    })
}
