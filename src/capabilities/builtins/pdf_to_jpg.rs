use crate::capabilities::core::{require_file, CapError, CapResult};
use crate::models::{ConversionOutput, ConversionRequest};
use crate::tools::{Tool, Workspace};
use capability_macros::capability;
use std::fs::File;
use std::io::{Read, Write};
use std::path::PathBuf;
use walkdir::WalkDir;
use zip::ZipWriter;

/// Handler for the PDF→JPG capability.
///
/// Renders each page at 150 dpi with pdftoppm (Poppler) and ships the page
/// images back as one zip archive. pdftoppm zero-pads its page numbers, so
/// lexical filename order is page order.
#[capability(
    kind = "PdfToJpg",
    name = "PDF to JPG",
    from_type = "pdf",
    to_type = "jpg"
)]
async fn pdf_to_jpg(
    request: &ConversionRequest,
    workspace: &Workspace,
) -> CapResult<ConversionOutput> {
    let upload = require_file(request)?;

    Tool::new("pdftoppm")
        .args(["-jpeg", "-r", "150"])
        .arg(&upload.path)
        .arg(workspace.file("page"))
        .run()
        .await?;

    let mut pages: Vec<PathBuf> = WalkDir::new(workspace.path())
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.extension().is_some_and(|ext| ext == "jpg")
                && path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with("page-"))
        })
        .collect();
    pages.sort();

    if pages.is_empty() {
        return Err(CapError::internal("pdftoppm produced no page images"));
    }

    let zip_name = format!("{}.zip", upload.stem());
    let zip_path = workspace.file(&zip_name);
    write_zip(&zip_path, &pages).map_err(|e| CapError::internal(format!("zip failed: {}", e)))?;

    Ok(ConversionOutput::new(zip_path, "application/zip", zip_name))
}

fn write_zip(zip_path: &PathBuf, pages: &[PathBuf]) -> std::io::Result<()> {
    let file = File::create(zip_path)?;
    let mut zip = ZipWriter::new(file);

    let options =
        zip::write::FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    for page in pages {
        let name = page
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("page.jpg");
        zip.start_file(name, options)?;
        let mut contents = Vec::new();
        File::open(page)?.read_to_end(&mut contents)?;
        zip.write_all(&contents)?;
    }

    zip.finish()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use zip::ZipArchive;

    #[test]
    fn test_write_zip_keeps_page_order() {
        let workspace = Workspace::new().unwrap();
        let pages = vec![workspace.file("page-1.jpg"), workspace.file("page-2.jpg")];
        for page in &pages {
            std::fs::write(page, b"jpg bytes").unwrap();
        }

        let zip_path = workspace.file("doc.zip");
        write_zip(&zip_path, &pages).unwrap();

        let mut archive = ZipArchive::new(File::open(&zip_path).unwrap()).unwrap();
        assert_eq!(archive.len(), 2);
        assert_eq!(archive.by_index(0).unwrap().name(), "page-1.jpg");
        assert_eq!(archive.by_index(1).unwrap().name(), "page-2.jpg");
    }
}
