use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Per-request scratch directory for tool input and output.
///
/// Uploaded files are spilled here, tools read and write here, and everything
/// disappears when the workspace drops. Callers must read produced files into
/// memory before dropping the workspace.
pub struct Workspace {
    temp_dir: TempDir,
}

impl Workspace {
    pub fn new() -> std::io::Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new()?,
        })
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path of a named file inside the workspace.
    pub fn file(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }
}

/// Reduce a client-supplied filename to a bare, safe file name.
///
/// Strips any directory components (both separators, since the client OS is
/// unknown) and falls back to "upload" when nothing usable remains.
pub fn sanitize_filename(name: &str) -> String {
    let bare = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or("")
        .trim()
        .to_string();
    if bare.is_empty() || bare == "." || bare == ".." {
        "upload".to_string()
    } else {
        bare
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_file_path() {
        let ws = Workspace::new().unwrap();
        let path = ws.file("in.pdf");
        assert!(path.starts_with(ws.path()));
        assert_eq!(path.file_name().unwrap(), "in.pdf");
    }

    #[test]
    fn test_workspace_cleans_up() {
        let ws = Workspace::new().unwrap();
        let dir = ws.path().to_path_buf();
        std::fs::write(ws.file("x"), b"x").unwrap();
        drop(ws);
        assert!(!dir.exists());
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("report.pdf"), "report.pdf");
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("C:\\docs\\a.docx"), "a.docx");
        assert_eq!(sanitize_filename(""), "upload");
        assert_eq!(sanitize_filename(".."), "upload");
    }
}
