mod runner;
mod workspace;

pub use runner::{is_on_path, Tool, ToolError, ToolRun};
pub use workspace::{sanitize_filename, Workspace};
