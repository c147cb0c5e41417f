pub mod form;
pub mod icons;
pub mod registry;
pub mod transfer;

pub use form::{PartValue, SubmissionPlan, UploadForm, ValidationError};
pub use icons::{icon_for, Icon};
pub use registry::RegistryClient;
pub use transfer::{Download, TransferHandler, DEFAULT_DOWNLOAD_NAME};
