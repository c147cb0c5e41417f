mod capability;
mod form;
mod request;

pub use capability::{Capability, CapabilityKind};
pub use form::{format_number, FieldKind, FieldSpec, FileFilter, FormSpec, InputShape};
pub use request::{ConversionOutput, ConversionRequest, UploadedFile};
