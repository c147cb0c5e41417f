pub mod error;
pub mod multipart;
pub mod routes;

pub use error::ApiError;
pub use routes::{build_router, ServerState, DEFAULT_BODY_LIMIT};
