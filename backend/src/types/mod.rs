mod environment;
mod error;
mod extractors;
mod storage_config;

pub use environment::Environment;
pub use error::{ApiErrorResponse, AppError};
pub use extractors::ValidatedJson;
pub use storage_config::StorageConfig;
