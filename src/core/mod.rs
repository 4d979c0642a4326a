// Public modules
pub mod changelist;
pub mod defaults;
pub mod error;
pub mod local_files;
pub mod paths;
pub mod sanitize;
pub mod scan;

// Re-export common types for convenience
pub use error::{Error, ErrorCode, Result};
