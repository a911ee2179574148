pub mod error;
pub mod report;
pub mod types;

#[cfg(feature = "mortgage")]
pub mod mortgage;

#[cfg(feature = "projection")]
pub mod projection;

#[cfg(feature = "property")]
pub mod property;

pub use error::InvestrError;
pub use types::*;

/// Standard result type for all investr operations
pub type InvestrResult<T> = Result<T, InvestrError>;
