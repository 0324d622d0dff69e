pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "loan")]
pub mod loan;

#[cfg(feature = "affordability")]
pub mod affordability;

#[cfg(feature = "region")]
pub mod region;

pub use error::HomePlanError;
pub use types::*;

/// Standard result type for all homeplan operations
pub type HomePlanResult<T> = Result<T, HomePlanError>;
