pub mod calculator;
pub mod error;
pub mod schedule;
pub mod types;

#[cfg(any(feature = "car_loan", feature = "mortgage"))]
pub mod products;

pub use error::KreditError;
pub use types::*;

/// Standard result type for all kredit operations
pub type KreditResult<T> = Result<T, KreditError>;
