pub mod error;
pub mod loan;
pub mod time_value;
pub mod types;

pub use error::CarLoanError;
pub use types::*;

/// Standard result type for all car-loan operations
pub type CarLoanResult<T> = Result<T, CarLoanError>;
