pub mod calculate_request;
pub mod payment;

pub use calculate_request::{CalculateRequest, CalculateRequestInvalidity};
pub use payment::{calculate, CalculationError};
