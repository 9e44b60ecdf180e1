/// Periodic mortgage payment calculations.
pub mod domain;
pub mod http;
