pub mod cache;
pub mod correlation;
pub mod domain;
pub mod error;
pub mod model;
pub mod retry;

pub use domain::*;
pub use error::{OrchestratorError, Result};
pub use model::*;
pub use retry::{retry_with_backoff, CircuitBreaker, RetryConfig, RetryPolicy};
