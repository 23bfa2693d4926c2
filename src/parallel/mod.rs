//! Bulk evaluation for hosts
//!
//! Evaluates one compiled expression against many independent environments
//! on a worker pool. Nothing here is visible to programs themselves.

mod executor;

pub use executor::{evaluate_batch, try_evaluate_batch, BatchConfig};
