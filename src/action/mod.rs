//! Action Executor
//!
//! Runs the ordered primitives of beforeAction / afterAction / tearDown
//! against the live cluster. Sequencing is strict: execution stops at
//! the first failure and the error names the failing primitive's index.
//! Undoing partial side effects is solely the tearDown stage's job.

mod context;
mod executor;

pub use context::*;
pub use executor::*;

#[cfg(test)]
mod executor_test;
