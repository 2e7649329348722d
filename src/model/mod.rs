//! Declarative case model
//!
//! The immutable, serializable description of one REST test case:
//! - [`Case`] - request shape, lifecycle actions, expectations
//! - [`Expect`] - partial-match specification over an HTTP response
//! - [`Action`] - setup/teardown primitive operations
//! - [`load_suite`] - deserialize and validate a suite of cases
//!
//! Nothing in this module performs network or process activity; a `Case`
//! is consumed read-only by the runner and never mutated after load.

mod action;
mod case;
mod expect;
mod loader;

pub use action::*;
pub use case::*;
pub use expect::*;
pub use loader::*;
