//! Case Runner
//!
//! Orchestrates one suite: sequences before → dispatch → match → after →
//! tearDown per case, schedules cases concurrently up to the configured
//! worker count (serial groups excepted), and reports outcomes:
//! - [`CaseState`] / [`CaseVerdict`] - per-case state machine
//! - [`RunRecord`] / [`RunRegistry`] - mutable execution state, kept
//!   outside the immutable case model
//! - [`CaseRunner`] - per-case lifecycle driver
//! - [`execute_suite`] - deploy, run, tear down, summarize
//!
//! tearDown is unconditional: no case transition skips it, including
//! suite abort after beforeAction already ran.

mod record;
mod report;
mod runner;
mod state;
mod suite;

pub use record::*;
pub use report::*;
pub use runner::*;
pub use state::*;
pub use suite::*;
