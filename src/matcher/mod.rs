//! Expectation Matcher
//!
//! Compares a captured response against a case's expectation sources
//! with partial-match semantics:
//! - [`ExpectationSource`] - the expect/uriExpect/bodyExpect fields
//!   normalized into one tagged union
//! - [`match_call`] - evaluates every applicable source, no
//!   short-circuit, so one run surfaces every divergence
//! - [`MatchReport`] - per-expectation outcome plus human-readable diffs
//!
//! Header matching is a subset check; body matching is whole-tree
//! equality or dotted field-path equality, where an absent expectation
//! field means "don't care".

mod report;
mod rules;
mod source;

pub use report::*;
pub use rules::*;
pub use source::*;
