//! Request Dispatcher
//!
//! Turns a case plus one parameter binding into a concrete HTTP call:
//! - [`enumerate_bindings`] - pure Cartesian-product sweep enumeration
//! - [`resolve`] - placeholder substitution into uri and body
//! - [`HttpSender`] - external HTTP client collaborator
//! - [`RequestDispatcher`] - issues the call with a bounded timeout
//!
//! A network or timeout failure becomes a [`DispatchError`](crate::DispatchError)
//! handed to the matcher as a failed call, never a suite abort.

mod binding;
mod client;
mod dispatcher;
mod resolve;

pub use binding::*;
pub use client::*;
pub use dispatcher::*;
pub use resolve::*;

#[cfg(test)]
mod resolve_test;
