mod action;
mod config;
mod deploy;
mod dispatch;
mod errors;
mod matcher;
mod model;
mod runner;

pub use action::*;
pub use config::*;
pub use deploy::*;
pub use dispatch::*;
pub use errors::*;
pub use matcher::*;
pub use model::*;
pub use runner::*;

//-----------------------------------------------------------
// Test utils

#[cfg(test)]
pub mod test_utils;
