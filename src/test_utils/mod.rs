//! Shared helpers between unit tests and integration tests: case
//! builders and an in-memory cluster handle that never touches the
//! network.

mod case_builder;
mod fake_cluster;
mod fake_http;

pub use case_builder::*;
pub use fake_cluster::*;
pub use fake_http::*;
