//! PostgreSQL connection pooling for the read-only accessors.

pub mod pool;

pub use pool::{PostgresPool, PostgresPoolError};
