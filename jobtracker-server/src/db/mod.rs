//! Database

pub mod connection;

#[allow(missing_docs, unused_imports)]
pub mod schema;

pub use connection::{connect, ensure_schema, pool, Conn, Pool};
