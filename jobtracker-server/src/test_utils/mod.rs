//! Testing utilities.
pub mod route_builder;
pub mod test_context;
