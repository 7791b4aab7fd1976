//! Document host protocol: the live tree the pipeline reads and mutates.

mod host;
mod query;

pub use host::{DocumentHost, NewElement};
pub use query::ElementQuery;

/// Attribute that carries an element's stamped address.
pub const ADDRESS_ATTRIBUTE: &str = "address";

/// Attribute set on the container that replaces a flattened frame.
pub const FRAME_MARKER_ATTRIBUTE: &str = "data-was-iframe";

#[cfg(test)]
#[path = "query_tests.rs"]
mod tests;
