//! Problem instance model.
//!
//! - [`Edge`]: undirected labeled edge with order-independent equality
//! - [`GraphInstance`]: immutable node/edge/label sets plus adjacency index,
//!   with a reader for the `u v label` edge-list format

mod edge;
mod instance;

pub use edge::{Edge, Label, Node};
pub use instance::GraphInstance;
