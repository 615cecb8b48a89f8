//! # relgraph
//!
//! Directed graphs of identity-bearing nodes and relations, with a depth-first
//! walk that visits every reachable node once and reports cycles.
//!
//! ## Core Principles
//!
//! - **Consistent by construction**: linking a relation registers it on both
//!   endpoints in one step, or not at all
//! - **Arena owned**: the [`Graph`] owns every node and relation; links are keys
//! - **Explicit identity**: IDs are caller-supplied or drawn from an injected
//!   [`IdGenerator`]
//! - **Fail Fast**: misuse is reported as a [`GraphError`] at the point it happens
//!
//! ## Example
//!
//! ```rust
//! use relgraph::Graph;
//!
//! # fn main() -> relgraph::Result<()> {
//! let mut graph = Graph::new();
//! let a = graph.create_node_with_id("a", Some("first"))?;
//! let b = graph.create_node_with_id("b", Some("second"))?;
//! let c = graph.create_node_with_id("c", Some("third"))?;
//!
//! graph.add_outgoing_to(a, b)?;
//! graph.add_outgoing_to(a, c)?;
//!
//! let mut walk = graph.walk(a)?;
//! let order: Vec<_> = walk.by_ref().map(|node| node.key()).collect();
//! assert_eq!(order, vec![a, b, c]);
//! assert!(!walk.has_cycles());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod export;
pub mod graph;

// Re-export main types
pub use error::{GraphError, Result};
pub use graph::{
    DepthFirstIter, Direction, Graph, GraphId, GraphObject, IdGenerator, Node, NodeKey, Relation,
    RelationKey, SequentialIdGenerator, UuidGenerator,
};
