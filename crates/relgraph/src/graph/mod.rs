//! Core graph types and operations.
//!
//! This module defines the fundamental building blocks:
//! - [`GraphId`] and [`GraphObject`]: identity shared by nodes and relations
//! - [`Node`]: a vertex with an optional value and ordered relation lists
//! - [`Relation`]: a directed link between two nodes
//! - [`Graph`]: the arena owning both, with the linking operations
//! - [`DepthFirstIter`]: cycle-aware depth-first walk

mod arena;
mod id;
mod traversal;
mod types;

pub use arena::Graph;
pub use id::{GraphId, GraphObject, IdGenerator, SequentialIdGenerator, UuidGenerator};
pub use traversal::DepthFirstIter;
pub use types::{Direction, Node, NodeKey, Relation, RelationKey};
