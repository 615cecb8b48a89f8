//! Error types for relgraph operations.
//!
//! All fallible operations return [`Result<T>`]. Every variant signals a caller
//! error raised at the point of violation; nothing is retried or swallowed.

use crate::graph::Direction;
use thiserror::Error;

/// Result type alias for relgraph operations.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Error type for all graph operations.
#[derive(Error, Debug)]
pub enum GraphError {
    /// The relation does not have the node as the endpoint the direction requires
    /// (`to` for incoming, `from` for outgoing).
    #[error("Invalid relation: {relation_id} cannot be added as {direction} relation of node {node_id}")]
    InvalidRelation {
        /// ID of the rejected relation
        relation_id: String,
        /// ID of the node it was added to
        node_id: String,
        /// Direction the relation was added in
        direction: Direction,
    },

    /// The relation, or another relation between the same two nodes in the
    /// same direction, is already registered.
    #[error("Duplicate relation: {relation_id} on node {node_id}")]
    DuplicateRelation {
        /// ID of the rejected relation
        relation_id: String,
        /// ID of the node holding the conflicting relation
        node_id: String,
    },

    /// A node with the same explicit ID already exists in the graph.
    #[error("Duplicate node: {node_id}")]
    DuplicateNode {
        /// The conflicting ID
        node_id: String,
    },

    /// The traversal has no more nodes.
    #[error("No such element: traversal is exhausted")]
    NoSuchElement,

    /// The operation is not supported by this type.
    #[error("Unsupported operation: {operation}")]
    UnsupportedOperation {
        /// Name of the rejected operation
        operation: String,
    },

    /// Node not found in the graph
    #[error("Node not found: {node_id}")]
    NodeNotFound {
        /// ID or key of the missing node
        node_id: String,
    },

    /// Relation not found in the graph
    #[error("Relation not found: {relation_id}")]
    RelationNotFound {
        /// ID or key of the missing relation
        relation_id: String,
    },

    /// An identifier failed validation.
    #[error("Invalid id: {message}")]
    InvalidId {
        /// Description of what went wrong
        message: String,
    },

    /// Serialization error during export
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error details
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl GraphError {
    /// Create a serialization error from a message and optional source.
    pub fn serialization<E>(message: impl Into<String>, source: Option<E>) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Serialization {
            message: message.into(),
            source: source.map(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>),
        }
    }

    /// Create an unsupported-operation error for the named operation.
    pub fn unsupported(operation: impl Into<String>) -> Self {
        Self::UnsupportedOperation {
            operation: operation.into(),
        }
    }
}
