//! Object identity: string IDs, the [`GraphObject`] trait, and ID generators.

use crate::error::{GraphError, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Identity of a node or relation. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GraphId(String);

impl GraphId {
    /// Wrap a caller-supplied ID.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidId`] if `id` is empty.
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(GraphError::InvalidId {
                message: "id must not be empty".to_string(),
            });
        }
        Ok(Self(id))
    }

    /// The ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for GraphId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for GraphId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for GraphId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Anything in the graph that carries an identity.
///
/// Equality of graph objects is defined by their ID (nodes and relations refine
/// this with their value and endpoints respectively).
pub trait GraphObject {
    /// The object's ID.
    fn id(&self) -> &GraphId;
}

/// Source of fresh IDs for objects created without an explicit one.
///
/// Implementations must never return the same ID twice.
pub trait IdGenerator: Send + Sync {
    /// Produce an ID that has not been issued before.
    fn next_id(&self) -> GraphId;
}

/// Random v4 UUIDs. The default generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> GraphId {
        GraphId(Uuid::new_v4().to_string())
    }
}

/// Monotonic counter IDs of the form `{prefix}{n}`.
///
/// Deterministic, which makes it the generator of choice for tests. Uniqueness
/// holds per generator instance; two instances with the same prefix overlap.
#[derive(Debug)]
pub struct SequentialIdGenerator {
    prefix: String,
    counter: AtomicU64,
}

impl SequentialIdGenerator {
    /// Create a generator producing `{prefix}0`, `{prefix}1`, ...
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: AtomicU64::new(0),
        }
    }
}

impl Default for SequentialIdGenerator {
    fn default() -> Self {
        Self::new("id-")
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> GraphId {
        let n = self.counter.fetch_add(1, Ordering::Relaxed);
        GraphId(format!("{}{n}", self.prefix))
    }
}
