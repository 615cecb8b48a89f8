//! Core graph types: arena keys, nodes, relations, and directions.

use super::id::{GraphId, GraphObject};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Arena handle for a node (monotonic counter, assigned by the graph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeKey(pub(crate) u64);

/// Arena handle for a relation (monotonic counter, assigned by the graph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RelationKey(pub(crate) u64);

impl std::fmt::Display for NodeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl std::fmt::Display for RelationKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Direction for relation and neighbor queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Follow outgoing relations (from this node)
    Outgoing,
    /// Follow incoming relations (to this node)
    Incoming,
    /// Follow relations in both directions
    Both,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Outgoing => write!(f, "outgoing"),
            Direction::Incoming => write!(f, "incoming"),
            Direction::Both => write!(f, "bidirectional"),
        }
    }
}

/// A node in the graph.
///
/// Holds an optional opaque value and the keys of its incoming and outgoing
/// relations, each list in the order the relations were added. Nodes are only
/// created through [`Graph`](super::Graph), which keeps both lists consistent
/// with the relations' endpoints.
#[derive(Debug, Clone)]
pub struct Node<V> {
    pub(crate) key: NodeKey,
    pub(crate) id: GraphId,
    pub(crate) value: Option<V>,
    pub(crate) incoming: Vec<RelationKey>,
    pub(crate) outgoing: Vec<RelationKey>,
    // Attached outgoing relation per target, for duplicate checks
    pub(crate) targets: HashMap<NodeKey, RelationKey>,
}

impl<V> Node<V> {
    pub(crate) fn new(key: NodeKey, id: GraphId, value: Option<V>) -> Self {
        Self {
            key,
            id,
            value,
            incoming: Vec::new(),
            outgoing: Vec::new(),
            targets: HashMap::new(),
        }
    }

    /// Arena key of this node.
    pub fn key(&self) -> NodeKey {
        self.key
    }

    /// The payload, if one was given at construction.
    pub fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    /// Relations ending at this node, in add order.
    pub fn incoming(&self) -> &[RelationKey] {
        &self.incoming
    }

    /// Relations starting at this node, in add order.
    pub fn outgoing(&self) -> &[RelationKey] {
        &self.outgoing
    }

    /// Relation keys for one direction. `Both` yields incoming first.
    pub fn relations(&self, direction: Direction) -> impl Iterator<Item = RelationKey> + '_ {
        const NONE: &[RelationKey] = &[];
        let (incoming, outgoing) = match direction {
            Direction::Incoming => (self.incoming.as_slice(), NONE),
            Direction::Outgoing => (NONE, self.outgoing.as_slice()),
            Direction::Both => (self.incoming.as_slice(), self.outgoing.as_slice()),
        };
        incoming.iter().chain(outgoing).copied()
    }
}

impl<V> GraphObject for Node<V> {
    fn id(&self) -> &GraphId {
        &self.id
    }
}

impl<V: PartialEq> PartialEq for Node<V> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.value == other.value
    }
}

impl<V: Eq> Eq for Node<V> {}

impl<V> std::hash::Hash for Node<V> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// A directed relation between two nodes. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relation {
    pub(crate) key: RelationKey,
    pub(crate) id: GraphId,
    pub(crate) from: NodeKey,
    pub(crate) to: NodeKey,
}

impl Relation {
    pub(crate) fn new(key: RelationKey, id: GraphId, from: NodeKey, to: NodeKey) -> Self {
        Self { key, id, from, to }
    }

    /// Arena key of this relation.
    pub fn key(&self) -> RelationKey {
        self.key
    }

    /// Source node.
    pub fn from(&self) -> NodeKey {
        self.from
    }

    /// Target node.
    pub fn to(&self) -> NodeKey {
        self.to
    }

    /// The endpoint opposite `node`, or `None` if `node` is not an endpoint.
    pub fn other(&self, node: NodeKey) -> Option<NodeKey> {
        if node == self.from {
            Some(self.to)
        } else if node == self.to {
            Some(self.from)
        } else {
            None
        }
    }
}

impl GraphObject for Relation {
    fn id(&self) -> &GraphId {
        &self.id
    }
}

impl PartialEq for Relation {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.from == other.from && self.to == other.to
    }
}

impl Eq for Relation {}

impl std::hash::Hash for Relation {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> GraphId {
        GraphId::new(s).unwrap()
    }

    #[test]
    fn test_node_equality_uses_id_and_value() {
        let a = Node::new(NodeKey(0), id("a"), Some(1));
        let same = Node::new(NodeKey(7), id("a"), Some(1));
        let other_value = Node::new(NodeKey(0), id("a"), Some(2));
        let other_id = Node::new(NodeKey(0), id("b"), Some(1));

        assert_eq!(a, same);
        assert_ne!(a, other_value);
        assert_ne!(a, other_id);
    }

    #[test]
    fn test_node_hash_uses_id() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        assert!(set.insert(Node::new(NodeKey(0), id("a"), Some(1))));
        assert!(!set.insert(Node::new(NodeKey(5), id("a"), Some(1))));
        assert!(set.insert(Node::new(NodeKey(1), id("b"), Some(1))));
        assert!(set.insert(Node::new(NodeKey(2), id("a"), Some(2))));

        assert_eq!(set.len(), 3);
        assert!(set.contains(&Node::new(NodeKey(9), id("b"), Some(1))));
    }

    #[test]
    fn test_relation_equality_uses_endpoints() {
        let r = Relation::new(RelationKey(0), id("r"), NodeKey(0), NodeKey(1));
        let same = Relation::new(RelationKey(3), id("r"), NodeKey(0), NodeKey(1));
        let flipped = Relation::new(RelationKey(0), id("r"), NodeKey(1), NodeKey(0));

        assert_eq!(r, same);
        assert_ne!(r, flipped);
    }

    #[test]
    fn test_relation_other_endpoint() {
        let r = Relation::new(RelationKey(0), id("r"), NodeKey(0), NodeKey(1));
        assert_eq!(r.other(NodeKey(0)), Some(NodeKey(1)));
        assert_eq!(r.other(NodeKey(1)), Some(NodeKey(0)));
        assert_eq!(r.other(NodeKey(2)), None);
    }

    #[test]
    fn test_node_relations_by_direction() {
        let mut n: Node<()> = Node::new(NodeKey(0), id("n"), None);
        n.incoming.push(RelationKey(1));
        n.outgoing.push(RelationKey(2));

        let both: Vec<_> = n.relations(Direction::Both).collect();
        assert_eq!(both, vec![RelationKey(1), RelationKey(2)]);
        let out: Vec<_> = n.relations(Direction::Outgoing).collect();
        assert_eq!(out, vec![RelationKey(2)]);
    }
}
