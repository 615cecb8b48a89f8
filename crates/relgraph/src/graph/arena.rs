//! The [`Graph`] arena: sole owner of nodes and relations.

use super::id::{GraphId, IdGenerator, UuidGenerator};
use super::traversal::DepthFirstIter;
use super::types::{Direction, Node, NodeKey, Relation, RelationKey};
use crate::error::{GraphError, Result};
use log::{debug, trace};
use std::collections::{BTreeMap, HashMap};

/// A directed graph of identity-bearing nodes and relations.
///
/// Nodes and relations live in the graph and refer to each other by key, so
/// there are no reference cycles. Every attached relation is listed in the
/// outgoing list of its `from` node and the incoming list of its `to` node;
/// the graph keeps both sides in step.
///
/// # Example
///
/// ```
/// use relgraph::Graph;
///
/// # fn example() -> relgraph::Result<()> {
/// let mut graph = Graph::new();
/// let a = graph.create_node(Some("a"))?;
/// let b = graph.create_node(Some("b"))?;
/// graph.add_outgoing_to(a, b)?;
///
/// assert!(graph.is_connected_with(b, a)?);
/// assert_eq!(graph.all_to_values(a)?, vec![Some(&"b")]);
/// # Ok(())
/// # }
/// ```
pub struct Graph<V> {
    ids: Box<dyn IdGenerator>,
    // Counters for monotonic key generation
    node_counter: u64,
    relation_counter: u64,
    // Keys are monotonic, so iteration follows creation order
    nodes: BTreeMap<NodeKey, Node<V>>,
    relations: BTreeMap<RelationKey, Relation>,
    node_ids: HashMap<GraphId, NodeKey>,
    relation_ids: HashMap<GraphId, RelationKey>,
}

impl<V> Default for Graph<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Graph<V> {
    /// Create an empty graph issuing random UUIDs for objects created without
    /// an explicit ID.
    pub fn new() -> Self {
        Self::with_id_generator(Box::new(UuidGenerator))
    }

    /// Create an empty graph drawing fresh IDs from `ids`.
    ///
    /// ```
    /// use relgraph::{Graph, GraphObject, SequentialIdGenerator};
    ///
    /// let mut graph: Graph<()> = Graph::with_id_generator(Box::new(SequentialIdGenerator::new("n")));
    /// let key = graph.create_node(None).unwrap();
    /// assert_eq!(graph.node(key).unwrap().id().as_str(), "n0");
    /// ```
    pub fn with_id_generator(ids: Box<dyn IdGenerator>) -> Self {
        Self {
            ids,
            node_counter: 0,
            relation_counter: 0,
            nodes: BTreeMap::new(),
            relations: BTreeMap::new(),
            node_ids: HashMap::new(),
            relation_ids: HashMap::new(),
        }
    }

    // ===== Construction =====

    /// Create a node with a generated ID.
    ///
    /// Generated IDs skip any ID already taken in this graph, including ones
    /// callers supplied explicitly.
    pub fn create_node(&mut self, value: Option<V>) -> Result<NodeKey> {
        let id = self.fresh_id();
        self.insert_node(id, value)
    }

    /// Create a node with a caller-supplied ID. An empty ID falls back to a
    /// generated one.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuplicateNode`] if the ID is already in use.
    pub fn create_node_with_id(&mut self, id: &str, value: Option<V>) -> Result<NodeKey> {
        let id = self.resolve_id(id)?;
        self.insert_node(id, value)
    }

    /// Create a detached relation from `from` to `to` with a generated ID.
    ///
    /// The relation is registered on neither endpoint until it is passed to
    /// [`add_incoming_relation`](Self::add_incoming_relation) or
    /// [`add_outgoing_relation`](Self::add_outgoing_relation).
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeNotFound`] if either endpoint doesn't exist.
    pub fn create_relation(&mut self, from: NodeKey, to: NodeKey) -> Result<RelationKey> {
        let id = self.fresh_id();
        self.insert_relation(id, from, to)
    }

    /// Create a detached relation with a caller-supplied ID. An empty ID falls
    /// back to a generated one.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeNotFound`] if either endpoint doesn't exist and
    /// [`GraphError::DuplicateRelation`] if the ID is already in use.
    pub fn create_relation_with_id(
        &mut self,
        id: &str,
        from: NodeKey,
        to: NodeKey,
    ) -> Result<RelationKey> {
        let id = self.resolve_id(id)?;
        self.insert_relation(id, from, to)
    }

    // ===== Linking =====

    /// Register `relation` as an incoming relation of `node`.
    ///
    /// The relation is added to `node`'s incoming list and to its `from`
    /// node's outgoing list in one step. All checks run before anything is
    /// modified, so a failed call leaves the graph unchanged.
    ///
    /// # Errors
    ///
    /// - [`GraphError::InvalidRelation`] if `node` is not the relation's `to`.
    /// - [`GraphError::DuplicateRelation`] if the relation is already attached
    ///   or `node` already has an incoming relation from the same source.
    pub fn add_incoming_relation(&mut self, node: NodeKey, relation: RelationKey) -> Result<()> {
        let rel = self.relation(relation)?;
        let target = self.node(node)?;
        if rel.to != node {
            return Err(GraphError::InvalidRelation {
                relation_id: rel.id.to_string(),
                node_id: target.id.to_string(),
                direction: Direction::Incoming,
            });
        }
        self.ensure_attachable(rel, target)?;
        self.attach(relation)
    }

    /// Register `relation` as an outgoing relation of `node`.
    ///
    /// Mirror image of [`add_incoming_relation`](Self::add_incoming_relation).
    ///
    /// # Errors
    ///
    /// - [`GraphError::InvalidRelation`] if `node` is not the relation's `from`.
    /// - [`GraphError::DuplicateRelation`] if the relation is already attached
    ///   or `node` already has an outgoing relation to the same target.
    pub fn add_outgoing_relation(&mut self, node: NodeKey, relation: RelationKey) -> Result<()> {
        let rel = self.relation(relation)?;
        let source = self.node(node)?;
        if rel.from != node {
            return Err(GraphError::InvalidRelation {
                relation_id: rel.id.to_string(),
                node_id: source.id.to_string(),
                direction: Direction::Outgoing,
            });
        }
        self.ensure_attachable(rel, source)?;
        self.attach(relation)
    }

    /// Create a relation `from -> node` and register it on both endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuplicateRelation`] if `node` already has an
    /// incoming relation from `from`; no relation is created in that case.
    pub fn add_incoming_from(&mut self, node: NodeKey, from: NodeKey) -> Result<RelationKey> {
        self.link(from, node)
    }

    /// Create a relation `node -> to` and register it on both endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuplicateRelation`] if `node` already has an
    /// outgoing relation to `to`; no relation is created in that case.
    pub fn add_outgoing_to(&mut self, node: NodeKey, to: NodeKey) -> Result<RelationKey> {
        self.link(node, to)
    }

    /// Detach a relation from both endpoints and drop it from the graph.
    ///
    /// Detached (never added) relations are simply dropped.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::RelationNotFound`] if the relation doesn't exist.
    pub fn remove_relation(&mut self, relation: RelationKey) -> Result<Relation> {
        let rel = self
            .relations
            .remove(&relation)
            .ok_or_else(|| GraphError::RelationNotFound {
                relation_id: relation.to_string(),
            })?;
        debug!("Removing relation: id={}, from={}, to={}", rel.id, rel.from, rel.to);

        if let Some(from) = self.nodes.get_mut(&rel.from) {
            from.outgoing.retain(|k| *k != relation);
            if from.targets.get(&rel.to) == Some(&relation) {
                from.targets.remove(&rel.to);
            }
        }
        if let Some(to) = self.nodes.get_mut(&rel.to) {
            to.incoming.retain(|k| *k != relation);
        }
        self.relation_ids.remove(&rel.id);

        Ok(rel)
    }

    // ===== Lookup =====

    /// Get a node by key.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeNotFound`] if the node doesn't exist.
    pub fn node(&self, key: NodeKey) -> Result<&Node<V>> {
        self.nodes.get(&key).ok_or_else(|| GraphError::NodeNotFound {
            node_id: key.to_string(),
        })
    }

    /// Get a relation by key.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::RelationNotFound`] if the relation doesn't exist.
    pub fn relation(&self, key: RelationKey) -> Result<&Relation> {
        self.relations
            .get(&key)
            .ok_or_else(|| GraphError::RelationNotFound {
                relation_id: key.to_string(),
            })
    }

    /// Look a node up by its ID.
    pub fn find_node(&self, id: &str) -> Option<&Node<V>> {
        self.node_ids.get(id).and_then(|key| self.nodes.get(key))
    }

    /// Look a relation up by its ID.
    pub fn find_relation(&self, id: &str) -> Option<&Relation> {
        self.relation_ids
            .get(id)
            .and_then(|key| self.relations.get(key))
    }

    /// The attached relation from `from` to `to`, if any.
    pub fn relation_between(&self, from: NodeKey, to: NodeKey) -> Option<&Relation> {
        self.nodes
            .get(&from)
            .and_then(|node| node.targets.get(&to))
            .and_then(|key| self.relations.get(key))
    }

    /// Whether a relation has been registered on its endpoints.
    pub fn is_attached(&self, relation: RelationKey) -> Result<bool> {
        let rel = self.relation(relation)?;
        Ok(self.node(rel.from)?.outgoing.contains(&relation))
    }

    /// Value of a relation's source node.
    pub fn from_value(&self, relation: RelationKey) -> Result<Option<&V>> {
        let rel = self.relation(relation)?;
        Ok(self.node(rel.from)?.value())
    }

    /// Value of a relation's target node.
    pub fn to_value(&self, relation: RelationKey) -> Result<Option<&V>> {
        let rel = self.relation(relation)?;
        Ok(self.node(rel.to)?.value())
    }

    /// All nodes in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node<V>> {
        self.nodes.values()
    }

    /// All relations, attached or not, in creation order.
    pub fn relations(&self) -> impl Iterator<Item = &Relation> {
        self.relations.values()
    }

    /// Get the total number of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the total number of relations in the graph.
    pub fn relation_count(&self) -> usize {
        self.relations.len()
    }

    // ===== Node queries =====

    /// Whether any relation ends at `node`.
    pub fn has_incoming_relations(&self, node: NodeKey) -> Result<bool> {
        Ok(!self.node(node)?.incoming.is_empty())
    }

    /// Number of relations ending at `node`.
    pub fn incoming_relation_count(&self, node: NodeKey) -> Result<usize> {
        Ok(self.node(node)?.incoming.len())
    }

    /// Relations ending at `node`, in add order.
    pub fn incoming_relations(&self, node: NodeKey) -> Result<Vec<&Relation>> {
        self.relations_of(node, Direction::Incoming)
    }

    /// Distinct source nodes of `node`'s incoming relations, first-seen order.
    pub fn all_from_nodes(&self, node: NodeKey) -> Result<Vec<NodeKey>> {
        self.neighbors(node, Direction::Incoming)
    }

    /// Values of the source nodes, one entry per incoming relation.
    pub fn all_from_values(&self, node: NodeKey) -> Result<Vec<Option<&V>>> {
        self.endpoint_values(node, Direction::Incoming)
    }

    /// Whether any relation starts at `node`.
    pub fn has_outgoing_relations(&self, node: NodeKey) -> Result<bool> {
        Ok(!self.node(node)?.outgoing.is_empty())
    }

    /// Number of relations starting at `node`.
    pub fn outgoing_relation_count(&self, node: NodeKey) -> Result<usize> {
        Ok(self.node(node)?.outgoing.len())
    }

    /// Relations starting at `node`, in add order.
    pub fn outgoing_relations(&self, node: NodeKey) -> Result<Vec<&Relation>> {
        self.relations_of(node, Direction::Outgoing)
    }

    /// Distinct target nodes of `node`'s outgoing relations, first-seen order.
    pub fn all_to_nodes(&self, node: NodeKey) -> Result<Vec<NodeKey>> {
        self.neighbors(node, Direction::Outgoing)
    }

    /// Values of the target nodes, one entry per outgoing relation.
    pub fn all_to_values(&self, node: NodeKey) -> Result<Vec<Option<&V>>> {
        self.endpoint_values(node, Direction::Outgoing)
    }

    /// Whether `other` is one hop away from `node` in either direction.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeNotFound`] if `node` doesn't exist.
    pub fn is_connected_with(&self, node: NodeKey, other: NodeKey) -> Result<bool> {
        Ok(self.neighbors(node, Direction::Both)?.contains(&other))
    }

    /// Distinct adjacent nodes in the given direction, first-seen order.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeNotFound`] if `node` doesn't exist.
    pub fn neighbors(&self, node: NodeKey, direction: Direction) -> Result<Vec<NodeKey>> {
        let mut neighbors = Vec::new();
        for rel in self.relations_of(node, direction)? {
            if let Some(other) = rel.other(node) {
                if !neighbors.contains(&other) {
                    neighbors.push(other);
                }
            }
        }
        Ok(neighbors)
    }

    // ===== Traversal =====

    /// Depth-first walk over the nodes reachable from `start`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeNotFound`] if `start` doesn't exist.
    pub fn walk(&self, start: NodeKey) -> Result<DepthFirstIter<'_, V>> {
        DepthFirstIter::new(self, start)
    }

    // Private helper methods

    fn resolve_id(&self, id: &str) -> Result<GraphId> {
        if id.is_empty() {
            Ok(self.fresh_id())
        } else {
            GraphId::new(id)
        }
    }

    /// Draws from the generator until it hands out an ID no node or relation
    /// in this graph uses.
    fn fresh_id(&self) -> GraphId {
        loop {
            let id = self.ids.next_id();
            if !self.node_ids.contains_key(&id) && !self.relation_ids.contains_key(&id) {
                return id;
            }
            trace!("Generated ID {id} already taken, drawing another");
        }
    }

    fn insert_node(&mut self, id: GraphId, value: Option<V>) -> Result<NodeKey> {
        if self.node_ids.contains_key(&id) {
            return Err(GraphError::DuplicateNode {
                node_id: id.to_string(),
            });
        }

        let key = NodeKey(self.node_counter);
        self.node_counter += 1;
        debug!("Creating node: key={key}, id={id}");

        self.node_ids.insert(id.clone(), key);
        self.nodes.insert(key, Node::new(key, id, value));
        Ok(key)
    }

    fn insert_relation(&mut self, id: GraphId, from: NodeKey, to: NodeKey) -> Result<RelationKey> {
        self.node(from)?;
        self.node(to)?;
        if self.relation_ids.contains_key(&id) {
            return Err(GraphError::DuplicateRelation {
                relation_id: id.to_string(),
                node_id: self.node(from)?.id.to_string(),
            });
        }

        let key = RelationKey(self.relation_counter);
        self.relation_counter += 1;
        debug!("Creating relation: key={key}, id={id}, from={from}, to={to}");

        self.relation_ids.insert(id.clone(), key);
        self.relations.insert(key, Relation::new(key, id, from, to));
        Ok(key)
    }

    /// Checks that `rel` is not attached yet and that its endpoints are not
    /// already linked in the same direction. `node` names the endpoint the
    /// caller is adding to, for error context.
    fn ensure_attachable(&self, rel: &Relation, node: &Node<V>) -> Result<()> {
        let attached = self
            .nodes
            .get(&rel.from)
            .is_some_and(|from| from.outgoing.contains(&rel.key));
        if attached || self.relation_between(rel.from, rel.to).is_some() {
            return Err(GraphError::DuplicateRelation {
                relation_id: rel.id.to_string(),
                node_id: node.id.to_string(),
            });
        }
        Ok(())
    }

    /// Registers a checked relation on both endpoints.
    fn attach(&mut self, relation: RelationKey) -> Result<()> {
        let (from, to) = {
            let rel = self.relation(relation)?;
            (rel.from, rel.to)
        };
        // Both endpoints are resolved before either list is touched.
        self.node(from)?;
        self.node(to)?;

        if let Some(source) = self.nodes.get_mut(&from) {
            source.outgoing.push(relation);
            source.targets.insert(to, relation);
        }
        if let Some(target) = self.nodes.get_mut(&to) {
            target.incoming.push(relation);
        }
        trace!("Relation {relation} attached: {from} -> {to}");
        Ok(())
    }

    fn link(&mut self, from: NodeKey, to: NodeKey) -> Result<RelationKey> {
        self.node(from)?;
        let target = self.node(to)?;
        if let Some(existing) = self.relation_between(from, to) {
            return Err(GraphError::DuplicateRelation {
                relation_id: existing.id.to_string(),
                node_id: target.id.to_string(),
            });
        }
        let relation = self.create_relation(from, to)?;
        self.attach(relation)?;
        Ok(relation)
    }

    fn relations_of(&self, node: NodeKey, direction: Direction) -> Result<Vec<&Relation>> {
        Ok(self
            .node(node)?
            .relations(direction)
            .filter_map(|key| self.relations.get(&key))
            .collect())
    }

    fn endpoint_values(&self, node: NodeKey, direction: Direction) -> Result<Vec<Option<&V>>> {
        Ok(self
            .relations_of(node, direction)?
            .into_iter()
            .filter_map(|rel| rel.other(node))
            .filter_map(|other| self.nodes.get(&other))
            .map(Node::value)
            .collect())
    }
}

// ===== Export Methods =====

impl<V: std::fmt::Display> Graph<V> {
    /// Export graph to Graphviz DOT format for visualization.
    pub fn export_dot(&self) -> Result<String> {
        crate::export::export_dot(self)
    }

    /// Export graph to Graphviz DOT format with custom styling options.
    pub fn export_dot_styled(&self, options: crate::export::DotOptions) -> Result<String> {
        crate::export::export_dot_styled(self, options)
    }
}

impl<V: serde::Serialize> Graph<V> {
    /// Export graph to a pretty-printed JSON snapshot.
    pub fn export_json(&self) -> Result<String> {
        crate::export::export_json(self)
    }
}
