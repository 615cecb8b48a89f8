//! Depth-first traversal with cycle detection.
//!
//! [`DepthFirstIter`] walks the nodes reachable from a start node in pre-order,
//! following outgoing relations in the order they were added. It keeps an
//! explicit stack of frames instead of recursing, so deep graphs cannot
//! overflow the call stack.

use super::arena::Graph;
use super::types::{Node, NodeKey, RelationKey};
use crate::error::{GraphError, Result};
use log::trace;
use std::collections::HashSet;
use std::iter::FusedIterator;
use std::slice;

/// One level of the walk: a node and a cursor over its outgoing relations.
struct Frame<'g, V> {
    node: &'g Node<V>,
    cursor: slice::Iter<'g, RelationKey>,
}

impl<'g, V> Frame<'g, V> {
    fn new(node: &'g Node<V>) -> Self {
        Self {
            node,
            cursor: node.outgoing().iter(),
        }
    }
}

/// Pre-order depth-first iterator over the nodes reachable from a start node.
///
/// Every reachable node is yielded exactly once, the start node first, even
/// when paths reconverge or loop back. When an outgoing relation leads to a node
/// that is still on the current path the iterator records a cycle; the flag is
/// sticky and reported by [`has_cycles`](Self::has_cycles). It only reflects
/// the relations examined so far, so check it after the walk is finished.
///
/// The iterator borrows the graph, so the graph cannot change under it.
///
/// # Example
///
/// ```
/// use relgraph::Graph;
///
/// # fn example() -> relgraph::Result<()> {
/// let mut graph = Graph::new();
/// let a = graph.create_node(Some('a'))?;
/// let b = graph.create_node(Some('b'))?;
/// let c = graph.create_node(Some('c'))?;
/// graph.add_outgoing_to(a, b)?;
/// graph.add_outgoing_to(b, c)?;
/// graph.add_outgoing_to(c, a)?;
///
/// let mut walk = graph.walk(a)?;
/// let order: Vec<_> = walk.by_ref().filter_map(|node| node.value().copied()).collect();
/// assert_eq!(order, vec!['a', 'b', 'c']);
/// assert!(walk.has_cycles());
/// # Ok(())
/// # }
/// ```
pub struct DepthFirstIter<'g, V> {
    graph: &'g Graph<V>,
    stack: Vec<Frame<'g, V>>,
    // Nodes currently on the stack
    on_path: HashSet<NodeKey>,
    visited: HashSet<NodeKey>,
    has_cycles: bool,
}

impl<'g, V> DepthFirstIter<'g, V> {
    /// Start a walk at `start`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeNotFound`] if `start` doesn't exist.
    pub fn new(graph: &'g Graph<V>, start: NodeKey) -> Result<Self> {
        let node = graph.node(start)?;
        trace!("Starting depth-first walk at {start}");
        Ok(Self {
            graph,
            stack: vec![Frame::new(node)],
            on_path: HashSet::from([start]),
            visited: HashSet::new(),
            has_cycles: false,
        })
    }

    /// Whether another node remains.
    pub fn has_next(&self) -> bool {
        !self.stack.is_empty()
    }

    /// Whether a relation back onto the current path has been seen so far.
    pub fn has_cycles(&self) -> bool {
        self.has_cycles
    }

    /// Number of nodes yielded so far.
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Length of the current path, from the start node to the next node.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Yield the next node.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NoSuchElement`] once the walk is exhausted.
    pub fn try_next(&mut self) -> Result<&'g Node<V>> {
        self.step().ok_or(GraphError::NoSuchElement)
    }

    /// Removal is not supported during a walk.
    ///
    /// # Errors
    ///
    /// Always returns [`GraphError::UnsupportedOperation`].
    pub fn remove(&mut self) -> Result<()> {
        Err(GraphError::unsupported("remove"))
    }

    /// Yields the node on top of the stack and moves on.
    fn step(&mut self) -> Option<&'g Node<V>> {
        let current = self.stack.last()?.node;
        self.visited.insert(current.key());
        self.advance();
        Some(current)
    }

    /// Moves the stack on to the next unvisited node, abandoning exhausted
    /// frames. Leaves the stack empty when nothing is left.
    fn advance(&mut self) {
        while let Some(mut frame) = self.stack.pop() {
            if let Some(next) = self.next_unvisited(&mut frame) {
                self.stack.push(frame);
                self.on_path.insert(next.key());
                self.stack.push(Frame::new(next));
                return;
            }
            self.on_path.remove(&frame.node.key());
            trace!("Frame {} exhausted at depth {}", frame.node.key(), self.stack.len());
        }
    }

    /// Consumes `frame`'s cursor up to the first target not yet visited.
    /// `frame` is popped but still counts as part of the path.
    fn next_unvisited(&mut self, frame: &mut Frame<'g, V>) -> Option<&'g Node<V>> {
        let graph = self.graph;
        for key in frame.cursor.by_ref() {
            let Some(candidate) = graph
                .relation(*key)
                .ok()
                .and_then(|rel| graph.node(rel.to()).ok())
            else {
                continue;
            };
            let target = candidate.key();

            if self.on_path.contains(&target) {
                trace!("Cycle: {} -> {target} closes on the current path", frame.node.key());
                self.has_cycles = true;
            }
            if !self.visited.contains(&target) {
                return Some(candidate);
            }
        }
        None
    }
}

impl<'g, V> Iterator for DepthFirstIter<'g, V> {
    type Item = &'g Node<V>;

    fn next(&mut self) -> Option<Self::Item> {
        self.step()
    }
}

impl<V> FusedIterator for DepthFirstIter<'_, V> {}
