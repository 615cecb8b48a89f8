//! Unit tests for relation creation and linking consistency.

use relgraph::{Direction, Graph, GraphError, GraphObject, NodeKey};

fn three_nodes() -> (Graph<&'static str>, NodeKey, NodeKey, NodeKey) {
    let mut graph = Graph::new();
    let a = graph.create_node_with_id("a", Some("A")).unwrap();
    let b = graph.create_node_with_id("b", Some("B")).unwrap();
    let c = graph.create_node_with_id("c", Some("C")).unwrap();
    (graph, a, b, c)
}

#[test]
fn test_create_relation_is_detached() {
    let (mut graph, a, b, _) = three_nodes();

    let r = graph.create_relation_with_id("a-b", a, b).unwrap();

    let rel = graph.relation(r).unwrap();
    assert_eq!(rel.id().as_str(), "a-b");
    assert_eq!(rel.from(), a);
    assert_eq!(rel.to(), b);
    assert_eq!(graph.from_value(r).unwrap(), Some(&"A"));
    assert_eq!(graph.to_value(r).unwrap(), Some(&"B"));
    assert!(!graph.is_attached(r).unwrap());
    assert!(!graph.has_outgoing_relations(a).unwrap());
    assert!(!graph.has_incoming_relations(b).unwrap());
}

#[test]
fn test_add_incoming_relation_updates_both_endpoints() {
    let (mut graph, a, b, _) = three_nodes();
    let r = graph.create_relation(a, b).unwrap();

    graph.add_incoming_relation(b, r).unwrap();

    assert_eq!(graph.node(b).unwrap().incoming(), &[r]);
    assert_eq!(graph.node(a).unwrap().outgoing(), &[r]);
    assert!(graph.node(a).unwrap().incoming().is_empty());
    assert!(graph.node(b).unwrap().outgoing().is_empty());
    assert!(graph.is_attached(r).unwrap());
}

#[test]
fn test_add_outgoing_relation_updates_both_endpoints() {
    let (mut graph, a, b, _) = three_nodes();
    let r = graph.create_relation(a, b).unwrap();

    graph.add_outgoing_relation(a, r).unwrap();

    assert_eq!(graph.node(a).unwrap().outgoing(), &[r]);
    assert_eq!(graph.node(b).unwrap().incoming(), &[r]);
}

#[test]
fn test_add_incoming_relation_wrong_endpoint() {
    let (mut graph, a, b, c) = three_nodes();
    let r = graph.create_relation(a, b).unwrap();

    let result = graph.add_incoming_relation(c, r);
    assert!(matches!(
        result,
        Err(GraphError::InvalidRelation {
            direction: Direction::Incoming,
            ..
        })
    ));

    // `a` is the source, not the target
    let result = graph.add_incoming_relation(a, r);
    assert!(matches!(result, Err(GraphError::InvalidRelation { .. })));
    assert!(!graph.is_attached(r).unwrap());
}

#[test]
fn test_add_outgoing_relation_wrong_endpoint() {
    let (mut graph, a, b, _) = three_nodes();
    let r = graph.create_relation(a, b).unwrap();

    let result = graph.add_outgoing_relation(b, r);

    assert!(matches!(
        result,
        Err(GraphError::InvalidRelation {
            direction: Direction::Outgoing,
            ..
        })
    ));
}

#[test]
fn test_same_relation_added_twice() {
    let (mut graph, a, b, _) = three_nodes();
    let r = graph.create_relation(a, b).unwrap();
    graph.add_incoming_relation(b, r).unwrap();

    assert!(matches!(
        graph.add_incoming_relation(b, r),
        Err(GraphError::DuplicateRelation { .. })
    ));
    // Already registered on `a` by the first call
    assert!(matches!(
        graph.add_outgoing_relation(a, r),
        Err(GraphError::DuplicateRelation { .. })
    ));
    assert_eq!(graph.incoming_relation_count(b).unwrap(), 1);
    assert_eq!(graph.outgoing_relation_count(a).unwrap(), 1);
}

#[test]
fn test_second_relation_between_same_pair_rejected() {
    let (mut graph, a, b, _) = three_nodes();
    let first = graph.create_relation(a, b).unwrap();
    let second = graph.create_relation(a, b).unwrap();
    graph.add_outgoing_relation(a, first).unwrap();

    assert!(matches!(
        graph.add_outgoing_relation(a, second),
        Err(GraphError::DuplicateRelation { .. })
    ));
    assert!(matches!(
        graph.add_incoming_relation(b, second),
        Err(GraphError::DuplicateRelation { .. })
    ));

    // State is unchanged by the failed attempts
    assert_eq!(graph.node(a).unwrap().outgoing(), &[first]);
    assert_eq!(graph.node(b).unwrap().incoming(), &[first]);
    assert!(!graph.is_attached(second).unwrap());
}

#[test]
fn test_implicit_duplicate_creates_nothing() {
    let (mut graph, a, b, _) = three_nodes();
    graph.add_outgoing_to(a, b).unwrap();
    let relations_before = graph.relation_count();

    assert!(matches!(
        graph.add_outgoing_to(a, b),
        Err(GraphError::DuplicateRelation { .. })
    ));
    assert!(matches!(
        graph.add_incoming_from(b, a),
        Err(GraphError::DuplicateRelation { .. })
    ));
    assert_eq!(graph.relation_count(), relations_before);
}

#[test]
fn test_opposite_directions_are_distinct() {
    let (mut graph, a, b, _) = three_nodes();

    graph.add_outgoing_to(a, b).unwrap();
    graph.add_outgoing_to(b, a).unwrap();

    assert_eq!(graph.outgoing_relation_count(a).unwrap(), 1);
    assert_eq!(graph.incoming_relation_count(a).unwrap(), 1);
    assert!(graph.relation_between(a, b).is_some());
    assert!(graph.relation_between(b, a).is_some());
}

#[test]
fn test_duplicate_relation_id_rejected() {
    let (mut graph, a, b, c) = three_nodes();
    graph.create_relation_with_id("r", a, b).unwrap();

    let result = graph.create_relation_with_id("r", b, c);

    assert!(matches!(result, Err(GraphError::DuplicateRelation { .. })));
    assert_eq!(graph.relation_count(), 1);
}

#[test]
fn test_relation_to_unknown_node() {
    let (mut graph, a, _, _) = three_nodes();
    let mut other: Graph<()> = Graph::new();
    let missing = (0..4).map(|_| other.create_node(None).unwrap()).last().unwrap();

    assert!(matches!(
        graph.create_relation(a, missing),
        Err(GraphError::NodeNotFound { .. })
    ));
}

#[test]
fn test_every_relation_registered_on_both_sides() {
    let (mut graph, a, b, c) = three_nodes();
    graph.add_outgoing_to(a, b).unwrap();
    graph.add_incoming_from(c, b).unwrap();
    let r = graph.create_relation(c, a).unwrap();
    graph.add_incoming_relation(a, r).unwrap();

    for rel in graph.relations() {
        let from = graph.node(rel.from()).unwrap();
        let to = graph.node(rel.to()).unwrap();
        assert!(from.outgoing().contains(&rel.key()));
        assert!(to.incoming().contains(&rel.key()));
    }
    for node in graph.nodes() {
        for key in node.incoming() {
            assert_eq!(graph.relation(*key).unwrap().to(), node.key());
        }
        for key in node.outgoing() {
            assert_eq!(graph.relation(*key).unwrap().from(), node.key());
        }
    }
}

#[test]
fn test_remove_relation_detaches_both_sides() {
    let (mut graph, a, b, c) = three_nodes();
    let ab = graph.add_outgoing_to(a, b).unwrap();
    let ac = graph.add_outgoing_to(a, c).unwrap();

    let removed = graph.remove_relation(ab).unwrap();

    assert_eq!(removed.from(), a);
    assert_eq!(graph.node(a).unwrap().outgoing(), &[ac]);
    assert!(!graph.has_incoming_relations(b).unwrap());
    assert!(graph.find_relation(removed.id().as_str()).is_none());
    assert!(matches!(
        graph.remove_relation(ab),
        Err(GraphError::RelationNotFound { .. })
    ));

    // The pair can be linked again afterwards
    graph.add_outgoing_to(a, b).unwrap();
    assert_eq!(graph.all_to_nodes(a).unwrap(), vec![c, b]);
}

#[test]
fn test_hub_relation_lookup() {
    let mut graph: Graph<usize> = Graph::new();
    let hub = graph.create_node(None).unwrap();
    let targets: Vec<_> = (0..1000).map(|i| graph.create_node(Some(i)).unwrap()).collect();
    let relations: Vec<_> = targets
        .iter()
        .map(|&t| graph.add_outgoing_to(hub, t).unwrap())
        .collect();

    for (&t, &r) in targets.iter().zip(&relations) {
        assert_eq!(graph.relation_between(hub, t).unwrap().key(), r);
        assert!(graph.relation_between(t, hub).is_none());
    }
    assert!(matches!(
        graph.add_outgoing_to(hub, targets[500]),
        Err(GraphError::DuplicateRelation { .. })
    ));

    graph.remove_relation(relations[500]).unwrap();
    assert!(graph.relation_between(hub, targets[500]).is_none());
    assert_eq!(graph.outgoing_relation_count(hub).unwrap(), 999);
}

#[test]
fn test_self_relation() {
    let (mut graph, a, _, _) = three_nodes();

    let r = graph.add_outgoing_to(a, a).unwrap();

    assert_eq!(graph.node(a).unwrap().incoming(), &[r]);
    assert_eq!(graph.node(a).unwrap().outgoing(), &[r]);
    assert!(graph.is_connected_with(a, a).unwrap());
    assert!(matches!(
        graph.add_incoming_from(a, a),
        Err(GraphError::DuplicateRelation { .. })
    ));
}
