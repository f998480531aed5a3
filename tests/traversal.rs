//! Tests for the runtime walker: branch routing, skip logic, path replay.
mod common;
use common::*;
use keiro::prelude::*;
use serde_json::json;

#[test]
fn test_linear_step_through() {
    let graph = compile(&linear_workflow());
    let walker = GraphWalker::new(&graph);

    let next = walker.next_node("start", &ResponseMap::new()).unwrap();
    assert_eq!(next.unwrap().id, "q1");

    let responses = answers(&[("q1", json!("hi"))]);
    let next = walker.next_node("q1", &responses).unwrap();
    assert_eq!(next.unwrap().id, "end");

    let next = walker.next_node("end", &responses).unwrap();
    assert!(next.is_none());
}

#[test]
fn test_branch_routes_true_and_false() {
    let graph = compile(&branching_workflow());
    let walker = GraphWalker::new(&graph);

    let next = walker
        .next_node("branch", &answers(&[("q1", json!("yes"))]))
        .unwrap();
    assert_eq!(next.unwrap().id, "end1");

    let next = walker
        .next_node("branch", &answers(&[("q1", json!("no"))]))
        .unwrap();
    assert_eq!(next.unwrap().id, "end2");
}

#[test]
fn test_branch_without_condition_is_a_hard_error() {
    let mut workflow = branching_workflow();
    for node in &mut workflow.nodes {
        if node.id == "branch" {
            *node = branch("branch", None);
        }
    }
    let graph = compile(&workflow);
    let walker = GraphWalker::new(&graph);

    let result = walker.next_node("branch", &ResponseMap::new());
    assert_eq!(
        result,
        Err(TraversalError::MissingBranchCondition {
            node_id: "branch".to_string()
        })
    );
}

#[test]
fn test_unknown_current_node_ends_the_path() {
    let graph = compile(&linear_workflow());
    let walker = GraphWalker::new(&graph);

    let next = walker.next_node("ghost", &ResponseMap::new()).unwrap();
    assert!(next.is_none());
}

#[test]
fn test_skip_logic_bypasses_node() {
    // q2 is only shown when q1 == "yes".
    let workflow = WorkflowDefinition {
        nodes: vec![
            start("start"),
            text("q1"),
            text_with_condition("q2", condition("q1", Operator::Equals, json!("yes"))),
            end("end"),
        ],
        edges: vec![
            edge("e1", "start", "q1"),
            edge("e2", "q1", "q2"),
            edge("e3", "q2", "end"),
        ],
    };
    let graph = compile(&workflow);
    let walker = GraphWalker::new(&graph);

    let next = walker
        .next_node("q1", &answers(&[("q1", json!("yes"))]))
        .unwrap();
    assert_eq!(next.unwrap().id, "q2");

    // Skipped past q2, straight to its successor.
    let next = walker
        .next_node("q1", &answers(&[("q1", json!("no"))]))
        .unwrap();
    assert_eq!(next.unwrap().id, "end");
}

#[test]
fn test_skip_logic_chains_across_consecutive_nodes() {
    let cond = condition("q1", Operator::Equals, json!("yes"));
    let workflow = WorkflowDefinition {
        nodes: vec![
            start("start"),
            text("q1"),
            text_with_condition("q2", cond.clone()),
            text_with_condition("q3", cond),
            end("end"),
        ],
        edges: vec![
            edge("e1", "start", "q1"),
            edge("e2", "q1", "q2"),
            edge("e3", "q2", "q3"),
            edge("e4", "q3", "end"),
        ],
    };
    let graph = compile(&workflow);
    let walker = GraphWalker::new(&graph);

    let next = walker
        .next_node("q1", &answers(&[("q1", json!("no"))]))
        .unwrap();
    assert_eq!(next.unwrap().id, "end");
}

#[test]
fn test_skip_logic_failure_shows_the_node() {
    // An empty condition group cannot be evaluated; the walker must show
    // the node rather than hide content behind a broken condition.
    let workflow = WorkflowDefinition {
        nodes: vec![
            start("start"),
            text("q1"),
            text_with_condition("q2", LogicGroup::all_of(vec![])),
            end("end"),
        ],
        edges: vec![
            edge("e1", "start", "q1"),
            edge("e2", "q1", "q2"),
            edge("e3", "q2", "end"),
        ],
    };
    let graph = compile(&workflow);
    let walker = GraphWalker::new(&graph);

    let next = walker
        .next_node("q1", &answers(&[("q1", json!("anything"))]))
        .unwrap();
    assert_eq!(next.unwrap().id, "q2");
}

#[test]
fn test_taken_path_linear() {
    let graph = compile(&linear_workflow());
    let walker = GraphWalker::new(&graph);

    let path = walker.taken_path(&answers(&[("q1", json!("hi"))])).unwrap();
    let ids: Vec<&str> = path.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["start", "q1", "end"]);
}

#[test]
fn test_taken_path_follows_branch() {
    let graph = compile(&branching_workflow());
    let walker = GraphWalker::new(&graph);

    let path = walker
        .taken_path(&answers(&[("q1", json!("yes"))]))
        .unwrap();
    let ids: Vec<&str> = path.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["start", "q1", "branch", "end1"]);

    // When the branch condition is false it is treated as skip logic on the
    // way in: the branch node itself drops out of the path and the walk
    // continues through its false arm.
    let path = walker.taken_path(&answers(&[("q1", json!("no"))])).unwrap();
    let ids: Vec<&str> = path.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["start", "q1", "end2"]);
}

#[test]
fn test_taken_path_detects_cycle_in_unvalidated_graph() {
    let workflow = WorkflowDefinition {
        nodes: vec![start("start"), text("a"), text("b")],
        edges: vec![
            edge("e1", "start", "a"),
            edge("e2", "a", "b"),
            edge("e3", "b", "a"),
        ],
    };
    let graph = compile(&workflow);
    let walker = GraphWalker::new(&graph);

    let result = walker.taken_path(&ResponseMap::new());
    assert_eq!(
        result,
        Err(TraversalError::CycleDetected {
            node_id: "a".to_string()
        })
    );
}

#[test]
fn test_taken_path_requires_unique_start() {
    let graph = compile(&WorkflowDefinition {
        nodes: vec![text("q1")],
        edges: vec![],
    });
    let walker = GraphWalker::new(&graph);
    assert_eq!(
        walker.taken_path(&ResponseMap::new()),
        Err(TraversalError::StartNodeMissing)
    );

    let graph = compile(&WorkflowDefinition {
        nodes: vec![start("s1"), start("s2")],
        edges: vec![],
    });
    let walker = GraphWalker::new(&graph);
    assert_eq!(
        walker.taken_path(&ResponseMap::new()),
        Err(TraversalError::MultipleStartNodes)
    );
}

#[test]
fn test_taken_path_ends_when_routing_runs_out() {
    // No end node: the path stops at the last connected node.
    let workflow = WorkflowDefinition {
        nodes: vec![start("start"), text("q1")],
        edges: vec![edge("e1", "start", "q1")],
    };
    let graph = compile(&workflow);
    let walker = GraphWalker::new(&graph);

    let path = walker.taken_path(&ResponseMap::new()).unwrap();
    let ids: Vec<&str> = path.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["start", "q1"]);
}
