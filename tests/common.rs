//! Common test utilities for building workflow definitions and responses.
use keiro::prelude::*;
use serde_json::{Value, json};

#[allow(dead_code)]
pub fn start(id: &str) -> NodeDefinition {
    NodeDefinition::new(id, NodeBody::Start(StartData::default()))
}

#[allow(dead_code)]
pub fn end(id: &str) -> NodeDefinition {
    NodeDefinition::new(
        id,
        NodeBody::End(EndData {
            redirect_url: Some("https://example.com/done".to_string()),
            ..Default::default()
        }),
    )
}

#[allow(dead_code)]
pub fn end_without_redirect(id: &str) -> NodeDefinition {
    NodeDefinition::new(id, NodeBody::End(EndData::default()))
}

#[allow(dead_code)]
pub fn text(id: &str) -> NodeDefinition {
    NodeDefinition::new(
        id,
        NodeBody::TextInput(QuestionData {
            label: Some(format!("Question {id}")),
            ..Default::default()
        }),
    )
}

#[allow(dead_code)]
pub fn text_with_condition(id: &str, condition: LogicGroup) -> NodeDefinition {
    NodeDefinition::new(
        id,
        NodeBody::TextInput(QuestionData {
            label: Some(format!("Question {id}")),
            condition: Some(condition),
            ..Default::default()
        }),
    )
}

#[allow(dead_code)]
pub fn single_choice(id: &str, options: Vec<ChoiceOption>) -> NodeDefinition {
    NodeDefinition::new(
        id,
        NodeBody::SingleChoice(ChoiceData {
            label: Some(format!("Question {id}")),
            options,
            ..Default::default()
        }),
    )
}

#[allow(dead_code)]
pub fn branch(id: &str, condition: Option<LogicGroup>) -> NodeDefinition {
    NodeDefinition::new(
        id,
        NodeBody::Branch(BranchData {
            label: None,
            condition,
        }),
    )
}

#[allow(dead_code)]
pub fn edge(id: &str, source: &str, target: &str) -> EdgeDefinition {
    EdgeDefinition::new(id, source, target)
}

#[allow(dead_code)]
pub fn branch_edge(id: &str, source: &str, target: &str, handle: &str) -> EdgeDefinition {
    EdgeDefinition::new(id, source, target).with_handle(handle)
}

/// A single-rule AND group: `field <op> value`.
#[allow(dead_code)]
pub fn condition(field: &str, operator: Operator, value: Value) -> LogicGroup {
    LogicGroup::all_of(vec![LogicRule::new(field, operator, value).into()])
}

/// `start -> q1 -> end`, no conditions anywhere.
#[allow(dead_code)]
pub fn linear_workflow() -> WorkflowDefinition {
    WorkflowDefinition {
        nodes: vec![start("start"), text("q1"), end("end")],
        edges: vec![edge("e1", "start", "q1"), edge("e2", "q1", "end")],
    }
}

/// `start -> q1 -> branch -> {true: end1, false: end2}` where the branch
/// tests `q1 == "yes"`.
#[allow(dead_code)]
pub fn branching_workflow() -> WorkflowDefinition {
    WorkflowDefinition {
        nodes: vec![
            start("start"),
            text("q1"),
            branch(
                "branch",
                Some(condition("q1", Operator::Equals, json!("yes"))),
            ),
            end("end1"),
            end("end2"),
        ],
        edges: vec![
            edge("e1", "start", "q1"),
            edge("e2", "q1", "branch"),
            branch_edge("e3", "branch", "end1", "true"),
            branch_edge("e4", "branch", "end2", "false"),
        ],
    }
}

/// Builds a response map from `(node id, answer)` pairs.
#[allow(dead_code)]
pub fn answers(pairs: &[(&str, Value)]) -> ResponseMap {
    pairs
        .iter()
        .map(|(id, value)| (id.to_string(), value.clone()))
        .collect()
}

/// An empty compiled graph, for evaluator tests that need no option-label
/// resolution.
#[allow(dead_code)]
pub fn empty_graph() -> CompiledGraph {
    compile(&WorkflowDefinition::default())
}
