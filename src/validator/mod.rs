//! Static analysis over an editable workflow.
//!
//! [`validate`] is the single gate a workflow must pass before it is
//! eligible for publish. It never fails early: every check runs and every
//! finding is accumulated, so one run reports everything wrong with the
//! graph. The publish gate itself (refusing to store an invalid workflow)
//! belongs to the caller; this module only computes the verdict.

use ahash::AHashSet;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::workflow::{NodeDefinition, WorkflowDefinition};

mod topology;

use topology::Topology;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A single validation finding, keyed to a node where one is responsible.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    pub severity: Severity,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
}

impl ValidationError {
    fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            node_id: None,
        }
    }

    fn error_at(message: impl Into<String>, node_id: &str) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            node_id: Some(node_id.to_string()),
        }
    }
}

/// The outcome of a validation run. `is_valid` holds iff no errors were
/// found; the report is produced fresh each run and never persisted here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
}

/// Runs every structural and logical check over the workflow:
///
/// 1. exactly one start node, at least one end node;
/// 2. cycle detection via Kahn's algorithm (one aggregate error);
/// 3. forward reachability from the start node;
/// 4. backward reachability to an end node (dead-end detection);
/// 5. per-node-type rules: end nodes need a redirect URL, branch nodes need
///    a non-empty condition and both a TRUE and a FALSE edge (and nothing
///    else), every other non-end node has at most one outgoing edge;
/// 6. causal ordering: a branch condition may only reference fields placed
///    strictly before the branch in the topological order.
pub fn validate(workflow: &WorkflowDefinition) -> ValidationReport {
    let mut errors = Vec::new();

    let start_nodes: Vec<&NodeDefinition> = workflow
        .nodes
        .iter()
        .filter(|n| n.body.is_start())
        .collect();
    let end_nodes: Vec<&NodeDefinition> =
        workflow.nodes.iter().filter(|n| n.body.is_end()).collect();

    if start_nodes.is_empty() {
        errors.push(ValidationError::error(
            "The flow must have exactly one Start node.",
        ));
    } else if start_nodes.len() > 1 {
        errors.push(ValidationError::error(
            "The flow has multiple Start nodes. Only one is allowed.",
        ));
    }

    if end_nodes.is_empty() {
        errors.push(ValidationError::error(
            "The flow must have at least one End node.",
        ));
    }

    let topology = Topology::build(workflow);

    if topology.has_cycle() {
        errors.push(ValidationError::error(
            "The flow contains a cycle (loop). Remove loops to publish.",
        ));
    }

    if start_nodes.len() == 1 {
        let reachable = topology.reachable_from(&start_nodes[0].id);
        for node in &workflow.nodes {
            if !reachable.contains(&node.id) {
                errors.push(ValidationError::error_at(
                    format!(
                        "Node '{}' is not reachable from the Start node.",
                        node.display_name()
                    ),
                    &node.id,
                ));
            }
        }
    }

    let reaches_end = topology.reaching(end_nodes.iter().map(|n| n.id.as_str()));
    for node in &workflow.nodes {
        if !reaches_end.contains(&node.id) {
            errors.push(ValidationError::error_at(
                format!(
                    "Path starting at '{}' never reaches an End node.",
                    node.display_name()
                ),
                &node.id,
            ));
        }
    }

    for node in &workflow.nodes {
        check_node_rules(node, workflow, &topology, &mut errors);
    }

    ValidationReport {
        is_valid: errors.is_empty(),
        errors,
    }
}

fn check_node_rules(
    node: &NodeDefinition,
    workflow: &WorkflowDefinition,
    topology: &Topology,
    errors: &mut Vec<ValidationError>,
) {
    if node.body.is_end() {
        if node.body.redirect_url().is_none_or(str::is_empty) {
            errors.push(ValidationError::error_at(
                "End node must have a Redirect URL.",
                &node.id,
            ));
        }
        return;
    }

    let out_edges: Vec<_> = workflow
        .edges
        .iter()
        .filter(|e| e.source == node.id)
        .collect();

    if !node.body.is_branch() {
        if out_edges.len() > 1 {
            errors.push(ValidationError::error_at(
                "Standard question nodes can only have one outgoing connection.",
                &node.id,
            ));
        }
        return;
    }

    // Branch-specific rules.
    let condition = node.body.condition();
    if condition.is_none_or(|c| c.children.is_empty()) {
        errors.push(ValidationError::error_at(
            "Branch node must have at least one valid condition rule.",
            &node.id,
        ));
    }

    // Causal ordering: every field the condition reads must be answered
    // before the branch can be reached, on every path. The topological
    // position is the baseline guarantee for that.
    if let Some(condition) = condition {
        let mut referenced = AHashSet::new();
        condition.referenced_fields(&mut referenced);
        let branch_position = topology.position(&node.id);
        for field_id in referenced.iter().sorted() {
            let ordered_before = match (topology.position(field_id), branch_position) {
                (Some(field_pos), Some(branch_pos)) => field_pos < branch_pos,
                _ => false,
            };
            if !ordered_before {
                errors.push(ValidationError::error_at(
                    format!(
                        "Branch depends on question '{field_id}' which is not guaranteed to be answered before this branch."
                    ),
                    &node.id,
                ));
            }
        }
    }

    let mut has_true = false;
    let mut has_false = false;
    for edge in &out_edges {
        match edge.source_handle.as_deref() {
            Some("true") => has_true = true,
            Some("false") => has_false = true,
            other => {
                let handle = other.unwrap_or("<none>");
                errors.push(ValidationError::error_at(
                    format!(
                        "Branch connection has an invalid handle '{handle}'. Only TRUE and FALSE outputs are allowed."
                    ),
                    &node.id,
                ));
            }
        }
    }
    if !has_true || !has_false {
        errors.push(ValidationError::error_at(
            "Branch node must have both TRUE and FALSE connections.",
            &node.id,
        ));
    }
}
