//! Runtime traversal of a compiled graph.
//!
//! Given a respondent's answers so far, the walker computes the next node to
//! present, applying branch routing and recursive skip logic, and can replay
//! the full path a finished response set takes through the survey.

use ahash::AHashSet;

use crate::compiler::{CompiledGraph, CompiledNode, NextStep};
use crate::error::TraversalError;
use crate::evaluator::{ConditionEvaluator, ResponseMap};

/// Walks a [`CompiledGraph`] deterministically for a fixed response map.
///
/// The walker borrows the graph and is itself stateless; one instance can
/// serve any number of concurrent sessions.
pub struct GraphWalker<'a> {
    graph: &'a CompiledGraph,
    evaluator: ConditionEvaluator<'a>,
}

impl<'a> GraphWalker<'a> {
    pub fn new(graph: &'a CompiledGraph) -> Self {
        Self {
            graph,
            evaluator: ConditionEvaluator::new(graph),
        }
    }

    /// The unique entry node of the graph.
    pub fn start_node(&self) -> Result<&'a CompiledNode, TraversalError> {
        let mut starts = self.graph.start_nodes();
        let first = starts.next().ok_or(TraversalError::StartNodeMissing)?;
        if starts.next().is_some() {
            return Err(TraversalError::MultipleStartNodes);
        }
        Ok(first)
    }

    /// Computes the node to present after `current_id` for the given
    /// answers.
    ///
    /// Branch nodes route through their condition; a missing or empty branch
    /// condition is a hard error, because the graph should never have been
    /// published that way. Once a candidate is found, its own skip logic is
    /// checked: false skips past it recursively, and an evaluation error
    /// shows the node anyway.
    ///
    /// `Ok(None)` means the path ends here.
    pub fn next_node(
        &self,
        current_id: &str,
        responses: &ResponseMap,
    ) -> Result<Option<&'a CompiledNode>, TraversalError> {
        let Some(node) = self.graph.get(current_id) else {
            return Ok(None);
        };

        let candidate_id = match &node.next {
            NextStep::Branch { true_id, false_id } => {
                let condition = node
                    .body
                    .condition()
                    .filter(|c| !c.children.is_empty())
                    .ok_or_else(|| TraversalError::MissingBranchCondition {
                        node_id: current_id.to_string(),
                    })?;
                if self.evaluator.evaluate(condition, responses)? {
                    true_id
                } else {
                    false_id
                }
            }
            NextStep::Linear { next_id } => next_id,
        };

        let Some(candidate_id) = candidate_id else {
            return Ok(None);
        };
        let Some(candidate) = self.graph.get(candidate_id) else {
            return Ok(None);
        };

        if let Some(condition) = candidate.body.condition() {
            match self.evaluator.evaluate(condition, responses) {
                Ok(false) => return self.next_node(candidate_id, responses),
                Ok(true) => {}
                // Fail open: a condition we cannot evaluate must not hide
                // the node.
                Err(_) => return Ok(Some(candidate)),
            }
        }

        Ok(Some(candidate))
    }

    /// Replays the full path a response set takes through the graph, from
    /// the start node until an end node is appended or the path runs out.
    ///
    /// Revisiting any node id aborts with a cycle error. The validator
    /// rejects cyclic graphs before publish, but the walker must not
    /// infinite-loop when handed unvalidated input.
    pub fn taken_path(
        &self,
        responses: &ResponseMap,
    ) -> Result<Vec<&'a CompiledNode>, TraversalError> {
        let mut path = Vec::new();
        let mut visited = AHashSet::new();
        let mut current = Some(self.start_node()?);

        while let Some(node) = current {
            if !visited.insert(node.id.clone()) {
                return Err(TraversalError::CycleDetected {
                    node_id: node.id.clone(),
                });
            }
            path.push(node);

            if node.body.is_end() {
                break;
            }
            current = self.next_node(&node.id, responses)?;
        }

        Ok(path)
    }
}
