//! Evaluation of author-defined condition trees against collected answers.
//!
//! The evaluator is pure: it reads the compiled graph (for option-label
//! resolution) and a response snapshot, holds no state of its own, and can
//! be shared freely across sessions and threads.

use ahash::AHashMap;
use serde_json::Value;

use crate::compiler::CompiledGraph;
use crate::error::EvaluationError;
use crate::workflow::{LogicGroup, LogicItem, LogicType};

mod engine;
mod value;

/// Collected answers keyed by node id. Values may be raw answers or rich
/// `{"answer": ...}` wrappers; the evaluator unwraps the latter itself.
pub type ResponseMap = AHashMap<String, Value>;

/// Evaluates [`LogicGroup`] trees against a [`ResponseMap`].
///
/// Holds a reference to the compiled graph so rules can resolve option
/// labels to canonical values against the referenced node's definition.
pub struct ConditionEvaluator<'a> {
    graph: &'a CompiledGraph,
}

impl<'a> ConditionEvaluator<'a> {
    pub fn new(graph: &'a CompiledGraph) -> Self {
        Self { graph }
    }

    /// Recursively evaluates a condition tree.
    ///
    /// A group with no children is a hard error at any depth: "vacuously
    /// true" is ambiguous, and an author who wants an always-shown node
    /// attaches no condition at all. Every child is evaluated (no
    /// short-circuit) and the results combine with AND/OR.
    pub fn evaluate(
        &self,
        group: &LogicGroup,
        responses: &ResponseMap,
    ) -> Result<bool, EvaluationError> {
        if group.children.is_empty() {
            return Err(EvaluationError::EmptyGroup);
        }

        let mut results = Vec::with_capacity(group.children.len());
        for child in &group.children {
            results.push(match child {
                LogicItem::Group(inner) => self.evaluate(inner, responses)?,
                LogicItem::Rule(rule) => engine::evaluate_rule(rule, responses, self.graph),
            });
        }

        Ok(match group.logic_type {
            LogicType::And => results.iter().all(|r| *r),
            LogicType::Or => results.iter().any(|r| *r),
        })
    }
}
