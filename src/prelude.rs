//! Prelude module for convenient imports
//!
//! Re-exports the most commonly used types so callers can bring the whole
//! engine surface in with a single `use`.
//!
//! # Example
//!
//! ```rust,no_run
//! use keiro::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let design_json = std::fs::read_to_string("path/to/workflow.json")?;
//! let workflow: WorkflowDefinition = serde_json::from_str(&design_json)?;
//!
//! let report = validate(&workflow);
//! if report.is_valid {
//!     let graph = compile(&workflow);
//!     let walker = GraphWalker::new(&graph);
//!     let responses = ResponseMap::new();
//!     let path = walker.taken_path(&responses)?;
//!     println!("Path length: {}", path.len());
//! }
//! # Ok(())
//! # }
//! ```

// Compilation and traversal
pub use crate::compiler::{CompiledGraph, CompiledNode, NextStep, compile};
pub use crate::traversal::GraphWalker;

// Validation
pub use crate::validator::{Severity, ValidationError, ValidationReport, validate};

// Condition evaluation
pub use crate::evaluator::{ConditionEvaluator, ResponseMap};

// Design-time model
pub use crate::workflow::{
    BranchData, ChoiceData, ChoiceOption, EdgeDefinition, EndData, IntoWorkflow, LogicGroup,
    LogicItem, LogicRule, LogicType, MatrixData, NodeBody, NodeDefinition, NumberData, Operator,
    QuestionData, StartData, ValueType, WorkflowDefinition,
};

// Error types
pub use crate::error::{EvaluationError, TraversalError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
