use super::definition::WorkflowDefinition;
use crate::error::WorkflowConversionError;

/// A trait for custom editor payloads that can be converted into a keiro
/// `WorkflowDefinition`.
///
/// The engine itself is format-agnostic: it only ever sees nodes and edges.
/// Implement this on your own storage or transport structs to provide the
/// translation layer into the canonical model.
///
/// # Example
///
/// ```rust
/// use keiro::workflow::{IntoWorkflow, WorkflowDefinition};
/// use keiro::error::WorkflowConversionError;
///
/// struct StoredWorkflow {
///     design_json: serde_json::Value,
/// }
///
/// impl IntoWorkflow for StoredWorkflow {
///     fn into_workflow(self) -> Result<WorkflowDefinition, WorkflowConversionError> {
///         serde_json::from_value(self.design_json)
///             .map_err(|e| WorkflowConversionError::InvalidPayload(e.to_string()))
///     }
/// }
/// ```
pub trait IntoWorkflow {
    /// Consumes the object and converts it into the canonical workflow model.
    fn into_workflow(self) -> Result<WorkflowDefinition, WorkflowConversionError>;
}

impl IntoWorkflow for WorkflowDefinition {
    fn into_workflow(self) -> Result<WorkflowDefinition, WorkflowConversionError> {
        Ok(self)
    }
}
