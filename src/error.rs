use thiserror::Error;

/// Errors raised while evaluating a condition tree.
///
/// Rule evaluation itself never fails: a rule over a missing or malformed
/// answer simply evaluates to `false` (or `true` for `is_empty`). The only
/// hard error is a condition with nothing in it, which has no defensible
/// truth value.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvaluationError {
    #[error("Cannot evaluate an empty condition group")]
    EmptyGroup,
}

/// Errors raised while walking a compiled graph.
///
/// These indicate a graph that should never have reached the runtime: the
/// validator rejects every one of these shapes before publish. A session
/// hitting one of them must be aborted.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TraversalError {
    #[error("Start node missing in workflow")]
    StartNodeMissing,

    #[error("Multiple start nodes found, workflow invalid")]
    MultipleStartNodes,

    #[error("Branch node '{node_id}' has no condition defined")]
    MissingBranchCondition { node_id: String },

    #[error("Cycle detected at node '{node_id}' during runtime traversal")]
    CycleDetected { node_id: String },

    #[error("Branch condition failed to evaluate: {0}")]
    Condition(#[from] EvaluationError),
}

/// Errors raised when converting a custom payload into a `WorkflowDefinition`.
#[derive(Error, Debug, Clone)]
pub enum WorkflowConversionError {
    #[error("Invalid workflow payload: {0}")]
    InvalidPayload(String),
}

/// Errors raised by the compiled-graph artifact helpers (file I/O and JSON
/// encoding only; compilation itself never fails).
#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("Could not access artifact file '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Artifact (de)serialization failed: {0}")]
    Codec(#[from] serde_json::Error),
}
