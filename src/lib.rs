//! # Keiro - Survey Workflow Compilation and Traversal Engine
//!
//! **Keiro** compiles visually-authored survey graphs into an executable
//! DAG, statically validates them for structural and causal soundness, and
//! walks the validated graph per respondent: branching on author-defined
//! conditions and skipping nodes whose visibility logic evaluates false.
//!
//! ## Core Workflow
//!
//! The engine operates on a canonical model of an editable workflow. The
//! primary flow is:
//!
//! 1.  **Load Your Data**: Parse the editor's graph JSON (or your own
//!     format, via the `IntoWorkflow` trait) into a `WorkflowDefinition`.
//! 2.  **Validate**: Run `validate` over the definition. This is the publish
//!     gate: it accumulates every structural, reachability and causal
//!     ordering problem into one report instead of failing on the first.
//! 3.  **Compile**: Run `compile` to resolve the edge list into per-node
//!     routing, producing the id-keyed `CompiledGraph` the runtime consumes.
//! 4.  **Traverse**: Create a `GraphWalker` over the compiled graph and call
//!     it once per respondent step with their accumulated answers.
//!
//! ## Quick Start
//!
//! ```rust
//! use keiro::prelude::*;
//!
//! // A minimal survey: start -> question -> end.
//! let workflow = WorkflowDefinition {
//!     nodes: vec![
//!         NodeDefinition::new("start", NodeBody::Start(StartData::default())),
//!         NodeDefinition::new(
//!             "q1",
//!             NodeBody::TextInput(QuestionData {
//!                 label: Some("How did you hear about us?".to_string()),
//!                 ..Default::default()
//!             }),
//!         ),
//!         NodeDefinition::new(
//!             "end",
//!             NodeBody::End(EndData {
//!                 redirect_url: Some("https://example.com/thanks".to_string()),
//!                 ..Default::default()
//!             }),
//!         ),
//!     ],
//!     edges: vec![
//!         EdgeDefinition::new("e1", "start", "q1"),
//!         EdgeDefinition::new("e2", "q1", "end"),
//!     ],
//! };
//!
//! // Gate on validation before compiling for the runtime.
//! let report = validate(&workflow);
//! assert!(report.is_valid, "{:?}", report.errors);
//!
//! let graph = compile(&workflow);
//! let walker = GraphWalker::new(&graph);
//!
//! let mut responses = ResponseMap::new();
//! responses.insert("q1".to_string(), serde_json::json!("a friend"));
//!
//! let next = walker.next_node("q1", &responses).unwrap().unwrap();
//! assert_eq!(next.id, "end");
//!
//! let path = walker.taken_path(&responses).unwrap();
//! assert_eq!(path.len(), 3);
//! ```

pub mod compiler;
pub mod error;
pub mod evaluator;
pub mod prelude;
pub mod traversal;
pub mod validator;
pub mod workflow;
