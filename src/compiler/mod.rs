//! Compilation of the editable node/edge list into the runtime graph.
//!
//! Compilation is a pure, infallible normalization step: it resolves edges
//! into per-node `next` pointers and nothing else. Structural soundness is
//! the [`crate::validator`]'s job; callers must validate before trusting
//! compiled output.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::workflow::{NodeBody, WorkflowDefinition};

pub mod artifact;

/// A node in executable form: its typed payload plus resolved routing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompiledNode {
    pub id: String,
    #[serde(flatten)]
    pub body: NodeBody,
    pub next: NextStep,
}

/// Resolved outgoing routing for a compiled node.
///
/// Invariant: `Branch` iff the node's type is branch. Targets are `None`
/// when no edge was drawn or the edge pointed at a node that does not exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum NextStep {
    #[serde(rename = "linear")]
    Linear {
        #[serde(rename = "nextId")]
        next_id: Option<String>,
    },
    #[serde(rename = "branch")]
    Branch {
        #[serde(rename = "trueId")]
        true_id: Option<String>,
        #[serde(rename = "falseId")]
        false_id: Option<String>,
    },
}

/// The runtime graph: compiled nodes keyed by id. Serializes to the same
/// id-keyed JSON object the survey runner consumes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompiledGraph {
    nodes: AHashMap<String, CompiledNode>,
}

impl CompiledGraph {
    pub fn get(&self, id: &str) -> Option<&CompiledNode> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &CompiledNode)> {
        self.nodes.iter()
    }

    /// All nodes of type start. The traversal engine requires exactly one.
    pub fn start_nodes(&self) -> impl Iterator<Item = &CompiledNode> {
        self.nodes.values().filter(|n| n.body.is_start())
    }
}

/// Compiles an editable workflow into its runtime graph.
///
/// Every node is initialized with empty routing (`Linear { next_id: None }`,
/// or `Branch { None, None }` for branch nodes), then edges are folded in:
///
/// - a branch source routes the edge through `true_id`/`false_id` according
///   to its `"true"`/`"false"` handle; edges with any other handle on a
///   branch are dropped here and reported by the validator;
/// - a linear source sets `next_id`.
///
/// Duplicate edges on the same (source, handle) overwrite: the last edge in
/// the list wins. Edges whose source or target is not a known node are
/// dropped, leaving the routing slot `None`.
pub fn compile(workflow: &WorkflowDefinition) -> CompiledGraph {
    let mut nodes: AHashMap<String, CompiledNode> = AHashMap::with_capacity(workflow.nodes.len());

    for node in &workflow.nodes {
        let next = if node.body.is_branch() {
            NextStep::Branch {
                true_id: None,
                false_id: None,
            }
        } else {
            NextStep::Linear { next_id: None }
        };
        nodes.insert(
            node.id.clone(),
            CompiledNode {
                id: node.id.clone(),
                body: node.body.clone(),
                next,
            },
        );
    }

    for edge in &workflow.edges {
        if !nodes.contains_key(&edge.target) {
            continue;
        }
        let Some(source) = nodes.get_mut(&edge.source) else {
            continue;
        };
        match &mut source.next {
            NextStep::Branch { true_id, false_id } => match edge.source_handle.as_deref() {
                Some("true") => *true_id = Some(edge.target.clone()),
                Some("false") => *false_id = Some(edge.target.clone()),
                _ => {}
            },
            NextStep::Linear { next_id } => *next_id = Some(edge.target.clone()),
        }
    }

    CompiledGraph { nodes }
}
