use serde::{Deserialize, Serialize};

use super::logic::LogicGroup;

/// The complete, editable definition of a survey workflow as produced by the
/// visual editor: a flat list of nodes and the edges connecting them.
///
/// This is the design-time representation. It is compiled into a
/// [`crate::compiler::CompiledGraph`] before it can be walked at runtime.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowDefinition {
    pub nodes: Vec<NodeDefinition>,
    pub edges: Vec<EdgeDefinition>,
}

/// A single node placed on the editor canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDefinition {
    pub id: String,
    /// Canvas coordinates. Carried for round-tripping; the engine ignores it.
    #[serde(default)]
    pub position: Position,
    #[serde(flatten)]
    pub body: NodeBody,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// A connection between two nodes.
///
/// `source_handle` is only meaningful when the source is a branch node, where
/// it must be `"true"` or `"false"` to select the outgoing route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeDefinition {
    #[serde(default)]
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<String>,
}

impl EdgeDefinition {
    pub fn new(id: &str, source: &str, target: &str) -> Self {
        Self {
            id: id.to_string(),
            source: source.to_string(),
            target: target.to_string(),
            source_handle: None,
        }
    }

    pub fn with_handle(mut self, handle: &str) -> Self {
        self.source_handle = Some(handle.to_string());
        self
    }
}

/// The typed payload of a node: one variant per node type the editor can
/// place, each carrying only the fields that type actually has.
///
/// On the wire this is the React-Flow-style `{ "type": ..., "data": {...} }`
/// pair, so existing stored workflows deserialize directly into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum NodeBody {
    #[serde(rename = "start")]
    Start(StartData),
    #[serde(rename = "end")]
    End(EndData),
    #[serde(rename = "branch")]
    Branch(BranchData),
    #[serde(rename = "textInput")]
    TextInput(QuestionData),
    #[serde(rename = "multiInput")]
    MultiInput(QuestionData),
    #[serde(rename = "numberInput")]
    NumberInput(NumberData),
    #[serde(rename = "emailInput")]
    EmailInput(QuestionData),
    #[serde(rename = "dateInput")]
    DateInput(QuestionData),
    #[serde(rename = "singleChoice")]
    SingleChoice(ChoiceData),
    #[serde(rename = "multipleChoice")]
    MultipleChoice(ChoiceData),
    #[serde(rename = "dropdown")]
    Dropdown(ChoiceData),
    #[serde(rename = "ranking")]
    Ranking(ChoiceData),
    #[serde(rename = "rating")]
    Rating(RatingData),
    #[serde(rename = "slider")]
    Slider(NumberData),
    #[serde(rename = "consent")]
    Consent(QuestionData),
    #[serde(rename = "zipCodeInput")]
    ZipCodeInput(ZipCodeData),
    #[serde(rename = "matrixChoice")]
    MatrixChoice(MatrixData),
    #[serde(rename = "cascadingChoice")]
    CascadingChoice(QuestionData),
    #[serde(rename = "image")]
    Image(MediaData),
    #[serde(rename = "video")]
    Video(MediaData),
    #[serde(rename = "audio")]
    Audio(MediaData),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartData {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub welcome_message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndData {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    /// Respondents are redirected here on completion. The validator requires
    /// this to be non-empty before publish.
    #[serde(default)]
    pub redirect_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchData {
    #[serde(default)]
    pub label: Option<String>,
    /// The routing condition. True selects the `"true"` edge, false the
    /// `"false"` edge.
    #[serde(default)]
    pub condition: Option<LogicGroup>,
}

/// Shared shape for plain question nodes: text, email, date, consent, and
/// other kinds that add nothing the engine cares about.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionData {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Skip logic: when present and false at runtime, the node is bypassed.
    #[serde(default)]
    pub condition: Option<LogicGroup>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberData {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub condition: Option<LogicGroup>,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub step: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceData {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub condition: Option<LogicGroup>,
    #[serde(default)]
    pub options: Vec<ChoiceOption>,
    #[serde(default)]
    pub max_choices: Option<u32>,
    #[serde(default)]
    pub allow_other: bool,
    #[serde(default)]
    pub other_label: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingData {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub condition: Option<LogicGroup>,
    #[serde(default)]
    pub items: Vec<ChoiceOption>,
    #[serde(default)]
    pub max_rating: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZipCodeData {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub condition: Option<LogicGroup>,
    #[serde(default)]
    pub allowed_zips: Option<String>,
}

/// Matrix questions answer as an object keyed by row value; conditions drill
/// into a row via `LogicRule::sub_field`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixData {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub condition: Option<LogicGroup>,
    #[serde(default)]
    pub rows: Vec<ChoiceOption>,
    #[serde(default)]
    pub columns: Vec<ChoiceOption>,
    #[serde(default)]
    pub multiple: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaData {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub condition: Option<LogicGroup>,
    #[serde(default)]
    pub url: Option<String>,
}

/// A selectable option: what the respondent sees (`label`) and the canonical
/// answer stored for it (`value`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub label: String,
    pub value: String,
}

impl ChoiceOption {
    pub fn new(label: &str, value: &str) -> Self {
        Self {
            label: label.to_string(),
            value: value.to_string(),
        }
    }
}

impl NodeBody {
    pub fn is_start(&self) -> bool {
        matches!(self, NodeBody::Start(_))
    }

    pub fn is_end(&self) -> bool {
        matches!(self, NodeBody::End(_))
    }

    pub fn is_branch(&self) -> bool {
        matches!(self, NodeBody::Branch(_))
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            NodeBody::Start(d) => d.label.as_deref(),
            NodeBody::End(d) => d.label.as_deref(),
            NodeBody::Branch(d) => d.label.as_deref(),
            NodeBody::TextInput(d)
            | NodeBody::MultiInput(d)
            | NodeBody::EmailInput(d)
            | NodeBody::DateInput(d)
            | NodeBody::Consent(d)
            | NodeBody::CascadingChoice(d) => d.label.as_deref(),
            NodeBody::NumberInput(d) | NodeBody::Slider(d) => d.label.as_deref(),
            NodeBody::SingleChoice(d)
            | NodeBody::MultipleChoice(d)
            | NodeBody::Dropdown(d)
            | NodeBody::Ranking(d) => d.label.as_deref(),
            NodeBody::Rating(d) => d.label.as_deref(),
            NodeBody::ZipCodeInput(d) => d.label.as_deref(),
            NodeBody::MatrixChoice(d) => d.label.as_deref(),
            NodeBody::Image(d) | NodeBody::Video(d) | NodeBody::Audio(d) => d.label.as_deref(),
        }
    }

    /// The node-level condition: skip logic on question nodes, the routing
    /// condition on branch nodes.
    pub fn condition(&self) -> Option<&LogicGroup> {
        match self {
            NodeBody::Start(_) | NodeBody::End(_) => None,
            NodeBody::Branch(d) => d.condition.as_ref(),
            NodeBody::TextInput(d)
            | NodeBody::MultiInput(d)
            | NodeBody::EmailInput(d)
            | NodeBody::DateInput(d)
            | NodeBody::Consent(d)
            | NodeBody::CascadingChoice(d) => d.condition.as_ref(),
            NodeBody::NumberInput(d) | NodeBody::Slider(d) => d.condition.as_ref(),
            NodeBody::SingleChoice(d)
            | NodeBody::MultipleChoice(d)
            | NodeBody::Dropdown(d)
            | NodeBody::Ranking(d) => d.condition.as_ref(),
            NodeBody::Rating(d) => d.condition.as_ref(),
            NodeBody::ZipCodeInput(d) => d.condition.as_ref(),
            NodeBody::MatrixChoice(d) => d.condition.as_ref(),
            NodeBody::Image(d) | NodeBody::Video(d) | NodeBody::Audio(d) => d.condition.as_ref(),
        }
    }

    /// The option list used for label-to-value resolution when evaluating
    /// conditions: `options` for choice kinds, `columns` for matrix nodes.
    pub fn choice_options(&self) -> Option<&[ChoiceOption]> {
        match self {
            NodeBody::SingleChoice(d)
            | NodeBody::MultipleChoice(d)
            | NodeBody::Dropdown(d)
            | NodeBody::Ranking(d) => Some(&d.options),
            NodeBody::Rating(d) => Some(&d.items),
            NodeBody::MatrixChoice(d) => Some(&d.columns),
            _ => None,
        }
    }

    pub fn allow_other(&self) -> bool {
        match self {
            NodeBody::SingleChoice(d) | NodeBody::MultipleChoice(d) | NodeBody::Dropdown(d) => {
                d.allow_other
            }
            _ => false,
        }
    }

    pub fn other_label(&self) -> Option<&str> {
        match self {
            NodeBody::SingleChoice(d) | NodeBody::MultipleChoice(d) | NodeBody::Dropdown(d) => {
                d.other_label.as_deref()
            }
            _ => None,
        }
    }

    pub fn redirect_url(&self) -> Option<&str> {
        match self {
            NodeBody::End(d) => d.redirect_url.as_deref(),
            _ => None,
        }
    }
}

impl NodeDefinition {
    pub fn new(id: &str, body: NodeBody) -> Self {
        Self {
            id: id.to_string(),
            position: Position::default(),
            body,
        }
    }

    /// Display name used in validation messages: the label when set,
    /// otherwise the id.
    pub fn display_name(&self) -> &str {
        self.body.label().unwrap_or(&self.id)
    }
}
