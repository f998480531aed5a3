use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A recursive boolean condition tree: groups combine children with AND/OR,
/// rules compare a collected answer against a target value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogicGroup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub logic_type: LogicType,
    #[serde(default)]
    pub children: Vec<LogicItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LogicItem {
    #[serde(rename = "group")]
    Group(LogicGroup),
    #[serde(rename = "rule")]
    Rule(LogicRule),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogicType {
    #[default]
    #[serde(rename = "AND")]
    And,
    #[serde(rename = "OR")]
    Or,
}

/// A leaf condition. `field` is the id of the node whose answer is tested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogicRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub field: String,
    /// For object-shaped answers (matrix rows), the key to drill into.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_field: Option<String>,
    pub operator: Operator,
    #[serde(default)]
    pub value: Value,
    #[serde(default)]
    pub value_type: ValueType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Equals,
    NotEquals,
    Contains,
    NotContains,
    Gt,
    Lt,
    IsSet,
    IsEmpty,
    IsBetween,
    InRange,
    /// Operators this engine does not know evaluate to false rather than
    /// failing deserialization.
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    #[default]
    Static,
    Variable,
}

impl LogicGroup {
    pub fn new(logic_type: LogicType, children: Vec<LogicItem>) -> Self {
        Self {
            id: None,
            logic_type,
            children,
        }
    }

    pub fn all_of(children: Vec<LogicItem>) -> Self {
        Self::new(LogicType::And, children)
    }

    pub fn any_of(children: Vec<LogicItem>) -> Self {
        Self::new(LogicType::Or, children)
    }

    /// Collects every node id this condition reads: each rule's `field`, and
    /// the rule's `value` when it references another answer as a variable.
    /// Used by the validator's causal ordering check.
    pub fn referenced_fields(&self, out: &mut AHashSet<String>) {
        for child in &self.children {
            match child {
                LogicItem::Group(group) => group.referenced_fields(out),
                LogicItem::Rule(rule) => {
                    out.insert(rule.field.clone());
                    if rule.value_type == ValueType::Variable {
                        if let Some(var) = rule.value.as_str() {
                            out.insert(var.to_string());
                        }
                    }
                }
            }
        }
    }
}

impl LogicRule {
    pub fn new(field: &str, operator: Operator, value: Value) -> Self {
        Self {
            id: None,
            field: field.to_string(),
            sub_field: None,
            operator,
            value,
            value_type: ValueType::Static,
        }
    }

    pub fn with_sub_field(mut self, sub_field: &str) -> Self {
        self.sub_field = Some(sub_field.to_string());
        self
    }

    pub fn as_variable(mut self) -> Self {
        self.value_type = ValueType::Variable;
        self
    }
}

impl From<LogicRule> for LogicItem {
    fn from(rule: LogicRule) -> Self {
        LogicItem::Rule(rule)
    }
}

impl From<LogicGroup> for LogicItem {
    fn from(group: LogicGroup) -> Self {
        LogicItem::Group(group)
    }
}
