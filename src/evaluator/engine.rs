//! Single-rule evaluation against a response map.
//!
//! Rule evaluation is deliberately infallible: authors connect conditions to
//! live surveys, and a half-broken rule must degrade to "no match" rather
//! than take the session down. The only hard evaluation error (an empty
//! group) lives one level up in [`super::ConditionEvaluator`].

use itertools::Itertools;
use serde_json::Value;

use super::ResponseMap;
use super::value::*;
use crate::compiler::{CompiledGraph, CompiledNode};
use crate::workflow::{LogicRule, Operator, ValueType};

pub(super) fn evaluate_rule(
    rule: &LogicRule,
    responses: &ResponseMap,
    graph: &CompiledGraph,
) -> bool {
    let Some(raw) = responses.get(&rule.field) else {
        // A missing answer matches nothing, with one asymmetry: an
        // unanswered field *is* empty.
        return rule.operator == Operator::IsEmpty;
    };

    let mut value = unwrap_rich(raw);

    // Matrix/grid answers are objects keyed by row; drill into the row the
    // rule targets.
    if let Some(sub_field) = &rule.sub_field {
        if let Value::Object(map) = value {
            value = map.get(sub_field).unwrap_or(&Value::Null);
        }
    }

    let target: &Value = match rule.value_type {
        ValueType::Static => &rule.value,
        ValueType::Variable => {
            let Some(key) = rule.value.as_str() else {
                return false;
            };
            match responses.get(key) {
                Some(var) => unwrap_rich(var),
                // Comparing against an unanswered variable matches nothing.
                None => return false,
            }
        }
    };

    // Authors paste option labels where canonical values belong often enough
    // that the engine resolves both sides against the field's option list
    // before comparing.
    let field_node = graph.get(&rule.field);
    let value = resolve_labels(field_node, value);
    let target = resolve_labels(field_node, target);

    apply_operator(rule.operator, &value, &target)
}

/// If `value` is a string matching an option *label* of the referenced node
/// (or its author-defined "other" label), substitute the canonical option
/// value. Non-strings and unmatched strings pass through.
fn resolve_labels(node: Option<&CompiledNode>, value: &Value) -> Value {
    let Value::String(s) = value else {
        return value.clone();
    };
    let Some(node) = node else {
        return value.clone();
    };

    let normalized = normalize_label(s);
    if let Some(options) = node.body.choice_options() {
        if let Some(option) = options
            .iter()
            .find(|o| normalize_label(&o.label) == normalized)
        {
            return Value::String(option.value.clone());
        }
    }
    if node.body.allow_other() && normalized != "other" {
        let other_label = node.body.other_label().unwrap_or("Other");
        if normalize_label(other_label) == normalized {
            return Value::String("other".to_string());
        }
    }
    value.clone()
}

fn apply_operator(operator: Operator, value: &Value, target: &Value) -> bool {
    match operator {
        Operator::Equals => any_element_equals(value, target),
        Operator::NotEquals => !any_element_equals(value, target),
        Operator::Contains => match value {
            // Array answers test element membership, not substring.
            Value::Array(_) => any_element_equals(value, target),
            _ => normalize(&display_scalar(value)).contains(&normalize(&display_scalar(target))),
        },
        Operator::NotContains => match value {
            Value::Array(_) => !any_element_equals(value, target),
            _ => !normalize(&display_scalar(value)).contains(&normalize(&display_scalar(target))),
        },
        Operator::Gt => match (coerce_number(value), coerce_number(target)) {
            (Some(a), Some(b)) => a > b,
            _ => false,
        },
        Operator::Lt => match (coerce_number(value), coerce_number(target)) {
            (Some(a), Some(b)) => a < b,
            _ => false,
        },
        Operator::IsSet => !is_empty_value(value),
        Operator::IsEmpty => is_empty_value(value),
        Operator::IsBetween => is_between(value, target),
        Operator::InRange => in_range(value, target),
        Operator::Unknown => false,
    }
}

fn any_element_equals(value: &Value, target: &Value) -> bool {
    let target_norm = normalize(&display_scalar(target));
    match value {
        Value::Array(items) => items
            .iter()
            .any(|item| normalize(&display_scalar(item)) == target_norm),
        _ => normalize(&display_scalar(value)) == target_norm,
    }
}

/// `is_between` expects `target = {"min": ..., "max": ...}` and checks
/// inclusive numeric membership.
fn is_between(value: &Value, target: &Value) -> bool {
    let Value::Object(bounds) = target else {
        return false;
    };
    let (Some(num), Some(min), Some(max)) = (
        coerce_number(value),
        bounds.get("min").and_then(coerce_number),
        bounds.get("max").and_then(coerce_number),
    ) else {
        return false;
    };
    num >= min && num <= max
}

/// `in_range` parses a comma-separated list of single values and `a-b`
/// spans: spans check inclusive numeric membership, plain tokens check
/// normalized string equality.
fn in_range(value: &Value, target: &Value) -> bool {
    let Value::String(spec) = target else {
        return false;
    };
    spec.split(',').map(str::trim).any(|token| {
        if token.contains('-') {
            let Some((start, end)) = token.splitn(2, '-').collect_tuple() else {
                return false;
            };
            let (Some(start), Some(end), Some(num)) =
                (parse_number(start), parse_number(end), coerce_number(value))
            else {
                return false;
            };
            num >= start && num <= end
        } else {
            normalize(&display_scalar(value)) == normalize(token)
        }
    })
}
