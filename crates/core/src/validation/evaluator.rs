//! Rule evaluator: pure logic, no I/O.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};

use super::rules::{FieldErrors, FieldRule, RuleKind, RuleSet};

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("valid regex"));

static SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").expect("valid regex"));

/// Evaluate every rule against one serialized record.
pub fn evaluate(rules: &RuleSet, data: &Map<String, Value>) -> FieldErrors {
    let mut errors = FieldErrors::new();

    for rule in rules.rules() {
        if errors.contains(&rule.field) {
            continue;
        }
        if violates(rule, data) {
            errors.insert(rule.field.clone(), rule.message.clone());
        }
    }

    errors
}

/// Serialize `model` and evaluate `rules` against it.
///
/// Models that do not serialize to a JSON object have no fields to check and
/// produce no errors.
pub fn evaluate_model<T: Serialize>(rules: &RuleSet, model: &T) -> FieldErrors {
    match serde_json::to_value(model) {
        Ok(Value::Object(map)) => evaluate(rules, &map),
        _ => FieldErrors::new(),
    }
}

fn violates(rule: &FieldRule, data: &Map<String, Value>) -> bool {
    let value = data.get(&rule.field);

    match &rule.kind {
        RuleKind::Required => is_blank(value),
        RuleKind::Email => matches_present(value, &EMAIL_RE),
        RuleKind::NonNegativeNumber => match present(value) {
            Some(v) => !as_number(v).is_some_and(|n| n >= 0.0),
            None => false,
        },
        RuleKind::NonNegativeInteger => match present(value) {
            Some(v) => !as_number(v).is_some_and(|n| n >= 0.0 && n.fract() == 0.0),
            None => false,
        },
        RuleKind::Slug => matches_present(value, &SLUG_RE),
        RuleKind::RequiredWhen { when, equals } => {
            data.get(when) == Some(equals) && is_blank(value)
        }
        RuleKind::OneOf(allowed) => match present(value) {
            Some(v) => !allowed.contains(v),
            None => false,
        },
        RuleKind::Pattern(pattern) => match (present(value).and_then(Value::as_str), Regex::new(pattern)) {
            (Some(s), Ok(re)) => !re.is_match(s),
            _ => false,
        },
    }
}

/// The value unless it is missing, null, or a blank string.
fn present(value: Option<&Value>) -> Option<&Value> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.trim().is_empty() => None,
        Some(v) => Some(v),
    }
}

fn is_blank(value: Option<&Value>) -> bool {
    match present(value) {
        None => true,
        Some(Value::Array(items)) => items.is_empty(),
        Some(_) => false,
    }
}

/// Format checks only apply to non-blank strings; non-strings always fail.
fn matches_present(value: Option<&Value>, re: &Regex) -> bool {
    match present(value) {
        Some(Value::String(s)) => !re.is_match(s),
        Some(_) => true,
        None => false,
    }
}

/// Numbers and numeric strings (form inputs arrive as text).
fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}
