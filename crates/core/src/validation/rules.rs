//! Validation rule and result types.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;

/// The primitive checks a field rule can perform.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleKind {
    /// Present, non-null, and not blank (strings are trimmed, arrays must be
    /// non-empty).
    Required,
    /// `^\S+@\S+\.\S+$`. Blank values pass; pair with `Required`.
    Email,
    /// A number (or numeric string) that is `>= 0`.
    NonNegativeNumber,
    /// A whole number (or whole numeric string) that is `>= 0`.
    NonNegativeInteger,
    /// Lowercase words joined by single hyphens: `^[a-z0-9]+(-[a-z0-9]+)*$`.
    Slug,
    /// `Required`, but only while the field `when` holds the value `equals`.
    RequiredWhen { when: String, equals: Value },
    /// The value must be one of `values`. Absent values pass.
    OneOf(Vec<Value>),
    /// The string must match a regular expression. Invalid patterns pass.
    Pattern(String),
}

/// One rule bound to a field, with the message shown when it fails.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRule {
    pub field: String,
    pub kind: RuleKind,
    pub message: String,
}

/// An ordered list of field rules.
///
/// Rules are evaluated in declaration order and the first failure on a field
/// wins, so declare `Required` before format checks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleSet {
    rules: Vec<FieldRule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn rule(mut self, field: &str, kind: RuleKind, message: &str) -> Self {
        self.rules.push(FieldRule {
            field: field.to_string(),
            kind,
            message: message.to_string(),
        });
        self
    }

    pub fn required(self, field: &str, message: &str) -> Self {
        self.rule(field, RuleKind::Required, message)
    }

    pub fn email(self, field: &str, message: &str) -> Self {
        self.rule(field, RuleKind::Email, message)
    }

    pub fn non_negative_number(self, field: &str, message: &str) -> Self {
        self.rule(field, RuleKind::NonNegativeNumber, message)
    }

    pub fn non_negative_integer(self, field: &str, message: &str) -> Self {
        self.rule(field, RuleKind::NonNegativeInteger, message)
    }

    pub fn slug(self, field: &str, message: &str) -> Self {
        self.rule(field, RuleKind::Slug, message)
    }

    pub fn required_when(
        self,
        field: &str,
        when: &str,
        equals: impl Into<Value>,
        message: &str,
    ) -> Self {
        self.rule(
            field,
            RuleKind::RequiredWhen {
                when: when.to_string(),
                equals: equals.into(),
            },
            message,
        )
    }
}

/// Field → message mapping produced by evaluating a [`RuleSet`].
///
/// Serializes as a plain JSON object (`{"email": "Invalid email"}`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Record a message unless the field already has one.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `Ok(())` when empty, otherwise a [`CoreError::Validation`].
    pub fn into_result(self) -> Result<(), CoreError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(CoreError::Validation(self))
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl FromIterator<(String, String)> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut errors = Self::new();
        for (field, message) in iter {
            errors.insert(field, message);
        }
        errors
    }
}
