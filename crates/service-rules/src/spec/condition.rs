use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How the conditions of a group are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Clause {
    And,
    Or,
}

/// Comparison applied between a question's safe value and a literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    Eq,
    Neq,
    In,
    Gt,
    Gte,
    Lt,
    Lte,
}

/// Declared type of a tagged literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LiteralType {
    Number,
    String,
    StringArray,
}

impl fmt::Display for LiteralType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LiteralType::Number => "NUMBER",
            LiteralType::String => "STRING",
            LiteralType::StringArray => "STRING_ARRAY",
        };
        f.write_str(label)
    }
}

/// Literal as published by the service catalog: a type tag plus one populated
/// payload field. Converted into [`crate::Literal`] when a condition is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TaggedLiteral {
    #[serde(rename = "type")]
    pub kind: LiteralType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub string: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub array: Option<Vec<String>>,
}

impl TaggedLiteral {
    pub fn number(value: f64) -> Self {
        Self {
            kind: LiteralType::Number,
            number: Some(value),
            string: None,
            array: None,
        }
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self {
            kind: LiteralType::String,
            number: None,
            string: Some(value.into()),
            array: None,
        }
    }

    pub fn array<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind: LiteralType::StringArray,
            number: None,
            string: None,
            array: Some(values.into_iter().map(Into::into).collect()),
        }
    }
}

/// A single comparison against another question's answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ConditionSpec {
    pub attribute: String,
    pub op: Operator,
    pub value: TaggedLiteral,
}

impl ConditionSpec {
    pub fn new(attribute: impl Into<String>, op: Operator, value: TaggedLiteral) -> Self {
        Self {
            attribute: attribute.into(),
            op,
            value,
        }
    }
}

/// Conditions joined by a single clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ConditionGroupSpec {
    pub clause: Clause,
    #[serde(default)]
    pub conditions: Vec<ConditionSpec>,
}

impl ConditionGroupSpec {
    pub fn all(conditions: Vec<ConditionSpec>) -> Self {
        Self {
            clause: Clause::And,
            conditions,
        }
    }

    pub fn any(conditions: Vec<ConditionSpec>) -> Self {
        Self {
            clause: Clause::Or,
            conditions,
        }
    }
}
