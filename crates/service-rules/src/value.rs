use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::RuleError;
use crate::spec::{LiteralType, TaggedLiteral};

/// Raw or safe answer held by a question. Unanswered is `None` at the use site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum AnswerValue {
    Text(String),
    List(Vec<String>),
}

impl AnswerValue {
    /// Non-empty text or a non-empty list.
    pub fn is_present(&self) -> bool {
        match self {
            AnswerValue::Text(text) => !text.is_empty(),
            AnswerValue::List(items) => !items.is_empty(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AnswerValue::Text(text) => Some(text),
            AnswerValue::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            AnswerValue::List(items) => Some(items),
            AnswerValue::Text(_) => None,
        }
    }
}

impl From<&str> for AnswerValue {
    fn from(value: &str) -> Self {
        AnswerValue::Text(value.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(value: String) -> Self {
        AnswerValue::Text(value)
    }
}

impl From<Vec<String>> for AnswerValue {
    fn from(value: Vec<String>) -> Self {
        AnswerValue::List(value)
    }
}

impl From<Vec<&str>> for AnswerValue {
    fn from(value: Vec<&str>) -> Self {
        AnswerValue::List(value.into_iter().map(str::to_string).collect())
    }
}

/// Literal operand of a condition.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Number(f64),
    Text(String),
    List(Vec<String>),
}

impl TryFrom<&TaggedLiteral> for Literal {
    type Error = RuleError;

    fn try_from(tagged: &TaggedLiteral) -> Result<Self, Self::Error> {
        let literal = match tagged.kind {
            LiteralType::Number => tagged.number.map(Literal::Number),
            LiteralType::String => tagged.string.clone().map(Literal::Text),
            LiteralType::StringArray => tagged.array.clone().map(Literal::List),
        };
        literal.ok_or(RuleError::MalformedLiteral { kind: tagged.kind })
    }
}

/// Parses answer text as a float. Blank, non-numeric and non-finite input
/// yield `None`.
pub(crate) fn parse_number(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}
