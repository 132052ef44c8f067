use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::spec::condition::ConditionGroupSpec;

/// Supported question data types, named as the service catalog names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionType {
    Informational,
    BooleanCheckbox,
    String,
    Text,
    Number,
    Date,
    Datetime,
    #[serde(rename = "SINGLEVALUELIST")]
    SingleValueList,
    #[serde(rename = "MULTIVALUELIST")]
    MultiValueList,
}

/// Selectable option of a list question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ValueOption {
    pub key: String,
    pub name: String,
}

impl ValueOption {
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
        }
    }
}

/// Extra options offered only while `dependent_conditions` holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConditionalValuesSpec {
    #[serde(alias = "conditions")]
    pub dependent_conditions: ConditionGroupSpec,
    #[serde(default)]
    pub values: Vec<ValueOption>,
}

/// Validation rule: the answer is acceptable while `dependent_conditions` holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSpec {
    #[serde(alias = "conditions")]
    pub dependent_conditions: ConditionGroupSpec,
    pub message: String,
    #[serde(default)]
    pub report_only: bool,
}

/// Definition of a single question (service attribute).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttributeSpec {
    pub code: String,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<ValueOption>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditional_values: Vec<ConditionalValuesSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<ConditionGroupSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validations: Vec<ValidationSpec>,
}

impl AttributeSpec {
    pub fn new(code: impl Into<String>, kind: QuestionType) -> Self {
        Self {
            code: code.into(),
            kind,
            description: String::new(),
            required: false,
            values: None,
            conditional_values: Vec::new(),
            dependencies: None,
            validations: Vec::new(),
        }
    }
}

/// Top-level service definition as published by the service catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ServiceDefinition {
    pub code: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub attributes: Vec<AttributeSpec>,
}
