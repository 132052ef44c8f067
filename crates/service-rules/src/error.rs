use thiserror::Error;

use crate::spec::LiteralType;

/// Integrity errors raised while compiling a service definition.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuleError {
    #[error("condition references unknown question '{code}'")]
    UnknownQuestion { code: String },
    #[error("question '{code}' cannot depend on its own answer")]
    SelfReference { code: String },
    #[error("literal declared as {kind} has no {kind} payload")]
    MalformedLiteral { kind: LiteralType },
    #[error("duplicate question code '{code}'")]
    DuplicateCode { code: String },
    #[error("dependency cycle detected: {}", chain.join(" -> "))]
    DependencyCycle { chain: Vec<String> },
    #[error("attribute '{code}': {source}")]
    InAttribute {
        code: String,
        source: Box<RuleError>,
    },
}

impl RuleError {
    pub(crate) fn in_attribute(code: &str, source: RuleError) -> Self {
        RuleError::InAttribute {
            code: code.to_string(),
            source: Box::new(source),
        }
    }

    /// Innermost error, skipping attribute context.
    pub fn root(&self) -> &RuleError {
        match self {
            RuleError::InAttribute { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Errors raised while reading or writing answers on a built form.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    #[error("unknown question '{code}'")]
    UnknownQuestion { code: String },
    #[error("answers must be a JSON object keyed by question code")]
    AnswersNotObject,
    #[error("unsupported answer for '{code}': {value}")]
    UnsupportedAnswer { code: String, value: String },
}
