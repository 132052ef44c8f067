use std::collections::BTreeMap;

use crate::error::RuleError;
use crate::value::AnswerValue;

/// Position of a question inside its form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QuestionId(pub(crate) usize);

impl QuestionId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Anything that can report the safe value of a question. Conditions read
/// answers exclusively through this trait.
pub trait ValueSource {
    fn safe_value(&self, question: QuestionId) -> Option<AnswerValue>;
}

/// Resolves question codes while a question's rules are being compiled.
///
/// Dependencies and conditional values resolve through a context that hides
/// the owning question; validations use [`LookupContext::with_self`].
#[derive(Debug, Clone, Copy)]
pub struct LookupContext<'a> {
    index: &'a BTreeMap<String, QuestionId>,
    owner: QuestionId,
    include_self: bool,
}

impl<'a> LookupContext<'a> {
    pub fn new(index: &'a BTreeMap<String, QuestionId>, owner: QuestionId) -> Self {
        Self {
            index,
            owner,
            include_self: false,
        }
    }

    pub fn with_self(self) -> Self {
        Self {
            include_self: true,
            ..self
        }
    }

    pub fn resolve(&self, code: &str) -> Result<QuestionId, RuleError> {
        let id = self
            .index
            .get(code)
            .copied()
            .ok_or_else(|| RuleError::UnknownQuestion {
                code: code.to_string(),
            })?;
        if id == self.owner && !self.include_self {
            return Err(RuleError::SelfReference {
                code: code.to_string(),
            });
        }
        Ok(id)
    }
}
