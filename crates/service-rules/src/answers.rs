use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::FormError;
use crate::form::ServiceForm;
use crate::spec::QuestionType;
use crate::value::AnswerValue;

/// How [`apply_answers`] treats codes and values it cannot use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AnswerMode {
    #[default]
    Strict,
    Lenient,
}

/// One `{code, value}` pair handed to the case-submission service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedAttribute {
    pub code: String,
    pub value: String,
}

/// Converts a JSON answer into a raw question value.
///
/// `null` clears the answer, booleans map to the checkbox form (`"true"` or
/// empty), numbers to their decimal text. Objects and arrays holding
/// anything but strings are not answers.
pub fn answer_from_json(value: &Value) -> Option<Option<AnswerValue>> {
    match value {
        Value::Null => Some(None),
        Value::String(text) => Some(Some(AnswerValue::Text(text.clone()))),
        Value::Bool(checked) => Some(Some(AnswerValue::Text(if *checked {
            "true".into()
        } else {
            String::new()
        }))),
        Value::Number(number) => Some(Some(AnswerValue::Text(number.to_string()))),
        Value::Array(items) => items
            .iter()
            .map(|item| item.as_str().map(str::to_string))
            .collect::<Option<Vec<_>>>()
            .map(|items| Some(AnswerValue::List(items))),
        Value::Object(_) => None,
    }
}

/// Assigns raw values from a JSON object keyed by question code. Returns how
/// many answers were applied.
///
/// Every entry is checked before any is written, so a strict failure leaves
/// the form untouched.
pub fn apply_answers(
    form: &mut ServiceForm,
    answers: &Value,
    mode: AnswerMode,
) -> Result<usize, FormError> {
    let entries = answers.as_object().ok_or(FormError::AnswersNotObject)?;
    let mut accepted = Vec::with_capacity(entries.len());

    for (code, raw) in entries {
        if form.id_of(code).is_none() {
            match mode {
                AnswerMode::Strict => {
                    return Err(FormError::UnknownQuestion { code: code.clone() });
                }
                AnswerMode::Lenient => {
                    warn!(question = %code, "skipping answer for unknown question");
                    continue;
                }
            }
        }

        let Some(value) = answer_from_json(raw) else {
            match mode {
                AnswerMode::Strict => {
                    return Err(FormError::UnsupportedAnswer {
                        code: code.clone(),
                        value: raw.to_string(),
                    });
                }
                AnswerMode::Lenient => {
                    warn!(question = %code, value = %raw, "skipping unsupported answer");
                    continue;
                }
            }
        };
        accepted.push((code.as_str(), value));
    }

    let applied = accepted.len();
    for (code, value) in accepted {
        form.set_value(code, value)?;
    }
    Ok(applied)
}

/// Answers to send with a case submission: visible, non-informational
/// questions with a safe value, in form order. Multi-value answers expand to
/// one entry per selected key.
pub fn submission_attributes(form: &ServiceForm) -> Vec<SubmittedAttribute> {
    let mut attributes = Vec::new();
    for question in form.questions() {
        if question.question().kind() == QuestionType::Informational {
            continue;
        }
        let Some(value) = question.safe_value() else {
            continue;
        };
        match value {
            AnswerValue::Text(text) if !text.is_empty() => attributes.push(SubmittedAttribute {
                code: question.code().to_string(),
                value: text,
            }),
            AnswerValue::Text(_) => {}
            AnswerValue::List(items) => {
                attributes.extend(items.into_iter().map(|item| SubmittedAttribute {
                    code: question.code().to_string(),
                    value: item,
                }))
            }
        }
    }
    attributes
}

impl ServiceForm {
    pub fn apply_answers(&mut self, answers: &Value, mode: AnswerMode) -> Result<usize, FormError> {
        apply_answers(self, answers, mode)
    }

    pub fn submission_attributes(&self) -> Vec<SubmittedAttribute> {
        submission_attributes(self)
    }
}
