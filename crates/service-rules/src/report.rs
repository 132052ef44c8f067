use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::form::ServiceForm;
use crate::spec::{QuestionType, ValueOption};
use crate::value::AnswerValue;

/// Overall state of a form as seen by the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FormStatus {
    /// Some required, visible question still blocks progression.
    NeedInput,
    /// The wizard may proceed.
    Complete,
}

impl FormStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormStatus::NeedInput => "need_input",
            FormStatus::Complete => "complete",
        }
    }
}

/// Snapshot of one question's derived state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct QuestionStatus {
    pub code: String,
    pub kind: QuestionType,
    pub required: bool,
    pub visible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_options: Option<Vec<ValueOption>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safe_value: Option<AnswerValue>,
    pub requirements_met: bool,
    pub malformed: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub infos: Vec<String>,
}

/// Everything a renderer needs to draw the current step of a form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FormReport {
    pub service_code: String,
    pub status: FormStatus,
    pub questions_ok: bool,
    pub questions: Vec<QuestionStatus>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_required: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub blocking: Vec<String>,
}

pub fn build_report(form: &ServiceForm) -> FormReport {
    let mut missing_required = Vec::new();
    let mut blocking = Vec::new();

    let answers = form.safe_values();
    let questions = form
        .questions()
        .map(|question| {
            let code = question.code().to_string();
            let question = question.question();
            let visible = question.visible(&answers);
            let requirements_met = question.requirements_met(&answers);
            if question.required() && visible {
                if !question.has_safe_value(&answers) {
                    missing_required.push(code.clone());
                }
                if !requirements_met {
                    blocking.push(code.clone());
                }
            }
            QuestionStatus {
                code,
                kind: question.kind(),
                required: question.required(),
                visible,
                value_options: question.value_options(&answers),
                safe_value: question.safe_value(&answers),
                requirements_met,
                malformed: question.malformed(),
                errors: question.validation_error_messages(&answers),
                infos: question.validation_info_messages(&answers),
            }
        })
        .collect::<Vec<_>>();

    let questions_ok = blocking.is_empty();
    FormReport {
        service_code: form.service_code().to_string(),
        status: if questions_ok {
            FormStatus::Complete
        } else {
            FormStatus::NeedInput
        },
        questions_ok,
        questions,
        missing_required,
        blocking,
    }
}

impl ServiceForm {
    pub fn report(&self) -> FormReport {
        build_report(self)
    }
}
