use serde_json::Value;
use service_rules::{
    AnswerMode, FormError, FormReport, FormStatus, RuleError, ServiceDefinition, ServiceForm,
    SubmittedAttribute,
};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("json parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid service definition: {0}")]
    Rules(#[from] RuleError),
    #[error("invalid answer: {0}")]
    Form(#[from] FormError),
    #[error("invalid patch: {0}")]
    InvalidPatch(String),
    #[error("form is incomplete; blocking questions: {}", blocking.join(", "))]
    Incomplete { blocking: Vec<String> },
}

/// Result of applying a patch: the gate status and the full report behind it.
#[derive(Debug, Clone)]
pub struct PatchOutcome {
    pub status: FormStatus,
    pub report: FormReport,
}

impl PatchOutcome {
    fn from_report(report: FormReport) -> Self {
        Self {
            status: report.status,
            report,
        }
    }

    pub fn response_json(&self) -> Result<String, SessionError> {
        Ok(serde_json::to_string(&self.report)?)
    }
}

/// JSON-in, JSON-out wrapper around a [`ServiceForm`] for hosts that talk
/// to the rules engine through serialized patches.
#[derive(Debug, Clone)]
pub struct FormSession {
    form: ServiceForm,
}

impl FormSession {
    pub fn new(form: ServiceForm) -> Self {
        Self { form }
    }

    pub fn from_definition_json(raw: &str) -> Result<Self, SessionError> {
        let definition: ServiceDefinition = serde_json::from_str(raw)?;
        Ok(Self::new(ServiceForm::from_definition(&definition)?))
    }

    pub fn form(&self) -> &ServiceForm {
        &self.form
    }

    pub fn report(&self) -> FormReport {
        self.form.report()
    }

    pub fn is_complete(&self) -> bool {
        self.form.questions_ok()
    }

    /// Applies a `{code: value}` object. The patch is applied atomically: on
    /// error the session keeps its previous answers.
    pub fn submit_patch_json(&mut self, patch_json: &str) -> Result<PatchOutcome, SessionError> {
        let patch: Value = serde_json::from_str(patch_json)?;
        let entries = patch.as_object().ok_or_else(|| {
            SessionError::InvalidPatch(
                "patch_json must be a JSON object map of question code -> value".into(),
            )
        })?;
        if entries.is_empty() {
            return Err(SessionError::InvalidPatch(
                "patch_json cannot be empty".into(),
            ));
        }

        let mut next = self.form.clone();
        let applied = next.apply_answers(&patch, AnswerMode::Strict)?;
        self.form = next;
        debug!(
            service = self.form.service_code(),
            applied, "applied answer patch"
        );

        Ok(PatchOutcome::from_report(self.form.report()))
    }

    pub fn set_malformed(
        &mut self,
        code: &str,
        malformed: bool,
    ) -> Result<PatchOutcome, SessionError> {
        self.form.set_malformed(code, malformed)?;
        Ok(PatchOutcome::from_report(self.form.report()))
    }

    /// Answers ready for submission, once the gate holds.
    pub fn finish(self) -> Result<Vec<SubmittedAttribute>, SessionError> {
        let report = self.form.report();
        if !report.questions_ok {
            return Err(SessionError::Incomplete {
                blocking: report.blocking,
            });
        }
        Ok(self.form.submission_attributes())
    }
}
