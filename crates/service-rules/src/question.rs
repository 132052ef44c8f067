use std::collections::BTreeMap;

use crate::condition::ConditionGroup;
use crate::error::RuleError;
use crate::lookup::{LookupContext, QuestionId, ValueSource};
use crate::spec::{AttributeSpec, QuestionType, ValueOption};
use crate::value::AnswerValue;

/// Options appended to a list question while `conditions` holds.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalValues {
    conditions: ConditionGroup,
    values: Vec<ValueOption>,
}

impl ConditionalValues {
    pub fn conditions(&self) -> &ConditionGroup {
        &self.conditions
    }

    pub fn values(&self) -> &[ValueOption] {
        &self.values
    }
}

/// Compiled validation rule. The answer passes while `conditions` holds.
#[derive(Debug, Clone, PartialEq)]
pub struct Validation {
    conditions: ConditionGroup,
    message: String,
    report_only: bool,
}

impl Validation {
    pub fn conditions(&self) -> &ConditionGroup {
        &self.conditions
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn report_only(&self) -> bool {
        self.report_only
    }
}

/// One answerable field of a service request form.
///
/// Only `value` and `malformed` change after construction. Every other
/// property is derived from the current answers on each call; the
/// [`ValueSource`] argument is normally the owning
/// [`ServiceForm`](crate::ServiceForm).
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    id: QuestionId,
    code: String,
    description: String,
    required: bool,
    kind: QuestionType,
    value: Option<AnswerValue>,
    malformed: bool,
    values: Option<Vec<ValueOption>>,
    conditional_values: Vec<ConditionalValues>,
    dependencies: Option<ConditionGroup>,
    validations: Vec<Validation>,
}

impl Question {
    pub(crate) fn build(
        id: QuestionId,
        spec: &AttributeSpec,
        index: &BTreeMap<String, QuestionId>,
    ) -> Result<Self, RuleError> {
        let ctx = LookupContext::new(index, id);

        let dependencies = spec
            .dependencies
            .as_ref()
            .map(|group| ConditionGroup::build(group, &ctx))
            .transpose()?;

        let conditional_values = spec
            .conditional_values
            .iter()
            .map(|block| {
                Ok(ConditionalValues {
                    conditions: ConditionGroup::build(&block.dependent_conditions, &ctx)?,
                    values: block.values.clone(),
                })
            })
            .collect::<Result<Vec<_>, RuleError>>()?;

        let own = ctx.with_self();
        let validations = spec
            .validations
            .iter()
            .map(|validation| {
                Ok(Validation {
                    conditions: ConditionGroup::build(&validation.dependent_conditions, &own)?,
                    message: validation.message.clone(),
                    report_only: validation.report_only,
                })
            })
            .collect::<Result<Vec<_>, RuleError>>()?;

        Ok(Self {
            id,
            code: spec.code.clone(),
            description: spec.description.clone(),
            required: spec.required,
            kind: spec.kind,
            value: Self::initial_value(spec.kind),
            malformed: false,
            values: spec.values.clone(),
            conditional_values,
            dependencies,
            validations,
        })
    }

    /// Starting answer for a question type.
    pub fn initial_value(kind: QuestionType) -> Option<AnswerValue> {
        match kind {
            QuestionType::SingleValueList => None,
            QuestionType::MultiValueList => Some(AnswerValue::List(Vec::new())),
            _ => Some(AnswerValue::Text(String::new())),
        }
    }

    pub fn id(&self) -> QuestionId {
        self.id
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn required(&self) -> bool {
        self.required
    }

    pub fn kind(&self) -> QuestionType {
        self.kind
    }

    pub fn value(&self) -> Option<&AnswerValue> {
        self.value.as_ref()
    }

    pub fn set_value(&mut self, value: Option<AnswerValue>) {
        self.value = value;
    }

    pub fn malformed(&self) -> bool {
        self.malformed
    }

    pub fn set_malformed(&mut self, malformed: bool) {
        self.malformed = malformed;
    }

    pub fn static_values(&self) -> Option<&[ValueOption]> {
        self.values.as_deref()
    }

    pub fn conditional_values(&self) -> &[ConditionalValues] {
        &self.conditional_values
    }

    pub fn dependencies(&self) -> Option<&ConditionGroup> {
        self.dependencies.as_ref()
    }

    pub fn validations(&self) -> &[Validation] {
        &self.validations
    }

    pub fn visible(&self, answers: &dyn ValueSource) -> bool {
        self.dependencies
            .as_ref()
            .is_none_or(|group| group.holds(answers))
    }

    /// Static options followed by every conditional block whose guard holds.
    /// `None` for questions without a static option list.
    pub fn value_options(&self, answers: &dyn ValueSource) -> Option<Vec<ValueOption>> {
        let values = self.values.as_ref()?;
        let mut options = values.clone();
        for block in &self.conditional_values {
            if block.conditions.holds(answers) {
                options.extend(block.values.iter().cloned());
            }
        }
        Some(options)
    }

    /// The answer as the rest of the form sees it: nothing while hidden, and
    /// restricted to the currently offered options for list questions.
    pub fn safe_value(&self, answers: &dyn ValueSource) -> Option<AnswerValue> {
        if !self.visible(answers) {
            return None;
        }
        let value = self.value.as_ref()?;
        let Some(options) = self.value_options(answers) else {
            return Some(value.clone());
        };
        let offered = |key: &str| options.iter().any(|option| option.key == key);
        match value {
            AnswerValue::List(items) => Some(AnswerValue::List(
                items
                    .iter()
                    .filter(|item| offered(item.as_str()))
                    .cloned()
                    .collect(),
            )),
            AnswerValue::Text(text) => offered(text.as_str()).then(|| value.clone()),
        }
    }

    pub fn has_safe_value(&self, answers: &dyn ValueSource) -> bool {
        self.safe_value(answers)
            .is_some_and(|value| value.is_present())
    }

    /// Validations whose conditions no longer hold. Empty until there is an
    /// answer to validate.
    pub fn failing_validations(&self, answers: &dyn ValueSource) -> Vec<&Validation> {
        if !self.has_safe_value(answers) {
            return Vec::new();
        }
        self.validations
            .iter()
            .filter(|validation| !validation.conditions.holds(answers))
            .collect()
    }

    pub fn validation_error_messages(&self, answers: &dyn ValueSource) -> Vec<String> {
        self.failing_messages(answers, false)
    }

    pub fn validation_info_messages(&self, answers: &dyn ValueSource) -> Vec<String> {
        self.failing_messages(answers, true)
    }

    fn failing_messages(&self, answers: &dyn ValueSource, report_only: bool) -> Vec<String> {
        self.failing_validations(answers)
            .into_iter()
            .filter(|validation| validation.report_only == report_only)
            .map(|validation| validation.message.clone())
            .collect()
    }

    /// Whether this answer is complete. Does not look at `required`; the form
    /// gate decides when this matters.
    pub fn requirements_met(&self, answers: &dyn ValueSource) -> bool {
        if self.malformed {
            return false;
        }
        if self
            .failing_validations(answers)
            .iter()
            .any(|validation| !validation.report_only)
        {
            return false;
        }
        self.has_safe_value(answers)
    }

    /// Questions whose safe values this question's own safe value depends on.
    pub(crate) fn safe_value_references(&self) -> Vec<QuestionId> {
        let mut ids: Vec<QuestionId> = self
            .dependencies
            .iter()
            .flat_map(|group| group.references())
            .collect();
        for block in &self.conditional_values {
            ids.extend(block.conditions.references());
        }
        ids.sort();
        ids.dedup();
        ids
    }
}
