use std::cell::RefCell;
use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::error::{FormError, RuleError};
use crate::lookup::{QuestionId, ValueSource};
use crate::question::Question;
use crate::spec::{AttributeSpec, ServiceDefinition, ValueOption};
use crate::value::AnswerValue;

/// Questions compiled from one service definition, plus the answers given so far.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceForm {
    service_code: String,
    service_name: String,
    questions: Vec<Question>,
    index: BTreeMap<String, QuestionId>,
}

impl ServiceForm {
    pub fn from_definition(definition: &ServiceDefinition) -> Result<Self, RuleError> {
        Self::build(&definition.code, &definition.name, &definition.attributes)
    }

    pub fn from_attributes(attributes: &[AttributeSpec]) -> Result<Self, RuleError> {
        Self::build("", "", attributes)
    }

    fn build(code: &str, name: &str, attributes: &[AttributeSpec]) -> Result<Self, RuleError> {
        let mut index = BTreeMap::new();
        for (position, attribute) in attributes.iter().enumerate() {
            if index
                .insert(attribute.code.clone(), QuestionId(position))
                .is_some()
            {
                return Err(RuleError::DuplicateCode {
                    code: attribute.code.clone(),
                });
            }
        }

        let questions = attributes
            .iter()
            .enumerate()
            .map(|(position, attribute)| {
                Question::build(QuestionId(position), attribute, &index)
                    .map_err(|err| RuleError::in_attribute(&attribute.code, err))
            })
            .collect::<Result<Vec<_>, _>>()?;

        detect_cycles(&questions)?;

        debug!(
            service = code,
            questions = questions.len(),
            "compiled service form"
        );

        Ok(Self {
            service_code: code.to_string(),
            service_name: name.to_string(),
            questions,
            index,
        })
    }

    pub fn service_code(&self) -> &str {
        &self.service_code
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn id_of(&self, code: &str) -> Option<QuestionId> {
        self.index.get(code).copied()
    }

    /// Questions in definition order.
    pub fn questions(&self) -> impl Iterator<Item = QuestionRef<'_>> {
        self.questions.iter().map(move |question| QuestionRef {
            form: self,
            question,
        })
    }

    pub fn question(&self, code: &str) -> Option<QuestionRef<'_>> {
        let id = self.id_of(code)?;
        Some(QuestionRef {
            form: self,
            question: &self.questions[id.0],
        })
    }

    pub fn question_mut(&mut self, code: &str) -> Option<&mut Question> {
        let id = self.id_of(code)?;
        self.questions.get_mut(id.0)
    }

    pub fn set_value(&mut self, code: &str, value: Option<AnswerValue>) -> Result<(), FormError> {
        trace!(question = code, ?value, "answer updated");
        self.question_mut(code)
            .ok_or_else(|| unknown(code))?
            .set_value(value);
        Ok(())
    }

    pub fn set_malformed(&mut self, code: &str, malformed: bool) -> Result<(), FormError> {
        trace!(question = code, malformed, "malformed flag updated");
        self.question_mut(code)
            .ok_or_else(|| unknown(code))?
            .set_malformed(malformed);
        Ok(())
    }

    /// Memoized view of the current answers for one read pass.
    pub fn safe_values(&self) -> SafeValues<'_> {
        SafeValues::new(self)
    }

    /// The wizard gate: every question is optional, hidden, or complete.
    pub fn questions_ok(&self) -> bool {
        let answers = self.safe_values();
        self.questions.iter().all(|question| {
            !question.required()
                || !question.visible(&answers)
                || question.requirements_met(&answers)
        })
    }
}

impl ValueSource for ServiceForm {
    fn safe_value(&self, question: QuestionId) -> Option<AnswerValue> {
        self.safe_values().safe_value(question)
    }
}

/// Safe values of a form, each computed at most once. The shared borrow of
/// the form keeps answers fixed while the cache is alive.
#[derive(Debug)]
pub struct SafeValues<'a> {
    form: &'a ServiceForm,
    cache: RefCell<Vec<Option<Option<AnswerValue>>>>,
}

impl<'a> SafeValues<'a> {
    pub fn new(form: &'a ServiceForm) -> Self {
        Self {
            form,
            cache: RefCell::new(vec![None; form.questions.len()]),
        }
    }
}

impl ValueSource for SafeValues<'_> {
    fn safe_value(&self, question: QuestionId) -> Option<AnswerValue> {
        let cached = self.cache.borrow().get(question.0).cloned().flatten();
        if let Some(value) = cached {
            return value;
        }
        // Build rejects cycles, so this recursion never revisits `question`.
        let value = self.form.questions.get(question.0)?.safe_value(self);
        if let Some(slot) = self.cache.borrow_mut().get_mut(question.0) {
            *slot = Some(value.clone());
        }
        value
    }
}

fn unknown(code: &str) -> FormError {
    FormError::UnknownQuestion {
        code: code.to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    Active,
    Done,
}

/// Rejects definitions whose visibility or option guards feed back into
/// themselves; evaluating their safe values would never terminate.
fn detect_cycles(questions: &[Question]) -> Result<(), RuleError> {
    let mut marks = vec![Mark::Unvisited; questions.len()];
    let mut chain = Vec::new();
    for question in questions {
        visit(question.id(), questions, &mut marks, &mut chain)?;
    }
    Ok(())
}

fn visit(
    id: QuestionId,
    questions: &[Question],
    marks: &mut [Mark],
    chain: &mut Vec<QuestionId>,
) -> Result<(), RuleError> {
    match marks[id.0] {
        Mark::Done => return Ok(()),
        Mark::Active => {
            let start = chain.iter().position(|seen| *seen == id).unwrap_or(0);
            let mut cycle = chain[start..]
                .iter()
                .map(|seen| questions[seen.0].code().to_string())
                .collect::<Vec<_>>();
            cycle.push(questions[id.0].code().to_string());
            return Err(RuleError::DependencyCycle { chain: cycle });
        }
        Mark::Unvisited => {}
    }

    marks[id.0] = Mark::Active;
    chain.push(id);
    for next in questions[id.0].safe_value_references() {
        visit(next, questions, marks, chain)?;
    }
    chain.pop();
    marks[id.0] = Mark::Done;
    Ok(())
}

/// Read view of a question bound to its form, so derived properties need no
/// extra arguments.
#[derive(Debug, Clone, Copy)]
pub struct QuestionRef<'a> {
    form: &'a ServiceForm,
    question: &'a Question,
}

impl<'a> QuestionRef<'a> {
    pub fn question(&self) -> &'a Question {
        self.question
    }

    pub fn code(&self) -> &'a str {
        self.question.code()
    }

    pub fn required(&self) -> bool {
        self.question.required()
    }

    pub fn value(&self) -> Option<&'a AnswerValue> {
        self.question.value()
    }

    pub fn malformed(&self) -> bool {
        self.question.malformed()
    }

    pub fn visible(&self) -> bool {
        self.question.visible(&self.form.safe_values())
    }

    pub fn value_options(&self) -> Option<Vec<ValueOption>> {
        self.question.value_options(&self.form.safe_values())
    }

    pub fn safe_value(&self) -> Option<AnswerValue> {
        self.question.safe_value(&self.form.safe_values())
    }

    pub fn has_safe_value(&self) -> bool {
        self.question.has_safe_value(&self.form.safe_values())
    }

    pub fn requirements_met(&self) -> bool {
        self.question.requirements_met(&self.form.safe_values())
    }

    pub fn validation_error_messages(&self) -> Vec<String> {
        self.question.validation_error_messages(&self.form.safe_values())
    }

    pub fn validation_info_messages(&self) -> Vec<String> {
        self.question.validation_info_messages(&self.form.safe_values())
    }
}
