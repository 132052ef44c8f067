use std::cmp::Ordering;

use crate::error::RuleError;
use crate::lookup::{LookupContext, QuestionId, ValueSource};
use crate::spec::{Clause, ConditionGroupSpec, ConditionSpec, Operator};
use crate::value::{AnswerValue, Literal, parse_number};

/// Compiled comparison between a question's safe value and a literal.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    question: QuestionId,
    operator: Operator,
    value: Literal,
}

impl Condition {
    pub fn new(question: QuestionId, operator: Operator, value: Literal) -> Self {
        Self {
            question,
            operator,
            value,
        }
    }

    pub fn build(spec: &ConditionSpec, ctx: &LookupContext<'_>) -> Result<Self, RuleError> {
        let question = ctx.resolve(&spec.attribute)?;
        let value = Literal::try_from(&spec.value)?;
        Ok(Self::new(question, spec.op, value))
    }

    pub fn question(&self) -> QuestionId {
        self.question
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn value(&self) -> &Literal {
        &self.value
    }

    /// Evaluates the condition. Type mismatches and missing answers never
    /// error; they simply do not hold.
    pub fn holds(&self, answers: &dyn ValueSource) -> bool {
        let current = answers.safe_value(self.question);
        let current = current.as_ref();
        match self.operator {
            Operator::Eq => equals(current, &self.value),
            Operator::Neq => !equals(current, &self.value),
            Operator::In => contains(current, &self.value),
            Operator::Gt => compare(current, &self.value, |o| o == Ordering::Greater),
            Operator::Gte => compare(current, &self.value, |o| o != Ordering::Less),
            Operator::Lt => compare(current, &self.value, |o| o == Ordering::Less),
            Operator::Lte => compare(current, &self.value, |o| o != Ordering::Greater),
        }
    }
}

fn equals(current: Option<&AnswerValue>, literal: &Literal) -> bool {
    match (current, literal) {
        (Some(AnswerValue::Text(text)), Literal::Text(expected)) => text == expected,
        (Some(AnswerValue::Text(text)), Literal::Number(expected)) => {
            parse_number(text).is_some_and(|number| number == *expected)
        }
        (Some(AnswerValue::List(items)), Literal::List(expected)) => same_members(items, expected),
        _ => false,
    }
}

fn same_members(left: &[String], right: &[String]) -> bool {
    if left.len() != right.len() {
        return false;
    }
    let mut left = left.to_vec();
    let mut right = right.to_vec();
    left.sort();
    right.sort();
    left == right
}

fn contains(current: Option<&AnswerValue>, literal: &Literal) -> bool {
    match (current, literal) {
        (Some(AnswerValue::List(items)), Literal::Text(needle)) => items.contains(needle),
        _ => false,
    }
}

fn compare<F>(current: Option<&AnswerValue>, literal: &Literal, predicate: F) -> bool
where
    F: Fn(Ordering) -> bool,
{
    let (Some(AnswerValue::Text(text)), Literal::Number(bound)) = (current, literal) else {
        return false;
    };
    parse_number(text)
        .and_then(|number| number.partial_cmp(bound))
        .is_some_and(predicate)
}

/// Ordered conditions combined with AND or OR.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionGroup {
    clause: Clause,
    conditions: Vec<Condition>,
}

impl ConditionGroup {
    pub fn new(clause: Clause, conditions: Vec<Condition>) -> Self {
        Self { clause, conditions }
    }

    pub fn build(spec: &ConditionGroupSpec, ctx: &LookupContext<'_>) -> Result<Self, RuleError> {
        let conditions = spec
            .conditions
            .iter()
            .map(|condition| Condition::build(condition, ctx))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(spec.clause, conditions))
    }

    pub fn clause(&self) -> Clause {
        self.clause
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// AND holds when every condition holds (vacuously for none); OR needs at
    /// least one.
    pub fn holds(&self, answers: &dyn ValueSource) -> bool {
        match self.clause {
            Clause::And => self
                .conditions
                .iter()
                .all(|condition| condition.holds(answers)),
            Clause::Or => self
                .conditions
                .iter()
                .any(|condition| condition.holds(answers)),
        }
    }

    pub(crate) fn references(&self) -> impl Iterator<Item = QuestionId> + '_ {
        self.conditions.iter().map(Condition::question)
    }
}
