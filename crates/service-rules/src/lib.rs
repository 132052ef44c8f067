#![allow(missing_docs)]

pub mod answers;
pub mod condition;
pub mod error;
pub mod form;
pub mod lookup;
pub mod question;
pub mod report;
pub mod schema;
pub mod spec;
pub mod value;

pub use answers::{
    AnswerMode, SubmittedAttribute, answer_from_json, apply_answers, submission_attributes,
};
pub use condition::{Condition, ConditionGroup};
pub use error::{FormError, RuleError};
pub use form::{QuestionRef, SafeValues, ServiceForm};
pub use lookup::{LookupContext, QuestionId, ValueSource};
pub use question::{ConditionalValues, Question, Validation};
pub use report::{FormReport, FormStatus, QuestionStatus, build_report};
pub use schema::definition_schema;
pub use spec::{
    AttributeSpec, Clause, ConditionGroupSpec, ConditionSpec, ConditionalValuesSpec, LiteralType,
    Operator, QuestionType, ServiceDefinition, TaggedLiteral, ValidationSpec, ValueOption,
};
pub use value::{AnswerValue, Literal};
