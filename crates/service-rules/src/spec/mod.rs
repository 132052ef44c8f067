pub mod condition;
pub mod definition;

pub use condition::{
    Clause, ConditionGroupSpec, ConditionSpec, LiteralType, Operator, TaggedLiteral,
};
pub use definition::{
    AttributeSpec, ConditionalValuesSpec, QuestionType, ServiceDefinition, ValidationSpec,
    ValueOption,
};
