use schemars::schema_for;
use serde_json::Value;

use crate::spec::ServiceDefinition;

/// JSON Schema describing a service definition document.
pub fn definition_schema() -> Value {
    schema_for!(ServiceDefinition).to_value()
}
