use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;
use service_rules::{AnswerMode, ServiceDefinition, ServiceForm};
use tracing::debug;

/// Reads a service definition. `.toml` files are TOML, everything else JSON.
pub fn load_definition(path: &Path) -> Result<ServiceDefinition> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read service definition {}", path.display()))?;
    let is_toml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    let definition: ServiceDefinition = if is_toml {
        toml::from_str(&raw)
            .with_context(|| format!("failed to parse TOML definition {}", path.display()))?
    } else {
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse JSON definition {}", path.display()))?
    };
    Ok(definition)
}

pub fn load_answers(path: &Path) -> Result<Value> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read answers {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse answers {}", path.display()))
}

/// Compiles the definition and applies answers when given.
pub fn build_form(
    definition_path: &Path,
    answers_path: Option<&Path>,
    mode: AnswerMode,
) -> Result<ServiceForm> {
    let definition = load_definition(definition_path)?;
    let mut form = ServiceForm::from_definition(&definition)
        .with_context(|| format!("service definition '{}' is invalid", definition.code))?;

    if let Some(path) = answers_path {
        let answers = load_answers(path)?;
        let applied = form
            .apply_answers(&answers, mode)
            .with_context(|| format!("failed to apply answers from {}", path.display()))?;
        debug!(applied, path = %path.display(), "applied answers");
    }
    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_and_json_definitions_agree() {
        let dir = tempfile::tempdir().unwrap();
        let toml_path = dir.path().join("service.toml");
        let json_path = dir.path().join("service.json");
        fs::write(
            &toml_path,
            r#"
code = "PARKING"
name = "Illegal parking"

[[attributes]]
code = "PLATE"
type = "STRING"
required = true

[[attributes]]
code = "HOURS"
type = "NUMBER"

[attributes.dependencies]
clause = "AND"

[[attributes.dependencies.conditions]]
attribute = "PLATE"
op = "neq"
value = { type = "STRING", string = "" }
"#,
        )
        .unwrap();
        fs::write(
            &json_path,
            r#"{
  "code": "PARKING",
  "name": "Illegal parking",
  "attributes": [
    { "code": "PLATE", "type": "STRING", "required": true },
    {
      "code": "HOURS",
      "type": "NUMBER",
      "dependencies": {
        "clause": "AND",
        "conditions": [
          { "attribute": "PLATE", "op": "neq", "value": { "type": "STRING", "string": "" } }
        ]
      }
    }
  ]
}"#,
        )
        .unwrap();

        let from_toml = load_definition(&toml_path).unwrap();
        let from_json = load_definition(&json_path).unwrap();
        assert_eq!(from_toml, from_json);
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = load_definition(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }
}
