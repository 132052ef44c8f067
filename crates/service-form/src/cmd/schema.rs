use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use service_rules::definition_schema;

#[derive(Args, Debug, Clone)]
pub struct SchemaArgs {
    /// Write the schema to a file instead of stdout
    #[arg(long = "out", value_name = "schema.json")]
    pub out: Option<PathBuf>,
}

pub fn run(args: SchemaArgs) -> Result<()> {
    let payload = serde_json::to_string_pretty(&definition_schema())?;
    match &args.out {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create schema parent {}", parent.display())
                })?;
            }
            fs::write(path, payload)
                .with_context(|| format!("failed to write schema {}", path.display()))?;
        }
        None => println!("{payload}"),
    }
    Ok(())
}
