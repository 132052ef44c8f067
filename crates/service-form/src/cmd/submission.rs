use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Args;

use crate::cmd::check::answer_mode;
use crate::cmd::load::build_form;

#[derive(Args, Debug, Clone)]
pub struct SubmissionArgs {
    /// Service definition (.json or .toml)
    #[arg(long, value_name = "definition.json")]
    pub definition: PathBuf,
    /// Answers keyed by question code
    #[arg(long, value_name = "answers.json")]
    pub answers: PathBuf,
    /// Skip unknown question codes and unsupported answers instead of failing
    #[arg(long = "lenient", default_value_t = false)]
    pub lenient: bool,
}

pub fn run(args: SubmissionArgs) -> Result<()> {
    let form = build_form(
        &args.definition,
        Some(args.answers.as_path()),
        answer_mode(args.lenient),
    )?;
    let report = form.report();
    if !report.questions_ok {
        bail!(
            "cannot submit {}: {} question(s) block progression: {}",
            report.service_code,
            report.blocking.len(),
            report.blocking.join(", ")
        );
    }

    let attributes = form.submission_attributes();
    println!("{}", serde_json::to_string_pretty(&attributes)?);
    Ok(())
}
