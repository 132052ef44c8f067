use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Args;
use service_rules::{AnswerMode, AnswerValue, FormReport, QuestionStatus};

use crate::cmd::load::build_form;

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Service definition (.json or .toml)
    #[arg(long, value_name = "definition.json")]
    pub definition: PathBuf,
    /// Answers keyed by question code
    #[arg(long, value_name = "answers.json")]
    pub answers: Option<PathBuf>,
    /// Print the full report as JSON
    #[arg(long = "json", default_value_t = false)]
    pub json: bool,
    /// Exit with an error when the form may not proceed
    #[arg(long = "strict", default_value_t = false)]
    pub strict: bool,
    /// Skip unknown question codes and unsupported answers instead of failing
    #[arg(long = "lenient", default_value_t = false)]
    pub lenient: bool,
}

pub fn answer_mode(lenient: bool) -> AnswerMode {
    if lenient {
        AnswerMode::Lenient
    } else {
        AnswerMode::Strict
    }
}

pub fn run(args: CheckArgs) -> Result<()> {
    let form = build_form(
        &args.definition,
        args.answers.as_deref(),
        answer_mode(args.lenient),
    )?;
    let report = form.report();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_text(&report, form.service_name()));
    }

    if args.strict && !report.questions_ok {
        bail!(
            "{} question(s) block progression: {}",
            report.blocking.len(),
            report.blocking.join(", ")
        );
    }
    Ok(())
}

/// Plain-text rendering of a report, one line per question.
pub fn render_text(report: &FormReport, service_name: &str) -> String {
    let mut out = String::new();
    let title = if service_name.is_empty() {
        report.service_code.clone()
    } else {
        format!("{} [{}]", service_name, report.service_code)
    };
    let _ = writeln!(out, "{}: {}", title, report.status.as_str());

    for question in &report.questions {
        let mut line = format!("  {:<9} {}", marker(question), question.code);
        if question.required {
            line.push_str(" (required)");
        }
        if question.visible
            && let Some(value) = &question.safe_value
            && value.is_present()
        {
            let _ = write!(line, " = {}", display_value(value));
        }
        let _ = writeln!(out, "{}", line);
        for error in &question.errors {
            let _ = writeln!(out, "            error: {}", error);
        }
        for info in &question.infos {
            let _ = writeln!(out, "            note: {}", info);
        }
    }
    out
}

fn marker(question: &QuestionStatus) -> &'static str {
    if !question.visible {
        "hidden"
    } else if question.malformed {
        "malformed"
    } else if !question.errors.is_empty() {
        "invalid"
    } else if question.required && !question.requirements_met {
        "missing"
    } else if question.requirements_met {
        "ok"
    } else {
        "empty"
    }
}

fn display_value(value: &AnswerValue) -> String {
    match value {
        AnswerValue::Text(text) => format!("{:?}", text),
        AnswerValue::List(items) => format!("[{}]", items.join(", ")),
    }
}
