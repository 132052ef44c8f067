use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing::Level;

use crate::cmd::{self, check::CheckArgs, schema::SchemaArgs, submission::SubmissionArgs};

#[derive(Parser, Debug)]
#[command(
    name = "service-form",
    about = "Check service request answers against their service definition",
    version,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Report visibility, options and validation state for a set of answers
    Check(CheckArgs),
    /// Print the attributes that would be submitted with the case
    Submission(SubmissionArgs),
    /// Print the JSON Schema for service definitions
    Schema(SchemaArgs),
}

pub fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Commands::Check(args) => cmd::check::run(args),
        Commands::Submission(args) => cmd::submission::run(args),
        Commands::Schema(args) => cmd::schema::run(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_check_subcommand() {
        let cli = Cli::try_parse_from([
            "service-form",
            "-vv",
            "check",
            "--definition",
            "pothole.json",
            "--answers",
            "answers.json",
            "--strict",
        ])
        .expect("expected CLI to parse");
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Check(args) => {
                assert_eq!(args.definition, std::path::PathBuf::from("pothole.json"));
                assert_eq!(
                    args.answers.as_deref(),
                    Some(std::path::Path::new("answers.json"))
                );
                assert!(args.strict);
                assert!(!args.json);
                assert!(!args.lenient);
            }
            _ => panic!("expected check args"),
        }
    }

    #[test]
    fn submission_requires_answers() {
        let err = Cli::try_parse_from([
            "service-form",
            "submission",
            "--definition",
            "pothole.json",
        ])
        .expect_err("answers are required");
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn parses_schema_out() {
        let cli = Cli::try_parse_from(["service-form", "schema", "--out", "/tmp/schema.json"])
            .expect("expected CLI to parse");
        match cli.command {
            Commands::Schema(args) => {
                assert_eq!(
                    args.out.as_deref(),
                    Some(std::path::Path::new("/tmp/schema.json"))
                );
            }
            _ => panic!("expected schema args"),
        }
    }
}
