mod runner;
mod terminal;

use std::fmt;
use std::path::PathBuf;

use services::QuizContent;
use tracing_subscriber::EnvFilter;

use crate::runner::RunOptions;

#[derive(Debug, PartialEq, Eq)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidSeed { raw: String },
    InvalidContentPath { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidSeed { raw } => write!(f, "invalid --seed value: {raw}"),
            ArgsError::InvalidContentPath { raw } => write!(f, "invalid --content value: {raw:?}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    content: Option<PathBuf>,
    seed: Option<u64>,
    bell: bool,
    help: bool,
}

impl Args {
    fn parse() -> Result<Self, ArgsError> {
        Self::parse_from(std::env::args().skip(1), |key| std::env::var(key).ok())
    }

    fn parse_from(
        mut args: impl Iterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut content = env("QUIZ_CONTENT")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);
        let mut seed = match env("QUIZ_SEED") {
            Some(raw) => Some(parse_seed(raw)?),
            None => None,
        };
        let mut bell = env("QUIZ_NO_BELL").is_none_or(|value| value.trim().is_empty());
        let mut help = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--content" => {
                    let value = require_value(&mut args, "--content")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidContentPath { raw: value });
                    }
                    content = Some(PathBuf::from(value));
                }
                "--seed" => {
                    let value = require_value(&mut args, "--seed")?;
                    seed = Some(parse_seed(value)?);
                }
                "--no-bell" => bell = false,
                "-h" | "--help" => help = true,
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            content,
            seed,
            bell,
            help,
        })
    }
}

fn parse_seed(raw: String) -> Result<u64, ArgsError> {
    raw.trim().parse().map_err(|_| ArgsError::InvalidSeed { raw })
}

const USAGE: &str = "\
Usage:
  cargo run -p app -- [options]

Options:
  --content <path>   JSON content file (default: built-in UAT sections)
  --seed <u64>       Seed for feedback phrase selection
  --no-bell          Do not ring the terminal bell on answers
  -h, --help         Show this help

Environment (same as flags):
  QUIZ_CONTENT, QUIZ_SEED, QUIZ_NO_BELL, RUST_LOG
";

/// The message printed for a bad command line: the error once, then usage.
fn args_error_report(err: &ArgsError) -> String {
    format!("{err}\n\n{USAGE}")
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    if args.help {
        eprint!("{USAGE}");
        return Ok(());
    }

    let content = match &args.content {
        Some(path) => QuizContent::load(path)?,
        None => QuizContent::reference()?,
    };
    tracing::info!(
        categories = content.catalog.categories().len(),
        seeded = args.seed.is_some(),
        "starting quiz"
    );

    runner::run(
        content,
        RunOptions {
            seed: args.seed,
            bell: args.bell,
        },
    )
    .await
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_tracing();
    let args = match Args::parse() {
        Ok(args) => args,
        Err(err) => {
            eprint!("{}", args_error_report(&err));
            std::process::exit(2);
        }
    };
    if let Err(err) = run(args).await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> impl Iterator<Item = String> {
        values
            .iter()
            .map(|v| (*v).to_owned())
            .collect::<Vec<_>>()
            .into_iter()
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_without_flags_or_env() {
        let parsed = Args::parse_from(args(&[]), no_env).unwrap();
        assert_eq!(
            parsed,
            Args {
                content: None,
                seed: None,
                bell: true,
                help: false,
            }
        );
    }

    #[test]
    fn flags_override_env() {
        let env = |key: &str| match key {
            "QUIZ_CONTENT" => Some("env.json".to_owned()),
            "QUIZ_SEED" => Some("1".to_owned()),
            _ => None,
        };
        let parsed = Args::parse_from(
            args(&["--content", "cli.json", "--seed", "9", "--no-bell"]),
            env,
        )
        .unwrap();
        assert_eq!(parsed.content, Some(PathBuf::from("cli.json")));
        assert_eq!(parsed.seed, Some(9));
        assert!(!parsed.bell);
    }

    #[test]
    fn env_supplies_values() {
        let env = |key: &str| match key {
            "QUIZ_CONTENT" => Some("env.json".to_owned()),
            "QUIZ_NO_BELL" => Some("1".to_owned()),
            _ => None,
        };
        let parsed = Args::parse_from(args(&[]), env).unwrap();
        assert_eq!(parsed.content, Some(PathBuf::from("env.json")));
        assert!(!parsed.bell);
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(
            Args::parse_from(args(&["--seed"]), no_env),
            Err(ArgsError::MissingValue { flag: "--seed" })
        );
        assert_eq!(
            Args::parse_from(args(&["--seed", "abc"]), no_env),
            Err(ArgsError::InvalidSeed { raw: "abc".into() })
        );
        assert_eq!(
            Args::parse_from(args(&["--verbose"]), no_env),
            Err(ArgsError::UnknownArg("--verbose".into()))
        );
        assert_eq!(
            Args::parse_from(args(&["--content", " "]), no_env),
            Err(ArgsError::InvalidContentPath { raw: " ".into() })
        );
    }

    #[test]
    fn args_error_is_reported_once() {
        let err = Args::parse_from(args(&["--verbose"]), no_env).unwrap_err();
        let report = args_error_report(&err);
        assert!(report.starts_with("unknown argument: --verbose\n"));
        assert_eq!(report.matches("unknown argument").count(), 1);
        assert!(report.contains("Usage:"));
    }

    #[test]
    fn help_flag_is_recorded() {
        assert!(Args::parse_from(args(&["-h"]), no_env).unwrap().help);
    }
}
