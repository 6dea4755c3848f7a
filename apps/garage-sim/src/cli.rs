//! Command line parsing for the `garage-sim` binary.

use std::path::PathBuf;
use thiserror::Error;

pub const USAGE: &str = "\
Parking Garage Simulator

Usage: garage-sim [OPTIONS] PLATE...

Admits each PLATE at the entry station, then releases the vehicles in
the same order through the exit station.

Options:
  -c, --config <PATH>  Config file (default: platform config dir/garage.toml)
      --json           Print a JSON summary instead of tickets and receipts
  -h, --help           Show this help message

Environment:
  GARAGE_NAME, GARAGE_ADDRESS, GARAGE_TOTAL_SPACES,
  GARAGE_FEE_POLICY, GARAGE_TOTALS_PATH   override config values
  RUST_LOG                                log filter (default: info,garage=debug)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(CliArgs),
    Help,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub config: Option<PathBuf>,
    pub json: bool,
    pub plates: Vec<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CliError {
    #[error("{0} requires a value")]
    MissingValue(String),

    #[error("unknown option: {0}")]
    UnknownOption(String),

    #[error("at least one license plate is required")]
    NoPlates,
}

/// Parses arguments, excluding the program name.
pub fn parse_args<I>(args: I) -> Result<Command, CliError>
where
    I: IntoIterator<Item = String>,
{
    let mut parsed = CliArgs::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                let path = args
                    .next()
                    .ok_or_else(|| CliError::MissingValue(arg.clone()))?;
                parsed.config = Some(PathBuf::from(path));
            }
            "--json" => parsed.json = true,
            "--help" | "-h" => return Ok(Command::Help),
            "--" => parsed.plates.extend(args.by_ref()),
            flag if flag.starts_with('-') && flag.len() > 1 => {
                return Err(CliError::UnknownOption(flag.to_string()));
            }
            _ => parsed.plates.push(arg),
        }
    }

    if parsed.plates.is_empty() {
        return Err(CliError::NoPlates);
    }

    Ok(Command::Run(parsed))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Command, CliError> {
        parse_args(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_plates_and_flags() {
        let command = parse(&["--json", "-c", "lot.toml", "ABC123", "XYZ9"]).unwrap();

        assert_eq!(
            command,
            Command::Run(CliArgs {
                config: Some(PathBuf::from("lot.toml")),
                json: true,
                plates: vec!["ABC123".to_string(), "XYZ9".to_string()],
            })
        );
    }

    #[test]
    fn test_help_wins() {
        assert_eq!(parse(&["ABC123", "--help"]).unwrap(), Command::Help);
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            parse(&["--config"]).unwrap_err(),
            CliError::MissingValue("--config".to_string())
        );
        assert_eq!(
            parse(&["--verbose", "ABC"]).unwrap_err(),
            CliError::UnknownOption("--verbose".to_string())
        );
        assert_eq!(parse(&["--json"]).unwrap_err(), CliError::NoPlates);
    }

    #[test]
    fn test_plates_after_separator() {
        let command = parse(&["--", "-DASH1"]).unwrap();

        assert_eq!(
            command,
            Command::Run(CliArgs {
                plates: vec!["-DASH1".to_string()],
                ..CliArgs::default()
            })
        );
    }
}
