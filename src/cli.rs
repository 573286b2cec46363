use std::{env, path::PathBuf};

use chrono::Local;

use calendar_clone::storage::{seed_sample_events, EventStore, StoreError};

pub const USAGE: &str = "Usage: calendar-clone [--config PATH] [--port N] [--seed]";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CliMode {
    Serve,
    Seed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CliOptions {
    pub mode: CliMode,
    pub config_path: Option<PathBuf>,
    pub port: Option<u16>,
}

pub fn parse_cli_options() -> Result<CliOptions, String> {
    parse_args(env::args().skip(1))
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<CliOptions, String> {
    let mut options = CliOptions {
        mode: CliMode::Serve,
        config_path: None,
        port: None,
    };

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--seed" => {
                options.mode = CliMode::Seed;
            }
            "--config" => {
                let path = args
                    .next()
                    .ok_or_else(|| "--config needs a path".to_string())?;
                options.config_path = Some(PathBuf::from(path));
            }
            "--port" => {
                let value = args
                    .next()
                    .ok_or_else(|| "--port needs a number".to_string())?;
                let port = value
                    .parse::<u16>()
                    .map_err(|_| format!("Invalid port '{}'", value))?;
                options.port = Some(port);
            }
            "--help" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            _ => return Err(format!("Unknown argument: {}", arg)),
        }
    }

    Ok(options)
}

pub fn run_seed_mode(store: &EventStore) -> Result<(), StoreError> {
    let report = seed_sample_events(store, Local::now().naive_local())?;
    println!(
        "Seeded {} events ({} already present).",
        report.inserted, report.skipped
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<CliOptions, String> {
        parse_args(args.iter().map(|a| a.to_string()))
    }

    #[test]
    fn no_arguments_serves() {
        let options = parse(&[]).unwrap();
        assert_eq!(options.mode, CliMode::Serve);
        assert!(options.config_path.is_none());
    }

    #[test]
    fn parses_all_flags() {
        let options = parse(&["--config", "/tmp/c.toml", "--port", "9000", "--seed"]).unwrap();

        assert_eq!(options.mode, CliMode::Seed);
        assert_eq!(options.config_path, Some(PathBuf::from("/tmp/c.toml")));
        assert_eq!(options.port, Some(9000));
    }

    #[test]
    fn rejects_bad_port() {
        assert!(parse(&["--port", "http"]).is_err());
        assert!(parse(&["--port"]).is_err());
    }

    #[test]
    fn rejects_unknown_argument() {
        assert_eq!(parse(&["--agenda"]), Err("Unknown argument: --agenda".to_string()));
    }
}
