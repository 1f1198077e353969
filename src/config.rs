use crate::ImportError;
use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_PIO_CMD: &str = "/opt/predictionio/bin/pio";
pub const DEFAULT_ENTITY_TYPE: &str = "data";

/// Command line of the importer.
///
/// `--access-key` and `--csv-name` are validated by `into_config` rather than
/// clap so a missing value is logged and exits with status 1.
#[derive(Parser, Debug, Clone)]
#[command(version, about = "Import a CSV file into a PredictionIO event store")]
pub struct Args {
    /// Access key of the target application
    #[arg(long)]
    pub access_key: Option<String>,

    /// pio command, optionally with leading arguments
    #[arg(long, default_value = DEFAULT_PIO_CMD)]
    pub pio_cmd: String,

    /// Base name of the CSV file, without extension
    #[arg(long)]
    pub csv_name: Option<String>,

    /// Directory containing <csv-name>.csv
    #[arg(long, default_value = ".")]
    pub input_dir: PathBuf,

    /// Directory receiving the intermediate <csv-name>.ndjson
    #[arg(long, default_value = "/tmp")]
    pub output_dir: PathBuf,

    /// Event name, defaults to the CSV name
    #[arg(long)]
    pub event_name: Option<String>,

    /// Entity type written on every event
    #[arg(long, default_value = DEFAULT_ENTITY_TYPE)]
    pub entity_type: String,

    /// Log level, overrides RUST_LOG
    #[arg(long, value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: Option<String>,
}

/// Validated settings for one import run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub access_key: String,
    pub pio_cmd: String,
    pub csv_name: String,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub event_name: String,
    pub entity_type: String,
}

impl Args {
    pub fn into_config(self) -> Result<Config, ImportError> {
        let access_key = non_blank(self.access_key)
            .ok_or_else(|| ImportError::Configuration("No access key.".to_string()))?;
        let csv_name = non_blank(self.csv_name)
            .ok_or_else(|| ImportError::Configuration("No csv name.".to_string()))?;
        let event_name = non_blank(self.event_name).unwrap_or_else(|| csv_name.clone());

        Ok(Config {
            access_key,
            pio_cmd: self.pio_cmd,
            csv_name,
            input_dir: self.input_dir,
            output_dir: self.output_dir,
            event_name,
            entity_type: self.entity_type,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl Config {
    pub fn csv_path(&self) -> PathBuf {
        self.input_dir.join(format!("{}.csv", self.csv_name))
    }

    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.ndjson", self.csv_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("pio_csv_import").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = parse(&["--access-key", "KEY", "--csv-name", "sample"])
            .into_config()
            .unwrap();

        assert_eq!(config.pio_cmd, DEFAULT_PIO_CMD);
        assert_eq!(config.event_name, "sample");
        assert_eq!(config.entity_type, "data");
        assert_eq!(config.csv_path(), PathBuf::from("./sample.csv"));
        assert_eq!(config.output_path(), PathBuf::from("/tmp/sample.ndjson"));
    }

    #[test]
    fn test_paths_follow_directories() {
        let config = parse(&[
            "--access-key",
            "KEY",
            "--csv-name",
            "ratings",
            "--input-dir",
            "/data/in",
            "--output-dir",
            "/data/out",
            "--event-name",
            "rate",
        ])
        .into_config()
        .unwrap();

        assert_eq!(config.csv_path(), PathBuf::from("/data/in/ratings.csv"));
        assert_eq!(config.output_path(), PathBuf::from("/data/out/ratings.ndjson"));
        assert_eq!(config.event_name, "rate");
    }

    #[test]
    fn test_missing_access_key() {
        let err = parse(&["--csv-name", "sample"]).into_config().unwrap_err();
        assert!(matches!(err, ImportError::Configuration(_)));
        assert_eq!(err.to_string(), "No access key.");
    }

    #[test]
    fn test_blank_access_key() {
        let err = parse(&["--access-key", "  ", "--csv-name", "sample"])
            .into_config()
            .unwrap_err();
        assert!(matches!(err, ImportError::Configuration(_)));
    }

    #[test]
    fn test_missing_csv_name() {
        let err = parse(&["--access-key", "KEY"]).into_config().unwrap_err();
        assert_eq!(err.to_string(), "No csv name.");
    }

    #[test]
    fn test_invalid_log_level_rejected_by_clap() {
        let result = Args::try_parse_from(["pio_csv_import", "--log-level", "loud"]);
        assert!(result.is_err());
    }
}
