use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("{0}")]
    Configuration(String),

    #[error("app_id is empty")]
    Resolution,

    #[error("{} is not found", .0.display())]
    SourceNotFound(PathBuf),

    #[error("no columns to parse from csv")]
    NoColumns,

    #[error("failed to read csv: {0}")]
    DataSource(#[from] csv::Error),

    #[error("failed to serialize event: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("failed to run `{command}`: {source}")]
    Command {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("import command failed with {}", describe_code(.code))]
    ImportFailed { code: Option<i32> },
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

impl ImportError {
    /// Process exit code for this error.
    ///
    /// Everything is a precondition failure (1) except a failed import,
    /// which hands back the importer's own non-zero code.
    pub fn exit_code(&self) -> i32 {
        match self {
            ImportError::ImportFailed { code: Some(code) } if *code != 0 => *code,
            _ => 1,
        }
    }
}
