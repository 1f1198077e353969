use crate::application::{self, Application};
use crate::ImportError;
use log::{debug, info, warn};
use std::path::Path;
use std::process::Command;

/// Source of the registered applications.
pub trait ApplicationDirectory {
    fn list(&self) -> Result<Vec<Application>, ImportError>;
}

/// Loads an NDJSON event file into an application.
pub trait Importer {
    fn import(&self, app_id: &str, input: &Path) -> Result<(), ImportError>;
}

/// Talks to the event store through the `pio` command line.
#[derive(Debug, Clone)]
pub struct PioCli {
    program: String,
    args: Vec<String>,
}

impl PioCli {
    /// Splits `pio_cmd` on whitespace so wrappers such as
    /// `docker exec pio pio` can be passed as a single flag.
    pub fn new(pio_cmd: &str) -> Result<Self, ImportError> {
        let mut parts = pio_cmd.split_whitespace().map(str::to_string);
        let program = parts
            .next()
            .ok_or_else(|| ImportError::Configuration("pio command is empty".to_string()))?;

        Ok(Self {
            program,
            args: parts.collect(),
        })
    }

    fn command<I, S>(&self, args: I) -> Command
    where
        I: IntoIterator<Item = S>,
        S: AsRef<std::ffi::OsStr>,
    {
        let mut command = Command::new(&self.program);
        command.args(&self.args).args(args);
        command
    }

    fn describe(&self, tail: &str) -> String {
        let mut parts = vec![self.program.as_str()];
        parts.extend(self.args.iter().map(String::as_str));
        parts.push(tail);
        parts.join(" ")
    }
}

impl ApplicationDirectory for PioCli {
    fn list(&self) -> Result<Vec<Application>, ImportError> {
        let description = self.describe("app list");
        debug!("running {}", description);

        let output = self
            .command(["app", "list"])
            .output()
            .map_err(|source| ImportError::Command {
                command: description.clone(),
                source,
            })?;

        if !output.status.success() {
            warn!("{} exited with {}", description, output.status);
            return Ok(Vec::new());
        }

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push('\n');
        text.push_str(&String::from_utf8_lossy(&output.stderr));

        Ok(application::parse_listing(&text))
    }
}

impl Importer for PioCli {
    fn import(&self, app_id: &str, input: &Path) -> Result<(), ImportError> {
        let description = self.describe(&format!(
            "import --appid {} --input {}",
            app_id,
            input.display()
        ));
        info!("running {}", description);

        let status = self
            .command(["import", "--appid", app_id, "--input"])
            .arg(input)
            .status()
            .map_err(|source| ImportError::Command {
                command: description,
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(ImportError::ImportFailed {
                code: status.code(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pio_cmd_with_wrapper_args() {
        let pio = PioCli::new("docker exec pio  /opt/predictionio/bin/pio").unwrap();
        assert_eq!(pio.program, "docker");
        assert_eq!(pio.args, vec!["exec", "pio", "/opt/predictionio/bin/pio"]);
        assert_eq!(
            pio.describe("app list"),
            "docker exec pio /opt/predictionio/bin/pio app list"
        );
    }

    #[test]
    fn test_empty_pio_cmd_is_rejected() {
        assert!(matches!(
            PioCli::new("   "),
            Err(ImportError::Configuration(_))
        ));
    }

    #[test]
    fn test_missing_program_is_command_error() {
        let pio = PioCli::new("/nonexistent/bin/pio").unwrap();
        assert!(matches!(pio.list(), Err(ImportError::Command { .. })));
        assert!(matches!(
            pio.import("1", Path::new("/tmp/x.ndjson")),
            Err(ImportError::Command { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_list_parses_stdout() {
        // `sh -c <script> app list` runs the script with "app" as $0
        let pio = PioCli {
            program: "sh".to_string(),
            args: vec![
                "-c".to_string(),
                "echo '[INFO] [App$] MyApp | 7 | KEY7 | (all)'".to_string(),
            ],
        };
        let apps = pio.list().unwrap();
        assert_eq!(apps, vec![Application::new("7", "KEY7")]);
    }

    #[cfg(unix)]
    #[test]
    fn test_list_failure_yields_empty_listing() {
        let pio = PioCli {
            program: "sh".to_string(),
            args: vec!["-c".to_string(), "echo '0|a|K|'; exit 2".to_string()],
        };
        assert!(pio.list().unwrap().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_import_failure_carries_exit_code() {
        let pio = PioCli {
            program: "sh".to_string(),
            args: vec!["-c".to_string(), "exit 4".to_string()],
        };
        let result = pio.import("1", Path::new("/tmp/x.ndjson"));
        assert!(matches!(
            result,
            Err(ImportError::ImportFailed { code: Some(4) })
        ));
    }
}
