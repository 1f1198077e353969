//! Imports a CSV file into a PredictionIO event store.
//!
//! Every row becomes one event, the events are written to an intermediate
//! NDJSON file and `pio import` loads that file into the application owning
//! the given access key.

pub mod application;
pub mod config;
pub mod error;
pub mod event;
pub mod export;
pub mod pio;
pub mod source;

pub use application::{Application, parse_listing, resolve};
pub use config::{Args, Config};
pub use error::ImportError;
pub use event::{Event, Row, convert};
pub use export::EventExporter;
pub use pio::{ApplicationDirectory, Importer, PioCli};
pub use source::CsvSource;

use log::info;
use std::path::{Path, PathBuf};

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    pub app_id: String,
    pub events: usize,
    pub output: PathBuf,
}

/// Resolves the app id, converts the CSV and hands the result to the importer.
///
/// The intermediate file is only created once the CSV has been opened.
pub fn run<D, I>(
    config: &Config,
    directory: &D,
    importer: &I,
) -> Result<ImportSummary, ImportError>
where
    D: ApplicationDirectory,
    I: Importer,
{
    info!("Accessing an access key");
    let applications = directory.list()?;
    let app_id = resolve(&applications, &config.access_key)
        .ok_or(ImportError::Resolution)?
        .to_string();
    info!("Resolved app_id {}", app_id);

    let csv_path = config.csv_path();
    let mut source = CsvSource::open(&csv_path)?;

    info!(
        "Loading {} ({} columns)",
        csv_path.display(),
        source.headers().len()
    );
    let output = config.output_path();
    let events = export_events(&mut source, config, &output)?;

    info!("Storing {} ({} events)", output.display(), events);
    importer.import(&app_id, &output)?;

    Ok(ImportSummary {
        app_id,
        events,
        output,
    })
}

fn export_events<R: std::io::Read>(
    source: &mut CsvSource<R>,
    config: &Config,
    output: &Path,
) -> Result<usize, ImportError> {
    let mut exporter = EventExporter::create(output)?;

    for event in convert(source.rows(), &config.event_name, &config.entity_type) {
        exporter.create_event(&event?)?;
    }

    exporter.finish()
}
