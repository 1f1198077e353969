use crate::{ImportError, Row};
use csv::{Reader, ReaderBuilder, StringRecord};
use log::debug;
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use std::rc::Rc;

/// CSV input whose first line is the header.
pub struct CsvSource<R> {
    reader: Reader<R>,
    headers: Rc<StringRecord>,
}

impl CsvSource<BufReader<File>> {
    /// Opens a CSV file, failing with `SourceNotFound` when it does not exist.
    pub fn open(path: &Path) -> Result<Self, ImportError> {
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ImportError::SourceNotFound(path.to_path_buf()),
            _ => ImportError::Io(e),
        })?;

        Self::from_reader(BufReader::with_capacity(1024 * 1024, file))
    }
}

impl<R: Read> CsvSource<R> {
    pub fn from_reader(reader: R) -> Result<Self, ImportError> {
        let mut reader = ReaderBuilder::new().has_headers(true).from_reader(reader);
        let headers = reader.headers()?;
        if headers.is_empty() {
            return Err(ImportError::NoColumns);
        }
        let headers = Rc::new(dedupe_headers(headers));
        debug!("csv columns: {:?}", headers);

        Ok(Self { reader, headers })
    }

    pub fn headers(&self) -> &StringRecord {
        &self.headers
    }

    /// Streams the remaining rows. Decoding failures surface as `DataSource`.
    pub fn rows(&mut self) -> impl Iterator<Item = Result<Row, ImportError>> + '_ {
        let headers = Rc::clone(&self.headers);
        self.reader.records().map(move |record| {
            record
                .map(|values| Row::new(Rc::clone(&headers), values))
                .map_err(ImportError::from)
        })
    }
}

/// Renames repeated column names to `name.1`, `name.2`, ... so that no cell
/// is shadowed by a later column of the same name.
fn dedupe_headers(headers: &StringRecord) -> StringRecord {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut names = Vec::with_capacity(headers.len());

    for name in headers.iter() {
        let mut name = name.to_string();
        let mut count = counts.get(&name).copied().unwrap_or(0);
        while count > 0 {
            counts.insert(name.clone(), count + 1);
            name = format!("{}.{}", name, count);
            count = counts.get(&name).copied().unwrap_or(0);
        }
        counts.insert(name.clone(), count + 1);
        names.push(name);
    }

    StringRecord::from(names)
}
