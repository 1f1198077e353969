use csv::StringRecord;
use serde::Serialize;
use std::collections::BTreeMap;
use std::rc::Rc;

/// One CSV line keyed by the file's header.
///
/// The header is shared between every row of a file, so the key set is the
/// same for all of them.
#[derive(Debug, Clone)]
pub struct Row {
    headers: Rc<StringRecord>,
    values: StringRecord,
}

impl Row {
    pub fn new(headers: Rc<StringRecord>, values: StringRecord) -> Self {
        Self { headers, values }
    }

    #[cfg(test)]
    pub(crate) fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let (headers, values): (Vec<&str>, Vec<&str>) = pairs.into_iter().unzip();
        Self::new(
            Rc::new(StringRecord::from(headers)),
            StringRecord::from(values),
        )
    }

    #[cfg(test)]
    pub(crate) fn columns(&self) -> impl Iterator<Item = &str> {
        self.headers.iter()
    }

    #[cfg(test)]
    pub(crate) fn get(&self, column: &str) -> Option<&str> {
        let index = self.headers.iter().position(|h| h == column)?;
        self.values.get(index)
    }

    /// Column/value pairs in header order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().zip(self.values.iter())
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.headers.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }
}

/// A single event record, one per imported row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(rename = "event")]
    pub name: String,
    pub entity_type: String,
    pub entity_id: String,
    pub properties: BTreeMap<String, String>,
}

impl Event {
    pub fn from_row(row: &Row, position: usize, name: &str, entity_type: &str) -> Self {
        let properties = row
            .iter()
            .map(|(column, value)| (column.to_string(), value.to_string()))
            .collect();

        Self {
            name: name.to_string(),
            entity_type: entity_type.to_string(),
            entity_id: position.to_string(),
            properties,
        }
    }
}

/// Lazily turns rows into events.
///
/// The n-th row becomes the event with entity id `n`. A row that failed to
/// decode is passed through as the error.
pub fn convert<'a, I, E>(
    rows: I,
    event_name: &'a str,
    entity_type: &'a str,
) -> impl Iterator<Item = Result<Event, E>>
where
    I: IntoIterator<Item = Result<Row, E>>,
{
    rows.into_iter()
        .enumerate()
        .map(move |(position, row)| {
            row.map(|row| Event::from_row(&row, position, event_name, entity_type))
        })
}
