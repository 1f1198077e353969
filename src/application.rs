/// A registered event store application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Application {
    pub id: String,
    pub access_key: String,
}

impl Application {
    pub fn new(id: impl Into<String>, access_key: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            access_key: access_key.into(),
        }
    }

    /// Parses one `<index>|<app-id>|<access-key>|...` line.
    /// Returns None for lines with fewer than three fields.
    pub fn from_listing_line(line: &str) -> Option<Self> {
        let mut fields = line.split('|');
        let _index = fields.next()?;
        let id = fields.next()?;
        let access_key = fields.next()?;

        Some(Self::new(id.trim(), access_key.trim()))
    }
}

/// Parses the output of `pio app list`.
///
/// Banners, headers and blank lines that do not carry three pipe-delimited
/// fields are skipped.
pub fn parse_listing(output: &str) -> Vec<Application> {
    output
        .lines()
        .filter_map(Application::from_listing_line)
        .collect()
}

/// Returns the id of the first application registered under `access_key`.
pub fn resolve<'a>(applications: &'a [Application], access_key: &str) -> Option<&'a str> {
    applications
        .iter()
        .find(|app| app.access_key == access_key)
        .map(|app| app.id.as_str())
}
