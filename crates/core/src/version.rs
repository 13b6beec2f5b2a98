//! Endpoint version tables
//!
//! Every Rakuten Web Service operation publishes one or more API versions.
//! A version is addressed by a human-readable release date (`2014-02-22`)
//! but appears in request URLs as a compact token (`20140222`). Callers may
//! use either spelling; the table resolves both.

/// A version entry: release date paired with the URL token.
pub type VersionEntry = (&'static str, &'static str);

/// Ordered table of the API versions an operation supports.
///
/// Entries are listed newest first, so the first entry is the default
/// version used when a caller does not ask for a specific one. Tables are
/// defined statically per operation and are never empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionMap {
    entries: &'static [VersionEntry],
}

impl VersionMap {
    /// Create a table from a static `(date, token)` slice, newest first.
    #[must_use]
    pub const fn new(entries: &'static [VersionEntry]) -> Self {
        Self { entries }
    }

    /// The newest version the operation supports.
    ///
    /// # Panics
    ///
    /// Panics if the table is empty. Operation tables are compiled into
    /// the SDK and always carry at least one entry.
    #[must_use]
    pub fn latest(&self) -> VersionEntry {
        self.entries[0]
    }

    /// Resolve a requested version in either spelling.
    ///
    /// Returns the matching `(date, token)` entry, or `None` when the
    /// operation does not support the requested version.
    #[must_use]
    pub fn resolve(&self, requested: &str) -> Option<VersionEntry> {
        let date = normalize(requested)?;
        self.entries.iter().copied().find(|(d, _)| *d == date)
    }

    /// Whether the table contains the requested version.
    #[must_use]
    pub fn supports(&self, requested: &str) -> bool {
        self.resolve(requested).is_some()
    }

    /// Release dates in table order, newest first.
    pub fn dates(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(d, _)| *d)
    }

    /// Number of versions in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty. Always false for compiled-in tables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Normalize a version string to its hyphenated date form.
///
/// Accepts `YYYYMMDD` and `YYYY-MM-DD`; anything else is rejected.
#[must_use]
pub fn normalize(version: &str) -> Option<String> {
    let b = version.as_bytes();
    match b.len() {
        8 if b.iter().all(u8::is_ascii_digit) => Some(format!(
            "{}-{}-{}",
            &version[0..4],
            &version[4..6],
            &version[6..8]
        )),
        10 if is_hyphenated_date(b) => Some(version.to_string()),
        _ => None,
    }
}

/// Strip the hyphens from a `YYYY-MM-DD` date, yielding the URL token form.
#[must_use]
pub fn compact(date: &str) -> Option<String> {
    if is_hyphenated_date(date.as_bytes()) {
        Some(date.replace('-', ""))
    } else {
        None
    }
}

fn is_hyphenated_date(b: &[u8]) -> bool {
    b.len() == 10
        && b[4] == b'-'
        && b[7] == b'-'
        && b.iter()
            .enumerate()
            .all(|(i, c)| matches!(i, 4 | 7) || c.is_ascii_digit())
}
