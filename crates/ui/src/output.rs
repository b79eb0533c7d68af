//! Console output log.

use chrono::format::{Item, StrftimeItems};
use chrono::Local;
use common::Severity;
use js_engine::CaptureSink;
use std::fmt::{self, Write};

/// Local time as an en-US time string, e.g. `3:07:45 PM`.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%-I:%M:%S %p";

/// Whether `format` is a usable chrono strftime pattern.
pub fn is_valid_timestamp_format(format: &str) -> bool {
    StrftimeItems::new(format).all(|item| !matches!(item, Item::Error))
}

/// Current wall-clock local time rendered with `format`.
///
/// Falls back to [`DEFAULT_TIMESTAMP_FORMAT`] if the pattern cannot be
/// rendered.
pub fn local_timestamp(format: &str) -> String {
    let now = Local::now();
    let mut out = String::new();
    if write!(out, "{}", now.format(format)).is_err() {
        out.clear();
        let _ = write!(out, "{}", now.format(DEFAULT_TIMESTAMP_FORMAT));
    }
    out
}

/// One captured console line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputEntry {
    message: String,
    severity: Severity,
    timestamp: String,
}

impl OutputEntry {
    pub fn new(message: impl Into<String>, severity: Severity, timestamp: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity,
            timestamp: timestamp.into(),
        }
    }

    /// Entry stamped with the current local time.
    pub fn stamped(message: impl Into<String>, severity: Severity, format: &str) -> Self {
        Self::new(message, severity, local_timestamp(format))
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }
}

impl fmt::Display for OutputEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}  > {}", self.timestamp, self.message)
    }
}

/// Ordered log of captured entries.
#[derive(Clone, Debug, Default)]
pub struct OutputLog {
    entries: Vec<OutputEntry>,
}

impl OutputLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: OutputEntry) {
        self.entries.push(entry);
    }

    pub fn extend(&mut self, entries: impl IntoIterator<Item = OutputEntry>) {
        self.entries.extend(entries);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[OutputEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, OutputEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&OutputEntry> {
        self.entries.last()
    }

    /// Number of entries with the given severity.
    pub fn count(&self, severity: Severity) -> usize {
        self.entries.iter().filter(|e| e.severity == severity).count()
    }
}

impl<'a> IntoIterator for &'a OutputLog {
    type Item = &'a OutputEntry;
    type IntoIter = std::slice::Iter<'a, OutputEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Capture sink for a single run; stamps each line when it arrives.
pub struct OutputCollector {
    entries: Vec<OutputEntry>,
    timestamp_format: String,
}

impl OutputCollector {
    pub fn new(timestamp_format: &str) -> Self {
        Self {
            entries: Vec::new(),
            timestamp_format: timestamp_format.to_string(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Move the collected entries out, leaving the collector empty.
    pub fn take_entries(&mut self) -> Vec<OutputEntry> {
        std::mem::take(&mut self.entries)
    }

    fn record(&mut self, severity: Severity, message: String) {
        let entry = OutputEntry::stamped(message, severity, &self.timestamp_format);
        self.entries.push(entry);
    }
}

impl CaptureSink for OutputCollector {
    fn log(&mut self, message: String) {
        self.record(Severity::Log, message);
    }

    fn error(&mut self, message: String) {
        self.record(Severity::Error, message);
    }

    fn warn(&mut self, message: String) {
        self.record(Severity::Warn, message);
    }

    fn info(&mut self, message: String) {
        self.record(Severity::Info, message);
    }
}
