//! Severity of a captured console line.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the four console channels a script can write to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Log,
    Error,
    Warn,
    Info,
}

impl Severity {
    pub const ALL: [Severity; 4] = [Severity::Log, Severity::Error, Severity::Warn, Severity::Info];

    /// Name of the console method for this channel.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Log => "log",
            Severity::Error => "error",
            Severity::Warn => "warn",
            Severity::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Severity::ALL
            .into_iter()
            .find(|severity| severity.as_str() == s)
            .ok_or_else(|| format!("unknown severity: {s}"))
    }
}
