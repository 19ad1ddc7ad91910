//! Record parser: one text line in, one [`LogEntry`] out.
//!
//! Lines are whitespace-delimited. The first field is the timestamp and the
//! second is the severity level; anything after that is free text. A field
//! may carry a `name=` prefix, so all of these parse the same way:
//!
//! ```text
//! 1700000000 ERROR disk full
//! t=1700000000 lvl=ERROR disk full
//! ts=1700000000 level=error disk full
//! ```
//!
//! A line that is too short, or whose timestamp is not an integer, becomes an
//! invalid entry. Parsing never fails.

use std::fmt;

/// Severity level of a log line.
///
/// Ordered by severity, with `Unknown` last so it sorts after every level
/// the parser recognises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Level {
    Info,
    Warn,
    Error,
    Unknown,
}

impl Level {
    /// Parse a level token, ignoring ASCII case. Unrecognised text maps to
    /// [`Level::Unknown`].
    pub fn from_token(token: &str) -> Self {
        if token.eq_ignore_ascii_case("INFO") {
            Self::Info
        } else if token.eq_ignore_ascii_case("WARN") || token.eq_ignore_ascii_case("WARNING") {
            Self::Warn
        } else if token.eq_ignore_ascii_case("ERROR") {
            Self::Error
        } else {
            Self::Unknown
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed log line.
///
/// When [`is_valid`](Self::is_valid) is false the timestamp is `0` and the
/// level is [`Level::Unknown`]; neither carries meaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    timestamp: i64,
    level: Level,
    raw: String,
    valid: bool,
}

impl LogEntry {
    /// Parse one line of input.
    pub fn parse(line: &str) -> Self {
        let mut fields = line.split_whitespace();

        let parsed = match (fields.next(), fields.next()) {
            (Some(ts), Some(level)) => field_value(ts)
                .parse::<i64>()
                .ok()
                .map(|timestamp| (timestamp, Level::from_token(field_value(level)))),
            _ => None,
        };

        match parsed {
            Some((timestamp, level)) => Self {
                timestamp,
                level,
                raw: line.to_string(),
                valid: true,
            },
            None => Self::invalid(line),
        }
    }

    fn invalid(line: &str) -> Self {
        Self {
            timestamp: 0,
            level: Level::Unknown,
            raw: line.to_string(),
            valid: false,
        }
    }

    pub const fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub const fn level(&self) -> Level {
        self.level
    }

    /// The original line, untouched.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub const fn is_valid(&self) -> bool {
        self.valid
    }
}

/// Strip an optional `name=` prefix from a field.
fn field_value(field: &str) -> &str {
    field.split_once('=').map_or(field, |(_, value)| value)
}
