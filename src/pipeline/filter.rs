//! Filter stage predicates.

use super::entry::{Level, LogEntry};

/// True if the parser accepted the line.
pub fn is_valid(entry: &LogEntry) -> bool {
    entry.is_valid()
}

/// True if the entry is at `level`.
pub fn is_level(entry: &LogEntry, level: Level) -> bool {
    entry.level() == level
}

pub fn is_error(entry: &LogEntry) -> bool {
    is_level(entry, Level::Error)
}

/// Keeps valid entries, optionally only those at one target level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelFilter {
    level: Option<Level>,
}

impl LevelFilter {
    pub const fn new(level: Level) -> Self {
        Self { level: Some(level) }
    }

    /// Accept every valid entry regardless of level.
    pub const fn any() -> Self {
        Self { level: None }
    }

    pub const fn level(&self) -> Option<Level> {
        self.level
    }

    /// Validity is checked first; an invalid entry never reaches the level
    /// predicate.
    pub fn accepts(&self, entry: &LogEntry) -> bool {
        is_valid(entry) && self.level.map_or(true, |level| is_level(entry, level))
    }
}

impl Default for LevelFilter {
    fn default() -> Self {
        Self::new(Level::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_keeps_errors_only() {
        let filter = LevelFilter::default();
        assert!(filter.accepts(&LogEntry::parse("10 ERROR")));
        assert!(!filter.accepts(&LogEntry::parse("10 WARN")));
        assert!(!filter.accepts(&LogEntry::parse("garbage")));
    }

    #[test]
    fn test_any_keeps_every_valid_entry() {
        let filter = LevelFilter::any();
        assert_eq!(filter.level(), None);
        assert!(filter.accepts(&LogEntry::parse("1 INFO")));
        assert!(filter.accepts(&LogEntry::parse("2 whatever")));
        assert!(!filter.accepts(&LogEntry::parse("two INFO")));
    }

    #[test]
    fn test_invalid_entry_rejected_even_for_unknown_target() {
        // invalid entries carry Level::Unknown, so the level check alone would pass
        let filter = LevelFilter::new(Level::Unknown);
        let invalid = LogEntry::parse("not-a-number FATAL");
        assert!(is_level(&invalid, Level::Unknown));
        assert!(!filter.accepts(&invalid));
        assert!(filter.accepts(&LogEntry::parse("7 FATAL")));
    }

    #[test]
    fn test_predicate_order_does_not_change_survivors() {
        let lines = ["1 ERROR", "2 INFO", "x ERROR", "3 error", "", "4 WARN"];
        let entries: Vec<LogEntry> = lines.iter().map(|l| LogEntry::parse(l)).collect();

        let valid_then_level: Vec<&LogEntry> = entries
            .iter()
            .filter(|e| is_valid(e))
            .filter(|e| is_error(e))
            .collect();
        let level_then_valid: Vec<&LogEntry> = entries
            .iter()
            .filter(|e| is_error(e))
            .filter(|e| is_valid(e))
            .collect();

        assert_eq!(valid_then_level, level_then_valid);
        assert_eq!(valid_then_level.len(), 2);
    }
}
