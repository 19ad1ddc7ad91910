//! Progress bar utilities using indicatif
//!
//! Wraps indicatif's `ProgressBar` so every command reports progress the same
//! way. The bar draws to stderr and stays hidden when stderr is not a
//! terminal, so piped output is never interleaved with it.

use indicatif::{ProgressBar as IndicatifBar, ProgressStyle};

/// Progress bar measuring input bytes consumed.
///
/// Cheap to clone; clones share the same bar, so parallel readers can each
/// hold one.
#[derive(Clone)]
pub struct ProgressBar {
    bar: IndicatifBar,
}

impl ProgressBar {
    /// Create a progress bar with a known total in bytes.
    pub fn new(total_bytes: u64, label: &str) -> Self {
        let bar = IndicatifBar::new(total_bytes);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{msg} [{bar:40.cyan/blue}] {percent:>3}% ({bytes}/{total_bytes}) ({bytes_per_sec}) {eta}")
        {
            bar.set_style(style.progress_chars("█░"));
        }
        bar.set_message(label.to_string());

        Self { bar }
    }

    /// Create a bar that never draws, for library callers and tests.
    pub fn hidden() -> Self {
        Self {
            bar: IndicatifBar::hidden(),
        }
    }

    /// Advance by `bytes`, never past the total. Compressed inputs yield more
    /// decoded bytes than their on-disk size.
    pub fn advance(&self, bytes: u64) {
        let room = self
            .bar
            .length()
            .map_or(bytes, |len| len.saturating_sub(self.bar.position()));
        self.bar.inc(bytes.min(room));
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Finish with custom message
    pub fn finish_with_message(&self, message: &str) {
        if let Some(len) = self.bar.length() {
            self.bar.set_position(len);
        }
        self.bar.finish_with_message(message.to_string());
    }
}
