//! Progress bar for the static-scan wait, drawn on stderr so report
//! output on stdout stays machine-readable.

use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;

pub struct StaticScanBar {
    bar: Option<ProgressBar>,
}

impl StaticScanBar {
    /// Only drawn on an interactive terminal; in CI the percentage is
    /// available from the server anyway and a bar would just garble logs.
    pub fn new() -> Self {
        let bar = if std::io::stderr().is_terminal() {
            let bar = ProgressBar::new(100);
            bar.set_style(
                ProgressStyle::with_template("Static scan {bar:40} {pos:>3}%")
                    .expect("Invalid progress bar template")
                    .progress_chars("=> "),
            );
            Some(bar)
        } else {
            None
        };

        Self { bar }
    }

    pub fn update(&self, progress: i64) {
        if let Some(bar) = &self.bar {
            bar.set_position(progress.clamp(0, 100) as u64);
        }
    }

    pub fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}
