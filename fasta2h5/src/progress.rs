//! Terminal progress bars.

use indicatif::{ProgressBar, ProgressStyle};
use onehot::Progress;

const TEMPLATE: &str =
    "{spinner:.green} {msg} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})";

/// One progress bar per record, counting encoded rows.
pub struct BarProgress {
    enabled: bool,
    bar: Option<ProgressBar>,
}

impl BarProgress {
    pub fn new(enabled: bool) -> Self {
        Self { enabled, bar: None }
    }
}

impl Progress for BarProgress {
    fn start_record(&mut self, id: &str, len: usize) {
        if !self.enabled {
            return;
        }
        let style = ProgressStyle::with_template(TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");
        let bar = ProgressBar::new(len as u64)
            .with_style(style)
            .with_message(id.to_string());
        self.bar = Some(bar);
    }

    fn advance(&mut self, rows: usize) {
        if let Some(bar) = &self.bar {
            bar.inc(rows as u64);
        }
    }

    fn finish_record(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish();
        }
    }
}
