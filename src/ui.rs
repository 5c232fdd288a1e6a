// UI layer: terminal feedback while a batch runs.
//
// The bar lives on stderr so stdout carries nothing but the report.
// indicatif hides it on its own when stderr is not a terminal.

use crate::api::{failure_message, BatchObserver};
use crate::error::ClientError;
use crate::record::AnnotationRecord;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tracing::warn;

const TEMPLATE: &str = "{spinner} [{bar:30}] {pos}/{len} {msg}";

/// Progress bar over the variant list that also logs failures.
pub struct ProgressObserver {
    bar: ProgressBar,
    failed: usize,
}

impl ProgressObserver {
    pub fn new() -> Self {
        Self::with_target(ProgressDrawTarget::stderr())
    }

    /// Observer that never draws; used when output is not interactive.
    pub fn hidden() -> Self {
        Self::with_target(ProgressDrawTarget::hidden())
    }

    fn with_target(target: ProgressDrawTarget) -> Self {
        let bar = ProgressBar::with_draw_target(Some(0), target);
        if let Ok(style) = ProgressStyle::with_template(TEMPLATE) {
            bar.set_style(style.progress_chars("=> "));
        }
        Self { bar, failed: 0 }
    }

    /// Number of variants that produced no row.
    pub fn failed(&self) -> usize {
        self.failed
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchObserver for ProgressObserver {
    fn on_start(&mut self, total: usize) {
        self.bar.set_length(total as u64);
        self.bar.set_position(0);
        self.failed = 0;
    }

    fn on_success(&mut self, record: &AnnotationRecord) {
        self.bar.set_message(record.variant.clone());
        self.bar.inc(1);
    }

    fn on_failure(&mut self, variant: &str, error: &ClientError) {
        self.failed += 1;
        // keep the log line from being drawn over
        self.bar
            .suspend(|| warn!("{}", failure_message(variant, error)));
        self.bar.set_message(variant.to_string());
        self.bar.inc(1);
    }
}
