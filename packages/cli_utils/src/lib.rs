#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Terminal plumbing for the `crime_heatmap` binary.
//!
//! [`init_logger`] routes `log` output through a [`MultiProgress`] so log
//! lines print above the CSV load bar instead of tearing it, and
//! [`IndicatifProgress`] renders the loader's byte offsets as that bar.

use std::sync::Arc;
use std::time::Duration;

use crime_heatmap::progress::ProgressCallback;
use indicatif::{ProgressBar, ProgressStyle};

pub use indicatif::MultiProgress;

/// Load bar for the incident CSV.
pub struct IndicatifProgress {
    bar: ProgressBar,
    /// Byte-count style, applied once the file size is known.
    bar_style: ProgressStyle,
}

impl IndicatifProgress {
    /// Spinner that turns into a `{bytes}/{total_bytes}` bar as soon as the
    /// loader reports the input file size. Inputs whose size can't be read
    /// keep spinning until [`ProgressCallback::finish`].
    #[must_use]
    pub fn bytes_bar(multi: &MultiProgress, message: &str) -> Arc<dyn ProgressCallback> {
        Arc::new(Self::new(multi, message))
    }

    fn new(multi: &MultiProgress, message: &str) -> Self {
        let bar = multi.add(ProgressBar::new_spinner());
        bar.enable_steady_tick(Duration::from_millis(100));
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message.to_string());

        let bar_style = ProgressStyle::with_template(
            "  {msg} {wide_bar:.cyan/dim} {bytes}/{total_bytes} {percent}% [{eta}]",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("##-");

        Self { bar, bar_style }
    }
}

impl ProgressCallback for IndicatifProgress {
    fn set_total(&self, total: u64) {
        self.bar.set_length(total);
        self.bar.set_position(0);
        self.bar.set_style(self.bar_style.clone());
    }

    fn set_position(&self, pos: u64) {
        self.bar.set_position(pos);
    }

    fn set_message(&self, msg: String) {
        self.bar.set_message(msg);
    }

    fn finish(&self, msg: String) {
        self.bar.finish_with_message(msg);
    }
}

/// Installs `pretty_env_logger` (filtered by `RUST_LOG`) behind
/// `indicatif-log-bridge` and returns the [`MultiProgress`] the load bar
/// must be attached to.
#[must_use]
pub fn init_logger() -> MultiProgress {
    let multi = MultiProgress::new();

    let logger = pretty_env_logger::formatted_builder()
        .parse_env("RUST_LOG")
        .build();
    let level = logger.filter();

    // A second call (tests) finds a logger already installed.
    indicatif_log_bridge::LogWrapper::new(multi.clone(), logger)
        .try_init()
        .ok();

    log::set_max_level(level);

    multi
}

#[cfg(test)]
mod tests {
    use indicatif::ProgressDrawTarget;

    use super::*;

    fn hidden_bar() -> IndicatifProgress {
        let multi = MultiProgress::with_draw_target(ProgressDrawTarget::hidden());
        IndicatifProgress::new(&multi, "Loading incidents")
    }

    #[test]
    fn tracks_byte_offsets_once_size_is_known() {
        let progress = hidden_bar();
        assert_eq!(progress.bar.length(), None);

        progress.set_total(4096);
        progress.set_position(1024);

        assert_eq!(progress.bar.length(), Some(4096));
        assert_eq!(progress.bar.position(), 1024);
    }

    #[test]
    fn finish_keeps_summary_message() {
        let progress = hidden_bar();

        progress.set_total(10);
        progress.set_position(10);
        progress.finish("Loaded 2 incidents (3 rows)".to_string());

        assert!(progress.bar.is_finished());
        assert_eq!(progress.bar.message(), "Loaded 2 incidents (3 rows)");
    }
}
