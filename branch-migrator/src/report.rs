//! User-facing progress reporting.
//!
//! The migration core decides what to tell the operator; a [`Reporter`]
//! decides how it is rendered.

use tracing::{error, info};

/// Receives the progress lines produced during a run.
pub trait Reporter: Send + Sync {
    /// A top-level progress line (e.g. "Processing ros2/rclcpp").
    fn progress(&self, message: &str);

    /// An indented outcome line belonging to the current repository.
    fn sub_item(&self, message: &str);

    /// An indented outcome line describing a failure.
    fn sub_item_error(&self, message: &str);
}

/// Renders report lines as `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn progress(&self, message: &str) {
        info!("{message}");
    }

    fn sub_item(&self, message: &str) {
        info!(" - {message}");
    }

    fn sub_item_error(&self, message: &str) {
        error!(" - ERROR: {message}");
    }
}
