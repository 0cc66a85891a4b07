//! Segmentation run metrics.
//!
//! Collected only by the verbose entry point (`segment_verbose_with`); the
//! plain path records just the total.

use std::time::Duration;

#[derive(Debug, Default, Clone)]
pub(crate) struct RunMetrics {
    /// Total elapsed time for the run.
    pub total: Duration,
    /// Time spent in the trigger scan.
    pub trigger: Duration,
    /// Time spent extracting sub-expressions.
    pub extract: Duration,
    /// Time spent building the template.
    pub template: Duration,
}
