//! Options for building validator reports.

/// Controls which optional documents [`validator_report`](super::validator_report)
/// fetches in addition to the pool and non-pool voter documents.
///
/// # Example
/// ```
/// use xshin_reader::api::ReportOptions;
///
/// let opts = ReportOptions::new().with_metrics(false);
/// assert!(!opts.include_metrics);
/// assert!(opts.include_search_name);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportOptions {
    /// Fetch the voter-metrics group and attach per-epoch metrics (default: true).
    pub include_metrics: bool,

    /// Fetch the search index and attach the display name (default: true).
    pub include_search_name: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            include_metrics: true,
            include_search_name: true,
        }
    }
}

impl ReportOptions {
    /// Create a new `ReportOptions` with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether per-epoch metrics are fetched.
    pub fn with_metrics(mut self, include: bool) -> Self {
        self.include_metrics = include;
        self
    }

    /// Set whether the search-index display name is fetched.
    pub fn with_search_name(mut self, include: bool) -> Self {
        self.include_search_name = include;
        self
    }
}
