use core::fmt;
use flatseg_stats::Sketch;

/// Latency stats for [SegmentTree](super::SegmentTree)
#[derive(Clone, Default)]
pub struct Stats {
    /// A sketch for recording latencies of building or rebuilding the tree
    pub build: Sketch,
    /// A sketch for recording latencies of point updates
    pub update: Sketch,
    /// A sketch for recording latencies of range queries
    pub query: Sketch,
}

impl fmt::Debug for Stats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("SegmentTree Stats")
            .field("build", &format_args!("{}", self.build.percentiles()))
            .field("update", &format_args!("{}", self.update.percentiles()))
            .field("query", &format_args!("{}", self.query.percentiles()))
            .finish()
    }
}
