//! Latency profiling for flatseg operations
//!
//! Latencies are recorded in nanoseconds into a [DDSketch] so that percentiles
//! can be reported without keeping every sample around.
#![deny(missing_docs)]
#![forbid(unsafe_code)]

use minstant::Instant;
use parking_lot::Mutex;
use sketches_ddsketch::{Config, DDSketch};
use std::{fmt, sync::Arc};

/// Records the latency of the enclosing scope into the given [Sketch]
#[macro_export]
macro_rules! profile_scope {
    ($sketch:expr) => {
        let _measure = $crate::Measure::new($sketch);
    };
}

/// Latency percentiles in nanoseconds
///
/// Displayed as a single line, e.g. `3 samples, min 41ns, p50 58ns, ..., max 190ns`.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Percentiles {
    /// Number of recorded samples
    pub count: usize,
    /// Smallest recorded latency
    pub min: f64,
    /// Median latency
    pub p50: f64,
    /// 99th percentile
    pub p99: f64,
    /// 99.9th percentile
    pub p99_9: f64,
    /// 99.99th percentile
    pub p99_99: f64,
    /// 99.999th percentile
    pub p99_999: f64,
    /// Largest recorded latency
    pub max: f64,
}

impl Percentiles {
    /// Returns `(label, nanoseconds)` pairs ordered from the smallest to the largest latency
    pub fn labelled(&self) -> [(&'static str, f64); 7] {
        [
            ("min", self.min),
            ("p50", self.p50),
            ("p99", self.p99),
            ("p99.9", self.p99_9),
            ("p99.99", self.p99_99),
            ("p99.999", self.p99_999),
            ("max", self.max),
        ]
    }
}

impl From<&DDSketch> for Percentiles {
    fn from(sketch: &DDSketch) -> Self {
        // an empty sketch has no quantiles
        let at = |q: f64| sketch.quantile(q).ok().flatten().unwrap_or_default();
        Self {
            count: sketch.count(),
            min: sketch.min().unwrap_or_default(),
            p50: at(0.5),
            p99: at(0.99),
            p99_9: at(0.999),
            p99_99: at(0.9999),
            p99_999: at(0.99999),
            max: sketch.max().unwrap_or_default(),
        }
    }
}

impl fmt::Display for Percentiles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} samples", self.count)?;
        for (label, nanos) in self.labelled() {
            write!(f, ", {label} {nanos:.0}ns")?;
        }
        Ok(())
    }
}

/// A shareable latency sketch
///
/// Clones share the same underlying sketch. The sketch sits behind a mutex so a
/// profiled structure stays `Send + Sync`.
#[derive(Clone)]
pub struct Sketch {
    inner: Arc<Mutex<DDSketch>>,
}

impl Default for Sketch {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(DDSketch::new(Config::new(0.01, 2048, 1.0e-9)))),
        }
    }
}

impl Sketch {
    /// Adds a single sample
    #[inline]
    pub fn add(&self, data: f64) {
        self.inner.lock().add(data)
    }
    /// Returns the number of recorded samples
    pub fn count(&self) -> usize {
        self.inner.lock().count()
    }
    /// Returns the current percentiles of this sketch
    pub fn percentiles(&self) -> Percentiles {
        Percentiles::from(&*self.inner.lock())
    }
}

// Inspired by https://github.com/spacejam/sled/blob/main/src/metrics.rs
/// Scope guard that records its own lifetime into a [Sketch] when dropped
pub struct Measure {
    start: Instant,
    sketch: Sketch,
}

impl Measure {
    /// Starts a new measurement
    #[inline]
    pub fn new(sketch: &Sketch) -> Measure {
        Measure {
            sketch: sketch.clone(),
            start: Instant::now(),
        }
    }
}

impl Drop for Measure {
    #[inline]
    fn drop(&mut self) {
        self.sketch.add(self.start.elapsed().as_nanos() as f64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measure_records_on_drop() {
        let sketch = Sketch::default();
        {
            profile_scope!(&sketch);
        }
        {
            profile_scope!(&sketch);
        }
        assert_eq!(sketch.count(), 2);
        let percentiles = sketch.percentiles();
        assert_eq!(percentiles.count, 2);
        assert!(percentiles.max >= percentiles.min);
    }

    #[test]
    fn clones_share_samples() {
        let sketch = Sketch::default();
        let other = sketch.clone();
        other.add(10.0);
        assert_eq!(sketch.count(), 1);
    }

    #[test]
    fn empty_sketch_reports_zero() {
        let percentiles = Sketch::default().percentiles();
        assert_eq!(percentiles.count, 0);
        assert_eq!(percentiles.p99, 0.0);
    }

    #[test]
    fn percentiles_display_on_one_line() {
        let sketch = Sketch::default();
        for nanos in [100.0, 100.0, 100.0] {
            sketch.add(nanos);
        }
        let line = sketch.percentiles().to_string();
        assert!(line.starts_with("3 samples, min 100ns, p50 "), "{line}");
        assert!(line.ends_with(", max 100ns"), "{line}");
        assert_eq!(line.matches("ns").count(), 7);
    }
}
