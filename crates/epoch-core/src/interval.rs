//! The atomic labeled time interval

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single labeled time range `[start, stop]` in seconds (or any
/// consistent time unit)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    /// Start time
    pub start: f64,
    /// Stop time, `start <= stop`
    pub stop: f64,
    /// Category label; empty when the interval is unlabeled
    pub label: String,
}

impl Interval {
    /// Create an unlabeled interval
    pub fn new(start: f64, stop: f64) -> Self {
        Self {
            start,
            stop,
            label: String::new(),
        }
    }

    /// Create a labeled interval
    pub fn with_label(start: f64, stop: f64, label: impl Into<String>) -> Self {
        Self {
            start,
            stop,
            label: label.into(),
        }
    }

    /// Elapsed time covered by this interval
    pub fn duration(&self) -> f64 {
        self.stop - self.start
    }

    /// Check if a time point falls within this interval (inclusive bounds)
    pub fn contains(&self, t: f64) -> bool {
        t >= self.start && t <= self.stop
    }

    /// Check if two intervals share any time point
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.stop && other.start < self.stop
    }

    /// Ordering invariant: stop never precedes start (false for NaN bounds)
    pub fn is_valid(&self) -> bool {
        self.start <= self.stop
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.label.is_empty() {
            write!(f, "[{:.3}, {:.3}]", self.start, self.stop)
        } else {
            write!(f, "[{:.3}, {:.3}] {}", self.start, self.stop, self.label)
        }
    }
}
