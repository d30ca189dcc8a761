//! Types for peak-driven epoch detection

use std::fmt;

use epoch_core::Epoch;

/// An inclusive lower bound with an optional inclusive upper bound
///
/// Used for both peak heights (signal units) and epoch lengths (time
/// units); a missing upper bound leaves that side open.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Inclusive lower bound
    pub min: f64,
    /// Inclusive upper bound; unbounded when absent
    pub max: Option<f64>,
}

impl Bounds {
    /// A lower bound with an open top
    pub fn at_least(min: f64) -> Self {
        Self { min, max: None }
    }

    /// A fully closed interval of acceptable values
    pub fn between(min: f64, max: f64) -> Self {
        Self {
            min,
            max: Some(max),
        }
    }

    /// Check a value against both bounds
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && self.max.map_or(true, |max| value <= max)
    }

    /// Both bounds converted into sample units
    pub(crate) fn scaled(&self, sample_rate: f64) -> (f64, Option<f64>) {
        (self.min * sample_rate, self.max.map(|max| max * sample_rate))
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) => write!(f, "[{}, {}]", self.min, max),
            None => write!(f, "[{}, inf)", self.min),
        }
    }
}

/// Result of peak-driven extraction: surviving epochs with their peaks
///
/// The peak arrays are parallel to the epochs, in the same left-to-right
/// order.
#[derive(Debug, Clone, PartialEq)]
pub struct PeakEpochs {
    epochs: Epoch,
    peak_times: Vec<f64>,
    peak_heights: Vec<f64>,
}

impl PeakEpochs {
    /// Bundle epochs with their per-epoch peak positions and magnitudes
    pub fn new(epochs: Epoch, peak_times: Vec<f64>, peak_heights: Vec<f64>) -> Self {
        debug_assert_eq!(epochs.len(), peak_times.len());
        debug_assert_eq!(epochs.len(), peak_heights.len());
        Self {
            epochs,
            peak_times,
            peak_heights,
        }
    }

    /// The surviving epochs
    pub fn epochs(&self) -> &Epoch {
        &self.epochs
    }

    /// Peak position per epoch, in time units
    pub fn peak_times(&self) -> &[f64] {
        &self.peak_times
    }

    /// Peak magnitude per epoch, in signal units
    pub fn peak_heights(&self) -> &[f64] {
        &self.peak_heights
    }

    /// Number of surviving epochs
    pub fn len(&self) -> usize {
        self.peak_times.len()
    }

    /// Check if nothing survived
    pub fn is_empty(&self) -> bool {
        self.peak_times.is_empty()
    }

    /// Discard the peak arrays, keeping the epochs
    pub fn into_epochs(self) -> Epoch {
        self.epochs
    }
}

impl fmt::Display for PeakEpochs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PeakEpochs({} epochs)", self.len())
    }
}
