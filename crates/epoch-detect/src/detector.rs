//! Peak-driven epoch extraction
//!
//! Turns a continuous detection signal (a power envelope, a population
//! rate) into discrete epochs around its local maxima, with height,
//! separation, and duration filtering. Used for ripple/artifact/burst
//! style detection downstream.

use log::debug;

use epoch_core::{Epoch, Error, Result};

use crate::find_peaks::find_peaks;
use crate::types::{Bounds, PeakEpochs};

/// Gaps of exactly the configured separation still merge
const SEPARATION_EPS: f64 = 1e-6;

/// Parameters for [`PeakDetector`]
#[derive(Debug, Clone, PartialEq)]
pub struct PeakParameters {
    /// Acceptable peak heights, in signal units
    pub height: Bounds,
    /// Acceptable epoch durations, in time units; a missing upper bound
    /// defaults to the longest surviving candidate
    pub length: Bounds,
    /// Candidates closer than this (in time units) merge into one epoch
    pub min_separation: f64,
    /// Signal values below this are zeroed and cannot seed a peak
    pub floor: f64,
    /// Samples per time unit
    pub sample_rate: f64,
}

/// Extracts epochs around the local maxima of a detection signal
///
/// The pipeline: clip the signal at the floor, find local maxima whose
/// height is in bounds (candidate span = base-to-base), merge candidates
/// separated by less than `min_separation`, filter by duration, and
/// convert sample indices back into time units.
#[derive(Debug, Clone)]
pub struct PeakDetector {
    params: PeakParameters,
}

/// A candidate epoch during the merge pass, in sample units
#[derive(Debug, Clone, Copy)]
struct Candidate {
    start: f64,
    stop: f64,
    peak: f64,
    height: f64,
}

impl PeakDetector {
    /// Create a detector with the required bounds and default scaling
    /// (no separation, zero floor, unit sample rate)
    pub fn new(height: Bounds, length: Bounds) -> Self {
        Self {
            params: PeakParameters {
                height,
                length,
                min_separation: 0.0,
                floor: 0.0,
                sample_rate: 1.0,
            },
        }
    }

    /// Create from a full parameter set
    pub fn with_parameters(params: PeakParameters) -> Self {
        Self { params }
    }

    /// Merge candidates separated by less than `min_separation` time units
    pub fn with_separation(mut self, min_separation: f64) -> Self {
        self.params.min_separation = min_separation;
        self
    }

    /// Zero out signal values below `floor` before peak finding
    pub fn with_floor(mut self, floor: f64) -> Self {
        self.params.floor = floor;
        self
    }

    /// Interpret the signal as sampled at `sample_rate` samples per
    /// time unit
    pub fn with_sample_rate(mut self, sample_rate: f64) -> Self {
        self.params.sample_rate = sample_rate;
        self
    }

    /// The detector's parameters
    pub fn parameters(&self) -> &PeakParameters {
        &self.params
    }

    /// Extract epochs around the signal's qualifying local maxima
    ///
    /// Deterministic for a fixed signal and parameter set. When two merged
    /// candidates have equal peak heights the earlier peak keeps the
    /// merged epoch's peak position.
    ///
    /// Fails with a configuration error when the height lower bound sits
    /// below the floor, which would make the floor an unclearable filter.
    pub fn detect(&self, signal: &[f64]) -> Result<PeakEpochs> {
        let params = &self.params;
        if params.height.min < params.floor {
            return Err(Error::Configuration(format!(
                "height lower bound {} must not be below the floor {}",
                params.height.min, params.floor
            )));
        }
        let fs = params.sample_rate;
        let separation = params.min_separation * fs + SEPARATION_EPS;
        let (length_min, length_max) = params.length.scaled(fs);

        let clipped: Vec<f64> = signal
            .iter()
            .map(|&v| if v >= params.floor { v } else { 0.0 })
            .collect();

        let peaks = find_peaks(&clipped, params.height.min, params.height.max);
        debug!("{} candidate peaks within height bounds", peaks.len());

        // Left-to-right merge: a candidate fuses into the growing epoch
        // when its gap is below the separation, so chains collapse
        // transitively. The taller peak keeps the merged epoch's position;
        // ties go to the earlier peak.
        let mut merged: Vec<Candidate> = Vec::with_capacity(peaks.len());
        for peak in &peaks {
            let candidate = Candidate {
                start: peak.left_base as f64,
                stop: peak.right_base as f64,
                peak: peak.index as f64,
                height: peak.height,
            };
            match merged.last_mut() {
                Some(last) if candidate.start - last.stop < separation => {
                    last.start = last.start.min(candidate.start);
                    last.stop = last.stop.max(candidate.stop);
                    if candidate.height > last.height {
                        last.peak = candidate.peak;
                        last.height = candidate.height;
                    }
                }
                _ => merged.push(candidate),
            }
        }
        debug!("{} candidates after separation merge", merged.len());

        let length_max = length_max.unwrap_or_else(|| {
            merged
                .iter()
                .map(|c| c.stop - c.start)
                .fold(0.0, f64::max)
        });
        merged.retain(|c| {
            let length = c.stop - c.start;
            length >= length_min && length <= length_max
        });

        let starts: Vec<f64> = merged.iter().map(|c| c.start / fs).collect();
        let stops: Vec<f64> = merged.iter().map(|c| c.stop / fs).collect();
        let peak_times: Vec<f64> = merged.iter().map(|c| c.peak / fs).collect();
        let peak_heights: Vec<f64> = merged.iter().map(|c| c.height).collect();

        let epochs = Epoch::from_arrays(&starts, &stops)?;
        Ok(PeakEpochs::new(epochs, peak_times, peak_heights))
    }
}
