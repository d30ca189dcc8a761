//! Peak-driven epoch extraction from continuous detection signals
//!
//! Builds on [`epoch_core`] to turn a detection signal (a ripple-band
//! power envelope, a population firing rate, an artifact score) into a
//! discrete set of epochs around its local maxima.
//!
//! # Example
//!
//! ```rust
//! use epoch_detect::{Bounds, PeakDetector};
//!
//! let mut envelope = vec![0.0; 64];
//! envelope[10] = 2.0;
//! envelope[11] = 6.0;
//! envelope[12] = 2.0;
//!
//! let detector = PeakDetector::new(Bounds::at_least(3.0), Bounds::at_least(0.0))
//!     .with_sample_rate(8.0);
//! let ripples = detector.detect(&envelope)?;
//! assert_eq!(ripples.len(), 1);
//! assert_eq!(ripples.peak_heights(), &[6.0]);
//! # Ok::<(), epoch_core::Error>(())
//! ```

pub mod detector;
mod find_peaks;
pub mod types;

pub use detector::{PeakDetector, PeakParameters};
pub use types::{Bounds, PeakEpochs};
