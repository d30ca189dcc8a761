//! neuro-epochs: interval algebra for behavioral electrophysiology
//!
//! Re-exports the workspace crates:
//! - [`epoch_core`]: the `Epoch` container of labeled, start-sorted time
//!   intervals with slicing, merging, gap-filling, and containment
//!   queries
//! - [`epoch_detect`]: peak-driven epoch extraction from continuous
//!   detection signals
//!
//! ```rust
//! use neuro_epochs::{Bounds, Epoch, PeakDetector};
//!
//! let running = Epoch::from_boolean_signal(&[false, true, true, false], None)?;
//! assert_eq!(running.spans(), vec![(1.0, 2.0)]);
//!
//! let detector = PeakDetector::new(Bounds::at_least(1.0), Bounds::at_least(0.0));
//! assert!(detector.detect(&[0.0, 2.0, 0.0, 0.0])?.len() == 1);
//! # Ok::<(), neuro_epochs::Error>(())
//! ```

pub use epoch_core;
pub use epoch_detect;

pub use epoch_core::{Containment, Epoch, Error, FillMethod, Interval, Record, Result};
pub use epoch_detect::{Bounds, PeakDetector, PeakEpochs, PeakParameters};
