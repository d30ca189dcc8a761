//! Labeled time intervals ("epochs") and their algebra
//!
//! Behavioral and electrophysiology analyses keep asking one question:
//! which time ranges count? This crate answers it with [`Epoch`], an
//! immutable, start-sorted set of labeled `(start, stop)` intervals with
//! construction from raw arrays, indicator/categorical signals, or
//! persisted records, plus the algebra (slicing, merging, gap-filling)
//! and queries (containment, per-label time budgets) downstream analyses
//! restrict their spike and position data with.
//!
//! Every operation returns a new value; a shared `Epoch` is safe for
//! concurrent read-only use.
//!
//! # Example
//!
//! ```rust
//! use epoch_core::{Epoch, FillMethod};
//!
//! let states = Epoch::from_categorical_signal(
//!     &["wake", "wake", "nrem", "nrem", "rem"],
//!     1.0,
//!     None,
//! )?;
//! assert_eq!(states.n_intervals(), 3);
//!
//! let budget = states.proportion_by_label(None, None)?;
//! assert!(budget["wake"] > 0.0);
//!
//! // close the recording gaps and keep only long states
//! let cleaned = states.fill_blank(FillMethod::FromLeft).duration_slice(Some(1.0), None);
//! assert!(!cleaned.is_overlapping());
//! # Ok::<(), epoch_core::Error>(())
//! ```

pub mod epoch;
pub mod error;
pub mod interval;
pub mod records;
pub mod runs;

pub use epoch::{Containment, Epoch, FillMethod};
pub use error::{Error, Result};
pub use interval::Interval;
pub use records::Record;
