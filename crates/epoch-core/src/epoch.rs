//! The `Epoch` container: an ordered set of labeled time intervals
//!
//! An `Epoch` owns a collection of [`Interval`]s kept sorted by start time.
//! Every operation returns a new value; nothing mutates in place, so a
//! shared `Epoch` is safe to query from multiple threads.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use log::debug;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::interval::Interval;

/// How `fill_blank` distributes the gap between two consecutive epochs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillMethod {
    /// The preceding epoch absorbs the whole gap
    FromLeft,
    /// The following epoch absorbs the whole gap
    FromRight,
    /// Each neighbor absorbs half of the gap
    FromNearest,
}

/// Membership of query times in a non-overlapping epoch set, as returned
/// by [`Epoch::contains`]
#[derive(Debug, Clone, PartialEq)]
pub struct Containment {
    /// For each query time, whether it fell inside some epoch
    pub mask: Vec<bool>,
    /// The query times that fell inside an epoch, in query order
    pub times: Vec<f64>,
    /// Label of the covering epoch, parallel to `times`
    pub labels: Vec<String>,
}

impl Containment {
    /// Number of query times that fell inside an epoch
    pub fn n_inside(&self) -> usize {
        self.times.len()
    }
}

/// An ordered set of labeled time intervals
///
/// The canonical order is sort-by-start (stable; ties keep prior order)
/// and is re-established on every construction. Extension columns are
/// numeric arrays parallel to the intervals; metadata is an arbitrary
/// key-value bag attached at construction and copied through derived
/// operations.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Epoch {
    intervals: Vec<Interval>,
    columns: BTreeMap<String, Vec<f64>>,
    metadata: BTreeMap<String, Value>,
}

impl Epoch {
    /// Gap below which `merge_neighbors` treats two same-label epochs as
    /// touching
    pub const NEIGHBOR_GAP_TOLERANCE: f64 = 1e-6;

    /// Create an epoch set from intervals, re-sorting by start
    pub fn new(intervals: Vec<Interval>) -> Result<Self> {
        Self::with_columns(intervals, BTreeMap::new())
    }

    /// Create an epoch set with extension columns parallel to the intervals
    pub(crate) fn with_columns(
        intervals: Vec<Interval>,
        columns: BTreeMap<String, Vec<f64>>,
    ) -> Result<Self> {
        for iv in &intervals {
            if !iv.is_valid() {
                return Err(Error::inverted_interval(iv.start, iv.stop));
            }
        }
        for (name, col) in &columns {
            if col.len() != intervals.len() {
                return Err(Error::length_mismatch(
                    intervals.len(),
                    col.len(),
                    &format!("column `{name}`"),
                ));
            }
        }
        let mut epoch = Self {
            intervals,
            columns,
            metadata: BTreeMap::new(),
        };
        epoch.sort_canonical();
        Ok(epoch)
    }

    /// Build from parallel start/stop arrays; labels default to empty
    pub fn from_arrays(starts: &[f64], stops: &[f64]) -> Result<Self> {
        if starts.len() != stops.len() {
            return Err(Error::length_mismatch(starts.len(), stops.len(), "from_arrays"));
        }
        let intervals = starts
            .iter()
            .zip(stops)
            .map(|(&start, &stop)| Interval::new(start, stop))
            .collect();
        Self::new(intervals)
    }

    /// Build from parallel start/stop/label arrays
    pub fn from_arrays_with_labels<S: AsRef<str>>(
        starts: &[f64],
        stops: &[f64],
        labels: &[S],
    ) -> Result<Self> {
        if starts.len() != stops.len() {
            return Err(Error::length_mismatch(starts.len(), stops.len(), "from_arrays"));
        }
        if labels.len() != starts.len() {
            return Err(Error::length_mismatch(
                starts.len(),
                labels.len(),
                "from_arrays labels",
            ));
        }
        let intervals = starts
            .iter()
            .zip(stops)
            .zip(labels)
            .map(|((&start, &stop), label)| Interval::with_label(start, stop, label.as_ref()))
            .collect();
        Self::new(intervals)
    }

    /// Attach a metadata mapping, replacing any existing one
    pub fn with_metadata(mut self, metadata: BTreeMap<String, Value>) -> Self {
        self.metadata = metadata;
        self
    }

    /// Metadata attached at construction
    pub fn metadata(&self) -> &BTreeMap<String, Value> {
        &self.metadata
    }

    fn sort_canonical(&mut self) {
        let mut order: Vec<usize> = (0..self.intervals.len()).collect();
        order.sort_by(|&a, &b| {
            self.intervals[a]
                .start
                .partial_cmp(&self.intervals[b].start)
                .unwrap_or(Ordering::Equal)
        });
        if order.iter().enumerate().all(|(i, &j)| i == j) {
            return;
        }
        self.intervals = order.iter().map(|&i| self.intervals[i].clone()).collect();
        for col in self.columns.values_mut() {
            *col = order.iter().map(|&i| col[i]).collect();
        }
    }

    // ---- read-only views -------------------------------------------------

    /// Start times in canonical order
    pub fn starts(&self) -> Vec<f64> {
        self.intervals.iter().map(|iv| iv.start).collect()
    }

    /// Stop times in canonical order
    pub fn stops(&self) -> Vec<f64> {
        self.intervals.iter().map(|iv| iv.stop).collect()
    }

    /// Elementwise `stop - start`
    pub fn durations(&self) -> Vec<f64> {
        self.intervals.iter().map(|iv| iv.duration()).collect()
    }

    /// Labels in canonical order
    pub fn labels(&self) -> Vec<&str> {
        self.intervals.iter().map(|iv| iv.label.as_str()).collect()
    }

    /// Number of intervals in the set
    pub fn n_intervals(&self) -> usize {
        self.intervals.len()
    }

    /// Alias for [`Epoch::n_intervals`]
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Check if the set holds no intervals
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// The intervals in canonical order
    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    /// The interval at a canonical-order index
    pub fn get(&self, index: usize) -> Option<&Interval> {
        self.intervals.get(index)
    }

    /// Iterate intervals in canonical order
    pub fn iter(&self) -> impl Iterator<Item = &Interval> {
        self.intervals.iter()
    }

    /// Start/stop pairs in canonical order
    pub fn spans(&self) -> Vec<(f64, f64)> {
        self.intervals.iter().map(|iv| (iv.start, iv.stop)).collect()
    }

    /// Alternating starts and stops as one sequence
    ///
    /// Monotonically non-decreasing only when the set is non-overlapping.
    pub fn flatten(&self) -> Vec<f64> {
        let mut flat = Vec::with_capacity(self.intervals.len() * 2);
        for iv in &self.intervals {
            flat.push(iv.start);
            flat.push(iv.stop);
        }
        flat
    }

    /// Sorted, deduplicated labels
    pub fn unique_labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = self.intervals.iter().map(|iv| iv.label.clone()).collect();
        labels.sort();
        labels.dedup();
        labels
    }

    /// Check if every interval carries a non-empty label
    pub fn has_labels(&self) -> bool {
        self.intervals.iter().all(|iv| !iv.label.is_empty())
    }

    /// Check if no label repeats
    pub fn is_labels_unique(&self) -> bool {
        self.unique_labels().len() == self.intervals.len()
    }

    /// An extension column by name
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    /// Names of the extension columns
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.keys().map(String::as_str).collect()
    }

    pub(crate) fn columns(&self) -> &BTreeMap<String, Vec<f64>> {
        &self.columns
    }

    // ---- label and column transforms -------------------------------------

    /// Replace every label, returning a new set
    pub fn set_labels<S: AsRef<str>>(&self, labels: &[S]) -> Result<Self> {
        if labels.len() != self.intervals.len() {
            return Err(Error::length_mismatch(
                self.intervals.len(),
                labels.len(),
                "set_labels",
            ));
        }
        let mut out = self.clone();
        for (iv, label) in out.intervals.iter_mut().zip(labels) {
            iv.label = label.as_ref().to_string();
        }
        Ok(out)
    }

    /// Attach an extension column, returning a new set
    pub fn add_column(&self, name: &str, values: &[f64]) -> Result<Self> {
        if matches!(name, "start" | "stop" | "label" | "duration") {
            return Err(Error::Validation(format!(
                "`{name}` is a reserved column name"
            )));
        }
        if values.len() != self.intervals.len() {
            return Err(Error::length_mismatch(
                self.intervals.len(),
                values.len(),
                &format!("column `{name}`"),
            ));
        }
        let mut out = self.clone();
        out.columns.insert(name.to_string(), values.to_vec());
        Ok(out)
    }

    // ---- algebra ---------------------------------------------------------

    /// Union with another epoch set, re-sorted by start
    ///
    /// Extension columns survive only when both sets carry the same column
    /// names; otherwise the result keeps the canonical schema alone. The
    /// left operand's metadata is kept.
    pub fn concatenate(&self, other: &Epoch) -> Result<Self> {
        let mut intervals = self.intervals.clone();
        intervals.extend(other.intervals.iter().cloned());

        let columns = if self.column_names() == other.column_names() {
            let mut columns = BTreeMap::new();
            for (name, col) in &self.columns {
                let mut merged = col.clone();
                merged.extend(other.columns[name].iter().copied());
                columns.insert(name.clone(), merged);
            }
            columns
        } else {
            debug!("concatenate: column sets differ, dropping extension columns");
            BTreeMap::new()
        };

        Ok(Self::with_columns(intervals, columns)?.with_metadata(self.metadata.clone()))
    }

    /// Translate every interval by `dt`
    pub fn shift(&self, dt: f64) -> Self {
        let mut out = self.clone();
        for iv in &mut out.intervals {
            iv.start += dt;
            iv.stop += dt;
        }
        out
    }

    /// Default a window bound to the set's own extent
    fn window_bounds(
        &self,
        t_start: Option<f64>,
        t_stop: Option<f64>,
        operation: &str,
    ) -> Result<(f64, f64)> {
        if (t_start.is_none() || t_stop.is_none()) && self.is_empty() {
            return Err(Error::empty_epoch(operation));
        }
        let t_start = match t_start {
            Some(t) => t,
            None => self.intervals[0].start,
        };
        let t_stop = match t_stop {
            Some(t) => t,
            None => self
                .intervals
                .iter()
                .map(|iv| iv.stop)
                .fold(f64::NEG_INFINITY, f64::max),
        };
        if t_start > t_stop {
            return Err(Error::Validation(format!(
                "{operation} window start {t_start} exceeds its stop {t_stop}"
            )));
        }
        Ok((t_start, t_stop))
    }

    /// Keep intervals selected by a canonical-order mask, with their
    /// column rows
    fn filtered(&self, keep: impl Fn(usize, &Interval) -> bool) -> Self {
        let mask: Vec<bool> = self
            .intervals
            .iter()
            .enumerate()
            .map(|(i, iv)| keep(i, iv))
            .collect();
        let intervals = self
            .intervals
            .iter()
            .zip(&mask)
            .filter(|(_, &m)| m)
            .map(|(iv, _)| iv.clone())
            .collect();
        let columns = self
            .columns
            .iter()
            .map(|(name, col)| {
                let kept = col
                    .iter()
                    .zip(&mask)
                    .filter(|(_, &m)| m)
                    .map(|(&v, _)| v)
                    .collect();
                (name.clone(), kept)
            })
            .collect();
        Self {
            intervals,
            columns,
            metadata: self.metadata.clone(),
        }
    }

    /// Restrict to a time window
    ///
    /// In strict mode only intervals lying fully inside `[t_start, t_stop]`
    /// survive. Otherwise any interval overlapping the window is kept and
    /// clamped to it. Omitted bounds default to the set's first start and
    /// last stop, which is undefined on an empty set.
    pub fn time_slice(
        &self,
        t_start: Option<f64>,
        t_stop: Option<f64>,
        strict: bool,
    ) -> Result<Self> {
        let (t_start, t_stop) = self.window_bounds(t_start, t_stop, "time_slice")?;

        if strict {
            return Ok(self.filtered(|_, iv| iv.start >= t_start && iv.stop <= t_stop));
        }

        let mut out = self.filtered(|_, iv| iv.start <= t_stop && iv.stop >= t_start);
        for iv in &mut out.intervals {
            iv.start = iv.start.max(t_start);
            iv.stop = iv.stop.min(t_stop);
        }
        Ok(out)
    }

    /// Keep intervals whose duration lies in `[min_dur, max_dur]`
    ///
    /// A missing bound defaults to the observed minimum/maximum duration,
    /// making that side a no-op filter.
    pub fn duration_slice(&self, min_dur: Option<f64>, max_dur: Option<f64>) -> Self {
        if self.is_empty() {
            return self.clone();
        }
        let durations = self.durations();
        let lo = min_dur.unwrap_or_else(|| durations.iter().copied().fold(f64::INFINITY, f64::min));
        let hi = max_dur
            .unwrap_or_else(|| durations.iter().copied().fold(f64::NEG_INFINITY, f64::max));
        self.filtered(|i, _| durations[i] >= lo && durations[i] <= hi)
    }

    /// Keep intervals whose label is in the given set
    pub fn label_slice<S: AsRef<str>>(&self, labels: &[S]) -> Self {
        self.filtered(|_, iv| labels.iter().any(|l| l.as_ref() == iv.label))
    }

    /// Merge intervals separated by less than `dt`, regardless of label
    ///
    /// A single left-to-right pass: each interval fuses into the growing
    /// merged span when its gap to that span is below `dt`, so a chain of
    /// mutually-close intervals collapses into one. Labels and extension
    /// columns do not survive merging.
    pub fn merge(&self, dt: f64) -> Self {
        let mut merged: Vec<Interval> = Vec::with_capacity(self.intervals.len());
        for iv in &self.intervals {
            match merged.last_mut() {
                Some(last) if iv.start - last.stop < dt => {
                    last.start = last.start.min(iv.start);
                    last.stop = last.stop.max(iv.stop);
                }
                _ => merged.push(Interval::new(iv.start, iv.stop)),
            }
        }
        debug!("merge({dt}): {} -> {} intervals", self.len(), merged.len());
        Self {
            intervals: merged,
            columns: BTreeMap::new(),
            metadata: self.metadata.clone(),
        }
    }

    /// Merge same-label neighbors whose gap is below
    /// [`Epoch::NEIGHBOR_GAP_TOLERANCE`]
    ///
    /// Unlike [`Epoch::merge`] this closes exact or near-zero gaps between
    /// runs of the same category rather than bridging arbitrary nearby
    /// intervals.
    pub fn merge_neighbors(&self) -> Self {
        self.merge_neighbors_within(Self::NEIGHBOR_GAP_TOLERANCE)
    }

    /// Merge same-label neighbors with an explicit gap tolerance
    pub fn merge_neighbors_within(&self, tolerance: f64) -> Self {
        let mut merged: Vec<Interval> = Vec::with_capacity(self.intervals.len());
        for iv in &self.intervals {
            if let Some(prev) = merged.iter_mut().rev().find(|p| p.label == iv.label) {
                if iv.start - prev.stop < tolerance {
                    prev.start = prev.start.min(iv.start);
                    prev.stop = prev.stop.max(iv.stop);
                    continue;
                }
            }
            merged.push(iv.clone());
        }
        Self {
            intervals: merged,
            columns: BTreeMap::new(),
            metadata: self.metadata.clone(),
        }
    }

    /// Close every internal gap by moving neighboring boundaries
    ///
    /// Total span is preserved; only internal boundaries move. Labels,
    /// columns, and metadata copy through.
    pub fn fill_blank(&self, method: FillMethod) -> Self {
        let mut out = self.clone();
        for i in 1..out.intervals.len() {
            let gap = out.intervals[i].start - out.intervals[i - 1].stop;
            if gap <= 0.0 {
                continue;
            }
            match method {
                FillMethod::FromLeft => out.intervals[i - 1].stop = out.intervals[i].start,
                FillMethod::FromRight => out.intervals[i].start = out.intervals[i - 1].stop,
                FillMethod::FromNearest => {
                    let mid = 0.5 * (out.intervals[i - 1].stop + out.intervals[i].start);
                    out.intervals[i - 1].stop = mid;
                    out.intervals[i].start = mid;
                }
            }
        }
        out
    }

    /// Remove the time range `[t1, t2]` from the set
    ///
    /// Intervals fully inside the window are dropped, stragglers are
    /// truncated at the window edge, and an interval spanning the whole
    /// window splits in two. Column rows follow their interval; a split
    /// interval's row lands in both halves.
    pub fn delete_in_between(&self, t1: f64, t2: f64) -> Result<Self> {
        if t1 > t2 {
            return Err(Error::Validation(format!(
                "delete_in_between window start {t1} exceeds its stop {t2}"
            )));
        }
        let mut intervals = Vec::with_capacity(self.intervals.len());
        let mut columns: BTreeMap<String, Vec<f64>> = self
            .columns
            .keys()
            .map(|name| (name.clone(), Vec::new()))
            .collect();
        // split halves rejoin after all truncated/kept rows, so the
        // stable re-sort places them last among equal starts
        let mut split_halves: Vec<(Interval, usize)> = Vec::new();
        let push = |intervals: &mut Vec<Interval>,
                        columns: &mut BTreeMap<String, Vec<f64>>,
                        iv: Interval,
                        row: usize| {
            intervals.push(iv);
            for (name, col) in columns.iter_mut() {
                col.push(self.columns[name][row]);
            }
        };
        for (row, iv) in self.intervals.iter().enumerate() {
            if iv.start >= t1 && iv.stop <= t2 {
                // fully inside the deleted range
                continue;
            }
            if iv.start < t1 && iv.stop > t2 {
                // spans the whole range: split
                split_halves.push((Interval::with_label(iv.start, t1, iv.label.clone()), row));
                split_halves.push((Interval::with_label(t2, iv.stop, iv.label.clone()), row));
            } else if iv.start < t1 && iv.stop > t1 {
                push(
                    &mut intervals,
                    &mut columns,
                    Interval::with_label(iv.start, t1, iv.label.clone()),
                    row,
                );
            } else if iv.start > t1 && iv.start <= t2 && iv.stop > t2 {
                push(
                    &mut intervals,
                    &mut columns,
                    Interval::with_label(t2, iv.stop, iv.label.clone()),
                    row,
                );
            } else {
                push(&mut intervals, &mut columns, iv.clone(), row);
            }
        }
        for (half, row) in split_halves {
            push(&mut intervals, &mut columns, half, row);
        }
        Ok(Self::with_columns(intervals, columns)?.with_metadata(self.metadata.clone()))
    }

    // ---- queries ---------------------------------------------------------

    /// Check whether any interval starts before its predecessor stops
    ///
    /// Empty and single-interval sets are never overlapping.
    pub fn is_overlapping(&self) -> bool {
        self.intervals.windows(2).any(|w| w[1].start < w[0].stop)
    }

    /// Locate query times within a non-overlapping epoch set
    ///
    /// Buckets each query time against the flattened boundary sequence;
    /// odd buckets are inside an interval, with half-open `[start, stop)`
    /// semantics. Fails when the set overlaps.
    pub fn contains(&self, ts: &[f64]) -> Result<Containment> {
        if self.is_overlapping() {
            return Err(Error::overlapping("contains"));
        }
        let edges = self.flatten();
        let mut mask = Vec::with_capacity(ts.len());
        let mut times = Vec::new();
        let mut labels = Vec::new();
        for &t in ts {
            let bucket = edges.partition_point(|&e| e <= t);
            if bucket % 2 == 1 {
                mask.push(true);
                times.push(t);
                labels.push(self.intervals[(bucket - 1) / 2].label.clone());
            } else {
                mask.push(false);
            }
        }
        Ok(Containment { mask, times, labels })
    }

    /// Fraction of the window `[t_start, t_stop]` covered by each label
    ///
    /// Intervals straddling the window edge earn clamped partial credit.
    /// Every label ever seen in the set appears in the result, defaulting
    /// to zero.
    pub fn proportion_by_label(
        &self,
        t_start: Option<f64>,
        t_stop: Option<f64>,
    ) -> Result<BTreeMap<String, f64>> {
        let (t_start, t_stop) = self.window_bounds(t_start, t_stop, "proportion_by_label")?;
        let mut proportions: BTreeMap<String, f64> = self
            .unique_labels()
            .into_iter()
            .map(|label| (label, 0.0))
            .collect();
        let window = t_stop - t_start;
        if window <= 0.0 {
            return Ok(proportions);
        }
        for iv in &self.intervals {
            if iv.stop <= t_start || iv.start >= t_stop {
                continue;
            }
            let credit = iv.stop.min(t_stop) - iv.start.max(t_start);
            *proportions.entry(iv.label.clone()).or_insert(0.0) += credit / window;
        }
        Ok(proportions)
    }

    /// Total duration per label over the whole set
    pub fn durations_by_label(&self) -> BTreeMap<String, f64> {
        let mut totals = BTreeMap::new();
        for iv in &self.intervals {
            *totals.entry(iv.label.clone()).or_insert(0.0) += iv.duration();
        }
        totals
    }

    /// Histogram of interval midpoints into fixed-width bins
    ///
    /// `t_start` defaults to zero, `t_stop` to the last stop; an empty set
    /// with a defaulted `t_stop` yields an empty histogram.
    pub fn count(&self, t_start: Option<f64>, t_stop: Option<f64>, binsize: f64) -> Result<Vec<usize>> {
        if binsize <= 0.0 {
            return Err(Error::Configuration(format!(
                "count binsize must be positive, got {binsize}"
            )));
        }
        let t_start = t_start.unwrap_or(0.0);
        let t_stop = match t_stop {
            Some(t) => t,
            None if self.is_empty() => return Ok(Vec::new()),
            None => self
                .intervals
                .iter()
                .map(|iv| iv.stop)
                .fold(f64::NEG_INFINITY, f64::max),
        };

        let mut edges = Vec::new();
        loop {
            let edge = t_start + binsize * edges.len() as f64;
            if edge >= t_stop + binsize {
                break;
            }
            edges.push(edge);
        }
        if edges.len() < 2 {
            return Ok(Vec::new());
        }

        let n_bins = edges.len() - 1;
        let mut counts = vec![0usize; n_bins];
        for iv in &self.intervals {
            let mid = iv.start + iv.duration() / 2.0;
            if mid < edges[0] || mid > edges[n_bins] {
                continue;
            }
            // the final bin is closed on the right
            let bin = (edges.partition_point(|&e| e <= mid) - 1).min(n_bins - 1);
            counts[bin] += 1;
        }
        Ok(counts)
    }

    /// Boolean mask over query times marking membership in any interval
    ///
    /// Inclusive `[start, stop]` bounds, unlike [`Epoch::contains`].
    pub fn get_indices_for_time(&self, ts: &[f64]) -> Vec<bool> {
        ts.iter()
            .map(|&t| self.intervals.iter().any(|iv| iv.contains(t)))
            .collect()
    }
}

impl fmt::Display for Epoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "Epoch(0 intervals)");
        }
        let last_stop = self
            .intervals
            .iter()
            .map(|iv| iv.stop)
            .fold(f64::NEG_INFINITY, f64::max);
        write!(
            f,
            "Epoch({} intervals, span=[{:.3}, {:.3}])",
            self.len(),
            self.intervals[0].start,
            last_stop
        )
    }
}
