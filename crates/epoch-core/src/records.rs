//! Record (de)serialization for epoch sets
//!
//! The record form is a flat string-keyed mapping per interval with the
//! canonical `start`, `stop`, `label`, `duration` fields plus any
//! extension columns, suitable for round-tripping through any structured
//! file format via serde.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::epoch::Epoch;
use crate::error::{Error, Result};
use crate::interval::Interval;

/// One serialized interval row
pub type Record = Map<String, Value>;

const RESERVED_FIELDS: [&str; 4] = ["start", "stop", "label", "duration"];

fn require_f64(record: &Record, field: &str) -> Result<f64> {
    let value = record.get(field).ok_or_else(|| Error::missing_field(field))?;
    value
        .as_f64()
        .ok_or_else(|| Error::Validation(format!("Record field `{field}` must be numeric")))
}

impl Epoch {
    /// Serialize to one record per interval, in canonical order
    pub fn to_records(&self) -> Vec<Record> {
        self.intervals()
            .iter()
            .enumerate()
            .map(|(row, iv)| {
                let mut record = Map::new();
                record.insert("start".to_string(), Value::from(iv.start));
                record.insert("stop".to_string(), Value::from(iv.stop));
                record.insert("label".to_string(), Value::from(iv.label.as_str()));
                record.insert("duration".to_string(), Value::from(iv.duration()));
                for (name, col) in self.columns() {
                    record.insert(name.clone(), Value::from(col[row]));
                }
                record
            })
            .collect()
    }

    /// Build from persisted records
    ///
    /// Each record must carry `start`, `stop`, and `label`; anything less
    /// is fatal. A `duration` field is recomputed rather than trusted.
    /// Additional numeric fields become extension columns and must appear
    /// in every record. The result is sorted by start.
    pub fn from_records(records: &[Record]) -> Result<Self> {
        let mut intervals = Vec::with_capacity(records.len());
        let mut columns: BTreeMap<String, Vec<f64>> = BTreeMap::new();
        for record in records {
            let start = require_f64(record, "start")?;
            let stop = require_f64(record, "stop")?;
            let label = record
                .get("label")
                .ok_or_else(|| Error::missing_field("label"))?
                .as_str()
                .ok_or_else(|| Error::Validation("Record field `label` must be a string".into()))?;
            intervals.push(Interval::with_label(start, stop, label));

            for (field, value) in record {
                if RESERVED_FIELDS.contains(&field.as_str()) {
                    continue;
                }
                let v = value.as_f64().ok_or_else(|| {
                    Error::Validation(format!("Record field `{field}` must be numeric"))
                })?;
                columns.entry(field.clone()).or_default().push(v);
            }
        }
        // a column absent from some record shows up as a length mismatch
        Self::with_columns(intervals, columns)
    }
}
