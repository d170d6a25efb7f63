//! Alignment of raw monthly rows into fixed January→December series.

use crate::month::{MonthIndex, N_MONTHS};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Keys a backend row may carry its month name under, in lookup order.
const MONTH_NAME_KEYS: [&str; 3] = ["mois", "month", "monthName"];

/// One monthly row as delivered by a data source.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub month_name: String,
    pub value: Option<f64>,
}

impl RawRecord {
    pub fn new(month_name: impl Into<String>, value: Option<f64>) -> Self {
        Self {
            month_name: month_name.into(),
            value,
        }
    }
}

/// Rows that cannot be read as a sequence of records.
#[derive(Debug, Error, PartialEq)]
pub enum InvalidInput {
    #[error("expected a sequence of records, found {0}")]
    NotASequence(&'static str),

    #[error("item {index} is not a record, found {found}")]
    NotARecord { index: usize, found: &'static str },
}

/// Twelve monthly slots, January first. `None` marks a month without data.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Series([Option<f64>; N_MONTHS]);

impl Series {
    pub fn from_slots(slots: [Option<f64>; N_MONTHS]) -> Self {
        Self(slots)
    }

    pub fn get(&self, month: MonthIndex) -> Option<f64> {
        self.0[month.get()]
    }

    pub fn slots(&self) -> &[Option<f64>; N_MONTHS] {
        &self.0
    }

    /// Present values paired with their month, in calendar order.
    pub fn present(&self) -> impl Iterator<Item = (MonthIndex, f64)> + '_ {
        MonthIndex::all().filter_map(|month| self.get(month).map(|val| (month, val)))
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(Option::is_none)
    }
}

/// Align `records` into a [`Series`].
///
/// Unknown month names are skipped and a later record for the same month
/// replaces an earlier one. Non-finite values count as missing.
pub fn normalize(records: &[RawRecord]) -> Series {
    let mut slots = [None; N_MONTHS];
    for record in records {
        if let Some(month) = MonthIndex::from_name(&record.month_name) {
            slots[month.get()] = record.value.filter(|val| val.is_finite());
        }
    }
    Series::from_slots(slots)
}

/// Decode backend rows into [`RawRecord`]s.
///
/// `rows` must be an array of objects. The value of each row is the first
/// non-null field among `value_keys`; a non-numeric one is kept as missing.
pub fn records_from_json(rows: &Value, value_keys: &[&str]) -> Result<Vec<RawRecord>, InvalidInput> {
    let items = rows
        .as_array()
        .ok_or_else(|| InvalidInput::NotASequence(kind(rows)))?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let fields = item.as_object().ok_or(InvalidInput::NotARecord {
                index,
                found: kind(item),
            })?;

            let month_name = MONTH_NAME_KEYS
                .iter()
                .find_map(|&key| fields.get(key).and_then(Value::as_str))
                .unwrap_or_default();

            let value = value_keys
                .iter()
                .find_map(|&key| fields.get(key).filter(|val| !val.is_null()))
                .and_then(Value::as_f64);

            Ok(RawRecord::new(month_name, value))
        })
        .collect()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
