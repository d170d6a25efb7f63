//! Canonical calendar used to align monthly rows.

use crate::text::fold;
use serde::{Serialize, Serializer};
use std::{collections::HashMap, fmt, sync::LazyLock};

/// Number of slots in a monthly series.
pub const N_MONTHS: usize = 12;

/// Folded month names, January first, as the backend spells them.
pub const MONTH_KEYS: [&str; N_MONTHS] = [
    "janvier",
    "fevrier",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "aout",
    "septembre",
    "octobre",
    "novembre",
    "decembre",
];

/// Short display labels, January first.
pub const MONTH_LABELS: [&str; N_MONTHS] = [
    "Jan", "Fév", "Mar", "Avr", "Mai", "Jun", "Jul", "Aoû", "Sep", "Oct", "Nov", "Déc",
];

static KEY_TO_INDEX: LazyLock<HashMap<&'static str, MonthIndex>> = LazyLock::new(|| {
    MONTH_KEYS
        .iter()
        .enumerate()
        .map(|(idx, &key)| (key, MonthIndex(idx)))
        .collect()
});

/// Position of a month in a series (January = 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthIndex(usize);

impl MonthIndex {
    /// Returns `None` unless `idx` is in `0..12`.
    pub fn new(idx: usize) -> Option<Self> {
        (idx < N_MONTHS).then_some(Self(idx))
    }

    /// Match a free-text month name, ignoring case, accents and
    /// surrounding whitespace.
    pub fn from_name(name: &str) -> Option<Self> {
        KEY_TO_INDEX.get(fold(name).as_str()).copied()
    }

    pub fn all() -> impl Iterator<Item = Self> {
        (0..N_MONTHS).map(Self)
    }

    pub fn get(self) -> usize {
        self.0
    }

    /// The preceding month, `None` for January.
    pub fn prev(self) -> Option<Self> {
        self.0.checked_sub(1).and_then(Self::new)
    }

    pub fn key(self) -> &'static str {
        MONTH_KEYS[self.0]
    }

    pub fn label(self) -> &'static str {
        MONTH_LABELS[self.0]
    }
}

impl fmt::Display for MonthIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for MonthIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}
