use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Measured quantity served by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Temperature,
    Precipitation,
    Pollution,
}

impl Metric {
    /// Column holding this metric in the backend row sets.
    pub fn field(self) -> &'static str {
        match self {
            Metric::Temperature => "temperature",
            Metric::Precipitation => "precipitation",
            Metric::Pollution => "pollution",
        }
    }

    /// Row fields to read the value from, first non-null wins.
    pub fn value_keys(self) -> [&'static str; 2] {
        [self.field(), "value"]
    }

    pub fn unit(self) -> &'static str {
        match self {
            Metric::Temperature => "°C",
            Metric::Precipitation => "mm",
            Metric::Pollution => "AQI",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Metric::Temperature => "Temperatures",
            Metric::Precipitation => "Precipitation",
            Metric::Pollution => "Pollution (AQI)",
        }
    }

    /// Chart line colors for the first and second year.
    pub fn colors(self) -> [&'static str; 2] {
        match self {
            Metric::Temperature => ["#f97316", "#ef4444"],
            Metric::Precipitation => ["#3b82f6", "#06b6d4"],
            Metric::Pollution => ["#8b5cf6", "#ec4899"],
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field())
    }
}
