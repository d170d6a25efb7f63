use crate::metric::Metric;
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fmt::Debug, fs, ops::RangeBounds, path::Path};

/// Dashboard configuration.
///
/// Loaded from a TOML file and validated before use.
/// See [`Config::from_file`] for loading.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Which province, years and metrics to compare.
    pub comparison: ComparisonConfig,

    /// What to write besides the JSON reports.
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComparisonConfig {
    /// Province code (`QC`) or name (`Québec`).
    pub province: String,

    /// Baseline year.
    pub year_before: u16,
    /// Year compared against the baseline.
    pub year_after: u16,

    /// Metrics to compare, in report order.
    pub metrics: Vec<Metric>,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Write one SVG chart per metric.
    pub charts: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { charts: true }
    }
}

impl Config {
    /// Load a [`Config`] from a file.
    ///
    /// The file must be TOML-encoded and contain a serialized [`Config`].
    /// Performs validation on all parameters before returning.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, deserialized,
    /// or if the configuration values are invalid.
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();
        let contents =
            fs::read_to_string(file).with_context(|| format!("failed to read {file:?}"))?;

        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents).context("failed to deserialize config")?;

        config.validate().context("failed to validate config")?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let cmp = &self.comparison;

        if cmp.province.trim().is_empty() {
            bail!("province must not be empty");
        }

        check_num(cmp.year_before, 1800..=2200).context("invalid baseline year")?;
        check_num(cmp.year_after, 1800..=2200).context("invalid comparison year")?;

        check_num(cmp.metrics.len(), 1..).context("invalid number of metrics")?;
        let mut seen = HashSet::new();
        if let Some(metric) = cmp.metrics.iter().find(|&&metric| !seen.insert(metric)) {
            bail!("metric {metric} is listed more than once");
        }

        Ok(())
    }
}

fn check_num<T, R>(num: T, range: R) -> Result<()>
where
    T: PartialOrd + Debug,
    R: RangeBounds<T> + Debug,
{
    if !range.contains(&num) {
        bail!("number must be in the range {range:?}, but is {num:?}");
    }
    Ok(())
}
