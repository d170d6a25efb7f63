//! Year-over-year comparison of one metric for one province.

use crate::metric::Metric;
use crate::month::N_MONTHS;
use crate::series::{Series, normalize, records_from_json};
use crate::source::DataSource;
use crate::stats::{self, Extreme, Trend};
use anyhow::{Context, Result};
use serde::Serialize;

/// How a percent change reads for a given metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Increase,
    Decrease,
    Improvement,
    Degradation,
    Unchanged,
}

impl Verdict {
    /// Pollution improves when it goes down; the other metrics are
    /// reported as plain increases and decreases.
    pub fn of(metric: Metric, change: f64) -> Self {
        if change == 0.0 {
            return Verdict::Unchanged;
        }
        match (metric, change > 0.0) {
            (Metric::Pollution, true) => Verdict::Degradation,
            (Metric::Pollution, false) => Verdict::Improvement,
            (_, true) => Verdict::Increase,
            (_, false) => Verdict::Decrease,
        }
    }
}

/// Statistics of a single year.
#[derive(Debug, Serialize)]
pub struct YearSummary {
    pub year: u16,
    pub series: Series,
    pub mean: Option<f64>,
    pub min: Option<Extreme>,
    pub max: Option<Extreme>,
    pub trends: [Trend; N_MONTHS],
}

impl YearSummary {
    pub fn new(year: u16, series: Series) -> Self {
        Self {
            year,
            mean: stats::mean(&series),
            min: stats::min(&series),
            max: stats::max(&series),
            trends: stats::trends(&series),
            series,
        }
    }

    /// Fetch, decode and summarize one year of `metric` for `province`.
    pub fn load(source: &dyn DataSource, metric: Metric, province: &str, year: u16) -> Result<Self> {
        let rows = source
            .monthly_rows(metric, province, year)
            .with_context(|| format!("failed to fetch {metric} rows for {province} in {year}"))?;

        let records = records_from_json(&rows, &metric.value_keys())
            .with_context(|| format!("invalid {metric} rows for {province} in {year}"))?;

        Ok(Self::new(year, normalize(&records)))
    }
}

#[derive(Debug, Serialize)]
pub struct MetricComparison {
    pub metric: Metric,
    pub unit: &'static str,
    pub before: YearSummary,
    pub after: YearSummary,
    pub percent_change: Option<f64>,
    pub verdict: Option<Verdict>,
}

impl MetricComparison {
    pub fn new(metric: Metric, before: YearSummary, after: YearSummary) -> Self {
        let percent_change = stats::percent_change(&before.series, &after.series);
        Self {
            metric,
            unit: metric.unit(),
            percent_change,
            verdict: percent_change.map(|change| Verdict::of(metric, change)),
            before,
            after,
        }
    }
}

pub fn compare(
    source: &dyn DataSource,
    metric: Metric,
    province: &str,
    year_before: u16,
    year_after: u16,
) -> Result<MetricComparison> {
    let before = YearSummary::load(source, metric, province, year_before)?;
    let after = YearSummary::load(source, metric, province, year_after)?;
    Ok(MetricComparison::new(metric, before, after))
}
