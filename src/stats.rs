use crate::month::{MonthIndex, N_MONTHS};
use crate::series::Series;
use serde::Serialize;
use std::cmp::Ordering;

/// Direction of a month relative to the month right before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
    Unknown,
}

/// A present value together with the month it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Extreme {
    pub month: MonthIndex,
    pub value: f64,
}

/// Running mean, updated one value at a time.
struct Accumulator {
    n_vals: usize,
    mean: f64,
}

impl Accumulator {
    fn new() -> Self {
        Self {
            n_vals: 0,
            mean: 0.0,
        }
    }

    fn add(&mut self, val: f64) {
        self.n_vals += 1;
        self.mean += (val - self.mean) / self.n_vals as f64;
    }

    fn mean(&self) -> Option<f64> {
        (self.n_vals > 0 && self.mean.is_finite()).then_some(self.mean)
    }
}

/// Arithmetic mean of the present values, `None` if there are none.
pub fn mean(series: &Series) -> Option<f64> {
    let mut acc = Accumulator::new();
    for (_, val) in series.present() {
        acc.add(val);
    }
    acc.mean()
}

/// Signed relative change from the mean of `before` to the mean of `after`,
/// in percent.
///
/// `None` when either mean is missing, the `before` mean is zero or the
/// change does not fit in an `f64`.
pub fn percent_change(before: &Series, after: &Series) -> Option<f64> {
    let mean_before = mean(before)?;
    let mean_after = mean(after)?;
    if mean_before == 0.0 {
        return None;
    }
    let change = (mean_after - mean_before) / mean_before * 100.0;
    change.is_finite().then_some(change)
}

/// Compare the value at `month` with the value of the preceding month only.
///
/// A gap in the preceding month is not bridged with an earlier value.
pub fn trend_at(series: &Series, month: MonthIndex) -> Trend {
    let Some(prev) = month.prev().and_then(|prev| series.get(prev)) else {
        return Trend::Unknown;
    };
    let Some(val) = series.get(month) else {
        return Trend::Unknown;
    };
    match val.partial_cmp(&prev) {
        Some(Ordering::Greater) => Trend::Up,
        Some(Ordering::Less) => Trend::Down,
        Some(Ordering::Equal) => Trend::Stable,
        None => Trend::Unknown,
    }
}

pub fn trends(series: &Series) -> [Trend; N_MONTHS] {
    let mut trends = [Trend::Unknown; N_MONTHS];
    for month in MonthIndex::all() {
        trends[month.get()] = trend_at(series, month);
    }
    trends
}

/// Largest present value; the earliest month wins ties.
pub fn max(series: &Series) -> Option<Extreme> {
    find_extreme(series, |val, best| val > best)
}

/// Smallest present value; the earliest month wins ties.
pub fn min(series: &Series) -> Option<Extreme> {
    find_extreme(series, |val, best| val < best)
}

fn find_extreme(series: &Series, better: impl Fn(f64, f64) -> bool) -> Option<Extreme> {
    series.present().fold(None, |best: Option<Extreme>, (month, value)| match best {
        Some(best) if !better(value, best.value) => Some(best),
        _ => Some(Extreme { month, value }),
    })
}
