use crate::chart::{self, Line};
use crate::compare::{self, MetricComparison, YearSummary};
use crate::config::Config;
use crate::metric::Metric;
use crate::month::MonthIndex;
use crate::province;
use crate::source::{DataSource, JsonDirSource};
use crate::stats::Trend;
use anyhow::{Context, Result};
use glob::glob;
use serde::Serialize;
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

pub struct Manager {
    data_dir: PathBuf,
    cfg: Config,
    source: Box<dyn DataSource>,
}

impl Manager {
    /// Load `<data_dir>/config.toml` and read row sets from `<data_dir>/series`.
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        let source = Box::new(JsonDirSource::new(data_dir.join("series")));
        Self::with_source(data_dir, source)
    }

    pub fn with_source<P: AsRef<Path>>(data_dir: P, source: Box<dyn DataSource>) -> Result<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();

        let cfg =
            Config::from_file(data_dir.join("config.toml")).context("failed to construct cfg")?;
        log::info!("{cfg:#?}");

        Ok(Self {
            data_dir,
            cfg,
            source,
        })
    }

    pub fn run_comparison(&self) -> Result<()> {
        let cmp_cfg = &self.cfg.comparison;
        let province = province::resolve(&cmp_cfg.province);
        let (year_before, year_after) = (cmp_cfg.year_before, cmp_cfg.year_after);
        log::info!("comparing {year_before} with {year_after} for {province}");

        self.create_results_dir()?;

        let mut comparisons = Vec::with_capacity(cmp_cfg.metrics.len());
        for &metric in &cmp_cfg.metrics {
            let cmp = compare::compare(
                self.source.as_ref(),
                metric,
                &province,
                year_before,
                year_after,
            )
            .with_context(|| format!("failed to compare {metric}"))?;
            for summary in [&cmp.before, &cmp.after] {
                if summary.series.is_empty() {
                    log::warn!("no {metric} data matched for {}", summary.year);
                }
            }
            log_comparison(&cmp);

            if self.cfg.output.charts {
                self.save_chart(&cmp, &province)
                    .with_context(|| format!("failed to save {metric} chart"))?;
            }
            comparisons.push(cmp);
        }

        let report = ComparisonReport {
            province: &province,
            year_before,
            year_after,
            metrics: &comparisons,
        };
        let file = self.results_dir().join(format!(
            "comparison-{}-{year_before}-{year_after}.json",
            province::slug(&province)
        ));
        save_json(&file, &report).context("failed to save comparison")?;
        log::info!("saved {file:?}");

        Ok(())
    }

    pub fn run_detail(&self, metric: Metric, year: u16, province: Option<&str>) -> Result<()> {
        let province = province::resolve(province.unwrap_or(&self.cfg.comparison.province));

        self.create_results_dir()?;

        let summary = YearSummary::load(self.source.as_ref(), metric, &province, year)
            .context("failed to load year")?;

        log::info!("{} in {province}, {year}", metric.title());
        if summary.series.is_empty() {
            log::warn!("no month of {year} matched any data");
        }
        for month in MonthIndex::all() {
            let trend = summary.trends[month.get()];
            log::info!(
                "{:>4}: {:>10} {}",
                month.label(),
                fmt_value(summary.series.get(month), metric.unit()),
                trend_arrow(trend)
            );
        }
        log::info!("mean: {}", fmt_value(summary.mean, metric.unit()));
        if let (Some(min), Some(max)) = (summary.min, summary.max) {
            log::info!(
                "min: {} ({}), max: {} ({})",
                fmt_value(Some(min.value), metric.unit()),
                min.month,
                fmt_value(Some(max.value), metric.unit()),
                max.month
            );
        }

        let file = self.results_dir().join(format!(
            "detail-{metric}-{}-{year}.json",
            province::slug(&province)
        ));
        save_json(&file, &summary).context("failed to save detail")?;
        log::info!("saved {file:?}");

        Ok(())
    }

    pub fn clean_results(&self) -> Result<()> {
        let results_dir = self.results_dir();
        if !results_dir.is_dir() {
            log::info!("nothing to clean");
            return Ok(());
        }

        for pattern in ["*.json", "*.svg"] {
            let pattern = results_dir.join(pattern);
            let pattern = pattern.to_str().context("pattern is not valid UTF-8")?;
            for file in glob(pattern)
                .context("failed to glob result files")?
                .filter_map(Result::ok)
            {
                fs::remove_file(&file).with_context(|| format!("failed to remove {file:?}"))?;
                log::info!("removed {file:?}");
            }
        }

        fs::remove_dir(&results_dir)
            .with_context(|| format!("failed to remove {results_dir:?}"))?;

        Ok(())
    }

    fn save_chart(&self, cmp: &MetricComparison, province: &str) -> Result<()> {
        let metric = cmp.metric;
        let [color_before, color_after] = metric.colors();
        let title = format!(
            "{} {} vs {}",
            metric.title(),
            cmp.before.year,
            cmp.after.year
        );
        let svg = chart::render_svg(
            &title,
            metric.unit(),
            &[
                Line {
                    series: &cmp.before.series,
                    color: color_before,
                },
                Line {
                    series: &cmp.after.series,
                    color: color_after,
                },
            ],
        )
        .context("failed to render chart")?;

        let file = self.results_dir().join(format!(
            "{metric}-{}-{}-{}.svg",
            province::slug(province),
            cmp.before.year,
            cmp.after.year
        ));
        fs::write(&file, svg).with_context(|| format!("failed to write {file:?}"))?;
        log::info!("saved {file:?}");

        Ok(())
    }

    fn create_results_dir(&self) -> Result<()> {
        let results_dir = self.results_dir();
        fs::create_dir_all(&results_dir)
            .with_context(|| format!("failed to create {results_dir:?}"))
    }

    fn results_dir(&self) -> PathBuf {
        self.data_dir.join("results")
    }
}

#[derive(Serialize)]
struct ComparisonReport<'a> {
    province: &'a str,
    year_before: u16,
    year_after: u16,
    metrics: &'a [MetricComparison],
}

fn save_json<T: Serialize>(file: &Path, value: &T) -> Result<()> {
    let handle = File::create(file).with_context(|| format!("failed to create {file:?}"))?;
    let mut writer = BufWriter::new(handle);
    serde_json::to_writer_pretty(&mut writer, value).context("failed to serialize report")?;
    writer.flush().context("failed to flush writer stream")?;
    Ok(())
}

fn log_comparison(cmp: &MetricComparison) {
    let unit = cmp.unit;
    let change = match cmp.percent_change {
        Some(change) => format!("{change:+.1}%"),
        None => "—".to_string(),
    };
    let verdict = match cmp.verdict {
        Some(verdict) => format!("{verdict:?}").to_lowercase(),
        None => "—".to_string(),
    };
    log::info!(
        "{}: {} {} -> {} {} ({change}, {verdict})",
        cmp.metric.title(),
        cmp.before.year,
        fmt_value(cmp.before.mean, unit),
        cmp.after.year,
        fmt_value(cmp.after.mean, unit),
    );
}

fn fmt_value(val: Option<f64>, unit: &str) -> String {
    match val {
        Some(val) => format!("{val:.1} {unit}"),
        None => "—".to_string(),
    }
}

fn trend_arrow(trend: Trend) -> &'static str {
    match trend {
        Trend::Up => "↑",
        Trend::Down => "↓",
        Trend::Stable => "→",
        Trend::Unknown => "",
    }
}
