use crate::metric::Metric;
use crate::province::slug;
use anyhow::{Context, Result};
use serde_json::Value;
use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

/// Supplier of monthly row sets, one per metric, province and year.
///
/// Rows come back exactly as the backend produced them; turning them into
/// records is left to [`crate::series::records_from_json`].
pub trait DataSource {
    fn monthly_rows(&self, metric: Metric, province: &str, year: u16) -> Result<Value>;
}

/// Row sets stored as JSON files, laid out as
/// `<root>/<metric>/<province slug>-<year>.json`.
pub struct JsonDirSource {
    root: PathBuf,
}

impl JsonDirSource {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn rows_file(&self, metric: Metric, province: &str, year: u16) -> PathBuf {
        self.root
            .join(metric.field())
            .join(format!("{}-{year}.json", slug(province)))
    }
}

impl DataSource for JsonDirSource {
    fn monthly_rows(&self, metric: Metric, province: &str, year: u16) -> Result<Value> {
        let file = self.rows_file(metric, province, year);
        let file = File::open(&file).with_context(|| format!("failed to open {file:?}"))?;
        let reader = BufReader::new(file);

        let rows = serde_json::from_reader(reader).context("failed to deserialize rows")?;

        Ok(rows)
    }
}
