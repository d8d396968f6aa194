//! CSV Data Loader Module
//! Reads the survey CSV with Polars and turns each row into a `DataPoint`.

use crate::data::Metric;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Columns that must be present in the header row.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "state",
    "abbr",
    "poverty",
    "age",
    "income",
    "healthcare",
    "smokes",
    "obesity",
];

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Missing column: {0}")]
    MissingColumn(String),
    #[error("No data loaded")]
    NoData,
}

/// One row of the survey: a geographic region and its six metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct DataPoint {
    pub state: String,
    pub abbr: String,
    pub poverty: f64,
    pub age: f64,
    pub income: f64,
    pub healthcare: f64,
    pub smokes: f64,
    pub obesity: f64,
}

impl DataPoint {
    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Poverty => self.poverty,
            Metric::Age => self.age,
            Metric::Income => self.income,
            Metric::Healthcare => self.healthcare,
            Metric::Smokes => self.smokes,
            Metric::Obesity => self.obesity,
        }
    }
}

/// Handles CSV file loading with Polars.
pub struct DataLoader {
    points: Vec<DataPoint>,
    file_path: Option<PathBuf>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            file_path: None,
        }
    }

    /// Read a CSV file into data points without touching loader state.
    ///
    /// Unparseable numeric cells become NaN rather than failing the load.
    pub fn read_points(file_path: &Path) -> Result<Vec<DataPoint>, LoaderError> {
        let df = LazyCsvReader::new(file_path)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        Self::points_from_dataframe(&df)
    }

    /// Convert a loaded DataFrame into data points.
    pub fn points_from_dataframe(df: &DataFrame) -> Result<Vec<DataPoint>, LoaderError> {
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        if let Some(missing) = REQUIRED_COLUMNS
            .iter()
            .find(|required| !names.iter().any(|n| n == *required))
        {
            return Err(LoaderError::MissingColumn(missing.to_string()));
        }

        if df.height() == 0 {
            return Err(LoaderError::NoData);
        }

        let states = Self::text_column(df, "state")?;
        let abbrs = Self::text_column(df, "abbr")?;

        let mut metrics: Vec<Vec<f64>> = Vec::with_capacity(Metric::ALL.len());
        for metric in Metric::ALL {
            metrics.push(Self::float_column(df, metric.column())?);
        }

        let points = (0..df.height())
            .map(|i| DataPoint {
                state: states[i].clone(),
                abbr: abbrs[i].clone(),
                poverty: metrics[0][i],
                age: metrics[1][i],
                income: metrics[2][i],
                healthcare: metrics[3][i],
                smokes: metrics[4][i],
                obesity: metrics[5][i],
            })
            .collect();

        Ok(points)
    }

    fn text_column(df: &DataFrame, name: &str) -> Result<Vec<String>, LoaderError> {
        let column = df.column(name)?.cast(&DataType::String)?;
        let ca = column.str()?;
        Ok((0..df.height())
            .map(|i| ca.get(i).unwrap_or_default().trim().to_string())
            .collect())
    }

    fn float_column(df: &DataFrame, name: &str) -> Result<Vec<f64>, LoaderError> {
        let column = df.column(name)?.cast(&DataType::Float64)?;
        let ca = column.f64()?;
        Ok((0..df.height())
            .map(|i| ca.get(i).unwrap_or(f64::NAN))
            .collect())
    }

    /// Get the number of loaded rows.
    pub fn get_row_count(&self) -> usize {
        self.points.len()
    }

    /// Get file path.
    pub fn get_file_path(&self) -> Option<&PathBuf> {
        self.file_path.as_ref()
    }

    /// Set rows directly (used for async loading)
    pub fn set_points(&mut self, file_path: PathBuf, points: Vec<DataPoint>) {
        self.file_path = Some(file_path);
        self.points = points;
    }
}
