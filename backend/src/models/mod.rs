//! Domain models for the RASAR calculation.
//!
//! - [`DescriptorFrame`] - identifier column plus a numeric descriptor matrix
//! - [`CellValue`] - a row identifier (text or number)
//! - [`Method`] - similarity kernel
//! - [`DescriptorType`] - where descriptors come from
//! - [`Metric`] / [`MetricTable`] - the computed read-across descriptors

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RasarError;

// =============================================================================
// Row identifiers
// =============================================================================

/// Identifier of a compound, as found in the first column of a sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Number(f64),
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Number(n) if n.fract() == 0.0 && n.is_finite() => write!(f, "{}", *n as i64),
            CellValue::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

// =============================================================================
// Descriptor frame
// =============================================================================

/// A sheet read with its first column as the row index.
///
/// `values` is row-major: `values[row][column]`. Missing cells are NaN.
/// For a training frame the last column is the response.
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptorFrame {
    pub index_name: String,
    pub ids: Vec<CellValue>,
    pub columns: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl DescriptorFrame {
    pub fn new(
        index_name: impl Into<String>,
        ids: Vec<CellValue>,
        columns: Vec<String>,
        values: Vec<Vec<f64>>,
    ) -> Self {
        Self {
            index_name: index_name.into(),
            ids,
            columns,
            values,
        }
    }

    pub fn n_rows(&self) -> usize {
        self.ids.len()
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    /// No rows, or no columns besides the identifier.
    pub fn is_empty(&self) -> bool {
        self.n_rows() == 0 || self.n_cols() == 0
    }

    /// Values of one column, top to bottom.
    pub fn column(&self, col: usize) -> impl Iterator<Item = f64> + '_ {
        self.values
            .iter()
            .map(move |row| row.get(col).copied().unwrap_or(f64::NAN))
    }

    /// Position of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Split off the last column: `(descriptors, response)`.
    pub fn split_response(&self) -> (DescriptorFrame, Vec<f64>) {
        let keep = self.n_cols().saturating_sub(1);
        let response = match self.n_cols() {
            0 => vec![f64::NAN; self.n_rows()],
            n => self.column(n - 1).collect(),
        };
        (self.select_columns(&(0..keep).collect::<Vec<_>>()), response)
    }

    /// New frame made of the given columns, in the given order.
    pub fn select_columns(&self, cols: &[usize]) -> DescriptorFrame {
        let columns = cols
            .iter()
            .map(|&c| self.columns.get(c).cloned().unwrap_or_default())
            .collect();
        let values = self
            .values
            .iter()
            .map(|row| {
                cols.iter()
                    .map(|&c| row.get(c).copied().unwrap_or(f64::NAN))
                    .collect()
            })
            .collect();
        DescriptorFrame::new(self.index_name.clone(), self.ids.clone(), columns, values)
    }
}

// =============================================================================
// Calculation options
// =============================================================================

/// Pairwise similarity kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Method {
    /// `exp(-Σ(a-b)² / 2)`, sigma = 1.
    #[default]
    #[serde(rename = "Gaussian Kernel")]
    Gaussian,
    /// `exp(-Σ|a-b|)`, gamma = 1.
    #[serde(rename = "Laplacian Kernel")]
    Laplacian,
}

impl Method {
    pub fn label(&self) -> &'static str {
        match self {
            Method::Gaussian => "Gaussian Kernel",
            Method::Laplacian => "Laplacian Kernel",
        }
    }

    /// Similarity of two equally long descriptor vectors.
    pub fn similarity(&self, a: &[f64], b: &[f64]) -> f64 {
        let pairs = a.iter().zip(b);
        match self {
            Method::Gaussian => (-pairs.map(|(x, y)| (x - y).powi(2)).sum::<f64>() / 2.0).exp(),
            Method::Laplacian => (-pairs.map(|(x, y)| (x - y).abs()).sum::<f64>()).exp(),
        }
    }
}

impl FromStr for Method {
    type Err = RasarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Gaussian Kernel" => Ok(Method::Gaussian),
            "Laplacian Kernel" => Ok(Method::Laplacian),
            other => Err(RasarError::UnknownMethod(other.to_string())),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Origin of the descriptor columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DescriptorType {
    /// Descriptors supplied in the uploaded sheets.
    #[default]
    #[serde(rename = "User Defined Descriptors")]
    UserDefined,
    /// A fixed subset computed from SMILES.
    #[serde(rename = "Selected RDKit Descriptors")]
    SelectedRdkit,
    /// Every descriptor computable from SMILES.
    #[serde(rename = "All RDKit Descriptors")]
    AllRdkit,
}

impl DescriptorType {
    pub fn label(&self) -> &'static str {
        match self {
            DescriptorType::UserDefined => "User Defined Descriptors",
            DescriptorType::SelectedRdkit => "Selected RDKit Descriptors",
            DescriptorType::AllRdkit => "All RDKit Descriptors",
        }
    }
}

impl FromStr for DescriptorType {
    type Err = RasarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "User Defined Descriptors" => Ok(DescriptorType::UserDefined),
            "Selected RDKit Descriptors" => Ok(DescriptorType::SelectedRdkit),
            "All RDKit Descriptors" => Ok(DescriptorType::AllRdkit),
            other => Err(RasarError::UnknownDescriptorType(other.to_string())),
        }
    }
}

impl fmt::Display for DescriptorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Results
// =============================================================================

/// One read-across descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    RaFunction,
    SdActivity,
    CvActivity,
    AvgSimilarity,
    SdSimilarity,
    CvSimilarity,
    StandardError,
    MaxPos,
    PosAvgSim,
    MaxNeg,
    NegAvgSim,
    AbsDiff,
    Gm,
    GmAvgSim,
    GmSdSimilarity,
    Sm1,
    Sm2,
}

impl Metric {
    /// Every metric, in output column order.
    pub const ALL: [Metric; 17] = [
        Metric::RaFunction,
        Metric::SdActivity,
        Metric::CvActivity,
        Metric::AvgSimilarity,
        Metric::SdSimilarity,
        Metric::CvSimilarity,
        Metric::StandardError,
        Metric::MaxPos,
        Metric::PosAvgSim,
        Metric::MaxNeg,
        Metric::NegAvgSim,
        Metric::AbsDiff,
        Metric::Gm,
        Metric::GmAvgSim,
        Metric::GmSdSimilarity,
        Metric::Sm1,
        Metric::Sm2,
    ];

    /// Column header.
    pub fn label(&self) -> &'static str {
        match self {
            Metric::RaFunction => "RA_function",
            Metric::SdActivity => "SD_Activity",
            Metric::CvActivity => "CV_Activity",
            Metric::AvgSimilarity => "Avg_similarity",
            Metric::SdSimilarity => "SD_similarity",
            Metric::CvSimilarity => "CV_similarity",
            Metric::StandardError => "Standard_Error (SE)",
            Metric::MaxPos => "MaxPos",
            Metric::PosAvgSim => "PosAvgSim",
            Metric::MaxNeg => "MaxNeg",
            Metric::NegAvgSim => "NegAvgSim",
            Metric::AbsDiff => "AbsDiff",
            Metric::Gm => "gm",
            Metric::GmAvgSim => "gm*AvgSim",
            Metric::GmSdSimilarity => "gm*SD_Similarity",
            Metric::Sm1 => "sm1",
            Metric::Sm2 => "sm2",
        }
    }

    /// Activity-spread metrics, meaningless for a binary response.
    pub fn is_activity_spread(&self) -> bool {
        matches!(
            self,
            Metric::SdActivity | Metric::CvActivity | Metric::StandardError
        )
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Read-across descriptors for each query row.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricTable {
    pub index_name: String,
    pub ids: Vec<CellValue>,
    pub metrics: Vec<Metric>,
    /// Row-major, one entry per metric.
    pub rows: Vec<Vec<f64>>,
}

impl MetricTable {
    pub fn n_rows(&self) -> usize {
        self.ids.len()
    }

    /// Value of `metric` for row `row`.
    pub fn get(&self, row: usize, metric: Metric) -> Option<f64> {
        let col = self.metrics.iter().position(|m| *m == metric)?;
        self.rows.get(row)?.get(col).copied()
    }

    pub fn headers(&self) -> Vec<&'static str> {
        self.metrics.iter().map(Metric::label).collect()
    }
}
