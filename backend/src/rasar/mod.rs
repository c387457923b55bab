//! Read-across structure-activity (RASAR) descriptors.
//!
//! ```text
//! train (ids, X, y) ─┐
//!                    ├─▶ standardize ─▶ similarity ─▶ sort ─▶ top CTC ─▶ metrics
//! query (ids, X)  ───┘   (train μ, σ)    kernel       desc.    neighbours
//! ```
//!
//! Missing values follow spreadsheet-statistics conventions: sums, means,
//! maxima and deviations skip NaN; a NaN similarity sorts after every
//! number.

use std::cmp::Ordering;

use crate::error::{RasarError, RasarResult};
use crate::models::{DescriptorFrame, DescriptorType, Method, Metric, MetricTable};

/// Upper bound on close training compounds (CTC) per query row.
pub const MAX_CLOSE_TRAINING: usize = 10;

/// Both result tables of one request.
#[derive(Debug, Clone, PartialEq)]
pub struct RasarOutput {
    /// Training set against itself, self-similarity excluded.
    pub train: MetricTable,
    /// Test set against the training set.
    pub test: MetricTable,
}

/// Compute the train and test descriptor tables.
pub fn calculate_rasar(
    train: &DescriptorFrame,
    test: &DescriptorFrame,
    descriptor_type: DescriptorType,
    method: Method,
) -> RasarResult<RasarOutput> {
    if train.is_empty() || test.is_empty() {
        return Err(RasarError::EmptyFrame);
    }
    let test_table = rasar_descriptors(train, test, descriptor_type, method)?;
    let train_table = rasar_descriptors(train, train, descriptor_type, method)?;
    Ok(RasarOutput {
        train: train_table,
        test: test_table,
    })
}

/// Descriptors for `query` rows against `train`, for a descriptor type.
pub fn rasar_descriptors(
    train: &DescriptorFrame,
    query: &DescriptorFrame,
    descriptor_type: DescriptorType,
    method: Method,
) -> RasarResult<MetricTable> {
    match descriptor_type {
        DescriptorType::UserDefined => rasar(train, query, method),
        other => Err(RasarError::UnsupportedDescriptorType(other.label().to_string())),
    }
}

/// Core calculation on user supplied descriptors.
///
/// `train` ends with the response column. `query` drops its last column only
/// when it is as wide as `train`.
pub fn rasar(train: &DescriptorFrame, query: &DescriptorFrame, method: Method) -> RasarResult<MetricTable> {
    if train.is_empty() || query.is_empty() {
        return Err(RasarError::EmptyFrame);
    }

    let (x_train, y_train) = train.split_response();
    let x_query = if query.n_cols() == train.n_cols() {
        query.split_response().0
    } else {
        query.clone()
    };
    let x_query = align_columns(&x_train, &x_query)?;

    let (z_train, z_query) = standardize(&x_train, &x_query);
    let mut similarity = similarity_matrix(&z_train, &z_query, method);

    // Train against itself: a compound is not its own neighbour.
    if query.ids == train.ids {
        for (i, row) in similarity.iter_mut().enumerate() {
            if let Some(s) = row.get_mut(i) {
                *s = 0.0;
            }
        }
    }

    let y_mean = nan_mean(y_train.iter().copied());
    let ctc = train.n_rows().min(MAX_CLOSE_TRAINING);

    let metrics: Vec<Metric> = if is_binary_response(&y_train) {
        Metric::ALL
            .iter()
            .copied()
            .filter(|m| !m.is_activity_spread())
            .collect()
    } else {
        Metric::ALL.to_vec()
    };

    let rows: Vec<Vec<f64>> = similarity
        .iter()
        .map(|sims| {
            let all = row_metrics(sims, &y_train, y_mean, ctc);
            metrics.iter().map(|m| all.value(*m)).collect()
        })
        .collect();

    log::debug!(
        "RASAR ({}): {} query rows x {} training rows, CTC = {}, {} metrics",
        method,
        query.n_rows(),
        train.n_rows(),
        ctc,
        metrics.len()
    );

    Ok(MetricTable {
        index_name: query.index_name.clone(),
        ids: query.ids.clone(),
        metrics,
        rows,
    })
}

/// Response made only of zeros and ones (its sum equals its count of ones).
pub fn is_binary_response(y: &[f64]) -> bool {
    let ones = y.iter().filter(|v| **v == 1.0).count() as f64;
    nan_sum(y.iter().copied()) == ones
}

/// Query descriptors reordered to match the training columns by name.
fn align_columns(train: &DescriptorFrame, query: &DescriptorFrame) -> RasarResult<DescriptorFrame> {
    if train.n_cols() != query.n_cols() {
        return Err(RasarError::ColumnMismatch {
            train: train.n_cols(),
            query: query.n_cols(),
        });
    }
    let order = train
        .columns
        .iter()
        .map(|name| {
            query
                .column_index(name)
                .ok_or_else(|| RasarError::MissingColumn(name.clone()))
        })
        .collect::<RasarResult<Vec<usize>>>()?;
    Ok(query.select_columns(&order))
}

/// Scale both frames with the training column mean and sample deviation.
fn standardize(train: &DescriptorFrame, query: &DescriptorFrame) -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
    let stats: Vec<(f64, f64)> = (0..train.n_cols())
        .map(|c| (nan_mean(train.column(c)), nan_std(train.column(c))))
        .collect();

    let scale = |frame: &DescriptorFrame| -> Vec<Vec<f64>> {
        frame
            .values
            .iter()
            .map(|row| {
                row.iter()
                    .zip(&stats)
                    .map(|(x, (mean, std))| (x - mean) / std)
                    .collect()
            })
            .collect()
    };

    (scale(train), scale(query))
}

/// `sim[q][t]`: similarity of query row `q` to training row `t`.
fn similarity_matrix(train: &[Vec<f64>], query: &[Vec<f64>], method: Method) -> Vec<Vec<f64>> {
    query
        .iter()
        .map(|q| train.iter().map(|t| method.similarity(q, t)).collect())
        .collect()
}

/// All seventeen metrics of one query row.
#[derive(Debug, Clone, Copy, PartialEq)]
struct RowMetrics {
    ra_function: f64,
    sd_activity: f64,
    cv_activity: f64,
    avg_similarity: f64,
    sd_similarity: f64,
    cv_similarity: f64,
    standard_error: f64,
    max_pos: f64,
    pos_avg_sim: f64,
    max_neg: f64,
    neg_avg_sim: f64,
    abs_diff: f64,
    gm: f64,
    sm1: f64,
    sm2: f64,
}

impl RowMetrics {
    fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::RaFunction => self.ra_function,
            Metric::SdActivity => self.sd_activity,
            Metric::CvActivity => self.cv_activity,
            Metric::AvgSimilarity => self.avg_similarity,
            Metric::SdSimilarity => self.sd_similarity,
            Metric::CvSimilarity => self.cv_similarity,
            Metric::StandardError => self.standard_error,
            Metric::MaxPos => self.max_pos,
            Metric::PosAvgSim => self.pos_avg_sim,
            Metric::MaxNeg => self.max_neg,
            Metric::NegAvgSim => self.neg_avg_sim,
            Metric::AbsDiff => self.abs_diff,
            Metric::Gm => self.gm,
            Metric::GmAvgSim => self.gm * self.avg_similarity,
            Metric::GmSdSimilarity => self.gm * self.sd_similarity,
            Metric::Sm1 => self.sm1,
            Metric::Sm2 => self.sm2,
        }
    }
}

fn row_metrics(sims: &[f64], y_train: &[f64], y_mean: f64, ctc: usize) -> RowMetrics {
    let mut neighbours: Vec<(f64, f64)> = sims.iter().copied().zip(y_train.iter().copied()).collect();
    neighbours.sort_by(|a, b| descending(a.0, b.0));

    let total = nan_sum(neighbours.iter().map(|(s, _)| *s));
    let close = &neighbours[..ctc.min(neighbours.len())];

    let weights: Vec<f64> = close.iter().map(|(s, _)| s / total).collect();
    let weight_sum = nan_sum(weights.iter().copied());

    let ra_function = nan_sum(weights.iter().zip(close).map(|(w, (_, y))| w * y)) / weight_sum;
    let n_eff = weight_sum.powi(2) / nan_sum(weights.iter().map(|w| w * w));

    let spread = nan_sum(
        weights
            .iter()
            .zip(close)
            .map(|(w, (_, y))| w * (y - ra_function).powi(2)),
    );
    let sd_activity = (spread / weight_sum * (n_eff / (n_eff - 1.0))).sqrt();

    let close_sims = || close.iter().map(|(s, _)| *s);
    let avg_similarity = nan_mean(close_sims());
    let sd_similarity = nan_std(close_sims());

    // A NaN response belongs to neither side.
    let positive = || close.iter().filter(|(_, y)| !y.is_nan() && !(*y < y_mean)).map(|(s, _)| *s);
    let negative = || close.iter().filter(|(_, y)| !y.is_nan() && !(*y >= y_mean)).map(|(s, _)| *s);

    let max_pos = zero_if_nan(nan_max(positive()));
    let pos_avg_sim = zero_if_nan(nan_mean(positive()));
    let max_neg = zero_if_nan(nan_max(negative()));
    let neg_avg_sim = zero_if_nan(nan_mean(negative()));

    let labelled = close.iter().filter(|(_, y)| !y.is_nan()).count() as f64;
    let pos_fraction = positive().filter(|s| !s.is_nan()).count() as f64 / labelled;
    let balance = 2.0 * (pos_fraction - 0.5).abs();
    let gm = if max_pos >= max_neg { balance } else { -balance };

    RowMetrics {
        ra_function,
        sd_activity,
        cv_activity: sd_activity / ra_function,
        avg_similarity,
        sd_similarity,
        cv_similarity: sd_similarity / avg_similarity,
        standard_error: sd_activity / n_eff.sqrt(),
        max_pos,
        pos_avg_sim,
        max_neg,
        neg_avg_sim,
        abs_diff: (max_pos - max_neg).abs(),
        gm,
        sm1: (max_pos - max_neg) / max_pos.max(max_neg),
        sm2: (pos_avg_sim - neg_avg_sim) / avg_similarity,
    }
}

/// Larger first, NaN last, ties keep their order under a stable sort.
fn descending(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}

// =============================================================================
// NaN-skipping statistics
// =============================================================================

fn nan_sum(values: impl Iterator<Item = f64>) -> f64 {
    values.filter(|v| !v.is_nan()).sum()
}

fn nan_mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 {
        f64::NAN
    } else {
        sum / n as f64
    }
}

/// Sample standard deviation (n - 1 denominator).
fn nan_std(values: impl Iterator<Item = f64>) -> f64 {
    let kept: Vec<f64> = values.filter(|v| !v.is_nan()).collect();
    if kept.len() < 2 {
        return f64::NAN;
    }
    let mean = kept.iter().sum::<f64>() / kept.len() as f64;
    let ss: f64 = kept.iter().map(|v| (v - mean).powi(2)).sum();
    (ss / (kept.len() - 1) as f64).sqrt()
}

fn nan_max(values: impl Iterator<Item = f64>) -> f64 {
    values
        .filter(|v| !v.is_nan())
        .fold(f64::NAN, |acc, v| if acc.is_nan() || v > acc { v } else { acc })
}

fn zero_if_nan(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v
    }
}
