//! Offline training pipeline for the silver price model.
//!
//! Reads historical LBMA prices from CSV, decomposes each date with the same
//! `FeatureVector` the server uses, holds out a seeded random test split,
//! fits an ordinary least squares model and reports MAPE on the held-out rows.

use super::linear_predictor::LinearModel;
use crate::domain::errors::TrainingError;
use crate::domain::ml::{FEATURE_NAMES, FeatureVector};
use chrono::NaiveDate;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::Deserialize;
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::linear::linear_regression::{LinearRegression, LinearRegressionParameters};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Price column of the LBMA export to train against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum PriceColumn {
    #[default]
    Usd,
    Gbp,
    Euro,
}

#[derive(Debug, Deserialize)]
struct SilverRecord {
    #[serde(rename = "Date", default)]
    date: Option<String>,
    #[serde(rename = "USD", default, deserialize_with = "csv::invalid_option")]
    usd: Option<f64>,
    #[serde(rename = "GBP", default, deserialize_with = "csv::invalid_option")]
    gbp: Option<f64>,
    #[serde(rename = "EURO", default, deserialize_with = "csv::invalid_option")]
    euro: Option<f64>,
}

impl SilverRecord {
    fn price(&self, column: PriceColumn) -> Option<f64> {
        match column {
            PriceColumn::Usd => self.usd,
            PriceColumn::Gbp => self.gbp,
            PriceColumn::Euro => self.euro,
        }
    }
}

/// Feature rows (in `FEATURE_NAMES` order) and their targets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainingSet {
    pub features: Vec<Vec<f64>>,
    pub targets: Vec<f64>,
}

impl TrainingSet {
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    fn subset(&self, indices: &[usize]) -> Self {
        Self {
            features: indices.iter().map(|&i| self.features[i].clone()).collect(),
            targets: indices.iter().map(|&i| self.targets[i]).collect(),
        }
    }
}

/// Reads a CSV export with a `Date` column and price columns.
///
/// Rows missing either the date or the selected price are dropped. A date
/// that is present but unparseable is an error.
pub fn read_training_set<R: Read>(
    reader: R,
    column: PriceColumn,
) -> Result<TrainingSet, TrainingError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut set = TrainingSet::default();
    let mut dropped = 0usize;

    for (idx, result) in rdr.deserialize().enumerate() {
        let record: SilverRecord = result?;
        // header is line 1
        let row = idx + 2;

        let raw_date = match record.date.as_deref().map(str::trim) {
            Some(d) if !d.is_empty() => d,
            _ => {
                dropped += 1;
                continue;
            }
        };
        let Some(price) = record.price(column) else {
            dropped += 1;
            continue;
        };

        let date = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d").map_err(|_| {
            TrainingError::InvalidDate {
                row,
                value: raw_date.to_string(),
            }
        })?;

        set.features.push(FeatureVector::from_date(date).to_row());
        set.targets.push(price);
    }

    if dropped > 0 {
        debug!("Dropped {} rows with missing values", dropped);
    }
    Ok(set)
}

pub fn load_training_set(path: &Path, column: PriceColumn) -> Result<TrainingSet, TrainingError> {
    let file = std::fs::File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => TrainingError::InputNotFound {
            path: path.to_path_buf(),
        },
        _ => TrainingError::Csv(csv::Error::from(e)),
    })?;
    read_training_set(std::io::BufReader::new(file), column)
}

/// Shuffles row indices with a fixed seed and holds out `ceil(test_size * n)` rows.
///
/// Returns `(train, test)`.
pub fn train_test_split(
    set: &TrainingSet,
    test_size: f64,
    seed: u64,
) -> Result<(TrainingSet, TrainingSet), TrainingError> {
    if !(0.0..1.0).contains(&test_size) {
        return Err(TrainingError::InvalidTestSize(test_size));
    }

    let mut indices: Vec<usize> = (0..set.len()).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let n_test = (test_size * set.len() as f64).ceil() as usize;
    let (test_idx, train_idx) = indices.split_at(n_test.min(set.len()));
    Ok((set.subset(train_idx), set.subset(test_idx)))
}

/// Mean absolute percentage error, in percent.
///
/// Returns `None` for empty input.
pub fn mean_absolute_percentage_error(actual: &[f64], predicted: &[f64]) -> Option<f64> {
    if actual.is_empty() || actual.len() != predicted.len() {
        return None;
    }
    let total: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).abs() / a * 100.0)
        .sum();
    Some(total / actual.len() as f64)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainerConfig {
    /// Fraction of rows held out for evaluation. `0.0` trains on everything.
    pub test_size: f64,
    pub seed: u64,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            test_size: 0.3,
            seed: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingReport {
    pub train_rows: usize,
    pub test_rows: usize,
    /// MAPE on the held-out rows, when there are any.
    pub mape: Option<f64>,
}

pub struct Trainer {
    config: TrainerConfig,
}

impl Trainer {
    pub fn new(config: TrainerConfig) -> Self {
        Self { config }
    }

    /// Splits, fits and evaluates.
    pub fn run(&self, set: &TrainingSet) -> Result<(LinearModel, TrainingReport), TrainingError> {
        let (train, test) = train_test_split(set, self.config.test_size, self.config.seed)?;
        info!(
            "Training on {} rows, holding out {} (seed {})",
            train.len(),
            test.len(),
            self.config.seed
        );

        let model = fit(&train)?;

        let mape = if test.is_empty() {
            None
        } else {
            let x_test = to_matrix(&test.features)?;
            let predicted = model.predict(&x_test).map_err(|e| TrainingError::Fit {
                reason: format!("Predict error: {}", e),
            })?;
            mean_absolute_percentage_error(&test.targets, &predicted)
        };

        Ok((
            model,
            TrainingReport {
                train_rows: train.len(),
                test_rows: test.len(),
                mape,
            },
        ))
    }
}

/// Fits an ordinary least squares model on the whole set.
pub fn fit(set: &TrainingSet) -> Result<LinearModel, TrainingError> {
    // one coefficient per feature plus the intercept
    let required = FEATURE_NAMES.len() + 1;
    if set.len() < required {
        return Err(TrainingError::InsufficientData {
            available: set.len(),
            required,
        });
    }

    let x = to_matrix(&set.features)?;
    LinearRegression::fit(&x, &set.targets, LinearRegressionParameters::default()).map_err(|e| {
        TrainingError::Fit {
            reason: e.to_string(),
        }
    })
}

fn to_matrix(rows: &Vec<Vec<f64>>) -> Result<DenseMatrix<f64>, TrainingError> {
    DenseMatrix::from_2d_vec(rows).map_err(|e| TrainingError::Fit {
        reason: format!("Matrix error: {}", e),
    })
}
