//! Probability oracle boundary and the bundled pipeline artifact.
//!
//! The artifact is a JSON description of a one-hot + logistic-regression
//! pipeline:
//!
//! ```text
//! z = intercept + Σ coef_i · x_i
//! P(win) = sigmoid(z),  P(loss) = 1 − P(win)
//! ```
//!
//! where `x` is the one-hot encoding of each categorical column (first
//! category dropped when `drop_first` is set, unknown categories encode as all
//! zeros) followed by the numeric columns in artifact order.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use super::features::FeatureVector;

const CATEGORICAL_COLUMNS: [&str; 3] = ["batting_team", "bowling_team", "city"];
const NUMERIC_COLUMNS: [&str; 6] = ["runs_left", "balls_left", "wickets", "total_runs_x", "crr", "rrr"];

/// Two-class distribution relative to the batting team.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassProbabilities {
    /// Class 0.
    pub loss: f64,
    /// Class 1.
    pub win: f64,
}

#[derive(Debug, Error)]
pub enum OracleLoadError {
    #[error("model file '{0}' not found")]
    Missing(String),

    #[error("failed to read model file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse model file '{path}': {source}")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("model expects {expected} coefficients but artifact has {actual}")]
    Shape { expected: usize, actual: usize },

    #[error("model references unknown column '{0}'")]
    UnknownColumn(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum OracleError {
    #[error("model produced a non-finite probability")]
    NonFinite,
}

/// Anything that turns a feature record into a two-class distribution.
pub trait ProbabilityOracle: Send + Sync {
    fn predict_proba(&self, features: &FeatureVector) -> Result<ClassProbabilities, OracleError>;

    /// Human-readable name for logging.
    fn name(&self) -> &str;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoricalEncoding {
    pub column: String,
    pub categories: Vec<String>,
    #[serde(default)]
    pub drop_first: bool,
}

impl CategoricalEncoding {
    fn width(&self) -> usize {
        if self.drop_first {
            self.categories.len().saturating_sub(1)
        } else {
            self.categories.len()
        }
    }

    /// Index of the hot slot within this column's block, if any.
    fn hot_index(&self, value: &str) -> Option<usize> {
        let pos = self.categories.iter().position(|c| c == value)?;
        if self.drop_first {
            pos.checked_sub(1)
        } else {
            Some(pos)
        }
    }
}

/// One-hot + logistic-regression pipeline loaded from a JSON artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticPipeline {
    #[serde(default = "default_name")]
    pub name: String,
    pub categorical: Vec<CategoricalEncoding>,
    pub numeric: Vec<String>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

fn default_name() -> String {
    "logistic-pipeline".to_string()
}

impl LogisticPipeline {
    /// Read and check the artifact at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, OracleLoadError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                OracleLoadError::Missing(display.clone())
            } else {
                OracleLoadError::Io {
                    path: display.clone(),
                    source: e,
                }
            }
        })?;
        let pipeline: LogisticPipeline = serde_json::from_str(&raw)
            .map_err(|e| OracleLoadError::Malformed { path: display, source: e })?;
        pipeline.check()?;
        Ok(pipeline)
    }

    /// Reject artifacts whose layout can't be evaluated against a `FeatureVector`.
    pub fn check(&self) -> Result<(), OracleLoadError> {
        for enc in &self.categorical {
            if !CATEGORICAL_COLUMNS.contains(&enc.column.as_str()) {
                return Err(OracleLoadError::UnknownColumn(enc.column.clone()));
            }
        }
        for col in &self.numeric {
            if !NUMERIC_COLUMNS.contains(&col.as_str()) {
                return Err(OracleLoadError::UnknownColumn(col.clone()));
            }
        }
        let expected = self.encoded_width();
        if self.coefficients.len() != expected {
            return Err(OracleLoadError::Shape {
                expected,
                actual: self.coefficients.len(),
            });
        }
        Ok(())
    }

    pub fn encoded_width(&self) -> usize {
        self.categorical.iter().map(CategoricalEncoding::width).sum::<usize>() + self.numeric.len()
    }

    /// Encoded design row for one feature record.
    pub fn encode(&self, features: &FeatureVector) -> Vec<f64> {
        let mut row = Vec::with_capacity(self.encoded_width());
        for enc in &self.categorical {
            let start = row.len();
            row.resize(start + enc.width(), 0.0);
            let hot = features
                .categorical(&enc.column)
                .and_then(|value| enc.hot_index(value));
            if let Some(i) = hot {
                row[start + i] = 1.0;
            }
        }
        for col in &self.numeric {
            row.push(features.numeric(col).unwrap_or(0.0));
        }
        row
    }

    fn decision(&self, features: &FeatureVector) -> f64 {
        self.encode(features)
            .iter()
            .zip(&self.coefficients)
            .fold(self.intercept, |acc, (x, w)| acc + x * w)
    }
}

impl ProbabilityOracle for LogisticPipeline {
    fn predict_proba(&self, features: &FeatureVector) -> Result<ClassProbabilities, OracleError> {
        let win = sigmoid(self.decision(features));
        if !win.is_finite() {
            return Err(OracleError::NonFinite);
        }
        Ok(ClassProbabilities {
            loss: 1.0 - win,
            win,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        let z = (-x).exp();
        1.0 / (1.0 + z)
    } else {
        let z = x.exp();
        z / (1.0 + z)
    }
}
