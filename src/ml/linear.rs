//! One-vs-rest linear classifier for multi-label prediction.
//!
//! Each label has its own weight vector and intercept; a label is active for a
//! sample when `w · x + b > 0`. Training minimizes the L2-regularized hinge
//! loss with stochastic gradient descent, one binary problem per label.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ClassifierError, Result};
use crate::ml::matrix::{DenseMatrix, IndicatorMatrix};

/// Hyper-parameters for [`LinearClassifier::fit`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SgdParams {
    /// L2 regularization strength.
    pub alpha: f64,
    /// Passes over the training set.
    pub epochs: usize,
    /// Initial learning rate.
    pub eta0: f64,
    /// Seed for the per-epoch shuffle.
    pub seed: u64,
}

impl Default for SgdParams {
    fn default() -> Self {
        SgdParams {
            alpha: 1e-4,
            epochs: 50,
            eta0: 0.5,
            seed: 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinearClassifier {
    /// One weight vector per label, `n_labels x n_features`.
    coef: Vec<Vec<f64>>,
    intercept: Vec<f64>,
    /// Column layout the weights were trained on, when known.
    #[serde(default)]
    feature_names: Option<Vec<String>>,
}

impl LinearClassifier {
    /// Create a classifier from explicit weights.
    pub fn new(coef: Vec<Vec<f64>>, intercept: Vec<f64>) -> Result<Self> {
        let classifier = LinearClassifier {
            coef,
            intercept,
            feature_names: None,
        };
        classifier.validate()?;
        Ok(classifier)
    }

    /// Record the column layout the weights belong to.
    pub fn with_feature_names(mut self, names: Vec<String>) -> Result<Self> {
        if names.len() != self.n_features() {
            return Err(ClassifierError::shape(format!(
                "{} feature names for {} weights",
                names.len(),
                self.n_features()
            )));
        }
        self.feature_names = Some(names);
        Ok(self)
    }

    /// Check internal consistency of a (possibly deserialized) model.
    pub fn validate(&self) -> Result<()> {
        if self.coef.len() != self.intercept.len() {
            return Err(ClassifierError::artifact(format!(
                "classifier has {} weight rows but {} intercepts",
                self.coef.len(),
                self.intercept.len()
            )));
        }
        let n_features = self.n_features();
        if let Some(row) = self.coef.iter().position(|w| w.len() != n_features) {
            return Err(ClassifierError::artifact(format!(
                "classifier weight row {row} has {} values, expected {n_features}",
                self.coef[row].len()
            )));
        }
        if let Some(names) = &self.feature_names
            && names.len() != n_features
        {
            return Err(ClassifierError::artifact(format!(
                "classifier records {} feature names for {n_features} weights",
                names.len()
            )));
        }
        Ok(())
    }

    pub fn n_labels(&self) -> usize {
        self.coef.len()
    }

    pub fn n_features(&self) -> usize {
        self.coef.first().map_or(0, Vec::len)
    }

    pub fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }

    /// Fail unless `names` is the column layout the model was trained on.
    ///
    /// Models without a recorded layout only have their width checked.
    pub fn check_feature_names(&self, names: &[String]) -> Result<()> {
        if names.len() != self.n_features() {
            return Err(ClassifierError::shape(format!(
                "feature layout has {} columns, classifier expects {}",
                names.len(),
                self.n_features()
            )));
        }
        if let Some(expected) = &self.feature_names
            && let Some(col) = expected.iter().zip(names).position(|(a, b)| a != b)
        {
            return Err(ClassifierError::shape(format!(
                "feature column {col} is '{}', classifier was trained with '{}'",
                names[col], expected[col]
            )));
        }
        Ok(())
    }

    /// Signed distance of every sample to every label's hyperplane.
    pub fn decision_function(&self, x: &DenseMatrix) -> Result<DenseMatrix> {
        if x.n_cols() != self.n_features() {
            return Err(ClassifierError::shape(format!(
                "input has {} features, classifier expects {}",
                x.n_cols(),
                self.n_features()
            )));
        }
        let mut scores = DenseMatrix::zeros(x.n_rows(), self.n_labels());
        for (row, sample) in x.rows().enumerate() {
            for (label, (w, b)) in self.coef.iter().zip(&self.intercept).enumerate() {
                scores.set(row, label, dot(w, sample) + b);
            }
        }
        Ok(scores)
    }

    /// Predict one indicator row per sample.
    pub fn predict(&self, x: &DenseMatrix) -> Result<IndicatorMatrix> {
        let scores = self.decision_function(x)?;
        let mut labels = IndicatorMatrix::zeros(scores.n_rows(), scores.n_cols());
        for row in 0..scores.n_rows() {
            for col in 0..scores.n_cols() {
                labels.set(row, col, scores.get(row, col) > 0.0);
            }
        }
        Ok(labels)
    }

    /// Train one hinge-loss model per label column of `y`.
    pub fn fit(x: &DenseMatrix, y: &IndicatorMatrix, params: &SgdParams) -> Result<Self> {
        if x.n_rows() != y.n_rows() {
            return Err(ClassifierError::shape(format!(
                "{} samples but {} label rows",
                x.n_rows(),
                y.n_rows()
            )));
        }
        if x.n_rows() == 0 {
            return Err(ClassifierError::invalid_argument(
                "cannot train a classifier on zero samples",
            ));
        }

        let mut rng = StdRng::seed_from_u64(params.seed);
        let mut order: Vec<usize> = (0..x.n_rows()).collect();
        let mut coef = Vec::with_capacity(y.n_cols());
        let mut intercept = Vec::with_capacity(y.n_cols());

        for label in 0..y.n_cols() {
            let targets = y.signed_column(label);
            let mut w = vec![0.0; x.n_cols()];
            let mut b = 0.0;
            let mut t = 0usize;

            for _ in 0..params.epochs {
                order.shuffle(&mut rng);
                for &i in &order {
                    t += 1;
                    let eta = params.eta0 / (1.0 + params.eta0 * params.alpha * t as f64);
                    let sample = x.row(i);
                    let target = targets[i];
                    let margin = target * (dot(&w, sample) + b);

                    let shrink = 1.0 - eta * params.alpha;
                    for weight in w.iter_mut() {
                        *weight *= shrink;
                    }
                    if margin < 1.0 {
                        for (weight, value) in w.iter_mut().zip(sample) {
                            *weight += eta * target * value;
                        }
                        b += eta * target;
                    }
                }
            }

            debug!(label, steps = t, intercept = b, "trained label model");
            coef.push(w);
            intercept.push(b);
        }

        Self::new(coef, intercept)
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}
