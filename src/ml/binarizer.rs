//! Multi-label binarizer.
//!
//! Encodes a set of label tokens per sample as an indicator row with one
//! column per known class, and decodes indicator rows back into labels.
//! Classes are kept in sorted order, so column `j` always means the same label
//! for the lifetime of a fitted binarizer.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ClassifierError, Result};
use crate::ml::matrix::IndicatorMatrix;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiLabelBinarizer {
    classes: Vec<String>,
}

impl MultiLabelBinarizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a binarizer with a fixed class list.
    pub fn with_classes<I, S>(classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let classes: BTreeSet<String> = classes.into_iter().map(Into::into).collect();
        MultiLabelBinarizer {
            classes: classes.into_iter().collect(),
        }
    }

    /// Learn the class list from the label sets.
    pub fn fit<S: AsRef<str>>(&mut self, label_sets: &[Vec<S>]) {
        let classes: BTreeSet<String> = label_sets
            .iter()
            .flatten()
            .map(|label| label.as_ref().to_string())
            .collect();
        self.classes = classes.into_iter().collect();
    }

    /// Fit and encode in one step.
    pub fn fit_transform<S: AsRef<str>>(&mut self, label_sets: &[Vec<S>]) -> IndicatorMatrix {
        self.fit(label_sets);
        self.transform(label_sets)
    }

    /// Encode label sets; labels outside the class list are ignored with a warning.
    pub fn transform<S: AsRef<str>>(&self, label_sets: &[Vec<S>]) -> IndicatorMatrix {
        let mut matrix = IndicatorMatrix::zeros(label_sets.len(), self.classes.len());
        for (row, labels) in label_sets.iter().enumerate() {
            for label in labels {
                let label = label.as_ref();
                match self.class_index(label) {
                    Some(col) => matrix.set(row, col, true),
                    None => warn!(label, row, "ignoring label unknown to the binarizer"),
                }
            }
        }
        matrix
    }

    /// Decode indicator rows into the active classes, in class order.
    pub fn inverse_transform(&self, indicators: &IndicatorMatrix) -> Result<Vec<Vec<String>>> {
        if indicators.n_cols() != self.classes.len() {
            return Err(ClassifierError::shape(format!(
                "indicator matrix has {} columns but the binarizer knows {} classes",
                indicators.n_cols(),
                self.classes.len()
            )));
        }

        Ok((0..indicators.n_rows())
            .map(|row| {
                indicators
                    .row(row)
                    .iter()
                    .zip(&self.classes)
                    .filter(|(active, _)| **active)
                    .map(|(_, class)| class.clone())
                    .collect()
            })
            .collect())
    }

    /// Decode each row and join its active labels with no separator.
    pub fn decode_joined(&self, indicators: &IndicatorMatrix) -> Result<Vec<String>> {
        Ok(self
            .inverse_transform(indicators)?
            .into_iter()
            .map(|labels| labels.concat())
            .collect())
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }

    pub fn class_index(&self, label: &str) -> Option<usize> {
        self.classes
            .binary_search_by(|class| class.as_str().cmp(label))
            .ok()
    }

    /// Whether joined label strings can be split back unambiguously.
    ///
    /// True when every class has the same character width and none is empty.
    pub fn is_unambiguous(&self) -> bool {
        let mut widths = self.classes.iter().map(|c| c.chars().count());
        match widths.next() {
            None => true,
            Some(0) => false,
            Some(first) => widths.all(|w| w == first),
        }
    }
}
