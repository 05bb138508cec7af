//! TF-IDF vectorizer for section text.
//!
//! Term weighting follows the usual conventions of scikit-learn's
//! `TfidfVectorizer`, so artifacts trained with the same options produce the
//! same feature space:
//!
//! - vocabulary indices are assigned in sorted term order
//! - `tf` is the raw term count, or `1 + ln(count)` with `sublinear_tf`
//! - smooth idf is `ln((1 + n) / (1 + df)) + 1`, plain idf is `ln(n / df) + 1`
//! - rows are normalized with the configured [`Norm`]

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::token_filter::shingle::ShingleFilter;
use crate::analysis::token_filter::stop::StopFilter;
use crate::analysis::tokenizer::regex::{DEFAULT_TOKEN_PATTERN, RegexTokenizer};
use crate::error::{ClassifierError, Result};
use crate::ml::matrix::CsrMatrix;

/// Row normalization applied after idf weighting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    #[default]
    L2,
    L1,
    None,
}

/// Stop word configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StopWords {
    #[default]
    None,
    English,
    Custom(Vec<String>),
}

/// Options controlling tokenization and weighting.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TfIdfParams {
    pub token_pattern: String,
    pub lowercase: bool,
    pub stop_words: StopWords,
    /// Inclusive word n-gram range.
    pub ngram_range: (usize, usize),
    /// Minimum number of documents a term must appear in.
    pub min_df: usize,
    /// Maximum fraction of documents a term may appear in.
    pub max_df: f64,
    pub max_features: Option<usize>,
    pub sublinear_tf: bool,
    pub smooth_idf: bool,
    pub norm: Norm,
}

impl Default for TfIdfParams {
    fn default() -> Self {
        TfIdfParams {
            token_pattern: DEFAULT_TOKEN_PATTERN.to_string(),
            lowercase: true,
            stop_words: StopWords::None,
            ngram_range: (1, 1),
            min_df: 1,
            max_df: 1.0,
            max_features: None,
            sublinear_tf: false,
            smooth_idf: true,
            norm: Norm::L2,
        }
    }
}

impl TfIdfParams {
    /// Build the analyzer described by these options.
    pub fn build_analyzer(&self) -> Result<Arc<dyn Analyzer>> {
        let tokenizer = Arc::new(RegexTokenizer::with_pattern(&self.token_pattern)?);
        let mut analyzer = PipelineAnalyzer::new(tokenizer).with_name("tfidf");

        if self.lowercase {
            analyzer = analyzer.add_filter(Arc::new(LowercaseFilter::new()));
        }
        match &self.stop_words {
            StopWords::None => {}
            StopWords::English => {
                analyzer = analyzer.add_filter(Arc::new(StopFilter::new()));
            }
            StopWords::Custom(words) => {
                analyzer = analyzer.add_filter(Arc::new(StopFilter::from_words(words.clone())));
            }
        }
        let (min_n, max_n) = self.ngram_range;
        if (min_n, max_n) != (1, 1) {
            analyzer = analyzer.add_filter(Arc::new(ShingleFilter::new(min_n, max_n)?));
        }

        Ok(Arc::new(analyzer))
    }
}

/// Serialized form of a fitted vectorizer.
#[derive(Serialize, Deserialize)]
struct TfIdfState {
    params: TfIdfParams,
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
    n_documents: usize,
}

/// TF-IDF vectorizer for text feature extraction.
#[derive(Clone, Serialize, Deserialize)]
#[serde(try_from = "TfIdfState", into = "TfIdfState")]
pub struct TfIdfVectorizer {
    params: TfIdfParams,
    /// Vocabulary: term -> column index.
    vocabulary: HashMap<String, usize>,
    /// Inverse document frequency for each column.
    idf: Vec<f64>,
    /// Total number of documents seen during fitting.
    n_documents: usize,
    analyzer: Arc<dyn Analyzer>,
}

impl std::fmt::Debug for TfIdfVectorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TfIdfVectorizer")
            .field("vocabulary_size", &self.vocabulary.len())
            .field("n_documents", &self.n_documents)
            .field("analyzer", &self.analyzer.name())
            .finish()
    }
}

impl From<TfIdfVectorizer> for TfIdfState {
    fn from(v: TfIdfVectorizer) -> Self {
        TfIdfState {
            params: v.params,
            vocabulary: v.vocabulary.into_iter().collect(),
            idf: v.idf,
            n_documents: v.n_documents,
        }
    }
}

impl TryFrom<TfIdfState> for TfIdfVectorizer {
    type Error = ClassifierError;

    fn try_from(state: TfIdfState) -> Result<Self> {
        if state.idf.len() != state.vocabulary.len() {
            return Err(ClassifierError::artifact(format!(
                "vectorizer has {} idf weights for {} terms",
                state.idf.len(),
                state.vocabulary.len()
            )));
        }
        let mut seen = vec![false; state.vocabulary.len()];
        for (term, &idx) in &state.vocabulary {
            if idx >= seen.len() || seen[idx] {
                return Err(ClassifierError::artifact(format!(
                    "vectorizer term '{term}' has invalid index {idx}"
                )));
            }
            seen[idx] = true;
        }

        let analyzer = state.params.build_analyzer()?;
        Ok(TfIdfVectorizer {
            params: state.params,
            vocabulary: state.vocabulary.into_iter().collect(),
            idf: state.idf,
            n_documents: state.n_documents,
            analyzer,
        })
    }
}

impl TfIdfVectorizer {
    /// Create an unfitted vectorizer.
    pub fn new(params: TfIdfParams) -> Result<Self> {
        let analyzer = params.build_analyzer()?;
        Ok(Self {
            params,
            vocabulary: HashMap::new(),
            idf: Vec::new(),
            n_documents: 0,
            analyzer,
        })
    }

    /// Fit the vocabulary and idf weights on training documents.
    pub fn fit<S: AsRef<str>>(&mut self, documents: &[S]) -> Result<()> {
        let n_documents = documents.len();
        if n_documents == 0 {
            return Err(ClassifierError::invalid_argument(
                "cannot fit a vectorizer on zero documents",
            ));
        }

        let mut document_frequency: HashMap<String, usize> = HashMap::new();
        let mut corpus_frequency: HashMap<String, usize> = HashMap::new();

        for doc in documents {
            let terms = self.terms(doc.as_ref())?;
            let mut unique: HashSet<&str> = HashSet::new();
            for term in &terms {
                *corpus_frequency.entry(term.clone()).or_insert(0) += 1;
                if unique.insert(term.as_str()) {
                    *document_frequency.entry(term.clone()).or_insert(0) += 1;
                }
            }
        }

        let max_doc_count = self.params.max_df * n_documents as f64;
        let mut kept: Vec<(String, usize)> = document_frequency
            .into_iter()
            .filter(|(_, df)| *df >= self.params.min_df && (*df as f64) <= max_doc_count)
            .collect();

        if let Some(limit) = self.params.max_features
            && kept.len() > limit
        {
            kept.sort_by(|a, b| {
                corpus_frequency[&b.0]
                    .cmp(&corpus_frequency[&a.0])
                    .then_with(|| a.0.cmp(&b.0))
            });
            kept.truncate(limit);
        }

        if kept.is_empty() {
            return Err(ClassifierError::analysis(
                "empty vocabulary; documents contain no terms after pruning",
            ));
        }

        kept.sort_by(|a, b| a.0.cmp(&b.0));

        let n = n_documents as f64;
        let mut vocabulary = HashMap::with_capacity(kept.len());
        let mut idf = Vec::with_capacity(kept.len());
        for (idx, (term, df)) in kept.into_iter().enumerate() {
            let df = df as f64;
            let weight = if self.params.smooth_idf {
                ((n + 1.0) / (df + 1.0)).ln() + 1.0
            } else {
                (n / df).ln() + 1.0
            };
            idf.push(weight);
            vocabulary.insert(term, idx);
        }

        debug!(
            vocabulary_size = vocabulary.len(),
            n_documents, "fitted tf-idf vectorizer"
        );

        self.vocabulary = vocabulary;
        self.idf = idf;
        self.n_documents = n_documents;

        Ok(())
    }

    /// Fit on `documents` and transform them in one step.
    pub fn fit_transform<S: AsRef<str>>(&mut self, documents: &[S]) -> Result<CsrMatrix> {
        self.fit(documents)?;
        self.transform(documents)
    }

    /// Transform documents into a sparse TF-IDF matrix, one row per document.
    pub fn transform<S: AsRef<str>>(&self, documents: &[S]) -> Result<CsrMatrix> {
        let mut matrix = CsrMatrix::new(self.vocabulary.len());
        for doc in documents {
            let entries = self.weigh(doc.as_ref())?;
            matrix.push_row(&entries)?;
        }
        Ok(matrix)
    }

    /// Transform a single document into a dense TF-IDF vector.
    pub fn transform_one(&self, document: &str) -> Result<Vec<f64>> {
        let mut dense = vec![0.0; self.vocabulary.len()];
        for (idx, value) in self.weigh(document)? {
            dense[idx] = value;
        }
        Ok(dense)
    }

    /// Column names in column order.
    pub fn feature_names(&self) -> Vec<String> {
        let mut names = vec![String::new(); self.vocabulary.len()];
        for (term, &idx) in &self.vocabulary {
            names[idx] = term.clone();
        }
        names
    }

    /// Get the size of the vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Number of documents the vectorizer was fitted on.
    pub fn n_documents(&self) -> usize {
        self.n_documents
    }

    pub fn params(&self) -> &TfIdfParams {
        &self.params
    }

    /// Column index of a term, if it is in the vocabulary.
    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    /// Weighted, normalized entries of one document sorted by column.
    fn weigh(&self, document: &str) -> Result<Vec<(usize, f64)>> {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for term in self.terms(document)? {
            if let Some(&idx) = self.vocabulary.get(&term) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut entries: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(idx, count)| {
                let tf = if self.params.sublinear_tf {
                    1.0 + count.ln()
                } else {
                    count
                };
                (idx, tf * self.idf[idx])
            })
            .collect();

        let scale = match self.params.norm {
            Norm::L2 => entries.iter().map(|(_, v)| v * v).sum::<f64>().sqrt(),
            Norm::L1 => entries.iter().map(|(_, v)| v.abs()).sum::<f64>(),
            Norm::None => 1.0,
        };
        if scale > 0.0 && scale != 1.0 {
            for (_, value) in &mut entries {
                *value /= scale;
            }
        }

        Ok(entries)
    }

    fn terms(&self, text: &str) -> Result<Vec<String>> {
        Ok(self.analyzer.analyze(text)?.map(|token| token.text).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Vec<String> {
        vec![
            "installation pip install package".to_string(),
            "usage run the package".to_string(),
            "license mit license".to_string(),
        ]
    }

    #[test]
    fn test_tfidf_vectorizer() {
        let mut vectorizer = TfIdfVectorizer::new(TfIdfParams::default()).unwrap();
        vectorizer.fit(&corpus()).unwrap();

        assert_eq!(vectorizer.vocabulary_size(), 9);
        assert_eq!(vectorizer.n_documents(), 3);

        let features = vectorizer.transform_one("install the package").unwrap();
        assert_eq!(features.len(), vectorizer.vocabulary_size());
    }

    #[test]
    fn test_vocabulary_is_sorted() {
        let mut vectorizer = TfIdfVectorizer::new(TfIdfParams::default()).unwrap();
        vectorizer.fit(&corpus()).unwrap();

        let names = vectorizer.feature_names();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert_eq!(vectorizer.term_index("install"), Some(names.iter().position(|n| n == "install").unwrap()));
    }

    #[test]
    fn test_smooth_idf_values() {
        let mut vectorizer = TfIdfVectorizer::new(TfIdfParams::default()).unwrap();
        vectorizer.fit(&corpus()).unwrap();

        // "package" appears in 2 of 3 documents, "mit" in 1.
        let package = vectorizer.idf()[vectorizer.term_index("package").unwrap()];
        let mit = vectorizer.idf()[vectorizer.term_index("mit").unwrap()];
        assert!((package - ((4.0f64 / 3.0).ln() + 1.0)).abs() < 1e-12);
        assert!((mit - ((4.0f64 / 2.0).ln() + 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_rows_are_l2_normalized() {
        let mut vectorizer = TfIdfVectorizer::new(TfIdfParams::default()).unwrap();
        let matrix = vectorizer.fit_transform(&corpus()).unwrap();

        for row in 0..matrix.n_rows() {
            let norm: f64 = matrix.row(row).map(|(_, v)| v * v).sum::<f64>().sqrt();
            assert!((norm - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_unknown_terms_give_empty_row() {
        let mut vectorizer = TfIdfVectorizer::new(TfIdfParams::default()).unwrap();
        vectorizer.fit(&corpus()).unwrap();

        let matrix = vectorizer.transform(&["completely unseen words"]).unwrap();
        assert_eq!(matrix.n_rows(), 1);
        assert_eq!(matrix.nnz(), 0);
    }

    #[test]
    fn test_min_df_and_max_features() {
        let params = TfIdfParams {
            min_df: 2,
            ..TfIdfParams::default()
        };
        let mut vectorizer = TfIdfVectorizer::new(params).unwrap();
        vectorizer.fit(&corpus()).unwrap();
        assert_eq!(vectorizer.feature_names(), vec!["package"]);

        let params = TfIdfParams {
            max_features: Some(1),
            ..TfIdfParams::default()
        };
        let mut vectorizer = TfIdfVectorizer::new(params).unwrap();
        vectorizer.fit(&corpus()).unwrap();
        // "license" and "package" both occur twice; ties break alphabetically.
        assert_eq!(vectorizer.feature_names(), vec!["license"]);
    }

    #[test]
    fn test_bigrams_and_stop_words() {
        let params = TfIdfParams {
            ngram_range: (1, 2),
            stop_words: StopWords::English,
            ..TfIdfParams::default()
        };
        let mut vectorizer = TfIdfVectorizer::new(params).unwrap();
        vectorizer.fit(&["Run the tests"]).unwrap();

        assert_eq!(vectorizer.feature_names(), vec!["run", "run tests", "tests"]);
    }

    #[test]
    fn test_empty_fit_fails() {
        let mut vectorizer = TfIdfVectorizer::new(TfIdfParams::default()).unwrap();
        assert!(vectorizer.fit(&Vec::<String>::new()).is_err());
        assert!(vectorizer.fit(&["a b c"]).is_err());
    }

    #[test]
    fn test_serde_round_trip_keeps_weights() {
        let mut vectorizer = TfIdfVectorizer::new(TfIdfParams::default()).unwrap();
        vectorizer.fit(&corpus()).unwrap();

        let json = serde_json::to_string(&vectorizer).unwrap();
        let restored: TfIdfVectorizer = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.feature_names(), vectorizer.feature_names());
        assert_eq!(
            restored.transform_one("pip install").unwrap(),
            vectorizer.transform_one("pip install").unwrap()
        );
    }

    #[test]
    fn test_corrupt_state_is_rejected() {
        let json = r#"{"params":{},"vocabulary":{"a":0,"b":0},"idf":[1.0,1.0],"n_documents":1}"#;
        assert!(serde_json::from_str::<TfIdfVectorizer>(json).is_err());
    }
}
