//! End-to-end classification run.
//!
//! ```text
//! config -> artifacts -> SQLite join -> TF-IDF ┐
//!                                  heuristics ─┴ keyed hstack -> predict -> decode -> CSV
//! ```

use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::config::ClassifierConfig;
use crate::corpus::{SectionRecord, SectionStore};
use crate::error::Result;
use crate::features::{FeatureDeriver, KeyedFeatures, ReadmeHeuristics};
use crate::ml::{ModelArtifacts, TfIdfVectorizer};
use crate::output::{PredictionRow, write_predictions};

/// Loaded models plus the heuristic feature deriver.
pub struct ClassificationPipeline {
    artifacts: ModelArtifacts,
    deriver: Box<dyn FeatureDeriver>,
}

impl std::fmt::Debug for ClassificationPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassificationPipeline")
            .field("artifacts", &self.artifacts)
            .field("deriver", &self.deriver.name())
            .finish()
    }
}

impl ClassificationPipeline {
    /// Pipeline using the default [`ReadmeHeuristics`].
    pub fn new(artifacts: ModelArtifacts) -> Self {
        Self::with_deriver(artifacts, Box::new(ReadmeHeuristics::new()))
    }

    pub fn with_deriver(artifacts: ModelArtifacts, deriver: Box<dyn FeatureDeriver>) -> Self {
        ClassificationPipeline { artifacts, deriver }
    }

    pub fn artifacts(&self) -> &ModelArtifacts {
        &self.artifacts
    }

    /// Build the combined feature table for `sections`.
    pub fn features(&self, sections: &[SectionRecord]) -> Result<KeyedFeatures> {
        combined_features(&self.artifacts.vectorizer, self.deriver.as_ref(), sections)
    }

    /// Predict a result code for every section.
    pub fn classify(&self, sections: &[SectionRecord]) -> Result<Vec<PredictionRow>> {
        let features = self.features(sections)?;

        let classifier = &self.artifacts.classifier;
        classifier.check_feature_names(features.columns())?;
        let labels = classifier.predict(features.matrix())?;
        let codes = self.artifacts.binarizer.decode_joined(&labels)?;

        Ok(sections
            .iter()
            .zip(codes)
            .map(|(section, code)| PredictionRow::new(section, code))
            .collect())
    }

    /// Query the store, classify every section and write the CSV.
    ///
    /// Nothing is written unless every row was classified.
    pub fn process(&self, store: &SectionStore, output: &Path) -> Result<usize> {
        let sections = store.fetch_sections()?;
        let rows = self.classify(&sections)?;
        write_predictions(output, &rows)?;
        Ok(rows.len())
    }
}

/// TF-IDF block of `sections` joined with the deriver's block.
///
/// TF-IDF columns come first, derived columns after, rows in section order.
pub fn combined_features(
    vectorizer: &TfIdfVectorizer,
    deriver: &dyn FeatureDeriver,
    sections: &[SectionRecord],
) -> Result<KeyedFeatures> {
    let keys = sections.iter().map(|s| s.key).collect();
    let corpus: Vec<&str> = sections
        .iter()
        .map(|s| s.abstracted_heading_plus_content.as_str())
        .collect();

    let tfidf = KeyedFeatures::from_csr(
        keys,
        vectorizer.feature_names(),
        &vectorizer.transform(&corpus)?,
    )?;
    info!(rows = tfidf.n_rows(), cols = tfidf.n_cols(), "tf-idf matrix shape");

    info!(deriver = deriver.name(), "Deriving features");
    let derived = deriver.derive_block(sections)?;

    let combined = tfidf.hstack(&derived)?;
    info!(
        rows = combined.n_rows(),
        cols = combined.n_cols(),
        "combined feature shape"
    );
    Ok(combined)
}

/// Outcome of a successful [`run`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub rows_written: usize,
    pub output_filename: PathBuf,
    pub duration_seconds: f64,
}

/// Classify every section of the configured database.
///
/// Artifact loading errors propagate untouched. Failures from the query onward
/// are logged, the database is closed, and the error is returned.
pub fn run(config: &ClassifierConfig) -> Result<RunSummary> {
    let start = Instant::now();

    let artifacts = ModelArtifacts::load(
        &config.vectorizer_filename,
        &config.binarizer_filename,
        &config.model_filename,
    )?;
    let pipeline = ClassificationPipeline::new(artifacts);

    let store = SectionStore::open_read_only(&config.db_filename).inspect_err(|e| {
        error!(path = %config.db_filename.display(), error = %e, "cannot open section database")
    })?;
    let outcome = pipeline.process(&store, &config.output_filename);
    store.close();

    let rows_written = outcome.inspect_err(|e| error!(error = %e, "classification failed"))?;

    let duration_seconds = start.elapsed().as_secs_f64();
    info!("Processing completed in {duration_seconds}");

    Ok(RunSummary {
        rows_written,
        output_filename: config.output_filename.clone(),
        duration_seconds,
    })
}
