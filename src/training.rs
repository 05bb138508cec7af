//! Fit the three model artifacts from a labelled section CSV.
//!
//! Expected columns:
//!
//! ```csv
//! file_id,section_id,url,heading_text,abstracted_heading_text,content_text_w_o_tags,section_code
//! 1,1,https://github.com/acme/widget,Installation,installation,run cargo install,"3"
//! 1,2,https://github.com/acme/widget,Widget,widget,a fast widget,"1,2"
//! ```
//!
//! `section_code` holds comma-separated label tokens; an empty code is a
//! section with no labels.

use std::path::{Path, PathBuf};
use std::time::Instant;

use csv::{ReaderBuilder, Trim};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::ClassifierConfig;
use crate::corpus::{SectionKey, SectionRecord};
use crate::error::{ClassifierError, Result};
use crate::features::{FeatureDeriver, ReadmeHeuristics};
use crate::ml::{
    LinearClassifier, ModelArtifacts, MultiLabelBinarizer, SgdParams, TfIdfParams,
    TfIdfVectorizer,
};
use crate::pipeline::combined_features;

/// One row of the labelled CSV.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LabelledSection {
    pub file_id: i64,
    pub section_id: i64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub heading_text: String,
    #[serde(default)]
    pub abstracted_heading_text: String,
    #[serde(default)]
    pub content_text_w_o_tags: String,
    #[serde(default)]
    pub section_code: String,
}

impl LabelledSection {
    /// Label tokens of `section_code`, whitespace trimmed, empties dropped.
    pub fn labels(&self) -> Vec<String> {
        self.section_code
            .split(',')
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .map(String::from)
            .collect()
    }

    /// The section as the classifier sees it at prediction time.
    pub fn to_record(&self) -> SectionRecord {
        SectionRecord {
            key: SectionKey::new(self.file_id, self.section_id),
            url: self.url.clone(),
            local_readme_file: String::new(),
            heading_markdown: String::new(),
            heading_text: self.heading_text.clone(),
            content_text_w_o_tags: self.content_text_w_o_tags.clone(),
            abstracted_heading_plus_content: format!(
                "{} {}",
                self.abstracted_heading_text, self.content_text_w_o_tags
            ),
        }
    }
}

/// Read every row of a labelled CSV.
pub fn read_labelled_sections(path: &Path) -> Result<Vec<LabelledSection>> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::Headers)
        .from_path(path)?;

    let sections = reader
        .deserialize()
        .collect::<std::result::Result<Vec<LabelledSection>, _>>()?;

    info!(path = %path.display(), rows = sections.len(), "read labelled sections");
    Ok(sections)
}

/// Hyper-parameters of a training run.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingParams {
    pub tfidf: TfIdfParams,
    pub sgd: SgdParams,
}

/// Fit the vectorizer, binarizer and classifier on labelled sections.
pub fn fit_artifacts(
    sections: &[LabelledSection],
    deriver: &dyn FeatureDeriver,
    params: &TrainingParams,
) -> Result<ModelArtifacts> {
    if sections.is_empty() {
        return Err(ClassifierError::invalid_argument(
            "no labelled sections to train on",
        ));
    }

    let records: Vec<SectionRecord> = sections.iter().map(LabelledSection::to_record).collect();
    let label_sets: Vec<Vec<String>> = sections.iter().map(LabelledSection::labels).collect();

    let unlabelled = label_sets.iter().filter(|labels| labels.is_empty()).count();
    if unlabelled > 0 {
        warn!(unlabelled, "sections without labels are trained as negatives for every label");
    }

    let mut vectorizer = TfIdfVectorizer::new(params.tfidf.clone())?;
    let corpus: Vec<&str> = records
        .iter()
        .map(|r| r.abstracted_heading_plus_content.as_str())
        .collect();
    vectorizer.fit(&corpus)?;

    let mut binarizer = MultiLabelBinarizer::new();
    let targets = binarizer.fit_transform(&label_sets);
    if !binarizer.is_unambiguous() {
        warn!(
            classes = ?binarizer.classes(),
            "label tokens differ in width; joined result codes cannot be split back"
        );
    }

    let features = combined_features(&vectorizer, deriver, &records)?;
    let classifier = LinearClassifier::fit(features.matrix(), &targets, &params.sgd)?
        .with_feature_names(features.columns().to_vec())?;

    info!(
        samples = records.len(),
        vocabulary_size = vectorizer.vocabulary_size(),
        classes = binarizer.n_classes(),
        features = classifier.n_features(),
        "trained classifier"
    );

    Ok(ModelArtifacts {
        vectorizer,
        binarizer,
        classifier,
    })
}

/// Outcome of a successful [`train`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrainSummary {
    pub samples: usize,
    pub vocabulary_size: usize,
    pub classes: Vec<String>,
    pub model_filename: PathBuf,
    pub duration_seconds: f64,
}

/// Train on `input` and write the artifacts to the configured paths.
///
/// The shuffle seed comes from the configuration's `rng_seed`.
pub fn train(config: &ClassifierConfig, input: &Path) -> Result<TrainSummary> {
    let start = Instant::now();

    let sections = read_labelled_sections(input)?;
    let params = TrainingParams {
        sgd: SgdParams {
            seed: config.rng_seed,
            ..SgdParams::default()
        },
        ..TrainingParams::default()
    };

    let artifacts = fit_artifacts(&sections, &ReadmeHeuristics::new(), &params)?;
    artifacts.save(
        &config.vectorizer_filename,
        &config.binarizer_filename,
        &config.model_filename,
    )?;

    let duration_seconds = start.elapsed().as_secs_f64();
    info!("Training completed in {duration_seconds}");

    Ok(TrainSummary {
        samples: sections.len(),
        vocabulary_size: artifacts.vectorizer.vocabulary_size(),
        classes: artifacts.binarizer.classes().to_vec(),
        model_filename: config.model_filename.clone(),
        duration_seconds,
    })
}
