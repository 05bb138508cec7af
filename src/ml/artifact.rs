//! On-disk model artifacts.
//!
//! Every artifact file starts with a small header naming the artifact kind and
//! format version, followed by the serde payload. The encoding is picked from
//! the file extension: `.json` files are JSON, everything else is bincode.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{ClassifierError, Result};
use crate::ml::binarizer::MultiLabelBinarizer;
use crate::ml::linear::LinearClassifier;
use crate::ml::tfidf::TfIdfVectorizer;

/// Current artifact format version.
pub const FORMAT_VERSION: u32 = 1;

/// A model object that can be stored as an artifact file.
pub trait ModelArtifact: Serialize + DeserializeOwned {
    /// Kind tag written into the header.
    const KIND: &'static str;

    /// Consistency check run after loading.
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

impl ModelArtifact for TfIdfVectorizer {
    const KIND: &'static str = "tfidf_vectorizer";
}

impl ModelArtifact for MultiLabelBinarizer {
    const KIND: &'static str = "multilabel_binarizer";
}

impl ModelArtifact for LinearClassifier {
    const KIND: &'static str = "linear_classifier";

    fn validate(&self) -> Result<()> {
        LinearClassifier::validate(self)
    }
}

/// Encoding of an artifact file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArtifactFormat {
    Json,
    Bincode,
}

impl ArtifactFormat {
    /// Pick the encoding from the file extension.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ArtifactFormat::Json,
            _ => ArtifactFormat::Bincode,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct Header {
    kind: String,
    format_version: u32,
}

impl Header {
    fn check<T: ModelArtifact>(&self, path: &Path) -> Result<()> {
        if self.kind != T::KIND {
            return Err(ClassifierError::artifact(format!(
                "{} holds a '{}' artifact, expected '{}'",
                path.display(),
                self.kind,
                T::KIND
            )));
        }
        if self.format_version != FORMAT_VERSION {
            return Err(ClassifierError::artifact(format!(
                "{} has format version {}, supported version is {FORMAT_VERSION}",
                path.display(),
                self.format_version
            )));
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct JsonEnvelopeRef<'a, T> {
    #[serde(flatten)]
    header: Header,
    payload: &'a T,
}

#[derive(Deserialize)]
struct JsonEnvelope {
    #[serde(flatten)]
    header: Header,
    payload: serde_json::Value,
}

/// Write `value` to `path`, replacing any existing file.
pub fn save_artifact<T: ModelArtifact>(path: &Path, value: &T) -> Result<()> {
    let header = Header {
        kind: T::KIND.to_string(),
        format_version: FORMAT_VERSION,
    };
    let mut writer = BufWriter::new(File::create(path)?);

    match ArtifactFormat::from_path(path) {
        ArtifactFormat::Json => {
            serde_json::to_writer_pretty(
                &mut writer,
                &JsonEnvelopeRef {
                    header,
                    payload: value,
                },
            )?;
        }
        ArtifactFormat::Bincode => {
            bincode::serialize_into(&mut writer, &header)?;
            bincode::serialize_into(&mut writer, value)?;
        }
    }

    writer.flush()?;
    info!(path = %path.display(), kind = T::KIND, "saved model artifact");
    Ok(())
}

/// Read an artifact of type `T` from `path`.
pub fn load_artifact<T: ModelArtifact>(path: &Path) -> Result<T> {
    let file = File::open(path).map_err(|e| {
        ClassifierError::artifact(format!("cannot open {}: {e}", path.display()))
    })?;
    let mut reader = BufReader::new(file);

    let value: T = match ArtifactFormat::from_path(path) {
        ArtifactFormat::Json => {
            let envelope: JsonEnvelope = serde_json::from_reader(reader)?;
            envelope.header.check::<T>(path)?;
            serde_json::from_value(envelope.payload)?
        }
        ArtifactFormat::Bincode => {
            let header: Header = bincode::deserialize_from(&mut reader)?;
            header.check::<T>(path)?;
            bincode::deserialize_from(&mut reader)?
        }
    };

    value.validate()?;
    Ok(value)
}

/// The three artifacts the classification run needs.
#[derive(Debug, Clone)]
pub struct ModelArtifacts {
    pub vectorizer: TfIdfVectorizer,
    pub binarizer: MultiLabelBinarizer,
    pub classifier: LinearClassifier,
}

impl ModelArtifacts {
    /// Load all three artifacts and check they fit together.
    pub fn load(vectorizer_path: &Path, binarizer_path: &Path, model_path: &Path) -> Result<Self> {
        let vectorizer: TfIdfVectorizer = load_artifact(vectorizer_path)?;
        let binarizer: MultiLabelBinarizer = load_artifact(binarizer_path)?;
        let classifier: LinearClassifier = load_artifact(model_path)?;

        if classifier.n_labels() != binarizer.n_classes() {
            return Err(ClassifierError::artifact(format!(
                "classifier predicts {} labels but the binarizer knows {} classes",
                classifier.n_labels(),
                binarizer.n_classes()
            )));
        }
        if !binarizer.is_unambiguous() {
            warn!(
                classes = ?binarizer.classes(),
                "label tokens differ in width; joined result codes cannot be split back"
            );
        }

        info!(
            vocabulary_size = vectorizer.vocabulary_size(),
            classes = binarizer.n_classes(),
            features = classifier.n_features(),
            "loaded model artifacts"
        );

        Ok(ModelArtifacts {
            vectorizer,
            binarizer,
            classifier,
        })
    }

    /// Write all three artifacts.
    pub fn save(&self, vectorizer_path: &Path, binarizer_path: &Path, model_path: &Path) -> Result<()> {
        save_artifact(vectorizer_path, &self.vectorizer)?;
        save_artifact(binarizer_path, &self.binarizer)?;
        save_artifact(model_path, &self.classifier)?;
        Ok(())
    }
}
