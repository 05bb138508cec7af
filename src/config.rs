//! Pipeline configuration read from an INI file.
//!
//! The file follows the conventions of Python's `configparser`:
//!
//! ```ini
//! [DEFAULT]
//! db_filename = ../../data/database.db
//! rng_seed = 42
//! vectorizer_filename = ../../model/vectorizer.json
//! binarizer_filename = ../../model/binarizer.json
//! model_filename = ../../model/classifier.json
//! output_filename = ../../output/classified_target.csv
//! ```
//!
//! Keys are case-insensitive, `=` and `:` both separate keys from values,
//! lines starting with `#` or `;` are comments, and keys of `[DEFAULT]` are
//! visible from every other section. The six keys above are required and have
//! no defaults.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{ClassifierError, Result};

/// Name of the section whose keys every other section inherits.
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// Default location of the config file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "../../config/config.cfg";

/// A parsed INI document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IniDocument {
    sections: BTreeMap<String, BTreeMap<String, String>>,
}

impl IniDocument {
    /// Parse INI text.
    pub fn parse(text: &str) -> Result<Self> {
        let mut document = IniDocument::default();
        let mut current: Option<String> = None;

        for (line_no, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if let Some(rest) = line.strip_prefix('[') {
                let name = rest.strip_suffix(']').ok_or_else(|| {
                    ClassifierError::config(format!(
                        "line {}: unterminated section header '{line}'",
                        line_no + 1
                    ))
                })?;
                let name = name.trim().to_string();
                document.sections.entry(name.clone()).or_default();
                current = Some(name);
                continue;
            }

            let section = current.as_ref().ok_or_else(|| {
                ClassifierError::config(format!(
                    "line {}: key outside of any section",
                    line_no + 1
                ))
            })?;

            let split = line.find(['=', ':']).ok_or_else(|| {
                ClassifierError::config(format!(
                    "line {}: expected 'key = value', found '{line}'",
                    line_no + 1
                ))
            })?;
            let key = line[..split].trim().to_lowercase();
            let value = line[split + 1..].trim().to_string();
            if key.is_empty() {
                return Err(ClassifierError::config(format!(
                    "line {}: empty key",
                    line_no + 1
                )));
            }

            document
                .sections
                .entry(section.clone())
                .or_default()
                .insert(key, value);
        }

        Ok(document)
    }

    /// Look up `key` in `section`, falling back to `[DEFAULT]`.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        let key = key.to_lowercase();
        self.sections
            .get(section)
            .and_then(|values| values.get(&key))
            .or_else(|| {
                self.sections
                    .get(DEFAULT_SECTION)
                    .and_then(|values| values.get(&key))
            })
            .map(String::as_str)
    }

    /// Like [`get`](Self::get), but a missing key is an error.
    pub fn require(&self, section: &str, key: &str) -> Result<&str> {
        self.get(section, key).ok_or_else(|| {
            ClassifierError::config(format!("missing key '{key}' in section [{section}]"))
        })
    }

    pub fn has_section(&self, section: &str) -> bool {
        self.sections.contains_key(section)
    }
}

/// Settings of one classification (or training) run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassifierConfig {
    pub db_filename: PathBuf,
    pub rng_seed: u64,
    pub vectorizer_filename: PathBuf,
    pub binarizer_filename: PathBuf,
    pub model_filename: PathBuf,
    pub output_filename: PathBuf,
}

impl ClassifierConfig {
    /// Read the configuration from the `[DEFAULT]` section of an INI file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            ClassifierError::config(format!("cannot read {}: {e}", path.display()))
        })?;
        let config = Self::from_ini_str(&text)?;
        info!(path = %path.display(), db = %config.db_filename.display(), "loaded configuration");
        Ok(config)
    }

    /// Parse the configuration from INI text.
    pub fn from_ini_str(text: &str) -> Result<Self> {
        let ini = IniDocument::parse(text)?;
        let path = |key: &str| -> Result<PathBuf> {
            Ok(PathBuf::from(ini.require(DEFAULT_SECTION, key)?))
        };

        let seed = ini.require(DEFAULT_SECTION, "rng_seed")?;
        let rng_seed = seed.parse::<u64>().map_err(|e| {
            ClassifierError::config(format!("rng_seed '{seed}' is not an integer: {e}"))
        })?;

        Ok(ClassifierConfig {
            db_filename: path("db_filename")?,
            rng_seed,
            vectorizer_filename: path("vectorizer_filename")?,
            binarizer_filename: path("binarizer_filename")?,
            model_filename: path("model_filename")?,
            output_filename: path("output_filename")?,
        })
    }

    /// Render as INI text that [`from_ini_str`](Self::from_ini_str) reads back.
    pub fn to_ini_string(&self) -> String {
        format!(
            "[{DEFAULT_SECTION}]\n\
             db_filename = {}\n\
             rng_seed = {}\n\
             vectorizer_filename = {}\n\
             binarizer_filename = {}\n\
             model_filename = {}\n\
             output_filename = {}\n",
            self.db_filename.display(),
            self.rng_seed,
            self.vectorizer_filename.display(),
            self.binarizer_filename.display(),
            self.model_filename.display(),
            self.output_filename.display(),
        )
    }
}
