//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::{Connection, params};
use tempfile::TempDir;

use readme_classifier::config::ClassifierConfig;
use readme_classifier::features::{FeatureDeriver, ReadmeHeuristics};
use readme_classifier::ml::{
    LinearClassifier, ModelArtifacts, MultiLabelBinarizer, TfIdfParams, TfIdfVectorizer,
};

pub const SCHEMA: &str = "
    CREATE TABLE target_section_overview (
        file_id INTEGER, section_id INTEGER, url TEXT, local_readme_file TEXT,
        heading_markdown TEXT, heading_text TEXT, abstracted_heading_text TEXT
    );
    CREATE TABLE target_section_content (
        file_id INTEGER, section_id INTEGER, content_text_w_o_tags TEXT
    );
";

/// A section row: `(file_id, section_id, heading, content)`.
pub type Section<'a> = (i64, i64, &'a str, &'a str);

/// Create a section database with both tables populated from `sections`.
pub fn create_db(path: &Path, sections: &[Section<'_>]) {
    let conn = Connection::open(path).unwrap();
    conn.execute_batch(SCHEMA).unwrap();
    for &(file_id, section_id, heading, content) in sections {
        conn.execute(
            "INSERT INTO target_section_overview VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                file_id,
                section_id,
                "https://github.com/acme/widget",
                format!("{file_id}.md"),
                format!("## {heading}"),
                heading,
                heading.to_lowercase(),
            ],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO target_section_content VALUES (?1, ?2, ?3)",
            params![file_id, section_id, content],
        )
        .unwrap();
    }
}

/// Config with every path inside `dir`.
pub fn config_in(dir: &TempDir, artifact_ext: &str) -> ClassifierConfig {
    let path = |name: &str| -> PathBuf { dir.path().join(name) };
    ClassifierConfig {
        db_filename: path("sections.db"),
        rng_seed: 42,
        vectorizer_filename: path(&format!("vectorizer.{artifact_ext}")),
        binarizer_filename: path(&format!("binarizer.{artifact_ext}")),
        model_filename: path(&format!("classifier.{artifact_ext}")),
        output_filename: path("classified.csv"),
    }
}

/// Write `config` as an INI file and return its path.
pub fn write_config(dir: &TempDir, config: &ClassifierConfig) -> PathBuf {
    let path = dir.path().join("config.cfg");
    fs::write(&path, config.to_ini_string()).unwrap();
    path
}

/// Hand-weighted model: label "1" fires on "install", label "3" on "license".
pub fn fixed_artifacts() -> ModelArtifacts {
    let mut vectorizer = TfIdfVectorizer::new(TfIdfParams::default()).unwrap();
    vectorizer.fit(&["install", "license"]).unwrap();

    let heuristics = ReadmeHeuristics::new().feature_names();
    let row = |install: f64, license: f64| {
        let mut w = vec![install, license];
        w.extend(std::iter::repeat_n(0.0, heuristics.len()));
        w
    };

    let mut names = vectorizer.feature_names();
    names.extend(heuristics.iter().cloned());
    let classifier = LinearClassifier::new(vec![row(1.0, 0.0), row(0.0, 1.0)], vec![-0.5, -0.5])
        .unwrap()
        .with_feature_names(names)
        .unwrap();

    ModelArtifacts {
        vectorizer,
        binarizer: MultiLabelBinarizer::with_classes(["1", "3"]),
        classifier,
    }
}

/// Save [`fixed_artifacts`] to the paths in `config`.
pub fn save_fixed_artifacts(config: &ClassifierConfig) {
    fixed_artifacts()
        .save(
            &config.vectorizer_filename,
            &config.binarizer_filename,
            &config.model_filename,
        )
        .unwrap();
}

/// Parse the output CSV into `(file_id, section_id, result_code)` triples.
pub fn read_output(path: &Path) -> (Vec<String>, Vec<(i64, i64, String)>) {
    let mut reader = csv::Reader::from_path(path).unwrap();
    let headers = reader.headers().unwrap().iter().map(String::from).collect();
    let rows = reader
        .records()
        .map(|record| {
            let record = record.unwrap();
            (
                record[0].parse().unwrap(),
                record[1].parse().unwrap(),
                record[4].to_string(),
            )
        })
        .collect();
    (headers, rows)
}
