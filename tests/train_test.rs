//! Integration tests for training followed by classification.

mod common;

use std::fs;

use tempfile::TempDir;

use common::*;
use readme_classifier::ml::ModelArtifacts;
use readme_classifier::pipeline::run;
use readme_classifier::training::train;

const LABELLED: &str = "\
file_id,section_id,url,heading_text,abstracted_heading_text,content_text_w_o_tags,section_code
1,1,https://github.com/acme/widget,Installation,installation,run cargo install widget,3
1,2,https://github.com/acme/widget,License,license,released under the mit license,6
2,1,https://github.com/acme/gadget,Install,install,cargo install gadget from crates,3
2,2,https://github.com/acme/gadget,License,license,apache license version two,6
3,1,https://github.com/acme/thing,Setup,setup,install with cargo and license is mit,\"3,6\"
3,2,https://github.com/acme/thing,Screenshots,screenshots,pictures of the thing,
";

#[test]
fn test_train_writes_loadable_artifacts() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir, "json");
    let input = dir.path().join("labelled.csv");
    fs::write(&input, LABELLED).unwrap();

    let summary = train(&config, &input).unwrap();

    assert_eq!(summary.samples, 6);
    assert_eq!(summary.classes, vec!["3", "6"]);
    let artifacts = ModelArtifacts::load(
        &config.vectorizer_filename,
        &config.binarizer_filename,
        &config.model_filename,
    )
    .unwrap();
    assert_eq!(artifacts.vectorizer.vocabulary_size(), summary.vocabulary_size);
    assert!(artifacts.classifier.feature_names().is_some());
}

#[test]
fn test_trained_model_classifies_database() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir, "bin");
    let input = dir.path().join("labelled.csv");
    fs::write(&input, LABELLED).unwrap();
    train(&config, &input).unwrap();

    create_db(
        &config.db_filename,
        &[
            (10, 1, "Installation", "run cargo install widget"),
            (10, 2, "License", "released under the mit license"),
        ],
    );
    let summary = run(&config).unwrap();

    assert_eq!(summary.rows_written, 2);
    let (_, mut rows) = read_output(&config.output_filename);
    rows.sort();
    assert_eq!(
        rows,
        vec![(10, 1, "3".to_string()), (10, 2, "6".to_string())]
    );
}

#[test]
fn test_training_depends_only_on_seed() {
    let dir = TempDir::new().unwrap();
    let first = config_in(&dir, "json");
    let second = readme_classifier::config::ClassifierConfig {
        model_filename: dir.path().join("classifier-again.json"),
        ..first.clone()
    };
    let input = dir.path().join("labelled.csv");
    fs::write(&input, LABELLED).unwrap();

    train(&first, &input).unwrap();
    let a = fs::read_to_string(&first.model_filename).unwrap();
    train(&second, &input).unwrap();
    let b = fs::read_to_string(&second.model_filename).unwrap();

    assert_eq!(a, b);
}

#[test]
fn test_missing_input_fails() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir, "json");

    assert!(train(&config, &dir.path().join("absent.csv")).is_err());
    assert!(!config.model_filename.exists());
}
