//! Heuristic features derived from a section's URL, heading and content.
//!
//! The block is computed independently of the TF-IDF block and joined to it
//! by section key (see [`KeyedFeatures::hstack`]).

use std::sync::LazyLock;

use regex::Regex;

use crate::corpus::SectionRecord;
use crate::error::{ClassifierError, Result};
use crate::features::table::KeyedFeatures;
use crate::ml::matrix::DenseMatrix;

/// Placeholder tokens left in abstracted section text.
const ABSTR_CODE: &str = "@abstr_code_section";
const ABSTR_HYPERLINK: &str = "@abstr_hyperlink";
const ABSTR_IMAGE: &str = "@abstr_image";

/// Heading keyword groups, one indicator column each.
///
/// Keywords are matched at the start of a word, so stems like `contribut`
/// cover "contributing" and "contributors".
const HEADING_GROUPS: &[(&str, &[&str])] = &[
    (
        "what",
        &["introduction", "overview", "about", "description", "what is", "summary", "project"],
    ),
    (
        "why",
        &["why", "motivation", "features", "advantages", "benefits", "comparison", "goals"],
    ),
    (
        "how",
        &[
            "install", "usage", "getting started", "setup", "set up", "configur", "build",
            "example", "tutorial", "quick start", "quickstart", "how to", "requirements",
            "prerequisites", "running", "deploy", "compil", "test",
        ],
    ),
    (
        "when",
        &[
            "changelog", "change log", "release", "history", "version", "roadmap", "news",
            "status", "todo", "upcoming",
        ],
    ),
    (
        "who",
        &[
            "author", "team", "credits", "acknowledg", "maintainer", "license", "licence",
            "contact", "copyright", "thanks", "sponsor", "support",
        ],
    ),
    (
        "references",
        &[
            "documentation", "docs", "reference", "api", "links", "see also", "related", "faq",
            "resources", "further reading", "more information",
        ],
    ),
    (
        "contribution",
        &["contribut", "develop", "pull request", "issue", "bug", "hacking", "code of conduct"],
    ),
    (
        "other",
        &["table of contents", "contents", "toc", "badge", "screenshot", "demo"],
    ),
];

static HEADING_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    HEADING_GROUPS
        .iter()
        .map(|(_, keywords)| {
            let alternatives = keywords
                .iter()
                .map(|k| regex::escape(k))
                .collect::<Vec<_>>()
                .join("|");
            Regex::new(&format!(r"\b(?:{alternatives})"))
                .expect("heading keyword patterns are valid regexes")
        })
        .collect()
});

static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https?://").expect("url pattern is a valid regex")
});

/// Derives a fixed-width numeric block from section text.
pub trait FeatureDeriver: Send + Sync {
    /// Column names, in the order [`derive`](Self::derive) emits values.
    fn feature_names(&self) -> Vec<String>;

    /// Features of one section.
    fn derive(&self, url: &str, heading_text: &str, content_text: &str) -> Vec<f64>;

    /// Get the name of this deriver (for logging).
    fn name(&self) -> &str;

    /// Derive the block for `sections`, one keyed row per section in input order.
    fn derive_block(&self, sections: &[SectionRecord]) -> Result<KeyedFeatures> {
        let names = self.feature_names();
        let mut rows = Vec::with_capacity(sections.len());
        for section in sections {
            let row = self.derive(
                &section.url,
                &section.heading_text,
                &section.content_text_w_o_tags,
            );
            if row.len() != names.len() {
                return Err(ClassifierError::shape(format!(
                    "deriver '{}' produced {} values for section {}, expected {}",
                    self.name(),
                    row.len(),
                    section.key,
                    names.len()
                )));
            }
            rows.push(row);
        }

        let keys = sections.iter().map(|s| s.key).collect();
        let n_cols = names.len();
        KeyedFeatures::new(keys, names, DenseMatrix::from_rows(rows, n_cols)?)
    }
}

/// Default README heuristics.
#[derive(Clone, Debug, Default)]
pub struct ReadmeHeuristics;

impl ReadmeHeuristics {
    pub fn new() -> Self {
        ReadmeHeuristics
    }

    /// Repository name from the last path segment of a repository URL.
    fn repository_name(url: &str) -> Option<String> {
        let segment = url
            .trim_end_matches('/')
            .rsplit('/')
            .next()?
            .trim_end_matches(".git");
        let name = normalize_name(segment);
        (name.chars().count() >= 2 && !url.is_empty()).then_some(name)
    }
}

fn normalize_name(text: &str) -> String {
    text.to_lowercase()
        .replace(&['-', '_'][..], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn indicator(flag: bool) -> f64 {
    if flag { 1.0 } else { 0.0 }
}

impl FeatureDeriver for ReadmeHeuristics {
    fn feature_names(&self) -> Vec<String> {
        let mut names: Vec<String> = HEADING_GROUPS
            .iter()
            .map(|(group, _)| format!("heur_heading_{group}"))
            .collect();
        names.extend(
            [
                "heur_heading_repo_name",
                "heur_has_code",
                "heur_hyperlinks",
                "heur_has_image",
                "heur_content_empty",
                "heur_content_words",
            ]
            .map(String::from),
        );
        names
    }

    fn derive(&self, url: &str, heading_text: &str, content_text: &str) -> Vec<f64> {
        let heading = heading_text.to_lowercase();
        let content = content_text.to_lowercase();

        let mut features: Vec<f64> = HEADING_PATTERNS
            .iter()
            .map(|pattern| indicator(pattern.is_match(&heading)))
            .collect();

        let repo_match = Self::repository_name(url)
            .is_some_and(|name| normalize_name(&heading).contains(&name));
        features.push(indicator(repo_match));

        features.push(indicator(content.contains(ABSTR_CODE) || content.contains("```")));

        let links = content.matches(ABSTR_HYPERLINK).count() + URL_PATTERN.find_iter(&content).count();
        features.push((links as f64).ln_1p());

        features.push(indicator(content.contains(ABSTR_IMAGE) || content.contains("![")));

        features.push(indicator(content.trim().is_empty()));

        let words = content.split_whitespace().count();
        features.push((words as f64).ln_1p());

        features
    }

    fn name(&self) -> &str {
        "readme_heuristics"
    }
}
