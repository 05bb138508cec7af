//! CSV writer for classification results.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use csv::WriterBuilder;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::corpus::SectionRecord;
use crate::error::Result;

/// Output columns, in file order.
pub const OUTPUT_COLUMNS: [&str; 5] = [
    "file_id",
    "section_id",
    "local_readme_file",
    "heading_markdown",
    "result_code",
];

/// One classified section.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionRow {
    pub file_id: i64,
    pub section_id: i64,
    pub local_readme_file: String,
    pub heading_markdown: String,
    pub result_code: String,
}

impl PredictionRow {
    pub fn new(section: &SectionRecord, result_code: String) -> Self {
        PredictionRow {
            file_id: section.key.file_id,
            section_id: section.key.section_id,
            local_readme_file: section.local_readme_file.clone(),
            heading_markdown: section.heading_markdown.clone(),
            result_code,
        }
    }
}

/// Write `rows` to `path`, replacing any existing file.
///
/// The header is written even when `rows` is empty.
pub fn write_predictions(path: &Path, rows: &[PredictionRow]) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(BufWriter::new(file));

    writer.write_record(OUTPUT_COLUMNS)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    info!(path = %path.display(), rows = rows.len(), "wrote predictions");
    Ok(())
}
