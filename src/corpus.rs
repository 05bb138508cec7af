//! Section corpus extraction from the SQLite store.
//!
//! Sections live in two tables sharing the composite key
//! `(file_id, section_id)`: `target_section_overview` holds the heading and
//! file metadata, `target_section_content` the markup-free body text. The
//! store is always opened read-only.

use std::fmt;
use std::path::{Path, PathBuf};

use rusqlite::{Connection, OpenFlags, Row};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::Result;

/// Join of the overview and content tables, one row per section.
pub const SECTION_QUERY: &str = "
    SELECT t1.file_id, t1.section_id, t1.url, t1.local_readme_file, t1.heading_markdown,
           t1.heading_text, t2.content_text_w_o_tags,
           t1.abstracted_heading_text || ' ' || t2.content_text_w_o_tags
               AS abstracted_heading_plus_content
    FROM target_section_overview t1
    JOIN target_section_content t2
      ON t1.file_id = t2.file_id AND t1.section_id = t2.section_id
";

/// Composite key of a README section.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct SectionKey {
    pub file_id: i64,
    pub section_id: i64,
}

impl SectionKey {
    pub fn new(file_id: i64, section_id: i64) -> Self {
        SectionKey {
            file_id,
            section_id,
        }
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.file_id, self.section_id)
    }
}

/// One README section as returned by [`SECTION_QUERY`].
///
/// SQL NULLs are read as empty strings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionRecord {
    pub key: SectionKey,
    pub url: String,
    pub local_readme_file: String,
    pub heading_markdown: String,
    pub heading_text: String,
    pub content_text_w_o_tags: String,
    pub abstracted_heading_plus_content: String,
}

impl SectionRecord {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(SectionRecord {
            key: SectionKey::new(row.get(0)?, row.get(1)?),
            url: text(row, 2)?,
            local_readme_file: text(row, 3)?,
            heading_markdown: text(row, 4)?,
            heading_text: text(row, 5)?,
            content_text_w_o_tags: text(row, 6)?,
            abstracted_heading_plus_content: text(row, 7)?,
        })
    }
}

fn text(row: &Row<'_>, idx: usize) -> rusqlite::Result<String> {
    Ok(row.get::<_, Option<String>>(idx)?.unwrap_or_default())
}

/// Read-only handle on the section database.
pub struct SectionStore {
    conn: Connection,
    path: PathBuf,
}

impl fmt::Debug for SectionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SectionStore")
            .field("path", &self.path)
            .finish()
    }
}

impl SectionStore {
    /// Open an existing database read-only. A missing file is an error.
    pub fn open_read_only(path: &Path) -> Result<Self> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        debug!(path = %path.display(), "opened section database");
        Ok(SectionStore {
            conn,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run the section join and materialize every row.
    pub fn fetch_sections(&self) -> Result<Vec<SectionRecord>> {
        let mut stmt = self.conn.prepare(SECTION_QUERY)?;
        let sections = stmt
            .query_map([], SectionRecord::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        info!(rows = sections.len(), "extracted sections");
        Ok(sections)
    }

    /// Close the connection, logging instead of failing if SQLite refuses.
    pub fn close(self) {
        let path = self.path;
        match self.conn.close() {
            Ok(()) => debug!(path = %path.display(), "closed section database"),
            Err((_, e)) => warn!(path = %path.display(), error = %e, "failed to close section database"),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::create_db;
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_fetch_sections_joins_on_both_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sections.db");
        create_db(
            &path,
            &[
                (SectionKey::new(1, 1), "Installation", "run cargo install"),
                (SectionKey::new(1, 2), "License", "MIT"),
            ],
        );
        // Content row with no overview partner must not appear.
        Connection::open(&path)
            .unwrap()
            .execute(
                "INSERT INTO target_section_content VALUES (2, 1, 'orphan')",
                [],
            )
            .unwrap();

        let store = SectionStore::open_read_only(&path).unwrap();
        let sections = store.fetch_sections().unwrap();
        store.close();

        assert_eq!(sections.len(), 2);
        let install = sections
            .iter()
            .find(|s| s.key == SectionKey::new(1, 1))
            .unwrap();
        assert_eq!(install.heading_text, "Installation");
        assert_eq!(install.heading_markdown, "## Installation");
        assert_eq!(install.local_readme_file, "1.md");
        assert_eq!(
            install.abstracted_heading_plus_content,
            "installation run cargo install"
        );
    }

    #[test]
    fn test_null_text_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sections.db");
        create_db(&path, &[]);
        let conn = Connection::open(&path).unwrap();
        conn.execute(
            "INSERT INTO target_section_overview VALUES (5, 1, NULL, NULL, NULL, NULL, NULL)",
            [],
        )
        .unwrap();
        conn.execute("INSERT INTO target_section_content VALUES (5, 1, NULL)", [])
            .unwrap();

        let store = SectionStore::open_read_only(&path).unwrap();
        let sections = store.fetch_sections().unwrap();

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].url, "");
        assert_eq!(sections[0].abstracted_heading_plus_content, "");
    }

    #[test]
    fn test_missing_tables_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.db");
        Connection::open(&path)
            .unwrap()
            .execute_batch("CREATE TABLE unrelated (id INTEGER);")
            .unwrap();

        let store = SectionStore::open_read_only(&path).unwrap();
        assert!(store.fetch_sections().is_err());
    }

    #[test]
    fn test_missing_file_is_not_created() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.db");

        assert!(SectionStore::open_read_only(&path).is_err());
        assert!(!path.exists());
    }
}
