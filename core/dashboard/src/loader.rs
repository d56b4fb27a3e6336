//! FILENAME: core/dashboard/src/loader.rs
//!
//! Data source resolution. A session shows either the seeded sample
//! table or an uploaded file; an upload that fails to parse falls back
//! to the sample so the dashboard never renders empty-handed.

use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

use dataset::{generate_sample, DataTable, SampleConfig};
use persistence::{read_upload, UploadedFile};

// ============================================================================
// SOURCES
// ============================================================================

/// Where the session's table comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    /// Synthetic data from the configured sample generator.
    Sample,
    /// A file handed over by the upload control.
    Upload(UploadedFile),
}

/// Stable identity of a source, used to decide whether a load can be
/// skipped. Sample identity is the generator seed; upload identity is a
/// hash over name and content, so re-uploading identical bytes is a
/// no-op while a same-named edited file is not.
pub fn source_key(source: &DataSource, sample: &SampleConfig) -> String {
    match source {
        DataSource::Sample => format!("sample:{}", sample.seed),
        DataSource::Upload(file) => {
            let mut hasher = FxHasher::default();
            file.name.hash(&mut hasher);
            file.bytes.hash(&mut hasher);
            format!("upload:{:016x}", hasher.finish())
        }
    }
}

// ============================================================================
// LOADING
// ============================================================================

/// Result of resolving a source: the table, plus a user-facing warning
/// when the requested upload was unusable and sample data stands in.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadOutcome {
    pub table: DataTable,
    pub warning: Option<String>,
}

pub fn load_table(source: &DataSource, sample: &SampleConfig) -> LoadOutcome {
    match source {
        DataSource::Sample => LoadOutcome { table: generate_sample(sample), warning: None },
        DataSource::Upload(file) => match read_upload(file) {
            Ok(table) => LoadOutcome { table, warning: None },
            Err(error) => {
                log::warn!("upload '{}' unreadable, serving sample data: {}", file.name, error);
                LoadOutcome {
                    table: generate_sample(sample),
                    warning: Some(format!("文件读取错误: {}", error)),
                }
            }
        },
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(name: &str, body: &str) -> DataSource {
        DataSource::Upload(UploadedFile::new(name, body.as_bytes().to_vec()))
    }

    #[test]
    fn test_sample_key_tracks_seed() {
        let mut sample = SampleConfig::default();
        assert_eq!(source_key(&DataSource::Sample, &sample), "sample:42");
        sample.seed = 7;
        assert_eq!(source_key(&DataSource::Sample, &sample), "sample:7");
    }

    #[test]
    fn test_upload_key_tracks_name_and_content() {
        let sample = SampleConfig::default();
        let a = source_key(&upload("a.csv", "x,y\n1,2\n"), &sample);
        let same = source_key(&upload("a.csv", "x,y\n1,2\n"), &sample);
        let renamed = source_key(&upload("b.csv", "x,y\n1,2\n"), &sample);
        let edited = source_key(&upload("a.csv", "x,y\n1,3\n"), &sample);

        assert_eq!(a, same);
        assert_ne!(a, renamed);
        assert_ne!(a, edited);
    }

    #[test]
    fn test_load_sample_is_deterministic() {
        let sample = SampleConfig::default();
        let first = load_table(&DataSource::Sample, &sample);
        let second = load_table(&DataSource::Sample, &sample);
        assert_eq!(first.table, second.table);
        assert_eq!(first.warning, None);
    }

    #[test]
    fn test_unreadable_upload_falls_back_with_warning() {
        let sample = SampleConfig::default();
        let source = DataSource::Upload(UploadedFile::new(
            "broken.xlsx",
            b"not a workbook".to_vec(),
        ));

        let outcome = load_table(&source, &sample);
        assert!(outcome.warning.as_deref().unwrap().starts_with("文件读取错误"));
        // The stand-in is the sample table, not an empty one.
        assert_eq!(outcome.table, generate_sample(&sample));
    }

    #[test]
    fn test_unknown_extension_falls_back_with_warning() {
        let sample = SampleConfig::default();
        let outcome = load_table(&upload("notes.txt", "hello"), &sample);
        assert!(outcome.warning.is_some());
        assert!(outcome.table.row_count() > 0);
    }
}
