//! Key-source resolution.
//!
//! Determines whether a site supplies its key material inline or through a
//! file, enforces mutual exclusion between the two, and resolves relative
//! paths against the caller-supplied base directory. Source resolution runs
//! before any encoding or algorithm work so that a bad path short-circuits
//! without attempting a decode.

use std::fs;
use std::path::{Path, PathBuf};

use crate::document::SiteRecord;
use crate::error::{SiteRejection, SiteResult};

/// Where a site's key material comes from.
#[derive(Debug, Clone)]
pub enum KeySource {
    /// Inline literal taken from the site element text.
    Inline(String),
    /// Resolved absolute path to a key file.
    File(PathBuf),
}

impl KeySource {
    /// Resolve the key source for a site record.
    ///
    /// Exactly one of the inline key or the path must be set; both or
    /// neither is [`SiteRejection::AmbiguousKeySource`]. Relative paths are
    /// expanded against `base_dir` and must point at a readable file.
    pub fn from_record(record: &SiteRecord, base_dir: &Path) -> SiteResult<Self> {
        let key_defined = !record.key.trim().is_empty();
        let path_defined = !record.path.trim().is_empty();

        if key_defined == path_defined {
            return Err(SiteRejection::AmbiguousKeySource);
        }

        if key_defined {
            return Ok(Self::Inline(record.key.clone()));
        }

        let mut path = PathBuf::from(record.path.trim());
        if !path.is_absolute() {
            path = base_dir.join(path);
        }
        // Probe handle is dropped immediately; the actual read happens at
        // decode time.
        if fs::File::open(&path).is_err() {
            return Err(SiteRejection::KeySourceUnreadable { path });
        }
        Ok(Self::File(path))
    }

    /// Read the raw key bytes.
    ///
    /// File handles are opened per call and released before returning; no
    /// handle outlives a single record's resolution.
    pub fn bytes(&self) -> SiteResult<Vec<u8>> {
        match self {
            Self::Inline(text) => Ok(text.as_bytes().to_vec()),
            Self::File(path) => fs::read(path).map_err(|_| SiteRejection::KeySourceUnreadable {
                path: path.clone(),
            }),
        }
    }

    /// True when the material comes from the inline literal.
    pub fn is_inline(&self) -> bool {
        matches!(self, Self::Inline(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(key: &str, path: &str) -> SiteRecord {
        SiteRecord {
            url: "https://a.example.org".to_string(),
            algorithm: "HS256".to_string(),
            encoding: "plain".to_string(),
            path: path.to_string(),
            default: false,
            key: key.to_string(),
        }
    }

    #[test]
    fn inline_key_wins_when_path_empty() {
        let source = KeySource::from_record(&record("secret", ""), Path::new("/tmp")).unwrap();
        assert!(source.is_inline());
        assert_eq!(source.bytes().unwrap(), b"secret");
    }

    #[test]
    fn both_sources_rejected() {
        let err = KeySource::from_record(&record("secret", "key.pub"), Path::new("/tmp"))
            .unwrap_err();
        assert!(matches!(err, SiteRejection::AmbiguousKeySource));
    }

    #[test]
    fn neither_source_rejected() {
        let err = KeySource::from_record(&record("", ""), Path::new("/tmp")).unwrap_err();
        assert!(matches!(err, SiteRejection::AmbiguousKeySource));
    }

    #[test]
    fn whitespace_only_key_counts_as_absent() {
        let err = KeySource::from_record(&record("  \n ", ""), Path::new("/tmp")).unwrap_err();
        assert!(matches!(err, SiteRejection::AmbiguousKeySource));
    }

    #[test]
    fn missing_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = KeySource::from_record(&record("", "nope.pub"), dir.path()).unwrap_err();
        assert!(matches!(err, SiteRejection::KeySourceUnreadable { .. }));
    }

    #[test]
    fn relative_path_resolves_against_base_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("site.key"), b"hush").unwrap();

        let source = KeySource::from_record(&record("", "site.key"), dir.path()).unwrap();
        match &source {
            KeySource::File(path) => {
                assert!(path.is_absolute());
                assert!(path.starts_with(dir.path()));
            }
            KeySource::Inline(_) => panic!("expected a file source"),
        }
        assert_eq!(source.bytes().unwrap(), b"hush");
    }

    #[test]
    fn absolute_path_used_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let abs = dir.path().join("site.key");
        std::fs::write(&abs, b"hush").unwrap();

        let rec = record("", abs.to_str().unwrap());
        let source = KeySource::from_record(&rec, Path::new("/somewhere/else")).unwrap();
        assert_eq!(source.bytes().unwrap(), b"hush");
    }
}
