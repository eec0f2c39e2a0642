//! Site resolution orchestration.
//!
//! Drives the full pipeline for every record in document order and
//! accumulates the name → verifier mapping. Per-record failures skip that
//! record only; document-level failures abort the pass and yield an empty
//! map. Later records observe the state left by earlier ones: the first
//! default site wins and every subsequent one is rejected.

use std::collections::HashMap;
use std::fmt;
use std::io::BufRead;
use std::path::Path;

use crate::algorithm::SigningAlgorithm;
use crate::document::{SiteDocument, SiteRecord, SCHEMA_VERSION};
use crate::error::{ConfigError, SiteRejection, SiteResult};
use crate::material::{KeyEncoding, KeyMaterial};
use crate::source::KeySource;
use crate::verifier::Verifier;

/// Lookup key for a resolved site.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SiteKey {
    /// The fallback site used when no origin matches.
    Default,
    /// A site keyed by its origin URL.
    Origin(String),
}

impl fmt::Display for SiteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("(default)"),
            Self::Origin(url) => f.write_str(url),
        }
    }
}

/// The resolved name → verifier mapping.
///
/// Built wholesale in one resolution pass and immutable afterwards; a
/// reconfiguration produces a fresh map rather than an incremental update.
#[derive(Debug, Default)]
pub struct VerifierMap {
    entries: HashMap<SiteKey, Verifier>,
}

impl VerifierMap {
    /// Exact-match lookup by origin URL.
    pub fn get(&self, origin: &str) -> Option<&Verifier> {
        self.entries.get(&SiteKey::Origin(origin.to_string()))
    }

    /// The default verifier, if one was configured.
    pub fn default_verifier(&self) -> Option<&Verifier> {
        self.entries.get(&SiteKey::Default)
    }

    /// Origin lookup falling back to the default site.
    pub fn lookup(&self, origin: &str) -> Option<&Verifier> {
        self.get(origin).or_else(|| self.default_verifier())
    }

    /// Number of resolved sites.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no site resolved.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over resolved sites in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&SiteKey, &Verifier)> {
        self.entries.iter()
    }
}

/// Mutable state threaded through one resolution pass.
///
/// Explicitly scoped to the pass so that resolution stays re-entrant; there
/// is no ambient process-wide state.
#[derive(Default)]
struct ResolutionState {
    default_accepted: bool,
    entries: HashMap<SiteKey, Verifier>,
}

/// Resolve a settings document read from `reader` into a verifier map.
///
/// Never fails: a malformed document or an unsupported schema version logs
/// one configuration-level error and produces an empty map, which callers
/// treat as "no sites configured".
pub fn resolve(reader: impl BufRead, base_dir: &Path) -> VerifierMap {
    let document = match SiteDocument::from_reader(reader) {
        Ok(document) => document,
        Err(e) => {
            tracing::error!(error = %e, "failed to load settings document");
            return VerifierMap::default();
        }
    };

    match resolve_document(&document, base_dir) {
        Ok(map) => map,
        Err(e) => {
            tracing::error!(error = %e, "aborting site resolution");
            VerifierMap::default()
        }
    }
}

/// Resolve an already-parsed document.
///
/// Fails only on the schema-version gate; per-site failures are logged and
/// skipped. `base_dir` anchors relative key paths and is supplied by the
/// caller's environment.
pub fn resolve_document(
    document: &SiteDocument,
    base_dir: &Path,
) -> Result<VerifierMap, ConfigError> {
    if document.version != SCHEMA_VERSION {
        return Err(ConfigError::UnsupportedSchemaVersion {
            found: document.version,
        });
    }

    let mut state = ResolutionState::default();
    for record in &document.sites {
        if let Err(rejection) = resolve_site(record, base_dir, &mut state) {
            tracing::warn!(
                site = %site_label(record),
                reason = %rejection,
                "site skipped"
            );
        }
    }

    Ok(VerifierMap {
        entries: state.entries,
    })
}

/// Run one record through the pipeline, inserting into `state` on success.
///
/// The transition order is fixed; each failure skips the record with a
/// distinct rejection and no prior record is ever rolled back.
fn resolve_site(
    record: &SiteRecord,
    base_dir: &Path,
    state: &mut ResolutionState,
) -> SiteResult<SiteKey> {
    // 1-2. Key-source mutual exclusion, then path expansion and readability.
    let source = KeySource::from_record(record, base_dir)?;

    // 3. Algorithm classification.
    let algorithm = SigningAlgorithm::parse(&record.algorithm).ok_or_else(|| {
        SiteRejection::InvalidAlgorithm {
            token: record.algorithm.clone(),
        }
    })?;

    // 4. Key material decoding per the classified family.
    let encoding = KeyEncoding::parse(&record.encoding).ok_or_else(|| {
        SiteRejection::UnsupportedEncoding {
            token: record.encoding.clone(),
        }
    })?;
    let material = KeyMaterial::decode(algorithm.family(), encoding, &source)?;

    // 5. Verifier construction.
    let verifier = Verifier::build(algorithm, material)?;

    // 6. Non-default sites must be addressable.
    let url = record.url.trim();
    if url.is_empty() && !record.default {
        return Err(SiteRejection::MissingIdentifier);
    }

    // 7. Single default across the whole document; first one wins.
    if record.default {
        if state.default_accepted {
            return Err(SiteRejection::DuplicateDefault);
        }
        state.default_accepted = true;
    }

    // 8. Duplicate origins are rejected, never overwritten.
    let key = if record.default {
        SiteKey::Default
    } else {
        SiteKey::Origin(url.to_string())
    };
    if !record.default && state.entries.contains_key(&key) {
        return Err(SiteRejection::DuplicateIdentifier {
            url: url.to_string(),
        });
    }

    tracing::info!(
        site = %key,
        algorithm = %verifier.algorithm(),
        key_id = verifier.key_id().unwrap_or("-"),
        "site resolved"
    );
    state.entries.insert(key.clone(), verifier);
    Ok(key)
}

fn site_label(record: &SiteRecord) -> &str {
    if !record.url.trim().is_empty() {
        record.url.trim()
    } else if record.default {
        "(default)"
    } else if !record.path.trim().is_empty() {
        record.path.trim()
    } else {
        "(unnamed)"
    }
}
