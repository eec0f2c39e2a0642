//! Error types for site resolution.

use std::path::PathBuf;

use crate::algorithm::SigningAlgorithm;

/// Configuration-fatal errors.
///
/// Any of these aborts the whole resolution pass; the caller receives an
/// empty verifier map ("no sites configured").
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The settings document could not be parsed at all.
    #[error("malformed settings document: {message}")]
    MalformedDocument { message: String },

    /// The document declares a schema version this resolver does not understand.
    #[error(
        "unsupported settings version: {found} (expected {expected})",
        expected = crate::document::SCHEMA_VERSION
    )]
    UnsupportedSchemaVersion { found: u32 },
}

/// Per-site rejection reasons.
///
/// A rejection skips only the offending site; resolution continues with the
/// remaining records. None of these propagate past the orchestrator.
#[derive(Debug, thiserror::Error)]
pub enum SiteRejection {
    /// Exactly one of an inline key or a key path must be defined.
    #[error("exactly one of key or path must be defined")]
    AmbiguousKeySource,

    /// The key path does not exist or cannot be read.
    #[error("key path does not exist or is not readable: {path}")]
    KeySourceUnreadable { path: PathBuf },

    /// The declared algorithm token matches no recognized variant.
    #[error("invalid algorithm: {token}")]
    InvalidAlgorithm { token: String },

    /// The declared encoding is not one of pem/base64/plain.
    #[error("unsupported key encoding: {token}")]
    UnsupportedEncoding { token: String },

    /// Key material could not be decoded for the declared encoding.
    #[error("key decode failed: {reason}")]
    KeyDecode { reason: String },

    /// Decoding produced no usable key material.
    #[error("no key material available")]
    MissingKeyMaterial,

    /// The algorithm variant cannot be built from the decoded key material.
    #[error("algorithm {algorithm} cannot be built from the decoded key material")]
    UnsupportedVariant { algorithm: SigningAlgorithm },

    /// Non-default sites must carry a url identifier.
    #[error("site url must be defined for non-default sites")]
    MissingIdentifier,

    /// A default site was already accepted earlier in the document.
    #[error("multiple default sites specified in configuration")]
    DuplicateDefault,

    /// A site with the same url was already accepted earlier in the document.
    #[error("duplicate site url: {url}")]
    DuplicateIdentifier { url: String },
}

/// Result type for per-site resolution steps.
pub type SiteResult<T> = std::result::Result<T, SiteRejection>;
