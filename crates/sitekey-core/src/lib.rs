//! Multi-tenant token-verification key resolution.
//!
//! Resolves a declarative sites document — one record per tenant origin,
//! each declaring a signing algorithm, a key encoding and an inline or
//! file-based key source — into ready-to-use signature-verification
//! handles:
//!
//! - structural validation of each site record,
//! - key-source resolution against a caller-supplied base directory,
//! - key decoding per encoding scheme (pem / base64 / plain),
//! - verifier construction per algorithm family (RSA / HMAC).
//!
//! A site that fails any step is skipped with a structured diagnostic and
//! resolution continues; only a malformed document or an unsupported schema
//! version aborts the whole pass, yielding an empty map.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::io::BufReader;
//! use std::path::Path;
//!
//! # fn main() -> std::io::Result<()> {
//! let settings = std::fs::File::open("sites.xml")?;
//! let verifiers = sitekey_core::resolve(BufReader::new(settings), Path::new("/etc/sitekey"));
//!
//! if let Some(verifier) = verifiers.lookup("https://repo.example.org") {
//!     let valid = verifier.verify(b"signing input", b"signature bytes");
//!     println!("signature valid: {valid}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod algorithm;
pub mod document;
pub mod error;
pub mod material;
pub mod resolver;
pub mod source;
pub mod verifier;

// Re-export main types
pub use algorithm::{AlgorithmFamily, SigningAlgorithm};
pub use document::{SiteDocument, SiteRecord, SCHEMA_VERSION};
pub use error::{ConfigError, SiteRejection, SiteResult};
pub use material::{KeyEncoding, KeyMaterial};
pub use resolver::{resolve, resolve_document, SiteKey, VerifierMap};
pub use source::KeySource;
pub use verifier::Verifier;
