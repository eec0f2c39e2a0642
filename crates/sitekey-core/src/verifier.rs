//! Verifier handles.
//!
//! A [`Verifier`] is constructed once during resolution and owns its key
//! material for the rest of its life. Nothing about the key escapes the
//! handle apart from an optional fingerprint used in diagnostics.

use std::fmt;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use jsonwebtoken::{crypto, DecodingKey};
use rsa::pkcs8::EncodePublicKey;
use rsa::traits::PublicKeyParts;
use sha2::{Digest, Sha256};

use crate::algorithm::{AlgorithmFamily, SigningAlgorithm};
use crate::error::{SiteRejection, SiteResult};
use crate::material::KeyMaterial;

/// An opaque signature-verification capability bound to exactly one
/// algorithm variant and one key.
pub struct Verifier {
    algorithm: SigningAlgorithm,
    key: DecodingKey,
    key_id: Option<String>,
}

impl Verifier {
    /// Build a verifier from a classified variant and decoded key material.
    ///
    /// The family/variant mismatch arm is a defensive terminal: classifier
    /// and decoder gating keep it unreachable in the orchestrated pipeline.
    pub fn build(algorithm: SigningAlgorithm, material: KeyMaterial) -> SiteResult<Self> {
        match (algorithm.family(), material) {
            (AlgorithmFamily::Rsa, KeyMaterial::RsaPublic(public)) => {
                let spki = public
                    .to_public_key_der()
                    .map_err(|e| SiteRejection::KeyDecode {
                        reason: format!("cannot re-encode RSA public key: {e}"),
                    })?;
                let key = DecodingKey::from_rsa_raw_components(
                    &public.n().to_bytes_be(),
                    &public.e().to_bytes_be(),
                );
                Ok(Self {
                    algorithm,
                    key,
                    key_id: Some(key_id(spki.as_bytes())),
                })
            }
            (AlgorithmFamily::Hmac, KeyMaterial::HmacSecret(secret)) => {
                if secret.is_empty() {
                    return Err(SiteRejection::MissingKeyMaterial);
                }
                Ok(Self {
                    algorithm,
                    key: DecodingKey::from_secret(&secret),
                    key_id: None,
                })
            }
            (_, _) => Err(SiteRejection::UnsupportedVariant { algorithm }),
        }
    }

    /// Verify `signature` over `message`.
    ///
    /// Returns false for a signature that does not match, was produced by a
    /// different key, or belongs to a different digest size.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        let encoded = URL_SAFE_NO_PAD.encode(signature);
        crypto::verify(&encoded, message, &self.key, self.algorithm.to_jwt()).unwrap_or(false)
    }

    /// The algorithm variant this verifier is bound to.
    pub fn algorithm(&self) -> SigningAlgorithm {
        self.algorithm
    }

    /// `sha256:<hex>` fingerprint of the key's SPKI encoding (RSA only).
    pub fn key_id(&self) -> Option<&str> {
        self.key_id.as_deref()
    }
}

impl fmt::Debug for Verifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Verifier")
            .field("algorithm", &self.algorithm)
            .field("key_id", &self.key_id)
            .finish_non_exhaustive()
    }
}

/// `sha256:<hex>` fingerprint of DER-encoded key material.
fn key_id(der: &[u8]) -> String {
    format!("sha256:{}", hex::encode(Sha256::digest(der)))
}
