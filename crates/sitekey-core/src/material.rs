//! Key material decoding.
//!
//! Turns a key source into family-specific key material: a parsed RSA public
//! key for the RSA family, raw secret bytes for the HMAC family. The tagged
//! result makes "valid encoding for the wrong family" unrepresentable past
//! this point. The decoder is only invoked with the family already
//! classified for the record; a family/encoding mismatch is a decode error,
//! never a verifier.

use std::fmt;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use rsa::pkcs8::DecodePublicKey;
use rsa::RsaPublicKey;

use crate::algorithm::AlgorithmFamily;
use crate::error::{SiteRejection, SiteResult};
use crate::source::KeySource;

/// Declared key material encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEncoding {
    /// Armored X.509 public key text (RSA family only).
    Pem,
    /// Standard base64 text decoding to raw secret bytes (HMAC family only).
    Base64,
    /// Bytes used verbatim as the secret (HMAC family only).
    Plain,
}

impl KeyEncoding {
    /// Parse an encoding token, case-insensitively. Unknown tokens are `None`.
    pub fn parse(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "pem" => Some(Self::Pem),
            "base64" => Some(Self::Base64),
            "plain" => Some(Self::Plain),
            _ => None,
        }
    }

    /// Canonical token name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Pem => "pem",
            Self::Base64 => "base64",
            Self::Plain => "plain",
        }
    }
}

impl fmt::Display for KeyEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Decoded key material, tagged by algorithm family.
#[derive(Clone)]
pub enum KeyMaterial {
    /// X.509-encoded (SPKI) RSA public key, parsed.
    RsaPublic(RsaPublicKey),
    /// Raw HMAC secret bytes.
    HmacSecret(Vec<u8>),
}

impl KeyMaterial {
    /// Decode key material for an already-classified algorithm family.
    pub fn decode(
        family: AlgorithmFamily,
        encoding: KeyEncoding,
        source: &KeySource,
    ) -> SiteResult<Self> {
        match (family, encoding) {
            (AlgorithmFamily::Rsa, KeyEncoding::Pem) => {
                let text =
                    String::from_utf8(source.bytes()?).map_err(|e| SiteRejection::KeyDecode {
                        reason: format!("public key is not valid UTF-8: {e}"),
                    })?;
                let key = RsaPublicKey::from_public_key_pem(text.trim()).map_err(|e| {
                    SiteRejection::KeyDecode {
                        reason: format!("invalid RSA public key: {e}"),
                    }
                })?;
                Ok(Self::RsaPublic(key))
            }
            (AlgorithmFamily::Rsa, other) => Err(SiteRejection::KeyDecode {
                reason: format!("RSA keys require pem encoding, got {other}"),
            }),
            (AlgorithmFamily::Hmac, KeyEncoding::Base64) => {
                let raw = source.bytes()?;
                let text = String::from_utf8_lossy(&raw);
                let secret =
                    BASE64
                        .decode(text.trim().as_bytes())
                        .map_err(|e| SiteRejection::KeyDecode {
                            reason: format!("base64 decode failed: {e}"),
                        })?;
                Ok(Self::HmacSecret(secret))
            }
            (AlgorithmFamily::Hmac, KeyEncoding::Plain) => {
                // The inline literal is trimmed of surrounding whitespace;
                // file bytes are taken verbatim.
                let secret = match source {
                    KeySource::Inline(text) => text.trim().as_bytes().to_vec(),
                    KeySource::File(_) => source.bytes()?,
                };
                Ok(Self::HmacSecret(secret))
            }
            (AlgorithmFamily::Hmac, KeyEncoding::Pem) => Err(SiteRejection::KeyDecode {
                reason: "pem encoding is only valid for RSA public keys".to_string(),
            }),
        }
    }

    /// The family this material belongs to.
    pub fn family(&self) -> AlgorithmFamily {
        match self {
            Self::RsaPublic(_) => AlgorithmFamily::Rsa,
            Self::HmacSecret(_) => AlgorithmFamily::Hmac,
        }
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RsaPublic(_) => f.write_str("KeyMaterial::RsaPublic(..)"),
            Self::HmacSecret(secret) => {
                write!(f, "KeyMaterial::HmacSecret({} bytes)", secret.len())
            }
        }
    }
}
