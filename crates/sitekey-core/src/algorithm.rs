//! Signing algorithm classification.

use std::fmt;

/// Key algebra family behind a signing algorithm variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlgorithmFamily {
    /// RSA signatures over a public key.
    Rsa,
    /// HMAC keyed hashes over a shared secret.
    Hmac,
}

/// The six recognized signing algorithm variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SigningAlgorithm {
    /// RSASSA-PKCS1-v1_5 with SHA-256.
    Rs256,
    /// RSASSA-PKCS1-v1_5 with SHA-384.
    Rs384,
    /// RSASSA-PKCS1-v1_5 with SHA-512.
    Rs512,
    /// HMAC with SHA-256.
    Hs256,
    /// HMAC with SHA-384.
    Hs384,
    /// HMAC with SHA-512.
    Hs512,
}

impl SigningAlgorithm {
    /// Classify a raw algorithm token.
    ///
    /// Case-insensitive exact match against the six recognized names;
    /// anything else is `None`. Pure, no side effects.
    pub fn parse(token: &str) -> Option<Self> {
        match token.to_ascii_uppercase().as_str() {
            "RS256" => Some(Self::Rs256),
            "RS384" => Some(Self::Rs384),
            "RS512" => Some(Self::Rs512),
            "HS256" => Some(Self::Hs256),
            "HS384" => Some(Self::Hs384),
            "HS512" => Some(Self::Hs512),
            _ => None,
        }
    }

    /// The key algebra family this variant belongs to.
    pub fn family(self) -> AlgorithmFamily {
        match self {
            Self::Rs256 | Self::Rs384 | Self::Rs512 => AlgorithmFamily::Rsa,
            Self::Hs256 | Self::Hs384 | Self::Hs512 => AlgorithmFamily::Hmac,
        }
    }

    /// Canonical token name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Rs256 => "RS256",
            Self::Rs384 => "RS384",
            Self::Rs512 => "RS512",
            Self::Hs256 => "HS256",
            Self::Hs384 => "HS384",
            Self::Hs512 => "HS512",
        }
    }

    pub(crate) fn to_jwt(self) -> jsonwebtoken::Algorithm {
        match self {
            Self::Rs256 => jsonwebtoken::Algorithm::RS256,
            Self::Rs384 => jsonwebtoken::Algorithm::RS384,
            Self::Rs512 => jsonwebtoken::Algorithm::RS512,
            Self::Hs256 => jsonwebtoken::Algorithm::HS256,
            Self::Hs384 => jsonwebtoken::Algorithm::HS384,
            Self::Hs512 => jsonwebtoken::Algorithm::HS512,
        }
    }
}

impl fmt::Display for SigningAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_recognized_variants() {
        assert_eq!(SigningAlgorithm::parse("RS256"), Some(SigningAlgorithm::Rs256));
        assert_eq!(SigningAlgorithm::parse("RS384"), Some(SigningAlgorithm::Rs384));
        assert_eq!(SigningAlgorithm::parse("RS512"), Some(SigningAlgorithm::Rs512));
        assert_eq!(SigningAlgorithm::parse("HS256"), Some(SigningAlgorithm::Hs256));
        assert_eq!(SigningAlgorithm::parse("HS384"), Some(SigningAlgorithm::Hs384));
        assert_eq!(SigningAlgorithm::parse("HS512"), Some(SigningAlgorithm::Hs512));
    }

    #[test]
    fn classification_is_case_insensitive() {
        assert_eq!(SigningAlgorithm::parse("rs256"), Some(SigningAlgorithm::Rs256));
        assert_eq!(SigningAlgorithm::parse("hS384"), Some(SigningAlgorithm::Hs384));
    }

    #[test]
    fn rejects_unrecognized_tokens() {
        assert_eq!(SigningAlgorithm::parse("ES256"), None);
        assert_eq!(SigningAlgorithm::parse("none"), None);
        assert_eq!(SigningAlgorithm::parse(""), None);
        assert_eq!(SigningAlgorithm::parse("RS256 "), None);
    }

    #[test]
    fn families() {
        assert_eq!(SigningAlgorithm::Rs512.family(), AlgorithmFamily::Rsa);
        assert_eq!(SigningAlgorithm::Hs256.family(), AlgorithmFamily::Hmac);
    }
}
