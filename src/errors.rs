//! Error types.

use std::string::FromUtf8Error;

use crate::key::KeyKind;

/// Alias for [`core::result::Result`] with the `asymmetric-rsa` crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Key strength is not one of 512, 1024, 2048 or 4096 bits.
    #[error("invalid RSA key strength {0}: valid strengths are 512, 1024, 2048 and 4096 bits")]
    InvalidKeyStrength(u64),

    /// PEM text does not hold an RSA key.
    #[error("unparsable key material")]
    UnparsableKey,

    /// Key material of the wrong kind for the requested operation.
    #[error("{required} key required, found {found} key")]
    KeyKind {
        /// Kind the operation needs.
        required: KeyKind,
        /// Kind that was supplied.
        found: KeyKind,
    },

    /// Modulus leaves no room for OAEP padding with the configured digest.
    #[error("modulus of {modulus_bytes} bytes too small for a {digest_bytes}-byte OAEP digest")]
    KeyTooSmall {
        /// Modulus size in bytes.
        modulus_bytes: usize,
        /// Digest output size in bytes.
        digest_bytes: usize,
    },

    /// Signature algorithm name not recognized.
    #[error("unknown signature algorithm {0:?}")]
    UnknownSignatureAlgorithm(String),

    /// Unknown OAEP digest name.
    #[error("unknown OAEP digest {0:?}")]
    UnknownOaepDigest(String),

    /// Failure inside the RSA primitive.
    #[error("RSA error: {0}")]
    Rsa(#[from] rsa::Error),

    /// PKCS#1 encoding error.
    #[error("PKCS#1 error: {0}")]
    Pkcs1(#[from] pkcs1::Error),

    /// SubjectPublicKeyInfo encoding error.
    #[error("SPKI error: {0}")]
    Spki(#[from] pkcs8::spki::Error),

    /// Malformed base64 text.
    #[error("base64 error: {0}")]
    Base64(#[from] base64ct::Error),

    /// Decrypted text is not UTF-8.
    #[error("invalid UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),

    /// Signing failure.
    #[error("signature error: {0}")]
    Signature(#[from] signature::Error),

    /// Key generation did not complete.
    #[error("{0}")]
    KeyGeneration(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_kind_display() {
        let err = Error::KeyKind {
            required: KeyKind::Private,
            found: KeyKind::Public,
        };
        assert_eq!(err.to_string(), "private key required, found public key");
    }

    #[test]
    fn invalid_strength_display() {
        assert_eq!(
            Error::InvalidKeyStrength(3072).to_string(),
            "invalid RSA key strength 3072: valid strengths are 512, 1024, 2048 and 4096 bits"
        );
    }

    #[test]
    fn key_generation_display_is_bare_cause() {
        assert_eq!(
            Error::KeyGeneration("no Tokio runtime".into()).to_string(),
            "no Tokio runtime"
        );
    }
}
