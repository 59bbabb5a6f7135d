//! The public encryption and signature facade.

use base64ct::{Base64, Encoding};
use tracing::warn;

use crate::{
    encoding::{resolve, ResolvedKey},
    errors::{Error, Result},
    key::{KeyKind, KeyMaterial},
    oaep::{process_blocks, Direction, OaepDigest},
    signer::{self, SignatureAlgorithm},
    traits::AsymmetricCryptography,
};

/// RSA encryption/decryption and signing/verifying over PEM-encoded keys.
///
/// Every key argument is parsed anew on each call; nothing is cached, so a
/// single instance can be shared freely between threads.
///
/// ```
/// use asymmetric_rsa::{AsymmetricCryptography, KeyGenerator, KeyStrength, RsaCrypto};
///
/// let keys = KeyGenerator::new().generate_blocking(KeyStrength::Rsa2048).unwrap();
/// let crypto = RsaCrypto::new();
///
/// let ciphertext = crypto.encrypt_text("hello world", &keys.public).unwrap();
/// assert_eq!(crypto.decrypt_text(&ciphertext, &keys.private).unwrap(), "hello world");
///
/// let signature = crypto.sign(&[1, 2, 3], &keys.private).unwrap();
/// assert!(crypto.verify(&[1, 2, 3], &signature, &keys.public));
///
/// // Empty input is not an error.
/// assert_eq!(crypto.encrypt_text("", &keys.public).as_deref(), Some(""));
/// // A key that does not parse is.
/// assert_eq!(crypto.encrypt_text("hello world", "not a key"), None);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RsaCrypto {
    signature_algorithm: SignatureAlgorithm,
    oaep_digest: OaepDigest,
}

impl RsaCrypto {
    /// `SHA256withRSA` signatures and OAEP with SHA-1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `algorithm` for signing and verifying.
    pub fn with_signature_algorithm(mut self, algorithm: SignatureAlgorithm) -> Self {
        self.signature_algorithm = algorithm;
        self
    }

    /// Use `digest` for OAEP padding.
    pub fn with_oaep_digest(mut self, digest: OaepDigest) -> Self {
        self.oaep_digest = digest;
        self
    }

    /// Configured signature algorithm.
    pub fn signature_algorithm(&self) -> SignatureAlgorithm {
        self.signature_algorithm
    }

    /// Configured OAEP digest.
    pub fn oaep_digest(&self) -> OaepDigest {
        self.oaep_digest
    }

    fn try_encrypt(&self, data: &[u8], pem: &str) -> Result<Vec<u8>> {
        let key = resolve(pem).select(KeyKind::Public)?;
        process_blocks(data, &key, Direction::Encrypt, self.oaep_digest)
    }

    fn try_decrypt(&self, data: &[u8], pem: &str) -> Result<Vec<u8>> {
        let key = resolve(pem).select(KeyKind::Private)?;
        process_blocks(data, &key, Direction::Decrypt, self.oaep_digest)
    }

    fn try_sign(&self, data: &[u8], pem: &str) -> Result<Vec<u8>> {
        let key = resolve(pem).select(KeyKind::Private)?;
        signer::sign(self.signature_algorithm, data, &key)
    }

    fn try_verify(&self, data: &[u8], signature: &[u8], pem: &str) -> Result<bool> {
        // Only a bare public key verifies; private key blocks are refused.
        let key = match resolve(pem) {
            ResolvedKey::PublicOnly(key) => KeyMaterial::Public(key),
            ResolvedKey::Pair(_) => {
                return Err(Error::KeyKind {
                    required: KeyKind::Public,
                    found: KeyKind::Private,
                })
            }
            ResolvedKey::Unparsable => return Err(Error::UnparsableKey),
        };
        Ok(signer::verify(self.signature_algorithm, data, signature, &key))
    }
}

/// Run `op` unless the input is degenerate, collapsing failures to `None`.
///
/// Degenerate input yields `Some(T::default())`, the empty value of the
/// result's shape.
fn guard<T, F>(name: &'static str, degenerate: bool, op: F) -> Option<T>
where
    T: Default,
    F: FnOnce() -> Result<T>,
{
    if degenerate {
        return Some(T::default());
    }
    match op() {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(target: "asymmetric_rsa", operation = name, error = %e, "operation failed");
            None
        }
    }
}

/// Decode standard padded base64, ignoring line breaks and other ASCII
/// whitespace.
fn decode_base64(text: &str) -> Result<Vec<u8>> {
    if !text.contains(|c: char| c.is_ascii_whitespace()) {
        return Ok(Base64::decode_vec(text)?);
    }
    let compact: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    Ok(Base64::decode_vec(&compact)?)
}

/// Verification flavor of [`guard`]: every non-success is `false`.
fn guard_verify<F>(name: &'static str, degenerate: bool, op: F) -> bool
where
    F: FnOnce() -> Result<bool>,
{
    guard(name, degenerate, op).unwrap_or(false)
}

impl AsymmetricCryptography for RsaCrypto {
    fn encrypt(&self, data: &[u8], public_key_pem: &str) -> Option<Vec<u8>> {
        guard("encrypt", data.is_empty() || public_key_pem.is_empty(), || {
            self.try_encrypt(data, public_key_pem)
        })
    }

    fn decrypt(&self, data: &[u8], private_key_pem: &str) -> Option<Vec<u8>> {
        guard("decrypt", data.is_empty() || private_key_pem.is_empty(), || {
            self.try_decrypt(data, private_key_pem)
        })
    }

    fn encrypt_text(&self, text: &str, public_key_pem: &str) -> Option<String> {
        guard("encrypt_text", text.is_empty() || public_key_pem.is_empty(), || {
            let ciphertext = self.try_encrypt(text.as_bytes(), public_key_pem)?;
            Ok(Base64::encode_string(&ciphertext))
        })
    }

    fn decrypt_text(&self, text: &str, private_key_pem: &str) -> Option<String> {
        guard("decrypt_text", text.is_empty() || private_key_pem.is_empty(), || {
            let ciphertext = decode_base64(text)?;
            let plaintext = self.try_decrypt(&ciphertext, private_key_pem)?;
            Ok(String::from_utf8(plaintext)?)
        })
    }

    fn sign(&self, data: &[u8], private_key_pem: &str) -> Option<Vec<u8>> {
        guard("sign", data.is_empty() || private_key_pem.is_empty(), || {
            self.try_sign(data, private_key_pem)
        })
    }

    fn sign_text(&self, text: &str, private_key_pem: &str) -> Option<String> {
        guard("sign_text", text.is_empty() || private_key_pem.is_empty(), || {
            let signature = self.try_sign(text.as_bytes(), private_key_pem)?;
            Ok(Base64::encode_string(&signature))
        })
    }

    fn verify(&self, data: &[u8], signature: &[u8], public_key_pem: &str) -> bool {
        let degenerate = data.is_empty() || signature.is_empty() || public_key_pem.is_empty();
        guard_verify("verify", degenerate, || {
            self.try_verify(data, signature, public_key_pem)
        })
    }

    fn verify_text(&self, text: &str, signature: &str, public_key_pem: &str) -> bool {
        let degenerate = text.is_empty() || signature.is_empty() || public_key_pem.is_empty();
        guard_verify("verify_text", degenerate, || {
            let signature = decode_base64(signature)?;
            self.try_verify(text.as_bytes(), &signature, public_key_pem)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_degenerate_is_empty() {
        let out: Option<Vec<u8>> = guard("test", true, || panic!("must not run"));
        assert_eq!(out, Some(Vec::new()));
        let out: Option<String> = guard("test", true, || panic!("must not run"));
        assert_eq!(out.as_deref(), Some(""));
    }

    #[test]
    fn guard_failure_is_none() {
        let out: Option<Vec<u8>> = guard("test", false, || Err(Error::UnparsableKey));
        assert_eq!(out, None);
    }

    #[test]
    fn guard_success_passes_through() {
        assert_eq!(guard("test", false, || Ok(vec![1u8, 2])), Some(vec![1, 2]));
    }

    #[test]
    fn guard_verify_outcomes() {
        assert!(!guard_verify("test", true, || Ok(true)));
        assert!(!guard_verify("test", false, || Err(Error::UnparsableKey)));
        assert!(!guard_verify("test", false, || Ok(false)));
        assert!(guard_verify("test", false, || Ok(true)));
    }

    #[test]
    fn configuration() {
        let crypto = RsaCrypto::new();
        assert_eq!(crypto.signature_algorithm(), SignatureAlgorithm::Sha256WithRsa);
        assert_eq!(crypto.oaep_digest(), OaepDigest::Sha1);

        let crypto = crypto
            .with_signature_algorithm(SignatureAlgorithm::Sha512WithRsaPss)
            .with_oaep_digest(OaepDigest::Sha256);
        assert_eq!(crypto.signature_algorithm(), SignatureAlgorithm::Sha512WithRsaPss);
        assert_eq!(crypto.oaep_digest(), OaepDigest::Sha256);
    }

    #[test]
    fn garbage_key_is_failure() {
        let crypto = RsaCrypto::new();
        assert_eq!(crypto.encrypt(b"data", "garbage"), None);
        assert_eq!(crypto.decrypt(b"data", "garbage"), None);
        assert_eq!(crypto.sign(b"data", "garbage"), None);
        assert_eq!(crypto.encrypt_text("data", "garbage"), None);
        assert!(!crypto.verify(b"data", b"sig", "garbage"));
    }

    #[test]
    fn empty_arguments_are_empty() {
        let crypto = RsaCrypto::new();
        assert_eq!(crypto.encrypt(b"", "garbage"), Some(Vec::new()));
        assert_eq!(crypto.encrypt(b"data", ""), Some(Vec::new()));
        assert_eq!(crypto.decrypt(b"", "garbage"), Some(Vec::new()));
        assert_eq!(crypto.sign(b"", "garbage"), Some(Vec::new()));
        assert_eq!(crypto.sign_text("data", "").as_deref(), Some(""));
        assert_eq!(crypto.decrypt_text("", "garbage").as_deref(), Some(""));
        assert!(!crypto.verify(b"", b"sig", "garbage"));
        assert!(!crypto.verify_text("data", "", "garbage"));
    }
}
