//! PKCS#1 and PKCS#8 PEM resolution and serialization.
//!
//! PEM text is syntactically ambiguous: the same `&str` argument may hold a
//! private key block (which embeds both halves of the pair) or a bare public
//! key. [`resolve`] tries the pair interpretation first and falls back to a
//! single key, returning a [`ResolvedKey`] that call sites pick the facet they
//! need from.

use pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey, EncodeRsaPrivateKey, LineEnding};
use pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePublicKey};
use rsa::{RsaPrivateKey, RsaPublicKey};
use tracing::debug;
use zeroize::Zeroizing;

use crate::{
    errors::{Error, Result},
    key::{KeyKind, KeyMaterial, KeyPair, PemKeyPair},
};

/// Outcome of interpreting a PEM string as RSA key material.
#[derive(Debug)]
pub enum ResolvedKey {
    /// A private key block; both halves are available.
    Pair(KeyPair),
    /// A public key block.
    PublicOnly(RsaPublicKey),
    /// Not an RSA key in any supported PEM format.
    Unparsable,
}

impl ResolvedKey {
    /// Pick the key material an operation needing a `kind` key should use.
    ///
    /// A pair yields the requested half. A lone public key is returned as-is
    /// even when a private key was asked for; the engines reject it.
    pub fn select(self, kind: KeyKind) -> Result<KeyMaterial> {
        match self {
            Self::Pair(pair) => Ok(pair.into_half(kind)),
            Self::PublicOnly(key) => Ok(KeyMaterial::Public(key)),
            Self::Unparsable => Err(Error::UnparsableKey),
        }
    }

    /// Kind of key found, if any.
    pub fn kind(&self) -> Option<KeyKind> {
        match self {
            Self::Pair(_) => Some(KeyKind::Private),
            Self::PublicOnly(_) => Some(KeyKind::Public),
            Self::Unparsable => None,
        }
    }
}

/// Resolve `pem`, preferring the key-pair interpretation.
pub fn resolve(pem: &str) -> ResolvedKey {
    let resolved = match resolve_pair(pem) {
        Some(pair) => ResolvedKey::Pair(pair),
        None => match resolve_single(pem) {
            Some(KeyMaterial::Public(key)) => ResolvedKey::PublicOnly(key),
            Some(KeyMaterial::Private(key)) => ResolvedKey::Pair(KeyPair::from_private_key(key)),
            None => ResolvedKey::Unparsable,
        },
    };
    debug!(target: "asymmetric_rsa", kind = ?resolved.kind(), "resolved PEM key material");
    resolved
}

/// Decode a private key block into a full key pair.
///
/// Returns `None` for public keys and anything that is not an RSA key.
pub fn resolve_pair(pem: &str) -> Option<KeyPair> {
    decode_private_key(pem.trim()).map(KeyPair::from_private_key)
}

/// Decode whichever single RSA key `pem` holds.
pub fn resolve_single(pem: &str) -> Option<KeyMaterial> {
    let pem = pem.trim();
    decode_public_key(pem)
        .map(KeyMaterial::Public)
        .or_else(|| decode_private_key(pem).map(KeyMaterial::Private))
}

fn decode_private_key(pem: &str) -> Option<RsaPrivateKey> {
    RsaPrivateKey::from_pkcs1_pem(pem)
        .ok()
        .or_else(|| RsaPrivateKey::from_pkcs8_pem(pem).ok())
}

fn decode_public_key(pem: &str) -> Option<RsaPublicKey> {
    RsaPublicKey::from_public_key_pem(pem)
        .ok()
        .or_else(|| RsaPublicKey::from_pkcs1_pem(pem).ok())
}

/// Serialize a public key as an SPKI `PUBLIC KEY` PEM document.
pub fn public_key_to_pem(key: &RsaPublicKey) -> Result<String> {
    Ok(key.to_public_key_pem(LineEnding::LF)?)
}

/// Serialize a private key as a PKCS#1 `RSA PRIVATE KEY` PEM document.
pub fn private_key_to_pem(key: &RsaPrivateKey) -> Result<Zeroizing<String>> {
    Ok(key.to_pkcs1_pem(LineEnding::LF)?)
}

impl KeyPair {
    /// Serialize both halves independently.
    pub fn to_pem(&self) -> Result<PemKeyPair> {
        Ok(PemKeyPair {
            public: public_key_to_pem(self.public_key())?,
            private: private_key_to_pem(self.private_key())?,
        })
    }
}
