//! Hash-then-sign signatures over whole buffers.
//!
//! Supports `RSASSA-PKCS1-v1_5` ([RFC8017 § 8.2]) and `RSASSA-PSS`
//! ([RFC8017 § 8.1]) over the SHA family, selected by a [`SignatureAlgorithm`]
//! chosen when the facade is constructed.
//!
//! [RFC8017 § 8.1]: https://datatracker.ietf.org/doc/html/rfc8017#section-8.1
//! [RFC8017 § 8.2]: https://datatracker.ietf.org/doc/html/rfc8017#section-8.2

use core::fmt;
use core::str::FromStr;

use digest::{const_oid::AssociatedOid, Digest, FixedOutputReset};
use rand_core::OsRng;
use rsa::{pkcs1v15, pss, RsaPrivateKey, RsaPublicKey};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Sha256, Sha384, Sha512};
use signature::{RandomizedSigner, SignatureEncoding, Signer, Verifier};

use crate::{
    errors::{Error, Result},
    key::KeyMaterial,
};

/// Signature scheme and digest pairing.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub enum SignatureAlgorithm {
    /// PKCS#1 v1.5 over SHA-1.
    Sha1WithRsa,
    /// PKCS#1 v1.5 over SHA-256.
    #[default]
    Sha256WithRsa,
    /// PKCS#1 v1.5 over SHA-384.
    Sha384WithRsa,
    /// PKCS#1 v1.5 over SHA-512.
    Sha512WithRsa,
    /// PSS over SHA-256 with MGF1-SHA-256.
    Sha256WithRsaPss,
    /// PSS over SHA-384 with MGF1-SHA-384.
    Sha384WithRsaPss,
    /// PSS over SHA-512 with MGF1-SHA-512.
    Sha512WithRsaPss,
}

impl SignatureAlgorithm {
    const ALL: [Self; 7] = [
        Self::Sha1WithRsa,
        Self::Sha256WithRsa,
        Self::Sha384WithRsa,
        Self::Sha512WithRsa,
        Self::Sha256WithRsaPss,
        Self::Sha384WithRsaPss,
        Self::Sha512WithRsaPss,
    ];

    /// Conventional algorithm name, e.g. `SHA256withRSA`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sha1WithRsa => "SHA1withRSA",
            Self::Sha256WithRsa => "SHA256withRSA",
            Self::Sha384WithRsa => "SHA384withRSA",
            Self::Sha512WithRsa => "SHA512withRSA",
            Self::Sha256WithRsaPss => "SHA256withRSAandMGF1",
            Self::Sha384WithRsaPss => "SHA384withRSAandMGF1",
            Self::Sha512WithRsaPss => "SHA512withRSAandMGF1",
        }
    }

    /// Whether this is a randomized PSS scheme.
    pub const fn is_pss(self) -> bool {
        matches!(
            self,
            Self::Sha256WithRsaPss | Self::Sha384WithRsaPss | Self::Sha512WithRsaPss
        )
    }
}

impl fmt::Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SignatureAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|algo| algo.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownSignatureAlgorithm(s.to_owned()))
    }
}

impl TryFrom<String> for SignatureAlgorithm {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<SignatureAlgorithm> for String {
    fn from(algo: SignatureAlgorithm) -> String {
        algo.name().to_owned()
    }
}

/// Sign `data` with the private key in `key`.
///
/// Public key material is rejected with [`Error::KeyKind`].
pub fn sign(algorithm: SignatureAlgorithm, data: &[u8], key: &KeyMaterial) -> Result<Vec<u8>> {
    let key = key.as_private_key()?.clone();
    match algorithm {
        SignatureAlgorithm::Sha1WithRsa => sign_pkcs1v15::<Sha1>(key, data),
        SignatureAlgorithm::Sha256WithRsa => sign_pkcs1v15::<Sha256>(key, data),
        SignatureAlgorithm::Sha384WithRsa => sign_pkcs1v15::<Sha384>(key, data),
        SignatureAlgorithm::Sha512WithRsa => sign_pkcs1v15::<Sha512>(key, data),
        SignatureAlgorithm::Sha256WithRsaPss => sign_pss::<Sha256>(key, data),
        SignatureAlgorithm::Sha384WithRsaPss => sign_pss::<Sha384>(key, data),
        SignatureAlgorithm::Sha512WithRsaPss => sign_pss::<Sha512>(key, data),
    }
}

/// Check `signature` over `data` against the public key in `key`.
///
/// Every failure, including private key material and malformed signature
/// bytes, is reported as `false`.
pub fn verify(
    algorithm: SignatureAlgorithm,
    data: &[u8],
    signature: &[u8],
    key: &KeyMaterial,
) -> bool {
    let Ok(key) = key.as_public_key() else {
        return false;
    };
    let key = key.clone();
    let verified = match algorithm {
        SignatureAlgorithm::Sha1WithRsa => verify_pkcs1v15::<Sha1>(key, data, signature),
        SignatureAlgorithm::Sha256WithRsa => verify_pkcs1v15::<Sha256>(key, data, signature),
        SignatureAlgorithm::Sha384WithRsa => verify_pkcs1v15::<Sha384>(key, data, signature),
        SignatureAlgorithm::Sha512WithRsa => verify_pkcs1v15::<Sha512>(key, data, signature),
        SignatureAlgorithm::Sha256WithRsaPss => verify_pss::<Sha256>(key, data, signature),
        SignatureAlgorithm::Sha384WithRsaPss => verify_pss::<Sha384>(key, data, signature),
        SignatureAlgorithm::Sha512WithRsaPss => verify_pss::<Sha512>(key, data, signature),
    };
    verified.is_ok()
}

fn sign_pkcs1v15<D>(key: RsaPrivateKey, data: &[u8]) -> Result<Vec<u8>>
where
    D: Digest + AssociatedOid,
{
    let signing_key = pkcs1v15::SigningKey::<D>::new(key);
    Ok(signing_key.try_sign(data)?.to_vec())
}

fn sign_pss<D>(key: RsaPrivateKey, data: &[u8]) -> Result<Vec<u8>>
where
    D: Digest + FixedOutputReset,
{
    let signing_key = pss::BlindedSigningKey::<D>::new(key);
    Ok(signing_key.try_sign_with_rng(&mut OsRng, data)?.to_vec())
}

fn verify_pkcs1v15<D>(key: RsaPublicKey, data: &[u8], signature: &[u8]) -> Result<()>
where
    D: Digest + AssociatedOid,
{
    let signature = pkcs1v15::Signature::try_from(signature)?;
    Ok(pkcs1v15::VerifyingKey::<D>::new(key).verify(data, &signature)?)
}

fn verify_pss<D>(key: RsaPublicKey, data: &[u8], signature: &[u8]) -> Result<()>
where
    D: Digest + FixedOutputReset,
{
    let signature = pss::Signature::try_from(signature)?;
    Ok(pss::VerifyingKey::<D>::new(key).verify(data, &signature)?)
}
