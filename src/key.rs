use core::fmt;

use rsa::{RsaPrivateKey, RsaPublicKey};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::errors::{Error, Result};

/// Size of the RSA modulus for newly generated keys.
///
/// The bigger, the slower, the safer.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u32", into = "u32"))]
pub enum KeyStrength {
    /// 512-bit modulus.
    #[deprecated(note = "512-bit RSA keys are trivially factorable; use at least 2048 bits")]
    Rsa512,
    /// 1024-bit modulus.
    Rsa1024,
    /// 2048-bit modulus.
    #[default]
    Rsa2048,
    /// 4096-bit modulus.
    Rsa4096,
}

impl KeyStrength {
    /// Modulus size in bits.
    #[allow(deprecated)]
    pub const fn bits(self) -> usize {
        match self {
            Self::Rsa512 => 512,
            Self::Rsa1024 => 1024,
            Self::Rsa2048 => 2048,
            Self::Rsa4096 => 4096,
        }
    }
}

impl TryFrom<u32> for KeyStrength {
    type Error = Error;

    #[allow(deprecated)]
    fn try_from(bits: u32) -> Result<Self> {
        match bits {
            512 => Ok(Self::Rsa512),
            1024 => Ok(Self::Rsa1024),
            2048 => Ok(Self::Rsa2048),
            4096 => Ok(Self::Rsa4096),
            other => Err(Error::InvalidKeyStrength(other.into())),
        }
    }
}

impl TryFrom<usize> for KeyStrength {
    type Error = Error;

    fn try_from(bits: usize) -> Result<Self> {
        // usize is at most 64 bits wide on every supported target.
        let rejected = || Error::InvalidKeyStrength(bits as u64);
        u32::try_from(bits).map_err(|_| rejected()).and_then(Self::try_from)
    }
}

impl From<KeyStrength> for u32 {
    fn from(strength: KeyStrength) -> u32 {
        // Every strength fits comfortably.
        strength.bits() as u32
    }
}

impl fmt::Display for KeyStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-bit", self.bits())
    }
}

/// Which half of an RSA key pair a piece of key material is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    /// Modulus and public exponent only.
    Public,
    /// Full private key, which also embeds the public components.
    Private,
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Public => "public",
            Self::Private => "private",
        })
    }
}

/// A single resolved RSA key, tagged public or private.
///
/// Resolved fresh from PEM text for every operation and dropped when the
/// operation returns.
#[derive(Debug, Clone)]
pub enum KeyMaterial {
    /// Public key.
    Public(RsaPublicKey),
    /// Private key.
    Private(RsaPrivateKey),
}

impl KeyMaterial {
    /// Kind of this key.
    pub fn kind(&self) -> KeyKind {
        match self {
            Self::Public(_) => KeyKind::Public,
            Self::Private(_) => KeyKind::Private,
        }
    }

    /// Public components of this key, derived from the private key if needed.
    pub fn to_public_key(&self) -> RsaPublicKey {
        match self {
            Self::Public(key) => key.clone(),
            Self::Private(key) => key.to_public_key(),
        }
    }

    /// Borrow the private key, failing for public key material.
    pub fn as_private_key(&self) -> Result<&RsaPrivateKey> {
        match self {
            Self::Private(key) => Ok(key),
            Self::Public(_) => Err(Error::KeyKind {
                required: KeyKind::Private,
                found: KeyKind::Public,
            }),
        }
    }

    /// Borrow the public key, failing for private key material.
    pub fn as_public_key(&self) -> Result<&RsaPublicKey> {
        match self {
            Self::Public(key) => Ok(key),
            Self::Private(_) => Err(Error::KeyKind {
                required: KeyKind::Public,
                found: KeyKind::Private,
            }),
        }
    }
}

/// Owning pair of public and private key material.
#[derive(Debug, Clone)]
pub struct KeyPair {
    public: RsaPublicKey,
    private: RsaPrivateKey,
}

impl KeyPair {
    /// Build the pair from a private key, deriving its public half.
    pub fn from_private_key(private: RsaPrivateKey) -> Self {
        Self {
            public: private.to_public_key(),
            private,
        }
    }

    /// Public half.
    pub fn public_key(&self) -> &RsaPublicKey {
        &self.public
    }

    /// Private half.
    pub fn private_key(&self) -> &RsaPrivateKey {
        &self.private
    }

    /// Take the half of the pair required by an operation.
    pub fn into_half(self, kind: KeyKind) -> KeyMaterial {
        match kind {
            KeyKind::Public => KeyMaterial::Public(self.public),
            KeyKind::Private => KeyMaterial::Private(self.private),
        }
    }
}

impl From<RsaPrivateKey> for KeyPair {
    fn from(private: RsaPrivateKey) -> Self {
        Self::from_private_key(private)
    }
}

/// PEM text of a freshly generated key pair.
#[derive(Clone)]
pub struct PemKeyPair {
    /// SPKI `PUBLIC KEY` document.
    pub public: String,
    /// PKCS#1 `RSA PRIVATE KEY` document.
    pub private: Zeroizing<String>,
}

impl fmt::Debug for PemKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PemKeyPair")
            .field("public", &self.public)
            .field("private", &"...")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(deprecated)]
    fn strength_from_bits() {
        assert_eq!(KeyStrength::try_from(512u32).unwrap(), KeyStrength::Rsa512);
        assert_eq!(KeyStrength::try_from(1024u32).unwrap(), KeyStrength::Rsa1024);
        assert_eq!(KeyStrength::try_from(2048usize).unwrap(), KeyStrength::Rsa2048);
        assert_eq!(KeyStrength::try_from(4096u32).unwrap(), KeyStrength::Rsa4096);
    }

    #[test]
    fn strength_rejects_other_sizes() {
        for bits in [0u32, 256, 1536, 3072, 8192] {
            assert!(matches!(
                KeyStrength::try_from(bits),
                Err(Error::InvalidKeyStrength(b)) if b == u64::from(bits)
            ));
        }
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn strength_rejection_keeps_oversized_value() {
        let bits = (1usize << 40) + 2048;
        assert!(matches!(
            KeyStrength::try_from(bits),
            Err(Error::InvalidKeyStrength(b)) if b == bits as u64
        ));
    }

    #[test]
    fn strength_default_and_display() {
        assert_eq!(KeyStrength::default(), KeyStrength::Rsa2048);
        assert_eq!(KeyStrength::Rsa4096.to_string(), "4096-bit");
        assert_eq!(u32::from(KeyStrength::Rsa1024), 1024);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn strength_serde() {
        use serde_test::{assert_de_tokens_error, assert_tokens, Token};

        assert_tokens(&KeyStrength::Rsa2048, &[Token::U32(2048)]);
        assert_de_tokens_error::<KeyStrength>(
            &[Token::U32(3000)],
            "invalid RSA key strength 3000: valid strengths are 512, 1024, 2048 and 4096 bits",
        );
    }
}
