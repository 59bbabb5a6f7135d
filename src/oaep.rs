//! Block-wise encryption and decryption using [OAEP padding](https://datatracker.ietf.org/doc/html/rfc8017#section-7.1).
//!
//! A single OAEP operation can only carry `k - 2 * h_len - 2` bytes of
//! plaintext, where `k` is the size of the RSA modulus in bytes. Longer
//! buffers are split into consecutive blocks of at most that size, each block
//! is encrypted independently into a `k`-byte ciphertext block, and the
//! ciphertext blocks are concatenated in order. Decryption walks the
//! ciphertext in `k`-byte steps.

use core::fmt;
use core::str::FromStr;

use rand_core::OsRng;
use rsa::{traits::PublicKeyParts, Oaep};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    errors::{Error, Result},
    key::KeyMaterial,
};

/// Digest used for both the OAEP label hash and MGF1.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OaepDigest {
    /// SHA-1, the classic OAEP default.
    #[default]
    Sha1,
    /// SHA-256.
    Sha256,
    /// SHA-384.
    Sha384,
    /// SHA-512.
    Sha512,
}

impl OaepDigest {
    /// Digest output size in bytes.
    pub const fn output_size(self) -> usize {
        match self {
            Self::Sha1 => 20,
            Self::Sha256 => 32,
            Self::Sha384 => 48,
            Self::Sha512 => 64,
        }
    }

    /// Fresh padding scheme; OAEP values are consumed by every primitive call.
    fn padding(self) -> Oaep {
        match self {
            Self::Sha1 => Oaep::new::<sha1::Sha1>(),
            Self::Sha256 => Oaep::new::<sha2::Sha256>(),
            Self::Sha384 => Oaep::new::<sha2::Sha384>(),
            Self::Sha512 => Oaep::new::<sha2::Sha512>(),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Sha1 => "SHA-1",
            Self::Sha256 => "SHA-256",
            Self::Sha384 => "SHA-384",
            Self::Sha512 => "SHA-512",
        }
    }
}

impl fmt::Display for OaepDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OaepDigest {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().replace('-', "").as_str() {
            "SHA1" => Ok(Self::Sha1),
            "SHA256" => Ok(Self::Sha256),
            "SHA384" => Ok(Self::Sha384),
            "SHA512" => Ok(Self::Sha512),
            _ => Err(Error::UnknownOaepDigest(s.to_owned())),
        }
    }
}

/// Direction of a block processing run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Plaintext to ciphertext.
    Encrypt,
    /// Ciphertext to plaintext.
    Decrypt,
}

/// Input block size for processing under `key` in `direction`.
///
/// For encryption this is the largest plaintext a single OAEP operation can
/// carry; for decryption it is the modulus size.
pub fn block_size(key: &KeyMaterial, direction: Direction, digest: OaepDigest) -> Result<usize> {
    let modulus_bytes = key.to_public_key().size();
    match direction {
        Direction::Decrypt => Ok(modulus_bytes),
        Direction::Encrypt => modulus_bytes
            .checked_sub(2 * digest.output_size() + 2)
            .filter(|&size| size > 0)
            .ok_or(Error::KeyTooSmall {
                modulus_bytes,
                digest_bytes: digest.output_size(),
            }),
    }
}

/// Encrypt or decrypt `data` block by block under `key`.
///
/// Encryption accepts either kind of key material and always uses the public
/// components. Decryption requires a private key.
pub fn process_blocks(
    data: &[u8],
    key: &KeyMaterial,
    direction: Direction,
    digest: OaepDigest,
) -> Result<Vec<u8>> {
    let block_size = block_size(key, direction, digest)?;
    debug!(
        target: "asymmetric_rsa",
        ?direction,
        len = data.len(),
        block_size,
        blocks = data.len().div_ceil(block_size),
        "processing OAEP blocks"
    );

    let mut rng = OsRng;
    match direction {
        Direction::Encrypt => {
            let public_key = key.to_public_key();
            let mut out = Vec::with_capacity(data.len().div_ceil(block_size) * public_key.size());
            for chunk in data.chunks(block_size) {
                out.extend(public_key.encrypt(&mut rng, digest.padding(), chunk)?);
            }
            Ok(out)
        }
        Direction::Decrypt => {
            let private_key = key.as_private_key()?;
            let mut out = Vec::with_capacity(data.len());
            for chunk in data.chunks(block_size) {
                out.extend(private_key.decrypt_blinded(&mut rng, digest.padding(), chunk)?);
            }
            Ok(out)
        }
    }
}
