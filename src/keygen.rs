//! Generation of fresh RSA key pairs serialized as PEM.

use core::fmt;
use core::future::Future;
use std::sync::Arc;

use rand_core::{CryptoRngCore, OsRng};
use rsa::RsaPrivateKey;
use tokio::runtime::Handle;
use tracing::{debug, error};

use crate::{
    errors::{Error, Result},
    key::{KeyPair, KeyStrength, PemKeyPair},
    traits::AsymmetricKeygen,
};

type ErrorCallback = Arc<dyn Fn(&str) + Send + Sync>;

/// RSA key pair generator.
///
/// Failures never reach the caller as errors from
/// [`generate_key_pair`](Self::generate_key_pair); they are reported to an
/// optional callback instead (e.g. to feed a host's own error logging).
#[derive(Clone, Default)]
pub struct KeyGenerator {
    error_callback: Option<ErrorCallback>,
}

impl KeyGenerator {
    /// Generator without a diagnostic callback.
    pub fn new() -> Self {
        Self::default()
    }

    /// Generator that hands a description of every generation failure to
    /// `callback`.
    pub fn with_error_callback<F>(callback: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        Self {
            error_callback: Some(Arc::new(callback)),
        }
    }

    /// Generate a key pair on the blocking thread pool of the current Tokio
    /// runtime.
    ///
    /// Returns `None` if generation failed for any reason, including being
    /// polled outside a Tokio runtime.
    pub async fn generate_key_pair(&self, strength: KeyStrength) -> Option<PemKeyPair> {
        let result = match Handle::try_current() {
            Ok(handle) => handle
                .spawn_blocking(move || generate_blocking(strength))
                .await
                .map_err(|e| Error::KeyGeneration(e.to_string()))
                .and_then(|generated| generated),
            Err(_) => Err(Error::KeyGeneration("no Tokio runtime".into())),
        };

        match result {
            Ok(pem) => Some(pem),
            Err(e) => {
                self.report(&e);
                None
            }
        }
    }

    /// Generate a key pair on the calling thread.
    pub fn generate_blocking(&self, strength: KeyStrength) -> Result<PemKeyPair> {
        generate_blocking(strength).inspect_err(|e| self.report(e))
    }

    /// Generate a key pair from the given random source on the calling thread.
    pub fn generate_with_rng<R: CryptoRngCore + ?Sized>(
        &self,
        rng: &mut R,
        strength: KeyStrength,
    ) -> Result<PemKeyPair> {
        generate_with_rng(rng, strength).inspect_err(|e| self.report(e))
    }

    fn report(&self, err: &Error) {
        error!(target: "asymmetric_rsa", error = %err, "RSA key pair generation failed");
        if let Some(callback) = &self.error_callback {
            callback(&format!(
                "KeyGenerator::generate_key_pair: RSA key pair generation failed: {err}"
            ));
        }
    }
}

impl AsymmetricKeygen for KeyGenerator {
    fn generate_key_pair(
        &self,
        strength: KeyStrength,
    ) -> impl Future<Output = Option<PemKeyPair>> + Send {
        KeyGenerator::generate_key_pair(self, strength)
    }
}

impl fmt::Debug for KeyGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyGenerator")
            .field("error_callback", &self.error_callback.is_some())
            .finish()
    }
}

fn generate_blocking(strength: KeyStrength) -> Result<PemKeyPair> {
    generate_with_rng(&mut OsRng, strength)
}

fn generate_with_rng<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    strength: KeyStrength,
) -> Result<PemKeyPair> {
    debug!(target: "asymmetric_rsa", %strength, "generating RSA key pair");
    let private_key = RsaPrivateKey::new(rng, strength.bits())?;
    KeyPair::from_private_key(private_key).to_pem()
}
