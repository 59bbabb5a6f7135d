use core::future::Future;

use crate::key::{KeyStrength, PemKeyPair};

/// Asynchronous RSA key pair generation.
pub trait AsymmetricKeygen {
    /// Generate a fresh key pair of the given strength as PEM text.
    ///
    /// Resolves to `None` when generation failed. Generation runs on the
    /// blocking pool of the current Tokio runtime, so polling the future
    /// outside one also resolves to `None`.
    fn generate_key_pair(
        &self,
        strength: KeyStrength,
    ) -> impl Future<Output = Option<PemKeyPair>> + Send;
}
