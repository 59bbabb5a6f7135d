//! Encryption- and signature-related traits.

/// Total encrypt/decrypt/sign/verify operations over PEM-encoded keys.
///
/// None of these methods fail in the `Result` sense. Byte and text results
/// distinguish three outcomes:
///
/// - `Some` of an empty value: the payload or the key argument was empty;
/// - `None`: the operation was attempted and failed (unparsable key, wrong
///   kind of key, corrupt ciphertext);
/// - `Some` of a non-empty value: success.
///
/// Verification collapses every failure to `false`.
pub trait AsymmetricCryptography {
    /// Encrypt `data` under the public half of `public_key_pem`.
    fn encrypt(&self, data: &[u8], public_key_pem: &str) -> Option<Vec<u8>>;

    /// Decrypt `data` with the private key `private_key_pem`.
    fn decrypt(&self, data: &[u8], private_key_pem: &str) -> Option<Vec<u8>>;

    /// Encrypt UTF-8 `text`, returning base64 ciphertext.
    fn encrypt_text(&self, text: &str, public_key_pem: &str) -> Option<String>;

    /// Decrypt base64 `text` back into the original UTF-8 text.
    fn decrypt_text(&self, text: &str, private_key_pem: &str) -> Option<String>;

    /// Sign `data` with the private key `private_key_pem`.
    fn sign(&self, data: &[u8], private_key_pem: &str) -> Option<Vec<u8>>;

    /// Sign UTF-8 `text`, returning a base64 signature.
    fn sign_text(&self, text: &str, private_key_pem: &str) -> Option<String>;

    /// Check a signature obtained from [`sign`](Self::sign).
    fn verify(&self, data: &[u8], signature: &[u8], public_key_pem: &str) -> bool;

    /// Check a base64 signature obtained from [`sign_text`](Self::sign_text).
    fn verify_text(&self, text: &str, signature: &str, public_key_pem: &str) -> bool;
}
