//! Trait seams for the facade and the key generator.

mod encryption;
mod keygen;

pub use encryption::AsymmetricCryptography;
pub use keygen::AsymmetricKeygen;
