//! SHA-256 backends.
//!
//! Which library computes the digest is decided by cargo features, see
//! [`CryptoProvider::from_feature_flags`]. A process can also install its own
//! provider before the first hash.

mod provider;
pub use provider::{CryptoProvider, CryptoSafe, Sha256Provider};

#[cfg(test)]
pub(crate) use provider::test_default_provider;

#[cfg(feature = "rust-crypto")]
pub mod rust_crypto;

#[cfg(feature = "openssl")]
pub mod openssl;

/// Create a crypto provider based on enabled feature flags.
pub fn from_feature_flags() -> CryptoProvider {
    CryptoProvider::from_feature_flags()
}
