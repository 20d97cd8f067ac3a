//! RustCrypto cryptographic provider implementation.
//!
//! # Feature Flag
//!
//! This module is only available when the `rust-crypto` feature is enabled.
//! The `rust-crypto` feature is included in the default features.

mod sha256;

use super::CryptoProvider;
use sha256::RustCryptoSha256Provider;

/// Create the default RustCrypto crypto provider.
///
/// SHA-256 is computed by the `sha2` crate.
pub fn default_provider() -> CryptoProvider {
    static SHA256: RustCryptoSha256Provider = RustCryptoSha256Provider;

    CryptoProvider {
        name: "rust-crypto",
        sha256_provider: &SHA256,
    }
}
