//! OpenSSL cryptographic provider implementation.
//!
//! This is the backend the native `SHA256Ex` library was originally linked
//! against.
//!
//! # Feature Flag
//!
//! This module is only available when the `openssl` feature is enabled.
//! Add `vendored` to build OpenSSL from source instead of linking the system
//! library.

mod sha256;

use super::CryptoProvider;
use sha256::OsslSha256Provider;

/// Create the default OpenSSL crypto provider.
///
/// SHA-256 is computed by OpenSSL's `SHA256_Init`, `SHA256_Update` and
/// `SHA256_Final`.
pub fn default_provider() -> CryptoProvider {
    static SHA256: OsslSha256Provider = OsslSha256Provider;

    CryptoProvider {
        name: "openssl",
        sha256_provider: &SHA256,
    }
}
