//! Cryptographic provider traits for pluggable SHA-256 backends.
//!
//! The compression function is never implemented in this crate. A provider
//! wraps a vetted library (RustCrypto or OpenSSL) and the block hashing code
//! only talks to the trait defined here.

use std::fmt;
use std::fmt::Debug;
use std::panic::{RefUnwindSafe, UnwindSafe};
use std::sync::OnceLock;

use crate::block::{BLOCK_LEN, DIGEST_LEN};

/// Cryptographic provider for SHA-256.
///
/// Holds a static reference to the hashing backend. Users can supply their
/// own [`Sha256Provider`] to replace the one selected by feature flags.
#[derive(Debug, Clone, Copy)]
pub struct CryptoProvider {
    /// Short backend name, used in log lines.
    pub name: &'static str,
    /// SHA-256 hash provider.
    pub sha256_provider: &'static dyn Sha256Provider,
}

/// CryptoProvider contains only static references to thread-safe traits,
/// so it's safe to use across panic boundaries.
impl UnwindSafe for CryptoProvider {}
impl RefUnwindSafe for CryptoProvider {}

/// Static storage for the default crypto provider.
static DEFAULT: OnceLock<CryptoProvider> = OnceLock::new();

impl CryptoProvider {
    /// Create a crypto provider based on enabled feature flags.
    ///
    /// Priority order: rust-crypto, openssl
    #[allow(unreachable_code, clippy::needless_return)]
    pub fn from_feature_flags() -> CryptoProvider {
        #[cfg(feature = "rust-crypto")]
        return super::rust_crypto::default_provider();

        #[cfg(feature = "openssl")]
        return super::openssl::default_provider();

        panic!("No crypto provider available. Enable one of: rust-crypto, openssl");
    }

    /// Install this provider as the process-wide default.
    ///
    /// Does nothing if a default is already installed.
    pub fn install_process_default(self) {
        if DEFAULT.set(self).is_ok() {
            debug!("Installed process default crypto provider: {}", self.name);
        }
    }

    /// Install a default crypto provider for the process.
    ///
    /// # Panics
    ///
    /// Panics if called more than once.
    pub fn install_default(provider: CryptoProvider) {
        DEFAULT
            .set(provider)
            .expect("CryptoProvider::install_default() called more than once");
        debug!("Installed default crypto provider: {}", provider.name);
    }

    /// Get the default crypto provider, if one has been installed.
    pub fn get_default() -> Option<&'static CryptoProvider> {
        DEFAULT.get()
    }

    /// The installed default, or the feature flag provider if none was installed.
    ///
    /// The first call without an installed default installs the feature flag one.
    pub(crate) fn current() -> &'static CryptoProvider {
        // Called on every hash, so this path does not log.
        DEFAULT.get_or_init(CryptoProvider::from_feature_flags)
    }
}

impl fmt::Display for CryptoProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CryptoProvider({})", self.name)
    }
}

// ============================================================================
// Marker Trait
// ============================================================================

/// Marker trait for types that are safe to use in crypto provider components.
///
/// This trait combines the common bounds required for crypto provider trait objects:
/// - [`Send`] + [`Sync`]: Thread-safe
/// - [`Debug`]: Support debugging
pub trait CryptoSafe: Send + Sync + Debug {}

/// Blanket implementation: any type satisfying the bounds implements [`CryptoSafe`].
impl<T: Send + Sync + Debug> CryptoSafe for T {}

// ============================================================================
// Main Provider Traits
// ============================================================================

/// SHA-256 hash provider.
///
/// Implementations run the library's initialize, update, finalize sequence.
/// They hold no state between calls.
pub trait Sha256Provider: CryptoSafe {
    /// Compute SHA-256 of exactly one 64 byte block.
    ///
    /// The block is hashed as a complete 64 byte message, so finalization
    /// appends the standard padding block.
    fn sha256_block(&self, block: &[u8; BLOCK_LEN]) -> [u8; DIGEST_LEN] {
        self.sha256(block)
    }

    /// Compute SHA-256 hash of the input data.
    fn sha256(&self, data: &[u8]) -> [u8; DIGEST_LEN];
}

/// Test-only default provider, cached and initialized via `from_feature_flags()`.
#[cfg(test)]
pub(crate) fn test_default_provider() -> &'static CryptoProvider {
    static TEST_PROVIDER: OnceLock<CryptoProvider> = OnceLock::new();
    TEST_PROVIDER.get_or_init(CryptoProvider::from_feature_flags)
}

#[cfg(test)]
mod test {
    use super::*;

    #[derive(Debug)]
    struct ZeroProvider;

    impl Sha256Provider for ZeroProvider {
        fn sha256(&self, _data: &[u8]) -> [u8; DIGEST_LEN] {
            [0; DIGEST_LEN]
        }
    }

    #[test]
    fn block_defaults_to_sha256() {
        let p = ZeroProvider;
        assert_eq!(p.sha256_block(&[1; BLOCK_LEN]), [0; DIGEST_LEN]);
    }

    #[test]
    fn feature_flag_provider_is_named() {
        let p = test_default_provider();
        assert!(!p.name.is_empty());
        assert_eq!(p.to_string(), format!("CryptoProvider({})", p.name));
    }

    #[test]
    fn current_is_stable() {
        let a = CryptoProvider::current() as *const _;
        let b = CryptoProvider::current() as *const _;
        assert_eq!(a, b);
    }
}
