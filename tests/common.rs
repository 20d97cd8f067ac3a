#![allow(unused)]
use std::sync::Once;

use sha256bmb::crypto::CryptoProvider;

pub fn init_log() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    static START: Once = Once::new();

    START.call_once(|| {
        tracing_subscriber::registry()
            .with(fmt::layer().with_test_writer())
            .with(env_filter)
            .init();
    });
}

/// Install the provider named by `SHA256_CRYPTO`, or the feature flag default.
pub fn init_crypto_default() {
    let provider = match std::env::var("SHA256_CRYPTO") {
        Ok(name) => get_crypto_provider_by_name(&name),
        Err(_) => sha256bmb::crypto::from_feature_flags(),
    };
    provider.install_process_default();
}

/// Create a crypto provider from a string name.
/// Supported names: "rust-crypto", "openssl"
fn get_crypto_provider_by_name(name: &str) -> CryptoProvider {
    match name {
        #[cfg(feature = "rust-crypto")]
        "rust-crypto" => sha256bmb::crypto::rust_crypto::default_provider(),

        #[cfg(feature = "openssl")]
        "openssl" => sha256bmb::crypto::openssl::default_provider(),

        _ => {
            let mut available = Vec::new();
            #[cfg(feature = "rust-crypto")]
            available.push("rust-crypto");
            #[cfg(feature = "openssl")]
            available.push("openssl");

            panic!(
                "Unknown or unavailable crypto provider '{}'. Available providers: [{}]",
                name,
                available.join(", ")
            )
        }
    }
}

/// Convert an ASCII hex array into a byte array at compile time.
macro_rules! hex_as_bytes {
    ($input:expr) => {{
        const fn from_hex_char(c: u8) -> u8 {
            match c {
                b'0'..=b'9' => c - b'0',
                b'a'..=b'f' => c - b'a' + 10,
                b'A'..=b'F' => c - b'A' + 10,
                _ => panic!("Invalid hex character"),
            }
        }

        const INPUT: &[u8] = $input;
        const LEN: usize = INPUT.len();
        const OUTPUT_LEN: usize = LEN / 2;

        const fn convert() -> [u8; OUTPUT_LEN] {
            assert!(LEN % 2 == 0, "Hex string length must be even");

            let mut out = [0u8; OUTPUT_LEN];
            let mut i = 0;
            while i < LEN {
                out[i / 2] = (from_hex_char(INPUT[i]) << 4) | from_hex_char(INPUT[i + 1]);
                i += 2;
            }
            out
        }

        convert()
    }};
}
