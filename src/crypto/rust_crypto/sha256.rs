//! RustCrypto SHA-256 implementation.

use sha2::{Digest, Sha256};

use super::super::Sha256Provider;
use crate::block::{BLOCK_LEN, DIGEST_LEN};

/// RustCrypto-based SHA-256 provider.
#[derive(Debug)]
pub struct RustCryptoSha256Provider;

impl Sha256Provider for RustCryptoSha256Provider {
    fn sha256_block(&self, block: &[u8; BLOCK_LEN]) -> [u8; DIGEST_LEN] {
        let mut hasher = Sha256::new();
        hasher.update(block);
        hasher.finalize().into()
    }

    fn sha256(&self, data: &[u8]) -> [u8; DIGEST_LEN] {
        let mut hasher = Sha256::new();
        hasher.update(data);
        hasher.finalize().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_abc() {
        // SHA-256 of "abc" - NIST test vector
        let hash = RustCryptoSha256Provider.sha256(b"abc");
        let expected = [
            0xba, 0x78, 0x16, 0xbf, 0x8f, 0x01, 0xcf, 0xea, 0x41, 0x41, 0x40, 0xde, 0x5d, 0xae,
            0x22, 0x23, 0xb0, 0x03, 0x61, 0xa3, 0x96, 0x17, 0x7a, 0x9c, 0xb4, 0x10, 0xff, 0x61,
            0xf2, 0x00, 0x15, 0xad,
        ];
        assert_eq!(hash, expected);
    }

    #[test]
    fn test_block_matches_slice() {
        let block = [0x61; BLOCK_LEN];
        let p = RustCryptoSha256Provider;
        assert_eq!(p.sha256_block(&block), p.sha256(&block[..]));
    }
}
