//! OpenSSL SHA-256 implementation.

use openssl::sha::Sha256;

use super::super::Sha256Provider;
use crate::block::{BLOCK_LEN, DIGEST_LEN};

/// OpenSSL-based SHA-256 provider.
#[derive(Debug)]
pub struct OsslSha256Provider;

impl Sha256Provider for OsslSha256Provider {
    fn sha256_block(&self, block: &[u8; BLOCK_LEN]) -> [u8; DIGEST_LEN] {
        // Sha256::new/update/finish wrap SHA256_Init/Update/Final.
        let mut ctx = Sha256::new();
        ctx.update(block);
        ctx.finish()
    }

    fn sha256(&self, data: &[u8]) -> [u8; DIGEST_LEN] {
        openssl::sha::sha256(data)
    }
}
