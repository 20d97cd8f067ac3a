//! Single block SHA-256.
//!
//! One call hashes exactly one 64 byte block as a complete message. The
//! provider's finalize step applies the standard padding, so the result is
//! the regular SHA-256 digest of those 64 bytes.

use std::fmt;

use crate::crypto::CryptoProvider;
use crate::util::{to_hex, HexFmt};
use crate::Error;

/// Length of an input block in bytes (512 bits).
pub const BLOCK_LEN: usize = 64;

/// Length of a SHA-256 digest in bytes.
pub const DIGEST_LEN: usize = 32;

/// Hash one 64 byte block with the process default provider.
///
/// The array type makes the block length a compile time guarantee.
///
/// ```
/// let digest = sha256bmb::hash_block(&[0; 64]);
/// assert_eq!(digest[..4], [0xf5, 0xa5, 0xfd, 0x42]);
/// ```
#[inline]
pub fn hash_block(block: &[u8; BLOCK_LEN]) -> [u8; DIGEST_LEN] {
    CryptoProvider::current().sha256_provider.sha256_block(block)
}

/// Hash one block from runtime sized buffers.
///
/// `input` must be exactly [`BLOCK_LEN`] bytes and `output` at least
/// [`DIGEST_LEN`]. Only `output[..32]` is written, and nothing is written
/// on error.
pub fn hash_block_into(input: &[u8], output: &mut [u8]) -> Result<(), Error> {
    let block: &[u8; BLOCK_LEN] = input
        .try_into()
        .map_err(|_| Error::InvalidInputLength(input.len()))?;

    if output.len() < DIGEST_LEN {
        return Err(Error::OutputTooSmall(output.len()));
    }

    output[..DIGEST_LEN].copy_from_slice(&hash_block(block));
    Ok(())
}

/// A 64 byte SHA-256 input block.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Block([u8; BLOCK_LEN]);

impl Block {
    /// Wrap raw bytes.
    pub const fn new(bytes: [u8; BLOCK_LEN]) -> Self {
        Block(bytes)
    }

    /// Block of all zero bytes.
    pub const fn zeroed() -> Self {
        Block([0; BLOCK_LEN])
    }

    /// Underlying bytes.
    pub fn as_bytes(&self) -> &[u8; BLOCK_LEN] {
        &self.0
    }

    pub(crate) fn as_bytes_mut(&mut self) -> &mut [u8; BLOCK_LEN] {
        &mut self.0
    }

    /// SHA-256 of this block.
    pub fn hash(&self) -> Digest {
        Digest(hash_block(&self.0))
    }
}

impl From<[u8; BLOCK_LEN]> for Block {
    fn from(v: [u8; BLOCK_LEN]) -> Self {
        Block(v)
    }
}

impl TryFrom<&[u8]> for Block {
    type Error = Error;

    fn try_from(v: &[u8]) -> Result<Self, Self::Error> {
        let bytes: [u8; BLOCK_LEN] = v
            .try_into()
            .map_err(|_| Error::InvalidInputLength(v.len()))?;
        Ok(Block(bytes))
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&HexFmt(&self.0), f)
    }
}

impl fmt::Debug for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Block({})", self)
    }
}

/// A 32 byte SHA-256 digest.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Digest([u8; DIGEST_LEN]);

impl Digest {
    /// Underlying bytes.
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Lowercase hex, the usual notation for test vectors.
    pub fn to_hex(&self) -> String {
        to_hex(&self.0)
    }
}

impl From<[u8; DIGEST_LEN]> for Digest {
    fn from(v: [u8; DIGEST_LEN]) -> Self {
        Digest(v)
    }
}

impl From<Digest> for [u8; DIGEST_LEN] {
    fn from(v: Digest) -> Self {
        v.0
    }
}

impl TryFrom<&[u8]> for Digest {
    type Error = Error;

    fn try_from(v: &[u8]) -> Result<Self, Self::Error> {
        let bytes: [u8; DIGEST_LEN] = v
            .try_into()
            .map_err(|_| Error::InvalidInputLength(v.len()))?;
        Ok(Digest(bytes))
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&HexFmt(&self.0), f)
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self)
    }
}
