//! Single-block SHA-256 with a C ABI.
//!
//! The core of this crate is one operation: hash exactly one 64 byte block
//! and produce the 32 byte SHA-256 digest. The compression function itself
//! comes from a vetted library chosen by cargo feature (see [`crypto`]).
//!
//! ```
//! use sha256bmb::{hash_block, Block};
//!
//! let digest = hash_block(&[0x61; 64]);
//! assert_eq!(Block::new([0x61; 64]).hash().as_bytes(), &digest);
//! ```
//!
//! # Buffer contracts
//!
//! The crate offers both stances on buffer validation:
//!
//! * Rust callers get the checked form. [`hash_block`] takes `&[u8; 64]`, so
//!   the length is enforced by the type system. [`hash_block_into`] takes
//!   slices and returns [`ErrorKind::InvalidArgument`] errors for a wrong
//!   input length or a too small output.
//! * The C exports `HashBlock` and `SHA256Ex` keep the unchecked contract of
//!   the native library they replace. Short or null buffers are undefined
//!   behavior. `HashBlockChecked` validates lengths and pointers instead.
//!   See [`ffi`].
//!
//! No call keeps state. Concurrent calls with distinct buffers are safe.
//!
//! # Proof of work
//!
//! The block hash exists to drive the sha256bmb proof of work, which lives
//! in [`pow`] (block layout, difficulty check, verification) and [`worker`]
//! (CPU search threads). Worker settings come from a JSON config, see
//! [`MinerConfig`].
//!
//! # Crypto backends
//!
//! | feature       | library                          |
//! |---------------|----------------------------------|
//! | `rust-crypto` | RustCrypto `sha2` (default)      |
//! | `openssl`     | OpenSSL `SHA256_Init/Update/Final` |
//!
//! Install a specific backend before the first hash with
//! [`CryptoProvider::install_process_default`].

#![allow(clippy::new_without_default)]
#![allow(clippy::manual_range_contains)]
#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

mod block;
pub use block::{hash_block, hash_block_into, Block, Digest, BLOCK_LEN, DIGEST_LEN};

pub mod crypto;
pub use crypto::CryptoProvider;

mod config;
pub use config::{CpuConfig, MinerConfig, CONFIG_SECTION};

mod error;
pub use error::{Error, ErrorKind};

pub mod ffi;

pub mod pow;

mod util;
pub use util::{from_hex, from_hex_array, to_hex, to_hex_upper};

pub mod worker;
pub use worker::WorkerPool;
