//! C ABI exports.
//!
//! `HashBlock` and `SHA256Ex` keep the contract of the native library they
//! replace: no length or null checks, the caller guarantees 64 readable input
//! bytes and 32 writable output bytes. `HashBlockChecked` is the validating
//! variant for new callers. The header is `include/sha256bmb.h`.

#![allow(non_snake_case)]

use std::ffi::c_int;
use std::ptr;

use crate::block::{hash_block, BLOCK_LEN, DIGEST_LEN};

/// Success.
pub const HASH_OK: c_int = 0;
/// `input` or `output` was null.
pub const HASH_ERR_NULL: c_int = -1;
/// `input_len` was not 64.
pub const HASH_ERR_INPUT_LEN: c_int = -2;
/// `output_len` was below 32.
pub const HASH_ERR_OUTPUT_LEN: c_int = -3;

/// SHA-256 of the 64 bytes at `input`, written to the 32 bytes at `output`.
///
/// The whole block is read before the digest is written, so `input` and
/// `output` may overlap.
///
/// # Safety
///
/// `input` must be valid for reading 64 bytes and `output` valid for writing
/// 32 bytes. Neither is checked.
#[no_mangle]
pub unsafe extern "C" fn HashBlock(input: *const u8, output: *mut u8) {
    // SAFETY: the caller guarantees 64 readable bytes. [u8; 64] has alignment 1.
    let block = unsafe { ptr::read(input as *const [u8; BLOCK_LEN]) };

    let digest = hash_block(&block);

    // SAFETY: the caller guarantees 32 writable bytes. [u8; 32] has alignment 1.
    unsafe { ptr::write(output as *mut [u8; DIGEST_LEN], digest) };
}

/// Same as [`HashBlock`], under the symbol name of the original native library.
///
/// # Safety
///
/// See [`HashBlock`].
#[no_mangle]
pub unsafe extern "C" fn SHA256Ex(buffer: *const u8, output: *mut u8) {
    unsafe { HashBlock(buffer, output) }
}

/// Validating [`HashBlock`].
///
/// Returns [`HASH_OK`] on success, otherwise one of the `HASH_ERR_*` codes
/// and leaves `output` untouched.
///
/// # Safety
///
/// When non-null, `input` must be valid for reading `input_len` bytes and
/// `output` valid for writing `output_len` bytes.
#[no_mangle]
pub unsafe extern "C" fn HashBlockChecked(
    input: *const u8,
    input_len: usize,
    output: *mut u8,
    output_len: usize,
) -> c_int {
    if input.is_null() || output.is_null() {
        return HASH_ERR_NULL;
    }
    if input_len != BLOCK_LEN {
        return HASH_ERR_INPUT_LEN;
    }
    if output_len < DIGEST_LEN {
        return HASH_ERR_OUTPUT_LEN;
    }

    // SAFETY: lengths checked above, validity is on the caller.
    unsafe { HashBlock(input, output) };
    HASH_OK
}
