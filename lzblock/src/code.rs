//! Integer-returning block API.
//!
//! Mirrors the classic LZ4 calling convention: sizes go in and come out as
//! `i32`, compression reports failure as `0`, and decompression reports
//! failure as a negative value equal to [`LzBlockError::code`]. Prefer the
//! `Result`-returning functions at the crate root in Rust code; this module is
//! for callers ported from that convention.

use lzblock_core::error::{LzBlockError, Result};

use crate::options::{Acceleration, CompressOptions};

/// Worst-case compressed size, or `0` if `input_size` is negative or too large.
pub fn compress_bound(input_size: i32) -> i32 {
    usize::try_from(input_size)
        .ok()
        .and_then(|len| crate::compress_bound(len).ok())
        .and_then(|bound| i32::try_from(bound).ok())
        .unwrap_or(0)
}

/// Compress with default acceleration. Returns bytes written, or `0` on failure.
pub fn compress_default(src: &[u8], dst: &mut [u8]) -> i32 {
    compress_fast(src, dst, Acceleration::DEFAULT.get() as i32)
}

/// Compress with the given acceleration. Returns bytes written, or `0` on failure.
///
/// Acceleration values below 1 are treated as 1; values above the maximum are
/// clamped to it.
pub fn compress_fast(src: &[u8], dst: &mut [u8], acceleration: i32) -> i32 {
    let options =
        CompressOptions::new().with_acceleration(Acceleration::saturating(i64::from(acceleration)));
    match crate::compress_with(src, dst, &options) {
        Ok(written) => i32::try_from(written).unwrap_or(0),
        Err(_) => 0,
    }
}

/// Decompress a whole block. Returns bytes regenerated, or a negative error code.
pub fn decompress_safe(src: &[u8], dst: &mut [u8]) -> i32 {
    to_code(crate::decompress(src, dst))
}

/// Decompress at most `target_output_size` bytes of a block.
///
/// Returns bytes regenerated, or a negative error code. A negative
/// `target_output_size` is rejected.
pub fn decompress_safe_partial(src: &[u8], dst: &mut [u8], target_output_size: i32) -> i32 {
    let result = usize::try_from(target_output_size)
        .map_err(|_| LzBlockError::invalid_parameter("negative target output size"))
        .and_then(|target| crate::decompress_partial(src, dst, target));
    to_code(result)
}

fn to_code(result: Result<usize>) -> i32 {
    match result {
        Ok(produced) => i32::try_from(produced).unwrap_or_else(|_| {
            LzBlockError::invalid_parameter("output size exceeds i32 range").code()
        }),
        Err(error) => error.code(),
    }
}
