//! Worst-case compressed size.

use lzblock_core::error::{LzBlockError, Result};

/// Largest input a single block can hold (2 113 929 216 bytes).
pub const MAX_INPUT_SIZE: usize = 0x7E00_0000;

/// Maximum number of bytes the compressed form of `input_len` bytes can take.
///
/// The bound covers incompressible input: one literal run with its
/// length-extension bytes plus a small constant margin. A destination buffer
/// of this size always fits the output of [`compress`](crate::compress).
///
/// Fails with [`LzBlockError::InputTooLarge`] above [`MAX_INPUT_SIZE`].
pub fn compress_bound(input_len: usize) -> Result<usize> {
    if input_len > MAX_INPUT_SIZE {
        return Err(LzBlockError::input_too_large(input_len, MAX_INPUT_SIZE));
    }
    Ok(input_len + input_len / 255 + 16)
}
