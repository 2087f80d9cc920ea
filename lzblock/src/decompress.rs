//! LZ4 block decompression, full and partial.
//!
//! The decoder walks the block one sequence at a time:
//!
//! ```text
//! ReadToken -> EmitLiterals -> ReadMatchFields -> CopyMatch -> ReadToken ...
//! ```
//!
//! and finishes when the compressed input is exhausted, or, in partial mode, as
//! soon as the requested number of bytes has been regenerated. A partial decode
//! may stop in the middle of a literal run or a match and never looks at the
//! compressed bytes that follow.

use lzblock_core::error::{LzBlockError, Result};
use tracing::{debug, trace};

use crate::compress::{MIN_MATCH, RUN_MASK};

/// How much output the decoder should produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    /// Decode the whole block; overflowing the output is an error.
    Full,
    /// Stop after this many bytes.
    Partial(usize),
}

/// Decompress a whole block into `output`.
///
/// Returns the number of bytes regenerated. Fails with
/// [`LzBlockError::DestinationTooSmall`] if the block expands to more than
/// `output.len()` bytes.
pub fn decompress(input: &[u8], output: &mut [u8]) -> Result<usize> {
    run(input, output, Target::Full)
}

/// Decompress the first `target_len` bytes of a block into `output`.
///
/// `target_len` is clamped to `output.len()`. Returns the number of bytes
/// regenerated, which is `target_len` unless the block is shorter than that.
/// Compressed bytes past the point where the target is reached are not read,
/// so they may be missing or invalid.
pub fn decompress_partial(input: &[u8], output: &mut [u8], target_len: usize) -> Result<usize> {
    run(input, output, Target::Partial(target_len))
}

/// Decompress a whole block into a new buffer of at most `max_output` bytes.
pub fn decompress_to_vec(input: &[u8], max_output: usize) -> Result<Vec<u8>> {
    let mut output = vec![0u8; max_output];
    let produced = decompress(input, &mut output)?;
    output.truncate(produced);
    Ok(output)
}

/// Decompress the first `target_len` bytes of a block into a new buffer.
pub fn decompress_partial_to_vec(input: &[u8], target_len: usize) -> Result<Vec<u8>> {
    let mut output = vec![0u8; target_len];
    let produced = decompress_partial(input, &mut output, target_len)?;
    output.truncate(produced);
    Ok(output)
}

fn run(input: &[u8], output: &mut [u8], target: Target) -> Result<usize> {
    let result = BlockDecoder::new(input).decode(output, target);

    match &result {
        Ok(produced) => debug!(
            input_len = input.len(),
            produced = *produced,
            partial = matches!(target, Target::Partial(_)),
            "decompressed block"
        ),
        Err(error) => debug!(%error, input_len = input.len(), "rejected compressed block"),
    }
    result
}

/// LZ4 block decoder.
struct BlockDecoder<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> BlockDecoder<'a> {
    fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    /// Decode the block into output.
    fn decode(&mut self, output: &mut [u8], target: Target) -> Result<usize> {
        let (limit, partial) = match target {
            Target::Full => (output.len(), false),
            Target::Partial(len) => (len.min(output.len()), true),
        };

        let mut produced = 0;
        if partial && limit == 0 {
            return Ok(0);
        }
        if self.input.is_empty() {
            return Err(LzBlockError::truncated(0, 1));
        }

        while self.pos < self.input.len() {
            // Read token
            let token = self.read_byte()?;
            let literal_len = self.read_length((token >> 4) as usize)?;

            // Copy literals
            let room = limit - produced;
            if literal_len > room {
                if !partial {
                    return Err(LzBlockError::destination_too_small(
                        produced.saturating_add(literal_len),
                        output.len(),
                    ));
                }
                self.copy_literals(&mut output[produced..limit])?;
                trace!(produced = limit, "partial target reached inside literal run");
                return Ok(limit);
            }
            self.copy_literals(&mut output[produced..produced + literal_len])?;
            produced += literal_len;

            if partial && produced == limit {
                trace!(produced, "partial target reached after literal run");
                return Ok(produced);
            }

            // Last sequence has no match part
            if self.pos >= self.input.len() {
                break;
            }

            // Read match offset
            let offset_pos = self.pos;
            let offset = self.read_u16_le()? as usize;
            if offset == 0 || offset > produced {
                return Err(LzBlockError::invalid_offset(offset_pos, offset, produced));
            }

            // Extended match length
            let length_pos = self.pos;
            let match_len = self
                .read_length((token & 0x0F) as usize)?
                .checked_add(MIN_MATCH)
                .ok_or(LzBlockError::length_overflow(length_pos))?;

            // Copy match (handle overlapping)
            let room = limit - produced;
            let copy_len = if match_len > room {
                if !partial {
                    return Err(LzBlockError::destination_too_small(
                        produced.saturating_add(match_len),
                        output.len(),
                    ));
                }
                room
            } else {
                match_len
            };
            copy_match(output, produced, offset, copy_len);
            produced += copy_len;

            if partial && produced == limit {
                trace!(produced, "partial target reached inside match");
                return Ok(produced);
            }

            // A block always ends with a literal-only sequence
            if self.pos >= self.input.len() {
                return Err(LzBlockError::truncated(self.pos, 1));
            }
        }

        Ok(produced)
    }

    /// Fill `dest` from the literal bytes at the current position.
    fn copy_literals(&mut self, dest: &mut [u8]) -> Result<()> {
        let end = self.pos + dest.len();
        if end > self.input.len() {
            return Err(LzBlockError::truncated(self.pos, end - self.input.len()));
        }
        dest.copy_from_slice(&self.input[self.pos..end]);
        self.pos = end;
        Ok(())
    }

    fn read_byte(&mut self) -> Result<u8> {
        if self.pos >= self.input.len() {
            return Err(LzBlockError::truncated(self.pos, 1));
        }
        let b = self.input[self.pos];
        self.pos += 1;
        Ok(b)
    }

    fn read_u16_le(&mut self) -> Result<u16> {
        if self.pos + 2 > self.input.len() {
            return Err(LzBlockError::truncated(
                self.pos,
                self.pos + 2 - self.input.len(),
            ));
        }
        let value = u16::from_le_bytes([self.input[self.pos], self.input[self.pos + 1]]);
        self.pos += 2;
        Ok(value)
    }

    fn read_length(&mut self, base: usize) -> Result<usize> {
        let mut len = base;
        if base == RUN_MASK {
            loop {
                let byte_pos = self.pos;
                let b = self.read_byte()? as usize;
                // Needs more than 16 MiB of 0xFF bytes where usize is 32 bits;
                // unreachable with 64-bit usize.
                len = len
                    .checked_add(b)
                    .ok_or(LzBlockError::length_overflow(byte_pos))?;
                if b != 255 {
                    break;
                }
            }
        }
        Ok(len)
    }
}

/// Copy `len` bytes starting `offset` bytes back from `start`.
///
/// Overlapping copies (`offset < len`) repeat the last `offset` bytes.
fn copy_match(output: &mut [u8], start: usize, offset: usize, len: usize) {
    let src = start - offset;
    if offset >= len {
        output.copy_within(src..src + len, start);
    } else {
        for i in 0..len {
            output[start + i] = output[src + i];
        }
    }
}
