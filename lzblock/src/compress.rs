//! LZ4 block compression.
//!
//! LZ4 block format:
//! - Sequences of (token, [literal_length_ext], literals, offset, [match_length_ext])
//! - Token: 4-bit literal length + 4-bit match length
//! - If a nibble is 15, additional bytes follow (add 255 until byte < 255)
//! - Literals: raw bytes
//! - Offset: 2 bytes little-endian (match offset, 1-65535)
//! - Match length is +4 (minimum match = 4)
//! - The last sequence has literals only
//!
//! End-of-block rules kept by the encoder so that any LZ4 decoder accepts the
//! output: the last [`LAST_LITERALS`] bytes are always literals, and no match
//! starts within the last [`MF_LIMIT`] bytes.

use lzblock_core::error::{LzBlockError, Result};
use tracing::debug;

use crate::bound::{MAX_INPUT_SIZE, compress_bound};
use crate::options::CompressOptions;

/// Minimum match length.
pub(crate) const MIN_MATCH: usize = 4;

/// Number of trailing bytes always emitted as literals.
pub(crate) const LAST_LITERALS: usize = 5;

/// No match may start within this many bytes of the end of input.
pub(crate) const MF_LIMIT: usize = 12;

/// Inputs shorter than this are emitted as a single literal run.
const MIN_LENGTH: usize = MF_LIMIT + 1;

/// Maximum match offset (16-bit).
pub(crate) const MAX_OFFSET: usize = 65535;

/// Nibble value announcing length-extension bytes.
pub(crate) const RUN_MASK: usize = 15;

const HASH_LOG: u32 = 12;

/// Hash table size (must be power of 2).
const HASH_SIZE: usize = 1 << HASH_LOG; // 4K entries

/// Failed lookups before the search step grows by one.
const SKIP_TRIGGER: u32 = 6;

/// Reusable compression state.
///
/// Holds the match-finder hash table so repeated calls do not rebuild it on
/// the stack. The table is cleared at the start of every call: no match ever
/// refers to a previously compressed block.
#[derive(Clone)]
pub struct CompressState {
    hash_table: [u32; HASH_SIZE],
}

impl CompressState {
    /// Create a fresh state.
    pub fn new() -> Self {
        Self {
            hash_table: [0; HASH_SIZE],
        }
    }

    /// Compress `input` into `output`, returning the number of bytes written.
    pub fn compress(
        &mut self,
        input: &[u8],
        output: &mut [u8],
        options: &CompressOptions,
    ) -> Result<usize> {
        self.hash_table.fill(0);

        let result = BlockEncoder::new(input, output).encode(
            &mut self.hash_table,
            options.acceleration().get() as usize,
        );

        match &result {
            Ok(written) => debug!(
                input_len = input.len(),
                compressed_len = *written,
                "compressed block"
            ),
            Err(error) => debug!(%error, input_len = input.len(), "block compression failed"),
        }
        result
    }
}

impl Default for CompressState {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CompressState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompressState")
            .field("hash_entries", &HASH_SIZE)
            .finish()
    }
}

/// Compress `input` into `output` with default options.
///
/// `output` should be at least [`compress_bound`]`(input.len())` bytes; a
/// smaller buffer works when the data compresses well, and otherwise fails
/// with [`LzBlockError::DestinationTooSmall`] without writing past its end.
pub fn compress(input: &[u8], output: &mut [u8]) -> Result<usize> {
    compress_with(input, output, &CompressOptions::default())
}

/// Compress `input` into `output` with explicit options.
pub fn compress_with(input: &[u8], output: &mut [u8], options: &CompressOptions) -> Result<usize> {
    CompressState::new().compress(input, output, options)
}

/// Compress `input` into a new buffer sized to the exact compressed length.
pub fn compress_to_vec(input: &[u8]) -> Result<Vec<u8>> {
    let mut output = vec![0u8; compress_bound(input.len())?];
    let written = compress(input, &mut output)?;
    output.truncate(written);
    Ok(output)
}

/// Number of extension bytes needed to encode `len` in a nibble-plus-bytes field.
#[inline]
fn extension_len(len: usize) -> usize {
    if len >= RUN_MASK {
        (len - RUN_MASK) / 255 + 1
    } else {
        0
    }
}

/// LZ4 block encoder.
struct BlockEncoder<'a> {
    input: &'a [u8],
    output: &'a mut [u8],
    out_pos: usize,
}

impl<'a> BlockEncoder<'a> {
    fn new(input: &'a [u8], output: &'a mut [u8]) -> Self {
        Self {
            input,
            output,
            out_pos: 0,
        }
    }

    /// Compute hash for 4 bytes.
    #[inline]
    fn hash(sequence: u32) -> usize {
        (sequence.wrapping_mul(2654435761) >> (32 - HASH_LOG)) as usize
    }

    /// Read 4 bytes as u32 (little-endian).
    #[inline]
    fn read_u32(data: &[u8], pos: usize) -> u32 {
        u32::from_le_bytes([data[pos], data[pos + 1], data[pos + 2], data[pos + 3]])
    }

    /// Encode the whole input, returning the compressed length.
    fn encode(mut self, table: &mut [u32; HASH_SIZE], acceleration: usize) -> Result<usize> {
        let input = self.input;
        let len = input.len();

        if len > MAX_INPUT_SIZE {
            return Err(LzBlockError::input_too_large(len, MAX_INPUT_SIZE));
        }

        // Start of current literal run
        let mut anchor = 0;

        if len >= MIN_LENGTH {
            let match_limit = len - LAST_LITERALS;
            // Last position a match may start at
            let mf_limit = len - MF_LIMIT;

            table[Self::hash(Self::read_u32(input, 0))] = 0;
            let mut pos = 1;

            'sequences: loop {
                let mut search_count = acceleration << SKIP_TRIGGER;
                let candidate = loop {
                    if pos > mf_limit {
                        break 'sequences;
                    }

                    let cur_u32 = Self::read_u32(input, pos);
                    let h = Self::hash(cur_u32);
                    let candidate = table[h] as usize;
                    table[h] = pos as u32;

                    if candidate < pos
                        && pos - candidate <= MAX_OFFSET
                        && Self::read_u32(input, candidate) == cur_u32
                    {
                        break candidate;
                    }

                    pos += search_count >> SKIP_TRIGGER;
                    search_count += 1;
                };

                // Extend match backwards into the pending literals
                let mut start = pos;
                let mut reference = candidate;
                while start > anchor && reference > 0 && input[start - 1] == input[reference - 1] {
                    start -= 1;
                    reference -= 1;
                }

                // Extend match forwards
                let mut match_len = MIN_MATCH;
                while start + match_len < match_limit
                    && input[reference + match_len] == input[start + match_len]
                {
                    match_len += 1;
                }

                self.emit_sequence(anchor, start, start - reference, match_len)?;

                pos = start + match_len;
                anchor = pos;
                if pos > mf_limit {
                    break;
                }

                let filler = pos - 2;
                table[Self::hash(Self::read_u32(input, filler))] = filler as u32;
            }
        }

        self.emit_last_literals(anchor)?;
        Ok(self.out_pos)
    }

    /// Fail unless `count` more bytes fit in the output.
    fn reserve(&self, count: usize) -> Result<()> {
        let needed = self.out_pos + count;
        if needed > self.output.len() {
            return Err(LzBlockError::destination_too_small(
                needed,
                self.output.len(),
            ));
        }
        Ok(())
    }

    #[inline]
    fn push(&mut self, byte: u8) {
        self.output[self.out_pos] = byte;
        self.out_pos += 1;
    }

    fn push_slice(&mut self, bytes: &[u8]) {
        self.output[self.out_pos..self.out_pos + bytes.len()].copy_from_slice(bytes);
        self.out_pos += bytes.len();
    }

    /// Write the extension bytes of a length whose nibble saturated at 15.
    fn push_length_ext(&mut self, len: usize) {
        if len >= RUN_MASK {
            let mut remaining = len - RUN_MASK;
            while remaining >= 255 {
                self.push(255);
                remaining -= 255;
            }
            self.push(remaining as u8);
        }
    }

    /// Emit literals `anchor..match_start` followed by a match reference.
    fn emit_sequence(
        &mut self,
        anchor: usize,
        match_start: usize,
        offset: usize,
        match_len: usize,
    ) -> Result<()> {
        let literal_len = match_start - anchor;
        let match_code = match_len - MIN_MATCH;

        self.reserve(
            1 + extension_len(literal_len) + literal_len + 2 + extension_len(match_code),
        )?;

        // Token: upper 4 bits = literal length, lower 4 bits = match length - 4
        let token = (literal_len.min(RUN_MASK) << 4) | match_code.min(RUN_MASK);
        self.push(token as u8);
        self.push_length_ext(literal_len);
        let input = self.input;
        self.push_slice(&input[anchor..match_start]);

        // Offset: 2 bytes little-endian
        self.push(offset as u8);
        self.push((offset >> 8) as u8);
        self.push_length_ext(match_code);

        Ok(())
    }

    /// Emit the last literals (no match at the end).
    fn emit_last_literals(&mut self, anchor: usize) -> Result<()> {
        let literal_len = self.input.len() - anchor;
        self.reserve(1 + extension_len(literal_len) + literal_len)?;

        self.push((literal_len.min(RUN_MASK) << 4) as u8);
        self.push_length_ext(literal_len);
        let input = self.input;
        self.push_slice(&input[anchor..]);

        Ok(())
    }
}
