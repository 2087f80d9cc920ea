//! Core traits for block compression.
//!
//! A block codec works on whole, caller-owned buffers: the compressor fills a
//! destination slice and reports how many bytes it wrote, the decompressor
//! regenerates up to a caller-chosen number of bytes. Neither side keeps
//! references to the buffers after returning.

use crate::error::Result;

/// A one-shot block compressor (encoder).
pub trait BlockCompressor {
    /// Worst-case compressed size for an input of `input_len` bytes.
    fn max_compressed_len(&self, input_len: usize) -> Result<usize>;

    /// Compress `input` into `output`.
    ///
    /// # Returns
    ///
    /// The number of bytes written to `output`.
    fn compress_into(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize>;

    /// Compress a whole block into a freshly allocated buffer (convenience method).
    ///
    /// The buffer is sized with [`max_compressed_len`](Self::max_compressed_len)
    /// and truncated to the reported length.
    fn compress_to_vec(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        let mut output = vec![0u8; self.max_compressed_len(input.len())?];
        let written = self.compress_into(input, &mut output)?;
        output.truncate(written);
        Ok(output)
    }
}

/// A one-shot block decompressor (decoder).
pub trait BlockDecompressor {
    /// Decompress `input` into `output`, stopping after `target_len` bytes.
    ///
    /// # Arguments
    ///
    /// * `input` - Compressed block
    /// * `output` - Output buffer for regenerated data
    /// * `target_len` - Number of bytes wanted; may be smaller than the
    ///   original size for partial decompression
    ///
    /// # Returns
    ///
    /// The number of bytes written to `output`, at most `target_len`.
    fn decompress_into(
        &mut self,
        input: &[u8],
        output: &mut [u8],
        target_len: usize,
    ) -> Result<usize>;

    /// Decompress up to `target_len` bytes into a new buffer (convenience method).
    fn decompress_to_vec(&mut self, input: &[u8], target_len: usize) -> Result<Vec<u8>> {
        let mut output = vec![0u8; target_len];
        let produced = self.decompress_into(input, &mut output, target_len)?;
        output.truncate(produced);
        Ok(output)
    }
}
