//! [`BlockCompressor`] / [`BlockDecompressor`] implementation.

use lzblock_core::error::Result;
use lzblock_core::traits::{BlockCompressor, BlockDecompressor};

use crate::compress::CompressState;
use crate::options::CompressOptions;

/// LZ4 block codec with a reusable compression state.
#[derive(Debug, Clone, Default)]
pub struct Lz4BlockCodec {
    state: CompressState,
    options: CompressOptions,
}

impl Lz4BlockCodec {
    /// Create a codec with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a codec with specific options.
    pub fn with_options(options: CompressOptions) -> Self {
        Self {
            state: CompressState::new(),
            options,
        }
    }

    /// Get the compression options.
    pub fn options(&self) -> &CompressOptions {
        &self.options
    }
}

impl BlockCompressor for Lz4BlockCodec {
    fn max_compressed_len(&self, input_len: usize) -> Result<usize> {
        crate::compress_bound(input_len)
    }

    fn compress_into(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize> {
        self.state.compress(input, output, &self.options)
    }
}

impl BlockDecompressor for Lz4BlockCodec {
    fn decompress_into(
        &mut self,
        input: &[u8],
        output: &mut [u8],
        target_len: usize,
    ) -> Result<usize> {
        crate::decompress_partial(input, output, target_len)
    }
}
