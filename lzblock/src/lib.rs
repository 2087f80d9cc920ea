//! Pure Rust LZ4 block compression with partial decompression.
//!
//! LZ4 is a lossless compression algorithm focusing on compression and
//! decompression speed. This crate implements the raw LZ4 *block* format: a
//! compressed block is self-contained and carries no header, so the caller
//! keeps track of the original size.
//!
//! # Features
//!
//! - Worst-case output sizing with [`compress_bound`]
//! - Block compression into caller-owned buffers, no heap allocation
//! - Full and partial (early-stop) decompression
//! - Integer-returning API in [`code`] for the classic LZ4 convention
//! - Compatible with the lz4 reference block format
//!
//! # Example
//!
//! ```
//! use lzblock::{compress, compress_bound, decompress_partial};
//!
//! let data = b"Hello, World! Hello, World! Hello, World!";
//! let mut compressed = vec![0u8; compress_bound(data.len()).unwrap()];
//! let n = compress(data, &mut compressed).unwrap();
//! compressed.truncate(n);
//!
//! let mut head = [0u8; 13];
//! let produced = decompress_partial(&compressed, &mut head, 13).unwrap();
//! assert_eq!(&head[..produced], b"Hello, World!");
//! ```

pub mod bound;
pub mod code;
mod codec;
mod compress;
mod decompress;
pub mod options;

pub use bound::{MAX_INPUT_SIZE, compress_bound};
pub use codec::Lz4BlockCodec;
pub use compress::{CompressState, compress, compress_to_vec, compress_with};
pub use decompress::{decompress, decompress_partial, decompress_partial_to_vec, decompress_to_vec};
pub use options::{Acceleration, CompressOptions};

pub use lzblock_core::error::{LzBlockError, Result};
pub use lzblock_core::traits::{BlockCompressor, BlockDecompressor};
