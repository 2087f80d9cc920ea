//! # lzblock Core
//!
//! Core components shared by the lzblock codec crates:
//!
//! - [`error`]: the [`LzBlockError`] type and [`Result`] alias
//! - [`traits`]: [`BlockCompressor`] and [`BlockDecompressor`]
//!
//! ## Example
//!
//! ```rust
//! use lzblock_core::error::LzBlockError;
//!
//! let err = LzBlockError::destination_too_small(64, 16);
//! assert_eq!(err.code(), -2);
//! assert!(!err.is_malformed());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod traits;

// Re-exports for convenience
pub use error::{LzBlockError, Result};
pub use traits::{BlockCompressor, BlockDecompressor};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{LzBlockError, Result};
    pub use crate::traits::{BlockCompressor, BlockDecompressor};
}
