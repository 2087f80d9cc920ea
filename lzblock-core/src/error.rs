//! Error types for lzblock operations.
//!
//! Every failure of the block codec is reported through [`LzBlockError`].
//! Malformed compressed streams, undersized destination buffers and oversized
//! inputs each get their own variant, and every variant maps to a distinct
//! negative integer through [`LzBlockError::code`].

use thiserror::Error;

/// The main error type for lzblock operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LzBlockError {
    /// Input is larger than the maximum supported block size.
    #[error("Input too large: {size} bytes exceeds maximum block size of {max} bytes")]
    InputTooLarge {
        /// Length of the rejected input.
        size: usize,
        /// Largest supported input length.
        max: usize,
    },

    /// Destination buffer cannot hold the result.
    #[error("Destination too small: need {needed} bytes, have {available}")]
    DestinationTooSmall {
        /// Number of bytes the operation needed to write.
        needed: usize,
        /// Capacity of the destination buffer.
        available: usize,
    },

    /// A match offset is zero or reaches before the start of the output.
    #[error(
        "Invalid match offset {offset} at input position {position}: only {produced} bytes produced"
    )]
    InvalidOffset {
        /// Position in the compressed input where the offset was read.
        position: usize,
        /// The offending offset.
        offset: usize,
        /// Number of bytes regenerated when the offset was read.
        produced: usize,
    },

    /// A field or literal run extends past the end of the compressed input.
    #[error("Truncated input at position {position}: expected {needed} more bytes")]
    TruncatedInput {
        /// Position in the compressed input where reading stopped.
        position: usize,
        /// Number of bytes that were expected but not available.
        needed: usize,
    },

    /// A length-extension chain does not fit in `usize`.
    ///
    /// Only reachable on targets with a 32-bit `usize`.
    #[error("Length overflow in extension bytes at position {position}")]
    LengthOverflow {
        /// Position in the compressed input of the overflowing byte.
        position: usize,
    },

    /// A caller-supplied size or parameter is out of range.
    #[error("Invalid parameter: {message}")]
    InvalidParameter {
        /// Description of the bad parameter.
        message: String,
    },
}

/// Result type alias for lzblock operations.
pub type Result<T> = std::result::Result<T, LzBlockError>;

impl LzBlockError {
    /// Create an input too large error.
    pub fn input_too_large(size: usize, max: usize) -> Self {
        Self::InputTooLarge { size, max }
    }

    /// Create a destination too small error.
    pub fn destination_too_small(needed: usize, available: usize) -> Self {
        Self::DestinationTooSmall { needed, available }
    }

    /// Create an invalid offset error.
    pub fn invalid_offset(position: usize, offset: usize, produced: usize) -> Self {
        Self::InvalidOffset {
            position,
            offset,
            produced,
        }
    }

    /// Create a truncated input error.
    pub fn truncated(position: usize, needed: usize) -> Self {
        Self::TruncatedInput { position, needed }
    }

    /// Create a length overflow error.
    pub fn length_overflow(position: usize) -> Self {
        Self::LengthOverflow { position }
    }

    /// Create an invalid parameter error.
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
        }
    }

    /// Returns `true` if the error was caused by a malformed compressed stream.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            Self::InvalidOffset { .. } | Self::TruncatedInput { .. } | Self::LengthOverflow { .. }
        )
    }

    /// Distinct negative integer for this error kind.
    ///
    /// Used by the integer-returning API, where non-negative values are byte
    /// counts and negative values signal failure.
    pub fn code(&self) -> i32 {
        match self {
            Self::InputTooLarge { .. } => -1,
            Self::DestinationTooSmall { .. } => -2,
            Self::InvalidOffset { .. } => -3,
            Self::TruncatedInput { .. } => -4,
            Self::LengthOverflow { .. } => -5,
            Self::InvalidParameter { .. } => -6,
        }
    }
}
