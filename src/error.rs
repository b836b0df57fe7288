use thiserror::Error;

/// Flat classification of the most recent failure, as recorded by a
/// [`Context`].
///
/// [`Context`]: crate::Context
#[derive(Debug, Default, PartialEq, Eq, Hash, Clone, Copy)]
pub enum ErrorCode {
    /// No error has been recorded.
    #[default]
    None,
    /// A size or index was below the valid domain (non-positive bit count or
    /// negative index).
    OutOfRangeLow,
    /// A size or index was above the valid domain (bit count over the
    /// allocation limit or index past the end of the bitmap).
    OutOfRangeHigh,
    /// The backing buffer could not be obtained.
    Allocation,
}

impl ErrorCode {
    /// Returns `true` for both range variants.
    ///
    /// # Examples
    /// ```
    /// use byte_bitmap::ErrorCode;
    ///
    /// assert!(ErrorCode::OutOfRangeLow.is_out_of_range());
    /// assert!(ErrorCode::OutOfRangeHigh.is_out_of_range());
    /// assert!(!ErrorCode::Allocation.is_out_of_range());
    /// ```
    #[inline]
    pub const fn is_out_of_range(self) -> bool {
        matches!(self, Self::OutOfRangeLow | Self::OutOfRangeHigh)
    }
}

/// Failure of a bitmap or context operation.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Error)]
pub enum Error {
    /// Requested bit count was zero or negative.
    #[error("bit count {0} must be greater than zero")]
    BitCountTooSmall(i64),
    /// Requested bit count exceeds the allocation limit.
    #[error("bit count {requested} exceeds the allocation limit of {limit} bits")]
    BitCountTooLarge {
        /// The bit count passed to `create`.
        requested: i64,
        /// The limit in effect at the time of the call.
        limit: i64,
    },
    /// Bit index was negative.
    #[error("bit index {0} is negative")]
    NegativeIndex(i64),
    /// Bit index was at or past the end of the bitmap.
    #[error("bit index {index} out of bounds for a bitmap of {bit_count} bits")]
    IndexTooLarge {
        /// The offending index.
        index: i64,
        /// Number of addressable bits in the bitmap.
        bit_count: i64,
    },
    /// The backing buffer could not be allocated.
    #[error("failed to allocate {bytes} bytes for the bitmap buffer")]
    Allocation {
        /// Size of the buffer that was requested.
        bytes: usize,
    },
}

impl Error {
    /// Returns the flat [`ErrorCode`] for this error.
    ///
    /// # Examples
    /// ```
    /// use byte_bitmap::{Error, ErrorCode};
    ///
    /// assert_eq!(Error::NegativeIndex(-1).code(), ErrorCode::OutOfRangeLow);
    /// assert_eq!(Error::Allocation { bytes: 8 }.code(), ErrorCode::Allocation);
    /// ```
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::BitCountTooSmall(_) | Self::NegativeIndex(_) => ErrorCode::OutOfRangeLow,
            Self::BitCountTooLarge { .. } | Self::IndexTooLarge { .. } => {
                ErrorCode::OutOfRangeHigh
            }
            Self::Allocation { .. } => ErrorCode::Allocation,
        }
    }
}
