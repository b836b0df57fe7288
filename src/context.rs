use crate::bitmap::Bitmap;
use crate::error::{Error, ErrorCode};

/// Default allocation limit: 10 MiB worth of backing bytes, in bits.
pub const DEFAULT_LIMIT: i64 = 10_485_760;

/// Holds the allocation limit and the code of the last failed operation.
///
/// Bitmaps are created through a context. Every bitmap operation returns a
/// [`Result`] carrying its own [`Error`], so the context is only needed
/// afterwards by callers that want to poll [`get_error`] instead of
/// inspecting each result. Those callers route operations through the
/// forwarding methods ([`get`], [`set`], [`unset`], [`clear`],
/// [`next_set`]), which record failures.
///
/// Successful operations leave the recorded error untouched.
///
/// # Examples
/// ```
/// use byte_bitmap::{Context, ErrorCode};
///
/// let mut ctx = Context::new();
/// let mut bm = ctx.create(16).unwrap();
/// assert!(ctx.set(&mut bm, 16).is_err());
/// assert_eq!(ctx.get_error(), ErrorCode::OutOfRangeHigh);
/// ```
///
/// [`get_error`]: Context::get_error
/// [`get`]: Context::get
/// [`set`]: Context::set
/// [`unset`]: Context::unset
/// [`clear`]: Context::clear
/// [`next_set`]: Context::next_set
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Context {
    limit: i64,
    last_error: ErrorCode,
}

impl Context {
    /// Creates a context with [`DEFAULT_LIMIT`] and no recorded error.
    pub const fn new() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            last_error: ErrorCode::None,
        }
    }

    /// Creates a context with a custom allocation limit.
    ///
    /// Returns `None` if `limit` is not positive.
    ///
    /// # Examples
    /// ```
    /// use byte_bitmap::Context;
    ///
    /// assert_eq!(Context::with_limit(64).unwrap().get_limit(), 64);
    /// assert!(Context::with_limit(0).is_none());
    /// ```
    pub fn with_limit(limit: i64) -> Option<Self> {
        let mut ctx = Self::new();
        ctx.set_limit(limit)?;
        Some(ctx)
    }

    /// Allocates a zeroed bitmap of `bit_count` bits.
    ///
    /// # Errors
    /// - [`Error::BitCountTooSmall`] if `bit_count <= 0`.
    /// - [`Error::BitCountTooLarge`] if `bit_count` exceeds the limit.
    /// - [`Error::Allocation`] if the buffer cannot be obtained.
    ///
    /// # Examples
    /// ```
    /// use byte_bitmap::{Context, ErrorCode};
    ///
    /// let mut ctx = Context::new();
    /// let bm = ctx.create(65).unwrap();
    /// assert_eq!(bm.bit_count(), 65);
    /// assert_eq!(bm.byte_count(), 9);
    ///
    /// assert!(ctx.create(0).is_err());
    /// assert_eq!(ctx.get_error(), ErrorCode::OutOfRangeLow);
    /// ```
    pub fn create(&mut self, bit_count: i64) -> Result<Bitmap, Error> {
        let result = if bit_count <= 0 {
            Err(Error::BitCountTooSmall(bit_count))
        } else if bit_count > self.limit {
            Err(Error::BitCountTooLarge {
                requested: bit_count,
                limit: self.limit,
            })
        } else {
            Bitmap::allocate(bit_count)
        };
        self.track(result)
    }

    /// Returns the current allocation limit in bits.
    #[inline]
    pub const fn get_limit(&self) -> i64 {
        self.limit
    }

    /// Replaces the allocation limit and returns the new value.
    ///
    /// Non-positive values are rejected: the limit stays unchanged and
    /// `None` is returned. Existing bitmaps are not affected.
    ///
    /// # Examples
    /// ```
    /// use byte_bitmap::{Context, DEFAULT_LIMIT};
    ///
    /// let mut ctx = Context::new();
    /// assert_eq!(ctx.set_limit(-5), None);
    /// assert_eq!(ctx.get_limit(), DEFAULT_LIMIT);
    /// assert_eq!(ctx.set_limit(128), Some(128));
    /// assert!(ctx.create(129).is_err());
    /// ```
    pub fn set_limit(&mut self, limit: i64) -> Option<i64> {
        if limit <= 0 {
            log::warn!("ignoring non-positive allocation limit {limit}");
            return None;
        }
        log::debug!("allocation limit changed from {} to {limit} bits", self.limit);
        self.limit = limit;
        Some(limit)
    }

    /// Returns the code of the most recent failure, or [`ErrorCode::None`].
    #[inline]
    pub const fn get_error(&self) -> ErrorCode {
        self.last_error
    }

    /// Resets the recorded error to [`ErrorCode::None`].
    #[inline]
    pub fn clear_error(&mut self) {
        self.last_error = ErrorCode::None;
    }

    /// Records the error of `result`, if any, and passes it through.
    ///
    /// # Examples
    /// ```
    /// use byte_bitmap::{Context, ErrorCode};
    ///
    /// let mut ctx = Context::new();
    /// let bm = ctx.create(8).unwrap();
    /// assert!(ctx.track(bm.next_set(-1)).is_err());
    /// assert_eq!(ctx.get_error(), ErrorCode::OutOfRangeLow);
    /// ```
    pub fn track<T>(&mut self, result: Result<T, Error>) -> Result<T, Error> {
        if let Err(err) = &result {
            self.last_error = err.code();
        }
        result
    }

    /// [`Bitmap::get`], recording any failure.
    #[inline]
    pub fn get(&mut self, bitmap: &Bitmap, idx: i64) -> Result<u8, Error> {
        self.track(bitmap.get(idx))
    }

    /// [`Bitmap::set`], recording any failure.
    #[inline]
    pub fn set(&mut self, bitmap: &mut Bitmap, idx: i64) -> Result<i64, Error> {
        self.track(bitmap.set(idx))
    }

    /// [`Bitmap::unset`] (toggle), recording any failure.
    #[inline]
    pub fn unset(&mut self, bitmap: &mut Bitmap, idx: i64) -> Result<i64, Error> {
        self.track(bitmap.unset(idx))
    }

    /// [`Bitmap::clear`], recording any failure.
    #[inline]
    pub fn clear(&mut self, bitmap: &mut Bitmap, idx: i64) -> Result<i64, Error> {
        self.track(bitmap.clear(idx))
    }

    /// [`Bitmap::next_set`], recording any failure.
    #[inline]
    pub fn next_set(&mut self, bitmap: &Bitmap, from: i64) -> Result<i64, Error> {
        self.track(bitmap.next_set(from))
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}
