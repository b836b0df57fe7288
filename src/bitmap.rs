use alloc::vec::Vec;
use core::fmt::{Debug, Formatter};
use core::iter::{FusedIterator, Iterator};

use crate::error::Error;

/// Computes the number of bytes needed to store `bit_count` bits.
///
/// # Examples
/// ```
/// use byte_bitmap::byte_count;
///
/// assert_eq!(byte_count(9), 2);
/// assert_eq!(byte_count(16), 2);
/// assert_eq!(byte_count(17), 3);
/// ```
pub const fn byte_count(bit_count: usize) -> usize {
    bit_count.div_ceil(8)
}

/// A fixed-capacity bitmap backed by a byte buffer allocated once.
///
/// Bit `i` lives in byte `i / 8` under mask `1 << (i % 8)`, so bit 0 is the
/// least significant bit of the first byte. Indices are signed: negative
/// indices and indices at or past [`bit_count`] are reported as errors
/// instead of panicking.
///
/// A `Bitmap` is obtained from [`Context::create`] and owns its buffer
/// exclusively. The buffer is released when the bitmap is dropped or passed
/// to [`release`].
///
/// [`bit_count`]: Bitmap::bit_count
/// [`release`]: Bitmap::release
/// [`Context::create`]: crate::Context::create
#[derive(PartialEq, Eq, Hash)]
pub struct Bitmap {
    bit_count: i64,
    bytes: Vec<u8>,
}

impl Bitmap {
    /// Allocates a zeroed buffer for `bit_count` bits.
    ///
    /// The caller has already checked `0 < bit_count <= limit`.
    pub(crate) fn allocate(bit_count: i64) -> Result<Self, Error> {
        let len = usize::try_from((bit_count as u64).div_ceil(8))
            .map_err(|_| Error::Allocation { bytes: usize::MAX })?;
        let mut bytes = Vec::new();
        if bytes.try_reserve_exact(len).is_err() {
            log::warn!("could not allocate {len} bytes for a bitmap of {bit_count} bits");
            return Err(Error::Allocation { bytes: len });
        }
        bytes.resize(len, 0);
        log::debug!("allocated bitmap of {bit_count} bits ({len} bytes)");
        Ok(Self { bit_count, bytes })
    }

    /// Releases the bitmap and its buffer.
    ///
    /// Equivalent to dropping it; the bitmap cannot be used afterwards.
    ///
    /// # Examples
    /// ```
    /// use byte_bitmap::Context;
    ///
    /// let mut ctx = Context::new();
    /// let bitmap = ctx.create(64).unwrap();
    /// bitmap.release();
    /// ```
    #[inline]
    pub fn release(self) {}

    /// Returns the number of addressable bits.
    #[inline]
    pub const fn bit_count(&self) -> i64 {
        self.bit_count
    }

    /// Returns the size of the backing buffer, `ceil(bit_count / 8)`.
    ///
    /// # Examples
    /// ```
    /// use byte_bitmap::Context;
    ///
    /// let mut ctx = Context::new();
    /// assert_eq!(ctx.create(9).unwrap().byte_count(), 2);
    /// ```
    #[inline]
    pub fn byte_count(&self) -> usize {
        self.bytes.len()
    }

    /// Returns the backing buffer.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns `1` if the bit at `idx` is set and `0` otherwise.
    ///
    /// # Errors
    /// [`Error::NegativeIndex`] if `idx < 0`, [`Error::IndexTooLarge`] if
    /// `idx >= bit_count`.
    ///
    /// # Examples
    /// ```
    /// use byte_bitmap::Context;
    ///
    /// let mut ctx = Context::new();
    /// let mut bm = ctx.create(8).unwrap();
    /// bm.set(1).unwrap();
    /// assert_eq!(bm.get(1), Ok(1));
    /// assert_eq!(bm.get(0), Ok(0));
    /// assert!(bm.get(8).is_err());
    /// ```
    #[inline]
    pub fn get(&self, idx: i64) -> Result<u8, Error> {
        let (byte_idx, mask) = self.locate(idx)?;
        Ok(u8::from(self.bytes[byte_idx] & mask != 0))
    }

    /// Sets the bit at `idx` and returns `idx`.
    ///
    /// Setting an already set bit leaves it set.
    ///
    /// # Errors
    /// Same range errors as [`get`](Bitmap::get).
    ///
    /// # Examples
    /// ```
    /// use byte_bitmap::Context;
    ///
    /// let mut ctx = Context::new();
    /// let mut bm = ctx.create(8).unwrap();
    /// assert_eq!(bm.set(3), Ok(3));
    /// assert_eq!(bm.set(3), Ok(3));
    /// assert_eq!(bm.get(3), Ok(1));
    /// ```
    #[inline]
    pub fn set(&mut self, idx: i64) -> Result<i64, Error> {
        let (byte_idx, mask) = self.locate(idx)?;
        self.bytes[byte_idx] |= mask;
        Ok(idx)
    }

    /// Flips the bit at `idx` and returns `idx`.
    ///
    /// This is a toggle, not a clear: calling it on a bit that is already
    /// unset sets it. Use [`clear`](Bitmap::clear) to unconditionally
    /// unset a bit.
    ///
    /// # Errors
    /// Same range errors as [`get`](Bitmap::get).
    ///
    /// # Examples
    /// ```
    /// use byte_bitmap::Context;
    ///
    /// let mut ctx = Context::new();
    /// let mut bm = ctx.create(8).unwrap();
    /// bm.unset(4).unwrap();
    /// assert_eq!(bm.get(4), Ok(1)); // flipped from 0 to 1
    /// bm.unset(4).unwrap();
    /// assert_eq!(bm.get(4), Ok(0)); // flipped from 1 to 0
    /// ```
    #[inline]
    pub fn unset(&mut self, idx: i64) -> Result<i64, Error> {
        let (byte_idx, mask) = self.locate(idx)?;
        self.bytes[byte_idx] ^= mask;
        Ok(idx)
    }

    /// Unsets the bit at `idx` regardless of its current value and returns
    /// `idx`.
    ///
    /// # Errors
    /// Same range errors as [`get`](Bitmap::get).
    ///
    /// # Examples
    /// ```
    /// use byte_bitmap::Context;
    ///
    /// let mut ctx = Context::new();
    /// let mut bm = ctx.create(8).unwrap();
    /// bm.clear(4).unwrap();
    /// assert_eq!(bm.get(4), Ok(0));
    /// ```
    #[inline]
    pub fn clear(&mut self, idx: i64) -> Result<i64, Error> {
        let (byte_idx, mask) = self.locate(idx)?;
        self.bytes[byte_idx] &= !mask;
        Ok(idx)
    }

    /// Returns `true` if no bit is set.
    ///
    /// Use this to tell an empty bitmap apart from one with only bit 0 set,
    /// since [`first_set`](Bitmap::first_set) and
    /// [`last_set`](Bitmap::last_set) return `0` in both cases.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.iter().all(|byte| *byte == 0)
    }

    /// Returns the lowest set index, or `0` if no bit is set.
    ///
    /// # Examples
    /// ```
    /// use byte_bitmap::Context;
    ///
    /// let mut ctx = Context::new();
    /// let mut bm = ctx.create(20).unwrap();
    /// assert_eq!(bm.first_set(), 0);
    /// bm.set(13).unwrap();
    /// bm.set(17).unwrap();
    /// assert_eq!(bm.first_set(), 13);
    /// ```
    pub fn first_set(&self) -> i64 {
        let mut base = 0;
        for &byte in &self.bytes {
            if byte == 0 {
                base += 8;
                continue;
            }
            for offset in 0..8 {
                if byte & 1u8 << offset != 0 {
                    return base + offset;
                }
            }
        }
        0
    }

    /// Returns the highest set index, or `0` if no bit is set.
    ///
    /// Only the `bit_count % 8` valid positions of a trailing partial byte
    /// are inspected.
    ///
    /// # Examples
    /// ```
    /// use byte_bitmap::Context;
    ///
    /// let mut ctx = Context::new();
    /// let mut bm = ctx.create(10).unwrap();
    /// bm.set(0).unwrap();
    /// assert_eq!(bm.last_set(), 0);
    /// bm.set(9).unwrap();
    /// assert_eq!(bm.last_set(), 9);
    /// ```
    pub fn last_set(&self) -> i64 {
        // index of the highest bit not yet ruled out
        let mut remaining = self.bit_count - 1;
        for &byte in self.bytes.iter().rev() {
            // 8 for full bytes, bit_count % 8 for a trailing partial byte
            let width = remaining % 8 + 1;
            if byte == 0 {
                remaining -= width;
                continue;
            }
            for offset in (0..width).rev() {
                if byte & 1u8 << offset != 0 {
                    return remaining;
                }
                remaining -= 1;
            }
        }
        0
    }

    /// Returns the lowest set index strictly greater than `from`, or `from`
    /// itself if there is none.
    ///
    /// # Errors
    /// Same range errors as [`get`](Bitmap::get), applied to `from`.
    ///
    /// # Examples
    /// ```
    /// use byte_bitmap::Context;
    ///
    /// let mut ctx = Context::new();
    /// let mut bm = ctx.create(16).unwrap();
    /// bm.set(2).unwrap();
    /// bm.set(9).unwrap();
    /// assert_eq!(bm.next_set(0), Ok(2));
    /// assert_eq!(bm.next_set(2), Ok(9));
    /// assert_eq!(bm.next_set(9), Ok(9)); // no successor
    /// ```
    pub fn next_set(&self, from: i64) -> Result<i64, Error> {
        self.locate(from)?;
        let mut idx = from + 1;
        while idx < self.bit_count {
            let (byte_idx, start) = Self::idxs(idx);
            let byte = self.bytes[byte_idx];
            if byte >> start == 0 {
                idx += 8 - i64::from(start);
                continue;
            }
            for offset in start..8 {
                if idx >= self.bit_count {
                    break;
                }
                if byte & 1u8 << offset != 0 {
                    return Ok(idx);
                }
                idx += 1;
            }
        }
        Ok(from)
    }

    /// Returns an iterator over all bits as `bool`, from least to most
    /// significant.
    ///
    /// The iterator yields exactly `bit_count` items in order.
    ///
    /// # Examples
    /// ```
    /// use byte_bitmap::Context;
    ///
    /// let mut ctx = Context::new();
    /// let mut bm = ctx.create(4).unwrap();
    /// bm.set(0).unwrap();
    /// bm.set(2).unwrap();
    /// assert!(bm.iter().eq([true, false, true, false]));
    /// ```
    #[inline]
    pub fn iter(&self) -> BitmapIter<'_> {
        BitmapIter {
            bitmap: self,
            idx: 0,
        }
    }

    /// Returns an iterator over the indices of all set bits, in ascending
    /// order.
    ///
    /// All-zero bytes are skipped without inspecting their bits, so walking
    /// the whole iterator is O(max(k, b)) where k is the number of set bits
    /// and b is the number of bytes.
    ///
    /// # Examples
    /// ```
    /// use byte_bitmap::Context;
    ///
    /// let mut ctx = Context::new();
    /// let mut bm = ctx.create(40).unwrap();
    /// for idx in [3, 17, 39] {
    ///     bm.set(idx).unwrap();
    /// }
    /// assert!(bm.iter_ones().eq([3, 17, 39]));
    /// ```
    #[inline]
    pub fn iter_ones(&self) -> IterOnes<'_> {
        IterOnes {
            bytes: &self.bytes,
            byte_idx: 0,
            current: self.bytes[0],
            base_bit_idx: 0,
        }
    }

    /// Validates `idx` and translates it into a byte index and a mask.
    #[inline]
    fn locate(&self, idx: i64) -> Result<(usize, u8), Error> {
        if idx < 0 {
            return Err(Error::NegativeIndex(idx));
        }
        if idx >= self.bit_count {
            return Err(Error::IndexTooLarge {
                index: idx,
                bit_count: self.bit_count,
            });
        }
        let (byte_idx, offset) = Self::idxs(idx);
        Ok((byte_idx, 1u8 << offset))
    }

    /// Splits a non-negative, in-range index into byte index and offset.
    #[inline]
    fn idxs(idx: i64) -> (usize, u32) {
        ((idx / 8) as usize, (idx % 8) as u32)
    }
}

impl Drop for Bitmap {
    fn drop(&mut self) {
        log::trace!(
            "releasing bitmap of {} bits ({} bytes)",
            self.bit_count,
            self.bytes.len()
        );
    }
}

impl<'bitmap> IntoIterator for &'bitmap Bitmap {
    type Item = bool;
    type IntoIter = BitmapIter<'bitmap>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Renders each byte as binary digits, bit 0 first, prefixed with the index
/// of the byte's first bit.
impl Debug for Bitmap {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "LSB -> ")?;
        let last = self.bit_count - 1;
        for (i, bit) in (0..).zip(self.iter()) {
            if i % 8 == 0 {
                write!(f, "{i}: ")?;
            }
            write!(f, "{}", if bit { '1' } else { '0' })?;
            if i % 8 == 7 && i < last {
                write!(f, " ")?;
            }
        }
        write!(f, " <- MSB")?;
        Ok(())
    }
}

/// Iterator over all bits of a [`Bitmap`] as `bool`.
///
/// Created by [`Bitmap::iter`].
#[derive(Clone, Copy)]
pub struct BitmapIter<'bitmap> {
    bitmap: &'bitmap Bitmap,
    idx: i64,
}

impl Iterator for BitmapIter<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<Self::Item> {
        let bit = self.bitmap.get(self.idx).ok()?;
        self.idx += 1;
        Some(bit != 0)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.bitmap.bit_count - self.idx).max(0) as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for BitmapIter<'_> {}

impl FusedIterator for BitmapIter<'_> {}

/// Iterator over the indices of set bits of a [`Bitmap`].
///
/// Created by [`Bitmap::iter_ones`].
#[derive(Clone, Copy)]
pub struct IterOnes<'bitmap> {
    bytes: &'bitmap [u8],
    byte_idx: usize,
    current: u8,
    base_bit_idx: i64,
}

impl Iterator for IterOnes<'_> {
    type Item = i64;

    fn next(&mut self) -> Option<Self::Item> {
        while self.byte_idx < self.bytes.len() {
            if self.current != 0 {
                let tz = i64::from(self.current.trailing_zeros());
                self.current &= self.current - 1; // unset LSB
                return Some(self.base_bit_idx + tz);
            }

            self.byte_idx += 1;
            self.base_bit_idx += 8;
            self.current = *self.bytes.get(self.byte_idx).unwrap_or(&0);
        }
        None
    }
}

impl FusedIterator for IterOnes<'_> {}
