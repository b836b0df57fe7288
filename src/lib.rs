//! A fixed-capacity bitmap backed by a byte buffer, written in pure Rust.
//! `no_std` with `alloc`, no `unsafe`.
//!
//! [`Bitmap`] is a densely packed sequence of flags addressed by a zero-based
//! index. Its buffer is allocated once, through a [`Context`] that enforces an
//! allocation limit and remembers the last error, and is freed when the
//! bitmap is dropped.
//!
//! # Examples
//! ```
//! use byte_bitmap::{Context, ErrorCode};
//!
//! let mut ctx = Context::new();
//! let mut bitmap = ctx.create(16).unwrap();
//! assert_eq!(bitmap.byte_count(), 2);
//! assert_eq!(bitmap.get(3), Ok(0));
//! bitmap.set(3).unwrap();
//! bitmap.set(12).unwrap();
//! assert_eq!(bitmap.first_set(), 3);
//! assert_eq!(bitmap.next_set(3), Ok(12));
//! assert_eq!(bitmap.last_set(), 12);
//!
//! assert!(ctx.get(&bitmap, -1).is_err());
//! assert_eq!(ctx.get_error(), ErrorCode::OutOfRangeLow);
//! ```
//!
//! # Features
//!
//! - `#![no_std]` compatible (requires `alloc`)
//! - Runtime-sized, allocated once, never resized
//! - Out-of-range indices are reported as [`Error`]s, never panics
//! - Single-bit operations: `get`, `set`, `unset` (toggle), `clear`
//! - Byte-skipping scans: `first_set`, `last_set`, `next_set`
//! - Iteration over all bits (`iter()`) or set bits (`iter_ones()`)
//! - Binary dump of the buffer via `Debug`
//!
//! # Gotchas
//!
//! - [`Bitmap::unset`] flips the bit instead of clearing it. Use
//!   [`Bitmap::clear`] for an unconditional clear.
//! - [`Bitmap::first_set`] and [`Bitmap::last_set`] return `0` for an empty
//!   bitmap; check [`Bitmap::is_empty`] when that matters.
//! - [`Bitmap::next_set`] returns `from` itself when there is no later set
//!   bit.
//!
//! # Logging
//!
//! Allocation, release and limit changes are reported through the [`log`]
//! facade. No logger is installed by this crate.

#![deny(missing_docs)]
#![forbid(unsafe_code)]
#![no_std]

extern crate alloc;

mod bitmap;
mod context;
mod error;

pub use bitmap::{Bitmap, BitmapIter, IterOnes, byte_count};
pub use context::{Context, DEFAULT_LIMIT};
pub use error::{Error, ErrorCode};
