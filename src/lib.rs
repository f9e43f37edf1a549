//! # cbor-stream
//!
//! In-place CBOR (RFC 7049) encoding and decoding over fixed byte buffers,
//! built for embedded and constrained targets.
//!
//! ## Design principles
//!
//! - **The buffer is the value.**
//!   A [`Stream`] binds a caller-provided (or, with `alloc`, internally
//!   acquired) byte region of fixed capacity. Serializers append wire bytes
//!   at the write position; deserializers read at explicit offsets and
//!   return the bytes consumed. Nothing grows, nothing is copied unless
//!   asked for.
//! - **Shortest form out, permissive in.**
//!   Integers and lengths are always emitted in their smallest RFC 7049
//!   layout; the decoder accepts any well-formed layout.
//! - **Refusals are local.**
//!   A write that does not fit or a read that does not match is refused with
//!   a structured [`CborError`] and has no side effects on the stream.
//!
//! ## Feature flags
//!
//! - `std` *(default)*: implements `std::error::Error` for [`CborError`].
//! - `alloc` *(default)*: enables the owning constructor
//!   [`Stream::with_capacity`].
//!
//! ## Safety
//!
//! This crate forbids `unsafe` code.
//!
//! ## `no_std`
//!
//! The crate is `no_std` compatible; with both features disabled it depends
//! only on `core`.
//!
//! ## Example
//!
//! ```
//! use cbor_stream::{Len, Stream};
//!
//! let mut buf = [0u8; 64];
//! let mut stream = Stream::new(&mut buf);
//! stream.array(3)?;
//! stream.int(1)?;
//! stream.int(2)?;
//! stream.int(3)?;
//! assert_eq!(stream.as_bytes(), [0x83, 0x01, 0x02, 0x03]);
//!
//! let (len, head) = stream.read_array(0)?;
//! assert_eq!(len, Len::Definite(3));
//! let (first, _) = stream.read_int(head)?;
//! assert_eq!(first, 1);
//! # Ok::<(), cbor_stream::CborError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

#[cfg(feature = "alloc")]
extern crate alloc;

mod decode;
mod dump;
mod encode;
mod error;
mod half;
mod stream;
mod time;
mod wire;

pub use crate::decode::Len;
pub use crate::dump::{Hex, Pretty, DEFAULT_MAX_DEPTH};
pub use crate::error::{CborError, ErrorCode};
pub use crate::stream::Stream;
pub use crate::time::DateTime;
