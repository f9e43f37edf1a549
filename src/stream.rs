use crate::{CborError, ErrorCode};

#[cfg(feature = "alloc")]
use alloc::{boxed::Box, vec};

enum Region<'a> {
    /// Read-only view over already-encoded bytes.
    Slice(&'a [u8]),
    /// Caller-provided output buffer.
    SliceMut(&'a mut [u8]),
    /// Internally acquired buffer, released on drop.
    #[cfg(feature = "alloc")]
    Boxed(Box<[u8]>),
}

/// A fixed-capacity CBOR stream: a byte region plus a write position.
///
/// The position is the index of the next free byte and equals the number of
/// bytes currently holding encoded data. Serializers append at the position;
/// deserializers read at a caller-supplied offset within `[0, position)` and
/// never move the position.
///
/// The buffer never grows. A write that does not fit is refused with
/// [`ErrorCode::CapacityExhausted`] and leaves both the position and the
/// buffer contents untouched.
pub struct Stream<'a> {
    buf: Region<'a>,
    pos: usize,
}

impl<'a> Stream<'a> {
    /// Bind a caller-provided output buffer. The position starts at 0.
    #[must_use]
    pub fn new(buffer: &'a mut [u8]) -> Self {
        Self {
            buf: Region::SliceMut(buffer),
            pos: 0,
        }
    }

    /// Wrap a buffer that already holds encoded data, for decoding.
    ///
    /// The position is set to the full buffer length, so every byte is
    /// readable and any further write is refused.
    #[must_use]
    pub const fn from_slice(data: &'a [u8]) -> Self {
        Self {
            buf: Region::Slice(data),
            pos: data.len(),
        }
    }

    /// Total capacity of the underlying region in bytes.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.region().len()
    }

    /// The write position: index of the next free byte.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Returns `true` if the stream holds no encoded data.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.pos == 0
    }

    /// The encoded region, `[0, position)`.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.region()[..self.pos]
    }

    /// Reset the position to 0 without zeroing the buffer.
    pub fn clear(&mut self) {
        self.pos = 0;
    }

    /// Move the position back to `pos`, discarding bytes encoded after it.
    ///
    /// Has no effect when `pos` is at or past the current position. This is
    /// the snapshot/restore primitive for callers layering transactional
    /// writes on top of the codec.
    pub fn truncate(&mut self, pos: usize) {
        self.pos = self.pos.min(pos);
    }

    /// Returns `true` iff `offset` is at or past the write position.
    ///
    /// The last encoded byte still counts as data: `at_end(position - 1)` is
    /// false for a non-empty stream.
    #[must_use]
    pub const fn at_end(&self, offset: usize) -> bool {
        offset >= self.pos
    }

    fn region(&self) -> &[u8] {
        match &self.buf {
            Region::Slice(b) => b,
            Region::SliceMut(b) => b,
            #[cfg(feature = "alloc")]
            Region::Boxed(b) => b,
        }
    }

    fn region_mut(&mut self) -> &mut [u8] {
        match &mut self.buf {
            Region::Slice(_) => &mut [],
            Region::SliceMut(b) => b,
            #[cfg(feature = "alloc")]
            Region::Boxed(b) => b,
        }
    }

    /// The shared bounds predicate: do `n` more bytes fit at the position?
    pub(crate) fn ensure(&self, n: usize) -> Result<(), CborError> {
        match self.pos.checked_add(n) {
            Some(end) if end <= self.capacity() => Ok(()),
            _ => Err(CborError::new(ErrorCode::CapacityExhausted, self.pos)),
        }
    }

    /// Append `bytes`, advancing the position. All-or-nothing.
    pub(crate) fn put(&mut self, bytes: &[u8]) -> Result<usize, CborError> {
        if bytes.is_empty() {
            return Ok(0);
        }
        self.ensure(bytes.len())?;
        let start = self.pos;
        self.region_mut()[start..start + bytes.len()].copy_from_slice(bytes);
        self.pos += bytes.len();
        Ok(bytes.len())
    }

    pub(crate) fn put_u8(&mut self, byte: u8) -> Result<usize, CborError> {
        self.put(&[byte])
    }
}

#[cfg(feature = "alloc")]
impl Stream<'static> {
    /// Acquire an internal buffer of `capacity` bytes. The position starts at 0.
    ///
    /// The buffer is released when the stream is dropped.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Region::Boxed(vec![0u8; capacity].into_boxed_slice()),
            pos: 0,
        }
    }
}

impl core::fmt::Debug for Stream<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Stream")
            .field("capacity", &self.capacity())
            .field("position", &self.pos)
            .finish_non_exhaustive()
    }
}
