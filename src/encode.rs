//! Typed serializers.
//!
//! Every serializer appends one complete item head (and payload, for strings)
//! at the stream position and returns the number of bytes written. Writes are
//! all-or-nothing: a refused write leaves the position where it was.

use crate::half;
use crate::stream::Stream;
use crate::wire;
use crate::{CborError, ErrorCode};

impl Stream<'_> {
    fn head(&mut self, major: u8, arg: u64) -> Result<usize, CborError> {
        let (buf, n) = wire::compose_head(major, arg);
        self.put(&buf[..n])
    }

    fn err(&self, code: ErrorCode) -> CborError {
        CborError::new(code, self.position())
    }

    /// Serialize an unsigned integer (major type 0).
    pub fn uint(&mut self, v: u64) -> Result<usize, CborError> {
        self.head(wire::MAJOR_UINT, v)
    }

    /// Serialize a signed integer (major type 0 or 1).
    ///
    /// Negative values are encoded as `-1 - v` in unsigned 64-bit arithmetic,
    /// so `i64::MIN` is representable.
    pub fn int(&mut self, v: i64) -> Result<usize, CborError> {
        if v >= 0 {
            let u = u64::try_from(v).map_err(|_| self.err(ErrorCode::IntegerOverflow))?;
            self.head(wire::MAJOR_UINT, u)
        } else {
            let n = -1_i128 - i128::from(v);
            let u = u64::try_from(n).map_err(|_| self.err(ErrorCode::IntegerOverflow))?;
            self.head(wire::MAJOR_NEGINT, u)
        }
    }

    fn typed_bytes(&mut self, major: u8, data: &[u8]) -> Result<usize, CborError> {
        let len = u64::try_from(data.len()).map_err(|_| self.err(ErrorCode::LengthOverflow))?;
        let total = wire::head_len(len)
            .checked_add(data.len())
            .ok_or_else(|| self.err(ErrorCode::LengthOverflow))?;
        // One up-front check covering head and payload, so a refusal leaves
        // no partial header behind.
        self.ensure(total)?;
        let n = self.head(major, len)?;
        let m = self.put(data)?;
        Ok(n + m)
    }

    /// Serialize a byte string (major type 2): length head plus raw payload.
    pub fn bytes(&mut self, data: &[u8]) -> Result<usize, CborError> {
        self.typed_bytes(wire::MAJOR_BYTES, data)
    }

    /// Serialize a text string (major type 3). Same layout as a byte string;
    /// only the intended interpretation differs.
    pub fn text(&mut self, s: &str) -> Result<usize, CborError> {
        self.typed_bytes(wire::MAJOR_TEXT, s.as_bytes())
    }

    /// Serialize a definite-length array head for `len` items.
    ///
    /// The items themselves are emitted by subsequent serializer calls.
    pub fn array(&mut self, len: usize) -> Result<usize, CborError> {
        let len = u64::try_from(len).map_err(|_| self.err(ErrorCode::LengthOverflow))?;
        self.head(wire::MAJOR_ARRAY, len)
    }

    /// Serialize a definite-length map head for `len` key-value pairs.
    ///
    /// The caller must emit exactly `len * 2` items, key first.
    pub fn map(&mut self, len: usize) -> Result<usize, CborError> {
        let len = u64::try_from(len).map_err(|_| self.err(ErrorCode::LengthOverflow))?;
        self.head(wire::MAJOR_MAP, len)
    }

    /// Open an indefinite-length array; close it with [`Stream::write_break`].
    pub fn indefinite_array(&mut self) -> Result<usize, CborError> {
        self.put_u8(wire::INDEFINITE_ARRAY)
    }

    /// Open an indefinite-length map; close it with [`Stream::write_break`].
    pub fn indefinite_map(&mut self) -> Result<usize, CborError> {
        self.put_u8(wire::INDEFINITE_MAP)
    }

    /// Write the break stop code terminating an indefinite container.
    pub fn write_break(&mut self) -> Result<usize, CborError> {
        self.put_u8(wire::BREAK)
    }

    /// Serialize a semantic tag (major type 6). The tagged item is written
    /// immediately after as its own encoding.
    pub fn tag(&mut self, tag: u64) -> Result<usize, CborError> {
        self.head(wire::MAJOR_TAG, tag)
    }

    /// Serialize a boolean.
    pub fn bool(&mut self, v: bool) -> Result<usize, CborError> {
        self.put_u8(if v {
            wire::SIMPLE_TRUE
        } else {
            wire::SIMPLE_FALSE
        })
    }

    /// Serialize null.
    pub fn null(&mut self) -> Result<usize, CborError> {
        self.put_u8(wire::SIMPLE_NULL)
    }

    /// Serialize undefined.
    pub fn undefined(&mut self) -> Result<usize, CborError> {
        self.put_u8(wire::SIMPLE_UNDEFINED)
    }

    /// Serialize `v` as a half-precision float, 3 bytes total.
    ///
    /// Narrowing rounds to nearest and preserves sign, infinity and NaN-ness.
    pub fn half(&mut self, v: f32) -> Result<usize, CborError> {
        let mut buf = [0u8; 3];
        buf[0] = wire::SIMPLE_FLOAT16;
        buf[1..3].copy_from_slice(&half::encode(v).to_be_bytes());
        self.put(&buf)
    }

    /// Serialize a single-precision float, 5 bytes total.
    pub fn float(&mut self, v: f32) -> Result<usize, CborError> {
        let mut buf = [0u8; 5];
        buf[0] = wire::SIMPLE_FLOAT32;
        buf[1..5].copy_from_slice(&v.to_bits().to_be_bytes());
        self.put(&buf)
    }

    /// Serialize a double-precision float, 9 bytes total.
    pub fn double(&mut self, v: f64) -> Result<usize, CborError> {
        let mut buf = [0u8; 9];
        buf[0] = wire::SIMPLE_FLOAT64;
        buf[1..9].copy_from_slice(&v.to_bits().to_be_bytes());
        self.put(&buf)
    }
}
