//! Typed deserializers and stream observers.
//!
//! Every deserializer takes an offset into the encoded region, returns the
//! decoded value together with the number of bytes consumed, and leaves the
//! stream position untouched. Reads are bounded by the position, never by the
//! capacity, so bytes beyond the encoded region are invisible.

use crate::stream::Stream;
use crate::wire::{self, Head};
use crate::{CborError, ErrorCode};

/// The length carried by an array or map head.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Len {
    /// Definite length: item count for arrays, pair count for maps.
    Definite(u64),
    /// Indefinite length; the container runs until a break stop code.
    Indefinite,
}

impl Stream<'_> {
    fn head_at(&self, offset: usize) -> Result<Head, CborError> {
        wire::read_head(self.as_bytes(), offset)
    }

    /// Head of a definite-length item of major type `major`.
    fn definite_head(&self, offset: usize, major: u8) -> Result<Head, CborError> {
        let h = self.head_at(offset)?;
        if h.major != major {
            return Err(CborError::new(ErrorCode::TypeMismatch, offset));
        }
        if h.info == wire::INFO_INDEFINITE {
            return Err(CborError::new(ErrorCode::IndefiniteLength, offset));
        }
        Ok(h)
    }

    /// Deserialize an unsigned integer (major type 0) at `offset`.
    ///
    /// Returns the value and the bytes consumed.
    pub fn read_uint(&self, offset: usize) -> Result<(u64, usize), CborError> {
        let h = self.definite_head(offset, wire::MAJOR_UINT)?;
        Ok((h.arg, h.size))
    }

    /// Deserialize a signed integer (major type 0 or 1) at `offset`.
    ///
    /// Arguments that place the value outside the `i64` range are refused
    /// with [`ErrorCode::IntegerOverflow`].
    pub fn read_int(&self, offset: usize) -> Result<(i64, usize), CborError> {
        let h = self.head_at(offset)?;
        if h.info == wire::INFO_INDEFINITE {
            return Err(CborError::new(ErrorCode::IndefiniteLength, offset));
        }
        let v = match h.major {
            wire::MAJOR_UINT => i128::from(h.arg),
            wire::MAJOR_NEGINT => -1_i128 - i128::from(h.arg),
            _ => return Err(CborError::new(ErrorCode::TypeMismatch, offset)),
        };
        let v = i64::try_from(v).map_err(|_| CborError::new(ErrorCode::IntegerOverflow, offset))?;
        Ok((v, h.size))
    }

    fn typed_slice(&self, offset: usize, major: u8) -> Result<(&[u8], usize), CborError> {
        let h = self.definite_head(offset, major)?;
        let len =
            usize::try_from(h.arg).map_err(|_| CborError::new(ErrorCode::LengthOverflow, offset))?;
        let start = offset
            .checked_add(h.size)
            .ok_or_else(|| CborError::new(ErrorCode::LengthOverflow, offset))?;
        let end = start
            .checked_add(len)
            .ok_or_else(|| CborError::new(ErrorCode::LengthOverflow, offset))?;
        let data = self.as_bytes();
        if end > data.len() {
            return Err(CborError::new(ErrorCode::UnexpectedEof, offset));
        }
        Ok((&data[start..end], h.size + len))
    }

    /// Deserialize a byte string (major type 2) at `offset` without copying.
    ///
    /// Returns the payload as a subslice of the stream and the bytes consumed
    /// (head plus payload).
    pub fn read_bytes(&self, offset: usize) -> Result<(&[u8], usize), CborError> {
        self.typed_slice(offset, wire::MAJOR_BYTES)
    }

    /// Deserialize a text string (major type 3) at `offset` without copying.
    ///
    /// The payload is intended to be UTF-8 but is not validated.
    pub fn read_text(&self, offset: usize) -> Result<(&[u8], usize), CborError> {
        self.typed_slice(offset, wire::MAJOR_TEXT)
    }

    fn typed_slice_into(
        &self,
        offset: usize,
        major: u8,
        out: &mut [u8],
    ) -> Result<(usize, usize), CborError> {
        let (payload, consumed) = self.typed_slice(offset, major)?;
        if out.len() < payload.len() {
            return Err(CborError::new(ErrorCode::OutputTooSmall, offset));
        }
        out[..payload.len()].copy_from_slice(payload);
        Ok((payload.len(), consumed))
    }

    /// Copy a byte string payload into `out`.
    ///
    /// Returns the payload length and the bytes consumed; refuses with
    /// [`ErrorCode::OutputTooSmall`] when `out` cannot hold the payload.
    pub fn read_bytes_into(
        &self,
        offset: usize,
        out: &mut [u8],
    ) -> Result<(usize, usize), CborError> {
        self.typed_slice_into(offset, wire::MAJOR_BYTES, out)
    }

    /// Copy a text string payload into `out`. See [`Stream::read_bytes_into`].
    pub fn read_text_into(
        &self,
        offset: usize,
        out: &mut [u8],
    ) -> Result<(usize, usize), CborError> {
        self.typed_slice_into(offset, wire::MAJOR_TEXT, out)
    }

    fn container_head(&self, offset: usize, major: u8) -> Result<(Len, usize), CborError> {
        let h = self.head_at(offset)?;
        if h.major != major {
            return Err(CborError::new(ErrorCode::TypeMismatch, offset));
        }
        if h.info == wire::INFO_INDEFINITE {
            Ok((Len::Indefinite, 1))
        } else {
            Ok((Len::Definite(h.arg), h.size))
        }
    }

    /// Deserialize an array head at `offset`: the item count (or
    /// [`Len::Indefinite`]) and the bytes consumed by the head alone.
    pub fn read_array(&self, offset: usize) -> Result<(Len, usize), CborError> {
        self.container_head(offset, wire::MAJOR_ARRAY)
    }

    /// Deserialize a map head at `offset`: the pair count (or
    /// [`Len::Indefinite`]) and the bytes consumed by the head alone.
    pub fn read_map(&self, offset: usize) -> Result<(Len, usize), CborError> {
        self.container_head(offset, wire::MAJOR_MAP)
    }

    /// Deserialize a semantic tag number at `offset`.
    ///
    /// Accepts both the single-byte form and the multi-byte argument forms.
    pub fn read_tag(&self, offset: usize) -> Result<(u64, usize), CborError> {
        let h = self.definite_head(offset, wire::MAJOR_TAG)?;
        Ok((h.arg, h.size))
    }

    /// Deserialize a boolean at `offset`.
    ///
    /// Any major type 7 byte other than the true simple value decodes as
    /// false; one byte is consumed.
    pub fn read_bool(&self, offset: usize) -> Result<(bool, usize), CborError> {
        let b = self.initial_byte(offset)?;
        if b >> 5 != wire::MAJOR_SIMPLE {
            return Err(CborError::new(ErrorCode::TypeMismatch, offset));
        }
        Ok((b == wire::SIMPLE_TRUE, 1))
    }

    /// Deserialize a half-precision float at `offset`, 3 bytes consumed.
    ///
    /// Every binary16 value widens exactly, so the result is returned as f32.
    pub fn read_half(&self, offset: usize) -> Result<(f32, usize), CborError> {
        self.expect_initial(offset, wire::SIMPLE_FLOAT16)?;
        let mut pos = offset + 1;
        let raw = wire::read_be_u16(self.as_bytes(), &mut pos)?;
        Ok((crate::half::decode(raw) as f32, 3))
    }

    /// Deserialize a single-precision float at `offset`, 5 bytes consumed.
    pub fn read_float(&self, offset: usize) -> Result<(f32, usize), CborError> {
        self.expect_initial(offset, wire::SIMPLE_FLOAT32)?;
        let mut pos = offset + 1;
        let raw = wire::read_be_u32(self.as_bytes(), &mut pos)?;
        Ok((f32::from_bits(raw), 5))
    }

    /// Deserialize a double-precision float at `offset`, 9 bytes consumed.
    pub fn read_double(&self, offset: usize) -> Result<(f64, usize), CborError> {
        self.expect_initial(offset, wire::SIMPLE_FLOAT64)?;
        let mut pos = offset + 1;
        let raw = wire::read_be_u64(self.as_bytes(), &mut pos)?;
        Ok((f64::from_bits(raw), 9))
    }

    /// Returns `true` when the byte at `offset` is the break stop code, or
    /// when the stream has ended. Iteration over an indefinite container
    /// stops here; the caller consumes the break byte itself.
    #[must_use]
    pub fn at_break(&self, offset: usize) -> bool {
        self.at_end(offset) || self.as_bytes()[offset] == wire::BREAK
    }

    /// Returns `true` when the item at `offset` carries major type 6, or
    /// when the stream has ended.
    #[must_use]
    pub fn at_tag(&self, offset: usize) -> bool {
        self.at_end(offset) || self.as_bytes()[offset] >> 5 == wire::MAJOR_TAG
    }

    fn initial_byte(&self, offset: usize) -> Result<u8, CborError> {
        self.as_bytes()
            .get(offset)
            .copied()
            .ok_or_else(|| CborError::new(ErrorCode::UnexpectedEof, offset))
    }

    /// Floats demand an exact initial byte, not just the major type.
    fn expect_initial(&self, offset: usize, initial: u8) -> Result<(), CborError> {
        if self.initial_byte(offset)? == initial {
            Ok(())
        } else {
            Err(CborError::new(ErrorCode::TypeMismatch, offset))
        }
    }
}
