use core::fmt;

/// A structured error code identifying why an encode or decode was refused.
///
/// This enum is intentionally stable and string-free to support `no_std` and to remain hot-path friendly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorCode {
    /// A write would cross the end of the stream buffer.
    CapacityExhausted,

    /// The initial byte at the offset does not carry the requested major type.
    TypeMismatch,
    /// A definite-length read hit an indefinite-length header.
    IndefiniteLength,

    /// Follow-up bytes for an argument or payload extend past the stream position.
    UnexpectedEof,
    /// Arithmetic overflow while computing a length or offset.
    LengthOverflow,
    /// The decoded value does not fit the requested integer width.
    IntegerOverflow,

    /// A string decode target cannot hold the payload.
    OutputTooSmall,

    /// Reserved additional-info value (28..30) was used.
    ReservedAdditionalInfo,
    /// Encoder invoked with a value outside the supported domain.
    Unsupported,
    /// A date/time text string is malformed or out of range.
    InvalidDateTime,

    /// Nesting depth limit exceeded while walking the stream.
    DepthLimitExceeded,
}

/// A codec error with a stable code and the byte offset where it was detected.
///
/// For decode errors the offset refers into the encoded region; for encode
/// errors it is the stream position at the time of the refused write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CborError {
    /// The error code.
    pub code: ErrorCode,
    /// Byte offset into the stream where the error was detected.
    pub offset: usize,
}

impl CborError {
    /// Construct an error at `offset`.
    #[inline]
    #[must_use]
    pub const fn new(code: ErrorCode, offset: usize) -> Self {
        Self { code, offset }
    }
}

impl fmt::Display for CborError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self.code {
            ErrorCode::CapacityExhausted => "write exceeds stream capacity",

            ErrorCode::TypeMismatch => "major type does not match requested type",
            ErrorCode::IndefiniteLength => "indefinite length where a definite length is required",

            ErrorCode::UnexpectedEof => "unexpected end of encoded data",
            ErrorCode::LengthOverflow => "length overflow",
            ErrorCode::IntegerOverflow => "integer does not fit requested width",

            ErrorCode::OutputTooSmall => "output buffer too small for payload",

            ErrorCode::ReservedAdditionalInfo => "reserved additional info value",
            ErrorCode::Unsupported => "value outside the supported domain",
            ErrorCode::InvalidDateTime => "malformed date/time",

            ErrorCode::DepthLimitExceeded => "nesting depth limit exceeded",
        };

        write!(f, "cbor error at {}: {msg}", self.offset)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CborError {}
