//! Diagnostics: hex dump and recursive pretty-printer.
//!
//! Both are `Display` adapters so they work with any `core::fmt` sink and
//! carry no allocation. The pretty-printer walks the encoded region from
//! offset 0 and renders one line per item, indented by nesting level. On a
//! malformed item it emits a single diagnostic line naming the offset and
//! the offending byte, then stops.

use core::fmt::{self, Write as _};

use crate::decode::Len;
use crate::stream::Stream;
use crate::wire;
use crate::{CborError, ErrorCode};

/// Default maximum nesting depth accepted by [`Stream::pretty`].
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Hex dump of the encoded region. Created by [`Stream::hex`].
pub struct Hex<'s, 'a> {
    stream: &'s Stream<'a>,
}

impl fmt::Display for Hex<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.stream.as_bytes();
        if data.is_empty() {
            return Ok(());
        }
        f.write_str("0x")?;
        for b in data {
            write!(f, "{b:02X}")?;
        }
        Ok(())
    }
}

/// Recursive pretty-printer. Created by [`Stream::pretty`].
pub struct Pretty<'s, 'a> {
    stream: &'s Stream<'a>,
    max_depth: usize,
}

impl Pretty<'_, '_> {
    /// Override the maximum nesting depth (default
    /// [`DEFAULT_MAX_DEPTH`]). Items nested deeper stop the dump with a
    /// diagnostic, which bounds stack growth on hostile input.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

enum Stop {
    Fmt,
    Decode(CborError),
}

impl From<fmt::Error> for Stop {
    fn from(_: fmt::Error) -> Self {
        Self::Fmt
    }
}

impl From<CborError> for Stop {
    fn from(e: CborError) -> Self {
        Self::Decode(e)
    }
}

impl fmt::Display for Pretty<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut offset = 0;
        while offset < self.stream.position() {
            match self.item(f, offset, 0, 0) {
                Ok(n) => offset += n,
                Err(Stop::Fmt) => return Err(fmt::Error),
                Err(Stop::Decode(e)) => {
                    match self.stream.as_bytes().get(e.offset) {
                        Some(b) => writeln!(
                            f,
                            "failed to decode at offset {}, initial byte 0x{b:02X}",
                            e.offset
                        )?,
                        None => writeln!(
                            f,
                            "failed to decode at offset {}: unexpected end of data",
                            e.offset
                        )?,
                    }
                    return Ok(());
                }
            }
        }
        Ok(())
    }
}

impl Pretty<'_, '_> {
    /// Render the item at `offset` and return the bytes it occupies.
    fn item(
        &self,
        f: &mut fmt::Formatter<'_>,
        offset: usize,
        indent: usize,
        depth: usize,
    ) -> Result<usize, Stop> {
        if depth > self.max_depth {
            return Err(Stop::Decode(CborError::new(
                ErrorCode::DepthLimitExceeded,
                offset,
            )));
        }

        let s = self.stream;
        let ib = *s
            .as_bytes()
            .get(offset)
            .ok_or_else(|| Stop::Decode(CborError::new(ErrorCode::UnexpectedEof, offset)))?;
        write!(f, "{:indent$}", "")?;

        match ib >> 5 {
            wire::MAJOR_UINT | wire::MAJOR_NEGINT => {
                let h = wire::read_head(s.as_bytes(), offset).map_err(Stop::Decode)?;
                if h.info == wire::INFO_INDEFINITE {
                    return Err(Stop::Decode(CborError::new(
                        ErrorCode::IndefiniteLength,
                        offset,
                    )));
                }
                let v = if h.major == wire::MAJOR_UINT {
                    i128::from(h.arg)
                } else {
                    -1 - i128::from(h.arg)
                };
                writeln!(f, "(int, {v})")?;
                Ok(h.size)
            }
            wire::MAJOR_BYTES => {
                let (payload, consumed) = s.read_bytes(offset)?;
                write!(f, "(byte string, \"")?;
                escape(f, payload)?;
                writeln!(f, "\")")?;
                Ok(consumed)
            }
            wire::MAJOR_TEXT => {
                let (payload, consumed) = s.read_text(offset)?;
                write!(f, "(unicode string, \"")?;
                escape(f, payload)?;
                writeln!(f, "\")")?;
                Ok(consumed)
            }
            wire::MAJOR_ARRAY => {
                let (len, head) = s.read_array(offset)?;
                let mut consumed = head;
                let mut at = offset + head;
                match len {
                    Len::Definite(n) => {
                        writeln!(f, "(array, length: {n})")?;
                        for _ in 0..n {
                            let k = self.item(f, at, indent + 2, depth + 1)?;
                            at += k;
                            consumed += k;
                        }
                    }
                    Len::Indefinite => {
                        writeln!(f, "(array, length: [indefinite])")?;
                        while !s.at_break(at) {
                            let k = self.item(f, at, indent + 2, depth + 1)?;
                            at += k;
                            consumed += k;
                        }
                        // Account for the break byte when it is present;
                        // a truncated stream simply ends the container.
                        consumed += usize::from(!s.at_end(at));
                    }
                }
                Ok(consumed)
            }
            wire::MAJOR_MAP => {
                let (len, head) = s.read_map(offset)?;
                let mut consumed = head;
                let mut at = offset + head;
                match len {
                    Len::Definite(n) => {
                        writeln!(f, "(map, length: {n})")?;
                        for _ in 0..n {
                            let k = self.pair(f, at, indent, depth)?;
                            at += k;
                            consumed += k;
                        }
                    }
                    Len::Indefinite => {
                        writeln!(f, "(map, length: [indefinite])")?;
                        while !s.at_break(at) {
                            let k = self.pair(f, at, indent, depth)?;
                            at += k;
                            consumed += k;
                        }
                        consumed += usize::from(!s.at_end(at));
                    }
                }
                Ok(consumed)
            }
            wire::MAJOR_TAG => {
                let (tag, head) = s.read_tag(offset)?;
                write!(f, "(tag: {tag}, ")?;
                match tag {
                    wire::TAG_DATE_TIME => {
                        let (dt, consumed) = s.read_date_time(offset)?;
                        writeln!(f, "date/time string: \"{dt}\")")?;
                        Ok(consumed)
                    }
                    wire::TAG_EPOCH => {
                        let (secs, consumed) = s.read_epoch(offset)?;
                        writeln!(f, "date/time epoch: {secs})")?;
                        Ok(consumed)
                    }
                    // The tagged item follows as its own frame.
                    _ => {
                        writeln!(f, "unknown content)")?;
                        Ok(head)
                    }
                }
            }
            _ => match ib {
                wire::SIMPLE_FALSE | wire::SIMPLE_TRUE => {
                    let (v, consumed) = s.read_bool(offset)?;
                    writeln!(f, "(bool, {v})")?;
                    Ok(consumed)
                }
                wire::SIMPLE_NULL => {
                    writeln!(f, "(null)")?;
                    Ok(1)
                }
                wire::SIMPLE_UNDEFINED => {
                    writeln!(f, "(undefined)")?;
                    Ok(1)
                }
                wire::SIMPLE_FLOAT16 => {
                    let (v, consumed) = s.read_half(offset)?;
                    writeln!(f, "(float, {v})")?;
                    Ok(consumed)
                }
                wire::SIMPLE_FLOAT32 => {
                    let (v, consumed) = s.read_float(offset)?;
                    writeln!(f, "(float, {v})")?;
                    Ok(consumed)
                }
                wire::SIMPLE_FLOAT64 => {
                    let (v, consumed) = s.read_double(offset)?;
                    writeln!(f, "(double, {v})")?;
                    Ok(consumed)
                }
                // A stray break or a reserved simple value ends the frame.
                _ => Err(Stop::Decode(CborError::new(ErrorCode::TypeMismatch, offset))),
            },
        }
    }

    /// Render one map entry: key at indent+1, value at indent+2.
    fn pair(
        &self,
        f: &mut fmt::Formatter<'_>,
        offset: usize,
        indent: usize,
        depth: usize,
    ) -> Result<usize, Stop> {
        let key = self.item(f, offset, indent + 1, depth + 1)?;
        let value = self.item(f, offset + key, indent + 2, depth + 1)?;
        Ok(key + value)
    }
}

fn escape(f: &mut fmt::Formatter<'_>, bytes: &[u8]) -> fmt::Result {
    for &b in bytes {
        match b {
            b'"' | b'\\' => write!(f, "\\{}", char::from(b))?,
            0x20..=0x7e => f.write_char(char::from(b))?,
            _ => write!(f, "\\x{b:02x}")?,
        }
    }
    Ok(())
}

impl<'a> Stream<'a> {
    /// Hex dump of the encoded region, e.g. `0x83010203`.
    #[must_use]
    pub const fn hex(&self) -> Hex<'_, 'a> {
        Hex { stream: self }
    }

    /// Recursive pretty-print of the encoded region from offset 0.
    #[must_use]
    pub const fn pretty(&self) -> Pretty<'_, 'a> {
        Pretty {
            stream: self,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
