//! Date/time tags (RFC 7049 section 2.4.1).
//!
//! Tag 0 carries an RFC 3339 / ISO 8601 text stamp of the fixed form
//! `YYYY-MM-DDTHH:MM:SSZ`; tag 1 carries epoch seconds as an unsigned
//! integer. Both tag the immediately following item.

use core::fmt::{self, Write as _};

use crate::stream::Stream;
use crate::wire;
use crate::{CborError, ErrorCode};

/// Length of the `YYYY-MM-DDTHH:MM:SSZ` stamp.
const STAMP_LEN: usize = 20;

/// A civil UTC date and time, second resolution.
///
/// Field validity is checked on construction; a value built with
/// [`DateTime::new`] always formats to a well-formed stamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTime {
    /// Year, 0..=9999.
    pub year: u16,
    /// Month, 1..=12.
    pub month: u8,
    /// Day of month, 1..=31.
    pub day: u8,
    /// Hour, 0..=23.
    pub hour: u8,
    /// Minute, 0..=59.
    pub minute: u8,
    /// Second, 0..=60 to admit a leap second.
    pub second: u8,
}

impl DateTime {
    /// Construct a date/time, refusing out-of-range fields.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorCode::InvalidDateTime`] when any field is outside its
    /// range. Day-of-month is not correlated with the month.
    pub fn new(
        year: u16,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> Result<Self, CborError> {
        let dt = Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        };
        if dt.in_range() {
            Ok(dt)
        } else {
            Err(CborError::new(ErrorCode::InvalidDateTime, 0))
        }
    }

    const fn in_range(&self) -> bool {
        self.year <= 9999
            && 1 <= self.month
            && self.month <= 12
            && 1 <= self.day
            && self.day <= 31
            && self.hour <= 23
            && self.minute <= 59
            && self.second <= 60
    }

    fn parse(stamp: &[u8]) -> Option<Self> {
        if stamp.len() != STAMP_LEN {
            return None;
        }
        if stamp[4] != b'-'
            || stamp[7] != b'-'
            || stamp[10] != b'T'
            || stamp[13] != b':'
            || stamp[16] != b':'
            || stamp[19] != b'Z'
        {
            return None;
        }
        let dt = Self {
            year: num(&stamp[0..4])?,
            month: num(&stamp[5..7])?,
            day: num(&stamp[8..10])?,
            hour: num(&stamp[11..13])?,
            minute: num(&stamp[14..16])?,
            second: num(&stamp[17..19])?,
        };
        dt.in_range().then_some(dt)
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

/// Parse a fixed-width decimal field.
fn num<T: TryFrom<u32>>(digits: &[u8]) -> Option<T> {
    let mut v: u32 = 0;
    for &d in digits {
        if !d.is_ascii_digit() {
            return None;
        }
        v = v * 10 + u32::from(d - b'0');
    }
    T::try_from(v).ok()
}

/// A `fmt::Write` sink over the fixed-size stamp buffer.
struct StampBuf {
    buf: [u8; STAMP_LEN],
    len: usize,
}

impl fmt::Write for StampBuf {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let bytes = s.as_bytes();
        let end = self.len.checked_add(bytes.len()).ok_or(fmt::Error)?;
        if end > STAMP_LEN {
            return Err(fmt::Error);
        }
        self.buf[self.len..end].copy_from_slice(bytes);
        self.len = end;
        Ok(())
    }
}

impl Stream<'_> {
    /// Serialize `dt` as tag 0 followed by its RFC 3339 text stamp.
    ///
    /// Writes 22 bytes: the tag byte, the text head, and 20 stamp characters.
    pub fn date_time(&mut self, dt: &DateTime) -> Result<usize, CborError> {
        if !dt.in_range() {
            return Err(CborError::new(ErrorCode::InvalidDateTime, self.position()));
        }
        let mut stamp = StampBuf {
            buf: [0; STAMP_LEN],
            len: 0,
        };
        write!(stamp, "{dt}")
            .map_err(|_| CborError::new(ErrorCode::InvalidDateTime, self.position()))?;
        let stamp = core::str::from_utf8(&stamp.buf)
            .map_err(|_| CborError::new(ErrorCode::InvalidDateTime, self.position()))?;

        // All-or-nothing: tag byte + text head + stamp.
        self.ensure(2 + STAMP_LEN)?;
        let n = self.tag(wire::TAG_DATE_TIME)?;
        let m = self.text(stamp)?;
        Ok(n + m)
    }

    /// Serialize `secs` since the epoch as tag 1 followed by an unsigned
    /// integer. Negative epochs are not supported.
    pub fn epoch(&mut self, secs: i64) -> Result<usize, CborError> {
        let secs =
            u64::try_from(secs).map_err(|_| CborError::new(ErrorCode::Unsupported, self.position()))?;
        self.ensure(1 + wire::head_len(secs))?;
        let n = self.tag(wire::TAG_EPOCH)?;
        let m = self.uint(secs)?;
        Ok(n + m)
    }

    /// Deserialize a tag 0 date/time at `offset`.
    ///
    /// Returns the parsed stamp and the bytes consumed (tag plus text item).
    pub fn read_date_time(&self, offset: usize) -> Result<(DateTime, usize), CborError> {
        let (tag, tag_size) = self.read_tag(offset)?;
        if tag != wire::TAG_DATE_TIME {
            return Err(CborError::new(ErrorCode::TypeMismatch, offset));
        }
        let item = offset + tag_size;
        let (stamp, consumed) = self.read_text(item)?;
        let dt =
            DateTime::parse(stamp).ok_or_else(|| CborError::new(ErrorCode::InvalidDateTime, item))?;
        Ok((dt, tag_size + consumed))
    }

    /// Deserialize a tag 1 epoch at `offset`.
    ///
    /// Returns the seconds and the bytes consumed (tag plus integer item).
    pub fn read_epoch(&self, offset: usize) -> Result<(u64, usize), CborError> {
        let (tag, tag_size) = self.read_tag(offset)?;
        if tag != wire::TAG_EPOCH {
            return Err(CborError::new(ErrorCode::TypeMismatch, offset));
        }
        let (secs, consumed) = self.read_uint(offset + tag_size)?;
        Ok((secs, tag_size + consumed))
    }
}
