use std::{fmt, ops::Range};

use chrono::{
    DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone,
    Timelike, Utc,
};

use crate::error::{Error, Result};

/**
How much of a timestamp was written out.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Precision {
    /**
    `2001T`
    */
    Year,
    /**
    `2001-01T`
    */
    Month,
    /**
    `2001-01-01` or `2001-01-01T`
    */
    Day,
    /**
    `2001-01-01T00:00Z`
    */
    Minute,
    /**
    `2001-01-01T00:00:00Z`
    */
    Second,
    /**
    `2001-01-01T00:00:00.000Z`
    */
    Fraction,
}

/**
A point in time along with the precision and offset it was written with.

Two timestamps written differently aren't equal even if they refer to the same instant.
Compare the results of [`Timestamp::to_datetime`] to compare instants.
*/
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Timestamp {
    /**
    The date and time in the timestamp's own offset.
    */
    local: NaiveDateTime,
    /**
    The number of fractional second digits written, up to nanoseconds.
    */
    fraction_digits: u8,
    precision: Precision,
    /**
    The offset from UTC.

    This is `None` for timestamps without a time, and for the unknown offset `-00:00`.
    */
    offset: Option<FixedOffset>,
}

impl Default for Timestamp {
    fn default() -> Self {
        Timestamp {
            local: NaiveDateTime::default(),
            fraction_digits: 0,
            precision: Precision::Year,
            offset: None,
        }
    }
}

impl Timestamp {
    pub fn year(&self) -> i32 {
        self.local.year()
    }

    pub fn month(&self) -> u32 {
        self.local.month()
    }

    pub fn day(&self) -> u32 {
        self.local.day()
    }

    pub fn hour(&self) -> u32 {
        self.local.hour()
    }

    pub fn minute(&self) -> u32 {
        self.local.minute()
    }

    pub fn second(&self) -> u32 {
        self.local.second()
    }

    pub fn nanosecond(&self) -> u32 {
        self.local.nanosecond()
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }

    /**
    The offset from UTC, or `None` if it's unknown.
    */
    pub fn offset(&self) -> Option<FixedOffset> {
        self.offset
    }

    /**
    The instant this timestamp refers to.

    Timestamps with an unknown offset are treated as UTC.
    */
    pub fn to_datetime(&self) -> DateTime<FixedOffset> {
        let offset = self.offset.unwrap_or_else(|| Utc.fix());
        let utc = self.local - Duration::seconds(offset.local_minus_utc() as i64);

        offset.from_utc_datetime(&utc)
    }

    /**
    Parse a timestamp literal that has already been checked by the tokenizer.

    This checks the fields make up a real date and time.
    */
    pub(crate) fn parse(literal: &str) -> Result<Self> {
        let invalid = |reason| Error::invalid_literal(literal, reason);

        let b = literal.as_bytes();
        let digits = |range: Range<usize>| -> Result<u32> {
            match b.get(range) {
                Some(digits) if digits.iter().all(u8::is_ascii_digit) => Ok(digits
                    .iter()
                    .fold(0, |acc, d| acc * 10 + u32::from(d - b'0'))),
                _ => Err(invalid("malformed timestamp")),
            }
        };
        let expect = |at: usize, c: u8| -> Result<()> {
            if b.get(at) == Some(&c) {
                Ok(())
            } else {
                Err(invalid("malformed timestamp"))
            }
        };

        let year = digits(0..4)?;
        if year == 0 {
            return Err(invalid("year must be between 0001 and 9999"));
        }

        let mut month = 1;
        let mut day = 1;
        let mut hour = 0;
        let mut minute = 0;
        let mut second = 0;
        let mut nanosecond = 0;
        let mut fraction_digits = 0;

        // the position of the offset, if there's a time
        let mut offset_at = None;

        let precision = if b.len() == 5 {
            expect(4, b'T')?;
            Precision::Year
        } else {
            expect(4, b'-')?;
            month = digits(5..7)?;

            if b.len() == 8 {
                expect(7, b'T')?;
                Precision::Month
            } else {
                expect(7, b'-')?;
                day = digits(8..10)?;

                if b.len() == 10 || (b.len() == 11 && b[10] == b'T') {
                    Precision::Day
                } else {
                    expect(10, b'T')?;
                    hour = digits(11..13)?;
                    expect(13, b':')?;
                    minute = digits(14..16)?;

                    if b.get(16) != Some(&b':') {
                        offset_at = Some(16);
                        Precision::Minute
                    } else {
                        second = digits(17..19)?;

                        if b.get(19) != Some(&b'.') {
                            offset_at = Some(19);
                            Precision::Second
                        } else {
                            let count = b[20..].iter().take_while(|c| c.is_ascii_digit()).count();
                            if count == 0 {
                                return Err(invalid("missing fractional seconds"));
                            }

                            // anything past nanoseconds is truncated
                            fraction_digits = count.min(9);
                            nanosecond = digits(20..20 + fraction_digits)?
                                * 10u32.pow(9 - fraction_digits as u32);

                            offset_at = Some(20 + count);
                            Precision::Fraction
                        }
                    }
                }
            }
        };

        let offset = match offset_at {
            None => None,
            Some(at) => match b.get(at) {
                Some(b'Z') | Some(b'z') if b.len() == at + 1 => Some(Utc.fix()),
                Some(sign @ b'+') | Some(sign @ b'-') if b.len() == at + 6 => {
                    let offset_hour = digits(at + 1..at + 3)?;
                    expect(at + 3, b':')?;
                    let offset_minute = digits(at + 4..at + 6)?;

                    if offset_hour >= 24 || offset_minute >= 60 {
                        return Err(invalid("offset out of range"));
                    }

                    let seconds = ((offset_hour * 60 + offset_minute) * 60) as i32;

                    match (sign, seconds) {
                        // `-00:00` is the unknown offset
                        (b'-', 0) => None,
                        (b'-', seconds) => FixedOffset::west_opt(seconds),
                        (_, seconds) => FixedOffset::east_opt(seconds),
                    }
                }
                _ => return Err(invalid("malformed timestamp offset")),
            },
        };

        let date = NaiveDate::from_ymd_opt(year as i32, month, day)
            .ok_or_else(|| invalid("date out of range"))?;

        if second >= 60 {
            return Err(invalid("time out of range"));
        }

        let local = date
            .and_hms_nano_opt(hour, minute, second, nanosecond)
            .ok_or_else(|| invalid("time out of range"))?;

        Ok(Timestamp {
            local,
            fraction_digits: fraction_digits as u8,
            precision,
            offset,
        })
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let local = &self.local;

        match self.precision {
            Precision::Year => return write!(f, "{:04}T", local.year()),
            Precision::Month => return write!(f, "{:04}-{:02}T", local.year(), local.month()),
            Precision::Day => {
                return write!(
                    f,
                    "{:04}-{:02}-{:02}",
                    local.year(),
                    local.month(),
                    local.day()
                )
            }
            Precision::Minute | Precision::Second | Precision::Fraction => {
                write!(
                    f,
                    "{:04}-{:02}-{:02}T{:02}:{:02}",
                    local.year(),
                    local.month(),
                    local.day(),
                    local.hour(),
                    local.minute()
                )?;
            }
        }

        if self.precision >= Precision::Second {
            write!(f, ":{:02}", local.second())?;
        }

        if self.precision == Precision::Fraction {
            let nanos = format!("{:09}", local.nanosecond());
            write!(f, ".{}", &nanos[..self.fraction_digits as usize])?;
        }

        match self.offset {
            None => f.write_str("-00:00"),
            Some(offset) if offset.local_minus_utc() == 0 => f.write_str("Z"),
            Some(offset) => {
                let seconds = offset.local_minus_utc();
                let sign = if seconds < 0 { '-' } else { '+' };
                let minutes = seconds.unsigned_abs() / 60;

                write!(f, "{}{:02}:{:02}", sign, minutes / 60, minutes % 60)
            }
        }
    }
}
