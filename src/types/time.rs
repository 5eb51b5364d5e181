//! CP24Time2a and CP56Time2a time tags.
//!
//! Binary layout (little-endian):
//!
//! ```text
//! byte 0-1: milliseconds within minute (0..59999)
//! byte 2:   IV(7) SU(6) minute(5:0)
//! --- CP56Time2a only ---
//! byte 3:   SU(7) hour(4:0)
//! byte 4:   day of week(7:5) day of month(4:0)
//! byte 5:   month(3:0)
//! byte 6:   year of century(6:0)
//! ```

use crate::error::{Iec60870Error, Result};

/// Three-byte time tag with minute/millisecond resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "Cp24Fields")
)]
pub struct Cp24Time2a {
    millisecond: u16,
    minute: u8,
    invalid: bool,
    substituted: bool,
}

impl Cp24Time2a {
    /// Encoded size in bytes.
    pub const ENCODED_LEN: usize = 3;

    /// Create a time tag from minute and millisecond-within-minute.
    pub const fn new(minute: u8, millisecond: u16) -> Self {
        Self {
            millisecond,
            minute: minute & 0x3F,
            invalid: false,
            substituted: false,
        }
    }

    /// Parse from 3 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < Self::ENCODED_LEN {
            return Err(Iec60870Error::invalid_asdu("CP24Time2a too short"));
        }
        Ok(Self {
            millisecond: bytes[0] as u16 | ((bytes[1] as u16) << 8),
            minute: bytes[2] & 0x3F,
            invalid: (bytes[2] & 0x80) != 0,
            substituted: (bytes[2] & 0x40) != 0,
        })
    }

    /// Encode to 3 bytes.
    pub const fn to_bytes(&self) -> [u8; 3] {
        [
            (self.millisecond & 0xFF) as u8,
            (self.millisecond >> 8) as u8,
            encode_minute_byte(self.minute, self.invalid, self.substituted),
        ]
    }

    /// Milliseconds within the minute, including seconds (0..59999).
    pub const fn millisecond(&self) -> u16 {
        self.millisecond
    }

    pub fn set_millisecond(&mut self, value: u16) {
        self.millisecond = value;
    }

    pub const fn second(&self) -> u8 {
        (self.millisecond / 1000) as u8
    }

    pub const fn minute(&self) -> u8 {
        self.minute
    }

    pub fn set_minute(&mut self, value: u8) {
        self.minute = value & 0x3F;
    }

    /// Invalid flag (IV)
    pub const fn is_invalid(&self) -> bool {
        self.invalid
    }

    pub fn set_invalid(&mut self, value: bool) {
        self.invalid = value;
    }

    /// Substituted flag (SU)
    pub const fn is_substituted(&self) -> bool {
        self.substituted
    }

    pub fn set_substituted(&mut self, value: bool) {
        self.substituted = value;
    }
}

/// Seven-byte time tag with full date and time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "Cp56Fields")
)]
pub struct Cp56Time2a {
    millisecond: u16,
    minute: u8,
    hour: u8,
    day_of_month: u8,
    day_of_week: u8,
    month: u8,
    year: u8,
    invalid: bool,
    substituted: bool,
    summer_time: bool,
}

impl Cp56Time2a {
    /// Encoded size in bytes.
    pub const ENCODED_LEN: usize = 7;

    /// Create a time tag from calendar fields.
    ///
    /// `year` is the year of the century (0..99). Every field is masked to
    /// its wire width.
    pub const fn new(year: u8, month: u8, day_of_month: u8, hour: u8, minute: u8, millisecond: u16) -> Self {
        Self {
            millisecond,
            minute: minute & 0x3F,
            hour: hour & 0x1F,
            day_of_month: day_of_month & 0x1F,
            day_of_week: 0,
            month: month & 0x0F,
            year: year & 0x7F,
            invalid: false,
            substituted: false,
            summer_time: false,
        }
    }

    /// Parse from 7 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < Self::ENCODED_LEN {
            return Err(Iec60870Error::invalid_asdu("CP56Time2a too short"));
        }

        Ok(Self {
            millisecond: bytes[0] as u16 | ((bytes[1] as u16) << 8),
            minute: bytes[2] & 0x3F,
            invalid: (bytes[2] & 0x80) != 0,
            substituted: (bytes[2] & 0x40) != 0,
            hour: bytes[3] & 0x1F,
            summer_time: (bytes[3] & 0x80) != 0,
            day_of_month: bytes[4] & 0x1F,
            day_of_week: (bytes[4] >> 5) & 0x07,
            month: bytes[5] & 0x0F,
            year: bytes[6] & 0x7F,
        })
    }

    /// Encode to 7 bytes.
    pub const fn to_bytes(&self) -> [u8; 7] {
        [
            (self.millisecond & 0xFF) as u8,
            (self.millisecond >> 8) as u8,
            encode_minute_byte(self.minute, self.invalid, self.substituted),
            (self.hour & 0x1F) | if self.summer_time { 0x80 } else { 0 },
            (self.day_of_month & 0x1F) | ((self.day_of_week & 0x07) << 5),
            self.month & 0x0F,
            self.year & 0x7F,
        ]
    }

    /// Truncate to the minute/millisecond part.
    pub const fn to_cp24(&self) -> Cp24Time2a {
        Cp24Time2a {
            millisecond: self.millisecond,
            minute: self.minute,
            invalid: self.invalid,
            substituted: self.substituted,
        }
    }

    /// Milliseconds within the minute, including seconds (0..59999).
    pub const fn millisecond(&self) -> u16 {
        self.millisecond
    }

    pub fn set_millisecond(&mut self, value: u16) {
        self.millisecond = value;
    }

    pub const fn second(&self) -> u8 {
        (self.millisecond / 1000) as u8
    }

    pub const fn minute(&self) -> u8 {
        self.minute
    }

    pub fn set_minute(&mut self, value: u8) {
        self.minute = value & 0x3F;
    }

    pub const fn hour(&self) -> u8 {
        self.hour
    }

    pub fn set_hour(&mut self, value: u8) {
        self.hour = value & 0x1F;
    }

    pub const fn day_of_month(&self) -> u8 {
        self.day_of_month
    }

    pub fn set_day_of_month(&mut self, value: u8) {
        self.day_of_month = value & 0x1F;
    }

    /// Day of week (1 = Monday .. 7 = Sunday, 0 = not used).
    pub const fn day_of_week(&self) -> u8 {
        self.day_of_week
    }

    pub fn set_day_of_week(&mut self, value: u8) {
        self.day_of_week = value & 0x07;
    }

    pub const fn month(&self) -> u8 {
        self.month
    }

    pub fn set_month(&mut self, value: u8) {
        self.month = value & 0x0F;
    }

    /// Year of the century (0..99).
    pub const fn year(&self) -> u8 {
        self.year
    }

    pub fn set_year(&mut self, value: u8) {
        self.year = value & 0x7F;
    }

    /// Invalid flag (IV)
    pub const fn is_invalid(&self) -> bool {
        self.invalid
    }

    pub fn set_invalid(&mut self, value: bool) {
        self.invalid = value;
    }

    /// Substituted flag (SU)
    pub const fn is_substituted(&self) -> bool {
        self.substituted
    }

    pub fn set_substituted(&mut self, value: bool) {
        self.substituted = value;
    }

    /// Summer time flag (SU in the hour byte)
    pub const fn is_summer_time(&self) -> bool {
        self.summer_time
    }

    pub fn set_summer_time(&mut self, value: bool) {
        self.summer_time = value;
    }
}

// Deserialized time tags are narrowed through the masking setters.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct Cp24Fields {
    millisecond: u16,
    minute: u8,
    invalid: bool,
    substituted: bool,
}

#[cfg(feature = "serde")]
impl From<Cp24Fields> for Cp24Time2a {
    fn from(f: Cp24Fields) -> Self {
        let mut time = Self::new(f.minute, f.millisecond);
        time.set_invalid(f.invalid);
        time.set_substituted(f.substituted);
        time
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct Cp56Fields {
    millisecond: u16,
    minute: u8,
    hour: u8,
    day_of_month: u8,
    day_of_week: u8,
    month: u8,
    year: u8,
    invalid: bool,
    substituted: bool,
    summer_time: bool,
}

#[cfg(feature = "serde")]
impl From<Cp56Fields> for Cp56Time2a {
    fn from(f: Cp56Fields) -> Self {
        let mut time = Self::new(f.year, f.month, f.day_of_month, f.hour, f.minute, f.millisecond);
        time.set_day_of_week(f.day_of_week);
        time.set_invalid(f.invalid);
        time.set_substituted(f.substituted);
        time.set_summer_time(f.summer_time);
        time
    }
}

const fn encode_minute_byte(minute: u8, invalid: bool, substituted: bool) -> u8 {
    (minute & 0x3F) | (if invalid { 0x80 } else { 0 }) | (if substituted { 0x40 } else { 0 })
}
