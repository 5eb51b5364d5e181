//! Information Object Address (IOA).

use bytes::{Buf, BufMut};

use crate::error::{Iec60870Error, Result};

/// Information Object Address (IOA).
///
/// 3-byte address identifying a specific process point within a station.
/// Values are always confined to 24 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "u32")
)]
pub struct Ioa(u32);

impl Ioa {
    /// Largest representable address.
    pub const MAX: u32 = 0x00FF_FFFF;

    /// Encoded size in bytes.
    pub const ENCODED_LEN: usize = 3;

    /// Create IOA from u32 (lower 24 bits).
    #[inline]
    pub const fn new(value: u32) -> Self {
        Self(value & Self::MAX)
    }

    /// Create IOA, rejecting values that do not fit in 24 bits.
    #[inline]
    pub fn try_new(value: u32) -> Result<Self> {
        if value > Self::MAX {
            return Err(Iec60870Error::out_of_range("information object address", value));
        }
        Ok(Self(value))
    }

    /// Parse IOA from 3 bytes (little-endian).
    #[inline]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < Self::ENCODED_LEN {
            return Err(Iec60870Error::invalid_asdu("IOA too short"));
        }
        let value = bytes[0] as u32 | ((bytes[1] as u32) << 8) | ((bytes[2] as u32) << 16);
        Ok(Self(value))
    }

    /// Encode IOA to 3 bytes (little-endian).
    #[inline]
    pub const fn to_bytes(&self) -> [u8; 3] {
        [
            (self.0 & 0xFF) as u8,
            ((self.0 >> 8) & 0xFF) as u8,
            ((self.0 >> 16) & 0xFF) as u8,
        ]
    }

    /// Read an IOA from a buffer holding at least 3 bytes.
    #[inline]
    pub(crate) fn read<B: Buf>(buf: &mut B) -> Self {
        Self(buf.get_uint_le(Self::ENCODED_LEN) as u32)
    }

    /// Write the IOA to a buffer.
    #[inline]
    pub(crate) fn write<B: BufMut>(&self, buf: &mut B) {
        buf.put_slice(&self.to_bytes());
    }

    /// Address `offset` positions after this one, wrapping at 24 bits.
    #[inline]
    pub const fn offset(&self, offset: u32) -> Self {
        Self::new(self.0.wrapping_add(offset))
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl From<u32> for Ioa {
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

impl From<Ioa> for u32 {
    fn from(ioa: Ioa) -> Self {
        ioa.0
    }
}

impl std::fmt::Display for Ioa {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
