//! Binary counter reading (BCR) for integrated totals.
//!
//! Wire layout: 4-byte signed counter (little-endian) followed by
//! IV(7) CA(6) CY(5) SQ(4:0).

use crate::error::{Iec60870Error, Result};

/// Binary counter reading value with sequence number and status flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "BcrFields")
)]
pub struct BinaryCounterReading {
    value: i32,
    sequence_number: u8,
    carry: bool,
    adjusted: bool,
    invalid: bool,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct BcrFields {
    value: i32,
    sequence_number: u8,
    carry: bool,
    adjusted: bool,
    invalid: bool,
}

#[cfg(feature = "serde")]
impl From<BcrFields> for BinaryCounterReading {
    fn from(f: BcrFields) -> Self {
        Self::new(f.value, f.sequence_number, f.carry, f.adjusted, f.invalid)
    }
}

impl BinaryCounterReading {
    /// Encoded size in bytes.
    pub const ENCODED_LEN: usize = 5;

    /// Largest sequence number (5 bits).
    pub const SEQUENCE_MAX: u8 = 0x1F;

    const CY_MASK: u8 = 0x20;
    const CA_MASK: u8 = 0x40;
    const IV_MASK: u8 = 0x80;

    /// Create a reading; the sequence number is masked to 5 bits.
    pub const fn new(value: i32, sequence_number: u8, carry: bool, adjusted: bool, invalid: bool) -> Self {
        Self {
            value,
            sequence_number: sequence_number & Self::SEQUENCE_MAX,
            carry,
            adjusted,
            invalid,
        }
    }

    /// Parse from 5 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < Self::ENCODED_LEN {
            return Err(Iec60870Error::invalid_asdu("BCR too short"));
        }
        let flags = bytes[4];
        Ok(Self {
            value: i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
            sequence_number: flags & Self::SEQUENCE_MAX,
            carry: (flags & Self::CY_MASK) != 0,
            adjusted: (flags & Self::CA_MASK) != 0,
            invalid: (flags & Self::IV_MASK) != 0,
        })
    }

    /// Encode to 5 bytes.
    pub fn to_bytes(&self) -> [u8; 5] {
        let v = self.value.to_le_bytes();
        [v[0], v[1], v[2], v[3], self.flags()]
    }

    fn flags(&self) -> u8 {
        let mut flags = self.sequence_number & Self::SEQUENCE_MAX;
        if self.carry {
            flags |= Self::CY_MASK;
        }
        if self.adjusted {
            flags |= Self::CA_MASK;
        }
        if self.invalid {
            flags |= Self::IV_MASK;
        }
        flags
    }

    /// Counter value.
    pub const fn value(&self) -> i32 {
        self.value
    }

    pub fn set_value(&mut self, value: i32) {
        self.value = value;
    }

    /// Sequence number (0..31).
    pub const fn sequence_number(&self) -> u8 {
        self.sequence_number
    }

    pub fn set_sequence_number(&mut self, value: u8) {
        self.sequence_number = value & Self::SEQUENCE_MAX;
    }

    /// Counter overflow occurred in the integration period (CY).
    pub const fn has_carry(&self) -> bool {
        self.carry
    }

    pub fn set_carry(&mut self, value: bool) {
        self.carry = value;
    }

    /// Counter was adjusted since the last reading (CA).
    pub const fn is_adjusted(&self) -> bool {
        self.adjusted
    }

    pub fn set_adjusted(&mut self, value: bool) {
        self.adjusted = value;
    }

    /// Counter reading is invalid (IV).
    pub const fn is_invalid(&self) -> bool {
        self.invalid
    }

    pub fn set_invalid(&mut self, value: bool) {
        self.invalid = value;
    }
}
