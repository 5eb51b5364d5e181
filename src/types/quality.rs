//! Quality descriptor (QDS) for monitored information.
//!
//! Wire layout (one byte):
//!
//! ```text
//! bit:  7    6    5    4    3    2    1    0
//!      IV   NT   SB   BL   res  res  res  OV
//! ```
//!
//! Single- and double-point information (SIQ/DIQ) share the upper nibble
//! but use the low bits for the value, so OV never appears there.

use crate::error::{Iec60870Error, Result};

/// Quality descriptor flag set.
///
/// Reserved bits (0x02, 0x04, 0x08) are never stored.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "u8")
)]
#[repr(transparent)]
pub struct QualityDescriptor(u8);

// Bit masks for quality flags (wire positions)
impl QualityDescriptor {
    const OV_MASK: u8 = 0b0000_0001;
    const BL_MASK: u8 = 0b0001_0000;
    const SB_MASK: u8 = 0b0010_0000;
    const NT_MASK: u8 = 0b0100_0000;
    const IV_MASK: u8 = 0b1000_0000;

    /// All defined flag bits.
    pub const VALID_MASK: u8 =
        Self::OV_MASK | Self::BL_MASK | Self::SB_MASK | Self::NT_MASK | Self::IV_MASK;

    /// Flag bits that fit next to a single/double-point value (SIQ/DIQ).
    pub const POINT_MASK: u8 = Self::BL_MASK | Self::SB_MASK | Self::NT_MASK | Self::IV_MASK;

    /// Reserved bits that must be zero on the wire.
    pub const RESERVED_MASK: u8 = 0b0000_1110;
}

impl QualityDescriptor {
    /// Good quality (no flags set).
    pub const GOOD: Self = Self(0);

    /// Overflow (OV) - value exceeds predefined range
    pub const OVERFLOW: Self = Self(Self::OV_MASK);

    /// Blocked (BL) - value is blocked for transmission
    pub const BLOCKED: Self = Self(Self::BL_MASK);

    /// Substituted (SB) - value provided by operator input or automatic source
    pub const SUBSTITUTED: Self = Self(Self::SB_MASK);

    /// Not topical (NT) - last update was not successful
    pub const NON_TOPICAL: Self = Self(Self::NT_MASK);

    /// Invalid (IV) - value is incorrectly acquired
    pub const INVALID: Self = Self(Self::IV_MASK);

    /// Create from a raw byte, silently clearing reserved bits.
    #[inline(always)]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & Self::VALID_MASK)
    }

    /// Create from a raw byte, rejecting reserved bits.
    #[inline]
    pub fn try_from_bits(bits: u8) -> Result<Self> {
        if bits & Self::RESERVED_MASK != 0 {
            return Err(Iec60870Error::ReservedBits {
                field: "quality descriptor",
                value: bits,
            });
        }
        Ok(Self(bits))
    }

    /// Get the raw wire byte.
    #[inline(always)]
    pub const fn bits(&self) -> u8 {
        self.0 & Self::VALID_MASK
    }

    /// Restrict to the flags representable in a SIQ/DIQ byte.
    #[inline(always)]
    pub const fn for_point(self) -> Self {
        Self(self.0 & Self::POINT_MASK)
    }

    /// Check whether all flags of `other` are set.
    #[inline(always)]
    pub const fn contains(&self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Check if quality is good (no flags set).
    #[inline(always)]
    pub const fn is_good(&self) -> bool {
        self.0 == 0
    }

    #[inline(always)]
    const fn with_flag(mut self, mask: u8, value: bool) -> Self {
        if value {
            self.0 |= mask;
        } else {
            self.0 &= !mask;
        }
        self
    }

    /// Overflow (OV)
    #[inline(always)]
    pub const fn overflow(&self) -> bool {
        (self.0 & Self::OV_MASK) != 0
    }

    /// Set overflow flag
    #[inline(always)]
    pub const fn set_overflow(self, value: bool) -> Self {
        self.with_flag(Self::OV_MASK, value)
    }

    /// Blocked (BL)
    #[inline(always)]
    pub const fn blocked(&self) -> bool {
        (self.0 & Self::BL_MASK) != 0
    }

    /// Set blocked flag
    #[inline(always)]
    pub const fn set_blocked(self, value: bool) -> Self {
        self.with_flag(Self::BL_MASK, value)
    }

    /// Substituted (SB)
    #[inline(always)]
    pub const fn substituted(&self) -> bool {
        (self.0 & Self::SB_MASK) != 0
    }

    /// Set substituted flag
    #[inline(always)]
    pub const fn set_substituted(self, value: bool) -> Self {
        self.with_flag(Self::SB_MASK, value)
    }

    /// Not topical (NT)
    #[inline(always)]
    pub const fn non_topical(&self) -> bool {
        (self.0 & Self::NT_MASK) != 0
    }

    /// Set non_topical flag
    #[inline(always)]
    pub const fn set_non_topical(self, value: bool) -> Self {
        self.with_flag(Self::NT_MASK, value)
    }

    /// Invalid (IV)
    #[inline(always)]
    pub const fn invalid(&self) -> bool {
        (self.0 & Self::IV_MASK) != 0
    }

    /// Set invalid flag
    #[inline(always)]
    pub const fn set_invalid(self, value: bool) -> Self {
        self.with_flag(Self::IV_MASK, value)
    }
}

impl std::ops::BitOr for QualityDescriptor {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for QualityDescriptor {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl From<u8> for QualityDescriptor {
    fn from(bits: u8) -> Self {
        Self::from_bits(bits)
    }
}

impl From<QualityDescriptor> for u8 {
    fn from(quality: QualityDescriptor) -> Self {
        quality.0
    }
}

impl std::fmt::Debug for QualityDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QualityDescriptor")
            .field("overflow", &self.overflow())
            .field("blocked", &self.blocked())
            .field("substituted", &self.substituted())
            .field("non_topical", &self.non_topical())
            .field("invalid", &self.invalid())
            .finish()
    }
}

impl std::fmt::Display for QualityDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_good() {
            return f.write_str("Good");
        }

        let flags = [
            (self.overflow(), "OV"),
            (self.blocked(), "BL"),
            (self.substituted(), "SB"),
            (self.non_topical(), "NT"),
            (self.invalid(), "IV"),
        ];
        let mut first = true;
        for (_, name) in flags.iter().filter(|(set, _)| *set) {
            if !first {
                f.write_str("|")?;
            }
            first = false;
            f.write_str(name)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_quality_bits_never_expose_reserved() {
        assert_eq!(QualityDescriptor(0x0F).bits(), 0x01);
        assert_eq!(QualityDescriptor(0xFF).bits(), 0xF1);
    }

    #[test]
    fn test_quality_constants() {
        assert_eq!(QualityDescriptor::GOOD.bits(), 0x00);
        assert_eq!(QualityDescriptor::OVERFLOW.bits(), 0x01);
        assert_eq!(QualityDescriptor::BLOCKED.bits(), 0x10);
        assert_eq!(QualityDescriptor::SUBSTITUTED.bits(), 0x20);
        assert_eq!(QualityDescriptor::NON_TOPICAL.bits(), 0x40);
        assert_eq!(QualityDescriptor::INVALID.bits(), 0x80);
    }

    #[test]
    fn test_quality_flags() {
        assert!(QualityDescriptor::GOOD.is_good());
        assert!(!QualityDescriptor::INVALID.is_good());

        let q = QualityDescriptor::from_bits(0x81);
        assert!(q.invalid());
        assert!(q.overflow());
        assert!(!q.blocked());
        assert!(q.contains(QualityDescriptor::INVALID | QualityDescriptor::OVERFLOW));
    }

    #[test]
    fn test_quality_reserved_bits_masked() {
        assert_eq!(QualityDescriptor::from_bits(0xFF).bits(), 0xF1);
        assert_eq!(QualityDescriptor::from_bits(0x0E).bits(), 0x00);
    }

    #[test]
    fn test_quality_try_from_bits() {
        assert_eq!(
            QualityDescriptor::try_from_bits(0x90).unwrap(),
            QualityDescriptor::BLOCKED | QualityDescriptor::INVALID
        );
        assert_eq!(
            QualityDescriptor::try_from_bits(0x04),
            Err(Iec60870Error::ReservedBits {
                field: "quality descriptor",
                value: 0x04
            })
        );
    }

    #[test]
    fn test_quality_for_point() {
        let q = QualityDescriptor::OVERFLOW | QualityDescriptor::BLOCKED;
        assert_eq!(q.for_point(), QualityDescriptor::BLOCKED);
    }

    #[test]
    fn test_quality_builder_toggle() {
        let q = QualityDescriptor::GOOD.set_invalid(true).set_non_topical(true);
        assert_eq!(q.bits(), 0xC0);

        let q = q.set_invalid(false).set_non_topical(false);
        assert!(q.is_good());
    }

    #[test]
    fn test_quality_display() {
        assert_eq!(QualityDescriptor::GOOD.to_string(), "Good");
        assert_eq!(QualityDescriptor::INVALID.to_string(), "IV");

        let q = QualityDescriptor::GOOD.set_overflow(true).set_invalid(true);
        assert_eq!(q.to_string(), "OV|IV");
        assert_eq!(QualityDescriptor::from_bits(0xF1).to_string(), "OV|BL|SB|NT|IV");
    }

    #[test]
    fn test_quality_packed_size() {
        assert_eq!(std::mem::size_of::<QualityDescriptor>(), 1);
    }

    proptest! {
        #[test]
        fn quality_encode_clears_reserved_bits(b in any::<u8>()) {
            let q = QualityDescriptor::from_bits(b);
            prop_assert_eq!(q.bits() & QualityDescriptor::RESERVED_MASK, 0);
            prop_assert_eq!(q.bits(), b & 0xF1);
        }

        #[test]
        fn quality_valid_bytes_roundtrip(b in any::<u8>()) {
            let valid = b & QualityDescriptor::VALID_MASK;
            let q = QualityDescriptor::try_from_bits(valid).unwrap();
            prop_assert_eq!(QualityDescriptor::from_bits(q.bits()).bits(), valid);
        }
    }
}
