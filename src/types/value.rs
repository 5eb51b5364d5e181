//! Value domains shared by information objects.
//!
//! Fixed-width wire fields narrow their inputs with the masking rules below;
//! the `try_*` variants reject instead of narrowing.
//!
//! | Field | Width | Narrowing |
//! |-------|-------|-----------|
//! | Step position | 7 bit | two's complement wrap (64 → -64, -65 → 63) |
//! | Normalized value | 16 bit | round to nearest, saturate |
//! | QU (SCO/DCO/RCO) | 5 bit | `qu & 0x1F` |
//! | QL (QOS) | 7 bit | `ql & 0x7F` |

use crate::error::{Iec60870Error, Result};

/// Double-point information value (DPI).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum DoublePointValue {
    /// Intermediate state (00)
    #[default]
    Intermediate = 0,
    /// Determined OFF (01)
    Off = 1,
    /// Determined ON (10)
    On = 2,
    /// Indeterminate or faulty (11)
    Indeterminate = 3,
}

impl DoublePointValue {
    /// Parse from byte (lower 2 bits).
    #[inline]
    pub const fn from_u8(value: u8) -> Self {
        match value & 0x03 {
            0 => Self::Intermediate,
            1 => Self::Off,
            2 => Self::On,
            _ => Self::Indeterminate,
        }
    }

    /// Parse from byte, rejecting values outside the 2-bit field.
    #[inline]
    pub fn try_from_u8(value: u8) -> Result<Self> {
        if value > 0x03 {
            return Err(Iec60870Error::out_of_range("double point value", value));
        }
        Ok(Self::from_u8(value))
    }

    /// Convert to raw 2-bit value.
    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Convert to bool if the state is determined.
    #[inline]
    pub const fn as_bool(self) -> Option<bool> {
        match self {
            Self::Off => Some(false),
            Self::On => Some(true),
            _ => None,
        }
    }
}

/// Regulating step command state (RCS).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum StepCommandValue {
    /// Next step lower
    Lower = 1,
    /// Next step higher
    Higher = 2,
}

impl StepCommandValue {
    /// Parse from byte (lower 2 bits). 0 and 3 are not permitted.
    #[inline]
    pub fn from_u8(value: u8) -> Result<Self> {
        match value & 0x03 {
            1 => Ok(Self::Lower),
            2 => Ok(Self::Higher),
            other => Err(Iec60870Error::InvalidValue {
                field: "step command",
                value: other,
            }),
        }
    }

    /// Convert to raw 2-bit value.
    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

/// Smallest step position.
pub const STEP_POSITION_MIN: i32 = -64;

/// Largest step position.
pub const STEP_POSITION_MAX: i32 = 63;

/// Narrow a step position into the 7-bit two's complement range.
#[inline]
pub const fn wrap_step_position(value: i32) -> i8 {
    (((value & 0x7F) as u8) << 1) as i8 >> 1
}

/// Validate a step position without narrowing.
#[inline]
pub fn check_step_position(value: i32) -> Result<i8> {
    if !(STEP_POSITION_MIN..=STEP_POSITION_MAX).contains(&value) {
        return Err(Iec60870Error::out_of_range("step position", value));
    }
    Ok(value as i8)
}

/// Pack a step position and transient flag into a VTI byte.
#[inline]
pub const fn encode_vti(value: i8, transient: bool) -> u8 {
    ((value as u8) & 0x7F) | if transient { 0x80 } else { 0 }
}

/// Unpack a VTI byte into step position and transient flag.
#[inline]
pub const fn decode_vti(vti: u8) -> (i8, bool) {
    (wrap_step_position(vti as i32), (vti & 0x80) != 0)
}

/// Scale factor between a normalized value and its 16-bit wire form.
pub const NORMALIZED_SCALE: f32 = 32768.0;

/// Convert a normalized value in [-1.0, 1.0) to its 16-bit wire form.
///
/// Rounds to the nearest representable fraction and saturates at the
/// range ends. NaN maps to 0.
#[inline]
pub fn normalized_to_raw(value: f32) -> i16 {
    let scaled = (value * NORMALIZED_SCALE).round();
    if scaled.is_nan() {
        0
    } else if scaled >= i16::MAX as f32 {
        i16::MAX
    } else if scaled <= i16::MIN as f32 {
        i16::MIN
    } else {
        scaled as i16
    }
}

/// Convert a 16-bit wire form back to a normalized value.
#[inline]
pub fn raw_to_normalized(raw: i16) -> f32 {
    raw as f32 / NORMALIZED_SCALE
}

/// Validate a normalized value without saturating.
#[inline]
pub fn check_normalized(value: f32) -> Result<i16> {
    let upper = i16::MAX as f32 / NORMALIZED_SCALE;
    if value.is_nan() || !(-1.0..=upper).contains(&value) {
        return Err(Iec60870Error::out_of_range("normalized value", value));
    }
    Ok(normalized_to_raw(value))
}

/// Qualifier of command (QU) for single, double and step commands.
///
/// Packed into the command byte as bit 7 = S/E, bits 2..6 = QU; bits 0..1
/// hold the command state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "CommandQualifierFields")
)]
pub struct CommandQualifier {
    select: bool,
    qu: u8,
}

impl CommandQualifier {
    /// Largest QU value.
    pub const QU_MAX: u8 = 0x1F;

    /// No additional definition
    pub const QU_DEFAULT: u8 = 0;
    /// Short pulse duration
    pub const QU_SHORT_PULSE: u8 = 1;
    /// Long pulse duration
    pub const QU_LONG_PULSE: u8 = 2;
    /// Persistent output
    pub const QU_PERSISTENT: u8 = 3;

    /// Create a qualifier, masking QU to 5 bits.
    #[inline]
    pub const fn new(select: bool, qu: u8) -> Self {
        Self {
            select,
            qu: qu & Self::QU_MAX,
        }
    }

    /// Create a qualifier, rejecting QU values above 31.
    #[inline]
    pub fn try_new(select: bool, qu: u8) -> Result<Self> {
        if qu > Self::QU_MAX {
            return Err(Iec60870Error::out_of_range("qualifier of command", qu));
        }
        Ok(Self { select, qu })
    }

    /// Select (true) or execute (false).
    #[inline]
    pub const fn is_select(&self) -> bool {
        self.select
    }

    /// Qualifier of command (0..31).
    #[inline]
    pub const fn qu(&self) -> u8 {
        self.qu
    }

    /// Pack with a 2-bit command state into a command byte.
    #[inline]
    pub const fn encode(&self, state: u8) -> u8 {
        (state & 0x03) | ((self.qu & Self::QU_MAX) << 2) | if self.select { 0x80 } else { 0 }
    }

    /// Unpack from a command byte, returning the qualifier and raw state bits.
    #[inline]
    pub const fn decode(byte: u8) -> (Self, u8) {
        (
            Self {
                select: (byte & 0x80) != 0,
                qu: (byte >> 2) & Self::QU_MAX,
            },
            byte & 0x03,
        )
    }
}

// Deserialized fields go through `new`, so QU never leaves its 5 bits.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct CommandQualifierFields {
    select: bool,
    qu: u8,
}

#[cfg(feature = "serde")]
impl From<CommandQualifierFields> for CommandQualifier {
    fn from(fields: CommandQualifierFields) -> Self {
        Self::new(fields.select, fields.qu)
    }
}

/// Qualifier of set-point command (QOS).
///
/// Wire byte: bit 7 = S/E, bits 0..6 = QL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "SetpointQualifierFields")
)]
pub struct SetpointQualifier {
    select: bool,
    ql: u8,
}

impl SetpointQualifier {
    /// Largest QL value.
    pub const QL_MAX: u8 = 0x7F;

    /// Create a qualifier, masking QL to 7 bits.
    #[inline]
    pub const fn new(select: bool, ql: u8) -> Self {
        Self {
            select,
            ql: ql & Self::QL_MAX,
        }
    }

    /// Create a qualifier, rejecting QL values above 127.
    #[inline]
    pub fn try_new(select: bool, ql: u8) -> Result<Self> {
        if ql > Self::QL_MAX {
            return Err(Iec60870Error::out_of_range("qualifier of set-point", ql));
        }
        Ok(Self { select, ql })
    }

    /// Select (true) or execute (false).
    #[inline]
    pub const fn is_select(&self) -> bool {
        self.select
    }

    /// Qualifier of set-point (0..127).
    #[inline]
    pub const fn ql(&self) -> u8 {
        self.ql
    }

    /// Encode to QOS byte.
    #[inline]
    pub const fn as_u8(&self) -> u8 {
        (self.ql & Self::QL_MAX) | if self.select { 0x80 } else { 0 }
    }

    /// Parse from QOS byte.
    #[inline]
    pub const fn from_u8(byte: u8) -> Self {
        Self::new((byte & 0x80) != 0, byte)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct SetpointQualifierFields {
    select: bool,
    ql: u8,
}

#[cfg(feature = "serde")]
impl From<SetpointQualifierFields> for SetpointQualifier {
    fn from(fields: SetpointQualifierFields) -> Self {
        Self::new(fields.select, fields.ql)
    }
}

/// Qualifier of interrogation (QOI) values.
pub mod qoi {
    /// Station (global) interrogation
    pub const STATION: u8 = 20;

    /// Group 1 interrogation; groups 1..16 are `GROUP_1 + n - 1`.
    pub const GROUP_1: u8 = 21;

    /// Group 16 interrogation
    pub const GROUP_16: u8 = 36;

    /// QOI for interrogation of `group` (1..=16).
    #[inline]
    pub const fn group(group: u8) -> Option<u8> {
        match group {
            1..=16 => Some(GROUP_1 + group - 1),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_qualifier_encode_stays_in_field() {
        // qu wider than 5 bits must not reach the S/E bit
        let cq = CommandQualifier { select: false, qu: 63 };
        let byte = cq.encode(0x01);
        assert_eq!(byte, (31 << 2) | 0x01);
        let (decoded, state) = CommandQualifier::decode(byte);
        assert!(!decoded.is_select());
        assert_eq!(decoded.qu(), 31);
        assert_eq!(state, 0x01);

        let sq = SetpointQualifier { select: false, ql: 0xFF };
        assert_eq!(sq.as_u8(), 0x7F);
        assert!(!SetpointQualifier::from_u8(sq.as_u8()).is_select());
    }

    #[test]
    fn test_double_point_value() {
        assert_eq!(DoublePointValue::from_u8(0), DoublePointValue::Intermediate);
        assert_eq!(DoublePointValue::from_u8(1), DoublePointValue::Off);
        assert_eq!(DoublePointValue::from_u8(2), DoublePointValue::On);
        assert_eq!(DoublePointValue::from_u8(3), DoublePointValue::Indeterminate);
        // only the low two bits are significant
        assert_eq!(DoublePointValue::from_u8(0x86), DoublePointValue::On);
        assert!(DoublePointValue::try_from_u8(4).is_err());

        assert_eq!(DoublePointValue::On.as_bool(), Some(true));
        assert_eq!(DoublePointValue::Off.as_bool(), Some(false));
        assert_eq!(DoublePointValue::Intermediate.as_bool(), None);
        assert_eq!(DoublePointValue::Indeterminate.as_bool(), None);
    }

    #[test]
    fn test_step_command_value() {
        assert_eq!(StepCommandValue::from_u8(1).unwrap(), StepCommandValue::Lower);
        assert_eq!(StepCommandValue::from_u8(2).unwrap(), StepCommandValue::Higher);
        assert_eq!(
            StepCommandValue::from_u8(0),
            Err(Iec60870Error::InvalidValue {
                field: "step command",
                value: 0
            })
        );
        assert!(StepCommandValue::from_u8(3).is_err());
    }

    #[test]
    fn test_step_position_wrap_rule() {
        assert_eq!(wrap_step_position(63), 63);
        assert_eq!(wrap_step_position(-64), -64);
        assert_eq!(wrap_step_position(64), -64);
        assert_eq!(wrap_step_position(-65), 63);
        assert_eq!(wrap_step_position(128), 0);

        assert!(check_step_position(64).is_err());
        assert!(check_step_position(-65).is_err());
        assert_eq!(check_step_position(-10).unwrap(), -10);
    }

    #[test]
    fn test_vti_packing() {
        assert_eq!(encode_vti(-1, false), 0x7F);
        assert_eq!(encode_vti(-64, true), 0xC0);
        assert_eq!(encode_vti(5, true), 0x85);
        assert_eq!(decode_vti(0xC0), (-64, true));
        assert_eq!(decode_vti(0x3F), (63, false));
    }

    #[test]
    fn test_normalized_conversion() {
        assert_eq!(normalized_to_raw(0.0), 0);
        assert_eq!(normalized_to_raw(-1.0), i16::MIN);
        assert_eq!(normalized_to_raw(0.5), 16384);
        // saturates at the open upper bound
        assert_eq!(normalized_to_raw(1.0), i16::MAX);
        assert_eq!(normalized_to_raw(7.5), i16::MAX);
        assert_eq!(normalized_to_raw(-3.0), i16::MIN);
        assert_eq!(normalized_to_raw(f32::NAN), 0);

        assert_eq!(raw_to_normalized(16384), 0.5);
        assert!(check_normalized(1.0).is_err());
        assert!(check_normalized(-1.0).is_ok());
    }

    #[test]
    fn test_normalized_near_one_error_bound() {
        let v = 1.0 - 1.0 / NORMALIZED_SCALE;
        let back = raw_to_normalized(normalized_to_raw(v));
        assert!((back - v).abs() <= 2.0 / 65536.0);
    }

    #[test]
    fn test_command_qualifier() {
        let q = CommandQualifier::new(true, 5);
        assert!(q.is_select());
        assert_eq!(q.qu(), 5);
        assert_eq!(q.encode(1), 0x80 | (5 << 2) | 1);

        // qu masked to 5 bits: 200 = 0b1100_1000 -> 0b0_1000
        assert_eq!(CommandQualifier::new(false, 200).qu(), 8);
        assert!(CommandQualifier::try_new(false, 32).is_err());

        let (decoded, state) = CommandQualifier::decode(0x80 | (5 << 2) | 1);
        assert_eq!(decoded, q);
        assert_eq!(state, 1);
    }

    #[test]
    fn test_setpoint_qualifier() {
        let q = SetpointQualifier::new(true, 200);
        assert_eq!(q.ql(), 72);
        assert!(q.is_select());
        assert_eq!(q.as_u8(), 0x80 | 72);
        assert_eq!(SetpointQualifier::from_u8(0x80 | 72), q);
        assert!(SetpointQualifier::try_new(true, 128).is_err());
    }

    #[test]
    fn test_qoi_group() {
        assert_eq!(qoi::group(1), Some(qoi::GROUP_1));
        assert_eq!(qoi::group(16), Some(qoi::GROUP_16));
        assert_eq!(qoi::group(0), None);
        assert_eq!(qoi::group(17), None);
    }

    proptest! {
        #[test]
        fn step_position_roundtrip(p in -64i32..=63, t in any::<bool>()) {
            let (value, transient) = decode_vti(encode_vti(wrap_step_position(p), t));
            prop_assert_eq!(value as i32, p);
            prop_assert_eq!(transient, t);
        }

        #[test]
        fn step_position_wrap_is_deterministic(p in any::<i32>()) {
            let wrapped = wrap_step_position(p) as i32;
            prop_assert!((-64..=63).contains(&wrapped));
            prop_assert_eq!(wrapped.rem_euclid(128), p.rem_euclid(128));
        }

        #[test]
        fn normalized_error_bounded(v in -1.0f32..0.99996) {
            let back = raw_to_normalized(normalized_to_raw(v));
            prop_assert!((back - v).abs() <= 1.0 / 65536.0 + f32::EPSILON);
        }

        #[test]
        fn command_qualifier_roundtrip(select in any::<bool>(), qu in 0u8..=31, state in 0u8..=3) {
            let q = CommandQualifier::new(select, qu);
            let (decoded, decoded_state) = CommandQualifier::decode(q.encode(state));
            prop_assert_eq!(decoded, q);
            prop_assert_eq!(decoded_state, state);
        }
    }
}
