//! Process information in monitoring direction.
//!
//! | Type | Element layout |
//! |------|----------------|
//! | [`SinglePointInformation`] | SIQ |
//! | [`DoublePointInformation`] | DIQ |
//! | [`StepPositionInformation`] | VTI + QDS |
//! | [`BitString32`] | BSI (4) + QDS |
//! | [`MeasuredValueNormalized`] | NVA (2) + QDS |
//! | [`MeasuredValueScaled`] | SVA (2) + QDS |
//! | [`MeasuredValueShort`] | IEEE STD 754 (4) + QDS |
//! | [`IntegratedTotals`] | BCR (5) |

use bytes::{Buf, BufMut};

use super::InformationElement;
use crate::error::Result;
use crate::types::{
    check_normalized, check_step_position, decode_vti, encode_vti, normalized_to_raw,
    raw_to_normalized, wrap_step_position, BinaryCounterReading, DoublePointValue, Ioa,
    QualityDescriptor, TypeId,
};

/// Single-point information (M_SP_NA_1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "SinglePointFields")
)]
pub struct SinglePointInformation {
    ioa: Ioa,
    value: bool,
    quality: QualityDescriptor,
}

impl SinglePointInformation {
    /// Create a new single-point object. OV is not representable in SIQ and
    /// is cleared from `quality`.
    pub fn new(ioa: impl Into<Ioa>, value: bool, quality: QualityDescriptor) -> Self {
        Self {
            ioa: ioa.into(),
            value,
            quality: quality.for_point(),
        }
    }

    /// Overwrite this instance in place.
    pub fn reset(&mut self, ioa: impl Into<Ioa>, value: bool, quality: QualityDescriptor) -> &mut Self {
        *self = Self::new(ioa, value, quality);
        self
    }

    pub fn value(&self) -> bool {
        self.value
    }

    pub fn quality(&self) -> QualityDescriptor {
        self.quality
    }
}

impl InformationElement for SinglePointInformation {
    const TYPE_ID: TypeId = TypeId::SinglePoint;
    const ENCODED_LEN: usize = 1;

    fn object_address(&self) -> Ioa {
        self.ioa
    }

    fn encode_element<B: BufMut>(&self, buf: &mut B) {
        buf.put_u8(self.value as u8 | self.quality.for_point().bits());
    }

    fn decode_element<B: Buf>(ioa: Ioa, buf: &mut B) -> Result<Self> {
        let siq = buf.get_u8();
        Ok(Self::new(ioa, (siq & 0x01) != 0, QualityDescriptor::from_bits(siq)))
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct SinglePointFields {
    ioa: Ioa,
    value: bool,
    quality: QualityDescriptor,
}

#[cfg(feature = "serde")]
impl From<SinglePointFields> for SinglePointInformation {
    fn from(f: SinglePointFields) -> Self {
        Self::new(f.ioa, f.value, f.quality)
    }
}

/// Double-point information (M_DP_NA_1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "DoublePointFields")
)]
pub struct DoublePointInformation {
    ioa: Ioa,
    value: DoublePointValue,
    quality: QualityDescriptor,
}

impl DoublePointInformation {
    /// Create a new double-point object. OV is cleared from `quality`.
    pub fn new(ioa: impl Into<Ioa>, value: DoublePointValue, quality: QualityDescriptor) -> Self {
        Self {
            ioa: ioa.into(),
            value,
            quality: quality.for_point(),
        }
    }

    /// Overwrite this instance in place.
    pub fn reset(
        &mut self,
        ioa: impl Into<Ioa>,
        value: DoublePointValue,
        quality: QualityDescriptor,
    ) -> &mut Self {
        *self = Self::new(ioa, value, quality);
        self
    }

    pub fn value(&self) -> DoublePointValue {
        self.value
    }

    pub fn quality(&self) -> QualityDescriptor {
        self.quality
    }
}

impl InformationElement for DoublePointInformation {
    const TYPE_ID: TypeId = TypeId::DoublePoint;
    const ENCODED_LEN: usize = 1;

    fn object_address(&self) -> Ioa {
        self.ioa
    }

    fn encode_element<B: BufMut>(&self, buf: &mut B) {
        buf.put_u8(self.value.as_u8() | self.quality.for_point().bits());
    }

    fn decode_element<B: Buf>(ioa: Ioa, buf: &mut B) -> Result<Self> {
        let diq = buf.get_u8();
        Ok(Self::new(
            ioa,
            DoublePointValue::from_u8(diq),
            QualityDescriptor::from_bits(diq),
        ))
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct DoublePointFields {
    ioa: Ioa,
    value: DoublePointValue,
    quality: QualityDescriptor,
}

#[cfg(feature = "serde")]
impl From<DoublePointFields> for DoublePointInformation {
    fn from(f: DoublePointFields) -> Self {
        Self::new(f.ioa, f.value, f.quality)
    }
}

/// Step position information (M_ST_NA_1).
///
/// Position range is -64..=63; the transient flag marks equipment that is
/// still moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "StepPositionFields")
)]
pub struct StepPositionInformation {
    ioa: Ioa,
    value: i8,
    transient: bool,
    quality: QualityDescriptor,
}

impl StepPositionInformation {
    /// Create a new step position object.
    ///
    /// Out-of-range positions wrap in 7-bit two's complement (64 → -64,
    /// -65 → 63).
    pub fn new(ioa: impl Into<Ioa>, value: i32, transient: bool, quality: QualityDescriptor) -> Self {
        Self {
            ioa: ioa.into(),
            value: wrap_step_position(value),
            transient,
            quality,
        }
    }

    /// Create a new step position object, rejecting positions outside
    /// -64..=63 and an address wider than 24 bits.
    pub fn try_new(ioa: u32, value: i32, transient: bool, quality: QualityDescriptor) -> Result<Self> {
        Ok(Self {
            ioa: Ioa::try_new(ioa)?,
            value: check_step_position(value)?,
            transient,
            quality,
        })
    }

    /// Overwrite this instance in place.
    pub fn reset(
        &mut self,
        ioa: impl Into<Ioa>,
        value: i32,
        transient: bool,
        quality: QualityDescriptor,
    ) -> &mut Self {
        *self = Self::new(ioa, value, transient, quality);
        self
    }

    /// Step position (-64..=63).
    pub fn value(&self) -> i32 {
        self.value as i32
    }

    pub fn is_transient(&self) -> bool {
        self.transient
    }

    pub fn quality(&self) -> QualityDescriptor {
        self.quality
    }
}

impl InformationElement for StepPositionInformation {
    const TYPE_ID: TypeId = TypeId::StepPosition;
    const ENCODED_LEN: usize = 2;

    fn object_address(&self) -> Ioa {
        self.ioa
    }

    fn encode_element<B: BufMut>(&self, buf: &mut B) {
        buf.put_u8(encode_vti(self.value, self.transient));
        buf.put_u8(self.quality.bits());
    }

    fn decode_element<B: Buf>(ioa: Ioa, buf: &mut B) -> Result<Self> {
        let (value, transient) = decode_vti(buf.get_u8());
        let quality = QualityDescriptor::from_bits(buf.get_u8());
        Ok(Self {
            ioa,
            value,
            transient,
            quality,
        })
    }
}

// Positions outside -64..=63 wrap exactly as in `new`.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct StepPositionFields {
    ioa: Ioa,
    value: i32,
    transient: bool,
    quality: QualityDescriptor,
}

#[cfg(feature = "serde")]
impl From<StepPositionFields> for StepPositionInformation {
    fn from(f: StepPositionFields) -> Self {
        Self::new(f.ioa, f.value, f.transient, f.quality)
    }
}

/// Bitstring of 32 bit (M_BO_NA_1).
///
/// The pattern is carried as-is without interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BitString32 {
    ioa: Ioa,
    value: u32,
    quality: QualityDescriptor,
}

impl BitString32 {
    pub fn new(ioa: impl Into<Ioa>, value: u32, quality: QualityDescriptor) -> Self {
        Self {
            ioa: ioa.into(),
            value,
            quality,
        }
    }

    /// Overwrite this instance in place.
    pub fn reset(&mut self, ioa: impl Into<Ioa>, value: u32, quality: QualityDescriptor) -> &mut Self {
        *self = Self::new(ioa, value, quality);
        self
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn quality(&self) -> QualityDescriptor {
        self.quality
    }
}

impl InformationElement for BitString32 {
    const TYPE_ID: TypeId = TypeId::Bitstring32;
    const ENCODED_LEN: usize = 5;

    fn object_address(&self) -> Ioa {
        self.ioa
    }

    fn encode_element<B: BufMut>(&self, buf: &mut B) {
        buf.put_u32_le(self.value);
        buf.put_u8(self.quality.bits());
    }

    fn decode_element<B: Buf>(ioa: Ioa, buf: &mut B) -> Result<Self> {
        let value = buf.get_u32_le();
        let quality = QualityDescriptor::from_bits(buf.get_u8());
        Ok(Self::new(ioa, value, quality))
    }
}

/// Measured value, normalized (M_ME_NA_1).
///
/// Stored in its 16-bit wire form, so [`value`](Self::value) returns the
/// quantized fraction rather than the exact input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeasuredValueNormalized {
    ioa: Ioa,
    raw: i16,
    quality: QualityDescriptor,
}

impl MeasuredValueNormalized {
    /// Create a new normalized measured value, rounding `value` to the
    /// nearest 1/32768 and saturating to [-1.0, 1.0).
    pub fn new(ioa: impl Into<Ioa>, value: f32, quality: QualityDescriptor) -> Self {
        Self::from_raw(ioa, normalized_to_raw(value), quality)
    }

    /// Create a new normalized measured value, rejecting values outside
    /// [-1.0, 1.0 - 1/32768].
    pub fn try_new(ioa: u32, value: f32, quality: QualityDescriptor) -> Result<Self> {
        Ok(Self {
            ioa: Ioa::try_new(ioa)?,
            raw: check_normalized(value)?,
            quality,
        })
    }

    /// Create from the 16-bit wire form.
    pub fn from_raw(ioa: impl Into<Ioa>, raw: i16, quality: QualityDescriptor) -> Self {
        Self {
            ioa: ioa.into(),
            raw,
            quality,
        }
    }

    /// Overwrite this instance in place.
    pub fn reset(&mut self, ioa: impl Into<Ioa>, value: f32, quality: QualityDescriptor) -> &mut Self {
        *self = Self::new(ioa, value, quality);
        self
    }

    pub fn value(&self) -> f32 {
        raw_to_normalized(self.raw)
    }

    pub fn set_value(&mut self, value: f32) {
        self.raw = normalized_to_raw(value);
    }

    /// 16-bit wire form.
    pub fn raw_value(&self) -> i16 {
        self.raw
    }

    pub fn set_raw_value(&mut self, raw: i16) {
        self.raw = raw;
    }

    pub fn quality(&self) -> QualityDescriptor {
        self.quality
    }

    pub fn set_quality(&mut self, quality: QualityDescriptor) {
        self.quality = quality;
    }
}

impl InformationElement for MeasuredValueNormalized {
    const TYPE_ID: TypeId = TypeId::MeasuredNormalized;
    const ENCODED_LEN: usize = 3;

    fn object_address(&self) -> Ioa {
        self.ioa
    }

    fn encode_element<B: BufMut>(&self, buf: &mut B) {
        buf.put_i16_le(self.raw);
        buf.put_u8(self.quality.bits());
    }

    fn decode_element<B: Buf>(ioa: Ioa, buf: &mut B) -> Result<Self> {
        let raw = buf.get_i16_le();
        let quality = QualityDescriptor::from_bits(buf.get_u8());
        Ok(Self::from_raw(ioa, raw, quality))
    }
}

/// Measured value, scaled (M_ME_NB_1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeasuredValueScaled {
    ioa: Ioa,
    value: i16,
    quality: QualityDescriptor,
}

impl MeasuredValueScaled {
    pub fn new(ioa: impl Into<Ioa>, value: i16, quality: QualityDescriptor) -> Self {
        Self {
            ioa: ioa.into(),
            value,
            quality,
        }
    }

    /// Overwrite this instance in place.
    pub fn reset(&mut self, ioa: impl Into<Ioa>, value: i16, quality: QualityDescriptor) -> &mut Self {
        *self = Self::new(ioa, value, quality);
        self
    }

    pub fn value(&self) -> i16 {
        self.value
    }

    pub fn set_value(&mut self, value: i16) {
        self.value = value;
    }

    pub fn quality(&self) -> QualityDescriptor {
        self.quality
    }

    pub fn set_quality(&mut self, quality: QualityDescriptor) {
        self.quality = quality;
    }
}

impl InformationElement for MeasuredValueScaled {
    const TYPE_ID: TypeId = TypeId::MeasuredScaled;
    const ENCODED_LEN: usize = 3;

    fn object_address(&self) -> Ioa {
        self.ioa
    }

    fn encode_element<B: BufMut>(&self, buf: &mut B) {
        buf.put_i16_le(self.value);
        buf.put_u8(self.quality.bits());
    }

    fn decode_element<B: Buf>(ioa: Ioa, buf: &mut B) -> Result<Self> {
        let value = buf.get_i16_le();
        let quality = QualityDescriptor::from_bits(buf.get_u8());
        Ok(Self::new(ioa, value, quality))
    }
}

/// Measured value, short floating point (M_ME_NC_1).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeasuredValueShort {
    ioa: Ioa,
    value: f32,
    quality: QualityDescriptor,
}

impl MeasuredValueShort {
    pub fn new(ioa: impl Into<Ioa>, value: f32, quality: QualityDescriptor) -> Self {
        Self {
            ioa: ioa.into(),
            value,
            quality,
        }
    }

    /// Overwrite this instance in place.
    pub fn reset(&mut self, ioa: impl Into<Ioa>, value: f32, quality: QualityDescriptor) -> &mut Self {
        *self = Self::new(ioa, value, quality);
        self
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn set_value(&mut self, value: f32) {
        self.value = value;
    }

    pub fn quality(&self) -> QualityDescriptor {
        self.quality
    }

    pub fn set_quality(&mut self, quality: QualityDescriptor) {
        self.quality = quality;
    }
}

impl InformationElement for MeasuredValueShort {
    const TYPE_ID: TypeId = TypeId::MeasuredFloat;
    const ENCODED_LEN: usize = 5;

    fn object_address(&self) -> Ioa {
        self.ioa
    }

    fn encode_element<B: BufMut>(&self, buf: &mut B) {
        buf.put_f32_le(self.value);
        buf.put_u8(self.quality.bits());
    }

    fn decode_element<B: Buf>(ioa: Ioa, buf: &mut B) -> Result<Self> {
        let value = buf.get_f32_le();
        let quality = QualityDescriptor::from_bits(buf.get_u8());
        Ok(Self::new(ioa, value, quality))
    }
}

/// Integrated totals (M_IT_NA_1).
///
/// Quality is carried inside the binary counter reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntegratedTotals {
    ioa: Ioa,
    bcr: BinaryCounterReading,
}

impl IntegratedTotals {
    pub fn new(ioa: impl Into<Ioa>, bcr: BinaryCounterReading) -> Self {
        Self {
            ioa: ioa.into(),
            bcr,
        }
    }

    /// Overwrite this instance in place.
    pub fn reset(&mut self, ioa: impl Into<Ioa>, bcr: BinaryCounterReading) -> &mut Self {
        *self = Self::new(ioa, bcr);
        self
    }

    pub fn bcr(&self) -> BinaryCounterReading {
        self.bcr
    }

    pub fn set_bcr(&mut self, bcr: BinaryCounterReading) {
        self.bcr = bcr;
    }
}

impl InformationElement for IntegratedTotals {
    const TYPE_ID: TypeId = TypeId::IntegratedTotals;
    const ENCODED_LEN: usize = BinaryCounterReading::ENCODED_LEN;

    fn object_address(&self) -> Ioa {
        self.ioa
    }

    fn encode_element<B: BufMut>(&self, buf: &mut B) {
        buf.put_slice(&self.bcr.to_bytes());
    }

    fn decode_element<B: Buf>(ioa: Ioa, buf: &mut B) -> Result<Self> {
        let mut raw = [0u8; BinaryCounterReading::ENCODED_LEN];
        buf.copy_to_slice(&mut raw);
        Ok(Self::new(ioa, BinaryCounterReading::from_bytes(&raw)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_single_point_encode_drops_overflow() {
        let sp = SinglePointInformation {
            ioa: Ioa::new(1),
            value: false,
            quality: QualityDescriptor::OVERFLOW,
        };
        assert_eq!(encode(&sp)[3], 0x00);
    }

    fn encode<T: InformationElement>(object: &T) -> Vec<u8> {
        let mut buf = Vec::new();
        object.encode(&mut buf);
        buf
    }

    #[test]
    fn test_single_point() {
        let sp = SinglePointInformation::new(1001, true, QualityDescriptor::INVALID);
        assert_eq!(sp.object_address().value(), 1001);
        assert!(sp.value());
        assert_eq!(sp.quality(), QualityDescriptor::INVALID);
        assert_eq!(sp.type_id(), TypeId::SinglePoint);
        assert_eq!(encode(&sp), vec![0xE9, 0x03, 0x00, 0x81]);
    }

    #[test]
    fn test_single_point_clears_overflow() {
        let sp = SinglePointInformation::new(1, false, QualityDescriptor::from_bits(0xFF));
        assert_eq!(sp.quality().bits(), 0xF0);
        assert_eq!(encode(&sp)[3], 0xF0);
    }

    #[test]
    fn test_single_point_decode_ignores_reserved_bits() {
        let mut data: &[u8] = &[0x01, 0x00, 0x00, 0x0F];
        let sp = SinglePointInformation::decode(&mut data).unwrap();
        assert!(sp.value());
        assert!(sp.quality().is_good());
    }

    #[test]
    fn test_double_point() {
        for raw in 0u8..=3 {
            let value = DoublePointValue::from_u8(raw);
            let dp = DoublePointInformation::new(7, value, QualityDescriptor::BLOCKED);
            assert_eq!(dp.value().as_u8(), raw);

            let buf = encode(&dp);
            assert_eq!(buf[3], 0x10 | raw);
            let decoded = DoublePointInformation::decode(&mut buf.as_slice()).unwrap();
            assert_eq!(decoded, dp);
        }
    }

    #[test]
    fn test_step_position() {
        let st = StepPositionInformation::new(20, -5, true, QualityDescriptor::GOOD);
        assert_eq!(st.value(), -5);
        assert!(st.is_transient());
        assert_eq!(encode(&st), vec![20, 0, 0, 0x80 | 0x7B, 0x00]);

        assert_eq!(StepPositionInformation::new(20, 64, false, QualityDescriptor::GOOD).value(), -64);
        assert_eq!(StepPositionInformation::new(20, -65, false, QualityDescriptor::GOOD).value(), 63);
    }

    #[test]
    fn test_step_position_try_new() {
        assert!(StepPositionInformation::try_new(1, 63, false, QualityDescriptor::GOOD).is_ok());
        assert!(StepPositionInformation::try_new(1, 64, false, QualityDescriptor::GOOD)
            .unwrap_err()
            .is_validation_error());
        assert!(StepPositionInformation::try_new(0x0100_0000, 0, false, QualityDescriptor::GOOD).is_err());
    }

    #[test]
    fn test_bitstring32() {
        let bo = BitString32::new(3, 0x1234_5678, QualityDescriptor::NON_TOPICAL);
        assert_eq!(encode(&bo), vec![3, 0, 0, 0x78, 0x56, 0x34, 0x12, 0x40]);
        assert_eq!(BitString32::decode(&mut encode(&bo).as_slice()).unwrap(), bo);
    }

    #[test]
    fn test_measured_normalized() {
        let mut me = MeasuredValueNormalized::new(9, 0.5, QualityDescriptor::GOOD);
        assert_eq!(me.raw_value(), 16384);
        assert_eq!(me.value(), 0.5);
        assert_eq!(encode(&me), vec![9, 0, 0, 0x00, 0x40, 0x00]);

        me.set_value(-1.0);
        me.set_quality(QualityDescriptor::OVERFLOW);
        assert_eq!(me.raw_value(), i16::MIN);
        assert_eq!(me.quality(), QualityDescriptor::OVERFLOW);

        assert!(MeasuredValueNormalized::try_new(9, 1.0, QualityDescriptor::GOOD).is_err());
    }

    #[test]
    fn test_measured_normalized_near_one() {
        let v = 1.0 - 1.0 / 32768.0;
        let me = MeasuredValueNormalized::new(1, v, QualityDescriptor::GOOD);
        let decoded = MeasuredValueNormalized::decode(&mut encode(&me).as_slice()).unwrap();
        assert!((decoded.value() - v).abs() <= 2.0 / 65536.0);
    }

    #[test]
    fn test_measured_scaled_mutation() {
        let mut me = MeasuredValueScaled::new(11, -32768, QualityDescriptor::GOOD);
        assert_eq!(encode(&me), vec![11, 0, 0, 0x00, 0x80, 0x00]);

        me.set_value(32767);
        me.set_quality(QualityDescriptor::SUBSTITUTED);
        assert_eq!(me.value(), 32767);
        assert_eq!(encode(&me), vec![11, 0, 0, 0xFF, 0x7F, 0x20]);
    }

    #[test]
    fn test_measured_short_wire_exact() {
        let me = MeasuredValueShort::new(13, 23.5, QualityDescriptor::GOOD);
        let buf = encode(&me);
        assert_eq!(&buf[3..7], &23.5f32.to_le_bytes());

        let nan = MeasuredValueShort::new(13, f32::NAN, QualityDescriptor::INVALID);
        let decoded = MeasuredValueShort::decode(&mut encode(&nan).as_slice()).unwrap();
        assert_eq!(decoded.value().to_bits(), f32::NAN.to_bits());
    }

    #[test]
    fn test_integrated_totals_set_bcr() {
        let b = BinaryCounterReading::new(100, 1, false, false, false);
        let mut it = IntegratedTotals::new(5, b);
        assert_eq!(it.bcr(), b);

        let size = std::mem::size_of_val(&it);
        for i in 0..1000 {
            let b2 = BinaryCounterReading::new(i, (i % 32) as u8, i % 2 == 0, false, false);
            it.set_bcr(b2);
            assert_eq!(it.bcr(), b2);
        }
        assert_eq!(std::mem::size_of_val(&it), size);
        assert_eq!(it.object_address().value(), 5);
    }

    #[test]
    fn test_reset_returns_same_instance_without_stale_fields() {
        let mut st = StepPositionInformation::new(1, 10, true, QualityDescriptor::INVALID);
        let before: *const StepPositionInformation = &st;

        let after: *const StepPositionInformation =
            st.reset(2, -3, false, QualityDescriptor::GOOD);
        assert!(std::ptr::eq(before, after));
        assert_eq!(st, StepPositionInformation::new(2, -3, false, QualityDescriptor::GOOD));
        assert!(!st.is_transient());
        assert!(st.quality().is_good());
    }

    #[test]
    fn test_decode_short_buffer() {
        let mut data: &[u8] = &[1, 0, 0, 0x00, 0x40];
        assert!(MeasuredValueScaled::decode(&mut data).is_err());
    }

    proptest! {
        #[test]
        fn scaled_roundtrip(v in any::<i16>(), q in any::<u8>()) {
            let me = MeasuredValueScaled::new(42, v, QualityDescriptor::from_bits(q));
            let decoded = MeasuredValueScaled::decode(&mut encode(&me).as_slice()).unwrap();
            prop_assert_eq!(decoded.value(), v);
            prop_assert_eq!(decoded, me);
        }

        #[test]
        fn step_position_object_roundtrip(p in -64i32..=63, t in any::<bool>()) {
            let st = StepPositionInformation::new(1, p, t, QualityDescriptor::GOOD);
            prop_assert_eq!((st.value(), st.is_transient()), (p, t));
            let decoded = StepPositionInformation::decode(&mut encode(&st).as_slice()).unwrap();
            prop_assert_eq!(decoded, st);
        }
    }
}
