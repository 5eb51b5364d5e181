//! Information objects.
//!
//! Every concrete object type implements [`InformationElement`], which ties
//! the type to its ASDU type identifier and its wire encoding. The closed sum
//! type [`InformationObject`] holds any of them and dispatches with a single
//! exhaustive match, so codecs never inspect object structure.
//!
//! ## Construction and reuse
//!
//! - `new(..)` narrows out-of-range inputs to their wire width (the
//!   standard-compatible path).
//! - `try_new(..)` rejects inputs that would be narrowed.
//! - `reset(&mut self, ..)` overwrites an existing instance in place and
//!   returns it, leaving no field of the previous content behind.
//!
//! Objects own nothing beyond their inline fields; dropping one releases it.

use bytes::{Buf, BufMut};

use crate::error::{Iec60870Error, Result};
use crate::types::{Ioa, TypeId};

mod command;
mod monitored;
mod system;
mod time_tagged;

pub use command::*;
pub use monitored::*;
pub use system::*;
pub use time_tagged::*;

/// Wire contract shared by all information object types.
pub trait InformationElement: Sized {
    /// ASDU type identifier of this object type.
    const TYPE_ID: TypeId;

    /// Size of the information element in bytes, excluding the IOA.
    const ENCODED_LEN: usize;

    /// Information object address.
    fn object_address(&self) -> Ioa;

    /// Write the information element (without IOA).
    fn encode_element<B: BufMut>(&self, buf: &mut B);

    /// Read the information element (without IOA).
    ///
    /// `buf` must hold at least [`Self::ENCODED_LEN`] bytes; use
    /// [`decode_element_checked`](Self::decode_element_checked) otherwise.
    fn decode_element<B: Buf>(ioa: Ioa, buf: &mut B) -> Result<Self>;

    /// ASDU type identifier.
    #[inline]
    fn type_id(&self) -> TypeId {
        Self::TYPE_ID
    }

    /// Size of the object in bytes including the IOA.
    #[inline]
    fn encoded_len(&self) -> usize {
        Ioa::ENCODED_LEN + Self::ENCODED_LEN
    }

    /// Write IOA and information element.
    fn encode<B: BufMut>(&self, buf: &mut B) {
        self.object_address().write(buf);
        self.encode_element(buf);
    }

    /// Read the information element after checking the buffer length.
    fn decode_element_checked<B: Buf>(ioa: Ioa, buf: &mut B) -> Result<Self> {
        ensure_len(Self::TYPE_ID, Self::ENCODED_LEN, buf.remaining())?;
        Self::decode_element(ioa, buf)
    }

    /// Read IOA and information element.
    fn decode<B: Buf>(buf: &mut B) -> Result<Self> {
        ensure_len(
            Self::TYPE_ID,
            Ioa::ENCODED_LEN + Self::ENCODED_LEN,
            buf.remaining(),
        )?;
        let ioa = Ioa::read(buf);
        Self::decode_element(ioa, buf)
    }
}

#[inline]
pub(crate) fn ensure_len(type_id: TypeId, expected: usize, actual: usize) -> Result<()> {
    if actual < expected {
        return Err(Iec60870Error::InvalidLength {
            type_id,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Conversion between a concrete object type and [`InformationObject`].
pub trait ObjectVariant: InformationElement {
    /// Wrap into the sum type.
    fn into_object(self) -> InformationObject;

    /// Unwrap from the sum type, handing the object back on mismatch.
    fn from_object(object: InformationObject) -> std::result::Result<Self, InformationObject>;

    /// Borrow from the sum type.
    fn from_object_ref(object: &InformationObject) -> Option<&Self>;

    /// Mutably borrow from the sum type.
    fn from_object_mut(object: &mut InformationObject) -> Option<&mut Self>;
}

macro_rules! information_objects {
    ($( $(#[$doc:meta])* $variant:ident($ty:ty), )+) => {
        /// Any information object, tagged by its ASDU type identifier.
        ///
        /// Variant names match the [`TypeId`] variant of the contained type.
        #[derive(Debug, Clone, PartialEq)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub enum InformationObject {
            $( $(#[$doc])* $variant($ty), )+
        }

        impl InformationObject {
            /// ASDU type identifier.
            pub fn type_id(&self) -> TypeId {
                match self {
                    $( Self::$variant(_) => <$ty as InformationElement>::TYPE_ID, )+
                }
            }

            /// Information object address.
            pub fn object_address(&self) -> Ioa {
                match self {
                    $( Self::$variant(o) => o.object_address(), )+
                }
            }

            /// Size of the object in bytes including the IOA.
            pub fn encoded_len(&self) -> usize {
                Ioa::ENCODED_LEN + element_len(self.type_id())
            }

            /// Write IOA and information element.
            pub fn encode<B: BufMut>(&self, buf: &mut B) {
                match self {
                    $( Self::$variant(o) => o.encode(buf), )+
                }
            }

            /// Write the information element (without IOA).
            pub fn encode_element<B: BufMut>(&self, buf: &mut B) {
                match self {
                    $( Self::$variant(o) => o.encode_element(buf), )+
                }
            }

            /// Decode an object of the given type (IOA and element).
            pub fn decode<B: Buf>(type_id: TypeId, buf: &mut B) -> Result<Self> {
                match type_id {
                    $( TypeId::$variant => Ok(Self::$variant(<$ty>::decode(buf)?)), )+
                }
            }

            /// Decode the element of an object whose IOA is already known.
            pub fn decode_element<B: Buf>(type_id: TypeId, ioa: Ioa, buf: &mut B) -> Result<Self> {
                match type_id {
                    $( TypeId::$variant => Ok(Self::$variant(<$ty>::decode_element_checked(ioa, buf)?)), )+
                }
            }
        }

        /// Size of the information element of `type_id` in bytes, excluding the IOA.
        pub const fn element_len(type_id: TypeId) -> usize {
            match type_id {
                $( TypeId::$variant => <$ty as InformationElement>::ENCODED_LEN, )+
            }
        }

        $(
            impl ObjectVariant for $ty {
                #[inline]
                fn into_object(self) -> InformationObject {
                    InformationObject::$variant(self)
                }

                #[inline]
                fn from_object(object: InformationObject) -> std::result::Result<Self, InformationObject> {
                    match object {
                        InformationObject::$variant(o) => Ok(o),
                        other => Err(other),
                    }
                }

                #[inline]
                fn from_object_ref(object: &InformationObject) -> Option<&Self> {
                    match object {
                        InformationObject::$variant(o) => Some(o),
                        _ => None,
                    }
                }

                #[inline]
                fn from_object_mut(object: &mut InformationObject) -> Option<&mut Self> {
                    match object {
                        InformationObject::$variant(o) => Some(o),
                        _ => None,
                    }
                }
            }

            impl From<$ty> for InformationObject {
                #[inline]
                fn from(object: $ty) -> Self {
                    Self::$variant(object)
                }
            }
        )+
    };
}

information_objects! {
    /// M_SP_NA_1
    SinglePoint(SinglePointInformation),
    /// M_SP_TA_1
    SinglePointTime24(SinglePointWithCp24Time2a),
    /// M_DP_NA_1
    DoublePoint(DoublePointInformation),
    /// M_DP_TA_1
    DoublePointTime24(DoublePointWithCp24Time2a),
    /// M_ST_NA_1
    StepPosition(StepPositionInformation),
    /// M_ST_TA_1
    StepPositionTime24(StepPositionWithCp24Time2a),
    /// M_BO_NA_1
    Bitstring32(BitString32),
    /// M_BO_TA_1
    Bitstring32Time24(Bitstring32WithCp24Time2a),
    /// M_ME_NA_1
    MeasuredNormalized(MeasuredValueNormalized),
    /// M_ME_TA_1
    MeasuredNormalizedTime24(MeasuredValueNormalizedWithCp24Time2a),
    /// M_ME_NB_1
    MeasuredScaled(MeasuredValueScaled),
    /// M_ME_TB_1
    MeasuredScaledTime24(MeasuredValueScaledWithCp24Time2a),
    /// M_ME_NC_1
    MeasuredFloat(MeasuredValueShort),
    /// M_ME_TC_1
    MeasuredFloatTime24(MeasuredValueShortWithCp24Time2a),
    /// M_IT_NA_1
    IntegratedTotals(IntegratedTotals),
    /// M_IT_TA_1
    IntegratedTotalsTime24(IntegratedTotalsWithCp24Time2a),
    /// M_SP_TB_1
    SinglePointTime56(SinglePointWithCp56Time2a),
    /// M_DP_TB_1
    DoublePointTime56(DoublePointWithCp56Time2a),
    /// M_ST_TB_1
    StepPositionTime56(StepPositionWithCp56Time2a),
    /// M_BO_TB_1
    Bitstring32Time56(Bitstring32WithCp56Time2a),
    /// M_ME_TD_1
    MeasuredNormalizedTime56(MeasuredValueNormalizedWithCp56Time2a),
    /// M_ME_TE_1
    MeasuredScaledTime56(MeasuredValueScaledWithCp56Time2a),
    /// M_ME_TF_1
    MeasuredFloatTime56(MeasuredValueShortWithCp56Time2a),
    /// M_IT_TB_1
    IntegratedTotalsTime56(IntegratedTotalsWithCp56Time2a),
    /// C_SC_NA_1
    SingleCommand(SingleCommand),
    /// C_DC_NA_1
    DoubleCommand(DoubleCommand),
    /// C_RC_NA_1
    RegulatingStep(StepCommand),
    /// C_SE_NA_1
    SetpointNormalized(SetpointCommandNormalized),
    /// C_SE_NB_1
    SetpointScaled(SetpointCommandScaled),
    /// C_SE_NC_1
    SetpointFloat(SetpointCommandShort),
    /// C_BO_NA_1
    Bitstring32Command(Bitstring32Command),
    /// C_SC_TA_1
    SingleCommandTime56(SingleCommandWithCp56Time2a),
    /// C_IC_NA_1
    InterrogationCommand(InterrogationCommand),
    /// C_RD_NA_1
    ReadCommand(ReadCommand),
    /// C_CS_NA_1
    ClockSync(ClockSynchronizationCommand),
}

impl InformationObject {
    /// Borrow the contained object as `T`.
    #[inline]
    pub fn downcast_ref<T: ObjectVariant>(&self) -> Option<&T> {
        T::from_object_ref(self)
    }

    /// Mutably borrow the contained object as `T`.
    #[inline]
    pub fn downcast_mut<T: ObjectVariant>(&mut self) -> Option<&mut T> {
        T::from_object_mut(self)
    }

    /// Unwrap the contained object as `T`, handing `self` back on mismatch.
    #[inline]
    pub fn downcast<T: ObjectVariant>(self) -> std::result::Result<T, Self> {
        T::from_object(self)
    }
}

impl std::fmt::Display for InformationObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] IOA={}", self.type_id(), self.object_address())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::types::{
        BinaryCounterReading, Cp24Time2a, Cp56Time2a, DoublePointValue, QualityDescriptor,
        StepCommandValue,
    };

    fn ts56() -> Cp56Time2a {
        Cp56Time2a::new(24, 6, 15, 12, 30, 30_000)
    }

    fn ts24() -> Cp24Time2a {
        Cp24Time2a::new(30, 30_000)
    }

    /// One instance of every object type.
    pub(crate) fn sample_objects() -> Vec<InformationObject> {
        let q = QualityDescriptor::INVALID;
        let bcr = BinaryCounterReading::new(1000, 3, false, true, false);
        vec![
            SinglePointInformation::new(1, true, q).into(),
            SinglePointWithCp24Time2a::new(SinglePointInformation::new(2, true, q), ts24()).into(),
            DoublePointInformation::new(3, DoublePointValue::On, q).into(),
            DoublePointWithCp24Time2a::new(DoublePointInformation::new(4, DoublePointValue::Off, q), ts24()).into(),
            StepPositionInformation::new(5, -7, true, q).into(),
            StepPositionWithCp24Time2a::new(StepPositionInformation::new(6, 12, false, q), ts24()).into(),
            BitString32::new(7, 0xDEAD_BEEF, q).into(),
            Bitstring32WithCp24Time2a::new(BitString32::new(8, 0x0102_0304, q), ts24()).into(),
            MeasuredValueNormalized::new(9, 0.5, q).into(),
            MeasuredValueNormalizedWithCp24Time2a::new(MeasuredValueNormalized::new(10, -0.25, q), ts24()).into(),
            MeasuredValueScaled::new(11, -1234, q).into(),
            MeasuredValueScaledWithCp24Time2a::new(MeasuredValueScaled::new(12, 4321, q), ts24()).into(),
            MeasuredValueShort::new(13, 23.5, q).into(),
            MeasuredValueShortWithCp24Time2a::new(MeasuredValueShort::new(14, -0.125, q), ts24()).into(),
            IntegratedTotals::new(15, bcr).into(),
            IntegratedTotalsWithCp24Time2a::new(IntegratedTotals::new(16, bcr), ts24()).into(),
            SinglePointWithCp56Time2a::new(SinglePointInformation::new(30, false, q), ts56()).into(),
            DoublePointWithCp56Time2a::new(DoublePointInformation::new(31, DoublePointValue::Indeterminate, q), ts56()).into(),
            StepPositionWithCp56Time2a::new(StepPositionInformation::new(32, -64, true, q), ts56()).into(),
            Bitstring32WithCp56Time2a::new(BitString32::new(33, 1, q), ts56()).into(),
            MeasuredValueNormalizedWithCp56Time2a::new(MeasuredValueNormalized::new(34, 0.75, q), ts56()).into(),
            MeasuredValueScaledWithCp56Time2a::new(MeasuredValueScaled::new(35, i16::MIN, q), ts56()).into(),
            MeasuredValueShortWithCp56Time2a::new(MeasuredValueShort::new(36, 1.0e6, q), ts56()).into(),
            IntegratedTotalsWithCp56Time2a::new(IntegratedTotals::new(37, bcr), ts56()).into(),
            SingleCommand::new(45, true, true, 5).into(),
            DoubleCommand::new(46, DoublePointValue::On, false, 2).into(),
            StepCommand::new(47, StepCommandValue::Higher, true, 1).into(),
            SetpointCommandNormalized::new(48, 0.5, true, 0).into(),
            SetpointCommandScaled::new(49, -300, false, 1).into(),
            SetpointCommandShort::new(50, 50.25, false, 0).into(),
            Bitstring32Command::new(51, 0xFF00_FF00).into(),
            SingleCommandWithCp56Time2a::new(SingleCommand::new(58, false, false, 3), ts56()).into(),
            InterrogationCommand::new(0, crate::types::qoi::STATION).into(),
            ReadCommand::new(102).into(),
            ClockSynchronizationCommand::new(0, ts56()).into(),
        ]
    }

    #[test]
    fn test_every_type_id_has_one_object_type() {
        let objects = sample_objects();
        assert_eq!(objects.len(), 35);

        let mut ids: Vec<TypeId> = objects.iter().map(InformationObject::type_id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 35);
    }

    #[test]
    fn test_variant_name_matches_type_id() {
        for object in sample_objects() {
            let variant = format!("{:?}", object);
            let type_name = format!("{:?}", object.type_id());
            assert!(
                variant.starts_with(&format!("{}(", type_name)),
                "{} does not match {}",
                variant,
                type_name
            );
        }
    }

    #[test]
    fn test_encode_decode_every_type() {
        for object in sample_objects() {
            let mut buf = Vec::new();
            object.encode(&mut buf);
            assert_eq!(buf.len(), object.encoded_len(), "length of {}", object);

            let mut slice = buf.as_slice();
            let decoded = InformationObject::decode(object.type_id(), &mut slice).unwrap();
            assert!(slice.is_empty());
            assert_eq!(decoded, object);
        }
    }

    #[test]
    fn test_decode_short_buffer() {
        for object in sample_objects() {
            let mut buf = Vec::new();
            object.encode(&mut buf);
            buf.pop();

            let mut slice = buf.as_slice();
            let err = InformationObject::decode(object.type_id(), &mut slice).unwrap_err();
            assert!(
                matches!(err, Iec60870Error::InvalidLength { type_id, .. } if type_id == object.type_id()),
                "unexpected {:?}",
                err
            );
        }
    }

    #[test]
    fn test_element_len_table() {
        assert_eq!(element_len(TypeId::SinglePoint), 1);
        assert_eq!(element_len(TypeId::SinglePointTime24), 4);
        assert_eq!(element_len(TypeId::SinglePointTime56), 8);
        assert_eq!(element_len(TypeId::StepPosition), 2);
        assert_eq!(element_len(TypeId::Bitstring32), 5);
        assert_eq!(element_len(TypeId::MeasuredNormalized), 3);
        assert_eq!(element_len(TypeId::MeasuredFloat), 5);
        assert_eq!(element_len(TypeId::MeasuredFloatTime56), 12);
        assert_eq!(element_len(TypeId::IntegratedTotals), 5);
        assert_eq!(element_len(TypeId::SetpointFloat), 5);
        assert_eq!(element_len(TypeId::Bitstring32Command), 4);
        assert_eq!(element_len(TypeId::InterrogationCommand), 1);
        assert_eq!(element_len(TypeId::ReadCommand), 0);
        assert_eq!(element_len(TypeId::ClockSync), 7);
    }

    #[test]
    fn test_downcast() {
        let mut object: InformationObject = MeasuredValueScaled::new(11, 10, QualityDescriptor::GOOD).into();

        assert!(object.downcast_ref::<MeasuredValueShort>().is_none());
        object
            .downcast_mut::<MeasuredValueScaled>()
            .unwrap()
            .set_value(20);
        assert_eq!(object.downcast_ref::<MeasuredValueScaled>().unwrap().value(), 20);

        let object = object.downcast::<SinglePointInformation>().unwrap_err();
        let scaled = object.downcast::<MeasuredValueScaled>().unwrap();
        assert_eq!(scaled.object_address().value(), 11);
    }

    #[test]
    fn test_display() {
        let object: InformationObject = ReadCommand::new(4711).into();
        assert_eq!(object.to_string(), "[C_RD_NA_1] IOA=4711");
    }
}
