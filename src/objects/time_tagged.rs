//! Time-tagged decorations.
//!
//! A time-tagged object is its base object followed by a CP24Time2a or
//! CP56Time2a time tag on the wire. [`TimeTagged`] composes the two by value;
//! every (base, tag) pair maps to its own ASDU type identifier through
//! [`TimeTaggable`], so each decoration stays a distinct concrete type.

use std::ops::{Deref, DerefMut};

use bytes::{Buf, BufMut};

use super::{
    BitString32, DoublePointInformation, InformationElement, IntegratedTotals,
    MeasuredValueNormalized, MeasuredValueScaled, MeasuredValueShort, SingleCommand,
    SinglePointInformation, StepPositionInformation,
};
use crate::error::Result;
use crate::types::{Cp24Time2a, Cp56Time2a, Ioa, TypeId};

/// A time tag encoding.
pub trait TimeTag: Copy + PartialEq + std::fmt::Debug {
    /// Encoded size in bytes.
    const ENCODED_LEN: usize;

    /// Write the time tag.
    fn encode<B: BufMut>(&self, buf: &mut B);

    /// Read the time tag. `buf` must hold at least [`Self::ENCODED_LEN`] bytes.
    fn decode<B: Buf>(buf: &mut B) -> Result<Self>;
}

impl TimeTag for Cp24Time2a {
    const ENCODED_LEN: usize = Cp24Time2a::ENCODED_LEN;

    fn encode<B: BufMut>(&self, buf: &mut B) {
        buf.put_slice(&self.to_bytes());
    }

    fn decode<B: Buf>(buf: &mut B) -> Result<Self> {
        let mut raw = [0u8; Cp24Time2a::ENCODED_LEN];
        buf.copy_to_slice(&mut raw);
        Cp24Time2a::from_bytes(&raw)
    }
}

impl TimeTag for Cp56Time2a {
    const ENCODED_LEN: usize = Cp56Time2a::ENCODED_LEN;

    fn encode<B: BufMut>(&self, buf: &mut B) {
        buf.put_slice(&self.to_bytes());
    }

    fn decode<B: Buf>(buf: &mut B) -> Result<Self> {
        let mut raw = [0u8; Cp56Time2a::ENCODED_LEN];
        buf.copy_to_slice(&mut raw);
        Cp56Time2a::from_bytes(&raw)
    }
}

/// Base object types that have a time-tagged form with tag `C`.
pub trait TimeTaggable<C: TimeTag>: InformationElement {
    /// Type identifier of the time-tagged form.
    const TAGGED_TYPE_ID: TypeId;
}

/// A base object decorated with a time tag.
///
/// Dereferences to the base object, so all base accessors (and setters of
/// the measured-value types) are available directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeTagged<T, C> {
    inner: T,
    timestamp: C,
}

impl<T, C: TimeTag> TimeTagged<T, C> {
    pub fn new(inner: T, timestamp: C) -> Self {
        Self { inner, timestamp }
    }

    /// Overwrite this instance in place.
    pub fn reset(&mut self, inner: T, timestamp: C) -> &mut Self {
        self.inner = inner;
        self.timestamp = timestamp;
        self
    }

    pub fn timestamp(&self) -> C {
        self.timestamp
    }

    pub fn set_timestamp(&mut self, timestamp: C) {
        self.timestamp = timestamp;
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Split into base object and time tag.
    pub fn into_parts(self) -> (T, C) {
        (self.inner, self.timestamp)
    }
}

impl<T, C> Deref for TimeTagged<T, C> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.inner
    }
}

impl<T, C> DerefMut for TimeTagged<T, C> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.inner
    }
}

impl<T, C> InformationElement for TimeTagged<T, C>
where
    T: TimeTaggable<C>,
    C: TimeTag,
{
    const TYPE_ID: TypeId = <T as TimeTaggable<C>>::TAGGED_TYPE_ID;
    const ENCODED_LEN: usize = <T as InformationElement>::ENCODED_LEN + <C as TimeTag>::ENCODED_LEN;

    fn object_address(&self) -> Ioa {
        self.inner.object_address()
    }

    fn encode_element<B: BufMut>(&self, buf: &mut B) {
        self.inner.encode_element(buf);
        self.timestamp.encode(buf);
    }

    fn decode_element<B: Buf>(ioa: Ioa, buf: &mut B) -> Result<Self> {
        let inner = T::decode_element(ioa, buf)?;
        let timestamp = <C as TimeTag>::decode(buf)?;
        Ok(Self { inner, timestamp })
    }
}

macro_rules! time_tagged {
    ($( $(#[$doc:meta])* $alias:ident = $base:ty, $tag:ty => $type_id:ident; )+) => {
        $(
            impl TimeTaggable<$tag> for $base {
                const TAGGED_TYPE_ID: TypeId = TypeId::$type_id;
            }

            $(#[$doc])*
            pub type $alias = TimeTagged<$base, $tag>;
        )+
    };
}

time_tagged! {
    /// Single-point information with time tag CP24Time2a (M_SP_TA_1).
    SinglePointWithCp24Time2a = SinglePointInformation, Cp24Time2a => SinglePointTime24;
    /// Single-point information with time tag CP56Time2a (M_SP_TB_1).
    SinglePointWithCp56Time2a = SinglePointInformation, Cp56Time2a => SinglePointTime56;
    /// Double-point information with time tag CP24Time2a (M_DP_TA_1).
    DoublePointWithCp24Time2a = DoublePointInformation, Cp24Time2a => DoublePointTime24;
    /// Double-point information with time tag CP56Time2a (M_DP_TB_1).
    DoublePointWithCp56Time2a = DoublePointInformation, Cp56Time2a => DoublePointTime56;
    /// Step position information with time tag CP24Time2a (M_ST_TA_1).
    StepPositionWithCp24Time2a = StepPositionInformation, Cp24Time2a => StepPositionTime24;
    /// Step position information with time tag CP56Time2a (M_ST_TB_1).
    StepPositionWithCp56Time2a = StepPositionInformation, Cp56Time2a => StepPositionTime56;
    /// Bitstring of 32 bit with time tag CP24Time2a (M_BO_TA_1).
    Bitstring32WithCp24Time2a = BitString32, Cp24Time2a => Bitstring32Time24;
    /// Bitstring of 32 bit with time tag CP56Time2a (M_BO_TB_1).
    Bitstring32WithCp56Time2a = BitString32, Cp56Time2a => Bitstring32Time56;
    /// Measured value, normalized with time tag CP24Time2a (M_ME_TA_1).
    MeasuredValueNormalizedWithCp24Time2a = MeasuredValueNormalized, Cp24Time2a => MeasuredNormalizedTime24;
    /// Measured value, normalized with time tag CP56Time2a (M_ME_TD_1).
    MeasuredValueNormalizedWithCp56Time2a = MeasuredValueNormalized, Cp56Time2a => MeasuredNormalizedTime56;
    /// Measured value, scaled with time tag CP24Time2a (M_ME_TB_1).
    MeasuredValueScaledWithCp24Time2a = MeasuredValueScaled, Cp24Time2a => MeasuredScaledTime24;
    /// Measured value, scaled with time tag CP56Time2a (M_ME_TE_1).
    MeasuredValueScaledWithCp56Time2a = MeasuredValueScaled, Cp56Time2a => MeasuredScaledTime56;
    /// Measured value, short floating point with time tag CP24Time2a (M_ME_TC_1).
    MeasuredValueShortWithCp24Time2a = MeasuredValueShort, Cp24Time2a => MeasuredFloatTime24;
    /// Measured value, short floating point with time tag CP56Time2a (M_ME_TF_1).
    MeasuredValueShortWithCp56Time2a = MeasuredValueShort, Cp56Time2a => MeasuredFloatTime56;
    /// Integrated totals with time tag CP24Time2a (M_IT_TA_1).
    IntegratedTotalsWithCp24Time2a = IntegratedTotals, Cp24Time2a => IntegratedTotalsTime24;
    /// Integrated totals with time tag CP56Time2a (M_IT_TB_1).
    IntegratedTotalsWithCp56Time2a = IntegratedTotals, Cp56Time2a => IntegratedTotalsTime56;
    /// Single command with time tag CP56Time2a (C_SC_TA_1).
    SingleCommandWithCp56Time2a = SingleCommand, Cp56Time2a => SingleCommandTime56;
}
