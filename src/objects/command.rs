//! Process information in control direction.
//!
//! Single, double and regulating step commands pack state, qualifier of
//! command (QU) and the select/execute flag into one byte:
//!
//! ```text
//! bit:  7    6..2   1..0
//!      S/E    QU    state
//! ```
//!
//! Set-point commands append a QOS byte (S/E in bit 7, QL in bits 0..6) to
//! the value.

use bytes::{Buf, BufMut};

use super::InformationElement;
use crate::error::{Iec60870Error, Result};
use crate::types::{
    check_normalized, normalized_to_raw, raw_to_normalized, CommandQualifier, DoublePointValue,
    Ioa, SetpointQualifier, StepCommandValue, TypeId,
};

/// Single command (C_SC_NA_1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SingleCommand {
    ioa: Ioa,
    state: bool,
    qualifier: CommandQualifier,
}

impl SingleCommand {
    /// Create a new single command. `qu` is masked to 5 bits.
    pub fn new(ioa: impl Into<Ioa>, state: bool, select: bool, qu: u8) -> Self {
        Self {
            ioa: ioa.into(),
            state,
            qualifier: CommandQualifier::new(select, qu),
        }
    }

    /// Create a new single command, rejecting `qu` above 31.
    pub fn try_new(ioa: u32, state: bool, select: bool, qu: u8) -> Result<Self> {
        Ok(Self {
            ioa: Ioa::try_new(ioa)?,
            state,
            qualifier: CommandQualifier::try_new(select, qu)?,
        })
    }

    /// Overwrite this instance in place.
    pub fn reset(&mut self, ioa: impl Into<Ioa>, state: bool, select: bool, qu: u8) -> &mut Self {
        *self = Self::new(ioa, state, select, qu);
        self
    }

    /// Commanded state (ON = true).
    pub fn state(&self) -> bool {
        self.state
    }

    pub fn is_select(&self) -> bool {
        self.qualifier.is_select()
    }

    pub fn qu(&self) -> u8 {
        self.qualifier.qu()
    }

    pub fn qualifier(&self) -> CommandQualifier {
        self.qualifier
    }
}

impl InformationElement for SingleCommand {
    const TYPE_ID: TypeId = TypeId::SingleCommand;
    const ENCODED_LEN: usize = 1;

    fn object_address(&self) -> Ioa {
        self.ioa
    }

    fn encode_element<B: BufMut>(&self, buf: &mut B) {
        buf.put_u8(self.qualifier.encode(self.state as u8));
    }

    fn decode_element<B: Buf>(ioa: Ioa, buf: &mut B) -> Result<Self> {
        let (qualifier, state) = CommandQualifier::decode(buf.get_u8());
        Ok(Self {
            ioa,
            state: (state & 0x01) != 0,
            qualifier,
        })
    }
}

/// Double command (C_DC_NA_1).
///
/// Only [`DoublePointValue::Off`] and [`DoublePointValue::On`] are
/// meaningful commands; the other two states are carried unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DoubleCommand {
    ioa: Ioa,
    state: DoublePointValue,
    qualifier: CommandQualifier,
}

impl DoubleCommand {
    /// Create a new double command. `qu` is masked to 5 bits.
    pub fn new(ioa: impl Into<Ioa>, state: DoublePointValue, select: bool, qu: u8) -> Self {
        Self {
            ioa: ioa.into(),
            state,
            qualifier: CommandQualifier::new(select, qu),
        }
    }

    /// Create a new double command from a raw state, rejecting a state
    /// outside 0..=3 or `qu` above 31.
    pub fn try_new(ioa: u32, state: u8, select: bool, qu: u8) -> Result<Self> {
        Ok(Self {
            ioa: Ioa::try_new(ioa)?,
            state: DoublePointValue::try_from_u8(state)?,
            qualifier: CommandQualifier::try_new(select, qu)?,
        })
    }

    /// Overwrite this instance in place.
    pub fn reset(
        &mut self,
        ioa: impl Into<Ioa>,
        state: DoublePointValue,
        select: bool,
        qu: u8,
    ) -> &mut Self {
        *self = Self::new(ioa, state, select, qu);
        self
    }

    pub fn state(&self) -> DoublePointValue {
        self.state
    }

    pub fn is_select(&self) -> bool {
        self.qualifier.is_select()
    }

    pub fn qu(&self) -> u8 {
        self.qualifier.qu()
    }
}

impl InformationElement for DoubleCommand {
    const TYPE_ID: TypeId = TypeId::DoubleCommand;
    const ENCODED_LEN: usize = 1;

    fn object_address(&self) -> Ioa {
        self.ioa
    }

    fn encode_element<B: BufMut>(&self, buf: &mut B) {
        buf.put_u8(self.qualifier.encode(self.state.as_u8()));
    }

    fn decode_element<B: Buf>(ioa: Ioa, buf: &mut B) -> Result<Self> {
        let (qualifier, state) = CommandQualifier::decode(buf.get_u8());
        Ok(Self {
            ioa,
            state: DoublePointValue::from_u8(state),
            qualifier,
        })
    }
}

/// Regulating step command (C_RC_NA_1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepCommand {
    ioa: Ioa,
    state: StepCommandValue,
    qualifier: CommandQualifier,
}

impl StepCommand {
    /// Create a new step command. `qu` is masked to 5 bits.
    pub fn new(ioa: impl Into<Ioa>, state: StepCommandValue, select: bool, qu: u8) -> Self {
        Self {
            ioa: ioa.into(),
            state,
            qualifier: CommandQualifier::new(select, qu),
        }
    }

    /// Create a new step command from a raw state, rejecting states other
    /// than 1 (lower) and 2 (higher) or `qu` above 31.
    pub fn try_new(ioa: u32, state: u8, select: bool, qu: u8) -> Result<Self> {
        if state > 0x03 {
            return Err(Iec60870Error::out_of_range("step command", state));
        }
        Ok(Self {
            ioa: Ioa::try_new(ioa)?,
            state: StepCommandValue::from_u8(state)?,
            qualifier: CommandQualifier::try_new(select, qu)?,
        })
    }

    /// Overwrite this instance in place.
    pub fn reset(
        &mut self,
        ioa: impl Into<Ioa>,
        state: StepCommandValue,
        select: bool,
        qu: u8,
    ) -> &mut Self {
        *self = Self::new(ioa, state, select, qu);
        self
    }

    pub fn state(&self) -> StepCommandValue {
        self.state
    }

    pub fn is_select(&self) -> bool {
        self.qualifier.is_select()
    }

    pub fn qu(&self) -> u8 {
        self.qualifier.qu()
    }
}

impl InformationElement for StepCommand {
    const TYPE_ID: TypeId = TypeId::RegulatingStep;
    const ENCODED_LEN: usize = 1;

    fn object_address(&self) -> Ioa {
        self.ioa
    }

    fn encode_element<B: BufMut>(&self, buf: &mut B) {
        buf.put_u8(self.qualifier.encode(self.state.as_u8()));
    }

    fn decode_element<B: Buf>(ioa: Ioa, buf: &mut B) -> Result<Self> {
        let (qualifier, state) = CommandQualifier::decode(buf.get_u8());
        Ok(Self {
            ioa,
            state: StepCommandValue::from_u8(state)?,
            qualifier,
        })
    }
}

/// Set-point command, normalized value (C_SE_NA_1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SetpointCommandNormalized {
    ioa: Ioa,
    raw: i16,
    qualifier: SetpointQualifier,
}

impl SetpointCommandNormalized {
    /// Create a new set-point command. `value` is rounded and saturated to
    /// the 16-bit normalized range, `ql` is masked to 7 bits.
    pub fn new(ioa: impl Into<Ioa>, value: f32, select: bool, ql: u8) -> Self {
        Self {
            ioa: ioa.into(),
            raw: normalized_to_raw(value),
            qualifier: SetpointQualifier::new(select, ql),
        }
    }

    pub fn try_new(ioa: u32, value: f32, select: bool, ql: u8) -> Result<Self> {
        Ok(Self {
            ioa: Ioa::try_new(ioa)?,
            raw: check_normalized(value)?,
            qualifier: SetpointQualifier::try_new(select, ql)?,
        })
    }

    /// Overwrite this instance in place.
    pub fn reset(&mut self, ioa: impl Into<Ioa>, value: f32, select: bool, ql: u8) -> &mut Self {
        *self = Self::new(ioa, value, select, ql);
        self
    }

    pub fn value(&self) -> f32 {
        raw_to_normalized(self.raw)
    }

    pub fn raw_value(&self) -> i16 {
        self.raw
    }

    pub fn is_select(&self) -> bool {
        self.qualifier.is_select()
    }

    pub fn ql(&self) -> u8 {
        self.qualifier.ql()
    }
}

impl InformationElement for SetpointCommandNormalized {
    const TYPE_ID: TypeId = TypeId::SetpointNormalized;
    const ENCODED_LEN: usize = 3;

    fn object_address(&self) -> Ioa {
        self.ioa
    }

    fn encode_element<B: BufMut>(&self, buf: &mut B) {
        buf.put_i16_le(self.raw);
        buf.put_u8(self.qualifier.as_u8());
    }

    fn decode_element<B: Buf>(ioa: Ioa, buf: &mut B) -> Result<Self> {
        let raw = buf.get_i16_le();
        let qualifier = SetpointQualifier::from_u8(buf.get_u8());
        Ok(Self { ioa, raw, qualifier })
    }
}

/// Set-point command, scaled value (C_SE_NB_1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SetpointCommandScaled {
    ioa: Ioa,
    value: i16,
    qualifier: SetpointQualifier,
}

impl SetpointCommandScaled {
    pub fn new(ioa: impl Into<Ioa>, value: i16, select: bool, ql: u8) -> Self {
        Self {
            ioa: ioa.into(),
            value,
            qualifier: SetpointQualifier::new(select, ql),
        }
    }

    pub fn try_new(ioa: u32, value: i16, select: bool, ql: u8) -> Result<Self> {
        Ok(Self {
            ioa: Ioa::try_new(ioa)?,
            value,
            qualifier: SetpointQualifier::try_new(select, ql)?,
        })
    }

    /// Overwrite this instance in place.
    pub fn reset(&mut self, ioa: impl Into<Ioa>, value: i16, select: bool, ql: u8) -> &mut Self {
        *self = Self::new(ioa, value, select, ql);
        self
    }

    pub fn value(&self) -> i16 {
        self.value
    }

    pub fn is_select(&self) -> bool {
        self.qualifier.is_select()
    }

    pub fn ql(&self) -> u8 {
        self.qualifier.ql()
    }
}

impl InformationElement for SetpointCommandScaled {
    const TYPE_ID: TypeId = TypeId::SetpointScaled;
    const ENCODED_LEN: usize = 3;

    fn object_address(&self) -> Ioa {
        self.ioa
    }

    fn encode_element<B: BufMut>(&self, buf: &mut B) {
        buf.put_i16_le(self.value);
        buf.put_u8(self.qualifier.as_u8());
    }

    fn decode_element<B: Buf>(ioa: Ioa, buf: &mut B) -> Result<Self> {
        let value = buf.get_i16_le();
        let qualifier = SetpointQualifier::from_u8(buf.get_u8());
        Ok(Self {
            ioa,
            value,
            qualifier,
        })
    }
}

/// Set-point command, short floating point value (C_SE_NC_1).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SetpointCommandShort {
    ioa: Ioa,
    value: f32,
    qualifier: SetpointQualifier,
}

impl SetpointCommandShort {
    pub fn new(ioa: impl Into<Ioa>, value: f32, select: bool, ql: u8) -> Self {
        Self {
            ioa: ioa.into(),
            value,
            qualifier: SetpointQualifier::new(select, ql),
        }
    }

    pub fn try_new(ioa: u32, value: f32, select: bool, ql: u8) -> Result<Self> {
        Ok(Self {
            ioa: Ioa::try_new(ioa)?,
            value,
            qualifier: SetpointQualifier::try_new(select, ql)?,
        })
    }

    /// Overwrite this instance in place.
    pub fn reset(&mut self, ioa: impl Into<Ioa>, value: f32, select: bool, ql: u8) -> &mut Self {
        *self = Self::new(ioa, value, select, ql);
        self
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn is_select(&self) -> bool {
        self.qualifier.is_select()
    }

    pub fn ql(&self) -> u8 {
        self.qualifier.ql()
    }
}

impl InformationElement for SetpointCommandShort {
    const TYPE_ID: TypeId = TypeId::SetpointFloat;
    const ENCODED_LEN: usize = 5;

    fn object_address(&self) -> Ioa {
        self.ioa
    }

    fn encode_element<B: BufMut>(&self, buf: &mut B) {
        buf.put_f32_le(self.value);
        buf.put_u8(self.qualifier.as_u8());
    }

    fn decode_element<B: Buf>(ioa: Ioa, buf: &mut B) -> Result<Self> {
        let value = buf.get_f32_le();
        let qualifier = SetpointQualifier::from_u8(buf.get_u8());
        Ok(Self {
            ioa,
            value,
            qualifier,
        })
    }
}

/// Bitstring of 32 bit command (C_BO_NA_1). Carries no qualifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bitstring32Command {
    ioa: Ioa,
    value: u32,
}

impl Bitstring32Command {
    pub fn new(ioa: impl Into<Ioa>, value: u32) -> Self {
        Self {
            ioa: ioa.into(),
            value,
        }
    }

    /// Overwrite this instance in place.
    pub fn reset(&mut self, ioa: impl Into<Ioa>, value: u32) -> &mut Self {
        *self = Self::new(ioa, value);
        self
    }

    pub fn value(&self) -> u32 {
        self.value
    }
}

impl InformationElement for Bitstring32Command {
    const TYPE_ID: TypeId = TypeId::Bitstring32Command;
    const ENCODED_LEN: usize = 4;

    fn object_address(&self) -> Ioa {
        self.ioa
    }

    fn encode_element<B: BufMut>(&self, buf: &mut B) {
        buf.put_u32_le(self.value);
    }

    fn decode_element<B: Buf>(ioa: Ioa, buf: &mut B) -> Result<Self> {
        Ok(Self::new(ioa, buf.get_u32_le()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn encode<T: InformationElement>(object: &T) -> Vec<u8> {
        let mut buf = Vec::new();
        object.encode(&mut buf);
        buf
    }

    #[test]
    fn test_single_command_select() {
        let sc = SingleCommand::new(10, true, true, 5);
        assert!(sc.is_select());
        assert_eq!(sc.qu(), 5);
        assert!(sc.state());
        assert_eq!(encode(&sc), vec![10, 0, 0, 0x80 | (5 << 2) | 0x01]);
    }

    #[test]
    fn test_single_command_qu_masked() {
        // 200 = 0b1100_1000, low five bits = 8
        let sc = SingleCommand::new(10, false, false, 200);
        assert_eq!(sc.qu(), 8);
        assert!(!sc.is_select());
        assert_eq!(encode(&sc)[3], 8 << 2);

        assert!(SingleCommand::try_new(10, false, false, 200).is_err());
    }

    #[test]
    fn test_double_command() {
        let qu = CommandQualifier::QU_LONG_PULSE;
        let dc = DoubleCommand::new(46, DoublePointValue::Off, false, qu);
        assert_eq!(encode(&dc), vec![46, 0, 0, (2 << 2) | 0x01]);
        assert_eq!(DoubleCommand::decode(&mut encode(&dc).as_slice()).unwrap(), dc);

        assert!(DoubleCommand::try_new(46, 4, false, 0).is_err());
        assert_eq!(DoubleCommand::try_new(46, 2, true, 0).unwrap().state(), DoublePointValue::On);
    }

    #[test]
    fn test_step_command() {
        let rc = StepCommand::new(47, StepCommandValue::Higher, true, 0);
        assert_eq!(encode(&rc), vec![47, 0, 0, 0x82]);
        assert_eq!(StepCommand::decode(&mut encode(&rc).as_slice()).unwrap(), rc);
    }

    #[test]
    fn test_step_command_rejects_invalid_state() {
        for state in [0x80u8, 0x83] {
            let mut data: &[u8] = &[47, 0, 0, state];
            assert_eq!(
                StepCommand::decode(&mut data),
                Err(Iec60870Error::InvalidValue {
                    field: "step command",
                    value: state & 0x03
                })
            );
        }
        assert!(StepCommand::try_new(47, 0, false, 0).is_err());
        assert!(StepCommand::try_new(47, 5, false, 0).is_err());
        assert!(StepCommand::try_new(47, 1, false, 0).is_ok());
    }

    #[test]
    fn test_setpoint_normalized() {
        let se = SetpointCommandNormalized::new(48, -0.5, true, 0);
        assert_eq!(se.raw_value(), -16384);
        assert_eq!(se.value(), -0.5);
        assert_eq!(encode(&se), vec![48, 0, 0, 0x00, 0xC0, 0x80]);

        assert!(SetpointCommandNormalized::try_new(48, 1.5, true, 0).is_err());
    }

    #[test]
    fn test_setpoint_ql_masked() {
        let se = SetpointCommandScaled::new(49, 1000, false, 200);
        assert_eq!(se.ql(), 72);
        assert!(!se.is_select());
        assert_eq!(encode(&se), vec![49, 0, 0, 0xE8, 0x03, 72]);
        assert!(SetpointCommandScaled::try_new(49, 1000, false, 200).is_err());
    }

    #[test]
    fn test_setpoint_short() {
        let se = SetpointCommandShort::new(50, -12.75, true, 3);
        let buf = encode(&se);
        assert_eq!(&buf[3..7], &(-12.75f32).to_le_bytes());
        assert_eq!(buf[7], 0x83);

        let decoded = SetpointCommandShort::decode(&mut buf.as_slice()).unwrap();
        assert_eq!(decoded.value(), -12.75);
        assert!(decoded.is_select());
        assert_eq!(decoded.ql(), 3);
    }

    #[test]
    fn test_bitstring32_command() {
        let bo = Bitstring32Command::new(51, 0xA5A5_0001);
        assert_eq!(encode(&bo), vec![51, 0, 0, 0x01, 0x00, 0xA5, 0xA5]);
    }

    #[test]
    fn test_reset_drops_previous_qualifier() {
        let mut sc = SingleCommand::new(1, true, true, 31);
        let before: *const SingleCommand = &sc;
        let after: *const SingleCommand = sc.reset(2, false, false, 0);
        assert!(std::ptr::eq(before, after));
        assert_eq!(sc, SingleCommand::new(2, false, false, 0));
    }

    proptest! {
        #[test]
        fn single_command_roundtrip(state in any::<bool>(), select in any::<bool>(), qu in 0u8..=31) {
            let sc = SingleCommand::new(45, state, select, qu);
            let decoded = SingleCommand::decode(&mut encode(&sc).as_slice()).unwrap();
            prop_assert_eq!(decoded, sc);
        }

        #[test]
        fn setpoint_scaled_roundtrip(v in any::<i16>(), select in any::<bool>(), ql in 0u8..=127) {
            let se = SetpointCommandScaled::new(49, v, select, ql);
            let decoded = SetpointCommandScaled::decode(&mut encode(&se).as_slice()).unwrap();
            prop_assert_eq!(decoded, se);
        }
    }
}
