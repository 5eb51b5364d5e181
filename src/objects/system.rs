//! System information in control direction.

use bytes::{Buf, BufMut};

use super::InformationElement;
use crate::error::Result;
use crate::types::{qoi, Cp56Time2a, Ioa, TypeId};

/// Interrogation command (C_IC_NA_1).
///
/// The qualifier of interrogation is carried unchanged; see [`qoi`] for the
/// defined values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InterrogationCommand {
    ioa: Ioa,
    qoi: u8,
}

impl InterrogationCommand {
    pub fn new(ioa: impl Into<Ioa>, qoi: u8) -> Self {
        Self {
            ioa: ioa.into(),
            qoi,
        }
    }

    /// Station interrogation at IOA 0.
    pub fn station() -> Self {
        Self::new(0, qoi::STATION)
    }

    /// Overwrite this instance in place.
    pub fn reset(&mut self, ioa: impl Into<Ioa>, qoi: u8) -> &mut Self {
        *self = Self::new(ioa, qoi);
        self
    }

    pub fn qoi(&self) -> u8 {
        self.qoi
    }

    pub fn is_station(&self) -> bool {
        self.qoi == qoi::STATION
    }
}

impl InformationElement for InterrogationCommand {
    const TYPE_ID: TypeId = TypeId::InterrogationCommand;
    const ENCODED_LEN: usize = 1;

    fn object_address(&self) -> Ioa {
        self.ioa
    }

    fn encode_element<B: BufMut>(&self, buf: &mut B) {
        buf.put_u8(self.qoi);
    }

    fn decode_element<B: Buf>(ioa: Ioa, buf: &mut B) -> Result<Self> {
        Ok(Self::new(ioa, buf.get_u8()))
    }
}

/// Read command (C_RD_NA_1). Only the address is transmitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReadCommand {
    ioa: Ioa,
}

impl ReadCommand {
    pub fn new(ioa: impl Into<Ioa>) -> Self {
        Self { ioa: ioa.into() }
    }

    /// Overwrite this instance in place.
    pub fn reset(&mut self, ioa: impl Into<Ioa>) -> &mut Self {
        self.ioa = ioa.into();
        self
    }
}

impl InformationElement for ReadCommand {
    const TYPE_ID: TypeId = TypeId::ReadCommand;
    const ENCODED_LEN: usize = 0;

    fn object_address(&self) -> Ioa {
        self.ioa
    }

    fn encode_element<B: BufMut>(&self, _buf: &mut B) {}

    fn decode_element<B: Buf>(ioa: Ioa, _buf: &mut B) -> Result<Self> {
        Ok(Self::new(ioa))
    }
}

/// Clock synchronization command (C_CS_NA_1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClockSynchronizationCommand {
    ioa: Ioa,
    time: Cp56Time2a,
}

impl ClockSynchronizationCommand {
    pub fn new(ioa: impl Into<Ioa>, time: Cp56Time2a) -> Self {
        Self {
            ioa: ioa.into(),
            time,
        }
    }

    /// Overwrite this instance in place.
    pub fn reset(&mut self, ioa: impl Into<Ioa>, time: Cp56Time2a) -> &mut Self {
        *self = Self::new(ioa, time);
        self
    }

    pub fn time(&self) -> Cp56Time2a {
        self.time
    }

    pub fn set_time(&mut self, time: Cp56Time2a) {
        self.time = time;
    }
}

impl InformationElement for ClockSynchronizationCommand {
    const TYPE_ID: TypeId = TypeId::ClockSync;
    const ENCODED_LEN: usize = Cp56Time2a::ENCODED_LEN;

    fn object_address(&self) -> Ioa {
        self.ioa
    }

    fn encode_element<B: BufMut>(&self, buf: &mut B) {
        buf.put_slice(&self.time.to_bytes());
    }

    fn decode_element<B: Buf>(ioa: Ioa, buf: &mut B) -> Result<Self> {
        let mut bytes = [0u8; Cp56Time2a::ENCODED_LEN];
        buf.copy_to_slice(&mut bytes);
        Ok(Self::new(ioa, Cp56Time2a::from_bytes(&bytes)?))
    }
}
