//! IEC 60870-5-101/104 value types.
//!
//! This module contains the field types information objects are built from:
//!
//! - `TypeId` - Type identification (M_SP_NA_1, etc.)
//! - `Ioa` - Information object address
//! - `QualityDescriptor` - Quality bits (OV, BL, SB, NT, IV)
//! - `Cp24Time2a` / `Cp56Time2a` - Time tags
//! - `BinaryCounterReading` - Integrated totals value
//! - Value domains and qualifiers (DPI, RCS, VTI, NVA, QU, QL, QOI)

mod bcr;
mod ioa;
mod quality;
mod time;
mod type_id;
mod value;

pub use bcr::*;
pub use ioa::*;
pub use quality::*;
pub use time::*;
pub use type_id::*;
pub use value::*;
