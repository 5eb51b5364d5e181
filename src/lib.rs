//! # voltage_iec60870
//!
//! IEC 60870-5-101/104 information object model for Rust.
//!
//! This crate provides the typed payload of telecontrol ASDUs: every
//! information object the companion standards define for process
//! information, commands and system commands, with its wire encoding.
//! Session handling and framing are left to the transport layer.
//!
//! ## Features
//!
//! - **Closed object model**: one Rust type per ASDU type identifier,
//!   gathered in the [`InformationObject`] enum
//! - **Time tags**: CP24Time2a and CP56Time2a forms composed with
//!   [`TimeTagged`]
//! - **Wire codec**: per-object encode/decode and SQ=0/SQ=1 object lists
//! - **Reuse**: in-place `reset` and a per-type [`ObjectPool`]
//!
//! ## Quick Start
//!
//! ```rust
//! use voltage_iec60870::{
//!     parser, Cp56Time2a, InformationObject, MeasuredValueShort,
//!     MeasuredValueShortWithCp56Time2a, QualityDescriptor, TypeId,
//! };
//!
//! let time = Cp56Time2a::new(24, 6, 15, 12, 30, 15_000);
//! let value = MeasuredValueShort::new(4711, 230.5, QualityDescriptor::GOOD);
//! let objects: Vec<InformationObject> =
//!     vec![MeasuredValueShortWithCp56Time2a::new(value, time).into()];
//!
//! let mut payload = Vec::new();
//! parser::encode_objects(&objects, false, &mut payload)?;
//!
//! let decoded = parser::decode_objects(TypeId::MeasuredFloatTime56, 1, false, &payload)?;
//! assert_eq!(decoded, objects);
//! # Ok::<(), voltage_iec60870::Iec60870Error>(())
//! ```
//!
//! ## Object Layout
//!
//! ```text
//! +--------+--------+--------+----------------------+-----------+
//! | IOA (3 bytes, LE)        | Information element  | Time tag  |
//! +--------+--------+--------+----------------------+-----------+
//! ```
//!
//! The time tag is absent, 3 bytes (CP24Time2a) or 7 bytes (CP56Time2a)
//! depending on the type identifier.

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod error;
pub mod objects;
pub mod parser;
pub mod pool;
pub mod types;

// Re-export main types
pub use error::{Iec60870Error, Result};
pub use objects::*;
pub use parser::{decode_objects, decode_objects_into, encode_objects};
pub use pool::ObjectPool;
pub use types::*;
