//! ASDU information object list parser.
//!
//! An ASDU carries `count` objects of one type. With SQ=0 every object is
//! preceded by its own IOA; with SQ=1 only the first IOA is transmitted and
//! the following objects occupy consecutive addresses.
//!
//! ```text
//! SQ=0: | IOA | element | IOA | element | ...
//! SQ=1: | IOA | element | element | ...
//! ```

use bytes::BufMut;

use crate::error::{Iec60870Error, Result};
use crate::objects::{element_len, InformationObject};
use crate::types::{Ioa, TypeId};

/// Largest number of objects one ASDU can carry (7-bit VSQ count).
pub const MAX_OBJECTS: usize = 127;

/// Payload size of `count` objects of `type_id`.
pub const fn payload_len(type_id: TypeId, count: usize, sequence: bool) -> usize {
    let element = element_len(type_id);
    if count == 0 {
        0
    } else if sequence {
        Ioa::ENCODED_LEN + count * element
    } else {
        count * (Ioa::ENCODED_LEN + element)
    }
}

/// Decode the information objects of an ASDU payload.
///
/// # Example
///
/// ```rust
/// use voltage_iec60870::{parser, TypeId};
///
/// // M_ME_NB_1, SQ=1, two objects starting at IOA 100
/// let data = [100, 0, 0, 0xE8, 0x03, 0x00, 0x18, 0xFC, 0x00];
/// let objects = parser::decode_objects(TypeId::MeasuredScaled, 2, true, &data)?;
/// assert_eq!(objects[1].object_address().value(), 101);
/// # Ok::<(), voltage_iec60870::Iec60870Error>(())
/// ```
pub fn decode_objects(
    type_id: TypeId,
    count: usize,
    sequence: bool,
    data: &[u8],
) -> Result<Vec<InformationObject>> {
    let mut objects = Vec::with_capacity(count.min(MAX_OBJECTS));
    decode_objects_into(type_id, count, sequence, data, &mut objects)?;
    Ok(objects)
}

/// Decode the information objects of an ASDU payload, appending to `out`.
///
/// `out` is left unchanged on error.
pub fn decode_objects_into(
    type_id: TypeId,
    count: usize,
    sequence: bool,
    data: &[u8],
    out: &mut Vec<InformationObject>,
) -> Result<()> {
    if count > MAX_OBJECTS {
        return Err(Iec60870Error::invalid_asdu(format!(
            "Object count {count} exceeds {MAX_OBJECTS}"
        )));
    }

    let expected = payload_len(type_id, count, sequence);
    if data.len() < expected {
        return Err(Iec60870Error::InvalidLength {
            type_id,
            expected,
            actual: data.len(),
        });
    }

    let start = out.len();
    let mut buf = &data[..expected];
    let result = if sequence && count > 0 {
        decode_sequence(type_id, count, &mut buf, out)
    } else {
        decode_individual(type_id, count, &mut buf, out)
    };
    if let Err(e) = result {
        out.truncate(start);
        return Err(e);
    }

    #[cfg(feature = "tracing-support")]
    {
        tracing::debug!(%type_id, count, sequence, "Decoded information objects");
        if data.len() > expected {
            tracing::warn!(
                %type_id,
                trailing = data.len() - expected,
                "Trailing bytes after information objects"
            );
        }
    }

    Ok(())
}

fn decode_sequence(
    type_id: TypeId,
    count: usize,
    buf: &mut &[u8],
    out: &mut Vec<InformationObject>,
) -> Result<()> {
    let first = Ioa::read(buf);
    for i in 0..count {
        let ioa = first.offset(i as u32);
        out.push(InformationObject::decode_element(type_id, ioa, buf)?);
    }
    Ok(())
}

fn decode_individual(
    type_id: TypeId,
    count: usize,
    buf: &mut &[u8],
    out: &mut Vec<InformationObject>,
) -> Result<()> {
    for _ in 0..count {
        out.push(InformationObject::decode(type_id, buf)?);
    }
    Ok(())
}

/// Encode a homogeneous object list as an ASDU payload.
///
/// With `sequence` set only the first IOA is written, and every following
/// object must sit at the next address. Nothing is written on error.
pub fn encode_objects<B: BufMut>(
    objects: &[InformationObject],
    sequence: bool,
    buf: &mut B,
) -> Result<()> {
    let Some(first) = objects.first() else {
        return Ok(());
    };
    if objects.len() > MAX_OBJECTS {
        return Err(Iec60870Error::invalid_asdu(format!(
            "Object count {} exceeds {MAX_OBJECTS}",
            objects.len()
        )));
    }

    let type_id = first.type_id();
    let base = first.object_address();
    for (i, object) in objects.iter().enumerate() {
        if object.type_id() != type_id {
            return Err(Iec60870Error::TypeMismatch {
                expected: type_id,
                actual: object.type_id(),
            });
        }
        let expected = base.offset(i as u32);
        if sequence && object.object_address() != expected {
            return Err(Iec60870Error::NonSequentialAddress {
                expected: expected.value(),
                actual: object.object_address().value(),
            });
        }
    }

    if sequence {
        base.write(buf);
        for object in objects {
            object.encode_element(buf);
        }
    } else {
        for object in objects {
            object.encode(buf);
        }
    }

    #[cfg(feature = "tracing-support")]
    tracing::debug!(%type_id, count = objects.len(), sequence, "Encoded information objects");

    Ok(())
}
