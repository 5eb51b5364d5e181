//! Error types for the IEC 60870-5 information object model.

use thiserror::Error;

use crate::types::TypeId;

/// Result type alias for information object operations.
pub type Result<T> = std::result::Result<T, Iec60870Error>;

/// IEC 60870-5-101/104 information object error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Iec60870Error {
    /// Unknown or unsupported type identifier
    #[error("Unknown type ID: {0}")]
    UnknownTypeId(u8),

    /// Buffer shorter than the information element
    #[error("Invalid length for {type_id}: expected {expected} bytes, got {actual}")]
    InvalidLength {
        type_id: TypeId,
        expected: usize,
        actual: usize,
    },

    /// Field value outside its defined domain (strict constructors only)
    #[error("Value out of range for {field}: {value}")]
    ValueOutOfRange { field: &'static str, value: f64 },

    /// Reserved bits set in a flag or qualifier field
    #[error("Reserved bits set in {field}: {value:#04x}")]
    ReservedBits { field: &'static str, value: u8 },

    /// Wire value that maps to no enumeration member
    #[error("Invalid {field} value: {value}")]
    InvalidValue { field: &'static str, value: u8 },

    /// Object of a different type in a homogeneous object list
    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: TypeId, actual: TypeId },

    /// Gap in the addresses of a sequence (SQ=1) object list
    #[error("Non-sequential address: expected {expected}, got {actual}")]
    NonSequentialAddress { expected: u32, actual: u32 },

    /// Invalid ASDU payload
    #[error("Invalid ASDU: {0}")]
    InvalidAsdu(String),
}

impl Iec60870Error {
    /// Create an invalid ASDU error.
    pub fn invalid_asdu(msg: impl Into<String>) -> Self {
        Self::InvalidAsdu(msg.into())
    }

    /// Create a value-out-of-range error.
    pub fn out_of_range(field: &'static str, value: impl Into<f64>) -> Self {
        Self::ValueOutOfRange {
            field,
            value: value.into(),
        }
    }

    /// Check if this error was raised while decoding wire bytes.
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownTypeId(_)
                | Self::InvalidLength { .. }
                | Self::InvalidValue { .. }
                | Self::InvalidAsdu(_)
        )
    }

    /// Check if this error was raised by a strict constructor.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Self::ValueOutOfRange { .. } | Self::ReservedBits { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Iec60870Error::UnknownTypeId(255);
        assert_eq!(err.to_string(), "Unknown type ID: 255");

        let err = Iec60870Error::InvalidLength {
            type_id: TypeId::MeasuredFloat,
            expected: 5,
            actual: 3,
        };
        assert_eq!(
            err.to_string(),
            "Invalid length for M_ME_NC_1: expected 5 bytes, got 3"
        );

        let err = Iec60870Error::out_of_range("step position", 64);
        assert_eq!(err.to_string(), "Value out of range for step position: 64");

        let err = Iec60870Error::ReservedBits {
            field: "quality",
            value: 0x02,
        };
        assert_eq!(err.to_string(), "Reserved bits set in quality: 0x02");
    }

    #[test]
    fn test_is_decode_error() {
        assert!(Iec60870Error::UnknownTypeId(0).is_decode_error());
        assert!(Iec60870Error::invalid_asdu("short").is_decode_error());
        assert!(Iec60870Error::InvalidValue {
            field: "step command",
            value: 3
        }
        .is_decode_error());
        assert!(!Iec60870Error::out_of_range("qu", 200).is_decode_error());
    }

    #[test]
    fn test_is_validation_error() {
        assert!(Iec60870Error::out_of_range("qu", 200).is_validation_error());
        assert!(Iec60870Error::ReservedBits {
            field: "quality",
            value: 0x0E
        }
        .is_validation_error());
        assert!(!Iec60870Error::UnknownTypeId(6).is_validation_error());
    }
}
