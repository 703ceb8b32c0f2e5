//! Wire decoding errors.
//!
//! Encoding never fails: every [`crate::Instruction`] value has a valid
//! positional form. These errors only arise when reading packets back.

/// Why a JSON command packet could not be turned into typed instructions.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Not valid JSON, or not the `{ "instructions": [...] }` shape.
    #[error("malformed command packet: {0}")]
    Json(#[from] serde_json::Error),

    /// `type` is outside the known instruction set.
    #[error("unknown instruction type {0}")]
    UnknownInstructionType(i64),

    /// An enum-valued parameter carries an undefined discriminant.
    #[error("unknown {field} value {value}")]
    UnknownDiscriminant {
        /// Which enum was being decoded.
        field: &'static str,
        /// Raw wire value.
        value: u64,
    },

    /// Parameter list length does not match the instruction or mode.
    #[error("{what} expects {expected} parameters, got {actual}")]
    Arity {
        /// Instruction or trigger mode name.
        what: &'static str,
        /// Required parameter count.
        expected: usize,
        /// Received parameter count.
        actual: usize,
    },

    /// A positional parameter has the wrong JSON type or is out of range.
    #[error("parameter {index} must be {expected}, got {found}")]
    Parameter {
        /// Position in the parameter array.
        index: usize,
        /// Expected type description.
        expected: &'static str,
        /// Offending JSON value.
        found: String,
    },
}
