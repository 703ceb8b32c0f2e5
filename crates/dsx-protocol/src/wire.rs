//! Positional parameter arrays as they appear on the wire.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ProtocolError;

/// One instruction exactly as serialized: an integer tag and an untyped
/// positional parameter list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireInstruction {
    #[serde(rename = "type")]
    pub kind: i64,
    /// `null` is accepted on input; unused slots from fixed-size senders
    /// arrive that way.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub parameters: Vec<Value>,
}

/// Top-level packet as serialized.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WirePacket {
    pub instructions: Vec<WireInstruction>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Typed reads from a parameter slice, reporting absolute positions.
pub(crate) struct Params<'a> {
    values: &'a [Value],
    base: usize,
}

impl<'a> Params<'a> {
    pub(crate) fn new(values: &'a [Value]) -> Self {
        Self { values, base: 0 }
    }

    pub(crate) fn len(&self) -> usize {
        self.values.len()
    }

    /// Parameters after the first `n`, keeping absolute indices for errors.
    pub(crate) fn skip(&self, n: usize) -> Params<'a> {
        Params {
            values: self.values.get(n..).unwrap_or_default(),
            base: self.base.saturating_add(n),
        }
    }

    pub(crate) fn expect_len(&self, what: &'static str, expected: usize) -> Result<(), ProtocolError> {
        if self.values.len() == expected {
            Ok(())
        } else {
            Err(ProtocolError::Arity {
                what,
                expected,
                actual: self.values.len(),
            })
        }
    }

    fn value(&self, index: usize, expected: &'static str) -> Result<&'a Value, ProtocolError> {
        self.values.get(index).ok_or(ProtocolError::Parameter {
            index: self.base.saturating_add(index),
            expected,
            found: "nothing".to_string(),
        })
    }

    pub(crate) fn u8(&self, index: usize) -> Result<u8, ProtocolError> {
        let value = self.value(index, "an integer 0-255")?;
        value
            .as_u64()
            .and_then(|v| u8::try_from(v).ok())
            .ok_or_else(|| ProtocolError::Parameter {
                index: self.base.saturating_add(index),
                expected: "an integer 0-255",
                found: value.to_string(),
            })
    }

    pub(crate) fn bool(&self, index: usize) -> Result<bool, ProtocolError> {
        let value = self.value(index, "a boolean")?;
        value.as_bool().ok_or_else(|| ProtocolError::Parameter {
            index: self.base.saturating_add(index),
            expected: "a boolean",
            found: value.to_string(),
        })
    }

    /// Integer-valued enum discriminant.
    pub(crate) fn discriminant(&self, index: usize, field: &'static str) -> Result<u8, ProtocolError> {
        let value = self.value(index, "an enum discriminant")?;
        let raw = value.as_u64().ok_or_else(|| ProtocolError::Parameter {
            index: self.base.saturating_add(index),
            expected: "an enum discriminant",
            found: value.to_string(),
        })?;
        u8::try_from(raw)
            .ok()
            .ok_or(ProtocolError::UnknownDiscriminant { field, value: raw })
    }
}
