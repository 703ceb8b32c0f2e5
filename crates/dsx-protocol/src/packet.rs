//! Command packets: an ordered list of instructions sent as one datagram.

use serde::{Deserialize, Serialize};

use crate::wire::WirePacket;
use crate::{Instruction, InstructionType, ProtocolError};

/// Instructions forwarded to DSX in one datagram, in order.
///
/// Serializes as `{ "instructions": [ { "type": n, "parameters": [...] } ] }`.
/// The packet carries exactly the instructions pushed into it; there are no
/// fixed slots.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "WirePacket", try_from = "WirePacket")]
pub struct CommandPacket {
    pub instructions: Vec<Instruction>,
}

impl CommandPacket {
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }

    pub fn push(&mut self, instruction: Instruction) {
        self.instructions.push(instruction);
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Instruction> {
        self.instructions.iter()
    }

    /// JSON text as sent to DSX.
    pub fn to_json(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(&WirePacket::from(self))?)
    }

    /// Datagram payload as sent to DSX.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ProtocolError> {
        Ok(serde_json::to_vec(&WirePacket::from(self))?)
    }

    /// Parse a datagram payload back into typed instructions.
    ///
    /// Entries tagged `Invalid` (type 0) are skipped: fixed-slot senders
    /// leave unused slots that way.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, ProtocolError> {
        let wire: WirePacket = serde_json::from_slice(bytes)?;
        Self::try_from(wire)
    }
}

impl From<&CommandPacket> for WirePacket {
    fn from(packet: &CommandPacket) -> Self {
        WirePacket {
            instructions: packet.iter().map(Instruction::to_wire).collect(),
        }
    }
}

impl From<CommandPacket> for WirePacket {
    fn from(packet: CommandPacket) -> Self {
        WirePacket::from(&packet)
    }
}

impl TryFrom<WirePacket> for CommandPacket {
    type Error = ProtocolError;

    fn try_from(wire: WirePacket) -> Result<Self, Self::Error> {
        let invalid = i64::from(InstructionType::Invalid.id());
        let instructions = wire
            .instructions
            .iter()
            .filter(|w| w.kind != invalid)
            .map(Instruction::from_wire)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { instructions })
    }
}

impl FromIterator<Instruction> for CommandPacket {
    fn from_iter<I: IntoIterator<Item = Instruction>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a CommandPacket {
    type Item = &'a Instruction;
    type IntoIter = std::slice::Iter<'a, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
