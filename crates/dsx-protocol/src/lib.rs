//! DualSenseX (DSX) UDP command protocol.
//!
//! DSX listens for JSON datagrams of the shape
//!
//! ```text
//! { "instructions": [ { "type": 1, "parameters": [0, 1, 13, 0, 8] } ] }
//! ```
//!
//! where `type` selects the instruction kind and `parameters` is a positional
//! list whose length and element types depend on the kind and, for trigger
//! updates, on the trigger mode. This crate models each kind and each
//! trigger mode as a typed variant and only produces the positional form at
//! the serialization boundary.
//!
//! Pure encoding: no sockets, no state.
//!
//! ```
//! use forza_dualsense_dsx_protocol::{CommandPacket, Instruction, Trigger, TriggerMode};
//!
//! let packet = CommandPacket::new(vec![
//!     Instruction::trigger(0, Trigger::Right, TriggerMode::resistance(0, 8)),
//! ]);
//! assert_eq!(
//!     packet.to_json()?,
//!     r#"{"instructions":[{"type":1,"parameters":[0,2,13,0,8]}]}"#
//! );
//! # Ok::<(), forza_dualsense_dsx_protocol::ProtocolError>(())
//! ```

#![deny(static_mut_refs)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod instruction;
pub mod packet;
pub mod types;
pub mod wire;

pub use error::ProtocolError;
pub use instruction::Instruction;
pub use packet::CommandPacket;
pub use types::{CustomTriggerValueMode, InstructionType, Trigger, TriggerMode};
pub use wire::{WireInstruction, WirePacket};
