//! Typed DSX instructions and their positional wire form.

use serde_json::Value;

use crate::types::{InstructionType, Trigger, TriggerMode};
use crate::wire::{Params, WireInstruction};
use crate::ProtocolError;

/// One command for the DSX listener.
///
/// Every instruction starts with the controller index it addresses; the
/// remaining fields depend on the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instruction {
    /// Set an adaptive trigger's mode.
    TriggerUpdate {
        controller: u8,
        trigger: Trigger,
        mode: TriggerMode,
    },
    /// Set the light bar colour.
    RgbUpdate {
        controller: u8,
        red: u8,
        green: u8,
        blue: u8,
    },
    /// Player indicator LEDs 1-5.
    PlayerLed { controller: u8, leds: [bool; 5] },
    /// Analog threshold (0-255) for one trigger.
    TriggerThreshold {
        controller: u8,
        trigger: Trigger,
        threshold: u8,
    },
}

impl Instruction {
    pub fn trigger(controller: u8, trigger: Trigger, mode: TriggerMode) -> Self {
        Self::TriggerUpdate {
            controller,
            trigger,
            mode,
        }
    }

    pub fn rgb(controller: u8, red: u8, green: u8, blue: u8) -> Self {
        Self::RgbUpdate {
            controller,
            red,
            green,
            blue,
        }
    }

    pub fn kind(&self) -> InstructionType {
        match self {
            Self::TriggerUpdate { .. } => InstructionType::TriggerUpdate,
            Self::RgbUpdate { .. } => InstructionType::RgbUpdate,
            Self::PlayerLed { .. } => InstructionType::PlayerLed,
            Self::TriggerThreshold { .. } => InstructionType::TriggerThreshold,
        }
    }

    pub fn controller(&self) -> u8 {
        match self {
            Self::TriggerUpdate { controller, .. }
            | Self::RgbUpdate { controller, .. }
            | Self::PlayerLed { controller, .. }
            | Self::TriggerThreshold { controller, .. } => *controller,
        }
    }

    /// Positional parameter list as DSX expects it.
    pub fn parameters(&self) -> Vec<Value> {
        let mut out = vec![Value::from(self.controller())];
        match self {
            Self::TriggerUpdate { trigger, mode, .. } => {
                out.push(Value::from(trigger.id()));
                mode.write_params(&mut out);
            }
            Self::RgbUpdate {
                red, green, blue, ..
            } => {
                out.extend([*red, *green, *blue].map(Value::from));
            }
            Self::PlayerLed { leds, .. } => {
                out.extend(leds.map(Value::from));
            }
            Self::TriggerThreshold {
                trigger, threshold, ..
            } => {
                out.push(Value::from(trigger.id()));
                out.push(Value::from(*threshold));
            }
        }
        out
    }

    pub fn to_wire(&self) -> WireInstruction {
        WireInstruction {
            kind: i64::from(self.kind().id()),
            parameters: self.parameters(),
        }
    }

    /// Rebuild a typed instruction, checking arity and parameter types.
    pub fn from_wire(wire: &WireInstruction) -> Result<Self, ProtocolError> {
        let kind = InstructionType::from_id(wire.kind)
            .filter(|k| *k != InstructionType::Invalid)
            .ok_or(ProtocolError::UnknownInstructionType(wire.kind))?;
        let p = Params::new(&wire.parameters);

        let instruction = match kind {
            InstructionType::TriggerUpdate => {
                if p.len() < 3 {
                    return Err(ProtocolError::Arity {
                        what: "TriggerUpdate",
                        expected: 3,
                        actual: p.len(),
                    });
                }
                Self::TriggerUpdate {
                    controller: p.u8(0)?,
                    trigger: read_trigger(&p, 1)?,
                    mode: TriggerMode::read_params(&p.skip(2))?,
                }
            }
            InstructionType::RgbUpdate => {
                p.expect_len("RGBUpdate", 4)?;
                Self::RgbUpdate {
                    controller: p.u8(0)?,
                    red: p.u8(1)?,
                    green: p.u8(2)?,
                    blue: p.u8(3)?,
                }
            }
            InstructionType::PlayerLed => {
                p.expect_len("PlayerLED", 6)?;
                let mut leds = [false; 5];
                for (i, led) in leds.iter_mut().enumerate() {
                    *led = p.bool(i + 1)?;
                }
                Self::PlayerLed {
                    controller: p.u8(0)?,
                    leds,
                }
            }
            InstructionType::TriggerThreshold => {
                p.expect_len("TriggerThreshold", 3)?;
                Self::TriggerThreshold {
                    controller: p.u8(0)?,
                    trigger: read_trigger(&p, 1)?,
                    threshold: p.u8(2)?,
                }
            }
            InstructionType::Invalid => {
                return Err(ProtocolError::UnknownInstructionType(wire.kind));
            }
        };
        Ok(instruction)
    }
}

fn read_trigger(p: &Params<'_>, index: usize) -> Result<Trigger, ProtocolError> {
    let id = p.discriminant(index, "trigger")?;
    Trigger::from_id(id).ok_or(ProtocolError::UnknownDiscriminant {
        field: "trigger",
        value: u64::from(id),
    })
}
