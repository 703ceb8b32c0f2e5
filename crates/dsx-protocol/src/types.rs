//! DualSenseX enums and trigger modes.
//!
//! Discriminants match the integers the DSX UDP listener expects; the
//! names follow the DSX UI.

use serde_json::Value;

use crate::ProtocolError;
use crate::wire::Params;

/// Instruction tag (`"type"` on the wire).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum InstructionType {
    Invalid = 0,
    TriggerUpdate = 1,
    RgbUpdate = 2,
    PlayerLed = 3,
    TriggerThreshold = 4,
}

impl InstructionType {
    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn from_id(id: i64) -> Option<Self> {
        match id {
            0 => Some(Self::Invalid),
            1 => Some(Self::TriggerUpdate),
            2 => Some(Self::RgbUpdate),
            3 => Some(Self::PlayerLed),
            4 => Some(Self::TriggerThreshold),
            _ => None,
        }
    }
}

/// Which adaptive trigger an instruction addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Trigger {
    Left = 1,
    Right = 2,
}

impl Trigger {
    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Self::Left),
            2 => Some(Self::Right),
            _ => None,
        }
    }
}

/// Sub-mode of [`TriggerMode::CustomTriggerValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CustomTriggerValueMode {
    Off = 0,
    Rigid = 1,
    RigidA = 2,
    RigidB = 3,
    RigidAb = 4,
    Pulse = 5,
    PulseA = 6,
    PulseB = 7,
    PulseAb = 8,
    VibrateResistance = 9,
    VibrateResistanceA = 10,
    VibrateResistanceB = 11,
    VibrateResistanceAb = 12,
    VibratePulse = 13,
    VibratePulseA = 14,
    VibratePulseB = 15,
    VibratePulseAb = 16,
}

impl CustomTriggerValueMode {
    /// Every sub-mode, indexed by discriminant.
    pub const ALL: [Self; 17] = [
        Self::Off,
        Self::Rigid,
        Self::RigidA,
        Self::RigidB,
        Self::RigidAb,
        Self::Pulse,
        Self::PulseA,
        Self::PulseB,
        Self::PulseAb,
        Self::VibrateResistance,
        Self::VibrateResistanceA,
        Self::VibrateResistanceB,
        Self::VibrateResistanceAb,
        Self::VibratePulse,
        Self::VibratePulseA,
        Self::VibratePulseB,
        Self::VibratePulseAb,
    ];

    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(usize::from(id)).copied()
    }
}

/// Adaptive trigger behaviour, one variant per DSX mode.
///
/// Each variant carries only the fields its mode takes; ranges noted on
/// fields are the ones DSX documents. Values outside them are sent as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerMode {
    /// Released trigger, no resistance. DSX ignores `start` and `force`; the
    /// haptics path sends both as zero.
    Normal { start: u8, force: u8 },
    GameCube,
    VerySoft,
    Soft,
    Hard,
    VeryHard,
    Hardest,
    Rigid,
    /// `frequency`: 0-255.
    VibrateTrigger { frequency: u8 },
    Choppy,
    Medium,
    VibrateTriggerPulse,
    /// Raw effect: a sub-mode plus seven byte values whose meaning depends on
    /// the sub-mode.
    CustomTriggerValue {
        mode: CustomTriggerValueMode,
        values: [u8; 7],
    },
    /// `start`: 0-9, `force`: 0-8.
    Resistance { start: u8, force: u8 },
    /// `start`, `end`, `force`, `snap_force`: 0-8.
    Bow {
        start: u8,
        end: u8,
        force: u8,
        snap_force: u8,
    },
    /// `start` 0-8, `end` 0-9, `first_foot` 0-6, `second_foot` 0-7,
    /// `frequency` 0-255.
    Galloping {
        start: u8,
        end: u8,
        first_foot: u8,
        second_foot: u8,
        frequency: u8,
    },
    /// `start` 2-7, `end` 0-8, `force` 0-8.
    SemiAutomaticGun { start: u8, end: u8, force: u8 },
    /// `start` 0-9, `strength` 0-8, `frequency` 0-255.
    AutomaticGun { start: u8, strength: u8, frequency: u8 },
    /// `start` 0-8, `end` 0-9, `strength_a`/`strength_b` 0-7,
    /// `frequency` 0-255, `period` 0-2.
    Machine {
        start: u8,
        end: u8,
        strength_a: u8,
        strength_b: u8,
        frequency: u8,
        period: u8,
    },
}

impl TriggerMode {
    /// Trigger with no resistance, as sent when grip is lost.
    pub const RELEASED: Self = Self::Normal { start: 0, force: 0 };

    pub fn resistance(start: u8, force: u8) -> Self {
        Self::Resistance { start, force }
    }

    /// Vibrating resistance: `[frequency, stiffness, start]` followed by the
    /// four zero values the sub-mode requires.
    pub fn vibrate_resistance(frequency: u8, stiffness: u8, start: u8) -> Self {
        Self::CustomTriggerValue {
            mode: CustomTriggerValueMode::VibrateResistance,
            values: [frequency, stiffness, start, 0, 0, 0, 0],
        }
    }

    /// Wire discriminant (0-18).
    pub fn id(&self) -> u8 {
        match self {
            Self::Normal { .. } => 0,
            Self::GameCube => 1,
            Self::VerySoft => 2,
            Self::Soft => 3,
            Self::Hard => 4,
            Self::VeryHard => 5,
            Self::Hardest => 6,
            Self::Rigid => 7,
            Self::VibrateTrigger { .. } => 8,
            Self::Choppy => 9,
            Self::Medium => 10,
            Self::VibrateTriggerPulse => 11,
            Self::CustomTriggerValue { .. } => 12,
            Self::Resistance { .. } => 13,
            Self::Bow { .. } => 14,
            Self::Galloping { .. } => 15,
            Self::SemiAutomaticGun { .. } => 16,
            Self::AutomaticGun { .. } => 17,
            Self::Machine { .. } => 18,
        }
    }

    /// Append the mode discriminant and its own parameters.
    pub fn write_params(&self, out: &mut Vec<Value>) {
        out.push(Value::from(self.id()));
        let own: Vec<u8> = match self {
            Self::Normal { start, force } | Self::Resistance { start, force } => vec![*start, *force],
            Self::VibrateTrigger { frequency } => vec![*frequency],
            Self::CustomTriggerValue { mode, values } => {
                out.push(Value::from(mode.id()));
                values.to_vec()
            }
            Self::Bow {
                start,
                end,
                force,
                snap_force,
            } => vec![*start, *end, *force, *snap_force],
            Self::Galloping {
                start,
                end,
                first_foot,
                second_foot,
                frequency,
            } => vec![*start, *end, *first_foot, *second_foot, *frequency],
            Self::SemiAutomaticGun { start, end, force } => vec![*start, *end, *force],
            Self::AutomaticGun {
                start,
                strength,
                frequency,
            } => vec![*start, *strength, *frequency],
            Self::Machine {
                start,
                end,
                strength_a,
                strength_b,
                frequency,
                period,
            } => vec![*start, *end, *strength_a, *strength_b, *frequency, *period],
            Self::GameCube
            | Self::VerySoft
            | Self::Soft
            | Self::Hard
            | Self::VeryHard
            | Self::Hardest
            | Self::Rigid
            | Self::Choppy
            | Self::Medium
            | Self::VibrateTriggerPulse => Vec::new(),
        };
        out.extend(own.into_iter().map(Value::from));
    }

    /// Rebuild a mode from its discriminant at `params[0]` and the values
    /// after it. `params` must hold nothing beyond the mode's own fields.
    pub(crate) fn read_params(params: &Params<'_>) -> Result<Self, ProtocolError> {
        let id = params.discriminant(0, "trigger mode")?;
        let p = params.skip(1);
        let exact = |what: &'static str, n: usize| p.expect_len(what, n);

        let mode = match id {
            0 => match p.len() {
                // Presets sent without start/force are equally valid.
                0 => Self::RELEASED,
                _ => {
                    exact("Normal", 2)?;
                    Self::Normal {
                        start: p.u8(0)?,
                        force: p.u8(1)?,
                    }
                }
            },
            1..=7 | 9..=11 => {
                exact("preset trigger mode", 0)?;
                match id {
                    1 => Self::GameCube,
                    2 => Self::VerySoft,
                    3 => Self::Soft,
                    4 => Self::Hard,
                    5 => Self::VeryHard,
                    6 => Self::Hardest,
                    7 => Self::Rigid,
                    9 => Self::Choppy,
                    10 => Self::Medium,
                    _ => Self::VibrateTriggerPulse,
                }
            }
            8 => {
                exact("VibrateTrigger", 1)?;
                Self::VibrateTrigger {
                    frequency: p.u8(0)?,
                }
            }
            12 => {
                exact("CustomTriggerValue", 8)?;
                let sub = p.discriminant(0, "custom trigger value mode")?;
                let mode = CustomTriggerValueMode::from_id(sub).ok_or(
                    ProtocolError::UnknownDiscriminant {
                        field: "custom trigger value mode",
                        value: u64::from(sub),
                    },
                )?;
                let mut values = [0u8; 7];
                for (i, slot) in values.iter_mut().enumerate() {
                    *slot = p.u8(i + 1)?;
                }
                Self::CustomTriggerValue { mode, values }
            }
            13 => {
                exact("Resistance", 2)?;
                Self::Resistance {
                    start: p.u8(0)?,
                    force: p.u8(1)?,
                }
            }
            14 => {
                exact("Bow", 4)?;
                Self::Bow {
                    start: p.u8(0)?,
                    end: p.u8(1)?,
                    force: p.u8(2)?,
                    snap_force: p.u8(3)?,
                }
            }
            15 => {
                exact("Galloping", 5)?;
                Self::Galloping {
                    start: p.u8(0)?,
                    end: p.u8(1)?,
                    first_foot: p.u8(2)?,
                    second_foot: p.u8(3)?,
                    frequency: p.u8(4)?,
                }
            }
            16 => {
                exact("SemiAutomaticGun", 3)?;
                Self::SemiAutomaticGun {
                    start: p.u8(0)?,
                    end: p.u8(1)?,
                    force: p.u8(2)?,
                }
            }
            17 => {
                exact("AutomaticGun", 3)?;
                Self::AutomaticGun {
                    start: p.u8(0)?,
                    strength: p.u8(1)?,
                    frequency: p.u8(2)?,
                }
            }
            18 => {
                exact("Machine", 6)?;
                Self::Machine {
                    start: p.u8(0)?,
                    end: p.u8(1)?,
                    strength_a: p.u8(2)?,
                    strength_b: p.u8(3)?,
                    frequency: p.u8(4)?,
                    period: p.u8(5)?,
                }
            }
            other => {
                return Err(ProtocolError::UnknownDiscriminant {
                    field: "trigger mode",
                    value: u64::from(other),
                });
            }
        };
        Ok(mode)
    }
}
