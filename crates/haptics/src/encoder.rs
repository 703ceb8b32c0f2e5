//! Telemetry record → DSX command packet.

use forza_dualsense_dsx_protocol::{CommandPacket, Instruction, Trigger};
use forza_dualsense_telemetry::TelemetryRecord;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::grip::{FULL_RESISTANCE, combined_slip, grip_trigger_mode};
use crate::lightbar::rpm_green;

/// Optional encoder behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderSettings {
    /// Drive the right trigger with the same grip policy as the left one
    /// instead of holding it at full resistance.
    pub throttle_grip_feedback: bool,
}

/// Stateless encoder producing one command packet per telemetry record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HapticEncoder {
    controller: u8,
    settings: EncoderSettings,
}

impl HapticEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Address a controller index other than 0.
    pub fn with_controller(mut self, controller: u8) -> Self {
        self.controller = controller;
        self
    }

    pub fn with_settings(mut self, settings: EncoderSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn controller(&self) -> u8 {
        self.controller
    }

    pub fn settings(&self) -> EncoderSettings {
        self.settings
    }

    /// Build the packet for one tick: left trigger, light bar, right trigger.
    pub fn encode(&self, record: &TelemetryRecord) -> CommandPacket {
        let slip = combined_slip(record);
        let left = grip_trigger_mode(slip);
        let right = if self.settings.throttle_grip_feedback {
            left
        } else {
            FULL_RESISTANCE
        };
        let green = rpm_green(record.current_engine_rpm, record.engine_max_rpm);

        trace!(slip, green, ?left, ?right, "encoded haptics tick");

        CommandPacket::new(vec![
            Instruction::trigger(self.controller, Trigger::Left, left),
            Instruction::rgb(self.controller, 0, green, 0),
            Instruction::trigger(self.controller, Trigger::Right, right),
        ])
    }
}

/// Encode with the default encoder (controller 0, no throttle feedback).
pub fn encode(record: &TelemetryRecord) -> CommandPacket {
    HapticEncoder::default().encode(record)
}
