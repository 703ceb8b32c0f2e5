//! End-to-end tests driving the bridge over loopback UDP.

use std::time::Duration;

use forza_dualsense_bridge::{BridgeConfig, DropReason, TelemetryBridge, Tick};
use forza_dualsense_dsx_protocol::{CommandPacket, Instruction, Trigger, TriggerMode};
use forza_dualsense_telemetry::TelemetryError;
use tokio::net::UdpSocket;
use tokio::time::timeout;

type TestResult = Result<(), Box<dyn std::error::Error>>;

const WAIT: Duration = Duration::from_secs(2);

fn put_f32(buf: &mut [u8], offset: usize, value: f32) {
    if let Some(slot) = buf.get_mut(offset..offset + 4) {
        slot.copy_from_slice(&value.to_le_bytes());
    }
}

/// Data Out datagram with RPM and uniform combined slip filled in.
fn datagram(len: usize, slip: f32, rpm: f32, max_rpm: f32) -> Vec<u8> {
    let mut buf = vec![0u8; len];
    put_f32(&mut buf, 8, max_rpm);
    put_f32(&mut buf, 16, rpm);
    for wheel in 0..4 {
        put_f32(&mut buf, 180 + wheel * 4, slip);
    }
    buf
}

struct Rig {
    bridge: TelemetryBridge,
    game: UdpSocket,
    dsx: UdpSocket,
}

impl Rig {
    async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let dsx = UdpSocket::bind("127.0.0.1:0").await?;
        let config = BridgeConfig::default()
            .with_listen("127.0.0.1:0".parse()?)
            .with_peer(dsx.local_addr()?);
        let bridge = TelemetryBridge::bind(config).await?;
        let game = UdpSocket::bind("127.0.0.1:0").await?;
        Ok(Self { bridge, game, dsx })
    }

    async fn send(&self, datagram: &[u8]) -> TestResult {
        self.game.send_to(datagram, self.bridge.local_addr()?).await?;
        Ok(())
    }

    async fn receive(&self) -> Result<CommandPacket, Box<dyn std::error::Error>> {
        let mut buf = [0u8; 2048];
        let (len, _) = timeout(WAIT, self.dsx.recv_from(&mut buf)).await??;
        let payload = buf.get(..len).ok_or("short read")?;
        Ok(CommandPacket::from_json_slice(payload)?)
    }
}

#[tokio::test]
async fn forwards_cardash_tick() -> TestResult {
    let mut rig = Rig::new().await?;
    rig.send(&datagram(311, 0.1, 3500.0, 7000.0)).await?;

    let tick = timeout(WAIT, rig.bridge.process_next()).await?;
    assert!(matches!(tick, Tick::Forwarded { .. }));

    let packet = rig.receive().await?;
    assert_eq!(
        packet.instructions,
        vec![
            Instruction::trigger(0, Trigger::Left, TriggerMode::resistance(0, 8)),
            Instruction::rgb(0, 0, 127, 0),
            Instruction::trigger(0, Trigger::Right, TriggerMode::resistance(0, 8)),
        ]
    );
    assert_eq!(rig.bridge.stats().forwarded, 1);
    Ok(())
}

#[tokio::test]
async fn forwards_horizon_tick_with_slip() -> TestResult {
    let mut rig = Rig::new().await?;
    rig.send(&datagram(324, 0.625, 7000.0, 7000.0)).await?;

    timeout(WAIT, rig.bridge.process_next()).await?;
    let packet = rig.receive().await?;
    assert_eq!(
        packet.instructions.first(),
        Some(&Instruction::trigger(
            0,
            Trigger::Left,
            TriggerMode::vibrate_resistance(18, 104, 76)
        ))
    );
    assert_eq!(packet.instructions.get(1), Some(&Instruction::rgb(0, 0, 255, 0)));
    Ok(())
}

#[tokio::test]
async fn drops_unsupported_length_without_sending() -> TestResult {
    let mut rig = Rig::new().await?;
    rig.send(&[0u8; 100]).await?;

    let tick = timeout(WAIT, rig.bridge.process_next()).await?;
    assert!(matches!(
        tick,
        Tick::Dropped(DropReason::Telemetry(TelemetryError::UnsupportedLength { len: 100 }))
    ));

    let mut buf = [0u8; 64];
    let nothing = timeout(Duration::from_millis(200), rig.dsx.recv_from(&mut buf)).await;
    assert!(nothing.is_err(), "DSX must not receive anything for a dropped tick");

    let stats = rig.bridge.stats();
    assert_eq!(stats.received, 1);
    assert_eq!(stats.dropped, 1);
    assert_eq!(stats.forwarded, 0);
    Ok(())
}

#[tokio::test]
async fn drops_sled_and_keeps_going() -> TestResult {
    let mut rig = Rig::new().await?;
    rig.send(&datagram(232, 0.0, 0.0, 0.0)).await?;
    rig.send(&datagram(311, 0.0, 0.0, 7000.0)).await?;

    let first = timeout(WAIT, rig.bridge.process_next()).await?;
    assert!(matches!(
        first,
        Tick::Dropped(DropReason::Telemetry(TelemetryError::SledOnly))
    ));
    let second = timeout(WAIT, rig.bridge.process_next()).await?;
    assert!(matches!(second, Tick::Forwarded { .. }));

    let packet = rig.receive().await?;
    assert_eq!(packet.len(), 3);
    Ok(())
}

#[tokio::test]
async fn run_until_stops_and_reports() -> TestResult {
    let mut rig = Rig::new().await?;
    rig.send(&datagram(311, 0.0, 1000.0, 7000.0)).await?;
    rig.send(&[1u8; 10]).await?;

    let stats = rig
        .bridge
        .run_until(tokio::time::sleep(Duration::from_millis(300)))
        .await;
    assert_eq!(stats.received, 2);
    assert_eq!(stats.forwarded, 1);
    assert_eq!(stats.dropped, 1);

    let packet = rig.receive().await?;
    assert_eq!(packet.instructions.get(1), Some(&Instruction::rgb(0, 0, 36, 0)));
    Ok(())
}
