//! UDP transport: receive Forza datagrams, forward DSX command packets.
//!
//! One datagram in produces at most one datagram out. Nothing is buffered
//! across ticks and nothing is retried: the next telemetry tick arrives a
//! few milliseconds later and supersedes whatever was lost.

use std::future::Future;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

use anyhow::{Context, Result};
use forza_dualsense_haptics::HapticEncoder;
use tokio::net::UdpSocket;
use tracing::{debug, info, trace, warn};

use crate::config::BridgeConfig;
use crate::pipeline::{DropReason, translate_to_bytes};

/// Receive buffer size. Larger than any Data Out packet, so an oversized
/// datagram is still seen at its real length and rejected.
pub const RECV_BUFFER_SIZE: usize = 2048;

/// Counters since the bridge was bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BridgeStats {
    pub received: u64,
    pub forwarded: u64,
    pub dropped: u64,
    pub send_failures: u64,
    pub receive_failures: u64,
}

/// What happened to one receive.
#[derive(Debug)]
pub enum Tick {
    /// A command packet of `bytes` length went out to DSX.
    Forwarded { bytes: usize },
    /// The datagram was rejected before encoding finished.
    Dropped(DropReason),
    SendFailed,
    ReceiveFailed,
}

/// Forza → DSX bridge over two UDP sockets.
pub struct TelemetryBridge {
    telemetry: UdpSocket,
    dsx: UdpSocket,
    peer: SocketAddr,
    encoder: HapticEncoder,
    stats: BridgeStats,
    send_streak: FailureStreak,
    receive_streak: FailureStreak,
    buf: Vec<u8>,
}

/// Consecutive failures of one socket operation.
///
/// Only the first failure of a run is worth a warning: at 60 Hz a missing
/// DSX listener would otherwise log every tick.
#[derive(Debug, Default)]
struct FailureStreak {
    len: u64,
}

impl FailureStreak {
    /// Count a failure; true if it starts a new streak.
    fn fail(&mut self) -> bool {
        self.len = self.len.saturating_add(1);
        self.len == 1
    }

    /// End the streak, returning how many failures it held.
    fn clear(&mut self) -> u64 {
        std::mem::take(&mut self.len)
    }
}

impl TelemetryBridge {
    /// Bind the telemetry listener and an ephemeral sending socket.
    ///
    /// # Errors
    ///
    /// Fails if either socket cannot be bound (for example the telemetry
    /// port is already taken).
    pub async fn bind(config: BridgeConfig) -> Result<Self> {
        let telemetry = UdpSocket::bind(config.listen)
            .await
            .with_context(|| format!("failed to bind telemetry socket on {}", config.listen))?;
        let dsx = UdpSocket::bind(ephemeral_for(config.peer))
            .await
            .context("failed to bind DSX sending socket")?;

        info!(
            listen = %telemetry.local_addr()?,
            peer = %config.peer,
            "forwarding Forza telemetry to DSX"
        );

        Ok(Self {
            telemetry,
            dsx,
            peer: config.peer,
            encoder: config.encoder(),
            stats: BridgeStats::default(),
            send_streak: FailureStreak::default(),
            receive_streak: FailureStreak::default(),
            buf: vec![0u8; RECV_BUFFER_SIZE],
        })
    }

    /// Address the telemetry socket actually bound to.
    ///
    /// # Errors
    ///
    /// Propagates the OS error from `getsockname`.
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.telemetry.local_addr()?)
    }

    pub fn stats(&self) -> BridgeStats {
        self.stats
    }

    /// Wait for one datagram and forward or drop it.
    pub async fn process_next(&mut self) -> Tick {
        let (len, from) = match self.telemetry.recv_from(&mut self.buf).await {
            Ok(received) => received,
            Err(e) => {
                if self.receive_streak.fail() {
                    warn!("Telemetry UDP receive error: {e}");
                } else {
                    debug!("Telemetry UDP receive error: {e}");
                }
                self.stats.receive_failures = self.stats.receive_failures.saturating_add(1);
                return Tick::ReceiveFailed;
            }
        };
        self.stats.received = self.stats.received.saturating_add(1);
        let missed = self.receive_streak.clear();
        if missed > 0 {
            info!(missed, "Telemetry UDP receive recovered");
        }

        let datagram = self.buf.get(..len).unwrap_or_default();
        let payload = match translate_to_bytes(datagram, &self.encoder) {
            Ok(payload) => payload,
            Err(reason) => {
                debug!(len, %from, "dropped telemetry tick: {reason}");
                self.stats.dropped = self.stats.dropped.saturating_add(1);
                return Tick::Dropped(reason);
            }
        };

        match self.dsx.send_to(&payload, self.peer).await {
            Ok(bytes) => {
                trace!(len, bytes, "forwarded command packet");
                let missed = self.send_streak.clear();
                if missed > 0 {
                    info!(peer = %self.peer, missed, "DSX reachable again");
                }
                self.stats.forwarded = self.stats.forwarded.saturating_add(1);
                Tick::Forwarded { bytes }
            }
            Err(e) => {
                if self.send_streak.fail() {
                    warn!(peer = %self.peer, "DSX UDP send error: {e}");
                } else {
                    debug!(peer = %self.peer, "DSX UDP send error: {e}");
                }
                self.stats.send_failures = self.stats.send_failures.saturating_add(1);
                Tick::SendFailed
            }
        }
    }

    /// Forward ticks forever.
    pub async fn run(&mut self) {
        loop {
            self.process_next().await;
        }
    }

    /// Forward ticks until `shutdown` resolves, then return the final counters.
    pub async fn run_until<F>(&mut self, shutdown: F) -> BridgeStats
    where
        F: Future<Output = ()>,
    {
        let mut shutdown = std::pin::pin!(shutdown);
        loop {
            tokio::select! {
                () = &mut shutdown => break,
                _tick = self.process_next() => {}
            }
        }
        info!(
            received = self.stats.received,
            forwarded = self.stats.forwarded,
            dropped = self.stats.dropped,
            send_failures = self.stats.send_failures,
            "Stopped telemetry bridge"
        );
        self.stats
    }
}

fn ephemeral_for(peer: SocketAddr) -> SocketAddr {
    match peer.ip() {
        IpAddr::V4(_) => SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 0),
        IpAddr::V6(_) => SocketAddr::new(IpAddr::V6(Ipv6Addr::UNSPECIFIED), 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ephemeral_matches_peer_family() {
        let v4 = ephemeral_for(SocketAddr::from(([127, 0, 0, 1], 6750)));
        assert!(v4.is_ipv4());
        assert_eq!(v4.port(), 0);

        let v6 = ephemeral_for(SocketAddr::from((Ipv6Addr::LOCALHOST, 6750)));
        assert!(v6.is_ipv6());
    }

    #[test]
    fn test_failure_streak_warns_once_per_run() {
        let mut streak = FailureStreak::default();
        assert!(streak.fail());
        assert!(!streak.fail());
        assert!(!streak.fail());
        assert_eq!(streak.clear(), 3);
        assert!(streak.fail(), "a new run after recovery warns again");
    }

    #[test]
    fn test_failure_streak_clear_without_failures() {
        let mut streak = FailureStreak::default();
        assert_eq!(streak.clear(), 0);
        assert!(streak.fail());
    }

    #[test]
    fn test_stats_start_at_zero() {
        assert_eq!(BridgeStats::default().received, 0);
        assert_eq!(BridgeStats::default().forwarded, 0);
    }
}
