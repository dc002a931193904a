//! Game event logging for the firmware.
//!
//! Every event the game reports is timestamped, kept in a small ring for
//! post-mortem inspection over the debugger, and mirrored to defmt (or stdout
//! when the crate is built for the host).

#![allow(dead_code)]

use embassy_time::{Duration, Instant};
use heapless::{HistoryBuf, OldestOrdered};
use simon_core::telemetry::{EventId, GameEvent, TelemetrySink};

/// Total number of telemetry entries retained in memory.
pub const TELEMETRY_RING_CAPACITY: usize = 64;

/// Event stored in the ring with its timestamp.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TelemetryRecord {
    pub id: EventId,
    pub timestamp: Instant,
    pub event: GameEvent,
    pub elapsed_since_previous: Option<Duration>,
}

/// [`TelemetrySink`] that logs and retains game events.
pub struct LogTelemetry {
    ring: HistoryBuf<TelemetryRecord, TELEMETRY_RING_CAPACITY>,
    last_event_at: Option<Instant>,
    next_event_id: EventId,
}

impl LogTelemetry {
    pub const fn new() -> Self {
        Self {
            ring: HistoryBuf::new(),
            last_event_at: None,
            next_event_id: 0,
        }
    }

    /// Returns an iterator over the recorded telemetry in chronological order.
    pub fn oldest_first(&self) -> OldestOrdered<'_, TelemetryRecord> {
        self.ring.oldest_ordered()
    }

    pub fn latest(&self) -> Option<&TelemetryRecord> {
        self.ring.recent()
    }

    pub fn len(&self) -> usize {
        self.ring.len()
    }

    /// Records `event` as having happened at `timestamp` and logs it.
    pub fn record_at(&mut self, event: GameEvent, timestamp: Instant) -> EventId {
        let elapsed = self
            .last_event_at
            .map(|previous| timestamp.saturating_duration_since(previous));
        self.last_event_at = Some(timestamp);

        let id = self.next_event_id;
        self.next_event_id = self.next_event_id.wrapping_add(1);
        self.ring.write(TelemetryRecord {
            id,
            timestamp,
            event,
            elapsed_since_previous: elapsed,
        });

        emit_log(&event, timestamp.as_micros(), elapsed.map(|value| value.as_micros()));
        id
    }
}

impl Default for LogTelemetry {
    fn default() -> Self {
        Self::new()
    }
}

impl TelemetrySink for LogTelemetry {
    fn record(&mut self, event: GameEvent) {
        self.record_at(event, now());
    }
}

const fn is_warning(event: &GameEvent) -> bool {
    matches!(
        event,
        GameEvent::Mismatch { .. } | GameEvent::IdleTimeout { .. }
    )
}

#[cfg(target_os = "none")]
fn now() -> Instant {
    Instant::now()
}

#[cfg(not(target_os = "none"))]
fn now() -> Instant {
    Instant::from_ticks(0)
}

#[cfg(target_os = "none")]
fn emit_log(event: &GameEvent, timestamp_us: u64, delta_us: Option<u64>) {
    let warning = is_warning(event);
    let event = defmt::Display2Format(event);
    let delta_us = delta_us.unwrap_or(0);
    if warning {
        defmt::warn!("game {} t={}us Δ={}us", event, timestamp_us, delta_us);
    } else {
        defmt::info!("game {} t={}us Δ={}us", event, timestamp_us, delta_us);
    }
}

#[cfg(not(target_os = "none"))]
fn emit_log(event: &GameEvent, timestamp_us: u64, delta_us: Option<u64>) {
    let level = if is_warning(event) { "WARN" } else { "INFO" };
    match delta_us {
        Some(delta) => println!("{level} game {event} t={timestamp_us}us Δ={delta}us"),
        None => println!("{level} game {event} t={timestamp_us}us"),
    }
}

#[cfg(test)]
mod tests {
    use simon_core::Symbol;
    use simon_core::game::Phase;

    use super::*;

    fn micros(value: u64) -> Instant {
        Instant::from_micros(value)
    }

    #[test]
    fn records_elapsed_between_events() {
        let mut telemetry = LogTelemetry::new();

        let first = telemetry.record_at(GameEvent::RoundPresented { length: 1 }, micros(100));
        assert_eq!(first, 0);
        assert_eq!(telemetry.latest().and_then(|record| record.elapsed_since_previous), None);

        let second = telemetry.record_at(
            GameEvent::Mismatch {
                index: 0,
                expected: Symbol::One,
                pressed: Symbol::Four,
            },
            micros(250),
        );
        assert_eq!(second, 1);

        let latest = telemetry.latest().copied().unwrap();
        assert_eq!(latest.elapsed_since_previous.map(|value| value.as_micros()), Some(150));
        assert!(is_warning(&latest.event));
    }

    #[test]
    fn ring_keeps_only_recent_events() {
        let mut telemetry = LogTelemetry::new();
        for tick in 0..=TELEMETRY_RING_CAPACITY as u64 {
            telemetry.record_at(GameEvent::StepAccepted { index: 0 }, micros(tick));
        }
        telemetry.record_at(
            GameEvent::IdleTimeout {
                phase: Phase::Listening,
            },
            micros(10_000),
        );

        assert_eq!(telemetry.len(), TELEMETRY_RING_CAPACITY);
        let oldest = telemetry.oldest_first().next().copied().unwrap();
        assert_eq!(oldest.id, 2);
        assert_eq!(telemetry.latest().map(|record| record.id), Some(65));
    }
}
