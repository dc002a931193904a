//! Game event catalog shared by firmware and host targets.
//!
//! The game reports what it is doing through a [`TelemetrySink`]. The
//! firmware mirrors events to its log transport, the emulator writes them to
//! a transcript, and tests keep them in a [`TelemetryLog`] to assert on the
//! sequence of transitions.

use core::fmt;

use heapless::{HistoryBuf, OldestOrdered};

use crate::game::Phase;
use crate::pattern::Symbol;

/// Sequential identifier assigned to recorded events.
pub type EventId = u32;

/// Discriminated events emitted by the game.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum GameEvent {
    /// Start press seen and the generator seeded.
    SessionStarted { seed: u32 },
    /// The pattern grew and was played back.
    RoundPresented { length: u8 },
    /// The player matched pattern step `index`.
    StepAccepted { index: u8 },
    Mismatch {
        index: u8,
        expected: Symbol,
        pressed: Symbol,
    },
    Won,
    Lost { score: u8 },
    /// Nobody touched a button for the whole idle budget.
    IdleTimeout { phase: Phase },
    PoweredDown,
    Woke,
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::SessionStarted { seed } => write!(f, "session-started seed={seed:#010x}"),
            GameEvent::RoundPresented { length } => write!(f, "round-presented length={length}"),
            GameEvent::StepAccepted { index } => write!(f, "step-accepted index={index}"),
            GameEvent::Mismatch {
                index,
                expected,
                pressed,
            } => write!(
                f,
                "mismatch index={index} expected={expected} pressed={pressed}"
            ),
            GameEvent::Won => f.write_str("won"),
            GameEvent::Lost { score } => write!(f, "lost score={score}"),
            GameEvent::IdleTimeout { phase } => write!(f, "idle-timeout phase={phase}"),
            GameEvent::PoweredDown => f.write_str("powered-down"),
            GameEvent::Woke => f.write_str("woke"),
        }
    }
}

/// Receiver for game events.
pub trait TelemetrySink {
    fn record(&mut self, event: GameEvent);
}

/// Sink that discards every event.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoopTelemetry;

impl TelemetrySink for NoopTelemetry {
    fn record(&mut self, _: GameEvent) {}
}

/// Recorded event with its sequence number.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct EventRecord {
    pub id: EventId,
    pub event: GameEvent,
}

/// Fixed-capacity ring of the most recent events.
pub struct TelemetryLog<const N: usize> {
    ring: HistoryBuf<EventRecord, N>,
    next_event_id: EventId,
}

impl<const N: usize> TelemetryLog<N> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ring: HistoryBuf::new(),
            next_event_id: 0,
        }
    }

    /// Iterates over retained events in chronological order.
    pub fn oldest_first(&self) -> OldestOrdered<'_, EventRecord> {
        self.ring.oldest_ordered()
    }

    /// Iterates over retained events without their identifiers.
    pub fn events(&self) -> impl Iterator<Item = GameEvent> + '_ {
        self.oldest_first().map(|record| record.event)
    }

    #[must_use]
    pub fn latest(&self) -> Option<&EventRecord> {
        self.ring.recent()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ring.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// Total number of events recorded, including evicted ones.
    #[must_use]
    pub const fn total_recorded(&self) -> EventId {
        self.next_event_id
    }

    /// Returns `true` if a retained event matches `predicate`.
    pub fn contains<F>(&self, mut predicate: F) -> bool
    where
        F: FnMut(&GameEvent) -> bool,
    {
        self.oldest_first().any(|record| predicate(&record.event))
    }
}

impl<const N: usize> Default for TelemetryLog<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> TelemetrySink for TelemetryLog<N> {
    fn record(&mut self, event: GameEvent) {
        let id = self.next_event_id;
        self.next_event_id = self.next_event_id.wrapping_add(1);
        self.ring.write(EventRecord { id, event });
    }
}

impl<T> TelemetrySink for &mut T
where
    T: TelemetrySink + ?Sized,
{
    fn record(&mut self, event: GameEvent) {
        (**self).record(event);
    }
}
