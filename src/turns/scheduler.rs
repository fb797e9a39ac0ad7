//! Orders per-participant turns into rounds.
//!
//! The scheduler owns a queue of turn slots. Ending a turn dequeues the
//! next slot; an empty queue refills with one slot per registered
//! participant (original order) and starts a new round. Effects that grant
//! extra turns insert slots with a priority; the queue re-sorts descending
//! by priority with FIFO ties.
//!
//! Notifications fire synchronously and expect no return value from
//! subscribers.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::events::EventBus;

/// A scheduled opportunity for one participant to act.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnSlot<P> {
    pub participant: P,
    pub priority: i32,
}

/// Turn and round notifications.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnEvent<P> {
    TurnStart { turn: u32, participant: P },
    TurnEnd { participant: P },
    RoundStart { round: u32 },
}

/// Round-oriented turn scheduler.
///
/// Generic over the participant id so players, creatures, or anything
/// else with a copyable identity can take turns.
pub struct TurnScheduler<P> {
    participants: Vec<P>,
    queue: Vec<TurnSlot<P>>,
    active: Option<P>,
    turn_number: u32,
    round_number: u32,
    transitioning: bool,
    events: EventBus<TurnEvent<P>>,
}

impl<P: Copy + Eq> TurnScheduler<P> {
    /// Create an idle scheduler with no participants.
    #[must_use]
    pub fn new() -> Self {
        Self {
            participants: Vec::new(),
            queue: Vec::new(),
            active: None,
            turn_number: 0,
            round_number: 0,
            transitioning: false,
            events: EventBus::new(),
        }
    }

    /// Subscribe to turn/round notifications.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&TurnEvent<P>) + 'static) {
        self.events.subscribe(subscriber);
    }

    /// The participant whose turn it is, if any.
    #[must_use]
    pub fn active(&self) -> Option<P> {
        self.active
    }

    /// Current turn number (1-based; 0 before the first turn).
    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    /// Current round number (1-based; 0 before the first round).
    #[must_use]
    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    /// Slots waiting in the current round, in dequeue order.
    #[must_use]
    pub fn pending_slots(&self) -> &[TurnSlot<P>] {
        &self.queue
    }

    /// Seed one slot per participant and start the first round and turn.
    ///
    /// Insertion order is the initial priority order and stays the refill
    /// order for every later round.
    pub fn init_turns(&mut self, participants: Vec<P>) {
        if participants.is_empty() {
            warn!("turn scheduler initialized with no participants");
            return;
        }
        self.participants = participants;
        self.refill_queue();
        self.round_number = 1;
        self.events
            .publish(&TurnEvent::RoundStart { round: 1 });
        self.start_next_turn();
    }

    /// End the active participant's turn and start the next one.
    ///
    /// Rejected (returns false, no state change) unless `requester` is the
    /// active participant and no transition is already in progress.
    pub fn end_turn_request(&mut self, requester: P) -> bool {
        if self.transitioning {
            warn!("turn end requested during a turn transition");
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };
        if active != requester {
            return false;
        }

        self.transitioning = true;
        self.events
            .publish(&TurnEvent::TurnEnd { participant: active });
        self.active = None;

        if self.queue.is_empty() {
            if self.participants.is_empty() {
                self.transitioning = false;
                return true;
            }
            self.refill_queue();
            self.round_number += 1;
            self.events.publish(&TurnEvent::RoundStart {
                round: self.round_number,
            });
        }
        self.start_next_turn();
        self.transitioning = false;
        true
    }

    /// Insert an extra slot, re-sorting by descending priority.
    ///
    /// Stable sort: equal priorities keep their insertion order.
    pub fn add_next_turn(&mut self, participant: P, priority: i32) {
        self.queue.push(TurnSlot {
            participant,
            priority,
        });
        self.queue.sort_by(|a, b| b.priority.cmp(&a.priority));
    }

    /// Drop every queued slot for a participant.
    ///
    /// Does not affect the currently active turn.
    pub fn remove_turns(&mut self, participant: P) {
        self.queue.retain(|slot| slot.participant != participant);
    }

    fn refill_queue(&mut self) {
        self.queue = self
            .participants
            .iter()
            .map(|&participant| TurnSlot {
                participant,
                priority: 0,
            })
            .collect();
    }

    fn start_next_turn(&mut self) {
        if self.queue.is_empty() {
            return;
        }
        let slot = self.queue.remove(0);
        self.active = Some(slot.participant);
        self.turn_number += 1;
        self.events.publish(&TurnEvent::TurnStart {
            turn: self.turn_number,
            participant: slot.participant,
        });
    }
}

impl<P: Copy + Eq> Default for TurnScheduler<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: std::fmt::Debug> std::fmt::Debug for TurnScheduler<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TurnScheduler")
            .field("active", &self.active)
            .field("turn_number", &self.turn_number)
            .field("round_number", &self.round_number)
            .field("queued", &self.queue.len())
            .finish()
    }
}
