//! One-shot delayed callbacks
//!
//! Callbacks are plain data and run on the simulation thread between ticks,
//! so they never race with the tick itself.

use serde::{Deserialize, Serialize};

use super::state::PlayerId;

/// Slack when comparing due times against the accumulated clock
const TIME_EPSILON: f64 = 1e-9;

/// Work that can be deferred to a later tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduledEvent {
    /// Bring a dead player back to life
    Revive(PlayerId),
    /// Land a queued AI explosion near the human player
    AiAttack,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Entry {
    due: f64,
    seq: u64,
    event: ScheduledEvent,
}

/// Time-ordered queue of one-shot callbacks
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schedule {
    /// Sorted by (due, seq) descending so the next entry sits at the end
    entries: Vec<Entry>,
    next_seq: u64,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `event` to fire `delay` seconds after `now`
    pub fn schedule_once(&mut self, event: ScheduledEvent, now: f64, delay: f64) -> f64 {
        let due = now + delay.max(0.0);
        let seq = self.next_seq;
        self.next_seq += 1;

        // Later entries go first; equal due times keep insertion order
        let index = self
            .entries
            .partition_point(|e| e.due > due || (e.due == due && e.seq > seq));
        self.entries.insert(index, Entry { due, seq, event });
        due
    }

    /// Remove and return the earliest event due at `now`
    pub fn pop_due(&mut self, now: f64) -> Option<ScheduledEvent> {
        match self.entries.last() {
            Some(next) if next.due <= now + TIME_EPSILON => self.entries.pop().map(|e| e.event),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pending events in firing order
    pub fn pending(&self) -> impl Iterator<Item = (f64, ScheduledEvent)> + '_ {
        self.entries.iter().rev().map(|e| (e.due, e.event))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_in_time_order() {
        let mut schedule = Schedule::new();
        schedule.schedule_once(ScheduledEvent::AiAttack, 0.0, 3.0);
        schedule.schedule_once(ScheduledEvent::Revive(PlayerId::Human), 0.0, 1.0);

        assert_eq!(
            schedule.pending().next(),
            Some((1.0, ScheduledEvent::Revive(PlayerId::Human)))
        );
        assert_eq!(schedule.pop_due(0.5), None);
        assert_eq!(
            schedule.pop_due(1.0),
            Some(ScheduledEvent::Revive(PlayerId::Human))
        );
        assert_eq!(schedule.pop_due(1.0), None);
        assert_eq!(schedule.pop_due(3.5), Some(ScheduledEvent::AiAttack));
        assert!(schedule.is_empty());
    }

    #[test]
    fn test_equal_due_times_keep_insertion_order() {
        let mut schedule = Schedule::new();
        schedule.schedule_once(ScheduledEvent::Revive(PlayerId::Ai), 1.0, 1.0);
        schedule.schedule_once(ScheduledEvent::AiAttack, 1.0, 1.0);
        schedule.schedule_once(ScheduledEvent::Revive(PlayerId::Human), 1.0, 1.0);

        let order: Vec<_> = schedule.pending().map(|(_, e)| e).collect();
        assert_eq!(
            order,
            vec![
                ScheduledEvent::Revive(PlayerId::Ai),
                ScheduledEvent::AiAttack,
                ScheduledEvent::Revive(PlayerId::Human),
            ]
        );
        assert_eq!(schedule.pop_due(2.0), Some(ScheduledEvent::Revive(PlayerId::Ai)));
        assert_eq!(schedule.pop_due(2.0), Some(ScheduledEvent::AiAttack));
    }

    #[test]
    fn test_accumulated_clock_slack() {
        let mut schedule = Schedule::new();
        schedule.schedule_once(ScheduledEvent::AiAttack, 0.0, 4.0);

        let dt = 1.0 / 70.0;
        let mut now = 0.0;
        for _ in 0..280 {
            now += dt;
        }
        assert_eq!(schedule.pop_due(now), Some(ScheduledEvent::AiAttack));
    }
}
