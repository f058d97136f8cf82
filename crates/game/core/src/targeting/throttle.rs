//! Thinking-time throttle.
//!
//! Map events have a stable id and think on a staggered schedule so agents
//! with the same interval spread across frames. Everyone else is throttled by
//! frames elapsed since the last think, tracked per purpose. Entries belong to
//! the subject and are dropped with [`ThrottleTable::forget`].

use std::collections::HashMap;

use crate::state::{CharacterId, Tick};

/// What the throttled work is for. Each purpose keeps its own timer.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ThinkPurpose {
    /// Battler search.
    Search,
    /// Path recomputation.
    Pathfind,
    /// Tag lookups.
    Query,
}

#[derive(Clone, Debug, Default)]
pub struct ThrottleTable {
    last_think: HashMap<(CharacterId, ThinkPurpose), Tick>,
}

impl ThrottleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decides whether `subject` runs its `purpose` work on frame `now`.
    ///
    /// `interval == 0` always thinks. The elapsed-frames timer is only reset
    /// when the call answers `true`.
    pub fn should_think(
        &mut self,
        subject: CharacterId,
        purpose: ThinkPurpose,
        interval: u32,
        now: Tick,
    ) -> bool {
        if interval == 0 {
            return true;
        }
        let interval = u64::from(interval);
        if let Some(id) = subject.event_id() {
            return staggered(now, u64::from(id), interval);
        }
        let last = self
            .last_think
            .get(&(subject, purpose))
            .copied()
            .unwrap_or(Tick::ZERO);
        if now.since(last) >= interval {
            self.last_think.insert((subject, purpose), now);
            true
        } else {
            false
        }
    }

    /// Frame of the last recorded think.
    pub fn last_think(&self, subject: CharacterId, purpose: ThinkPurpose) -> Option<Tick> {
        self.last_think.get(&(subject, purpose)).copied()
    }

    /// Drops every entry owned by `subject`.
    pub fn forget(&mut self, subject: CharacterId) {
        self.last_think.retain(|(owner, _), _| *owner != subject);
    }

    pub fn len(&self) -> usize {
        self.last_think.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last_think.is_empty()
    }
}

fn staggered(now: Tick, id: u64, interval: u64) -> bool {
    (now.0.wrapping_add(id % interval)) % interval == 0
}
