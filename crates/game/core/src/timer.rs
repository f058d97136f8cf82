//! Per-character named countdown timers with a restart cooldown.
//!
//! A timer is created on first start, counts down one frame per
//! [`ContextTimers::tick`] and reports its progress as [`TimerEvent`]s. The
//! host writes those into the switches / variables named by the timer's
//! [`TimerBinding`]. Timers live exactly as long as their owner.

use std::collections::BTreeMap;

use crate::state::Tick;

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
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
pub enum TimeUnit {
    #[default]
    Frames,
    Seconds,
}

impl TimeUnit {
    pub fn to_frames(self, value: u32, frames_per_second: u32) -> u64 {
        match self {
            TimeUnit::Frames => u64::from(value),
            TimeUnit::Seconds => u64::from(value) * u64::from(frames_per_second),
        }
    }
}

/// Result slots a timer reports into. Id 0 means "not bound".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TimerBinding {
    /// Switch turned off on start and on when the timer finishes.
    pub switch: u32,
    /// Variable receiving the remaining frames.
    pub variable: u32,
}

impl TimerBinding {
    pub fn new(switch: u32, variable: u32) -> Self {
        Self { switch, variable }
    }

    pub fn switch(&self) -> Option<u32> {
        (self.switch > 0).then_some(self.switch)
    }

    pub fn variable(&self) -> Option<u32> {
        (self.variable > 0).then_some(self.variable)
    }
}

/// Start request for a named timer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TimerSpec {
    /// Zero is treated as one unit.
    pub duration: u32,
    pub duration_unit: TimeUnit,
    /// Minimum time between two starts.
    pub cooldown: u32,
    pub cooldown_unit: TimeUnit,
    pub binding: TimerBinding,
}

impl TimerSpec {
    pub fn frames(duration: u32) -> Self {
        Self {
            duration,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_cooldown(mut self, cooldown: u32, unit: TimeUnit) -> Self {
        self.cooldown = cooldown;
        self.cooldown_unit = unit;
        self
    }

    #[must_use]
    pub fn with_binding(mut self, binding: TimerBinding) -> Self {
        self.binding = binding;
        self
    }

    pub fn duration_frames(&self, frames_per_second: u32) -> u64 {
        self.duration_unit
            .to_frames(self.duration.max(1), frames_per_second)
            .max(1)
    }

    pub fn cooldown_frames(&self, frames_per_second: u32) -> u64 {
        self.cooldown_unit.to_frames(self.cooldown, frames_per_second)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimerRecord {
    pub running: bool,
    pub remaining: u64,
    pub last_start: Option<Tick>,
    pub binding: TimerBinding,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TimerEvent {
    Started {
        key: String,
        binding: TimerBinding,
        frames: u64,
    },
    Remaining {
        key: String,
        binding: TimerBinding,
        frames: u64,
    },
    Finished {
        key: String,
        binding: TimerBinding,
    },
}

impl TimerEvent {
    pub fn key(&self) -> &str {
        match self {
            TimerEvent::Started { key, .. }
            | TimerEvent::Remaining { key, .. }
            | TimerEvent::Finished { key, .. } => key,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContextTimers {
    timers: BTreeMap<String, TimerRecord>,
}

impl ContextTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// (Re)starts `key`. Refused, returning `None`, while the previous start
    /// is younger than the cooldown.
    pub fn start(
        &mut self,
        key: &str,
        spec: &TimerSpec,
        now: Tick,
        frames_per_second: u32,
    ) -> Option<TimerEvent> {
        let cooldown = spec.cooldown_frames(frames_per_second);
        let record = self.timers.entry(key.to_owned()).or_default();
        if record
            .last_start
            .is_some_and(|last| now.since(last) < cooldown)
        {
            return None;
        }
        let frames = spec.duration_frames(frames_per_second);
        *record = TimerRecord {
            running: true,
            remaining: frames,
            last_start: Some(now),
            binding: spec.binding,
        };
        Some(TimerEvent::Started {
            key: key.to_owned(),
            binding: spec.binding,
            frames,
        })
    }

    /// Advances every running timer by one frame.
    pub fn tick(&mut self) -> Vec<TimerEvent> {
        let mut events = Vec::new();
        for (key, record) in self.timers.iter_mut().filter(|(_, r)| r.running) {
            record.remaining = record.remaining.saturating_sub(1);
            events.push(TimerEvent::Remaining {
                key: key.clone(),
                binding: record.binding,
                frames: record.remaining,
            });
            if record.remaining == 0 {
                record.running = false;
                events.push(TimerEvent::Finished {
                    key: key.clone(),
                    binding: record.binding,
                });
            }
        }
        events
    }

    pub fn get(&self, key: &str) -> Option<&TimerRecord> {
        self.timers.get(key)
    }

    pub fn is_running(&self, key: &str) -> bool {
        self.get(key).is_some_and(|record| record.running)
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}
