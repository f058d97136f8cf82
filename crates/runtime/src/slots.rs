//! Host-visible result slots.
//!
//! Scripted commands report through numbered switches (booleans) and
//! variables (integers). Slot 0 is "unset": writes to it are dropped and
//! reads return the default.

use std::collections::BTreeMap;

use arpg_core::{SearchReport, TimerEvent};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultSlots {
    switches: BTreeMap<u32, bool>,
    variables: BTreeMap<u32, i32>,
}

impl ResultSlots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn switch(&self, id: u32) -> bool {
        self.switches.get(&id).copied().unwrap_or(false)
    }

    pub fn variable(&self, id: u32) -> i32 {
        self.variables.get(&id).copied().unwrap_or(0)
    }

    pub fn set_switch(&mut self, id: u32, value: bool) {
        if id > 0 {
            self.switches.insert(id, value);
        }
    }

    pub fn set_variable(&mut self, id: u32, value: i32) {
        if id > 0 {
            self.variables.insert(id, value);
        }
    }

    /// Writes a search outcome. The distance is rounded to whole tiles.
    pub fn write_search(
        &mut self,
        report: &SearchReport,
        switch: u32,
        kind_variable: u32,
        event_id_variable: u32,
        distance_variable: u32,
    ) {
        self.set_switch(switch, report.found);
        self.set_variable(kind_variable, report.kind_code);
        self.set_variable(event_id_variable, saturate(u64::from(report.event_id)));
        self.set_variable(distance_variable, report.distance.round() as i32);
    }

    /// Mirrors a timer transition into its bound slots.
    pub fn apply_timer(&mut self, event: &TimerEvent) {
        match event {
            TimerEvent::Started { binding, frames, .. } => {
                if let Some(switch) = binding.switch() {
                    self.set_switch(switch, false);
                }
                if let Some(variable) = binding.variable() {
                    self.set_variable(variable, saturate(*frames));
                }
            }
            TimerEvent::Remaining { binding, frames, .. } => {
                if let Some(variable) = binding.variable() {
                    self.set_variable(variable, saturate(*frames));
                }
            }
            TimerEvent::Finished { binding, .. } => {
                if let Some(switch) = binding.switch() {
                    self.set_switch(switch, true);
                }
                if let Some(variable) = binding.variable() {
                    self.set_variable(variable, 0);
                }
            }
        }
    }

    pub fn switches(&self) -> impl Iterator<Item = (u32, bool)> + '_ {
        self.switches.iter().map(|(id, value)| (*id, *value))
    }

    pub fn variables(&self) -> impl Iterator<Item = (u32, i32)> + '_ {
        self.variables.iter().map(|(id, value)| (*id, *value))
    }
}

fn saturate(value: u64) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}
