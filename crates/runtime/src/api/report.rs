use arpg_core::{CharacterId, LayerState, SearchReport, StateId, Tick};

/// What a single scripted command did this frame.
#[derive(Clone, Debug, PartialEq)]
pub enum CommandOutcome {
    /// The throttle skipped the work; no slot was written.
    Throttled,
    Searched(SearchReport),
    /// Nearest tagged event, if any.
    Found(Option<u32>),
    Checked(bool),
    TimerStarted { key: String, frames: u64 },
    /// Start refused while the timer's cooldown runs.
    TimerCooling { key: String },
    StateChanged {
        target: CharacterId,
        state: StateId,
        applied: bool,
    },
    /// Parameters did not describe a runnable command.
    Ignored,
}

/// Summary of one call to [`crate::World::step`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameReport {
    pub frame: Tick,
    pub layer_changes: Vec<(CharacterId, LayerState)>,
    pub finished_timers: Vec<(CharacterId, String)>,
    pub commands: Vec<(CharacterId, CommandOutcome)>,
    /// Commands that failed and were skipped.
    pub failures: usize,
}

impl FrameReport {
    pub fn new(frame: Tick) -> Self {
        Self {
            frame,
            ..Self::default()
        }
    }

    pub fn searches(&self) -> impl Iterator<Item = (CharacterId, &SearchReport)> + '_ {
        self.commands.iter().filter_map(|(agent, outcome)| match outcome {
            CommandOutcome::Searched(report) => Some((*agent, report)),
            _ => None,
        })
    }
}
