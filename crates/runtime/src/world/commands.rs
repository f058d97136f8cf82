//! Scripted commands run by agents each frame.
//!
//! Every command reads the world, asks `arpg-core` for an answer and writes
//! it into the result slots. Throttled commands skip the work entirely on
//! frames their subject does not think, leaving the slots untouched.

use arpg_content::{
    ChangeStateParams, CharacterRef, CheckConditionsParams, CommandSpec, ConditionSource,
    FailPolicy, FindTaggedParams, SearchBattlerParams, StateChange, TimerParams,
};
use arpg_core::{
    CharacterId, SearchReport, ThinkPurpose, filter_candidates, find_nearest_tagged,
    satisfies_conditions, select_best,
};

use crate::api::{CommandOutcome, Result, RuntimeError};
use super::World;

impl World {
    pub(crate) fn run_command(
        &mut self,
        agent: CharacterId,
        command: &CommandSpec,
    ) -> Result<CommandOutcome> {
        match command {
            CommandSpec::SearchBattler(params) => self.search_battler(agent, params),
            CommandSpec::FindTagged(params) => self.find_tagged(agent, params),
            CommandSpec::CheckConditions(params) => Ok(self.check_conditions(agent, params)),
            CommandSpec::ManageTimer(params) => self.manage_timer(agent, params),
            CommandSpec::ChangeState(params) => self.change_state(agent, params),
        }
    }

    /// Runs a command immediately on behalf of `agent`, outside the frame
    /// loop.
    pub fn execute(&mut self, agent: CharacterId, command: &CommandSpec) -> Result<CommandOutcome> {
        if !self.actors.contains_key(&agent) {
            return Err(RuntimeError::UnknownCharacter(agent));
        }
        self.run_command(agent, command)
    }

    fn resolve(agent: CharacterId, target: CharacterRef) -> CharacterId {
        match target {
            CharacterRef::This => agent,
            CharacterRef::Player => CharacterId::Player,
            CharacterRef::Follower(index) => CharacterId::Follower(index),
            CharacterRef::Event(id) => CharacterId::Event(id),
        }
    }

    fn thinks(
        &mut self,
        subject: CharacterId,
        purpose: ThinkPurpose,
        interval: Option<u32>,
    ) -> bool {
        let interval = interval.unwrap_or(self.config.thinking_time);
        let thinks = self
            .throttle
            .should_think(subject, purpose, interval, self.frame);
        if !thinks {
            tracing::trace!(%subject, ?purpose, frame = %self.frame, "throttled");
        }
        thinks
    }

    fn search_battler(
        &mut self,
        agent: CharacterId,
        params: &SearchBattlerParams,
    ) -> Result<CommandOutcome> {
        let subject_id = Self::resolve(agent, params.subject);
        if !self.actors.contains_key(&subject_id) {
            return Err(RuntimeError::MissingSubject {
                agent,
                command: "search_battler",
            });
        }
        if !self.thinks(subject_id, ThinkPurpose::Search, params.thinking_time) {
            return Ok(CommandOutcome::Throttled);
        }

        let report = {
            let subject = self
                .character(subject_id)
                .ok_or(RuntimeError::UnknownCharacter(subject_id))?;
            let spec = params.filter_spec(&|id| self.slots.variable(id));
            let candidates =
                filter_candidates(subject, &spec, self.characters(), self.config.distance);
            let best = select_best(candidates, params.method(), &params.search_state_ids);
            SearchReport::from_best(best.as_ref())
        };

        self.slots.write_search(
            &report,
            params.result_switch,
            params.kind_variable,
            params.event_id_variable,
            params.distance_variable,
        );
        tracing::debug!(
            subject = %subject_id,
            found = report.found,
            kind = report.kind_code,
            event = report.event_id,
            distance = report.distance,
            "battler search"
        );
        Ok(CommandOutcome::Searched(report))
    }

    fn find_tagged(
        &mut self,
        agent: CharacterId,
        params: &FindTaggedParams,
    ) -> Result<CommandOutcome> {
        let subject_id = Self::resolve(agent, params.subject);
        if !self.actors.contains_key(&subject_id) {
            self.slots.set_variable(params.result_variable, 0);
            return Err(RuntimeError::MissingSubject {
                agent,
                command: "find_tagged",
            });
        }
        if !self.thinks(subject_id, ThinkPurpose::Query, params.thinking_time) {
            return Ok(CommandOutcome::Throttled);
        }

        let found = {
            let subject = self
                .character(subject_id)
                .ok_or(RuntimeError::UnknownCharacter(subject_id))?;
            let criteria = params.criteria(&|id| self.slots.variable(id));
            find_nearest_tagged(
                subject,
                self.characters(),
                &criteria,
                params.logic(),
                params.max_distance,
                self.config.distance,
            )
            .and_then(|(character, _)| character.id.event_id())
        };

        let value = found.map_or(0, |id| i32::try_from(id).unwrap_or(i32::MAX));
        self.slots.set_variable(params.result_variable, value);
        tracing::debug!(subject = %subject_id, ?found, "tagged event lookup");
        Ok(CommandOutcome::Found(found))
    }

    fn check_conditions(
        &mut self,
        agent: CharacterId,
        params: &CheckConditionsParams,
    ) -> CommandOutcome {
        let conditions = params.conditions();
        match params.source {
            ConditionSource::This => {
                let Some(event_id) = agent.event_id().filter(|id| *id > 0) else {
                    return CommandOutcome::Ignored;
                };
                let met = conditions.as_ref().is_some_and(|conditions| {
                    satisfies_conditions(self.character(agent), conditions)
                });
                self.slots.set_switch(params.result_switch, met);
                if met {
                    self.slots
                        .set_variable(params.result_variable, i32::try_from(event_id).unwrap_or(0));
                } else if params.on_fail == FailPolicy::ResetToZero {
                    self.slots.set_variable(params.result_variable, 0);
                }
                CommandOutcome::Checked(met)
            }
            ConditionSource::EventInVariable(variable) => {
                let event_id = if variable > 0 {
                    self.slots.variable(variable)
                } else {
                    0
                };
                let character = u32::try_from(event_id)
                    .ok()
                    .filter(|id| *id > 0)
                    .and_then(|id| self.character(CharacterId::Event(id)));
                let met = conditions
                    .as_ref()
                    .is_some_and(|conditions| satisfies_conditions(character, conditions));
                self.slots.set_switch(params.result_switch, met);
                CommandOutcome::Checked(met)
            }
        }
    }

    fn manage_timer(&mut self, agent: CharacterId, params: &TimerParams) -> Result<CommandOutcome> {
        let key = params.timer_id.trim();
        if !params.is_start() || key.is_empty() {
            return Ok(CommandOutcome::Ignored);
        }
        let spec = params.spec();
        let (frame, fps) = (self.frame, self.config.frames_per_second);
        let actor = self
            .actors
            .get_mut(&agent)
            .ok_or(RuntimeError::UnknownCharacter(agent))?;

        match actor.timers.start(key, &spec, frame, fps) {
            Some(event) => {
                self.slots.apply_timer(&event);
                let frames = spec.duration_frames(fps);
                tracing::debug!(%agent, timer = key, frames, "timer started");
                Ok(CommandOutcome::TimerStarted {
                    key: key.to_owned(),
                    frames,
                })
            }
            None => Ok(CommandOutcome::TimerCooling {
                key: key.to_owned(),
            }),
        }
    }

    fn change_state(
        &mut self,
        agent: CharacterId,
        params: &ChangeStateParams,
    ) -> Result<CommandOutcome> {
        let Some(change) = params.change() else {
            return Ok(CommandOutcome::Ignored);
        };
        let target = Self::resolve(agent, params.character);
        let character = self
            .character_mut(target)
            .ok_or(RuntimeError::UnknownCharacter(target))?;
        let Some(battler) = character.battler.as_mut() else {
            return Ok(CommandOutcome::Ignored);
        };

        let (state, applied) = match change {
            StateChange::Add(state) => (state, battler.states.add(state)),
            StateChange::Remove(state) => (state, battler.states.remove(state)),
        };
        tracing::debug!(%target, state, applied, ?change, "state changed");
        Ok(CommandOutcome::StateChanged {
            target,
            state,
            applied,
        })
    }
}
