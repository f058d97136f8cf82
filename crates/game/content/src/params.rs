//! Script command parameters as authored in scenario files.
//!
//! Parameters keep the loose, string-typed shape of plugin command arguments.
//! Conversion into `arpg-core` types is lenient: unknown relation or life
//! modes produce a filter that matches nothing, unknown search methods fall
//! back to `nearest`, and absent lists impose no constraint.

use arpg_core::{
    CriteriaLogic, FilterSpec, LifeCondition, Relation, SearchMethod, StateConditions, StateId,
    TagCriterion, TagId, TimeUnit, TimerBinding, TimerSpec,
};
use serde::{Deserialize, Serialize};

/// Character addressed by a command.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacterRef {
    /// The agent running the command.
    #[default]
    This,
    Player,
    Follower(u8),
    Event(u32),
}

/// Tag criterion whose value may be read from a variable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagCriterionParams {
    pub id: TagId,
    /// When > 0 the tag id is taken from this variable instead.
    pub id_by_variable: u32,
    pub value: i32,
    /// When > 0 the value is taken from this variable instead.
    pub value_by_variable: u32,
}

impl TagCriterionParams {
    /// Criteria whose variable holds a non-positive tag id resolve to id 0
    /// and are ignored by the queries.
    pub fn resolve<F: Fn(u32) -> i32>(&self, variables: &F) -> TagCriterion {
        let id = if self.id_by_variable > 0 {
            TagId::try_from(variables(self.id_by_variable)).unwrap_or(0)
        } else {
            self.id
        };
        let value = if self.value_by_variable > 0 {
            variables(self.value_by_variable)
        } else {
            self.value
        };
        TagCriterion::new(id, value)
    }
}

fn life_condition(raw: &str) -> Option<LifeCondition> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(LifeCondition::Alive);
    }
    raw.parse().ok()
}

fn state_conditions(life: &str, has: &[StateId], not_has: &[StateId]) -> Option<StateConditions> {
    Some(StateConditions {
        life: life_condition(life)?,
        required: has.to_vec(),
        forbidden: not_has.to_vec(),
    })
}

/// Parameters of the battler search command.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchBattlerParams {
    pub subject: CharacterRef,
    /// Relation mode, e.g. `opponent` or `friend_or_selfvar`.
    pub target: String,
    pub life_condition: String,
    pub max_distance: f64,
    pub has_states: Vec<StateId>,
    pub not_has_states: Vec<StateId>,
    pub tag_criteria: Vec<TagCriterionParams>,
    pub search_method: String,
    /// Priority states for `has_state` / `not_has_state`.
    pub search_state_ids: Vec<StateId>,
    /// Frames between searches; `None` uses the configured default.
    pub thinking_time: Option<u32>,
    pub result_switch: u32,
    pub kind_variable: u32,
    pub event_id_variable: u32,
    pub distance_variable: u32,
}

impl Default for SearchBattlerParams {
    fn default() -> Self {
        Self {
            subject: CharacterRef::This,
            target: Relation::Opponent.to_string(),
            life_condition: LifeCondition::Alive.to_string(),
            max_distance: 0.0,
            has_states: Vec::new(),
            not_has_states: Vec::new(),
            tag_criteria: Vec::new(),
            search_method: SearchMethod::Nearest.to_string(),
            search_state_ids: Vec::new(),
            thinking_time: None,
            result_switch: 0,
            kind_variable: 0,
            event_id_variable: 0,
            distance_variable: 0,
        }
    }
}

impl SearchBattlerParams {
    pub fn filter_spec<F: Fn(u32) -> i32>(&self, variables: &F) -> FilterSpec {
        let tags = self
            .tag_criteria
            .iter()
            .map(|c| c.resolve(variables))
            .collect();
        let conditions =
            state_conditions(&self.life_condition, &self.has_states, &self.not_has_states);
        let relation = conditions.as_ref().and(Relation::parse(&self.target));
        FilterSpec {
            relation,
            conditions: conditions.unwrap_or_default(),
            max_distance: self.max_distance,
            tags,
        }
    }

    /// Ranking method named by `search_method`.
    ///
    /// An unknown name ranks by distance rather than leaving candidates in
    /// character id order, so a misspelt method still picks the nearest.
    pub fn method(&self) -> SearchMethod {
        self.search_method.trim().parse().unwrap_or_default()
    }
}

/// Parameters of the nearest-tagged-event lookup.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FindTaggedParams {
    pub subject: CharacterRef,
    pub criteria: Vec<TagCriterionParams>,
    /// `and` requires every criterion; anything else means any.
    pub logic: String,
    pub max_distance: f64,
    pub thinking_time: Option<u32>,
    /// Receives the event id, or 0 when nothing matched.
    pub result_variable: u32,
}

impl FindTaggedParams {
    pub fn logic(&self) -> CriteriaLogic {
        if self.logic.trim().eq_ignore_ascii_case("and") {
            CriteriaLogic::And
        } else {
            CriteriaLogic::Or
        }
    }

    pub fn criteria<F: Fn(u32) -> i32>(&self, variables: &F) -> Vec<TagCriterion> {
        self.criteria.iter().map(|c| c.resolve(variables)).collect()
    }
}

/// Which character a condition check inspects.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionSource {
    /// The agent running the command.
    #[default]
    This,
    /// The event whose id is stored in the variable.
    EventInVariable(u32),
}

/// What a failed check writes into the result variable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailPolicy {
    #[default]
    Keep,
    ResetToZero,
}

/// Parameters of the life / state condition check.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckConditionsParams {
    pub source: ConditionSource,
    pub life_condition: String,
    pub has_states: Vec<StateId>,
    pub not_has_states: Vec<StateId>,
    /// Receives the verdict.
    pub result_switch: u32,
    /// Receives the event id on success.
    pub result_variable: u32,
    pub on_fail: FailPolicy,
}

impl Default for CheckConditionsParams {
    fn default() -> Self {
        Self {
            source: ConditionSource::This,
            life_condition: LifeCondition::None.to_string(),
            has_states: Vec::new(),
            not_has_states: Vec::new(),
            result_switch: 0,
            result_variable: 0,
            on_fail: FailPolicy::Keep,
        }
    }
}

impl CheckConditionsParams {
    /// `None` for an unknown life mode; such a check never passes.
    pub fn conditions(&self) -> Option<StateConditions> {
        state_conditions(&self.life_condition, &self.has_states, &self.not_has_states)
    }
}

/// Parameters of the context timer command.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerParams {
    pub timer_id: String,
    /// Only `start` is recognized; other operations are ignored.
    pub operation: String,
    pub duration: u32,
    pub duration_unit: TimeUnit,
    /// Minimum time between two starts.
    pub cooldown: u32,
    pub cooldown_unit: TimeUnit,
    pub result_switch: u32,
    pub result_variable: u32,
}

impl TimerParams {
    pub fn is_start(&self) -> bool {
        self.operation.trim().eq_ignore_ascii_case("start")
    }

    pub fn spec(&self) -> TimerSpec {
        TimerSpec {
            duration: self.duration,
            duration_unit: self.duration_unit,
            cooldown: self.cooldown,
            cooldown_unit: self.cooldown_unit,
            binding: TimerBinding::new(self.result_switch, self.result_variable),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StateChange {
    Add(StateId),
    Remove(StateId),
}

/// Parameters of the add / remove state command.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangeStateParams {
    pub character: CharacterRef,
    pub state_id: StateId,
    pub operation: String,
}

impl ChangeStateParams {
    /// `None` for state id 0 or an unknown operation.
    pub fn change(&self) -> Option<StateChange> {
        if self.state_id == 0 {
            return None;
        }
        match self.operation.trim().to_ascii_lowercase().as_str() {
            "add" => Some(StateChange::Add(self.state_id)),
            "remove" => Some(StateChange::Remove(self.state_id)),
            _ => None,
        }
    }
}

/// A scripted command run by an agent once per frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandSpec {
    SearchBattler(SearchBattlerParams),
    FindTagged(FindTaggedParams),
    CheckConditions(CheckConditionsParams),
    ManageTimer(TimerParams),
    ChangeState(ChangeStateParams),
}

impl CommandSpec {
    pub fn name(&self) -> &'static str {
        match self {
            CommandSpec::SearchBattler(_) => "search_battler",
            CommandSpec::FindTagged(_) => "find_tagged",
            CommandSpec::CheckConditions(_) => "check_conditions",
            CommandSpec::ManageTimer(_) => "manage_timer",
            CommandSpec::ChangeState(_) => "change_state",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_variables(_: u32) -> i32 {
        0
    }

    #[test]
    fn default_search_targets_living_opponents() {
        let params = SearchBattlerParams::default();
        let spec = params.filter_spec(&no_variables);
        assert_eq!(spec.relation, Some(Relation::Opponent));
        assert_eq!(spec.conditions.life, LifeCondition::Alive);
        assert_eq!(params.method(), SearchMethod::Nearest);
    }

    #[test]
    fn unknown_modes_match_nothing() {
        let params = SearchBattlerParams {
            target: "everyone_please".into(),
            ..SearchBattlerParams::default()
        };
        assert_eq!(params.filter_spec(&no_variables).relation, None);

        let params = SearchBattlerParams {
            target: "all".into(),
            life_condition: "undead".into(),
            ..SearchBattlerParams::default()
        };
        assert_eq!(params.filter_spec(&no_variables).relation, None);
    }

    #[test]
    fn unknown_method_falls_back_to_nearest() {
        let params = SearchBattlerParams {
            search_method: "cutest".into(),
            ..SearchBattlerParams::default()
        };
        assert_eq!(params.method(), SearchMethod::Nearest);
        let params = SearchBattlerParams {
            search_method: "lowest_hp_percent".into(),
            ..SearchBattlerParams::default()
        };
        assert_eq!(params.method(), SearchMethod::LowestHpPercent);
    }

    #[test]
    fn criterion_values_can_come_from_variables() {
        let criterion = TagCriterionParams {
            id: 4,
            value: 1,
            value_by_variable: 12,
            ..TagCriterionParams::default()
        };
        let variables = |id: u32| match id {
            12 => 99,
            13 => 7,
            14 => -2,
            _ => 0,
        };
        assert_eq!(criterion.resolve(&variables), TagCriterion::new(4, 99));

        let by_id = TagCriterionParams {
            id_by_variable: 13,
            ..criterion
        };
        assert_eq!(by_id.resolve(&variables), TagCriterion::new(7, 99));
        let negative = TagCriterionParams {
            id_by_variable: 14,
            ..criterion
        };
        assert_eq!(negative.resolve(&variables).id, 0);
    }

    #[test]
    fn find_tagged_logic_defaults_to_any() {
        let mut params = FindTaggedParams::default();
        assert_eq!(params.logic(), CriteriaLogic::Or);
        params.logic = "AND".into();
        assert_eq!(params.logic(), CriteriaLogic::And);
    }

    #[test]
    fn change_state_ignores_unknown_operations() {
        let mut params = ChangeStateParams {
            character: CharacterRef::Player,
            state_id: 4,
            operation: "Add".into(),
        };
        assert_eq!(params.change(), Some(StateChange::Add(4)));
        params.operation = "toggle".into();
        assert_eq!(params.change(), None);
        params.operation = "remove".into();
        params.state_id = 0;
        assert_eq!(params.change(), None);
    }

    #[test]
    fn timer_params_build_a_spec() {
        let params = TimerParams {
            timer_id: "cast".into(),
            operation: "start".into(),
            duration: 2,
            duration_unit: TimeUnit::Seconds,
            cooldown: 30,
            cooldown_unit: TimeUnit::Frames,
            result_switch: 3,
            result_variable: 0,
        };
        assert!(params.is_start());
        let spec = params.spec();
        assert_eq!(spec.duration_frames(60), 120);
        assert_eq!(spec.cooldown_frames(60), 30);
        assert_eq!(spec.binding.switch(), Some(3));
    }
}
