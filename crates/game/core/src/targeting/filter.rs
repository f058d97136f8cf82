//! Candidate filtering.
//!
//! Checks run cheapest first: self exclusion, life, distance, required
//! states, forbidden states, then the relation. Every check is conjunctive so
//! the order only affects cost.

use super::DistanceMetric;
use crate::env::CharacterView;
use crate::state::{BattleStats, StateId, TagId};

/// Which candidates count as targets relative to the subject's side.
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
pub enum Relation {
    All,
    Opponent,
    Friend,
    #[strum(to_string = "opponent_or_selfvar", serialize = "opponent_or_tag")]
    #[cfg_attr(feature = "serde", serde(rename = "opponent_or_selfvar", alias = "opponent_or_tag"))]
    OpponentOrTag,
    #[strum(to_string = "friend_or_selfvar", serialize = "friend_or_tag")]
    #[cfg_attr(feature = "serde", serde(rename = "friend_or_selfvar", alias = "friend_or_tag"))]
    FriendOrTag,
    #[strum(to_string = "friend_and_selfvar", serialize = "friend_and_tag")]
    #[cfg_attr(feature = "serde", serde(rename = "friend_and_selfvar", alias = "friend_and_tag"))]
    FriendAndTag,
    #[strum(to_string = "selfvar_only", serialize = "tag_only")]
    #[cfg_attr(feature = "serde", serde(rename = "selfvar_only", alias = "tag_only"))]
    TagOnly,
}

impl Relation {
    /// Lenient parse; unknown modes yield `None`, which matches nothing.
    pub fn parse(raw: &str) -> Option<Self> {
        raw.trim().parse().ok()
    }
}

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
pub enum LifeCondition {
    /// No constraint: dead battlers stay in the pool alongside the living.
    None,
    #[default]
    Alive,
    Dead,
}

impl LifeCondition {
    pub fn matches(self, battler: &BattleStats) -> bool {
        match self {
            LifeCondition::None => true,
            LifeCondition::Alive => battler.is_alive(),
            LifeCondition::Dead => !battler.is_alive(),
        }
    }
}

/// Tag id / value pair a candidate must carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TagCriterion {
    pub id: TagId,
    pub value: i32,
}

impl TagCriterion {
    pub fn new(id: TagId, value: i32) -> Self {
        Self { id, value }
    }

    pub fn matches<C: CharacterView + ?Sized>(&self, character: &C) -> bool {
        character.tag(self.id) == Some(self.value)
    }
}

/// How several tag criteria combine.
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
pub enum CriteriaLogic {
    And,
    #[default]
    Or,
}

impl CriteriaLogic {
    pub fn matches<C: CharacterView + ?Sized>(
        self,
        criteria: &[TagCriterion],
        character: &C,
    ) -> bool {
        match self {
            CriteriaLogic::And => criteria.iter().all(|c| c.matches(character)),
            CriteriaLogic::Or => criteria.iter().any(|c| c.matches(character)),
        }
    }
}

/// Life and status-effect conditions shared by filtering and the plain
/// condition check.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StateConditions {
    pub life: LifeCondition,
    /// Every listed state must be present.
    pub required: Vec<StateId>,
    /// None of the listed states may be present.
    pub forbidden: Vec<StateId>,
}

impl StateConditions {
    pub fn matches(&self, battler: &BattleStats) -> bool {
        self.life.matches(battler)
            && battler.states.has_all(&self.required)
            && !battler.states.has_any(&self.forbidden)
    }
}

/// Declarative candidate filter.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FilterSpec {
    /// `None` stands for an unrecognized mode and rejects every candidate.
    pub relation: Option<Relation>,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub conditions: StateConditions,
    /// `<= 0` disables the distance bound.
    pub max_distance: f64,
    /// Tag criteria, OR-matched, used by the `*_or_tag` / `tag_only` relations.
    pub tags: Vec<TagCriterion>,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            relation: Some(Relation::All),
            conditions: StateConditions::default(),
            max_distance: 0.0,
            tags: Vec::new(),
        }
    }
}

impl FilterSpec {
    pub fn new(relation: Relation) -> Self {
        Self {
            relation: Some(relation),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_life(mut self, life: LifeCondition) -> Self {
        self.conditions.life = life;
        self
    }

    #[must_use]
    pub fn with_max_distance(mut self, max_distance: f64) -> Self {
        self.max_distance = max_distance;
        self
    }

    #[must_use]
    pub fn requiring(mut self, states: impl IntoIterator<Item = StateId>) -> Self {
        self.conditions.required.extend(states);
        self
    }

    #[must_use]
    pub fn forbidding(mut self, states: impl IntoIterator<Item = StateId>) -> Self {
        self.conditions.forbidden.extend(states);
        self
    }

    #[must_use]
    pub fn with_tag(mut self, criterion: TagCriterion) -> Self {
        self.tags.push(criterion);
        self
    }

    fn tag_matches<C: CharacterView + ?Sized>(&self, candidate: &C) -> bool {
        CriteriaLogic::Or.matches(&self.tags, candidate)
    }

    fn relation_matches<C: CharacterView + ?Sized>(
        &self,
        subject: &BattleStats,
        candidate: &C,
        battler: &BattleStats,
    ) -> bool {
        let opponent = || subject.side.is_opponent_of(battler.side);
        let friend = || subject.side.is_friend_of(battler.side);
        match self.relation {
            Some(Relation::All) => true,
            Some(Relation::Opponent) => opponent(),
            Some(Relation::Friend) => friend(),
            Some(Relation::OpponentOrTag) => opponent() || self.tag_matches(candidate),
            Some(Relation::FriendOrTag) => friend() || self.tag_matches(candidate),
            Some(Relation::FriendAndTag) => friend() && self.tag_matches(candidate),
            Some(Relation::TagOnly) => self.tag_matches(candidate),
            None => false,
        }
    }
}

/// A character that passed a filter, with its distance to the subject.
#[derive(Debug)]
pub struct Candidate<'c, C: ?Sized> {
    pub character: &'c C,
    pub battler: &'c BattleStats,
    pub distance: f64,
}

impl<C: ?Sized> Clone for Candidate<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: ?Sized> Copy for Candidate<'_, C> {}

/// Applies `spec` to `pool` relative to `subject`.
///
/// A subject without battle capability has no candidates. Characters in the
/// pool without battle capability are skipped.
pub fn filter_candidates<'c, S, C, I>(
    subject: &S,
    spec: &FilterSpec,
    pool: I,
    metric: DistanceMetric,
) -> Vec<Candidate<'c, C>>
where
    S: CharacterView + ?Sized,
    C: CharacterView + ?Sized + 'c,
    I: IntoIterator<Item = &'c C>,
{
    let Some(subject_battler) = subject.battler() else {
        return Vec::new();
    };
    let origin = subject.position();
    let me = subject.id();

    pool.into_iter()
        .filter_map(|character| {
            if character.id() == me {
                return None;
            }
            let battler = character.battler()?;
            if !spec.conditions.life.matches(battler) {
                return None;
            }
            let distance = metric.between(origin, character.position());
            if spec.max_distance > 0.0 && distance > spec.max_distance {
                return None;
            }
            if !battler.states.has_all(&spec.conditions.required)
                || battler.states.has_any(&spec.conditions.forbidden)
            {
                return None;
            }
            if !spec.relation_matches(subject_battler, character, battler) {
                return None;
            }
            Some(Candidate {
                character,
                battler,
                distance,
            })
        })
        .collect()
}

/// Plain condition check on a single character. Characters that cannot
/// fight never satisfy it.
pub fn satisfies_conditions<C: CharacterView + ?Sized>(
    character: Option<&C>,
    conditions: &StateConditions,
) -> bool {
    character
        .and_then(|c| c.battler())
        .is_some_and(|battler| conditions.matches(battler))
}

/// Nearest character in `pool` whose tags satisfy `criteria`.
///
/// Only characters with tag storage are considered; the subject is excluded.
/// Criteria with id 0 are ignored and an empty criteria list finds nothing.
pub fn find_nearest_tagged<'c, S, C, I>(
    subject: &S,
    pool: I,
    criteria: &[TagCriterion],
    logic: CriteriaLogic,
    max_distance: f64,
    metric: DistanceMetric,
) -> Option<(&'c C, f64)>
where
    S: CharacterView + ?Sized,
    C: CharacterView + ?Sized + 'c,
    I: IntoIterator<Item = &'c C>,
{
    let criteria: Vec<TagCriterion> = criteria.iter().copied().filter(|c| c.id > 0).collect();
    let probe = criteria.first()?.id;
    let origin = subject.position();
    let me = subject.id();

    let mut best: Option<(&'c C, f64)> = None;
    for character in pool {
        if character.id() == me || character.tag(probe).is_none() {
            continue;
        }
        let distance = metric.between(origin, character.position());
        if max_distance > 0.0 && distance > max_distance {
            continue;
        }
        if !logic.matches(&criteria, character) {
            continue;
        }
        if best.is_none_or(|(_, nearest)| distance < nearest) {
            best = Some((character, distance));
        }
    }
    best
}
