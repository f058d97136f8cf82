use std::cmp::Ordering;

use super::Candidate;
use crate::env::CharacterView;
use crate::state::StateId;

/// Ranking rule applied to filtered candidates.
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
pub enum SearchMethod {
    LowestHpPercent,
    HighestHpPercent,
    LowestHpValue,
    HighestHpValue,
    #[default]
    Nearest,
    HasState,
    NotHasState,
}

impl SearchMethod {
    fn by_state(self) -> Option<bool> {
        match self {
            SearchMethod::HasState => Some(true),
            SearchMethod::NotHasState => Some(false),
            _ => None,
        }
    }
}

fn nearest<C: ?Sized>(a: &Candidate<'_, C>, b: &Candidate<'_, C>) -> Ordering {
    a.distance.total_cmp(&b.distance)
}

/// Orders `candidates` best first.
///
/// HP methods break exact ties by distance. State methods keep only the
/// candidates matching the state condition over `priority` (any listed state)
/// when at least one matches, then order by distance.
pub fn rank<'c, C: ?Sized>(
    mut candidates: Vec<Candidate<'c, C>>,
    method: SearchMethod,
    priority: &[StateId],
) -> Vec<Candidate<'c, C>> {
    if let Some(wanted) = method.by_state() {
        if !priority.is_empty() {
            let matching: Vec<_> = candidates
                .iter()
                .copied()
                .filter(|c| c.battler.states.has_any(priority) == wanted)
                .collect();
            if !matching.is_empty() {
                candidates = matching;
            }
        }
        candidates.sort_by(nearest);
        return candidates;
    }

    candidates.sort_by(|a, b| {
        let primary = match method {
            SearchMethod::LowestHpPercent => a.battler.hp_rate().total_cmp(&b.battler.hp_rate()),
            SearchMethod::HighestHpPercent => b.battler.hp_rate().total_cmp(&a.battler.hp_rate()),
            SearchMethod::LowestHpValue => a.battler.hp.current.cmp(&b.battler.hp.current),
            SearchMethod::HighestHpValue => b.battler.hp.current.cmp(&a.battler.hp.current),
            _ => Ordering::Equal,
        };
        primary.then_with(|| nearest(a, b))
    });
    candidates
}

/// Best candidate under `method`, or `None` when nothing passed the filter.
pub fn select_best<'c, C: ?Sized>(
    candidates: Vec<Candidate<'c, C>>,
    method: SearchMethod,
    priority: &[StateId],
) -> Option<Candidate<'c, C>> {
    rank(candidates, method, priority).into_iter().next()
}

/// Outcome of a search as written into host result slots.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchReport {
    pub found: bool,
    /// 1 player, 2 follower, 3 event, 0 nothing / other.
    pub kind_code: i32,
    /// Event id of the winner, 0 when it is not an event.
    pub event_id: u32,
    pub distance: f64,
}

impl SearchReport {
    pub const NOT_FOUND: Self = Self {
        found: false,
        kind_code: 0,
        event_id: 0,
        distance: 0.0,
    };

    pub fn from_best<C: CharacterView + ?Sized>(best: Option<&Candidate<'_, C>>) -> Self {
        let Some(best) = best else {
            return Self::NOT_FOUND;
        };
        let id = best.character.id();
        Self {
            found: true,
            kind_code: id.kind_code(),
            event_id: id.event_id().unwrap_or(0),
            distance: best.distance,
        }
    }
}
