//! Battler targeting: declarative filters, ranking and thinking-time throttle.
//!
//! [`filter_candidates`] narrows a pool to the characters a subject may
//! target, [`rank`] / [`select_best`] order them by a [`SearchMethod`], and
//! [`ThrottleTable`] decides on which frames an agent runs the search at all.
//! The throttle never changes the result of a search, only its cadence.
mod distance;
mod filter;
mod search;
mod throttle;

pub use distance::DistanceMetric;
pub use filter::{
    Candidate, CriteriaLogic, FilterSpec, LifeCondition, Relation, StateConditions, TagCriterion,
    filter_candidates, find_nearest_tagged, satisfies_conditions,
};
pub use search::{SearchMethod, SearchReport, rank, select_best};
pub use throttle::{ThinkPurpose, ThrottleTable};
