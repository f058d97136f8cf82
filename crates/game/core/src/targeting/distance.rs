use crate::state::Position;

/// Distance between two tiles. All metrics are symmetric and monotonic in
/// each axis delta.
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
pub enum DistanceMetric {
    #[default]
    Euclidean,
    Chebyshev,
    Manhattan,
}

impl DistanceMetric {
    pub fn between(self, a: Position, b: Position) -> f64 {
        let dx = f64::from(a.x - b.x).abs();
        let dy = f64::from(a.y - b.y).abs();
        match self {
            DistanceMetric::Euclidean => dx.hypot(dy),
            DistanceMetric::Chebyshev => dx.max(dy),
            DistanceMetric::Manhattan => dx + dy,
        }
    }

    /// `max <= 0` disables the bound.
    pub fn within(self, a: Position, b: Position, max: f64) -> bool {
        max <= 0.0 || self.between(a, b) <= max
    }
}
