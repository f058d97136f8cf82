//! Damage gate in front of the host's damage resolution.
mod note;

pub use note::FactionRule;

use crate::env::{CharacterView, MapOracle};
use crate::layer::LayerResolver;
use crate::state::CharacterId;

/// Why an attack was dropped.
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
#[strum(serialize_all = "snake_case")]
pub enum BlockReason {
    /// The player is inside a vehicle.
    RidingVehicle,
    /// Attacker and target are on incompatible layers.
    DifferentLayer,
    /// The skill's faction tag excludes the target.
    FactionFiltered,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DamageVerdict {
    Hit,
    Blocked(BlockReason),
}

impl DamageVerdict {
    pub fn is_hit(self) -> bool {
        matches!(self, DamageVerdict::Hit)
    }
}

/// Decides whether an incoming hit reaches `target`.
///
/// `attacker` is `None` for sourceless damage, which skips the layer check.
/// `player_in_vehicle` describes the player and only matters when the target
/// is the player.
pub fn damage_verdict<M, A, T>(
    layers: &LayerResolver<'_, M>,
    attacker: Option<&A>,
    target: &T,
    faction: Option<&FactionRule>,
    player_in_vehicle: bool,
) -> DamageVerdict
where
    M: MapOracle + ?Sized,
    A: CharacterView + ?Sized,
    T: CharacterView + ?Sized,
{
    if target.id().is_player() && player_in_vehicle {
        return DamageVerdict::Blocked(BlockReason::RidingVehicle);
    }
    if attacker.is_some_and(|attacker| !layers.same_layer(target, Some(attacker))) {
        return DamageVerdict::Blocked(BlockReason::DifferentLayer);
    }
    if faction.is_some_and(|rule| !rule.admits(target)) {
        return DamageVerdict::Blocked(BlockReason::FactionFiltered);
    }
    DamageVerdict::Hit
}

/// The player cannot use skills while piloting a vehicle.
pub fn skill_usable(user: CharacterId, player_in_vehicle: bool) -> bool {
    !(user.is_player() && player_in_vehicle)
}
