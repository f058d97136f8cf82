//! Layer gates in front of event triggers and character collision.

use super::LayerResolver;
use crate::env::{CharacterView, MapOracle};

/// How a map event is started.
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
    strum::FromRepr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[repr(u8)]
pub enum TriggerKind {
    ActionButton = 0,
    PlayerTouch = 1,
    EventTouch = 2,
    Autorun = 3,
    Parallel = 4,
}

impl TriggerKind {
    /// Triggers that need physical contact with the player.
    pub const fn is_contact(self) -> bool {
        matches!(
            self,
            TriggerKind::ActionButton | TriggerKind::PlayerTouch | TriggerKind::EventTouch
        )
    }
}

impl<M: MapOracle + ?Sized> LayerResolver<'_, M> {
    /// Whether `event` may start given its trigger. Contact triggers require
    /// a shared plane with the player; without a player nothing is gated.
    pub fn may_start_event<E, P>(&self, event: &E, trigger: TriggerKind, player: Option<&P>) -> bool
    where
        E: CharacterView + ?Sized,
        P: CharacterView + ?Sized,
    {
        if !trigger.is_contact() {
            return true;
        }
        match player {
            Some(player) => self.same_layer(event, Some(player)),
            None => true,
        }
    }

    /// Filters a terrain-level "collided with events" result: the collision
    /// only stands if one of the events on the tile shares a plane with
    /// `mover`.
    pub fn collides_with_events<'e, C, E, I>(&self, mover: &C, base: bool, events: I) -> bool
    where
        C: CharacterView + ?Sized,
        E: CharacterView + ?Sized + 'e,
        I: IntoIterator<Item = &'e E>,
    {
        base && events
            .into_iter()
            .any(|event| self.same_layer(mover, Some(event)))
    }

    /// An event only bumps into the player on a shared plane.
    pub fn event_collides_with_player<E, P>(
        &self,
        event: &E,
        player: Option<&P>,
        base: bool,
    ) -> bool
    where
        E: CharacterView + ?Sized,
        P: CharacterView + ?Sized,
    {
        match player {
            Some(player) if !self.same_layer(event, Some(player)) => false,
            _ => base,
        }
    }
}
