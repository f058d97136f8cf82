use crate::layer::{LayerLevel, LayerState};
use crate::state::{BattleStats, CharacterId, Position, TagId};

/// Read-only capability set the queries need from a host character.
pub trait CharacterView {
    fn id(&self) -> CharacterId;
    fn position(&self) -> Position;
    fn layer_state(&self) -> LayerState;

    /// Battle capability, `None` for characters that cannot fight.
    fn battler(&self) -> Option<&BattleStats> {
        None
    }

    /// Tag ("self variable") value; `None` when the character has no tag storage.
    fn tag(&self, _id: TagId) -> Option<i32> {
        None
    }
}

/// Characters whose layer state the resolver may write back.
pub trait CharacterMut: CharacterView {
    fn set_layer_state(&mut self, state: LayerState);
}

/// Answers which characters stand on a tile, by layer level.
pub trait OccupancyOracle {
    /// Levels of the non-through characters standing on `position`.
    fn occupant_levels(&self, position: Position) -> Vec<LayerLevel>;
}

impl<C: CharacterView + ?Sized> CharacterView for &C {
    fn id(&self) -> CharacterId {
        (**self).id()
    }

    fn position(&self) -> Position {
        (**self).position()
    }

    fn layer_state(&self) -> LayerState {
        (**self).layer_state()
    }

    fn battler(&self) -> Option<&BattleStats> {
        (**self).battler()
    }

    fn tag(&self, id: TagId) -> Option<i32> {
        (**self).tag(id)
    }
}
