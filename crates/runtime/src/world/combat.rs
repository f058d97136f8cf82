use arpg_core::{
    BattleStats, CharacterId, DamageVerdict, FactionRule, damage_verdict, skill_usable,
};

use super::World;
use crate::api::{Result, RuntimeError};

impl World {
    /// Whether `user` may use a skill right now.
    pub fn can_use_skill(&self, user: CharacterId) -> bool {
        skill_usable(user, self.riding.is_some())
    }

    /// Applies `amount` HP damage from `attacker` to `target` unless the
    /// damage gate drops it. `skill_note` may carry faction tags.
    ///
    /// A target brought to 0 HP receives the death state.
    pub fn apply_damage(
        &mut self,
        attacker: Option<CharacterId>,
        target: CharacterId,
        skill_note: &str,
        amount: u32,
    ) -> Result<DamageVerdict> {
        let victim = self
            .character(target)
            .ok_or(RuntimeError::UnknownCharacter(target))?;
        let source = match attacker {
            Some(id) => Some(
                self.character(id)
                    .ok_or(RuntimeError::UnknownCharacter(id))?,
            ),
            None => None,
        };
        let faction = FactionRule::parse(skill_note);
        let verdict = damage_verdict(
            &self.layers(),
            source,
            victim,
            faction.as_ref(),
            self.riding.is_some(),
        );
        if let DamageVerdict::Blocked(reason) = verdict {
            tracing::debug!(%target, %reason, "damage blocked");
            return Ok(verdict);
        }

        if let Some(battler) = self
            .character_mut(target)
            .and_then(|victim| victim.battler.as_mut())
        {
            battler.hp.current = battler.hp.current.saturating_sub(amount);
            if battler.hp.current == 0 {
                battler.states.add(BattleStats::DEATH_STATE);
            }
        }
        Ok(verdict)
    }
}
