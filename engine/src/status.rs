use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::character::{Character, Status};

/// Turns a special effect lasts when a skill inflicts it.
pub const INFLICTED_TURNS: u32 = 3;
/// Per-tick chance that an active freeze locks the character up.
pub const FREEZE_CHANCE: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusEffect {
    Burn,
    Freeze,
    Shock,
    Poison,
}

impl StatusEffect {
    /// Share of max HP lost each tick, in percent. Freeze deals no damage.
    pub fn tick_damage_percent(self) -> Option<u32> {
        match self {
            StatusEffect::Burn => Some(20),
            StatusEffect::Freeze => None,
            StatusEffect::Shock => Some(5),
            StatusEffect::Poison => Some(10),
        }
    }
}

/// Remaining turns per effect kind. Entries are dropped when they reach zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusEffects(IndexMap<StatusEffect, u32>);

impl StatusEffects {
    /// Overwrites the counter for `kind`; a zero count clears it.
    pub fn set(&mut self, kind: StatusEffect, turns: u32) {
        if turns == 0 {
            self.0.shift_remove(&kind);
        } else {
            self.0.insert(kind, turns);
        }
    }

    pub fn remaining(&self, kind: StatusEffect) -> u32 {
        self.0.get(&kind).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (StatusEffect, u32)> + '_ {
        self.0.iter().map(|(k, v)| (*k, *v))
    }
}

/// One status tick: every active effect fires once, then loses a turn.
///
/// Effects fire in the order they were first inflicted. `proc_roll` supplies
/// the uniform draw for freeze and is only called while a freeze is active.
pub fn process_status_effects(
    character: &mut Character,
    mut proc_roll: impl FnMut() -> f64,
    mut log: impl FnMut(String),
) {
    let active: Vec<StatusEffect> = character
        .status_effects
        .iter()
        .filter(|(_, turns)| *turns > 0)
        .map(|(kind, _)| kind)
        .collect();

    for kind in active {
        match kind.tick_damage_percent() {
            Some(percent) => {
                let amount = u64::from(character.max_hp) * u64::from(percent) / 100;
                let before = character.hp;
                character.take_damage(amount as f64);
                log(format!(
                    "[COND][{}] suffers {:?}: {} → {} HP",
                    character.name, kind, before, character.hp
                ));
            }
            None => {
                if proc_roll() < FREEZE_CHANCE {
                    character.status = Status::Frozen;
                    log(format!("[COND][{}] is Frozen solid", character.name));
                }
            }
        }

        let left = character.status_effects.remaining(kind).saturating_sub(1);
        character.status_effects.set(kind, left);
        if left == 0 {
            log(format!("[COND][{}] {:?} wears off", character.name, kind));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_overwrites_and_zero_clears() {
        let mut effects = StatusEffects::default();
        effects.set(StatusEffect::Poison, 3);
        effects.set(StatusEffect::Poison, 1);
        assert_eq!(effects.remaining(StatusEffect::Poison), 1);
        effects.set(StatusEffect::Poison, 0);
        assert!(effects.is_empty());
    }

    #[test]
    fn serializes_as_plain_map() {
        let mut effects = StatusEffects::default();
        effects.set(StatusEffect::Burn, 2);
        assert_eq!(serde_json::to_string(&effects).unwrap(), r#"{"burn":2}"#);
    }
}
