use crate::character::{Character, SkillOutcome};
use crate::content::{EffectStat, ItemId, ItemKind, SkillId};
use crate::stage::Progression;
use crate::status::{INFLICTED_TURNS, StatusEffect};

/// FP regained by an explicit rest.
pub const REST_FP: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SkillUse {
    Hit { damage: i32 },
    Healed { amount: f64 },
    /// FP was paid but the skill nets to zero damage.
    NoEffect,
    Exhausted { penalty: f64, hp_lost: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CastReport {
    pub skill: SkillId,
    pub result: SkillUse,
    pub inflicted: Option<StatusEffect>,
}

/// Resolves `skill` from `caster` against `target`.
///
/// The special effect lands on the target for [`INFLICTED_TURNS`] even when the
/// cast fizzles for lack of FP.
pub fn cast_skill(
    caster: &mut Character,
    target: &mut Character,
    skill: SkillId,
    mut log: impl FnMut(String),
) -> CastReport {
    let skill = skill.skill();
    let result = match caster.apply_skill(skill) {
        SkillOutcome::Cast { damage } if damage > 0 => {
            target.take_damage(f64::from(damage));
            log(format!(
                "[SKILL][{}] used {}. {} took {} damage.",
                caster.name, skill.name, target.name, damage
            ));
            SkillUse::Hit { damage }
        }
        SkillOutcome::Cast { damage } if damage < 0 => {
            let amount = caster.heal(damage.unsigned_abs());
            log(format!(
                "[SKILL][{}] used {}. Recovered {} HP.",
                caster.name, skill.name, amount
            ));
            SkillUse::Healed { amount }
        }
        SkillOutcome::Cast { .. } => {
            log(format!("[SKILL][{}] used {} to no effect.", caster.name, skill.name));
            SkillUse::NoEffect
        }
        SkillOutcome::Exhausted { penalty, hp_lost } => {
            log(format!(
                "[SKILL][{}] tried to use {} but didn't have enough FP. Lost {} HP.",
                caster.name, skill.name, hp_lost
            ));
            SkillUse::Exhausted { penalty, hp_lost }
        }
    };

    if let Some(effect) = skill.special_effect {
        target.add_status_effect(effect, INFLICTED_TURNS);
        log(format!(
            "[COND][{}] gains {:?} for {} turns",
            target.name, effect, INFLICTED_TURNS
        ));
    }

    CastReport { skill: skill.id, result, inflicted: skill.special_effect }
}

pub fn rest(character: &mut Character, mut log: impl FnMut(String)) -> u32 {
    let gained = character.recover_fp(REST_FP);
    log(format!("[REST][{}] recovered {} FP.", character.name, gained));
    gained
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ItemOutcome {
    Healed { item: ItemId, amount: f64 },
    RecoveredFp { item: ItemId, amount: u32 },
    /// Held but has no combat use; nothing is consumed.
    NotUsable { item: ItemId },
    NotFound { item: ItemId },
}

impl ItemOutcome {
    /// Whether the action took the player's turn.
    pub fn took_turn(&self) -> bool {
        !matches!(self, ItemOutcome::NotFound { .. })
    }
}

/// Drinks one potion from the inventory (first match).
pub fn use_item(
    user: &mut Character,
    progression: &mut Progression,
    item: ItemId,
    mut log: impl FnMut(String),
) -> ItemOutcome {
    let entry = item.item();
    if !progression.has_item(item) {
        log(format!("[ITEM][{}] No such item in inventory: {}.", user.name, entry.name));
        return ItemOutcome::NotFound { item };
    }
    if entry.kind != ItemKind::Potion {
        log(format!("[ITEM][{}] {} has no use in combat.", user.name, entry.name));
        return ItemOutcome::NotUsable { item };
    }

    progression.take_item(item);
    let heal = entry.effect(EffectStat::Heal);
    if heal > 0 {
        let amount = user.heal(heal.unsigned_abs());
        log(format!("[ITEM][{}] used a {}. Recovered {} HP.", user.name, entry.name, amount));
        ItemOutcome::Healed { item, amount }
    } else {
        let amount = user.recover_fp(entry.effect(EffectStat::RecoverFp).max(0).unsigned_abs());
        log(format!("[ITEM][{}] used a {}. Recovered {} FP.", user.name, entry.name, amount));
        ItemOutcome::RecoveredFp { item, amount }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet(_: String) {}

    #[test]
    fn zero_damage_cast_still_pays_fp() {
        let mut caster = Character::new("Caster", 100, 50);
        let mut target = Character::new("Dummy", 100, 0);
        // Heal at full HP: FP spent, nothing restored.
        let report = cast_skill(&mut caster, &mut target, SkillId::Heal, quiet);
        assert_eq!(report.result, SkillUse::Healed { amount: 0.0 });
        assert_eq!(caster.fp, 40);
        assert_eq!(target.hp, 100.0);
    }

    #[test]
    fn equipment_in_inventory_is_not_consumed() {
        let mut user = Character::new("Player", 100, 50);
        let mut prog = Progression::new(0, 50);
        prog.inventory.push(ItemId::Axe);
        let outcome = use_item(&mut user, &mut prog, ItemId::Axe, quiet);
        assert_eq!(outcome, ItemOutcome::NotUsable { item: ItemId::Axe });
        assert_eq!(prog.inventory, vec![ItemId::Axe]);
    }
}
