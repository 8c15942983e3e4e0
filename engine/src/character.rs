use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::content::{EffectStat, ItemId, Skill};
use crate::status::{StatusEffect, StatusEffects};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Status {
    #[default]
    Normal,
    Frozen,
}

/// A worn weapon or armor piece.
///
/// Holds its own copy of the catalog stats so upgrades stay with the wearer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    pub item: ItemId,
    pub effects: IndexMap<EffectStat, i32>,
}

impl Equipment {
    pub fn from_catalog(item: ItemId) -> Self {
        Self {
            item,
            effects: item.item().effects.iter().copied().collect(),
        }
    }

    pub fn stat(&self, stat: EffectStat) -> i32 {
        self.effects.get(&stat).copied().unwrap_or(0)
    }

    /// Raises `stat` by `amount` and returns the new value.
    pub fn improve(&mut self, stat: EffectStat, amount: i32) -> i32 {
        let value = self.effects.entry(stat).or_insert(0);
        *value += amount;
        *value
    }
}

/// What happened when a character tried to use a skill.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SkillOutcome {
    /// FP was paid; `damage` already includes the weapon bonus.
    Cast { damage: i32 },
    /// Not enough FP. The caster took `penalty` damage instead; `hp_lost` is
    /// what got through armor.
    Exhausted { penalty: f64, hp_lost: f64 },
}

impl SkillOutcome {
    pub fn damage(&self) -> i32 {
        match self {
            SkillOutcome::Cast { damage } => *damage,
            SkillOutcome::Exhausted { .. } => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub name: String,
    /// Fractional because an exhausted cast costs half the FP price in HP.
    pub hp: f64,
    pub fp: u32,
    pub max_hp: u32,
    pub max_fp: u32,
    pub status: Status,
    pub status_effects: StatusEffects,
    pub weapon: Option<Equipment>,
    pub armor: Option<Equipment>,
}

impl Character {
    /// Starts at full HP and FP.
    pub fn new(name: impl Into<String>, max_hp: u32, max_fp: u32) -> Self {
        Self {
            name: name.into(),
            hp: f64::from(max_hp),
            fp: max_fp,
            max_hp,
            max_fp,
            status: Status::Normal,
            status_effects: StatusEffects::default(),
            weapon: None,
            armor: None,
        }
    }

    pub fn is_down(&self) -> bool {
        self.hp <= 0.0
    }

    pub fn weapon_bonus(&self) -> i32 {
        self.weapon.as_ref().map_or(0, |w| w.stat(EffectStat::Damage))
    }

    pub fn armor_defense(&self) -> i32 {
        self.armor.as_ref().map_or(0, |a| a.stat(EffectStat::Defense))
    }

    /// Armor soaks first; HP never drops below zero. Returns HP actually lost.
    pub fn take_damage(&mut self, amount: f64) -> f64 {
        let effective = (amount - f64::from(self.armor_defense())).max(0.0);
        let before = self.hp;
        self.hp = (self.hp - effective).max(0.0);
        before - self.hp
    }

    pub fn use_fp(&mut self, amount: u32) -> bool {
        if self.fp >= amount {
            self.fp -= amount;
            true
        } else {
            false
        }
    }

    /// Returns FP actually gained.
    pub fn recover_fp(&mut self, amount: u32) -> u32 {
        let before = self.fp;
        self.fp = self.fp.saturating_add(amount).min(self.max_fp);
        self.fp - before
    }

    /// Returns HP actually gained.
    pub fn heal(&mut self, amount: u32) -> f64 {
        let before = self.hp;
        self.hp = (self.hp + f64::from(amount)).min(f64::from(self.max_hp));
        self.hp - before
    }

    pub fn restore(&mut self) {
        self.hp = f64::from(self.max_hp);
        self.fp = self.max_fp;
    }

    pub fn apply_skill(&mut self, skill: &Skill) -> SkillOutcome {
        if self.use_fp(skill.fp_cost) {
            SkillOutcome::Cast { damage: skill.damage + self.weapon_bonus() }
        } else {
            let penalty = f64::from(skill.fp_cost) / 2.0;
            let hp_lost = self.take_damage(penalty);
            SkillOutcome::Exhausted { penalty, hp_lost }
        }
    }

    pub fn add_status_effect(&mut self, kind: StatusEffect, turns: u32) {
        self.status_effects.set(kind, turns);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn armor_soaks_before_hp() {
        let mut c = Character::new("Knight", 50, 10);
        c.armor = Some(Equipment::from_catalog(ItemId::Shield));
        assert_eq!(c.take_damage(8.0), 0.0);
        assert_eq!(c.take_damage(25.0), 15.0);
        assert_eq!(c.hp, 35.0);
    }

    #[test]
    fn exhausted_penalty_is_soaked_by_armor() {
        let mut c = Character::new("Knight", 100, 0);
        c.armor = Some(Equipment::from_catalog(ItemId::Shield));
        let outcome = c.apply_skill(crate::content::SkillId::Fireball.skill());
        assert_eq!(outcome, SkillOutcome::Exhausted { penalty: 7.5, hp_lost: 0.0 });
        assert_eq!(c.hp, 100.0);
    }

    #[test]
    fn improve_adds_missing_stat() {
        let mut e = Equipment::from_catalog(ItemId::Helmet);
        assert_eq!(e.improve(EffectStat::Defense, 5), 10);
        assert_eq!(e.improve(EffectStat::Magic, 2), 2);
    }
}
