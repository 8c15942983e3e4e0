use serde::{Deserialize, Serialize};

use crate::status::StatusEffect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SkillId {
    Attack,
    Special,
    Fireball,
    Heal,
    IceBlast,
    Shock,
    ThunderStrike,
    PoisonDart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Skill {
    pub id: SkillId,
    pub name: &'static str,
    pub fp_cost: u32,
    /// Negative values heal the caster.
    pub damage: i32,
    pub special_effect: Option<StatusEffect>,
}

static SKILLS: [Skill; 8] = [
    Skill { id: SkillId::Attack, name: "Attack", fp_cost: 10, damage: 20, special_effect: None },
    Skill { id: SkillId::Special, name: "Special Skill", fp_cost: 20, damage: 40, special_effect: None },
    Skill {
        id: SkillId::Fireball,
        name: "Fireball",
        fp_cost: 15,
        damage: 30,
        special_effect: Some(StatusEffect::Burn),
    },
    Skill { id: SkillId::Heal, name: "Heal", fp_cost: 10, damage: -30, special_effect: None },
    Skill {
        id: SkillId::IceBlast,
        name: "Ice Blast",
        fp_cost: 20,
        damage: 25,
        special_effect: Some(StatusEffect::Freeze),
    },
    Skill {
        id: SkillId::Shock,
        name: "Shock",
        fp_cost: 20,
        damage: 15,
        special_effect: Some(StatusEffect::Shock),
    },
    Skill {
        id: SkillId::ThunderStrike,
        name: "Thunder Strike",
        fp_cost: 25,
        damage: 35,
        special_effect: Some(StatusEffect::Shock),
    },
    Skill {
        id: SkillId::PoisonDart,
        name: "Poison Dart",
        fp_cost: 15,
        damage: 10,
        special_effect: Some(StatusEffect::Poison),
    },
];

impl SkillId {
    pub const ALL: [SkillId; 8] = [
        SkillId::Attack,
        SkillId::Special,
        SkillId::Fireball,
        SkillId::Heal,
        SkillId::IceBlast,
        SkillId::Shock,
        SkillId::ThunderStrike,
        SkillId::PoisonDart,
    ];

    pub fn skill(self) -> &'static Skill {
        &SKILLS[self as usize]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Weapon,
    Armor,
    Potion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EffectStat {
    Damage,
    Defense,
    Magic,
    Heal,
    #[serde(rename = "recoverFP")]
    RecoverFp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemId {
    Sword,
    Axe,
    Staff,
    Shield,
    Helmet,
    Armor,
    HealingPotion,
    MagicPotion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item {
    pub id: ItemId,
    pub name: &'static str,
    pub kind: ItemKind,
    pub effects: &'static [(EffectStat, i32)],
    pub cost: u32,
}

impl Item {
    /// Magnitude of `stat`, 0 when the item does not carry it.
    pub fn effect(&self, stat: EffectStat) -> i32 {
        self.effects
            .iter()
            .find(|(s, _)| *s == stat)
            .map(|(_, v)| *v)
            .unwrap_or(0)
    }
}

static ITEMS: [Item; 8] = [
    Item { id: ItemId::Sword, name: "Sword", kind: ItemKind::Weapon, effects: &[(EffectStat::Damage, 10)], cost: 50 },
    Item { id: ItemId::Axe, name: "Axe", kind: ItemKind::Weapon, effects: &[(EffectStat::Damage, 15)], cost: 75 },
    Item {
        id: ItemId::Staff,
        name: "Staff",
        kind: ItemKind::Weapon,
        effects: &[(EffectStat::Damage, 5), (EffectStat::Magic, 10)],
        cost: 60,
    },
    Item { id: ItemId::Shield, name: "Shield", kind: ItemKind::Armor, effects: &[(EffectStat::Defense, 10)], cost: 50 },
    Item { id: ItemId::Helmet, name: "Helmet", kind: ItemKind::Armor, effects: &[(EffectStat::Defense, 5)], cost: 30 },
    Item { id: ItemId::Armor, name: "Armor", kind: ItemKind::Armor, effects: &[(EffectStat::Defense, 15)], cost: 70 },
    Item {
        id: ItemId::HealingPotion,
        name: "Healing Potion",
        kind: ItemKind::Potion,
        effects: &[(EffectStat::Heal, 30)],
        cost: 20,
    },
    Item {
        id: ItemId::MagicPotion,
        name: "Magic Potion",
        kind: ItemKind::Potion,
        effects: &[(EffectStat::RecoverFp, 20)],
        cost: 20,
    },
];

impl ItemId {
    /// Weapons, then armors, then potions. This is also the reward pool.
    pub const ALL: [ItemId; 8] = [
        ItemId::Sword,
        ItemId::Axe,
        ItemId::Staff,
        ItemId::Shield,
        ItemId::Helmet,
        ItemId::Armor,
        ItemId::HealingPotion,
        ItemId::MagicPotion,
    ];

    pub fn item(self) -> &'static Item {
        &ITEMS[self as usize]
    }
}

/// Everything the shop sells, in catalog order.
pub fn shop_catalog() -> impl Iterator<Item = &'static Item> {
    ITEMS.iter()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_tables_line_up_with_ids() {
        for id in SkillId::ALL {
            assert_eq!(id.skill().id, id);
        }
        for id in ItemId::ALL {
            assert_eq!(id.item().id, id);
        }
    }

    #[test]
    fn keys_serialize_like_catalog_keys() {
        assert_eq!(serde_json::to_string(&ItemId::HealingPotion).unwrap(), "\"healingPotion\"");
        assert_eq!(serde_json::to_string(&SkillId::IceBlast).unwrap(), "\"iceBlast\"");
        assert_eq!(serde_json::to_string(&EffectStat::RecoverFp).unwrap(), "\"recoverFP\"");
    }

    #[test]
    fn missing_effect_reads_as_zero() {
        assert_eq!(ItemId::Staff.item().effect(EffectStat::Magic), 10);
        assert_eq!(ItemId::Sword.item().effect(EffectStat::Defense), 0);
    }
}
