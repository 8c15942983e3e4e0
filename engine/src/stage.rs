use serde::{Deserialize, Serialize};

use crate::Dice;
use crate::character::{Character, Equipment};
use crate::content::{EffectStat, ItemId, ItemKind};

pub const STAGE_CLEAR_LEAVES: u32 = 10;
pub const UPGRADE_COST: u32 = 30;
pub const UPGRADE_AMOUNT: i32 = 5;
pub const LEVEL_UP_HP: u32 = 10;
pub const LEVEL_UP_FP: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    Regular,
    MidBoss,
    MainBoss,
    Legendary,
}

impl StageKind {
    /// Highest tier wins: 30 is legendary even though it is also divisible by 5 and 3.
    pub fn classify(stage: u32) -> Self {
        if stage % 10 == 0 {
            StageKind::Legendary
        } else if stage % 5 == 0 {
            StageKind::MainBoss
        } else if stage % 3 == 0 {
            StageKind::MidBoss
        } else {
            StageKind::Regular
        }
    }

    /// `(max_hp, max_fp)` for an enemy of this tier at `stage`.
    pub fn stats(self, stage: u32) -> (u32, u32) {
        match self {
            StageKind::Legendary => (300 + 20 * stage, 100 + 10 * stage),
            StageKind::MainBoss => (200 + 15 * stage, 80 + 8 * stage),
            StageKind::MidBoss => (150 + 10 * stage, 60 + 6 * stage),
            StageKind::Regular => (100 + 5 * stage, 50 + 5 * stage),
        }
    }

    fn enemy_name(self, stage: u32) -> String {
        match self {
            StageKind::Legendary => "Legendary Boss".to_string(),
            StageKind::MainBoss => "Main Boss".to_string(),
            StageKind::MidBoss => "Mid Boss".to_string(),
            StageKind::Regular => format!("Enemy {}", stage),
        }
    }

    fn announcement(self) -> &'static str {
        match self {
            StageKind::Legendary => "A legendary boss appears!",
            StageKind::MainBoss => "A main boss appears!",
            StageKind::MidBoss => "A mid boss appears!",
            StageKind::Regular => "An enemy appears!",
        }
    }
}

/// Builds a fresh enemy for `stage`; nothing carries over from earlier stages.
pub fn spawn_enemy(stage: u32, mut log: impl FnMut(String)) -> Character {
    let kind = StageKind::classify(stage);
    let (hp, fp) = kind.stats(stage);
    log(format!("[STAGE] Stage {}: {}", stage, kind.announcement()));
    Character::new(kind.enemy_name(stage), hp, fp)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseOutcome {
    Purchased { item: ItemId, cost: u32 },
    InsufficientLeaves { needed: u32, have: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelUpOutcome {
    LeveledUp { next_cost: u32 },
    InsufficientLeaves { needed: u32, have: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpgradeOutcome {
    Upgraded { item: ItemId, value: i32 },
    InsufficientLeaves { needed: u32, have: u32 },
    NothingEquipped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquipOutcome {
    Equipped { item: ItemId, replaced: Option<ItemId> },
    NotEquipment { item: ItemId },
    NotFound { item: ItemId },
}

/// Which equipment slot an upgrade targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Weapon,
    Armor,
}

/// Stage counter, leaves and inventory for one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progression {
    pub current_stage: u32,
    pub leaves: u32,
    pub level_up_cost: u32,
    /// Acquisition order; duplicates allowed.
    pub inventory: Vec<ItemId>,
}

impl Progression {
    pub fn new(leaves: u32, level_up_cost: u32) -> Self {
        Self { current_stage: 1, leaves, level_up_cost, inventory: Vec::new() }
    }

    fn spend(&mut self, cost: u32) -> Result<(), (u32, u32)> {
        if self.leaves < cost {
            return Err((cost, self.leaves));
        }
        self.leaves -= cost;
        Ok(())
    }

    pub fn has_item(&self, item: ItemId) -> bool {
        self.inventory.contains(&item)
    }

    /// Removes the first matching entry.
    pub fn take_item(&mut self, item: ItemId) -> bool {
        match self.inventory.iter().position(|i| *i == item) {
            Some(idx) => {
                self.inventory.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn grant_reward(&mut self, dice: &mut Dice, mut log: impl FnMut(String)) -> ItemId {
        let reward = ItemId::ALL[dice.pick(ItemId::ALL.len())];
        self.inventory.push(reward);
        log(format!("[REWARD] Player received a {} as a reward.", reward.item().name));
        reward
    }

    /// Moves to the next stage: new enemy, full player HP/FP, stage-clear leaves.
    /// The player's status and active effects carry over.
    pub fn advance(&mut self, player: &mut Character, mut log: impl FnMut(String)) -> Character {
        self.current_stage += 1;
        let enemy = spawn_enemy(self.current_stage, &mut log);
        player.restore();
        self.leaves = self.leaves.saturating_add(STAGE_CLEAR_LEAVES);
        log(format!(
            "[STAGE] Player recovered full HP and FP. Earned {} leaves.",
            STAGE_CLEAR_LEAVES
        ));
        enemy
    }

    pub fn buy(&mut self, item: ItemId, mut log: impl FnMut(String)) -> PurchaseOutcome {
        let entry = item.item();
        match self.spend(entry.cost) {
            Ok(()) => {
                self.inventory.push(item);
                log(format!("[SHOP] Bought {} for {} leaves.", entry.name, entry.cost));
                PurchaseOutcome::Purchased { item, cost: entry.cost }
            }
            Err((needed, have)) => {
                log(format!("[SHOP] Not enough leaves to buy {}.", entry.name));
                PurchaseOutcome::InsufficientLeaves { needed, have }
            }
        }
    }

    /// Raises max HP/FP; current HP/FP stay where they are.
    pub fn level_up(&mut self, player: &mut Character, mut log: impl FnMut(String)) -> LevelUpOutcome {
        if let Err((needed, have)) = self.spend(self.level_up_cost) {
            log(format!(
                "[LEVEL] Not enough leaves to level up. {} leaves required.",
                needed
            ));
            return LevelUpOutcome::InsufficientLeaves { needed, have };
        }
        let next = (u64::from(self.level_up_cost) * 3).div_ceil(2);
        self.level_up_cost = u32::try_from(next).unwrap_or(u32::MAX);
        player.max_hp = player.max_hp.saturating_add(LEVEL_UP_HP);
        player.max_fp = player.max_fp.saturating_add(LEVEL_UP_FP);
        log(format!(
            "[LEVEL] Player leveled up! Max HP and FP increased. Next level up costs {} leaves.",
            self.level_up_cost
        ));
        LevelUpOutcome::LeveledUp { next_cost: self.level_up_cost }
    }

    pub fn upgrade(&mut self, player: &mut Character, slot: Slot, mut log: impl FnMut(String)) -> UpgradeOutcome {
        let (piece, stat, label) = match slot {
            Slot::Weapon => (player.weapon.as_mut(), EffectStat::Damage, "damage"),
            Slot::Armor => (player.armor.as_mut(), EffectStat::Defense, "defense"),
        };
        let Some(piece) = piece else {
            log(format!("[UPGRADE] No {:?} equipped to upgrade.", slot));
            return UpgradeOutcome::NothingEquipped;
        };
        if let Err((needed, have)) = self.spend(UPGRADE_COST) {
            log(format!("[UPGRADE] Not enough leaves to upgrade {:?}.", slot));
            return UpgradeOutcome::InsufficientLeaves { needed, have };
        }
        let value = piece.improve(stat, UPGRADE_AMOUNT);
        log(format!("[UPGRADE] {:?} upgraded! New {}: {}", slot, label, value));
        UpgradeOutcome::Upgraded { item: piece.item, value }
    }

    /// Wears a weapon or armor from the inventory; the old piece goes back into it.
    pub fn equip(&mut self, player: &mut Character, item: ItemId, mut log: impl FnMut(String)) -> EquipOutcome {
        let entry = item.item();
        let slot = match entry.kind {
            ItemKind::Weapon => &mut player.weapon,
            ItemKind::Armor => &mut player.armor,
            ItemKind::Potion => {
                log(format!("[EQUIP] {} cannot be equipped.", entry.name));
                return EquipOutcome::NotEquipment { item };
            }
        };
        if !self.take_item(item) {
            log(format!("[EQUIP] No {} in inventory.", entry.name));
            return EquipOutcome::NotFound { item };
        }
        let replaced = slot.replace(Equipment::from_catalog(item)).map(|old| old.item);
        if let Some(old) = replaced {
            self.inventory.push(old);
        }
        log(format!("[EQUIP] Player equipped {}.", entry.name));
        EquipOutcome::Equipped { item, replaced }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_item_removes_only_first_match() {
        let mut p = Progression::new(0, 50);
        p.inventory = vec![ItemId::HealingPotion, ItemId::Sword, ItemId::HealingPotion];
        assert!(p.take_item(ItemId::HealingPotion));
        assert_eq!(p.inventory, vec![ItemId::Sword, ItemId::HealingPotion]);
        assert!(!p.take_item(ItemId::Axe));
    }

    #[test]
    fn spawn_names_follow_tier() {
        let mut seen = vec![];
        assert_eq!(spawn_enemy(7, |s| seen.push(s)).name, "Enemy 7");
        assert_eq!(spawn_enemy(20, |s| seen.push(s)).name, "Legendary Boss");
        assert_eq!(seen[0], "[STAGE] Stage 7: An enemy appears!");
    }
}
