use serde::{Deserialize, Serialize};

use crate::Dice;
use crate::character::Character;
use crate::combat::actions::{cast_skill, rest};
use crate::content::SkillId;

/// Fixed-probability enemy behaviour. No memory, no look at the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyAction {
    Attack,
    Fireball,
    IceBlast,
    Rest,
}

impl EnemyAction {
    /// Maps one uniform draw in `[0, 1)` onto the cumulative table
    /// 0.3 attack / 0.2 fireball / 0.2 ice blast / 0.3 rest.
    pub fn from_draw(draw: f64) -> Self {
        if draw < 0.3 {
            EnemyAction::Attack
        } else if draw < 0.5 {
            EnemyAction::Fireball
        } else if draw < 0.7 {
            EnemyAction::IceBlast
        } else {
            EnemyAction::Rest
        }
    }

    pub fn skill(self) -> Option<SkillId> {
        match self {
            EnemyAction::Attack => Some(SkillId::Attack),
            EnemyAction::Fireball => Some(SkillId::Fireball),
            EnemyAction::IceBlast => Some(SkillId::IceBlast),
            EnemyAction::Rest => None,
        }
    }
}

/// Draws once and carries out the chosen action against `player`.
pub fn take_enemy_action(
    enemy: &mut Character,
    player: &mut Character,
    dice: &mut Dice,
    mut log: impl FnMut(String),
) -> EnemyAction {
    let action = EnemyAction::from_draw(dice.unit());
    match action.skill() {
        Some(skill) => {
            cast_skill(enemy, player, skill, &mut log);
        }
        None => {
            rest(enemy, &mut log);
        }
    }
    action
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draw_boundaries() {
        assert_eq!(EnemyAction::from_draw(0.0), EnemyAction::Attack);
        assert_eq!(EnemyAction::from_draw(0.2999), EnemyAction::Attack);
        assert_eq!(EnemyAction::from_draw(0.3), EnemyAction::Fireball);
        assert_eq!(EnemyAction::from_draw(0.5), EnemyAction::IceBlast);
        assert_eq!(EnemyAction::from_draw(0.7), EnemyAction::Rest);
        assert_eq!(EnemyAction::from_draw(0.9999), EnemyAction::Rest);
    }
}
