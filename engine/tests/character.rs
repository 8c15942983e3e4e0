use proptest::prelude::*;
use stage_engine::{Character, Equipment, ItemId, SkillId, SkillOutcome, StatusEffect};

#[test]
fn cast_with_enough_fp_pays_exact_cost() {
    let mut c = Character::new("Hero", 100, 50);
    let outcome = c.apply_skill(SkillId::Special.skill());
    assert_eq!(outcome, SkillOutcome::Cast { damage: 40 });
    assert_eq!(c.fp, 30);
    assert_eq!(c.hp, 100.0);
}

#[test]
fn weapon_bonus_is_added_to_skill_damage() {
    let mut c = Character::new("Hero", 100, 50);
    c.weapon = Some(Equipment::from_catalog(ItemId::Axe));
    assert_eq!(c.apply_skill(SkillId::Attack.skill()).damage(), 35);
}

#[test]
fn exhausted_cast_costs_half_the_fp_price_in_hp() {
    let mut c = Character::new("Hero", 100, 10);
    let outcome = c.apply_skill(SkillId::Fireball.skill());
    assert_eq!(outcome, SkillOutcome::Exhausted { penalty: 7.5, hp_lost: 7.5 });
    assert_eq!(outcome.damage(), 0);
    assert_eq!(c.hp, 92.5);
    assert_eq!(c.fp, 10, "FP is never taken on a failed cast");
}

#[test]
fn exhausted_penalty_floors_at_zero_hp() {
    let mut c = Character::new("Hero", 100, 0);
    c.hp = 3.0;
    c.apply_skill(SkillId::ThunderStrike.skill());
    assert_eq!(c.hp, 0.0);
    assert!(c.is_down());
}

#[test]
fn status_effect_counter_is_overwritten_not_summed() {
    let mut c = Character::new("Hero", 100, 50);
    c.add_status_effect(StatusEffect::Burn, 3);
    c.add_status_effect(StatusEffect::Burn, 2);
    assert_eq!(c.status_effects.remaining(StatusEffect::Burn), 2);
}

#[test]
fn fp_recovery_clamps_to_max() {
    let mut c = Character::new("Hero", 100, 50);
    c.fp = 45;
    assert_eq!(c.recover_fp(20), 5);
    assert_eq!(c.fp, 50);
}

#[derive(Debug, Clone)]
enum Op {
    Damage(f64),
    UseFp(u32),
    RecoverFp(u32),
    Heal(u32),
    Skill(usize),
    LevelUp,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0.0f64..500.0).prop_map(Op::Damage),
        (0u32..80).prop_map(Op::UseFp),
        (0u32..80).prop_map(Op::RecoverFp),
        (0u32..200).prop_map(Op::Heal),
        (0usize..SkillId::ALL.len()).prop_map(Op::Skill),
        Just(Op::LevelUp),
    ]
}

proptest! {
    #[test]
    fn hp_and_fp_stay_within_bounds(
        max_hp in 1u32..400,
        max_fp in 0u32..120,
        armored in any::<bool>(),
        ops in prop::collection::vec(op(), 0..40),
    ) {
        let mut c = Character::new("Fuzz", max_hp, max_fp);
        if armored {
            c.armor = Some(Equipment::from_catalog(ItemId::Helmet));
        }
        for op in ops {
            match op {
                Op::Damage(d) => { c.take_damage(d); }
                Op::UseFp(n) => { c.use_fp(n); }
                Op::RecoverFp(n) => { c.recover_fp(n); }
                Op::Heal(n) => { c.heal(n); }
                Op::Skill(i) => { c.apply_skill(SkillId::ALL[i].skill()); }
                Op::LevelUp => { c.max_hp += 10; c.max_fp += 5; }
            }
            prop_assert!(c.hp >= 0.0 && c.hp <= f64::from(c.max_hp));
            prop_assert!(c.fp <= c.max_fp);
        }
    }
}
