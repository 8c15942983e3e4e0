use stage_engine::{Dice, Session, SessionConfig, SkillId, init_tracing};

#[test]
fn scripted_exchange_log() {
    init_tracing(tracing::Level::DEBUG);
    let mut session = Session::in_memory(SessionConfig::default()).with_dice(Dice::from_scripted(vec![0.85]));
    session.use_skill(SkillId::Fireball);

    insta::assert_snapshot!(session.log().join("\n"), @r"
    [STAGE] Stage 1: An enemy appears!
    [SKILL][Player] used Fireball. Enemy 1 took 30 damage.
    [COND][Enemy 1] gains Burn for 3 turns
    [COND][Enemy 1] suffers Burn: 75 → 54 HP
    [REST][Enemy 1] recovered 0 FP.
    ");
}

#[test]
fn views_reflect_the_exchange() {
    let mut session = Session::in_memory(SessionConfig::default()).with_dice(Dice::from_scripted(vec![0.85]));
    session.use_skill(SkillId::Fireball);
    let player = session.player_view();
    let enemy = session.enemy_view();
    assert_eq!((player.hp, player.fp, player.max_hp, player.max_fp), (100.0, 35, 100, 50));
    assert_eq!((enemy.name.as_str(), enemy.hp, enemy.max_hp), ("Enemy 1", 54.0, 105));
}
