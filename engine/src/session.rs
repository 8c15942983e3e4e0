use serde::Serialize;
use tracing::{debug, info, warn};

use crate::character::{Character, Status};
use crate::combat::actions::{self, CastReport, ItemOutcome};
use crate::combat::enemy::{EnemyAction, take_enemy_action};
use crate::config::SessionConfig;
use crate::content::{ItemId, SkillId};
use crate::error::StoreError;
use crate::persistence::{MemoryStore, SaveSnapshot, SaveStore};
use crate::stage::{
    EquipOutcome, LevelUpOutcome, Progression, PurchaseOutcome, Slot, UpgradeOutcome, spawn_enemy,
};
use crate::status::process_status_effects;
use crate::Dice;

/// Read-only stats for whoever draws the bars.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombatantView {
    pub name: String,
    pub hp: f64,
    pub fp: u32,
    pub max_hp: u32,
    pub max_fp: u32,
    pub status: Status,
}

impl CombatantView {
    fn of(c: &Character) -> Self {
        Self {
            name: c.name.clone(),
            hp: c.hp,
            fp: c.fp,
            max_hp: c.max_hp,
            max_fp: c.max_fp,
            status: c.status,
        }
    }
}

/// How the exchange ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Ongoing,
    /// The enemy fell; `stage` is the stage now being fought.
    Victory { reward: ItemId, stage: u32 },
    /// The player fell. `rolled_back` is false when no save existed and the
    /// session restarted from its opening state instead.
    Defeat { rolled_back: bool },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurnReport<T> {
    pub action: T,
    pub enemy: Option<EnemyAction>,
    pub resolution: Resolution,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    NoSave,
}

/// All mutable game state: both combatants, progression and the event log.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub player: Character,
    pub enemy: Character,
    pub progression: Progression,
    /// Append-only, oldest first.
    pub log: Vec<String>,
}

impl SessionState {
    fn opening(config: &SessionConfig, mut log: Vec<String>) -> Self {
        let player = Character::new(config.player_name.clone(), config.player_hp, config.player_fp);
        let progression = Progression::new(config.starting_leaves, config.level_up_cost);
        let enemy = spawn_enemy(progression.current_stage, logger(&mut log));
        Self { player, enemy, progression, log }
    }
}

fn logger(log: &mut Vec<String>) -> impl FnMut(String) + '_ {
    move |msg: String| {
        info!("{}", msg);
        log.push(msg);
    }
}

/// One player's run. Every action resolves fully, enemy reply included,
/// before it returns.
pub struct Session<S: SaveStore = MemoryStore> {
    state: SessionState,
    dice: Dice,
    store: S,
    config: SessionConfig,
}

impl Session<MemoryStore> {
    pub fn in_memory(config: SessionConfig) -> Self {
        Self::new(config, MemoryStore::new())
    }
}

impl<S: SaveStore> Session<S> {
    /// Fresh session; does not touch the store.
    pub fn new(config: SessionConfig, store: S) -> Self {
        let state = SessionState::opening(&config, Vec::new());
        Self { state, dice: Dice::from_seed(config.seed), store, config }
    }

    /// Fresh session followed by a best-effort load of the saved slot.
    pub fn start(config: SessionConfig, store: S) -> Self {
        let mut session = Self::new(config, store);
        if let Err(e) = session.load() {
            warn!(error = %e, "could not load saved game at startup");
            session.record(format!("[SAVE] Could not load saved game: {}", e));
        }
        session
    }

    /// Swaps the random source, e.g. for scripted draws in tests.
    pub fn with_dice(mut self, dice: Dice) -> Self {
        self.dice = dice;
        self
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Direct write access for test setup. Bypasses every clamp the actions
    /// maintain, so gameplay code must not use it.
    #[doc(hidden)]
    pub fn state_mut(&mut self) -> &mut SessionState {
        &mut self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn player_view(&self) -> CombatantView {
        CombatantView::of(&self.state.player)
    }

    pub fn enemy_view(&self) -> CombatantView {
        CombatantView::of(&self.state.enemy)
    }

    pub fn log(&self) -> &[String] {
        &self.state.log
    }

    fn record(&mut self, msg: String) {
        logger(&mut self.state.log)(msg);
    }

    pub fn use_skill(&mut self, skill: SkillId) -> TurnReport<CastReport> {
        let st = &mut self.state;
        let action = actions::cast_skill(&mut st.player, &mut st.enemy, skill, logger(&mut st.log));
        let (enemy, resolution) = self.finish_player_turn();
        TurnReport { action, enemy, resolution }
    }

    pub fn use_item(&mut self, item: ItemId) -> TurnReport<ItemOutcome> {
        let st = &mut self.state;
        let action = actions::use_item(&mut st.player, &mut st.progression, item, logger(&mut st.log));
        if !action.took_turn() {
            return TurnReport { action, enemy: None, resolution: Resolution::Ongoing };
        }
        let (enemy, resolution) = self.finish_player_turn();
        TurnReport { action, enemy, resolution }
    }

    pub fn rest(&mut self) -> TurnReport<u32> {
        let st = &mut self.state;
        let action = actions::rest(&mut st.player, logger(&mut st.log));
        let (enemy, resolution) = self.finish_player_turn();
        TurnReport { action, enemy, resolution }
    }

    pub fn equip(&mut self, item: ItemId) -> EquipOutcome {
        let st = &mut self.state;
        st.progression.equip(&mut st.player, item, logger(&mut st.log))
    }

    pub fn buy(&mut self, item: ItemId) -> PurchaseOutcome {
        let st = &mut self.state;
        st.progression.buy(item, logger(&mut st.log))
    }

    pub fn level_up(&mut self) -> LevelUpOutcome {
        let st = &mut self.state;
        st.progression.level_up(&mut st.player, logger(&mut st.log))
    }

    pub fn upgrade(&mut self, slot: Slot) -> UpgradeOutcome {
        let st = &mut self.state;
        st.progression.upgrade(&mut st.player, slot, logger(&mut st.log))
    }

    /// Overwrites the save slot with the current state.
    pub fn save(&mut self) -> Result<(), StoreError> {
        let st = &self.state;
        let snapshot = SaveSnapshot::capture(&st.player, &st.enemy, &st.progression);
        self.store.write(&snapshot.to_json()?)?;
        debug!(stage = snapshot.current_stage, "snapshot written");
        self.record("[SAVE] Game saved!".to_string());
        Ok(())
    }

    /// Replaces live state with the saved snapshot, if there is one.
    pub fn load(&mut self) -> Result<LoadOutcome, StoreError> {
        let Some(text) = self.store.read()? else {
            self.record("[SAVE] No saved game data found.".to_string());
            return Ok(LoadOutcome::NoSave);
        };
        let snapshot = SaveSnapshot::from_json(&text)?;
        self.state.progression = snapshot.progression();
        self.state.player = snapshot.player;
        self.state.enemy = snapshot.enemy;
        self.record("[SAVE] Game loaded!".to_string());
        Ok(LoadOutcome::Loaded)
    }

    fn finish_player_turn(&mut self) -> (Option<EnemyAction>, Resolution) {
        if self.state.enemy.is_down() {
            return (None, self.victory());
        }
        self.enemy_turn()
    }

    /// Status ticks (enemy, then player), then one enemy action.
    fn enemy_turn(&mut self) -> (Option<EnemyAction>, Resolution) {
        let st = &mut self.state;
        let dice = &mut self.dice;

        process_status_effects(&mut st.enemy, || dice.unit(), logger(&mut st.log));
        if st.enemy.is_down() {
            return (None, self.victory());
        }
        process_status_effects(&mut st.player, || dice.unit(), logger(&mut st.log));
        if st.player.is_down() {
            return (None, self.defeat());
        }

        let action = take_enemy_action(&mut st.enemy, &mut st.player, dice, logger(&mut st.log));
        let resolution = if st.player.is_down() {
            self.defeat()
        } else if st.enemy.is_down() {
            self.victory()
        } else {
            Resolution::Ongoing
        };
        (Some(action), resolution)
    }

    fn victory(&mut self) -> Resolution {
        let (reward, stage) = {
            let st = &mut self.state;
            let mut log = logger(&mut st.log);
            log(format!("[STAGE] {} defeated!", st.enemy.name));
            let reward = st.progression.grant_reward(&mut self.dice, &mut log);
            st.enemy = st.progression.advance(&mut st.player, &mut log);
            (reward, st.progression.current_stage)
        };

        if let Err(e) = self.save() {
            warn!(error = %e, "autosave after victory failed");
            self.record(format!("[SAVE] Failed to save game: {}", e));
        }
        Resolution::Victory { reward, stage }
    }

    fn defeat(&mut self) -> Resolution {
        let name = self.state.player.name.clone();
        self.record(format!("[DEFEAT] {} is defeated. YOU DIE.", name));
        match self.load() {
            Ok(LoadOutcome::Loaded) => Resolution::Defeat { rolled_back: true },
            Ok(LoadOutcome::NoSave) => {
                self.restart();
                Resolution::Defeat { rolled_back: false }
            }
            Err(e) => {
                warn!(error = %e, "rollback after defeat failed");
                self.record(format!("[SAVE] Could not load saved game: {}", e));
                self.restart();
                Resolution::Defeat { rolled_back: false }
            }
        }
    }

    fn restart(&mut self) {
        let log = std::mem::take(&mut self.state.log);
        self.state = SessionState::opening(&self.config, log);
        self.record("[DEFEAT] Starting over from stage 1.".to_string());
    }
}
