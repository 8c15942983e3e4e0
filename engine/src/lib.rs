use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub mod character;
pub mod combat;
pub mod config;
pub mod content;
pub mod error;
pub mod persistence;
pub mod session;
pub mod stage;
pub mod status;

pub use character::{Character, Equipment, SkillOutcome, Status};
pub use config::SessionConfig;
pub use content::{EffectStat, Item, ItemId, ItemKind, Skill, SkillId, shop_catalog};
pub use error::StoreError;
pub use persistence::{JsonFileStore, MemoryStore, SaveSnapshot, SaveStore};
pub use session::{CombatantView, Resolution, Session, SessionState, TurnReport};
pub use stage::{Progression, StageKind};
pub use status::{StatusEffect, StatusEffects};

enum Source {
    Seeded(ChaCha8Rng),
    Scripted { draws: Vec<f64>, next: usize },
}

/// Seedable source of uniform draws in `[0, 1)`.
///
/// Every random decision in a session (enemy action choice, freeze procs,
/// reward picks) goes through one `Dice`, so a fixed seed replays a fight.
pub struct Dice {
    source: Source,
}

impl Dice {
    pub fn from_seed(seed: u64) -> Self {
        Self { source: Source::Seeded(ChaCha8Rng::seed_from_u64(seed)) }
    }

    /// Replays `draws` in order, wrapping around when exhausted.
    pub fn from_scripted(draws: Vec<f64>) -> Self {
        Self { source: Source::Scripted { draws, next: 0 } }
    }

    pub fn unit(&mut self) -> f64 {
        match &mut self.source {
            Source::Seeded(rng) => rng.gen_range(0.0..1.0),
            Source::Scripted { draws, next } => {
                if draws.is_empty() {
                    return 0.0;
                }
                let value = draws[*next % draws.len()];
                *next += 1;
                value
            }
        }
    }

    /// Uniform index into a collection of `len` elements. `len` must be non-zero.
    pub fn pick(&mut self, len: usize) -> usize {
        let idx = (self.unit() * len as f64).floor() as usize;
        idx.min(len.saturating_sub(1))
    }
}

/// Install a `fmt` subscriber at `level`. Safe to call more than once.
pub fn init_tracing(level: tracing::Level) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init();
}
