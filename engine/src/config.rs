use std::{fs, path::Path};

use anyhow::{Context, Result, bail};
use serde::Deserialize;

const DEFAULT_PLAYER_HP: u32 = 100;
const DEFAULT_PLAYER_FP: u32 = 50;
const DEFAULT_LEVEL_UP_COST: u32 = 50;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct SessionConfig {
    pub seed: u64,
    pub player_name: String,
    pub player_hp: u32,
    pub player_fp: u32,
    pub starting_leaves: u32,
    pub level_up_cost: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            player_name: "Player".to_string(),
            player_hp: DEFAULT_PLAYER_HP,
            player_fp: DEFAULT_PLAYER_FP,
            starting_leaves: 0,
            level_up_cost: DEFAULT_LEVEL_UP_COST,
        }
    }
}

impl SessionConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self { seed, ..Self::default() }
    }

    /// Reads a `.json`, `.yaml` or `.yml` file; missing keys take their defaults.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read session config: {}", path.display()))?;
        let cfg: SessionConfig = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str(&text)
                .with_context(|| format!("failed to parse session config JSON: {}", path.display()))?,
            Some("yaml" | "yml") => serde_yaml::from_str(&text)
                .with_context(|| format!("failed to parse session config YAML: {}", path.display()))?,
            _ => bail!("unsupported config format: {}", path.display()),
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.player_hp == 0 {
            bail!("player_hp must be positive");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaml_fills_missing_fields_with_defaults() {
        let cfg: SessionConfig = serde_yaml::from_str("seed: 9\nplayer_name: Rin\n").unwrap();
        assert_eq!(cfg.seed, 9);
        assert_eq!(cfg.player_name, "Rin");
        assert_eq!(cfg.player_hp, 100);
        assert_eq!(cfg.level_up_cost, 50);
    }

    #[test]
    fn loads_json_file_and_rejects_unknown_extension() {
        let dir = std::env::temp_dir().join(format!("stage-engine-cfg-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let json = dir.join("session.json");
        fs::write(&json, r#"{"seed": 3, "starting_leaves": 40}"#).unwrap();
        let cfg = SessionConfig::from_path(&json).unwrap();
        assert_eq!((cfg.seed, cfg.starting_leaves, cfg.player_fp), (3, 40, 50));

        let toml = dir.join("session.toml");
        fs::write(&toml, "seed = 3").unwrap();
        assert!(SessionConfig::from_path(&toml).is_err());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn zero_hp_is_rejected() {
        let cfg = SessionConfig { player_hp: 0, ..SessionConfig::default() };
        assert!(cfg.validate().is_err());
    }
}
