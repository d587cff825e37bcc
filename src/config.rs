//! Run configuration
//!
//! Loaded from built-in defaults, then an optional TOML file, then
//! `DELVE_`-prefixed environment variables (`__` separates nested keys, e.g.
//! `DELVE_LEVEL__WIDTH=20`).

use std::path::Path;
use std::time::Duration;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::builder::build_from_descriptor;
use crate::combat::Dice;
use crate::error::ConfigError;
use crate::level::LevelGenerator;

/// Config file read when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "delve.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Fixed dice seed. OS entropy when absent.
    pub seed: Option<u64>,
    pub level: LevelGenerator,
    /// One build descriptor per party member
    pub party: Vec<String>,
    pub pacing: Pacing,
    /// Turns the headless run lasts
    pub max_turns: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            level: LevelGenerator::default(),
            party: vec!["tank".to_string()],
            pacing: Pacing::default(),
            max_turns: 200,
        }
    }
}

/// Cosmetic delays of the headless driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pacing {
    /// Delay after each NPC decision
    pub think_ms: u64,
    /// Delay after a level reset
    pub reset_ms: u64,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            think_ms: 50,
            reset_ms: 1000,
        }
    }
}

impl Pacing {
    /// No delays at all
    pub const NONE: Pacing = Pacing {
        think_ms: 0,
        reset_ms: 0,
    };

    pub fn think(&self) -> Duration {
        Duration::from_millis(self.think_ms)
    }

    pub fn reset(&self) -> Duration {
        Duration::from_millis(self.reset_ms)
    }
}

impl Config {
    /// Load from `path`, or from `delve.toml` in the working directory when
    /// it exists. A missing default file is not an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) if !path.is_file() => {
                return Err(ConfigError::MissingFile(path.to_path_buf()));
            }
            Some(path) => Toml::file(path),
            None => Toml::file(DEFAULT_CONFIG_FILE),
        };
        let config: Config = Figment::from(Serialized::defaults(Config::default()))
            .merge(file)
            .merge(Env::prefixed("DELVE_").split("__"))
            .extract()
            .map_err(Box::new)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.level.width == 0 || self.level.height == 0 {
            return Err(ConfigError::EmptyLevel {
                width: self.level.width,
                height: self.level.height,
            });
        }
        if self.party.is_empty() {
            return Err(ConfigError::EmptyParty);
        }
        // Descriptors are checked against a throwaway die
        let mut dice = Dice::seeded(0);
        for descriptor in &self.party {
            build_from_descriptor(descriptor, 1, None, &mut dice)?;
        }
        Ok(())
    }

    /// Dice for this run
    pub fn dice(&self) -> Dice {
        match self.seed {
            Some(seed) => Dice::seeded(seed),
            None => Dice::from_entropy(),
        }
    }
}
