//! delve - turn-based dungeon crawler simulation engine
//!
//! A party of players and a set of NPCs take turns on a tile grid. Every
//! random number comes from one seeded [`combat::Dice`], so a seed and a
//! command sequence replay exactly. The [`world::World`] validates and runs
//! every command and reports what happened through [`events::GameEvent`]s.

pub mod builder;
pub mod combat;
pub mod config;
pub mod entity;
pub mod error;
pub mod events;
pub mod level;
pub mod runner;
pub mod stats;
pub mod world;

pub use config::{Config, Pacing};
pub use error::{BuildError, ConfigError, DiceNotationError};
pub use runner::{RunSummary, Runner};
pub use world::{Action, Step, World};
