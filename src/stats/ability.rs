//! Ability kinds

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The six core abilities plus hit points
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AbilityType {
    /// Strength
    Str,
    /// Dexterity
    Dex,
    /// Constitution
    Con,
    /// Intelligence
    Int,
    /// Wisdom
    Wis,
    /// Charisma
    Cha,
    /// Hit points
    Hp,
}

impl AbilityType {
    /// The six core abilities, without HP
    pub const CORE: [AbilityType; 6] = [
        AbilityType::Str,
        AbilityType::Dex,
        AbilityType::Con,
        AbilityType::Int,
        AbilityType::Wis,
        AbilityType::Cha,
    ];

    /// Every ability kind, HP last
    pub fn all() -> &'static [AbilityType] {
        &[
            AbilityType::Str,
            AbilityType::Dex,
            AbilityType::Con,
            AbilityType::Int,
            AbilityType::Wis,
            AbilityType::Cha,
            AbilityType::Hp,
        ]
    }

    /// Human readable name
    pub fn name(&self) -> &'static str {
        match self {
            AbilityType::Str => "Strength",
            AbilityType::Dex => "Dexterity",
            AbilityType::Con => "Constitution",
            AbilityType::Int => "Intelligence",
            AbilityType::Wis => "Wisdom",
            AbilityType::Cha => "Charisma",
            AbilityType::Hp => "Hit Points",
        }
    }
}

impl FromStr for AbilityType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "str" | "strength" => Ok(AbilityType::Str),
            "dex" | "dexterity" => Ok(AbilityType::Dex),
            "con" | "cons" | "constitution" => Ok(AbilityType::Con),
            "int" | "intelligence" => Ok(AbilityType::Int),
            "wis" | "wisdom" => Ok(AbilityType::Wis),
            "cha" | "char" | "charisma" => Ok(AbilityType::Cha),
            "hp" | "hit points" => Ok(AbilityType::Hp),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for AbilityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AbilityType::Str => "STR",
            AbilityType::Dex => "DEX",
            AbilityType::Con => "CON",
            AbilityType::Int => "INT",
            AbilityType::Wis => "WIS",
            AbilityType::Cha => "CHA",
            AbilityType::Hp => "HP",
        };
        write!(f, "{}", s)
    }
}
