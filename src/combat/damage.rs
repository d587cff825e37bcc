//! Damage kinds
//!
//! Damage modifiers are layered like ability modifiers. Two of the kinds are
//! defensive and feed armor class instead of damage rolls:
//! - Melee / Ranged: added to weapon damage rolls
//! - Armor / Shield: added to armor class

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Types of damage modifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DamageType {
    /// Melee damage bonus
    Melee,
    /// Ranged damage bonus
    Ranged,
    /// Armor value
    Armor,
    /// Shield armor value
    Shield,
}

impl DamageType {
    /// Get all damage types
    pub fn all() -> &'static [DamageType] {
        &[
            DamageType::Melee,
            DamageType::Ranged,
            DamageType::Armor,
            DamageType::Shield,
        ]
    }

    /// Whether this kind contributes to armor class
    pub fn is_defensive(&self) -> bool {
        matches!(self, DamageType::Armor | DamageType::Shield)
    }
}

impl FromStr for DamageType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "melee" => Ok(DamageType::Melee),
            "ranged" => Ok(DamageType::Ranged),
            "armor" | "armour" => Ok(DamageType::Armor),
            "shield" => Ok(DamageType::Shield),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for DamageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DamageType::Melee => "melee",
            DamageType::Ranged => "ranged",
            DamageType::Armor => "armor",
            DamageType::Shield => "shield",
        };
        write!(f, "{}", s)
    }
}
