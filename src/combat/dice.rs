//! Dice
//!
//! All simulation randomness flows through one owned [`Dice`]. A fixed seed
//! reproduces the same sequence and the same number of draws.
//! Notation like "2d6+3", "1d20", "4d6-2" parses into a [`DiceRoll`].

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::DiceNotationError;

/// Largest die count accepted in notation
pub const MAX_DICE: u32 = 100;
/// Largest face count accepted in notation
pub const MAX_SIDES: u32 = 1000;

/// Seeded randomness source for everything that affects the simulation
#[derive(Debug, Clone)]
pub struct Dice {
    rng: StdRng,
    draws: u64,
}

impl Dice {
    /// Create a reproducible source from an explicit seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            draws: 0,
        }
    }

    /// Create a non-reproducible source seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
            draws: 0,
        }
    }

    /// Roll `count` dice of `sides` faces and add `modifier`
    pub fn roll(&mut self, count: u32, sides: u32, modifier: i32) -> i32 {
        let sides = sides.max(1);
        let mut total: i32 = 0;
        for _ in 0..count {
            total = total.saturating_add(self.rng.random_range(1..=sides) as i32);
            self.draws += 1;
        }
        total.saturating_add(modifier)
    }

    /// Roll 4d6 and keep the three highest
    pub fn ability_roll(&mut self) -> i32 {
        let mut sum = 0;
        let mut lowest = i32::MAX;
        for _ in 0..4 {
            let roll = self.roll(1, 6, 0);
            lowest = lowest.min(roll);
            sum += roll;
        }
        sum - lowest
    }

    /// Number of single-die draws made so far
    pub fn draws(&self) -> u64 {
        self.draws
    }
}

impl Default for Dice {
    fn default() -> Self {
        Self::from_entropy()
    }
}

/// Dice notation such as `2d6+3`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRoll {
    pub count: u32,
    pub sides: u32,
    pub modifier: i32,
}

impl DiceRoll {
    pub const fn new(count: u32, sides: u32, modifier: i32) -> Self {
        Self {
            count,
            sides,
            modifier,
        }
    }

    pub fn roll(&self, dice: &mut Dice) -> i32 {
        dice.roll(self.count, self.sides, self.modifier)
    }

    /// Every die shows 1
    pub fn min(&self) -> i32 {
        i32::try_from(self.count)
            .unwrap_or(i32::MAX)
            .saturating_add(self.modifier)
    }

    /// Every die shows its highest face
    pub fn max(&self) -> i32 {
        let total = i64::from(self.count)
            .saturating_mul(i64::from(self.sides))
            .saturating_add(i64::from(self.modifier));
        total.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
    }
}

impl FromStr for DiceRoll {
    type Err = DiceNotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_dice(s)
    }
}

impl fmt::Display for DiceRoll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)?;
        if self.modifier != 0 {
            write!(f, "{:+}", self.modifier)?;
        }
        Ok(())
    }
}

/// Parse `[count]d<sides>[+|-modifier]`. A missing count means one die.
/// Counts above [`MAX_DICE`] and sides above [`MAX_SIDES`] are rejected.
pub fn parse_dice(notation: &str) -> Result<DiceRoll, DiceNotationError> {
    let text = notation.trim().to_ascii_lowercase();
    let bad = || DiceNotationError(notation.to_string());

    let (count, rest) = text.split_once('d').ok_or_else(bad)?;
    let count = match count {
        "" => 1,
        n => n.parse::<u32>().map_err(|_| bad())?,
    };

    // The sign stays with the modifier
    let split = rest.find(['+', '-']).unwrap_or(rest.len());
    let (sides, modifier) = rest.split_at(split);
    let sides = sides.parse::<u32>().map_err(|_| bad())?;
    let modifier = match modifier {
        "" => 0,
        m => m.parse::<i32>().map_err(|_| bad())?,
    };

    if !(1..=MAX_DICE).contains(&count) || !(1..=MAX_SIDES).contains(&sides) {
        return Err(bad());
    }
    Ok(DiceRoll::new(count, sides, modifier))
}
