//! Living entities: players and NPCs
//!
//! A living entity carries an inventory, raw ability scores, its own
//! modifier layers, current HP and a level. Everything else (max HP, armor
//! class, ability modifiers) is derived from those layers plus equipment.

use serde::{Deserialize, Serialize};

use super::{EntityId, HasAbilityScores, HasInventory, HasLocation, Inventory, Location};
use crate::combat::{BaseAttackBonus, DamageType, DiceRoll};
use crate::stats::{self, AbilityType, Modifier, ModifierSet};

/// Damage dice used when no weapon is wielded
pub const UNARMED_DAMAGE: DiceRoll = DiceRoll {
    count: 1,
    sides: 3,
    modifier: 0,
};

/// Character class of a player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerClass {
    Fighter,
}

impl PlayerClass {
    pub fn name(&self) -> &'static str {
        match self {
            PlayerClass::Fighter => "Fighter",
        }
    }
}

/// Monster species an NPC can be rolled as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    Troll,
    Orc,
    Goblin,
}

impl Species {
    pub fn name(&self) -> &'static str {
        match self {
            Species::Troll => "Troll",
            Species::Orc => "Orc",
            Species::Goblin => "Goblin",
        }
    }
}

/// Variant data for the two kinds of living entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LivingKind {
    Player {
        class: Option<PlayerClass>,
    },
    Npc {
        species: Option<Species>,
        /// Whoever last attacked this NPC. A lookup key only.
        attacker: Option<EntityId>,
    },
}

/// A player or NPC
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Living {
    pub id: EntityId,
    pub name: String,
    pub location: Location,
    pub kind: LivingKind,
    inventory: Inventory,
    /// Rolled ability scores; HP accumulates here during a build
    raw: ModifierSet<AbilityType>,
    /// The entity's own ability layers (level-ups, potions, penalties)
    base: ModifierSet<AbilityType>,
    /// The entity's own damage layers
    base_damage: ModifierSet<DamageType>,
    hp: i32,
    /// Stored 0-indexed, exposed 1-indexed
    level: u32,
}

impl Living {
    fn with_kind(name: impl Into<String>, kind: LivingKind) -> Self {
        Self {
            id: EntityId::new(),
            name: name.into(),
            location: Location::default(),
            kind,
            inventory: Inventory::new(),
            raw: ModifierSet::new(),
            base: ModifierSet::new(),
            base_damage: ModifierSet::new(),
            hp: 0,
            level: 0,
        }
    }

    /// An unbuilt player with no class yet
    pub fn player(name: impl Into<String>) -> Self {
        Self::with_kind(name, LivingKind::Player { class: None })
    }

    /// An unbuilt NPC
    pub fn npc(name: impl Into<String>) -> Self {
        Self::with_kind(
            name,
            LivingKind::Npc {
                species: None,
                attacker: None,
            },
        )
    }

    /// An unbuilt NPC of a species, named after it
    pub fn monster(species: Species) -> Self {
        Self::with_kind(
            species.name(),
            LivingKind::Npc {
                species: Some(species),
                attacker: None,
            },
        )
    }

    /// Place the entity (builder style)
    pub fn at(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    pub fn is_player(&self) -> bool {
        matches!(self.kind, LivingKind::Player { .. })
    }

    pub fn is_npc(&self) -> bool {
        matches!(self.kind, LivingKind::Npc { .. })
    }

    /// The player's class, if this is a classed player
    pub fn player_class(&self) -> Option<PlayerClass> {
        match self.kind {
            LivingKind::Player { class } => class,
            LivingKind::Npc { .. } => None,
        }
    }

    /// Set the player class. No effect on NPCs.
    pub fn set_player_class(&mut self, new_class: PlayerClass) {
        if let LivingKind::Player { class } = &mut self.kind {
            *class = Some(new_class);
        }
    }

    /// The remembered attacker of an NPC
    pub fn attacker(&self) -> Option<EntityId> {
        match self.kind {
            LivingKind::Npc { attacker, .. } => attacker,
            LivingKind::Player { .. } => None,
        }
    }

    /// Remember who attacked this NPC. No effect on players.
    pub fn remember_attacker(&mut self, who: EntityId) {
        if let LivingKind::Npc { attacker, .. } = &mut self.kind {
            *attacker = Some(who);
        }
    }

    /// Raw ability scores
    pub fn raw_scores(&self) -> &ModifierSet<AbilityType> {
        &self.raw
    }

    pub fn raw_scores_mut(&mut self) -> &mut ModifierSet<AbilityType> {
        &mut self.raw
    }

    /// The entity's own ability layers
    pub fn base_modifiers(&self) -> &ModifierSet<AbilityType> {
        &self.base
    }

    pub fn base_modifiers_mut(&mut self) -> &mut ModifierSet<AbilityType> {
        &mut self.base
    }

    /// The entity's own damage layers
    pub fn base_damage_mut(&mut self) -> &mut ModifierSet<DamageType> {
        &mut self.base_damage
    }

    /// Pass-through layer added on top of the other ability layers: raw HP is
    /// forwarded as-is, every other raw kind contributes 0.
    fn adjusted_scores(&self) -> Modifier<AbilityType> {
        let mut adjust = Modifier::new();
        if self.raw.is_empty() {
            return adjust;
        }
        for kind in AbilityType::all() {
            let value = if *kind == AbilityType::Hp {
                self.raw.delta(*kind)
            } else {
                0
            };
            adjust.set_delta(*kind, value);
        }
        adjust
    }

    /// Own layers, then every equipped item's damage layer
    pub fn damage_modifiers(&self) -> ModifierSet<DamageType> {
        let mut set = ModifierSet::new();
        set.extend(&self.base_damage);
        for item in self.inventory.equipped_items() {
            set.add(item.damage.clone());
        }
        set
    }

    /// Maximum HP
    pub fn max_hp(&self) -> i32 {
        self.ability_modifiers().delta(AbilityType::Hp)
    }

    /// Current HP
    pub fn hp(&self) -> i32 {
        self.hp
    }

    /// Set current HP, clamped into `[0, max_hp]`
    pub fn set_hp(&mut self, value: i32) {
        let max = self.max_hp().max(0);
        self.hp = value.clamp(0, max);
    }

    /// Restore HP to the maximum
    pub fn reset_hp(&mut self) {
        self.hp = self.max_hp().max(0);
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Restore HP and forget any remembered attacker
    pub fn spawn(&mut self) {
        self.reset_hp();
        if let LivingKind::Npc { attacker, .. } = &mut self.kind {
            *attacker = None;
        }
    }

    /// Level, 1-indexed
    pub fn level(&self) -> u32 {
        self.level + 1
    }

    /// Set the 1-indexed level and restore HP
    pub fn set_level(&mut self, level: u32) {
        self.level = level.max(1) - 1;
        self.reset_hp();
    }

    /// Damage dice of the wielded weapon, or bare hands
    pub fn weapon_damage(&self) -> DiceRoll {
        self.inventory
            .equipped_items()
            .find_map(|item| item.weapon_damage())
            .unwrap_or(UNARMED_DAMAGE)
    }

    /// Per-ability scores and modifiers for display
    pub fn ability_summary(&self) -> AbilitySummary {
        let mods = self.ability_modifiers();
        let scores = AbilityType::CORE
            .iter()
            .map(|kind| AbilityLine {
                kind: *kind,
                score: self.raw.delta(*kind) + mods.delta(*kind),
                modifier: self.ability_modifier(*kind),
            })
            .collect();

        AbilitySummary {
            scores,
            hp: self.hp,
            max_hp: mods.delta(AbilityType::Hp),
        }
    }

    /// Armor class, attack progression and damage deltas for display
    pub fn damage_summary(&self) -> DamageSummary {
        let mods = self.damage_modifiers();
        DamageSummary {
            armor_class: self.armor_class(),
            attack_bonuses: BaseAttackBonus::progression(self.level()),
            deltas: DamageType::all()
                .iter()
                .map(|kind| (*kind, mods.delta(*kind)))
                .collect(),
            weapon: self.weapon_damage(),
        }
    }
}

impl HasLocation for Living {
    fn location(&self) -> Location {
        self.location
    }

    fn set_location(&mut self, location: Location) {
        self.location = location;
    }
}

impl HasInventory for Living {
    fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }
}

impl HasAbilityScores for Living {
    /// Own layers, every equipped item's ability layer, then the adjustment layer
    fn ability_modifiers(&self) -> ModifierSet<AbilityType> {
        let mut set = ModifierSet::new();
        set.extend(&self.base);
        for item in self.inventory.equipped_items() {
            set.add(item.ability.clone());
        }
        set.add(self.adjusted_scores());
        set
    }

    fn ability_modifier(&self, kind: AbilityType) -> i32 {
        let base = self.raw.delta(kind);
        let layered = self.ability_modifiers().delta(kind);
        stats::ability_modifier(base + layered)
    }

    fn armor_class(&self) -> i32 {
        let damage = self.damage_modifiers();
        let defense: i32 = DamageType::all()
            .iter()
            .filter(|kind| kind.is_defensive())
            .map(|kind| damage.delta(*kind))
            .sum();
        10 + self.ability_modifier(AbilityType::Dex) + defense
    }
}

impl std::fmt::Display for Living {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.player_class() {
            Some(class) => write!(f, "{} the {} (lvl {})", self.name, class.name(), self.level()),
            None => write!(f, "{}", self.name),
        }
    }
}

/// One ability row of an [`AbilitySummary`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AbilityLine {
    pub kind: AbilityType,
    pub score: i32,
    pub modifier: i32,
}

/// Ability scores, modifiers and HP of an entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AbilitySummary {
    pub scores: Vec<AbilityLine>,
    pub hp: i32,
    pub max_hp: i32,
}

/// Armor class, attacks and damage deltas of an entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DamageSummary {
    pub armor_class: i32,
    pub attack_bonuses: Vec<i32>,
    pub deltas: Vec<(DamageType, i32)>,
    pub weapon: DiceRoll,
}
