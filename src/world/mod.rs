//! The world orchestrator
//!
//! The world owns the current level, the party, the NPCs and loose items of
//! the level, the dice, the observer bus and the turn state. Every command
//! validates its preconditions first: a rejected command returns `false` (or
//! `None`), mutates nothing and emits nothing.

mod combat;
mod commands;
mod effects;
mod npc;
mod turns;

pub use effects::TimedEffect;
pub use turns::{Action, Step, TurnManager, MOVES_PER_TURN};

use std::time::Duration;

use tracing::{debug, info};

use crate::combat::{DamageType, Dice, DiceRoll};
use crate::entity::{
    AbilitySummary, DamageSummary, EntityId, HasAbilityScores, HasInventory, HasLocation, Item,
    ItemId, Living, Location,
};
use crate::events::{EntityRef, EventBus, Flow, GameEvent, Observer, SubscriptionId};
use crate::level::{InitialEntity, Level, LevelGenerator};
use crate::stats::AbilityType;

/// Anything that can stand on a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occupant<'a> {
    Living(&'a Living),
    Item(&'a Item),
}

impl Occupant<'_> {
    /// Whether this occupant keeps others off its cell. Dead bodies do not.
    pub fn blocks(&self) -> bool {
        match self {
            Occupant::Living(living) => living.is_alive(),
            Occupant::Item(_) => true,
        }
    }
}

/// Simulation state for one party on one level at a time
#[derive(Debug)]
pub struct World {
    level: Level,
    depth: u32,
    players: Vec<Living>,
    npcs: Vec<Living>,
    items: Vec<Item>,
    dice: Dice,
    bus: EventBus,
    turns: TurnManager,
    started: bool,
    generator: LevelGenerator,
    reset_pause: Duration,
    pending_pause: Option<Duration>,
}

impl World {
    /// A stopped world on `level`, drawing all randomness from `dice`
    pub fn new(level: Level, dice: Dice) -> Self {
        Self {
            level,
            depth: 1,
            players: Vec::new(),
            npcs: Vec::new(),
            items: Vec::new(),
            dice,
            bus: EventBus::new(),
            turns: TurnManager::default(),
            started: false,
            generator: LevelGenerator::default(),
            reset_pause: Duration::ZERO,
            pending_pause: None,
        }
    }

    /// Settings used when descending generates a new level
    pub fn with_generator(mut self, generator: LevelGenerator) -> Self {
        self.generator = generator;
        self
    }

    /// Pause requested from the driver after a level reset
    pub fn with_reset_pause(mut self, pause: Duration) -> Self {
        self.reset_pause = pause;
        self
    }

    /// Add a party member. Takes effect at the next start.
    pub fn add_player(&mut self, player: Living) -> EntityId {
        let id = player.id;
        self.players.push(player);
        id
    }

    // ---- queries ----

    pub fn level(&self) -> &Level {
        &self.level
    }

    /// Dungeon depth, starting at 1
    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn players(&self) -> &[Living] {
        &self.players
    }

    pub fn npcs(&self) -> &[Living] {
        &self.npcs
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn dice(&self) -> &Dice {
        &self.dice
    }

    /// Direct access to the dice, without emitting roll events
    pub fn dice_mut(&mut self) -> &mut Dice {
        &mut self.dice
    }

    /// Players first, then NPCs, in list order
    pub fn living_entities(&self) -> impl Iterator<Item = &Living> {
        self.players.iter().chain(self.npcs.iter())
    }

    pub fn living(&self, id: EntityId) -> Option<&Living> {
        self.living_entities().find(|l| l.id == id)
    }

    pub(crate) fn living_mut(&mut self, id: EntityId) -> Option<&mut Living> {
        self.players
            .iter_mut()
            .chain(self.npcs.iter_mut())
            .find(|l| l.id == id)
    }

    pub fn is_alive(&self, id: EntityId) -> bool {
        self.living(id).is_some_and(|l| l.is_alive())
    }

    /// Everything standing on a cell: players, NPCs, then loose items
    pub fn entities_at(&self, loc: Location) -> Vec<Occupant<'_>> {
        let living = self
            .living_entities()
            .filter(|l| l.location() == loc)
            .map(Occupant::Living);
        let items = self
            .items
            .iter()
            .filter(|i| i.location() == loc)
            .map(Occupant::Item);
        living.chain(items).collect()
    }

    pub fn turn_number(&self) -> u32 {
        self.turns.turn_number()
    }

    /// The entity whose turn it is
    pub fn active_entity(&self) -> Option<EntityId> {
        self.turns.active()
    }

    /// Moves left for the active entity
    pub fn moves_remaining(&self) -> u32 {
        self.turns.moves()
    }

    pub fn ability_summary(&self, id: EntityId) -> Option<AbilitySummary> {
        self.living(id).map(|l| l.ability_summary())
    }

    pub fn damage_summary(&self, id: EntityId) -> Option<DamageSummary> {
        self.living(id).map(|l| l.damage_summary())
    }

    pub(crate) fn entity_ref(&self, id: EntityId) -> Option<EntityRef> {
        self.living(id).map(EntityRef::from)
    }

    // ---- observers ----

    /// Register an observer for every subsequent event
    pub fn subscribe(&mut self, observer: impl Observer + 'static) -> SubscriptionId {
        self.bus.subscribe(Box::new(observer))
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    /// Deliver an event to every observer in registration order.
    ///
    /// Events emitted while a delivery is running are queued and delivered
    /// before the outermost call returns.
    pub(crate) fn emit(&mut self, event: GameEvent) {
        if !self.bus.enqueue(event) {
            return;
        }
        while let Some(event) = self.bus.next_event() {
            debug!("{}", event);
            self.record(&event);

            let mut lent = self.bus.lend();
            let mut finished = Vec::new();
            for (id, observer) in lent.iter_mut() {
                if self.bus.is_cancelled(*id) {
                    continue;
                }
                if observer.on_event(self, &event) == Flow::Unsubscribe {
                    finished.push(*id);
                }
            }
            self.bus.restore(lent, &finished);
        }
    }

    /// World-side bookkeeping done before observers see an event
    fn record(&mut self, event: &GameEvent) {
        if let GameEvent::AttackCheck { source, target, .. } = event {
            if let Some(npc) = self.npcs.iter_mut().find(|n| n.id == target.id) {
                npc.remember_attacker(source.id);
            }
        }
    }

    // ---- dice ----

    /// Roll without a modifier and announce it
    pub fn roll(&mut self, count: u32, sides: u32, source: Option<EntityId>) -> i32 {
        self.roll_labeled(count, sides, 0, None, source)
    }

    /// Roll with a named modifier and announce it
    pub fn roll_labeled(
        &mut self,
        count: u32,
        sides: u32,
        modifier: i32,
        label: Option<&str>,
        source: Option<EntityId>,
    ) -> i32 {
        let value = self.dice.roll(count, sides, modifier);
        let source = source.and_then(|id| self.entity_ref(id));
        self.emit(GameEvent::DiceRolled {
            source,
            label: label.map(str::to_string),
            count,
            sides,
            modifier,
            value,
        });
        value
    }

    /// Roll with the source's ability modifier added
    pub fn ability_roll(&mut self, count: u32, sides: u32, source: EntityId, kind: AbilityType) -> i32 {
        let modifier = self
            .living(source)
            .map_or(0, |l| l.ability_modifier(kind));
        self.roll_labeled(count, sides, modifier, Some(kind.name()), Some(source))
    }

    /// Roll damage dice with the source's damage delta of `kind` added
    pub fn damage_roll(&mut self, roll: DiceRoll, source: EntityId, kind: DamageType) -> i32 {
        let delta = self
            .living(source)
            .map_or(0, |l| l.damage_modifiers().delta(kind));
        let label = kind.to_string();
        self.roll_labeled(
            roll.count,
            roll.sides,
            roll.modifier + delta,
            Some(&label),
            Some(source),
        )
    }

    /// 1d20 plus DEX modifier
    pub fn initiative_roll(&mut self, source: EntityId) -> i32 {
        let modifier = self
            .living(source)
            .map_or(0, |l| l.ability_modifier(AbilityType::Dex));
        self.roll_labeled(1, 20, modifier, Some("Initiative"), Some(source))
    }

    // ---- lifecycle ----

    /// Populate the level and begin turn 1 of a fresh turn state.
    /// No effect when already started.
    pub fn start(&mut self) {
        if self.started {
            return;
        }

        self.npcs.clear();
        self.items.clear();
        let carried: Vec<ItemId> = self
            .players
            .iter()
            .flat_map(|p| p.inventory().items().iter().chain(p.inventory().equipped_items()))
            .map(|i| i.id)
            .collect();
        for entity in self.level.initial_entities().to_vec() {
            match entity {
                InitialEntity::Npc(npc) => self.npcs.push(npc),
                InitialEntity::Item(item) if carried.contains(&item.id) => {
                    debug!("{} stays with the party", item.name);
                }
                InitialEntity::Item(item) => self.items.push(item),
            }
        }
        for npc in &mut self.npcs {
            // Loot the party took from a body is not handed back
            for id in &carried {
                npc.inventory_mut().take(*id);
            }
            npc.spawn();
        }
        for player in &mut self.players {
            player.spawn();
            // Off the board until placed
            player.location = Location::new(-1, -1);
        }

        let ids: Vec<EntityId> = self.players.iter().map(|p| p.id).collect();
        for id in ids {
            self.spawn_player(id);
        }

        self.started = true;
        self.turns.restart();
        info!(
            "level {} started with {} players, {} npcs, {} items",
            self.depth,
            self.players.len(),
            self.npcs.len(),
            self.items.len()
        );
        self.next_turn();
    }

    pub fn stop(&mut self) {
        if self.started {
            info!("level {} stopped", self.depth);
        }
        self.started = false;
    }

    pub fn restart(&mut self) {
        self.stop();
        self.start();
    }

    fn spawn_player(&mut self, id: EntityId) {
        let Some(at) = self.spawn_point() else {
            return;
        };
        self.teleport(id, at);
        if let Some(entity) = self.entity_ref(id) {
            self.emit(GameEvent::PlayerSpawned { entity, at });
        }
    }

    /// The level spawn, or the nearest free cell around it when taken
    fn spawn_point(&self) -> Option<Location> {
        let spawn = self.level.spawn();
        let reach = self.level.width().max(self.level.height()) as i32;
        (0..=reach).find_map(|radius| {
            self.level
                .locations()
                .filter(|l| l.distance_to(spawn) == radius)
                .find(|l| self.level.is_walkable(*l) && !self.is_blocked(*l))
        })
    }

    /// Replace the level, level up the surviving party and restart
    pub fn next_level(&mut self, level: Level) {
        self.level = level;
        self.depth += 1;

        let ids: Vec<EntityId> = self
            .players
            .iter()
            .filter(|p| p.is_alive())
            .map(|p| p.id)
            .collect();
        for id in ids {
            self.level_up(id);
        }

        info!("descending to level {}", self.depth);
        self.emit(GameEvent::NextLevel { depth: self.depth });
        self.restart();
    }

    /// Generate the next level with the configured settings and descend
    pub fn descend(&mut self) {
        let level = self.generator.generate(&mut self.dice, self.depth + 1);
        self.next_level(level);
    }

    /// Announce a party wipe and restart the same level
    pub fn reset_level(&mut self) {
        info!("resetting level {}", self.depth);
        self.emit(GameEvent::LevelReset { depth: self.depth });
        if !self.reset_pause.is_zero() {
            self.pending_pause = Some(self.reset_pause);
        }
        self.restart();
    }

    /// One `1d10 + CON` HP layer and one more level
    pub fn level_up(&mut self, id: EntityId) {
        let hp = self.ability_roll(1, 10, id, AbilityType::Con);
        if let Some(player) = self.living_mut(id) {
            player.base_modifiers_mut().add_delta(AbilityType::Hp, hp);
            let next = player.level() + 1;
            player.set_level(next);
        }
    }
}
