//! Turn scheduling
//!
//! Each turn every living entity rolls initiative and gets a budget of
//! [`MOVES_PER_TURN`] moves. Entities act one at a time from the top of the
//! queue. When the active entity runs out of moves the next one is
//! activated, and when the queue is empty a new turn begins.
//!
//! NPCs are driven by polling [`World::run_step`]; players act through
//! [`World::perform`] when a step reports [`Step::AwaitingPlayer`].

use std::time::Duration;

use tracing::debug;

use super::{npc, World};
use crate::entity::{EntityId, EquipmentSlot, HasAbilityScores, ItemId, Location};
use crate::events::GameEvent;
use crate::stats::AbilityType;

/// Move budget each entity gets per turn
pub const MOVES_PER_TURN: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TurnState {
    entity: EntityId,
    moves: u32,
}

/// Turn counter and initiative queue
#[derive(Debug, Clone, Default)]
pub struct TurnManager {
    turn: u32,
    /// Initiative order with the active entity last
    queue: Vec<TurnState>,
    /// Bumped on every restart so a command that triggered a reset or a
    /// level transition does not charge moves to the new turn state
    epoch: u64,
}

impl TurnManager {
    pub fn turn_number(&self) -> u32 {
        self.turn
    }

    pub fn active(&self) -> Option<EntityId> {
        self.queue.last().map(|s| s.entity)
    }

    pub fn moves(&self) -> u32 {
        self.queue.last().map_or(0, |s| s.moves)
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Entities still waiting to act this turn, next first
    pub fn waiting(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.queue.iter().rev().skip(1).map(|s| s.entity)
    }

    pub(crate) fn restart(&mut self) {
        self.turn = 0;
        self.queue.clear();
        self.epoch += 1;
    }

    fn spend(&mut self, cost: Cost) {
        if let Some(state) = self.queue.last_mut() {
            state.moves = match cost {
                Cost::Moves(n) => state.moves.saturating_sub(n),
                Cost::All => 0,
            };
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cost {
    Moves(u32),
    All,
}

/// A turn-gated command issued by the active entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Step by an offset. 1 move.
    Move(Location),
    /// Full attack sequence. Ends the turn.
    Attack(EntityId),
    /// Equip into the first fitting slot. Ends the turn.
    Equip(ItemId),
    /// Equip into a given slot. Ends the turn.
    EquipSlot(ItemId, EquipmentSlot),
    /// Ends the turn.
    Unequip(EquipmentSlot),
    /// Open or close an adjacent door. 1 move.
    ToggleDoor(Location),
    /// Pick up an adjacent loose item. 1 move.
    PickUp(ItemId),
    /// Take an item from an adjacent entity's inventory. 1 move.
    TakeItem(EntityId, ItemId),
    /// Take gold from an adjacent entity, 0 for all of it. 1 move.
    TakeGold(EntityId, i64),
    /// Use a carried item. 1 move, or the whole turn for wearables.
    Use(ItemId),
    /// End the turn.
    Wait,
}

/// What one call to [`World::run_step`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Not started, or nobody is alive to act
    Idle,
    /// The driver should wait this long before the next step
    Pause(Duration),
    /// The exhausted active entity was replaced (possibly by a new turn)
    Advanced,
    /// An NPC made one decision
    Thought(EntityId),
    /// A player has moves left and must act through [`World::perform`]
    AwaitingPlayer(EntityId),
}

impl World {
    /// Begin a new turn: roll initiative for every living entity and
    /// activate the winner.
    ///
    /// Highest roll acts first. Ties go to the higher DEX modifier, then to
    /// roster order (players, then NPCs).
    pub fn next_turn(&mut self) {
        self.turns.turn += 1;
        let turn = self.turns.turn;
        debug!("turn {} begins", turn);
        self.emit(GameEvent::TurnStarted { turn });

        let roster: Vec<(EntityId, i32)> = self
            .living_entities()
            .filter(|l| l.is_alive())
            .map(|l| (l.id, l.ability_modifier(AbilityType::Dex)))
            .collect();

        let mut rolls = Vec::with_capacity(roster.len());
        for (position, (id, dex)) in roster.into_iter().enumerate() {
            let roll = self.initiative_roll(id);
            rolls.push((roll, dex, position, id));
        }
        rolls.sort_by(|a, b| b.0.cmp(&a.0).then(b.1.cmp(&a.1)).then(a.2.cmp(&b.2)));

        self.turns.queue = rolls
            .into_iter()
            .rev()
            .map(|(_, _, _, entity)| TurnState {
                entity,
                moves: MOVES_PER_TURN,
            })
            .collect();
        self.activate();
    }

    /// Skip dead entities at the top of the queue and announce the next one
    fn activate(&mut self) {
        while let Some(top) = self.turns.active() {
            if self.is_alive(top) {
                break;
            }
            self.turns.queue.pop();
        }
        if let Some(entity) = self.turns.active().and_then(|id| self.entity_ref(id)) {
            debug!("{} activated", entity.name);
            self.emit(GameEvent::EntityActivated { entity });
        }
    }

    /// Drop the active entity and activate the next, starting a new turn
    /// when nobody is left
    fn advance(&mut self) {
        self.turns.queue.pop();
        self.activate();
        if self.turns.active().is_none() {
            self.next_turn();
        }
    }

    /// Issue a turn-gated command for `actor`.
    ///
    /// Rejected when `actor` is not the active entity, has no moves left,
    /// or the underlying command fails. A rejected action costs nothing.
    pub fn perform(&mut self, actor: EntityId, action: Action) -> bool {
        if !self.started || self.turns.active() != Some(actor) || self.turns.moves() == 0 {
            debug!("{:?} rejected: not the active entity", action);
            return false;
        }

        let epoch = self.turns.epoch();
        let (done, cost) = match action {
            Action::Move(delta) => (self.move_entity(actor, delta), Cost::Moves(1)),
            Action::Attack(target) => (self.attack_entity(actor, target), Cost::All),
            Action::Equip(item) => (self.equip_item(actor, item).is_some(), Cost::All),
            Action::EquipSlot(item, slot) => (self.equip_item_in(actor, item, slot), Cost::All),
            Action::Unequip(slot) => (self.unequip_slot(actor, slot), Cost::All),
            Action::ToggleDoor(at) => (self.toggle_door(actor, at), Cost::Moves(1)),
            Action::PickUp(item) => (self.pick_up(actor, item), Cost::Moves(1)),
            Action::TakeItem(owner, item) => {
                (self.take_inventory_item(actor, owner, item), Cost::Moves(1))
            }
            Action::TakeGold(owner, amount) => {
                (self.take_inventory_gold(actor, owner, amount), Cost::Moves(1))
            }
            Action::Use(item) => {
                let wearable = self.carried_item_is_wearable(actor, item);
                let cost = if wearable { Cost::All } else { Cost::Moves(1) };
                (self.use_item(actor, item), cost)
            }
            Action::Wait => (true, Cost::All),
        };

        if done && self.turns.epoch() == epoch {
            self.turns.spend(cost);
        }
        done
    }

    /// Advance the simulation by one step.
    ///
    /// Reports a pending pause first, then replaces an exhausted active
    /// entity, lets an active NPC think once, or hands control to a player.
    pub fn run_step(&mut self) -> Step {
        if let Some(pause) = self.pending_pause.take() {
            return Step::Pause(pause);
        }
        if !self.started {
            return Step::Idle;
        }

        let Some(active) = self.turns.active() else {
            self.next_turn();
            return match self.turns.active() {
                Some(_) => Step::Advanced,
                None => Step::Idle,
            };
        };

        if self.turns.moves() == 0 || !self.is_alive(active) {
            self.advance();
            return Step::Advanced;
        }

        let is_npc = self.living(active).is_some_and(|l| l.is_npc());
        if !is_npc {
            return Step::AwaitingPlayer(active);
        }

        let epoch = self.turns.epoch();
        let moves = self.turns.moves();
        npc::think(self, active);
        let unchanged = self.turns.epoch() == epoch
            && self.turns.active() == Some(active)
            && self.turns.moves() == moves;
        if unchanged {
            // Made no decision: end its turn
            self.turns.spend(Cost::All);
        }
        Step::Thought(active)
    }
}
