//! Timed ability layers

use tracing::debug;

use crate::entity::EntityId;
use crate::events::{Flow, GameEvent, Observer};
use crate::stats::LayerId;

use super::World;

/// A modifier layer on an entity that is removed after a number of turn
/// starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimedEffect {
    pub entity: EntityId,
    pub layer: LayerId,
    pub remaining_turns: u32,
}

impl TimedEffect {
    pub fn new(entity: EntityId, layer: LayerId, turns: u32) -> Self {
        Self {
            entity,
            layer,
            remaining_turns: turns,
        }
    }

    pub fn tick(&mut self) {
        self.remaining_turns = self.remaining_turns.saturating_sub(1);
    }

    pub fn is_expired(&self) -> bool {
        self.remaining_turns == 0
    }
}

impl Observer for TimedEffect {
    fn on_event(&mut self, world: &mut World, event: &GameEvent) -> Flow {
        if !matches!(event, GameEvent::TurnStarted { .. }) {
            return Flow::Keep;
        }
        self.tick();
        if !self.is_expired() {
            return Flow::Keep;
        }

        if let Some(living) = world.living_mut(self.entity) {
            living.base_modifiers_mut().remove(self.layer);
            // Max HP may have dropped with the layer
            let hp = living.hp();
            living.set_hp(hp);
            debug!("effect on {} wore off", living.name);
        }
        Flow::Unsubscribe
    }
}
