//! Attack sequence and the damage pipeline

use tracing::{debug, info};

use super::World;
use crate::combat::{AttackCheck, BaseAttackBonus, DamageType};
use crate::entity::{EntityId, HasAbilityScores};
use crate::events::GameEvent;

impl World {
    /// Resolve a full attack sequence of `source` against an adjacent
    /// living `target`.
    ///
    /// Every sub-roll is announced. A hit rolls weapon damage and applies it.
    /// The sequence stops early once the target is dead or the level was
    /// reset by a kill.
    pub fn attack_entity(&mut self, source: EntityId, target: EntityId) -> bool {
        if source == target {
            return false;
        }
        let (Some(attacker), Some(defender)) = (self.living(source), self.living(target)) else {
            return false;
        };
        if !attacker.is_alive() || !defender.is_alive() {
            return false;
        }
        if !attacker.location.is_adjacent(defender.location) {
            debug!("{} cannot reach {}", attacker.name, defender.name);
            return false;
        }

        let level = attacker.level();
        let weapon = attacker.weapon_damage();
        let epoch = self.turns.epoch();

        for attack_number in 1..=BaseAttackBonus::number_of_attacks(level) {
            if !self.is_alive(target) || !self.is_alive(source) || self.turns.epoch() != epoch {
                break;
            }
            let roll = self.dice.roll(1, 20, 0);
            let Some(armor_class) = self.living(target).map(|l| l.armor_class()) else {
                break;
            };
            let check = AttackCheck {
                attack_number,
                roll,
                bonus: BaseAttackBonus::bonus(level, attack_number),
                armor_class,
            };
            let (Some(source_ref), Some(target_ref)) =
                (self.entity_ref(source), self.entity_ref(target))
            else {
                break;
            };
            self.emit(GameEvent::AttackCheck {
                source: source_ref,
                target: target_ref,
                check,
            });

            if check.hit() {
                let amount = self.damage_roll(weapon, source, DamageType::Melee);
                self.damage(source, target, amount.max(0));
            }
        }
        true
    }

    /// Apply `amount` damage to `target`.
    ///
    /// Dead targets are left alone. A kill is announced, and when it leaves
    /// no player standing the level is reset.
    pub fn damage(&mut self, source: EntityId, target: EntityId, amount: i32) {
        let Some(living) = self.living_mut(target).filter(|l| l.is_alive()) else {
            return;
        };
        let hp = living.hp();
        living.set_hp(hp - amount);
        let killed = !living.is_alive();
        let is_player = living.is_player();

        let (Some(source_ref), Some(target_ref)) =
            (self.entity_ref(source), self.entity_ref(target))
        else {
            return;
        };
        self.emit(GameEvent::Damaged {
            source: source_ref.clone(),
            target: target_ref.clone(),
            amount,
        });

        if !killed {
            return;
        }
        info!("{} killed {}", source_ref.name, target_ref.name);
        self.emit(GameEvent::Killed {
            source: source_ref,
            target: target_ref,
        });

        if is_player && self.players.iter().all(|p| !p.is_alive()) {
            self.reset_level();
        }
    }
}
