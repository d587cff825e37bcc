//! Scenario tests for the simulation engine
//!
//! - Movement: passability, blocking, doors and stairs
//! - Combat: attack sequences, kills and party wipes
//! - Inventory: equipment, items, potions and transfers
//! - Turns: initiative, move budgets and replay determinism
//! - Lifecycle: start, restart and level transitions

pub mod inventory;
pub mod lifecycle;
pub mod movement;
pub mod turns;
