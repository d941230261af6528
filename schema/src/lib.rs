// Pizza Legends Schema - Shared type definitions
// This crate contains the static data definitions shared between the battle
// engine and its data files: actions and their effect steps, pizza base
// stats, enemy templates, and the small enums the battle state is keyed by.

// Re-export the main types
pub use action_types::*;
pub use battle_data::*;
pub use enemy_data::*;
pub use pizza_types::*;

pub mod action_types;
pub mod battle_data;
pub mod enemy_data;
pub mod pizza_types;

/// Key into the action catalog (e.g. `"damage1"`, `"item_recoverHp"`).
pub type ActionId = String;

/// Key into the pizza catalog (e.g. `"s001"`).
pub type PizzaId = String;
