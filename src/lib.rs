//! Pizza Legends Battle Engine
//!
//! Turn-based battles between teams of pizzas. Actions are declarative
//! lists of effect steps loaded from RON data, every random decision goes
//! through a seedable RNG, and all drawing and input is delegated to an
//! async [`Presentation`](battle::presentation::Presentation).

// --- MODULE DECLARATIONS ---
pub mod battle;
pub mod catalog;
pub mod config;
pub mod errors;
pub mod player;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
pub use schema::{
    ActionData, ActionId, AnimationKind, EffectStep, EnemyPizza, EnemyTemplate, PizzaData, PizzaId, PizzaType,
    Status, StatusChange, StatusKind, TargetType, Team,
};

// --- From this crate's modules (`src/`) ---
pub use battle::runner::{run_battle, Battle};
pub use battle::state::{BattleOutcome, BattleSession};
pub use catalog::Catalog;
pub use config::BattleConfig;
pub use errors::{
    BattleError, BattleResult, CatalogError, CatalogResult, ConfigError, ConfigResult, PlayerStateError,
};
pub use player::{InventoryItem, PlayerPizza, PlayerState};
