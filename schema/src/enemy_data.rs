use crate::PizzaId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One pizza in an enemy's team. `hp` defaults to `max_hp` when omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyPizza {
    pub pizza_id: PizzaId,
    #[serde(default)]
    pub hp: Option<u32>,
    pub max_hp: u32,
    pub level: u32,
}

/// A trainer the player can battle. Pizzas are keyed by a short sub-id; key
/// order decides which one leads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyTemplate {
    pub name: String,
    pub src: String,
    pub pizzas: BTreeMap<String, EnemyPizza>,
}
