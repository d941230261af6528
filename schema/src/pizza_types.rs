use crate::ActionId;
use serde::{Deserialize, Serialize};
use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum PizzaType {
    Normal,
    Spicy,
    Veggie,
    Fungi,
    Chill,
}

/// Base data for a kind of pizza. Combatants are built from this plus the
/// per-instance stats kept in the roster or an enemy template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PizzaData {
    pub name: String,
    pub description: String,
    pub pizza_type: PizzaType,
    pub src: String,
    pub icon: String,
    pub actions: Vec<ActionId>,
}
