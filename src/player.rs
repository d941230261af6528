use crate::errors::{CatalogError, CatalogResult, PlayerStateError};
use schema::{ActionId, PizzaId, Status};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The most pizzas that can be brought into a battle.
pub const MAX_LINEUP: usize = 3;

const STARTER_STATE: &str = include_str!("../data/player.ron");

/// A pizza the player owns, with the stats that persist between battles.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PlayerPizza {
    pub pizza_id: PizzaId,
    pub hp: u32,
    pub max_hp: u32,
    pub xp: u32,
    pub max_xp: u32,
    pub level: u32,
    pub status: Option<Status>,
}

impl PlayerPizza {
    /// A freshly crafted level 1 pizza.
    pub fn fresh(pizza_id: PizzaId) -> Self {
        Self {
            pizza_id,
            hp: 50,
            max_hp: 50,
            xp: 0,
            max_xp: 100,
            level: 1,
            status: None,
        }
    }
}

/// One consumable in the player's bag. `instance_id` is unique per item.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct InventoryItem {
    pub action_id: ActionId,
    pub instance_id: String,
}

/// Everything about the player that outlives a single battle.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct PlayerState {
    // Roster keyed by the player's own pizza ids ("p1", "p2", ...).
    pub pizzas: BTreeMap<String, PlayerPizza>,

    // Ordered ids of the pizzas taken into battle. The first one leads.
    pub lineup: Vec<String>,

    pub inventory: Vec<InventoryItem>,
}

impl PlayerState {
    /// The roster a new game starts with.
    pub fn starter() -> CatalogResult<Self> {
        ron::from_str(STARTER_STATE).map_err(|source| CatalogError::Parse {
            what: "player state",
            source,
        })
    }

    /// Lineup ids that will actually be fielded in a battle.
    pub fn battle_lineup(&self) -> impl Iterator<Item = &String> {
        self.lineup.iter().take(MAX_LINEUP)
    }

    /// Craft a new pizza into the roster and return its id. The pizza joins
    /// the lineup if there is room.
    pub fn add_pizza(&mut self, pizza_id: impl Into<PizzaId>) -> String {
        let id = (1..)
            .map(|n| format!("p{}", n))
            .find(|candidate| !self.pizzas.contains_key(candidate))
            .unwrap_or_default();

        self.pizzas.insert(id.clone(), PlayerPizza::fresh(pizza_id.into()));
        if self.lineup.len() < MAX_LINEUP {
            self.lineup.push(id.clone());
        }
        id
    }

    /// Put `incoming_id` into the lineup slot held by `old_id`.
    pub fn swap_lineup(&mut self, old_id: &str, incoming_id: &str) -> Result<(), PlayerStateError> {
        if !self.pizzas.contains_key(incoming_id) {
            return Err(PlayerStateError::UnknownPizza(incoming_id.to_string()));
        }
        if self.lineup.iter().any(|id| id == incoming_id) {
            return Err(PlayerStateError::AlreadyInLineup(incoming_id.to_string()));
        }

        let slot = self
            .lineup
            .iter()
            .position(|id| id == old_id)
            .ok_or_else(|| PlayerStateError::NotInLineup(old_id.to_string()))?;
        self.lineup[slot] = incoming_id.to_string();
        Ok(())
    }

    /// Move a lineup member to the front so it leads the next battle.
    pub fn move_to_front(&mut self, id: &str) -> Result<(), PlayerStateError> {
        let slot = self
            .lineup
            .iter()
            .position(|member| member == id)
            .ok_or_else(|| PlayerStateError::NotInLineup(id.to_string()))?;
        let member = self.lineup.remove(slot);
        self.lineup.insert(0, member);
        Ok(())
    }
}
