//! Static lookups for actions, pizzas and enemy trainers.
//!
//! The catalog is loaded once and handed to each battle by reference. It is
//! cross-checked on load, so every action a pizza lists and every pizza an
//! enemy fields is known to resolve.

use crate::errors::{CatalogError, CatalogResult};
use schema::{ActionData, ActionId, EnemyTemplate, PizzaData, PizzaId};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

const BUILTIN_ACTIONS: &str = include_str!("../data/actions.ron");
const BUILTIN_PIZZAS: &str = include_str!("../data/pizzas.ron");
const BUILTIN_ENEMIES: &str = include_str!("../data/enemies.ron");

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    actions: HashMap<ActionId, ActionData>,
    pizzas: HashMap<PizzaId, PizzaData>,
    enemies: HashMap<String, EnemyTemplate>,
}

impl Catalog {
    /// The catalog compiled into the binary from `data/`.
    pub fn builtin() -> CatalogResult<Self> {
        Self::from_ron(BUILTIN_ACTIONS, BUILTIN_PIZZAS, BUILTIN_ENEMIES)
    }

    /// Load `actions.ron`, `pizzas.ron` and `enemies.ron` from a data directory
    pub fn load(data_path: &Path) -> CatalogResult<Self> {
        let read = |name: &str| {
            let path = data_path.join(name);
            fs::read_to_string(&path).map_err(|source| CatalogError::Io {
                path: path.display().to_string(),
                source,
            })
        };

        Self::from_ron(
            &read("actions.ron")?,
            &read("pizzas.ron")?,
            &read("enemies.ron")?,
        )
    }

    pub fn from_ron(actions: &str, pizzas: &str, enemies: &str) -> CatalogResult<Self> {
        let actions = ron::from_str(actions).map_err(|source| CatalogError::Parse {
            what: "actions",
            source,
        })?;
        let pizzas = ron::from_str(pizzas).map_err(|source| CatalogError::Parse {
            what: "pizzas",
            source,
        })?;
        let enemies = ron::from_str(enemies).map_err(|source| CatalogError::Parse {
            what: "enemies",
            source,
        })?;

        Self::new(actions, pizzas, enemies)
    }

    /// Build a catalog from already-parsed tables, rejecting dangling references.
    pub fn new(
        actions: HashMap<ActionId, ActionData>,
        pizzas: HashMap<PizzaId, PizzaData>,
        enemies: HashMap<String, EnemyTemplate>,
    ) -> CatalogResult<Self> {
        let catalog = Self {
            actions,
            pizzas,
            enemies,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> CatalogResult<()> {
        for (pizza_id, pizza) in &self.pizzas {
            if let Some(missing) = pizza.actions.iter().find(|a| !self.actions.contains_key(*a)) {
                return Err(CatalogError::DanglingAction {
                    pizza: pizza_id.clone(),
                    action: missing.clone(),
                });
            }
        }

        for (enemy_id, enemy) in &self.enemies {
            if enemy.pizzas.is_empty() {
                return Err(CatalogError::EmptyEnemy(enemy_id.clone()));
            }
            if let Some(missing) = enemy
                .pizzas
                .values()
                .find(|p| !self.pizzas.contains_key(&p.pizza_id))
            {
                return Err(CatalogError::DanglingPizza {
                    enemy: enemy_id.clone(),
                    pizza: missing.pizza_id.clone(),
                });
            }
        }

        Ok(())
    }

    pub fn action(&self, id: &str) -> CatalogResult<&ActionData> {
        self.actions
            .get(id)
            .ok_or_else(|| CatalogError::ActionNotFound(id.to_string()))
    }

    pub fn pizza(&self, id: &str) -> CatalogResult<&PizzaData> {
        self.pizzas
            .get(id)
            .ok_or_else(|| CatalogError::PizzaNotFound(id.to_string()))
    }

    pub fn enemy(&self, id: &str) -> CatalogResult<&EnemyTemplate> {
        self.enemies
            .get(id)
            .ok_or_else(|| CatalogError::EnemyNotFound(id.to_string()))
    }

    /// Enemy ids in sorted order, for menus and listings.
    pub fn enemy_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.enemies.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}
