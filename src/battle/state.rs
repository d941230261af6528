use crate::battle::combatant::{Combatant, CombatantConfig, CombatantId};
use crate::battle::events::EventBus;
use crate::battle::team::{BattleTeam, TeamView};
use crate::catalog::Catalog;
use crate::errors::{BattleError, BattleResult};
use crate::player::PlayerState;
use schema::{ActionId, EnemyTemplate, PizzaData, Status, Team};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// How a battle ended, from the player's point of view.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleOutcome {
    Won,
    Lost,
}

impl BattleOutcome {
    pub fn from_winner(winner: Team) -> Self {
        match winner {
            Team::Player => BattleOutcome::Won,
            Team::Enemy => BattleOutcome::Lost,
        }
    }
}

impl fmt::Display for BattleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BattleOutcome::Won => write!(f, "WON"),
            BattleOutcome::Lost => write!(f, "LOST"),
        }
    }
}

/// A consumable available during this battle.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BattleItem {
    pub action_id: ActionId,
    pub instance_id: String,
    pub team: Team,
}

/// What the presentation needs to draw one combatant's HUD.
#[derive(Debug, Clone, PartialEq)]
pub struct CombatantView {
    pub id: CombatantId,
    pub name: String,
    pub team: Team,
    pub level: u32,
    pub hp_percent: f32,
    pub xp_percent: f32,
    pub status: Option<Status>,
    pub active: bool,
    pub fainted: bool,
}

/// All state owned by a single battle.
#[derive(Debug, Clone)]
pub struct BattleSession {
    // Insertion ordered: player lineup first, then the enemy's pizzas.
    combatants: Vec<Combatant>,
    active: HashMap<Team, CombatantId>,

    pub items: Vec<BattleItem>,
    used_instance_ids: HashSet<String>,

    player_team: BattleTeam,
    enemy_team: BattleTeam,

    log: EventBus,
}

impl BattleSession {
    /// A session with no combatants yet.
    pub fn empty(player_name: impl Into<String>, enemy_name: impl Into<String>) -> Self {
        Self {
            combatants: Vec::new(),
            active: HashMap::new(),
            items: Vec::new(),
            used_instance_ids: HashSet::new(),
            player_team: BattleTeam::new(Team::Player, player_name),
            enemy_team: BattleTeam::new(Team::Enemy, enemy_name),
            log: EventBus::new(),
        }
    }

    /// Build the session for a battle against `enemy`.
    ///
    /// Player combatants come from the fielded lineup and keep their roster
    /// ids; enemy combatants get `e_<sub id>`. The bag is snapshotted so
    /// items used here only leave the real inventory on a win.
    pub fn new(catalog: &Catalog, player: &PlayerState, enemy: &EnemyTemplate) -> BattleResult<Self> {
        let mut session = Self::empty("Player", enemy.name.clone());

        for id in player.battle_lineup() {
            let pizza = player
                .pizzas
                .get(id)
                .ok_or_else(|| BattleError::UnknownCombatant(id.clone()))?;
            let base = catalog.pizza(&pizza.pizza_id)?;
            session.add_combatant(id.clone(), Team::Player, base, CombatantConfig::from(pizza));
        }

        for (key, pizza) in &enemy.pizzas {
            let base = catalog.pizza(&pizza.pizza_id)?;
            session.add_combatant(format!("e_{}", key), Team::Enemy, base, CombatantConfig::from(pizza));
        }

        if session.active.get(&Team::Player).is_none() {
            return Err(BattleError::EmptyLineup);
        }
        if session.active.get(&Team::Enemy).is_none() {
            return Err(BattleError::EmptyEnemyTeam(enemy.name.clone()));
        }

        for item in &player.inventory {
            catalog.action(&item.action_id)?;
            session.items.push(BattleItem {
                action_id: item.action_id.clone(),
                instance_id: item.instance_id.clone(),
                team: Team::Player,
            });
        }

        Ok(session)
    }

    /// Insert a combatant. The first one added to a team becomes its active
    /// combatant.
    pub fn add_combatant(&mut self, id: CombatantId, team: Team, base: &PizzaData, config: CombatantConfig) {
        self.active.entry(team).or_insert_with(|| id.clone());
        self.combatants.push(Combatant::new(id, team, base, config));
    }

    pub fn combatants(&self) -> impl Iterator<Item = &Combatant> {
        self.combatants.iter()
    }

    pub fn combatant(&self, id: &str) -> BattleResult<&Combatant> {
        self.combatants
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| BattleError::UnknownCombatant(id.to_string()))
    }

    pub fn combatant_mut(&mut self, id: &str) -> BattleResult<&mut Combatant> {
        self.combatants
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| BattleError::UnknownCombatant(id.to_string()))
    }

    pub fn active_id(&self, team: Team) -> Option<&CombatantId> {
        self.active.get(&team)
    }

    pub fn active_combatant(&self, team: Team) -> BattleResult<&Combatant> {
        let id = self.active_id(team).ok_or(BattleError::NoActiveCombatant(team))?;
        self.combatant(id)
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.active.values().any(|active| active == id)
    }

    /// Point `team`'s active slot at `id`, or empty it.
    pub fn set_active(&mut self, team: Team, id: Option<CombatantId>) {
        match id {
            Some(id) => {
                self.active.insert(team, id);
            }
            None => {
                self.active.remove(&team);
            }
        }
    }

    /// Team members still able to fight, in insertion order.
    pub fn replacement_candidates(&self, team: Team) -> Vec<&Combatant> {
        self.combatants
            .iter()
            .filter(|c| c.team == team && !c.is_fainted())
            .collect()
    }

    /// Teammates the caster could voluntarily swap out for.
    pub fn swap_candidates(&self, caster: &Combatant) -> Vec<&Combatant> {
        self.combatants
            .iter()
            .filter(|c| c.team == caster.team && c.id != caster.id && !c.is_fainted())
            .collect()
    }

    pub fn items_for(&self, team: Team) -> impl Iterator<Item = &BattleItem> {
        self.items.iter().filter(move |item| item.team == team)
    }

    /// Use up an item instance: it leaves the live list and is remembered so
    /// it can be pruned from the inventory if the player wins.
    pub fn consume_item(&mut self, instance_id: &str) -> Option<BattleItem> {
        let index = self.items.iter().position(|item| item.instance_id == instance_id)?;
        self.used_instance_ids.insert(instance_id.to_string());
        Some(self.items.remove(index))
    }

    pub fn used_instance_ids(&self) -> &HashSet<String> {
        &self.used_instance_ids
    }

    /// The winning team, if exactly one side still has a combatant standing.
    /// When nobody is standing the enemy takes it.
    pub fn winning_team(&self) -> Option<Team> {
        let alive = |team: Team| self.combatants.iter().any(|c| c.team == team && !c.is_fainted());

        if !alive(Team::Player) {
            Some(Team::Enemy)
        } else if !alive(Team::Enemy) {
            Some(Team::Player)
        } else {
            None
        }
    }

    pub fn combatant_view(&self, id: &str) -> BattleResult<CombatantView> {
        let c = self.combatant(id)?;
        Ok(CombatantView {
            id: c.id.clone(),
            name: c.name.clone(),
            team: c.team,
            level: c.level,
            hp_percent: c.hp_percent(),
            xp_percent: c.xp_percent(),
            status: c.status,
            active: self.is_active(&c.id),
            fainted: c.is_fainted(),
        })
    }

    pub fn team(&self, team: Team) -> &BattleTeam {
        match team {
            Team::Player => &self.player_team,
            Team::Enemy => &self.enemy_team,
        }
    }

    pub fn team_view(&self, team: Team) -> TeamView {
        self.team(team).view(self)
    }

    pub fn log(&self) -> &EventBus {
        &self.log
    }

    pub fn log_mut(&mut self) -> &mut EventBus {
        &mut self.log
    }

    /// Settle the battle against the persistent player state.
    ///
    /// On a player win every player combatant's hp, xp, max xp and level are
    /// written back to the roster entry with the same id, and used items are
    /// removed from the inventory. A loss leaves the player state untouched.
    pub fn finish(&self, winner: Team, player: &mut PlayerState) -> BattleOutcome {
        if winner == Team::Player {
            for combatant in self.combatants.iter().filter(|c| c.team == Team::Player) {
                if let Some(pizza) = player.pizzas.get_mut(&combatant.id) {
                    pizza.hp = u32::try_from(combatant.hp.max(0)).unwrap_or(0);
                    pizza.xp = combatant.xp;
                    pizza.max_xp = combatant.max_xp;
                    pizza.level = combatant.level;
                }
            }

            player
                .inventory
                .retain(|item| !self.used_instance_ids.contains(&item.instance_id));
        }

        BattleOutcome::from_winner(winner)
    }
}
