use crate::battle::combatant::{Combatant, CombatantConfig};
use crate::battle::state::BattleSession;
use crate::catalog::Catalog;
use crate::player::PlayerState;
use schema::{PizzaData, PizzaType, Status, Team};

/// The built-in catalog. Panics if the embedded data is broken.
pub fn test_catalog() -> Catalog {
    match Catalog::builtin() {
        Ok(catalog) => catalog,
        Err(err) => panic!("Failed to load the built-in catalog: {}", err),
    }
}

/// The starter player state.
pub fn test_player() -> PlayerState {
    match PlayerState::starter() {
        Ok(player) => player,
        Err(err) => panic!("Failed to load the starter player state: {}", err),
    }
}

/// A session between the starter roster and `enemy_id`, along with the
/// player state it was built from.
pub fn starter_session(enemy_id: &str) -> (BattleSession, PlayerState) {
    let catalog = test_catalog();
    let player = test_player();
    let enemy = match catalog.enemy(enemy_id) {
        Ok(enemy) => enemy,
        Err(err) => panic!("Unknown test enemy {}: {}", enemy_id, err),
    };
    match BattleSession::new(&catalog, &player, enemy) {
        Ok(session) => (session, player),
        Err(err) => panic!("Failed to build session against {}: {}", enemy_id, err),
    }
}

/// A builder for creating test combatants with common defaults.
///
/// Every combatant is a Slice Samurai at full health (50/50), level 1,
/// 0/100 xp and no status unless told otherwise.
///
/// # Example
/// ```ignore
/// let pizza = TestCombatantBuilder::new("p1", Team::Player)
///     .with_hp(30)
///     .with_status(Status::new(StatusKind::Saucy, 3))
///     .build();
/// ```
pub struct TestCombatantBuilder {
    id: String,
    team: Team,
    hp: Option<i32>,
    max_hp: u32,
    level: u32,
    xp: u32,
    max_xp: u32,
    status: Option<Status>,
    actions: Option<Vec<String>>,
}

impl TestCombatantBuilder {
    pub fn new(id: &str, team: Team) -> Self {
        Self {
            id: id.to_string(),
            team,
            hp: None,
            max_hp: 50,
            level: 1,
            xp: 0,
            max_xp: 100,
            status: None,
            actions: None,
        }
    }

    /// Base data shared by every built combatant.
    pub fn base() -> PizzaData {
        PizzaData {
            name: "Slice Samurai".to_string(),
            description: "A classic slice for a classic hero.".to_string(),
            pizza_type: PizzaType::Spicy,
            src: "images/characters/pizzas/s001.png".to_string(),
            icon: "images/icons/spicy.png".to_string(),
            actions: vec![
                "saucyStatus".to_string(),
                "clumsyStatus".to_string(),
                "damage1".to_string(),
            ],
        }
    }

    /// Sets the current HP. If not set, HP will be max.
    pub fn with_hp(mut self, hp: i32) -> Self {
        self.hp = Some(hp);
        self
    }

    pub fn with_max_hp(mut self, max_hp: u32) -> Self {
        self.max_hp = max_hp;
        self
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    pub fn with_xp(mut self, xp: u32, max_xp: u32) -> Self {
        self.xp = xp;
        self.max_xp = max_xp;
        self
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_actions(mut self, actions: &[&str]) -> Self {
        self.actions = Some(actions.iter().map(|a| a.to_string()).collect());
        self
    }

    fn config(&self) -> CombatantConfig {
        CombatantConfig {
            hp: self.max_hp,
            max_hp: self.max_hp,
            xp: self.xp,
            max_xp: self.max_xp,
            level: self.level,
            status: self.status,
        }
    }

    fn pizza(&self) -> PizzaData {
        let mut base = Self::base();
        if let Some(actions) = &self.actions {
            base.actions = actions.clone();
        }
        base
    }

    pub fn build(self) -> Combatant {
        let mut combatant = Combatant::new(self.id.clone(), self.team, &self.pizza(), self.config());
        if let Some(hp) = self.hp {
            combatant.hp = hp;
        }
        combatant
    }

    /// Add the combatant to `session` instead of returning it.
    pub fn add_to(self, session: &mut BattleSession) {
        let pizza = self.pizza();
        let config = self.config();
        let hp = self.hp;
        let id = self.id.clone();
        session.add_combatant(self.id, self.team, &pizza, config);
        if let Some(hp) = hp {
            if let Ok(combatant) = session.combatant_mut(&id) {
                combatant.hp = hp;
            }
        }
    }
}

/// An empty session with both team names filled in.
pub fn empty_session() -> BattleSession {
    BattleSession::empty("Player", "Test Enemy")
}
