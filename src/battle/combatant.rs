use crate::battle::events::BattleEvent;
use crate::battle::rng::BattleRng;
use crate::player::PlayerPizza;
use schema::{ActionId, EnemyPizza, PizzaData, PizzaType, Status, StatusKind, Team};
use serde::{Deserialize, Serialize};

pub type CombatantId = String;

/// Healing applied to a saucy combatant after each of its turns.
pub const SAUCY_RECOVER: u32 = 5;

/// XP granted to whoever knocks out a combatant, per level of the loser.
const XP_PER_LEVEL: u32 = 20;

/// Per-instance stats a combatant starts the battle with.
#[derive(Debug, Clone, PartialEq)]
pub struct CombatantConfig {
    pub hp: u32,
    pub max_hp: u32,
    pub xp: u32,
    pub max_xp: u32,
    pub level: u32,
    pub status: Option<Status>,
}

impl From<&PlayerPizza> for CombatantConfig {
    fn from(pizza: &PlayerPizza) -> Self {
        Self {
            hp: pizza.hp,
            max_hp: pizza.max_hp,
            xp: pizza.xp,
            max_xp: pizza.max_xp,
            level: pizza.level,
            status: pizza.status,
        }
    }
}

impl From<&EnemyPizza> for CombatantConfig {
    fn from(pizza: &EnemyPizza) -> Self {
        Self {
            hp: pizza.hp.unwrap_or(pizza.max_hp),
            max_hp: pizza.max_hp,
            xp: 0,
            max_xp: 100,
            level: pizza.level,
            status: None,
        }
    }
}

/// A partial update merged into a combatant by [`Combatant::apply_change`].
///
/// `status: Some(None)` clears the status; `status: None` leaves it alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CombatantChange {
    pub hp: Option<i32>,
    pub status: Option<Option<Status>>,
    pub level: Option<u32>,
    pub xp: Option<u32>,
    pub max_xp: Option<u32>,
}

/// One pizza taking part in a battle.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Combatant {
    pub id: CombatantId,
    pub name: String,
    pub description: String,
    pub pizza_type: PizzaType,
    pub src: String,
    pub icon: String,
    pub team: Team,

    // Signed so damage can overshoot; anything at or below zero is fainted.
    pub hp: i32,
    pub max_hp: u32,
    pub level: u32,
    pub xp: u32,
    pub max_xp: u32,
    pub status: Option<Status>,

    pub actions: Vec<ActionId>,
    pub is_player_controlled: bool,
}

impl Combatant {
    pub fn new(id: CombatantId, team: Team, base: &PizzaData, config: CombatantConfig) -> Self {
        Self {
            id,
            name: base.name.clone(),
            description: base.description.clone(),
            pizza_type: base.pizza_type,
            src: base.src.clone(),
            icon: base.icon.clone(),
            team,
            hp: i32::try_from(config.hp).unwrap_or(i32::MAX),
            max_hp: config.max_hp,
            level: config.level,
            xp: config.xp,
            max_xp: config.max_xp,
            status: config.status,
            actions: base.actions.clone(),
            is_player_controlled: team == Team::Player,
        }
    }

    /// Merge a partial update. No bounds are enforced here; callers keep hp
    /// sensible and readers go through the clamped percentages.
    pub fn apply_change(&mut self, change: CombatantChange) {
        if let Some(hp) = change.hp {
            self.hp = hp;
        }
        if let Some(status) = change.status {
            self.status = status;
        }
        if let Some(level) = change.level {
            self.level = level;
        }
        if let Some(xp) = change.xp {
            self.xp = xp;
        }
        if let Some(max_xp) = change.max_xp {
            self.max_xp = max_xp;
        }
    }

    pub fn is_fainted(&self) -> bool {
        self.hp <= 0
    }

    /// Remaining hp as a percentage of max, never below 0 or above 100.
    pub fn hp_percent(&self) -> f32 {
        if self.max_hp == 0 {
            return 0.0;
        }
        (self.hp as f32 / self.max_hp as f32 * 100.0).clamp(0.0, 100.0)
    }

    pub fn xp_percent(&self) -> f32 {
        if self.max_xp == 0 {
            return 0.0;
        }
        (self.xp as f32 / self.max_xp as f32 * 100.0).clamp(0.0, 100.0)
    }

    pub fn gives_xp(&self) -> u32 {
        self.level * XP_PER_LEVEL
    }

    /// hp after recovering `amount`, capped at max hp.
    pub fn recovered_hp(&self, amount: u32) -> i32 {
        let max_hp = i32::try_from(self.max_hp).unwrap_or(i32::MAX);
        self.hp.saturating_add_unsigned(amount).min(max_hp)
    }

    /// Give the combatant's status a chance to replace its chosen action.
    ///
    /// A clumsy combatant flops over one turn in three, and the action it
    /// picked does not run at all.
    pub fn replaced_events(&self, proposed: Vec<BattleEvent>, rng: &mut BattleRng) -> Vec<BattleEvent> {
        if let Some(Status { kind: StatusKind::Clumsy, .. }) = self.status {
            if rng.pick_index(3, "clumsy flop") == 0 {
                return vec![BattleEvent::text(format!("{} flops over!", self.name))];
            }
        }
        proposed
    }

    /// Events the combatant's status adds after its action has played.
    pub fn post_events(&self) -> Vec<BattleEvent> {
        match self.status {
            Some(Status { kind: StatusKind::Saucy, .. }) => vec![
                BattleEvent::text("Feelin' saucy!"),
                BattleEvent::StateChange {
                    damage: None,
                    recover: Some(SAUCY_RECOVER),
                    status: None,
                    on_caster: true,
                },
            ],
            _ => Vec::new(),
        }
    }

    /// Count the status down by one of the holder's turns. Returns the
    /// announcement when it runs out.
    pub fn decrement_status(&mut self) -> Option<BattleEvent> {
        let status = self.status.as_mut()?;
        if status.expires_in == 0 {
            return None;
        }

        status.expires_in -= 1;
        if status.expires_in > 0 {
            return None;
        }

        let kind = status.kind;
        self.apply_change(CombatantChange {
            status: Some(None),
            ..Default::default()
        });
        Some(BattleEvent::text(format!(
            "{} is no longer {}!",
            self.name, kind
        )))
    }

    /// Add a single point of XP, levelling up when the bar fills. Returns
    /// true on the step that levelled up.
    pub fn gain_xp_step(&mut self) -> bool {
        self.xp += 1;
        if self.xp < self.max_xp {
            return false;
        }

        let level = self.level + 1;
        self.apply_change(CombatantChange {
            xp: Some(0),
            level: Some(level),
            max_xp: Some(level * 100),
            ..Default::default()
        });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::tests::common::TestCombatantBuilder;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_apply_change_merges_only_given_fields() {
        let mut pizza = TestCombatantBuilder::new("p1", Team::Player)
            .with_hp(30)
            .with_status(Status::new(StatusKind::Saucy, 2))
            .build();

        pizza.apply_change(CombatantChange {
            hp: Some(12),
            ..Default::default()
        });
        assert_eq!(pizza.hp, 12);
        assert_eq!(pizza.status, Some(Status::new(StatusKind::Saucy, 2)));

        pizza.apply_change(CombatantChange {
            status: Some(None),
            level: Some(4),
            ..Default::default()
        });
        assert_eq!(pizza.status, None);
        assert_eq!(pizza.level, 4);
        assert_eq!(pizza.hp, 12);
    }

    #[rstest]
    #[case(50, 100.0)]
    #[case(25, 50.0)]
    #[case(0, 0.0)]
    #[case(-7, 0.0)]
    fn test_hp_percent_clamps(#[case] hp: i32, #[case] expected: f32) {
        let mut pizza = TestCombatantBuilder::new("e_a", Team::Enemy).build();
        pizza.hp = hp;
        assert_eq!(pizza.hp_percent(), expected);
    }

    #[test]
    fn test_gives_xp_scales_with_level() {
        let pizza = TestCombatantBuilder::new("e_a", Team::Enemy).with_level(3).build();
        assert_eq!(pizza.gives_xp(), 60);
    }

    #[test]
    fn test_recovered_hp_caps_at_max() {
        let pizza = TestCombatantBuilder::new("p1", Team::Player).with_hp(47).build();
        assert_eq!(pizza.recovered_hp(10), 50);
        assert_eq!(pizza.recovered_hp(2), 49);
    }

    #[test]
    fn test_post_events_only_for_saucy() {
        let saucy = TestCombatantBuilder::new("p1", Team::Player)
            .with_status(Status::new(StatusKind::Saucy, 3))
            .build();
        let plain = TestCombatantBuilder::new("p2", Team::Player).build();

        let events = saucy.post_events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], BattleEvent::text("Feelin' saucy!"));
        assert!(matches!(
            events[1],
            BattleEvent::StateChange { recover: Some(SAUCY_RECOVER), on_caster: true, .. }
        ));
        assert!(plain.post_events().is_empty());
    }

    #[test]
    fn test_clumsy_flop_replaces_whole_action() {
        let clumsy = TestCombatantBuilder::new("p1", Team::Player)
            .with_status(Status::new(StatusKind::Clumsy, 3))
            .build();
        let proposed = vec![BattleEvent::text("a"), BattleEvent::text("b")];

        // Outcome 0 is the flop, 1 and 2 let the action through.
        let mut rng = BattleRng::scripted(vec![0, 1, 2]);
        let flopped = clumsy.replaced_events(proposed.clone(), &mut rng);
        assert_eq!(flopped, vec![BattleEvent::text("Slice Samurai flops over!")]);
        assert_eq!(clumsy.replaced_events(proposed.clone(), &mut rng), proposed);
        assert_eq!(clumsy.replaced_events(proposed.clone(), &mut rng), proposed);
    }

    #[test]
    fn test_non_clumsy_never_draws() {
        let plain = TestCombatantBuilder::new("p1", Team::Player).build();
        let proposed = vec![BattleEvent::text("a")];
        // A scripted flop that must not be consumed.
        let mut rng = BattleRng::scripted(vec![0]);
        assert_eq!(plain.replaced_events(proposed.clone(), &mut rng), proposed);
    }

    #[test]
    fn test_clumsy_flops_about_a_third_of_the_time() {
        let clumsy = TestCombatantBuilder::new("p1", Team::Player)
            .with_status(Status::new(StatusKind::Clumsy, 3))
            .build();
        let mut rng = BattleRng::seeded(7);
        let trials = 3000;

        let flops = (0..trials)
            .filter(|_| {
                let events = clumsy.replaced_events(vec![BattleEvent::text("act")], &mut rng);
                events[0] != BattleEvent::text("act")
            })
            .count();

        let ratio = flops as f64 / trials as f64;
        assert!((0.28..0.39).contains(&ratio), "flop ratio was {}", ratio);
    }

    #[rstest]
    #[case(3, 3)]
    #[case(1, 1)]
    fn test_status_expires_after_exactly_n_turns(#[case] expires_in: u8, #[case] turns: usize) {
        let mut pizza = TestCombatantBuilder::new("p1", Team::Player)
            .with_status(Status::new(StatusKind::Saucy, expires_in))
            .build();

        let mut announcements = Vec::new();
        for _ in 0..turns {
            announcements.push(pizza.decrement_status());
        }

        assert_eq!(pizza.status, None);
        assert!(announcements[..turns - 1].iter().all(Option::is_none));
        assert_eq!(
            announcements[turns - 1],
            Some(BattleEvent::text("Slice Samurai is no longer saucy!"))
        );
        assert_eq!(pizza.decrement_status(), None);
    }

    #[test]
    fn test_zero_turn_status_never_expires_or_goes_negative() {
        let mut pizza = TestCombatantBuilder::new("p1", Team::Player)
            .with_status(Status::new(StatusKind::Clumsy, 0))
            .build();
        assert_eq!(pizza.decrement_status(), None);
        assert_eq!(pizza.status, Some(Status::new(StatusKind::Clumsy, 0)));
    }

    #[test]
    fn test_xp_rollover_keeps_remainder() {
        let mut pizza = TestCombatantBuilder::new("p1", Team::Player)
            .with_xp(95, 100)
            .with_level(1)
            .build();

        let level_ups = (0..10).filter(|_| pizza.gain_xp_step()).count();

        assert_eq!(level_ups, 1);
        assert_eq!((pizza.xp, pizza.max_xp, pizza.level), (5, 200, 2));
    }
}
