use crate::battle::ai::{Behavior, RandomAI};
use crate::battle::dispatcher::EventDispatcher;
use crate::battle::presentation::Presentation;
use crate::battle::rng::BattleRng;
use crate::battle::state::{BattleOutcome, BattleSession};
use crate::battle::turn_cycle::TurnCycle;
use crate::catalog::Catalog;
use crate::config::BattleConfig;
use crate::errors::BattleResult;
use crate::player::PlayerState;

/// High-level battle management interface that hides the turn cycle and
/// dispatcher behind a single `run`.
pub struct Battle<'c> {
    catalog: &'c Catalog,
    enemy_id: String,
    session: BattleSession,
    behavior: Box<dyn Behavior>,
    rng: BattleRng,
    config: BattleConfig,
    cycle: TurnCycle,
}

impl<'c> Battle<'c> {
    /// Set up a battle between the player's lineup and the enemy `enemy_id`.
    pub fn new(
        catalog: &'c Catalog,
        player: &PlayerState,
        enemy_id: &str,
        config: BattleConfig,
        rng: BattleRng,
    ) -> BattleResult<Self> {
        let enemy = catalog.enemy(enemy_id)?;
        let session = BattleSession::new(catalog, player, enemy)?;

        Ok(Self {
            catalog,
            enemy_id: enemy_id.to_string(),
            session,
            behavior: Box::new(RandomAI::new()),
            rng,
            config,
            cycle: TurnCycle::new(),
        })
    }

    /// Swap in a different controller for enemy decisions.
    pub fn with_behavior(mut self, behavior: Box<dyn Behavior>) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn session(&self) -> &BattleSession {
        &self.session
    }

    pub fn turn_cycle(&self) -> &TurnCycle {
        &self.cycle
    }

    /// Play the battle to the end and settle it against `player`.
    ///
    /// The presentation is torn down exactly once, whether the battle ends
    /// normally or with an error. Player state is only written on a win.
    pub async fn run(
        &mut self,
        presentation: &mut dyn Presentation,
        player: &mut PlayerState,
    ) -> BattleResult<BattleOutcome> {
        tracing::info!(enemy = %self.enemy_id, seed = ?self.rng.seed(), "battle started");

        let result = {
            let mut dispatcher = EventDispatcher::new(
                self.catalog,
                &mut *presentation,
                self.behavior.as_ref(),
                &mut self.rng,
                self.config,
            );
            match dispatcher.refresh_all(&self.session).await {
                Ok(()) => self.cycle.run(&mut self.session, &mut dispatcher).await,
                Err(err) => Err(err),
            }
        };

        presentation.teardown().await;

        let winner = result.inspect_err(|err| tracing::error!(%err, "battle aborted"))?;
        let outcome = self.session.finish(winner, player);
        tracing::info!(%outcome, events = self.session.log().len(), "battle finished");
        Ok(outcome)
    }
}

/// Run a whole battle against `enemy_id` and return how it went for the
/// player.
pub async fn run_battle(
    catalog: &Catalog,
    player: &mut PlayerState,
    enemy_id: &str,
    presentation: &mut dyn Presentation,
    config: BattleConfig,
    rng: BattleRng,
) -> BattleResult<BattleOutcome> {
    let mut battle = Battle::new(catalog, player, enemy_id, config, rng)?;
    battle.run(presentation, player).await
}
