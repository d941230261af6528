//! A module for defining AI behaviors for enemy combatants.

use crate::battle::combatant::{Combatant, CombatantId};
use crate::battle::events::Submission;
use crate::battle::menus::target_for;
use crate::battle::rng::BattleRng;
use crate::battle::state::BattleSession;
use crate::catalog::Catalog;
use crate::errors::{BattleError, BattleResult};
use schema::Team;

/// A trait for any system that can decide on a battle action.
/// This provides a common interface for different AI difficulties or strategies.
pub trait Behavior: Send {
    /// Decide what `caster` does this turn, facing `enemy`.
    fn decide_submission(
        &self,
        caster: &Combatant,
        enemy: &Combatant,
        catalog: &Catalog,
        rng: &mut BattleRng,
    ) -> BattleResult<Submission>;

    /// Pick who replaces a fainted combatant of `team`.
    fn decide_replacement(&self, team: Team, session: &BattleSession) -> BattleResult<CombatantId>;
}

/// Uses one of its known actions, chosen uniformly at random, and always
/// sends in the first pizza still standing.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomAI;

impl RandomAI {
    pub fn new() -> Self {
        Self
    }
}

impl Behavior for RandomAI {
    fn decide_submission(
        &self,
        caster: &Combatant,
        enemy: &Combatant,
        catalog: &Catalog,
        rng: &mut BattleRng,
    ) -> BattleResult<Submission> {
        if caster.actions.is_empty() {
            return Err(BattleError::NoActions(caster.id.clone()));
        }

        let index = rng.pick_index(caster.actions.len(), "ai action");
        let action_id = &caster.actions[index];
        let action = catalog.action(action_id)?;

        Ok(Submission::Action {
            action: action_id.clone(),
            target: target_for(action, caster, enemy),
        })
    }

    fn decide_replacement(&self, team: Team, session: &BattleSession) -> BattleResult<CombatantId> {
        session
            .replacement_candidates(team)
            .first()
            .map(|c| c.id.clone())
            .ok_or(BattleError::NoReplacementAvailable(team))
    }
}
