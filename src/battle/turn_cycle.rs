use crate::battle::dispatcher::EventDispatcher;
use crate::battle::events::{BattleEvent, EventContext, Submission};
use crate::battle::state::BattleSession;
use crate::errors::BattleResult;
use schema::Team;

/// Alternates turns between the two teams until one of them wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnCycle {
    current_team: Team,
    turn_number: u32,
}

impl Default for TurnCycle {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnCycle {
    /// The player always moves first.
    pub fn new() -> Self {
        Self {
            current_team: Team::Player,
            turn_number: 0,
        }
    }

    pub fn current_team(&self) -> Team {
        self.current_team
    }

    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    /// Announce the enemy, then play turns until there is a winner.
    pub async fn run(&mut self, session: &mut BattleSession, dispatcher: &mut EventDispatcher<'_>) -> BattleResult<Team> {
        let intro = format!("{} wants to throw down!", session.team(Team::Enemy).name);
        dispatcher.play(session, BattleEvent::text(intro), &EventContext::none()).await?;

        loop {
            if let Some(winner) = self.turn(session, dispatcher).await? {
                tracing::info!(%winner, turns = self.turn_number, "battle decided");
                return Ok(winner);
            }
        }
    }

    /// Play one turn for the current team. Returns the winner if this turn
    /// ended the battle.
    pub async fn turn(
        &mut self,
        session: &mut BattleSession,
        dispatcher: &mut EventDispatcher<'_>,
    ) -> BattleResult<Option<Team>> {
        self.turn_number += 1;
        let team = self.current_team;

        let caster_id = session.active_combatant(team)?.id.clone();
        let enemy_id = session.active_combatant(team.opponent())?.id.clone();

        tracing::debug!(turn = self.turn_number, %team, caster = %caster_id, enemy = %enemy_id, "turn started");

        let submission = dispatcher.request_submission(session, &caster_id, &enemy_id).await?;

        let (action_id, target_id) = match submission {
            Submission::Replacement { replacement } => {
                dispatcher
                    .play(
                        session,
                        BattleEvent::Replace {
                            replacement: replacement.clone(),
                        },
                        &EventContext::none(),
                    )
                    .await?;
                let name = session.combatant(&replacement)?.name.clone();
                dispatcher
                    .play(session, BattleEvent::text(format!("Go get 'em, {}!", name)), &EventContext::none())
                    .await?;

                self.flip();
                return Ok(None);
            }
            Submission::Item {
                instance_id,
                action,
                target,
            } => {
                if session.consume_item(&instance_id).is_none() {
                    tracing::warn!(%instance_id, "item was already used");
                }
                (action, target)
            }
            Submission::Action { action, target } => (action, target),
        };

        let context = EventContext::for_action(&caster_id, &target_id, &action_id);

        let proposed: Vec<BattleEvent> = dispatcher
            .catalog()
            .action(&action_id)?
            .effects
            .iter()
            .cloned()
            .map(BattleEvent::from)
            .collect();
        let events = session
            .combatant(&caster_id)?
            .replaced_events(proposed, dispatcher.rng_mut());
        for event in events {
            dispatcher.play(session, event, &context).await?;
        }

        let target = session.combatant(&target_id)?;
        let target_fainted = target.is_fainted();
        let target_team = target.team;
        let xp = target.gives_xp();

        if target_fainted {
            dispatcher
                .play(session, BattleEvent::text("{TARGET} is ruined!"), &context)
                .await?;

            if target_team == Team::Enemy {
                let receiver = session.active_combatant(Team::Player)?.id.clone();
                dispatcher
                    .play(session, BattleEvent::text(format!("Gained {} XP!", xp)), &context)
                    .await?;
                dispatcher
                    .play(
                        session,
                        BattleEvent::GiveXp {
                            xp,
                            combatant: receiver,
                        },
                        &context,
                    )
                    .await?;
            }
        }

        if let Some(winner) = session.winning_team() {
            dispatcher
                .play(session, BattleEvent::text("Winner!"), &EventContext::none())
                .await?;
            return Ok(Some(winner));
        }

        if target_fainted {
            let replacement = dispatcher.request_replacement(session, target_team).await?;
            dispatcher
                .play(
                    session,
                    BattleEvent::Replace {
                        replacement: replacement.clone(),
                    },
                    &EventContext::none(),
                )
                .await?;
            let name = session.combatant(&replacement)?.name.clone();
            dispatcher
                .play(session, BattleEvent::text(format!("{} appears!", name)), &EventContext::none())
                .await?;
        }

        let post_events = session.combatant(&caster_id)?.post_events();
        for event in post_events {
            dispatcher.play(session, event, &context).await?;
        }

        let expired = session.combatant_mut(&caster_id)?.decrement_status();
        if let Some(expired) = expired {
            dispatcher.play(session, expired, &context).await?;
        }

        self.flip();
        Ok(None)
    }

    fn flip(&mut self) {
        self.current_team = self.current_team.opponent();
    }
}
