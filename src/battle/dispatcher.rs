//! Plays one [`BattleEvent`] at a time against the session and the
//! presentation.

use crate::battle::ai::Behavior;
use crate::battle::animations;
use crate::battle::events::{BattleEvent, EventContext, EventOutcome, Submission};
use crate::battle::menus::{choose_replacement, SubmissionMenu};
use crate::battle::presentation::Presentation;
use crate::battle::rng::BattleRng;
use crate::battle::state::BattleSession;
use crate::catalog::Catalog;
use crate::config::BattleConfig;
use crate::errors::{BattleError, BattleResult};
use schema::{StatusChange, Team};
use std::time::Duration;

/// Owns nothing but borrows everything an event might touch.
pub struct EventDispatcher<'a> {
    catalog: &'a Catalog,
    presentation: &'a mut dyn Presentation,
    behavior: &'a dyn Behavior,
    rng: &'a mut BattleRng,
    config: BattleConfig,
}

async fn settle(duration: Duration) {
    if !duration.is_zero() {
        tokio::time::sleep(duration).await;
    }
}

fn required<'c>(id: &'c Option<String>, what: &'static str) -> BattleResult<&'c str> {
    id.as_deref().ok_or(BattleError::MissingContext(what))
}

impl<'a> EventDispatcher<'a> {
    pub fn new(
        catalog: &'a Catalog,
        presentation: &'a mut dyn Presentation,
        behavior: &'a dyn Behavior,
        rng: &'a mut BattleRng,
        config: BattleConfig,
    ) -> Self {
        Self {
            catalog,
            presentation,
            behavior,
            rng,
            config,
        }
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn rng_mut(&mut self) -> &mut BattleRng {
        &mut *self.rng
    }

    /// Play `event` to completion and return what it resolved with.
    pub async fn dispatch(
        &mut self,
        session: &mut BattleSession,
        event: BattleEvent,
        context: &EventContext,
    ) -> BattleResult<EventOutcome> {
        tracing::debug!(?event, caster = ?context.caster, target_id = ?context.target, "dispatching event");
        session.log_mut().push(event.clone(), context.clone());

        match event {
            BattleEvent::TextMessage { text } => {
                let text = self.fill_placeholders(&text, session, context)?;
                self.presentation.show_message(&text).await;
                Ok(EventOutcome::Done)
            }

            BattleEvent::Animation { animation, color } => {
                let caster = session.combatant(required(&context.caster, "caster")?)?;
                let target = match context.target.as_deref() {
                    Some(id) => Some(session.combatant(id)?),
                    None => None,
                };

                let request = animations::request(animation, caster, target, color);
                self.presentation.play_animation(&request).await;
                if self.config.wait_for_animations {
                    settle(request.duration).await;
                }
                Ok(EventOutcome::Done)
            }

            BattleEvent::StateChange {
                damage,
                recover,
                status,
                on_caster,
            } => {
                if let Some(damage) = damage {
                    let target = session.combatant_mut(required(&context.target, "target")?)?;
                    target.hp = target.hp.saturating_sub_unsigned(damage);
                    tracing::debug!(combatant = %target.id, damage, hp = target.hp, "damage dealt");
                }

                let who_id = if on_caster {
                    required(&context.caster, "caster")?
                } else {
                    required(&context.target, "target")?
                };

                if let Some(recover) = recover {
                    let who = session.combatant_mut(who_id)?;
                    who.hp = who.recovered_hp(recover);
                    tracing::debug!(who = %who.id, recover, hp = who.hp, "hp recovered");
                }

                if let Some(change) = status {
                    let who = session.combatant_mut(who_id)?;
                    who.status = match change {
                        StatusChange::Set(status) => Some(status),
                        StatusChange::Clear => None,
                    };
                    tracing::debug!(who = %who.id, status = ?who.status, "status changed");
                }

                for id in [&context.caster, &context.target].into_iter().flatten() {
                    self.refresh_combatant(session, id).await?;
                }
                settle(self.config.state_change_settle()).await;
                self.refresh_teams(session).await;
                Ok(EventOutcome::Done)
            }

            BattleEvent::SubmissionMenu { caster, enemy } => {
                let caster = session.combatant(&caster)?;
                let enemy = session.combatant(&enemy)?;

                let submission: Submission = if caster.is_player_controlled {
                    SubmissionMenu::new(caster, enemy, session, self.catalog)
                        .choose(&mut *self.presentation)
                        .await?
                } else {
                    self.behavior
                        .decide_submission(caster, enemy, self.catalog, self.rng)?
                };

                tracing::debug!(caster = %caster.id, ?submission, "submission decided");
                Ok(EventOutcome::Submission(submission))
            }

            BattleEvent::ReplacementMenu { team } => {
                let candidates = session.replacement_candidates(team);
                let player_controlled = match candidates.first() {
                    Some(first) => first.is_player_controlled,
                    None => return Err(BattleError::NoReplacementAvailable(team)),
                };

                let replacement = if player_controlled {
                    choose_replacement(&candidates, &mut *self.presentation).await?
                } else {
                    self.behavior.decide_replacement(team, session)?
                };

                tracing::debug!(%team, %replacement, "replacement chosen");
                Ok(EventOutcome::Replacement(replacement))
            }

            BattleEvent::Replace { replacement } => {
                let team = session.combatant(&replacement)?.team;

                let previous = session.active_id(team).cloned();
                if let Some(previous) = previous {
                    session.set_active(team, None);
                    self.refresh_combatant(session, &previous).await?;
                }
                settle(self.config.replace_settle()).await;

                session.set_active(team, Some(replacement.clone()));
                self.refresh_combatant(session, &replacement).await?;
                settle(self.config.replace_settle()).await;

                self.refresh_teams(session).await;
                Ok(EventOutcome::Done)
            }

            BattleEvent::GiveXp { xp, combatant } => {
                for remaining in (0..xp).rev() {
                    let receiver = session.combatant_mut(&combatant)?;
                    if receiver.gain_xp_step() {
                        tracing::info!(combatant = %receiver.id, level = receiver.level, "level up");
                    }
                    tracing::trace!(combatant = %receiver.id, xp = receiver.xp, remaining, "xp frame");

                    self.refresh_combatant(session, &combatant).await?;
                    settle(self.config.xp_frame()).await;
                }
                Ok(EventOutcome::Done)
            }
        }
    }

    /// Dispatch an event that must resolve with a submission.
    pub async fn request_submission(
        &mut self,
        session: &mut BattleSession,
        caster: &str,
        enemy: &str,
    ) -> BattleResult<Submission> {
        let event = BattleEvent::SubmissionMenu {
            caster: caster.to_string(),
            enemy: enemy.to_string(),
        };
        match self.dispatch(session, event.clone(), &EventContext::none()).await? {
            EventOutcome::Submission(submission) => Ok(submission),
            _ => Err(BattleError::UnexpectedOutcome { event: Box::new(event) }),
        }
    }

    /// Dispatch an event that must resolve with a replacement id.
    pub async fn request_replacement(&mut self, session: &mut BattleSession, team: Team) -> BattleResult<String> {
        let event = BattleEvent::ReplacementMenu { team };
        match self.dispatch(session, event.clone(), &EventContext::none()).await? {
            EventOutcome::Replacement(id) => Ok(id),
            _ => Err(BattleError::UnexpectedOutcome { event: Box::new(event) }),
        }
    }

    /// Dispatch an event that resolves with nothing, such as a message.
    pub async fn play(
        &mut self,
        session: &mut BattleSession,
        event: BattleEvent,
        context: &EventContext,
    ) -> BattleResult<()> {
        match self.dispatch(session, event.clone(), context).await? {
            EventOutcome::Done => Ok(()),
            _ => Err(BattleError::UnexpectedOutcome { event: Box::new(event) }),
        }
    }

    /// Push every combatant and both teams to the presentation.
    pub async fn refresh_all(&mut self, session: &BattleSession) -> BattleResult<()> {
        let ids: Vec<String> = session.combatants().map(|c| c.id.clone()).collect();
        for id in &ids {
            self.refresh_combatant(session, id).await?;
        }
        self.refresh_teams(session).await;
        Ok(())
    }

    async fn refresh_combatant(&mut self, session: &BattleSession, id: &str) -> BattleResult<()> {
        let view = session.combatant_view(id)?;
        self.presentation.update_combatant_display(&view).await;
        Ok(())
    }

    async fn refresh_teams(&mut self, session: &BattleSession) {
        for team in [Team::Player, Team::Enemy] {
            let view = session.team_view(team);
            self.presentation.update_team_display(&view).await;
        }
    }

    /// Replace every `{CASTER}`, `{TARGET}` and `{ACTION}` with the name it
    /// refers to. Placeholders without a matching context entry are left as
    /// they are.
    fn fill_placeholders(&self, text: &str, session: &BattleSession, context: &EventContext) -> BattleResult<String> {
        let mut filled = text.to_string();

        if let Some(caster) = &context.caster {
            filled = filled.replace("{CASTER}", &session.combatant(caster)?.name);
        }
        if let Some(target) = &context.target {
            filled = filled.replace("{TARGET}", &session.combatant(target)?.name);
        }
        if let Some(action) = &context.action {
            filled = filled.replace("{ACTION}", &self.catalog.action(action)?.name);
        }

        Ok(filled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::ai::RandomAI;
    use crate::battle::presentation::{HeadlessPresentation, PresentationRecord};
    use crate::battle::tests::common::{starter_session, test_catalog};
    use pretty_assertions::assert_eq;
    use schema::{AnimationKind, Status, StatusKind};

    async fn dispatch_one(
        session: &mut BattleSession,
        presentation: &mut HeadlessPresentation,
        event: BattleEvent,
        context: &EventContext,
    ) -> BattleResult<EventOutcome> {
        let catalog = test_catalog();
        let mut rng = BattleRng::scripted(vec![]);
        let mut dispatcher =
            EventDispatcher::new(&catalog, presentation, &RandomAI, &mut rng, BattleConfig::instant());
        dispatcher.dispatch(session, event, context).await
    }

    #[tokio::test]
    async fn test_text_placeholders_fill_every_occurrence() {
        let (mut session, _) = starter_session("erio");
        let mut presentation = HeadlessPresentation::new();
        let context = EventContext::for_action("p1", "e_b", "damage1");

        dispatch_one(
            &mut session,
            &mut presentation,
            BattleEvent::text("{CASTER} uses {ACTION} on {TARGET}! {CASTER}!"),
            &context,
        )
        .await
        .unwrap();

        assert_eq!(
            presentation.messages(),
            vec!["Slice Samurai uses Whomp! on Bacon Brigade! Slice Samurai!"]
        );
        assert_eq!(session.log().len(), 1);
    }

    #[tokio::test]
    async fn test_placeholders_without_context_are_kept() {
        let (mut session, _) = starter_session("erio");
        let mut presentation = HeadlessPresentation::new();

        dispatch_one(
            &mut session,
            &mut presentation,
            BattleEvent::text("{TARGET} is ruined!"),
            &EventContext::none(),
        )
        .await
        .unwrap();

        assert_eq!(presentation.messages(), vec!["{TARGET} is ruined!"]);
    }

    #[tokio::test]
    async fn test_damage_hits_target_without_floor() {
        let (mut session, _) = starter_session("erio");
        session.combatant_mut("e_a").unwrap().hp = 4;
        let mut presentation = HeadlessPresentation::new();

        dispatch_one(
            &mut session,
            &mut presentation,
            BattleEvent::StateChange {
                damage: Some(10),
                recover: None,
                status: None,
                on_caster: false,
            },
            &EventContext::for_action("p1", "e_a", "damage1"),
        )
        .await
        .unwrap();

        let target = session.combatant("e_a").unwrap();
        assert_eq!(target.hp, -6);
        assert!(target.is_fainted());
        assert_eq!(session.combatant_view("e_a").unwrap().hp_percent, 0.0);
        assert!(presentation
            .transcript()
            .iter()
            .any(|r| matches!(r, PresentationRecord::Combatant(view) if view.id == "e_a" && view.fainted)));
    }

    #[tokio::test]
    async fn test_recover_and_status_land_on_caster() {
        let (mut session, _) = starter_session("erio");
        session.combatant_mut("p1").unwrap().hp = 45;
        let mut presentation = HeadlessPresentation::new();

        dispatch_one(
            &mut session,
            &mut presentation,
            BattleEvent::StateChange {
                damage: None,
                recover: Some(10),
                status: Some(StatusChange::Set(Status::new(StatusKind::Clumsy, 2))),
                on_caster: true,
            },
            &EventContext::for_action("p1", "e_a", "saucyStatus"),
        )
        .await
        .unwrap();

        let caster = session.combatant("p1").unwrap();
        assert_eq!(caster.hp, 50);
        assert_eq!(caster.status, Some(Status::new(StatusKind::Clumsy, 2)));
        assert_eq!(session.combatant("e_a").unwrap().status, None);
    }

    #[tokio::test]
    async fn test_status_clear_on_target() {
        let (mut session, _) = starter_session("erio");
        let mut presentation = HeadlessPresentation::new();

        dispatch_one(
            &mut session,
            &mut presentation,
            BattleEvent::StateChange {
                damage: None,
                recover: None,
                status: Some(StatusChange::Clear),
                on_caster: false,
            },
            &EventContext::for_action("e_a", "p1", "item_recoverStatus"),
        )
        .await
        .unwrap();

        assert_eq!(session.combatant("p1").unwrap().status, None);
    }

    #[tokio::test]
    async fn test_damage_without_target_is_an_error() {
        let (mut session, _) = starter_session("erio");
        let mut presentation = HeadlessPresentation::new();

        let result = dispatch_one(
            &mut session,
            &mut presentation,
            BattleEvent::StateChange {
                damage: Some(10),
                recover: None,
                status: None,
                on_caster: false,
            },
            &EventContext::none(),
        )
        .await;

        assert!(matches!(result, Err(BattleError::MissingContext("target"))));
    }

    #[tokio::test]
    async fn test_animation_request_carries_color() {
        let (mut session, _) = starter_session("erio");
        let mut presentation = HeadlessPresentation::new();

        dispatch_one(
            &mut session,
            &mut presentation,
            BattleEvent::Animation {
                animation: AnimationKind::Glob,
                color: Some("#dafd2a".to_string()),
            },
            &EventContext::for_action("p1", "e_a", "clumsyStatus"),
        )
        .await
        .unwrap();

        match &presentation.transcript()[0] {
            PresentationRecord::Animation(request) => {
                assert_eq!(request.animation, AnimationKind::Glob);
                assert_eq!(request.caster, "p1");
                assert_eq!(request.color.as_deref(), Some("#dafd2a"));
            }
            other => panic!("expected an animation, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_replace_moves_active_pointer() {
        let (mut session, _) = starter_session("erio");
        let mut presentation = HeadlessPresentation::new();

        dispatch_one(
            &mut session,
            &mut presentation,
            BattleEvent::Replace {
                replacement: "p2".to_string(),
            },
            &EventContext::none(),
        )
        .await
        .unwrap();

        assert_eq!(session.active_id(Team::Player).map(String::as_str), Some("p2"));
        assert!(!session.is_active("p1"));
        assert_eq!(session.active_id(Team::Enemy).map(String::as_str), Some("e_a"));
    }

    #[tokio::test]
    async fn test_give_xp_levels_up_and_keeps_remainder() {
        let (mut session, _) = starter_session("erio");
        let mut presentation = HeadlessPresentation::new();

        dispatch_one(
            &mut session,
            &mut presentation,
            BattleEvent::GiveXp {
                xp: 10,
                combatant: "p1".to_string(),
            },
            &EventContext::none(),
        )
        .await
        .unwrap();

        let p1 = session.combatant("p1").unwrap();
        assert_eq!((p1.xp, p1.max_xp, p1.level), (5, 200, 2));

        let frames = presentation
            .transcript()
            .iter()
            .filter(|r| matches!(r, PresentationRecord::Combatant(_)))
            .count();
        assert_eq!(frames, 10);
    }

    #[tokio::test]
    async fn test_enemy_replacement_menu_takes_first_standing() {
        let (mut session, _) = starter_session("erio");
        session.combatant_mut("e_a").unwrap().hp = 0;
        let mut presentation = HeadlessPresentation::new();

        let outcome = dispatch_one(
            &mut session,
            &mut presentation,
            BattleEvent::ReplacementMenu { team: Team::Enemy },
            &EventContext::none(),
        )
        .await
        .unwrap();

        assert_eq!(outcome, EventOutcome::Replacement("e_b".to_string()));
        assert!(presentation.transcript().is_empty());
    }

    #[tokio::test]
    async fn test_player_replacement_menu_asks_presentation() {
        let (mut session, _) = starter_session("erio");
        session.combatant_mut("p1").unwrap().hp = 0;
        let mut presentation = HeadlessPresentation::with_choices([0]);

        let outcome = dispatch_one(
            &mut session,
            &mut presentation,
            BattleEvent::ReplacementMenu { team: Team::Player },
            &EventContext::none(),
        )
        .await
        .unwrap();

        assert_eq!(outcome, EventOutcome::Replacement("p2".to_string()));
        assert!(matches!(
            presentation.transcript()[0],
            PresentationRecord::Menu { choice: 0, .. }
        ));
    }
}
