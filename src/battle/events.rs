use crate::battle::combatant::CombatantId;
use schema::{ActionId, AnimationKind, EffectStep, StatusChange, Team};
use serde::{Deserialize, Serialize};

/// Every kind of event the dispatcher knows how to play.
///
/// The first three variants mirror [`EffectStep`] and come from the action
/// catalog; the rest are issued by the turn cycle to drive the session.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum BattleEvent {
    TextMessage {
        text: String,
    },
    Animation {
        animation: AnimationKind,
        color: Option<String>,
    },
    StateChange {
        damage: Option<u32>,
        recover: Option<u32>,
        status: Option<StatusChange>,
        on_caster: bool,
    },

    /// Ask the caster's controller what to do this turn.
    SubmissionMenu {
        caster: CombatantId,
        enemy: CombatantId,
    },
    /// Ask a team's controller who replaces a fainted combatant.
    ReplacementMenu {
        team: Team,
    },
    /// Make `replacement` the active combatant of its team.
    Replace {
        replacement: CombatantId,
    },
    /// Tally experience onto a combatant one point per frame.
    GiveXp {
        xp: u32,
        combatant: CombatantId,
    },
}

impl BattleEvent {
    pub fn text(text: impl Into<String>) -> Self {
        BattleEvent::TextMessage { text: text.into() }
    }
}

impl From<EffectStep> for BattleEvent {
    fn from(step: EffectStep) -> Self {
        match step {
            EffectStep::TextMessage { text } => BattleEvent::TextMessage { text },
            EffectStep::Animation { animation, color } => BattleEvent::Animation { animation, color },
            EffectStep::StateChange {
                damage,
                recover,
                status,
                on_caster,
            } => BattleEvent::StateChange {
                damage,
                recover,
                status,
                on_caster,
            },
        }
    }
}

/// Who and what an event is about. Merged into every action effect so text
/// placeholders and state changes know their caster and target.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct EventContext {
    pub caster: Option<CombatantId>,
    pub target: Option<CombatantId>,
    pub action: Option<ActionId>,
}

impl EventContext {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn for_action(caster: &str, target: &str, action: &str) -> Self {
        Self {
            caster: Some(caster.to_string()),
            target: Some(target.to_string()),
            action: Some(action.to_string()),
        }
    }
}

/// What a combatant decided to do with its turn.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Action {
        action: ActionId,
        target: CombatantId,
    },
    /// A consumable from the bag; plays like an action but uses up the instance.
    Item {
        instance_id: String,
        action: ActionId,
        target: CombatantId,
    },
    Replacement {
        replacement: CombatantId,
    },
}

/// The value an event resolves with once its visible effect is complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    Done,
    Submission(Submission),
    Replacement(CombatantId),
}

/// A dispatched event together with its context, as kept in the log.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LoggedEvent {
    pub event: BattleEvent,
    pub context: EventContext,
}

/// Event log for a battle.
///
/// Every event the dispatcher plays is appended in order, so a battle can be
/// inspected or replayed after the fact.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    events: Vec<LoggedEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: BattleEvent, context: EventContext) {
        self.events.push(LoggedEvent { event, context });
    }

    pub fn events(&self) -> &[LoggedEvent] {
        &self.events
    }

    /// Return true if the event bus contains no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Return the number of events in the bus.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Iterate over the bare events without their context.
    pub fn iter(&self) -> impl Iterator<Item = &BattleEvent> {
        self.events.iter().map(|logged| &logged.event)
    }
}

impl std::fmt::Display for EventBus {
    /// Format the EventBus for printing. Shows debug format of all events.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for logged in &self.events {
            writeln!(f, "  {:?}", logged.event)?;
        }
        Ok(())
    }
}
