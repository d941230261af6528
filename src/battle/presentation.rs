//! The boundary between the battle engine and whatever draws it.
//!
//! The engine never renders anything itself. It awaits a [`Presentation`]
//! for every message, menu and animation, so a terminal, a GUI or a test
//! harness can all drive the same battle.

use crate::battle::animations::AnimationRequest;
use crate::battle::state::CombatantView;
use crate::battle::team::TeamView;
use async_trait::async_trait;
use std::collections::VecDeque;

/// One selectable line of a menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuOption {
    pub label: String,
    pub description: String,
    pub disabled: bool,
}

impl MenuOption {
    pub fn new(label: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            description: description.into(),
            disabled: false,
        }
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    pub title: String,
    pub options: Vec<MenuOption>,
}

/// Surface the battle plays on.
///
/// Every method is awaited before the battle continues. `show_menu` returns
/// the index of the chosen option.
#[async_trait]
pub trait Presentation: Send {
    async fn show_message(&mut self, text: &str);

    async fn show_menu(&mut self, menu: &Menu) -> usize;

    /// Start an animation. The engine waits out its duration separately.
    async fn play_animation(&mut self, request: &AnimationRequest);

    async fn update_combatant_display(&mut self, view: &CombatantView);

    async fn update_team_display(&mut self, view: &TeamView);

    /// Remove every battle element. Called once when the battle ends.
    async fn teardown(&mut self);
}

/// Something a [`HeadlessPresentation`] was asked to do.
#[derive(Debug, Clone, PartialEq)]
pub enum PresentationRecord {
    Message(String),
    Menu { title: String, choice: usize },
    Animation(AnimationRequest),
    Combatant(CombatantView),
    Team(TeamView),
    Teardown,
}

/// A presentation with no output. Records everything it is shown and
/// answers menus from a queue of choices, falling back to the first option.
#[derive(Debug, Clone, Default)]
pub struct HeadlessPresentation {
    choices: VecDeque<usize>,
    transcript: Vec<PresentationRecord>,
}

impl HeadlessPresentation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_choices(choices: impl IntoIterator<Item = usize>) -> Self {
        Self {
            choices: choices.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn transcript(&self) -> &[PresentationRecord] {
        &self.transcript
    }

    pub fn messages(&self) -> Vec<&str> {
        self.transcript
            .iter()
            .filter_map(|record| match record {
                PresentationRecord::Message(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn teardown_count(&self) -> usize {
        self.transcript
            .iter()
            .filter(|record| matches!(record, PresentationRecord::Teardown))
            .count()
    }
}

#[async_trait]
impl Presentation for HeadlessPresentation {
    async fn show_message(&mut self, text: &str) {
        self.transcript.push(PresentationRecord::Message(text.to_string()));
    }

    async fn show_menu(&mut self, menu: &Menu) -> usize {
        let choice = self.choices.pop_front().unwrap_or(0);
        self.transcript.push(PresentationRecord::Menu {
            title: menu.title.clone(),
            choice,
        });
        choice
    }

    async fn play_animation(&mut self, request: &AnimationRequest) {
        self.transcript.push(PresentationRecord::Animation(request.clone()));
    }

    async fn update_combatant_display(&mut self, view: &CombatantView) {
        self.transcript.push(PresentationRecord::Combatant(view.clone()));
    }

    async fn update_team_display(&mut self, view: &TeamView) {
        self.transcript.push(PresentationRecord::Team(view.clone()));
    }

    async fn teardown(&mut self) {
        self.transcript.push(PresentationRecord::Teardown);
    }
}
