//! Menus offered to player-controlled combatants.
//!
//! A submission menu is a small tree of pages: the root offers Attack, Items
//! and Swap, and each of those lists its choices followed by Back. Building
//! a page yields both the [`Menu`] to show and the [`MenuEntry`] behind each
//! option, so the choice a presentation returns maps straight to a result.

use crate::battle::combatant::{Combatant, CombatantId};
use crate::battle::events::Submission;
use crate::battle::presentation::{Menu, MenuOption, Presentation};
use crate::battle::state::BattleSession;
use crate::catalog::Catalog;
use crate::errors::{BattleError, BattleResult};
use schema::{ActionData, ActionId, TargetType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuPage {
    Root,
    Attacks,
    Items,
    Swap,
}

/// What picking an option does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntry {
    Page(MenuPage),
    Submit(Submission),
    Back,
}

/// All of a team's items that share an action, shown as one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemGroup {
    pub action_id: ActionId,
    pub quantity: usize,
    /// The instance used when this group is picked.
    pub first_instance_id: String,
}

/// Friendly actions land on the caster, everything else on the enemy.
pub fn target_for(action: &ActionData, caster: &Combatant, enemy: &Combatant) -> CombatantId {
    match action.target_type {
        TargetType::Friendly => caster.id.clone(),
        TargetType::Enemy => enemy.id.clone(),
    }
}

/// Group the items of `caster`'s team by action, keeping first-seen order.
pub fn item_groups(session: &BattleSession, caster: &Combatant) -> Vec<ItemGroup> {
    let mut groups: Vec<ItemGroup> = Vec::new();
    for item in session.items_for(caster.team) {
        match groups.iter_mut().find(|group| group.action_id == item.action_id) {
            Some(group) => group.quantity += 1,
            None => groups.push(ItemGroup {
                action_id: item.action_id.clone(),
                quantity: 1,
                first_instance_id: item.instance_id.clone(),
            }),
        }
    }
    groups
}

pub struct SubmissionMenu<'a> {
    caster: &'a Combatant,
    enemy: &'a Combatant,
    session: &'a BattleSession,
    catalog: &'a Catalog,
}

impl<'a> SubmissionMenu<'a> {
    pub fn new(caster: &'a Combatant, enemy: &'a Combatant, session: &'a BattleSession, catalog: &'a Catalog) -> Self {
        Self {
            caster,
            enemy,
            session,
            catalog,
        }
    }

    pub fn page(&self, page: MenuPage) -> BattleResult<(Menu, Vec<MenuEntry>)> {
        let mut options = Vec::new();
        let mut entries = Vec::new();

        match page {
            MenuPage::Root => {
                let has_items = self.session.items_for(self.caster.team).next().is_some();
                let has_swaps = !self.session.swap_candidates(self.caster).is_empty();

                options.push(MenuOption::new("Attack", "Choose an attack"));
                entries.push(MenuEntry::Page(MenuPage::Attacks));
                options.push(MenuOption::new("Items", "Choose an item").disabled(!has_items));
                entries.push(MenuEntry::Page(MenuPage::Items));
                options.push(MenuOption::new("Swap", "Change to another pizza").disabled(!has_swaps));
                entries.push(MenuEntry::Page(MenuPage::Swap));
            }
            MenuPage::Attacks => {
                for action_id in &self.caster.actions {
                    let action = self.catalog.action(action_id)?;
                    options.push(MenuOption::new(action.name.clone(), action.description.clone()));
                    entries.push(MenuEntry::Submit(Submission::Action {
                        action: action_id.clone(),
                        target: target_for(action, self.caster, self.enemy),
                    }));
                }
            }
            MenuPage::Items => {
                for group in item_groups(self.session, self.caster) {
                    let action = self.catalog.action(&group.action_id)?;
                    options.push(MenuOption::new(
                        format!("{} x{}", action.name, group.quantity),
                        action.description.clone(),
                    ));
                    entries.push(MenuEntry::Submit(Submission::Item {
                        instance_id: group.first_instance_id,
                        action: group.action_id,
                        target: target_for(action, self.caster, self.enemy),
                    }));
                }
            }
            MenuPage::Swap => {
                for candidate in self.session.swap_candidates(self.caster) {
                    options.push(MenuOption::new(candidate.name.clone(), candidate.description.clone()));
                    entries.push(MenuEntry::Submit(Submission::Replacement {
                        replacement: candidate.id.clone(),
                    }));
                }
            }
        }

        if page != MenuPage::Root {
            options.push(MenuOption::new("Back", "Back to the previous menu"));
            entries.push(MenuEntry::Back);
        }

        let title = match page {
            MenuPage::Root => format!("What will {} do?", self.caster.name),
            MenuPage::Attacks => "Attacks".to_string(),
            MenuPage::Items => "Items".to_string(),
            MenuPage::Swap => "Swap".to_string(),
        };

        Ok((Menu { title, options }, entries))
    }

    /// Walk the pages with the presentation until it submits something.
    /// Picking a disabled option shows the same page again.
    pub async fn choose(&self, presentation: &mut dyn Presentation) -> BattleResult<Submission> {
        let mut page = MenuPage::Root;
        loop {
            let (menu, entries) = self.page(page)?;
            let choice = presentation.show_menu(&menu).await;
            let entry = entries.get(choice).ok_or(BattleError::InvalidMenuChoice {
                choice,
                options: entries.len(),
            })?;

            if menu.options[choice].disabled {
                tracing::debug!(page = ?page, choice, "disabled menu option picked");
                continue;
            }

            match entry {
                MenuEntry::Page(next) => page = *next,
                MenuEntry::Back => page = MenuPage::Root,
                MenuEntry::Submit(submission) => return Ok(submission.clone()),
            }
        }
    }
}

/// Ask the presentation which of `candidates` comes in next.
pub async fn choose_replacement(
    candidates: &[&Combatant],
    presentation: &mut dyn Presentation,
) -> BattleResult<CombatantId> {
    let menu = Menu {
        title: "Who's next?".to_string(),
        options: candidates
            .iter()
            .map(|c| MenuOption::new(c.name.clone(), c.description.clone()))
            .collect(),
    };

    let choice = presentation.show_menu(&menu).await;
    candidates
        .get(choice)
        .map(|c| c.id.clone())
        .ok_or(BattleError::InvalidMenuChoice {
            choice,
            options: candidates.len(),
        })
}
