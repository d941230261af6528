use crate::battle::combatant::CombatantId;
use crate::battle::state::BattleSession;
use schema::Team;

/// A named side of the battle, used to build the row of team icons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleTeam {
    pub team: Team,
    pub name: String,
}

/// One icon in a team row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamMemberView {
    pub id: CombatantId,
    pub active: bool,
    pub fainted: bool,
}

/// Snapshot of a team for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamView {
    pub team: Team,
    pub name: String,
    pub members: Vec<TeamMemberView>,
}

impl TeamView {
    pub fn alive_count(&self) -> usize {
        self.members.iter().filter(|m| !m.fainted).count()
    }
}

impl BattleTeam {
    pub fn new(team: Team, name: impl Into<String>) -> Self {
        Self {
            team,
            name: name.into(),
        }
    }

    pub fn view(&self, session: &BattleSession) -> TeamView {
        let members = session
            .combatants()
            .filter(|c| c.team == self.team)
            .map(|c| TeamMemberView {
                id: c.id.clone(),
                active: session.is_active(&c.id),
                fainted: c.is_fainted(),
            })
            .collect();

        TeamView {
            team: self.team,
            name: self.name.clone(),
            members,
        }
    }
}
