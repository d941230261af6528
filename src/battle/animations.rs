//! Named animation routines and how long the battle waits on each.

use crate::battle::combatant::Combatant;
use crate::battle::combatant::CombatantId;
use schema::{AnimationKind, Team};
use std::time::Duration;

/// Which way an animation travels across the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Player pizzas sit on the left and attack to the right.
    pub fn from_team(team: Team) -> Self {
        match team {
            Team::Player => Direction::Right,
            Team::Enemy => Direction::Left,
        }
    }
}

/// Everything a presentation needs to play one animation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationRequest {
    pub animation: AnimationKind,
    pub caster: CombatantId,
    pub target: Option<CombatantId>,
    pub direction: Direction,
    pub color: Option<String>,
    pub duration: Duration,
}

/// How long the battle waits before moving on. For `Spin` that is roughly
/// the moment the two pizzas collide, not the end of the motion.
pub fn duration_of(animation: AnimationKind) -> Duration {
    match animation {
        AnimationKind::Spin => Duration::from_millis(100),
        AnimationKind::Glob => Duration::from_millis(820),
    }
}

pub fn request(
    animation: AnimationKind,
    caster: &Combatant,
    target: Option<&Combatant>,
    color: Option<String>,
) -> AnimationRequest {
    AnimationRequest {
        animation,
        caster: caster.id.clone(),
        target: target.map(|t| t.id.clone()),
        direction: Direction::from_team(caster.team),
        color,
        duration: duration_of(animation),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::tests::common::TestCombatantBuilder;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_routine_durations() {
        assert_eq!(duration_of(AnimationKind::Spin), Duration::from_millis(100));
        assert_eq!(duration_of(AnimationKind::Glob), Duration::from_millis(820));
    }

    #[test]
    fn test_enemy_animations_travel_left() {
        let caster = TestCombatantBuilder::new("e_a", Team::Enemy).build();
        let target = TestCombatantBuilder::new("p1", Team::Player).build();

        let req = request(AnimationKind::Glob, &caster, Some(&target), Some("#BED643".to_string()));

        assert_eq!(req.direction, Direction::Left);
        assert_eq!(req.target.as_deref(), Some("p1"));
        assert_eq!(req.color.as_deref(), Some("#BED643"));
        assert_eq!(req.duration, Duration::from_millis(820));
    }
}
