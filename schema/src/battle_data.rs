use serde::{Deserialize, Serialize};
use strum::Display;

/// The two sides of a battle.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display,
)]
#[strum(serialize_all = "lowercase")]
pub enum Team {
    Player,
    Enemy,
}

impl Team {
    pub fn opponent(self) -> Team {
        match self {
            Team::Player => Team::Enemy,
            Team::Enemy => Team::Player,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum StatusKind {
    /// Heals the holder a little after each of its turns.
    Saucy,
    /// One turn in three, the holder flops over instead of acting.
    Clumsy,
}

/// A status condition with the number of the holder's own turns it has left.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    pub kind: StatusKind,
    pub expires_in: u8,
}

impl Status {
    pub fn new(kind: StatusKind, expires_in: u8) -> Self {
        Self { kind, expires_in }
    }
}

/// Who an action lands on when chosen from a menu.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetType {
    /// The caster itself.
    Friendly,
    /// The opposing active combatant.
    #[default]
    Enemy,
}
