use crate::battle::events::BattleEvent;
use schema::{ActionId, PizzaId, Team};
use thiserror::Error;

/// Main error type for the battle engine
#[derive(Debug, Error)]
pub enum BattleError {
    /// Error while loading or resolving static catalog data
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// A combatant id was referenced that is not part of this battle
    #[error("unknown combatant: {0}")]
    UnknownCombatant(String),

    /// A team has no active combatant when one was expected
    #[error("no active combatant for the {0} team")]
    NoActiveCombatant(Team),

    /// The player's lineup contains nobody to send out
    #[error("the player lineup is empty")]
    EmptyLineup,

    /// The enemy template has no pizzas
    #[error("enemy '{0}' has no pizzas")]
    EmptyEnemyTeam(String),

    /// A replacement was requested but nobody on the team can still fight
    #[error("no replacement available for the {0} team")]
    NoReplacementAvailable(Team),

    /// A combatant was asked to act but knows no actions
    #[error("combatant '{0}' has no actions")]
    NoActions(String),

    /// An event needed a caster or target its context did not carry
    #[error("event context is missing a {0}")]
    MissingContext(&'static str),

    /// The presentation answered a menu with an index it was never offered
    #[error("menu choice {choice} is out of range for {options} options")]
    InvalidMenuChoice { choice: usize, options: usize },

    /// An event resolved with a value its caller cannot use
    #[error("event resolved with an unexpected outcome: {event:?}")]
    UnexpectedOutcome { event: Box<BattleEvent> },
}

/// Errors raised while loading or cross-checking catalog data
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {what}")]
    Parse {
        what: &'static str,
        #[source]
        source: ron::error::SpannedError,
    },

    #[error("action not found: {0}")]
    ActionNotFound(ActionId),

    #[error("pizza not found: {0}")]
    PizzaNotFound(PizzaId),

    #[error("enemy not found: {0}")]
    EnemyNotFound(String),

    #[error("enemy '{0}' has no pizzas")]
    EmptyEnemy(String),

    #[error("pizza '{pizza}' references unknown action '{action}'")]
    DanglingAction { pizza: PizzaId, action: ActionId },

    #[error("enemy '{enemy}' references unknown pizza '{pizza}'")]
    DanglingPizza { enemy: String, pizza: PizzaId },
}

/// Errors raised while loading a battle config file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse battle config")]
    Parse(#[from] ron::error::SpannedError),
}

/// Errors from roster and lineup management
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlayerStateError {
    #[error("no pizza with id '{0}' in the roster")]
    UnknownPizza(String),

    #[error("pizza '{0}' is not in the lineup")]
    NotInLineup(String),

    #[error("pizza '{0}' is already in the lineup")]
    AlreadyInLineup(String),
}

/// Type alias for Results using BattleError
pub type BattleResult<T> = Result<T, BattleError>;

/// Type alias for Results using CatalogError
pub type CatalogResult<T> = Result<T, CatalogError>;

pub type ConfigResult<T> = Result<T, ConfigError>;
