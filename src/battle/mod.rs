pub mod ai;
pub mod animations;
pub mod combatant;
pub mod dispatcher;
pub mod events;
pub mod menus;
pub mod presentation;
pub mod rng;
pub mod runner;
pub mod state;
pub mod team;
pub mod turn_cycle;

#[cfg(test)]
mod tests;
