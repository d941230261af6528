//! Terminal battle demo.
//!
//! ```text
//! pizza-legends [ENEMY_ID] [--auto] [--seed N] [--data DIR] [--config FILE]
//! ```
//!
//! Plays the starter roster against an enemy and prints the player state
//! afterwards as JSON. With `--auto` the player's menus are answered at
//! random and nothing waits.

use async_trait::async_trait;
use clap::Parser;
use pizza_legends::battle::animations::AnimationRequest;
use pizza_legends::battle::presentation::{Menu, Presentation};
use pizza_legends::battle::rng::BattleRng;
use pizza_legends::battle::state::CombatantView;
use pizza_legends::battle::team::TeamView;
use pizza_legends::{run_battle, BattleConfig, Catalog, PlayerState};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing_subscriber::EnvFilter;

/// Play the starter roster against an enemy from the catalog
#[derive(Parser, Debug)]
#[command(name = "pizza-legends")]
#[command(about = "Pizza Legends battle demo", long_about = None)]
#[command(version)]
struct Args {
    /// Enemy to battle (e.g., erio, beth)
    #[arg(value_name = "ENEMY_ID", default_value = "erio")]
    enemy_id: String,

    /// Answer the player's menus at random and skip all waiting
    #[arg(long)]
    auto: bool,

    /// Seed for the battle rng, for a replayable battle
    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    /// Load actions, pizzas and enemies from this directory instead of the built-in data
    #[arg(long, value_name = "DIR")]
    data: Option<PathBuf>,

    /// RON file with battle pacing settings
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

/// `RUST_LOG` when set, otherwise warnings only.
fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Draws the battle as plain lines and reads menu choices from stdin.
struct TerminalPresentation {
    input: Lines<BufReader<Stdin>>,
}

impl TerminalPresentation {
    fn new() -> Self {
        Self {
            input: BufReader::new(tokio::io::stdin()).lines(),
        }
    }
}

fn print_menu(menu: &Menu) {
    println!("-- {} --", menu.title);
    for (index, option) in menu.options.iter().enumerate() {
        let marker = if option.disabled { " (unavailable)" } else { "" };
        println!("  {}) {}{}  {}", index + 1, option.label, marker, option.description);
    }
}

fn print_combatant(view: &CombatantView) {
    if !view.active {
        return;
    }
    let status = view.status.map(|s| format!(" [{}]", s.kind)).unwrap_or_default();
    println!(
        "   {} {} Lv{} HP {:.0}% XP {:.0}%{}",
        view.team, view.name, view.level, view.hp_percent, view.xp_percent, status
    );
}

#[async_trait]
impl Presentation for TerminalPresentation {
    async fn show_message(&mut self, text: &str) {
        println!("{}", text);
    }

    async fn show_menu(&mut self, menu: &Menu) -> usize {
        loop {
            print_menu(menu);
            match self.input.next_line().await {
                Ok(Some(line)) => match line.trim().parse::<usize>() {
                    Ok(n) if (1..=menu.options.len()).contains(&n) => return n - 1,
                    _ => println!("Pick a number between 1 and {}", menu.options.len()),
                },
                // Closed stdin: fall back to the first option so the battle can finish.
                Ok(None) | Err(_) => return 0,
            }
        }
    }

    async fn play_animation(&mut self, request: &AnimationRequest) {
        tracing::debug!(animation = %request.animation, caster = %request.caster, "animation");
    }

    async fn update_combatant_display(&mut self, view: &CombatantView) {
        print_combatant(view);
    }

    async fn update_team_display(&mut self, view: &TeamView) {
        tracing::debug!(team = %view.team, alive = view.alive_count(), "team display");
    }

    async fn teardown(&mut self) {
        println!("-- battle over --");
    }
}

/// Answers every menu with a random enabled option other than Back.
struct AutoPresentation {
    rng: StdRng,
}

#[async_trait]
impl Presentation for AutoPresentation {
    async fn show_message(&mut self, text: &str) {
        println!("{}", text);
    }

    async fn show_menu(&mut self, menu: &Menu) -> usize {
        let usable: Vec<usize> = menu
            .options
            .iter()
            .enumerate()
            .filter(|(_, option)| !option.disabled && option.label != "Back")
            .map(|(index, _)| index)
            .collect();
        if usable.is_empty() {
            return 0;
        }
        usable[self.rng.random_range(0..usable.len())]
    }

    async fn play_animation(&mut self, _request: &AnimationRequest) {}

    async fn update_combatant_display(&mut self, _view: &CombatantView) {}

    async fn update_team_display(&mut self, _view: &TeamView) {}

    async fn teardown(&mut self) {}
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let catalog = match &args.data {
        Some(dir) => Catalog::load(dir)?,
        None => Catalog::builtin()?,
    };

    let config = match (&args.config, args.auto) {
        (Some(path), _) => BattleConfig::load(path)?,
        (None, true) => BattleConfig::instant(),
        (None, false) => BattleConfig::default(),
    };

    let rng = match args.seed {
        Some(seed) => BattleRng::seeded(seed),
        None => BattleRng::new_random(),
    };
    if let Some(seed) = rng.seed() {
        tracing::info!(seed, "battle rng seeded");
    }

    let mut player = PlayerState::starter()?;
    let mut presentation: Box<dyn Presentation> = if args.auto {
        Box::new(AutoPresentation {
            rng: StdRng::seed_from_u64(args.seed.unwrap_or_else(rand::random)),
        })
    } else {
        Box::new(TerminalPresentation::new())
    };

    let outcome = run_battle(
        &catalog,
        &mut player,
        &args.enemy_id,
        presentation.as_mut(),
        config,
        rng,
    )
    .await?;

    println!("{}", outcome);
    println!("{}", serde_json::to_string_pretty(&player)?);
    Ok(())
}
