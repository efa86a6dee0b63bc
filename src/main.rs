//! Vlkava - Entry Point
//!
//! Runs a headless autoplay session: the bot picks a class, wanders the
//! dungeon and fights whatever it meets, then prints the final view.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use vlkava::entities::CharacterClass;
use vlkava::game::{Game, GameConfig, GameMode};
use vlkava::items::ItemKind;

/// Share of max health under which the bot drinks a potion
const POTION_THRESHOLD: f64 = 0.3;

/// Headless autoplay for the Vlkava Dungeons core
#[derive(Parser)]
#[command(name = "vlkava")]
#[command(about = "Play a seeded Vlkava Dungeons run without a front-end", long_about = None)]
#[command(version)]
struct Cli {
    /// Run seed; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Character class to play: warrior, mage or tank
    #[arg(long, default_value = "warrior")]
    class: CharacterClass,

    /// Number of bot actions before stopping
    #[arg(long, default_value_t = 500)]
    steps: u32,

    /// Directory with RON content overrides
    #[arg(long, default_value = "assets/data")]
    data_dir: PathBuf,

    /// Where meta progression and the codex are stored
    #[arg(long)]
    storage_dir: Option<PathBuf>,

    /// Keep meta progression and the codex in memory only
    #[arg(long)]
    no_save: bool,

    /// Log filter, e.g. `debug` or `vlkava=trace`
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_level.as_str()))
        .init();

    log::info!("Starting Vlkava v{}", env!("CARGO_PKG_VERSION"));

    let config = GameConfig {
        seed: cli.seed,
        storage_dir: cli.storage_dir.clone(),
        persist: !cli.no_save,
        data_dir: cli.data_dir.clone(),
        audio_enabled: false,
    };
    let mut game = Game::new(config);
    if !game.select_class(cli.class) {
        bail!("could not start the run");
    }

    let mut bot_rng = StdRng::seed_from_u64(game.run_seed().wrapping_add(1));
    let mut taken = 0;
    while taken < cli.steps && game.mode() != GameMode::GameOver {
        step(&mut game, &mut bot_rng);
        taken += 1;
    }

    for row in game.render_view() {
        println!("{}", row);
    }
    println!();
    for message in game.messages().iter().rev().take(5).collect::<Vec<_>>().into_iter().rev() {
        println!("{}", message.text);
    }

    let player = game.player();
    println!(
        "\n{} level {} on dungeon level {} | HP {}/{} | {} gold | {} steps",
        player.class.name(),
        player.level,
        game.dungeon_level(),
        player.health,
        player.max_health,
        player.gold(),
        taken
    );
    log::info!(
        "Session finished in {:?} with score {}",
        game.mode(),
        vlkava::progression::score(player.level, player.experience)
    );
    Ok(())
}

/// One bot decision
fn step(game: &mut Game, rng: &mut StdRng) {
    match game.mode() {
        GameMode::Exploring => {
            let (dx, dy) = [(0, -1), (0, 1), (-1, 0), (1, 0)][rng.gen_range(0..4)];
            game.move_player(dx, dy);
        }
        GameMode::Combat => {
            let player = game.player();
            let low = (player.health as f64) < player.max_health as f64 * POTION_THRESHOLD;
            let potion = player
                .inventory
                .items_of_kind(ItemKind::Potion)
                .find(|p| p.health.is_some())
                .map(|p| p.id);
            match potion {
                Some(id) if low => {
                    game.use_item(id);
                }
                _ => {
                    game.attack();
                }
            }
        }
        GameMode::ChestOpen(_) => {
            game.take_chest_gold();
            let ids: Vec<u64> = game
                .chest_contents()
                .map(|c| c.items.iter().map(|i| i.id).collect())
                .unwrap_or_default();
            for id in ids {
                game.take_chest_item(id);
            }
            game.close_chest();
        }
        GameMode::Shop => {
            game.close_shop();
        }
        GameMode::WizardShop => {
            game.close_wizard_shop();
        }
        GameMode::ClassSelection | GameMode::GameOver => {}
    }
}
