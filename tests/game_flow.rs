//! End-to-end runs through the public `Game` API

use std::sync::{Arc, Mutex};

use tempfile::TempDir;

use vlkava::audio::{AudioCue, MusicTrack, RecordingSink};
use vlkava::entities::{Attribute, CharacterClass};
use vlkava::game::{Game, GameConfig, GameEvent, GameMode};
use vlkava::save::{Codex, MetaStore};
use vlkava::world::Position;

fn start(seed: u64, class: CharacterClass) -> Game {
    let mut game = Game::new(GameConfig::ephemeral(seed));
    assert!(game.select_class(class));
    game
}

/// Walk into every direction until something other than exploring happens
fn wander(game: &mut Game, steps: usize) {
    let dirs = [(1, 0), (0, 1), (-1, 0), (0, -1)];
    for i in 0..steps {
        if game.mode() != GameMode::Exploring {
            return;
        }
        let (dx, dy) = dirs[(i / 3) % 4];
        game.move_player(dx, dy);
    }
}

#[test]
fn fog_of_war_only_grows() {
    let mut game = start(21, CharacterClass::Warrior);
    let count = |g: &Game| g.map().tiles.iter().filter(|t| t.explored).count();
    let mut explored = count(&game);
    assert!(explored > 0);

    for _ in 0..40 {
        wander(&mut game, 1);
        if game.mode() != GameMode::Exploring {
            break;
        }
        let now = count(&game);
        assert!(now >= explored);
        explored = now;

        let player = game.player().position;
        for pos in game.visible() {
            assert!(pos.distance_squared(&player) <= 25);
        }
    }
}

#[test]
fn camera_follows_player_inside_map() {
    let game = start(22, CharacterClass::Mage);
    let camera = game.camera();
    let player = game.player().position;
    assert!(camera.x >= 0 && camera.y >= 0);
    assert!(camera.x <= game.map().width - 15);
    assert!(camera.y <= game.map().height - 15);
    assert!(player.x >= camera.x && player.x < camera.x + 15);
    assert!(player.y >= camera.y && player.y < camera.y + 15);
}

#[test]
fn same_seed_replays_the_same_run() {
    let mut a = start(23, CharacterClass::Tank);
    let mut b = start(23, CharacterClass::Tank);
    assert_eq!(a.map().to_ascii(), b.map().to_ascii());

    for _ in 0..30 {
        wander(&mut a, 1);
        wander(&mut b, 1);
    }
    assert_eq!(a.player().position, b.player().position);
    assert_eq!(a.mode(), b.mode());
}

#[test]
fn restart_blocks_movement_until_a_class_is_picked() {
    let mut game = start(24, CharacterClass::Warrior);
    assert!(game.go_to_next_level());
    assert_eq!(game.dungeon_level(), 2);

    game.restart();
    assert_eq!(game.mode(), GameMode::ClassSelection);
    assert_eq!(game.dungeon_level(), 1);
    let start: Position = game.player().position;
    assert!(!game.move_player(1, 0));
    assert!(!game.go_to_next_level());
    assert_eq!(game.player().position, start);

    assert!(game.select_class(CharacterClass::Mage));
    assert_eq!(game.player().class, CharacterClass::Mage);
}

#[test]
fn music_switches_with_combat() {
    let sink = RecordingSink::new();
    let mut game = Game::with_audio(GameConfig::ephemeral(25), Box::new(sink.clone()));
    game.select_class(CharacterClass::Warrior);
    assert_eq!(sink.cues(), vec![AudioCue::Music(MusicTrack::Background)]);

    for _ in 0..2_000 {
        match game.mode() {
            GameMode::Exploring => wander(&mut game, 12),
            GameMode::Combat => {
                assert!(sink.cues().contains(&AudioCue::Music(MusicTrack::Battle)));
                return;
            }
            GameMode::Shop => {
                game.close_shop();
                game.move_player(1, 0);
            }
            GameMode::WizardShop => {
                game.close_wizard_shop();
                game.move_player(1, 0);
            }
            GameMode::ChestOpen(_) => {
                game.take_chest_gold();
                game.close_chest();
            }
            GameMode::ClassSelection | GameMode::GameOver => return,
        }
    }
}

#[test]
fn meta_progress_survives_restart_of_the_process() {
    let dir = TempDir::new().unwrap();
    let config = GameConfig::ephemeral(26).with_storage_dir(dir.path());

    let events = Arc::new(Mutex::new(Vec::new()));
    {
        let mut game = Game::new(config.clone());
        let sink = Arc::clone(&events);
        game.subscribe(move |e: &GameEvent| sink.lock().unwrap().push(*e));
        game.select_class(CharacterClass::Warrior);

        // Fight until the run ends or the step budget runs out
        for _ in 0..20_000 {
            match game.mode() {
                GameMode::GameOver => break,
                GameMode::Combat => {
                    game.attack();
                }
                GameMode::Exploring => wander(&mut game, 8),
                GameMode::Shop => {
                    game.close_shop();
                }
                GameMode::WizardShop => {
                    game.close_wizard_shop();
                }
                GameMode::ChestOpen(_) => {
                    game.close_chest();
                }
                GameMode::ClassSelection => break,
            }
        }
        assert!(game.codex().progress().0 > 0);
    }

    let meta = MetaStore::open(dir.path());
    let over: Vec<u32> = events
        .lock()
        .unwrap()
        .iter()
        .filter_map(|e| match e {
            GameEvent::GameOver { score } => Some(*score),
            _ => None,
        })
        .collect();
    if let Some(score) = over.first() {
        assert_eq!(meta.max_score(), *score);
        assert_eq!(meta.skill_points(), score / 100);
    }

    let game = Game::new(config);
    let codex = Codex::open(dir.path(), game.content());
    assert!(codex.is_discovered("location-floor"));
}

#[test]
fn purchased_upgrades_apply_to_the_next_class() {
    let dir = TempDir::new().unwrap();
    {
        let mut meta = MetaStore::open(dir.path());
        meta.record_game_over(300);
        assert!(meta.purchase_upgrade(Attribute::Health));
        assert!(meta.purchase_upgrade(Attribute::CriticalHit));
    }

    let mut game = Game::new(GameConfig::ephemeral(27).with_storage_dir(dir.path()));
    assert_eq!(game.meta().skill_points(), 1);
    assert!(game.purchase_upgrade(Attribute::Attack));
    assert!(!game.purchase_upgrade(Attribute::Attack));

    game.select_class(CharacterClass::Warrior);
    let player = game.player();
    assert_eq!(player.max_health, 70);
    assert_eq!(player.health, 70);
    assert_eq!(player.base.attack, 8);
    assert_eq!(player.base.critical_hit, 7);
}

#[test]
fn messages_are_capped() {
    let mut game = start(28, CharacterClass::Mage);
    for _ in 0..300 {
        wander(&mut game, 1);
        if game.mode() != GameMode::Exploring {
            break;
        }
    }
    assert!(game.messages().len() <= 100);
}
