//! Game module - Core game logic and state management

mod camera;
mod config;
mod events;
mod messages;
mod state;

pub use camera::{camera_for, render_viewport, VIEWPORT_SIZE};
pub use config::GameConfig;
pub use events::{EventBus, GameEvent, GameObserver};
pub use messages::{GameMessage, MessageCategory, MessageLog, MAX_MESSAGES};
pub use state::{Game, GameMode};
