//! Audio system
//!
//! Symbolic sound and music cues, plus the sinks that receive them. Real
//! playback uses the Kira audio library behind the `audio` feature.

pub mod sink;
pub mod sounds;
#[cfg(feature = "audio")]
pub mod manager;

pub use sink::{AudioCue, AudioSink, LogSink, RecordingSink};
pub use sounds::{MusicTrack, SoundId};
#[cfg(feature = "audio")]
pub use manager::AudioManager;
