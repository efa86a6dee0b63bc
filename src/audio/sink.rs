//! Audio sinks
//!
//! The game only names the cue it wants; a sink decides what to do with it.

use std::sync::{Arc, Mutex};

use super::sounds::{MusicTrack, SoundId};

/// Fire-and-forget receiver of audio cues
pub trait AudioSink: Send {
    /// Play a one-shot effect
    fn play(&mut self, sound: SoundId);

    /// Switch the looping music track
    fn music(&mut self, track: MusicTrack);
}

/// Sink that only writes cues to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl AudioSink for LogSink {
    fn play(&mut self, sound: SoundId) {
        log::trace!("sound: {}", sound.name());
    }

    fn music(&mut self, track: MusicTrack) {
        log::debug!("music: {}", track.name());
    }
}

/// A cue as recorded by [`RecordingSink`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    Sound(SoundId),
    Music(MusicTrack),
}

/// Sink that keeps every cue in a shared list, for tests and replays
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    cues: Arc<Mutex<Vec<AudioCue>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every cue received so far
    pub fn cues(&self) -> Vec<AudioCue> {
        self.cues.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn push(&self, cue: AudioCue) {
        if let Ok(mut cues) = self.cues.lock() {
            cues.push(cue);
        }
    }
}

impl AudioSink for RecordingSink {
    fn play(&mut self, sound: SoundId) {
        self.push(AudioCue::Sound(sound));
    }

    fn music(&mut self, track: MusicTrack) {
        self.push(AudioCue::Music(track));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_sink_shares_cues() {
        let recorder = RecordingSink::new();
        let mut sink: Box<dyn AudioSink> = Box::new(recorder.clone());
        sink.play(SoundId::Attack);
        sink.music(MusicTrack::Battle);

        assert_eq!(
            recorder.cues(),
            vec![AudioCue::Sound(SoundId::Attack), AudioCue::Music(MusicTrack::Battle)]
        );
    }
}
