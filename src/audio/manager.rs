//! Audio manager using Kira
//!
//! Kira's manager stays on its own thread; the game talks to it through a
//! channel so the sink itself can be sent between threads.

use std::collections::HashMap;
use std::path::Path;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use kira::{
    manager::{backend::DefaultBackend, AudioManager as KiraManager, AudioManagerSettings},
    sound::static_sound::{StaticSoundData, StaticSoundHandle, StaticSoundSettings},
    tween::Tween,
    Volume,
};

use super::sink::AudioSink;
use super::sounds::{MusicTrack, SoundId};

/// Default SFX volume multiplier
const SFX_VOLUME: f64 = 0.7;
/// Default music volume multiplier
const MUSIC_VOLUME: f64 = 0.5;

enum AudioCommand {
    Play(SoundId),
    Music(MusicTrack),
}

/// Sink that plays cues through kira
pub struct AudioManager {
    sender: Option<Sender<AudioCommand>>,
}

impl AudioManager {
    /// Start the audio thread; audio is silently disabled if it cannot start
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        let spawned = thread::Builder::new()
            .name("vlkava-audio".to_string())
            .spawn(move || run_audio_thread(receiver));

        match spawned {
            Ok(_) => Self { sender: Some(sender) },
            Err(e) => {
                log::warn!("Failed to start audio thread: {}. Audio disabled.", e);
                Self { sender: None }
            }
        }
    }

    fn send(&self, command: AudioCommand) {
        if let Some(sender) = &self.sender {
            // The thread is gone if the backend failed; nothing to do then
            let _ = sender.send(command);
        }
    }
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioSink for AudioManager {
    fn play(&mut self, sound: SoundId) {
        self.send(AudioCommand::Play(sound));
    }

    fn music(&mut self, track: MusicTrack) {
        self.send(AudioCommand::Music(track));
    }
}

struct Playback {
    manager: KiraManager,
    sounds: HashMap<SoundId, StaticSoundData>,
    current_music: Option<(MusicTrack, StaticSoundHandle)>,
}

fn run_audio_thread(receiver: Receiver<AudioCommand>) {
    let manager = match KiraManager::<DefaultBackend>::new(AudioManagerSettings::default()) {
        Ok(m) => {
            log::info!("Audio manager initialized successfully");
            m
        }
        Err(e) => {
            log::warn!("Failed to initialize audio manager: {}. Audio disabled.", e);
            return;
        }
    };

    let mut playback = Playback {
        manager,
        sounds: HashMap::new(),
        current_music: None,
    };
    for sound in SoundId::ALL {
        if let Err(e) = playback.load_sound(sound) {
            log::debug!("Could not preload sound {:?}: {}", sound, e);
        }
    }

    while let Ok(command) = receiver.recv() {
        match command {
            AudioCommand::Play(sound) => playback.play(sound),
            AudioCommand::Music(track) => playback.switch_music(track),
        }
    }
}

impl Playback {
    fn load_sound(&mut self, sound: SoundId) -> Result<(), String> {
        if self.sounds.contains_key(&sound) {
            return Ok(());
        }
        let data = load_file(sound.file_path())?;
        self.sounds.insert(sound, data);
        Ok(())
    }

    fn play(&mut self, sound: SoundId) {
        if let Err(e) = self.load_sound(sound) {
            log::debug!("Cannot play sound {:?}: {}", sound, e);
            return;
        }
        let Some(data) = self.sounds.get(&sound).cloned() else {
            return;
        };

        let volume = sound.default_volume() * SFX_VOLUME;
        let settings = StaticSoundSettings::new().volume(Volume::Amplitude(volume));
        if let Err(e) = self.manager.play(data.with_settings(settings)) {
            log::debug!("Failed to play sound {:?}: {:?}", sound, e);
        }
    }

    fn switch_music(&mut self, track: MusicTrack) {
        if matches!(&self.current_music, Some((playing, _)) if *playing == track) {
            return;
        }
        if let Some((_, mut handle)) = self.current_music.take() {
            let _ = handle.stop(Tween::default());
        }

        let data = match load_file(track.file_path()) {
            Ok(data) => data,
            Err(e) => {
                log::debug!("Cannot play music {:?}: {}", track, e);
                return;
            }
        };
        let settings = StaticSoundSettings::new()
            .volume(Volume::Amplitude(MUSIC_VOLUME))
            .loop_region(..);
        match self.manager.play(data.with_settings(settings)) {
            Ok(handle) => self.current_music = Some((track, handle)),
            Err(e) => log::debug!("Failed to play music {:?}: {:?}", track, e),
        }
    }
}

fn load_file(path: &str) -> Result<StaticSoundData, String> {
    if !Path::new(path).exists() {
        return Err(format!("Sound file not found: {}", path));
    }
    StaticSoundData::from_file(path).map_err(|e| format!("Failed to load sound {}: {:?}", path, e))
}
