mod voices;

use std::{
    collections::{HashMap, HashSet},
    io::Write,
};

use color_eyre::eyre::Result;
use rodio::{buffer::SamplesBuffer, OutputStream, OutputStreamHandle, Sink};
use tracing::trace;

pub use self::voices::SAMPLE_RATE;
use crate::{config::AudioConfig, game::Sound};

const BELL: &[u8] = b"\x07";

/// What [`SoundPlayer::play`] did with a cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Playback {
    Voice,
    Bell,
    Muted,
    Silent,
}

struct Speaker {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    /// One sink per cue. Replacing it drops, and so stops, the previous instance.
    sinks: HashMap<Sound, Sink>,
}

impl Speaker {
    fn open() -> Result<Self> {
        let (stream, handle) = OutputStream::try_default()?;
        Ok(Speaker { _stream: stream, handle, sinks: HashMap::new() })
    }

    fn play(&mut self, sound: Sound, samples: &[f32]) -> Result<()> {
        let sink = Sink::try_new(&self.handle)?;
        sink.append(SamplesBuffer::new(1, SAMPLE_RATE, samples.to_vec()));
        self.sinks.insert(sound, sink);
        Ok(())
    }
}

enum Output {
    Speaker(Speaker),
    /// No device could be opened; only these cues ring the terminal bell.
    Bell(HashSet<Sound>),
}

/// Plays game sound cues. Each cue has its own synthesized voice; a cue
/// started again while still sounding restarts from the beginning.
pub struct SoundPlayer {
    muted: bool,
    voices: HashMap<Sound, Vec<f32>>,
    output: Output,
}

impl SoundPlayer {
    pub fn new(config: &AudioConfig) -> Self {
        let output = match Speaker::open() {
            Ok(speaker) => Output::Speaker(speaker),
            Err(e) => {
                log::warn!("No audio output, falling back to the terminal bell: {e}");
                Output::Bell(config.bell().iter().copied().collect())
            },
        };
        Self::with_output(config, output)
    }

    fn with_output(config: &AudioConfig, output: Output) -> Self {
        let volume = config.volume();
        let voices = Sound::ALL.iter().map(|&sound| (sound, voices::render(sound, volume))).collect();
        SoundPlayer { muted: false, voices, output }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        log::info!("muted: {}", self.muted);
        self.muted
    }

    /// `bell` only receives output when no audio device is available.
    pub fn play<W: Write>(&mut self, sound: Sound, bell: &mut W) -> Result<Playback> {
        if self.muted {
            return Ok(Playback::Muted);
        }
        trace!("sound {sound}");
        match &mut self.output {
            Output::Speaker(speaker) => {
                let samples = self.voices.get(&sound).map(Vec::as_slice).unwrap_or_default();
                speaker.play(sound, samples)?;
                Ok(Playback::Voice)
            },
            Output::Bell(cues) if cues.contains(&sound) => {
                bell.write_all(BELL)?;
                bell.flush()?;
                Ok(Playback::Bell)
            },
            Output::Bell(_) => Ok(Playback::Silent),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn config() -> AudioConfig {
        AudioConfig { volume: Some(0.6), bell: Some(vec![Sound::Hit, Sound::Die, Sound::Point]) }
    }

    fn bell_player() -> SoundPlayer {
        let config = config();
        SoundPlayer::with_output(&config, Output::Bell(config.bell().iter().copied().collect()))
    }

    #[test]
    fn test_every_cue_has_its_own_voice() {
        let player = bell_player();
        for (i, a) in Sound::ALL.iter().enumerate() {
            assert!(!player.voices[a].is_empty(), "{a} has no voice");
            for b in &Sound::ALL[i + 1..] {
                assert!(player.voices[a] != player.voices[b], "{a} and {b} share a voice");
            }
        }
    }

    #[test]
    fn test_volume_scales_voices() {
        let quiet = SoundPlayer::with_output(&AudioConfig { volume: Some(0.0), bell: None }, Output::Bell(HashSet::new()));
        assert!(quiet.voices[&Sound::Flap].iter().all(|s| *s == 0.0));
    }

    #[test]
    fn test_bell_fallback_rings_configured_cues() -> Result<()> {
        let mut player = bell_player();
        let mut out = Vec::new();
        assert_eq!(player.play(Sound::Hit, &mut out)?, Playback::Bell);
        assert_eq!(player.play(Sound::Die, &mut out)?, Playback::Bell);
        assert_eq!(player.play(Sound::Flap, &mut out)?, Playback::Silent);
        assert_eq!(out, [BELL, BELL].concat());
        Ok(())
    }

    #[test]
    fn test_muted_player_is_silent() -> Result<()> {
        let mut player = bell_player();
        assert!(player.toggle_mute());
        let mut out = Vec::new();
        assert_eq!(player.play(Sound::Point, &mut out)?, Playback::Muted);
        assert!(out.is_empty());

        assert!(!player.toggle_mute());
        assert_eq!(player.play(Sound::Point, &mut out)?, Playback::Bell);
        Ok(())
    }

    #[test]
    fn test_missing_bell_list_is_silent() -> Result<()> {
        let config = AudioConfig::default();
        let mut player = SoundPlayer::with_output(&config, Output::Bell(config.bell().iter().copied().collect()));
        let mut out = Vec::new();
        assert_eq!(player.play(Sound::Hit, &mut out)?, Playback::Silent);
        Ok(())
    }
}
