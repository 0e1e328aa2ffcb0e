//! Synthesized cue voices, rendered once into mono sample buffers.

use fundsp::prelude64::*;

use crate::game::Sound;

pub const SAMPLE_RATE: u32 = 44_100;

/// Linear move from `from` to `to` over `length` seconds, then held.
fn sweep(from: f64, to: f64, t: f64, length: f64) -> f64 {
    from + (to - from) * (t / length).min(1.0)
}

/// Linear fade from `level` to silence over `length` seconds.
fn fade(level: f64, t: f64, length: f64) -> f64 {
    level * (1.0 - t / length).max(0.0)
}

/// Voice length in seconds.
pub fn duration(sound: Sound) -> f64 {
    match sound {
        Sound::Flap => 0.12,
        Sound::Hit => 0.15,
        Sound::Die => 0.5,
        Sound::Point => 0.3,
        Sound::Swoosh => 0.25,
    }
}

/// Renders the cue at [`SAMPLE_RATE`], scaled by `volume`.
pub fn render(sound: Sound, volume: f32) -> Vec<f32> {
    let seconds = duration(sound);
    match sound {
        // short rising chirp
        Sound::Flap => sample(
            (lfo(|t: f64| sweep(520.0, 880.0, t, 0.08)) >> sine()) * lfo(|t: f64| fade(0.25, t, 0.12)),
            seconds,
            volume,
        ),
        Sound::Hit => sample(
            noise() * lfo(|t: f64| 0.3 * (-t * 30.0).exp())
                + (lfo(|_t: f64| 90.0) >> sine()) * lfo(|t: f64| fade(0.3, t, 0.15)),
            seconds,
            volume,
        ),
        // falling sawtooth
        Sound::Die => sample(
            (lfo(|t: f64| sweep(400.0, 80.0, t, 0.4)) >> saw()) * lfo(|t: f64| sweep(0.15, 0.0, t, 0.5)),
            seconds,
            volume,
        ),
        // two-tone coin
        Sound::Point => sample(
            (lfo(|t: f64| if t < 0.07 { 988.0 } else { 1319.0 }) >> square()) * lfo(|t: f64| fade(0.15, t, 0.3)),
            seconds,
            volume,
        ),
        Sound::Swoosh => sample(
            noise() * lfo(|t: f64| 0.2 * (t / 0.25 * std::f64::consts::PI).sin().max(0.0))
                + (lfo(|t: f64| sweep(300.0, 1200.0, t, 0.25)) >> sine()) * lfo(|t: f64| fade(0.05, t, 0.25)),
            seconds,
            volume,
        ),
    }
}

fn sample(mut voice: impl AudioUnit, seconds: f64, volume: f32) -> Vec<f32> {
    voice.set_sample_rate(SAMPLE_RATE as f64);
    let length = (seconds * SAMPLE_RATE as f64) as usize;
    (0..length).map(|_| (voice.get_mono() * volume).clamp(-1.0, 1.0)).collect()
}
