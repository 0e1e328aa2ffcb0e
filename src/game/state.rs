use serde::{Deserialize, Serialize};
use strum::Display;

#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum RunState {
    #[default]
    Home,
    GetReady,
    Playing,
    GameOver,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum Sound {
    Flap,
    Hit,
    Die,
    Point,
    Swoosh,
}

impl Sound {
    pub const ALL: [Sound; 5] = [Sound::Flap, Sound::Hit, Sound::Die, Sound::Point, Sound::Swoosh];
}

/// Notifications the presentation layer reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    Sound(Sound),
    /// A new best score was reached and should be persisted.
    BestScore(u32),
    StateChanged { from: RunState, to: RunState },
}
