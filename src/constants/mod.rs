pub mod game;
pub mod home;

/// Playfield aspect ratio (width / height) in simulation pixels.
pub const PLAYFIELD_ASPECT: f32 = 0.72;

pub const MIN_WIDTH: u16 = 24;
pub const MIN_HEIGHT: u16 = 16;

pub const BEST_SCORE_FILE: &str = "best_score";
