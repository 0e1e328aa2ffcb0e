use std::time::Duration;

// Everything below is a ratio of the viewport width (`*_W`) or height (`*_H`).
pub const BIRD_X_W: f32 = 0.290;
pub const BIRD_Y_H: f32 = 0.395;
pub const BIRD_WIDTH_W: f32 = 0.117;
pub const BIRD_HEIGHT_H: f32 = 0.059;
pub const BIRD_RADIUS_X_W: f32 = 0.052;
pub const BIRD_RADIUS_Y_H: f32 = 0.026;

pub const GRAVITY_H: f32 = 0.0006;
pub const JUMP_H: f32 = 0.01;

pub const PIPE_WIDTH_W: f32 = 0.164;
pub const PIPE_HEIGHT_H: f32 = 0.888;
pub const PIPE_GAP_H: f32 = 0.177;
pub const PIPE_MAX_OFFSET_H: f32 = -0.350;
pub const PIPE_SPEED_W: f32 = 0.007;

pub const FOREGROUND_Y_H: f32 = 0.861;
pub const FOREGROUND_WIDTH_W: f32 = 0.7;

/// Frames between two pipe spawns.
pub const PIPE_SPAWN_INTERVAL: u64 = 80;
pub const PIPE_WINDOW_CAPACITY: usize = 6;
pub const PIPE_WINDOW_EVICT: usize = 2;

pub const BIRD_ANIMATION_FRAMES: usize = 3;
pub const GET_READY_FLAP_PERIOD: u64 = 6;
pub const PLAYING_FLAP_PERIOD: u64 = 4;

pub const DIVE_ROTATION_DEG: f32 = 90.0;
pub const CLIMB_ROTATION_DEG: f32 = -25.0;

pub const DIE_DELAY: Duration = Duration::from_millis(500);

pub const BRONZE_SCORE: u32 = 10;
pub const SILVER_SCORE: u32 = 20;
pub const GOLD_SCORE: u32 = 30;
pub const PLATINUM_SCORE: u32 = 40;
