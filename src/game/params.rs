use crate::constants::game::*;

/// Every size-derived simulation value, recomputed from scratch on resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    pub width: f32,
    pub height: f32,
    pub gravity: f32,
    pub jump: f32,
    pub bird_x: f32,
    pub bird_y: f32,
    pub bird_width: f32,
    pub bird_height: f32,
    pub radius_x: f32,
    pub radius_y: f32,
    pub pipe_width: f32,
    pub pipe_height: f32,
    pub pipe_gap: f32,
    pub pipe_speed: f32,
    /// Negative: pipes are lifted by `[max_offset, 2 * max_offset]`.
    pub pipe_max_offset: f32,
    pub spawn_interval: u64,
    pub foreground_y: f32,
    pub foreground_width: f32,
    pub foreground_speed: f32,
}

impl SimulationConfig {
    pub fn from_viewport(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            gravity: height * GRAVITY_H,
            jump: height * JUMP_H,
            bird_x: width * BIRD_X_W,
            bird_y: height * BIRD_Y_H,
            bird_width: width * BIRD_WIDTH_W,
            bird_height: height * BIRD_HEIGHT_H,
            radius_x: width * BIRD_RADIUS_X_W,
            radius_y: height * BIRD_RADIUS_Y_H,
            pipe_width: width * PIPE_WIDTH_W,
            pipe_height: height * PIPE_HEIGHT_H,
            pipe_gap: height * PIPE_GAP_H,
            pipe_speed: width * PIPE_SPEED_W,
            pipe_max_offset: height * PIPE_MAX_OFFSET_H,
            spawn_interval: PIPE_SPAWN_INTERVAL,
            foreground_y: height * FOREGROUND_Y_H,
            foreground_width: width * FOREGROUND_WIDTH_W,
            foreground_speed: width * PIPE_SPEED_W,
        }
    }
}
