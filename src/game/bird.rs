use crate::{
    constants::game::{BIRD_ANIMATION_FRAMES, CLIMB_ROTATION_DEG, DIVE_ROTATION_DEG},
    game::{
        object::{Bounds, Object},
        params::SimulationConfig,
    },
};

#[derive(Debug, Clone, PartialEq)]
pub struct Bird {
    x: f32,
    y: f32,
    velocity: f32,
    /// Degrees, positive is nose down.
    rotation: f32,
    frame: usize,
    radius_x: f32,
    radius_y: f32,
    grounded: bool,
}

impl Bird {
    pub fn new(config: &SimulationConfig) -> Self {
        Bird {
            x: config.bird_x,
            y: config.bird_y,
            velocity: 0.0,
            rotation: 0.0,
            frame: 0,
            radius_x: config.radius_x,
            radius_y: config.radius_y,
            grounded: false,
        }
    }

    pub fn reset(&mut self, config: &SimulationConfig) {
        *self = Bird::new(config);
    }

    /// Re-derives sizes and moves the bird back to its start column.
    pub fn resize(&mut self, config: &SimulationConfig) {
        self.x = config.bird_x;
        self.y = config.bird_y;
        self.radius_x = config.radius_x;
        self.radius_y = config.radius_y;
        self.grounded = false;
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn radius_x(&self) -> f32 {
        self.radius_x
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    /// Leading edge used by the scoring test.
    pub fn left(&self) -> f32 {
        self.x - self.radius_x
    }

    pub fn flap(&mut self, jump: f32) {
        self.velocity = -jump;
    }

    pub fn animate(&mut self, frames: u64, period: u64) {
        if frames % period == 0 {
            self.frame = (self.frame + 1) % BIRD_ANIMATION_FRAMES;
        }
    }

    /// Pins the bird to its resting height with a level attitude.
    pub fn hold(&mut self, config: &SimulationConfig) {
        self.y = config.bird_y;
        self.rotation = 0.0;
    }

    pub fn apply_gravity(&mut self, gravity: f32) {
        self.velocity += gravity;
        self.y += self.velocity;
    }

    pub fn tilt(&mut self, jump: f32) {
        if self.velocity >= jump {
            self.rotation = DIVE_ROTATION_DEG;
            self.frame = 0;
        } else {
            self.rotation = CLIMB_ROTATION_DEG;
        }
    }

    pub fn on_ground(&self, config: &SimulationConfig) -> bool {
        self.y + config.bird_height / 2.0 >= config.foreground_y
    }

    /// Clamps the bird onto the foreground; returns whether it touched it.
    pub fn land(&mut self, config: &SimulationConfig) -> bool {
        if self.on_ground(config) {
            self.y = config.foreground_y - config.bird_height / 2.0;
            self.grounded = true;
            true
        } else {
            false
        }
    }
}

impl Object for Bird {
    fn bounds(&self) -> Bounds {
        Bounds::around(self.x, self.y, self.radius_x, self.radius_y)
    }
}
