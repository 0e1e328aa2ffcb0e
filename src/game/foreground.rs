use crate::game::params::SimulationConfig;

/// Scrolling ground strip; purely visual, but it only moves with the simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct Foreground {
    x: f32,
    y: f32,
    width: f32,
    speed: f32,
}

impl Foreground {
    pub fn new(config: &SimulationConfig) -> Self {
        Foreground { x: 0.0, y: config.foreground_y, width: config.foreground_width, speed: config.foreground_speed }
    }

    pub fn resize(&mut self, config: &SimulationConfig) {
        *self = Foreground::new(config);
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn scroll(&mut self) {
        self.x = (self.x - self.speed) % (self.width / 2.0);
    }
}
