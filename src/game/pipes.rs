use std::collections::VecDeque;

use rand::Rng;
use strum::Display;

use crate::{
    constants::game::{PIPE_WINDOW_CAPACITY, PIPE_WINDOW_EVICT},
    game::{
        bird::Bird,
        object::{Bounds, Object},
        params::SimulationConfig,
    },
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pipe {
    pub x: f32,
    /// Top edge of the upper pipe; the gap opens at `y + pipe_height`.
    pub y: f32,
    pub scored: bool,
}

impl Pipe {
    pub fn new(x: f32, y: f32) -> Self {
        Pipe { x, y, scored: false }
    }

    pub fn top(&self, config: &SimulationConfig) -> Bounds {
        Bounds::new(self.x, self.y, config.pipe_width, config.pipe_height)
    }

    pub fn bottom_y(&self, config: &SimulationConfig) -> f32 {
        self.y + config.pipe_height + config.pipe_gap
    }

    pub fn bottom(&self, config: &SimulationConfig) -> Bounds {
        Bounds::new(self.x, self.bottom_y(config), config.pipe_width, config.pipe_height)
    }

    pub fn trailing_edge(&self, config: &SimulationConfig) -> f32 {
        self.x + config.pipe_width
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Collision {
    TopPipe,
    BottomPipe,
    /// Above the top of the screen while lined up with a pipe column.
    Ceiling,
}

/// What happened to the window during one tick.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PipeReport {
    pub spawned: bool,
    pub evicted: usize,
    pub collision: Option<Collision>,
    pub points: u32,
}

/// Fixed-capacity sliding window of live pipes, oldest first.
#[derive(Debug, Default, Clone)]
pub struct Pipes {
    window: VecDeque<Pipe>,
}

impl Pipes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.window.clear();
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pipe> {
        self.window.iter()
    }

    pub fn push(&mut self, pipe: Pipe) {
        self.window.push_back(pipe);
    }

    /// Appends a pipe at the right edge, lifted by a random upward offset.
    pub fn spawn<R: Rng>(&mut self, config: &SimulationConfig, rng: &mut R) {
        let y = config.pipe_max_offset * (rng.gen::<f32>() + 1.0);
        self.window.push_back(Pipe::new(config.width, y));
    }

    /// Drops the two oldest pipes once the window is full.
    pub fn prune(&mut self) -> usize {
        if self.window.len() == PIPE_WINDOW_CAPACITY {
            self.window.drain(..PIPE_WINDOW_EVICT);
            PIPE_WINDOW_EVICT
        } else {
            0
        }
    }

    /// Spawns, evicts, tests, scrolls and scores, in that order.
    pub fn advance<R: Rng>(&mut self, frames: u64, bird: &Bird, config: &SimulationConfig, rng: &mut R) -> PipeReport {
        let mut report = PipeReport::default();

        if frames % config.spawn_interval == 0 {
            self.spawn(config, rng);
            report.spawned = true;
        }
        report.evicted = self.prune();

        for pipe in self.window.iter_mut() {
            if report.collision.is_none() {
                report.collision = check_collision(pipe, bird, config);
            }

            pipe.x -= config.pipe_speed;

            if !pipe.scored && pipe.trailing_edge(config) < bird.left() {
                pipe.scored = true;
                report.points += 1;
            }
        }

        report
    }
}

pub fn check_collision(pipe: &Pipe, bird: &Bird, config: &SimulationConfig) -> Option<Collision> {
    if bird.collides_with(&pipe.top(config)) {
        Some(Collision::TopPipe)
    } else if bird.collides_with(&pipe.bottom(config)) {
        Some(Collision::BottomPipe)
    } else if bird.y() <= 0.0 && bird.aligned_with(&pipe.top(config)) {
        Some(Collision::Ceiling)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    fn config() -> SimulationConfig {
        SimulationConfig::from_viewport(72.0, 100.0)
    }

    /// A pipe whose gap is centred on the bird's resting height.
    fn pipe_around_bird(x: f32, config: &SimulationConfig) -> Pipe {
        let gap_top = config.bird_y - config.pipe_gap / 2.0;
        Pipe::new(x, gap_top - config.pipe_height)
    }

    #[test]
    fn test_spawn_offset_range() {
        let config = config();
        let mut rng = StdRng::seed_from_u64(7);
        let mut pipes = Pipes::new();
        for _ in 0..200 {
            pipes.spawn(&config, &mut rng);
            let pipe = pipes.window.pop_back().unwrap();
            assert_eq!(pipe.x, config.width);
            assert!(pipe.y <= config.pipe_max_offset);
            assert!(pipe.y >= 2.0 * config.pipe_max_offset);
            assert!(!pipe.scored);
        }
    }

    #[test]
    fn test_window_never_exceeds_capacity() {
        let config = config();
        let bird = Bird::new(&config);
        let mut rng = StdRng::seed_from_u64(1);
        let mut pipes = Pipes::new();
        for frames in 0..(config.spawn_interval * 20) {
            pipes.advance(frames, &bird, &config, &mut rng);
            assert!(pipes.len() < PIPE_WINDOW_CAPACITY);
        }
    }

    #[test]
    fn test_prune_evicts_two_oldest() {
        let config = config();
        let mut pipes = Pipes::new();
        for i in 0..5 {
            pipes.push(Pipe::new(i as f32, config.pipe_max_offset));
        }
        assert_eq!(pipes.prune(), 0);
        pipes.push(Pipe::new(5.0, config.pipe_max_offset));
        assert_eq!(pipes.prune(), 2);
        let xs: Vec<f32> = pipes.iter().map(|pipe| pipe.x).collect();
        assert_eq!(xs, vec![2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_scroll_is_constant() {
        let config = config();
        let bird = Bird::new(&config);
        let mut rng = StdRng::seed_from_u64(3);
        let mut pipes = Pipes::new();
        let report = pipes.advance(0, &bird, &config, &mut rng);
        assert!(report.spawned);
        let mut last = pipes.iter().next().unwrap().x;
        assert_eq!(last, config.width - config.pipe_speed);
        for frames in 1..config.spawn_interval {
            pipes.advance(frames, &bird, &config, &mut rng);
            let x = pipes.iter().next().unwrap().x;
            assert!((last - x - config.pipe_speed).abs() < 1e-4);
            last = x;
        }
    }

    #[test]
    fn test_scores_once_when_trailing_edge_passes() {
        let config = config();
        let bird = Bird::new(&config);
        let mut rng = StdRng::seed_from_u64(3);
        let mut pipes = Pipes::new();
        let start = bird.left() - config.pipe_width + config.pipe_speed / 2.0;
        pipes.push(pipe_around_bird(start, &config));

        let report = pipes.advance(1, &bird, &config, &mut rng);
        assert_eq!(report.points, 1);
        assert!(pipes.iter().next().unwrap().scored);

        let report = pipes.advance(2, &bird, &config, &mut rng);
        assert_eq!(report.points, 0);
    }

    #[test]
    fn test_not_scored_while_overlapping() {
        let config = config();
        let bird = Bird::new(&config);
        let mut rng = StdRng::seed_from_u64(3);
        let mut pipes = Pipes::new();
        pipes.push(pipe_around_bird(bird.x(), &config));
        let report = pipes.advance(1, &bird, &config, &mut rng);
        assert_eq!(report.points, 0);
        assert_eq!(report.collision, None);
    }

    #[test]
    fn test_top_pipe_collision() {
        let config = config();
        let bird = Bird::new(&config);
        let pipe = Pipe::new(bird.x() - 1.0, bird.y() - config.pipe_height + 1.0);
        assert_eq!(check_collision(&pipe, &bird, &config), Some(Collision::TopPipe));
    }

    #[test]
    fn test_bottom_pipe_collision() {
        let config = config();
        let bird = Bird::new(&config);
        let pipe = Pipe::new(bird.x() - 1.0, bird.y() - config.pipe_height - config.pipe_gap - 1.0);
        assert_eq!(check_collision(&pipe, &bird, &config), Some(Collision::BottomPipe));
    }

    #[test]
    fn test_ceiling_collision_needs_alignment() {
        let config = config();
        let mut bird = Bird::new(&config);
        // Fly well above the screen with the gap far below.
        while bird.y() > -2.0 * config.height {
            bird.flap(config.jump);
            bird.apply_gravity(config.gravity);
        }
        let aligned = Pipe::new(bird.x() - 1.0, config.pipe_max_offset);
        assert_eq!(check_collision(&aligned, &bird, &config), Some(Collision::Ceiling));

        let far = Pipe::new(config.width, config.pipe_max_offset);
        assert_eq!(check_collision(&far, &bird, &config), None);
    }

    #[test]
    fn test_clear_gap_has_no_collision() {
        let config = config();
        let bird = Bird::new(&config);
        let pipe = pipe_around_bird(bird.x() - 1.0, &config);
        assert_eq!(check_collision(&pipe, &bird, &config), None);
    }
}
