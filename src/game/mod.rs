//! Simulation core: bird physics, the pipe window and the run state machine.
//!
//! Everything here is driven by [`Game::update`] once per tick and by the
//! input methods; nothing touches the terminal. Side effects the presentation
//! layer must act on are queued as [`GameEvent`]s and collected with
//! [`Game::drain_events`].

pub mod bird;
pub mod foreground;
pub mod object;
pub mod params;
pub mod pipes;
pub mod score;
pub mod state;
pub mod timer;

use std::time::Instant;

use rand::{rngs::StdRng, SeedableRng};
use tracing::{debug, info};

pub use self::state::{GameEvent, RunState, Sound};
use self::{
    bird::Bird,
    foreground::Foreground,
    params::SimulationConfig,
    pipes::Pipes,
    score::Score,
    timer::{Scheduler, Snapshot},
};
use crate::constants::game::{DIE_DELAY, GET_READY_FLAP_PERIOD, PLAYING_FLAP_PERIOD};

#[derive(Debug)]
pub struct Game {
    config: SimulationConfig,
    state: RunState,
    paused: bool,
    frames: u64,
    /// Bumped on every reset so deferred tasks of an old run go stale.
    epoch: u64,
    bird: Bird,
    pipes: Pipes,
    foreground: Foreground,
    score: Score,
    scheduler: Scheduler,
    events: Vec<GameEvent>,
    rng: StdRng,
}

impl Game {
    pub fn new(width: f32, height: f32, best: u32) -> Self {
        Self::with_rng(width, height, best, StdRng::from_entropy())
    }

    pub fn with_rng(width: f32, height: f32, best: u32, rng: StdRng) -> Self {
        let config = SimulationConfig::from_viewport(width, height);
        Game {
            state: RunState::default(),
            paused: false,
            frames: 0,
            epoch: 0,
            bird: Bird::new(&config),
            pipes: Pipes::new(),
            foreground: Foreground::new(&config),
            score: Score::new(best),
            scheduler: Scheduler::new(),
            events: Vec::new(),
            rng,
            config,
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn bird(&self) -> &Bird {
        &self.bird
    }

    pub fn pipes(&self) -> &Pipes {
        &self.pipes
    }

    pub fn foreground(&self) -> &Foreground {
        &self.foreground
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    pub fn viewport(&self) -> (f32, f32) {
        (self.config.width, self.config.height)
    }

    /// Recomputes every size-derived value. Safe to call mid-run.
    pub fn resize(&mut self, width: f32, height: f32) {
        if self.viewport() == (width, height) {
            return;
        }
        debug!("resize {}x{} -> {width}x{height}", self.config.width, self.config.height);
        self.config = SimulationConfig::from_viewport(width, height);
        self.bird.resize(&self.config);
        self.foreground.resize(&self.config);
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// One simulation tick. Deferred tasks are checked even while paused.
    pub fn update(&mut self, now: Instant) {
        let fired = self.scheduler.fire_due(now, self.snapshot());
        self.events.extend(fired);

        if self.paused {
            return;
        }

        self.update_bird(now);
        if self.state != RunState::GameOver {
            self.foreground.scroll();
        }
        if self.state == RunState::Playing {
            self.update_pipes(now);
        }
        self.frames += 1;
    }

    /// Tap, click or space. Returns whether the bird flapped.
    pub fn primary_action(&mut self) -> bool {
        match self.state {
            RunState::GetReady => {
                self.flap();
                self.transition(RunState::Playing);
                true
            },
            RunState::Playing if !self.paused => {
                self.flap();
                true
            },
            _ => false,
        }
    }

    pub fn start(&mut self) -> bool {
        if self.state != RunState::Home {
            return false;
        }
        self.bird.reset(&self.config);
        self.transition(RunState::GetReady);
        self.events.push(GameEvent::Sound(Sound::Swoosh));
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        if self.state != RunState::Playing {
            return false;
        }
        self.paused = !self.paused;
        info!("paused: {}", self.paused);
        true
    }

    pub fn restart(&mut self) -> bool {
        self.leave_game_over(RunState::GetReady)
    }

    pub fn go_home(&mut self) -> bool {
        self.leave_game_over(RunState::Home)
    }

    /// Acknowledges a menu toggle (mute, night) on the home screen.
    pub fn menu_toggle(&mut self) -> bool {
        if self.state != RunState::Home {
            return false;
        }
        self.events.push(GameEvent::Sound(Sound::Swoosh));
        true
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot { state: self.state, epoch: self.epoch }
    }

    fn transition(&mut self, to: RunState) {
        let from = self.state;
        self.state = to;
        info!("{from} -> {to}");
        self.events.push(GameEvent::StateChanged { from, to });
    }

    fn flap(&mut self) {
        self.bird.flap(self.config.jump);
        self.events.push(GameEvent::Sound(Sound::Flap));
    }

    fn leave_game_over(&mut self, to: RunState) -> bool {
        if self.state != RunState::GameOver {
            return false;
        }
        self.reset();
        self.transition(to);
        self.events.push(GameEvent::Sound(Sound::Swoosh));
        true
    }

    fn reset(&mut self) {
        self.pipes.reset();
        self.bird.reset(&self.config);
        self.score.reset();
        self.paused = false;
        self.epoch += 1;
    }

    fn end_run(&mut self, now: Instant) {
        if self.state != RunState::Playing {
            return;
        }
        self.transition(RunState::GameOver);
        self.events.push(GameEvent::Sound(Sound::Hit));
        self.scheduler.schedule(now, DIE_DELAY, self.snapshot(), GameEvent::Sound(Sound::Die));
    }

    /// Gravity step followed by the ground test; returns whether the bird landed.
    fn fall(&mut self) -> bool {
        self.bird.apply_gravity(self.config.gravity);
        let landed = self.bird.land(&self.config);
        self.bird.tilt(self.config.jump);
        landed
    }

    fn update_bird(&mut self, now: Instant) {
        match self.state {
            RunState::Home | RunState::GetReady => {
                self.bird.animate(self.frames, GET_READY_FLAP_PERIOD);
                self.bird.hold(&self.config);
            },
            RunState::Playing => {
                self.bird.animate(self.frames, PLAYING_FLAP_PERIOD);
                if self.fall() {
                    debug!("ground hit at frame {}", self.frames);
                    self.end_run(now);
                }
            },
            RunState::GameOver => {
                if !self.bird.is_grounded() {
                    self.fall();
                }
            },
        }
    }

    fn update_pipes(&mut self, now: Instant) {
        let report = self.pipes.advance(self.frames, &self.bird, &self.config, &mut self.rng);

        for _ in 0..report.points {
            self.events.push(GameEvent::Sound(Sound::Point));
            if let Some(best) = self.score.add_point() {
                self.events.push(GameEvent::BestScore(best));
            }
        }

        if let Some(collision) = report.collision {
            debug!("{collision} collision at frame {}", self.frames);
            self.end_run(now);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use pretty_assertions::assert_eq;

    use super::{
        pipes::{check_collision, Collision, Pipe},
        *,
    };

    const TICK: Duration = Duration::from_millis(13);

    fn game() -> Game {
        Game::with_rng(72.0, 100.0, 0, StdRng::seed_from_u64(42))
    }

    fn playing() -> Game {
        let mut game = game();
        assert!(game.start());
        assert!(game.primary_action());
        game.drain_events();
        game
    }

    fn sounds(events: &[GameEvent]) -> Vec<Sound> {
        events
            .iter()
            .filter_map(|event| match event {
                GameEvent::Sound(sound) => Some(*sound),
                _ => None,
            })
            .collect()
    }

    /// Ticks until the run ends and returns the instant of the final tick.
    fn run_until_game_over(game: &mut Game, start: Instant) -> Instant {
        run_until_game_over_every(game, start, TICK)
    }

    fn run_until_game_over_every(game: &mut Game, start: Instant, tick: Duration) -> Instant {
        let mut now = start;
        for _ in 0..1000 {
            now += tick;
            game.update(now);
            if game.state() == RunState::GameOver {
                return now;
            }
        }
        panic!("run never ended");
    }

    #[test]
    fn test_transitions() {
        let mut game = game();
        assert_eq!(game.state(), RunState::Home);
        assert!(!game.primary_action());
        assert!(!game.restart());

        assert!(game.start());
        assert_eq!(game.state(), RunState::GetReady);
        assert_eq!(sounds(&game.drain_events()), vec![Sound::Swoosh]);

        assert!(game.primary_action());
        assert_eq!(game.state(), RunState::Playing);
        assert_eq!(game.bird().velocity(), -game.config().jump);
        assert_eq!(sounds(&game.drain_events()), vec![Sound::Flap]);
        assert!(!game.start());
    }

    #[test]
    fn test_get_ready_pins_bird() {
        let mut game = game();
        game.start();
        let mut now = Instant::now();
        for _ in 0..500 {
            now += TICK;
            game.update(now);
            assert_eq!(game.bird().y(), game.config().bird_y);
            assert_eq!(game.bird().rotation(), 0.0);
        }
        assert!(game.pipes().is_empty());
    }

    #[test]
    fn test_velocity_grows_by_gravity() {
        let mut game = playing();
        let gravity = game.config().gravity;
        let mut now = Instant::now();
        let mut last = game.bird().velocity();
        for tick in 0..40 {
            if tick == 20 {
                game.primary_action();
                last = game.bird().velocity();
            }
            now += TICK;
            game.update(now);
            assert!((game.bird().velocity() - (last + gravity)).abs() < 1e-5);
            last = game.bird().velocity();
        }
    }

    #[test]
    fn test_ground_hit_then_delayed_die() {
        let mut game = playing();
        let hit_at = run_until_game_over(&mut game, Instant::now());
        assert!(game.bird().is_grounded());

        let events = game.drain_events();
        assert_eq!(sounds(&events), vec![Sound::Hit]);
        assert!(events.contains(&GameEvent::StateChanged { from: RunState::Playing, to: RunState::GameOver }));

        game.update(hit_at + Duration::from_millis(499));
        assert!(sounds(&game.drain_events()).is_empty());
        game.update(hit_at + Duration::from_millis(500));
        assert_eq!(sounds(&game.drain_events()), vec![Sound::Die]);
        game.update(hit_at + Duration::from_secs(5));
        assert!(sounds(&game.drain_events()).is_empty());
    }

    #[test]
    fn test_die_suppressed_after_restart() {
        let mut game = playing();
        let hit_at = run_until_game_over(&mut game, Instant::now());
        game.drain_events();

        assert!(game.restart());
        assert!(game.primary_action());
        game.drain_events();
        game.update(hit_at + Duration::from_millis(600));
        assert!(!sounds(&game.drain_events()).contains(&Sound::Die));
    }

    #[test]
    fn test_die_suppressed_for_a_new_run_that_already_ended() {
        let mut game = playing();
        let hit_at = run_until_game_over(&mut game, Instant::now());
        assert!(game.restart());
        assert!(game.primary_action());
        // Second run ends before the first run's task comes due.
        let second_hit = run_until_game_over_every(&mut game, hit_at, Duration::from_millis(1));
        assert!(second_hit < hit_at + Duration::from_millis(500));
        game.drain_events();

        game.update(hit_at + Duration::from_millis(500));
        assert!(sounds(&game.drain_events()).is_empty());
        game.update(second_hit + Duration::from_millis(500));
        assert_eq!(sounds(&game.drain_events()), vec![Sound::Die]);
    }

    #[test]
    fn test_game_over_freezes_bird_on_ground() {
        let mut game = playing();
        let mut now = run_until_game_over(&mut game, Instant::now());
        let y = game.bird().y();
        for _ in 0..10 {
            now += TICK;
            game.update(now);
            assert_eq!(game.bird().y(), y);
        }
    }

    #[test]
    fn test_pipe_collision_ends_run() {
        let mut game = playing();
        let config = *game.config();
        let bird_x = game.bird().x();
        let bird_y = game.bird().y();
        game.pipes.push(Pipe::new(bird_x - 1.0, bird_y - config.pipe_height + 1.0));

        game.update(Instant::now());
        assert_eq!(game.state(), RunState::GameOver);
        assert_eq!(sounds(&game.drain_events()), vec![Sound::Hit]);
    }

    #[test]
    fn test_bottom_pipe_collision_ends_run() {
        let mut game = playing();
        let config = *game.config();
        let bird_x = game.bird().x();
        let bird_y = game.bird().y();
        // bottom pipe starts just above the bird's center, top pipe is far above
        let pipe = Pipe::new(bird_x - 1.0, bird_y - 1.0 - config.pipe_gap - config.pipe_height);
        assert_eq!(check_collision(&pipe, game.bird(), &config), Some(Collision::BottomPipe));
        game.pipes.push(pipe);

        game.update(Instant::now());
        assert_eq!(game.state(), RunState::GameOver);
        assert_eq!(sounds(&game.drain_events()), vec![Sound::Hit]);
    }

    #[test]
    fn test_ceiling_collision_ends_run() {
        let mut game = playing();
        let config = *game.config();
        let mut now = Instant::now();
        for _ in 0..200 {
            if game.bird().y() <= -1.0 {
                break;
            }
            game.primary_action();
            now += TICK;
            game.update(now);
        }
        assert_eq!(game.state(), RunState::Playing);
        assert!(game.bird().y() <= -1.0);
        game.drain_events();

        // gap centered on the bird, so only the ceiling rule can fire
        let gap_top = game.bird().y() - config.pipe_gap / 2.0;
        let pipe = Pipe::new(game.bird().x() - 1.0, gap_top - config.pipe_height);
        assert_eq!(check_collision(&pipe, game.bird(), &config), Some(Collision::Ceiling));
        game.pipes.push(pipe);

        game.update(now + TICK);
        assert_eq!(game.state(), RunState::GameOver);
        assert_eq!(sounds(&game.drain_events()), vec![Sound::Hit]);
    }

    #[test]
    fn test_scoring_emits_point_and_best() {
        let mut game = playing();
        let config = *game.config();
        let left = game.bird().left();
        let gap_top = config.bird_y - config.pipe_gap / 2.0;
        game.pipes.push(Pipe::new(left - config.pipe_width + config.pipe_speed / 2.0, gap_top - config.pipe_height));

        game.update(Instant::now());
        assert_eq!(game.score().current(), 1);
        assert!(game.score().is_new_best());
        let events = game.drain_events();
        assert!(events.contains(&GameEvent::Sound(Sound::Point)));
        assert!(events.contains(&GameEvent::BestScore(1)));
    }

    #[test]
    fn test_restart_clears_run() {
        let mut game = playing();
        let config = *game.config();
        let left = game.bird().left();
        let gap_top = config.bird_y - config.pipe_gap / 2.0;
        game.pipes.push(Pipe::new(left - config.pipe_width + config.pipe_speed / 2.0, gap_top - config.pipe_height));
        run_until_game_over(&mut game, Instant::now());
        assert_eq!(game.score().current(), 1);

        assert!(game.restart());
        assert_eq!(game.state(), RunState::GetReady);
        assert_eq!(game.score().current(), 0);
        assert_eq!(game.score().best(), 1);
        assert!(!game.score().is_new_best());
        assert!(game.pipes().is_empty());
        assert_eq!(game.bird().y(), config.bird_y);
        assert_eq!(game.bird().x(), config.bird_x);
        assert_eq!(game.bird().velocity(), 0.0);
    }

    #[test]
    fn test_home_from_game_over() {
        let mut game = playing();
        run_until_game_over(&mut game, Instant::now());
        game.drain_events();
        assert!(game.go_home());
        assert_eq!(game.state(), RunState::Home);
        assert_eq!(sounds(&game.drain_events()), vec![Sound::Swoosh]);
        assert!(game.menu_toggle());
        assert_eq!(sounds(&game.drain_events()), vec![Sound::Swoosh]);
    }

    #[test]
    fn test_pause_freezes_simulation() {
        let mut game = playing();
        let mut now = Instant::now();
        for _ in 0..5 {
            now += TICK;
            game.update(now);
        }
        assert!(game.toggle_pause());
        let frames = game.frames();
        let y = game.bird().y();
        let x = game.foreground().x();
        for _ in 0..50 {
            now += TICK;
            game.update(now);
        }
        assert_eq!(game.frames(), frames);
        assert_eq!(game.bird().y(), y);
        assert_eq!(game.foreground().x(), x);
        assert!(!game.primary_action());

        assert!(game.toggle_pause());
        now += TICK;
        game.update(now);
        assert_eq!(game.frames(), frames + 1);
    }

    #[test]
    fn test_pause_ignored_outside_playing() {
        let mut game = game();
        assert!(!game.toggle_pause());
        game.start();
        assert!(!game.toggle_pause());
        assert!(!game.is_paused());
    }

    #[test]
    fn test_pipe_spawns_on_cadence() {
        let mut game = playing();
        let config = *game.config();
        let mut now = Instant::now();
        // The first tick of a fresh game is frame 0, a spawn frame.
        game.update(now);
        assert_eq!(game.pipes().len(), 1);
        assert_eq!(game.pipes().iter().next().map(|pipe| pipe.x), Some(config.width - config.pipe_speed));
        for _ in 1..config.spawn_interval {
            if game.bird().y() > config.bird_y {
                game.primary_action();
            }
            now += TICK;
            game.update(now);
        }
        assert_eq!(game.state(), RunState::Playing);
        assert_eq!(game.pipes().len(), 1);
        now += TICK;
        game.update(now);
        assert_eq!(game.pipes().len(), 2);
    }

    #[test]
    fn test_resize_recomputes_config() {
        let mut game = game();
        game.resize(144.0, 200.0);
        assert_eq!(*game.config(), SimulationConfig::from_viewport(144.0, 200.0));
        assert_eq!(game.bird().x(), game.config().bird_x);
    }
}
