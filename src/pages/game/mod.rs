mod scoreboard;

use std::collections::HashMap;

use color_eyre::eyre::Result;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc::UnboundedSender;

use self::scoreboard::{Scoreboard, ScoreboardStyles};
use super::{Page, PageId, Scene};
use crate::{
    action::{act, Action, Command, GameAction},
    components::{
        buttons::{Button, ButtonId},
        pixels::PixelCanvas,
        scenery,
    },
    config::{Config, PageKeyBindings},
    game::RunState,
};

const SCOREBOARD_WIDTH: u16 = 26;
const SCOREBOARD_HEIGHT: u16 = 5;

#[derive(Default)]
pub struct GamePage {
    pub action_tx: Option<UnboundedSender<Action>>,
    pub keymap: PageKeyBindings,
    config: Config,
    playfield: Rect,
}

impl GamePage {
    pub fn new() -> Self {
        Self::default()
    }

    fn draw_world(&self, f: &mut Frame<'_>, rect: Rect, scene: &Scene<'_>) {
        let game = scene.game;
        let config = game.config();
        let palette = scene.theme.palette();

        let mut canvas = PixelCanvas::for_area(rect, palette.sky);
        scenery::draw_backdrop(&mut canvas, config, palette);
        scenery::draw_pipes(&mut canvas, game.pipes(), config, palette);
        scenery::draw_foreground(&mut canvas, game.foreground(), palette);
        scenery::draw_bird(&mut canvas, game.bird(), config, palette);
        if game.state() == RunState::Playing {
            let top = (config.height * 0.045).round() as i32;
            let center = (config.width / 2.0).round() as i32;
            scenery::draw_number(&mut canvas, game.score().current(), center, top, scenery::digit_scale(config), palette);
        }
        f.render_widget(&canvas, rect);
    }

    fn draw_get_ready(&self, f: &mut Frame<'_>, rect: Rect, scene: &Scene<'_>) {
        let lines = vec![
            Line::from("Get Ready!").style(self.config.style(scene.theme, "title")),
            Line::from(""),
            Line::from("space or click to flap").style(self.config.style(scene.theme, "menu")),
        ];
        let y = rect.y + (rect.height as f32 * 0.25) as u16;
        let area = Rect::new(rect.x, y, rect.width, lines.len() as u16).intersection(rect);
        f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
    }

    fn draw_pause(&self, f: &mut Frame<'_>, rect: Rect, scene: &Scene<'_>) {
        let paused = scene.game.is_paused();
        let style = self.config.style(scene.theme, "menu");
        let button = Button::new(if paused { "|>" } else { "||" }).style(style).highlighted(paused);
        f.render_widget(button, ButtonId::Pause.rect(rect));

        if paused {
            let y = rect.y + rect.height / 2;
            let area = Rect::new(rect.x, y, rect.width, 1).intersection(rect);
            let label = Paragraph::new("Paused").style(self.config.style(scene.theme, "title")).alignment(Alignment::Center);
            f.render_widget(label, area);
        }
    }

    fn draw_game_over(&self, f: &mut Frame<'_>, rect: Rect, scene: &Scene<'_>) {
        let styles = ScoreboardStyles {
            panel: self.config.style(scene.theme, "panel"),
            score: self.config.style(scene.theme, "score"),
            badge: self.config.style(scene.theme, "badge"),
        };
        let width = SCOREBOARD_WIDTH.min(rect.width);
        let height = SCOREBOARD_HEIGHT.min(rect.height);
        let x = rect.x + (rect.width - width) / 2;
        let y = rect.y + (rect.height as f32 * 0.4) as u16;
        let area = Rect::new(x, y, width, height).intersection(rect);
        f.render_widget(Scoreboard::new(scene.game.score(), styles), area);

        let style = self.config.style(scene.theme, "menu");
        f.render_widget(Button::new("Restart").style(style), ButtonId::Restart.rect(rect));
        f.render_widget(Button::new("Home").style(style), ButtonId::Home.rect(rect));
    }
}

impl Page for GamePage {
    fn id(&self) -> PageId {
        PageId::Game
    }

    fn register_keymap(&mut self, keymaps: &HashMap<PageId, PageKeyBindings>) -> Result<()> {
        if let Some(keymap) = keymaps.get(&self.id()) {
            self.keymap = keymap.clone();
        }
        Ok(())
    }

    fn register_action_handler(&mut self, tx: UnboundedSender<Action>) -> Result<()> {
        self.action_tx = Some(tx);
        Ok(())
    }

    fn register_config_handler(&mut self, config: Config) -> Result<()> {
        self.config = config;
        Ok(())
    }

    fn handle_mouse_events(&mut self, mouse: MouseEvent, scene: &Scene<'_>) -> Result<Option<Action>> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Ok(None);
        }
        let state = scene.game.state();
        let command = match ButtonId::hit(state, self.playfield, mouse.column, mouse.row) {
            Some(ButtonId::Pause) => Some(GameAction::Pause),
            Some(ButtonId::Restart) => Some(GameAction::Restart),
            Some(ButtonId::Home) => Some(GameAction::Home),
            Some(_) => None,
            None => match state {
                RunState::GetReady | RunState::Playing if !scene.game.is_paused() => Some(GameAction::Flap),
                _ => None,
            },
        };
        Ok(command.map(|command| act!(Command::Game(command))))
    }

    fn draw(&mut self, f: &mut Frame<'_>, rect: Rect, scene: &Scene<'_>) -> Result<()> {
        self.playfield = rect;
        self.draw_world(f, rect, scene);
        match scene.game.state() {
            RunState::GetReady => self.draw_get_ready(f, rect, scene),
            RunState::Playing => self.draw_pause(f, rect, scene),
            RunState::GameOver => self.draw_game_over(f, rect, scene),
            RunState::Home => {},
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use pretty_assertions::assert_eq;
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::{game::Game, ui::Theme};

    const PLAYFIELD: Rect = Rect { x: 0, y: 0, width: 72, height: 50 };

    fn game() -> Game {
        Game::with_rng(72.0, 100.0, 0, StdRng::seed_from_u64(7))
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: crossterm::event::KeyModifiers::empty(),
        }
    }

    fn command(page: &mut GamePage, game: &Game, column: u16, row: u16) -> Option<Command> {
        let scene = Scene { game, muted: false, theme: Theme::Day };
        page.handle_mouse_events(click(column, row), &scene).unwrap().map(|action| action.command)
    }

    #[test]
    fn test_click_flaps_outside_buttons() {
        let mut game = game();
        game.start();
        let mut page = GamePage { playfield: PLAYFIELD, ..GamePage::new() };
        assert_eq!(command(&mut page, &game, 36, 25), Some(Command::Game(GameAction::Flap)));
    }

    #[test]
    fn test_click_pause_button_while_playing() {
        let mut game = game();
        game.start();
        game.primary_action();
        let mut page = GamePage { playfield: PLAYFIELD, ..GamePage::new() };
        let pause = ButtonId::Pause.rect(PLAYFIELD);
        assert_eq!(command(&mut page, &game, pause.x, pause.y), Some(Command::Game(GameAction::Pause)));

        game.toggle_pause();
        assert_eq!(command(&mut page, &game, 36, 25), None);
    }

    #[test]
    fn test_game_over_buttons() {
        let mut game = game();
        game.start();
        game.primary_action();
        let mut now = Instant::now();
        while game.state() != RunState::GameOver {
            now += Duration::from_millis(13);
            game.update(now);
        }
        let mut page = GamePage { playfield: PLAYFIELD, ..GamePage::new() };
        let restart = ButtonId::Restart.rect(PLAYFIELD);
        let home = ButtonId::Home.rect(PLAYFIELD);
        assert_eq!(command(&mut page, &game, restart.x, restart.y), Some(Command::Game(GameAction::Restart)));
        assert_eq!(command(&mut page, &game, home.x, home.y), Some(Command::Game(GameAction::Home)));
        assert_eq!(command(&mut page, &game, 0, 0), None);
    }

    #[test]
    fn test_draw_every_state() -> Result<()> {
        let mut game = game();
        let mut page = GamePage::new();
        let mut terminal = Terminal::new(ratatui::backend::TestBackend::new(72, 50))?;
        let mut draw = |game: &Game| -> Result<()> {
            let scene = Scene { game, muted: false, theme: Theme::Night };
            terminal.draw(|f| {
                let _ = page.draw(f, PLAYFIELD, &scene);
            })?;
            Ok(())
        };

        game.start();
        draw(&game)?;
        game.primary_action();
        game.update(Instant::now());
        draw(&game)?;
        game.toggle_pause();
        draw(&game)?;
        Ok(())
    }
}
