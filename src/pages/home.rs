use std::collections::HashMap;

use color_eyre::eyre::Result;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use derive_builder::Builder;
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc::UnboundedSender;

use super::{Page, PageId, Scene};
use crate::{
    action::{act, Action, Command, HomeAction},
    components::{
        art::AsciiArt,
        buttons::{Button, ButtonId},
        pixels::PixelCanvas,
        scenery,
    },
    config::{Config, PageKeyBindings},
    constants::home::{BIRD_FRAMES, LOGO_BOB_PERIOD, LOGO_BOB_ROWS, SUBTITLE_TEXT, TITLE_TEXT},
    ui::Theme,
};

#[derive(Builder)]
pub struct HomePage {
    #[builder(default)]
    pub action_tx: Option<UnboundedSender<Action>>,
    #[builder(default)]
    pub keymap: PageKeyBindings,
    #[builder(default)]
    config: Config,
    /// Menu entries, in keyboard navigation order.
    options: Vec<ButtonId>,
    selected_option_index: usize,
    #[builder(default)]
    playfield: Rect,
}

impl HomePage {
    pub fn new() -> Result<Self> {
        Ok(HomePageBuilder::default()
            .options(vec![ButtonId::Start, ButtonId::Mute, ButtonId::Night])
            .selected_option_index(0)
            .build()?)
    }

    pub fn selected(&self) -> ButtonId {
        self.options[self.selected_option_index]
    }

    pub fn up(&mut self) {
        self.selected_option_index = (self.selected_option_index + self.options.len() - 1) % self.options.len();
    }

    pub fn down(&mut self) {
        self.selected_option_index = (self.selected_option_index + 1) % self.options.len();
    }

    fn action_for(button: ButtonId) -> Option<HomeAction> {
        match button {
            ButtonId::Start => Some(HomeAction::Start),
            ButtonId::Mute => Some(HomeAction::ToggleMute),
            ButtonId::Night => Some(HomeAction::ToggleNight),
            _ => None,
        }
    }

    fn label(button: ButtonId, scene: &Scene<'_>) -> &'static str {
        match button {
            ButtonId::Start => "Start",
            ButtonId::Mute if scene.muted => "Muted",
            ButtonId::Mute => "Sound",
            ButtonId::Night if scene.theme == Theme::Night => "Day",
            ButtonId::Night => "Night",
            _ => "",
        }
    }

    /// Rows the logo is shifted by at the given frame.
    fn bob(frames: u64) -> i32 {
        if (frames / LOGO_BOB_PERIOD) % 2 == 0 {
            0
        } else {
            LOGO_BOB_ROWS as i32
        }
    }
}

impl Page for HomePage {
    fn id(&self) -> PageId {
        PageId::Home
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
        let hit = ButtonId::hit(scene.game.state(), self.playfield, mouse.column, mouse.row);
        Ok(hit.and_then(Self::action_for).map(|action| act!(Command::Home(action))))
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        if let Command::Home(command) = action.command {
            match command {
                HomeAction::Up => self.up(),
                HomeAction::Down => self.down(),
                HomeAction::Select => {
                    return Ok(Self::action_for(self.selected()).map(|action| act!(Command::Home(action))));
                },
                _ => {},
            }
        }
        Ok(None)
    }

    fn draw(&mut self, f: &mut Frame<'_>, rect: Rect, scene: &Scene<'_>) -> Result<()> {
        self.playfield = rect;
        let game = scene.game;
        let palette = scene.theme.palette();

        let mut canvas = PixelCanvas::for_area(rect, palette.sky);
        scenery::draw_backdrop(&mut canvas, game.config(), palette);
        scenery::draw_foreground(&mut canvas, game.foreground(), palette);
        f.render_widget(&canvas, rect);

        let center = rect.x as i32 + rect.width as i32 / 2;
        let row = |ratio: f32| rect.y as i32 + (ratio * rect.height as f32) as i32;
        let bob = Self::bob(game.frames());

        let title = AsciiArt::new(TITLE_TEXT).style(self.config.style(scene.theme, "title"));
        let title_area = title.centered_on(center, row(0.22) + bob, rect);
        f.render_widget(title, title_area);

        let bird = AsciiArt::new(BIRD_FRAMES[game.bird().frame() % BIRD_FRAMES.len()])
            .style(Style::default().fg(palette.bird).add_modifier(Modifier::BOLD));
        let bird_area = bird.centered_on(center, row(0.45) + bob, rect);
        f.render_widget(bird, bird_area);

        let menu_style = self.config.style(scene.theme, "menu");
        let text = vec![
            Line::from(SUBTITLE_TEXT).style(menu_style),
            Line::from(format!("Best {}", game.score().best())).style(self.config.style(scene.theme, "score")),
        ];
        let text_area = Rect::new(rect.x, row(0.6).max(0) as u16, rect.width, 2).intersection(rect);
        f.render_widget(Paragraph::new(text).alignment(Alignment::Center), text_area);

        for (index, button) in self.options.iter().enumerate() {
            let style = if index == self.selected_option_index {
                self.config.style(scene.theme, "selected")
            } else {
                menu_style
            };
            let widget = Button::new(Self::label(*button, scene))
                .style(style)
                .highlighted(index == self.selected_option_index);
            f.render_widget(widget, button.rect(rect));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::{action::ActionState, game::Game};

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: crossterm::event::KeyModifiers::empty(),
        }
    }

    #[test]
    fn test_menu_wraps() -> Result<()> {
        let mut page = HomePage::new()?;
        assert_eq!(page.selected(), ButtonId::Start);
        page.up();
        assert_eq!(page.selected(), ButtonId::Night);
        page.down();
        page.down();
        assert_eq!(page.selected(), ButtonId::Mute);
        Ok(())
    }

    #[test]
    fn test_select_emits_action() -> Result<()> {
        let mut page = HomePage::new()?;
        page.update(act!(Command::Home(HomeAction::Down)))?;
        let action = page.update(act!(Command::Home(HomeAction::Select)))?;
        assert_eq!(
            action,
            Some(Action { command: Command::Home(HomeAction::ToggleMute), state: ActionState::Start })
        );
        Ok(())
    }

    #[test]
    fn test_click_start_button() -> Result<()> {
        let game = Game::with_rng(72.0, 100.0, 0, StdRng::seed_from_u64(1));
        let scene = Scene { game: &game, muted: false, theme: Theme::Day };
        let mut page = HomePage::new()?;
        page.playfield = Rect::new(0, 0, 72, 50);

        let start = ButtonId::Start.rect(page.playfield);
        let action = page.handle_mouse_events(click(start.x + 1, start.y + 1), &scene)?;
        assert_eq!(action.map(|a| a.command), Some(Command::Home(HomeAction::Start)));

        assert_eq!(page.handle_mouse_events(click(0, 49), &scene)?, None);
        Ok(())
    }

    #[test]
    fn test_draw_smoke() -> Result<()> {
        let game = Game::with_rng(72.0, 100.0, 12, StdRng::seed_from_u64(1));
        let scene = Scene { game: &game, muted: true, theme: Theme::Night };
        let mut page = HomePage::new()?;
        let mut terminal = Terminal::new(ratatui::backend::TestBackend::new(80, 50))?;
        terminal.draw(|f| {
            let _ = page.draw(f, Rect::new(4, 0, 72, 50), &scene);
        })?;
        assert_eq!(page.playfield, Rect::new(4, 0, 72, 50));
        Ok(())
    }
}
