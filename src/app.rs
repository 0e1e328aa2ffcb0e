use std::time::Instant;

use color_eyre::eyre::{eyre, Result};
use ratatui::{
    layout::{Margin, Rect, Size},
    Frame,
};
use tokio::sync::mpsc::{self, UnboundedSender};

use crate::{
    action::{act, Action, Command, GameAction, HomeAction},
    audio::SoundPlayer,
    components::help::Help,
    config::Config,
    game::{Game, GameEvent, RunState},
    pages::{game::GamePage, home::HomePage, Page, PageId, Scene},
    storage::BestScoreStore,
    tui,
    ui::{self, Theme},
    utils::get_data_dir,
};

/// Viewport the game starts with before the first draw sizes it.
const INITIAL_VIEWPORT: (f32, f32) = (72.0, 100.0);

pub struct App {
    config: Config,
    tick_rate: f64,
    frame_rate: f64,
    should_quit: bool,
    should_suspend: bool,
    show_help: bool,
    pages: Vec<Box<dyn Page>>,
    game: Game,
    player: SoundPlayer,
    store: BestScoreStore,
    theme: Theme,
}

impl App {
    pub fn new(tick_rate: f64, frame_rate: f64) -> Result<Self> {
        let config = Config::new()?;
        let store = BestScoreStore::new(get_data_dir());
        let best = store.load();
        log::info!("loaded best score {best} from {}", store.path().display());

        Ok(Self {
            tick_rate,
            frame_rate,
            should_quit: false,
            should_suspend: false,
            show_help: false,
            pages: vec![Box::new(HomePage::new()?), Box::new(GamePage::new())],
            game: Game::new(INITIAL_VIEWPORT.0, INITIAL_VIEWPORT.1, best),
            player: SoundPlayer::new(&config.audio),
            store,
            theme: Theme::default(),
            config,
        })
    }

    fn active_page_id(&self) -> PageId {
        match self.game.state() {
            RunState::Home => PageId::Home,
            _ => PageId::Game,
        }
    }

    fn get_active_page(&mut self) -> Result<&mut Box<dyn Page>> {
        let id = self.active_page_id();
        self.pages.iter_mut().find(|page| page.id() == id).ok_or_else(|| eyre!("No page registered for {id}"))
    }

    pub async fn run(&mut self) -> Result<()> {
        let (action_tx, mut action_rx) = mpsc::unbounded_channel();

        let mut tui = tui::Tui::new()?.mouse(true);
        tui.tick_rate(self.tick_rate);
        tui.frame_rate(self.frame_rate);
        tui.enter()?;
        self.fit_playfield(tui.size()?);

        for page in self.pages.iter_mut() {
            page.register_keymap(&self.config.keybindings.pages)?;
        }

        for page in self.pages.iter_mut() {
            page.register_action_handler(action_tx.clone())?;
        }

        for page in self.pages.iter_mut() {
            page.register_config_handler(self.config.clone())?;
        }

        for page in self.pages.iter_mut() {
            page.init()?;
        }

        loop {
            if let Some(e) = tui.next().await {
                match e {
                    tui::Event::Quit => action_tx.send(act!(Command::Quit))?,
                    tui::Event::Tick => action_tx.send(act!(Command::Tick))?,
                    tui::Event::Render => action_tx.send(act!(Command::Render))?,
                    tui::Event::Resize(x, y) => action_tx.send(act!(Command::Resize(x, y)))?,
                    tui::Event::Key(key) => {
                        let mut action = None;

                        let active_page_id = self.active_page_id();
                        if let Some(keymap) = self.config.keybindings.pages.get(&active_page_id) {
                            action = keymap.0.get(&key);
                        };
                        if let Some(act) = self.config.keybindings.global.0.get(&key) {
                            action = Some(act)
                        }

                        if let Some(action) = action {
                            log::info!("Got action: {action:?}");
                            action_tx.send(action.clone())?;
                        }
                    },
                    _ => {},
                }
                let scene = Scene { game: &self.game, muted: self.player.is_muted(), theme: self.theme };
                let id = self.active_page_id();
                if let Some(page) = self.pages.iter_mut().find(|page| page.id() == id) {
                    if let Some(action) = page.handle_events(Some(e), &scene)? {
                        action_tx.send(action)?;
                    }
                }
            }

            while let Ok(action) = action_rx.try_recv() {
                let Action { command, .. } = &action;
                if *command != Command::Tick && *command != Command::Render {
                    log::debug!("{command:?}");
                }
                match command {
                    Command::Tick => self.game.update(Instant::now()),
                    Command::Quit => self.should_quit = true,
                    Command::Suspend => self.should_suspend = true,
                    Command::Resume => self.should_suspend = false,
                    Command::ToggleShowHelp => self.toggle_help(),
                    Command::ToggleNight => self.theme = self.theme.toggled(),
                    Command::Error(msg) => log::error!("{msg}"),
                    Command::Resize(w, h) => {
                        tui.resize(Rect::new(0, 0, *w, *h))?;
                        self.fit_playfield(Size::new(*w, *h));
                        self.render(&mut tui, &action_tx)?;
                    },
                    Command::Render => {
                        self.fit_playfield(tui.size()?);
                        self.render(&mut tui, &action_tx)?;
                    },
                    Command::Home(command) if !self.show_help => self.apply_home(*command),
                    Command::Game(command) if !self.show_help => self.apply_game(*command),
                    _ => {},
                }
                if !self.show_help {
                    if let Some(action) = self.get_active_page()?.update(action)? {
                        action_tx.send(action)?
                    }
                }
                self.flush_events();
            }
            if self.should_suspend {
                tui.suspend()?;
                action_tx.send(act!(Command::Resume))?;
                tui.resume()?;
            } else if self.should_quit {
                tui.stop()?;
                break;
            }
        }
        tui.exit()?;
        Ok(())
    }

    fn apply_home(&mut self, command: HomeAction) {
        match command {
            HomeAction::Start => {
                self.game.start();
            },
            HomeAction::ToggleMute => {
                if self.game.menu_toggle() {
                    self.player.toggle_mute();
                }
            },
            HomeAction::ToggleNight => {
                if self.game.menu_toggle() {
                    self.theme = self.theme.toggled();
                }
            },
            HomeAction::Up | HomeAction::Down | HomeAction::Select => {},
        }
    }

    fn apply_game(&mut self, command: GameAction) {
        match command {
            GameAction::Flap => {
                self.game.primary_action();
            },
            GameAction::Pause => {
                self.game.toggle_pause();
            },
            GameAction::Restart => {
                self.game.restart();
            },
            GameAction::Home => {
                self.game.go_home();
            },
        }
    }

    /// Opening help mid-run pauses the game so the bird is not lost behind it.
    fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
        if self.show_help && self.game.state() == RunState::Playing && !self.game.is_paused() {
            self.game.toggle_pause();
        }
    }

    fn flush_events(&mut self) {
        for event in self.game.drain_events() {
            match event {
                GameEvent::Sound(sound) => {
                    if let Err(e) = self.player.play(sound, &mut tui::io()) {
                        log::warn!("Unable to play {sound}: {e:?}");
                    }
                },
                GameEvent::BestScore(best) => {
                    if let Err(e) = self.store.save(best) {
                        log::error!("Failed to save best score {best}: {e:?}");
                    }
                },
                GameEvent::StateChanged { from, to } => log::debug!("state {from} -> {to}"),
            }
        }
    }

    fn fit_playfield(&mut self, size: Size) {
        let area = Rect::new(0, 0, size.width, size.height);
        if !ui::fits(area) {
            return;
        }
        let (width, height) = ui::viewport(ui::playable_screen(area.inner(Margin { horizontal: 1, vertical: 1 })));
        self.game.resize(width, height);
    }

    fn render(&mut self, tui: &mut tui::Tui, action_tx: &UnboundedSender<Action>) -> Result<()> {
        let id = self.active_page_id();
        let help = self.show_help.then(|| self.help(id));
        let border_style = self.config.style(self.theme, "border");
        let scene = Scene { game: &self.game, muted: self.player.is_muted(), theme: self.theme };
        let pages = &mut self.pages;

        tui.draw(|f| {
            if !ui::show_resize_screen_message(f) {
                return;
            }
            let playfield = ui::playable_screen(f.area().inner(Margin { horizontal: 1, vertical: 1 }));
            let frame = Rect::new(playfield.x - 1, playfield.y - 1, playfield.width + 2, playfield.height + 2);
            ui::render_border(f, frame, border_style);

            if let Some(page) = pages.iter_mut().find(|page| page.id() == id) {
                if let Err(e) = page.draw(f, playfield, &scene) {
                    let _ = action_tx.send(act!(Command::Error(format!("Failed to draw: {e:?}"))));
                }
            }

            if let Some(help) = help {
                Self::draw_help(f, playfield, help);
            }
        })?;

        Ok(())
    }

    fn help(&self, id: PageId) -> Help {
        let mut groups = vec![("System".to_string(), self.config.keybindings.global.clone())];
        if let Some(bindings) = self.config.keybindings.pages.get(&id) {
            groups.push((id.to_string(), bindings.clone()));
        }
        Help::new(groups)
    }

    fn draw_help(f: &mut Frame<'_>, rect: Rect, help: Help) {
        f.render_widget(help, rect);
    }
}
