use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    text::Text,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::constants::{MIN_HEIGHT, MIN_WIDTH, PLAYFIELD_ASPECT};

#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    Day,
    Night,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Day => Theme::Night,
            Theme::Night => Theme::Day,
        }
    }

    pub fn palette(self) -> &'static Palette {
        match self {
            Theme::Day => &DAY,
            Theme::Night => &NIGHT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub sky: Color,
    pub skyline: Color,
    pub window: Color,
    pub bush: Color,
    pub pipe: Color,
    pub pipe_light: Color,
    pub pipe_dark: Color,
    pub grass: Color,
    pub grass_light: Color,
    pub dirt: Color,
    pub dirt_dark: Color,
    pub bird: Color,
    pub bird_wing: Color,
    pub bird_eye: Color,
    pub bird_pupil: Color,
    pub bird_beak: Color,
    pub digit: Color,
    pub digit_shadow: Color,
}

const DAY: Palette = Palette {
    sky: Color::from_u32(0x4ec0ca),
    skyline: Color::from_u32(0xa3d9b4),
    window: Color::from_u32(0xd7efe0),
    bush: Color::from_u32(0x5ee270),
    pipe: Color::from_u32(0x73bf2e),
    pipe_light: Color::from_u32(0x9ce659),
    pipe_dark: Color::from_u32(0x558022),
    grass: Color::from_u32(0x5ee270),
    grass_light: Color::from_u32(0x9ce659),
    dirt: Color::from_u32(0xded895),
    dirt_dark: Color::from_u32(0xd2b96e),
    bird: Color::from_u32(0xf5c842),
    bird_wing: Color::from_u32(0xfcf4e0),
    bird_eye: Color::from_u32(0xffffff),
    bird_pupil: Color::from_u32(0x141414),
    bird_beak: Color::from_u32(0xe14b23),
    digit: Color::from_u32(0xffffff),
    digit_shadow: Color::from_u32(0x1e1e1e),
};

const NIGHT: Palette = Palette {
    sky: Color::from_u32(0x008793),
    skyline: Color::from_u32(0x0b5e6b),
    window: Color::from_u32(0xf7e26b),
    bush: Color::from_u32(0x1f8a4c),
    pipe: Color::from_u32(0x4e8f1f),
    pipe_light: Color::from_u32(0x73bf2e),
    pipe_dark: Color::from_u32(0x2f5a12),
    grass: Color::from_u32(0x3fa34d),
    grass_light: Color::from_u32(0x5ee270),
    dirt: Color::from_u32(0xb7ad6c),
    dirt_dark: Color::from_u32(0x9c8a52),
    bird: Color::from_u32(0xf5c842),
    bird_wing: Color::from_u32(0xfcf4e0),
    bird_eye: Color::from_u32(0xffffff),
    bird_pupil: Color::from_u32(0x141414),
    bird_beak: Color::from_u32(0xe14b23),
    digit: Color::from_u32(0xfcf4e0),
    digit_shadow: Color::from_u32(0x000000),
};

pub const BORDER: Color = Color::from_u32(0x6060d7);

/// Largest area with the playfield aspect ratio, centered in `r`.
/// Cells are two pixels tall, so the ratio is taken over `rows * 2`.
pub fn playable_screen(r: Rect) -> Rect {
    let pixel_height = r.height as f32 * 2.0;
    let (width, height) = if pixel_height * PLAYFIELD_ASPECT <= r.width as f32 {
        ((pixel_height * PLAYFIELD_ASPECT).round() as u16, r.height)
    } else {
        (r.width, ((r.width as f32 / PLAYFIELD_ASPECT) / 2.0).round().min(r.height as f32) as u16)
    };

    let [area] = Layout::vertical([Constraint::Length(height)]).flex(Flex::Center).areas(r);
    let [area] = Layout::horizontal([Constraint::Length(width)]).flex(Flex::Center).areas(area);
    area
}

/// Simulation viewport in pixels for a playfield in cells.
pub fn viewport(playfield: Rect) -> (f32, f32) {
    (playfield.width as f32, playfield.height as f32 * 2.0)
}

pub fn render_border(frame: &mut Frame, rect: Rect, style: Style) {
    let border = Block::default().borders(Borders::ALL).border_type(BorderType::Rounded).border_style(style);
    frame.render_widget(border, rect);
}

pub fn fits(area: Rect) -> bool {
    area.width >= MIN_WIDTH && area.height >= MIN_HEIGHT
}

pub fn show_resize_screen_message(frame: &mut Frame) -> bool {
    if fits(frame.area()) {
        return true;
    }
    let message = Paragraph::new(Text::styled(
        format!("Please resize the terminal to at least {MIN_WIDTH}x{MIN_HEIGHT}"),
        Style::default().fg(Color::Cyan),
    ))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(BORDER)));
    frame.render_widget(message, frame.area());
    false
}
