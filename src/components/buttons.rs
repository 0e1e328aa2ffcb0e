use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};
use strum::Display;

use crate::game::RunState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ButtonId {
    Start,
    Restart,
    Home,
    Pause,
    Mute,
    Night,
}

/// Button position and size as fractions of the playfield.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Ratios {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

const WIDE: (f32, f32) = (0.276, 0.068);
const SMALL: (f32, f32) = (0.088, 0.069);
const BOTTOM_ROW: f32 = 0.759;
const TOP_ROW: f32 = 0.045;

impl ButtonId {
    fn ratios(self) -> Ratios {
        let ((width, height), x, y) = match self {
            ButtonId::Start => (WIDE, 0.359, BOTTOM_ROW),
            ButtonId::Restart => (WIDE, 0.147, BOTTOM_ROW),
            ButtonId::Home => (WIDE, 0.576, BOTTOM_ROW),
            // pause and mute share a slot; they never show together
            ButtonId::Pause | ButtonId::Mute => (SMALL, 0.087, TOP_ROW),
            ButtonId::Night => (SMALL, 0.189, TOP_ROW),
        };
        Ratios { x, y, width, height }
    }

    /// Buttons that are shown and clickable in a run state.
    pub fn visible_in(state: RunState) -> &'static [ButtonId] {
        match state {
            RunState::Home => &[ButtonId::Start, ButtonId::Mute, ButtonId::Night],
            RunState::GetReady => &[],
            RunState::Playing => &[ButtonId::Pause],
            RunState::GameOver => &[ButtonId::Restart, ButtonId::Home],
        }
    }

    /// Cell rectangle the button is drawn into, at least one cell in each direction.
    pub fn rect(self, playfield: Rect) -> Rect {
        let r = self.ratios();
        let x = playfield.x + (r.x * playfield.width as f32).floor() as u16;
        let y = playfield.y + (r.y * playfield.height as f32).floor() as u16;
        let width = ((r.width * playfield.width as f32).ceil() as u16).max(1);
        let height = ((r.height * playfield.height as f32).ceil() as u16).max(1);
        Rect::new(x, y, width, height).intersection(playfield)
    }

    /// Hit test of a terminal cell against the drawn button.
    pub fn contains(self, playfield: Rect, column: u16, row: u16) -> bool {
        self.rect(playfield).contains((column, row).into())
    }

    /// Topmost visible button under the cell.
    pub fn hit(state: RunState, playfield: Rect, column: u16, row: u16) -> Option<ButtonId> {
        Self::visible_in(state).iter().copied().find(|button| button.contains(playfield, column, row))
    }
}

/// Clickable label; bordered when there is room for it.
#[derive(Debug, Clone)]
pub struct Button<'a> {
    label: &'a str,
    style: Style,
    highlighted: bool,
}

impl<'a> Button<'a> {
    pub fn new(label: &'a str) -> Self {
        Button { label, style: Style::default(), highlighted: false }
    }

    pub fn style(self, style: Style) -> Self {
        Self { style, ..self }
    }

    pub fn highlighted(self, highlighted: bool) -> Self {
        Self { highlighted, ..self }
    }
}

impl Widget for Button<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = if self.highlighted { self.style.add_modifier(Modifier::REVERSED) } else { self.style };
        let inner = if area.height >= 3 && area.width >= 3 {
            let block = Block::default().borders(Borders::ALL).border_type(BorderType::Rounded).style(style);
            let inner = block.inner(area);
            block.render(area, buf);
            inner
        } else {
            area
        };
        let [line] = Layout::vertical([Constraint::Length(1)]).flex(Flex::Center).areas(inner);
        Paragraph::new(self.label).style(style).alignment(Alignment::Center).render(line, buf);
    }
}
