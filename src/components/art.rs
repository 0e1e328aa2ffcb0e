use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::Style,
    widgets::Widget,
};

/// Multi-line text art. Whitespace is transparent, so whatever was drawn
/// underneath (the sky, usually) shows through.
#[derive(Debug, Clone, Default)]
pub struct AsciiArt<'a> {
    lines: Vec<&'a str>,
    style: Style,
}

impl<'a> AsciiArt<'a> {
    /// Leading and trailing blank lines are dropped.
    pub fn new(text: &'a str) -> Self {
        let lines: Vec<&str> = text.lines().collect();
        let first = lines.iter().position(|l| !l.trim().is_empty()).unwrap_or(lines.len());
        let last = lines.iter().rposition(|l| !l.trim().is_empty()).map_or(first, |i| i + 1);
        AsciiArt { lines: lines[first..last].to_vec(), style: Style::default() }
    }

    pub fn style(self, style: Style) -> Self {
        Self { style, ..self }
    }

    pub fn width(&self) -> u16 {
        self.lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as u16
    }

    pub fn height(&self) -> u16 {
        self.lines.len() as u16
    }

    /// Rectangle of the art's size centered on the given cell, clipped to `bounds`.
    pub fn centered_on(&self, column: i32, row: i32, bounds: Rect) -> Rect {
        let x = (column - self.width() as i32 / 2).max(bounds.x as i32) as u16;
        let y = (row - self.height() as i32 / 2).max(bounds.y as i32) as u16;
        Rect::new(x, y, self.width(), self.height()).intersection(bounds)
    }
}

impl Widget for AsciiArt<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for (row, line) in self.lines.iter().enumerate().take(area.height as usize) {
            for (col, ch) in line.chars().enumerate().take(area.width as usize) {
                if ch.is_whitespace() {
                    continue;
                }
                let position = Position::new(area.x + col as u16, area.y + row as u16);
                if let Some(cell) = buf.cell_mut(position) {
                    cell.set_char(ch);
                    if let Some(fg) = self.style.fg {
                        cell.set_fg(fg);
                    }
                    if let Some(bg) = self.style.bg {
                        cell.set_bg(bg);
                    }
                    cell.modifier.insert(self.style.add_modifier);
                }
            }
        }
    }
}
