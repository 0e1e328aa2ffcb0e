use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::Color,
    widgets::Widget,
};

const UPPER_HALF: &str = "\u{2580}";

/// Off-screen pixel buffer drawn with half blocks, two pixels per cell.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelCanvas {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}

impl PixelCanvas {
    pub fn new(width: usize, height: usize, fill: Color) -> Self {
        PixelCanvas { width, height, pixels: vec![fill; width * height] }
    }

    /// Canvas covering `area` at full resolution.
    pub fn for_area(area: Rect, fill: Color) -> Self {
        Self::new(area.width as usize, area.height as usize * 2, fill)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Color> {
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    pub fn set(&mut self, x: i32, y: i32, color: Color) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.pixels[y as usize * self.width + x as usize] = color;
        }
    }

    /// Fills the pixels covered by a float rectangle; anything off-canvas is clipped.
    pub fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        let left = x.round() as i32;
        let top = y.round() as i32;
        let right = (x + width).round() as i32;
        let bottom = (y + height).round() as i32;
        for py in top.max(0)..bottom.min(self.height as i32) {
            for px in left.max(0)..right.min(self.width as i32) {
                self.set(px, py, color);
            }
        }
    }

    pub fn hline(&mut self, x: f32, y: f32, width: f32, color: Color) {
        self.fill_rect(x, y, width, 1.0, color);
    }
}

impl Widget for &PixelCanvas {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rows = (self.height / 2).min(area.height as usize);
        let cols = self.width.min(area.width as usize);
        for row in 0..rows {
            for col in 0..cols {
                let top = self.pixels[row * 2 * self.width + col];
                let bottom = self.pixels[(row * 2 + 1) * self.width + col];
                let position = Position::new(area.x + col as u16, area.y + row as u16);
                if let Some(cell) = buf.cell_mut(position) {
                    if top == bottom {
                        cell.set_symbol(" ").set_bg(top);
                    } else {
                        cell.set_symbol(UPPER_HALF).set_fg(top).set_bg(bottom);
                    }
                }
            }
        }
    }
}
