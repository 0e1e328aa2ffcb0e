//! Pixel art for the playfield, drawn into a [`PixelCanvas`] in simulation
//! coordinates (one simulation unit is one pixel).

use ratatui::style::Color;

use crate::{
    components::pixels::PixelCanvas,
    game::{bird::Bird, foreground::Foreground, params::SimulationConfig, pipes::Pipes},
    ui::Palette,
};

/// Bird frames, wing up / level / down. `.` is transparent.
const BIRD_SPRITES: [[&str; 6]; 3] = [
    ["..YYYE..", "WWYYEEP.", "WWWYYEE.", ".YYYYBBB", ".YYYYBB.", "..YYYY.."],
    ["..YYYE..", ".YYYEEP.", "WWYYYEE.", "WWWYYBBB", ".YYYYBB.", "..YYYY.."],
    ["..YYYE..", ".YYYEEP.", ".YYYYEE.", "WWYYYBBB", "WWWYYBB.", "..YYYY.."],
];

/// Nose-down rotation threshold in degrees.
const DIVE_THRESHOLD_DEG: f32 = 45.0;

#[rustfmt::skip]
const DIGITS: [[u8; 15]; 10] = [
    [1,1,1, 1,0,1, 1,0,1, 1,0,1, 1,1,1],
    [0,1,0, 1,1,0, 0,1,0, 0,1,0, 1,1,1],
    [1,1,1, 0,0,1, 1,1,1, 1,0,0, 1,1,1],
    [1,1,1, 0,0,1, 0,1,1, 0,0,1, 1,1,1],
    [1,0,1, 1,0,1, 1,1,1, 0,0,1, 0,0,1],
    [1,1,1, 1,0,0, 1,1,1, 0,0,1, 1,1,1],
    [1,1,1, 1,0,0, 1,1,1, 1,0,1, 1,1,1],
    [1,1,1, 0,0,1, 0,1,0, 0,1,0, 0,1,0],
    [1,1,1, 1,0,1, 1,1,1, 1,0,1, 1,1,1],
    [1,1,1, 1,0,1, 1,1,1, 0,0,1, 1,1,1],
];
const DIGIT_WIDTH: i32 = 3;
const DIGIT_HEIGHT: i32 = 5;
const DIGIT_SPACING: i32 = 1;

const SKYLINE: [(f32, f32); 8] =
    [(0.10, 0.07), (0.08, 0.11), (0.12, 0.05), (0.07, 0.09), (0.14, 0.06), (0.09, 0.12), (0.11, 0.08), (0.29, 0.04)];

/// Sky, city skyline and bushes.
pub fn draw_backdrop(canvas: &mut PixelCanvas, config: &SimulationConfig, palette: &Palette) {
    canvas.fill_rect(0.0, 0.0, config.width, config.height, palette.sky);

    let ground = config.foreground_y;
    let mut x = 0.0;
    for (i, (width, height)) in SKYLINE.iter().cycle().enumerate() {
        if x >= config.width {
            break;
        }
        let w = width * config.width;
        let h = height * config.height;
        canvas.fill_rect(x, ground - h, w, h, palette.skyline);
        if i % 2 == 0 {
            let mut wy = ground - h + 2.0;
            while wy < ground - 3.0 {
                canvas.set((x + w / 2.0) as i32, wy as i32, palette.window);
                wy += 3.0;
            }
        }
        x += w;
    }

    let bush_height = (config.height * 0.03).max(1.0);
    canvas.fill_rect(0.0, ground - bush_height, config.width, bush_height, palette.bush);
}

pub fn draw_pipes(canvas: &mut PixelCanvas, pipes: &Pipes, config: &SimulationConfig, palette: &Palette) {
    let cap_height = (config.height * 0.025).max(2.0);
    let lip = (config.pipe_width * 0.08).max(1.0);
    for pipe in pipes.iter() {
        let top = pipe.top(config);
        let bottom = pipe.bottom(config);
        draw_pipe_body(canvas, top.left, top.top, config.pipe_width, top.bottom - top.top, palette);
        draw_pipe_body(canvas, bottom.left, bottom.top, config.pipe_width, bottom.bottom - bottom.top, palette);

        // caps face the gap
        let cap_width = config.pipe_width + 2.0 * lip;
        canvas.fill_rect(top.left - lip, top.bottom - cap_height, cap_width, cap_height, palette.pipe_dark);
        canvas.fill_rect(bottom.left - lip, bottom.top, cap_width, cap_height, palette.pipe_dark);
    }
}

fn draw_pipe_body(canvas: &mut PixelCanvas, x: f32, y: f32, width: f32, height: f32, palette: &Palette) {
    let stripe = (width * 0.2).max(1.0);
    canvas.fill_rect(x, y, width, height, palette.pipe);
    canvas.fill_rect(x + stripe * 0.5, y, stripe, height, palette.pipe_light);
    canvas.fill_rect(x + width - stripe, y, stripe, height, palette.pipe_dark);
}

/// Ground strip with diagonal stripes that follow the scroll offset.
pub fn draw_foreground(canvas: &mut PixelCanvas, foreground: &Foreground, palette: &Palette) {
    let top = foreground.y().round() as i32;
    let offset = foreground.x().round() as i32;
    for y in top.max(0)..canvas.height() as i32 {
        for x in 0..canvas.width() as i32 {
            let color = match y - top {
                0 => palette.grass_light,
                1 | 2 => palette.grass,
                depth if (x - offset + depth).rem_euclid(6) < 3 => palette.dirt_dark,
                _ => palette.dirt,
            };
            canvas.set(x, y, color);
        }
    }
}

/// Sprite rows for the bird's current frame and attitude.
pub fn bird_sprite(bird: &Bird) -> Vec<Vec<char>> {
    let rows: Vec<Vec<char>> = BIRD_SPRITES[bird.frame() % BIRD_SPRITES.len()]
        .iter()
        .map(|row| row.chars().collect())
        .collect();
    if bird.rotation() >= DIVE_THRESHOLD_DEG {
        rotate_clockwise(&rows)
    } else {
        rows
    }
}

fn rotate_clockwise(rows: &[Vec<char>]) -> Vec<Vec<char>> {
    let height = rows.len();
    let width = rows.first().map_or(0, Vec::len);
    (0..width).map(|x| (0..height).rev().map(|y| rows[y][x]).collect()).collect()
}

/// Draws the bird sprite resampled onto its `bird_width` x `bird_height` box,
/// centered on the bird. The box turns with the sprite when diving.
pub fn draw_bird(canvas: &mut PixelCanvas, bird: &Bird, config: &SimulationConfig, palette: &Palette) {
    let sprite = bird_sprite(bird);
    let (source_width, source_height) = (sprite.first().map_or(0, Vec::len), sprite.len());
    if source_width == 0 || source_height == 0 {
        return;
    }
    let (width, height) = if source_height > source_width {
        (config.bird_height, config.bird_width)
    } else {
        (config.bird_width, config.bird_height)
    };
    let columns = width.round().max(1.0) as usize;
    let rows = height.round().max(1.0) as usize;
    let left = (bird.x() - columns as f32 / 2.0).round() as i32;
    let top = (bird.y() - rows as f32 / 2.0).round() as i32;

    for row in 0..rows {
        let sy = (((row as f32 + 0.5) * source_height as f32 / rows as f32) as usize).min(source_height - 1);
        for column in 0..columns {
            let sx = (((column as f32 + 0.5) * source_width as f32 / columns as f32) as usize).min(source_width - 1);
            let color = match sprite[sy][sx] {
                'Y' => palette.bird,
                'W' => palette.bird_wing,
                'E' => palette.bird_eye,
                'P' => palette.bird_pupil,
                'B' => palette.bird_beak,
                _ => continue,
            };
            canvas.set(left + column as i32, top + row as i32, color);
        }
    }
}

/// Width in pixels of `value` drawn by [`draw_number`].
pub fn number_width(value: u32, scale: i32) -> i32 {
    let digits = value.to_string().len() as i32;
    (digits * (DIGIT_WIDTH + DIGIT_SPACING) - DIGIT_SPACING) * scale
}

/// Draws `value` with its top edge at `top`, horizontally centered on `center_x`.
pub fn draw_number(canvas: &mut PixelCanvas, value: u32, center_x: i32, top: i32, scale: i32, palette: &Palette) {
    let mut left = center_x - number_width(value, scale) / 2;
    for digit in value.to_string().bytes().map(|b| (b - b'0') as usize) {
        draw_digit(canvas, digit, left + scale, top + scale, scale, palette.digit_shadow);
        draw_digit(canvas, digit, left, top, scale, palette.digit);
        left += (DIGIT_WIDTH + DIGIT_SPACING) * scale;
    }
}

fn draw_digit(canvas: &mut PixelCanvas, digit: usize, left: i32, top: i32, scale: i32, color: Color) {
    for (i, on) in DIGITS[digit].iter().enumerate() {
        if *on == 0 {
            continue;
        }
        let x = left + (i as i32 % DIGIT_WIDTH) * scale;
        let y = top + (i as i32 / DIGIT_WIDTH) * scale;
        for dy in 0..scale {
            for dx in 0..scale {
                canvas.set(x + dx, y + dy, color);
            }
        }
    }
}

/// Digit scale that keeps the score readable at any viewport height.
pub fn digit_scale(config: &SimulationConfig) -> i32 {
    ((config.height / (DIGIT_HEIGHT as f32 * 12.0)).round() as i32).max(1)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{game::object::Object, ui::Theme};

    const BIRD_SPRITE_WIDTH: usize = 8;

    fn config() -> SimulationConfig {
        SimulationConfig::from_viewport(72.0, 100.0)
    }

    #[test]
    fn test_sprites_are_rectangular() {
        for frame in BIRD_SPRITES {
            assert!(frame.iter().all(|row| row.len() == BIRD_SPRITE_WIDTH));
        }
    }

    #[test]
    fn test_rotate_swaps_dimensions() {
        let rows: Vec<Vec<char>> = BIRD_SPRITES[0].iter().map(|r| r.chars().collect()).collect();
        let rotated = rotate_clockwise(&rows);
        assert_eq!(rotated.len(), 8);
        assert_eq!(rotated[0].len(), 6);
        // top-left of the rotated sprite is the old bottom-left
        assert_eq!(rotated[0][0], rows[5][0]);
    }

    #[test]
    fn test_bird_drawn_at_its_position() {
        let config = config();
        let palette = Theme::Day.palette();
        let bird = Bird::new(&config);
        let mut canvas = PixelCanvas::new(72, 100, palette.sky);
        draw_bird(&mut canvas, &bird, &config, palette);
        assert_eq!(canvas.get(bird.x().round() as usize, bird.y().round() as usize), Some(palette.bird));
    }

    /// Every painted pixel of the bird, as `(x, y)`.
    fn painted(bird: &Bird, config: &SimulationConfig) -> Vec<(usize, usize)> {
        let palette = Theme::Day.palette();
        let (width, height) = (config.width as usize, config.height as usize);
        let mut canvas = PixelCanvas::new(width, height, Color::Reset);
        draw_bird(&mut canvas, bird, config, palette);
        (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .filter(|&(x, y)| canvas.get(x, y) != Some(Color::Reset))
            .collect()
    }

    #[test]
    fn test_bird_sprite_fits_its_hitbox() {
        let config = SimulationConfig::from_viewport(32.0, 44.0);
        let mut bird = Bird::new(&config);
        let level = painted(&bird, &config);

        bird.flap(-config.jump * 2.0);
        bird.tilt(config.jump);
        assert!(bird.rotation() >= DIVE_THRESHOLD_DEG);
        let diving = painted(&bird, &config);

        let bounds = bird.bounds();
        for (x, y) in level.iter().chain(&diving) {
            // pixel centers, one pixel of slack
            let (x, y) = (*x as f32 + 0.5, *y as f32 + 0.5);
            assert!(x >= bounds.left - 1.0 && x <= bounds.right + 1.0, "column {x} outside {bounds:?}");
            assert!(y >= bounds.top - 1.0 && y <= bounds.bottom + 1.0, "row {y} outside {bounds:?}");
        }
        assert!(!level.is_empty());
        assert!(!diving.is_empty());
    }

    #[test]
    fn test_bird_keeps_sprite_resolution_when_it_fits() {
        let config = config();
        let bird = Bird::new(&config);
        let painted = painted(&bird, &config);
        let columns = painted.iter().map(|(x, _)| *x).max().zip(painted.iter().map(|(x, _)| *x).min());
        assert_eq!(columns.map(|(max, min)| max - min + 1), Some(BIRD_SPRITE_WIDTH));
    }

    #[test]
    fn test_number_width() {
        assert_eq!(number_width(7, 1), 3);
        assert_eq!(number_width(42, 2), 14);
    }

    #[test]
    fn test_foreground_starts_with_grass() {
        let config = config();
        let palette = Theme::Night.palette();
        let foreground = Foreground::new(&config);
        let mut canvas = PixelCanvas::new(72, 100, palette.sky);
        draw_foreground(&mut canvas, &foreground, palette);
        let top = foreground.y().round() as usize;
        assert_eq!(canvas.get(10, top), Some(palette.grass_light));
        assert_eq!(canvas.get(10, top - 1), Some(palette.sky));
    }
}
