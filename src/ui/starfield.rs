use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use ratatui::{buffer::Buffer, layout::Rect, style::Style};

const GLYPHS: [char; 6] = ['·', '∙', '•', '*', '✦', '✧'];

/// One cell of sky per this many cells of screen.
const DENSITY: u32 = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Star {
    pub x: u16,
    pub y: u16,
    pub glyph: char,
}

/// Star layout for a sky of `width` x `height`.
///
/// Seeded from the dimensions, so the same sky is drawn every frame and only
/// changes when the terminal is resized.
pub fn stars(width: u16, height: u16) -> Vec<Star> {
    if width == 0 || height == 0 {
        return Vec::new();
    }
    let seed = ((width as u64) << 16) | height as u64;
    let mut rng = StdRng::seed_from_u64(seed);
    let count = (width as u32 * height as u32) / DENSITY;

    (0..count)
        .map(|_| Star {
            x: rng.gen_range(0..width),
            y: rng.gen_range(0..height),
            glyph: *GLYPHS.choose(&mut rng).unwrap_or(&'·'),
        })
        .collect()
}

/// Column a star occupies after drifting `phase` steps to the right.
pub fn drifted_x(x: u16, phase: u64, width: u16) -> u16 {
    if width == 0 {
        return 0;
    }
    ((x as u64 + phase) % width as u64) as u16
}

pub fn render(area: Rect, phase: u64, style: Style, buf: &mut Buffer) {
    for star in stars(area.width, area.height) {
        let x = area.x + drifted_x(star.x, phase, area.width);
        if let Some(cell) = buf.cell_mut((x, area.y + star.y)) {
            cell.set_char(star.glyph);
            cell.set_style(style);
        }
    }
}
