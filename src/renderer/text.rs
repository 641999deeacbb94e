//! 8×8 bitmap font for graph labels and graduations.
//!
//! Covers digits, lowercase letters (uppercase falls back to them) and the
//! punctuation labels use. Unknown characters advance without drawing.

use super::{Canvas, Region};

/// Glyph cell size in pixels at scale 1; also the horizontal advance.
pub const GLYPH_SIZE: usize = 8;

/// One byte per row, most significant bit leftmost.
fn glyph(ch: char) -> Option<[u8; 8]> {
    Some(match ch {
        'a' => [0x00, 0x00, 0x3C, 0x02, 0x3E, 0x42, 0x3E, 0x00],
        'b' => [0x40, 0x40, 0x7C, 0x42, 0x42, 0x42, 0x7C, 0x00],
        'c' => [0x00, 0x00, 0x3C, 0x40, 0x40, 0x40, 0x3C, 0x00],
        'd' => [0x02, 0x02, 0x3E, 0x42, 0x42, 0x42, 0x3E, 0x00],
        'e' => [0x00, 0x00, 0x3C, 0x42, 0x7E, 0x40, 0x3C, 0x00],
        'f' => [0x0C, 0x10, 0x3C, 0x10, 0x10, 0x10, 0x10, 0x00],
        'g' => [0x00, 0x00, 0x3E, 0x42, 0x42, 0x3E, 0x02, 0x3C],
        'h' => [0x40, 0x40, 0x7C, 0x42, 0x42, 0x42, 0x42, 0x00],
        'i' => [0x08, 0x00, 0x18, 0x08, 0x08, 0x08, 0x1C, 0x00],
        'j' => [0x04, 0x00, 0x0C, 0x04, 0x04, 0x04, 0x44, 0x38],
        'k' => [0x40, 0x40, 0x44, 0x48, 0x70, 0x48, 0x44, 0x00],
        'l' => [0x18, 0x08, 0x08, 0x08, 0x08, 0x08, 0x1C, 0x00],
        'm' => [0x00, 0x00, 0x76, 0x49, 0x49, 0x49, 0x49, 0x00],
        'n' => [0x00, 0x00, 0x7C, 0x42, 0x42, 0x42, 0x42, 0x00],
        'o' => [0x00, 0x00, 0x3C, 0x42, 0x42, 0x42, 0x3C, 0x00],
        'p' => [0x00, 0x00, 0x7C, 0x42, 0x42, 0x7C, 0x40, 0x40],
        'q' => [0x00, 0x00, 0x3E, 0x42, 0x42, 0x3E, 0x02, 0x02],
        'r' => [0x00, 0x00, 0x5C, 0x62, 0x40, 0x40, 0x40, 0x00],
        's' => [0x00, 0x00, 0x3E, 0x40, 0x3C, 0x02, 0x7C, 0x00],
        't' => [0x10, 0x10, 0x3C, 0x10, 0x10, 0x10, 0x0C, 0x00],
        'u' => [0x00, 0x00, 0x42, 0x42, 0x42, 0x42, 0x3E, 0x00],
        'v' => [0x00, 0x00, 0x42, 0x42, 0x24, 0x24, 0x18, 0x00],
        'w' => [0x00, 0x00, 0x41, 0x49, 0x49, 0x49, 0x36, 0x00],
        'x' => [0x00, 0x00, 0x42, 0x24, 0x18, 0x24, 0x42, 0x00],
        'y' => [0x00, 0x00, 0x42, 0x42, 0x42, 0x3E, 0x02, 0x3C],
        'z' => [0x00, 0x00, 0x7E, 0x04, 0x18, 0x20, 0x7E, 0x00],
        'θ' => [0x18, 0x24, 0x42, 0x7E, 0x42, 0x24, 0x18, 0x00],
        '0' => [0x3C, 0x42, 0x46, 0x5A, 0x62, 0x42, 0x3C, 0x00],
        '1' => [0x08, 0x18, 0x28, 0x08, 0x08, 0x08, 0x3E, 0x00],
        '2' => [0x3C, 0x42, 0x02, 0x0C, 0x30, 0x40, 0x7E, 0x00],
        '3' => [0x3C, 0x42, 0x02, 0x1C, 0x02, 0x42, 0x3C, 0x00],
        '4' => [0x04, 0x0C, 0x14, 0x24, 0x7E, 0x04, 0x04, 0x00],
        '5' => [0x7E, 0x40, 0x7C, 0x02, 0x02, 0x42, 0x3C, 0x00],
        '6' => [0x1C, 0x20, 0x40, 0x7C, 0x42, 0x42, 0x3C, 0x00],
        '7' => [0x7E, 0x02, 0x04, 0x08, 0x10, 0x10, 0x10, 0x00],
        '8' => [0x3C, 0x42, 0x42, 0x3C, 0x42, 0x42, 0x3C, 0x00],
        '9' => [0x3C, 0x42, 0x42, 0x3E, 0x02, 0x04, 0x38, 0x00],
        ' ' => [0x00; 8],
        '-' => [0x00, 0x00, 0x00, 0x3C, 0x00, 0x00, 0x00, 0x00],
        '+' => [0x00, 0x08, 0x08, 0x3E, 0x08, 0x08, 0x00, 0x00],
        '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x18, 0x18, 0x00],
        ',' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x18, 0x08, 0x10],
        '|' => [0x08, 0x08, 0x08, 0x08, 0x08, 0x08, 0x08, 0x00],
        '(' => [0x04, 0x08, 0x10, 0x10, 0x10, 0x08, 0x04, 0x00],
        ')' => [0x20, 0x10, 0x08, 0x08, 0x08, 0x10, 0x20, 0x00],
        _ => return None,
    })
}

fn lookup(ch: char) -> Option<[u8; 8]> {
    glyph(ch).or_else(|| glyph(ch.to_ascii_lowercase()))
}

/// Pixel size of `text` drawn at `scale`.
pub fn text_size(text: &str, scale: usize) -> (usize, usize) {
    let scale = scale.max(1);
    (text.chars().count() * GLYPH_SIZE * scale, GLYPH_SIZE * scale)
}

/// Draw `text` with its top-left corner at (`x`, `y`), clipped to `clip`.
pub fn draw_text(
    canvas: &mut Canvas,
    clip: Region,
    x: isize,
    y: isize,
    text: &str,
    color: (u8, u8, u8),
    scale: usize,
) {
    let scale = scale.max(1);
    let advance = (GLYPH_SIZE * scale) as isize;

    for (i, ch) in text.chars().enumerate() {
        let Some(bitmap) = lookup(ch) else {
            continue;
        };
        let origin_x = x + i as isize * advance;

        for (row_idx, &row) in bitmap.iter().enumerate() {
            for col in 0..GLYPH_SIZE {
                if (row >> (7 - col)) & 1 == 0 {
                    continue;
                }
                for sy in 0..scale {
                    for sx in 0..scale {
                        let px = origin_x + (col * scale + sx) as isize;
                        let py = y + (row_idx * scale + sy) as isize;
                        if clip.contains(px, py) {
                            canvas.put_pixel(px as usize, py as usize, color);
                        }
                    }
                }
            }
        }
    }
}
