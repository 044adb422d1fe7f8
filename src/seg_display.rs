use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::pixels::Color;
use sdl2::video::Window;


//  _a_
// f   b
//  _g_
// e   c
//  _d_
const SEG_A: u8 = 1 << 0;
const SEG_B: u8 = 1 << 1;
const SEG_C: u8 = 1 << 2;
const SEG_D: u8 = 1 << 3;
const SEG_E: u8 = 1 << 4;
const SEG_F: u8 = 1 << 5;
const SEG_G: u8 = 1 << 6;


/// Dimensions of a single seven-segment glyph.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct SegmentSize {
    pub length: u32,
    pub thickness: u32,
    pub spacing: u32,
}
impl SegmentSize {
    pub const LARGE: Self = Self { length: 24, thickness: 6, spacing: 8 };

    /// Horizontal distance from one glyph to the next.
    pub fn advance(&self) -> u32 {
        self.length + self.spacing
    }

    pub fn glyph_height(&self) -> u32 {
        2 * self.length - self.thickness
    }
}


/// Returns the lit segments for a character, or `None` if the display cannot show it.
///
/// Letters take the shapes a seven-segment display can approximate, so `M` becomes `n` and `V`
/// becomes `U`.
pub(crate) fn glyph_segments(c: char) -> Option<u8> {
    let segments = match c.to_ascii_uppercase() {
        ' ' => 0,
        '0' | 'O' => SEG_A | SEG_B | SEG_C | SEG_D | SEG_E | SEG_F,
        '1' => SEG_B | SEG_C,
        '2' => SEG_A | SEG_B | SEG_D | SEG_E | SEG_G,
        '3' => SEG_A | SEG_B | SEG_C | SEG_D | SEG_G,
        '4' => SEG_B | SEG_C | SEG_F | SEG_G,
        '5' => SEG_A | SEG_C | SEG_D | SEG_F | SEG_G,
        '6' => SEG_A | SEG_C | SEG_D | SEG_E | SEG_F | SEG_G,
        '7' => SEG_A | SEG_B | SEG_C,
        '8' => SEG_A | SEG_B | SEG_C | SEG_D | SEG_E | SEG_F | SEG_G,
        '9' => SEG_A | SEG_B | SEG_C | SEG_D | SEG_F | SEG_G,
        'A' => SEG_A | SEG_B | SEG_C | SEG_E | SEG_F | SEG_G,
        'E' => SEG_A | SEG_D | SEG_E | SEG_F | SEG_G,
        'G' => SEG_A | SEG_C | SEG_D | SEG_E | SEG_F,
        'M' | 'N' => SEG_C | SEG_E | SEG_G,
        'R' => SEG_E | SEG_G,
        'U' | 'V' => SEG_B | SEG_C | SEG_D | SEG_E | SEG_F,
        _ => return None,
    };
    Some(segments)
}


pub(crate) struct SegmentedDisplay {
    x: i32,
    y: i32,
    color: Color,
    size: SegmentSize,
    segments: u8,
}
impl SegmentedDisplay {
    pub fn new<C: Into<Color>>(x: i32, y: i32, color: C, size: SegmentSize, segments: u8) -> Self {
        Self {
            x,
            y,
            color: color.into(),
            size,
            segments,
        }
    }

    /// Returns the rectangles of the lit segments.
    pub fn segment_rects(&self) -> Vec<Rect> {
        let length = self.size.length;
        let thickness = self.size.thickness;
        let space_over = i32::try_from(length - thickness).unwrap_or(0);

        let mut rects = Vec::with_capacity(7);
        if self.segments & SEG_A != 0 {
            rects.push(Rect::new(self.x, self.y, length, thickness));
        }
        if self.segments & SEG_B != 0 {
            rects.push(Rect::new(self.x + space_over, self.y, thickness, length));
        }
        if self.segments & SEG_C != 0 {
            rects.push(Rect::new(self.x + space_over, self.y + space_over, thickness, length));
        }
        if self.segments & SEG_D != 0 {
            rects.push(Rect::new(self.x, self.y + 2*space_over, length, thickness));
        }
        if self.segments & SEG_E != 0 {
            rects.push(Rect::new(self.x, self.y + space_over, thickness, length));
        }
        if self.segments & SEG_F != 0 {
            rects.push(Rect::new(self.x, self.y, thickness, length));
        }
        if self.segments & SEG_G != 0 {
            rects.push(Rect::new(self.x, self.y + space_over, length, thickness));
        }
        rects
    }

    pub fn draw(&self, canvas: &mut Canvas<Window>) -> Result<(), String> {
        canvas.set_draw_color(self.color);
        for rect in self.segment_rects() {
            canvas.fill_rect(rect)?;
        }
        Ok(())
    }
}


/// Width in pixels of a line of text.
pub(crate) fn text_width(text: &str, size: SegmentSize) -> u32 {
    let count = u32::try_from(text.chars().count()).unwrap_or(u32::MAX);
    if count == 0 {
        0
    } else {
        count.saturating_mul(size.advance()) - size.spacing
    }
}


/// Draws a line of text starting at the given top-left corner. Characters without a glyph are
/// left blank.
pub(crate) fn draw_text<C: Into<Color>>(
    canvas: &mut Canvas<Window>,
    x: i32,
    y: i32,
    color: C,
    size: SegmentSize,
    text: &str,
) -> Result<(), String> {
    let color = color.into();
    let advance = i32::try_from(size.advance()).unwrap_or(i32::MAX);
    let mut glyph_x = x;
    for c in text.chars() {
        if let Some(segments) = glyph_segments(c) {
            SegmentedDisplay::new(glyph_x, y, color, size, segments)
                .draw(canvas)?;
        }
        glyph_x = glyph_x.saturating_add(advance);
    }
    Ok(())
}
