use crate::surface::SurfaceSize;

pub type Color = [u8; 4];

pub const DEFAULT_TEXT_SCALE: u32 = 2;

// Tiny built-in block font; enough for HUD text and tile labels.
const GLYPH_W: u32 = 3;
const GLYPH_H: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    pub const fn from_size(w: u32, h: u32) -> Self {
        Self { x: 0, y: 0, w, h }
    }

    /// Shrinks the rect by `amount` on every side, collapsing to zero size
    /// rather than underflowing.
    pub fn inset(self, amount: u32) -> Self {
        Self {
            x: self.x.saturating_add(amount),
            y: self.y.saturating_add(amount),
            w: self.w.saturating_sub(amount.saturating_mul(2)),
            h: self.h.saturating_sub(amount.saturating_mul(2)),
        }
    }
}

pub fn glyph_advance_x(scale: u32) -> u32 {
    (GLYPH_W + 1) * scale.max(1)
}

pub fn line_advance_y(scale: u32) -> u32 {
    (GLYPH_H + 1) * scale.max(1)
}

/// Pixel width of `text` at `scale`, for centering. Single-line only.
pub fn text_width(text: &str, scale: u32) -> u32 {
    let chars = text.chars().count() as u32;
    if chars == 0 {
        return 0;
    }
    chars * glyph_advance_x(scale) - scale.max(1)
}

pub fn glyph_height(scale: u32) -> u32 {
    GLYPH_H * scale.max(1)
}

/// The 2D drawing interface the game talks to.
///
/// Everything is axis-aligned rects and block-font text; that is all a tile
/// grid needs, and it keeps headless rendering byte-identical to windowed
/// rendering.
pub trait Renderer2d {
    fn begin_frame(&mut self, size: SurfaceSize);
    fn size(&self) -> SurfaceSize;

    /// Opaque fill.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Alpha-blends `color` over existing content.
    fn blend_rect(&mut self, rect: Rect, color: Color, alpha: u8);

    fn rect_outline(&mut self, rect: Rect, color: Color);
    fn draw_text_scaled(&mut self, x: u32, y: u32, text: &str, color: Color, scale: u32);

    fn draw_text(&mut self, x: u32, y: u32, text: &str, color: Color) {
        self.draw_text_scaled(x, y, text, color, DEFAULT_TEXT_SCALE);
    }

    fn clear(&mut self, color: Color) {
        let s = self.size();
        self.fill_rect(Rect::from_size(s.width, s.height), color);
    }
}

/// Draws into a raw RGBA frame buffer.
pub struct CpuRenderer<'a> {
    frame: &'a mut [u8],
    size: SurfaceSize,
}

/// Byte range bookkeeping for one clipped rect.
struct ClippedRows {
    row_start: usize,
    row_bytes: usize,
    stride: usize,
    rows: u32,
}

impl<'a> CpuRenderer<'a> {
    pub fn new(frame: &'a mut [u8], size: SurfaceSize) -> Self {
        Self { frame, size }
    }

    fn clip(&self, rect: Rect) -> Option<ClippedRows> {
        let max_x = rect.x.saturating_add(rect.w).min(self.size.width);
        let max_y = rect.y.saturating_add(rect.h).min(self.size.height);
        if rect.x >= max_x || rect.y >= max_y {
            return None;
        }

        let stride = (self.size.width as usize).checked_mul(4)?;
        let expected_len = stride.checked_mul(self.size.height as usize)?;
        if expected_len == 0 || self.frame.len() < expected_len {
            return None;
        }

        let row_bytes = ((max_x - rect.x) as usize).checked_mul(4)?;
        let row_start = (rect.y as usize)
            .checked_mul(stride)?
            .checked_add((rect.x as usize).checked_mul(4)?)?;

        Some(ClippedRows {
            row_start,
            row_bytes,
            stride,
            rows: max_y - rect.y,
        })
    }
}

impl Renderer2d for CpuRenderer<'_> {
    fn begin_frame(&mut self, size: SurfaceSize) {
        self.size = size;
    }

    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let Some(clipped) = self.clip(rect) else {
            return;
        };

        let mut row_start = clipped.row_start;
        for _ in 0..clipped.rows {
            let row = &mut self.frame[row_start..row_start + clipped.row_bytes];
            for px in row.chunks_exact_mut(4) {
                px.copy_from_slice(&color);
            }
            row_start += clipped.stride;
        }
    }

    fn blend_rect(&mut self, rect: Rect, color: Color, alpha: u8) {
        if alpha == 0 {
            return;
        }
        if alpha == 255 {
            self.fill_rect(rect, color);
            return;
        }
        let Some(clipped) = self.clip(rect) else {
            return;
        };

        let a = alpha as u32;
        let inv = 255u32 - a;
        let mut row_start = clipped.row_start;
        for _ in 0..clipped.rows {
            let row = &mut self.frame[row_start..row_start + clipped.row_bytes];
            for px in row.chunks_exact_mut(4) {
                for ch in 0..3 {
                    let under = px[ch] as u32;
                    px[ch] = ((under * inv + (color[ch] as u32) * a + 127) / 255) as u8;
                }
                px[3] = 255;
            }
            row_start += clipped.stride;
        }
    }

    fn rect_outline(&mut self, rect: Rect, color: Color) {
        if rect.w == 0 || rect.h == 0 {
            return;
        }
        let x1 = rect.x.saturating_add(rect.w).min(self.size.width);
        let y1 = rect.y.saturating_add(rect.h).min(self.size.height);
        if rect.x >= x1 || rect.y >= y1 {
            return;
        }
        let w = x1 - rect.x;
        let h = y1 - rect.y;

        self.fill_rect(Rect::new(rect.x, rect.y, w, 1), color);
        if h > 1 {
            self.fill_rect(Rect::new(rect.x, y1 - 1, w, 1), color);
        }
        self.fill_rect(Rect::new(rect.x, rect.y, 1, h), color);
        if w > 1 {
            self.fill_rect(Rect::new(x1 - 1, rect.y, 1, h), color);
        }
    }

    fn draw_text_scaled(&mut self, x: u32, y: u32, text: &str, color: Color, scale: u32) {
        let scale = scale.max(1);
        let adv_x = glyph_advance_x(scale);
        let adv_y = line_advance_y(scale);

        let mut cursor_x = x;
        let mut cursor_y = y;
        for ch in text.chars() {
            match ch {
                '\n' => {
                    cursor_x = x;
                    cursor_y = cursor_y.saturating_add(adv_y);
                    if cursor_y >= self.size.height {
                        break;
                    }
                    continue;
                }
                ' ' => {}
                _ => {
                    self.draw_glyph(cursor_x, cursor_y, ch, color, scale);
                }
            }
            cursor_x = cursor_x.saturating_add(adv_x);
            if cursor_x >= self.size.width {
                break;
            }
        }
    }
}

impl CpuRenderer<'_> {
    fn draw_glyph(&mut self, x: u32, y: u32, ch: char, color: Color, scale: u32) {
        for (row, bits) in glyph_rows(ch).into_iter().enumerate() {
            let py = y.saturating_add(row as u32 * scale);
            for col in 0..GLYPH_W {
                if bits & (1u8 << (GLYPH_W - 1 - col)) == 0 {
                    continue;
                }
                let px = x.saturating_add(col * scale);
                self.fill_rect(Rect::new(px, py, scale, scale), color);
            }
        }
    }
}

fn glyph_rows(ch: char) -> [u8; GLYPH_H as usize] {
    match ch.to_ascii_uppercase() {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b010],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b011, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b100, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b010, 0b010, 0b010],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b001],

        'A' => [0b010, 0b101, 0b111, 0b101, 0b101],
        'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'C' => [0b011, 0b100, 0b100, 0b100, 0b011],
        'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'E' => [0b111, 0b100, 0b110, 0b100, 0b111],
        'F' => [0b111, 0b100, 0b110, 0b100, 0b100],
        'G' => [0b011, 0b100, 0b101, 0b101, 0b011],
        'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'J' => [0b001, 0b001, 0b001, 0b101, 0b010],
        'K' => [0b101, 0b110, 0b100, 0b110, 0b101],
        'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'M' => [0b101, 0b111, 0b101, 0b101, 0b101],
        'N' => [0b110, 0b101, 0b101, 0b101, 0b101],
        'O' => [0b010, 0b101, 0b101, 0b101, 0b010],
        'P' => [0b110, 0b101, 0b110, 0b100, 0b100],
        'Q' => [0b010, 0b101, 0b101, 0b110, 0b011],
        'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        'S' => [0b011, 0b100, 0b010, 0b001, 0b110],
        'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'V' => [0b101, 0b101, 0b101, 0b010, 0b010],
        'W' => [0b101, 0b101, 0b101, 0b111, 0b101],
        'X' => [0b101, 0b010, 0b010, 0b010, 0b101],
        'Y' => [0b101, 0b101, 0b010, 0b010, 0b010],
        'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],

        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ',' => [0b000, 0b000, 0b000, 0b010, 0b100],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '!' => [0b010, 0b010, 0b010, 0b000, 0b010],
        '?' => [0b110, 0b001, 0b010, 0b000, 0b010],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        '+' => [0b000, 0b010, 0b111, 0b010, 0b000],

        _ => [0b111, 0b111, 0b111, 0b111, 0b111],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RgbaBufferSurface;

    fn pixel(surface: &RgbaBufferSurface, x: u32, y: u32) -> [u8; 4] {
        let idx = ((y * surface.size().width + x) * 4) as usize;
        let px = &surface.frame()[idx..idx + 4];
        [px[0], px[1], px[2], px[3]]
    }

    #[test]
    fn fill_rect_clips_to_surface() {
        let mut surface = RgbaBufferSurface::new(SurfaceSize::new(8, 8));
        let size = surface.size();
        let mut gfx = CpuRenderer::new(surface.frame_mut(), size);
        gfx.fill_rect(Rect::new(6, 6, 10, 10), [255, 0, 0, 255]);
        assert_eq!(pixel(&surface, 7, 7), [255, 0, 0, 255]);
        assert_eq!(pixel(&surface, 5, 5), [0, 0, 0, 0]);
    }

    #[test]
    fn blend_rect_mixes_with_background() {
        let mut surface = RgbaBufferSurface::new(SurfaceSize::new(4, 4));
        let size = surface.size();
        let mut gfx = CpuRenderer::new(surface.frame_mut(), size);
        gfx.clear([0, 0, 0, 255]);
        gfx.blend_rect(Rect::from_size(4, 4), [255, 255, 255, 255], 128);
        let px = pixel(&surface, 1, 1);
        assert!(px[0] > 100 && px[0] < 160);
        assert_eq!(px[3], 255);
    }

    #[test]
    fn outline_leaves_interior_untouched() {
        let mut surface = RgbaBufferSurface::new(SurfaceSize::new(8, 8));
        let size = surface.size();
        let mut gfx = CpuRenderer::new(surface.frame_mut(), size);
        gfx.rect_outline(Rect::new(1, 1, 6, 6), [0, 255, 0, 255]);
        assert_eq!(pixel(&surface, 1, 1), [0, 255, 0, 255]);
        assert_eq!(pixel(&surface, 3, 3), [0, 0, 0, 0]);
    }

    #[test]
    fn text_width_accounts_for_trailing_gap() {
        assert_eq!(text_width("", 2), 0);
        assert_eq!(text_width("A", 2), glyph_advance_x(2) - 2);
        assert_eq!(text_width("AB", 1), 2 * glyph_advance_x(1) - 1);
    }

    #[test]
    fn draw_text_marks_pixels() {
        let mut surface = RgbaBufferSurface::new(SurfaceSize::new(32, 16));
        let size = surface.size();
        let mut gfx = CpuRenderer::new(surface.frame_mut(), size);
        gfx.draw_text_scaled(0, 0, "8", [255, 255, 255, 255], 1);
        let lit = surface
            .frame()
            .chunks_exact(4)
            .filter(|px| px[0] == 255)
            .count();
        assert!(lit > 0);
    }
}
