use engine::graphics::{glyph_height, text_width, Rect, Renderer2d};

use crate::grid_core::GRID_SIZE;
use crate::session::{GameOverReason, GameSession};
use crate::theme;

pub const CELL_SIZE: u32 = 96;
pub const CELL_GAP: u32 = 10;
pub const HUD_HEIGHT: u32 = 84;

pub fn board_side() -> u32 {
    GRID_SIZE as u32 * CELL_SIZE + (GRID_SIZE as u32 + 1) * CELL_GAP
}

fn draw_text_centered(gfx: &mut dyn Renderer2d, cx: u32, y: u32, text: &str, color: [u8; 4], scale: u32) {
    let w = text_width(text, scale);
    gfx.draw_text_scaled(cx.saturating_sub(w / 2), y, text, color, scale);
}

/// Scale that fits `text` inside a cell, in the renderer's block font.
fn tile_text_scale(text: &str) -> u32 {
    let chars = text.chars().count() as u32;
    if chars == 0 {
        return 1;
    }
    let budget = CELL_SIZE - 16;
    (budget / (chars * 4 - 1)).clamp(1, 5)
}

/// Draws the whole session: HUD, board, tiles, and the game-over banner.
///
/// Pure function of the session, which is what makes golden-hash render
/// tests possible.
pub fn draw_session(gfx: &mut dyn Renderer2d, session: &GameSession, show_timer: bool) {
    let size = gfx.size();
    gfx.clear(theme::BACKGROUND);

    let margin = 16;
    gfx.draw_text(margin, margin, &format!("SCORE {}", session.score()), theme::HUD_TEXT);
    let best_line = format!("BEST {}", session.best());
    let best_x = size.width.saturating_sub(margin + text_width(&best_line, 2));
    gfx.draw_text(best_x, margin, &best_line, theme::HUD_TEXT);

    if show_timer {
        let countdown = format!("TIME {}", session.timer.format_remaining());
        draw_text_centered(gfx, size.width / 2, margin + 28, &countdown, theme::HUD_TEXT, 3);
    }

    let side = board_side();
    let bx = size.width.saturating_sub(side) / 2;
    let by = HUD_HEIGHT.min(size.height);
    let board = Rect::new(bx, by, side, side);
    gfx.fill_rect(board, theme::EMPTY_CELL);
    gfx.rect_outline(board, theme::BOARD_FRAME);

    for (r, row) in session.grid.cells().iter().enumerate() {
        for (c, &value) in row.iter().enumerate() {
            let x = bx + CELL_GAP + c as u32 * (CELL_SIZE + CELL_GAP);
            let y = by + CELL_GAP + r as u32 * (CELL_SIZE + CELL_GAP);
            let cell = Rect::new(x, y, CELL_SIZE, CELL_SIZE);
            gfx.fill_rect(cell, theme::color_for_tile(value));
            if value == 0 {
                continue;
            }
            if let Some(label) = theme::symbol_for_tile(value) {
                let scale = tile_text_scale(&label);
                let tx = x + (CELL_SIZE.saturating_sub(text_width(&label, scale))) / 2;
                let ty = y + (CELL_SIZE.saturating_sub(glyph_height(scale))) / 2;
                gfx.draw_text_scaled(tx, ty, &label, theme::text_color_for_tile(value), scale);
            }
        }
    }

    if session.is_game_over() {
        gfx.blend_rect(board, [0, 0, 0, 255], 160);
        let banner = match session.game_over_reason() {
            Some(GameOverReason::TimeUp) => "CHALLENGE OVER!",
            _ => "GAME OVER!",
        };
        let cx = bx + side / 2;
        let mid = by + side / 2;
        draw_text_centered(gfx, cx, mid.saturating_sub(40), banner, theme::BANNER_TEXT, 4);
        let score_line = format!("SCORE {}", session.score());
        draw_text_centered(gfx, cx, mid + 8, &score_line, theme::HUD_TEXT, 3);
        draw_text_centered(gfx, cx, mid + 44, "PRESS N FOR A NEW GAME", theme::HUD_TEXT, 2);
    }
}
