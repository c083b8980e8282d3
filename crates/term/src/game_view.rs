//! GameView: maps a `GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{GameStatus, EMPTY};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Values shown beside the board that are not part of the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Hud {
    pub score: u32,
}

const BG: Rgb = Rgb::new(30, 30, 40);
const BRICK: CellStyle = CellStyle::fg(Rgb::new(210, 220, 200)).on(BG);
const GRID: CellStyle = CellStyle::fg(Rgb::new(90, 90, 100)).on(BG).dim();
const BORDER: CellStyle = CellStyle::fg(Rgb::new(200, 200, 200));
const LABEL: CellStyle = CellStyle::fg(Rgb::new(220, 220, 220)).bold();
const VALUE: CellStyle = CellStyle::fg(Rgb::new(200, 200, 200));
const OVERLAY: CellStyle = CellStyle::fg(Rgb::new(255, 255, 255)).bold();

const HELP: [&str; 6] = [
    "ENTER start",
    "P     pause",
    "R     reset",
    "M     sound",
    "O     settings",
    "Q     quit",
];

/// A lightweight terminal renderer for the brick game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self { cell_w: 2 }
    }
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
        }
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, hud: Hud, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let frame_w = snap.width() as u16 * self.cell_w + 2;
        let frame_h = snap.height() as u16 + 2;
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        self.draw_border(fb, start_x, start_y, frame_w, frame_h);

        // Board cells and the active piece, as the player sees them.
        for y in 0..snap.height() {
            for x in 0..snap.width() {
                let (ch, style) = if snap.visible_cell(x as i8, y as i8) == EMPTY {
                    ('·', GRID)
                } else {
                    ('█', BRICK)
                };
                let px = start_x + 1 + x as u16 * self.cell_w;
                fb.fill_rect(px, start_y + 1 + y as u16, self.cell_w, 1, ch, style);
            }
        }

        self.draw_side_panel(fb, snap, hud, start_x.saturating_add(frame_w).saturating_add(2), start_y);

        if let Some(text) = overlay_text(snap.status) {
            let text_w = text.chars().count() as u16;
            let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
            fb.put_str(x, start_y.saturating_add(frame_h / 2), text, OVERLAY);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, hud: Hud, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, hud, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', BORDER);
        fb.put_char(x + w - 1, y, '┐', BORDER);
        fb.put_char(x, y + h - 1, '└', BORDER);
        fb.put_char(x + w - 1, y + h - 1, '┘', BORDER);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', BORDER);
            fb.put_char(x + dx, y + h - 1, '─', BORDER);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', BORDER);
            fb.put_char(x + w - 1, y + dy, '│', BORDER);
        }
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, hud: Hud, x: u16, start_y: u16) {
        if x.saturating_add(12) > fb.width() {
            return;
        }

        let mut y = start_y;
        fb.put_str(x, y, "SCORE", LABEL);
        fb.put_u32(x, y + 1, hud.score, VALUE);
        y += 3;

        fb.put_str(x, y, "STATUS", LABEL);
        fb.put_str(x, y + 1, status_label(snap.status), VALUE);
        y += 3;

        fb.put_str(x, y, "SOUND", LABEL);
        fb.put_str(x, y + 1, if snap.sound_enabled { "ON" } else { "OFF" }, VALUE);
        y += 3;

        for line in HELP {
            if y >= fb.height() {
                break;
            }
            fb.put_str(x, y, line, VALUE.dim());
            y += 1;
        }
    }
}

fn status_label(status: GameStatus) -> &'static str {
    match status {
        GameStatus::Welcome => "READY",
        GameStatus::Running | GameStatus::LineClearing => "PLAYING",
        GameStatus::Paused => "PAUSED",
        GameStatus::ScreenClearing => "...",
        GameStatus::GameOver => "GAME OVER",
    }
}

fn overlay_text(status: GameStatus) -> Option<&'static str> {
    match status {
        GameStatus::Welcome => Some("PRESS ENTER"),
        GameStatus::Paused => Some("PAUSED"),
        GameStatus::GameOver => Some("GAME OVER"),
        _ => None,
    }
}

trait IntoCell {
    fn into_cell(self, ch: char) -> crate::fb::Cell;
}

impl IntoCell for CellStyle {
    fn into_cell(self, ch: char) -> crate::fb::Cell {
        crate::fb::Cell { ch, style: self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{start_game, Piece};
    use crate::types::ShapeKind;

    fn bricks(fb: &FrameBuffer) -> usize {
        fb.to_text().chars().filter(|&c| c == '█').count()
    }

    #[test]
    fn test_welcome_shows_prompt_and_empty_board() {
        let fb = GameView::default().render(&GameSnapshot::default(), Hud::default(), Viewport::new(60, 24));
        assert_eq!(bricks(&fb), 0);
        assert!(fb.to_text().contains("PRESS ENTER"));
        assert!(fb.to_text().contains("READY"));
    }

    #[test]
    fn test_active_piece_drawn_two_columns_per_cell() {
        let snap = GameSnapshot {
            status: GameStatus::Running,
            ..GameSnapshot::default()
        }
        .with_piece(Piece::new(ShapeKind::O, 3, 0));
        let fb = GameView::default().render(&snap, Hud::default(), Viewport::new(60, 24));
        assert_eq!(bricks(&fb), 8);
    }

    #[test]
    fn test_side_panel_shows_score_and_sound() {
        let snap = start_game(&GameSnapshot::default()).with_sound_enabled(false);
        let fb = GameView::default().render(&snap, Hud { score: 1240 }, Viewport::new(60, 24));
        let text = fb.to_text();
        assert!(text.contains("1240"));
        assert!(text.contains("OFF"));
        assert!(text.contains("PLAYING"));
    }

    #[test]
    fn test_tiny_viewport_does_not_panic() {
        let snap = start_game(&GameSnapshot::default());
        let fb = GameView::new(1).render(&snap, Hud::default(), Viewport::new(3, 2));
        assert_eq!((fb.width(), fb.height()), (3, 2));
    }
}
