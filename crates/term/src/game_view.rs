//! GameView: maps a `GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::{Grid, Position};

/// Rows above the board frame (the score line).
pub const HEADER_ROWS: u16 = 1;

const RESTART_LABEL: &str = "[ RESTART ]";
const RESTART_PROMPT: &str = "Press Space to Restart";

const BG: Rgb = Rgb::new(20, 20, 28);
const INK: Rgb = Rgb::new(230, 230, 230);
const GREY: Rgb = Rgb::new(128, 128, 128);

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

/// Screen rectangle in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

impl Rect {
    pub fn contains(&self, col: u16, row: u16) -> bool {
        col >= self.x && row >= self.y && col - self.x < self.w && row - self.y < self.h
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Where the pieces of the view land for a given grid and viewport.
#[derive(Debug, Clone, Copy)]
struct Layout {
    header_y: u16,
    frame: Rect,
}

/// Terminal view of a snake game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
    /// Host has a pointer, so the restart control is clickable.
    pointer: bool,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for the usual terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
            pointer: false,
        }
    }
}

impl GameView {
    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn with_pointer(mut self, pointer: bool) -> Self {
        self.pointer = pointer;
        self
    }

    /// Largest grid whose frame and score line fit in `viewport`.
    pub fn grid_for_viewport(&self, viewport: Viewport) -> Grid {
        let cols = viewport.width.saturating_sub(2) / self.cell_w;
        let rows = viewport.height.saturating_sub(2 + HEADER_ROWS) / self.cell_h;
        Grid::clamped(cols, rows)
    }

    fn layout(&self, snap: &GameSnapshot, viewport: Viewport) -> Layout {
        let frame_w = snap.grid_width.saturating_mul(self.cell_w).saturating_add(2);
        let frame_h = snap.grid_height.saturating_mul(self.cell_h).saturating_add(2);
        let total_h = frame_h.saturating_add(HEADER_ROWS);

        let x = viewport.width.saturating_sub(frame_w) / 2;
        let header_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(total_h) / 2,
            AnchorY::Top => 0,
        };
        Layout {
            header_y,
            frame: Rect {
                x,
                y: header_y + HEADER_ROWS,
                w: frame_w,
                h: frame_h,
            },
        }
    }

    /// Clickable restart control, present only on a finished run when the
    /// host has a pointer.
    pub fn restart_button(&self, snap: &GameSnapshot, viewport: Viewport) -> Option<Rect> {
        if !snap.game_over || !self.pointer {
            return None;
        }
        let frame = self.layout(snap, viewport).frame;
        let w = RESTART_LABEL.chars().count() as u16;
        Some(Rect {
            x: frame.x + frame.w.saturating_sub(w) / 2,
            y: frame.y + frame.h / 2 + 2,
            w,
            h: 1,
        })
    }

    /// Render `snap` into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames; it is only resized when
    /// the viewport changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        let lay = self.layout(snap, viewport);
        let frame = lay.frame;

        self.draw_score_line(fb, snap, frame.x, lay.header_y);

        let board = CellStyle::plain(GREY, BG);
        fb.fill_rect(
            frame.x + 1,
            frame.y + 1,
            frame.w.saturating_sub(2),
            frame.h.saturating_sub(2),
            ' ',
            board,
        );
        draw_border(fb, frame, CellStyle::plain(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0)));

        for y in 0..snap.grid_height {
            for x in 0..snap.grid_width {
                self.draw_cell(fb, frame, Position::new(x as i32, y as i32), ['·', ' '], board.dim());
            }
        }

        self.draw_cell(fb, frame, snap.food, ['█', '█'], CellStyle::plain(INK, BG).bold());

        // Body first so the head wins if a staged snake overlaps itself.
        for &seg in snap.snake.iter().skip(1) {
            self.draw_cell(fb, frame, seg, ['[', ']'], CellStyle::plain(INK, BG));
        }
        if let Some(head) = snap.head() {
            self.draw_cell(fb, frame, head, ['█', '█'], CellStyle::plain(GREY, BG).bold());
        }

        if snap.game_over {
            self.draw_game_over(fb, snap, viewport, frame);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_score_line(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, x: u16, y: u16) {
        let label = CellStyle::default().bold();
        let value = CellStyle::default();
        let mut cx = fb.put_str(x, y, "Score: ", label);
        cx = fb.put_u32(cx, y, snap.score, value);
        cx = fb.put_str(cx, y, " | High Score: ", label);
        fb.put_u32(cx, y, snap.high_score, value);
    }

    /// Paint one grid cell; `glyph[0]` fills the first column, `glyph[1]` the rest.
    fn draw_cell(
        &self,
        fb: &mut FrameBuffer,
        frame: Rect,
        pos: Position,
        glyph: [char; 2],
        style: CellStyle,
    ) {
        if pos.x < 0 || pos.y < 0 {
            return;
        }
        let (cx, cy) = (pos.x as u16, pos.y as u16);
        let inner_w = frame.w.saturating_sub(2);
        let inner_h = frame.h.saturating_sub(2);
        let px = cx.saturating_mul(self.cell_w);
        let py = cy.saturating_mul(self.cell_h);
        if px >= inner_w || py >= inner_h {
            return;
        }
        for dy in 0..self.cell_h {
            for dx in 0..self.cell_w {
                let ch = if dx == 0 { glyph[0] } else { glyph[1] };
                fb.put_char(frame.x + 1 + px + dx, frame.y + 1 + py + dy, ch, style);
            }
        }
    }

    fn draw_game_over(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        frame: Rect,
    ) {
        let banner = CellStyle::plain(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
        let mid_y = frame.y + frame.h / 2;
        put_centered(fb, frame, mid_y, "GAME OVER", banner);

        match self.restart_button(snap, viewport) {
            Some(button) => {
                let style = CellStyle::plain(Rgb::new(0, 0, 0), Rgb::new(220, 220, 220)).bold();
                fb.put_str(button.x, button.y, RESTART_LABEL, style);
            }
            None => {
                put_centered(fb, frame, mid_y + 2, RESTART_PROMPT, CellStyle::default());
            }
        }
    }
}

fn put_centered(fb: &mut FrameBuffer, frame: Rect, y: u16, text: &str, style: CellStyle) {
    let w = text.chars().count() as u16;
    let x = frame.x + frame.w.saturating_sub(w) / 2;
    fb.put_str(x, y, text, style);
}

fn draw_border(fb: &mut FrameBuffer, r: Rect, style: CellStyle) {
    if r.w < 2 || r.h < 2 {
        return;
    }
    let (right, bottom) = (r.x + r.w - 1, r.y + r.h - 1);

    fb.put_char(r.x, r.y, '┌', style);
    fb.put_char(right, r.y, '┐', style);
    fb.put_char(r.x, bottom, '└', style);
    fb.put_char(right, bottom, '┘', style);

    for x in r.x + 1..right {
        fb.put_char(x, r.y, '─', style);
        fb.put_char(x, bottom, '─', style);
    }
    for y in r.y + 1..bottom {
        fb.put_char(r.x, y, '│', style);
        fb.put_char(right, y, '│', style);
    }
}
