//! Rendering layer: all terminal I/O lives here.
//!
//! `TerminalCanvas` implements the core's `VisualSink` by stamping glyphs into
//! a cell buffer scaled from world units to terminal cells.  `present` then
//! writes the whole buffer in one pass.  No game logic is performed here.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use boss_battle::config::ArenaConfig;
use boss_battle::entities::{HealthBand, Sprite, Transform, Visual};
use boss_battle::geometry::{Rect, Vector2};
use boss_battle::render::VisualSink;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_WALL: Color = Color::DarkBlue;
const C_FLOOR: Color = Color::Black;
const C_PLAYER: Color = Color::White;
const C_ATTACK: Color = Color::Cyan;
const C_BOSS_IDLE: Color = Color::Magenta;
const C_BOSS_ATTACK: Color = Color::Red;
const C_PROJECTILE: Color = Color::Yellow;
const C_HITBOX: Color = Color::Cyan;
const C_LABEL: Color = Color::White;
const C_HINT: Color = Color::DarkGrey;

fn band_color(band: HealthBand) -> Color {
    match band {
        HealthBand::High => Color::Green,
        HealthBand::Medium => Color::Yellow,
        HealthBand::Low => Color::Red,
    }
}

#[derive(Clone, Copy)]
struct Cell {
    glyph: char,
    color: Color,
}

const BLANK: Cell = Cell { glyph: ' ', color: C_FLOOR };

// ── Canvas ────────────────────────────────────────────────────────────────────

pub struct TerminalCanvas {
    cols: u16,
    /// Rows used by the arena; the last terminal row holds the controls hint.
    rows: u16,
    arena: ArenaConfig,
    cells: Vec<Cell>,
}

impl TerminalCanvas {
    pub fn new(cols: u16, term_rows: u16, arena: ArenaConfig) -> Self {
        let rows = term_rows.saturating_sub(1).max(1);
        let mut canvas = Self {
            cols: cols.max(1),
            rows,
            arena,
            cells: vec![BLANK; cols.max(1) as usize * rows as usize],
        };
        canvas.clear();
        canvas
    }

    /// Wipe the buffer back to an empty arena with its walls.
    pub fn clear(&mut self) {
        self.cells.fill(BLANK);
        let wall = self.arena.wall_thickness;
        let inner = Rect::new(
            wall,
            wall,
            self.arena.width - 2.0 * wall,
            self.arena.height - 2.0 * wall,
        );
        for row in 0..self.rows {
            for col in 0..self.cols {
                if !inner.contains(self.to_world(col, row)) {
                    self.put(col, row, Cell { glyph: '▒', color: C_WALL });
                }
            }
        }
    }

    fn to_world(&self, col: u16, row: u16) -> Vector2 {
        Vector2::new(
            (col as f64 + 0.5) * self.arena.width / self.cols as f64,
            (row as f64 + 0.5) * self.arena.height / self.rows as f64,
        )
    }

    fn to_cell(&self, p: Vector2) -> Option<(u16, u16)> {
        let col = (p.x / self.arena.width * self.cols as f64).floor();
        let row = (p.y / self.arena.height * self.rows as f64).floor();
        if col < 0.0 || row < 0.0 || col >= self.cols as f64 || row >= self.rows as f64 {
            None
        } else {
            Some((col as u16, row as u16))
        }
    }

    fn put(&mut self, col: u16, row: u16, cell: Cell) {
        if col < self.cols && row < self.rows {
            self.cells[row as usize * self.cols as usize + col as usize] = cell;
        }
    }

    /// Fill every cell whose center lies inside `area`; always at least the
    /// cell under the area's center.
    fn fill(&mut self, area: Rect, cell: Cell) {
        let mut any = false;
        for row in 0..self.rows {
            for col in 0..self.cols {
                if area.contains(self.to_world(col, row)) {
                    self.put(col, row, cell);
                    any = true;
                }
            }
        }
        if !any {
            if let Some((col, row)) = self.to_cell(area.center()) {
                self.put(col, row, cell);
            }
        }
    }

    /// Write the buffer plus the controls hint, then flush.
    pub fn present<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        out.queue(terminal::Clear(terminal::ClearType::All))?;

        for row in 0..self.rows {
            out.queue(cursor::MoveTo(0, row))?;
            let mut current: Option<Color> = None;
            for col in 0..self.cols {
                let cell = self.cells[row as usize * self.cols as usize + col as usize];
                if current != Some(cell.color) {
                    out.queue(style::SetForegroundColor(cell.color))?;
                    current = Some(cell.color);
                }
                out.queue(Print(cell.glyph))?;
            }
        }

        out.queue(cursor::MoveTo(1, self.rows))?;
        out.queue(style::SetForegroundColor(C_HINT))?;
        out.queue(Print("WASD / arrows : Move   SPACE : Attack   Q : Quit"))?;

        out.queue(style::ResetColor)?;
        out.flush()?;
        Ok(())
    }
}

// ── Glyphs ────────────────────────────────────────────────────────────────────

fn sprite_cell(visual: &Visual) -> Cell {
    match visual.sprite {
        Sprite::PlayerWalk(frame) => {
            // Two frames per facing, in sheet order up / right / left / down.
            let glyph = match frame / 2 {
                0 => '▲',
                1 => '▶',
                2 => '◀',
                _ => '▼',
            };
            Cell { glyph, color: C_PLAYER }
        }
        Sprite::PlayerAttack(pose) => {
            let glyph = match pose {
                1 => '/',
                2 => '─',
                _ => '\\',
            };
            Cell { glyph, color: C_ATTACK }
        }
        Sprite::BossIdle => Cell { glyph: '█', color: C_BOSS_IDLE },
        Sprite::BossAttack => Cell { glyph: '█', color: C_BOSS_ATTACK },
        Sprite::Projectile => {
            let glyph = if (visual.age * 8.0) as u32 % 2 == 0 { '•' } else { '∘' };
            Cell { glyph, color: C_PROJECTILE }
        }
        Sprite::Hitbox => Cell { glyph: '✶', color: C_HITBOX },
    }
}

impl VisualSink for TerminalCanvas {
    fn draw(&mut self, visual: &Visual, transform: &Transform) {
        let cell = sprite_cell(visual);
        match visual.sprite {
            // The boss is big enough to show its footprint.
            Sprite::BossIdle | Sprite::BossAttack => {
                let size = visual.size().scale(transform.scale);
                self.fill(Rect::from_center(transform.position, size.x, size.y), cell);
            }
            _ => {
                if let Some((col, row)) = self.to_cell(transform.position) {
                    self.put(col, row, cell);
                }
            }
        }
    }

    fn draw_bar(&mut self, area: Rect, fraction: f64, band: HealthBand) {
        let filled = Rect::new(area.left, area.top, area.width * fraction.clamp(0.0, 1.0), area.height);
        if filled.width > 0.0 {
            self.fill(filled, Cell { glyph: '■', color: band_color(band) });
        }
    }

    fn draw_label(&mut self, text: &str, at: Vector2) {
        let Some((col, row)) = self.to_cell(at) else {
            return;
        };
        for (i, glyph) in text.chars().enumerate() {
            self.put(col.saturating_add(i as u16), row, Cell { glyph, color: C_LABEL });
        }
    }
}
