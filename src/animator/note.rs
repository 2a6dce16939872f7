use glam::Vec2;

use super::pool::Sprite;
use super::Viewport;

/// How many notes drift up the screen at once.
pub const NOTE_COUNT: usize = 25;

/// Brick palette — LEGO yellow, red, blue, white-ish. RGBA packed.
pub const NOTE_PALETTE: [u32; 4] = [0xFFAE00FF, 0xD12229FF, 0x0085CAFF, 0xC9D1D9FF];

/// Vertical margin past the top edge before a note recycles.
pub const TOP_MARGIN: f32 = 100.0;
/// Notes respawn this far below the bottom edge.
pub const SPAWN_MARGIN: f32 = 100.0;

const SIZE_MIN: f32 = 15.0;
const SIZE_SPREAD: f32 = 20.0;
const SPEED_MIN: f32 = 0.5;
const SPEED_SPREAD: f32 = 1.5;
const OPACITY_MIN: f32 = 0.2;
const OPACITY_SPREAD: f32 = 0.4;
/// Spin is uniform in [-0.01, 0.01] rad/frame.
const SPIN_SPREAD: f32 = 0.02;

/// Which glyph the note draws with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteKind {
    Single,
    Double,
}

/// One rising brick music note.
///
/// Coordinates are screen pixels, y-down: notes spawn below the bottom edge
/// and climb toward negative y.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    pub pos: Vec2,
    pub size: f32,
    /// Upward speed in px/frame.
    pub speed: f32,
    /// RGBA packed color.
    pub color: u32,
    pub opacity: f32,
    /// Current angle in radians.
    pub rotation: f32,
    /// Spin in rad/frame.
    pub spin: f32,
    pub kind: NoteKind,
}

impl Sprite for Note {
    fn spawn(rng: &mut fastrand::Rng, viewport: Viewport) -> Self {
        let mut note = Note {
            pos: Vec2::ZERO,
            size: 0.0,
            speed: 0.0,
            color: 0,
            opacity: 0.0,
            rotation: 0.0,
            spin: 0.0,
            kind: NoteKind::Single,
        };
        note.reset(rng, viewport);
        note
    }

    fn advance(&mut self) {
        self.pos.y -= self.speed;
        self.rotation += self.spin;
    }

    fn escaped(&self, _viewport: Viewport) -> bool {
        self.pos.y < -TOP_MARGIN
    }

    fn reset(&mut self, rng: &mut fastrand::Rng, viewport: Viewport) {
        self.pos = Vec2::new(rng.f32() * viewport.width, viewport.height + SPAWN_MARGIN);
        self.size = SIZE_MIN + rng.f32() * SIZE_SPREAD;
        self.speed = SPEED_MIN + rng.f32() * SPEED_SPREAD;
        self.color = NOTE_PALETTE[rng.usize(0..NOTE_PALETTE.len())];
        self.opacity = OPACITY_MIN + rng.f32() * OPACITY_SPREAD;
        self.rotation = rng.f32() * std::f32::consts::TAU;
        self.spin = (rng.f32() - 0.5) * SPIN_SPREAD;
        self.kind = if rng.bool() {
            NoteKind::Double
        } else {
            NoteKind::Single
        };
    }
}
