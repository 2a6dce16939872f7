//! The background animator: two fixed-count pools of decorative sprites —
//! rising brick music notes and strolling brick cats — advanced once per
//! display frame. Pure simulation; drawing happens in the glyph layer.

pub mod cat;
pub mod note;
pub mod pool;

pub use cat::{Cat, CAT_COUNT};
pub use note::{Note, NoteKind, NOTE_COUNT};
pub use pool::{Pool, Sprite};

/// Drawable area in physical pixels, y-down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// All animator state: the two sprite pools plus the viewport that bounds
/// their spawn and exit edges. No ambient globals — instances are
/// independent, and a seeded RNG replays a run bit-identically because the
/// step order is fixed (notes in index order, then cats).
#[derive(Debug, Clone, PartialEq)]
pub struct Animator {
    viewport: Viewport,
    notes: Pool<Note>,
    cats: Pool<Cat>,
}

impl Animator {
    pub fn new(viewport: Viewport, rng: &mut fastrand::Rng) -> Self {
        Self {
            viewport,
            notes: Pool::populate(NOTE_COUNT, rng, viewport),
            cats: Pool::populate(CAT_COUNT, rng, viewport),
        }
    }

    /// Advance every sprite by one frame. Sprites that left their active
    /// range respawn in place; pool counts never change.
    pub fn step(&mut self, rng: &mut fastrand::Rng) {
        self.notes.step(rng, self.viewport);
        self.cats.step(rng, self.viewport);
    }

    /// Track a new surface size. Sprite state is untouched; anything now
    /// off-screen recycles through the normal exit bounds on later steps.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn notes(&self) -> &[Note] {
        self.notes.as_slice()
    }

    pub fn cats(&self) -> &[Cat] {
        self.cats.as_slice()
    }
}
