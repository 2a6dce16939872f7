//! Flattens animator sprites into brick instances.
//!
//! Each glyph is a table of axis-aligned rectangles in sprite-local space
//! (y-down, origin at the sprite position). The lift into screen space
//! happens here, so the simulation types never carry draw data.

use glam::Vec2;

use crate::animator::{Animator, Cat, Note, NoteKind};
use crate::render::instance::{with_alpha, BrickInstance, SHAPE_CIRCLE, SHAPE_RECT};

/// Stem / flag / limb thickness in pixels.
const BRICK: f32 = 4.0;
/// The double note's beam is one brick plus a pixel.
const BEAM: f32 = 5.0;
/// Stud accent ink: black at 20%, multiplied by the note's own opacity.
const STUD_ALPHA: f32 = 0.2;
/// Cats draw at a fixed low opacity.
const CAT_ALPHA: f32 = 0.4;
/// Resting leg length and swing amplitude, pixels.
const LEG_BASE: f32 = 6.0;
const LEG_SWING: f32 = 4.0;

/// Rebuild the frame's instance list: notes first, cats on top.
pub fn build_instances(scene: &Animator, buf: &mut Vec<BrickInstance>) {
    buf.clear();
    for note in scene.notes() {
        push_note(note, buf);
    }
    for cat in scene.cats() {
        push_cat(cat, buf);
    }
}

/// Local rect (top-left x, top-left y, w, h) rotated about the sprite origin
/// and lifted to screen space.
fn push_rotated_rect(
    origin: Vec2,
    angle: f32,
    rect: [f32; 4],
    color: u32,
    buf: &mut Vec<BrickInstance>,
) {
    let [x, y, w, h] = rect;
    let center = Vec2::new(x + w * 0.5, y + h * 0.5);
    let world = origin + Vec2::from_angle(angle).rotate(center);
    buf.push(BrickInstance {
        position: world.into(),
        size: [w, h],
        color,
        shape: SHAPE_RECT,
        rotation: angle,
    });
}

fn push_note(note: &Note, buf: &mut Vec<BrickInstance>) {
    let s = note.size;
    let ink = with_alpha(note.color, note.opacity);

    let rects: &[[f32; 4]] = match note.kind {
        NoteKind::Single => &[
            [-s * 0.5, -s * 0.5, s, s * 0.7],            // head
            [s * 0.5 - BRICK, -s * 2.0, BRICK, s * 2.0], // stem
            [s * 0.5 - BRICK, -s * 2.0, s * 0.8, BRICK], // flag
        ],
        NoteKind::Double => &[
            [-s, 0.0, s * 0.7, s * 0.5],          // left head
            [s * 0.3, 0.0, s * 0.7, s * 0.5],     // right head
            [-s * 0.3, -s * 1.5, BRICK, s * 1.5], // left stem
            [s, -s * 1.5, BRICK, s * 1.5],        // right stem
            [-s * 0.3, -s * 1.5, s * 1.3, BEAM],  // beam
        ],
    };
    for &rect in rects {
        push_rotated_rect(note.pos, note.rotation, rect, ink, buf);
    }

    // Single notes get one dark stud so the head reads as a brick.
    if note.kind == NoteKind::Single {
        let radius = s * 0.25;
        let center = Vec2::new(0.0, -radius);
        let world = note.pos + Vec2::from_angle(note.rotation).rotate(center);
        buf.push(BrickInstance {
            position: world.into(),
            size: [radius * 2.0, radius * 2.0],
            color: with_alpha(0x0000_00FF, STUD_ALPHA * note.opacity),
            shape: SHAPE_CIRCLE,
            rotation: note.rotation,
        });
    }
}

fn push_cat(cat: &Cat, buf: &mut Vec<BrickInstance>) {
    let s = cat.size;
    let ink = with_alpha(cat.color, CAT_ALPHA);
    let swing = cat.walk_phase.sin() * LEG_SWING;

    let rects: [[f32; 4]; 8] = [
        [-s, -s * 0.5, s * 2.0, s],                   // body
        [s, -s, s * 0.8, s * 0.8],                    // head
        [s, -s - BRICK, BRICK, BRICK],                // near ear
        [s + 8.0, -s - BRICK, BRICK, BRICK],          // far ear
        [-s - BRICK, -s * 0.5, BRICK, BRICK],         // tail joint
        [-s - 8.0, -s * 0.5 - BRICK, BRICK, BRICK],   // tail tip
        [-s + 2.0, s * 0.5, BRICK, LEG_BASE + swing], // rear leg
        [s - BRICK, s * 0.5, BRICK, LEG_BASE - swing], // front leg
    ];
    for [x, y, w, h] in rects {
        // Mirror about the origin when the cat walks west.
        let x = if cat.dir < 0.0 { -(x + w) } else { x };
        buf.push(BrickInstance {
            position: [cat.pos.x + x + w * 0.5, cat.pos.y + y + h * 0.5],
            size: [w, h],
            color: ink,
            shape: SHAPE_RECT,
            rotation: 0.0,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animator::pool::Sprite;
    use crate::animator::Viewport;

    fn viewport() -> Viewport {
        Viewport::new(800.0, 600.0)
    }

    fn some_note(kind: NoteKind) -> Note {
        let mut rng = fastrand::Rng::with_seed(41);
        let mut note = Note::spawn(&mut rng, viewport());
        note.kind = kind;
        note.rotation = 0.0;
        note
    }

    fn some_cat() -> Cat {
        let mut rng = fastrand::Rng::with_seed(42);
        Cat::spawn(&mut rng, viewport())
    }

    #[test]
    fn single_note_is_three_bricks_and_a_stud() {
        let note = some_note(NoteKind::Single);
        let mut buf = Vec::new();
        push_note(&note, &mut buf);

        assert_eq!(buf.len(), 4);
        assert!(buf[..3].iter().all(|i| i.shape == SHAPE_RECT));
        assert_eq!(buf[3].shape, SHAPE_CIRCLE);
        assert_eq!(buf[3].size, [note.size * 0.5, note.size * 0.5]);
    }

    #[test]
    fn double_note_is_five_bricks_and_no_stud() {
        let note = some_note(NoteKind::Double);
        let mut buf = Vec::new();
        push_note(&note, &mut buf);

        assert_eq!(buf.len(), 5);
        assert!(buf.iter().all(|i| i.shape == SHAPE_RECT));
    }

    #[test]
    fn stud_ink_is_a_fifth_of_the_note_opacity() {
        let mut note = some_note(NoteKind::Single);
        note.opacity = 0.5;
        let mut buf = Vec::new();
        push_note(&note, &mut buf);

        // 0.2 * 0.5 = 0.1 → 25 of 255.
        assert_eq!(buf[3].color & 0xFF, 25);
        assert_eq!(buf[3].color >> 8, 0x000000);
    }

    #[test]
    fn unrotated_note_head_sits_on_the_note_position() {
        let mut note = some_note(NoteKind::Single);
        note.pos = Vec2::new(100.0, 200.0);
        let s = note.size;
        let mut buf = Vec::new();
        push_note(&note, &mut buf);

        // Head rect is (-s/2, -s/2, s, 0.7s): center x on the origin, center
        // y slightly above it.
        assert_eq!(buf[0].position[0], 100.0);
        assert!((buf[0].position[1] - (200.0 - s * 0.15)).abs() < 1e-3);
        assert_eq!(buf[0].size, [s, s * 0.7]);
    }

    #[test]
    fn rotating_a_note_moves_brick_centers_but_not_sizes() {
        let mut note = some_note(NoteKind::Single);
        note.pos = Vec2::new(100.0, 200.0);

        let mut upright = Vec::new();
        push_note(&note, &mut upright);
        note.rotation = std::f32::consts::FRAC_PI_2;
        let mut turned = Vec::new();
        push_note(&note, &mut turned);

        // The stem is off-axis, so a quarter turn relocates it.
        assert_ne!(upright[1].position, turned[1].position);
        assert_eq!(upright[1].size, turned[1].size);
        assert_eq!(turned[1].rotation, std::f32::consts::FRAC_PI_2);
    }

    #[test]
    fn cat_is_eight_bricks() {
        let cat = some_cat();
        let mut buf = Vec::new();
        push_cat(&cat, &mut buf);

        assert_eq!(buf.len(), 8);
        assert!(buf.iter().all(|i| i.shape == SHAPE_RECT));
        for instance in &buf {
            assert_eq!(instance.color & 0xFF, 102); // fixed 0.4 alpha
        }
    }

    #[test]
    fn westbound_cats_are_mirrored() {
        let mut cat = some_cat();
        cat.pos = Vec2::new(400.0, 550.0);
        cat.walk_phase = 0.0;

        cat.dir = 1.0;
        let mut east = Vec::new();
        push_cat(&cat, &mut east);
        cat.dir = -1.0;
        let mut west = Vec::new();
        push_cat(&cat, &mut west);

        // The head leads the walk: right of the origin going east, left of
        // it going west, same offset magnitude.
        let head_east = east[1].position[0] - 400.0;
        let head_west = west[1].position[0] - 400.0;
        assert!(head_east > 0.0);
        assert!((head_west + head_east).abs() < 1e-3);
        // Mirroring never flips y.
        assert_eq!(east[1].position[1], west[1].position[1]);
    }

    #[test]
    fn legs_swing_in_opposition_with_the_walk_phase() {
        let mut cat = some_cat();
        cat.walk_phase = std::f32::consts::FRAC_PI_2; // sin = 1
        let mut buf = Vec::new();
        push_cat(&cat, &mut buf);

        let rear = buf[6].size[1];
        let front = buf[7].size[1];
        assert!((rear - (LEG_BASE + LEG_SWING)).abs() < 1e-3);
        assert!((front - (LEG_BASE - LEG_SWING)).abs() < 1e-3);
    }

    #[test]
    fn scene_flattens_to_the_expected_instance_count() {
        let mut rng = fastrand::Rng::with_seed(43);
        let scene = Animator::new(viewport(), &mut rng);
        let mut buf = Vec::new();
        build_instances(&scene, &mut buf);

        let expected: usize = scene
            .notes()
            .iter()
            .map(|n| match n.kind {
                NoteKind::Single => 4,
                NoteKind::Double => 5,
            })
            .sum::<usize>()
            + scene.cats().len() * 8;
        assert_eq!(buf.len(), expected);

        // Rebuilding clears the previous frame instead of appending.
        build_instances(&scene, &mut buf);
        assert_eq!(buf.len(), expected);
    }
}
