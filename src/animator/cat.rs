use glam::Vec2;

use super::pool::Sprite;
use super::Viewport;

/// How many cats stroll the bottom band at once.
pub const CAT_COUNT: usize = 3;

/// Cat palette — orange, white, grey, dark grey. RGBA packed.
pub const CAT_PALETTE: [u32; 4] = [0xFF9800FF, 0xFFFFFFFF, 0x757575FF, 0x333333FF];

/// Horizontal margin past either edge before a cat recycles.
pub const EDGE_MARGIN: f32 = 100.0;
/// Body unit in pixels; the whole glyph is proportioned from this.
pub const CAT_SIZE: f32 = 12.0;
/// Leg swing advance per frame, radians.
pub const WALK_RATE: f32 = 0.15;

const SPEED_MIN: f32 = 0.8;
const SPEED_SPREAD: f32 = 1.2;
/// Cats walk a band this far above the bottom edge, jittered per spawn.
const BAND_OFFSET: f32 = 30.0;
const BAND_JITTER: f32 = 20.0;

/// One strolling brick cat.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cat {
    pub pos: Vec2,
    /// +1 walks east, -1 walks west.
    pub dir: f32,
    /// Walking speed in px/frame.
    pub speed: f32,
    pub size: f32,
    /// Accumulated gait angle; the legs swing with its sine.
    pub walk_phase: f32,
    /// RGBA packed color.
    pub color: u32,
}

impl Sprite for Cat {
    fn spawn(rng: &mut fastrand::Rng, viewport: Viewport) -> Self {
        let mut cat = Cat {
            pos: Vec2::ZERO,
            dir: 1.0,
            speed: 0.0,
            size: CAT_SIZE,
            walk_phase: 0.0,
            color: 0,
        };
        cat.reset(rng, viewport);
        // Scatter starting cats across the screen so the first seconds of a
        // session are not empty while they walk in from the edges.
        cat.pos.x = rng.f32() * viewport.width;
        cat
    }

    fn advance(&mut self) {
        self.pos.x += self.speed * self.dir;
        self.walk_phase += WALK_RATE;
    }

    fn escaped(&self, viewport: Viewport) -> bool {
        (self.dir > 0.0 && self.pos.x > viewport.width + EDGE_MARGIN)
            || (self.dir < 0.0 && self.pos.x < -EDGE_MARGIN)
    }

    fn reset(&mut self, rng: &mut fastrand::Rng, viewport: Viewport) {
        self.dir = if rng.bool() { 1.0 } else { -1.0 };
        // Spawn just past the edge the cat will walk in from.
        self.pos.x = if self.dir > 0.0 {
            -EDGE_MARGIN
        } else {
            viewport.width + EDGE_MARGIN
        };
        self.pos.y = viewport.height - BAND_OFFSET - rng.f32() * BAND_JITTER;
        self.speed = SPEED_MIN + rng.f32() * SPEED_SPREAD;
        self.size = CAT_SIZE;
        self.walk_phase = 0.0;
        self.color = CAT_PALETTE[rng.usize(0..CAT_PALETTE.len())];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport::new(800.0, 600.0)
    }

    #[test]
    fn reset_spawns_on_the_inbound_edge() {
        let mut rng = fastrand::Rng::with_seed(21);
        let mut cat = Cat::spawn(&mut rng, viewport());

        for _ in 0..200 {
            cat.reset(&mut rng, viewport());
            if cat.dir > 0.0 {
                assert_eq!(cat.pos.x, -100.0);
            } else {
                assert_eq!(cat.pos.x, 900.0);
            }
            assert!(cat.pos.y >= 550.0 && cat.pos.y <= 570.0);
            assert!(cat.speed >= 0.8 && cat.speed < 2.0);
            assert_eq!(cat.size, CAT_SIZE);
            assert_eq!(cat.walk_phase, 0.0);
            assert!(CAT_PALETTE.contains(&cat.color));
        }
    }

    #[test]
    fn spawn_scatters_across_the_width() {
        let mut rng = fastrand::Rng::with_seed(22);
        for _ in 0..100 {
            let cat = Cat::spawn(&mut rng, viewport());
            assert!(cat.pos.x >= 0.0 && cat.pos.x < 800.0);
        }
    }

    #[test]
    fn advance_walks_in_its_direction() {
        let mut rng = fastrand::Rng::with_seed(23);
        let mut cat = Cat::spawn(&mut rng, viewport());
        cat.pos.x = 400.0;
        cat.dir = -1.0;
        cat.speed = 1.5;
        cat.walk_phase = 0.0;

        cat.advance();
        assert_eq!(cat.pos.x, 398.5);
        assert_eq!(cat.walk_phase, WALK_RATE);
    }

    #[test]
    fn exit_past_the_margin_recycles_at_the_opposite_edge() {
        let mut rng = fastrand::Rng::with_seed(24);
        let mut cat = Cat::spawn(&mut rng, viewport());
        cat.dir = 1.0;
        cat.pos.x = 900.5;
        assert!(cat.escaped(viewport()));

        cat.reset(&mut rng, viewport());
        assert!(!cat.escaped(viewport()));
        // Wherever it respawned, it sits exactly on the inbound edge for its
        // freshly chosen direction.
        let expected = if cat.dir > 0.0 { -100.0 } else { 900.0 };
        assert_eq!(cat.pos.x, expected);
    }

    #[test]
    fn the_margin_itself_is_still_in_bounds() {
        let mut rng = fastrand::Rng::with_seed(25);
        let mut cat = Cat::spawn(&mut rng, viewport());
        cat.dir = 1.0;
        cat.pos.x = 900.0;
        assert!(!cat.escaped(viewport()));
        cat.dir = -1.0;
        cat.pos.x = -100.0;
        assert!(!cat.escaped(viewport()));
    }
}
