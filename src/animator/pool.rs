use super::Viewport;

/// A pooled decorative sprite: advanced once per frame, reinitialized in
/// place when it leaves its active range. Simulation only — drawing lives in
/// the glyph layer.
pub trait Sprite {
    /// Build a fresh sprite for initial population.
    fn spawn(rng: &mut fastrand::Rng, viewport: Viewport) -> Self;

    /// Advance one frame worth of motion.
    fn advance(&mut self);

    /// True once the sprite has left its active range.
    fn escaped(&self, viewport: Viewport) -> bool;

    /// Reinitialize in place with fresh random attributes.
    fn reset(&mut self, rng: &mut fastrand::Rng, viewport: Viewport);
}

/// Fixed-count pool of reusable sprites.
///
/// Sprites are recycled, never dropped or reallocated, so the count is
/// invariant for the pool's lifetime. Stepping walks index order, which
/// keeps the RNG call sequence stable — a seeded run replays bit-identically.
#[derive(Debug, Clone, PartialEq)]
pub struct Pool<T> {
    sprites: Vec<T>,
}

impl<T: Sprite> Pool<T> {
    pub fn populate(count: usize, rng: &mut fastrand::Rng, viewport: Viewport) -> Self {
        let sprites = (0..count).map(|_| T::spawn(rng, viewport)).collect();
        Self { sprites }
    }

    /// Advance every sprite one frame, recycling any that left the viewport.
    pub fn step(&mut self, rng: &mut fastrand::Rng, viewport: Viewport) {
        for sprite in &mut self.sprites {
            sprite.advance();
            if sprite.escaped(viewport) {
                sprite.reset(rng, viewport);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.sprites
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Marches +1 px per step, escapes past x = 10, recycles back to 0.
    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Walker {
        x: f32,
        resets: u32,
    }

    impl Sprite for Walker {
        fn spawn(_rng: &mut fastrand::Rng, _viewport: Viewport) -> Self {
            Walker { x: 0.0, resets: 0 }
        }

        fn advance(&mut self) {
            self.x += 1.0;
        }

        fn escaped(&self, _viewport: Viewport) -> bool {
            self.x > 10.0
        }

        fn reset(&mut self, _rng: &mut fastrand::Rng, _viewport: Viewport) {
            self.x = 0.0;
            self.resets += 1;
        }
    }

    fn viewport() -> Viewport {
        Viewport::new(800.0, 600.0)
    }

    #[test]
    fn count_never_changes() {
        let mut rng = fastrand::Rng::with_seed(1);
        let mut pool: Pool<Walker> = Pool::populate(8, &mut rng, viewport());
        assert_eq!(pool.len(), 8);

        for _ in 0..1000 {
            pool.step(&mut rng, viewport());
            assert_eq!(pool.len(), 8);
        }
    }

    #[test]
    fn escaped_sprites_recycle_in_place() {
        let mut rng = fastrand::Rng::with_seed(2);
        let mut pool: Pool<Walker> = Pool::populate(4, &mut rng, viewport());

        // 11th step moves every walker to x = 11 > 10 and recycles it.
        for _ in 0..11 {
            pool.step(&mut rng, viewport());
        }
        for walker in pool.as_slice() {
            assert_eq!(walker.x, 0.0);
            assert_eq!(walker.resets, 1);
        }
    }

    #[test]
    fn reset_fires_in_the_same_step_as_the_escape() {
        let mut rng = fastrand::Rng::with_seed(3);
        let mut pool: Pool<Walker> = Pool::populate(1, &mut rng, viewport());

        for _ in 0..10 {
            pool.step(&mut rng, viewport());
        }
        // At x = 10 the walker has not escaped yet.
        assert_eq!(pool.as_slice()[0].x, 10.0);
        assert_eq!(pool.as_slice()[0].resets, 0);

        // One more step crosses the bound and recycles within the same step.
        pool.step(&mut rng, viewport());
        assert_eq!(pool.as_slice()[0].x, 0.0);
        assert_eq!(pool.as_slice()[0].resets, 1);
    }
}
