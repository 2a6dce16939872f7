use bytemuck::{Pod, Zeroable};

/// Filled axis-aligned rectangle.
pub const SHAPE_RECT: u32 = 0;
/// Filled disc, carved out of the quad in the fragment stage.
pub const SHAPE_CIRCLE: u32 = 1;

/// Per-instance data uploaded to the GPU each frame.
/// Stride = 28 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct BrickInstance {
    /// Center position in screen pixels, y-down.
    pub position: [f32; 2],
    /// Full extents in pixels (width, height).
    pub size: [f32; 2],
    /// RGBA color packed as u32.
    pub color: u32,
    /// SHAPE_RECT or SHAPE_CIRCLE.
    pub shape: u32,
    /// Rotation around the center, radians.
    pub rotation: f32,
}

/// Replace the alpha byte of a packed RGBA color with a [0, 1] opacity.
pub fn with_alpha(rgba: u32, alpha: f32) -> u32 {
    let a = (alpha.clamp(0.0, 1.0) * 255.0) as u32;
    (rgba & 0xFFFF_FF00) | a
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_alpha_replaces_only_the_low_byte() {
        assert_eq!(with_alpha(0xFFAE00FF, 1.0), 0xFFAE00FF);
        assert_eq!(with_alpha(0xFFAE00FF, 0.0), 0xFFAE0000);
        // 0.4 * 255 = 102 = 0x66
        assert_eq!(with_alpha(0xFFAE00FF, 0.4), 0xFFAE0066);
    }

    #[test]
    fn with_alpha_clamps_out_of_range_opacity() {
        assert_eq!(with_alpha(0x12345678, 2.0), 0x123456FF);
        assert_eq!(with_alpha(0x12345678, -1.0), 0x12345600);
    }
}
