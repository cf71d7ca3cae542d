use glam::Vec4;

// ---------------------------------------------------------------------------
// Draw-call contract — the host issues exactly one bufferless draw
// ---------------------------------------------------------------------------

/// Vertices per draw. The vertex stage runs once per index in `0..VERTEX_COUNT`.
pub const VERTEX_COUNT: u32 = 3;

/// Instances per draw.
pub const INSTANCE_COUNT: u32 = 1;

// ---------------------------------------------------------------------------
// Stage functions — CPU reference for the WGSL entry points
// ---------------------------------------------------------------------------

/// Vertex stage: map a vertex index in `{0, 1, 2}` to a clip-space position.
///
/// The geometry is hand-encoded in the index arithmetic rather than stored in
/// a table; the derivation is the contract, not just its three results:
///
/// * `x = (1 − index) × 0.4`         → `0.4, 0.0, −0.4`
/// * `y = ((index & 1) × 2 − 1) × 0.5` → `−0.5, 0.5, −0.5`
///
/// Indices outside `{0, 1, 2}` never occur under the draw-call contract
/// (`VERTEX_COUNT` vertices, no vertex buffer), so there is nothing to guard.
pub fn vertex_position(index: u32) -> Vec4 {
    let x = (1 - index as i32) as f32 * 0.4;
    let y = ((index & 1) as i32 * 2 - 1) as f32 * 0.5;
    Vec4::new(x, y, 0.0, 1.0)
}

/// Fragment stage: every covered pixel gets the same opaque dark brown.
///
/// The rasterizer's interpolated input is ignored, so the reference function
/// takes no argument.
pub fn fragment_color() -> Vec4 {
    Vec4::new(0.3, 0.2, 0.1, 1.0)
}

/// The three positions of the fixed triangle, in primitive order.
///
/// The order matters: v0 → v1 → v2 winds counter-clockwise, which is what the
/// render pipeline declares as front-facing.
pub fn triangle_positions() -> [Vec4; 3] {
    [vertex_position(0), vertex_position(1), vertex_position(2)]
}

// ---------------------------------------------------------------------------
// Viewport mapping
// ---------------------------------------------------------------------------

/// Map a clip-space position to pixel coordinates on a `width` × `height`
/// target. Clip space is +Y up in `[-1, 1]`; pixel space is +Y down with the
/// origin at the top-left. Results are clamped to the target bounds.
pub fn clip_to_pixel(pos: Vec4, width: u32, height: u32) -> (u32, u32) {
    let px = (pos.x * 0.5 + 0.5) * width as f32;
    let py = (0.5 - pos.y * 0.5) * height as f32;
    (
        (px as u32).min(width.saturating_sub(1)),
        (py as u32).min(height.saturating_sub(1)),
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // --- vertex_position ----------------------------------------------------

    #[test]
    fn position_for_index_zero() {
        assert_eq!(vertex_position(0), Vec4::new(0.4, -0.5, 0.0, 1.0));
    }

    #[test]
    fn position_for_index_one() {
        assert_eq!(vertex_position(1), Vec4::new(0.0, 0.5, 0.0, 1.0));
    }

    #[test]
    fn position_for_index_two() {
        assert_eq!(vertex_position(2), Vec4::new(-0.4, -0.5, 0.0, 1.0));
    }

    #[test]
    fn positions_are_bit_identical_across_calls() {
        for i in 0..VERTEX_COUNT {
            assert_eq!(
                vertex_position(i).to_array(),
                vertex_position(i).to_array(),
            );
        }
    }

    #[test]
    fn all_positions_on_z_zero_w_one_plane() {
        for p in triangle_positions() {
            assert_eq!(p.z, 0.0);
            assert_eq!(p.w, 1.0);
        }
    }

    #[test]
    fn primitive_order_winds_counter_clockwise() {
        // Signed area via the 2D cross product of the two edges leaving v0.
        // Positive in a +Y-up space means counter-clockwise.
        let [v0, v1, v2] = triangle_positions();
        let area = (v1.x - v0.x) * (v2.y - v0.y) - (v1.y - v0.y) * (v2.x - v0.x);
        assert!(area > 0.0, "signed area {area} is not counter-clockwise");
    }

    // --- fragment_color -----------------------------------------------------

    #[test]
    fn fragment_color_is_opaque_dark_brown() {
        assert_eq!(fragment_color(), Vec4::new(0.3, 0.2, 0.1, 1.0));
    }

    #[test]
    fn fragment_color_is_bit_identical_across_calls() {
        assert_eq!(fragment_color().to_array(), fragment_color().to_array());
    }

    // --- clip_to_pixel ------------------------------------------------------

    #[test]
    fn clip_center_maps_to_target_center() {
        let (x, y) = clip_to_pixel(Vec4::new(0.0, 0.0, 0.0, 1.0), 64, 64);
        assert_eq!((x, y), (32, 32));
    }

    #[test]
    fn clip_top_left_maps_to_origin() {
        let (x, y) = clip_to_pixel(Vec4::new(-1.0, 1.0, 0.0, 1.0), 64, 64);
        assert_eq!((x, y), (0, 0));
    }

    #[test]
    fn clip_bottom_right_clamps_to_last_pixel() {
        let (x, y) = clip_to_pixel(Vec4::new(1.0, -1.0, 0.0, 1.0), 64, 64);
        assert_eq!((x, y), (63, 63));
    }

    #[test]
    fn apex_maps_into_upper_half() {
        // Apex (0.0, 0.5) sits a quarter of the way down the target.
        let (x, y) = clip_to_pixel(vertex_position(1), 64, 64);
        assert_eq!((x, y), (32, 16));
    }
}
