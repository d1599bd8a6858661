//! The per-cell Gray-Scott step kernel.
//!
//! One invocation reads the entire frozen front buffer and writes the
//! entire next state: per cell, a weighted 3x3 discrete Laplacian supplies
//! the diffusion term, the Gray-Scott kinetics supply the reaction term,
//! and an active brush blends extra chemical B in a circular falloff around
//! the pointer.
//!
//! Neighborhood sampling wraps toroidally at the grid borders, so the seed
//! pattern tiles without edge artifacts and pure diffusion conserves mass.
//!
//! Cells are independent given the frozen source buffer, so the row loop
//! fans out across threads; every row owns a disjoint slice of the write
//! buffer and only reads the source.

use glam::Vec2;
use rayon::prelude::*;

use crate::brush::BrushStamp;
use crate::grid::Cell;
use crate::params::KernelParams;

/// Advance the field by one step: read `src`, write every cell of `dst`.
///
/// The update rule per cell, with `lap` the weighted 3x3 Laplacian
/// (orthogonal neighbors 0.2, diagonal 0.05, center -1.0):
///
/// ```text
/// a' = a + dt * (diff_a * lap(a) - a*b^2 + feed * (1 - a))
/// b' = b + dt * (diff_b * lap(b) + a*b^2 - (feed + kill) * b)
/// ```
///
/// When a brush stamp is present, cells within its radius additionally
/// blend toward full B concentration: `b' += strength * w * (1 - b')` with
/// `w` falling smoothly from 1 at the center to 0 at the radius edge. The
/// blend-toward-one form keeps B bounded under sustained brushing; A is
/// left untouched.
///
/// Total over all finite inputs; no values are clamped.
pub fn step(
    src: &[Cell],
    dst: &mut [Cell],
    width: usize,
    height: usize,
    params: &KernelParams,
    brush: Option<BrushStamp>,
) {
    debug_assert_eq!(src.len(), width * height);
    debug_assert_eq!(dst.len(), width * height);

    let inv_w = 1.0 / width as f32;
    let inv_h = 1.0 / height as f32;

    dst.par_chunks_mut(width).enumerate().for_each(|(y, row)| {
        let ym = if y == 0 { height - 1 } else { y - 1 };
        let yp = if y + 1 == height { 0 } else { y + 1 };
        let up = ym * width;
        let mid = y * width;
        let down = yp * width;

        for (x, out) in row.iter_mut().enumerate() {
            let xm = if x == 0 { width - 1 } else { x - 1 };
            let xp = if x + 1 == width { 0 } else { x + 1 };

            let c = src[mid + x];

            let lap_a = -c.a
                + 0.2 * (src[mid + xm].a + src[mid + xp].a + src[up + x].a + src[down + x].a)
                + 0.05 * (src[up + xm].a + src[up + xp].a + src[down + xm].a + src[down + xp].a);
            let lap_b = -c.b
                + 0.2 * (src[mid + xm].b + src[mid + xp].b + src[up + x].b + src[down + x].b)
                + 0.05 * (src[up + xm].b + src[up + xp].b + src[down + xm].b + src[down + xp].b);

            let reaction = c.a * c.b * c.b;
            let ra = -reaction + params.feed * (1.0 - c.a);
            let rb = reaction - (params.feed + params.kill) * c.b;

            let a = c.a + params.dt * (params.diff_a * lap_a + ra);
            let mut b = c.b + params.dt * (params.diff_b * lap_b + rb);

            if let Some(stamp) = brush {
                let center = Vec2::new((x as f32 + 0.5) * inv_w, (y as f32 + 0.5) * inv_h);
                let dist = center.distance(stamp.position);
                if dist < stamp.radius {
                    let falloff = 1.0 - smoothstep(0.0, stamp.radius, dist);
                    b += stamp.strength * falloff * (1.0 - b);
                }
            }

            *out = Cell { a, b };
        }
    });
}

/// Hermite smoothstep, 0 at `edge0` rising to 1 at `edge1`.
pub(crate) fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zero_reaction_params() -> KernelParams {
        KernelParams {
            feed: 0.0,
            kill: 0.0,
            diff_a: 1.0,
            diff_b: 0.5,
            dt: 1.0,
        }
    }

    fn uniform(width: usize, height: usize, cell: Cell) -> Vec<Cell> {
        vec![cell; width * height]
    }

    #[test]
    fn test_uniform_field_is_fixed_point_of_diffusion() {
        let (w, h) = (16, 16);
        let src = uniform(w, h, Cell::new(0.7, 0.2));
        let mut dst = uniform(w, h, Cell::new(0.0, 0.0));

        // feed = kill = 0 and a uniform field: the Laplacian vanishes and
        // the reaction only trades A for B.
        let params = zero_reaction_params();
        step(&src, &mut dst, w, h, &params, None);

        let expected_shift = 0.7 * 0.2 * 0.2;
        for cell in &dst {
            assert!((cell.a - (0.7 - expected_shift)).abs() < 1e-6);
            assert!((cell.b - (0.2 + expected_shift)).abs() < 1e-6);
        }
    }

    #[test]
    fn test_diffusion_wraps_toroidally() {
        let (w, h) = (8, 8);
        let mut src = uniform(w, h, Cell::new(1.0, 0.0));
        src[0].a = 2.0; // spike at the corner
        let mut dst = uniform(w, h, Cell::new(0.0, 0.0));

        step(&src, &mut dst, w, h, &zero_reaction_params(), None);

        // B is zero everywhere so only diffusion of A acts; the corner
        // spike must leak across all four wrapped borders.
        assert!(dst[0].a < 2.0, "spike must decay");
        for &idx in &[1, 7, w, 7 * w, 7 * w + 7] {
            assert!(
                dst[idx].a > 1.0,
                "wrapped neighbor {} did not receive diffused mass",
                idx
            );
        }
        // A cell away from the spike and its wrap neighbors is untouched.
        assert!((dst[3 * w + 3].a - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_mass_conserved_without_feed_and_kill() {
        let (w, h) = (32, 32);
        let mut src = uniform(w, h, Cell::new(1.0, 0.0));
        // An asymmetric blob of B so both diffusion and reaction act.
        for y in 10..16 {
            for x in 8..20 {
                src[y * w + x] = Cell::new(0.4, 0.6);
            }
        }
        let mut dst = uniform(w, h, Cell::new(0.0, 0.0));

        let total = |cells: &[Cell]| -> f64 {
            cells.iter().map(|c| (c.a + c.b) as f64).sum()
        };
        let before = total(&src);

        // With feed = kill = 0 the reaction transfers A to B one-for-one
        // and diffusion is conservative on the torus.
        let params = zero_reaction_params();
        for _ in 0..10 {
            step(&src, &mut dst, w, h, &params, None);
            std::mem::swap(&mut src, &mut dst);
        }

        assert!(
            (total(&src) - before).abs() < 1e-2,
            "mass drifted: {} -> {}",
            before,
            total(&src)
        );
    }

    #[test]
    fn test_brush_blend_is_contained_and_bounded() {
        let (w, h) = (64, 64);
        let src = uniform(w, h, Cell::new(1.0, 0.0));
        let mut with_brush = uniform(w, h, Cell::new(0.0, 0.0));
        let mut without = uniform(w, h, Cell::new(0.0, 0.0));

        let params = KernelParams::default();
        let stamp = BrushStamp {
            position: Vec2::new(0.5, 0.5),
            radius: 0.1,
            strength: 0.9,
        };
        step(&src, &mut with_brush, w, h, &params, Some(stamp));
        step(&src, &mut without, w, h, &params, None);

        let mut touched = 0;
        for y in 0..h {
            for x in 0..w {
                let idx = y * w + x;
                let cx = (x as f32 + 0.5) / w as f32 - 0.5;
                let cy = (y as f32 + 0.5) / h as f32 - 0.5;
                let dist = (cx * cx + cy * cy).sqrt();

                if dist >= 0.1 {
                    assert_eq!(
                        with_brush[idx], without[idx],
                        "cell outside the brush radius changed"
                    );
                } else if with_brush[idx].b > without[idx].b {
                    touched += 1;
                    assert!(with_brush[idx].b <= 1.0 + 1e-6);
                }
            }
        }
        assert!(touched > 0, "brush had no effect inside its radius");
    }

    #[test]
    fn test_smoothstep_endpoints() {
        assert_eq!(smoothstep(0.0, 1.0, -0.5), 0.0);
        assert_eq!(smoothstep(0.0, 1.0, 0.0), 0.0);
        assert_eq!(smoothstep(0.0, 1.0, 1.0), 1.0);
        assert_eq!(smoothstep(0.0, 1.0, 2.0), 1.0);
        let mid = smoothstep(0.0, 1.0, 0.5);
        assert!((mid - 0.5).abs() < 1e-6);
    }
}
