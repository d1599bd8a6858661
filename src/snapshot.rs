//! PNG export of the current field.
//!
//! Applies the same threshold colormap as the render shader on the CPU and
//! writes the result with the `image` crate. Useful for headless runs and
//! for capturing a pattern without a window.

use std::path::Path;

use image::{ImageBuffer, Rgba, RgbaImage};

use crate::error::SnapshotError;
use crate::grid::Cell;
use crate::kernel::smoothstep;

const BACKGROUND: [f32; 3] = [0.02, 0.02, 0.05];
const FOREGROUND: [f32; 3] = [0.58, 0.92, 0.80];

/// Render the field to an RGBA image using the threshold colormap.
///
/// `cells` is a front-buffer snapshot in row-major order with y growing up;
/// rows are flipped so the image matches what the window shows.
pub fn render_image(
    cells: &[Cell],
    width: usize,
    height: usize,
    threshold: f32,
    delta: f32,
) -> RgbaImage {
    debug_assert_eq!(cells.len(), width * height);

    ImageBuffer::from_fn(width as u32, height as u32, |px, py| {
        let gy = height - 1 - py as usize;
        let cell = cells[gy * width + px as usize];

        // Pattern regions have depleted substrate; threshold channel A.
        let ink = 1.0 - smoothstep(threshold - delta, threshold + delta, cell.a);
        let channel = |i: usize| {
            let v = BACKGROUND[i] + (FOREGROUND[i] - BACKGROUND[i]) * ink;
            (v.clamp(0.0, 1.0) * 255.0) as u8
        };
        Rgba([channel(0), channel(1), channel(2), 255])
    })
}

/// Save the field as a PNG using the threshold colormap.
pub fn save_png<P: AsRef<Path>>(
    path: P,
    cells: &[Cell],
    width: usize,
    height: usize,
    threshold: f32,
    delta: f32,
) -> Result<(), SnapshotError> {
    let img = render_image(cells, width, height, threshold, delta);
    img.save(path)?;
    Ok(())
}
