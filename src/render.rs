use crate::error::RenderError;
use crate::grid::{Cell, Grid};
use crate::surface::{Rgba, Surface};
use rayon::prelude::*;

/// Luminance below this is drawn black.
pub const THRESHOLD: f64 = 0.5;

/// Grayscale value of a cell: `|a - b|` clamped to [0, 1], hard-thresholded.
pub fn luminance(cell: Cell) -> f64 {
    let c = (cell.a - cell.b).abs().clamp(0.0, 1.0);
    if c < THRESHOLD {
        0.0
    } else {
        c
    }
}

/// Paints every cell of `grid` as an opaque gray pixel.
pub fn render(grid: &Grid, surface: &mut Surface) -> Result<(), RenderError> {
    if surface.width() != grid.width() || surface.height() != grid.height() {
        return Err(RenderError::SizeMismatch {
            surface_w: surface.width(),
            surface_h: surface.height(),
            grid_w: grid.width(),
            grid_h: grid.height(),
        });
    }
    surface
        .pixels_mut()
        .par_iter_mut()
        .zip(grid.cells().par_iter())
        .for_each(|(px, &cell)| *px = Rgba::gray(luminance(cell) as f32));
    Ok(())
}
