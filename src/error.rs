use thiserror::Error;

/// Grid construction failures. Construction is all-or-nothing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    EmptyDimension { width: usize, height: usize },

    #[error("grid of {width}x{height} cells does not fit in memory")]
    TooLarge { width: usize, height: usize },

    #[error("expected {expected} cells for the grid, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

/// A single frame could not be produced. The previous generation stays current.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FrameError {
    #[error("tunables are not finite (feed={feed}, kill={kill}, dA={diffusion_a}, dB={diffusion_b}, dt={time_step})")]
    NonFiniteParams {
        feed: f64,
        kill: f64,
        diffusion_a: f64,
        diffusion_b: f64,
        time_step: f64,
    },

    #[error("non-finite concentration at ({x}, {y}) while producing generation {generation}")]
    NonFinite { x: usize, y: usize, generation: u64 },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("surface of {width}x{height} pixels does not fit in memory")]
    TooLarge { width: usize, height: usize },

    #[error("surface is {surface_w}x{surface_h} but grid is {grid_w}x{grid_h}")]
    SizeMismatch {
        surface_w: usize,
        surface_h: usize,
        grid_w: usize,
        grid_h: usize,
    },
}
