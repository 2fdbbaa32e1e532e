use crate::error::FrameError;
use crate::grid::{Boundary, Cell, Grid};
use crate::params::Params;
use crate::step::{step, step_serial};

/// Owns the current generation and produces the next one on demand.
///
/// The previous generation lives only inside [`Simulation::advance`]: the new
/// grid is built from a shared borrow of the current one, validated, and then
/// replaces it.
pub struct Simulation {
    current: Grid,
    boundary: Boundary,
    parallel: bool,
    generation: u64,
}

impl Simulation {
    pub fn new(grid: Grid, boundary: Boundary) -> Self {
        Self {
            current: grid,
            boundary,
            parallel: true,
            generation: 0,
        }
    }

    /// Run the stepper on one thread instead of the rayon pool.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn current(&self) -> &Grid {
        &self.current
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    /// Steps once with a snapshot of `params`. On error the current generation
    /// is kept as is.
    pub fn advance(&mut self, params: &Params) -> Result<&Grid, FrameError> {
        let p = *params;
        if !p.is_finite() {
            return Err(FrameError::NonFiniteParams {
                feed: p.feed,
                kill: p.kill,
                diffusion_a: p.diffusion_a,
                diffusion_b: p.diffusion_b,
                time_step: p.time_step,
            });
        }

        let next = if self.parallel {
            step(&self.current, &p, self.boundary)
        } else {
            step_serial(&self.current, &p, self.boundary)
        };

        if let Some((x, y)) = next.first_non_finite() {
            return Err(FrameError::NonFinite {
                x,
                y,
                generation: self.generation + 1,
            });
        }

        self.current = next;
        self.generation += 1;
        Ok(&self.current)
    }

    /// Replaces the current generation, e.g. with a freshly seeded grid.
    pub fn reset(&mut self, grid: Grid) {
        self.current = grid;
        self.generation = 0;
    }
}

/// Steps a 3×3 grid spanning the corners of the concentration square once.
/// Finite but huge tunables overflow to `inf` and give NaN (`inf * 0`) on
/// every frame; this catches them before the first frame.
pub fn check_params(params: &Params, boundary: Boundary) -> Result<(), FrameError> {
    let sample = Grid::from_parts(
        3,
        3,
        (0..9)
            .map(|i| Cell::new((i % 3) as f64 / 2.0, (i / 3) as f64 / 2.0))
            .collect(),
    );
    let mut sim = Simulation::new(sample, boundary).with_parallel(false);
    sim.advance(params).map(|_| ())
}
