//! Gray–Scott update rule.
//!
//! Every output cell depends only on the 3×3 neighborhood of the input grid,
//! so the map over cells is run with rayon. The input grid is only borrowed.

use crate::grid::{Boundary, Cell, Grid};
use crate::params::Params;
use rayon::prelude::*;

// 9-point Laplacian stencil weights (sum to 0).
pub const WEIGHT_CENTER: f64 = -1.0;
pub const WEIGHT_AXIS: f64 = 0.2;
pub const WEIGHT_DIAGONAL: f64 = 0.05;

/// Stencil laid out as `KERNEL[dy + 1][dx + 1]`.
#[rustfmt::skip]
pub const KERNEL: [[f64; 3]; 3] = [
    [WEIGHT_DIAGONAL, WEIGHT_AXIS,   WEIGHT_DIAGONAL],
    [WEIGHT_AXIS,     WEIGHT_CENTER, WEIGHT_AXIS],
    [WEIGHT_DIAGONAL, WEIGHT_AXIS,   WEIGHT_DIAGONAL],
];

/// Discrete Laplacian of both species at `(x, y)`.
pub fn laplacian(grid: &Grid, x: usize, y: usize, boundary: Boundary) -> (f64, f64) {
    let mut lap_a = 0.0;
    let mut lap_b = 0.0;
    for (row, dy) in KERNEL.iter().zip(-1isize..=1) {
        for (&w, dx) in row.iter().zip(-1isize..=1) {
            let n = grid.neighbor(x, y, dx, dy, boundary);
            lap_a += w * n.a;
            lap_b += w * n.b;
        }
    }
    (lap_a, lap_b)
}

/// Next value of the cell at `(x, y)`, clamped to [0, 1].
pub fn step_cell(grid: &Grid, x: usize, y: usize, params: &Params, boundary: Boundary) -> Cell {
    let Params {
        feed,
        kill,
        diffusion_a,
        diffusion_b,
        time_step,
    } = *params;

    let Cell { a, b } = grid.get(x, y);
    let (lap_a, lap_b) = laplacian(grid, x, y, boundary);
    let ab2 = a * b * b;

    let next_a = a + (diffusion_a * lap_a - ab2 + feed * (1.0 - a)) * time_step;
    let next_b = b + (diffusion_b * lap_b + ab2 - (kill + feed) * b) * time_step;

    // f64::clamp passes NaN through; callers check for it.
    Cell::new(next_a.clamp(0.0, 1.0), next_b.clamp(0.0, 1.0))
}

/// Produces the next generation from `grid` across worker threads.
pub fn step(grid: &Grid, params: &Params, boundary: Boundary) -> Grid {
    let w = grid.width();
    let cells: Vec<Cell> = (0..grid.len())
        .into_par_iter()
        .map(|i| step_cell(grid, i % w, i / w, params, boundary))
        .collect();
    Grid::from_parts(w, grid.height(), cells)
}

/// Single-threaded [`step`]; same output.
pub fn step_serial(grid: &Grid, params: &Params, boundary: Boundary) -> Grid {
    let w = grid.width();
    let cells: Vec<Cell> = (0..grid.len())
        .map(|i| step_cell(grid, i % w, i / w, params, boundary))
        .collect();
    Grid::from_parts(w, grid.height(), cells)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    fn scenario_params() -> Params {
        Params {
            feed: 0.0545,
            kill: 0.06093,
            diffusion_a: 0.9,
            diffusion_b: 0.5,
            time_step: 1.0,
        }
    }

    fn center_seeded() -> Grid {
        Grid::from_fn(3, 3, |x, y| {
            if (x, y) == (1, 1) {
                Cell::SEEDED
            } else {
                Cell::BASE
            }
        })
        .unwrap()
    }

    fn close(a: Cell, b: Cell) -> bool {
        (a.a - b.a).abs() < TOL && (a.b - b.b).abs() < TOL
    }

    #[test]
    fn kernel_sums_to_zero() {
        let sum: f64 = KERNEL.iter().flatten().sum();
        assert!(sum.abs() < 1e-12, "kernel sum {sum}");
    }

    #[test]
    fn one_step_from_seeded_center_matches_hand_computation() {
        let p = scenario_params();
        let g = center_seeded();

        // Center: lapA = -1 + 4*0.2 + 4*0.05 = 0, lapB = -1, ab2 = 1.
        //   A = 1 + (0 - 1 + 0) = 0
        //   B = 1 + (0.5*-1 + 1 - (0.06093 + 0.0545)) = 1.38457 -> 1
        let center = Cell::new(0.0, 1.0);
        // Axis neighbors see the seed with weight 0.2: B = 0.5*0.2 = 0.1.
        let axis = Cell::new(1.0, 0.5 * 0.2);
        // Diagonal neighbors see it with weight 0.05: B = 0.5*0.05 = 0.025.
        let diag = Cell::new(1.0, 0.5 * 0.05);

        for boundary in [Boundary::Wrap, Boundary::Clamp] {
            let next = step(&g, &p, boundary);
            assert!(close(next.get(1, 1), center), "{boundary:?} center {:?}", next.get(1, 1));
            for (x, y) in [(1, 0), (0, 1), (2, 1), (1, 2)] {
                assert!(close(next.get(x, y), axis), "{boundary:?} axis ({x},{y}) {:?}", next.get(x, y));
            }
            for (x, y) in [(0, 0), (2, 0), (0, 2), (2, 2)] {
                assert!(close(next.get(x, y), diag), "{boundary:?} diag ({x},{y}) {:?}", next.get(x, y));
            }
        }
    }

    #[test]
    fn uniform_base_only_feeds_a() {
        let p = scenario_params();
        let g = Grid::filled(6, 4, Cell::new(0.7, 0.0)).unwrap();
        let next = step(&g, &p, Boundary::Wrap);
        let want_a = 0.7 + p.feed * (1.0 - 0.7) * p.time_step;
        for c in next.cells() {
            assert!((c.a - want_a).abs() < 1e-12);
            assert_eq!(c.b, 0.0);
        }
        let (la, lb) = laplacian(&g, 2, 2, Boundary::Clamp);
        assert!(la.abs() < 1e-12 && lb.abs() < 1e-12);
    }

    #[test]
    fn zero_time_step_is_identity() {
        let g = Grid::from_fn(5, 4, |x, y| Cell::new(0.1 * x as f64, 0.2 * y as f64)).unwrap();
        let p = Params {
            time_step: 0.0,
            ..scenario_params()
        };
        assert_eq!(step(&g, &p, Boundary::Wrap), g);
    }

    #[test]
    fn zero_rates_leave_b_free_grid_unchanged() {
        let g = Grid::from_fn(5, 4, |x, y| Cell::new(0.1 * (x + y) as f64, 0.0)).unwrap();
        let p = Params {
            feed: 0.0,
            kill: 0.0,
            diffusion_a: 0.0,
            diffusion_b: 0.0,
            time_step: 1.0,
        };
        assert_eq!(step(&g, &p, Boundary::Clamp), g);
    }

    #[test]
    fn parallel_and_serial_agree() {
        let g = Grid::from_fn(17, 11, |x, y| {
            Cell::new(((x * 7 + y * 3) % 10) as f64 / 10.0, ((x + y * 5) % 7) as f64 / 7.0)
        })
        .unwrap();
        let p = scenario_params();
        for boundary in [Boundary::Wrap, Boundary::Clamp] {
            let par = step(&g, &p, boundary);
            assert_eq!(par, step_serial(&g, &p, boundary));
            assert_eq!(par, step(&g, &p, boundary));
        }
    }

    #[test]
    fn input_grid_is_untouched() {
        let g = center_seeded();
        let before = g.clone();
        let _ = step(&g, &scenario_params(), Boundary::Wrap);
        assert_eq!(g, before);
    }

    #[test]
    fn nan_tunable_is_not_hidden_by_clamp() {
        let p = Params {
            feed: f64::NAN,
            ..scenario_params()
        };
        let next = step(&center_seeded(), &p, Boundary::Wrap);
        assert!(next.first_non_finite().is_some());
    }
}
