use crate::error::GridError;
use crate::grid::{Cell, Grid};
use rand::Rng;

/// Chance that a cell starts with B at full concentration.
pub const SEED_PROBABILITY: f64 = 0.03;

/// Generation 0: all [`Cell::BASE`], with B dropped into ~3% of cells.
pub fn seed<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> Result<Grid, GridError> {
    seed_with_probability(width, height, SEED_PROBABILITY, rng)
}

/// One Bernoulli trial per cell, in row-major order.
pub fn seed_with_probability<R: Rng + ?Sized>(
    width: usize,
    height: usize,
    p: f64,
    rng: &mut R,
) -> Result<Grid, GridError> {
    Grid::from_fn(width, height, |_, _| {
        if rng.gen::<f64>() < p {
            Cell::SEEDED
        } else {
            Cell::BASE
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn zero_probability_gives_uniform_base() {
        let mut rng = StdRng::seed_from_u64(7);
        let g = seed_with_probability(16, 9, 0.0, &mut rng).unwrap();
        assert!(g.cells().iter().all(|&c| c == Cell::BASE));
    }

    #[test]
    fn full_probability_seeds_every_cell() {
        let mut rng = StdRng::seed_from_u64(7);
        let g = seed_with_probability(5, 5, 1.0, &mut rng).unwrap();
        assert!(g.cells().iter().all(|&c| c == Cell::SEEDED));
    }

    #[test]
    fn seeded_fraction_is_near_three_percent() {
        let mut rng = StdRng::seed_from_u64(0xC0FFEE);
        let g = seed(200, 200, &mut rng).unwrap();
        let seeded = g.cells().iter().filter(|c| c.b == 1.0).count();
        let frac = seeded as f64 / g.len() as f64;
        assert!((0.025..0.035).contains(&frac), "seeded fraction {frac}");
        assert!(g.cells().iter().all(|c| c.a == 1.0));
    }

    #[test]
    fn same_seed_same_grid() {
        let a = seed(32, 20, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = seed(32, 20, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn bad_dimensions_fail() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(seed(0, 10, &mut rng).is_err());
    }
}
