use super::grid::{Cell, Grid};
use rand::Rng;
use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;

/// How food placement treats cells covered by the snake
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum FoodPolicy {
    /// Any cell; food may land underneath the snake
    Naive,
    /// Only cells the snake does not cover
    #[default]
    Safe,
}

impl fmt::Display for FoodPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FoodPolicy::Naive => f.pad("naive"),
            FoodPolicy::Safe => f.pad("safe"),
        }
    }
}

/// Pick a cell for a new piece of food.
///
/// Under [`FoodPolicy::Safe`], cells in `occupied` are rejected and sampling
/// is repeated until a free cell comes up.  Returns `None` only when that
/// policy is asked to place food on a grid with no free cells.
pub(crate) fn spawn<R: Rng>(
    grid: Grid,
    occupied: &HashSet<Cell>,
    policy: FoodPolicy,
    rng: &mut R,
) -> Option<Cell> {
    match policy {
        FoodPolicy::Naive => Some(random_cell(grid, rng)),
        FoodPolicy::Safe => {
            let taken = grid.cells().filter(|c| occupied.contains(c)).count();
            if taken >= grid.total_cells() {
                return None;
            }
            loop {
                let cell = random_cell(grid, rng);
                if !occupied.contains(&cell) {
                    return Some(cell);
                }
            }
        }
    }
}

fn random_cell<R: Rng>(grid: Grid, rng: &mut R) -> Cell {
    Cell {
        row: rng.random_range(0..grid.rows()),
        col: rng.random_range(0..grid.cols()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    const RNG_SEED: u64 = 0x0123_4567_89AB_CDEF;

    #[test]
    fn safe_spawn_never_lands_on_snake() {
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        let grid = Grid::new(4, 3).unwrap();
        let occupied = grid.cells().take(9).collect::<HashSet<_>>();
        for _ in 0..200 {
            let cell = spawn(grid, &occupied, FoodPolicy::Safe, &mut rng).unwrap();
            assert!(grid.contains(cell));
            assert!(!occupied.contains(&cell));
        }
    }

    #[test]
    fn safe_spawn_finds_the_last_free_cell() {
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        let grid = Grid::new(3, 3).unwrap();
        let occupied = grid
            .cells()
            .filter(|&c| c != Cell::new(2, 1))
            .collect::<HashSet<_>>();
        assert_eq!(
            spawn(grid, &occupied, FoodPolicy::Safe, &mut rng),
            Some(Cell::new(2, 1))
        );
    }

    #[test]
    fn safe_spawn_on_full_grid_gives_up() {
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        let grid = Grid::new(2, 2).unwrap();
        let occupied = grid.cells().collect::<HashSet<_>>();
        assert_eq!(spawn(grid, &occupied, FoodPolicy::Safe, &mut rng), None);
    }

    #[test]
    fn naive_spawn_ignores_the_snake() {
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        let grid = Grid::new(2, 2).unwrap();
        let occupied = grid.cells().collect::<HashSet<_>>();
        for _ in 0..50 {
            let cell = spawn(grid, &occupied, FoodPolicy::Naive, &mut rng).unwrap();
            assert!(grid.contains(cell));
        }
    }

    #[test]
    fn naive_spawn_covers_the_grid() {
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        let grid = Grid::new(2, 3).unwrap();
        let seen = (0..500)
            .filter_map(|_| spawn(grid, &HashSet::new(), FoodPolicy::Naive, &mut rng))
            .collect::<HashSet<_>>();
        assert_eq!(seen.len(), grid.total_cells());
    }
}
