use super::grid::{Cell, Grid};
use serde::Deserialize;
use std::fmt;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Return the cell one step from `cell` in this direction, or `None` if
    /// that step leaves a bounded grid.
    pub(crate) fn advance(self, cell: Cell, grid: Grid, boundary: Boundary) -> Option<Cell> {
        let Cell { mut row, mut col } = cell;
        let wrap = boundary == Boundary::Wrapping;
        match self {
            Direction::Up => row = decrement_in_bounds(row, grid.rows(), wrap)?,
            Direction::Down => row = increment_in_bounds(row, grid.rows(), wrap)?,
            Direction::Left => col = decrement_in_bounds(col, grid.cols(), wrap)?,
            Direction::Right => col = increment_in_bounds(col, grid.cols(), wrap)?,
        }
        Some(Cell { row, col })
    }

    pub(crate) fn reverse(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        f.pad(name)
    }
}

/// What happens when the snake runs off the edge of the grid
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum Boundary {
    /// Leaving the grid ends the game
    #[default]
    Bounded,
    /// The snake reappears on the opposite edge
    Wrapping,
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Boundary::Bounded => f.pad("bounded"),
            Boundary::Wrapping => f.pad("wrapping"),
        }
    }
}

fn decrement_in_bounds(x: u16, max: u16, wrap: bool) -> Option<u16> {
    if let Some(x2) = x.checked_sub(1) {
        Some(x2)
    } else if wrap {
        Some(max - 1)
    } else {
        None
    }
}

fn increment_in_bounds(x: u16, max: u16, wrap: bool) -> Option<u16> {
    if let Some(x2) = x.checked_add(1).filter(|&xx| xx < max) {
        Some(x2)
    } else if wrap {
        Some(0)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn grid() -> Grid {
        Grid::new(15, 10).unwrap()
    }

    #[rstest]
    #[case(Direction::Up, Cell::new(7, 2), Boundary::Bounded, Some(Cell::new(6, 2)))]
    #[case(Direction::Down, Cell::new(7, 2), Boundary::Bounded, Some(Cell::new(8, 2)))]
    #[case(Direction::Right, Cell::new(7, 2), Boundary::Bounded, Some(Cell::new(7, 3)))]
    #[case(Direction::Left, Cell::new(7, 2), Boundary::Bounded, Some(Cell::new(7, 1)))]
    #[case(Direction::Up, Cell::new(0, 2), Boundary::Bounded, None)]
    #[case(Direction::Up, Cell::new(0, 2), Boundary::Wrapping, Some(Cell::new(14, 2)))]
    #[case(Direction::Down, Cell::new(14, 2), Boundary::Bounded, None)]
    #[case(Direction::Down, Cell::new(14, 2), Boundary::Wrapping, Some(Cell::new(0, 2)))]
    #[case(Direction::Right, Cell::new(7, 9), Boundary::Bounded, None)]
    #[case(Direction::Right, Cell::new(7, 9), Boundary::Wrapping, Some(Cell::new(7, 0)))]
    #[case(Direction::Left, Cell::new(7, 0), Boundary::Bounded, None)]
    #[case(Direction::Left, Cell::new(7, 0), Boundary::Wrapping, Some(Cell::new(7, 9)))]
    fn test_advance(
        #[case] d: Direction,
        #[case] cell: Cell,
        #[case] boundary: Boundary,
        #[case] r: Option<Cell>,
    ) {
        assert_eq!(d.advance(cell, grid(), boundary), r);
    }

    #[test]
    fn advance_on_single_cell_wrapping_grid_stays_put() {
        let grid = Grid::new(1, 1).unwrap();
        for d in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
            assert_eq!(
                d.advance(Cell::new(0, 0), grid, Boundary::Wrapping),
                Some(Cell::new(0, 0))
            );
        }
    }

    #[test]
    fn reverse_is_an_involution() {
        for d in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
            assert_ne!(d.reverse(), d);
            assert_eq!(d.reverse().reverse(), d);
        }
    }
}
