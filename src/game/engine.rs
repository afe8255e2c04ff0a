use super::direction::{Boundary, Direction};
use super::food::{self, FoodPolicy};
use super::grid::{Cell, Grid};
use super::snake::Snake;
use rand::Rng;

/// The two policies that vary between flavors of the game
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Rules {
    pub(crate) boundary: Boundary,
    pub(crate) food: FoodPolicy,
}

/// Result of advancing the snake by one cell
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum TickOutcome {
    /// The snake moved without eating
    Continue,
    /// The snake ate the food and grew by one segment
    Ate,
    /// The snake ate the food and now covers every cell, leaving nowhere to
    /// put the next piece
    Filled,
    /// The snake ran into a wall or itself.  Nothing was changed.
    Collided,
}

/// Movement, collision, and growth for one session's snake
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Engine {
    grid: Grid,
    rules: Rules,
    snake: Snake,
    /// The direction of the most recent move
    direction: Direction,
    /// The direction for the next move, if a turn has been requested since
    /// the last one
    pending: Option<Direction>,
    food: Option<Cell>,
}

impl Engine {
    /// Place a fresh one-segment snake heading right from a quarter of the
    /// way across the middle row, and put down the first piece of food.
    pub(crate) fn new<R: Rng>(grid: Grid, rules: Rules, rng: &mut R) -> Engine {
        let snake = Snake::new(Cell::new(grid.rows() / 2, grid.cols() / 4));
        let food = food::spawn(grid, &snake.occupied(), rules.food, rng);
        Engine::with_state(grid, rules, snake, Direction::Right, food)
    }

    pub(crate) fn with_state(
        grid: Grid,
        rules: Rules,
        snake: Snake,
        direction: Direction,
        food: Option<Cell>,
    ) -> Engine {
        Engine {
            grid,
            rules,
            snake,
            direction,
            pending: None,
            food,
        }
    }

    pub(crate) fn snake(&self) -> &Snake {
        &self.snake
    }

    pub(crate) fn food(&self) -> Option<Cell> {
        self.food
    }

    pub(crate) fn direction(&self) -> Direction {
        self.direction
    }

    pub(crate) fn grid(&self) -> Grid {
        self.grid
    }

    /// Request a turn for the next tick.  A request to reverse onto the
    /// snake's own neck is ignored; otherwise the latest request wins.
    /// Returns whether the request was accepted.
    pub(crate) fn set_direction(&mut self, direction: Direction) -> bool {
        if direction == self.direction.reverse() {
            false
        } else {
            self.pending = Some(direction);
            true
        }
    }

    /// Advance the snake by one cell.
    ///
    /// Walls and the snake's own body are checked before the food, so a move
    /// that would both collide and eat is a collision.
    pub(crate) fn tick<R: Rng>(&mut self, rng: &mut R) -> TickOutcome {
        let direction = self.pending.unwrap_or(self.direction);
        let Some(next) = direction.advance(self.snake.head(), self.grid, self.rules.boundary)
        else {
            return TickOutcome::Collided;
        };
        if self.snake.occupies(next) {
            return TickOutcome::Collided;
        }
        self.direction = direction;
        self.pending = None;
        if self.food == Some(next) {
            self.snake.step(next, true);
            if self.snake.len() >= self.grid.total_cells() {
                self.food = None;
                return TickOutcome::Filled;
            }
            self.food = food::spawn(self.grid, &self.snake.occupied(), self.rules.food, rng);
            if self.food.is_none() {
                return TickOutcome::Filled;
            }
            TickOutcome::Ate
        } else {
            self.snake.step(next, false);
            TickOutcome::Continue
        }
    }

    /// Do the snake and the food all lie within `grid`?
    pub(crate) fn fits(&self, grid: Grid) -> bool {
        self.snake.segments().all(|c| grid.contains(c))
            && self.food.is_none_or(|c| grid.contains(c))
    }

    /// Continue play on a different grid.  The caller is responsible for
    /// checking [`Engine::fits()`] first.
    pub(crate) fn regrid(&mut self, grid: Grid) {
        self.grid = grid;
    }
}
