use super::grid::Cell;
use std::collections::{HashSet, VecDeque};

/// The snake on the board
///
/// The body is stored head first.  It never contains the same cell twice:
/// a move onto an occupied cell is a collision and is refused before the
/// body is touched.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snake {
    body: VecDeque<Cell>,
}

impl Snake {
    /// Create a one-segment snake at `head`
    pub(crate) fn new(head: Cell) -> Snake {
        Snake {
            body: VecDeque::from([head]),
        }
    }

    /// Create a snake from explicit segments, head first.  Returns `None` if
    /// `segments` is empty or repeats a cell.
    #[cfg(test)]
    pub(crate) fn from_segments<I: IntoIterator<Item = Cell>>(segments: I) -> Option<Snake> {
        let body = segments.into_iter().collect::<VecDeque<_>>();
        let distinct = body.iter().collect::<HashSet<_>>().len();
        (!body.is_empty() && distinct == body.len()).then_some(Snake { body })
    }

    pub(crate) fn head(&self) -> Cell {
        // The body is never empty: it starts with one segment and only
        // `step()` mutates it, which always pushes before it pops.
        self.body[0]
    }

    pub(crate) fn len(&self) -> usize {
        self.body.len()
    }

    /// Iterate over the segments from head to tail
    pub(crate) fn segments(&self) -> impl Iterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }

    pub(crate) fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    pub(crate) fn occupied(&self) -> HashSet<Cell> {
        self.segments().collect()
    }

    /// Push `head` as the new head.  Unless `grow` is set, the tail is
    /// dropped so that the length stays the same.
    pub(super) fn step(&mut self, head: Cell, grow: bool) {
        self.body.push_front(head);
        if !grow {
            let _ = self.body.pop_back();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_keeps_length() {
        let mut snake = Snake::from_segments([Cell::new(2, 2), Cell::new(2, 1)]).unwrap();
        snake.step(Cell::new(2, 3), false);
        assert_eq!(
            snake.segments().collect::<Vec<_>>(),
            [Cell::new(2, 3), Cell::new(2, 2)]
        );
    }

    #[test]
    fn step_with_growth_keeps_tail() {
        let mut snake = Snake::new(Cell::new(2, 2));
        snake.step(Cell::new(2, 3), true);
        assert_eq!(snake.len(), 2);
        assert_eq!(snake.head(), Cell::new(2, 3));
        assert!(snake.occupies(Cell::new(2, 2)));
    }

    #[test]
    fn from_segments_rejects_duplicates() {
        assert_eq!(Snake::from_segments(Vec::<Cell>::new()), None);
        assert_eq!(
            Snake::from_segments([Cell::new(1, 1), Cell::new(1, 2), Cell::new(1, 1)]),
            None
        );
    }
}
