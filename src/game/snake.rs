use std::collections::VecDeque;

use super::action::Direction;
use super::state::Position;

/// The snake in the game.
///
/// The head is stored apart from the rest of the body so a snake can never
/// be empty. `body` runs tail first, the segment nearest the head last.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    head: Position,
    body: VecDeque<Position>,
    /// Current direction of movement
    pub direction: Direction,
}

impl Snake {
    /// Create a head-only snake
    pub fn new(head: Position, direction: Direction) -> Self {
        Self {
            head,
            body: VecDeque::new(),
            direction,
        }
    }

    /// Build a snake from explicit cells, tail first and head last.
    /// Returns `None` for an empty slice.
    pub fn from_cells(cells: &[Position], direction: Direction) -> Option<Self> {
        let (&head, rest) = cells.split_last()?;
        Some(Self {
            head,
            body: rest.iter().copied().collect(),
            direction,
        })
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.head
    }

    /// Get the tail position (the head for a one-cell snake)
    pub fn tail(&self) -> Position {
        self.body.front().copied().unwrap_or(self.head)
    }

    /// Body segments excluding the head, tail first
    pub fn body(&self) -> impl Iterator<Item = Position> + '_ {
        self.body.iter().copied()
    }

    /// All cells, tail first and head last
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.body.iter().copied().chain(std::iter::once(self.head))
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Check if any cell of the snake, head included, is at `pos`
    pub fn contains(&self, pos: Position) -> bool {
        self.head == pos || self.collides_with_body(pos)
    }

    /// Step onto `new_head`, keeping the tail only when growing
    pub fn advance(&mut self, new_head: Position, grow: bool) {
        self.body.push_back(self.head);
        self.head = new_head;

        if !grow {
            self.body.pop_front();
        }
    }

    /// True when the head sits on one of the body segments
    pub fn collides_with_self(&self) -> bool {
        self.collides_with_body(self.head)
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len() + 1
    }

    /// A snake always has a head
    pub fn is_empty(&self) -> bool {
        false
    }
}
