//! Greedy autopilot
//!
//! Steps toward a target fruit one axis at a time and only looks one cell
//! ahead. It never plans a path, so it can and does trap itself.

use log::trace;

use super::action::Direction;
use super::grid::Grid;
use super::snake::Snake;
use super::state::Position;

/// Pick the next heading for `snake` chasing `fruit`.
///
/// Axes are tried in the order East, West, South, North; a move is taken only
/// if the fruit lies strictly that way and the next cell is not body. When no
/// such move exists the snake keeps its heading unless that is blocked, see
/// [`avoid_wall`].
pub fn next_direction(snake: &Snake, fruit: Position, grid: &Grid) -> Direction {
    let head = snake.head();
    let free = |direction: Direction| !snake.collides_with_body(head.moved_in_direction(direction));

    let direction = if head.x < fruit.x && free(Direction::East) {
        Direction::East
    } else if head.x > fruit.x && free(Direction::West) {
        Direction::West
    } else if head.y < fruit.y && free(Direction::South) {
        Direction::South
    } else if head.y > fruit.y && free(Direction::North) {
        Direction::North
    } else {
        avoid_wall(snake, grid)
    };

    trace!(
        "autopilot at ({}, {}) chasing ({}, {}) -> {:?}",
        head.x, head.y, fruit.x, fruit.y, direction
    );
    direction
}

/// Keep the current heading unless the next cell is a wall or body.
///
/// A blocked vertical heading turns East, else West; a blocked horizontal
/// heading turns North, else South. The second option is taken even when it
/// is blocked too.
pub fn avoid_wall(snake: &Snake, grid: &Grid) -> Direction {
    let heading = snake.direction;
    if is_possible(snake, grid, heading) {
        return heading;
    }

    let (first, second) = if heading.is_vertical() {
        (Direction::East, Direction::West)
    } else {
        (Direction::North, Direction::South)
    };

    if is_possible(snake, grid, first) {
        first
    } else {
        second
    }
}

/// Whether one step in `direction` lands on a free interior cell
pub fn is_possible(snake: &Snake, grid: &Grid, direction: Direction) -> bool {
    let next = snake.head().moved_in_direction(direction);
    grid.is_interior(next) && !snake.collides_with_body(next)
}
