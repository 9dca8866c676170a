use std::collections::{BTreeSet, HashSet};

use log::debug;
use rand::Rng;
use rand::seq::IteratorRandom;

use super::error::{GameError, Result};
use super::grid::Grid;
use super::state::Position;

/// Random draws tried per interior cell before falling back to a scan
const SAMPLES_PER_CELL: usize = 4;

/// The fruit currently on the board.
///
/// Kept in an ordered set so iteration, and therefore tie-breaking in
/// [`FruitField::closest_to`], is deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FruitField {
    cells: BTreeSet<Position>,
}

impl FruitField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place one fruit on a uniformly random free interior cell.
    ///
    /// Cells in `excluded` and cells already holding fruit are never picked.
    /// Fails with [`GameError::NoSpaceAvailable`] when nothing is free.
    pub fn spawn<R: Rng>(
        &mut self,
        grid: &Grid,
        excluded: &HashSet<Position>,
        rng: &mut R,
    ) -> Result<Position> {
        let is_free = |pos: &Position| !excluded.contains(pos) && !self.cells.contains(pos);

        let attempts = grid.interior_area() * SAMPLES_PER_CELL;
        let sampled = (0..attempts)
            .map(|_| {
                Position::new(
                    rng.gen_range(1..grid.width() as i32 - 1),
                    rng.gen_range(1..grid.height() as i32 - 1),
                )
            })
            .find(|pos| is_free(pos));

        // Crowded boards: choose uniformly among the cells that are left
        let pos = match sampled {
            Some(pos) => pos,
            None => grid
                .interior_cells()
                .filter(|pos| is_free(pos))
                .choose(rng)
                .ok_or(GameError::NoSpaceAvailable)?,
        };

        self.cells.insert(pos);
        debug!("spawned fruit at ({}, {})", pos.x, pos.y);
        Ok(pos)
    }

    /// Eat the fruit at `pos` and spawn its replacement.
    ///
    /// The replacement is placed first, so on error the field is unchanged.
    pub fn consume<R: Rng>(
        &mut self,
        pos: Position,
        grid: &Grid,
        excluded: &HashSet<Position>,
        rng: &mut R,
    ) -> Result<Position> {
        let replacement = self.spawn(grid, excluded, rng)?;
        self.cells.remove(&pos);
        Ok(replacement)
    }

    /// The fruit minimizing `|dx| * |dy|` to `point`.
    ///
    /// Any fruit sharing a row or column with `point` scores zero. Among equal
    /// scores the first in iteration order wins.
    pub fn closest_to(&self, point: Position) -> Option<Position> {
        self.cells
            .iter()
            .copied()
            .min_by_key(|fruit| {
                let dx = (fruit.x - point.x).abs() as i64;
                let dy = (fruit.y - point.y).abs() as i64;
                dx * dy
            })
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.cells.contains(&pos)
    }

    pub fn insert(&mut self, pos: Position) -> bool {
        self.cells.insert(pos)
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_spawn_avoids_excluded_cells() {
        let grid = Grid::new(6, 6).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let excluded: HashSet<_> = grid
            .interior_cells()
            .filter(|pos| *pos != Position::new(3, 3))
            .collect();

        let mut field = FruitField::new();
        let pos = field.spawn(&grid, &excluded, &mut rng).unwrap();

        assert_eq!(pos, Position::new(3, 3));
        assert!(field.contains(pos));
    }

    #[test]
    fn test_spawn_stays_inside_walls() {
        let grid = Grid::new(8, 5).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let mut field = FruitField::new();

        for _ in 0..grid.interior_area() {
            let pos = field.spawn(&grid, &HashSet::new(), &mut rng).unwrap();
            assert!(grid.is_interior(pos));
        }
        // Never lands on an existing fruit
        assert_eq!(field.len(), grid.interior_area());
    }

    #[test]
    fn test_spawn_fails_when_full() {
        let grid = Grid::new(4, 4).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let excluded: HashSet<_> = grid.interior_cells().collect();

        let mut field = FruitField::new();
        assert_eq!(
            field.spawn(&grid, &excluded, &mut rng),
            Err(GameError::NoSpaceAvailable)
        );
        assert!(field.is_empty());
    }

    #[test]
    fn test_consume_replaces_fruit() {
        let grid = Grid::new(10, 10).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let mut field = FruitField::new();
        field.insert(Position::new(4, 4));

        let excluded: HashSet<_> = [Position::new(4, 4), Position::new(3, 4)].into();
        let replacement = field
            .consume(Position::new(4, 4), &grid, &excluded, &mut rng)
            .unwrap();

        assert_eq!(field.len(), 1);
        assert!(!field.contains(Position::new(4, 4)));
        assert!(field.contains(replacement));
        assert!(!excluded.contains(&replacement));
    }

    #[test]
    fn test_failed_consume_keeps_fruit() {
        // 4x3 has two interior cells: the snake head and the fruit
        let grid = Grid::new(4, 3).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let mut field = FruitField::new();
        field.insert(Position::new(2, 1));

        let excluded: HashSet<_> = [Position::new(1, 1), Position::new(2, 1)].into();
        assert_eq!(
            field.consume(Position::new(2, 1), &grid, &excluded, &mut rng),
            Err(GameError::NoSpaceAvailable)
        );
        assert_eq!(field.len(), 1);
        assert!(field.contains(Position::new(2, 1)));
    }

    #[test]
    fn test_closest_uses_product_metric() {
        let mut field = FruitField::new();
        field.insert(Position::new(5, 8));
        field.insert(Position::new(7, 6));

        // |0|*|3| = 0 beats |2|*|1| = 2
        assert_eq!(field.closest_to(Position::new(5, 5)), Some(Position::new(5, 8)));
    }

    #[test]
    fn test_closest_prefers_aligned_over_near_diagonal() {
        let mut field = FruitField::new();
        field.insert(Position::new(6, 6));
        field.insert(Position::new(1, 5));

        assert_eq!(field.closest_to(Position::new(5, 5)), Some(Position::new(1, 5)));
    }

    #[test]
    fn test_closest_on_empty_field() {
        assert_eq!(FruitField::new().closest_to(Position::new(1, 1)), None);
    }
}
