//! Uniform spatial grid for bullet/enemy collision
//!
//! The play field is split into `GRID_COLS x GRID_ROWS` cells. Each tick the
//! grid is cleared and every active enemy is filed under the cell holding its
//! top-left corner. A bullet only tests enemies in its own cell and the eight
//! around it. Cells are larger than an enemy, so that neighborhood always
//! contains every enemy the bullet can touch.

use glam::Vec2;

use super::state::EnemyPool;
use crate::Rect;
use crate::consts::*;

/// Cell coordinates (column, row)
pub type Cell = (usize, usize);

/// Cell containing `pos`, clamped onto the grid. Positions above or left of
/// the field (spawning enemies) land in row/column 0.
#[inline]
pub fn cell_of(pos: Vec2) -> Cell {
    let col = ((pos.x / CELL_WIDTH).floor() as i32).clamp(0, GRID_COLS as i32 - 1);
    let row = ((pos.y / CELL_HEIGHT).floor() as i32).clamp(0, GRID_ROWS as i32 - 1);
    (col as usize, row as usize)
}

/// Per-frame map from cell to enemy slot indices
#[derive(Debug, Clone)]
pub struct SpatialGrid {
    /// Row-major, `GRID_COLS * GRID_ROWS` buckets
    cells: Vec<Vec<usize>>,
}

impl Default for SpatialGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl SpatialGrid {
    pub fn new() -> Self {
        Self {
            cells: (0..GRID_COLS * GRID_ROWS)
                .map(|_| Vec::with_capacity(ENEMY_POOL_SIZE))
                .collect(),
        }
    }

    #[inline(always)]
    fn bucket(col: usize, row: usize) -> usize {
        row * GRID_COLS + col
    }

    /// Empty every cell, keeping allocations
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.clear();
        }
    }

    /// File enemy slot `index` under the cell containing `pos`
    pub fn insert(&mut self, pos: Vec2, index: usize) {
        let (col, row) = cell_of(pos);
        self.cells[Self::bucket(col, row)].push(index);
    }

    /// Clear and refill from the active enemies, in slot order
    pub fn rebuild(&mut self, enemies: &EnemyPool) {
        self.clear();
        for (index, enemy) in enemies.iter_active() {
            self.insert(enemy.pos, index);
        }
    }

    /// Enemy slots filed under one cell, in insertion order
    pub fn cell(&self, col: usize, row: usize) -> &[usize] {
        &self.cells[Self::bucket(col, row)]
    }

    /// Enemy slots in the 3x3 block around `center`.
    ///
    /// Order: dx = -1, 0, 1 in the outer loop, dy = -1, 0, 1 inside, then
    /// insertion order within each cell. Cells off the grid are skipped.
    pub fn neighborhood(&self, center: Cell) -> impl Iterator<Item = usize> + '_ {
        let (col, row) = (center.0 as i32, center.1 as i32);
        (-1..=1)
            .flat_map(move |dx| (-1..=1).map(move |dy| (col + dx, row + dy)))
            .filter(|&(c, r)| c >= 0 && r >= 0 && c < GRID_COLS as i32 && r < GRID_ROWS as i32)
            .flat_map(move |(c, r)| self.cell(c as usize, r as usize).iter().copied())
    }

    /// First active enemy (in neighborhood order) overlapping `rect`
    pub fn first_hit(&self, rect: &Rect, enemies: &EnemyPool) -> Option<usize> {
        self.neighborhood(cell_of(rect.min)).find(|&index| {
            enemies
                .get(index)
                .is_some_and(|enemy| enemy.active && enemy.rect().overlaps(rect))
        })
    }

    /// Total entries across all cells
    #[cfg(test)]
    fn len(&self) -> usize {
        self.cells.iter().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Bullet, Enemy};

    #[test]
    fn test_cell_of_basic() {
        assert_eq!(cell_of(Vec2::new(0.0, 0.0)), (0, 0));
        assert_eq!(cell_of(Vec2::new(79.9, 59.9)), (0, 0));
        assert_eq!(cell_of(Vec2::new(80.0, 60.0)), (1, 1));
        assert_eq!(cell_of(Vec2::new(399.0, 300.0)), (4, 5));
    }

    #[test]
    fn test_cell_of_clamps() {
        // Spawning enemies sit above the field
        assert_eq!(cell_of(Vec2::new(100.0, -40.0)), (1, 0));
        assert_eq!(cell_of(Vec2::new(-5.0, 10.0)), (0, 0));
        assert_eq!(cell_of(Vec2::new(800.0, 600.0)), (9, 9));
        assert_eq!(cell_of(Vec2::new(5000.0, 5000.0)), (9, 9));
    }

    #[test]
    fn test_rebuild_files_active_enemies_only() {
        let mut enemies = EnemyPool::new();
        enemies.put(0, Enemy::new(Vec2::new(10.0, 10.0)));
        enemies.put(1, Enemy::new(Vec2::new(500.0, 400.0)));
        enemies.put(2, Enemy::new(Vec2::new(20.0, 20.0)));
        enemies.get_mut(1).unwrap().active = false;

        let mut grid = SpatialGrid::new();
        grid.rebuild(&enemies);
        assert_eq!(grid.len(), 2);
        assert_eq!(grid.cell(0, 0), &[0, 2]);

        // Rebuilding replaces the previous contents
        enemies.get_mut(0).unwrap().active = false;
        grid.rebuild(&enemies);
        assert_eq!(grid.cell(0, 0), &[2]);
    }

    #[test]
    fn test_neighborhood_order() {
        let mut grid = SpatialGrid::new();
        // Center (5,5); file one index per neighbor cell
        grid.insert(Vec2::new(6.0 * CELL_WIDTH, 4.0 * CELL_HEIGHT), 0); // dx=+1, dy=-1
        grid.insert(Vec2::new(4.0 * CELL_WIDTH, 6.0 * CELL_HEIGHT), 1); // dx=-1, dy=+1
        grid.insert(Vec2::new(5.0 * CELL_WIDTH, 5.0 * CELL_HEIGHT), 2); // dx=0, dy=0
        grid.insert(Vec2::new(4.0 * CELL_WIDTH, 4.0 * CELL_HEIGHT), 3); // dx=-1, dy=-1
        grid.insert(Vec2::new(8.0 * CELL_WIDTH, 5.0 * CELL_HEIGHT), 4); // out of range

        let order: Vec<usize> = grid.neighborhood((5, 5)).collect();
        assert_eq!(order, vec![3, 1, 2, 0]);
    }

    #[test]
    fn test_neighborhood_at_corner() {
        let mut grid = SpatialGrid::new();
        grid.insert(Vec2::new(0.0, 0.0), 7);
        grid.insert(Vec2::new(CELL_WIDTH, CELL_HEIGHT), 8);
        let order: Vec<usize> = grid.neighborhood((0, 0)).collect();
        assert_eq!(order, vec![7, 8]);
    }

    #[test]
    fn test_first_hit_across_cell_boundary() {
        let mut enemies = EnemyPool::new();
        // Enemy filed in column 0 but reaching into column 1
        enemies.put(0, Enemy::new(Vec2::new(60.0, 100.0)));
        let mut grid = SpatialGrid::new();
        grid.rebuild(&enemies);

        let bullet = Bullet::new(Vec2::new(82.0, 110.0));
        assert_eq!(grid.first_hit(&bullet.rect(), &enemies), Some(0));
    }

    #[test]
    fn test_first_hit_requires_strict_overlap() {
        let mut enemies = EnemyPool::new();
        enemies.put(0, Enemy::new(Vec2::new(200.0, 200.0)));
        let mut grid = SpatialGrid::new();
        grid.rebuild(&enemies);

        // Right edge of bullet touches the enemy's left edge
        let touching = Bullet::new(Vec2::new(195.0, 210.0));
        assert_eq!(grid.first_hit(&touching.rect(), &enemies), None);

        let inside = Bullet::new(Vec2::new(196.0, 210.0));
        assert_eq!(grid.first_hit(&inside.rect(), &enemies), Some(0));
    }

    #[test]
    fn test_first_hit_skips_deactivated() {
        let mut enemies = EnemyPool::new();
        enemies.put(0, Enemy::new(Vec2::new(200.0, 200.0)));
        enemies.put(1, Enemy::new(Vec2::new(205.0, 205.0)));
        let mut grid = SpatialGrid::new();
        grid.rebuild(&enemies);

        let bullet = Bullet::new(Vec2::new(210.0, 210.0));
        assert_eq!(grid.first_hit(&bullet.rect(), &enemies), Some(0));

        // Killed earlier in the same frame; the grid still lists it
        enemies.get_mut(0).unwrap().active = false;
        assert_eq!(grid.first_hit(&bullet.rect(), &enemies), Some(1));
    }
}
