use anyhow::{bail, Result};
use std::collections::HashSet;

use crate::common::{Action, Position};

#[derive(Debug, Clone)]
pub struct Tile {
    passable: bool,
    pub neighbors: Vec<(Action, Position)>, // Legal moves out of this tile, in N, S, W, E order
}

impl Tile {
    pub fn is_passable(&self) -> bool {
        self.passable
    }
}

/// Immutable grid the agent moves on. Dirt is not part of the map; it lives in the search state.
#[derive(Debug, Clone)]
pub struct Map {
    pub rows: usize,
    pub columns: usize,
    pub grid: Vec<Vec<Tile>>,
}

impl Map {
    pub fn new(rows: usize, columns: usize, blocked: &HashSet<Position>) -> Result<Self> {
        if rows == 0 || columns == 0 {
            bail!("grid dimensions must be positive, got {rows} rows x {columns} columns");
        }
        if let Some(&(row, column)) = blocked.iter().find(|&&(r, c)| r >= rows || c >= columns) {
            bail!("blocked cell ({row}, {column}) lies outside a {rows}x{columns} grid");
        }

        let grid: Vec<Vec<Tile>> = (0..rows)
            .map(|row| {
                (0..columns)
                    .map(|column| Tile {
                        passable: !blocked.contains(&(row, column)),
                        neighbors: Vec::new(),
                    })
                    .collect()
            })
            .collect();

        let mut map = Map {
            rows,
            columns,
            grid,
        };
        map.initialize_neighbors();

        Ok(map)
    }

    fn initialize_neighbors(&mut self) {
        for x in 0..self.rows {
            for y in 0..self.columns {
                if self.grid[x][y].passable {
                    self.grid[x][y].neighbors = self.get_neighbors(x, y);
                }
            }
        }
    }

    pub fn get_neighbors(&self, x: usize, y: usize) -> Vec<(Action, Position)> {
        let directions = [
            (Action::N, -1, 0),
            (Action::S, 1, 0),
            (Action::W, 0, -1),
            (Action::E, 0, 1),
        ];
        let mut neighbors = Vec::new();

        for &(action, dx, dy) in &directions {
            let new_x = x as i64 + dx;
            let new_y = y as i64 + dy;
            if new_x >= 0
                && new_y >= 0
                && new_x < self.rows as i64
                && new_y < self.columns as i64
                && self.grid[new_x as usize][new_y as usize].passable
            {
                neighbors.push((action, (new_x as usize, new_y as usize)));
            }
        }

        neighbors
    }

    /// Precomputed legal moves from `position`. Empty for blocked or out-of-bounds positions.
    pub fn neighbors(&self, position: Position) -> &[(Action, Position)] {
        self.grid
            .get(position.0)
            .and_then(|row| row.get(position.1))
            .map(|tile| tile.neighbors.as_slice())
            .unwrap_or(&[])
    }

    pub fn in_bounds(&self, position: Position) -> bool {
        position.0 < self.rows && position.1 < self.columns
    }

    pub fn is_passable(&self, position: Position) -> bool {
        self.in_bounds(position) && self.grid[position.0][position.1].is_passable()
    }

    pub fn blocked(&self) -> impl Iterator<Item = Position> + '_ {
        self.grid.iter().enumerate().flat_map(|(x, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, tile)| !tile.passable)
                .map(move |(y, _)| (x, y))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corner_neighbors() {
        let map = Map::new(3, 3, &HashSet::new()).unwrap();

        assert_eq!(
            map.neighbors((0, 0)).to_vec(),
            vec![(Action::S, (1, 0)), (Action::E, (0, 1))]
        );
        assert_eq!(map.neighbors((1, 1)).len(), 4);
        assert_eq!(
            map.neighbors((2, 2)).to_vec(),
            vec![(Action::N, (1, 2)), (Action::W, (2, 1))]
        );
    }

    #[test]
    fn test_blocked_cells_are_not_neighbors() {
        let blocked = HashSet::from([(1, 1)]);
        let map = Map::new(3, 3, &blocked).unwrap();

        assert!(!map.is_passable((1, 1)));
        assert!(map.neighbors((1, 1)).is_empty());
        assert!(map
            .neighbors((0, 1))
            .iter()
            .all(|&(_, position)| position != (1, 1)));
        assert_eq!(map.blocked().collect::<Vec<_>>(), vec![(1, 1)]);
    }

    #[test]
    fn test_out_of_bounds_queries() {
        let map = Map::new(1, 3, &HashSet::new()).unwrap();

        assert!(!map.in_bounds((1, 0)));
        assert!(!map.is_passable((0, 3)));
        assert!(map.neighbors((5, 5)).is_empty());
    }

    #[test]
    fn test_rejects_invalid_grids() {
        assert!(Map::new(0, 3, &HashSet::new()).is_err());
        assert!(Map::new(2, 2, &HashSet::from([(2, 0)])).is_err());
    }
}
