//! Bounded 2D grid with blocked cells, viewed as a graph.
//!
//! Cells are addressed by [`Point`] `(x, y)` within `[0, width) x [0, height)`.
//! Any in-bounds coordinate is a valid node; there is no registration step.

use std::str::FromStr;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::Error;
use crate::geometry::{manhattan, offset, Point, CARDINALS};
use crate::graph::{Graph, WeightedGraph};

/// Character for a blocked cell in ASCII maps.
pub const BLOCKED: char = '#';

/// Character for an open cell in ASCII maps.
pub const OPEN: char = '.';

/// Character marking highlighted open cells in [`Grid::render`].
pub const HIGHLIGHT: char = 'O';

/// A rectangular grid whose open cells are connected to their four
/// axis-aligned neighbours.
#[derive(Clone, Debug)]
pub struct Grid {
    width: usize,
    height: usize,
    blocked: FxHashSet<Point>,
    /// Open cells that carried a letter or symbol in the parsed map.
    markers: FxHashMap<char, Point>,
}

impl Grid {
    pub fn new(width: usize, height: usize, blocked: impl IntoIterator<Item = Point>) -> Self {
        Self {
            width,
            height,
            blocked: blocked.into_iter().collect(),
            markers: FxHashMap::default(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn in_bounds(&self, (x, y): Point) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    #[inline]
    pub fn is_blocked(&self, point: Point) -> bool {
        self.blocked.contains(&point)
    }

    /// True if `point` is inside the grid and not blocked.
    #[inline]
    pub fn is_open(&self, point: Point) -> bool {
        self.in_bounds(point) && !self.is_blocked(point)
    }

    /// Position of the first cell labelled `marker` in the parsed map.
    pub fn marker(&self, marker: char) -> Option<Point> {
        self.markers.get(&marker).copied()
    }

    /// All open cells, row by row.
    pub fn open_cells(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.height as i32)
            .flat_map(move |y| (0..self.width as i32).map(move |x| (x, y)))
            .filter(move |&point| !self.is_blocked(point))
    }

    /// Draws the grid one row per line (no trailing newline).
    ///
    /// Blocked cells show as `#`, open cells in `highlight` as `O`, and all
    /// other open cells as `.`.
    pub fn render(&self, highlight: &FxHashSet<Point>) -> String {
        let mut rows = Vec::with_capacity(self.height);

        for y in 0..self.height as i32 {
            let row: String = (0..self.width as i32)
                .map(|x| {
                    if self.is_blocked((x, y)) {
                        BLOCKED
                    } else if highlight.contains(&(x, y)) {
                        HIGHLIGHT
                    } else {
                        OPEN
                    }
                })
                .collect();
            rows.push(row);
        }

        rows.join("\n")
    }
}

impl Graph for Grid {
    type Node = Point;

    /// Yields up, down, left, right, skipping cells that are out of bounds
    /// or blocked.
    fn neighbors(&self, &point: &Point, buf: &mut Vec<Point>) {
        buf.extend(
            CARDINALS
                .iter()
                .map(|&step| offset(point, step))
                .filter(|&next| self.is_open(next)),
        );
    }
}

impl WeightedGraph for Grid {
    #[inline]
    fn cost(&self, &from: &Point, &to: &Point) -> u64 {
        manhattan(from, to)
    }
}

impl FromStr for Grid {
    type Err = Error;

    /// Parses an ASCII map: `#` is blocked, everything else is open. Any
    /// character other than `.` and `#` is also recorded as a marker.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = text
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.is_empty())
            .collect();

        let Some(first) = rows.first() else {
            return Err(Error::InvalidGrid("map is empty".to_string()));
        };
        let width = first.chars().count();

        let mut grid = Grid::new(width, rows.len(), []);

        for (y, row) in rows.iter().enumerate() {
            let row_width = row.chars().count();
            if row_width != width {
                return Err(Error::InvalidGrid(format!(
                    "row {} has width {row_width}, expected {width}",
                    y + 1
                )));
            }

            for (x, cell) in row.chars().enumerate() {
                let point = (x as i32, y as i32);
                match cell {
                    BLOCKED => {
                        grid.blocked.insert(point);
                    }
                    OPEN => {}
                    marker => {
                        grid.markers.entry(marker).or_insert(point);
                    }
                }
            }
        }

        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn neighbors_of(grid: &Grid, point: Point) -> Vec<Point> {
        let mut buf = Vec::new();
        grid.neighbors(&point, &mut buf);
        buf
    }

    #[test]
    fn test_corner_has_two_neighbors_in_fixed_order() {
        let grid = Grid::new(3, 3, []);
        assert_eq!(neighbors_of(&grid, (0, 0)), vec![(0, 1), (1, 0)]);
        assert_eq!(
            neighbors_of(&grid, (1, 1)),
            vec![(1, 0), (1, 2), (0, 1), (2, 1)]
        );
    }

    #[test]
    fn test_neighbors_never_leave_bounds_or_enter_blocked() {
        let blocked = [(1, 0), (2, 2), (0, 3)];
        let grid = Grid::new(4, 4, blocked);

        for y in -1..5 {
            for x in -1..5 {
                for next in neighbors_of(&grid, (x, y)) {
                    assert!(grid.in_bounds(next), "{next:?} from ({x},{y}) is out of bounds");
                    assert!(!blocked.contains(&next), "{next:?} from ({x},{y}) is blocked");
                }
            }
        }
    }

    #[test]
    fn test_parse_records_blocked_cells_and_markers() {
        let grid: Grid = "S.#\n.#E\n...\n".parse().unwrap();

        assert_eq!((grid.width(), grid.height()), (3, 3));
        assert!(grid.is_blocked((2, 0)));
        assert!(grid.is_blocked((1, 1)));
        assert_eq!(grid.marker('S'), Some((0, 0)));
        assert_eq!(grid.marker('E'), Some((2, 1)));
        assert_eq!(grid.marker('X'), None);
        assert_eq!(grid.open_cells().count(), 7);
    }

    #[test]
    fn test_parse_rejects_ragged_rows() {
        let err = "...\n..\n".parse::<Grid>().unwrap_err();
        assert!(matches!(err, Error::InvalidGrid(ref msg) if msg.contains("row 2")));

        assert!(matches!("".parse::<Grid>(), Err(Error::InvalidGrid(_))));
    }

    #[test]
    fn test_cost_is_unit_between_adjacent_cells() {
        let grid = Grid::new(2, 2, []);
        assert_eq!(grid.cost(&(0, 0), &(1, 0)), 1);
    }

    #[test]
    fn test_render_snapshot() {
        let grid: Grid = ".#..\n##..\n....".parse().unwrap();
        let highlight: FxHashSet<Point> = [(2, 0), (3, 1), (0, 2)].into_iter().collect();

        insta::assert_snapshot!(grid.render(&highlight), @r"
        .#O.
        ##.O
        O...
        ");
    }
}
