//! Sparse 3D region made of unit cells.
//!
//! An [`OpenSpace`] is a set of cells; each cell is linked to the up-to-six
//! face-adjacent cells that are also in the set. Useful for flood-filling the
//! empty space around a voxel shape.

use rustc_hash::FxHashSet;

use crate::geometry::{manhattan3, offset3, Point3, AXES3};
use crate::graph::{Graph, WeightedGraph};

#[derive(Clone, Debug, Default)]
pub struct OpenSpace {
    cells: FxHashSet<Point3>,
}

impl OpenSpace {
    pub fn new(cells: impl IntoIterator<Item = Point3>) -> Self {
        Self {
            cells: cells.into_iter().collect(),
        }
    }

    /// Every cell inside the inclusive bounding box `min..=max` that is not
    /// in `solid`.
    pub fn complement(solid: &FxHashSet<Point3>, min: Point3, max: Point3) -> Self {
        let cells = (min.0..=max.0)
            .flat_map(|x| (min.1..=max.1).map(move |y| (x, y)))
            .flat_map(|(x, y)| (min.2..=max.2).map(move |z| (x, y, z)))
            .filter(|cell| !solid.contains(cell));
        Self::new(cells)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, cell: &Point3) -> bool {
        self.cells.contains(cell)
    }

    pub fn cells(&self) -> impl Iterator<Item = &Point3> {
        self.cells.iter()
    }
}

impl Graph for OpenSpace {
    type Node = Point3;

    fn neighbors(&self, &cell: &Point3, buf: &mut Vec<Point3>) {
        buf.extend(
            AXES3
                .iter()
                .map(|&step| offset3(cell, step))
                .filter(|next| self.cells.contains(next)),
        );
    }
}

impl WeightedGraph for OpenSpace {
    #[inline]
    fn cost(&self, &from: &Point3, &to: &Point3) -> u64 {
        manhattan3(from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbors_stay_inside_space() {
        let space = OpenSpace::new([(0, 0, 0), (1, 0, 0), (0, 0, 1), (5, 5, 5)]);
        let mut buf = Vec::new();

        space.neighbors(&(0, 0, 0), &mut buf);
        assert_eq!(buf, vec![(1, 0, 0), (0, 0, 1)]);

        buf.clear();
        space.neighbors(&(5, 5, 5), &mut buf);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_complement_excludes_solid_cells() {
        let solid: FxHashSet<Point3> = [(1, 1, 1)].into_iter().collect();
        let space = OpenSpace::complement(&solid, (0, 0, 0), (2, 2, 2));

        assert_eq!(space.len(), 26);
        assert!(!space.contains(&(1, 1, 1)));
        assert!(space.contains(&(2, 2, 2)));
    }
}
