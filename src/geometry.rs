//! Integer lattice points and distance helpers.
//!
//! Points are plain tuples so callers can build them inline and use them
//! directly as hash keys.

/// A 2D lattice coordinate `(x, y)`, with `y` growing downwards.
pub type Point = (i32, i32);

/// A 3D lattice coordinate `(x, y, z)`.
pub type Point3 = (i32, i32, i32);

/// The four axis-aligned unit steps, in neighbour order: up, down, left, right.
pub const CARDINALS: [Point; 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

/// The six axis-aligned unit steps in 3D.
///
/// Positive directions come first (+X, +Y, +Z), then the negative ones.
pub const AXES3: [Point3; 6] = [
    (1, 0, 0),
    (0, 1, 0),
    (0, 0, 1),
    (-1, 0, 0),
    (0, -1, 0),
    (0, 0, -1),
];

#[inline(always)]
pub const fn offset((x, y): Point, (dx, dy): Point) -> Point {
    (x + dx, y + dy)
}

#[inline(always)]
pub const fn offset3((x, y, z): Point3, (dx, dy, dz): Point3) -> Point3 {
    (x + dx, y + dy, z + dz)
}

/// Manhattan (taxicab) distance between two 2D points.
#[inline]
pub fn manhattan(a: Point, b: Point) -> u64 {
    u64::from(a.0.abs_diff(b.0)) + u64::from(a.1.abs_diff(b.1))
}

/// Manhattan (taxicab) distance between two 3D points.
#[inline]
pub fn manhattan3(a: Point3, b: Point3) -> u64 {
    u64::from(a.0.abs_diff(b.0)) + u64::from(a.1.abs_diff(b.1)) + u64::from(a.2.abs_diff(b.2))
}

/// Returns the 8 surrounding points (plus `point` itself when `include_self`),
/// row by row from top-left to bottom-right.
///
/// No bounds are applied; callers filter against their own grid.
pub fn surrounding(point: Point, include_self: bool) -> impl Iterator<Item = Point> {
    (-1..=1)
        .flat_map(|dy| (-1..=1).map(move |dx| (dx, dy)))
        .filter(move |&delta| include_self || delta != (0, 0))
        .map(move |delta| offset(point, delta))
}
