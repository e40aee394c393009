/*!
# Grids

Helpers for searches on 2D grids, the most common implicit graph in puzzle inputs.

Positions are [`Point`]s `(row, col)` with rows growing downwards. Neighborhood functions
such as [`neighbors_4`] are unbounded; [`Grid`] additionally knows its extent and filters
out positions outside of it.

```
use searchkit::{algo::*, grid::*};

let maze = Grid::parse("
S.#
..#
#.E
");
let start = maze.find(&'S').unwrap();
let end = maze.find(&'E').unwrap();

let path = bfs_path(start, end, maze.neighbor_fn(|c| *c != '#')).unwrap();
assert_eq!(path.len(), 5);
assert_eq!(manhattan_distance(start, end), 4);
```
*/

use std::{
    fmt,
    ops::{Index, IndexMut},
};

use smallvec::SmallVec;

use crate::error::{Error, Result};

/// A position `(row, col)` on a grid
pub type Point = (i64, i64);

/// Offsets of the 4 orthogonal neighbors: east, south, west, north
pub const DIRECTIONS_4: [Point; 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// Offsets of the 8 surrounding neighbors in row-major order
pub const DIRECTIONS_8: [Point; 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Returns the 4 orthogonal neighbors of `p` in the order of [`DIRECTIONS_4`]
pub fn neighbors_4((row, col): Point) -> [Point; 4] {
    DIRECTIONS_4.map(|(dr, dc)| (row + dr, col + dc))
}

/// Returns the 8 surrounding neighbors of `p` in the order of [`DIRECTIONS_8`]
pub fn neighbors_8((row, col): Point) -> [Point; 8] {
    DIRECTIONS_8.map(|(dr, dc)| (row + dr, col + dc))
}

/// Number of orthogonal unit steps between `a` and `b`.
/// Admissible and consistent for A* on 4-connected grids with edge costs of at least 1.
pub fn manhattan_distance(a: Point, b: Point) -> i64 {
    (a.0 - b.0).abs() + (a.1 - b.1).abs()
}

/// Number of king moves between `a` and `b`.
/// Admissible and consistent for A* on 8-connected grids with edge costs of at least 1.
pub fn chebyshev_distance(a: Point, b: Point) -> i64 {
    (a.0 - b.0).abs().max((a.1 - b.1).abs())
}

/// One of the 4 compass directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// Towards row `-1`
    North,
    /// Towards column `+1`
    East,
    /// Towards row `+1`
    South,
    /// Towards column `-1`
    West,
}

impl Direction {
    /// All directions in clockwise order starting with [`Direction::North`]
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Rotates by 90 degrees clockwise
    pub fn turn_right(self) -> Self {
        match self {
            Direction::North => Direction::East,
            Direction::East => Direction::South,
            Direction::South => Direction::West,
            Direction::West => Direction::North,
        }
    }

    /// Rotates by 90 degrees counter-clockwise
    pub fn turn_left(self) -> Self {
        match self {
            Direction::North => Direction::West,
            Direction::East => Direction::North,
            Direction::South => Direction::East,
            Direction::West => Direction::South,
        }
    }

    /// Rotates by 180 degrees
    pub fn turn_around(self) -> Self {
        self.turn_right().turn_right()
    }

    /// Offset of a single step into this direction
    pub fn delta(self) -> Point {
        match self {
            Direction::North => (-1, 0),
            Direction::East => (0, 1),
            Direction::South => (1, 0),
            Direction::West => (0, -1),
        }
    }

    /// Returns the position one step from `p` into this direction
    pub fn step(self, (row, col): Point) -> Point {
        let (dr, dc) = self.delta();
        (row + dr, col + dc)
    }
}

impl TryFrom<char> for Direction {
    type Error = Error;

    /// Accepts compass letters (`N`, `E`, `S`, `W`) as well as `U`, `R`, `D`, `L`
    fn try_from(c: char) -> Result<Self> {
        match c {
            'N' | 'U' => Ok(Direction::North),
            'E' | 'R' => Ok(Direction::East),
            'S' | 'D' => Ok(Direction::South),
            'W' | 'L' => Ok(Direction::West),
            _ => Err(Error::InvalidDirection(c)),
        }
    }
}

/// A rectangular grid stored in row-major order.
///
/// All accessors taking a [`Point`] treat positions outside the grid (including negative ones)
/// gracefully, except for indexing which panics.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid<T> {
    cells: Vec<T>,
    height: usize,
    width: usize,
}

impl Grid<char> {
    /// Parses a grid of characters, one row per line. Surrounding whitespace is trimmed.
    ///
    /// # Panics
    /// If the rows have different lengths.
    pub fn parse(input: &str) -> Self {
        Self::from_rows(input.trim().lines().map(|line| line.chars()))
    }
}

impl<T> Grid<T> {
    /// Creates a grid from its rows. Rows without cells yield an empty grid of height 0.
    ///
    /// # Panics
    /// If the rows have different lengths.
    pub fn from_rows<I, R>(rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = T>,
    {
        let mut cells = Vec::new();
        let mut height = 0;
        let mut width = 0;

        for row in rows {
            let before = cells.len();
            cells.extend(row);
            let len = cells.len() - before;

            if height == 0 {
                width = len;
            }
            assert_eq!(len, width, "row {height} has length {len} instead of {width}");
            height += 1;
        }

        if width == 0 {
            height = 0;
        }

        Self {
            cells,
            height,
            width,
        }
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns *true* if `p` lies inside the grid
    pub fn in_bounds(&self, (row, col): Point) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.height && (col as usize) < self.width
    }

    fn offset(&self, p: Point) -> Option<usize> {
        self.in_bounds(p)
            .then(|| p.0 as usize * self.width + p.1 as usize)
    }

    /// Returns the cell at `p` or `None` if `p` lies outside the grid
    pub fn get(&self, p: Point) -> Option<&T> {
        self.offset(p).map(|i| &self.cells[i])
    }

    /// Mutable variant of [`Grid::get`]
    pub fn get_mut(&mut self, p: Point) -> Option<&mut T> {
        self.offset(p).map(|i| &mut self.cells[i])
    }

    /// Overwrites the cell at `p`. Positions outside the grid are ignored and return *false*.
    pub fn set(&mut self, p: Point, value: T) -> bool {
        match self.get_mut(p) {
            Some(cell) => {
                *cell = value;
                true
            }
            None => false,
        }
    }

    /// Returns the cells of row `row`, if it exists
    pub fn row(&self, row: usize) -> Option<&[T]> {
        (row < self.height).then(|| &self.cells[row * self.width..(row + 1) * self.width])
    }

    /// Iterates over all rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        // `chunks` panics on zero-sized chunks
        self.cells.chunks(self.width.max(1))
    }

    /// Iterates over all cells together with their position in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (Point, &T)> + '_ {
        self.cells.iter().enumerate().map(|(i, cell)| {
            (
                ((i / self.width) as i64, (i % self.width) as i64),
                cell,
            )
        })
    }

    /// Returns the first position (in row-major order) holding `value`
    pub fn find(&self, value: &T) -> Option<Point>
    where
        T: PartialEq,
    {
        self.cells()
            .find_map(|(p, cell)| (cell == value).then_some(p))
    }

    /// Returns all positions holding `value` in row-major order
    pub fn find_all(&self, value: &T) -> Vec<Point>
    where
        T: PartialEq,
    {
        self.cells()
            .filter_map(|(p, cell)| (cell == value).then_some(p))
            .collect()
    }

    /// Orthogonal neighbors of `p` inside the grid
    pub fn neighbors_4(&self, p: Point) -> SmallVec<[Point; 4]> {
        neighbors_4(p)
            .into_iter()
            .filter(|&q| self.in_bounds(q))
            .collect()
    }

    /// Surrounding neighbors of `p` inside the grid
    pub fn neighbors_8(&self, p: Point) -> SmallVec<[Point; 8]> {
        neighbors_8(p)
            .into_iter()
            .filter(|&q| self.in_bounds(q))
            .collect()
    }

    /// Returns a neighbor function for the unweighted algorithms in [`crate::algo`]: moves go to
    /// orthogonal neighbors inside the grid whose cell satisfies `passable`
    pub fn neighbor_fn<'a, P>(&'a self, mut passable: P) -> impl FnMut(&Point) -> SmallVec<[Point; 4]> + 'a
    where
        P: FnMut(&T) -> bool + 'a,
    {
        move |p: &Point| {
            let mut neighbors = self.neighbors_4(*p);
            neighbors.retain(|q| passable(&self[*q]));
            neighbors
        }
    }

    /// Returns the grid mirrored along its main diagonal
    pub fn transposed(&self) -> Self
    where
        T: Clone,
    {
        Self::from_rows((0..self.width).map(|col| self.rows().map(move |row| row[col].clone())))
    }

    /// Returns the grid rotated by 90 degrees clockwise
    pub fn rotated_cw(&self) -> Self
    where
        T: Clone,
    {
        let mut rotated = self.transposed();
        rotated.flip_horizontal();
        rotated
    }

    /// Returns the grid rotated by 90 degrees counter-clockwise
    pub fn rotated_ccw(&self) -> Self
    where
        T: Clone,
    {
        let mut rotated = self.transposed();
        rotated.flip_vertical();
        rotated
    }

    /// Reverses every row
    pub fn flip_horizontal(&mut self) {
        if self.width > 0 {
            self.cells
                .chunks_mut(self.width)
                .for_each(|row| row.reverse());
        }
    }

    /// Reverses the order of rows
    pub fn flip_vertical(&mut self) {
        for row in 0..self.height / 2 {
            let other = self.height - 1 - row;
            for col in 0..self.width {
                self.cells
                    .swap(row * self.width + col, other * self.width + col);
            }
        }
    }
}

impl<T> Index<Point> for Grid<T> {
    type Output = T;

    fn index(&self, p: Point) -> &T {
        match self.get(p) {
            Some(cell) => cell,
            None => panic!("{p:?} is outside of a {}x{} grid", self.height, self.width),
        }
    }
}

impl<T> IndexMut<Point> for Grid<T> {
    fn index_mut(&mut self, p: Point) -> &mut T {
        let (height, width) = (self.height, self.width);
        match self.get_mut(p) {
            Some(cell) => cell,
            None => panic!("{p:?} is outside of a {height}x{width} grid"),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Grid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{cell}")?;
            }
        }
        Ok(())
    }
}
