use serde::{Deserialize, Serialize};

/// A tile coordinate. Ordering is row-major (by `y`, then `x`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub y: usize,
    pub x: usize,
}

impl Coord {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A fixed-size 2D tilemap grid. Edges do not wrap; neighborhoods are clamped.
#[derive(Clone, Debug, PartialEq)]
pub struct Tilemap<T> {
    pub width: usize,
    pub height: usize,
    data: Vec<T>,
}

impl<T: Clone> Tilemap<T> {
    pub fn new_with(width: usize, height: usize, value: T) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    /// Build a tilemap from row-major data. Returns `None` if the length does
    /// not match `width * height`.
    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Option<Self> {
        if data.len() != width * height {
            return None;
        }
        Some(Self { width, height, data })
    }

    fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(self.in_bounds(x, y), "({}, {}) outside {}x{}", x, y, self.width, self.height);
        y * self.width + x
    }

    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    pub fn get(&self, x: usize, y: usize) -> &T {
        &self.data[self.index(x, y)]
    }

    /// Bounds-checked access.
    pub fn try_get(&self, x: usize, y: usize) -> Option<&T> {
        if self.in_bounds(x, y) {
            Some(&self.data[y * self.width + x])
        } else {
            None
        }
    }

    pub fn set(&mut self, x: usize, y: usize, value: T) {
        let idx = self.index(x, y);
        self.data[idx] = value;
    }

    pub fn at(&self, coord: Coord) -> &T {
        self.get(coord.x, coord.y)
    }

    /// All cells of the 3x3 block centred on (x, y), center included,
    /// clipped at the map edges. Yields 4 cells in a corner, 6 on an edge, 9 inside.
    pub fn neighborhood_3x3(&self, x: usize, y: usize) -> impl Iterator<Item = (usize, usize)> {
        let x0 = x.saturating_sub(1);
        let y0 = y.saturating_sub(1);
        let x1 = (x + 1).min(self.width - 1);
        let y1 = (y + 1).min(self.height - 1);
        (y0..=y1).flat_map(move |ny| (x0..=x1).map(move |nx| (nx, ny)))
    }

    /// Iterate over all cells with their coordinates, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &T)> {
        let width = self.width;
        self.data.iter().enumerate().map(move |(idx, val)| {
            let x = idx % width;
            let y = idx / width;
            (x, y, val)
        })
    }

    /// Iterate mutably over all cells with their coordinates.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (usize, usize, &mut T)> {
        let width = self.width;
        self.data.iter_mut().enumerate().map(move |(idx, val)| {
            let x = idx % width;
            let y = idx / width;
            (x, y, val)
        })
    }

    /// Row-major view of the raw cells.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Build a new map by applying `f` to every cell.
    pub fn map<U, F: FnMut(&T) -> U>(&self, mut f: F) -> Tilemap<U> {
        Tilemap {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(|v| f(v)).collect(),
        }
    }
}

impl<T: Clone + PartialEq> Tilemap<T> {
    /// Number of cells equal to `value`.
    pub fn count(&self, value: &T) -> usize {
        self.data.iter().filter(|v| *v == value).count()
    }
}

impl Tilemap<f32> {
    /// Minimum and maximum cell values.
    pub fn value_range(&self) -> (f32, f32) {
        let mut min_val = f32::MAX;
        let mut max_val = f32::MIN;
        for &v in &self.data {
            if v < min_val {
                min_val = v;
            }
            if v > max_val {
                max_val = v;
            }
        }
        (min_val, max_val)
    }
}
