use crate::ir::Cell;

/// Largest grid side. Both masks of a full-size grid stay well under 200 MiB and
/// every in-grid coordinate fits an `i32` with room to spare.
pub const MAX_SIDE: usize = 1 << 13;

/// Occupancy and obstacle masks for one generation pass.
///
/// Every coordinate outside `[0, width) x [0, height)` reads as occupied, so
/// walkers never need their own bounds checks. Mask bits only ever go from
/// `false` to `true`; there is no way to clear a cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridModel {
    width: usize,
    height: usize,
    occupied: Vec<bool>,
    obstacle: Vec<bool>,
}

impl GridModel {
    /// Each side is clamped into `1..=MAX_SIDE`.
    pub fn new(width: usize, height: usize) -> Self {
        let width = width.clamp(1, MAX_SIDE);
        let height = height.clamp(1, MAX_SIDE);
        Self {
            width,
            height,
            occupied: vec![false; width * height],
            obstacle: vec![false; width * height],
        }
    }

    /// Sizes a grid to cover a viewport of `width x height` pixels, scaled by the
    /// overscan factors.
    pub fn for_viewport(width: f32, height: f32, spacing: f32, overscan: (f32, f32)) -> Self {
        let (columns, rows) = viewport_cells(width, height, spacing, overscan);
        Self::new(columns, rows)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as usize) < self.width && (cell.y as usize) < self.height
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        self.contains(cell)
            .then(|| cell.y as usize * self.width + cell.x as usize)
    }

    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.index(cell).is_none_or(|idx| self.occupied[idx])
    }

    pub fn is_obstacle(&self, cell: Cell) -> bool {
        self.index(cell).is_some_and(|idx| self.obstacle[idx])
    }

    pub fn is_empty(&self, cell: Cell) -> bool {
        self.index(cell)
            .is_some_and(|idx| !self.occupied[idx] && !self.obstacle[idx])
    }

    /// Occupied cells that are not obstacles are part of the trace network.
    pub fn is_network(&self, cell: Cell) -> bool {
        self.index(cell)
            .is_some_and(|idx| self.occupied[idx] && !self.obstacle[idx])
    }

    /// Returns `false` for out-of-bounds cells, which are left untouched.
    pub fn mark_obstacle(&mut self, cell: Cell) -> bool {
        let Some(idx) = self.index(cell) else {
            return false;
        };
        self.obstacle[idx] = true;
        self.occupied[idx] = true;
        true
    }

    pub fn mark_occupied(&mut self, cell: Cell) -> bool {
        let Some(idx) = self.index(cell) else {
            return false;
        };
        self.occupied[idx] = true;
        true
    }

    pub fn occupied_count(&self) -> usize {
        self.occupied.iter().filter(|bit| **bit).count()
    }

    pub fn network_count(&self) -> usize {
        self.occupied
            .iter()
            .zip(&self.obstacle)
            .filter(|(occupied, obstacle)| **occupied && !**obstacle)
            .count()
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Cell::new(x as i32, y as i32)))
    }
}

/// Unclamped grid size for a viewport; float overflow saturates to `usize::MAX`.
pub fn viewport_cells(width: f32, height: f32, spacing: f32, overscan: (f32, f32)) -> (usize, usize) {
    let cells = |extent: f32, factor: f32| {
        let base = (extent / spacing).floor().max(0.0);
        (base * factor).floor() as usize
    };
    (cells(width, overscan.0), cells(height, overscan.1))
}
