use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::InputError;

/// Pixel coordinates are folded into `[-CELL_LIMIT, CELL_LIMIT]` cells. Anything
/// past that lies far outside every grid, and the headroom keeps margin and
/// anchor offsets clear of `i32` overflow.
pub const CELL_LIMIT: i32 = 1 << 28;

/// One grid cell, addressed in cell units. Coordinates are signed so that
/// neighbours of edge cells can be expressed and rejected by bounds checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn step(self, direction: Direction, distance: i32) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx * distance, self.y + dy * distance)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit step in grid space; y grows downwards.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// Host-provided exclusion region in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelRect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl PixelRect {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn validate(&self, index: usize) -> Result<(), InputError> {
        let coords = [self.left, self.top, self.right, self.bottom];
        if coords.iter().any(|value| !value.is_finite()) {
            return Err(InputError::NonFiniteObstacle { index });
        }
        if self.right < self.left || self.bottom < self.top {
            return Err(InputError::InvertedObstacle {
                index,
                rect: *self,
            });
        }
        Ok(())
    }

    /// Inclusive cell bounds covered by this rectangle at the given spacing.
    pub fn to_cells(&self, spacing: f32) -> CellRect {
        let limit = CELL_LIMIT as f32;
        let cell = |value: f32| (value / spacing).floor().clamp(-limit, limit) as i32;
        CellRect {
            start: Cell::new(cell(self.left), cell(self.top)),
            end: Cell::new(cell(self.right), cell(self.bottom)),
        }
    }
}

impl FromStr for PixelRect {
    type Err = InputError;

    /// Parses `left,top,right,bottom`.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = input.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(InputError::MalformedObstacle(input.to_string()));
        }
        let mut values = [0.0f32; 4];
        for (slot, part) in values.iter_mut().zip(&parts) {
            *slot = part
                .parse()
                .map_err(|_| InputError::MalformedObstacle(input.to_string()))?;
        }
        Ok(Self::new(values[0], values[1], values[2], values[3]))
    }
}

/// Axis-aligned rectangle in grid space with inclusive corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRect {
    pub start: Cell,
    pub end: Cell,
}

impl CellRect {
    pub fn new(start: Cell, end: Cell) -> Self {
        Self { start, end }
    }

    pub fn dilate(&self, margin: i32) -> Self {
        Self {
            start: Cell::new(self.start.x.saturating_sub(margin), self.start.y.saturating_sub(margin)),
            end: Cell::new(self.end.x.saturating_add(margin), self.end.y.saturating_add(margin)),
        }
    }
}

/// Connection point just outside an obstacle, searching outward along `direction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BorderAnchor {
    pub cell: Cell,
    pub direction: Direction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LineStyle {
    Trace,
    Connector,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PadStyle {
    DeadEnd,
    Border,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DrawCommand {
    Line { from: Cell, to: Cell, style: LineStyle },
    Pad { at: Cell, style: PadStyle },
}

impl DrawCommand {
    pub fn cells(&self) -> Vec<Cell> {
        match *self {
            Self::Line { from, to, .. } => vec![from, to],
            Self::Pad { at, .. } => vec![at],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_obstacle_rect() {
        let rect: PixelRect = "10, 20,110.5,80".parse().unwrap();
        assert_eq!(rect, PixelRect::new(10.0, 20.0, 110.5, 80.0));
        assert!("10,20,30".parse::<PixelRect>().is_err());
        assert!("a,b,c,d".parse::<PixelRect>().is_err());
    }

    #[test]
    fn converts_pixels_to_inclusive_cells() {
        let cells = PixelRect::new(20.0, 25.0, 59.0, 60.0).to_cells(10.0);
        assert_eq!(cells.start, Cell::new(2, 2));
        assert_eq!(cells.end, Cell::new(5, 6));
    }

    #[test]
    fn far_coordinates_fold_into_cell_limit() {
        let cells = PixelRect::new(-1e12, -1e12, 1e12, 1e30).to_cells(10.0);
        assert_eq!(cells.start, Cell::new(-CELL_LIMIT, -CELL_LIMIT));
        assert_eq!(cells.end, Cell::new(CELL_LIMIT, CELL_LIMIT));

        let dilated = cells.dilate(i32::MAX);
        assert_eq!(dilated.start, Cell::new(i32::MIN, i32::MIN));
        assert_eq!(dilated.end, Cell::new(i32::MAX, i32::MAX));
    }

    #[test]
    fn rejects_inverted_rect() {
        let rect = PixelRect::new(50.0, 0.0, 10.0, 10.0);
        assert!(matches!(
            rect.validate(3),
            Err(InputError::InvertedObstacle { index: 3, .. })
        ));
    }
}
