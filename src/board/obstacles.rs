use std::collections::HashSet;
use std::ops::RangeInclusive;

use crate::config::CornerPolicy;
use crate::ir::{BorderAnchor, Cell, CellRect, Direction, PadStyle};
use crate::render::RenderSink;

use super::grid::GridModel;

/// Marks every cell of each dilated footprint as obstacle (and so occupied).
/// Footprints are clipped to the grid; a footprint entirely outside marks nothing.
pub fn mark_obstacles(grid: &mut GridModel, footprints: &[CellRect], margin: i32) -> usize {
    let mut marked = 0;
    for rect in footprints {
        let dilated = rect.dilate(margin.max(0));
        let xs = clip(dilated.start.x, dilated.end.x, grid.width());
        let ys = clip(dilated.start.y, dilated.end.y, grid.height());
        for y in ys {
            for x in xs.clone() {
                if grid.mark_obstacle(Cell::new(x, y)) {
                    marked += 1;
                }
            }
        }
    }
    marked
}

/// Anchors for the four edges of one footprint, in top, bottom, left, right order.
///
/// Each anchor sits on the first cell outside the dilated footprint, straight out
/// from an edge cell of the undilated rectangle. Anchors that would fall outside
/// the grid are not produced.
pub fn edge_anchors(
    grid: &GridModel,
    rect: CellRect,
    margin: i32,
    policy: CornerPolicy,
) -> Vec<BorderAnchor> {
    let offset = margin.max(0).saturating_add(1);
    let trim = match policy {
        CornerPolicy::Include => 0,
        CornerPolicy::Trim => 1,
    };
    let columns = clip(rect.start.x, rect.end.x.saturating_sub(trim), grid.width());
    let rows = clip(rect.start.y, rect.end.y.saturating_sub(trim), grid.height());

    let mut anchors = Vec::new();
    let mut push = |cell: Cell, direction: Direction| {
        if grid.contains(cell) {
            anchors.push(BorderAnchor { cell, direction });
        }
    };
    for x in columns.clone() {
        push(Cell::new(x, rect.start.y.saturating_sub(offset)), Direction::Up);
    }
    for x in columns {
        push(Cell::new(x, rect.end.y.saturating_add(offset)), Direction::Down);
    }
    for y in rows.clone() {
        push(Cell::new(rect.start.x.saturating_sub(offset), y), Direction::Left);
    }
    for y in rows {
        push(Cell::new(rect.end.x.saturating_add(offset), y), Direction::Right);
    }
    anchors
}

/// Carves all footprints into the grid, then derives their border anchors.
///
/// Anchors covered by another obstacle are dropped, as are repeats of a cell
/// already anchored by an earlier footprint. Surviving anchors claim their cell
/// and are drawn as border pads.
pub fn map_obstacles<S: RenderSink + ?Sized>(
    grid: &mut GridModel,
    footprints: &[CellRect],
    margin: i32,
    policy: CornerPolicy,
    sink: &mut S,
) -> Vec<BorderAnchor> {
    let marked = mark_obstacles(grid, footprints, margin);

    let mut seen = HashSet::new();
    let mut anchors = Vec::new();
    for rect in footprints {
        for anchor in edge_anchors(grid, *rect, margin, policy) {
            if grid.is_obstacle(anchor.cell) || !seen.insert(anchor.cell) {
                continue;
            }
            grid.mark_occupied(anchor.cell);
            sink.draw_pad(anchor.cell, PadStyle::Border);
            anchors.push(anchor);
        }
    }
    log::debug!(
        "mapped {} obstacles: {marked} cells masked, {} border anchors",
        footprints.len(),
        anchors.len()
    );
    anchors
}

fn clip(start: i32, end: i32, extent: usize) -> RangeInclusive<i32> {
    start.max(0)..=end.min(extent as i32 - 1)
}
