use crate::ir::{BorderAnchor, Cell, LineStyle};
use crate::render::RenderSink;

use super::grid::GridModel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectorOptions {
    pub max_distance: i32,
    /// Give up as soon as the search enters an obstacle instead of crossing it.
    pub stop_at_obstacles: bool,
}

impl Default for ConnectorOptions {
    fn default() -> Self {
        Self {
            max_distance: 20,
            stop_at_obstacles: false,
        }
    }
}

/// Walks out from `anchor` along its direction and returns the first network
/// cell within `max_distance` steps. Never inspects more than `max_distance` cells.
pub fn find_connection(grid: &GridModel, anchor: &BorderAnchor, options: ConnectorOptions) -> Option<Cell> {
    for distance in 1..=options.max_distance {
        let cell = anchor.cell.step(anchor.direction, distance);
        if !grid.contains(cell) {
            return None;
        }
        if grid.is_obstacle(cell) {
            if options.stop_at_obstacles {
                return None;
            }
            continue;
        }
        if grid.is_occupied(cell) {
            return Some(cell);
        }
    }
    None
}

/// Draws a connector for every anchor that reaches the network. Unreached
/// anchors are left as bare pads. Returns how many were connected.
pub fn connect_anchors<S: RenderSink + ?Sized>(
    grid: &GridModel,
    anchors: &[BorderAnchor],
    options: ConnectorOptions,
    sink: &mut S,
) -> usize {
    let mut connected = 0;
    for anchor in anchors {
        if let Some(target) = find_connection(grid, anchor, options) {
            sink.draw_line(anchor.cell, target, LineStyle::Connector);
            connected += 1;
        }
    }
    log::debug!("connected {connected} of {} border anchors", anchors.len());
    connected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Direction, DrawCommand};

    fn anchor(x: i32, y: i32, direction: Direction) -> BorderAnchor {
        BorderAnchor {
            cell: Cell::new(x, y),
            direction,
        }
    }

    #[test]
    fn anchor_on_left_edge_never_connects() {
        let mut grid = GridModel::new(10, 10);
        for x in 1..10 {
            grid.mark_occupied(Cell::new(x, 5));
        }
        let mut sink: Vec<DrawCommand> = Vec::new();
        let connected = connect_anchors(
            &grid,
            &[anchor(0, 5, Direction::Left)],
            ConnectorOptions::default(),
            &mut sink,
        );
        assert_eq!(connected, 0);
        assert!(sink.is_empty());
    }

    #[test]
    fn connects_to_nearest_network_cell() {
        let mut grid = GridModel::new(10, 10);
        grid.mark_occupied(Cell::new(4, 6));
        grid.mark_occupied(Cell::new(4, 8));
        let mut sink: Vec<DrawCommand> = Vec::new();
        connect_anchors(
            &grid,
            &[anchor(4, 2, Direction::Down)],
            ConnectorOptions::default(),
            &mut sink,
        );
        assert_eq!(
            sink,
            vec![DrawCommand::Line {
                from: Cell::new(4, 2),
                to: Cell::new(4, 6),
                style: LineStyle::Connector,
            }]
        );
    }

    #[test]
    fn search_stops_at_max_distance() {
        let mut grid = GridModel::new(40, 3);
        grid.mark_occupied(Cell::new(21, 1));
        let options = ConnectorOptions::default();
        assert_eq!(find_connection(&grid, &anchor(0, 1, Direction::Right), options), None);
        assert_eq!(
            find_connection(&grid, &anchor(1, 1, Direction::Right), options),
            Some(Cell::new(21, 1))
        );
    }

    #[test]
    fn obstacles_are_skipped_or_stop_the_search() {
        let mut grid = GridModel::new(10, 10);
        grid.mark_obstacle(Cell::new(5, 3));
        grid.mark_occupied(Cell::new(5, 1));
        let up = anchor(5, 6, Direction::Up);

        assert_eq!(
            find_connection(&grid, &up, ConnectorOptions::default()),
            Some(Cell::new(5, 1))
        );
        let strict = ConnectorOptions {
            stop_at_obstacles: true,
            ..ConnectorOptions::default()
        };
        assert_eq!(find_connection(&grid, &up, strict), None);
    }
}
