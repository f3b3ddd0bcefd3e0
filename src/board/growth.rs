use std::f64::consts::{FRAC_PI_4, TAU};

use rand::Rng;
use rand::seq::SliceRandom;

use crate::ir::{Cell, LineStyle, PadStyle};
use crate::render::RenderSink;

use super::grid::GridModel;

/// Cells covered by one trace segment.
const STEP: i32 = 2;
/// Continuation headings relative to the incoming one: straight, and 45 degrees either way.
const TURNS: [f64; 3] = [0.0, FRAC_PI_4, -FRAC_PI_4];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Growth {
    Grown,
    Blocked,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthLimits {
    pub branch_probability: f64,
    pub max_depth: usize,
    pub max_segments: usize,
}

impl Default for GrowthLimits {
    fn default() -> Self {
        Self {
            branch_probability: 0.7,
            max_depth: 4096,
            max_segments: 1_000_000,
        }
    }
}

/// Pending expansion of a grown segment: its shuffled turns and how many were tried.
struct Frame {
    from: Cell,
    to: Cell,
    turns: [f64; 3],
    next: usize,
    dead_end: bool,
}

/// Randomized trace walk over a grid.
///
/// Every claimed segment is drawn immediately; a segment whose continuations all
/// failed or were skipped gets a dead-end pad once its subtree is finished, so the
/// draw order matches a depth-first recursion.
pub struct TraceGrower<'a, R: Rng + ?Sized, S: RenderSink + ?Sized> {
    grid: &'a mut GridModel,
    rng: &'a mut R,
    sink: &'a mut S,
    limits: GrowthLimits,
    segments: usize,
    dead_ends: usize,
    depth_capped: bool,
    segments_capped: bool,
}

impl<'a, R: Rng + ?Sized, S: RenderSink + ?Sized> TraceGrower<'a, R, S> {
    pub fn new(grid: &'a mut GridModel, rng: &'a mut R, sink: &'a mut S, limits: GrowthLimits) -> Self {
        Self {
            grid,
            rng,
            sink,
            limits,
            segments: 0,
            dead_ends: 0,
            depth_capped: false,
            segments_capped: false,
        }
    }

    pub fn segments(&self) -> usize {
        self.segments
    }

    pub fn dead_ends(&self) -> usize {
        self.dead_ends
    }

    pub fn grid(&self) -> &GridModel {
        &*self.grid
    }

    /// Grows one segment `from -> to` and everything that branches off it.
    /// A blocked segment leaves the grid and the sink untouched.
    pub fn grow(&mut self, from: Cell, to: Cell) -> Growth {
        if !self.claim(from, to) {
            return Growth::Blocked;
        }

        let mut stack = vec![self.open(from, to)];
        while let Some(frame) = stack.last_mut() {
            if frame.next == frame.turns.len() {
                let Some(done) = stack.pop() else {
                    break;
                };
                if done.dead_end {
                    self.sink.draw_pad(done.to, PadStyle::DeadEnd);
                    self.dead_ends += 1;
                }
                continue;
            }

            let turn = frame.turns[frame.next];
            frame.next += 1;
            let origin = frame.to;
            let target = step(origin, heading(frame.from, frame.to) + turn);

            if !self.rng.random_bool(self.limits.branch_probability) {
                continue;
            }
            if stack.len() >= self.limits.max_depth {
                if !self.depth_capped {
                    log::warn!("trace depth ceiling {} reached, pruning", self.limits.max_depth);
                    self.depth_capped = true;
                }
                continue;
            }
            if self.claim(origin, target) {
                if let Some(parent) = stack.last_mut() {
                    parent.dead_end = false;
                }
                let child = self.open(origin, target);
                stack.push(child);
            }
        }
        Growth::Grown
    }

    /// Claims `origin` and fires `attempts` segments at random headings from it.
    pub fn seed_from(&mut self, origin: Cell, attempts: usize) {
        self.grid.mark_occupied(origin);
        for _ in 0..attempts {
            self.grow_random_heading(origin);
        }
    }

    /// Starts one more branch from a random cell already on the network.
    /// Returns `false` when no such cell turned up within `sample_attempts` draws.
    pub fn branch_from_network(&mut self, sample_attempts: usize) -> bool {
        let Some(origin) = self.sample_network_cell(sample_attempts) else {
            return false;
        };
        self.grow_random_heading(origin);
        true
    }

    fn grow_random_heading(&mut self, origin: Cell) -> Growth {
        let angle = self.rng.random::<f64>() * TAU;
        let target = step(origin, angle);
        if self.grid.is_empty(target) {
            self.grow(origin, target)
        } else {
            Growth::Blocked
        }
    }

    fn sample_network_cell(&mut self, attempts: usize) -> Option<Cell> {
        let width = self.grid.width() as i32;
        let height = self.grid.height() as i32;
        for _ in 0..attempts {
            let x = self.rng.random_range(0..width);
            let y = self.rng.random_range(0..height);
            let cell = Cell::new(x, y);
            if self.grid.is_network(cell) {
                return Some(cell);
            }
        }
        None
    }

    fn claim(&mut self, from: Cell, to: Cell) -> bool {
        if self.segments >= self.limits.max_segments {
            if !self.segments_capped {
                log::warn!("trace segment ceiling {} reached, stopping growth", self.limits.max_segments);
                self.segments_capped = true;
            }
            return false;
        }
        let mid = midpoint(from, to);
        if !self.grid.is_empty(to) || !self.grid.is_empty(mid) {
            return false;
        }
        self.grid.mark_occupied(mid);
        self.grid.mark_occupied(to);
        self.sink.draw_line(from, to, LineStyle::Trace);
        self.segments += 1;
        true
    }

    fn open(&mut self, from: Cell, to: Cell) -> Frame {
        let mut turns = TURNS;
        turns.shuffle(&mut *self.rng);
        Frame {
            from,
            to,
            turns,
            next: 0,
            dead_end: true,
        }
    }
}

/// Heading of `from -> to`, measured so that `step` with the same angle continues
/// in the same direction (x follows the sine, y the cosine).
fn heading(from: Cell, to: Cell) -> f64 {
    f64::from(to.x - from.x).atan2(f64::from(to.y - from.y))
}

fn step(origin: Cell, angle: f64) -> Cell {
    Cell::new(
        origin.x + angle.sin().round() as i32 * STEP,
        origin.y + angle.cos().round() as i32 * STEP,
    )
}

/// Rounds half up, like the browser's `Math.round`.
fn midpoint(from: Cell, to: Cell) -> Cell {
    Cell::new(
        (from.x + to.x + 1).div_euclid(2),
        (from.y + to.y + 1).div_euclid(2),
    )
}

/// The four grid corners plus the centre.
pub fn default_seeds(grid: &GridModel) -> Vec<Cell> {
    let w = grid.width() as i32;
    let h = grid.height() as i32;
    vec![
        Cell::new(0, 0),
        Cell::new(w - 1, 0),
        Cell::new(0, h - 1),
        Cell::new(w - 1, h - 1),
        Cell::new(w / 2, h / 2),
    ]
}
