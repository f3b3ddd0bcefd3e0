pub mod connector;
pub mod grid;
pub mod growth;
pub mod obstacles;

pub use connector::{ConnectorOptions, connect_anchors, find_connection};
pub use grid::{GridModel, MAX_SIDE};
pub use growth::{Growth, GrowthLimits, TraceGrower, default_seeds};
pub use obstacles::{edge_anchors, map_obstacles, mark_obstacles};

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use crate::config::GeneratorConfig;
use crate::error::InputError;
use crate::ir::{BorderAnchor, CellRect, DrawCommand, PixelRect};
use crate::render::RenderSink;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationStats {
    pub obstacle_cells: usize,
    pub anchors: usize,
    pub connected_anchors: usize,
    pub seeds: usize,
    pub skipped_seeds: usize,
    pub extra_branches: usize,
    pub skipped_branches: usize,
    pub segments: usize,
    pub dead_ends: usize,
}

#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    pub anchors: Vec<BorderAnchor>,
    pub stats: GenerationStats,
}

/// One complete, immutable generation pass.
#[derive(Debug, Clone)]
pub struct Board {
    pub width: usize,
    pub height: usize,
    pub spacing: f32,
    pub seed: u64,
    pub grid: GridModel,
    pub anchors: Vec<BorderAnchor>,
    pub commands: Vec<DrawCommand>,
    pub stats: GenerationStats,
}

impl Board {
    /// Builds a board from scratch for a viewport of `width x height` pixels.
    /// Nothing carries over from earlier boards; call again on every resize.
    pub fn regenerate(
        width: f32,
        height: f32,
        obstacles: &[PixelRect],
        config: &GeneratorConfig,
    ) -> Result<Self, InputError> {
        validate(width, height, obstacles, config)?;

        let spacing = config.cell_spacing;
        let mut grid = GridModel::for_viewport(width, height, spacing, (config.overscan_x, config.overscan_y));
        let footprints: Vec<CellRect> = obstacles.iter().map(|rect| rect.to_cells(spacing)).collect();

        let seed = resolve_seed(config.seed);
        let mut rng = StdRng::seed_from_u64(seed);
        let mut commands: Vec<DrawCommand> = Vec::new();
        let outcome = generate_with(&mut grid, &footprints, &mut rng, &mut commands, config);
        log::info!(
            "generated {}x{} board (seed {seed}): {} segments, {} dead ends, {}/{} anchors connected",
            grid.width(),
            grid.height(),
            outcome.stats.segments,
            outcome.stats.dead_ends,
            outcome.stats.connected_anchors,
            outcome.stats.anchors
        );

        Ok(Self {
            width: grid.width(),
            height: grid.height(),
            spacing,
            seed,
            grid,
            anchors: outcome.anchors,
            commands,
            stats: outcome.stats,
        })
    }
}

/// Runs the whole pass over a caller-owned grid: obstacle carving and anchors,
/// seeded growth, extra branches off the network, then border connections.
pub fn generate_with<R, S>(
    grid: &mut GridModel,
    footprints: &[CellRect],
    rng: &mut R,
    sink: &mut S,
    config: &GeneratorConfig,
) -> GenerationOutcome
where
    R: Rng + ?Sized,
    S: RenderSink + ?Sized,
{
    let mut stats = GenerationStats::default();

    let before = grid.occupied_count();
    let anchors = map_obstacles(&mut *grid, footprints, config.obstacle_margin, config.corner_policy, &mut *sink);
    stats.anchors = anchors.len();
    stats.obstacle_cells = grid.cells().filter(|cell| grid.is_obstacle(*cell)).count();
    log::debug!(
        "obstacle pass claimed {} cells",
        grid.occupied_count().saturating_sub(before)
    );

    let seeds = if config.seeds.is_empty() {
        default_seeds(grid)
    } else {
        config.seeds.clone()
    };
    let limits = GrowthLimits {
        branch_probability: config.branch_probability.clamp(0.0, 1.0),
        max_depth: config.max_depth.max(1),
        max_segments: config.max_segments,
    };

    let (segments, dead_ends) = {
        let mut grower = TraceGrower::new(&mut *grid, &mut *rng, &mut *sink, limits);
        for seed in seeds {
            if !grower.grid().contains(seed) || grower.grid().is_obstacle(seed) {
                log::warn!("skipping seed {seed:?}: outside the grid or inside an obstacle");
                stats.skipped_seeds += 1;
                continue;
            }
            grower.seed_from(seed, config.initial_attempts);
            stats.seeds += 1;
        }

        if grower.grid().network_count() == 0 {
            if config.extra_branches > 0 {
                log::warn!("no network cells to branch from, skipping {} extra branches", config.extra_branches);
            }
            stats.skipped_branches = config.extra_branches;
        } else {
            for _ in 0..config.extra_branches {
                if grower.branch_from_network(config.sample_attempts) {
                    stats.extra_branches += 1;
                } else {
                    stats.skipped_branches += 1;
                }
            }
            if stats.skipped_branches > 0 {
                log::warn!(
                    "{} extra branches found no start cell within {} draws",
                    stats.skipped_branches,
                    config.sample_attempts
                );
            }
        }
        (grower.segments(), grower.dead_ends())
    };
    stats.segments = segments;
    stats.dead_ends = dead_ends;
    log::debug!("grew {segments} segments with {dead_ends} dead ends");

    let options = ConnectorOptions {
        max_distance: config.connect_distance,
        stop_at_obstacles: config.stop_at_obstacles,
    };
    stats.connected_anchors = connect_anchors(grid, &anchors, options, sink);

    GenerationOutcome { anchors, stats }
}

fn validate(
    width: f32,
    height: f32,
    obstacles: &[PixelRect],
    config: &GeneratorConfig,
) -> Result<(), InputError> {
    let spacing = config.cell_spacing;
    if !spacing.is_finite() || spacing <= 0.0 {
        return Err(InputError::InvalidSpacing(spacing));
    }
    if !width.is_finite() || !height.is_finite() || width < 0.0 || height < 0.0 {
        return Err(InputError::InvalidViewport { width, height });
    }
    let (ox, oy) = (config.overscan_x, config.overscan_y);
    if !ox.is_finite() || !oy.is_finite() || ox <= 0.0 || oy <= 0.0 {
        return Err(InputError::InvalidOverscan { x: ox, y: oy });
    }
    let (columns, rows) = grid::viewport_cells(width, height, spacing, (ox, oy));
    if columns > MAX_SIDE || rows > MAX_SIDE {
        return Err(InputError::GridTooLarge {
            width: columns,
            height: rows,
            max: MAX_SIDE,
        });
    }
    if !(0.0..=1.0).contains(&config.branch_probability) {
        return Err(InputError::InvalidProbability(config.branch_probability));
    }
    for (index, rect) in obstacles.iter().enumerate() {
        rect.validate(index)?;
    }
    Ok(())
}

#[cfg(feature = "entropy")]
fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(rand::random)
}

#[cfg(not(feature = "entropy"))]
fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| {
        log::warn!("no seed configured and the 'entropy' feature is off, using 0");
        0
    })
}
