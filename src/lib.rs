pub mod board;
pub mod board_dump;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod ir;
pub mod render;
pub mod theme;

pub use board::{Board, GenerationStats, GridModel, generate_with};
#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, CornerPolicy, GeneratorConfig, RenderConfig, load_config, parse_config};
pub use error::InputError;
pub use ir::{BorderAnchor, Cell, CellRect, Direction, DrawCommand, LineStyle, PadStyle, PixelRect};
pub use render::{RenderSink, SvgSink, render_svg};
pub use theme::Theme;

/// Generates a board for the given viewport and renders it straight to SVG.
pub fn render_board_svg(
    width: f32,
    height: f32,
    obstacles: &[PixelRect],
    config: &GeneratorConfig,
    theme: &Theme,
) -> Result<String, InputError> {
    let board = Board::regenerate(width, height, obstacles, config)?;
    Ok(render_svg(&board, theme))
}
