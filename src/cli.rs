use crate::board::Board;
use crate::board_dump::write_board_dump;
use crate::config::{Config, load_config};
use crate::ir::PixelRect;
use crate::render::{render_svg, write_output_png, write_output_svg};
use anyhow::Result;
use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pcbtrace", version, about = "Procedural circuit-board trace backgrounds")]
pub struct Args {
    /// Output file (svg/png). Defaults to stdout for SVG if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON/JSON5 file (theme, themeVariables, generator, obstacles)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Viewport width in pixels
    #[arg(short = 'W', long = "width")]
    pub width: Option<f32>,

    /// Viewport height in pixels
    #[arg(short = 'H', long = "height")]
    pub height: Option<f32>,

    /// Pixels per grid cell
    #[arg(short = 's', long = "spacing")]
    pub spacing: Option<f32>,

    /// Obstacle dilation margin in cells
    #[arg(long = "margin")]
    pub margin: Option<i32>,

    /// Random seed; a fresh one is drawn when omitted
    #[arg(long = "seed")]
    pub seed: Option<u64>,

    /// Obstacle rectangle in pixels as LEFT,TOP,RIGHT,BOTTOM (repeatable)
    #[arg(long = "obstacle")]
    pub obstacles: Vec<PixelRect>,

    /// Theme preset (classic, night)
    #[arg(short = 't', long = "theme")]
    pub theme: Option<String>,

    /// Write the generated board as JSON for inspection
    #[arg(long = "dumpBoard")]
    pub dump_board: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    Png,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = resolve_config(&args)?;
    let board = Board::regenerate(
        config.render.width,
        config.render.height,
        &config.obstacles,
        &config.generator,
    )?;
    log::info!("seed {} ({} draw commands)", board.seed, board.commands.len());

    if let Some(path) = args.dump_board.as_deref() {
        write_board_dump(path, &board)?;
    }

    let svg = render_svg(&board, &config.theme);
    match args.output_format {
        OutputFormat::Svg => {
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Png => {
            let output = args
                .output
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("Output path required for png output"))?;
            write_output_png(&svg, output, &config.render)?;
        }
    }
    Ok(())
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();
}

/// Config file first, command-line flags on top.
fn resolve_config(args: &Args) -> Result<Config> {
    let mut config = load_config(args.config.as_deref())?;
    apply_overrides(&mut config, args)?;
    Ok(config)
}

fn apply_overrides(config: &mut Config, args: &Args) -> Result<()> {
    if let Some(width) = args.width {
        config.render.width = width;
    }
    if let Some(height) = args.height {
        config.render.height = height;
    }
    if let Some(spacing) = args.spacing {
        config.generator.cell_spacing = spacing;
    }
    if let Some(margin) = args.margin {
        config.generator.obstacle_margin = margin;
    }
    if let Some(seed) = args.seed {
        config.generator.seed = Some(seed);
    }
    if let Some(name) = args.theme.as_deref() {
        config.theme = crate::theme::Theme::by_name(name)
            .ok_or_else(|| anyhow::anyhow!("Unknown theme '{name}'"))?;
    }
    config.obstacles.extend(args.obstacles.iter().copied());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let args = Args::parse_from([
            "pcbtrace",
            "-W",
            "640",
            "--spacing",
            "8",
            "--seed",
            "12",
            "--obstacle",
            "10,10,90,40",
            "--obstacle",
            "100,100,120,130",
            "-t",
            "night",
            "-vv",
        ]);
        let mut config = Config::default();
        apply_overrides(&mut config, &args).unwrap();
        assert_eq!(config.render.width, 640.0);
        assert_eq!(config.render.height, 800.0);
        assert_eq!(config.generator.cell_spacing, 8.0);
        assert_eq!(config.generator.seed, Some(12));
        assert_eq!(config.obstacles.len(), 2);
        assert_eq!(config.obstacles[1], PixelRect::new(100.0, 100.0, 120.0, 130.0));
        assert_eq!(config.theme.background, "#0B1A12");
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn rejects_malformed_obstacle() {
        assert!(Args::try_parse_from(["pcbtrace", "--obstacle", "1,2,3"]).is_err());
    }

    #[test]
    fn unknown_theme_is_an_error() {
        let args = Args::parse_from(["pcbtrace", "--theme", "sepia"]);
        let mut config = Config::default();
        assert!(apply_overrides(&mut config, &args).is_err());
    }
}
