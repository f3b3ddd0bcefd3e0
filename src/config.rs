use crate::ir::{Cell, PixelRect};
use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Which cells of each obstacle edge produce border anchors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CornerPolicy {
    /// Every cell of the inclusive edge run, corner cells included.
    #[default]
    Include,
    /// Drops the last cell of each edge run (the legacy page behaviour).
    Trim,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeneratorConfig {
    pub cell_spacing: f32,
    pub overscan_x: f32,
    pub overscan_y: f32,
    pub obstacle_margin: i32,
    pub corner_policy: CornerPolicy,
    pub seeds: Vec<Cell>,
    pub initial_attempts: usize,
    pub extra_branches: usize,
    pub branch_probability: f64,
    pub sample_attempts: usize,
    pub max_depth: usize,
    pub max_segments: usize,
    pub connect_distance: i32,
    pub stop_at_obstacles: bool,
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            cell_spacing: 10.0,
            overscan_x: 1.0,
            overscan_y: 1.0,
            obstacle_margin: 0,
            corner_policy: CornerPolicy::Include,
            seeds: Vec::new(),
            initial_attempts: 4,
            extra_branches: 50,
            branch_probability: 0.7,
            sample_attempts: 10_000,
            max_depth: 4096,
            max_segments: 1_000_000,
            connect_distance: 20,
            stop_at_obstacles: false,
            seed: None,
        }
    }
}

/// Viewport size in pixels. Colours, background included, live on [`Theme`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    pub generator: GeneratorConfig,
    pub render: RenderConfig,
    pub obstacles: Vec<PixelRect>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::classic(),
            generator: GeneratorConfig::default(),
            render: RenderConfig::default(),
            obstacles: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    trace_color: Option<String>,
    trace_width: Option<f32>,
    connector_color: Option<String>,
    connector_width: Option<f32>,
    pad_radius: Option<f32>,
    pad_stroke: Option<String>,
    pad_stroke_width: Option<f32>,
    pad_fill: Option<String>,
    border_pad_stroke: Option<String>,
    background: Option<String>,
    line_cap: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    generator: Option<GeneratorConfig>,
    render: Option<RenderConfig>,
    obstacles: Option<Vec<PixelRect>>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };

    let contents = std::fs::read_to_string(path)?;
    let is_json5 = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json5"))
        .unwrap_or(false);
    let parsed: ConfigFile = if is_json5 {
        json5::from_str(&contents)?
    } else {
        serde_json::from_str(&contents)?
    };
    Ok(apply_config_file(parsed))
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let parsed: ConfigFile = json5::from_str(contents)?;
    Ok(apply_config_file(parsed))
}

fn apply_config_file(parsed: ConfigFile) -> Config {
    let mut config = Config::default();

    if let Some(theme_name) = parsed.theme.as_deref() {
        match Theme::by_name(theme_name) {
            Some(theme) => config.theme = theme,
            None => log::warn!("unknown theme '{theme_name}', keeping classic"),
        }
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.trace_color {
            config.theme.trace_color = v;
        }
        if let Some(v) = vars.trace_width {
            config.theme.trace_width = v;
        }
        if let Some(v) = vars.connector_color {
            config.theme.connector_color = v;
        }
        if let Some(v) = vars.connector_width {
            config.theme.connector_width = v;
        }
        if let Some(v) = vars.pad_radius {
            config.theme.pad_radius = v;
        }
        if let Some(v) = vars.pad_stroke {
            config.theme.pad_stroke = v;
        }
        if let Some(v) = vars.pad_stroke_width {
            config.theme.pad_stroke_width = v;
        }
        if let Some(v) = vars.pad_fill {
            config.theme.pad_fill = v;
        }
        if let Some(v) = vars.border_pad_stroke {
            config.theme.border_pad_stroke = v;
        }
        if let Some(v) = vars.background {
            config.theme.background = v;
        }
        if let Some(v) = vars.line_cap {
            config.theme.line_cap = v;
        }
    }

    if let Some(generator) = parsed.generator {
        config.generator = generator;
    }
    if let Some(render) = parsed.render {
        config.render = render;
    }
    if let Some(obstacles) = parsed.obstacles {
        config.obstacles = obstacles;
    }
    config
}
