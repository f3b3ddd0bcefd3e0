use pcb_traces::{GeneratorConfig, PixelRect, Theme, render_board_svg};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TraceRenderOptions {
    theme: Option<String>,
    cell_spacing: Option<f32>,
    obstacle_margin: Option<i32>,
    overscan_y: Option<f32>,
    seed: Option<u64>,
    #[serde(default)]
    obstacles: Vec<PixelRect>,
}

fn build_generator_config(options: &TraceRenderOptions) -> GeneratorConfig {
    let mut config = GeneratorConfig::default();
    if let Some(spacing) = options.cell_spacing {
        config.cell_spacing = spacing;
    }
    if let Some(margin) = options.obstacle_margin {
        config.obstacle_margin = margin;
    }
    if let Some(overscan) = options.overscan_y {
        config.overscan_y = overscan;
    }
    // Browsers have no OS entropy without extra glue; hosts pass a seed, 0 otherwise.
    config.seed = Some(options.seed.unwrap_or(0));
    config
}

/// Regenerates the whole board for the current viewport. Call again on resize.
#[wasm_bindgen]
pub fn render_pcb_svg(width: f32, height: f32, options_json: Option<String>) -> Result<String, JsValue> {
    let options = if let Some(raw_options) = options_json {
        serde_json::from_str::<TraceRenderOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string()))?
    } else {
        TraceRenderOptions::default()
    };

    let theme = options
        .theme
        .as_deref()
        .and_then(Theme::by_name)
        .unwrap_or_else(Theme::classic);
    let config = build_generator_config(&options);
    render_board_svg(width, height, &options.obstacles, &config, &theme)
        .map_err(|error| JsValue::from_str(&error.to_string()))
}
