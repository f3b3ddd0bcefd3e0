use crate::ir::{LineStyle, PadStyle};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub trace_color: String,
    pub trace_width: f32,
    pub connector_color: String,
    pub connector_width: f32,
    pub pad_radius: f32,
    pub pad_stroke: String,
    pub pad_stroke_width: f32,
    pub pad_fill: String,
    pub border_pad_stroke: String,
    pub background: String,
    pub line_cap: String,
}

/// Resolved stroke for one primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke<'a> {
    pub color: &'a str,
    pub width: f32,
}

impl Theme {
    pub fn classic() -> Self {
        Self {
            trace_color: "#4a4".to_string(),
            trace_width: 5.0,
            connector_color: "#4a4".to_string(),
            connector_width: 5.0,
            pad_radius: 3.0,
            pad_stroke: "#aaa".to_string(),
            pad_stroke_width: 2.0,
            pad_fill: "none".to_string(),
            border_pad_stroke: "#aaa".to_string(),
            background: "transparent".to_string(),
            line_cap: "round".to_string(),
        }
    }

    pub fn night() -> Self {
        Self {
            trace_color: "#1F6F4A".to_string(),
            trace_width: 4.0,
            connector_color: "#2E8B57".to_string(),
            connector_width: 3.0,
            pad_radius: 3.0,
            pad_stroke: "#C9A227".to_string(),
            pad_stroke_width: 1.5,
            pad_fill: "#0B1A12".to_string(),
            border_pad_stroke: "#E0C060".to_string(),
            background: "#0B1A12".to_string(),
            line_cap: "round".to_string(),
        }
    }

    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "classic" | "default" => Some(Self::classic()),
            "night" | "dark" => Some(Self::night()),
            _ => None,
        }
    }

    pub fn line_stroke(&self, style: LineStyle) -> Stroke<'_> {
        match style {
            LineStyle::Trace => Stroke {
                color: &self.trace_color,
                width: self.trace_width,
            },
            LineStyle::Connector => Stroke {
                color: &self.connector_color,
                width: self.connector_width,
            },
        }
    }

    pub fn pad_stroke(&self, style: PadStyle) -> Stroke<'_> {
        match style {
            PadStyle::DeadEnd => Stroke {
                color: &self.pad_stroke,
                width: self.pad_stroke_width,
            },
            PadStyle::Border => Stroke {
                color: &self.border_pad_stroke,
                width: self.pad_stroke_width,
            },
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}
