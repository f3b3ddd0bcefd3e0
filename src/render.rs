use crate::board::Board;
use crate::config::RenderConfig;
use crate::ir::{Cell, DrawCommand, LineStyle, PadStyle};
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

/// Drawing surface consumed by the generator. Coordinates are grid cells; the
/// sink scales them to its own device space. Fire-and-forget: nothing is read back.
pub trait RenderSink {
    fn draw_line(&mut self, from: Cell, to: Cell, style: LineStyle);
    fn draw_pad(&mut self, at: Cell, style: PadStyle);

    fn replay(&mut self, commands: &[DrawCommand]) {
        for command in commands {
            match *command {
                DrawCommand::Line { from, to, style } => self.draw_line(from, to, style),
                DrawCommand::Pad { at, style } => self.draw_pad(at, style),
            }
        }
    }
}

impl RenderSink for Vec<DrawCommand> {
    fn draw_line(&mut self, from: Cell, to: Cell, style: LineStyle) {
        self.push(DrawCommand::Line { from, to, style });
    }

    fn draw_pad(&mut self, at: Cell, style: PadStyle) {
        self.push(DrawCommand::Pad { at, style });
    }
}

/// Accumulates SVG elements; cell `(x, y)` maps to the pixel centre
/// `((x + 0.5) * spacing, (y + 0.5) * spacing)`.
pub struct SvgSink<'a> {
    theme: &'a Theme,
    spacing: f32,
    body: String,
    seq: usize,
}

impl<'a> SvgSink<'a> {
    pub fn new(theme: &'a Theme, spacing: f32) -> Self {
        Self {
            theme,
            spacing,
            body: String::new(),
            seq: 0,
        }
    }

    fn center(&self, cell: Cell) -> (f32, f32) {
        (
            (cell.x as f32 + 0.5) * self.spacing,
            (cell.y as f32 + 0.5) * self.spacing,
        )
    }

    pub fn into_body(self) -> String {
        self.body
    }
}

impl RenderSink for SvgSink<'_> {
    fn draw_line(&mut self, from: Cell, to: Cell, style: LineStyle) {
        let (x1, y1) = self.center(from);
        let (x2, y2) = self.center(to);
        let stroke = self.theme.line_stroke(style);
        self.body.push_str(&format!(
            "<line class=\"{}\" data-seq=\"{}\" x1=\"{x1:.2}\" y1=\"{y1:.2}\" x2=\"{x2:.2}\" y2=\"{y2:.2}\" stroke=\"{}\" stroke-width=\"{}\" stroke-linecap=\"{}\"/>",
            line_class(style),
            self.seq,
            stroke.color,
            stroke.width,
            self.theme.line_cap
        ));
        self.seq += 1;
    }

    fn draw_pad(&mut self, at: Cell, style: PadStyle) {
        let (cx, cy) = self.center(at);
        let stroke = self.theme.pad_stroke(style);
        self.body.push_str(&format!(
            "<circle class=\"{}\" data-seq=\"{}\" cx=\"{cx:.2}\" cy=\"{cy:.2}\" r=\"{}\" stroke=\"{}\" stroke-width=\"{}\" fill=\"{}\"/>",
            pad_class(style),
            self.seq,
            self.theme.pad_radius,
            stroke.color,
            stroke.width,
            self.theme.pad_fill
        ));
        self.seq += 1;
    }
}

fn line_class(style: LineStyle) -> &'static str {
    match style {
        LineStyle::Trace => "pcb-trace",
        LineStyle::Connector => "pcb-connector",
    }
}

fn pad_class(style: PadStyle) -> &'static str {
    match style {
        PadStyle::DeadEnd => "pcb-pad",
        PadStyle::Border => "pcb-border-pad",
    }
}

pub fn render_svg(board: &Board, theme: &Theme) -> String {
    let width = board.width as f32 * board.spacing;
    let height = board.height as f32 * board.spacing;

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));
    if theme.background != "transparent" && theme.background != "none" {
        svg.push_str(&format!(
            "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
            theme.background
        ));
    }

    let mut sink = SvgSink::new(theme, board.spacing);
    sink.replay(&board.commands);
    svg.push_str("<g id=\"pcb\">");
    svg.push_str(&sink.into_body());
    svg.push_str("</g>");

    svg.push_str("</svg>");
    svg
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.default_size = usvg::Size::from_wh(render_cfg.width, render_cfg.height)
        .or_else(|| usvg::Size::from_wh(800.0, 600.0))
        .ok_or_else(|| anyhow::anyhow!("Invalid default render size"))?;

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

#[cfg(not(feature = "png"))]
pub fn write_output_png(_svg: &str, _output: &Path, _render_cfg: &RenderConfig) -> Result<()> {
    Err(anyhow::anyhow!("PNG output requires the 'png' feature"))
}
