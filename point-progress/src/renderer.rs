//! Drawing surfaces and the progress bar draw stack.

use std::path::Path;

use glam::Vec2;
use tiny_skia::{FillRule, PathBuilder, Pixmap, Stroke, Transform};

use crate::config::LineCapStyle;
use crate::error::RenderError;
use crate::layout::LayoutMetrics;
use crate::theme::Color;

/// How a mark is drawn. Circles are filled; lines are stroked with `width`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Paint {
    pub color: Color,
    pub width: f32,
    pub cap: LineCapStyle,
}

/// Background and foreground colors plus the segment cap style.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub foreground: Color,
    pub line_cap: LineCapStyle,
}

impl Palette {
    pub fn new(background: Color, foreground: Color, line_cap: LineCapStyle) -> Self {
        Self {
            background,
            foreground,
            line_cap,
        }
    }

    /// Background and foreground paints for a given line thickness.
    pub fn paints(&self, line_width: f32) -> (Paint, Paint) {
        let paint = |color| Paint {
            color,
            width: line_width,
            cap: self.line_cap,
        };
        (paint(self.background), paint(self.foreground))
    }
}

/// A 2D target the widget paints into.
pub trait Surface {
    fn draw_line(&mut self, from: Vec2, to: Vec2, paint: &Paint);
    fn draw_circle(&mut self, center: Vec2, radius: f32, paint: &Paint);
}

/// Everything a draw pass reads.
#[derive(Clone, Copy, Debug)]
pub struct RenderState<'a> {
    pub current_stage: u32,
    pub metrics: &'a LayoutMetrics,
    pub palette: &'a Palette,
}

/// Paints the whole bar back to front: background segments, background
/// points, then the completed points and segments in the foreground color.
pub fn draw_progress<S: Surface + ?Sized>(surface: &mut S, state: &RenderState<'_>) {
    let metrics = state.metrics;
    let (background, foreground) = state.palette.paints(metrics.bar_line_thickness);

    draw_segments(surface, metrics, &background, metrics.point_count);
    draw_points(surface, metrics, &background, metrics.point_count);
    draw_points(surface, metrics, &foreground, state.current_stage);
    draw_segments(surface, metrics, &foreground, state.current_stage);
}

/// Draws the segments joining the first `points` points.
fn draw_segments<S: Surface + ?Sized>(
    surface: &mut S,
    metrics: &LayoutMetrics,
    paint: &Paint,
    points: u32,
) {
    let points = points.min(metrics.point_count);
    for i in 0..points.saturating_sub(1) {
        let segment = metrics.segment(i);
        surface.draw_line(segment.start, segment.end, paint);
    }
}

fn draw_points<S: Surface + ?Sized>(
    surface: &mut S,
    metrics: &LayoutMetrics,
    paint: &Paint,
    points: u32,
) {
    for i in 0..points.min(metrics.point_count) {
        surface.draw_circle(metrics.point_center(i), metrics.point_radius, paint);
    }
}

/// Surface backed by a tiny-skia pixmap.
pub struct SkiaSurface {
    pub pixmap: Pixmap,
    origin: Vec2,
}

impl SkiaSurface {
    pub fn new(width: u32, height: u32) -> Result<Self, RenderError> {
        let pixmap =
            Pixmap::new(width, height).ok_or(RenderError::InvalidSize { width, height })?;
        Ok(Self {
            pixmap,
            origin: Vec2::ZERO,
        })
    }

    /// Offsets every later `Surface` call, so a widget can paint in its own
    /// coordinates inside a larger frame.
    pub fn set_origin(&mut self, origin: Vec2) {
        self.origin = origin;
    }

    pub fn clear(&mut self, color: Color) {
        self.pixmap.fill(color.to_skia());
    }

    /// Unpremultiplied color of a pixel in frame coordinates.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let px = self.pixmap.pixel(x, y)?.demultiply();
        Some(Color::rgba(px.red(), px.green(), px.blue(), px.alpha()))
    }

    pub fn fill_rounded_rect(&mut self, x: f32, y: f32, w: f32, h: f32, radius: f32, color: Color) {
        let paint = skia_paint(color);
        if let Some(path) = rounded_rect_path(x, y, w, h, radius) {
            self.pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn stroke_rounded_rect(
        &mut self,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        radius: f32,
        color: Color,
        width: f32,
    ) {
        let paint = skia_paint(color);
        let mut stroke = Stroke::default();
        stroke.width = width;

        if let Some(path) = rounded_rect_path(x, y, w, h, radius) {
            self.pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        }
    }

    /// Filled capsule, for buttons.
    pub fn fill_pill(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        self.fill_rounded_rect(x, y, w, h, h / 2.0, color);
    }

    /// Open polyline in frame coordinates.
    pub fn draw_polyline(&mut self, points: &[Vec2], color: Color, width: f32) {
        if points.len() < 2 {
            return;
        }
        let paint = skia_paint(color);
        let mut stroke = Stroke::default();
        stroke.width = width;
        stroke.line_cap = tiny_skia::LineCap::Round;
        stroke.line_join = tiny_skia::LineJoin::Round;

        let mut pb = PathBuilder::new();
        pb.move_to(points[0].x, points[0].y);
        for p in &points[1..] {
            pb.line_to(p.x, p.y);
        }
        if let Some(path) = pb.finish() {
            self.pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        }
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), RenderError> {
        let path = path.as_ref();
        self.pixmap.save_png(path).map_err(|e| RenderError::Png {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    fn transform(&self) -> Transform {
        Transform::from_translate(self.origin.x, self.origin.y)
    }
}

impl Surface for SkiaSurface {
    fn draw_line(&mut self, from: Vec2, to: Vec2, paint: &Paint) {
        let mut stroke = Stroke::default();
        stroke.width = paint.width;
        stroke.line_cap = paint.cap.to_skia();

        let mut pb = PathBuilder::new();
        pb.move_to(from.x, from.y);
        pb.line_to(to.x, to.y);
        if let Some(path) = pb.finish() {
            let transform = self.transform();
            self.pixmap
                .stroke_path(&path, &skia_paint(paint.color), &stroke, transform, None);
        }
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, paint: &Paint) {
        if let Some(path) = PathBuilder::from_circle(center.x, center.y, radius) {
            let transform = self.transform();
            self.pixmap.fill_path(
                &path,
                &skia_paint(paint.color),
                FillRule::Winding,
                transform,
                None,
            );
        }
    }
}

fn skia_paint(color: Color) -> tiny_skia::Paint<'static> {
    let mut paint = tiny_skia::Paint::default();
    paint.set_color(color.to_skia());
    paint.anti_alias = true;
    paint
}

fn rounded_rect_path(x: f32, y: f32, w: f32, h: f32, r: f32) -> Option<tiny_skia::Path> {
    let r = r.min(w / 2.0).min(h / 2.0);
    let mut pb = PathBuilder::new();
    pb.move_to(x + r, y);
    pb.line_to(x + w - r, y);
    pb.quad_to(x + w, y, x + w, y + r);
    pb.line_to(x + w, y + h - r);
    pb.quad_to(x + w, y + h, x + w - r, y + h);
    pb.line_to(x + r, y + h);
    pb.quad_to(x, y + h, x, y + h - r);
    pb.line_to(x, y + r);
    pb.quad_to(x, y, x + r, y);
    pb.close();
    pb.finish()
}

/// A single recorded draw call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Line { from: Vec2, to: Vec2, paint: Paint },
    Circle { center: Vec2, radius: f32, paint: Paint },
}

impl DrawCommand {
    pub fn color(&self) -> Color {
        match self {
            Self::Line { paint, .. } | Self::Circle { paint, .. } => paint.color,
        }
    }
}

/// Surface that keeps a display list instead of pixels.
#[derive(Debug, Default)]
pub struct DrawRecorder {
    commands: Vec<DrawCommand>,
}

impl DrawRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn circles_in(&self, color: Color) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }) && c.color() == color)
            .count()
    }

    pub fn lines_in(&self, color: Color) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }) && c.color() == color)
            .count()
    }
}

impl Surface for DrawRecorder {
    fn draw_line(&mut self, from: Vec2, to: Vec2, paint: &Paint) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            paint: *paint,
        });
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, paint: &Paint) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            paint: *paint,
        });
    }
}
