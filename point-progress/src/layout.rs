//! Layout engine: point centers and connecting segments for a given width.

use glam::Vec2;
use tracing::debug;

use crate::config::ProgressBarConfig;

/// Pixel dimensions resolved from a config. Fixed for the widget's lifetime.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointDimensions {
    pub point_radius: f32,
    /// Never larger than `point_radius`.
    pub bar_line_thickness: f32,
    pub spacing_offset: f32,
}

impl PointDimensions {
    pub fn from_config(config: &ProgressBarConfig) -> Self {
        let point_radius = config.to_pixels(config.point_size) / 2.0;
        let requested = config.to_pixels(config.bar_line_thickness);
        let bar_line_thickness = if requested > point_radius {
            debug!(
                requested,
                point_radius, "bar line thicker than point radius, clamping"
            );
            point_radius
        } else {
            requested
        };

        Self {
            point_radius,
            bar_line_thickness,
            spacing_offset: config.to_pixels(config.spacing_offset),
        }
    }

    /// Height the bar wants: one point diameter plus the spacing offset,
    /// each rounded down to whole pixels.
    pub fn preferred_height(&self) -> f32 {
        (2.0 * self.point_radius).floor() + self.spacing_offset.floor()
    }
}

/// A connecting line between two adjacent points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub start: Vec2,
    pub end: Vec2,
}

/// Geometry derived from the view size. Recomputed on every resize.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutMetrics {
    pub width: f32,
    pub height: f32,
    pub point_count: u32,
    pub point_radius: f32,
    pub bar_line_thickness: f32,
    /// Distance between two adjacent point slots.
    pub segment_width: f32,
    pub half_segment: f32,
    pub center_y: f32,
    pub first_center: f32,
    pub last_center: f32,
}

impl LayoutMetrics {
    /// A bar needs at least 2 points; smaller counts yield an empty layout.
    pub(crate) fn compute(
        width: f32,
        height: f32,
        point_count: u32,
        dims: &PointDimensions,
    ) -> Self {
        let segment_width = width / point_count.saturating_sub(1).max(1) as f32;
        let point_radius = dims.point_radius;

        let metrics = Self {
            width,
            height,
            point_count,
            point_radius,
            bar_line_thickness: dims.bar_line_thickness,
            segment_width,
            half_segment: segment_width / 2.0,
            center_y: height / 2.0,
            first_center: point_radius,
            last_center: width - point_radius,
        };
        debug!(
            width,
            height,
            segment_width,
            point_radius,
            "computed progress bar layout"
        );
        metrics
    }

    /// Center of point `index` (0-based). The first and last points are
    /// pulled inward by the radius so they stay inside the view.
    pub fn point_center(&self, index: u32) -> Vec2 {
        let x = if index == 0 {
            self.first_center
        } else if index == self.point_count.saturating_sub(1) {
            self.last_center
        } else {
            index as f32 * self.segment_width
        };
        Vec2::new(x, self.center_y)
    }

    pub fn point_centers(&self) -> Vec<Vec2> {
        (0..self.point_count).map(|i| self.point_center(i)).collect()
    }

    /// Segment `index` joins point `index` and point `index + 1`.
    pub fn segment(&self, index: u32) -> Segment {
        let start_x = index as f32 * self.segment_width + self.point_radius;
        let end_x = (index + 1) as f32 * self.segment_width - self.point_radius;
        Segment {
            start: Vec2::new(start_x, self.center_y),
            end: Vec2::new(end_x, self.center_y),
        }
    }

    pub fn segments(&self) -> Vec<Segment> {
        (0..self.point_count.saturating_sub(1))
            .map(|i| self.segment(i))
            .collect()
    }

    /// Stage (1-based) whose point slot is nearest to `x`.
    pub fn stage_at(&self, x: f32) -> Option<u32> {
        if self.point_count == 0
            || !(self.segment_width > 0.0)
            || !(0.0..=self.width).contains(&x)
        {
            return None;
        }
        let index = ((x + self.half_segment) / self.segment_width).floor() as u32;
        Some(index.min(self.point_count.saturating_sub(1)) + 1)
    }
}
