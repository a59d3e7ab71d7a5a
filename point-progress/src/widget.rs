//! The point-to-point progress bar widget.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{check_stage, ProgressBarConfig};
use crate::error::{ConfigError, StageError};
use crate::layout::{LayoutMetrics, PointDimensions, Segment};
use crate::renderer::{draw_progress, Palette, RenderState, Surface};

/// View state that survives the host being torn down and rebuilt.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WidgetState {
    pub current_stage: u32,
    pub first_center: f32,
    pub last_center: f32,
}

/// Horizontal row of stage points joined by line segments. Points up to and
/// including the current stage are drawn in the foreground color.
///
/// Geometry is computed by [`ProgressBar::resize`] and cached; drawing before
/// the first resize paints nothing.
#[derive(Clone, Debug)]
pub struct ProgressBar {
    current_stage: u32,
    maximum_stages: u32,
    dimensions: PointDimensions,
    palette: Palette,
    metrics: Option<LayoutMetrics>,
    /// Restored extreme centers waiting for the first layout.
    pending_centers: Option<(f32, f32)>,
    needs_redraw: bool,
}

impl ProgressBar {
    pub fn new(config: ProgressBarConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let dimensions = PointDimensions::from_config(&config);
        debug!(
            stages = config.maximum_stages,
            stage = config.current_stage,
            point_radius = dimensions.point_radius,
            "progress bar created"
        );

        Ok(Self {
            current_stage: config.current_stage,
            maximum_stages: config.maximum_stages,
            dimensions,
            palette: Palette::new(
                config.background_color,
                config.foreground_color,
                config.line_cap,
            ),
            metrics: None,
            pending_centers: None,
            needs_redraw: true,
        })
    }

    pub fn current_stage(&self) -> u32 {
        self.current_stage
    }

    pub fn maximum_stages(&self) -> u32 {
        self.maximum_stages
    }

    /// Moves to `stage` and requests a redraw. Stages outside
    /// `1..=maximum_stages` are rejected and leave the bar unchanged.
    pub fn set_current_stage(&mut self, stage: u32) -> Result<(), StageError> {
        check_stage(stage, self.maximum_stages)?;
        if stage != self.current_stage {
            debug!(from = self.current_stage, to = stage, "stage changed");
            self.current_stage = stage;
            self.needs_redraw = true;
        }
        Ok(())
    }

    pub fn dimensions(&self) -> &PointDimensions {
        &self.dimensions
    }

    /// Size the bar wants when offered `available_width`.
    pub fn measure(&self, available_width: f32) -> (f32, f32) {
        (available_width, self.dimensions.preferred_height())
    }

    /// Recomputes geometry for a new view size.
    pub fn resize(&mut self, width: f32, height: f32) {
        let width = if width.is_finite() { width.max(0.0) } else { 0.0 };
        let height = if height.is_finite() { height.max(0.0) } else { 0.0 };

        let unchanged = self
            .metrics
            .as_ref()
            .is_some_and(|m| m.width == width && m.height == height);
        if unchanged {
            return;
        }
        let mut metrics =
            LayoutMetrics::compute(width, height, self.maximum_stages, &self.dimensions);
        if let Some((first, last)) = self.pending_centers.take() {
            metrics.first_center = first;
            metrics.last_center = last;
        }
        self.metrics = Some(metrics);
        self.needs_redraw = true;
    }

    pub fn metrics(&self) -> Option<&LayoutMetrics> {
        self.metrics.as_ref()
    }

    pub fn point_centers(&self) -> Vec<Vec2> {
        self.metrics
            .as_ref()
            .map(LayoutMetrics::point_centers)
            .unwrap_or_default()
    }

    pub fn segments(&self) -> Vec<Segment> {
        self.metrics
            .as_ref()
            .map(LayoutMetrics::segments)
            .unwrap_or_default()
    }

    /// Stage whose point is nearest to the horizontal offset `x`.
    pub fn stage_at(&self, x: f32) -> Option<u32> {
        self.metrics.as_ref()?.stage_at(x)
    }

    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    /// Returns whether a redraw was pending and clears the request.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        let Some(metrics) = &self.metrics else {
            return;
        };
        draw_progress(
            surface,
            &RenderState {
                current_stage: self.current_stage,
                metrics,
                palette: &self.palette,
            },
        );
    }

    pub fn serialize_state(&self) -> WidgetState {
        let (first_center, last_center) = self
            .metrics
            .as_ref()
            .map(|m| (m.first_center, m.last_center))
            .unwrap_or_default();
        WidgetState {
            current_stage: self.current_stage,
            first_center,
            last_center,
        }
    }

    /// Restores saved view state. The stage is validated like
    /// [`ProgressBar::set_current_stage`]; cached extreme centers are applied
    /// verbatim, right away when geometry exists and otherwise on the next
    /// resize.
    pub fn restore_state(&mut self, state: WidgetState) -> Result<(), StageError> {
        check_stage(state.current_stage, self.maximum_stages)?;
        self.current_stage = state.current_stage;
        match self.metrics.as_mut() {
            Some(metrics) => {
                metrics.first_center = state.first_center;
                metrics.last_center = state.last_center;
            }
            None => {
                debug!("no layout yet, restored centers applied on next resize");
                self.pending_centers = Some((state.first_center, state.last_center));
            }
        }
        self.needs_redraw = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::DrawRecorder;
    use crate::theme;
    use pretty_assertions::assert_eq;

    fn bar(stages: u32) -> ProgressBar {
        ProgressBar::new(ProgressBarConfig {
            maximum_stages: stages,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn every_stage_in_range_can_be_set() {
        for n in 2..=10 {
            let mut bar = bar(n);
            for stage in 1..=n {
                bar.set_current_stage(stage).unwrap();
                assert_eq!(bar.current_stage(), stage);
            }
        }
    }

    #[test]
    fn stage_past_maximum_is_rejected() {
        for n in 2..=10 {
            let mut bar = bar(n);
            assert_eq!(
                bar.set_current_stage(n + 1),
                Err(StageError::AboveMaximum {
                    stage: n + 1,
                    maximum: n
                })
            );
            assert_eq!(bar.current_stage(), 1);
        }
    }

    #[test]
    fn stage_zero_is_rejected() {
        let mut bar = bar(4);
        bar.set_current_stage(3).unwrap();
        assert_eq!(
            bar.set_current_stage(0),
            Err(StageError::BelowMinimum { stage: 0 })
        );
        assert_eq!(bar.current_stage(), 3);
    }

    #[test]
    fn draw_before_resize_paints_nothing() {
        let bar = bar(4);
        let mut recorder = DrawRecorder::new();
        bar.draw(&mut recorder);
        assert!(recorder.commands().is_empty());
        assert!(bar.point_centers().is_empty());
        assert_eq!(bar.stage_at(10.0), None);
    }

    #[test]
    fn stage_change_requests_redraw() {
        let mut bar = bar(4);
        bar.resize(300.0, 16.0);
        assert!(bar.take_redraw());
        assert!(!bar.needs_redraw());

        bar.set_current_stage(1).unwrap();
        assert!(!bar.needs_redraw(), "same stage should not invalidate");

        bar.set_current_stage(2).unwrap();
        assert!(bar.take_redraw());

        assert!(bar.set_current_stage(9).is_err());
        assert!(!bar.needs_redraw());
    }

    #[test]
    fn resize_to_same_size_keeps_cache() {
        let mut bar = bar(4);
        bar.resize(300.0, 16.0);
        bar.take_redraw();
        bar.resize(300.0, 16.0);
        assert!(!bar.needs_redraw());
        bar.resize(400.0, 16.0);
        assert!(bar.needs_redraw());
        assert_eq!(bar.metrics().unwrap().segment_width, 400.0 / 3.0);
    }

    #[test]
    fn invalid_sizes_collapse_to_zero() {
        let mut bar = bar(4);
        bar.resize(f32::NAN, -3.0);
        let metrics = bar.metrics().unwrap();
        assert_eq!(metrics.width, 0.0);
        assert_eq!(metrics.height, 0.0);
    }

    #[test]
    fn measure_uses_point_diameter_and_spacing() {
        let bar = bar(4);
        assert_eq!(bar.measure(320.0), (320.0, 16.0));
    }

    #[test]
    fn draw_highlights_current_prefix() {
        let mut bar = bar(5);
        bar.resize(400.0, 16.0);
        bar.set_current_stage(3).unwrap();

        let mut recorder = DrawRecorder::new();
        bar.draw(&mut recorder);
        assert_eq!(recorder.circles_in(theme::ACTIVE), 3);
        assert_eq!(recorder.lines_in(theme::ACTIVE), 2);
    }

    #[test]
    fn state_round_trips_through_json() {
        let mut bar = bar(4);
        bar.resize(300.0, 16.0);
        bar.set_current_stage(3).unwrap();
        let saved = bar.serialize_state();
        assert_eq!(
            saved,
            WidgetState {
                current_stage: 3,
                first_center: 6.0,
                last_center: 294.0
            }
        );

        let json = serde_json::to_string(&saved).unwrap();
        let restored: WidgetState = serde_json::from_str(&json).unwrap();

        let mut fresh = self::bar(4);
        fresh.resize(300.0, 16.0);
        fresh.restore_state(restored).unwrap();
        assert_eq!(fresh.current_stage(), 3);
        assert_eq!(fresh.serialize_state(), saved);
    }

    #[test]
    fn restore_applies_centers_verbatim() {
        let mut bar = bar(4);
        bar.resize(300.0, 16.0);
        bar.restore_state(WidgetState {
            current_stage: 2,
            first_center: 10.0,
            last_center: 290.0,
        })
        .unwrap();

        let xs: Vec<f32> = bar.point_centers().iter().map(|c| c.x).collect();
        assert_eq!(xs, vec![10.0, 100.0, 200.0, 290.0]);
    }

    #[test]
    fn centers_restored_before_layout_survive_first_resize() {
        let mut bar = bar(4);
        bar.restore_state(WidgetState {
            current_stage: 2,
            first_center: 10.0,
            last_center: 290.0,
        })
        .unwrap();
        bar.resize(300.0, 16.0);

        let state = bar.serialize_state();
        assert_eq!((state.first_center, state.last_center), (10.0, 290.0));
        let xs: Vec<f32> = bar.point_centers().iter().map(|c| c.x).collect();
        assert_eq!(xs, vec![10.0, 100.0, 200.0, 290.0]);

        bar.resize(400.0, 16.0);
        let state = bar.serialize_state();
        assert_eq!((state.first_center, state.last_center), (6.0, 394.0));
    }

    #[test]
    fn restore_rejects_out_of_range_stage() {
        let mut bar = bar(4);
        let err = bar
            .restore_state(WidgetState {
                current_stage: 7,
                first_center: 0.0,
                last_center: 0.0,
            })
            .unwrap_err();
        assert_eq!(err, StageError::AboveMaximum { stage: 7, maximum: 4 });
        assert_eq!(bar.current_stage(), 1);
    }
}
