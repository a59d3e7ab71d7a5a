//! Widget configuration, loaded from JSON or built in code.
//!
//! Dimensions are given in density-independent units and scaled by
//! `density` when the widget is built.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, StageError};
use crate::theme::{self, Color};

pub const DEFAULT_MAXIMUM_STAGES: u32 = 4;
pub const DEFAULT_POINT_SIZE: f32 = 12.0;
pub const DEFAULT_BAR_LINE_THICKNESS: f32 = 4.0;
pub const DEFAULT_SPACING_OFFSET: f32 = 4.0;

/// How the ends of connecting segments are drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCapStyle {
    #[default]
    Butt,
    Round,
    Square,
}

impl LineCapStyle {
    pub fn to_skia(self) -> tiny_skia::LineCap {
        match self {
            Self::Butt => tiny_skia::LineCap::Butt,
            Self::Round => tiny_skia::LineCap::Round,
            Self::Square => tiny_skia::LineCap::Square,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressBarConfig {
    pub background_color: Color,
    pub foreground_color: Color,
    pub current_stage: u32,
    pub maximum_stages: u32,
    pub point_size: f32,
    pub bar_line_thickness: f32,
    pub spacing_offset: f32,
    /// Pixels per density-independent unit.
    pub density: f32,
    pub line_cap: LineCapStyle,
}

impl Default for ProgressBarConfig {
    fn default() -> Self {
        Self {
            background_color: theme::INACTIVE,
            foreground_color: theme::ACTIVE,
            current_stage: 1,
            maximum_stages: DEFAULT_MAXIMUM_STAGES,
            point_size: DEFAULT_POINT_SIZE,
            bar_line_thickness: DEFAULT_BAR_LINE_THICKNESS,
            spacing_offset: DEFAULT_SPACING_OFFSET,
            density: 1.0,
            line_cap: LineCapStyle::default(),
        }
    }
}

impl ProgressBarConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.maximum_stages < 2 {
            return Err(ConfigError::TooFewStages(self.maximum_stages));
        }
        check_stage(self.current_stage, self.maximum_stages)?;

        positive("point_size", self.point_size)?;
        positive("density", self.density)?;
        non_negative("bar_line_thickness", self.bar_line_thickness)?;
        non_negative("spacing_offset", self.spacing_offset)?;
        Ok(())
    }

    /// Converts density-independent units to pixels.
    pub fn to_pixels(&self, dp: f32) -> f32 {
        dp * self.density
    }
}

/// Checks `1 <= stage <= maximum`.
pub(crate) fn check_stage(stage: u32, maximum: u32) -> Result<(), StageError> {
    if stage > maximum {
        return Err(StageError::AboveMaximum { stage, maximum });
    }
    if stage < 1 {
        return Err(StageError::BelowMinimum { stage });
    }
    Ok(())
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidDimension {
            field,
            requirement: "greater than 0",
            value,
        })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidDimension {
            field,
            requirement: "of at least 0",
            value,
        })
    }
}
