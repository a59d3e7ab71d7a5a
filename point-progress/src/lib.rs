//! Point-to-point progress bar.
//!
//! A horizontal row of stage points (1 of N) joined by line segments, with the
//! completed prefix drawn in a foreground color. Geometry lives in [`layout`],
//! painting in [`renderer`], and Previous/Next stepping in [`navigation`].

pub mod config;
pub mod error;
pub mod layout;
pub mod navigation;
pub mod renderer;
pub mod theme;
pub mod widget;

pub use config::{LineCapStyle, ProgressBarConfig};
pub use error::{ConfigError, RenderError, StageError};
pub use layout::{LayoutMetrics, PointDimensions, Segment};
pub use navigation::{Control, HostScreen};
pub use renderer::{DrawCommand, DrawRecorder, Paint, Palette, SkiaSurface, Surface};
pub use theme::Color;
pub use widget::{ProgressBar, WidgetState};
