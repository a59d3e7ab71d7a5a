//! Host screen frame: progress bar on top, Previous/Next buttons underneath.

use glam::Vec2;
use point_progress::{theme, Control, HostScreen, SkiaSurface, StageError};

use crate::button::{self, ButtonRect, BUTTON_HEIGHT, BUTTON_WIDTH};

const MARGIN: f32 = 24.0;
const BUTTON_GAP: f32 = 24.0;

/// Where each element of the frame sits, for a given frame size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameLayout {
    pub bar_origin: Vec2,
    pub bar_size: Vec2,
    pub previous: ButtonRect,
    pub next: ButtonRect,
}

impl FrameLayout {
    pub fn new(screen: &HostScreen, frame_width: u32) -> Self {
        let available = (frame_width as f32 - MARGIN * 2.0).max(0.0);
        let (bar_w, bar_h) = screen.bar().measure(available);
        let button_y = MARGIN + bar_h + BUTTON_GAP;

        Self {
            bar_origin: Vec2::new(MARGIN, MARGIN),
            bar_size: Vec2::new(bar_w, bar_h),
            previous: ButtonRect {
                x: MARGIN,
                y: button_y,
                w: BUTTON_WIDTH,
                h: BUTTON_HEIGHT,
            },
            next: ButtonRect {
                x: MARGIN + bar_w - BUTTON_WIDTH,
                y: button_y,
                w: BUTTON_WIDTH,
                h: BUTTON_HEIGHT,
            },
        }
    }

    /// Frame height that fits the bar and the buttons.
    pub fn frame_height(&self) -> u32 {
        (self.previous.y + self.previous.h + MARGIN).ceil() as u32
    }

    fn button(&self, control: Control) -> ButtonRect {
        match control {
            Control::Previous => self.previous,
            Control::Next => self.next,
        }
    }
}

/// Outcome of a click on the frame.
#[derive(Debug, PartialEq)]
pub enum Click {
    Stage(Result<u32, StageError>),
    Missed,
}

pub fn draw(screen: &HostScreen, layout: &FrameLayout, surface: &mut SkiaSurface) {
    surface.clear(theme::BG);

    surface.set_origin(layout.bar_origin);
    screen.bar().draw(surface);
    surface.set_origin(Vec2::ZERO);

    for control in [Control::Previous, Control::Next] {
        if screen.is_visible(control) {
            button::draw_button(surface, control, layout.button(control));
        }
    }
}

/// Routes a click to a visible button or to the nearest bar point.
pub fn click(screen: &mut HostScreen, layout: &FrameLayout, at: Vec2) -> Click {
    for control in [Control::Previous, Control::Next] {
        if layout.button(control).contains(at) {
            return match screen.press(control) {
                Some(result) => Click::Stage(result),
                None => Click::Missed,
            };
        }
    }

    let local = at - layout.bar_origin;
    if local.y < 0.0 || local.y > layout.bar_size.y {
        return Click::Missed;
    }
    match screen.bar().stage_at(local.x) {
        Some(stage) => Click::Stage(screen.go_to(stage)),
        None => Click::Missed,
    }
}
