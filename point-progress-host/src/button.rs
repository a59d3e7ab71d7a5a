//! Navigation button: rounded pill with a chevron pointing the step direction.

use glam::Vec2;
use point_progress::{theme, Control, SkiaSurface};

pub const BUTTON_WIDTH: f32 = 96.0;
pub const BUTTON_HEIGHT: f32 = 36.0;

/// Screen-space rectangle of a button.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ButtonRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl ButtonRect {
    pub fn contains(&self, point: Vec2) -> bool {
        (self.x..=self.x + self.w).contains(&point.x)
            && (self.y..=self.y + self.h).contains(&point.y)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

pub fn draw_button(surface: &mut SkiaSurface, control: Control, rect: ButtonRect) {
    surface.fill_pill(rect.x, rect.y, rect.w, rect.h, theme::SURFACE);
    let radius = rect.h / 2.0;
    surface.stroke_rounded_rect(rect.x, rect.y, rect.w, rect.h, radius, theme::CARD_BORDER, 1.0);

    let c = rect.center();
    let arm = rect.h / 5.0;
    let dir = match control {
        Control::Previous => -1.0,
        Control::Next => 1.0,
    };
    let tip = Vec2::new(c.x + dir * arm / 2.0, c.y);
    let chevron = [
        Vec2::new(tip.x - dir * arm, c.y - arm),
        tip,
        Vec2::new(tip.x - dir * arm, c.y + arm),
    ];
    surface.draw_polyline(&chevron, theme::TEXT_PRIMARY, 2.0);
}
