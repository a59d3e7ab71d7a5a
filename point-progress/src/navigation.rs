//! Previous/Next stepping over a progress bar.

use tracing::debug;

use crate::error::StageError;
use crate::widget::{ProgressBar, WidgetState};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Previous,
    Next,
}

/// Owns a progress bar and the visibility of its two navigation controls.
///
/// Previous is shown only above stage 1 and Next only below the last stage.
/// Out-of-range moves are not clamped here; the bar rejects them.
#[derive(Clone, Debug)]
pub struct HostScreen {
    bar: ProgressBar,
    previous_visible: bool,
    next_visible: bool,
}

impl HostScreen {
    pub fn new(bar: ProgressBar) -> Self {
        let mut screen = Self {
            bar,
            previous_visible: true,
            next_visible: true,
        };
        screen.sync_visibility();
        screen
    }

    pub fn bar(&self) -> &ProgressBar {
        &self.bar
    }

    pub fn stage(&self) -> u32 {
        self.bar.current_stage()
    }

    pub fn is_visible(&self, control: Control) -> bool {
        match control {
            Control::Previous => self.previous_visible,
            Control::Next => self.next_visible,
        }
    }

    /// Advances one stage and returns the new stage.
    pub fn next(&mut self) -> Result<u32, StageError> {
        self.go_to(self.stage().saturating_add(1))
    }

    /// Steps back one stage and returns the new stage.
    pub fn previous(&mut self) -> Result<u32, StageError> {
        // Stage 0 is passed through so the bar reports BelowMinimum.
        self.go_to(self.stage().saturating_sub(1))
    }

    pub fn go_to(&mut self, stage: u32) -> Result<u32, StageError> {
        self.bar.set_current_stage(stage)?;
        self.sync_visibility();
        Ok(stage)
    }

    /// Presses a control. Hidden controls do nothing and return `None`.
    pub fn press(&mut self, control: Control) -> Option<Result<u32, StageError>> {
        if !self.is_visible(control) {
            debug!(?control, "ignoring press on hidden control");
            return None;
        }
        Some(match control {
            Control::Previous => self.previous(),
            Control::Next => self.next(),
        })
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.bar.resize(width, height);
    }

    pub fn take_redraw(&mut self) -> bool {
        self.bar.take_redraw()
    }

    pub fn restore_state(&mut self, state: WidgetState) -> Result<(), StageError> {
        self.bar.restore_state(state)?;
        self.sync_visibility();
        Ok(())
    }

    fn sync_visibility(&mut self) {
        let stage = self.bar.current_stage();
        self.previous_visible = stage > 1;
        self.next_visible = stage < self.bar.maximum_stages();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProgressBarConfig;
    use pretty_assertions::assert_eq;

    fn screen(stages: u32) -> HostScreen {
        HostScreen::new(
            ProgressBar::new(ProgressBarConfig {
                maximum_stages: stages,
                ..Default::default()
            })
            .unwrap(),
        )
    }

    fn visibility(screen: &HostScreen) -> (bool, bool) {
        (
            screen.is_visible(Control::Previous),
            screen.is_visible(Control::Next),
        )
    }

    #[test]
    fn boundaries_hide_controls() {
        let mut screen = screen(4);
        assert_eq!(visibility(&screen), (false, true));

        assert_eq!(screen.next(), Ok(2));
        assert_eq!(visibility(&screen), (true, true));
        assert_eq!(screen.next(), Ok(3));
        assert_eq!(visibility(&screen), (true, true));
        assert_eq!(screen.next(), Ok(4));
        assert_eq!(visibility(&screen), (true, false));

        assert_eq!(screen.previous(), Ok(3));
        assert_eq!(visibility(&screen), (true, true));
    }

    #[test]
    fn two_stage_bar_toggles_both_controls() {
        let mut screen = screen(2);
        assert_eq!(visibility(&screen), (false, true));
        screen.next().unwrap();
        assert_eq!(visibility(&screen), (true, false));
        screen.previous().unwrap();
        assert_eq!(visibility(&screen), (false, true));
    }

    #[test]
    fn stepping_past_ends_is_rejected_by_the_bar() {
        let mut screen = screen(3);
        assert_eq!(screen.previous(), Err(StageError::BelowMinimum { stage: 0 }));
        assert_eq!(screen.stage(), 1);

        screen.go_to(3).unwrap();
        assert_eq!(
            screen.next(),
            Err(StageError::AboveMaximum { stage: 4, maximum: 3 })
        );
        assert_eq!(screen.stage(), 3);
    }

    #[test]
    fn hidden_controls_ignore_presses() {
        let mut screen = screen(4);
        assert_eq!(screen.press(Control::Previous), None);
        assert_eq!(screen.press(Control::Next), Some(Ok(2)));
        assert_eq!(screen.press(Control::Previous), Some(Ok(1)));
    }

    #[test]
    fn restore_updates_visibility() {
        let mut screen = screen(4);
        screen
            .restore_state(WidgetState {
                current_stage: 4,
                first_center: 0.0,
                last_center: 0.0,
            })
            .unwrap();
        assert_eq!(visibility(&screen), (true, false));
    }
}
