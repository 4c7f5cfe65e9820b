use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotkeyAction {
    ShowAndFocus,
    FocusExisting,
}

/// Derived from visibility and result count; never set directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaletteView {
    Closed,
    OpenEmpty,
    OpenWithResults,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingClose {
    pub due_at: Duration,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverlayState {
    visible: bool,
    pending_close: Option<PendingClose>,
}

impl OverlayState {
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn view(&self, result_count: usize) -> PaletteView {
        match (self.visible, result_count) {
            (false, _) => PaletteView::Closed,
            (true, 0) => PaletteView::OpenEmpty,
            (true, _) => PaletteView::OpenWithResults,
        }
    }

    /// Focus opens the overlay and supersedes any close scheduled by an earlier blur.
    pub fn on_focus(&mut self) {
        self.pending_close = None;
        self.visible = true;
    }

    /// Keystrokes only arrive from a focused input, so an edit counts as focus.
    pub fn on_query_edit(&mut self) {
        self.on_focus();
    }

    pub fn on_hotkey(&mut self, has_focus: bool) -> HotkeyAction {
        let was_visible = self.visible;
        self.on_focus();
        if was_visible && has_focus {
            HotkeyAction::FocusExisting
        } else {
            HotkeyAction::ShowAndFocus
        }
    }

    pub fn on_escape(&mut self) -> bool {
        let was_visible = self.visible;
        self.close();
        was_visible
    }

    pub fn close(&mut self) {
        self.visible = false;
        self.pending_close = None;
    }

    /// Blur never closes synchronously: a row click dispatched after the blur of the
    /// same gesture must still find the overlay open.
    pub fn on_blur(&mut self, now: Duration, delay: Duration) {
        if !self.visible {
            self.pending_close = None;
            return;
        }
        self.pending_close = Some(PendingClose {
            due_at: now + delay,
        });
    }

    pub fn poll(&mut self, now: Duration) -> bool {
        match self.pending_close {
            Some(pending) if now >= pending.due_at => {
                self.close();
                true
            }
            _ => false,
        }
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending_close.map(|pending| pending.due_at)
    }
}

#[cfg(test)]
mod tests {
    use super::{HotkeyAction, OverlayState, PaletteView};
    use std::time::Duration;

    const DELAY: Duration = Duration::from_millis(150);

    #[test]
    fn hotkey_shows_hidden_overlay() {
        let mut state = OverlayState::default();
        let action = state.on_hotkey(false);
        assert_eq!(action, HotkeyAction::ShowAndFocus);
        assert!(state.is_visible());
    }

    #[test]
    fn hotkey_keeps_focused_overlay_open() {
        let mut state = OverlayState::default();
        state.on_hotkey(false);
        let action = state.on_hotkey(true);
        assert_eq!(action, HotkeyAction::FocusExisting);
        assert!(state.is_visible());
    }

    #[test]
    fn escape_reports_only_when_visible() {
        let mut state = OverlayState::default();
        assert!(!state.on_escape());
        state.on_focus();
        assert!(state.on_escape());
        assert!(!state.is_visible());
    }

    #[test]
    fn view_is_derived_from_result_count() {
        let mut state = OverlayState::default();
        assert_eq!(state.view(3), PaletteView::Closed);
        state.on_focus();
        assert_eq!(state.view(0), PaletteView::OpenEmpty);
        assert_eq!(state.view(3), PaletteView::OpenWithResults);
    }

    #[test]
    fn blur_closes_only_once_deadline_passes() {
        let mut state = OverlayState::default();
        state.on_focus();
        state.on_blur(Duration::ZERO, DELAY);
        assert!(!state.poll(Duration::from_millis(149)));
        assert!(state.is_visible());
        assert!(state.poll(Duration::from_millis(150)));
        assert!(!state.is_visible());
        assert_eq!(state.next_deadline(), None);
    }

    #[test]
    fn refocus_cancels_pending_close() {
        let mut state = OverlayState::default();
        state.on_focus();
        state.on_blur(Duration::ZERO, DELAY);
        state.on_focus();
        assert!(!state.poll(Duration::from_secs(1)));
        assert!(state.is_visible());
    }

    #[test]
    fn query_edit_opens_and_cancels_pending_close() {
        let mut state = OverlayState::default();
        state.on_query_edit();
        assert!(state.is_visible());
        state.on_blur(Duration::ZERO, DELAY);
        state.on_query_edit();
        assert_eq!(state.next_deadline(), None);
    }
}
