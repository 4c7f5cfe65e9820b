//! Search palette controller: the single owner of query, results, selection and
//! visibility for one mounted search field.
//!
//! Every keystroke runs synchronously to completion: query -> matcher -> selection
//! reset -> visibility. The only deferred work is the close scheduled by a blur,
//! which the host runs through [`PaletteController::tick`] once
//! [`PaletteController::next_deadline`] has passed.

use std::cell::Cell;
use std::time::Duration;

use tracing::{debug, info};

use crate::clock::Clock;
use crate::config::Config;
use crate::hotkey::KeyInput;
use crate::hotkey_runtime::GlobalKey;
use crate::model::{DocumentIndex, IndexEntry};
use crate::overlay_state::{HotkeyAction, OverlayState, PaletteView};
use crate::search::search;
use crate::selection::{Direction, SelectionState};

pub const NO_RESULTS_MESSAGE: &str = "No results found";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteSnapshot {
    pub is_open: bool,
    pub view: PaletteView,
    pub query: String,
    pub results: Vec<IndexEntry>,
    pub selection_index: usize,
    pub has_focus: bool,
    pub empty_message: Option<&'static str>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyOutcome {
    pub handled: bool,
    pub prevent_default: bool,
    pub navigate_to: Option<String>,
}

impl KeyOutcome {
    fn consumed() -> Self {
        Self {
            handled: true,
            prevent_default: true,
            navigate_to: None,
        }
    }
}

pub struct PaletteController {
    index: DocumentIndex,
    clock: Box<dyn Clock>,
    blur_close_delay: Duration,
    query: String,
    results: Vec<IndexEntry>,
    selection: SelectionState,
    overlay: OverlayState,
    has_focus: bool,
    mounted: Cell<bool>,
}

impl PaletteController {
    pub fn new(index: DocumentIndex, blur_close_delay: Duration, clock: Box<dyn Clock>) -> Self {
        Self {
            index,
            clock,
            blur_close_delay,
            query: String::new(),
            results: Vec::new(),
            selection: SelectionState::default(),
            overlay: OverlayState::default(),
            has_focus: false,
            mounted: Cell::new(true),
        }
    }

    pub fn from_config(index: DocumentIndex, config: &Config, clock: Box<dyn Clock>) -> Self {
        Self::new(index, config.blur_close_delay(), clock)
    }

    pub fn index(&self) -> &DocumentIndex {
        &self.index
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[IndexEntry] {
        &self.results
    }

    pub fn selection_index(&self) -> usize {
        self.selection.index()
    }

    pub fn is_open(&self) -> bool {
        self.overlay.is_visible()
    }

    pub fn has_focus(&self) -> bool {
        self.has_focus
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.get()
    }

    pub fn set_query(&mut self, text: &str) {
        if !self.mounted.get() {
            return;
        }

        if text != self.query {
            self.query = text.to_string();
            self.results = search(self.index.entries(), &self.query);
            self.selection.reset();
            debug!(query = %self.query, results = self.results.len(), "palette query changed");
        }
        self.has_focus = true;
        self.overlay.on_query_edit();
    }

    pub fn on_navigation_key(&mut self, direction: Direction) {
        if !self.mounted.get() || self.results.is_empty() {
            return;
        }
        self.selection.step(direction, self.results.len());
        debug!(selection = self.selection.index(), "palette selection moved");
    }

    /// Returns the target of the highlighted result and closes the palette, or `None`
    /// when nothing is highlighted.
    pub fn on_activate(&mut self) -> Option<String> {
        if !self.mounted.get() {
            return None;
        }

        let href = self.selection.pick(&self.results)?.href.clone();
        info!(href = %href, "palette result activated");
        self.dismiss();
        Some(href)
    }

    /// Pointer activation of a rendered row. May arrive after the blur of the same
    /// gesture; the deferred close has not run yet so the row is still live.
    pub fn on_select_result(&mut self, row: usize) -> Option<String> {
        if !self.mounted.get() || !self.selection.select(row, self.results.len()) {
            return None;
        }
        self.on_activate()
    }

    pub fn on_focus(&mut self) {
        if !self.mounted.get() {
            return;
        }
        self.has_focus = true;
        self.overlay.on_focus();
    }

    pub fn on_blur_with_delay(&mut self) {
        if !self.mounted.get() {
            return;
        }
        self.has_focus = false;
        self.overlay.on_blur(self.clock.now(), self.blur_close_delay);
        if let Some(due_at) = self.overlay.next_deadline() {
            debug!(due_at_ms = due_at.as_millis() as u64, "palette close deferred");
        }
    }

    pub fn on_escape(&mut self) {
        if !self.mounted.get() {
            return;
        }
        if self.overlay.is_visible() {
            debug!("palette dismissed with escape");
        }
        self.dismiss();
    }

    pub fn on_hotkey(&mut self) -> Option<HotkeyAction> {
        if !self.mounted.get() {
            return None;
        }
        let action = self.overlay.on_hotkey(self.has_focus);
        self.has_focus = true;
        debug!(?action, "palette hotkey");
        Some(action)
    }

    pub fn on_global_key(&mut self, key: GlobalKey) {
        match key {
            GlobalKey::Activate => {
                self.on_hotkey();
            }
            GlobalKey::Escape => self.on_escape(),
        }
    }

    /// Keydown inside the search field.
    pub fn on_key_down(&mut self, input: &KeyInput) -> KeyOutcome {
        if !self.mounted.get() {
            return KeyOutcome::default();
        }

        match input.key.as_str() {
            "ArrowDown" => {
                self.on_navigation_key(Direction::Down);
                KeyOutcome::consumed()
            }
            "ArrowUp" => {
                self.on_navigation_key(Direction::Up);
                KeyOutcome::consumed()
            }
            "Enter" => match self.on_activate() {
                Some(href) => KeyOutcome {
                    navigate_to: Some(href),
                    ..KeyOutcome::consumed()
                },
                None => KeyOutcome::default(),
            },
            _ if input.is_escape() => {
                self.on_escape();
                KeyOutcome {
                    handled: true,
                    ..KeyOutcome::default()
                }
            }
            _ => KeyOutcome::default(),
        }
    }

    /// Runs the deferred close if it is due. Returns whether the palette closed.
    pub fn tick(&mut self) -> bool {
        if !self.mounted.get() {
            return false;
        }
        let closed = self.overlay.poll(self.clock.now());
        if closed {
            debug!("palette closed after blur");
        }
        closed
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        if !self.mounted.get() {
            return None;
        }
        self.overlay.next_deadline()
    }

    pub fn snapshot(&self) -> PaletteSnapshot {
        let is_open = self.overlay.is_visible();
        let empty_message = (is_open && !self.query.is_empty() && self.results.is_empty())
            .then_some(NO_RESULTS_MESSAGE);

        PaletteSnapshot {
            is_open,
            view: self.overlay.view(self.results.len()),
            query: self.query.clone(),
            results: self.results.clone(),
            selection_index: self.selection.index(),
            has_focus: self.has_focus,
            empty_message,
        }
    }

    /// Closes the palette, cancels any pending close, and turns every later call into
    /// a no-op.
    pub fn unmount(&mut self) {
        if !self.mounted.get() {
            return;
        }
        self.overlay.close();
        self.has_focus = false;
        self.mounted.set(false);
    }

    /// Unmount through a shared borrow: later calls become no-ops and the pending
    /// close never fires, but the visible state is left as it was.
    pub fn freeze(&self) {
        self.mounted.set(false);
    }

    fn dismiss(&mut self) {
        self.overlay.close();
        self.has_focus = false;
        self.query.clear();
        self.results.clear();
        self.selection.reset();
    }
}
