use std::time::Duration;

use docpalette_core::clock::ManualClock;
use docpalette_core::hotkey::KeyInput;
use docpalette_core::model::{Category, DocumentIndex, IndexEntry};
use docpalette_core::overlay_state::{HotkeyAction, PaletteView};
use docpalette_core::palette::{PaletteController, NO_RESULTS_MESSAGE};
use docpalette_core::selection::Direction;

const BLUR_DELAY: Duration = Duration::from_millis(150);

fn learn_index() -> DocumentIndex {
    DocumentIndex::new(vec![
        IndexEntry::new("Hooks", "/learn/hooks", Category::Feature, &["hooks", "lifecycle"])
            .unwrap(),
        IndexEntry::new(
            "Sessions",
            "/learn/session-management",
            Category::Feature,
            &["session", "resume"],
        )
        .unwrap(),
    ])
}

fn wide_index() -> DocumentIndex {
    let titles = ["Bash", "BashOutput", "Edit", "Read", "Write"];
    DocumentIndex::new(
        titles
            .iter()
            .map(|title| {
                IndexEntry::new(title, "/learn/tools", Category::Tool, &["tool", "file"]).unwrap()
            })
            .collect(),
    )
}

fn palette(index: DocumentIndex) -> (PaletteController, ManualClock) {
    let clock = ManualClock::default();
    let controller = PaletteController::new(index, BLUR_DELAY, Box::new(clock.clone()));
    (controller, clock)
}

#[test]
fn starts_closed_with_no_results() {
    let (controller, _) = palette(learn_index());
    let snapshot = controller.snapshot();
    assert!(!snapshot.is_open);
    assert_eq!(snapshot.view, PaletteView::Closed);
    assert!(snapshot.results.is_empty());
    assert_eq!(snapshot.selection_index, 0);
}

#[test]
fn end_to_end_query_then_activate() {
    let (mut controller, _) = palette(learn_index());

    controller.set_query("resu");
    let snapshot = controller.snapshot();
    assert_eq!(snapshot.results.len(), 1);
    assert_eq!(snapshot.results[0].title, "Sessions");
    assert_eq!(snapshot.selection_index, 0);
    assert_eq!(snapshot.view, PaletteView::OpenWithResults);

    let href = controller.on_activate();
    assert_eq!(href.as_deref(), Some("/learn/session-management"));
    let snapshot = controller.snapshot();
    assert!(!snapshot.is_open);
    assert_eq!(snapshot.view, PaletteView::Closed);
    assert_eq!(snapshot.query, "");
}

#[test]
fn selection_resets_on_query_change_and_clamps() {
    let (mut controller, _) = palette(wide_index());
    controller.set_query("tool");
    assert_eq!(controller.results().len(), 5);
    for _ in 0..3 {
        controller.on_navigation_key(Direction::Down);
    }
    assert_eq!(controller.selection_index(), 3);

    controller.set_query("bash");
    assert_eq!(controller.results().len(), 2);
    assert_eq!(controller.selection_index(), 0);

    for _ in 0..5 {
        controller.on_navigation_key(Direction::Down);
    }
    assert_eq!(controller.selection_index(), 1);
}

#[test]
fn move_up_clamps_at_first_result() {
    let (mut controller, _) = palette(wide_index());
    controller.set_query("tool");
    controller.on_navigation_key(Direction::Up);
    assert_eq!(controller.selection_index(), 0);
    controller.on_navigation_key(Direction::Down);
    controller.on_navigation_key(Direction::Up);
    controller.on_navigation_key(Direction::Up);
    assert_eq!(controller.selection_index(), 0);
}

#[test]
fn activation_after_overshooting_picks_last_result() {
    let (mut controller, _) = palette(learn_index());
    controller.set_query("s");
    assert_eq!(controller.results().len(), 2);

    for _ in 0..3 {
        controller.on_navigation_key(Direction::Down);
    }
    assert_eq!(controller.selection_index(), 1);
    assert_eq!(
        controller.on_activate().as_deref(),
        Some("/learn/session-management")
    );
}

#[test]
fn empty_results_make_navigation_and_activation_no_ops() {
    let (mut controller, _) = palette(learn_index());
    controller.set_query("zzz");
    controller.on_navigation_key(Direction::Down);
    controller.on_navigation_key(Direction::Up);
    assert_eq!(controller.selection_index(), 0);
    assert_eq!(controller.on_activate(), None);

    let snapshot = controller.snapshot();
    assert!(snapshot.is_open);
    assert_eq!(snapshot.view, PaletteView::OpenEmpty);
    assert_eq!(snapshot.empty_message, Some(NO_RESULTS_MESSAGE));
}

#[test]
fn focus_without_query_opens_empty_without_message() {
    let (mut controller, _) = palette(learn_index());
    controller.on_focus();
    let snapshot = controller.snapshot();
    assert_eq!(snapshot.view, PaletteView::OpenEmpty);
    assert_eq!(snapshot.empty_message, None);
}

#[test]
fn empty_index_degrades_to_open_empty() {
    let (mut controller, _) = palette(DocumentIndex::default());
    controller.set_query("hooks");
    assert_eq!(controller.snapshot().view, PaletteView::OpenEmpty);
    assert_eq!(controller.on_activate(), None);
}

#[test]
fn clearing_the_query_suppresses_results() {
    let (mut controller, _) = palette(learn_index());
    controller.set_query("hooks");
    controller.set_query("");
    assert!(controller.results().is_empty());
    assert!(controller.is_open());
}

#[test]
fn click_after_blur_still_activates() {
    let (mut controller, clock) = palette(learn_index());
    controller.on_focus();
    controller.set_query("hooks");

    controller.on_blur_with_delay();
    clock.advance(Duration::from_millis(10));
    assert!(!controller.tick());
    assert!(controller.is_open());

    assert_eq!(controller.on_select_result(0).as_deref(), Some("/learn/hooks"));
    assert!(!controller.is_open());

    clock.advance(Duration::from_millis(200));
    assert!(!controller.tick());
    assert!(!controller.is_open());
}

#[test]
fn blur_closes_after_delay_and_keeps_query() {
    let (mut controller, clock) = palette(learn_index());
    controller.set_query("hooks");
    controller.on_blur_with_delay();
    assert_eq!(controller.next_deadline(), Some(BLUR_DELAY));

    clock.advance(Duration::from_millis(149));
    assert!(!controller.tick());
    clock.advance(Duration::from_millis(1));
    assert!(controller.tick());

    let snapshot = controller.snapshot();
    assert!(!snapshot.is_open);
    assert_eq!(snapshot.query, "hooks");
    assert_eq!(controller.next_deadline(), None);
}

#[test]
fn refocus_before_deadline_cancels_close() {
    let (mut controller, clock) = palette(learn_index());
    controller.on_focus();
    controller.on_blur_with_delay();
    clock.advance(Duration::from_millis(50));
    controller.on_focus();
    clock.advance(Duration::from_millis(500));
    assert!(!controller.tick());
    assert!(controller.is_open());
}

#[test]
fn second_blur_supersedes_first_deadline() {
    let (mut controller, clock) = palette(learn_index());
    controller.on_focus();
    controller.on_blur_with_delay();
    clock.advance(Duration::from_millis(100));
    controller.on_focus();
    controller.on_blur_with_delay();

    clock.advance(Duration::from_millis(100));
    assert!(!controller.tick());
    clock.advance(Duration::from_millis(50));
    assert!(controller.tick());
}

#[test]
fn click_on_missing_row_is_a_no_op() {
    let (mut controller, _) = palette(learn_index());
    controller.set_query("hooks");
    assert_eq!(controller.on_select_result(4), None);
    assert!(controller.is_open());
    assert_eq!(controller.selection_index(), 0);
}

#[test]
fn escape_closes_clears_and_drops_focus() {
    let (mut controller, _) = palette(learn_index());
    controller.set_query("hooks");
    controller.on_escape();
    let snapshot = controller.snapshot();
    assert!(!snapshot.is_open);
    assert!(!snapshot.has_focus);
    assert_eq!(snapshot.query, "");

    controller.on_escape();
    assert!(!controller.is_open());
}

#[test]
fn hotkey_is_idempotent_when_already_open_and_focused() {
    let (mut controller, _) = palette(learn_index());
    assert_eq!(controller.on_hotkey(), Some(HotkeyAction::ShowAndFocus));
    assert_eq!(controller.on_hotkey(), Some(HotkeyAction::FocusExisting));
    assert!(controller.is_open());
    assert!(controller.has_focus());
}

#[test]
fn key_down_drives_navigation_and_activation() {
    let (mut controller, _) = palette(learn_index());
    controller.set_query("s");

    let outcome = controller.on_key_down(&KeyInput::named("ArrowDown"));
    assert!(outcome.prevent_default);
    assert_eq!(controller.selection_index(), 1);

    let outcome = controller.on_key_down(&KeyInput::named("Enter"));
    assert!(outcome.handled);
    assert_eq!(outcome.navigate_to.as_deref(), Some("/learn/session-management"));

    let outcome = controller.on_key_down(&KeyInput::named("Enter"));
    assert!(!outcome.handled);
    assert_eq!(outcome.navigate_to, None);

    let outcome = controller.on_key_down(&KeyInput::named("a"));
    assert!(!outcome.handled);
}

#[test]
fn unmount_cancels_pending_close_and_freezes_state() {
    let (mut controller, clock) = palette(learn_index());
    controller.set_query("hooks");
    controller.on_blur_with_delay();
    controller.unmount();

    assert_eq!(controller.next_deadline(), None);
    clock.advance(Duration::from_secs(1));
    assert!(!controller.tick());

    let before = controller.snapshot();
    controller.set_query("resu");
    controller.on_focus();
    assert_eq!(controller.on_hotkey(), None);
    assert_eq!(controller.on_activate(), None);
    assert_eq!(controller.snapshot(), before);
    assert!(!controller.is_mounted());
}

#[test]
fn controllers_share_one_index_independently() {
    let index = learn_index();
    let (mut desktop, _) = palette(index.clone());
    let (mobile, _) = palette(index.clone());
    assert!(desktop.index().shares_storage_with(mobile.index()));

    desktop.set_query("hooks");
    assert!(desktop.is_open());
    assert!(!mobile.is_open());
    assert!(mobile.results().is_empty());
}
