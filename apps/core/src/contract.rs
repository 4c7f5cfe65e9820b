use serde::{Deserialize, Serialize};

use crate::hotkey::KeyInput;
use crate::model::{Category, IndexEntry};
use crate::overlay_state::PaletteView;
use crate::palette::PaletteSnapshot;
use crate::selection::Direction;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "payload")]
pub enum PaletteRequest {
    SetQuery { text: String },
    Navigate { direction: Direction },
    Activate,
    SelectResult { row: usize },
    Focus,
    Blur,
    Escape,
    /// Keydown inside the search field; also offered to the document-wide listener.
    KeyDown(KeyInput),
    /// Keydown anywhere else on the page.
    GlobalKeyDown(KeyInput),
    Tick,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchResultDto {
    pub title: String,
    pub href: String,
    pub category: Category,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SnapshotDto {
    pub is_open: bool,
    pub view: PaletteView,
    pub query: String,
    pub results: Vec<SearchResultDto>,
    pub selection_index: usize,
    pub has_focus: bool,
    pub empty_message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaletteResponse {
    pub snapshot: SnapshotDto,
    pub navigate_to: Option<String>,
    pub prevent_default: bool,
}

impl From<IndexEntry> for SearchResultDto {
    fn from(value: IndexEntry) -> Self {
        Self {
            title: value.title,
            href: value.href,
            category: value.category,
        }
    }
}

impl From<PaletteSnapshot> for SnapshotDto {
    fn from(value: PaletteSnapshot) -> Self {
        Self {
            is_open: value.is_open,
            view: value.view,
            query: value.query,
            results: value.results.into_iter().map(SearchResultDto::from).collect(),
            selection_index: value.selection_index,
            has_focus: value.has_focus,
            empty_message: value.empty_message.map(str::to_string),
        }
    }
}
