use serde::{Deserialize, Serialize};

use crate::contract::{PaletteRequest, PaletteResponse, SnapshotDto};
use crate::hotkey_runtime::HotkeyHub;
use crate::mount::MountedPalette;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidJson,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TransportResponse {
    Ok { response: PaletteResponse },
    Err { error: ErrorResponse },
}

pub fn handle_request(
    hub: &HotkeyHub,
    palette: &MountedPalette,
    request: PaletteRequest,
) -> TransportResponse {
    let mut navigate_to = None;
    let mut prevent_default = false;

    match request {
        PaletteRequest::SetQuery { text } => palette.controller_mut().set_query(&text),
        PaletteRequest::Navigate { direction } => {
            palette.controller_mut().on_navigation_key(direction)
        }
        PaletteRequest::Activate => navigate_to = palette.controller_mut().on_activate(),
        PaletteRequest::SelectResult { row } => {
            navigate_to = palette.controller_mut().on_select_result(row)
        }
        PaletteRequest::Focus => palette.controller_mut().on_focus(),
        PaletteRequest::Blur => palette.controller_mut().on_blur_with_delay(),
        PaletteRequest::Escape => palette.controller_mut().on_escape(),
        PaletteRequest::KeyDown(input) => {
            let local = palette.controller_mut().on_key_down(&input);
            // Bubbles to the document listener like a DOM keydown would.
            let global = hub.dispatch(&input);
            navigate_to = local.navigate_to;
            prevent_default = local.prevent_default || global.prevent_default;
        }
        PaletteRequest::GlobalKeyDown(input) => {
            prevent_default = hub.dispatch(&input).prevent_default;
        }
        PaletteRequest::Tick => {
            palette.controller_mut().tick();
        }
    }

    TransportResponse::Ok {
        response: PaletteResponse {
            snapshot: snapshot_dto(palette),
            navigate_to,
            prevent_default,
        },
    }
}

pub fn handle_json(hub: &HotkeyHub, palette: &MountedPalette, payload: &str) -> String {
    let response = match serde_json::from_str::<PaletteRequest>(payload) {
        Ok(request) => handle_request(hub, palette, request),
        Err(error) => TransportResponse::Err {
            error: ErrorResponse {
                code: ErrorCode::InvalidJson,
                message: error.to_string(),
            },
        },
    };

    encode(&response)
}

/// Unsolicited state push, e.g. after a deferred close fires between requests.
pub fn snapshot_json(palette: &MountedPalette) -> String {
    encode(&TransportResponse::Ok {
        response: PaletteResponse {
            snapshot: snapshot_dto(palette),
            navigate_to: None,
            prevent_default: false,
        },
    })
}

fn snapshot_dto(palette: &MountedPalette) -> SnapshotDto {
    palette.controller().snapshot().into()
}

fn encode(response: &TransportResponse) -> String {
    serde_json::to_string(response).expect("transport response should serialize")
}
