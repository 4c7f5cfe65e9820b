pub mod catalog;
pub mod clock;
pub mod config;
pub mod contract;
pub mod hotkey;
pub mod hotkey_runtime;
pub mod logging;
pub mod model;
pub mod mount;
pub mod overlay_state;
pub mod palette;
pub mod runtime;
pub mod search;
pub mod selection;
pub mod transport;
