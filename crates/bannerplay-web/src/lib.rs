//! bannerplay Web
//!
//! WebAssembly entry point. On load the module reads the optional
//! `<script type="application/json" id="bannerplay-config">` block, mounts
//! the playback controller on the page's video and picks the video file for
//! the current device.
//!
//! Everything except [`settings`] is only built for `wasm32`.

pub mod settings;

#[cfg(target_arch = "wasm32")]
pub mod dom;
#[cfg(target_arch = "wasm32")]
pub mod logging;
#[cfg(target_arch = "wasm32")]
pub mod mount;
#[cfg(target_arch = "wasm32")]
pub mod surface;

pub use settings::{PageSettings, SETTINGS_ELEMENT_ID};

#[cfg(target_arch = "wasm32")]
mod exports {
    use wasm_bindgen::prelude::*;

    use crate::mount;

    /// Module start: panic hook, then mount when the DOM is ready
    #[wasm_bindgen(start)]
    pub fn start() {
        console_error_panic_hook::set_once();
        mount::mount_when_ready();
    }

    /// Re-run device/orientation source selection for a video element
    #[wasm_bindgen(js_name = selectSource)]
    pub fn select_source(element_id: &str) -> Result<(), JsValue> {
        mount::select_source(element_id).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Library version
    #[wasm_bindgen]
    pub fn version() -> String {
        bannerplay_core::VERSION.to_string()
    }
}
