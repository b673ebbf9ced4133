//! Page-level settings
//!
//! The page may embed a JSON block with the element id
//! [`SETTINGS_ELEMENT_ID`]; every field is optional.

use bannerplay_core::{PlayerConfig, PlayerError};
use bannerplay_source::SourceCatalog;
use serde::Deserialize;

/// Id of the `<script type="application/json">` block holding settings
pub const SETTINGS_ELEMENT_ID: &str = "bannerplay-config";

/// Controller configuration plus the source catalog
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageSettings {
    pub player: PlayerConfig,
    pub sources: SourceCatalog,
}

impl PageSettings {
    pub fn from_json(json: &str) -> Result<Self, PlayerError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse the embedded block, or defaults when the page has none
    pub fn from_embedded(text: Option<&str>) -> Result<Self, PlayerError> {
        match text.map(str::trim) {
            Some(json) if !json.is_empty() => Self::from_json(json),
            _ => Ok(Self::default()),
        }
    }
}
