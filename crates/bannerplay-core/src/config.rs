//! Player Configuration

use std::time::Duration;

use serde::Deserialize;

use crate::banner::Banner;
use crate::page::ScrollIntoViewOptions;
use crate::PlayerError;

/// DOM identifiers of the elements the player binds to
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ElementIds {
    /// `id` of the `<video>` element
    pub video: String,
    /// CSS selector of the container that gets centered
    pub container: String,
    pub muted_banner: String,
    pub paused_banner: String,
    pub ended_banner: String,
}

impl ElementIds {
    /// Element id of a banner
    pub fn banner(&self, banner: Banner) -> &str {
        match banner {
            Banner::Muted => &self.muted_banner,
            Banner::Paused => &self.paused_banner,
            Banner::Ended => &self.ended_banner,
        }
    }
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            video: "local_video".into(),
            container: ".video-container".into(),
            muted_banner: "muted-banner".into(),
            paused_banner: "paused-banner".into(),
            ended_banner: "ended-banner".into(),
        }
    }
}

/// Player configuration options
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub elements: ElementIds,

    /// Delay before the muted banner appears on a muted start (ms)
    pub muted_banner_delay_ms: u64,

    /// Pauses at or before this position (seconds) show no paused banner
    pub pause_banner_threshold_secs: f64,

    /// How the container is scrolled into view
    pub scroll: ScrollIntoViewOptions,

    /// CSS cursor applied to the video element
    pub video_cursor: String,

    /// Maximum log level (`error`, `warn`, `info`, `debug`, `trace`)
    pub log_level: String,
}

impl PlayerConfig {
    /// Parse a (possibly partial) JSON configuration
    pub fn from_json(json: &str) -> Result<Self, PlayerError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn muted_banner_delay(&self) -> Duration {
        Duration::from_millis(self.muted_banner_delay_ms)
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            elements: ElementIds::default(),
            muted_banner_delay_ms: 1000,
            pause_banner_threshold_secs: 0.5,
            scroll: ScrollIntoViewOptions::default(),
            video_cursor: "pointer".into(),
            log_level: "info".into(),
        }
    }
}
