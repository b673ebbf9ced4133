//! Page
//!
//! Page-level services the controller needs: scrolling, timers and
//! gesture listeners.

use std::time::Duration;

use serde::Deserialize;

use crate::deferred::DeferredAction;

/// Scroll behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBehavior {
    Auto,
    #[default]
    Smooth,
    Instant,
}

/// Logical scroll position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollLogicalPosition {
    Start,
    #[default]
    Center,
    End,
    Nearest,
}

/// Scroll into view options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct ScrollIntoViewOptions {
    pub behavior: ScrollBehavior,
    pub block: ScrollLogicalPosition,
}

/// Host page
pub trait Page {
    /// Scroll the video container into view
    fn scroll_into_view(&mut self, options: &ScrollIntoViewOptions);

    /// Run `action` once after `delay`; the controller receives it back as
    /// `PlayerEvent::Deferred`
    fn defer(&mut self, delay: Duration, action: DeferredAction);

    /// Register (`true`) or remove (`false`) the page-wide gesture listeners
    /// used for autoplay recovery; the controller receives gestures as
    /// `PlayerEvent::UserGesture`
    fn watch_gestures(&mut self, enabled: bool);
}
