//! bannerplay Core
//!
//! Playback state controller for a single embedded video.
//!
//! Features:
//! - Muted / paused / ended banners (at most one visible)
//! - First click unmutes and restarts, later clicks toggle playback
//! - Scroll-centering of the video container
//! - One-shot deferred actions and autoplay recovery
//!
//! The controller is generic over the media surface, the banner sink and the
//! page, so the same state machine drives the browser build and the headless
//! backend used in tests.

pub mod autoplay;
pub mod banner;
pub mod config;
pub mod controller;
pub mod deferred;
pub mod event;
pub mod headless;
pub mod media;
pub mod page;

pub use autoplay::AutoplayRecovery;
pub use banner::{Banner, BannerDisplay, BannerSet};
pub use config::{ElementIds, PlayerConfig};
pub use controller::{ClickPhase, PlaybackController};
pub use deferred::{DeferredAction, DeferredQueue};
pub use event::{ClickEvent, MediaEvent, PlayOrigin, PlayerEvent, Propagation};
pub use headless::{HeadlessBanners, HeadlessPage, HeadlessPlayer, MediaElement};
pub use media::MediaSurface;
pub use page::{Page, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialization and configuration errors
#[derive(Debug, thiserror::Error)]
pub enum PlayerError {
    #[error("Required element not found: {0}")]
    MissingElement(String),

    #[error("Element {id} is not a {expected}")]
    WrongElementType { id: String, expected: &'static str },

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("No window object available")]
    NoWindow,

    #[error("DOM operation failed: {0}")]
    Dom(String),

    #[error("A player is already mounted on this page")]
    AlreadyMounted,
}

/// Playback request failure
///
/// Browsers report these through the promise returned by `play()`; they are
/// expected under autoplay policy and are always recoverable by a later
/// user gesture.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlayError {
    #[error("Playback not allowed: {0}")]
    NotAllowed(String),

    #[error("Not enough data to play")]
    NotReady,

    #[error("Playback rejected: {0}")]
    Rejected(String),
}
