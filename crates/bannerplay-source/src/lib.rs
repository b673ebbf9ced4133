//! bannerplay Source Selection
//!
//! Picks the video file for the current device and orientation, swaps it
//! into the media element and plans the position/playback restore.
//!
//! Source swaps only touch the media element: the playback controller's
//! click phase and banners are never reset by a swap.

pub mod catalog;
pub mod device;
pub mod orientation;
pub mod selector;

pub use catalog::{SourceCatalog, SourceEntry, SourceLayout, VideoSource};
pub use device::DeviceType;
pub use orientation::{Orientation, ScreenSignals};
pub use selector::{DeviceSignals, SourceHost, SourceSelector, SourceSwap};

/// Source selection errors
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Invalid source catalog: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Failed to update media element: {0}")]
    Host(String),

    #[error("Media element not found: {0}")]
    MissingElement(String),
}
