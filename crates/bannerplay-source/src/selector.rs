//! Source Selector
//!
//! Swaps the media element's source list when the device layout changes
//! and plans how to restore position and playback once the new source has
//! metadata.

use bannerplay_core::{MediaElement, MediaSurface, PlayerEvent};

use crate::catalog::{SourceCatalog, VideoSource};
use crate::device::DeviceType;
use crate::orientation::{Orientation, ScreenSignals};
use crate::SourceError;

/// Everything the selector reads from the page
#[derive(Debug, Clone, Default)]
pub struct DeviceSignals {
    pub user_agent: String,
    pub screen: ScreenSignals,
}

/// Media element operations needed to swap sources
pub trait SourceHost {
    fn current_time(&self) -> f64;
    fn paused(&self) -> bool;

    /// Drop every child of the element, then append `source` and the
    /// fallback text
    fn replace_sources(&mut self, source: &VideoSource, fallback_text: &str) -> Result<(), SourceError>;

    /// Restart resource selection (`HTMLMediaElement.load()`)
    fn load(&mut self);
}

/// State captured before a swap
#[derive(Debug, Clone, PartialEq)]
pub struct SourceSwap {
    pub source: VideoSource,
    pub saved_time: f64,
    pub was_playing: bool,
}

impl SourceSwap {
    /// Position to seek to once `duration` is known. Never past the end.
    pub fn resume_at(&self, duration: f64) -> f64 {
        if duration.is_nan() {
            self.saved_time
        } else {
            self.saved_time.min(duration)
        }
    }

    /// Resume when the video was playing, or when nothing has played yet
    /// (initial load of an autoplaying video)
    pub fn resume_playback(&self) -> bool {
        self.was_playing || self.saved_time == 0.0
    }

    /// Event for the playback controller once metadata has loaded
    pub fn restore_event(&self, duration: f64) -> PlayerEvent {
        PlayerEvent::SourceReady {
            resume_at: self.resume_at(duration),
            resume_playback: self.resume_playback(),
        }
    }
}

/// Picks and attaches the source for the current device
#[derive(Debug, Default)]
pub struct SourceSelector {
    catalog: SourceCatalog,
    attached: Option<VideoSource>,
}

impl SourceSelector {
    pub fn new(catalog: SourceCatalog) -> Self {
        Self {
            catalog,
            attached: None,
        }
    }

    pub fn catalog(&self) -> &SourceCatalog {
        &self.catalog
    }

    /// Source currently attached to the element
    pub fn attached(&self) -> Option<&VideoSource> {
        self.attached.as_ref()
    }

    /// Source the current signals call for
    pub fn choose(&self, signals: &DeviceSignals) -> VideoSource {
        let device = DeviceType::detect(&signals.user_agent);
        let orientation = Orientation::detect(&signals.screen);
        tracing::debug!(%device, orientation = orientation.as_str(), "device signals");
        self.catalog.select(device, orientation)
    }

    /// Attach the right source for `signals`
    ///
    /// Returns `None` when the element already plays that file, so resizes
    /// that do not change the layout leave playback alone.
    pub fn select_source<H: SourceHost>(
        &mut self,
        host: &mut H,
        signals: &DeviceSignals,
    ) -> Result<Option<SourceSwap>, SourceError> {
        let source = self.choose(signals);

        if self.attached.as_ref().is_some_and(|attached| attached.src == source.src) {
            tracing::debug!(src = %source.src, "source unchanged");
            self.attached = Some(source);
            return Ok(None);
        }

        let swap = SourceSwap {
            source: source.clone(),
            saved_time: host.current_time(),
            was_playing: !host.paused(),
        };

        host.replace_sources(&source, &self.catalog.fallback_text)?;
        host.load();
        tracing::info!(src = %source.src, "loaded {}", source.layout.description());

        self.attached = Some(source);
        Ok(Some(swap))
    }
}

impl SourceHost for MediaElement {
    fn current_time(&self) -> f64 {
        MediaSurface::current_time(self)
    }

    fn paused(&self) -> bool {
        MediaSurface::paused(self)
    }

    fn replace_sources(&mut self, source: &VideoSource, _fallback_text: &str) -> Result<(), SourceError> {
        self.src = source.src.clone();
        Ok(())
    }

    fn load(&mut self) {
        MediaElement::load(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SourceLayout;

    fn swap(saved_time: f64, was_playing: bool) -> SourceSwap {
        SourceSwap {
            source: SourceCatalog::default().select(DeviceType::Desktop, Orientation::Landscape),
            saved_time,
            was_playing,
        }
    }

    #[test]
    fn test_resume_at_clamps_to_duration() {
        assert_eq!(swap(42.0, true).resume_at(30.0), 30.0);
        assert_eq!(swap(12.0, true).resume_at(30.0), 12.0);
        assert_eq!(swap(12.0, true).resume_at(f64::NAN), 12.0);
    }

    #[test]
    fn test_resume_playback() {
        assert!(swap(10.0, true).resume_playback());
        assert!(!swap(10.0, false).resume_playback());
        assert!(swap(0.0, false).resume_playback());
    }

    #[test]
    fn test_restore_event() {
        assert_eq!(
            swap(8.0, true).restore_event(60.0),
            PlayerEvent::SourceReady {
                resume_at: 8.0,
                resume_playback: true
            }
        );
    }

    #[test]
    fn test_select_source_swaps_once() {
        let mut selector = SourceSelector::default();
        let mut element = MediaElement::new();
        let signals = DeviceSignals {
            user_agent: "Mozilla/5.0 (X11; Linux x86_64)".into(),
            screen: ScreenSignals::default(),
        };

        let swap = selector.select_source(&mut element, &signals).unwrap().unwrap();
        assert_eq!(swap.source.layout, SourceLayout::Desktop);
        assert_eq!(element.src, "desktop-video.mp4");

        assert!(selector.select_source(&mut element, &signals).unwrap().is_none());
    }
}
