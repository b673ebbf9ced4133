//! Player Events
//!
//! Typed events consumed by the playback controller.

use crate::banner::Banner;
use crate::deferred::DeferredAction;

/// Media element events the controller listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaEvent {
    Play,
    Pause,
    Ended,
    VolumeChange,
    Click,
}

impl MediaEvent {
    pub const ALL: [MediaEvent; 5] = [
        MediaEvent::Click,
        MediaEvent::Pause,
        MediaEvent::Play,
        MediaEvent::VolumeChange,
        MediaEvent::Ended,
    ];

    /// DOM event type name
    pub fn name(self) -> &'static str {
        match self {
            MediaEvent::Play => "play",
            MediaEvent::Pause => "pause",
            MediaEvent::Ended => "ended",
            MediaEvent::VolumeChange => "volumechange",
            MediaEvent::Click => "click",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|event| event.name() == name)
    }
}

/// Who asked for playback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOrigin {
    /// Click on the video surface
    VideoClick,
    /// Click on a banner
    BannerClick,
    /// Position restore after a source swap
    SourceRestore,
    /// Retry from a user gesture while recovery is armed
    Recovery,
}

/// Everything the controller can be asked to handle
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    Media(MediaEvent),
    BannerClick(Banner),
    Deferred(DeferredAction),
    /// Asynchronous rejection of an earlier play request
    PlayRejected { origin: PlayOrigin, reason: String },
    /// Page-level click / touch / key press
    UserGesture,
    /// New source finished loading metadata
    SourceReady { resume_at: f64, resume_playback: bool },
}

impl From<MediaEvent> for PlayerEvent {
    fn from(event: MediaEvent) -> Self {
        PlayerEvent::Media(event)
    }
}

/// Propagation control for click events
pub trait Propagation {
    fn stop_propagation(&mut self);
}

/// Click event model
#[derive(Debug, Clone, Default)]
pub struct ClickEvent {
    pub bubbles: bool,
    pub timestamp: f64,
    propagation_stopped: bool,
}

impl ClickEvent {
    pub fn new() -> Self {
        Self {
            bubbles: true,
            timestamp: 0.0,
            propagation_stopped: false,
        }
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

impl Propagation for ClickEvent {
    fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        for event in MediaEvent::ALL {
            assert_eq!(MediaEvent::from_name(event.name()), Some(event));
        }
        assert_eq!(MediaEvent::from_name("timeupdate"), None);
    }

    #[test]
    fn test_click_stop_propagation() {
        let mut click = ClickEvent::new();
        assert!(!click.is_propagation_stopped());

        click.stop_propagation();
        assert!(click.is_propagation_stopped());
    }
}
