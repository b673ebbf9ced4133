//! Media Surface
//!
//! The subset of `HTMLMediaElement` the controller reads and drives.

use crate::event::PlayOrigin;
use crate::PlayError;

/// A video element as seen by the controller
pub trait MediaSurface {
    fn paused(&self) -> bool;
    fn muted(&self) -> bool;
    fn ended(&self) -> bool;
    fn current_time(&self) -> f64;
    /// Media duration in seconds, NaN while unknown
    fn duration(&self) -> f64;

    fn set_muted(&mut self, muted: bool);
    fn set_current_time(&mut self, time: f64);
    fn pause(&mut self);

    /// Request playback
    ///
    /// `Ok` means the request was issued. Implementations backed by a
    /// promise report a later rejection as `PlayerEvent::PlayRejected`
    /// carrying the same `origin`.
    fn play(&mut self, origin: PlayOrigin) -> Result<(), PlayError>;

    /// Playing means not paused and not ended
    fn is_playing(&self) -> bool {
        !self.paused() && !self.ended()
    }
}
