//! Headless Backend
//!
//! In-memory media element, banner display and page. Used to drive the
//! controller without a browser: events the element would fire are queued
//! and pumped back into the controller in order, like the browser's task
//! queue does.

use std::collections::VecDeque;
use std::time::Duration;

use crate::banner::{Banner, BannerDisplay};
use crate::config::PlayerConfig;
use crate::controller::PlaybackController;
use crate::deferred::{DeferredAction, DeferredQueue};
use crate::event::{ClickEvent, MediaEvent, PlayOrigin, PlayerEvent};
use crate::media::MediaSurface;
use crate::page::{Page, ScrollIntoViewOptions};
use crate::PlayError;

/// Autoplay policy applied by [`MediaElement::play`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AutoplayPolicy {
    /// Any play request succeeds
    Allowed,
    /// Muted playback is allowed, audible playback needs a user gesture
    #[default]
    MutedOnly,
    /// Every play request needs a user gesture
    GestureRequired,
}

/// Media element model
#[derive(Debug)]
pub struct MediaElement {
    /// Current source URL
    pub src: String,
    pub policy: AutoplayPolicy,

    current_time: f64,
    duration: f64,
    paused: bool,
    ended: bool,
    muted: bool,
    user_activated: bool,

    pending_events: VecDeque<MediaEvent>,
    play_requests: u32,
    rejections: u32,
}

impl MediaElement {
    /// Element without metadata (duration unknown)
    pub fn new() -> Self {
        Self {
            src: String::new(),
            policy: AutoplayPolicy::default(),
            current_time: 0.0,
            duration: f64::NAN,
            paused: true,
            ended: false,
            muted: false,
            user_activated: false,
            pending_events: VecDeque::new(),
            play_requests: 0,
            rejections: 0,
        }
    }

    /// Element with loaded metadata
    pub fn with_duration(duration: f64) -> Self {
        let mut element = Self::new();
        element.duration = duration;
        element
    }

    /// Start muted, as the `muted` content attribute does (no event fired)
    pub fn with_muted(mut self) -> Self {
        self.muted = true;
        self
    }

    /// Reset for a new source, as `HTMLMediaElement.load()` does
    pub fn load(&mut self) {
        self.duration = f64::NAN;
        self.current_time = 0.0;
        self.ended = false;
        self.paused = true;
    }

    /// Metadata for the current source arrived
    pub fn on_metadata_loaded(&mut self, duration: f64) {
        self.duration = duration;
    }

    /// Sticky user activation, granted by any click / key press
    pub fn activate_user_gesture(&mut self) {
        self.user_activated = true;
    }

    /// Advance playback by `elapsed`. Reaching the end pauses the element and
    /// fires `pause` then `ended`.
    pub fn tick(&mut self, elapsed: Duration) {
        if !self.is_playing() || self.duration.is_nan() {
            return;
        }
        self.current_time += elapsed.as_secs_f64();
        if self.current_time >= self.duration {
            self.current_time = self.duration;
            self.paused = true;
            self.ended = true;
            self.pending_events.push_back(MediaEvent::Pause);
            self.pending_events.push_back(MediaEvent::Ended);
        }
    }

    /// Set the position without clamping or events
    pub fn force_time(&mut self, time: f64) {
        self.current_time = time;
    }

    pub fn force_ended(&mut self, ended: bool) {
        self.ended = ended;
    }

    /// Drain events fired since the last call
    pub fn take_events(&mut self) -> Vec<MediaEvent> {
        self.pending_events.drain(..).collect()
    }

    /// Number of `play()` calls, rejected ones included
    pub fn play_requests(&self) -> u32 {
        self.play_requests
    }

    pub fn rejections(&self) -> u32 {
        self.rejections
    }

    fn reject(&mut self, err: PlayError) -> Result<(), PlayError> {
        self.rejections += 1;
        Err(err)
    }
}

impl Default for MediaElement {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaSurface for MediaElement {
    fn paused(&self) -> bool {
        self.paused
    }

    fn muted(&self) -> bool {
        self.muted
    }

    fn ended(&self) -> bool {
        self.ended
    }

    fn current_time(&self) -> f64 {
        self.current_time
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn set_muted(&mut self, muted: bool) {
        if self.muted != muted {
            self.muted = muted;
            self.pending_events.push_back(MediaEvent::VolumeChange);
        }
    }

    fn set_current_time(&mut self, time: f64) {
        let time = if self.duration.is_nan() {
            time.max(0.0)
        } else {
            time.clamp(0.0, self.duration)
        };
        self.current_time = time;
        if self.duration.is_nan() || time < self.duration {
            self.ended = false;
        }
    }

    fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            self.pending_events.push_back(MediaEvent::Pause);
        }
    }

    fn play(&mut self, _origin: PlayOrigin) -> Result<(), PlayError> {
        self.play_requests += 1;

        if self.duration.is_nan() {
            return self.reject(PlayError::NotReady);
        }

        let allowed = match self.policy {
            AutoplayPolicy::Allowed => true,
            AutoplayPolicy::MutedOnly => self.muted || self.user_activated,
            AutoplayPolicy::GestureRequired => self.user_activated,
        };
        if !allowed {
            return self.reject(PlayError::NotAllowed(
                "play() can only be initiated by a user gesture".into(),
            ));
        }

        if self.ended {
            self.current_time = 0.0;
            self.ended = false;
        }
        if self.paused {
            self.paused = false;
            self.pending_events.push_back(MediaEvent::Play);
        }
        Ok(())
    }
}

/// Banner display that records visibility like element styles would
#[derive(Debug, Default)]
pub struct HeadlessBanners {
    shown: [bool; 3],
}

impl HeadlessBanners {
    fn slot(banner: Banner) -> usize {
        match banner {
            Banner::Muted => 0,
            Banner::Paused => 1,
            Banner::Ended => 2,
        }
    }

    pub fn is_shown(&self, banner: Banner) -> bool {
        self.shown[Self::slot(banner)]
    }

    /// Banners currently rendered visible
    pub fn visible(&self) -> Vec<Banner> {
        Banner::ALL
            .into_iter()
            .filter(|banner| self.is_shown(*banner))
            .collect()
    }
}

impl BannerDisplay for HeadlessBanners {
    fn set_visible(&mut self, banner: Banner, visible: bool) {
        self.shown[Self::slot(banner)] = visible;
    }
}

/// Page with a virtual clock
#[derive(Debug, Default)]
pub struct HeadlessPage {
    deferred: DeferredQueue,
    scroll_count: u32,
    last_scroll: Option<ScrollIntoViewOptions>,
    watching_gestures: bool,
    gesture_registrations: u32,
}

impl HeadlessPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deferred(&self) -> &DeferredQueue {
        &self.deferred
    }

    /// Advance the clock and return the actions that became due
    pub fn advance(&mut self, elapsed: Duration) -> Vec<DeferredAction> {
        self.deferred.advance(elapsed)
    }

    /// Times the container was scrolled into view
    pub fn scroll_count(&self) -> u32 {
        self.scroll_count
    }

    pub fn last_scroll(&self) -> Option<ScrollIntoViewOptions> {
        self.last_scroll
    }

    pub fn watching_gestures(&self) -> bool {
        self.watching_gestures
    }

    /// Times gesture listeners were registered
    pub fn gesture_registrations(&self) -> u32 {
        self.gesture_registrations
    }
}

impl Page for HeadlessPage {
    fn scroll_into_view(&mut self, options: &ScrollIntoViewOptions) {
        self.scroll_count += 1;
        self.last_scroll = Some(*options);
    }

    fn defer(&mut self, delay: Duration, action: DeferredAction) {
        self.deferred.schedule(action, delay);
    }

    fn watch_gestures(&mut self, enabled: bool) {
        if enabled && !self.watching_gestures {
            self.gesture_registrations += 1;
        }
        self.watching_gestures = enabled;
    }
}

/// Controller wired to the headless backend
pub type HeadlessPlayer = PlaybackController<MediaElement, HeadlessBanners, HeadlessPage>;

impl PlaybackController<MediaElement, HeadlessBanners, HeadlessPage> {
    /// Controller over a 60 second headless video
    pub fn headless(config: PlayerConfig) -> Self {
        Self::new(
            MediaElement::with_duration(60.0),
            HeadlessBanners::default(),
            HeadlessPage::new(),
            config,
        )
    }

    /// Deliver queued media events until the element is quiet
    pub fn pump(&mut self) {
        loop {
            let events = self.surface_mut().take_events();
            if events.is_empty() {
                break;
            }
            for event in events {
                self.dispatch(PlayerEvent::Media(event));
            }
        }
    }

    /// Let `elapsed` pass: playback advances, then due deferred actions run
    pub fn advance(&mut self, elapsed: Duration) {
        self.surface_mut().tick(elapsed);
        self.pump();

        for action in self.page_mut().advance(elapsed) {
            self.dispatch(PlayerEvent::Deferred(action));
        }
        self.pump();
    }

    /// User click on the video
    pub fn click(&mut self) {
        self.surface_mut().activate_user_gesture();
        self.dispatch(PlayerEvent::Media(MediaEvent::Click));
        self.pump();
    }

    /// User click on a banner; returns the click so propagation can be checked
    pub fn click_banner(&mut self, banner: Banner) -> ClickEvent {
        let mut click = ClickEvent::new();
        self.surface_mut().activate_user_gesture();
        self.on_banner_click(banner, &mut click);
        self.pump();
        click
    }

    /// Page-level gesture (click elsewhere, key press, touch)
    pub fn gesture(&mut self) {
        self.surface_mut().activate_user_gesture();
        self.dispatch(PlayerEvent::UserGesture);
        self.pump();
    }
}
