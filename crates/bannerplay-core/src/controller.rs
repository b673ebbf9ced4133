//! Playback State Controller
//!
//! Keeps banner visibility and playback in sync with media events and user
//! clicks. The first click on the video unmutes and restarts it; later
//! clicks toggle play/pause.
//!
//! Handlers are plain methods so each can be driven on its own; the
//! `MEDIA_HANDLERS` and `BANNER_ACTIONS` tables map typed events to them and
//! are what the DOM bindings iterate over.

use crate::autoplay::AutoplayRecovery;
use crate::banner::{Banner, BannerDisplay, BannerSet};
use crate::config::PlayerConfig;
use crate::deferred::DeferredAction;
use crate::event::{ClickEvent, MediaEvent, PlayOrigin, PlayerEvent, Propagation};
use crate::media::MediaSurface;
use crate::page::Page;
use crate::PlayError;

/// Whether the viewer has clicked the video yet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClickPhase {
    #[default]
    AwaitingFirstClick,
    Interacted,
}

impl ClickPhase {
    pub fn is_first_click(self) -> bool {
        self == ClickPhase::AwaitingFirstClick
    }
}

/// Handler signature used by the dispatch tables
pub type Handler<M, B, P> = fn(&mut PlaybackController<M, B, P>);

/// Playback state controller for one video element
#[derive(Debug)]
pub struct PlaybackController<M: MediaSurface, B: BannerDisplay, P: Page> {
    surface: M,
    banners: BannerSet<B>,
    page: P,
    config: PlayerConfig,
    phase: ClickPhase,
    recovery: AutoplayRecovery,
}

impl<M: MediaSurface, B: BannerDisplay, P: Page> PlaybackController<M, B, P> {
    /// Media event dispatch table
    pub const MEDIA_HANDLERS: [(MediaEvent, Handler<M, B, P>); 5] = [
        (MediaEvent::Click, Self::on_click),
        (MediaEvent::Pause, Self::on_pause),
        (MediaEvent::Play, Self::on_play),
        (MediaEvent::VolumeChange, Self::on_volume_change),
        (MediaEvent::Ended, Self::on_ended),
    ];

    /// Banner click actions
    pub const BANNER_ACTIONS: [(Banner, Handler<M, B, P>); 3] = [
        (Banner::Muted, Self::muted_banner_action),
        (Banner::Paused, Self::paused_banner_action),
        (Banner::Ended, Self::ended_banner_action),
    ];

    pub fn new(surface: M, display: B, page: P, config: PlayerConfig) -> Self {
        Self {
            surface,
            banners: BannerSet::new(display),
            page,
            config,
            phase: ClickPhase::default(),
            recovery: AutoplayRecovery::new(),
        }
    }

    /// Startup: a muted video gets its banner once layout has settled
    pub fn start(&mut self) {
        if self.surface.muted() {
            tracing::debug!(
                delay_ms = self.config.muted_banner_delay_ms,
                "muted start, deferring muted banner"
            );
            self.page
                .defer(self.config.muted_banner_delay(), DeferredAction::ShowMutedBanner);
        }
    }

    pub fn media_handler(event: MediaEvent) -> Option<Handler<M, B, P>> {
        Self::MEDIA_HANDLERS
            .iter()
            .find(|(kind, _)| *kind == event)
            .map(|(_, handler)| *handler)
    }

    pub fn banner_action(banner: Banner) -> Option<Handler<M, B, P>> {
        Self::BANNER_ACTIONS
            .iter()
            .find(|(kind, _)| *kind == banner)
            .map(|(_, handler)| *handler)
    }

    /// Route any player event to its handler
    pub fn dispatch(&mut self, event: PlayerEvent) {
        match event {
            PlayerEvent::Media(event) => {
                if let Some(handler) = Self::media_handler(event) {
                    handler(self);
                }
            }
            PlayerEvent::BannerClick(banner) => {
                self.on_banner_click(banner, &mut ClickEvent::new());
            }
            PlayerEvent::Deferred(action) => self.run_deferred(action),
            PlayerEvent::PlayRejected { origin, reason } => {
                self.handle_rejection(origin, &PlayError::Rejected(reason));
            }
            PlayerEvent::UserGesture => self.on_user_gesture(),
            PlayerEvent::SourceReady { resume_at, resume_playback } => {
                self.on_source_ready(resume_at, resume_playback);
            }
        }
    }

    // ------------------------------------------------------------------
    // Video clicks
    // ------------------------------------------------------------------

    pub fn on_click(&mut self) {
        if self.phase.is_first_click() {
            self.on_first_click();
        } else {
            self.on_subsequent_click();
        }
    }

    /// Restart from the top with sound
    pub fn on_first_click(&mut self) {
        self.restart_with_sound();
        tracing::debug!("first click: restarted with sound");
        self.request_play(PlayOrigin::VideoClick);
    }

    pub fn on_subsequent_click(&mut self) {
        if self.surface.paused() {
            self.request_play(PlayOrigin::VideoClick);
        } else {
            self.surface.pause();
        }
    }

    // ------------------------------------------------------------------
    // Media events
    // ------------------------------------------------------------------

    pub fn on_pause(&mut self) {
        self.center();
        if !self.surface.ended()
            && self.surface.current_time() > self.config.pause_banner_threshold_secs
        {
            self.banners.show(Banner::Paused);
        }
    }

    pub fn on_play(&mut self) {
        if self.recovery.disarm() {
            tracing::info!("playback resumed, autoplay recovery disarmed");
            self.page.watch_gestures(false);
        }
        if !self.phase.is_first_click() && !self.surface.muted() {
            self.center();
        }
        self.banners.hide_all();
    }

    pub fn on_volume_change(&mut self) {
        if self.surface.muted() {
            if self.surface.is_playing() {
                self.banners.show(Banner::Muted);
            }
        } else {
            self.banners.hide(Banner::Muted);
        }
    }

    pub fn on_ended(&mut self) {
        self.banners.show(Banner::Ended);
    }

    // ------------------------------------------------------------------
    // Banners
    // ------------------------------------------------------------------

    /// Banner click: keep the click away from the video, run the banner's
    /// action, then clear every banner
    pub fn on_banner_click<E: Propagation + ?Sized>(&mut self, banner: Banner, event: &mut E) {
        event.stop_propagation();
        if let Some(action) = Self::banner_action(banner) {
            tracing::debug!(%banner, "banner clicked");
            action(self);
        }
        self.banners.hide_all();
    }

    fn muted_banner_action(&mut self) {
        self.restart_with_sound();
        self.request_play(PlayOrigin::BannerClick);
    }

    fn paused_banner_action(&mut self) {
        self.request_play(PlayOrigin::BannerClick);
    }

    fn ended_banner_action(&mut self) {
        self.surface.set_current_time(0.0);
        self.request_play(PlayOrigin::BannerClick);
    }

    // ------------------------------------------------------------------
    // Deferred actions, recovery, source swaps
    // ------------------------------------------------------------------

    pub fn run_deferred(&mut self, action: DeferredAction) {
        match action {
            DeferredAction::ShowMutedBanner => self.banners.show(Banner::Muted),
        }
    }

    pub fn on_user_gesture(&mut self) {
        if self.recovery.record_attempt() {
            tracing::debug!(attempt = self.recovery.attempts(), "retrying playback after gesture");
            self.request_play(PlayOrigin::Recovery);
        }
    }

    /// A new source has metadata: restore the position, and playback if
    /// requested. Click phase and banners are left alone.
    pub fn on_source_ready(&mut self, resume_at: f64, resume_playback: bool) {
        self.surface.set_current_time(resume_at);
        if resume_playback {
            self.request_play(PlayOrigin::SourceRestore);
        }
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    fn restart_with_sound(&mut self) {
        self.surface.set_current_time(0.0);
        self.surface.set_muted(false);
        self.phase = ClickPhase::Interacted;
        self.center();
    }

    /// Scroll the container into view, except during silent playback after
    /// the first interaction
    fn center(&mut self) {
        if self.surface.muted() && !self.surface.paused() && !self.phase.is_first_click() {
            return;
        }
        self.page.scroll_into_view(&self.config.scroll);
    }

    /// Single call site for playback requests
    fn request_play(&mut self, origin: PlayOrigin) {
        if let Err(err) = self.surface.play(origin) {
            self.handle_rejection(origin, &err);
        }
    }

    fn handle_rejection(&mut self, origin: PlayOrigin, err: &PlayError) {
        tracing::warn!(?origin, "playback request failed: {}", err);
        if origin == PlayOrigin::SourceRestore && self.recovery.arm() {
            tracing::info!("autoplay blocked, waiting for a user gesture");
            self.page.watch_gestures(true);
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn phase(&self) -> ClickPhase {
        self.phase
    }

    pub fn is_first_click(&self) -> bool {
        self.phase.is_first_click()
    }

    pub fn active_banner(&self) -> Option<Banner> {
        self.banners.active()
    }

    pub fn banners(&self) -> &BannerSet<B> {
        &self.banners
    }

    /// Hide every banner
    pub fn hide_banners(&mut self) {
        self.banners.hide_all();
    }

    pub fn recovery(&self) -> &AutoplayRecovery {
        &self.recovery
    }

    pub fn surface(&self) -> &M {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut M {
        &mut self.surface
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }
}
