//! Browser implementations of the controller seams
//!
//! Every callback holds a [`Weak`] handle to the controller and goes through
//! [`with_controller`], so listeners never keep a torn-down player alive and
//! never re-enter a controller that is already borrowed.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use bannerplay_core::{
    Banner, BannerDisplay, DeferredAction, MediaSurface, Page, PlayError, PlayOrigin,
    PlaybackController, PlayerEvent, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Element, Event, HtmlElement, HtmlVideoElement, Window};

pub type WebController = PlaybackController<WebSurface, WebBanners, WebPage>;
pub type SharedController = Rc<RefCell<WebController>>;
pub type WeakController = Weak<RefCell<WebController>>;

/// Events that count as a user gesture for autoplay recovery
pub const GESTURE_EVENTS: [&str; 3] = ["click", "touchstart", "keydown"];

/// Run `f` against the controller if it is still alive and free
pub fn with_controller<R>(controller: &WeakController, f: impl FnOnce(&mut WebController) -> R) -> Option<R> {
    let controller = controller.upgrade()?;
    let result = match controller.try_borrow_mut() {
        Ok(mut controller) => Some(f(&mut controller)),
        Err(_) => {
            tracing::debug!("controller busy, event dropped");
            None
        }
    };
    result
}

/// Human-readable reason from a rejected `play()` promise
pub fn describe_rejection(value: &JsValue) -> String {
    match value.dyn_ref::<js_sys::Error>() {
        Some(error) => format!("{}: {}", String::from(error.name()), String::from(error.message())),
        None => format!("{:?}", value),
    }
}

// ============================================================================
// MEDIA
// ============================================================================

/// `MediaSurface` over an `HTMLVideoElement`
pub struct WebSurface {
    video: HtmlVideoElement,
    controller: WeakController,
}

impl WebSurface {
    pub fn new(video: HtmlVideoElement, controller: WeakController) -> Self {
        Self { video, controller }
    }

    pub fn video(&self) -> &HtmlVideoElement {
        &self.video
    }
}

impl MediaSurface for WebSurface {
    fn paused(&self) -> bool {
        self.video.paused()
    }

    fn muted(&self) -> bool {
        self.video.muted()
    }

    fn ended(&self) -> bool {
        self.video.ended()
    }

    fn current_time(&self) -> f64 {
        self.video.current_time()
    }

    fn duration(&self) -> f64 {
        self.video.duration()
    }

    fn set_muted(&mut self, muted: bool) {
        self.video.set_muted(muted);
    }

    fn set_current_time(&mut self, time: f64) {
        self.video.set_current_time(time);
    }

    fn pause(&mut self) {
        if let Err(e) = self.video.pause() {
            tracing::warn!("pause failed: {:?}", e);
        }
    }

    /// Starts playback; a rejection arrives later as
    /// [`PlayerEvent::PlayRejected`]
    fn play(&mut self, origin: PlayOrigin) -> Result<(), PlayError> {
        let promise = self
            .video
            .play()
            .map_err(|e| PlayError::Rejected(describe_rejection(&e)))?;

        let controller = self.controller.clone();
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(err) = JsFuture::from(promise).await {
                let reason = describe_rejection(&err);
                with_controller(&controller, |c| {
                    c.dispatch(PlayerEvent::PlayRejected { origin, reason })
                });
            }
        });
        Ok(())
    }
}

// ============================================================================
// BANNERS
// ============================================================================

/// Banner overlays toggled through `style.display`
pub struct WebBanners {
    elements: [HtmlElement; 3],
}

impl WebBanners {
    /// `elements` is indexed like [`Banner::ALL`]
    pub fn new(elements: [HtmlElement; 3]) -> Self {
        Self { elements }
    }

    pub fn element(&self, banner: Banner) -> &HtmlElement {
        let index = Banner::ALL.iter().position(|b| *b == banner).unwrap_or(0);
        &self.elements[index]
    }
}

impl BannerDisplay for WebBanners {
    fn set_visible(&mut self, banner: Banner, visible: bool) {
        let display = if visible { "block" } else { "none" };
        if let Err(e) = self.element(banner).style().set_property("display", display) {
            tracing::warn!(%banner, "failed to set display: {:?}", e);
        }
    }
}

// ============================================================================
// PAGE
// ============================================================================

/// Scrolling, timers and gesture listeners
pub struct WebPage {
    window: Window,
    document: Document,
    container: Element,
    controller: WeakController,
    gesture_listener: Option<Closure<dyn FnMut(Event)>>,
}

impl WebPage {
    pub fn new(window: Window, document: Document, container: Element, controller: WeakController) -> Self {
        Self {
            window,
            document,
            container,
            controller,
            gesture_listener: None,
        }
    }

    pub fn watching_gestures(&self) -> bool {
        self.gesture_listener.is_some()
    }

    fn add_gesture_listeners(&mut self) {
        let controller = self.controller.clone();
        let listener = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            with_controller(&controller, |c| c.dispatch(PlayerEvent::UserGesture));
        });

        for name in GESTURE_EVENTS {
            if let Err(e) = self
                .document
                .add_event_listener_with_callback(name, listener.as_ref().unchecked_ref())
            {
                tracing::warn!(event = name, "failed to add gesture listener: {:?}", e);
            }
        }
        self.gesture_listener = Some(listener);
    }

    fn remove_gesture_listeners(&mut self) {
        let Some(listener) = self.gesture_listener.take() else {
            return;
        };
        for name in GESTURE_EVENTS {
            let _ = self
                .document
                .remove_event_listener_with_callback(name, listener.as_ref().unchecked_ref());
        }
    }
}

impl Page for WebPage {
    fn scroll_into_view(&mut self, options: &ScrollIntoViewOptions) {
        let dom_options = web_sys::ScrollIntoViewOptions::new();
        dom_options.set_behavior(match options.behavior {
            ScrollBehavior::Auto => web_sys::ScrollBehavior::Auto,
            ScrollBehavior::Instant => web_sys::ScrollBehavior::Instant,
            ScrollBehavior::Smooth => web_sys::ScrollBehavior::Smooth,
        });
        dom_options.set_block(match options.block {
            ScrollLogicalPosition::Start => web_sys::ScrollLogicalPosition::Start,
            ScrollLogicalPosition::Center => web_sys::ScrollLogicalPosition::Center,
            ScrollLogicalPosition::End => web_sys::ScrollLogicalPosition::End,
            ScrollLogicalPosition::Nearest => web_sys::ScrollLogicalPosition::Nearest,
        });
        self.container
            .scroll_into_view_with_scroll_into_view_options(&dom_options);
    }

    fn defer(&mut self, delay: Duration, action: DeferredAction) {
        let controller = self.controller.clone();
        let callback = Closure::once_into_js(move || {
            with_controller(&controller, |c| c.dispatch(PlayerEvent::Deferred(action)));
        });
        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);

        if let Err(e) = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), millis)
        {
            tracing::warn!(?action, "failed to schedule timer: {:?}", e);
        }
    }

    fn watch_gestures(&mut self, enabled: bool) {
        match (enabled, self.gesture_listener.is_some()) {
            (true, false) => self.add_gesture_listeners(),
            (false, true) => self.remove_gesture_listeners(),
            _ => {}
        }
    }
}

impl Drop for WebPage {
    fn drop(&mut self) {
        self.remove_gesture_listeners();
    }
}
