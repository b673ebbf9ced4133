//! Mounting the controller on the page
//!
//! One player per page. Media and banner listeners live as long as the page
//! and are leaked with `Closure::forget`; the gesture listeners are owned by
//! [`WebPage`] and removed once playback recovers.

use std::cell::RefCell;
use std::rc::Rc;

use bannerplay_core::{Banner, PlaybackController, PlayerError, Propagation};
use bannerplay_source::{SourceSelector, SourceSwap};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AddEventListenerOptions, Document, Event, EventTarget, HtmlElement, HtmlVideoElement, Window};

use crate::dom::{self, PlayerElements, VideoHost};
use crate::logging;
use crate::settings::{PageSettings, SETTINGS_ELEMENT_ID};
use crate::surface::{
    describe_rejection, with_controller, SharedController, WeakController, WebBanners, WebController, WebPage,
    WebSurface,
};

struct Mounted {
    controller: SharedController,
    selector: Rc<RefCell<SourceSelector>>,
    video_id: String,
}

thread_local! {
    static MOUNTED: RefCell<Option<Mounted>> = const { RefCell::new(None) };
}

/// DOM event wrapper so banner clicks can stop bubbling to the video
struct DomEvent<'a>(&'a Event);

impl Propagation for DomEvent<'_> {
    fn stop_propagation(&mut self) {
        self.0.stop_propagation();
    }
}

fn window_and_document() -> Result<(Window, Document), PlayerError> {
    let window = web_sys::window().ok_or(PlayerError::NoWindow)?;
    let document = window.document().ok_or(PlayerError::NoWindow)?;
    Ok((window, document))
}

fn listen(target: &EventTarget, name: &str, listener: Closure<dyn FnMut(Event)>) -> Result<(), PlayerError> {
    target
        .add_event_listener_with_callback(name, listener.as_ref().unchecked_ref())
        .map_err(|e| PlayerError::Dom(format!("addEventListener({}): {:?}", name, e)))?;
    listener.forget();
    Ok(())
}

/// Mount once the document has parsed
pub fn mount_when_ready() {
    let document = match window_and_document() {
        Ok((_, document)) => document,
        Err(e) => {
            web_sys::console::error_1(&JsValue::from_str(&e.to_string()));
            return;
        }
    };

    if document.ready_state() != "loading" {
        activate();
        return;
    }

    let callback = Closure::once_into_js(activate);
    let options = AddEventListenerOptions::new();
    options.set_once(true);
    if let Err(e) = document.add_event_listener_with_callback_and_add_event_listener_options(
        "DOMContentLoaded",
        callback.unchecked_ref(),
        &options,
    ) {
        web_sys::console::error_1(&e);
    }
}

/// Read settings, install logging and mount; failures are logged
fn activate() {
    let embedded = window_and_document()
        .ok()
        .and_then(|(_, document)| dom::element_text(&document, SETTINGS_ELEMENT_ID));

    match PageSettings::from_embedded(embedded.as_deref()) {
        Ok(settings) => {
            logging::init(&settings.player.log_level);
            if let Err(e) = mount(settings) {
                tracing::error!("player not activated: {}", e);
            }
        }
        Err(e) => {
            logging::init("info");
            tracing::error!("player not activated: {}", e);
        }
    }
}

/// Locate the elements, wire every listener and start the controller
pub fn mount(settings: PageSettings) -> Result<(), PlayerError> {
    if MOUNTED.with(|mounted| mounted.borrow().is_some()) {
        return Err(PlayerError::AlreadyMounted);
    }

    let (window, document) = window_and_document()?;
    let PageSettings { player: config, sources } = settings;
    let elements = PlayerElements::locate(&document, &config.elements)?;

    elements
        .video
        .style()
        .set_property("cursor", &config.video_cursor)
        .map_err(|e| PlayerError::Dom(format!("{:?}", e)))?;

    let video_id = config.elements.video.clone();
    let PlayerElements { video, container, banners } = elements;

    let controller: SharedController = Rc::new_cyclic(|weak: &WeakController| {
        RefCell::new(PlaybackController::new(
            WebSurface::new(video.clone(), weak.clone()),
            WebBanners::new(banners.clone()),
            WebPage::new(window.clone(), document.clone(), container, weak.clone()),
            config,
        ))
    });

    bind_media_events(&video, &controller)?;
    bind_banner_clicks(&banners, &controller)?;
    controller.borrow_mut().start();

    let selector = Rc::new(RefCell::new(SourceSelector::new(sources)));
    let restore = Restore::Controller(Rc::downgrade(&controller));
    refresh_source(&window, &document, &video, &selector, restore.clone());
    bind_layout_changes(&window, &document, &video, &selector, restore)?;

    tracing::info!(video = %video_id, "player mounted");
    MOUNTED.with(|mounted| {
        *mounted.borrow_mut() = Some(Mounted {
            controller,
            selector,
            video_id,
        })
    });
    Ok(())
}

fn bind_media_events(video: &HtmlVideoElement, controller: &SharedController) -> Result<(), PlayerError> {
    for (event, handler) in WebController::MEDIA_HANDLERS {
        let weak = Rc::downgrade(controller);
        let listener = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            with_controller(&weak, |c| handler(c));
        });
        listen(video, event.name(), listener)?;
    }
    Ok(())
}

fn bind_banner_clicks(banners: &[HtmlElement; 3], controller: &SharedController) -> Result<(), PlayerError> {
    for (banner, element) in Banner::ALL.into_iter().zip(banners) {
        let weak = Rc::downgrade(controller);
        let listener = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let mut dom_event = DomEvent(&event);
            if with_controller(&weak, |c| c.on_banner_click(banner, &mut dom_event)).is_none() {
                dom_event.stop_propagation();
            }
        });
        listen(element, "click", listener)?;
    }
    Ok(())
}

// ============================================================================
// SOURCE SELECTION
// ============================================================================

/// Where the post-swap restore goes
#[derive(Clone)]
enum Restore {
    Controller(WeakController),
    /// No mounted player: seek and play the element directly
    Element,
}

fn refresh_source(
    window: &Window,
    document: &Document,
    video: &HtmlVideoElement,
    selector: &RefCell<SourceSelector>,
    restore: Restore,
) {
    let signals = dom::device_signals(window);
    let mut host = VideoHost { document, video };

    let swap = match selector.borrow_mut().select_source(&mut host, &signals) {
        Ok(Some(swap)) => swap,
        Ok(None) => return,
        Err(e) => {
            tracing::error!("source selection failed: {}", e);
            return;
        }
    };

    let element = video.clone();
    let callback = Closure::once_into_js(move || restore_after_load(&element, &swap, restore));
    let options = AddEventListenerOptions::new();
    options.set_once(true);
    if let Err(e) = video.add_event_listener_with_callback_and_add_event_listener_options(
        "loadedmetadata",
        callback.unchecked_ref(),
        &options,
    ) {
        tracing::warn!("failed to watch loadedmetadata: {:?}", e);
    }
}

fn restore_after_load(video: &HtmlVideoElement, swap: &SourceSwap, restore: Restore) {
    let event = swap.restore_event(video.duration());

    match restore {
        Restore::Controller(controller) => {
            with_controller(&controller, |c| c.dispatch(event));
        }
        Restore::Element => {
            video.set_current_time(swap.resume_at(video.duration()));
            if !swap.resume_playback() {
                return;
            }
            match video.play() {
                Ok(promise) => wasm_bindgen_futures::spawn_local(async move {
                    if let Err(err) = JsFuture::from(promise).await {
                        tracing::warn!("autoplay blocked: {}", describe_rejection(&err));
                    }
                }),
                Err(e) => tracing::warn!("play failed: {}", describe_rejection(&e)),
            }
        }
    }
}

fn bind_layout_changes(
    window: &Window,
    document: &Document,
    video: &HtmlVideoElement,
    selector: &Rc<RefCell<SourceSelector>>,
    restore: Restore,
) -> Result<(), PlayerError> {
    let make_listener = || {
        let (window, document, video) = (window.clone(), document.clone(), video.clone());
        let selector = Rc::clone(selector);
        let restore = restore.clone();
        Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            refresh_source(&window, &document, &video, &selector, restore.clone());
        })
    };

    listen(window, "resize", make_listener())?;
    match dom::screen_orientation(window) {
        Some(orientation) => listen(&orientation, "change", make_listener()),
        None => listen(window, "orientationchange", make_listener()),
    }
}

/// Re-run source selection for `element_id`
///
/// Uses the mounted player's selector when the id matches, so the swap
/// restore reaches the controller. Any other video is handled standalone.
pub fn select_source(element_id: &str) -> Result<(), PlayerError> {
    let (window, document) = window_and_document()?;
    let video = dom::find_video(&document, element_id)?;

    let mounted = MOUNTED.with(|mounted| {
        mounted
            .borrow()
            .as_ref()
            .filter(|m| m.video_id == element_id)
            .map(|m| (Rc::clone(&m.selector), Rc::downgrade(&m.controller)))
    });

    match mounted {
        Some((selector, controller)) => {
            refresh_source(&window, &document, &video, &selector, Restore::Controller(controller));
        }
        None => {
            let selector = RefCell::new(SourceSelector::default());
            refresh_source(&window, &document, &video, &selector, Restore::Element);
        }
    }
    Ok(())
}

/// Whether a player is mounted on this page
pub fn is_mounted() -> bool {
    MOUNTED.with(|mounted| mounted.borrow().is_some())
}

/// Mounted controller's playback state, for tests and devtools
pub fn with_mounted<R>(f: impl FnOnce(&WebController) -> R) -> Option<R> {
    MOUNTED.with(|mounted| {
        let mounted = mounted.borrow();
        let controller = mounted.as_ref()?.controller.try_borrow().ok()?;
        Some(f(&controller))
    })
}
