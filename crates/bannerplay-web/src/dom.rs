//! DOM lookups and the `<source>` host

use bannerplay_core::{Banner, ElementIds, PlayerError};
use bannerplay_source::{DeviceSignals, ScreenSignals, SourceError, SourceHost, VideoSource};
use js_sys::Reflect;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, EventTarget, HtmlElement, HtmlSourceElement, HtmlVideoElement, Window};

/// Elements the controller drives
pub struct PlayerElements {
    pub video: HtmlVideoElement,
    pub container: Element,
    /// Indexed like [`Banner::ALL`]
    pub banners: [HtmlElement; 3],
}

impl PlayerElements {
    pub fn locate(document: &Document, ids: &ElementIds) -> Result<Self, PlayerError> {
        let video = find_video(document, &ids.video)?;

        let container = document
            .query_selector(&ids.container)
            .map_err(|e| PlayerError::Dom(format!("{}: {:?}", ids.container, e)))?
            .ok_or_else(|| PlayerError::MissingElement(ids.container.clone()))?;

        let [muted, paused, ended] = Banner::ALL.map(|banner| find_html(document, ids.banner(banner)));

        Ok(Self {
            video,
            container,
            banners: [muted?, paused?, ended?],
        })
    }
}

pub fn find_video(document: &Document, id: &str) -> Result<HtmlVideoElement, PlayerError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| PlayerError::MissingElement(id.to_string()))?
        .dyn_into::<HtmlVideoElement>()
        .map_err(|_| PlayerError::WrongElementType {
            id: id.to_string(),
            expected: "video element",
        })
}

fn find_html(document: &Document, id: &str) -> Result<HtmlElement, PlayerError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| PlayerError::MissingElement(id.to_string()))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| PlayerError::WrongElementType {
            id: id.to_string(),
            expected: "HTML element",
        })
}

/// Text of an optional element, used for the embedded settings block
pub fn element_text(document: &Document, id: &str) -> Option<String> {
    document.get_element_by_id(id).and_then(|element| element.text_content())
}

/// `screen.orientation` when the browser exposes it
pub fn screen_orientation(window: &Window) -> Option<EventTarget> {
    let screen = window.screen().ok()?;
    let orientation = Reflect::get(&screen, &JsValue::from_str("orientation")).ok()?;
    if orientation.is_undefined() || orientation.is_null() {
        return None;
    }
    orientation.dyn_into::<EventTarget>().ok()
}

/// Snapshot user agent and screen shape
pub fn device_signals(window: &Window) -> DeviceSignals {
    let orientation_type = screen_orientation(window)
        .and_then(|orientation| Reflect::get(&orientation, &JsValue::from_str("type")).ok())
        .and_then(|value| value.as_string());

    DeviceSignals {
        user_agent: window.navigator().user_agent().unwrap_or_default(),
        screen: ScreenSignals {
            orientation_type,
            inner_width: window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0),
            inner_height: window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0),
        },
    }
}

/// Rewrites the `<source>` children of a video element
pub struct VideoHost<'a> {
    pub document: &'a Document,
    pub video: &'a HtmlVideoElement,
}

impl SourceHost for VideoHost<'_> {
    fn current_time(&self) -> f64 {
        self.video.current_time()
    }

    fn paused(&self) -> bool {
        self.video.paused()
    }

    fn replace_sources(&mut self, source: &VideoSource, fallback_text: &str) -> Result<(), SourceError> {
        self.video.set_inner_html("");

        let element = self
            .document
            .create_element("source")
            .map_err(host_error)?
            .dyn_into::<HtmlSourceElement>()
            .map_err(host_error)?;
        element.set_src(&source.src);
        element.set_type(&source.mime_type);
        element.set_class_name(&source.class_name);

        self.video.append_child(&element).map_err(host_error)?;
        self.video
            .append_child(&self.document.create_text_node(fallback_text))
            .map_err(host_error)?;
        Ok(())
    }

    fn load(&mut self) {
        self.video.load();
    }
}

fn host_error<E: std::fmt::Debug>(err: E) -> SourceError {
    SourceError::Host(format!("{:?}", err))
}
