//! Browser tests
//!
//! Run with `wasm-pack test --headless --firefox crates/bannerplay-web`.

#![cfg(target_arch = "wasm32")]

use bannerplay_core::{Banner, PlayerError};
use bannerplay_web::dom::{self, PlayerElements};
use bannerplay_web::mount;
use bannerplay_web::PageSettings;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn append(document: &Document, parent: &web_sys::Element, tag: &str, id: &str) -> HtmlElement {
    let element = document.create_element(tag).unwrap();
    element.set_id(id);
    parent.append_child(&element).unwrap();
    element.dyn_into::<HtmlElement>().unwrap()
}

/// Video, container and the three banners, with a per-test id prefix
fn build_player(document: &Document, prefix: &str) -> PageSettings {
    let body = document.body().unwrap();
    let container = append(document, &body, "div", &format!("{prefix}-container"));
    append(document, &container, "video", &format!("{prefix}-video"));
    for banner in Banner::ALL {
        append(document, &container, "div", &format!("{prefix}-{}", banner.key()));
    }

    let mut settings = PageSettings::default();
    let ids = &mut settings.player.elements;
    ids.video = format!("{prefix}-video");
    ids.container = format!("#{prefix}-container");
    ids.muted_banner = format!("{prefix}-muted");
    ids.paused_banner = format!("{prefix}-paused");
    ids.ended_banner = format!("{prefix}-ended");
    settings
}

#[wasm_bindgen_test]
fn locate_reports_missing_banner() {
    let document = document();
    let mut settings = build_player(&document, "missing");
    settings.player.elements.ended_banner = "missing-nowhere".into();

    let result = PlayerElements::locate(&document, &settings.player.elements);
    assert!(matches!(result, Err(PlayerError::MissingElement(id)) if id == "missing-nowhere"));
}

#[wasm_bindgen_test]
fn locate_rejects_non_video() {
    let document = document();
    let mut settings = build_player(&document, "wrongtype");
    settings.player.elements.video = "wrongtype-muted".into();

    let result = PlayerElements::locate(&document, &settings.player.elements);
    assert!(matches!(result, Err(PlayerError::WrongElementType { .. })));
}

#[wasm_bindgen_test]
fn mount_wires_player_once() {
    let document = document();
    let settings = build_player(&document, "mounted");

    mount::mount(settings.clone()).unwrap();
    assert!(mount::is_mounted());

    let video = dom::find_video(&document, "mounted-video").unwrap();
    assert_eq!(video.style().get_property_value("cursor").unwrap(), "pointer");

    // Banners start hidden and the first click is still pending
    for banner in Banner::ALL {
        let element = document
            .get_element_by_id(&format!("mounted-{}", banner.key()))
            .unwrap()
            .dyn_into::<HtmlElement>()
            .unwrap();
        assert_eq!(element.style().get_property_value("display").unwrap(), "none");
    }
    assert_eq!(mount::with_mounted(|c| c.is_first_click()), Some(true));

    // A source was attached for the current device
    assert_eq!(video.get_elements_by_tag_name("source").length(), 1);

    assert!(matches!(mount::mount(settings), Err(PlayerError::AlreadyMounted)));
}

#[wasm_bindgen_test]
fn standalone_select_source_replaces_children() {
    let document = document();
    let body = document.body().unwrap();
    let video = append(&document, &body, "video", "standalone-video");
    video.set_inner_html("<source src=\"old.mp4\"><source src=\"older.webm\">");

    mount::select_source("standalone-video").unwrap();

    let sources = video.get_elements_by_tag_name("source");
    assert_eq!(sources.length(), 1);
    assert!(video.text_content().unwrap().contains("does not support videos"));
}

#[wasm_bindgen_test]
fn select_source_on_missing_element_fails() {
    assert!(matches!(
        mount::select_source("no-such-video"),
        Err(PlayerError::MissingElement(_))
    ));
}
