//! Source swap tests
//!
//! Swaps driven through the selector against a headless player: position
//! and playback are restored, click phase and banners are not touched.

use std::time::Duration;

use bannerplay_core::headless::AutoplayPolicy;
use bannerplay_core::{
    Banner, HeadlessBanners, HeadlessPage, HeadlessPlayer, MediaElement, MediaSurface,
    PlayerConfig,
};
use bannerplay_source::{DeviceSignals, ScreenSignals, SourceLayout, SourceSelector, SourceSwap};

const DESKTOP_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";
const PHONE_UA: &str = "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Mobile Safari/537.36";

fn signals(user_agent: &str, orientation: &str) -> DeviceSignals {
    DeviceSignals {
        user_agent: user_agent.into(),
        screen: ScreenSignals {
            orientation_type: Some(orientation.into()),
            inner_width: 0.0,
            inner_height: 0.0,
        },
    }
}

fn muted_player() -> HeadlessPlayer {
    HeadlessPlayer::new(
        MediaElement::new().with_muted(),
        HeadlessBanners::default(),
        HeadlessPage::new(),
        PlayerConfig::default(),
    )
}

/// Run a swap to completion: select, load metadata, restore
fn swap_to(
    player: &mut HeadlessPlayer,
    selector: &mut SourceSelector,
    signals: &DeviceSignals,
    duration: f64,
) -> Option<SourceSwap> {
    let swap = selector.select_source(player.surface_mut(), signals).unwrap()?;
    player.surface_mut().on_metadata_loaded(duration);
    player.dispatch(swap.restore_event(duration));
    player.pump();
    Some(swap)
}

// ============================================================================
// INITIAL LOAD
// ============================================================================

#[test]
fn test_initial_load_autoplays_muted() {
    let mut player = muted_player();
    let mut selector = SourceSelector::default();
    player.start();

    let swap = swap_to(&mut player, &mut selector, &signals(DESKTOP_UA, "landscape-primary"), 60.0)
        .expect("first selection always swaps");

    assert_eq!(swap.source.layout, SourceLayout::Desktop);
    assert_eq!(player.surface().src, "desktop-video.mp4");
    assert!(!player.surface().paused());
    assert!(player.is_first_click());
}

#[test]
fn test_initial_load_blocked_arms_recovery() {
    let mut element = MediaElement::new().with_muted();
    element.policy = AutoplayPolicy::GestureRequired;
    let mut player = HeadlessPlayer::new(
        element,
        HeadlessBanners::default(),
        HeadlessPage::new(),
        PlayerConfig::default(),
    );
    let mut selector = SourceSelector::default();

    swap_to(&mut player, &mut selector, &signals(DESKTOP_UA, "landscape-primary"), 60.0);
    assert!(player.page().watching_gestures());

    player.gesture();

    assert!(!player.surface().paused());
    assert!(!player.page().watching_gestures());
}

// ============================================================================
// ORTHOGONALITY
// ============================================================================

#[test]
fn test_swap_keeps_click_phase_and_paused_banner() {
    let mut player = muted_player();
    let mut selector = SourceSelector::default();
    swap_to(&mut player, &mut selector, &signals(PHONE_UA, "landscape-primary"), 60.0);

    player.click();
    player.advance(Duration::from_secs(5));
    player.click();
    assert_eq!(player.active_banner(), Some(Banner::Paused));

    let swap = swap_to(&mut player, &mut selector, &signals(PHONE_UA, "portrait-primary"), 60.0)
        .expect("orientation change swaps the file");

    assert_eq!(swap.saved_time, 5.0);
    assert!(!swap.was_playing);
    assert_eq!(player.surface().src, "mobile-video.mp4");
    assert_eq!(player.surface().current_time(), 5.0);
    assert!(player.surface().paused());
    assert!(!player.is_first_click());
    assert_eq!(player.active_banner(), Some(Banner::Paused));
}

#[test]
fn test_swap_while_playing_resumes() {
    let mut player = muted_player();
    let mut selector = SourceSelector::default();
    swap_to(&mut player, &mut selector, &signals(PHONE_UA, "portrait-primary"), 60.0);
    player.click();
    player.advance(Duration::from_secs(20));

    let swap = swap_to(&mut player, &mut selector, &signals(PHONE_UA, "landscape-primary"), 15.0)
        .unwrap();

    assert!(swap.was_playing);
    assert_eq!(player.surface().current_time(), 15.0);
    assert!(!player.surface().paused());
    assert!(!player.is_first_click());
    assert!(!player.surface().muted());
}

#[test]
fn test_same_file_does_not_reload() {
    let mut player = muted_player();
    let mut selector = SourceSelector::default();
    swap_to(&mut player, &mut selector, &signals(PHONE_UA, "landscape-primary"), 60.0);
    player.advance(Duration::from_secs(3));

    // Tablet and mobile-landscape both use the desktop file
    let swap = selector
        .select_source(player.surface_mut(), &signals(DESKTOP_UA, "portrait-primary"))
        .unwrap();

    assert!(swap.is_none());
    assert_eq!(player.surface().current_time(), 3.0);
    assert_eq!(
        selector.attached().map(|source| source.class_name.as_str()),
        Some("desktop-video")
    );
}

#[test]
fn test_swap_during_muted_banner_delay() {
    let mut player = muted_player();
    let mut selector = SourceSelector::default();
    player.start();
    swap_to(&mut player, &mut selector, &signals(PHONE_UA, "portrait-primary"), 60.0);

    player.advance(Duration::from_millis(500));
    swap_to(&mut player, &mut selector, &signals(PHONE_UA, "landscape-primary"), 60.0);
    player.advance(Duration::from_millis(500));

    assert_eq!(player.active_banner(), Some(Banner::Muted));
    assert!(player.is_first_click());
}

#[test]
fn test_successful_restore_does_not_arm_recovery() {
    let mut player = muted_player();
    let mut selector = SourceSelector::default();

    swap_to(&mut player, &mut selector, &signals(DESKTOP_UA, "landscape-primary"), 60.0);

    assert_eq!(player.surface().play_requests(), 1);
    assert_eq!(player.surface().rejections(), 0);
    assert!(!player.recovery().is_armed());
    assert_eq!(player.page().gesture_registrations(), 0);
}
