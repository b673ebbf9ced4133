//! Banners
//!
//! The three overlays that report playback state to the viewer.

use std::fmt;

/// Banner kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Banner {
    Muted,
    Paused,
    Ended,
}

impl Banner {
    /// All banners, in DOM order
    pub const ALL: [Banner; 3] = [Banner::Muted, Banner::Paused, Banner::Ended];

    /// Key used in element ids and logs
    pub fn key(self) -> &'static str {
        match self {
            Banner::Muted => "muted",
            Banner::Paused => "paused",
            Banner::Ended => "ended",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|banner| banner.key() == key)
    }
}

impl fmt::Display for Banner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Where banner visibility is rendered (DOM styles, test recorder, ...)
pub trait BannerDisplay {
    fn set_visible(&mut self, banner: Banner, visible: bool);
}

/// Mutually exclusive banner set
///
/// Showing a banner always hides every banner first, so at most one is
/// visible after any operation.
#[derive(Debug)]
pub struct BannerSet<D: BannerDisplay> {
    display: D,
    active: Option<Banner>,
}

impl<D: BannerDisplay> BannerSet<D> {
    /// Wrap a display; every banner is hidden on construction
    pub fn new(mut display: D) -> Self {
        for banner in Banner::ALL {
            display.set_visible(banner, false);
        }
        Self { display, active: None }
    }

    /// Currently visible banner
    pub fn active(&self) -> Option<Banner> {
        self.active
    }

    pub fn is_visible(&self, banner: Banner) -> bool {
        self.active == Some(banner)
    }

    /// Hide all banners, then show `banner`
    pub fn show(&mut self, banner: Banner) {
        self.hide_all();
        self.display.set_visible(banner, true);
        self.active = Some(banner);
        tracing::debug!(%banner, "banner shown");
    }

    /// Hide every banner. No-op when none is visible.
    pub fn hide_all(&mut self) {
        for banner in Banner::ALL {
            self.display.set_visible(banner, false);
        }
        self.active = None;
    }

    /// Hide a single banner, leaving any other one untouched
    pub fn hide(&mut self, banner: Banner) {
        self.display.set_visible(banner, false);
        if self.active == Some(banner) {
            self.active = None;
        }
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessBanners;

    #[test]
    fn test_banner_keys() {
        assert_eq!(Banner::Muted.key(), "muted");
        assert_eq!(Banner::from_key("ended"), Some(Banner::Ended));
        assert_eq!(Banner::from_key("loud"), None);
    }

    #[test]
    fn test_show_is_exclusive() {
        let mut set = BannerSet::new(HeadlessBanners::default());

        set.show(Banner::Muted);
        set.show(Banner::Ended);

        assert_eq!(set.active(), Some(Banner::Ended));
        assert_eq!(set.display().visible(), vec![Banner::Ended]);
    }

    #[test]
    fn test_hide_all_when_empty() {
        let mut set = BannerSet::new(HeadlessBanners::default());

        set.hide_all();

        assert_eq!(set.active(), None);
        assert!(set.display().visible().is_empty());
    }

    #[test]
    fn test_hide_single_keeps_other() {
        let mut set = BannerSet::new(HeadlessBanners::default());

        set.show(Banner::Paused);
        set.hide(Banner::Muted);

        assert!(set.is_visible(Banner::Paused));
    }
}
