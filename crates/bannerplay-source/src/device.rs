//! Device Detection
//!
//! User-agent based device classification.

use std::fmt;

/// Device class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceType {
    Mobile,
    Tablet,
    #[default]
    Desktop,
}

const TABLET_MARKERS: &[&str] = &["ipad", "tablet", "playbook", "silk"];
const MOBILE_MARKERS: &[&str] = &["iphone", "ipod", "android", "blackberry", "windows phone"];

impl DeviceType {
    /// Classify a user-agent string. Tablets are checked first; Android
    /// counts as a tablet when no `mobile` token follows it.
    pub fn detect(user_agent: &str) -> Self {
        let ua = user_agent.to_lowercase();

        if TABLET_MARKERS.iter().any(|marker| ua.contains(marker)) || is_android_tablet(&ua) {
            DeviceType::Tablet
        } else if MOBILE_MARKERS.iter().any(|marker| ua.contains(marker)) {
            DeviceType::Mobile
        } else {
            DeviceType::Desktop
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DeviceType::Mobile => "mobile",
            DeviceType::Tablet => "tablet",
            DeviceType::Desktop => "desktop",
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Some `android` occurrence with no `mobile` anywhere after it
fn is_android_tablet(ua: &str) -> bool {
    ua.match_indices("android")
        .any(|(index, token)| !ua[index + token.len()..].contains("mobile"))
}
