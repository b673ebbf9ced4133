//! Source Catalog
//!
//! Which file to play for each device/orientation combination.

use serde::Deserialize;

use crate::device::DeviceType;
use crate::orientation::Orientation;
use crate::SourceError;

/// Layout a source is cut for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceLayout {
    Desktop,
    MobilePortrait,
    MobileLandscape,
}

impl SourceLayout {
    /// Layout for a device; tablets get the desktop cut
    pub fn for_device(device: DeviceType, orientation: Orientation) -> Self {
        match (device, orientation) {
            (DeviceType::Mobile, Orientation::Landscape) => SourceLayout::MobileLandscape,
            (DeviceType::Mobile, Orientation::Portrait) => SourceLayout::MobilePortrait,
            (DeviceType::Tablet | DeviceType::Desktop, _) => SourceLayout::Desktop,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            SourceLayout::Desktop => "desktop video",
            SourceLayout::MobilePortrait => "mobile portrait video",
            SourceLayout::MobileLandscape => "mobile landscape video",
        }
    }
}

/// One catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SourceEntry {
    pub src: String,
    pub class_name: String,
}

impl SourceEntry {
    fn new(src: &str, class_name: &str) -> Self {
        Self {
            src: src.into(),
            class_name: class_name.into(),
        }
    }
}

/// Chosen `<source>` element contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoSource {
    pub src: String,
    pub mime_type: String,
    pub class_name: String,
    pub layout: SourceLayout,
}

/// Source catalog
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SourceCatalog {
    pub desktop: SourceEntry,
    pub mobile_portrait: SourceEntry,
    pub mobile_landscape: SourceEntry,
    pub mime_type: String,
    /// Text shown by browsers that cannot play video
    pub fallback_text: String,
}

impl Default for SourceCatalog {
    fn default() -> Self {
        Self {
            desktop: SourceEntry::new("desktop-video.mp4", "desktop-video"),
            mobile_portrait: SourceEntry::new("mobile-video.mp4", "mobile-portrait-video"),
            mobile_landscape: SourceEntry::new("desktop-video.mp4", "mobile-landscape-video"),
            mime_type: "video/mp4".into(),
            fallback_text: "Your browser does not support videos.".into(),
        }
    }
}

impl SourceCatalog {
    /// Parse a (possibly partial) JSON catalog
    pub fn from_json(json: &str) -> Result<Self, SourceError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn entry(&self, layout: SourceLayout) -> &SourceEntry {
        match layout {
            SourceLayout::Desktop => &self.desktop,
            SourceLayout::MobilePortrait => &self.mobile_portrait,
            SourceLayout::MobileLandscape => &self.mobile_landscape,
        }
    }

    pub fn select(&self, device: DeviceType, orientation: Orientation) -> VideoSource {
        let layout = SourceLayout::for_device(device, orientation);
        let entry = self.entry(layout);
        VideoSource {
            src: entry.src.clone(),
            mime_type: self.mime_type.clone(),
            class_name: entry.class_name.clone(),
            layout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_table() {
        let catalog = SourceCatalog::default();

        let source = catalog.select(DeviceType::Mobile, Orientation::Portrait);
        assert_eq!(source.src, "mobile-video.mp4");
        assert_eq!(source.class_name, "mobile-portrait-video");

        let source = catalog.select(DeviceType::Mobile, Orientation::Landscape);
        assert_eq!(source.src, "desktop-video.mp4");
        assert_eq!(source.class_name, "mobile-landscape-video");

        for orientation in [Orientation::Portrait, Orientation::Landscape] {
            for device in [DeviceType::Tablet, DeviceType::Desktop] {
                let source = catalog.select(device, orientation);
                assert_eq!(source.layout, SourceLayout::Desktop);
                assert_eq!(source.class_name, "desktop-video");
            }
        }
    }

    #[test]
    fn test_mime_type() {
        let source = SourceCatalog::default().select(DeviceType::Desktop, Orientation::Landscape);
        assert_eq!(source.mime_type, "video/mp4");
    }

    #[test]
    fn test_partial_json() {
        let catalog = SourceCatalog::from_json(
            r#"{ "mobile_portrait": { "src": "/media/tall.webm", "class_name": "tall" }, "mime_type": "video/webm" }"#,
        )
        .unwrap();

        let source = catalog.select(DeviceType::Mobile, Orientation::Portrait);
        assert_eq!(source.src, "/media/tall.webm");
        assert_eq!(source.mime_type, "video/webm");
        assert_eq!(catalog.desktop.src, "desktop-video.mp4");
    }
}
