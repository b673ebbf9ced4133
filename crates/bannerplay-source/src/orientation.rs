//! Screen Orientation

/// Screen orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    Portrait,
    #[default]
    Landscape,
}

/// Raw screen signals read from the page
#[derive(Debug, Clone, Default)]
pub struct ScreenSignals {
    /// `screen.orientation.type` when the Screen Orientation API exists
    pub orientation_type: Option<String>,
    pub inner_width: f64,
    pub inner_height: f64,
}

impl Orientation {
    /// Prefer the Screen Orientation API, fall back to the viewport aspect
    pub fn detect(screen: &ScreenSignals) -> Self {
        match &screen.orientation_type {
            Some(kind) if kind.contains("portrait") => Orientation::Portrait,
            Some(_) => Orientation::Landscape,
            None if screen.inner_height > screen.inner_width => Orientation::Portrait,
            None => Orientation::Landscape,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Orientation::Portrait => "portrait",
            Orientation::Landscape => "landscape",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport(width: f64, height: f64) -> ScreenSignals {
        ScreenSignals {
            orientation_type: None,
            inner_width: width,
            inner_height: height,
        }
    }

    #[test]
    fn test_orientation_api() {
        let mut screen = viewport(1920.0, 1080.0);
        screen.orientation_type = Some("portrait-primary".into());
        assert_eq!(Orientation::detect(&screen), Orientation::Portrait);

        screen.orientation_type = Some("landscape-secondary".into());
        assert_eq!(Orientation::detect(&screen), Orientation::Landscape);
    }

    #[test]
    fn test_viewport_fallback() {
        assert_eq!(Orientation::detect(&viewport(390.0, 844.0)), Orientation::Portrait);
        assert_eq!(Orientation::detect(&viewport(844.0, 390.0)), Orientation::Landscape);
        // Square viewports count as landscape
        assert_eq!(Orientation::detect(&viewport(500.0, 500.0)), Orientation::Landscape);
    }
}
