pub const MOBILE_BREAKPOINT: f64 = 768.0;

pub fn is_compact(viewport_width: f64) -> bool {
    viewport_width <= MOBILE_BREAKPOINT
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewportMode {
    Compact,
    #[default]
    Wide,
}

impl ViewportMode {
    pub fn from_width(viewport_width: f64) -> Self {
        if is_compact(viewport_width) {
            ViewportMode::Compact
        } else {
            ViewportMode::Wide
        }
    }

    /// Whether the avoidant control takes pointer input in this mode.
    pub fn avoidant_interactive(self) -> bool {
        self == ViewportMode::Compact
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewportMode::Compact => "compact",
            ViewportMode::Wide => "wide",
        }
    }
}
