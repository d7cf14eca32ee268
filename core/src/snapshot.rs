use crate::copy::LetterCopy;
use crate::geometry::Vec2;
use crate::state::{EnvelopeState, LetterState, Outcome};
use crate::viewport::ViewportMode;

pub const AVOIDANT_TRANSITION: &str = "transform 0.12s ease-out";
pub const COMPANION_TRANSITION: &str = "transform 0.25s ease";

/// Everything the presentation layer needs to draw one frame of the letter.
#[derive(Clone, Debug, PartialEq)]
pub struct LetterSnapshot {
    pub envelope_visible: bool,
    pub letter_visible: bool,
    pub window_open: bool,
    pub window_final: bool,
    pub title: &'static str,
    pub cat_image: Option<&'static str>,
    pub buttons_visible: bool,
    pub final_text_visible: bool,
    pub declined_visible: bool,
    pub mode: ViewportMode,
    pub outcome: Outcome,
    pub offset: Vec2,
    pub scale: f64,
    pub avoidant_style: String,
    pub companion_style: String,
}

impl LetterSnapshot {
    pub fn build(state: &LetterState, copy: &LetterCopy) -> Self {
        let outcome = state.outcome();
        let mode = state.mode();
        let offset = match mode {
            ViewportMode::Compact => Vec2::ZERO,
            ViewportMode::Wide => state.avoidance().offset(),
        };
        let scale = state.avoidance().scale();
        let (title, cat_image) = match outcome {
            Outcome::Idle => (copy.idle_title, Some(copy.idle_image)),
            Outcome::Accepted => (copy.accepted_title, Some(copy.accepted_image)),
            Outcome::Declined => (copy.declined_title, None),
        };
        Self {
            envelope_visible: state.envelope() == EnvelopeState::Closed,
            letter_visible: state.envelope() != EnvelopeState::Closed,
            window_open: state.envelope() == EnvelopeState::Open,
            window_final: outcome == Outcome::Accepted,
            title,
            cat_image,
            buttons_visible: outcome == Outcome::Idle,
            final_text_visible: outcome == Outcome::Accepted,
            declined_visible: outcome == Outcome::Declined,
            mode,
            outcome,
            offset,
            scale,
            avoidant_style: avoidant_style(mode, offset),
            companion_style: companion_style(scale),
        }
    }

    pub fn window_class(&self) -> String {
        let mut class = "letter-window".to_string();
        if self.window_open {
            class.push_str(" open");
        }
        if self.window_final {
            class.push_str(" final");
        }
        class
    }
}

pub fn avoidant_style(mode: ViewportMode, offset: Vec2) -> String {
    let (pointer_events, cursor) = if mode.avoidant_interactive() {
        ("auto", "pointer")
    } else {
        ("none", "default")
    };
    format!(
        "transform-origin: center center; transition: {AVOIDANT_TRANSITION}; \
         transform: translate({}px, {}px); pointer-events: {pointer_events}; cursor: {cursor};",
        fmt_px(offset.x),
        fmt_px(offset.y),
    )
}

pub fn companion_style(scale: f64) -> String {
    format!(
        "position: relative; transform-origin: center center; \
         transition: {COMPANION_TRANSITION}; transform: scale({});",
        fmt_px(scale)
    )
}

fn fmt_px(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        "0".to_string()
    } else {
        rounded.to_string()
    }
}
