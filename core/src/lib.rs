pub mod action;
pub mod avoidance;
pub mod bindings;
pub mod copy;
pub mod geometry;
pub mod snapshot;
pub mod state;
pub mod viewport;

pub use action::LetterAction;
pub use avoidance::{
    clamp_offset, offset_bounds, resolve_offset, AvoidanceController, AvoidanceFrame,
    AvoidanceStep, AvoidanceTuning, PointerSample,
};
pub use bindings::{parse_tap_flag, BindingParseError, RoleBindings};
pub use copy::{LetterCopy, LETTER_COPY};
pub use geometry::{Rect, Vec2};
pub use snapshot::LetterSnapshot;
pub use state::{EnvelopeState, LetterState, Outcome};
pub use viewport::{is_compact, ViewportMode, MOBILE_BREAKPOINT};
