use crate::action::LetterAction;
use crate::avoidance::{AvoidanceController, AvoidanceFrame, AvoidanceStep, AvoidanceTuning, PointerSample};
use crate::geometry::Vec2;
use crate::viewport::ViewportMode;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EnvelopeState {
    #[default]
    Closed,
    /// Letter shown, unfold class not applied yet.
    Unfolding,
    Open,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Outcome {
    #[default]
    Idle,
    Accepted,
    Declined,
}

impl Outcome {
    pub fn is_final(self) -> bool {
        self != Outcome::Idle
    }

    pub fn label(self) -> &'static str {
        match self {
            Outcome::Idle => "idle",
            Outcome::Accepted => "accepted",
            Outcome::Declined => "declined",
        }
    }
}

#[derive(Clone, Debug)]
pub struct LetterState {
    envelope: EnvelopeState,
    outcome: Outcome,
    mode: ViewportMode,
    avoidance: AvoidanceController,
}

impl LetterState {
    pub fn new() -> Self {
        Self::with_tuning(AvoidanceTuning::default())
    }

    pub fn with_tuning(tuning: AvoidanceTuning) -> Self {
        Self {
            envelope: EnvelopeState::Closed,
            outcome: Outcome::Idle,
            mode: ViewportMode::Wide,
            avoidance: AvoidanceController::new(tuning),
        }
    }

    pub fn envelope(&self) -> EnvelopeState {
        self.envelope
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn mode(&self) -> ViewportMode {
        self.mode
    }

    pub fn avoidance(&self) -> &AvoidanceController {
        &self.avoidance
    }

    pub fn apply(&mut self, action: LetterAction) -> bool {
        match action {
            LetterAction::OpenEnvelope => self.open_envelope(),
            LetterAction::FinishUnfold => self.finish_unfold(),
            LetterAction::PointerMove { sample, frame } => self.pointer_moved(sample, &frame),
            LetterAction::Resize { viewport_width } => self.resized(viewport_width),
            LetterAction::Accept => self.accept(),
            LetterAction::Decline => self.decline(),
        }
    }

    pub fn open_envelope(&mut self) -> bool {
        if self.envelope != EnvelopeState::Closed {
            return false;
        }
        self.envelope = EnvelopeState::Unfolding;
        true
    }

    pub fn finish_unfold(&mut self) -> bool {
        if self.envelope != EnvelopeState::Unfolding {
            return false;
        }
        self.envelope = EnvelopeState::Open;
        true
    }

    /// Returns true when the avoidant control moved or the companion grew.
    pub fn pointer_moved(&mut self, sample: PointerSample, frame: &AvoidanceFrame) -> bool {
        if self.mode == ViewportMode::Compact {
            return false;
        }
        if self.envelope != EnvelopeState::Open || self.outcome.is_final() {
            self.avoidance.record_sample(sample);
            return false;
        }
        matches!(
            self.avoidance.pointer_moved(sample, frame),
            AvoidanceStep::Fled { .. }
        )
    }

    pub fn resized(&mut self, viewport_width: f64) -> bool {
        let mode = ViewportMode::from_width(viewport_width);
        let had_offset = self.avoidance.offset() != Vec2::ZERO;
        let changed = mode != self.mode;
        self.mode = mode;
        if mode == ViewportMode::Compact {
            self.avoidance.reset_offset();
            return changed || had_offset;
        }
        changed
    }

    pub fn accept(&mut self) -> bool {
        if self.outcome.is_final() {
            return false;
        }
        self.outcome = Outcome::Accepted;
        true
    }

    /// Declining is only reachable where the control is clickable.
    pub fn decline(&mut self) -> bool {
        if self.outcome.is_final() || !self.mode.avoidant_interactive() {
            return false;
        }
        self.outcome = Outcome::Declined;
        true
    }
}

impl Default for LetterState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;

    fn frame() -> AvoidanceFrame {
        let anchor = Rect::from_origin_size(180.0, 140.0, 40.0, 20.0);
        AvoidanceFrame {
            control: anchor,
            anchor,
            container: Rect::new(0.0, 0.0, 400.0, 300.0),
            companion: Rect::new(350.0, 10.0, 390.0, 30.0),
        }
    }

    fn opened() -> LetterState {
        let mut state = LetterState::new();
        state.resized(1280.0);
        assert!(state.open_envelope());
        assert!(state.finish_unfold());
        state
    }

    #[test]
    fn envelope_opens_once() {
        let mut state = LetterState::new();
        assert!(!state.finish_unfold());
        assert!(state.open_envelope());
        assert!(!state.open_envelope());
        assert_eq!(state.envelope(), EnvelopeState::Unfolding);
        assert!(state.finish_unfold());
        assert_eq!(state.envelope(), EnvelopeState::Open);
        assert!(!state.open_envelope());
    }

    #[test]
    fn avoidance_is_inert_until_open() {
        let mut state = LetterState::new();
        let sample = PointerSample::new(150.0, 150.0, 1.0);
        assert!(!state.pointer_moved(sample, &frame()));
        assert_eq!(state.avoidance().offset(), Vec2::ZERO);
        assert_eq!(state.avoidance().last_sample(), sample);
    }

    #[test]
    fn compact_resize_resets_offset() {
        let mut state = opened();
        assert!(state.pointer_moved(PointerSample::new(150.0, 150.0, 1.0), &frame()));
        assert_ne!(state.avoidance().offset(), Vec2::ZERO);
        let scale = state.avoidance().scale();

        assert!(state.resized(600.0));
        assert_eq!(state.mode(), ViewportMode::Compact);
        assert_eq!(state.avoidance().offset(), Vec2::ZERO);
        assert_eq!(state.avoidance().scale(), scale);
        assert!(!state.pointer_moved(PointerSample::new(150.0, 150.0, 2.0), &frame()));
    }

    #[test]
    fn decline_requires_compact_mode() {
        let mut state = opened();
        assert!(!state.decline());
        assert_eq!(state.outcome(), Outcome::Idle);
        state.resized(500.0);
        assert!(state.decline());
        assert_eq!(state.outcome(), Outcome::Declined);
        assert!(!state.accept());
    }

    #[test]
    fn accept_is_terminal() {
        let mut state = opened();
        assert!(state.accept());
        assert!(!state.accept());
        state.resized(400.0);
        assert!(!state.decline());
        assert_eq!(state.outcome(), Outcome::Accepted);
        assert!(!state.pointer_moved(PointerSample::new(150.0, 150.0, 3.0), &frame()));
    }
}
