use crate::avoidance::{AvoidanceFrame, PointerSample};

#[derive(Clone, Debug)]
pub enum LetterAction {
    OpenEnvelope,
    FinishUnfold,
    PointerMove {
        sample: PointerSample,
        frame: AvoidanceFrame,
    },
    Resize {
        viewport_width: f64,
    },
    Accept,
    Decline,
}

impl LetterAction {
    pub fn label(&self) -> &'static str {
        match self {
            LetterAction::OpenEnvelope => "open-envelope",
            LetterAction::FinishUnfold => "finish-unfold",
            LetterAction::PointerMove { .. } => "pointer-move",
            LetterAction::Resize { .. } => "resize",
            LetterAction::Accept => "accept",
            LetterAction::Decline => "decline",
        }
    }
}
