use crate::geometry::{clamp_lenient, Rect, Vec2};

pub const DRIFT_THRESHOLD: f64 = 120.0;
pub const DRIFT_MIN_DISTANCE: f64 = 2.0;
pub const DRIFT_FACTOR: f64 = 1.4;
pub const DRIFT_MAX_STEP: f64 = 35.0;
pub const CONTAINER_PADDING: f64 = 12.0;
pub const COMPANION_GAP: f64 = 8.0;
pub const GROW_INCREMENT: f64 = 0.08;
pub const GROW_MAX: f64 = 4.0;
pub const SCALE_MIN: f64 = 1.0;

const OVERLAP_EPS: f64 = 1.0e-6;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AvoidanceTuning {
    /// Pointer distance below which the control starts to flee.
    pub threshold: f64,
    /// Distances at or below this are ignored (direction is unstable).
    pub min_distance: f64,
    pub drift_factor: f64,
    pub max_step: f64,
    pub container_padding: f64,
    pub companion_gap: f64,
    pub grow_increment: f64,
    pub grow_max: f64,
}

impl Default for AvoidanceTuning {
    fn default() -> Self {
        Self {
            threshold: DRIFT_THRESHOLD,
            min_distance: DRIFT_MIN_DISTANCE,
            drift_factor: DRIFT_FACTOR,
            max_step: DRIFT_MAX_STEP,
            container_padding: CONTAINER_PADDING,
            companion_gap: COMPANION_GAP,
            grow_increment: GROW_INCREMENT,
            grow_max: GROW_MAX,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerSample {
    pub pos: Vec2,
    pub time_ms: f64,
}

impl PointerSample {
    pub fn new(x: f64, y: f64, time_ms: f64) -> Self {
        Self {
            pos: Vec2::new(x, y),
            time_ms,
        }
    }
}

/// Geometry read from the page for one pointer event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AvoidanceFrame {
    /// Live box of the avoidant control, transform included.
    pub control: Rect,
    /// Untransformed box the offset is measured from.
    pub anchor: Rect,
    pub container: Rect,
    /// Live box of the companion control, scale included.
    pub companion: Rect,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AvoidanceStep {
    /// Pointer outside the active band; only the sample was recorded.
    Idle,
    Fled { offset: Vec2, scale: f64 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PushAxis {
    Left,
    Right,
    Up,
    Down,
}

#[derive(Clone, Debug)]
pub struct AvoidanceController {
    tuning: AvoidanceTuning,
    offset: Vec2,
    scale: f64,
    last_sample: PointerSample,
}

impl Default for AvoidanceController {
    fn default() -> Self {
        Self::new(AvoidanceTuning::default())
    }
}

impl AvoidanceController {
    pub fn new(tuning: AvoidanceTuning) -> Self {
        Self {
            tuning,
            offset: Vec2::ZERO,
            scale: SCALE_MIN,
            last_sample: PointerSample::default(),
        }
    }

    pub fn tuning(&self) -> &AvoidanceTuning {
        &self.tuning
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn last_sample(&self) -> PointerSample {
        self.last_sample
    }

    pub fn reset_offset(&mut self) {
        self.offset = Vec2::ZERO;
    }

    pub fn record_sample(&mut self, sample: PointerSample) {
        self.last_sample = sample;
    }

    pub fn pointer_moved(&mut self, sample: PointerSample, frame: &AvoidanceFrame) -> AvoidanceStep {
        let step = self.flee(sample, frame);
        self.last_sample = sample;
        step
    }

    fn flee(&mut self, sample: PointerSample, frame: &AvoidanceFrame) -> AvoidanceStep {
        let away = frame.control.center() - sample.pos;
        let dist = away.length();
        if !(dist > self.tuning.min_distance && dist < self.tuning.threshold) {
            return AvoidanceStep::Idle;
        }
        let dir = away.scale(1.0 / dist);
        let speed = self.last_sample.pos.distance(sample.pos);
        let drift = (speed * self.tuning.drift_factor).min(self.tuning.max_step);
        let target = self.offset + dir.scale(drift);
        self.offset = resolve_offset(target, frame, &self.tuning);
        let scale = self.grow();
        AvoidanceStep::Fled {
            offset: self.offset,
            scale,
        }
    }

    fn grow(&mut self) -> f64 {
        self.scale = (self.scale + self.tuning.grow_increment).min(self.tuning.grow_max);
        self.scale
    }
}

/// Offset range that keeps `anchor` inside `container` shrunk by `padding`.
pub fn offset_bounds(anchor: &Rect, container: &Rect, padding: f64) -> (Vec2, Vec2) {
    let min = Vec2::new(
        container.left + padding - anchor.left,
        container.top + padding - anchor.top,
    );
    let max = Vec2::new(
        container.right - padding - anchor.left - anchor.width(),
        container.bottom - padding - anchor.top - anchor.height(),
    );
    (min, max)
}

pub fn clamp_offset(offset: Vec2, anchor: &Rect, container: &Rect, padding: f64) -> Vec2 {
    let (min, max) = offset_bounds(anchor, container, padding);
    Vec2::new(
        clamp_lenient(offset.x, min.x, max.x),
        clamp_lenient(offset.y, min.y, max.y),
    )
}

/// Clamps `offset` into the container, then slides the control off the
/// padded companion box using the smallest push that survives re-clamping.
pub fn resolve_offset(offset: Vec2, frame: &AvoidanceFrame, tuning: &AvoidanceTuning) -> Vec2 {
    let padding = tuning.container_padding;
    let clamped = clamp_offset(offset, &frame.anchor, &frame.container, padding);
    let obstacle = frame.companion.expand(tuning.companion_gap);
    let candidate = frame.anchor.translate(clamped);
    if !candidate.intersects(&obstacle) {
        return clamped;
    }

    let mut pushes = [
        (PushAxis::Left, candidate.right - obstacle.left),
        (PushAxis::Right, obstacle.right - candidate.left),
        (PushAxis::Up, candidate.bottom - obstacle.top),
        (PushAxis::Down, obstacle.bottom - candidate.top),
    ];
    // stable: ties keep left, right, up, down
    pushes.sort_by(|a, b| a.1.total_cmp(&b.1));

    let shrunk = obstacle.expand(-OVERLAP_EPS);
    let mut fallback = None;
    for (axis, amount) in pushes {
        let pushed = apply_push(clamped, axis, amount);
        let pushed = clamp_offset(pushed, &frame.anchor, &frame.container, padding);
        if !frame.anchor.translate(pushed).intersects(&shrunk) {
            return pushed;
        }
        if fallback.is_none() {
            fallback = Some(pushed);
        }
    }
    fallback.unwrap_or(clamped)
}

fn apply_push(offset: Vec2, axis: PushAxis, amount: f64) -> Vec2 {
    match axis {
        PushAxis::Left => Vec2::new(offset.x - amount, offset.y),
        PushAxis::Right => Vec2::new(offset.x + amount, offset.y),
        PushAxis::Up => Vec2::new(offset.x, offset.y - amount),
        PushAxis::Down => Vec2::new(offset.x, offset.y + amount),
    }
}
