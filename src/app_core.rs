use std::cell::RefCell;
use std::rc::Rc;

use love_letter_core::{
    EnvelopeState, LetterAction, LetterCopy, LetterSnapshot, LetterState, Outcome, ViewportMode,
    LETTER_COPY,
};

pub(crate) type AppSubscriber = Rc<dyn Fn()>;

thread_local! {
    static SHARED_CORE: RefCell<Option<Rc<AppCore>>> = RefCell::new(None);
}

/// Owns the letter state for one page view and fans out snapshots.
pub(crate) struct AppCore {
    state: RefCell<LetterState>,
    snapshot: RefCell<LetterSnapshot>,
    copy: LetterCopy,
    subscribers: Rc<RefCell<Vec<AppSubscriber>>>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
struct Marks {
    envelope: EnvelopeState,
    mode: ViewportMode,
    outcome: Outcome,
}

impl Marks {
    fn of(state: &LetterState) -> Self {
        Self {
            envelope: state.envelope(),
            mode: state.mode(),
            outcome: state.outcome(),
        }
    }
}

impl AppCore {
    pub(crate) fn new() -> Rc<Self> {
        Self::with_copy(LETTER_COPY)
    }

    pub(crate) fn with_copy(copy: LetterCopy) -> Rc<Self> {
        let state = LetterState::new();
        let snapshot = LetterSnapshot::build(&state, &copy);
        Rc::new(Self {
            state: RefCell::new(state),
            snapshot: RefCell::new(snapshot),
            copy,
            subscribers: Rc::new(RefCell::new(Vec::new())),
        })
    }

    pub(crate) fn shared() -> Rc<Self> {
        SHARED_CORE.with(|slot| {
            let mut slot = slot.borrow_mut();
            if let Some(core) = slot.as_ref() {
                return core.clone();
            }
            let core = Self::new();
            *slot = Some(core.clone());
            core
        })
    }

    pub(crate) fn copy(&self) -> &LetterCopy {
        &self.copy
    }

    pub(crate) fn subscribe(&self, subscriber: AppSubscriber) -> AppSubscription {
        self.subscribers.borrow_mut().push(subscriber.clone());
        AppSubscription {
            subscriber,
            subscribers: Rc::clone(&self.subscribers),
        }
    }

    pub(crate) fn snapshot(&self) -> LetterSnapshot {
        self.snapshot.borrow().clone()
    }

    /// Applies `action` and notifies subscribers when anything changed.
    pub(crate) fn dispatch(&self, action: LetterAction) -> bool {
        let label = action.label();
        let (changed, before, after) = {
            let mut state = self.state.borrow_mut();
            let before = Marks::of(&state);
            let changed = state.apply(action);
            (changed, before, Marks::of(&state))
        };
        if !changed {
            return false;
        }
        if before != after {
            log_transition(label, before, after);
        }
        self.notify();
        true
    }

    fn notify(&self) {
        self.refresh_snapshot();
        let subscribers = self.subscribers.borrow().clone();
        for subscriber in subscribers {
            (subscriber)();
        }
    }

    fn refresh_snapshot(&self) {
        let state = self.state.borrow();
        *self.snapshot.borrow_mut() = LetterSnapshot::build(&state, &self.copy);
    }
}

fn log_transition(label: &str, before: Marks, after: Marks) {
    if before.envelope != after.envelope {
        let phase = match after.envelope {
            EnvelopeState::Closed => "closed",
            EnvelopeState::Unfolding => "unfolding",
            EnvelopeState::Open => "open",
        };
        gloo::console::log!("letter", phase);
    }
    if before.mode != after.mode {
        gloo::console::log!("viewport mode", after.mode.label(), "via", label);
    }
    if before.outcome != after.outcome {
        gloo::console::log!("outcome", after.outcome.label());
    }
}

pub(crate) struct AppSubscription {
    subscriber: AppSubscriber,
    subscribers: Rc<RefCell<Vec<AppSubscriber>>>,
}

impl Drop for AppSubscription {
    fn drop(&mut self) {
        let mut subscribers = self.subscribers.borrow_mut();
        subscribers.retain(|item| !Rc::ptr_eq(item, &self.subscriber));
    }
}
