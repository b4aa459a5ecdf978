//! The stepper state owner and the external control handle.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use thiserror::Error;

use super::events::{ListenerId, ListenerRegistry, StepperEvent};
use super::state::{StepperSnapshot, StepperState};

/// Default bound on transitions queued from inside listeners
pub const DEFAULT_MAX_CHAINED_TRANSITIONS: usize = 64;

/// A requested change of the active step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Next,
    Prev,
    To(i64),
}

/// Unrecognized textual transition
#[derive(Error, Debug, PartialEq, Eq)]
#[error("unknown move '{0}' (expected next, prev or to:N)")]
pub struct ParseTransitionError(String);

impl FromStr for Transition {
    type Err = ParseTransitionError;

    /// `next`, `prev` or `to:N` (N may be negative)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "next" => Ok(Transition::Next),
            "prev" | "previous" => Ok(Transition::Prev),
            other => other
                .strip_prefix("to:")
                .and_then(|n| n.parse().ok())
                .map(Transition::To)
                .ok_or_else(|| ParseTransitionError(s.to_string())),
        }
    }
}

struct Inner {
    state: RefCell<StepperState>,
    listeners: RefCell<ListenerRegistry>,
    pending: RefCell<VecDeque<Transition>>,
    in_flight: Cell<bool>,
    max_chained: usize,
}

/// Owns `active_step`, `items_count` and the listener registry.
///
/// Cloning yields another handle to the same state. Views receive a clone
/// and never hold step state of their own.
///
/// Transitions requested while another transition is in flight (from
/// inside a `"next"` listener) are queued and applied in request order once
/// the current one commits. At most `max_chained` queued transitions are
/// drained per outer call; the rest are dropped.
#[derive(Clone)]
pub struct StepperController {
    inner: Rc<Inner>,
}

impl StepperController {
    pub fn new(initial_step: i64) -> Self {
        Self::with_chain_limit(initial_step, DEFAULT_MAX_CHAINED_TRANSITIONS)
    }

    pub fn with_chain_limit(initial_step: i64, max_chained: usize) -> Self {
        Self {
            inner: Rc::new(Inner {
                state: RefCell::new(StepperState::new(initial_step)),
                listeners: RefCell::new(ListenerRegistry::default()),
                pending: RefCell::new(VecDeque::new()),
                in_flight: Cell::new(false),
                max_chained,
            }),
        }
    }

    pub fn snapshot(&self) -> StepperSnapshot {
        self.inner.state.borrow().snapshot()
    }

    pub fn active_step(&self) -> i64 {
        self.inner.state.borrow().active_step
    }

    pub fn items_count(&self) -> usize {
        self.inner.state.borrow().items_count
    }

    /// Broadcast `"next"` with `active_step + 1`, then commit it.
    pub fn move_next(&self) {
        self.request(Transition::Next);
    }

    /// Commit `active_step - 1`. No lower bound is enforced.
    pub fn move_prev(&self) {
        self.request(Transition::Prev);
    }

    /// Commit `index` as-is, without checking it against `items_count`.
    pub fn move_to(&self, index: i64) {
        self.request(Transition::To(index));
    }

    pub fn set_items_count(&self, count: usize) {
        let mut state = self.inner.state.borrow_mut();
        if state.items_count != count {
            tracing::debug!(from = state.items_count, to = count, "items count changed");
        }
        state.items_count = count;
    }

    /// Subscribe `handler` to `event`. Handlers run in registration order.
    pub fn on<E, F>(&self, event: E, handler: F) -> ListenerId
    where
        E: AsRef<str>,
        F: FnMut(i64) + 'static,
    {
        self.inner
            .listeners
            .borrow_mut()
            .register(event.as_ref(), handler)
    }

    /// Remove a registration made with `on`.
    pub fn off(&self, id: ListenerId) -> bool {
        self.inner.listeners.borrow_mut().unregister(id)
    }

    pub fn listener_count<E: AsRef<str>>(&self, event: E) -> usize {
        self.inner.listeners.borrow().count(event.as_ref())
    }

    /// The façade handed to the embedding application.
    pub fn api(&self) -> StepperApi {
        StepperApi {
            controller: self.clone(),
        }
    }

    /// Request any transition; same semantics as the dedicated methods.
    pub fn request(&self, transition: Transition) {
        self.inner.pending.borrow_mut().push_back(transition);
        if self.inner.in_flight.get() {
            tracing::trace!(?transition, "queued re-entrant transition");
            return;
        }

        let _flight = FlightGuard::enter(&self.inner);
        let mut chained = 0usize;
        loop {
            let next = self.inner.pending.borrow_mut().pop_front();
            let Some(transition) = next else {
                break;
            };
            self.apply(transition);

            if self.inner.pending.borrow().is_empty() {
                break;
            }
            if chained >= self.inner.max_chained {
                let dropped = {
                    let mut pending = self.inner.pending.borrow_mut();
                    let n = pending.len();
                    pending.clear();
                    n
                };
                tracing::warn!(
                    dropped,
                    limit = self.inner.max_chained,
                    "chained transition limit reached"
                );
                break;
            }
            chained += 1;
        }
    }

    fn apply(&self, transition: Transition) {
        let current = self.active_step();
        let target = match transition {
            // Saturate at the i64 bounds rather than overflow
            Transition::Next => current.saturating_add(1),
            Transition::Prev => current.saturating_sub(1),
            Transition::To(index) => index,
        };

        if transition == Transition::Next {
            self.emit(StepperEvent::Next, target);
        }

        self.inner.state.borrow_mut().active_step = target;
        tracing::debug!(?transition, from = current, to = target, "step committed");
    }

    fn emit(&self, event: StepperEvent, value: i64) {
        // Snapshot so listeners may subscribe or unsubscribe mid-broadcast.
        let listeners = self.inner.listeners.borrow().listeners_for(event.as_str());
        tracing::trace!(%event, value, listeners = listeners.len(), "broadcast");
        for listener in listeners {
            (&mut *listener.borrow_mut())(value);
        }
    }
}

impl fmt::Debug for StepperController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepperController")
            .field("state", &*self.inner.state.borrow())
            .field("listeners", &*self.inner.listeners.borrow())
            .field("max_chained", &self.inner.max_chained)
            .finish()
    }
}

/// Ends a flight: clears the in-flight flag and discards anything still
/// queued, including transitions queued by a listener that panicked.
struct FlightGuard<'a>(&'a Inner);

impl<'a> FlightGuard<'a> {
    fn enter(inner: &'a Inner) -> Self {
        inner.in_flight.set(true);
        Self(inner)
    }
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.0.pending.borrow_mut().clear();
        self.0.in_flight.set(false);
    }
}

/// Imperative handle for code outside the view tree.
///
/// Every method delegates to the live controller, so a handle captured at
/// mount never acts on a stale copy of the state.
#[derive(Clone, Debug)]
pub struct StepperApi {
    controller: StepperController,
}

impl StepperApi {
    pub fn on<E, F>(&self, event: E, handler: F) -> ListenerId
    where
        E: AsRef<str>,
        F: FnMut(i64) + 'static,
    {
        self.controller.on(event, handler)
    }

    pub fn off(&self, id: ListenerId) -> bool {
        self.controller.off(id)
    }

    pub fn move_next(&self) {
        self.controller.move_next();
    }

    pub fn move_prev(&self) {
        self.controller.move_prev();
    }

    pub fn move_to(&self, index: i64) {
        self.controller.move_to(index);
    }

    pub fn snapshot(&self) -> StepperSnapshot {
        self.controller.snapshot()
    }
}
