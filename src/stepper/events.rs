//! Listener registry for stepper transition events.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Events broadcast by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepperEvent {
    /// Fired by `move_next` with the new step index, before it is committed
    Next,
}

impl StepperEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepperEvent::Next => "next",
        }
    }
}

impl AsRef<str> for StepperEvent {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for StepperEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token returned by `on`, used to unsubscribe a single registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// Shared, re-borrowable event handler. Receives the new step index.
pub(crate) type Listener = Rc<RefCell<dyn FnMut(i64)>>;

/// Event name → handlers in registration order.
///
/// Registration never de-duplicates; the same closure registered twice is
/// called twice.
#[derive(Default)]
pub(crate) struct ListenerRegistry {
    next_id: u64,
    listeners: HashMap<String, Vec<(ListenerId, Listener)>>,
}

impl ListenerRegistry {
    pub fn register<F>(&mut self, event: &str, handler: F) -> ListenerId
    where
        F: FnMut(i64) + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        let listener: Listener = Rc::new(RefCell::new(handler));
        self.listeners
            .entry(event.to_string())
            .or_default()
            .push((id, listener));
        id
    }

    /// Remove one registration. Returns false if the id is unknown.
    pub fn unregister(&mut self, id: ListenerId) -> bool {
        for handlers in self.listeners.values_mut() {
            if let Some(pos) = handlers.iter().position(|(hid, _)| *hid == id) {
                handlers.remove(pos);
                return true;
            }
        }
        false
    }

    /// Handlers for `event` at this moment. Empty when none are registered.
    pub fn listeners_for(&self, event: &str) -> Vec<Listener> {
        self.listeners
            .get(event)
            .map(|handlers| handlers.iter().map(|(_, l)| Rc::clone(l)).collect())
            .unwrap_or_default()
    }

    pub fn count(&self, event: &str) -> usize {
        self.listeners.get(event).map_or(0, Vec::len)
    }
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut counts: Vec<(&str, usize)> = self
            .listeners
            .iter()
            .map(|(event, handlers)| (event.as_str(), handlers.len()))
            .collect();
        counts.sort_unstable();
        f.debug_struct("ListenerRegistry")
            .field("listeners", &counts)
            .finish()
    }
}
