//! Headless step-navigation core.
//!
//! [`StepperController`] is the single owner of the active step and the
//! panel count. Views and the embedding application only read snapshots
//! and request transitions through it (or through its [`StepperApi`]
//! façade).

mod controller;
mod events;
pub mod layout;
mod state;

pub use controller::{
    ParseTransitionError, StepperApi, StepperController, Transition,
    DEFAULT_MAX_CHAINED_TRANSITIONS,
};
pub use events::{ListenerId, StepperEvent};
pub use layout::{ChildDescriptor, LayoutError, StepDescriptor, StepperLayout};
pub use state::StepperSnapshot;

#[cfg(test)]
mod tests;
