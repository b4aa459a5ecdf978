//! Stepper - a compound multi-step navigation widget.
//!
//! The headless core lives in [`stepper`]; ratatui views that read it and
//! request transitions live in [`ui`].

pub mod app;
pub mod config;
pub mod logging;
pub mod stepper;
pub mod ui;

pub use stepper::{StepperApi, StepperController, StepperEvent, StepperSnapshot};
pub use ui::Stepper;
