pub mod help;
pub mod keybindings;
pub mod stepper;
pub mod terminal_guard;

pub use stepper::{
    ActionBar, ActionControl, ActionKind, ActionOutcome, ClickTarget, Indicator, IndicatorList,
    Step, StepList, Stepper, StepperChild,
};
