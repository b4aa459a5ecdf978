//! Compound stepper view.
//!
//! A [`Stepper`] owns a [`StepperController`] and an ordered list of role
//! tagged children (indicators, step list, actions). Rendering and input
//! routing dispatch on the role; children never keep step state of their
//! own and only read the controller or request transitions through it.

mod actions;
mod indicators;
mod steps;

pub use actions::{ActionBar, ActionControl, ActionKind, ActionOutcome};
pub use indicators::{Indicator, IndicatorContent, IndicatorList, IndicatorProps, JumpRequest};
pub use steps::{Step, StepList};

use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    Frame,
};

use crate::stepper::{
    ChildDescriptor, StepperApi, StepperController, StepperLayout, StepperSnapshot,
};


/// A child of the stepper, tagged by the role it plays.
pub enum StepperChild {
    Indicators(IndicatorList),
    StepList(StepList),
    Actions(ActionBar),
}

impl StepperChild {
    fn constraint(&self) -> Constraint {
        match self {
            StepperChild::Indicators(_) => Constraint::Length(3),
            StepperChild::StepList(_) => Constraint::Min(3),
            StepperChild::Actions(_) => Constraint::Length(1),
        }
    }
}

impl From<IndicatorList> for StepperChild {
    fn from(list: IndicatorList) -> Self {
        StepperChild::Indicators(list)
    }
}

impl From<StepList> for StepperChild {
    fn from(list: StepList) -> Self {
        StepperChild::StepList(list)
    }
}

impl From<ActionBar> for StepperChild {
    fn from(bar: ActionBar) -> Self {
        StepperChild::Actions(bar)
    }
}

/// What a click landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Indicator(usize),
    Action(ActionKind, ActionOutcome),
}

type ApiCallback = Box<dyn FnOnce(StepperApi)>;

pub struct Stepper {
    controller: StepperController,
    children: Vec<StepperChild>,
    on_api: Option<ApiCallback>,
}

impl Stepper {
    pub fn new(controller: StepperController) -> Self {
        Self {
            controller,
            children: Vec::new(),
            on_api: None,
        }
    }

    pub fn with_initial_step(initial_step: i64) -> Self {
        Self::new(StepperController::new(initial_step))
    }

    /// Build views for every child described by `layout`.
    pub fn from_layout(layout: &StepperLayout, controller: StepperController) -> Self {
        layout
            .children
            .iter()
            .fold(Self::new(controller), |stepper, descriptor| {
                let child: StepperChild = match descriptor {
                    ChildDescriptor::Indicators { labels } => {
                        IndicatorList::from_labels(labels.iter().cloned()).into()
                    }
                    ChildDescriptor::StepList { steps } => StepList::new(
                        steps
                            .iter()
                            .map(|s| Step::new(s.title.clone(), s.body.clone()))
                            .collect(),
                    )
                    .into(),
                    ChildDescriptor::Actions {
                        previous,
                        next,
                        last,
                    } => {
                        let mut bar = ActionBar::new();
                        if let Some(label) = previous {
                            bar = bar.with(ActionControl::previous(label.clone()));
                        }
                        if let Some(label) = next {
                            bar = bar.with(ActionControl::next(label.clone()));
                        }
                        if let Some(label) = last {
                            bar = bar.with(ActionControl::last(label.clone()));
                        }
                        bar.into()
                    }
                };
                stepper.child(child)
            })
    }

    /// Append a child. Step lists report their size on attach.
    pub fn child(mut self, child: impl Into<StepperChild>) -> Self {
        let mut child = child.into();
        if let StepperChild::StepList(list) = &mut child {
            list.attach(&self.controller);
        }
        self.children.push(child);
        self
    }

    /// Receive the external handle once, after the first render.
    pub fn on_api<F: FnOnce(StepperApi) + 'static>(mut self, callback: F) -> Self {
        self.on_api = Some(Box::new(callback));
        self
    }

    pub fn controller(&self) -> &StepperController {
        &self.controller
    }

    pub fn snapshot(&self) -> StepperSnapshot {
        self.controller.snapshot()
    }

    pub fn children(&self) -> &[StepperChild] {
        &self.children
    }

    pub fn indicators(&self) -> Option<&IndicatorList> {
        self.children.iter().find_map(|child| match child {
            StepperChild::Indicators(list) => Some(list),
            _ => None,
        })
    }

    pub fn step_list(&self) -> Option<&StepList> {
        self.children.iter().find_map(|child| match child {
            StepperChild::StepList(list) => Some(list),
            _ => None,
        })
    }

    pub fn step_list_mut(&mut self) -> Option<&mut StepList> {
        self.children.iter_mut().find_map(|child| match child {
            StepperChild::StepList(list) => Some(list),
            _ => None,
        })
    }

    pub fn actions(&self) -> Option<&ActionBar> {
        self.children.iter().find_map(|child| match child {
            StepperChild::Actions(bar) => Some(bar),
            _ => None,
        })
    }

    pub fn actions_mut(&mut self) -> Option<&mut ActionBar> {
        self.children.iter_mut().find_map(|child| match child {
            StepperChild::Actions(bar) => Some(bar),
            _ => None,
        })
    }

    /// Activate the indicator at `position` in the first indicator list.
    pub fn activate_indicator(&self, position: usize) -> bool {
        self.indicators()
            .is_some_and(|list| list.activate(position, &self.controller))
    }

    pub fn activate_action(&mut self, kind: ActionKind) -> ActionOutcome {
        let controller = self.controller.clone();
        match self.actions_mut() {
            Some(bar) => bar.activate(kind, &controller),
            None => ActionOutcome::Hidden,
        }
    }

    /// Activate Next, or Last on the terminal step.
    pub fn activate_primary(&mut self) -> Option<(ActionKind, ActionOutcome)> {
        let snapshot = self.snapshot();
        let kind = self.actions()?.primary(&snapshot)?;
        Some((kind, self.activate_action(kind)))
    }

    /// Route a click at terminal cell (`column`, `row`) to whatever was
    /// painted there on the last render.
    pub fn click(&mut self, column: u16, row: u16) -> Option<ClickTarget> {
        let position = Position::new(column, row);
        let controller = self.controller.clone();
        for child in &mut self.children {
            match child {
                StepperChild::Indicators(list) => {
                    if let Some(index) = list.hit(position) {
                        list.activate(index, &controller);
                        return Some(ClickTarget::Indicator(index));
                    }
                }
                StepperChild::Actions(bar) => {
                    if let Some(kind) = bar.hit(position) {
                        let outcome = bar.activate(kind, &controller);
                        return Some(ClickTarget::Action(kind, outcome));
                    }
                }
                StepperChild::StepList(_) => {}
            }
        }
        None
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let constraints: Vec<Constraint> = self
            .children
            .iter()
            .map(StepperChild::constraint)
            .collect();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .spacing(1)
            .constraints(constraints)
            .split(area);

        for (child, chunk) in self.children.iter_mut().zip(chunks.iter()) {
            match child {
                StepperChild::Indicators(list) => list.render(frame, *chunk, &self.controller),
                StepperChild::StepList(list) => list.render(frame, *chunk, &self.controller),
                StepperChild::Actions(bar) => bar.render(frame, *chunk, &self.controller),
            }
        }

        if let Some(callback) = self.on_api.take() {
            tracing::debug!("delivering stepper api");
            callback(self.controller.api());
        }
    }
}
