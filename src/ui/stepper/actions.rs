//! Previous / Next / Last controls that hide themselves when not applicable.

use std::fmt;

use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::stepper::{StepperController, StepperSnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Previous,
    Next,
    Last,
}

impl ActionKind {
    pub fn all() -> &'static [ActionKind] {
        &[ActionKind::Previous, ActionKind::Next, ActionKind::Last]
    }

    /// Previous: `active > 0`. Next: `active < count - 1`. Last: `active == count - 1`.
    pub fn is_visible(&self, snapshot: &StepperSnapshot) -> bool {
        match self {
            ActionKind::Previous => snapshot.has_prev(),
            ActionKind::Next => snapshot.has_next(),
            ActionKind::Last => snapshot.is_last(),
        }
    }

    pub fn default_label(&self) -> &'static str {
        match self {
            ActionKind::Previous => "Previous",
            ActionKind::Next => "Next",
            ActionKind::Last => "Last",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.default_label())
    }
}

/// What an activation did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The control is absent or not visible for the current step
    Hidden,
    /// The caller-supplied handler ran instead of the default
    Custom,
    /// The default transition was requested
    Default,
    /// Visible, but there is nothing to do (Last without a handler)
    Nothing,
}

type ClickHandler = Box<dyn FnMut()>;

pub struct ActionControl {
    kind: ActionKind,
    label: String,
    on_click: Option<ClickHandler>,
    area: Option<Rect>,
}

impl ActionControl {
    pub fn new(kind: ActionKind, label: impl Into<String>) -> Self {
        Self {
            kind,
            label: label.into(),
            on_click: None,
            area: None,
        }
    }

    pub fn previous(label: impl Into<String>) -> Self {
        Self::new(ActionKind::Previous, label)
    }

    pub fn next(label: impl Into<String>) -> Self {
        Self::new(ActionKind::Next, label)
    }

    pub fn last(label: impl Into<String>) -> Self {
        Self::new(ActionKind::Last, label)
    }

    /// Replace the default transition with `handler`.
    pub fn on_click<F: FnMut() + 'static>(mut self, handler: F) -> Self {
        self.set_on_click(handler);
        self
    }

    pub fn set_on_click<F: FnMut() + 'static>(&mut self, handler: F) {
        self.on_click = Some(Box::new(handler));
    }

    pub fn kind(&self) -> ActionKind {
        self.kind
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_visible(&self, snapshot: &StepperSnapshot) -> bool {
        self.kind.is_visible(snapshot)
    }

    pub fn activate(&mut self, controller: &StepperController) -> ActionOutcome {
        if !self.is_visible(&controller.snapshot()) {
            return ActionOutcome::Hidden;
        }
        if let Some(handler) = self.on_click.as_mut() {
            handler();
            return ActionOutcome::Custom;
        }
        match self.kind {
            ActionKind::Previous => controller.move_prev(),
            ActionKind::Next => controller.move_next(),
            ActionKind::Last => return ActionOutcome::Nothing,
        }
        ActionOutcome::Default
    }
}

/// Container for the three navigation controls. Any of them may be absent.
#[derive(Default)]
pub struct ActionBar {
    controls: Vec<ActionControl>,
}

impl ActionBar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the control of `control.kind()`.
    pub fn with(mut self, control: ActionControl) -> Self {
        self.controls.retain(|c| c.kind != control.kind);
        self.controls.push(control);
        self
    }

    pub fn control(&self, kind: ActionKind) -> Option<&ActionControl> {
        self.controls.iter().find(|c| c.kind == kind)
    }

    pub fn control_mut(&mut self, kind: ActionKind) -> Option<&mut ActionControl> {
        self.controls.iter_mut().find(|c| c.kind == kind)
    }

    /// Install a click handler on an existing control. False if it is absent.
    pub fn set_handler<F: FnMut() + 'static>(&mut self, kind: ActionKind, handler: F) -> bool {
        match self.control_mut(kind) {
            Some(control) => {
                control.set_on_click(handler);
                true
            }
            None => false,
        }
    }

    pub fn visible(&self, snapshot: &StepperSnapshot) -> Vec<ActionKind> {
        self.controls
            .iter()
            .filter(|c| c.is_visible(snapshot))
            .map(|c| c.kind)
            .collect()
    }

    pub fn activate(&mut self, kind: ActionKind, controller: &StepperController) -> ActionOutcome {
        match self.control_mut(kind) {
            Some(control) => control.activate(controller),
            None => ActionOutcome::Hidden,
        }
    }

    /// Next when it is shown, otherwise Last when it is shown.
    pub fn primary(&self, snapshot: &StepperSnapshot) -> Option<ActionKind> {
        [ActionKind::Next, ActionKind::Last]
            .into_iter()
            .find(|kind| self.control(*kind).is_some_and(|c| c.is_visible(snapshot)))
    }

    pub(crate) fn hit(&self, position: Position) -> Option<ActionKind> {
        self.controls
            .iter()
            .find(|c| c.area.is_some_and(|area| area.contains(position)))
            .map(|c| c.kind)
    }

    pub(crate) fn render(&mut self, frame: &mut Frame, area: Rect, controller: &StepperController) {
        let snapshot = controller.snapshot();

        // Fixed display order regardless of declaration order
        self.controls.sort_by_key(|c| match c.kind {
            ActionKind::Previous => 0,
            ActionKind::Next => 1,
            ActionKind::Last => 2,
        });

        let visible: Vec<usize> = self
            .controls
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_visible(&snapshot))
            .map(|(i, _)| i)
            .collect();

        for control in &mut self.controls {
            control.area = None;
        }
        if visible.is_empty() {
            return;
        }

        let mut constraints: Vec<Constraint> = visible
            .iter()
            .map(|&i| Constraint::Length(self.controls[i].label.chars().count() as u16 + 2))
            .collect();
        constraints.push(Constraint::Min(0));

        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .spacing(3)
            .constraints(constraints)
            .split(area);

        for (&i, cell) in visible.iter().zip(cells.iter()) {
            let control = &mut self.controls[i];
            let style = match control.kind {
                ActionKind::Previous => Style::default().fg(Color::Yellow),
                ActionKind::Next => Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
                ActionKind::Last => Style::default()
                    .fg(Color::Black)
                    .bg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            };
            let button = Line::from(Span::styled(format!(" {} ", control.label), style));
            frame.render_widget(Paragraph::new(button), *cell);
            control.area = Some(*cell);
        }
    }
}
