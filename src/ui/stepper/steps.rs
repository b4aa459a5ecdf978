//! Step panels. Only the panel matching the active step is drawn.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::stepper::{StepperController, StepperSnapshot};

pub struct Step {
    pub title: String,
    pub body: Text<'static>,
}

impl Step {
    pub fn new(title: impl Into<String>, body: impl Into<Text<'static>>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Ordered panels. Reports its length to the controller it is attached to
/// whenever the panel set changes size.
#[derive(Default)]
pub struct StepList {
    steps: Vec<Step>,
    controller: Option<StepperController>,
}

impl StepList {
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            steps,
            controller: None,
        }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    /// Whether the panel at `index` is the one shown for `snapshot`
    pub fn is_active(&self, index: usize, snapshot: &StepperSnapshot) -> bool {
        index < self.steps.len() && index as i64 == snapshot.active_step
    }

    /// The single mounted panel, or `None` when the step is out of range.
    pub fn active_step(&self, snapshot: &StepperSnapshot) -> Option<(usize, &Step)> {
        let index = usize::try_from(snapshot.active_step).ok()?;
        self.steps.get(index).map(|step| (index, step))
    }

    pub fn push_step(&mut self, step: Step) {
        self.steps.push(step);
        self.report_count();
    }

    pub fn remove_step(&mut self, index: usize) -> Option<Step> {
        if index >= self.steps.len() {
            return None;
        }
        let removed = self.steps.remove(index);
        self.report_count();
        Some(removed)
    }

    pub fn set_steps(&mut self, steps: Vec<Step>) {
        let changed = steps.len() != self.steps.len();
        self.steps = steps;
        if changed {
            self.report_count();
        }
    }

    pub(crate) fn attach(&mut self, controller: &StepperController) {
        self.controller = Some(controller.clone());
        self.report_count();
    }

    fn report_count(&self) {
        if let Some(controller) = &self.controller {
            controller.set_items_count(self.steps.len());
        }
    }

    pub(crate) fn render(&self, frame: &mut Frame, area: Rect, controller: &StepperController) {
        let snapshot = controller.snapshot();
        let Some((index, step)) = self.active_step(&snapshot) else {
            return;
        };

        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(
                    format!("{}/{}", index + 1, self.steps.len()),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(" "),
                Span::styled(
                    step.title.clone(),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
            ]))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        let body = Paragraph::new(step.body.clone())
            .wrap(Wrap { trim: false })
            .block(block);
        frame.render_widget(body, area);
    }
}
