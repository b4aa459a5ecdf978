//! Indicator row: one marker per step, each able to jump to its step.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::stepper::StepperController;

/// Values handed to an indicator's render callback
pub struct IndicatorProps {
    pub active_step: i64,
    pub request_jump: JumpRequest,
}

/// Deferred `move_to(index)` for one indicator.
#[derive(Clone, Debug)]
pub struct JumpRequest {
    controller: StepperController,
    index: Option<usize>,
}

impl JumpRequest {
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Jump to the indicator's step. Does nothing when it has no index.
    pub fn call(&self) -> bool {
        match self.index {
            Some(index) => {
                self.controller.move_to(index as i64);
                true
            }
            None => false,
        }
    }
}

type RenderFn = Box<dyn Fn(&IndicatorProps) -> Line<'static>>;

pub enum IndicatorContent {
    /// Plain label, highlighted when its step is active
    Label(String),
    /// Caller-drawn content
    Render(RenderFn),
}

pub struct Indicator {
    content: IndicatorContent,
    index: Option<usize>,
    area: Option<Rect>,
}

impl Indicator {
    pub fn label(label: impl Into<String>) -> Self {
        Self {
            content: IndicatorContent::Label(label.into()),
            index: None,
            area: None,
        }
    }

    pub fn render_with<F>(render: F) -> Self
    where
        F: Fn(&IndicatorProps) -> Line<'static> + 'static,
    {
        Self {
            content: IndicatorContent::Render(Box::new(render)),
            index: None,
            area: None,
        }
    }

    /// Position assigned by the owning [`IndicatorList`], if any
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn is_active(&self, active_step: i64) -> bool {
        self.index.is_some_and(|i| i as i64 == active_step)
    }

    pub fn props(&self, controller: &StepperController) -> IndicatorProps {
        IndicatorProps {
            active_step: controller.active_step(),
            request_jump: JumpRequest {
                controller: controller.clone(),
                index: self.index,
            },
        }
    }

    /// Request a jump to this indicator's step.
    pub fn activate(&self, controller: &StepperController) -> bool {
        self.props(controller).request_jump.call()
    }

    fn line(&self, props: &IndicatorProps) -> Line<'static> {
        match &self.content {
            IndicatorContent::Label(label) => Line::from(label.clone()),
            IndicatorContent::Render(render) => render(props),
        }
    }

    fn border_style(&self, active_step: i64) -> Style {
        match (&self.content, self.is_active(active_step)) {
            (IndicatorContent::Label(_), true) => Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            (IndicatorContent::Label(_), false) => Style::default().fg(Color::DarkGray),
            (IndicatorContent::Render(_), _) => Style::default(),
        }
    }
}

/// Ordered indicators; position in the list is the step index.
#[derive(Default)]
pub struct IndicatorList {
    indicators: Vec<Indicator>,
}

impl IndicatorList {
    pub fn new(indicators: Vec<Indicator>) -> Self {
        let indicators = indicators
            .into_iter()
            .enumerate()
            .map(|(i, mut indicator)| {
                indicator.index = Some(i);
                indicator
            })
            .collect();
        Self { indicators }
    }

    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(labels.into_iter().map(Indicator::label).collect())
    }

    pub fn len(&self) -> usize {
        self.indicators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indicators.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Indicator> {
        self.indicators.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Indicator> {
        self.indicators.iter()
    }

    /// Activate the indicator at `position`. False if there is none.
    pub fn activate(&self, position: usize, controller: &StepperController) -> bool {
        self.indicators
            .get(position)
            .is_some_and(|indicator| indicator.activate(controller))
    }

    pub(crate) fn hit(&self, position: Position) -> Option<usize> {
        self.indicators
            .iter()
            .position(|indicator| indicator.area.is_some_and(|area| area.contains(position)))
    }

    pub(crate) fn render(&mut self, frame: &mut Frame, area: Rect, controller: &StepperController) {
        let active_step = controller.active_step();
        let lines: Vec<Line<'static>> = self
            .indicators
            .iter()
            .map(|indicator| indicator.line(&indicator.props(controller)))
            .collect();

        let mut constraints: Vec<Constraint> = lines
            .iter()
            .map(|line| Constraint::Length(line.width() as u16 + 6))
            .collect();
        constraints.push(Constraint::Min(0));

        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .spacing(1)
            .constraints(constraints)
            .split(area);

        for ((indicator, line), cell) in self.indicators.iter_mut().zip(lines).zip(cells.iter()) {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(indicator.border_style(active_step));
            frame.render_widget(
                Paragraph::new(line)
                    .alignment(Alignment::Center)
                    .block(block),
                *cell,
            );
            indicator.area = Some(*cell);
        }
    }
}
