//! Interactive stepper session.

use std::cell::{Cell, RefCell};
use std::io;
use std::rc::Rc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{
    self, Event, KeyCode, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};

use crate::config::Config;
use crate::stepper::{StepperApi, StepperController, StepperEvent, StepperLayout};
use crate::ui::help::{footer_line, HelpOverlay};
use crate::ui::keybindings::{action_for, ShortcutAction};
use crate::ui::stepper::{ActionKind, Stepper};
use crate::ui::terminal_guard::TerminalGuard;

/// The embedding owner's view of the stepper: the API handle it was given
/// plus what it observed through it.
#[derive(Default)]
struct Owner {
    api: RefCell<Option<StepperApi>>,
    last_event: Cell<Option<i64>>,
    finished: Cell<bool>,
}

pub struct App {
    stepper: Stepper,
    owner: Rc<Owner>,
    help: HelpOverlay,
    tick_rate: Duration,
    should_quit: bool,
}

impl App {
    pub fn new(config: &Config, layout: &StepperLayout, initial_step: i64) -> Self {
        let controller =
            StepperController::with_chain_limit(initial_step, config.stepper.max_chained_transitions);
        let owner = Rc::new(Owner::default());

        let on_api = Rc::clone(&owner);
        let mut stepper = Stepper::from_layout(layout, controller).on_api(move |api| {
            let observer = Rc::clone(&on_api);
            api.on(StepperEvent::Next, move |step| {
                tracing::info!(step, "advanced");
                observer.last_event.set(Some(step));
            });
            *on_api.api.borrow_mut() = Some(api);
        });

        if let Some(actions) = stepper.actions_mut() {
            // Next goes through the external handle once it has been delivered
            let next_owner = Rc::clone(&owner);
            actions.set_handler(ActionKind::Next, move || {
                if let Some(api) = next_owner.api.borrow().as_ref() {
                    api.move_next();
                }
            });

            let last_owner = Rc::clone(&owner);
            actions.set_handler(ActionKind::Last, move || {
                tracing::info!("last step reached");
                last_owner.finished.set(true);
            });
        }

        Self {
            stepper,
            owner,
            help: HelpOverlay::default(),
            tick_rate: Duration::from_millis(config.ui.tick_rate_ms),
            should_quit: false,
        }
    }

    /// Run until the user quits or finishes. Returns a closing message.
    pub fn run(&mut self) -> Result<Option<String>> {
        let guard = TerminalGuard::new()?;
        let mut terminal =
            Terminal::new(CrosstermBackend::new(io::stdout())).context("Failed to open terminal")?;

        while !self.should_quit {
            terminal.draw(|f| self.render(f))?;

            if event::poll(self.tick_rate)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.handle_key(key.code);
                    }
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    _ => {}
                }
            }
        }

        terminal.show_cursor()?;
        guard.restore();

        Ok(self.exit_message())
    }

    pub fn is_finished(&self) -> bool {
        self.owner.finished.get()
    }

    pub fn stepper(&self) -> &Stepper {
        &self.stepper
    }

    fn exit_message(&self) -> Option<String> {
        self.is_finished().then(|| {
            format!(
                "Finished on step {} of {}",
                self.stepper.snapshot().active_step.saturating_add(1),
                self.stepper.snapshot().items_count
            )
        })
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        let Some(action) = action_for(code) else {
            return;
        };

        if self.help.visible {
            if matches!(action, ShortcutAction::ToggleHelp | ShortcutAction::Quit) {
                self.help.toggle();
            }
            return;
        }

        match action {
            ShortcutAction::Quit => {
                self.should_quit = true;
            }
            ShortcutAction::ToggleHelp => {
                self.help.toggle();
            }
            ShortcutAction::PreviousStep => {
                self.stepper.activate_action(ActionKind::Previous);
            }
            ShortcutAction::NextStep => {
                self.stepper.activate_action(ActionKind::Next);
            }
            ShortcutAction::Primary => {
                self.stepper.activate_primary();
            }
            ShortcutAction::JumpToStep => {
                if let Some(digit) = jump_digit(code) {
                    self.stepper.activate_indicator(digit - 1);
                }
            }
        }

        if self.is_finished() {
            self.should_quit = true;
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.help.visible {
            return;
        }
        if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
            let target = self.stepper.click(mouse.column, mouse.row);
            tracing::debug!(?target, "click");
        }
        if self.is_finished() {
            self.should_quit = true;
        }
    }

    fn render(&mut self, frame: &mut Frame) {
        let block = Block::default()
            .title(" Stepper ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(frame.area());
        frame.render_widget(block, frame.area());

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Min(8),    // Stepper
                Constraint::Length(1), // Status
                Constraint::Length(1), // Footer
            ])
            .split(inner);

        self.stepper.render(frame, chunks[0]);

        let snapshot = self.stepper.snapshot();
        let mut status = vec![Span::styled(
            format!(
                "Step {} of {}",
                snapshot.active_step.saturating_add(1),
                snapshot.items_count
            ),
            Style::default().fg(Color::Gray),
        )];
        if let Some(step) = self.owner.last_event.get() {
            status.push(Span::styled(
                format!("   last \"next\" event: {}", step),
                Style::default().fg(Color::DarkGray),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(status)), chunks[1]);
        frame.render_widget(Paragraph::new(footer_line()), chunks[2]);

        self.help.render(frame);
    }
}

/// 1-based digit of a jump key; '0' is not a jump key.
fn jump_digit(code: KeyCode) -> Option<usize> {
    match code {
        KeyCode::Char(c) => c.to_digit(10).filter(|d| *d > 0).map(|d| d as usize),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    fn mounted_app() -> App {
        let mut app = App::new(&Config::default(), &StepperLayout::default(), 0);
        // first render delivers the api to the owner
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        app
    }

    #[test]
    fn test_owner_receives_api_after_first_render() {
        let app = App::new(&Config::default(), &StepperLayout::default(), 0);
        assert!(app.owner.api.borrow().is_none());

        let app = mounted_app();
        assert!(app.owner.api.borrow().is_some());
    }

    #[test]
    fn test_arrow_keys_navigate() {
        let mut app = mounted_app();
        app.handle_key(KeyCode::Right);
        app.handle_key(KeyCode::Char('l'));
        assert_eq!(app.stepper().snapshot().active_step, 2);
        assert_eq!(app.owner.last_event.get(), Some(2));

        app.handle_key(KeyCode::Left);
        assert_eq!(app.stepper().snapshot().active_step, 1);
    }

    #[test]
    fn test_next_before_mount_does_nothing() {
        let mut app = App::new(&Config::default(), &StepperLayout::default(), 0);
        app.handle_key(KeyCode::Right);
        assert_eq!(app.stepper().snapshot().active_step, 0);
    }

    #[test]
    fn test_digit_jumps_via_indicator() {
        let mut app = mounted_app();
        app.handle_key(KeyCode::Char('3'));
        assert_eq!(app.stepper().snapshot().active_step, 2);
        app.handle_key(KeyCode::Char('9'));
        assert_eq!(app.stepper().snapshot().active_step, 2);
    }

    #[test]
    fn test_enter_on_last_step_finishes() {
        let mut app = mounted_app();
        app.handle_key(KeyCode::Enter);
        app.handle_key(KeyCode::Enter);
        assert!(!app.is_finished());

        app.handle_key(KeyCode::Enter);
        assert!(app.is_finished());
        assert!(app.should_quit);
        assert_eq!(app.exit_message().unwrap(), "Finished on step 3 of 3");
    }

    #[test]
    fn test_help_swallows_navigation() {
        let mut app = mounted_app();
        app.handle_key(KeyCode::Char('?'));
        app.handle_key(KeyCode::Right);
        assert_eq!(app.stepper().snapshot().active_step, 0);
        assert!(!app.should_quit);

        app.handle_key(KeyCode::Esc);
        assert!(!app.help.visible);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_unbound_key_is_ignored() {
        let mut app = mounted_app();
        app.handle_key(KeyCode::Char('0'));
        app.handle_key(KeyCode::Char('x'));
        assert_eq!(app.stepper().snapshot().active_step, 0);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_status_line_at_extreme_steps() {
        for step in [i64::MAX, i64::MIN] {
            let mut app = App::new(&Config::default(), &StepperLayout::default(), step);
            let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
            terminal.draw(|f| app.render(f)).unwrap();

            app.handle_key(KeyCode::Right);
            app.handle_key(KeyCode::Enter);
            terminal.draw(|f| app.render(f)).unwrap();
            assert!(!app.is_finished());
        }

        let mut app = App::new(&Config::default(), &StepperLayout::default(), i64::MAX);
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains(&format!("Step {} of 3", i64::MAX)));
    }

    #[test]
    fn test_quit() {
        let mut app = mounted_app();
        app.handle_key(KeyCode::Char('q'));
        assert!(app.should_quit);
        assert!(app.exit_message().is_none());
    }
}
