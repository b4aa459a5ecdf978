//! Help overlay listing the stepper shortcuts.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::ui::keybindings::{footer_shortcuts, shortcuts_by_category};

#[derive(Default)]
pub struct HelpOverlay {
    pub visible: bool,
}

impl HelpOverlay {
    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    pub fn render(&self, frame: &mut Frame) {
        if !self.visible {
            return;
        }

        let area = centered_rect(60, 60, frame.area());
        frame.render_widget(Clear, area);

        let mut help_text = vec![
            Line::from(Span::styled(
                "Keyboard Shortcuts",
                Style::default()
                    .add_modifier(Modifier::BOLD)
                    .fg(Color::Cyan),
            )),
            Line::from(""),
        ];

        for (category, shortcuts) in shortcuts_by_category() {
            help_text.push(Line::from(Span::styled(
                category.display_name(),
                Style::default().fg(Color::Gray),
            )));
            for shortcut in shortcuts {
                help_text.push(Line::from(vec![
                    Span::raw("  "),
                    Span::styled(
                        shortcut.key_display_padded(),
                        Style::default().fg(Color::Yellow),
                    ),
                    Span::raw(shortcut.description),
                ]));
            }
            help_text.push(Line::from(""));
        }
        help_text.push(Line::from(Span::styled(
            "Mouse: click an indicator or a button",
            Style::default().fg(Color::DarkGray),
        )));

        let help = Paragraph::new(help_text).block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );
        frame.render_widget(help, area);
    }
}

/// One-line key hint bar
pub fn footer_line() -> Line<'static> {
    let mut spans = Vec::new();
    for shortcut in footer_shortcuts() {
        spans.push(Span::styled(
            shortcut.key_display(),
            Style::default().fg(Color::Yellow),
        ));
        spans.push(Span::raw(format!(" {}  ", shortcut.description.to_lowercase())));
    }
    Line::from(spans).alignment(Alignment::Center)
}

pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
