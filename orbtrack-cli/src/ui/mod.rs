//! Terminal UI for the tracker.
//!
//! # Module Structure
//!
//! - `map` - world map canvas with marker and trail
//! - `widgets` - info and crew panels
//! - `input` - key and mouse bindings
//! - `utils` - formatting helpers and non-TUI output

pub mod input;
pub mod map;
pub mod utils;
pub mod widgets;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use orbtrack::sink::SceneSnapshot;
use orbtrack::status::TrackingStatusSnapshot;

use map::MapWidget;
use widgets::{CrewState, CrewWidget, InfoWidget};

/// Everything one frame draws.
pub struct DashboardView<'a> {
    pub scene: &'a SceneSnapshot,
    pub status: &'a TrackingStatusSnapshot,
    pub crew: &'a CrewState,
}

/// Draw a frame. Returns the map area so mouse input can be mapped to it.
pub fn render(frame: &mut Frame, view: &DashboardView) -> Rect {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),
            Constraint::Length(9),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[1]);

    frame.render_widget(MapWidget::new(view.scene, view.status.follow), rows[0]);
    frame.render_widget(InfoWidget::new(view.status), panels[0]);
    frame.render_widget(CrewWidget::new(view.crew), panels[1]);
    frame.render_widget(help_line(), rows[2]);

    rows[0]
}

fn help_line() -> Paragraph<'static> {
    let key = Style::default().fg(Color::Cyan);
    let text = Style::default().fg(Color::DarkGray);
    Paragraph::new(Line::from(vec![
        Span::styled(" arrows/drag", key),
        Span::styled(" look around  ", text),
        Span::styled("f", key),
        Span::styled(" follow  ", text),
        Span::styled("+/-", key),
        Span::styled(" zoom  ", text),
        Span::styled("q", key),
        Span::styled(" quit", text),
    ]))
}
