//! Position details panel.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget, Wrap},
};

use orbtrack::follow::FollowState;
use orbtrack::status::TrackingStatusSnapshot;

use crate::ui::utils::{format_age, format_latitude, format_longitude, format_timestamp};

/// Latest position, speed and follow mode.
pub struct InfoWidget<'a> {
    status: &'a TrackingStatusSnapshot,
}

impl<'a> InfoWidget<'a> {
    pub fn new(status: &'a TrackingStatusSnapshot) -> Self {
        Self { status }
    }

    fn follow_color(state: FollowState) -> Color {
        match state {
            FollowState::Following => Color::Green,
            FollowState::Released => Color::Yellow,
        }
    }

    fn field(label: &'static str, value: String) -> Line<'static> {
        Line::from(vec![
            Span::styled(format!("{:<11}", label), Style::default().fg(Color::DarkGray)),
            Span::styled(value, Style::default().fg(Color::White)),
        ])
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let status = self.status;
        let mut lines = Vec::new();

        match &status.latest {
            Some(record) => {
                lines.push(Self::field("Latitude", format_latitude(record.latitude)));
                lines.push(Self::field("Longitude", format_longitude(record.longitude)));
                lines.push(Self::field("Altitude", format!("{:.1} km", record.altitude)));
                lines.push(Self::field("Velocity", format!("{:.1} km/h", record.velocity)));
                lines.push(Self::field("Visibility", record.visibility.clone()));

                let age = status
                    .last_success
                    .map(|at| format!(" ({} ago)", format_age(at.elapsed())))
                    .unwrap_or_default();
                lines.push(Self::field(
                    "Updated",
                    format!("{}{}", format_timestamp(record.timestamp), age),
                ));
            }
            None if status.last_error.is_none() => {
                lines.push(Line::from(Span::styled(
                    "Acquiring ISS position...",
                    Style::default().fg(Color::DarkGray),
                )));
            }
            None => {}
        }

        if let Some(error) = &status.last_error {
            lines.push(Line::from(Span::styled(
                format!("Error: {}", error),
                Style::default().fg(Color::Red),
            )));
        }

        lines
    }
}

impl Widget for InfoWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let follow = self.status.follow;
        let title = Line::from(vec![
            Span::raw(" ISS Position | "),
            Span::styled(
                follow.display_status(),
                Style::default().fg(Self::follow_color(follow)),
            ),
            Span::raw(" "),
        ]);

        Paragraph::new(self.lines())
            .block(Block::bordered().title(title))
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}
