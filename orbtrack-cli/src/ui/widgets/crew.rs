//! Crew roster panel.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

use orbtrack::source::CrewMember;

/// Progress of the one-off crew fetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CrewState {
    #[default]
    Loading,
    Loaded(Vec<CrewMember>),
    Failed(String),
}

pub struct CrewWidget<'a> {
    state: &'a CrewState,
}

impl<'a> CrewWidget<'a> {
    pub fn new(state: &'a CrewState) -> Self {
        Self { state }
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let muted = Style::default().fg(Color::DarkGray);
        match self.state {
            CrewState::Loading => vec![Line::from(Span::styled("Loading crew data...", muted))],
            CrewState::Failed(error) => vec![Line::from(Span::styled(
                format!("Crew unavailable: {}", error),
                Style::default().fg(Color::Red),
            ))],
            CrewState::Loaded(crew) if crew.is_empty() => {
                vec![Line::from(Span::styled("No crew listed", muted))]
            }
            CrewState::Loaded(crew) => crew
                .iter()
                .map(|member| {
                    Line::from(vec![
                        Span::styled("• ", Style::default().fg(Color::Cyan)),
                        Span::raw(member.name.clone()),
                    ])
                })
                .collect(),
        }
    }
}

impl Widget for CrewWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = match self.state {
            CrewState::Loaded(crew) => format!(" Crew ({}) ", crew.len()),
            _ => " Crew ".to_string(),
        };

        Paragraph::new(self.lines())
            .block(Block::bordered().title(title))
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_crew_names() {
        let state = CrewState::Loaded(vec![
            CrewMember {
                name: "Oleg Kononenko".to_string(),
                craft: "ISS".to_string(),
            },
            CrewMember {
                name: "Tracy Dyson".to_string(),
                craft: "ISS".to_string(),
            },
        ]);
        let lines: Vec<String> = CrewWidget::new(&state)
            .lines()
            .iter()
            .map(|line| line.to_string())
            .collect();
        assert_eq!(lines, vec!["• Oleg Kononenko", "• Tracy Dyson"]);
    }

    #[test]
    fn test_failure_is_shown() {
        let state = CrewState::Failed("API error: 502".to_string());
        let line = CrewWidget::new(&state).lines()[0].to_string();
        assert_eq!(line, "Crew unavailable: API error: 502");
    }
}
