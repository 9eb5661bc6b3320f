//! Key and mouse bindings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

/// Fraction of the viewport an arrow key moves the camera.
pub const ARROW_PAN_FRACTION: f64 = 0.125;

/// What the user asked for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UiAction {
    Quit,
    /// Move the camera by a fraction of the viewport; `dx` east, `dy` north.
    Pan { dx: f64, dy: f64 },
    Refollow,
    ZoomIn,
    ZoomOut,
}

/// Map a key press to an action.
pub fn action_for_key(key: KeyEvent) -> Option<UiAction> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(UiAction::Quit),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(UiAction::Quit)
        }
        KeyCode::Char('f') | KeyCode::Char('F') => Some(UiAction::Refollow),
        KeyCode::Char('+') | KeyCode::Char('=') => Some(UiAction::ZoomIn),
        KeyCode::Char('-') | KeyCode::Char('_') => Some(UiAction::ZoomOut),
        KeyCode::Left => Some(UiAction::Pan {
            dx: -ARROW_PAN_FRACTION,
            dy: 0.0,
        }),
        KeyCode::Right => Some(UiAction::Pan {
            dx: ARROW_PAN_FRACTION,
            dy: 0.0,
        }),
        KeyCode::Up => Some(UiAction::Pan {
            dx: 0.0,
            dy: ARROW_PAN_FRACTION,
        }),
        KeyCode::Down => Some(UiAction::Pan {
            dx: 0.0,
            dy: -ARROW_PAN_FRACTION,
        }),
        _ => None,
    }
}

/// Turns left-button drags over the map into pan actions.
#[derive(Debug, Default)]
pub struct DragTracker {
    last: Option<(u16, u16)>,
}

impl DragTracker {
    pub fn on_mouse(&mut self, event: MouseEvent, map_area: Rect) -> Option<UiAction> {
        let position = (event.column, event.row);
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.last = contains(map_area, position).then_some(position);
                None
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let (last_col, last_row) = self.last?;
                self.last = Some(position);

                let dcol = f64::from(event.column) - f64::from(last_col);
                let drow = f64::from(event.row) - f64::from(last_row);
                if dcol == 0.0 && drow == 0.0 {
                    return None;
                }

                // Content follows the pointer, so the camera moves the other way.
                let width = f64::from(map_area.width.saturating_sub(2).max(1));
                let height = f64::from(map_area.height.saturating_sub(2).max(1));
                Some(UiAction::Pan {
                    dx: -dcol / width,
                    dy: drow / height,
                })
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.last = None;
                None
            }
            MouseEventKind::ScrollUp if contains(map_area, position) => Some(UiAction::ZoomIn),
            MouseEventKind::ScrollDown if contains(map_area, position) => Some(UiAction::ZoomOut),
            _ => None,
        }
    }
}

fn contains(area: Rect, (col, row): (u16, u16)) -> bool {
    col >= area.x && col < area.x + area.width && row >= area.y && row < area.y + area.height
}
