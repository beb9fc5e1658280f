pub mod components;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};

use crate::app::App;

/// Draw the main UI
pub fn draw(f: &mut Frame, app: &App) {
    let mut constraints = vec![
        Constraint::Length(3), // URL input
        Constraint::Length(1), // error line
        Constraint::Length(4), // video info
        Constraint::Min(5),    // player panel
        Constraint::Length(3), // transport controls
        Constraint::Length(3), // time jump
    ];
    if app.ad_slot.is_some() {
        constraints.push(Constraint::Length(3));
    }
    constraints.push(Constraint::Length(1)); // help line

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(f.area());

    components::draw_url_input(f, app, chunks[0]);
    components::draw_error_line(f, app, chunks[1]);
    components::draw_metadata_panel(f, app, chunks[2]);
    components::draw_player_panel(f, app, chunks[3]);
    components::draw_transport_row(f, app, chunks[4]);
    components::draw_jump_row(f, app, chunks[5]);
    if let Some(slot) = &app.ad_slot {
        components::draw_ad_slot(f, slot, chunks[6]);
    }
    components::draw_help_line(f, chunks[chunks.len() - 1]);
}
