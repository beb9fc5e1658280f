use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Widget},
};
use tubeview_core::format_time;
use tubeview_core::metadata::MetadataStatus;
use unicode_width::UnicodeWidthStr;

use crate::ads::AdSlot;
use crate::app::{App, Focus};
use crate::controls::{SEEK_BACKWARD, SEEK_FORWARD};

fn focus_border(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

/// Style for controls that must read as disabled while no player handle
/// is held.
fn control_style(enabled: bool) -> Style {
    if enabled {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

pub fn draw_url_input(f: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Url;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(focus_border(focused))
        .title("YouTube URL");
    let input = Paragraph::new(app.input.as_str()).block(block);
    f.render_widget(input, area);

    if focused {
        let prefix: String = app.input.chars().take(app.input_cursor).collect();
        let x = area.x + 1 + prefix.width() as u16;
        f.set_cursor_position(Position::new(x.min(area.right().saturating_sub(2)), area.y + 1));
    }
}

pub fn draw_error_line(f: &mut Frame, app: &App, area: Rect) {
    if app.error.is_empty() {
        return;
    }
    let line = Paragraph::new(app.error.as_str())
        .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD));
    f.render_widget(line, area);
}

pub fn draw_metadata_panel(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Video Info");
    let lines = match app.metadata.status() {
        MetadataStatus::Idle => vec![Line::styled(
            "No video loaded",
            Style::default().fg(Color::DarkGray),
        )],
        MetadataStatus::Loading => vec![Line::styled(
            "Loading video info...",
            Style::default().fg(Color::Yellow),
        )],
        MetadataStatus::Failed(message) => {
            vec![Line::styled(*message, Style::default().fg(Color::Red))]
        }
        MetadataStatus::Loaded(metadata) => vec![
            Line::styled(
                metadata.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Line::raw(metadata.author_name.clone()),
        ],
    };
    f.render_widget(Paragraph::new(lines).block(block), area);
}

pub fn draw_player_panel(f: &mut Frame, app: &App, area: Rect) {
    let state = app.adapter.state();
    let block = Block::default().borders(Borders::ALL).title("Player");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(3)])
        .split(inner);

    let status = match &app.video_id {
        Some(id) => format!(
            "{}  ·  {}  (video renders in the embedded player window)",
            app.adapter.lifecycle().label(),
            id
        ),
        None => "Paste a YouTube URL above and press Enter".to_string(),
    };
    f.render_widget(
        Paragraph::new(status).style(Style::default().fg(Color::Gray)),
        rows[0],
    );

    let progress = ProgressBar::new(state.current_time, state.duration)
        .playing(state.is_playing)
        .enabled(app.adapter.is_attached());
    f.render_widget(progress, rows[1]);
}

pub fn draw_transport_row(f: &mut Frame, app: &App, area: Rect) {
    let enabled = app.adapter.is_attached();
    let focused = app.focus == Focus::Transport;
    let style = control_style(enabled);

    let mut spans: Vec<Span> = Vec::new();
    for (label, _) in SEEK_BACKWARD {
        spans.push(Span::styled(format!("[{label}] "), style));
    }
    let play_label = if app.adapter.state().is_playing {
        "⏸ Pause"
    } else {
        "▶ Play"
    };
    let play_style = if enabled {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        style
    };
    spans.push(Span::styled(format!("[{play_label}] "), play_style));
    for (label, _) in SEEK_FORWARD {
        spans.push(Span::styled(format!("[{label}] "), style));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(focus_border(focused))
        .title("Transport");
    f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

pub fn draw_jump_row(f: &mut Frame, app: &App, area: Rect) {
    let enabled = app.adapter.is_attached();
    let base = control_style(enabled);
    let field = |text: &str, focus: Focus| -> Span<'static> {
        let shown = if text.is_empty() {
            "--".to_string()
        } else {
            text.to_string()
        };
        let style = if app.focus == focus {
            base.add_modifier(Modifier::REVERSED)
        } else {
            base
        };
        Span::styled(format!("[{shown:>2}]"), style)
    };

    let line = Line::from(vec![
        Span::styled("Jump to  ", base),
        field(&app.jump.hours, Focus::JumpHours),
        Span::styled(":", base),
        field(&app.jump.minutes, Focus::JumpMinutes),
        Span::styled(":", base),
        field(&app.jump.seconds, Focus::JumpSeconds),
        Span::styled("  (Enter to jump)", base),
    ]);

    let focused = matches!(
        app.focus,
        Focus::JumpHours | Focus::JumpMinutes | Focus::JumpSeconds
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(focus_border(focused))
        .title("Time Jump");
    f.render_widget(Paragraph::new(line).block(block), area);
}

pub fn draw_ad_slot(f: &mut Frame, slot: &AdSlot, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Sponsored");
    let text = format!("ad slot {} · client {}", slot.slot_id, slot.client_id);
    f.render_widget(
        Paragraph::new(text).style(Style::default().fg(Color::DarkGray)).block(block),
        area,
    );
}

pub fn draw_help_line(f: &mut Frame, area: Rect) {
    let help = "Tab focus · Enter load/jump · Space play/pause · ←/→ 10s · b/f 1min · B/F 5min · PgDn/PgUp 10min · Esc clear error · Ctrl+Q quit";
    f.render_widget(
        Paragraph::new(help).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

/// Progress bar with playback indicator and elapsed/total label.
pub struct ProgressBar {
    position: f64,
    duration: f64,
    is_playing: bool,
    enabled: bool,
}

impl ProgressBar {
    pub fn new(position: f64, duration: f64) -> Self {
        Self {
            position,
            duration,
            is_playing: false,
            enabled: true,
        }
    }

    pub fn playing(mut self, is_playing: bool) -> Self {
        self.is_playing = is_playing;
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

impl Widget for ProgressBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let percent = if self.duration > 0.0 {
            (self.position / self.duration).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let label = format!(
            "{} / {}",
            format_time(self.position.max(0.0)),
            format_time(self.duration.max(0.0))
        );
        let title = if !self.enabled {
            "⏹  "
        } else if self.is_playing {
            "▶  "
        } else {
            "⏸  "
        };

        let color = if self.enabled { Color::Blue } else { Color::DarkGray };
        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title(title))
            .gauge_style(
                Style::default()
                    .fg(color)
                    .bg(Color::Black)
                    .add_modifier(Modifier::BOLD),
            )
            .percent((percent * 100.0) as u16)
            .label(label);
        gauge.render(area, buf);
    }
}
