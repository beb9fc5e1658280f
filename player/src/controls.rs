//! Transport control surface: fixed-offset seek bindings, play/pause
//! toggle and the hour/minute/second jump arithmetic.

use crossterm::event::KeyCode;

/// Backward seek buttons, left to right.
pub const SEEK_BACKWARD: [(&str, f64); 4] = [
    ("<<< 10min", -600.0),
    ("<< 5min", -300.0),
    ("<< 1min", -60.0),
    ("< 10s", -10.0),
];

/// Forward seek buttons, left to right.
pub const SEEK_FORWARD: [(&str, f64); 4] = [
    ("> 10s", 10.0),
    (">> 1min", 60.0),
    (">> 5min", 300.0),
    (">>> 10min", 600.0),
];

/// A command the transport surface forwards into the adapter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransportAction {
    TogglePlayPause,
    SeekBy(f64),
}

/// Map a key pressed while the transport row has focus to its action.
pub fn transport_action(code: KeyCode) -> Option<TransportAction> {
    match code {
        KeyCode::Char(' ') => Some(TransportAction::TogglePlayPause),
        KeyCode::Left => Some(TransportAction::SeekBy(-10.0)),
        KeyCode::Right => Some(TransportAction::SeekBy(10.0)),
        KeyCode::Char('b') => Some(TransportAction::SeekBy(-60.0)),
        KeyCode::Char('f') => Some(TransportAction::SeekBy(60.0)),
        KeyCode::Char('B') => Some(TransportAction::SeekBy(-300.0)),
        KeyCode::Char('F') => Some(TransportAction::SeekBy(300.0)),
        KeyCode::PageDown => Some(TransportAction::SeekBy(-600.0)),
        KeyCode::PageUp => Some(TransportAction::SeekBy(600.0)),
        _ => None,
    }
}

/// Compute the absolute jump target from the three entered fields.
///
/// Each field defaults to zero when blank or unparseable, so the result
/// is always non-negative; all-blank input yields 0, which is still a
/// valid command. There is no upper bound on what the fields may hold,
/// so the arithmetic saturates instead of overflowing.
pub fn jump_target(hours: &str, minutes: &str, seconds: &str) -> u64 {
    let field = |text: &str| text.trim().parse::<u64>().unwrap_or(0);
    field(hours)
        .saturating_mul(3600)
        .saturating_add(field(minutes).saturating_mul(60))
        .saturating_add(field(seconds))
}
