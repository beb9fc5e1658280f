use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tubeview_core::player::PLAYER_ERROR_MESSAGE;
use tubeview_core::{AdsConfig, MetadataLookup, PlayerAdapter, extract_video_id};

use crate::ads::AdSlot;
use crate::controls::{self, TransportAction};
use crate::embed::{EmbedOptions, EmbeddedPlayer};

/// Error shown when the pasted text carries no video identifier.
pub const INVALID_URL_MESSAGE: &str = "Invalid YouTube URL";

/// Which input region receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Url,
    Transport,
    JumpHours,
    JumpMinutes,
    JumpSeconds,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Self::Url => Self::Transport,
            Self::Transport => Self::JumpHours,
            Self::JumpHours => Self::JumpMinutes,
            Self::JumpMinutes => Self::JumpSeconds,
            Self::JumpSeconds => Self::Url,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Url => Self::JumpSeconds,
            Self::Transport => Self::Url,
            Self::JumpHours => Self::Transport,
            Self::JumpMinutes => Self::JumpHours,
            Self::JumpSeconds => Self::JumpMinutes,
        }
    }
}

/// The hour/minute/second jump input group.
#[derive(Debug, Clone, Default)]
pub struct JumpInput {
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
}

// App state
pub struct App {
    /// URL input field contents and cursor (in characters).
    pub input: String,
    pub input_cursor: usize,
    /// Identifier of the currently loaded video, if any.
    pub video_id: Option<String>,
    /// Single current error message; empty when none, overwritten by
    /// the latest failure.
    pub error: String,
    pub focus: Focus,
    pub jump: JumpInput,
    /// State mirror and command surface for the embedded player.
    pub adapter: PlayerAdapter,
    /// The embedded player widget, live while a video is loaded.
    pub embed: Option<EmbeddedPlayer>,
    pub embed_options: EmbedOptions,
    pub metadata: MetadataLookup,
    pub ad_slot: Option<AdSlot>,
    pub should_quit: bool,
}

impl App {
    pub fn new(ads: &AdsConfig) -> Self {
        Self {
            input: String::new(),
            input_cursor: 0,
            video_id: None,
            error: String::new(),
            focus: Focus::default(),
            jump: JumpInput::default(),
            adapter: PlayerAdapter::new(),
            embed: None,
            embed_options: EmbedOptions::default(),
            metadata: MetadataLookup::new(),
            ad_slot: AdSlot::from_config(ads),
            should_quit: false,
        }
    }

    /// Handle one key event.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
        {
            self.should_quit = true;
            return;
        }
        match key.code {
            KeyCode::Tab => {
                self.focus = self.focus.next();
                return;
            }
            KeyCode::BackTab => {
                self.focus = self.focus.prev();
                return;
            }
            KeyCode::Esc => {
                self.error.clear();
                return;
            }
            _ => {}
        }

        match self.focus {
            Focus::Url => self.handle_url_key(key),
            Focus::Transport => self.handle_transport_key(key),
            Focus::JumpHours | Focus::JumpMinutes | Focus::JumpSeconds => {
                self.handle_jump_key(key);
            }
        }
    }

    fn handle_url_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.submit_url(),
            KeyCode::Char(c) => {
                let at = byte_index(&self.input, self.input_cursor);
                self.input.insert(at, c);
                self.input_cursor += 1;
            }
            KeyCode::Backspace => {
                if self.input_cursor > 0 {
                    self.input_cursor -= 1;
                    let at = byte_index(&self.input, self.input_cursor);
                    self.input.remove(at);
                }
            }
            KeyCode::Left => self.input_cursor = self.input_cursor.saturating_sub(1),
            KeyCode::Right => {
                self.input_cursor = (self.input_cursor + 1).min(self.input.chars().count());
            }
            _ => {}
        }
    }

    fn handle_transport_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('q') {
            self.should_quit = true;
            return;
        }
        // The adapter already treats a missing handle as fully disabled,
        // so every action below is a no-op until the player is ready.
        match controls::transport_action(key.code) {
            Some(TransportAction::TogglePlayPause) => self.adapter.toggle_play_pause(),
            Some(TransportAction::SeekBy(offset)) => self.adapter.seek_by(offset),
            None => {}
        }
    }

    fn handle_jump_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Enter {
            self.submit_jump();
            return;
        }
        let field = match self.focus {
            Focus::JumpHours => &mut self.jump.hours,
            Focus::JumpMinutes => &mut self.jump.minutes,
            Focus::JumpSeconds => &mut self.jump.seconds,
            _ => return,
        };
        match key.code {
            KeyCode::Char(c) if c.is_ascii_digit() => field.push(c),
            KeyCode::Backspace => {
                field.pop();
            }
            _ => {}
        }
    }

    /// Try to load whatever is in the URL input field.
    pub fn submit_url(&mut self) {
        match extract_video_id(&self.input) {
            Some(id) => {
                let id = id.to_string();
                self.error.clear();
                self.load_video(id);
            }
            None => {
                // Recovered locally; any already-loaded video keeps
                // playing untouched.
                self.error = INVALID_URL_MESSAGE.to_string();
            }
        }
    }

    /// Submit the jump group; all-blank fields still command second 0.
    pub fn submit_jump(&mut self) {
        let target = controls::jump_target(
            &self.jump.hours,
            &self.jump.minutes,
            &self.jump.seconds,
        );
        self.adapter.jump_to(target as f64);
    }

    fn load_video(&mut self, id: String) {
        // Identifier change: the old handle reference dies with its
        // embed, and the poll stops with it.
        self.adapter.detach();
        self.embed = None;
        self.metadata.lookup(&id);
        match EmbeddedPlayer::spawn(&id, &self.embed_options) {
            Ok(embed) => self.embed = Some(embed),
            Err(e) => {
                log::error!("failed to start embedded player: {e:#}");
                self.error = PLAYER_ERROR_MESSAGE.to_string();
            }
        }
        self.video_id = Some(id);
    }

    /// One cooperative tick: pump embed events, poll position, drain
    /// metadata results.
    pub fn update(&mut self) {
        if let Some(embed) = &mut self.embed {
            for event in embed.poll_events() {
                self.adapter.apply(event);
            }
        }
        if let Some(message) = self.adapter.take_error() {
            self.error = message;
        }
        self.adapter.tick(Instant::now());
        self.metadata.pump();
    }
}

fn byte_index(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map_or(text.len(), |(at, _)| at)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn test_app() -> App {
        App::new(&AdsConfig::default())
    }

    #[test]
    fn invalid_url_sets_error_and_keeps_current_video() {
        let mut app = test_app();
        app.input = "not a url".to_string();
        app.submit_url();
        assert_eq!(app.error, INVALID_URL_MESSAGE);
        assert_eq!(app.video_id, None);
    }

    #[test]
    fn typing_edits_the_url_field() {
        let mut app = test_app();
        for c in "youtu.be/x".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        assert_eq!(app.input, "youtu.be/x");
        app.handle_key(key(KeyCode::Left));
        app.handle_key(key(KeyCode::Backspace));
        assert_eq!(app.input, "youtu.bex");
        assert_eq!(app.input_cursor, 8);
    }

    #[test]
    fn focus_cycles_through_all_regions() {
        let mut app = test_app();
        let mut seen = vec![app.focus];
        for _ in 0..4 {
            app.handle_key(key(KeyCode::Tab));
            seen.push(app.focus);
        }
        assert_eq!(
            seen,
            vec![
                Focus::Url,
                Focus::Transport,
                Focus::JumpHours,
                Focus::JumpMinutes,
                Focus::JumpSeconds,
            ]
        );
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.focus, Focus::Url);
        app.handle_key(key(KeyCode::BackTab));
        assert_eq!(app.focus, Focus::JumpSeconds);
    }

    #[test]
    fn jump_fields_accept_digits_only() {
        let mut app = test_app();
        app.focus = Focus::JumpMinutes;
        for code in [KeyCode::Char('1'), KeyCode::Char('x'), KeyCode::Char('5')] {
            app.handle_key(key(code));
        }
        assert_eq!(app.jump.minutes, "15");
        app.handle_key(key(KeyCode::Backspace));
        assert_eq!(app.jump.minutes, "1");
    }

    #[test]
    fn esc_clears_the_error() {
        let mut app = test_app();
        app.error = INVALID_URL_MESSAGE.to_string();
        app.handle_key(key(KeyCode::Esc));
        assert!(app.error.is_empty());
    }

    #[test]
    fn transport_keys_noop_without_a_player() {
        let mut app = test_app();
        app.focus = Focus::Transport;
        app.handle_key(key(KeyCode::Char(' ')));
        app.handle_key(key(KeyCode::Left));
        assert!(!app.adapter.is_attached());
        assert!(app.error.is_empty());
    }
}
