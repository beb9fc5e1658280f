//! Bridge between an externally-owned player and the control surface.
//!
//! The embedded player is created and destroyed outside this crate; the
//! adapter only observes it through inbound lifecycle events and commands
//! it through a non-owning [`PlayerHandle`]. State transitions are driven
//! exclusively by events plus one 1-second position poll.

use std::time::{Duration, Instant};

use anyhow::Result;

/// Cadence of the elapsed-time poll while a handle is held.
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Fixed user-visible message stored when the player reports an error.
pub const PLAYER_ERROR_MESSAGE: &str = "Failed to load video";

/// Live, externally-owned object through which playback is queried and
/// commanded. Valid only between the `ready` signal and the teardown of
/// the embed that produced it.
pub trait PlayerHandle: Send {
    /// Current elapsed time in seconds.
    fn current_time(&mut self) -> Result<f64>;

    /// Total duration in seconds.
    fn duration(&mut self) -> Result<f64>;

    /// Seek to an absolute time. `allow_seek_ahead` permits seeking past
    /// the buffered region.
    fn seek_to(&mut self, seconds: f64, allow_seek_ahead: bool) -> Result<()>;

    fn play(&mut self) -> Result<()>;
    fn pause(&mut self) -> Result<()>;
}

/// Numeric playback-state taxonomy reported by the embedded player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum PlayerStateCode {
    Unstarted = -1,
    Ended = 0,
    Playing = 1,
    Paused = 2,
    Buffering = 3,
    Cued = 5,
}

impl PlayerStateCode {
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            -1 => Some(Self::Unstarted),
            0 => Some(Self::Ended),
            1 => Some(Self::Playing),
            2 => Some(Self::Paused),
            3 => Some(Self::Buffering),
            5 => Some(Self::Cued),
            _ => None,
        }
    }

    pub fn code(self) -> i32 {
        self as i32
    }
}

/// Inbound lifecycle message from the embedded player.
pub enum PlayerEvent {
    /// The player is ready and this is its command handle.
    Ready(Box<dyn PlayerHandle>),
    /// The player changed playback state; carries the numeric code.
    StateChange(i32),
    /// The player hit a runtime error; carries diagnostic info.
    Error(String),
}

/// Observable lifecycle of the embedded player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    #[default]
    Unready,
    Ready,
    Playing,
    Paused,
    Buffering,
    Ended,
    Errored,
}

impl Lifecycle {
    pub fn label(self) -> &'static str {
        match self {
            Self::Unready => "No player",
            Self::Ready => "Ready",
            Self::Playing => "Playing",
            Self::Paused => "Paused",
            Self::Buffering => "Buffering",
            Self::Ended => "Ended",
            Self::Errored => "Error",
        }
    }
}

/// Locally cached mirror of the external player's status and timing.
///
/// `is_playing` is authoritative only as of the last state-change event;
/// `current_time` is a 1-second snapshot, not continuously accurate;
/// `duration` is fixed once read at ready. Fields are only meaningful
/// while a handle is attached.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlaybackState {
    pub is_playing: bool,
    pub current_time: f64,
    pub duration: f64,
}

/// Owns the non-owning handle reference and mirrors player state.
#[derive(Default)]
pub struct PlayerAdapter {
    handle: Option<Box<dyn PlayerHandle>>,
    state: PlaybackState,
    lifecycle: Lifecycle,
    error: Option<String>,
    last_poll: Option<Instant>,
}

impl PlayerAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one inbound lifecycle event.
    pub fn apply(&mut self, event: PlayerEvent) {
        match event {
            PlayerEvent::Ready(mut handle) => {
                // Duration is assumed immutable for a loaded video and is
                // not re-read after this point.
                match handle.duration() {
                    Ok(duration) => self.state.duration = duration,
                    Err(e) => {
                        log::warn!("could not read duration from ready player: {e:#}");
                        self.state.duration = 0.0;
                    }
                }
                self.handle = Some(handle);
                self.lifecycle = Lifecycle::Ready;
                log::info!("player ready, duration {:.1}s", self.state.duration);
            }
            PlayerEvent::StateChange(code) => {
                let code = PlayerStateCode::from_code(code);
                self.state.is_playing = code == Some(PlayerStateCode::Playing);
                if let Some(code) = code {
                    self.lifecycle = match code {
                        PlayerStateCode::Playing => Lifecycle::Playing,
                        PlayerStateCode::Paused => Lifecycle::Paused,
                        PlayerStateCode::Buffering => Lifecycle::Buffering,
                        PlayerStateCode::Ended => Lifecycle::Ended,
                        PlayerStateCode::Unstarted | PlayerStateCode::Cued => Lifecycle::Ready,
                    };
                }
            }
            PlayerEvent::Error(info) => {
                log::error!("player error: {info}");
                // The handle is kept on purpose so the controls stay
                // consistent with whatever the player was last doing.
                self.error = Some(PLAYER_ERROR_MESSAGE.to_string());
                self.lifecycle = Lifecycle::Errored;
            }
        }
    }

    /// Refresh the elapsed-time snapshot if the poll cadence is due.
    ///
    /// The poll is a scoped resource: it only runs while a handle is
    /// held, and [`detach`](Self::detach) cancels it on every exit path.
    pub fn tick(&mut self, now: Instant) {
        let Some(handle) = &mut self.handle else {
            return;
        };
        let due = self
            .last_poll
            .is_none_or(|last| now.duration_since(last) >= POLL_INTERVAL);
        if !due {
            return;
        }
        self.last_poll = Some(now);
        match handle.current_time() {
            Ok(current) => self.state.current_time = current,
            Err(e) => log::warn!("position poll failed: {e:#}"),
        }
    }

    /// Seek by a signed offset from the current position, clamped to
    /// `[0, duration]`. No-op when no handle is held.
    pub fn seek_by(&mut self, offset: f64) {
        let duration = self.state.duration;
        let Some(handle) = &mut self.handle else {
            return;
        };
        let current = match handle.current_time() {
            Ok(current) => current,
            Err(e) => {
                log::warn!("relative seek aborted, position unreadable: {e:#}");
                return;
            }
        };
        let target = (current + offset).clamp(0.0, duration);
        if let Err(e) = handle.seek_to(target, true) {
            log::warn!("relative seek to {target:.1}s failed: {e:#}");
        }
    }

    /// Toggle between play and pause. Trusts the locally cached
    /// `is_playing`, which may be momentarily stale (e.g. during
    /// buffering); the next state-change event corrects it. No-op when
    /// no handle is held.
    pub fn toggle_play_pause(&mut self) {
        let is_playing = self.state.is_playing;
        let Some(handle) = &mut self.handle else {
            return;
        };
        let result = if is_playing {
            handle.pause()
        } else {
            handle.play()
        };
        if let Err(e) = result {
            log::warn!("play/pause command failed: {e:#}");
        }
    }

    /// Seek to an absolute time, deliberately not clamped to duration;
    /// out-of-range targets are the external player's business. No-op
    /// when no handle is held.
    pub fn jump_to(&mut self, seconds: f64) {
        let Some(handle) = &mut self.handle else {
            return;
        };
        if let Err(e) = handle.seek_to(seconds, true) {
            log::warn!("absolute jump to {seconds:.1}s failed: {e:#}");
        }
    }

    /// Drop the handle reference and stop the poll. Called when the
    /// identifier changes or the owning view is torn down.
    pub fn detach(&mut self) {
        self.handle = None;
        self.last_poll = None;
        self.state = PlaybackState::default();
        self.lifecycle = Lifecycle::Unready;
    }

    /// Whether a live handle reference is currently held. Controls must
    /// treat `false` as fully disabled.
    pub fn is_attached(&self) -> bool {
        self.handle.is_some()
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Take the pending user-visible error message, if any.
    pub fn take_error(&mut self) -> Option<String> {
        self.error.take()
    }
}
