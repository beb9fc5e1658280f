//! The embedded player widget.
//!
//! Playback is delegated to an external mpv process: this module spawns
//! it for a video identifier, translates its JSON IPC events into
//! [`PlayerEvent`]s, and exposes a command handle over a second IPC
//! connection. The widget owns the child's lifecycle; the adapter only
//! ever sees a non-owning handle.

use std::io::{BufRead, BufReader, Write};
use std::os::unix::net::UnixStream;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use serde_json::{Value, json};
use tubeview_core::player::{PlayerEvent, PlayerHandle, PlayerStateCode};

/// Distinguishes socket paths when several embeds exist over one run.
static EMBED_SEQ: AtomicU64 = AtomicU64::new(0);

/// Upper bound on how long a command round-trip may block the caller.
const COMMAND_REPLY_TIMEOUT: Duration = Duration::from_millis(500);

/// Fixed display options passed to the embedded player.
#[derive(Debug, Clone)]
pub struct EmbedOptions {
    /// Show the player's own on-screen controls.
    pub show_controls: bool,
    /// Start playing immediately instead of paused.
    pub autoplay: bool,
    /// Suppress the player's extra on-screen decoration.
    pub minimal_osd: bool,
}

impl Default for EmbedOptions {
    fn default() -> Self {
        Self {
            show_controls: true,
            autoplay: false,
            minimal_osd: true,
        }
    }
}

/// A running embedded player for one video identifier.
pub struct EmbeddedPlayer {
    child: Child,
    socket_path: PathBuf,
    events: Receiver<PlayerEvent>,
}

impl EmbeddedPlayer {
    /// Launch the external player for a video identifier.
    pub fn spawn(video_id: &str, options: &EmbedOptions) -> Result<Self> {
        let seq = EMBED_SEQ.fetch_add(1, Ordering::Relaxed);
        let socket_path =
            std::env::temp_dir().join(format!("tubeview-{}-{seq}.sock", std::process::id()));
        let watch_url = format!("https://www.youtube.com/watch?v={video_id}");

        let mut command = Command::new("mpv");
        command
            .arg(format!("--input-ipc-server={}", socket_path.display()))
            .arg("--force-window=yes")
            .arg("--really-quiet")
            .arg(if options.autoplay {
                "--pause=no"
            } else {
                "--pause=yes"
            })
            .arg(if options.show_controls {
                "--osc=yes"
            } else {
                "--osc=no"
            })
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        if options.minimal_osd {
            command.arg("--no-osd-bar");
        }
        command.arg(&watch_url);

        let child = command
            .spawn()
            .context("failed to launch the embedded player (is mpv installed?)")?;
        log::info!("embedded player started for {video_id} (pid {})", child.id());

        let (tx, rx) = mpsc::channel();
        let reader_path = socket_path.clone();
        thread::spawn(move || run_event_reader(&reader_path, &tx));

        Ok(Self {
            child,
            socket_path,
            events: rx,
        })
    }

    /// Drain lifecycle events produced since the last call.
    pub fn poll_events(&mut self) -> Vec<PlayerEvent> {
        self.events.try_iter().collect()
    }
}

impl Drop for EmbeddedPlayer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
        let _ = std::fs::remove_file(&self.socket_path);
    }
}

fn connect_with_retry(path: &Path) -> Result<UnixStream> {
    // mpv creates the socket shortly after startup.
    for _ in 0..40 {
        match UnixStream::connect(path) {
            Ok(stream) => return Ok(stream),
            Err(_) => thread::sleep(Duration::from_millis(250)),
        }
    }
    Err(anyhow!(
        "embedded player IPC socket never appeared at {}",
        path.display()
    ))
}

/// Translate the player's IPC event stream into adapter events.
fn run_event_reader(path: &Path, events: &Sender<PlayerEvent>) {
    let stream = match connect_with_retry(path) {
        Ok(stream) => stream,
        Err(e) => {
            log::error!("embed event reader could not connect: {e:#}");
            let _ = events.send(PlayerEvent::Error(e.to_string()));
            return;
        }
    };
    let mut writer = match stream.try_clone() {
        Ok(writer) => writer,
        Err(e) => {
            let _ = events.send(PlayerEvent::Error(format!("embed IPC setup failed: {e}")));
            return;
        }
    };
    for (observe_id, property) in [(1, "pause"), (2, "eof-reached")] {
        let request = json!({ "command": ["observe_property", observe_id, property] });
        if writeln!(writer, "{request}").is_err() {
            let _ = events.send(PlayerEvent::Error("embed IPC setup failed".to_string()));
            return;
        }
    }

    let reader = BufReader::new(stream);
    for line in reader.lines() {
        let Ok(line) = line else { break };
        let Ok(message) = serde_json::from_str::<Value>(&line) else {
            continue;
        };
        match message.get("event").and_then(Value::as_str) {
            Some("file-loaded") => match MpvHandle::connect(path) {
                Ok(handle) => {
                    let _ = events.send(PlayerEvent::Ready(Box::new(handle)));
                }
                Err(e) => {
                    let _ = events.send(PlayerEvent::Error(format!(
                        "embed handle unavailable: {e:#}"
                    )));
                }
            },
            Some("property-change") => match message.get("name").and_then(Value::as_str) {
                Some("pause") => {
                    let paused = message.get("data").and_then(Value::as_bool).unwrap_or(true);
                    let code = if paused {
                        PlayerStateCode::Paused
                    } else {
                        PlayerStateCode::Playing
                    };
                    let _ = events.send(PlayerEvent::StateChange(code.code()));
                }
                Some("eof-reached")
                    if message.get("data").and_then(Value::as_bool) == Some(true) =>
                {
                    let _ =
                        events.send(PlayerEvent::StateChange(PlayerStateCode::Ended.code()));
                }
                _ => {}
            },
            Some("end-file") => {
                if message.get("reason").and_then(Value::as_str) == Some("error") {
                    let _ = events.send(PlayerEvent::Error(
                        "embedded player failed to play the video".to_string(),
                    ));
                }
            }
            _ => {}
        }
    }
    log::debug!("embed event stream closed");
}

/// Command connection to the running player. Request/response over its
/// IPC socket, separate from the event stream connection.
struct MpvHandle {
    reader: BufReader<UnixStream>,
    writer: UnixStream,
    next_request: u64,
}

impl MpvHandle {
    fn connect(path: &Path) -> Result<Self> {
        let stream = UnixStream::connect(path).context("embed command connection failed")?;
        // Handle calls run on the UI thread, so a reply that does not
        // come quickly is treated as a failed command rather than
        // stalling the draw loop.
        stream
            .set_read_timeout(Some(COMMAND_REPLY_TIMEOUT))
            .context("embed command connection rejected a read timeout")?;
        let writer = stream.try_clone().context("embed command connection split failed")?;
        Ok(Self {
            reader: BufReader::new(stream),
            writer,
            next_request: 1,
        })
    }

    fn request(&mut self, command: Value) -> Result<Value> {
        let request_id = self.next_request;
        self.next_request += 1;
        let line = json!({ "command": command, "request_id": request_id });
        writeln!(self.writer, "{line}").context("embed command write failed")?;

        let mut buf = String::new();
        loop {
            buf.clear();
            if self
                .reader
                .read_line(&mut buf)
                .context("embed command read failed")?
                == 0
            {
                return Err(anyhow!("embedded player closed the IPC connection"));
            }
            let Ok(message) = serde_json::from_str::<Value>(&buf) else {
                continue;
            };
            // Every IPC client also receives broadcast event lines; skip
            // anything that is not the reply to this request.
            if message.get("request_id").and_then(Value::as_u64) != Some(request_id) {
                continue;
            }
            let status = message
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("unknown");
            if status != "success" {
                return Err(anyhow!("embedded player rejected command: {status}"));
            }
            return Ok(message.get("data").cloned().unwrap_or(Value::Null));
        }
    }

    fn get_f64(&mut self, property: &str) -> Result<f64> {
        self.request(json!(["get_property", property]))?
            .as_f64()
            .ok_or_else(|| anyhow!("property {property} was not a number"))
    }
}

impl PlayerHandle for MpvHandle {
    fn current_time(&mut self) -> Result<f64> {
        self.get_f64("playback-time")
    }

    fn duration(&mut self) -> Result<f64> {
        self.get_f64("duration")
    }

    fn seek_to(&mut self, seconds: f64, allow_seek_ahead: bool) -> Result<()> {
        let mode = if allow_seek_ahead {
            "absolute"
        } else {
            "absolute+keyframes"
        };
        self.request(json!(["seek", seconds, mode])).map(|_| ())
    }

    fn play(&mut self) -> Result<()> {
        self.request(json!(["set_property", "pause", false])).map(|_| ())
    }

    fn pause(&mut self) -> Result<()> {
        self.request(json!(["set_property", "pause", true])).map(|_| ())
    }
}
