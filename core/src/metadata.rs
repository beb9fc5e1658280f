//! Title/channel lookup through the public oEmbed endpoint.
//!
//! One fetch per identifier change, fire-and-forget on a background
//! thread, result pumped back over a channel on the UI tick. Results are
//! never cached and failed fetches are never retried; switching back to
//! the same identifier re-fetches.

use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

const OEMBED_ENDPOINT: &str = "https://www.youtube.com/oembed";
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Fixed message shown in the metadata region when a fetch fails.
pub const METADATA_ERROR_MESSAGE: &str = "Failed to load video information";

fn unknown_title() -> String {
    "Unknown Title".to_string()
}

fn unknown_channel() -> String {
    "Unknown Channel".to_string()
}

/// The slice of the oEmbed response this viewer displays. Missing
/// fields fall back to fixed placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VideoMetadata {
    #[serde(default = "unknown_title")]
    pub title: String,
    #[serde(default = "unknown_channel")]
    pub author_name: String,
}

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("metadata request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("oEmbed endpoint returned HTTP {0}")]
    Status(u16),
}

/// Fetch title and channel for a video identifier.
pub fn fetch(
    client: &reqwest::blocking::Client,
    video_id: &str,
) -> Result<VideoMetadata, MetadataError> {
    let watch_url = format!("https://www.youtube.com/watch?v={video_id}");
    let response = client
        .get(OEMBED_ENDPOINT)
        .query(&[("url", watch_url.as_str()), ("format", "json")])
        .send()?;
    if !response.status().is_success() {
        return Err(MetadataError::Status(response.status().as_u16()));
    }
    Ok(response.json()?)
}

/// Display status of the metadata region.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MetadataStatus {
    /// No video loaded yet.
    #[default]
    Idle,
    /// A lookup is in flight.
    Loading,
    Loaded(VideoMetadata),
    /// Scoped to the metadata region; never blocks playback.
    Failed(&'static str),
}

type LookupOutcome = (String, Result<VideoMetadata, MetadataError>);

/// Tracks the in-flight lookup for the current video identifier.
///
/// The request is not cancellable mid-flight; instead the identifier
/// captured at request time is compared against the current one before a
/// result is applied, so a slow response for an abandoned identifier can
/// never overwrite a newer video's metadata.
#[derive(Default)]
pub struct MetadataLookup {
    status: MetadataStatus,
    requested: Option<String>,
    results: Option<Receiver<LookupOutcome>>,
}

impl MetadataLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start one lookup for the given identifier, replacing any pending
    /// one.
    pub fn lookup(&mut self, video_id: &str) {
        let (tx, rx) = mpsc::channel();
        let id = video_id.to_string();
        self.requested = Some(id.clone());
        self.status = MetadataStatus::Loading;
        self.results = Some(rx);

        thread::spawn(move || {
            let client = match reqwest::blocking::Client::builder()
                .timeout(FETCH_TIMEOUT)
                .build()
            {
                Ok(client) => client,
                Err(e) => {
                    let _ = tx.send((id, Err(e.into())));
                    return;
                }
            };
            let outcome = fetch(&client, &id);
            // The receiver may already be gone if another video was
            // loaded in the meantime.
            let _ = tx.send((id, outcome));
        });
    }

    /// Drain finished lookups; called from the UI tick.
    pub fn pump(&mut self) {
        let Some(results) = &self.results else {
            return;
        };
        let finished: Vec<LookupOutcome> = results.try_iter().collect();
        for (id, outcome) in finished {
            self.accept(&id, outcome);
        }
    }

    pub fn status(&self) -> &MetadataStatus {
        &self.status
    }

    fn accept(&mut self, id: &str, outcome: Result<VideoMetadata, MetadataError>) {
        if self.requested.as_deref() != Some(id) {
            log::debug!("dropping stale metadata response for {id}");
            return;
        }
        self.status = match outcome {
            Ok(metadata) => MetadataStatus::Loaded(metadata),
            Err(e) => {
                log::warn!("metadata lookup for {id} failed: {e}");
                MetadataStatus::Failed(METADATA_ERROR_MESSAGE)
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(title: &str, channel: &str) -> VideoMetadata {
        VideoMetadata {
            title: title.to_string(),
            author_name: channel.to_string(),
        }
    }

    #[test]
    fn missing_fields_fall_back_to_placeholders() {
        let parsed: VideoMetadata = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.title, "Unknown Title");
        assert_eq!(parsed.author_name, "Unknown Channel");

        let parsed: VideoMetadata =
            serde_json::from_str(r#"{"title": "A song", "author_name": "A band"}"#).unwrap();
        assert_eq!(parsed, metadata("A song", "A band"));
    }

    #[test]
    fn stale_response_is_dropped() {
        let mut lookup = MetadataLookup::new();
        lookup.requested = Some("B".to_string());
        lookup.status = MetadataStatus::Loading;

        // A's slow response arrives after the switch to B.
        lookup.accept("A", Ok(metadata("old video", "old channel")));
        assert_eq!(lookup.status, MetadataStatus::Loading);

        lookup.accept("B", Ok(metadata("new video", "new channel")));
        assert_eq!(
            lookup.status,
            MetadataStatus::Loaded(metadata("new video", "new channel"))
        );
    }

    #[test]
    fn failure_sets_fixed_scoped_message() {
        let mut lookup = MetadataLookup::new();
        lookup.requested = Some("A".to_string());
        lookup.accept("A", Err(MetadataError::Status(404)));
        assert_eq!(
            lookup.status,
            MetadataStatus::Failed(METADATA_ERROR_MESSAGE)
        );
    }

    #[test]
    fn pump_applies_results_from_the_channel() {
        let (tx, rx) = mpsc::channel();
        let mut lookup = MetadataLookup::new();
        lookup.requested = Some("abc123".to_string());
        lookup.status = MetadataStatus::Loading;
        lookup.results = Some(rx);

        lookup.pump();
        assert_eq!(*lookup.status(), MetadataStatus::Loading);

        tx.send(("stale".to_string(), Ok(metadata("old", "old"))))
            .unwrap();
        tx.send(("abc123".to_string(), Ok(metadata("A song", "A band"))))
            .unwrap();
        lookup.pump();
        assert_eq!(
            *lookup.status(),
            MetadataStatus::Loaded(metadata("A song", "A band"))
        );
    }

    #[test]
    fn new_lookup_enters_loading() {
        let mut lookup = MetadataLookup::new();
        lookup.lookup("abc123");
        assert_eq!(*lookup.status(), MetadataStatus::Loading);
        assert_eq!(lookup.requested.as_deref(), Some("abc123"));
    }
}
