pub mod config;
pub mod metadata;
pub mod player;
pub mod time;
pub mod url;

// Re-exports
pub use config::AdsConfig;
pub use metadata::{MetadataLookup, MetadataStatus, VideoMetadata};
pub use player::{
    Lifecycle, PlaybackState, PlayerAdapter, PlayerEvent, PlayerHandle, PlayerStateCode,
};
pub use time::format_time;
pub use url::{extract_video_id, is_video_url};
