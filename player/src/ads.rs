//! Optional ad surface.
//!
//! The bootstrap fetch happens once at startup and only when a client
//! identifier is configured. Failures are caught and logged, never
//! surfaced to the user or allowed to affect playback.

use std::time::Duration;

use tubeview_core::AdsConfig;

const AD_SCRIPT_URL: &str = "https://pagead2.googlesyndication.com/pagead/js/adsbygoogle.js";

/// Fire-and-forget load of the third-party ad script.
pub fn bootstrap(config: &AdsConfig) {
    let Some(client_id) = config.client_id.clone() else {
        return;
    };
    std::thread::spawn(move || {
        let client = match reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
        {
            Ok(client) => client,
            Err(e) => {
                log::warn!("ad script init failed: {e}");
                return;
            }
        };
        match client
            .get(AD_SCRIPT_URL)
            .query(&[("client", client_id.as_str())])
            .send()
        {
            Ok(response) if response.status().is_success() => {
                log::info!("ad script loaded for client {client_id}");
            }
            Ok(response) => log::warn!("ad script load failed: HTTP {}", response.status()),
            Err(e) => log::warn!("ad script load failed: {e}"),
        }
    });
}

/// The sponsored slot rendered when both identifiers are configured.
pub struct AdSlot {
    pub client_id: String,
    pub slot_id: String,
}

impl AdSlot {
    pub fn from_config(config: &AdsConfig) -> Option<Self> {
        Some(Self {
            client_id: config.client_id.clone()?,
            slot_id: config.slot_id.clone()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_requires_both_identifiers() {
        let partial = AdsConfig {
            client_id: Some("ca-pub-123".to_string()),
            slot_id: None,
        };
        assert!(AdSlot::from_config(&partial).is_none());

        let full = AdsConfig {
            client_id: Some("ca-pub-123".to_string()),
            slot_id: Some("456".to_string()),
        };
        let slot = AdSlot::from_config(&full).unwrap();
        assert_eq!(slot.slot_id, "456");
    }
}
