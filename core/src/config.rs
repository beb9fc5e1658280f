//! Deployment-time configuration.
//!
//! The entire environment-variable contract is two optional ad surface
//! values; when absent the ad surface is simply omitted.

use std::env;

pub const ADSENSE_CLIENT_VAR: &str = "TUBEVIEW_ADSENSE_CLIENT_ID";
pub const ADSENSE_SLOT_VAR: &str = "TUBEVIEW_ADSENSE_SLOT_ID";

/// Optional ad surface identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AdsConfig {
    pub client_id: Option<String>,
    pub slot_id: Option<String>,
}

impl AdsConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let clean = |value: Option<String>| {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        Self {
            client_id: clean(lookup(ADSENSE_CLIENT_VAR)),
            slot_id: clean(lookup(ADSENSE_SLOT_VAR)),
        }
    }

    /// The sponsored slot is rendered only when both values are present.
    pub fn slot_configured(&self) -> bool {
        self.client_id.is_some() && self.slot_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_variables_disable_the_surface() {
        let config = AdsConfig::from_lookup(|_| None);
        assert_eq!(config, AdsConfig::default());
        assert!(!config.slot_configured());
    }

    #[test]
    fn blank_values_count_as_absent() {
        let config = AdsConfig::from_lookup(|name| match name {
            ADSENSE_CLIENT_VAR => Some("  ".to_string()),
            ADSENSE_SLOT_VAR => Some(String::new()),
            _ => None,
        });
        assert_eq!(config, AdsConfig::default());
    }

    #[test]
    fn slot_needs_both_values() {
        let client_only = AdsConfig::from_lookup(|name| {
            (name == ADSENSE_CLIENT_VAR).then(|| "ca-pub-123".to_string())
        });
        assert_eq!(client_only.client_id.as_deref(), Some("ca-pub-123"));
        assert!(!client_only.slot_configured());

        let both = AdsConfig::from_lookup(|name| match name {
            ADSENSE_CLIENT_VAR => Some("ca-pub-123".to_string()),
            ADSENSE_SLOT_VAR => Some("456".to_string()),
            _ => None,
        });
        assert!(both.slot_configured());
    }
}
