use serde::{Deserialize, Serialize};

use crate::{error::Result, policy::QueryPolicy};

pub const DEFAULT_SETTINGS_KEY: &str = "theme_breakpoints";
pub const DEFAULT_EVENT_NAME: &str = "themeBreakpoint:changed";

/// Tracker configuration.
///
/// Every field is optional when deserializing:
///
/// ```
/// use theme_breakpoints::{QueryPolicy, TrackerConfig};
///
/// let config = TrackerConfig::from_json(r#"{ "queryPolicy": "verbatim" }"#).unwrap();
/// assert_eq!(config.query_policy, QueryPolicy::Verbatim);
/// assert_eq!(config.event_name, "themeBreakpoint:changed");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrackerConfig {
    /// Page-settings entry holding the JSON-encoded breakpoint payload.
    pub settings_key: String,
    /// Topic the change notification is published under.
    pub event_name: String,
    pub query_policy: QueryPolicy,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            settings_key: DEFAULT_SETTINGS_KEY.to_string(),
            event_name: DEFAULT_EVENT_NAME.to_string(),
            query_policy: QueryPolicy::default(),
        }
    }
}

impl TrackerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_settings_key(mut self, key: impl Into<String>) -> Self {
        self.settings_key = key.into();
        self
    }

    pub fn with_event_name(mut self, name: impl Into<String>) -> Self {
        self.event_name = name.into();
        self
    }

    pub fn with_query_policy(mut self, policy: QueryPolicy) -> Self {
        self.query_policy = policy;
        self
    }
}
