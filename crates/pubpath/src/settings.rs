use crate::codec::PUBLIC_URL_PREFIX;
use crate::error::Result;
use crate::version::DEFAULT_VERSION;
use serde::{Deserialize, Serialize};

/// Namespace settings used when building target ids.
///
/// Every field is optional in JSON; missing fields take the backend's
/// defaults.
///
/// ```
/// use pubpath::v1::PublishSettings;
///
/// let settings = PublishSettings::from_json(r#"{ "defaultVersion": "1.0.0" }"#).unwrap();
/// assert_eq!(settings.default_version, "1.0.0");
/// assert_eq!(settings.public_prefix, "public");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PublishSettings {
    /// Version appended to chat/prompt targets when none (or a malformed
    /// one) is supplied.
    pub default_version: String,
    /// Bucket literal of the shared namespace.
    pub public_prefix: String,
}

impl Default for PublishSettings {
    fn default() -> Self {
        Self {
            default_version: DEFAULT_VERSION.to_string(),
            public_prefix: PUBLIC_URL_PREFIX.to_string(),
        }
    }
}

impl PublishSettings {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
