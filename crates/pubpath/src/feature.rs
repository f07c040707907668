use crate::error::{PublicationError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of artifact a resource id belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureType {
    Chat,
    Prompt,
    File,
    Application,
}

impl FeatureType {
    /// First segment of every id of this feature.
    pub fn api_key(self) -> &'static str {
        match self {
            FeatureType::Chat => "conversations",
            FeatureType::Prompt => "prompts",
            FeatureType::File => "files",
            FeatureType::Application => "applications",
        }
    }

    pub fn from_api_key(key: &str) -> Result<Self> {
        match key {
            "conversations" => Ok(FeatureType::Chat),
            "prompts" => Ok(FeatureType::Prompt),
            "files" => Ok(FeatureType::File),
            "applications" => Ok(FeatureType::Application),
            other => Err(PublicationError::UnknownFeature(other.to_string())),
        }
    }

    /// Only chats and prompts carry an embedded version in their ids.
    pub fn is_versionable(self) -> bool {
        matches!(self, FeatureType::Chat | FeatureType::Prompt)
    }
}

impl fmt::Display for FeatureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_key())
    }
}

/// What is being shared or published: a single entity or a folder of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SharingType {
    Conversation,
    ConversationFolder,
    Prompt,
    PromptFolder,
    File,
    Application,
}

impl SharingType {
    pub fn is_folder(self) -> bool {
        matches!(
            self,
            SharingType::ConversationFolder | SharingType::PromptFolder
        )
    }

    pub fn feature_type(self) -> FeatureType {
        match self {
            SharingType::Conversation | SharingType::ConversationFolder => FeatureType::Chat,
            SharingType::Prompt | SharingType::PromptFolder => FeatureType::Prompt,
            SharingType::File => FeatureType::File,
            SharingType::Application => FeatureType::Application,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_roundtrip() {
        for feature in [
            FeatureType::Chat,
            FeatureType::Prompt,
            FeatureType::File,
            FeatureType::Application,
        ] {
            assert_eq!(FeatureType::from_api_key(feature.api_key()).unwrap(), feature);
        }
    }

    #[test]
    fn test_unknown_api_key() {
        let err = FeatureType::from_api_key("toolsets").unwrap_err();
        assert!(matches!(err, PublicationError::UnknownFeature(k) if k == "toolsets"));
    }

    #[test]
    fn test_versionable() {
        assert!(FeatureType::Chat.is_versionable());
        assert!(FeatureType::Prompt.is_versionable());
        assert!(!FeatureType::File.is_versionable());
        assert!(!FeatureType::Application.is_versionable());
    }

    #[test]
    fn test_sharing_type() {
        assert!(SharingType::ConversationFolder.is_folder());
        assert!(SharingType::PromptFolder.is_folder());
        assert!(!SharingType::Conversation.is_folder());
        assert_eq!(
            SharingType::PromptFolder.feature_type(),
            FeatureType::Prompt
        );
        let json = serde_json::to_string(&SharingType::ConversationFolder).unwrap();
        assert_eq!(json, "\"conversation-folder\"");
    }
}
