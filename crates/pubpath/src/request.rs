//! Publish/unpublish resources and the request payload that carries them.

use crate::codec::ResourceId;
use crate::error::Result;
use crate::feature::SharingType;
use crate::target::TargetUrlBuilder;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PublishAction {
    Add,
    Delete,
}

/// One resource of a publication request.
///
/// ADD carries the decoded origin id and the destination id; DELETE only
/// the decoded id being removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicationResource {
    pub action: PublishAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    pub target_url: String,
}

impl PublicationResource {
    pub fn is_add(&self) -> bool {
        self.action == PublishAction::Add
    }
}

/// What to publish: an encoded source url and its sharing kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishEntry {
    pub source_url: String,
    pub kind: SharingType,
    pub version: Option<String>,
}

impl PublishEntry {
    pub fn new(source_url: impl Into<String>, kind: SharingType) -> Self {
        Self {
            source_url: source_url.into(),
            kind,
            version: None,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }
}

impl TargetUrlBuilder {
    /// ADD resource copying `entry` under `public_path`.
    pub fn publish_resource(
        &self,
        public_path: &str,
        entry: &PublishEntry,
    ) -> Result<PublicationResource> {
        let source = ResourceId::from_api_url(&entry.source_url)?;
        let target_url = self.target_for_id(
            entry.kind.feature_type(),
            public_path,
            &source,
            entry.kind,
            entry.version.as_deref(),
        );
        Ok(PublicationResource {
            action: PublishAction::Add,
            source_url: Some(source.to_string()),
            target_url,
        })
    }
}

/// DELETE resource for an already-published url.
pub fn unpublish_resource(url: &str) -> Result<PublicationResource> {
    Ok(PublicationResource {
        action: PublishAction::Delete,
        source_url: None,
        target_url: ResourceId::from_api_url(url)?.to_string(),
    })
}

/// Payload submitted to create a publication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicationRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub target_folder: String,
    pub resources: Vec<PublicationResource>,
}

impl PublicationRequest {
    /// Build a request publishing `entries` and unpublishing `removals`
    /// under `public_path`. ADD resources come first, in entry order.
    ///
    /// # Examples
    ///
    /// ```
    /// use pubpath::v1::{PublicationRequest, PublishEntry, SharingType, TargetUrlBuilder};
    ///
    /// let request = PublicationRequest::build(
    ///     &TargetUrlBuilder::default(),
    ///     Some("Q3 prompts"),
    ///     "teamA",
    ///     &[PublishEntry::new("prompts/bucket/my%20prompt", SharingType::Prompt)],
    ///     &["prompts/public/teamA/old__v0.0.1"],
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(request.target_folder, "public/teamA/");
    /// assert_eq!(request.resources[0].source_url.as_deref(), Some("prompts/bucket/my prompt"));
    /// assert_eq!(request.resources[0].target_url, "prompts/public/teamA/my prompt__v0.0.1");
    /// assert_eq!(request.resources[1].source_url, None);
    /// ```
    pub fn build(
        builder: &TargetUrlBuilder,
        name: Option<&str>,
        public_path: &str,
        entries: &[PublishEntry],
        removals: &[&str],
    ) -> Result<Self> {
        let mut resources = entries
            .iter()
            .map(|entry| builder.publish_resource(public_path, entry))
            .collect::<Result<Vec<_>>>()?;
        for url in removals {
            resources.push(unpublish_resource(url)?);
        }
        Ok(Self {
            name: name.map(str::to_string),
            target_folder: builder.target_folder(public_path),
            resources,
        })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PublicationError;

    #[test]
    fn test_publish_resource_decodes_source() {
        let builder = TargetUrlBuilder::default();
        let entry = PublishEntry::new(
            "conversations/bucket/f%20x/gpt-4__chat",
            SharingType::Conversation,
        )
        .with_version("1.0");
        let resource = builder.publish_resource("teamA", &entry).unwrap();
        assert!(resource.is_add());
        assert_eq!(
            resource.source_url.as_deref(),
            Some("conversations/bucket/f x/gpt-4__chat")
        );
        assert_eq!(resource.target_url, "conversations/public/teamA/gpt-4__chat__v1.0");
    }

    #[test]
    fn test_publish_folder_resource() {
        let builder = TargetUrlBuilder::default();
        let entry = PublishEntry::new("prompts/bucket/lib/", SharingType::PromptFolder);
        let resource = builder.publish_resource("teamA", &entry).unwrap();
        assert_eq!(resource.target_url, "prompts/public/teamA/lib/");
    }

    #[test]
    fn test_unpublish_resource() {
        let resource = unpublish_resource("files/public/teamA/a%20b.txt").unwrap();
        assert_eq!(resource.action, PublishAction::Delete);
        assert_eq!(resource.source_url, None);
        assert_eq!(resource.target_url, "files/public/teamA/a b.txt");
    }

    #[test]
    fn test_bad_encoding_is_an_error() {
        let err = unpublish_resource("files/public/%FF").unwrap_err();
        assert!(matches!(err, PublicationError::Decode { .. }));
    }

    #[test]
    fn test_ids_without_bucket_are_rejected() {
        let builder = TargetUrlBuilder::default();
        let entry = PublishEntry::new("my%20chat", SharingType::Conversation);
        let err = builder.publish_resource("teamA", &entry).unwrap_err();
        assert!(matches!(err, PublicationError::InvalidId(id) if id == "my chat"));

        let err = unpublish_resource("prompts//p__v1").unwrap_err();
        assert!(matches!(err, PublicationError::InvalidId(_)));
    }

    #[test]
    fn test_resource_json_shape() {
        let add = PublicationResource {
            action: PublishAction::Add,
            source_url: Some("prompts/b/p".into()),
            target_url: "prompts/public/t/p__v0.0.1".into(),
        };
        let json = serde_json::to_string(&add).unwrap();
        assert_eq!(
            json,
            r#"{"action":"ADD","sourceUrl":"prompts/b/p","targetUrl":"prompts/public/t/p__v0.0.1"}"#
        );

        let delete = unpublish_resource("prompts/public/t/p__v0.0.1").unwrap();
        let json = serde_json::to_string(&delete).unwrap();
        assert_eq!(json, r#"{"action":"DELETE","targetUrl":"prompts/public/t/p__v0.0.1"}"#);
    }

    #[test]
    fn test_request_roundtrip() {
        let request = PublicationRequest::build(
            &TargetUrlBuilder::default(),
            None,
            "teamA",
            &[PublishEntry::new("files/bucket/r.pdf", SharingType::File)],
            &[],
        )
        .unwrap();
        let json = request.to_json().unwrap();
        assert!(!json.contains("\"name\""));
        let parsed = PublicationRequest::from_json(&json).unwrap();
        assert_eq!(parsed, request);
        assert_eq!(parsed.resources[0].target_url, "files/public/teamA/r.pdf");
    }

    #[test]
    fn test_request_from_json_invalid() {
        assert!(PublicationRequest::from_json(r#"{"resources":[]}"#).is_err());
    }
}
