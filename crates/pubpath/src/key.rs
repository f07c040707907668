//! Leaf-name encodings for conversations and prompts.
//!
//! A conversation leaf is `{modelId}__{name}`, where the model prefix is
//! optional. Either kind may end in `__v{version}` once it belongs to a
//! publication lineage.

use crate::feature::FeatureType;
use crate::version::is_valid_version;
use serde::{Deserialize, Serialize};

/// Token between a leaf name and its embedded version.
pub const VERSION_SEPARATOR: &str = "__v";

/// Token between a conversation's model id and its name.
pub const MODEL_SEPARATOR: &str = "__";

/// Publication lineage recovered from a leaf name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicationInfo {
    pub version: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    pub parse_version: bool,
}

impl ParseOptions {
    pub fn with_version() -> Self {
        Self {
            parse_version: true,
        }
    }
}

/// A leaf name split into its logical parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedKey {
    pub name: String,
    pub model_id: Option<String>,
    pub publication_info: Option<PublicationInfo>,
}

/// Embed `version` into a leaf name.
///
/// # Examples
///
/// ```
/// use pubpath::v1::{add_version_to_name, parse_prompt_key, ParseOptions};
///
/// let key = add_version_to_name("greeting", "1.2.0");
/// assert_eq!(key, "greeting__v1.2.0");
///
/// let parsed = parse_prompt_key(&key, ParseOptions::with_version());
/// assert_eq!(parsed.name, "greeting");
/// assert_eq!(parsed.publication_info.unwrap().version, "1.2.0");
/// ```
pub fn add_version_to_name(name: &str, version: &str) -> String {
    format!("{}{}{}", name, VERSION_SEPARATOR, version)
}

/// Split a trailing well-formed version off `name`.
///
/// A suffix that is not a well-formed version (`"my__video"`) is part of
/// the name.
pub fn split_version(name: &str) -> (&str, Option<&str>) {
    match name.rsplit_once(VERSION_SEPARATOR) {
        Some((base, version)) if !base.is_empty() && is_valid_version(version) => {
            (base, Some(version))
        }
        _ => (name, None),
    }
}

fn version_info(version: Option<&str>, options: ParseOptions) -> Option<PublicationInfo> {
    version
        .filter(|_| options.parse_version)
        .map(|v| PublicationInfo {
            version: v.to_string(),
        })
}

pub fn parse_conversation_key(raw: &str, options: ParseOptions) -> ParsedKey {
    let (base, version) = split_version(raw);
    let (model_id, name) = match base.split_once(MODEL_SEPARATOR) {
        Some((model, name)) if !model.is_empty() && !name.is_empty() => {
            (Some(model.to_string()), name)
        }
        _ => (None, base),
    };
    ParsedKey {
        name: name.to_string(),
        model_id,
        publication_info: version_info(version, options),
    }
}

pub fn parse_prompt_key(raw: &str, options: ParseOptions) -> ParsedKey {
    let (base, version) = split_version(raw);
    ParsedKey {
        name: base.to_string(),
        model_id: None,
        publication_info: version_info(version, options),
    }
}

/// Parse a leaf name with the encoding of `feature`.
///
/// Features without versioned ids keep the raw name and never report a
/// publication lineage.
pub fn parse_key(feature: FeatureType, raw: &str, options: ParseOptions) -> ParsedKey {
    match feature {
        FeatureType::Chat => parse_conversation_key(raw, options),
        FeatureType::Prompt => parse_prompt_key(raw, options),
        FeatureType::File | FeatureType::Application => ParsedKey {
            name: raw.to_string(),
            model_id: None,
            publication_info: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_version() {
        assert_eq!(split_version("chat__v1.0"), ("chat", Some("1.0")));
        assert_eq!(split_version("chat"), ("chat", None));
        assert_eq!(split_version("my__video"), ("my__video", None));
        assert_eq!(split_version("__v1.0"), ("__v1.0", None));
        assert_eq!(split_version("a__v1.0__v2"), ("a__v1.0", Some("2")));
    }

    #[test]
    fn test_conversation_with_model_and_version() {
        let parsed =
            parse_conversation_key("gpt-4__Weekly sync__v0.0.3", ParseOptions::with_version());
        assert_eq!(parsed.model_id.as_deref(), Some("gpt-4"));
        assert_eq!(parsed.name, "Weekly sync");
        assert_eq!(parsed.publication_info.unwrap().version, "0.0.3");
    }

    #[test]
    fn test_conversation_without_model() {
        let parsed = parse_conversation_key("chat", ParseOptions::with_version());
        assert_eq!(parsed.model_id, None);
        assert_eq!(parsed.name, "chat");
        assert!(parsed.publication_info.is_none());
    }

    #[test]
    fn test_model_separator_not_confused_with_version() {
        let parsed = parse_conversation_key("gpt-4__vacation", ParseOptions::with_version());
        assert_eq!(parsed.model_id.as_deref(), Some("gpt-4"));
        assert_eq!(parsed.name, "vacation");
        assert!(parsed.publication_info.is_none());
    }

    #[test]
    fn test_version_ignored_unless_requested() {
        let parsed = parse_prompt_key("p__v2.0", ParseOptions::default());
        assert_eq!(parsed.name, "p");
        assert!(parsed.publication_info.is_none());
    }

    #[test]
    fn test_files_never_versioned() {
        let parsed = parse_key(FeatureType::File, "report__v1.0", ParseOptions::with_version());
        assert_eq!(parsed.name, "report__v1.0");
        assert!(parsed.publication_info.is_none());
    }

    #[test]
    fn test_parse_key_dispatch() {
        let chat = parse_key(FeatureType::Chat, "m__c__v1", ParseOptions::with_version());
        assert_eq!(chat.model_id.as_deref(), Some("m"));
        let prompt = parse_key(FeatureType::Prompt, "m__c__v1", ParseOptions::with_version());
        assert_eq!(prompt.name, "m__c");
        assert_eq!(prompt.model_id, None);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn embedded_version_roundtrips(
            name in "[a-zA-Z0-9 _-]{1,12}",
            parts in prop::collection::vec(0u32..100, 1..4),
        ) {
            let version = parts.iter().map(|p| p.to_string()).collect::<Vec<_>>().join(".");
            let key = add_version_to_name(&name, &version);
            for feature in [FeatureType::Chat, FeatureType::Prompt] {
                let parsed = parse_key(feature, &key, ParseOptions::with_version());
                prop_assert_eq!(parsed.publication_info.map(|i| i.version), Some(version.clone()));
            }
        }
    }
}
