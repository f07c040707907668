//! Folding published listings into per-identity version groups.

use crate::codec::{ResourceId, is_root_id, parent_folder_id};
use crate::feature::FeatureType;
use crate::key::{ParseOptions, PublicationInfo, VERSION_SEPARATOR, parse_key};
use crate::version::{compare_versions, find_latest_version};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// One entry of a backend listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendItem {
    pub id: String,
    /// Milliseconds since the Unix epoch; conversations only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_activity_date: Option<i64>,
}

impl BackendItem {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            last_activity_date: None,
        }
    }

    pub fn with_last_activity_date(mut self, millis: i64) -> Self {
        self.last_activity_date = Some(millis);
        self
    }
}

/// A known version of a logical item and the id it lives at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {
    pub version: String,
    pub id: String,
}

/// Every known version of one logical item, plus the selected (latest) one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicVersionGroup {
    pub selected_version: VersionInfo,
    /// In input order.
    pub all_versions: Vec<VersionInfo>,
}

impl PublicVersionGroup {
    fn new(info: VersionInfo) -> Self {
        Self {
            selected_version: info.clone(),
            all_versions: vec![info],
        }
    }

    /// All versions, latest first. Equal versions keep input order.
    pub fn versions_sorted(&self) -> Vec<&VersionInfo> {
        let mut sorted: Vec<&VersionInfo> = self.all_versions.iter().collect();
        sorted.sort_by(|a, b| compare_versions(&a.version, &b.version));
        sorted
    }
}

/// Feature-specific fields of a [`PublishedItem`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ItemDetails {
    #[serde(rename_all = "camelCase")]
    Conversation {
        model_id: Option<String>,
        last_activity_date: Option<DateTime<Utc>>,
    },
    Prompt,
    Other,
}

/// A listing entry with its identity derived from the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedItem {
    pub id: String,
    pub name: String,
    pub folder_id: String,
    /// The item sits directly in a bucket root.
    pub published_with_me: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication_info: Option<PublicationInfo>,
    pub details: ItemDetails,
}

impl PublishedItem {
    /// Id with the embedded version removed; the id itself when unversioned.
    pub fn id_without_version(&self) -> &str {
        match &self.publication_info {
            Some(info) => strip_version(&self.id, &info.version),
            None => &self.id,
        }
    }
}

/// Result of [`map_published_items`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappedPublishedItems {
    /// Keyed by id without version.
    pub public_version_groups: BTreeMap<String, PublicVersionGroup>,
    /// One per input entry, in input order.
    pub items: Vec<PublishedItem>,
}

impl MappedPublishedItems {
    /// Unversioned items plus, for each group, the item at its selected id.
    pub fn selected_items(&self) -> Vec<&PublishedItem> {
        self.items
            .iter()
            .filter(|item| match &item.publication_info {
                None => true,
                Some(_) => self
                    .public_version_groups
                    .get(item.id_without_version())
                    .is_some_and(|group| group.selected_version.id == item.id),
            })
            .collect()
    }

    fn with_item(mut self, raw: &BackendItem, feature: FeatureType) -> Self {
        let (leaf, folder_id, published_with_me) = match ResourceId::parse(&raw.id) {
            Ok(id) => {
                let leaf = id.leaf().unwrap_or(&id.bucket).to_string();
                (leaf, id.parent_folder_id(), id.in_root_folder())
            }
            Err(err) => {
                trace!(%err, "listing id does not parse; reading it as a plain path");
                let leaf = raw.id.rsplit('/').next().unwrap_or(&raw.id).to_string();
                let folder_id = parent_folder_id(&raw.id);
                let in_root = is_root_id(&folder_id);
                (leaf, folder_id, in_root)
            }
        };
        let parsed = parse_key(feature, &leaf, ParseOptions::with_version());

        if let Some(info) = &parsed.publication_info {
            let key = strip_version(&raw.id, &info.version).to_string();
            let entry = VersionInfo {
                version: info.version.clone(),
                id: raw.id.clone(),
            };
            match self.public_version_groups.get_mut(&key) {
                None => {
                    debug!(group = %key, version = %entry.version, "new version group");
                    self.public_version_groups
                        .insert(key, PublicVersionGroup::new(entry));
                }
                Some(group) => {
                    group.all_versions.push(entry);
                    let latest = find_latest_version(
                        group.all_versions.iter().map(|v| v.version.as_str()),
                    );
                    if latest != group.selected_version.version
                        && let Some(found) = group.all_versions.iter().find(|v| v.version == latest)
                    {
                        debug!(
                            group = %key,
                            from = %group.selected_version.version,
                            to = %found.version,
                            "selected version changed"
                        );
                        group.selected_version = found.clone();
                    }
                }
            }
        }

        let details = match feature {
            FeatureType::Chat => ItemDetails::Conversation {
                model_id: parsed.model_id,
                last_activity_date: raw
                    .last_activity_date
                    .and_then(DateTime::<Utc>::from_timestamp_millis),
            },
            FeatureType::Prompt => ItemDetails::Prompt,
            FeatureType::File | FeatureType::Application => ItemDetails::Other,
        };
        self.items.push(PublishedItem {
            id: raw.id.clone(),
            name: parsed.name,
            folder_id,
            published_with_me,
            publication_info: parsed.publication_info,
            details,
        });
        self
    }
}

fn strip_version<'a>(id: &'a str, version: &str) -> &'a str {
    id.strip_suffix(version)
        .and_then(|rest| rest.strip_suffix(VERSION_SEPARATOR))
        .unwrap_or(id)
}

/// Group a published listing by logical identity.
///
/// Each versioned entry joins the group of its id without version; the
/// group's selection moves only when a strictly higher version arrives, so
/// equal versions keep the earlier selection. Every entry, versioned or
/// not, yields one [`PublishedItem`].
///
/// # Examples
///
/// ```
/// use pubpath::v1::{map_published_items, BackendItem, FeatureType};
///
/// let listing = vec![
///     BackendItem::new("prompts/public/teamA/greeting__v1.0"),
///     BackendItem::new("prompts/public/teamA/greeting__v1.10"),
///     BackendItem::new("prompts/public/teamA/greeting__v1.2"),
///     BackendItem::new("prompts/public/draft"),
/// ];
/// let mapped = map_published_items(&listing, FeatureType::Prompt);
///
/// assert_eq!(mapped.items.len(), 4);
/// let group = &mapped.public_version_groups["prompts/public/teamA/greeting"];
/// assert_eq!(group.selected_version.version, "1.10");
/// assert_eq!(group.all_versions.len(), 3);
/// assert!(mapped.items[3].published_with_me);
/// ```
pub fn map_published_items(items: &[BackendItem], feature: FeatureType) -> MappedPublishedItems {
    items
        .iter()
        .fold(MappedPublishedItems::default(), |acc, item| {
            acc.with_item(item, feature)
        })
}
