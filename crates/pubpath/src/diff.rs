//! Splitting a publication's resources into ones to delete and ones to hide.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Anything that points at a resource surfaced for review.
pub trait Reviewable {
    fn review_url(&self) -> &str;
}

/// A resource an approver inspects before a publication is approved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceToReview {
    pub review_url: String,
    /// Publication request the entry belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication_url: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl ResourceToReview {
    pub fn new(review_url: impl Into<String>) -> Self {
        Self {
            review_url: review_url.into(),
            publication_url: None,
            extra: HashMap::new(),
        }
    }

    pub fn with_publication_url(mut self, url: impl Into<String>) -> Self {
        self.publication_url = Some(url.into());
        self
    }
}

impl Reviewable for ResourceToReview {
    fn review_url(&self) -> &str {
        &self.review_url
    }
}

impl Reviewable for str {
    fn review_url(&self) -> &str {
        self
    }
}

impl Reviewable for String {
    fn review_url(&self) -> &str {
        self
    }
}

impl<T: Reviewable + ?Sized> Reviewable for &T {
    fn review_url(&self) -> &str {
        (**self).review_url()
    }
}

/// Review urls of a publication split by what may be deleted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemsToRemoveAndHide {
    /// Still referenced by another pending review entry.
    pub items_to_hide_ids: Vec<String>,
    /// Referenced at most once; safe to delete.
    pub items_to_remove_ids: Vec<String>,
}

/// Partition `all_resources` by how often their review url occurs in
/// `resources_to_review`.
///
/// A url seen more than once is still needed by another pending review and
/// is hidden; everything else is removed. Each input resource lands in
/// exactly one list, in input order.
///
/// # Examples
///
/// ```
/// use pubpath::v1::{get_items_ids_to_remove_and_hide, ResourceToReview};
///
/// let to_review = vec![
///     ResourceToReview::new("u"),
///     ResourceToReview::new("u"),
///     ResourceToReview::new("v"),
/// ];
/// let split = get_items_ids_to_remove_and_hide(&["u", "v"], &to_review);
/// assert_eq!(split.items_to_hide_ids, vec!["u"]);
/// assert_eq!(split.items_to_remove_ids, vec!["v"]);
/// ```
pub fn get_items_ids_to_remove_and_hide<A, R>(
    all_resources: &[A],
    resources_to_review: &[R],
) -> ItemsToRemoveAndHide
where
    A: Reviewable,
    R: Reviewable,
{
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for entry in resources_to_review {
        *counts.entry(entry.review_url()).or_default() += 1;
    }

    let mut split = ItemsToRemoveAndHide::default();
    for resource in all_resources {
        let url = resource.review_url();
        if counts.get(url).copied().unwrap_or(0) > 1 {
            split.items_to_hide_ids.push(url.to_string());
        } else {
            split.items_to_remove_ids.push(url.to_string());
        }
    }

    debug!(
        hide = split.items_to_hide_ids.len(),
        remove = split.items_to_remove_ids.len(),
        "partitioned publication resources"
    );
    split
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reviews(urls: &[&str]) -> Vec<ResourceToReview> {
        urls.iter().map(|u| ResourceToReview::new(*u)).collect()
    }

    #[test]
    fn test_shared_url_is_hidden() {
        let all = reviews(&["u", "u"]);
        let split = get_items_ids_to_remove_and_hide(&all, &reviews(&["u", "u"]));
        assert_eq!(split.items_to_hide_ids, vec!["u", "u"]);
        assert!(split.items_to_remove_ids.is_empty());
    }

    #[test]
    fn test_single_reference_is_removed() {
        let all = reviews(&["u", "u"]);
        let split = get_items_ids_to_remove_and_hide(&all, &reviews(&["u"]));
        assert!(split.items_to_hide_ids.is_empty());
        assert_eq!(split.items_to_remove_ids, vec!["u", "u"]);
    }

    #[test]
    fn test_unreferenced_is_removed() {
        let split = get_items_ids_to_remove_and_hide(&["x"], &reviews(&["u", "u"]));
        assert_eq!(split.items_to_remove_ids, vec!["x"]);
    }

    #[test]
    fn test_every_resource_lands_once() {
        let all = ["a", "b", "c", "d"];
        let to_review = reviews(&["a", "b", "a", "c", "c", "c"]);
        let split = get_items_ids_to_remove_and_hide(&all, &to_review);
        assert_eq!(split.items_to_hide_ids, vec!["a", "c"]);
        assert_eq!(split.items_to_remove_ids, vec!["b", "d"]);
        assert_eq!(
            split.items_to_hide_ids.len() + split.items_to_remove_ids.len(),
            all.len()
        );
    }

    #[test]
    fn test_empty_inputs() {
        let none: [&str; 0] = [];
        let split = get_items_ids_to_remove_and_hide(&none, &reviews(&["u"]));
        assert_eq!(split, ItemsToRemoveAndHide::default());
    }

    #[test]
    fn test_review_entry_extra_fields() {
        let json = serde_json::json!({
            "reviewUrl": "conversations/public/t/c__v1",
            "publicationUrl": "publications/p1",
            "reviewed": false,
        });
        let entry: ResourceToReview = serde_json::from_value(json).unwrap();
        assert_eq!(entry.review_url(), "conversations/public/t/c__v1");
        assert_eq!(entry.publication_url.as_deref(), Some("publications/p1"));
        assert_eq!(entry.extra["reviewed"], serde_json::json!(false));
    }
}
