#![doc = include_str!("../README.md")]

mod codec;
mod diff;
mod error;
mod feature;
mod group;
mod key;
mod request;
mod settings;
mod target;
mod version;

pub mod v1 {
    //! Versioned public API for publication ids, versions, and diffs.
    //!
    //! Everything is re-exported from this module, in five groups:
    //!
    //! # Ids
    //!
    //! - [`ResourceId`] — a decoded `{featureKey}/{bucket}/{segments...}` id
    //! - [`encode_api_url`] / [`decode_api_url`] — per-segment percent encoding
    //! - [`FeatureType`], [`SharingType`] — what an id belongs to
    //!
    //! # Versions
    //!
    //! - [`compare_versions`] — descending comparator, [`NA_VERSION`] lowest
    //! - [`find_latest_version`], [`is_valid_version`]
    //! - [`add_version_to_name`], [`parse_key`] — embedding in leaf names
    //!
    //! # Publishing
    //!
    //! - [`TargetUrlBuilder`], [`create_target_url`] — destination ids
    //! - [`PublicationResource`], [`PublicationRequest`] — request payloads
    //!
    //! # Listings
    //!
    //! - [`map_published_items`] — fold a listing into [`PublicVersionGroup`]s
    //!
    //! # Review
    //!
    //! - [`get_items_ids_to_remove_and_hide`] — delete vs. hide on rejection
    //!
    //! # Example — publish a chat, then read it back from a listing
    //!
    //! ```
    //! use pubpath::v1::*;
    //!
    //! let target = create_target_url(
    //!     FeatureType::Chat,
    //!     "teamA",
    //!     "conversations/bucket/folder/chat",
    //!     SharingType::Conversation,
    //!     None,
    //! );
    //! assert_eq!(target, format!("conversations/public/teamA/chat__v{}", DEFAULT_VERSION));
    //!
    //! let newer = create_target_url(
    //!     FeatureType::Chat,
    //!     "teamA",
    //!     "conversations/bucket/folder/chat",
    //!     SharingType::Conversation,
    //!     Some("0.1.0"),
    //! );
    //!
    //! let listing = vec![BackendItem::new(newer.clone()), BackendItem::new(target)];
    //! let mapped = map_published_items(&listing, FeatureType::Chat);
    //! let group = &mapped.public_version_groups["conversations/public/teamA/chat"];
    //! assert_eq!(group.selected_version.id, newer);
    //! ```

    pub use crate::codec::{
        PUBLIC_URL_PREFIX, ResourceId, decode_api_url, encode_api_url, is_root_id,
        parent_folder_id,
    };
    pub use crate::diff::{
        ItemsToRemoveAndHide, ResourceToReview, Reviewable, get_items_ids_to_remove_and_hide,
    };
    pub use crate::error::{PublicationError, Result};
    pub use crate::feature::{FeatureType, SharingType};
    pub use crate::group::{
        BackendItem, ItemDetails, MappedPublishedItems, PublicVersionGroup, PublishedItem,
        VersionInfo, map_published_items,
    };
    pub use crate::key::{
        MODEL_SEPARATOR, ParseOptions, ParsedKey, PublicationInfo, VERSION_SEPARATOR,
        add_version_to_name, parse_conversation_key, parse_key, parse_prompt_key, split_version,
    };
    pub use crate::request::{
        PublicationRequest, PublicationResource, PublishAction, PublishEntry, unpublish_resource,
    };
    pub use crate::settings::PublishSettings;
    pub use crate::target::{TargetUrlBuilder, create_target_url};
    pub use crate::version::{
        DEFAULT_VERSION, NA_VERSION, compare_versions, find_latest_version, is_valid_version,
    };
}
