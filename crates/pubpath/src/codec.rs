//! Resource ids and their percent-encoded api form.

use crate::error::{PublicationError, Result};
use std::fmt;

/// Bucket literal under which published resources live.
pub const PUBLIC_URL_PREFIX: &str = "public";

/// Percent-encode every `/`-separated segment of `id`, keeping the separators.
///
/// # Examples
///
/// ```
/// use pubpath::v1::{decode_api_url, encode_api_url};
///
/// let id = "conversations/bucket/my folder/gpt-4__chat #1";
/// let url = encode_api_url(id);
/// assert_eq!(url, "conversations/bucket/my%20folder/gpt-4__chat%20%231");
/// assert_eq!(decode_api_url(&url).unwrap(), id);
/// ```
pub fn encode_api_url(id: &str) -> String {
    id.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Inverse of [`encode_api_url`].
pub fn decode_api_url(url: &str) -> Result<String> {
    let segments = url
        .split('/')
        .map(|segment| {
            urlencoding::decode(segment)
                .map(|s| s.into_owned())
                .map_err(|source| PublicationError::Decode {
                    segment: segment.to_string(),
                    source,
                })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(segments.join("/"))
}

/// The id of the folder containing `id` (everything before the last segment).
///
/// A trailing folder marker is ignored, so the parent of
/// `"prompts/b/a/c/"` is `"prompts/b/a"`. Ids that do not parse as a
/// [`ResourceId`] are cut at their last `/`.
pub fn parent_folder_id(id: &str) -> String {
    match ResourceId::parse(id) {
        Ok(parsed) => parsed.parent_folder_id(),
        Err(_) => {
            let trimmed = id.strip_suffix('/').unwrap_or(id);
            match trimmed.rfind('/') {
                Some(idx) => trimmed[..idx].to_string(),
                None => trimmed.to_string(),
            }
        }
    }
}

/// Whether `id` names a bucket root (`{featureKey}/{bucket}`) or less.
pub fn is_root_id(id: &str) -> bool {
    match ResourceId::parse(id) {
        Ok(parsed) => parsed.is_root(),
        Err(_) => id.strip_suffix('/').unwrap_or(id).split('/').count() <= 2,
    }
}

/// A decoded resource id, split at its one parse/format boundary.
///
/// Textual form: `{featureKey}/{bucket}/{segments...}`, with a trailing `/`
/// when the id names a folder. The last segment of a non-folder id is the
/// leaf name, which may carry an embedded version.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceId {
    pub feature_key: String,
    pub bucket: String,
    pub segments: Vec<String>,
    pub is_folder: bool,
}

impl ResourceId {
    /// Parse a decoded id.
    ///
    /// Requires the feature key and bucket and rejects empty interior
    /// segments such as `a//b`.
    pub fn parse(id: &str) -> Result<Self> {
        let (body, is_folder) = match id.strip_suffix('/') {
            Some(body) => (body, true),
            None => (id, false),
        };
        let mut parts = body.split('/');
        let feature_key = parts.next().unwrap_or_default();
        let bucket = parts.next().unwrap_or_default();
        if feature_key.is_empty() || bucket.is_empty() {
            return Err(PublicationError::InvalidId(id.to_string()));
        }
        let segments: Vec<String> = parts.map(str::to_string).collect();
        if segments.iter().any(String::is_empty) {
            return Err(PublicationError::InvalidId(id.to_string()));
        }
        Ok(Self {
            feature_key: feature_key.to_string(),
            bucket: bucket.to_string(),
            segments,
            is_folder,
        })
    }

    /// Parse a percent-encoded api url.
    pub fn from_api_url(url: &str) -> Result<Self> {
        Self::parse(&decode_api_url(url)?)
    }

    /// Encode back into api form.
    pub fn to_api_url(&self) -> String {
        encode_api_url(&self.to_string())
    }

    /// Last segment, if the id goes below the bucket root.
    pub fn leaf(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// `{featureKey}/{bucket}` of this id.
    pub fn root_id(&self) -> String {
        format!("{}/{}", self.feature_key, self.bucket)
    }

    pub fn is_public(&self) -> bool {
        self.bucket == PUBLIC_URL_PREFIX
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Whether the containing folder is the bucket root.
    pub fn in_root_folder(&self) -> bool {
        self.segments.len() <= 1
    }

    /// Segments below the bucket, joined with `/`.
    pub fn relative_path(&self) -> String {
        self.segments.join("/")
    }

    /// Folder containing this resource, as a folder-less id string.
    pub fn parent_folder_id(&self) -> String {
        match self.segments.split_last() {
            Some((_, [])) | None => self.root_id(),
            Some((_, rest)) => format!("{}/{}", self.root_id(), rest.join("/")),
        }
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.feature_key, self.bucket)?;
        for segment in &self.segments {
            write!(f, "/{}", segment)?;
        }
        if self.is_folder {
            write!(f, "/")?;
        }
        Ok(())
    }
}

impl std::str::FromStr for ResourceId {
    type Err = PublicationError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
