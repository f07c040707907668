//! Destination ids for resources copied into the public namespace.

use crate::codec::ResourceId;
use crate::feature::{FeatureType, SharingType};
use crate::key::add_version_to_name;
use crate::settings::PublishSettings;
use crate::version::{DEFAULT_VERSION, is_valid_version};
use tracing::trace;

/// Builds target ids in the public namespace.
///
/// The builder only holds settings; [`create_target_url`] is a pure function
/// of its arguments.
#[derive(Debug, Clone, Default)]
pub struct TargetUrlBuilder {
    settings: PublishSettings,
}

impl TargetUrlBuilder {
    pub fn new(settings: PublishSettings) -> Self {
        Self { settings }
    }

    pub fn with_default_version(mut self, version: impl Into<String>) -> Self {
        self.settings.default_version = version.into();
        self
    }

    pub fn with_public_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.settings.public_prefix = prefix.into();
        self
    }

    pub fn settings(&self) -> &PublishSettings {
        &self.settings
    }

    /// `{publicPrefix}/{publicPath}/`, the folder a request publishes into.
    pub fn target_folder(&self, public_path: &str) -> String {
        let mut folder = self.settings.public_prefix.clone();
        for segment in public_path.split('/').filter(|s| !s.is_empty()) {
            folder.push('/');
            folder.push_str(segment);
        }
        folder.push('/');
        folder
    }

    /// Destination id for `source_id` published under `public_path`.
    ///
    /// Folder kinds keep their whole hierarchy below the source bucket and
    /// end with a folder marker. Every other kind keeps only its leaf name.
    /// Chat and prompt entities always get a version suffix: `version` when
    /// it is well-formed, the default version otherwise. Other features
    /// never get one.
    ///
    /// # Examples
    ///
    /// ```
    /// use pubpath::v1::{FeatureType, SharingType, TargetUrlBuilder};
    ///
    /// let builder = TargetUrlBuilder::default();
    /// let target = builder.create_target_url(
    ///     FeatureType::Chat,
    ///     "teamA",
    ///     "conversations/bucket/folder/chat",
    ///     SharingType::Conversation,
    ///     None,
    /// );
    /// assert_eq!(target, "conversations/public/teamA/chat__v0.0.1");
    ///
    /// let folder = builder.create_target_url(
    ///     FeatureType::Prompt,
    ///     "teamA",
    ///     "prompts/bucket/shared/greetings/",
    ///     SharingType::PromptFolder,
    ///     Some("2.0"),
    /// );
    /// assert_eq!(folder, "prompts/public/teamA/shared/greetings/");
    /// ```
    pub fn create_target_url(
        &self,
        feature: FeatureType,
        public_path: &str,
        source_id: &str,
        kind: SharingType,
        version: Option<&str>,
    ) -> String {
        match ResourceId::parse(source_id) {
            Ok(id) => self.target_for_id(feature, public_path, &id, kind, version),
            Err(err) => {
                trace!(%err, source_id, "source id does not parse; keeping its last segment");
                let body = source_id.strip_suffix('/').unwrap_or(source_id);
                let leaf = body.rsplit('/').next().unwrap_or(body);
                self.assemble(feature, public_path, leaf, kind, version)
            }
        }
    }

    /// [`create_target_url`](Self::create_target_url) for an already parsed id.
    pub fn target_for_id(
        &self,
        feature: FeatureType,
        public_path: &str,
        source: &ResourceId,
        kind: SharingType,
        version: Option<&str>,
    ) -> String {
        let retained = if kind.is_folder() {
            source.relative_path()
        } else {
            source.leaf().unwrap_or(&source.bucket).to_string()
        };
        self.assemble(feature, public_path, &retained, kind, version)
    }

    /// The version a target will carry when `requested` is not usable.
    ///
    /// A malformed configured default is replaced by [`DEFAULT_VERSION`].
    pub fn default_version(&self) -> &str {
        if is_valid_version(&self.settings.default_version) {
            &self.settings.default_version
        } else {
            DEFAULT_VERSION
        }
    }

    fn assemble(
        &self,
        feature: FeatureType,
        public_path: &str,
        retained: &str,
        kind: SharingType,
        version: Option<&str>,
    ) -> String {
        let mut target = format!("{}/{}", feature.api_key(), self.target_folder(public_path));
        target.push_str(retained);

        if kind.is_folder() {
            if !retained.is_empty() {
                target.push('/');
            }
        } else if feature.is_versionable() {
            let version = match version {
                Some(v) if is_valid_version(v) => v,
                other => {
                    let fallback = self.default_version();
                    trace!(
                        id = %target,
                        requested = ?other,
                        default = %fallback,
                        "falling back to default version"
                    );
                    fallback
                }
            };
            target = add_version_to_name(&target, version);
        }
        target
    }
}

/// [`TargetUrlBuilder::create_target_url`] with default settings.
pub fn create_target_url(
    feature: FeatureType,
    public_path: &str,
    source_id: &str,
    kind: SharingType,
    version: Option<&str>,
) -> String {
    TargetUrlBuilder::default().create_target_url(feature, public_path, source_id, kind, version)
}
