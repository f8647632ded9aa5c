//! post::post_data
//!
//! The post data orchestrator.
//!
//! # Flow
//!
//! `create`: normalise, discover the post type, look up its templates,
//! render path and URL, resolve the permalink.
//!
//! `update`: fetch the stored record by URL, apply the update operation,
//! then run the same steps as `create` on the result.
//!
//! Neither writes to the store. The caller persists the returned record.

use std::sync::Arc;
use tracing::{debug, warn};

use super::errors::PostDataError;
use crate::core::config::Publication;
use crate::core::types::{PostRecord, PropertyBag};
use crate::date::{Clock, SystemClock};
use crate::jf2::{DiscoveredPostType, Jf2Normaliser, Normaliser, PostTypeDiscovery};
use crate::permalink::get_permalink;
use crate::store::{PostQuery, PostStore};
use crate::template::{render_path, RenderOptions};
use crate::update::UpdateOperation;

/// Post data orchestrator.
///
/// Holds no per-request state; one instance can serve concurrent requests.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use postdata::core::config::{PostTypeConfig, Publication};
/// use postdata::core::types::PropertyBag;
/// use postdata::post::PostData;
/// use postdata::store::MemoryStore;
/// use serde_json::json;
///
/// let publication = Publication::new("https://website.example").with_post_type(
///     "note",
///     PostTypeConfig::new("Note", "notes/{yyyy}/{slug}.md", "notes/{yyyy}/{slug}/"),
/// );
/// let post_data = PostData::new(Arc::new(MemoryStore::new()));
///
/// let properties = PropertyBag::try_from(json!({
///     "content": "Hello",
///     "published": "2020-05-01T10:00:00Z",
///     "mp-slug": "hello"
/// })).unwrap();
///
/// let record = post_data.create(&publication, properties).unwrap();
/// assert_eq!(record.path, "notes/2020/hello.md");
/// assert_eq!(record.url(), Some("https://website.example/notes/2020/hello/"));
/// ```
#[derive(Clone)]
pub struct PostData {
    store: Arc<dyn PostStore>,
    normaliser: Arc<dyn Normaliser>,
    discovery: Arc<dyn PostTypeDiscovery>,
    clock: Arc<dyn Clock>,
    render_options: RenderOptions,
}

impl std::fmt::Debug for PostData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostData")
            .field("store", &self.store.name())
            .field("clock", &self.clock)
            .field("render_options", &self.render_options)
            .finish_non_exhaustive()
    }
}

impl PostData {
    /// Orchestrator over `store` with the default normaliser, post type
    /// discovery and system clock.
    pub fn new(store: Arc<dyn PostStore>) -> Self {
        Self {
            store,
            normaliser: Arc::new(Jf2Normaliser),
            discovery: Arc::new(DiscoveredPostType),
            clock: Arc::new(SystemClock),
            render_options: RenderOptions::default(),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_normaliser(mut self, normaliser: Arc<dyn Normaliser>) -> Self {
        self.normaliser = normaliser;
        self
    }

    pub fn with_discovery(mut self, discovery: Arc<dyn PostTypeDiscovery>) -> Self {
        self.discovery = discovery;
        self
    }

    pub fn with_render_options(mut self, render_options: RenderOptions) -> Self {
        self.render_options = render_options;
        self
    }

    /// Build the record for a new post.
    ///
    /// # Errors
    ///
    /// - `Config` if the publication has no root URL
    /// - `Validation` if `properties` is empty
    /// - `UnsupportedType` if the discovered post type has no configuration
    /// - `Parse` if the post's date cannot be parsed
    pub fn create(
        &self,
        publication: &Publication,
        properties: PropertyBag,
    ) -> Result<PostRecord, PostDataError> {
        require_publication(publication)?;
        if properties.is_empty() {
            return Err(PostDataError::Validation(
                "no properties included in request".to_string(),
            ));
        }

        debug!(properties = properties.len(), "creating post data");
        let properties =
            self.normaliser
                .normalise(publication, properties, self.clock.as_ref())?;
        self.render(publication, properties)
    }

    /// Fetch the stored record for a URL.
    ///
    /// A missing record is `Ok(None)`.
    pub async fn read(
        &self,
        publication: &Publication,
        url: &str,
    ) -> Result<Option<PostRecord>, PostDataError> {
        require_publication(publication)?;
        require_url(url)?;

        debug!(url, store = self.store.name(), "reading post data");
        Ok(self.store.find_one(&PostQuery::by_url(url)).await?)
    }

    /// Build the updated record for a stored post.
    ///
    /// Operations apply in order add, replace, delete, each to the result
    /// of the previous one. The stored record is not modified.
    ///
    /// # Errors
    ///
    /// As [`create`](Self::create), plus `Validation` for a missing URL or
    /// empty operation, `NotFound` when no record has the URL, and `Store`
    /// when the lookup fails.
    pub async fn update(
        &self,
        publication: &Publication,
        url: &str,
        operation: &UpdateOperation,
    ) -> Result<PostRecord, PostDataError> {
        require_publication(publication)?;
        require_url(url)?;
        if operation.is_empty() {
            return Err(PostDataError::Validation(
                "no update operation provided".to_string(),
            ));
        }

        debug!(url, store = self.store.name(), "updating post data");
        let record = match self.store.find_one(&PostQuery::by_url(url)).await? {
            Some(record) => record,
            None => {
                warn!(url, "no stored post to update");
                return Err(PostDataError::NotFound(url.to_string()));
            }
        };

        let properties = operation.apply(&record.properties)?;
        let properties =
            self.normaliser
                .normalise(publication, properties, self.clock.as_ref())?;
        self.render(publication, properties)
    }

    fn render(
        &self,
        publication: &Publication,
        mut properties: PropertyBag,
    ) -> Result<PostRecord, PostDataError> {
        let post_type = self.discovery.post_type(&properties);
        properties.insert("post-type", post_type.as_str());

        let config = publication
            .post_type_config(&post_type)
            .ok_or_else(|| PostDataError::UnsupportedType(post_type.clone()))?;

        let clock = self.clock.as_ref();
        let path = render_path(
            &config.post.path,
            &properties,
            publication,
            &self.render_options,
            clock,
        )?;
        let url = render_path(
            &config.post.url,
            &properties,
            publication,
            &self.render_options,
            clock,
        )?;
        let permalink = get_permalink(&publication.me, &url)?;

        debug!(post_type = %post_type, path = %path, url = %permalink, "rendered post");
        properties.insert("url", permalink);

        Ok(PostRecord { path, properties })
    }
}

fn require_publication(publication: &Publication) -> Result<(), PostDataError> {
    if publication.is_empty() {
        return Err(PostDataError::Config(
            "no publication configuration provided".to_string(),
        ));
    }
    Ok(())
}

fn require_url(url: &str) -> Result<(), PostDataError> {
    if url.trim().is_empty() {
        return Err(PostDataError::Validation("no URL provided".to_string()));
    }
    Ok(())
}
