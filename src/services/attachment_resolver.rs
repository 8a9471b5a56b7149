//! Attachment resolver for image and file references inside documents.
//!
//! A reference is one of:
//! - a session attachment: `.attachments.<N>/<name>`
//! - a direct URL: `http://`, `https://` or `data:`
//! - anything else: a path relative to the document's directory
//!
//! Attachments are looked up in the session's attachment list, which is
//! fetched in the background as soon as the resolver is created.

use std::borrow::Cow;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt, Shared};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use super::api::{AttachmentApi, HttpAttachmentApi};
use super::path;
use super::uri::{decode_uri, decode_uri_component, encode_uri_component, strip_query};
use super::Router;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::{
    Attachment, AttachmentListRequest, ReferenceOrigin, ResolvedReference, ResolverContext,
};

/// Directory prefix of native attachment references.
const ATTACHMENT_PREFIX: &str = ".attachments.";

/// Share download route for anonymous contexts.
const SHARE_DOWNLOAD_ROUTE: &str = "/s/{token}/download?path={dirname}&files={basename}";

/// How a reference string is to be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reference<'a> {
    /// `.attachments.<N>/<name>`, carrying the decoded attachment name.
    Attachment(Cow<'a, str>),
    /// Used as-is.
    DirectUrl(&'a str),
    /// Relative to the current directory.
    RemotePath(&'a str),
}

impl<'a> Reference<'a> {
    /// Classify a reference. Native attachments are checked first, then
    /// direct URLs; everything else is a remote path.
    pub fn classify(reference: &'a str) -> Self {
        if let Some(name) = attachment_name(reference) {
            Self::Attachment(name)
        } else if is_direct_url(reference) {
            Self::DirectUrl(reference)
        } else {
            Self::RemotePath(reference)
        }
    }
}

/// Extract the attachment name from `.attachments.<digits>/<rest>`.
fn attachment_name(reference: &str) -> Option<Cow<'_, str>> {
    let rest = reference.strip_prefix(ATTACHMENT_PREFIX)?;
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let rest = rest[digits..].strip_prefix('/')?;
    Some(decode_uri_component(strip_query(rest)))
}

/// Full URLs only load for images on the same instance (CORS), but they are
/// passed through regardless.
fn is_direct_url(reference: &str) -> bool {
    reference.starts_with("http://")
        || reference.starts_with("https://")
        || reference.starts_with("data:")
}

type SharedFetch = Shared<BoxFuture<'static, Result<()>>>;

/// Resolves document references to displayable descriptors.
///
/// Scoped to one editing session: the attachment list is cached for the
/// lifetime of the resolver and only refreshed when a lookup misses.
pub struct AttachmentResolver {
    context: ResolverContext,
    router: Router,
    api: Arc<dyn AttachmentApi>,
    attachments: Arc<RwLock<Vec<Attachment>>>,
    initial_fetch: SharedFetch,
}

impl AttachmentResolver {
    /// Create a resolver and start fetching the attachment list.
    ///
    /// The fetch runs as a task on the current tokio runtime, so this must be
    /// called from within one. It does not wait for the fetch.
    pub fn new(context: ResolverContext, router: Router, api: Arc<dyn AttachmentApi>) -> Self {
        let attachments = Arc::new(RwLock::new(Vec::new()));
        let request = context.attachment_list_request();

        let task = {
            let api = Arc::clone(&api);
            let attachments = Arc::clone(&attachments);
            tokio::spawn(async move {
                update_attachment_list(api.as_ref(), &request, &attachments).await
            })
        };

        let initial_fetch = async move {
            match task.await {
                Ok(result) => result,
                Err(e) => Err(Error::from(e)),
            }
        }
        .boxed()
        .shared();

        debug!(
            document_id = ?context.document_id(),
            current_directory = %context.current_directory,
            "Attachment resolver created"
        );

        Self {
            context,
            router,
            api,
            attachments,
            initial_fetch,
        }
    }

    /// Create a resolver talking to the instance described by `config`.
    pub fn from_config(context: ResolverContext, config: &Config) -> Result<Self> {
        let api = HttpAttachmentApi::from_config(config)?;
        let router = api.router().clone();
        Ok(Self::new(context, router, Arc::new(api)))
    }

    /// Resolve a reference, refetching the attachment list once if a native
    /// attachment is not found.
    pub async fn resolve(&self, reference: &str) -> Result<ResolvedReference> {
        self.resolve_with(reference, true).await
    }

    /// Resolve a reference.
    ///
    /// Only native attachment references can fail, and only when fetching
    /// the attachment list fails. An attachment missing from the list is not
    /// an error: the reference is resolved as a remote path instead.
    pub async fn resolve_with(
        &self,
        reference: &str,
        allow_refetch: bool,
    ) -> Result<ResolvedReference> {
        match Reference::classify(reference) {
            Reference::Attachment(name) => {
                if let Some(attachment) = self.find_attachment(&name, allow_refetch).await? {
                    return Ok(attachment.into());
                }
                debug!(
                    reference = %reference,
                    name = %name,
                    "Attachment not in session list, resolving as remote file"
                );
                Ok(self.remote_file(reference))
            }
            Reference::DirectUrl(url) => Ok(ResolvedReference::link(
                ReferenceOrigin::DirectUrl,
                path::last_segment(url),
                url,
            )),
            Reference::RemotePath(_) => Ok(self.remote_file(reference)),
        }
    }

    async fn find_attachment(&self, name: &str, allow_refetch: bool) -> Result<Option<Attachment>> {
        self.initial_fetch.clone().await?;

        if let Some(attachment) = self.cached_attachment(name).await {
            return Ok(Some(attachment));
        }
        if !allow_refetch {
            return Ok(None);
        }

        // Attachments may have been added to the session after creation
        debug!(name = %name, "Attachment not cached, refetching list");
        let request = self.context.attachment_list_request();
        update_attachment_list(self.api.as_ref(), &request, &self.attachments).await?;

        Ok(self.cached_attachment(name).await)
    }

    async fn cached_attachment(&self, name: &str) -> Option<Attachment> {
        self.attachments
            .read()
            .await
            .iter()
            .find(|a| a.name == name)
            .cloned()
    }

    fn remote_file(&self, reference: &str) -> ResolvedReference {
        ResolvedReference::link(
            ReferenceOrigin::RemoteFile,
            path::last_segment(reference),
            self.dav_url(reference),
        )
    }

    /// Download URL for a reference relative to the current directory.
    ///
    /// Logged-in users get a WebDAV URL in their own file tree; share
    /// visitors get the share's download endpoint.
    fn dav_url(&self, reference: &str) -> String {
        let file_path = self.file_path(reference);

        if let Some(user) = &self.context.user {
            let encoded = file_path
                .split('/')
                .map(encode_uri_component)
                .collect::<Vec<_>>()
                .join("/");
            return self
                .router
                .generate_remote_url(&format!("dav/files/{}{}", user.uid, encoded));
        }

        let (dirname, basename) = path::split_basename(&file_path);
        let mut params = vec![("dirname", dirname), ("basename", basename)];
        if let Some(token) = self.context.share_token.as_deref() {
            params.push(("token", token));
        }
        self.router.generate_url(SHARE_DOWNLOAD_ROUTE, &params)
    }

    fn file_path(&self, reference: &str) -> String {
        let relative = decode_uri(strip_query(reference));
        path::join(&self.context.current_directory, &relative)
    }
}

/// Fetch the attachment list and replace the cached copy.
async fn update_attachment_list(
    api: &dyn AttachmentApi,
    request: &AttachmentListRequest,
    attachments: &RwLock<Vec<Attachment>>,
) -> Result<()> {
    match api.list_attachments(request).await {
        Ok(list) => {
            *attachments.write().await = list;
            Ok(())
        }
        Err(e) => {
            warn!(
                document_id = ?request.document_id,
                error = %e,
                "Failed to fetch attachment list"
            );
            Err(e)
        }
    }
}
