//! Attachment and resolved reference models

use serde::{Deserialize, Serialize};

/// A file belonging to the current editing session.
///
/// Only `name` is guaranteed by the listing endpoint; everything else is
/// optional on the wire and defaults when missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mimetype: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mtime: Option<i64>,
    #[serde(default)]
    pub is_image: bool,
    #[serde(default)]
    pub preview_url: String,
    #[serde(default)]
    pub full_url: String,
}

impl Attachment {
    /// Attachment with just a name, as the bare minimum the endpoint returns.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            file_id: None,
            size: None,
            mimetype: None,
            mtime: None,
            is_image: false,
            preview_url: String::new(),
            full_url: String::new(),
        }
    }
}

/// Which branch of resolution produced a reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceOrigin {
    /// Found in the session's attachment list.
    Attachment,
    /// `http://`, `https://` or `data:` reference used as-is.
    DirectUrl,
    /// Path relative to the current directory, served from remote storage.
    RemoteFile,
}

/// Output of [`AttachmentResolver::resolve`](crate::services::AttachmentResolver::resolve).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedReference {
    pub origin: ReferenceOrigin,
    pub is_image: bool,
    pub name: String,
    pub preview_url: String,
    pub full_url: String,
    /// The stored record, when the reference named a session attachment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<Attachment>,
}

impl ResolvedReference {
    /// A link that is neither an attachment nor anything the resolver knows
    /// more about: treated as an image with the same preview and full URL.
    pub fn link(origin: ReferenceOrigin, name: impl Into<String>, url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            origin,
            is_image: true,
            name: name.into(),
            preview_url: url.clone(),
            full_url: url,
            attachment: None,
        }
    }
}

impl From<Attachment> for ResolvedReference {
    fn from(attachment: Attachment) -> Self {
        Self {
            origin: ReferenceOrigin::Attachment,
            is_image: attachment.is_image,
            name: attachment.name.clone(),
            preview_url: attachment.preview_url.clone(),
            full_url: attachment.full_url.clone(),
            attachment: Some(attachment),
        }
    }
}
