//! Service layer for text-bridge.
//!
//! Contains reference resolution and the integrations it relies on:
//! - AttachmentResolver (document references to download descriptors)
//! - Api (attachment listing endpoint)
//! - Router (instance URL generation)
//! - Path / Uri (path normalization and browser-style percent-encoding)

pub mod api;
mod attachment_resolver;
pub mod path;
mod router;
pub mod uri;

pub use api::{AttachmentApi, HttpAttachmentApi};
pub use attachment_resolver::{AttachmentResolver, Reference};
pub use router::Router;
