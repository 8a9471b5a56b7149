//! text-bridge - editor integration layer
//!
//! Resolves image and attachment references found in collaborative text
//! documents to downloadable URLs, and describes the editor extensions
//! (tables, link bubble) the host application mounts.

pub mod config;
pub mod error;
pub mod models;
pub mod nodes;
pub mod plugins;
pub mod services;

pub use config::config;
pub use error::{Error, Result};
pub use services::AttachmentResolver;
