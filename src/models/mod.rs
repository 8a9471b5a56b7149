//! Data models for text-bridge.
//!
//! Attachments as returned by the listing endpoint, the resolver's output
//! descriptor and the session context it is constructed with.

mod attachment;
mod session;

pub use attachment::*;
pub use session::*;
