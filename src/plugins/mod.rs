//! Editor plugins.

pub mod link_bubble;
