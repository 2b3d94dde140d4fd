//! Reply formatting.

pub mod builder;

pub use builder::{Reply, build_response};

/// Sent when a message has no links or a link is not a supported store.
pub const UNSUPPORTED_LINK: &str = "❌ Unsupported or invalid product link";
/// Sent when a supported link could not be fetched or parsed.
pub const EXTRACTION_FAILED: &str = "❌ Unable to extract product info";
/// Caption for a photo sent without any link.
pub const NO_TITLE: &str = "No title provided";
/// Closing line of every product reply.
pub const ATTRIBUTION: &str = "@reviewcheckk";
