//! Auto-reply - keyword classifier and video link patterns for free text

pub mod classifier;
pub mod patterns;

pub use classifier::AutoReplyClassifier;
pub use patterns::{Platform, VideoLink, VideoLinkDetector};
