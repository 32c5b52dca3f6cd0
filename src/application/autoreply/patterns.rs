//! Video link recognition

use std::fmt;

use once_cell::sync::Lazy;
use regex_lite::Regex;
use serde::Serialize;

static YOUTUBE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(youtube\.com/watch\?v=|youtu\.be/|youtube\.com/shorts/)([a-zA-Z0-9_-]+)")
        .expect("youtube pattern compiles")
});

// `\S*` keeps a path segment match from running across whitespace into later text
static TIKTOK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(tiktok\.com/\S*/video/|vm\.tiktok\.com/|tiktok\.com/@\S*/video/)([a-zA-Z0-9_-]+)")
        .expect("tiktok pattern compiles")
});

/// Video platform a link was recognised for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Platform {
    YouTube,
    TikTok,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::YouTube => "YouTube",
            Platform::TikTok => "TikTok",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recognised video link with its canonical URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoLink {
    pub platform: Platform,
    pub url: String,
    /// Captured video identifier
    pub id: String,
}

/// Finds the first supported video link in free text
#[derive(Debug, Clone, Copy, Default)]
pub struct VideoLinkDetector;

impl VideoLinkDetector {
    pub fn new() -> Self {
        Self
    }

    /// YouTube links win over TikTok links when both are present.
    pub fn detect(&self, text: &str) -> Option<VideoLink> {
        if let Some(caps) = YOUTUBE.captures(text) {
            let id = caps.get(2)?.as_str();
            return Some(VideoLink {
                platform: Platform::YouTube,
                url: format!("https://www.youtube.com/watch?v={}", id),
                id: id.to_string(),
            });
        }

        if let Some(caps) = TIKTOK.captures(text) {
            let matched = caps.get(0)?.as_str();
            let id = caps.get(2)?.as_str();
            // the match starts at the host, never at the scheme
            return Some(VideoLink {
                platform: Platform::TikTok,
                url: format!("https://{}", matched),
                id: id.to_string(),
            });
        }

        None
    }

    pub fn is_match(&self, text: &str) -> bool {
        YOUTUBE.is_match(text) || TIKTOK.is_match(text)
    }
}
