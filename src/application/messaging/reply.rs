//! Dispatch result

use crate::application::services::video_service::VideoJob;

/// Reply to an inbound message.
///
/// An empty `text` means "send nothing". `job` carries a download-and-send
/// side effect the caller launches once the reply itself has gone out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub job: Option<VideoJob>,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            job: None,
        }
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_job(mut self, job: VideoJob) -> Self {
        self.job = Some(job);
        self
    }

    pub fn is_silent(&self) -> bool {
        self.text.is_empty()
    }
}
