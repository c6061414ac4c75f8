//! The remote synthesis collaborator boundary.
//!
//! The core never performs network I/O itself; everything that talks to the
//! real service lives behind [`SpeechProvider`] (and
//! [`crate::CatalogSource`] for voice listings). Credentials, regions and
//! timeouts belong to the implementation, which keeps the pipeline testable
//! with a fake provider and no real account.

use thiserror::Error;

use crate::voice::{Engine, Voice};
use crate::OutputFormat;

/// Opaque failure from the remote provider. The pipeline does not retry;
/// it surfaces the error tagged with the failing chunk index.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("provider call failed: {message}")]
pub struct ProviderError {
    pub message: String,
}

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// One synthesis call against the remote service.
///
/// `text` is guaranteed to fit the provider's per-request byte limit (the
/// pipeline chunks before calling) and `format` is never `Wav` — WAV is
/// assembled locally from PCM.
pub trait SpeechProvider {
    fn synthesize(
        &self,
        text: &str,
        voice: &Voice,
        engine: Engine,
        format: OutputFormat,
        sample_rate: u32,
    ) -> Result<Vec<u8>, ProviderError>;
}
