//! # tts-pipeline
//!
//! The provider-agnostic core of a text-to-speech service: split long text
//! into provider-safe chunks, pick a voice/engine pair from a catalog, and
//! stitch per-chunk audio back into one stream.
//!
//! Cloud synthesis APIs cap the text accepted per request, so long inputs
//! must be split, synthesized chunk by chunk, and reassembled. This crate
//! owns that pipeline plus the voice-selection rules; the actual network
//! call is behind the [`SpeechProvider`] trait so the core stays pure and
//! testable without credentials.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! tts-pipeline = "0.1"
//! ```
//!
//! ```
//! use tts_pipeline::{chunk, resolve_voice, Engine, Gender, Voice, VoiceHints};
//!
//! let catalog = vec![Voice {
//!     id: "Joanna".to_string(),
//!     gender: Gender::Female,
//!     language_code: "en-US".to_string(),
//!     supported_engines: vec![Engine::Standard, Engine::Neural],
//! }];
//!
//! let hints = VoiceHints {
//!     language: Some("en-US".to_string()),
//!     ..Default::default()
//! };
//! let resolved = resolve_voice(&catalog, &hints)?;
//! assert_eq!(resolved.engine, Engine::Neural);
//!
//! let chunks = chunk("Hello, world!", 2900)?;
//! assert_eq!(chunks.len(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Driving a full synthesis call requires a [`SpeechProvider`]
//! implementation; see [`pipeline::synthesize`].

pub mod audio;
pub mod catalog;
pub mod chunk;
pub mod pipeline;
pub mod provider;
pub mod voice;

use std::fmt;
use std::str::FromStr;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

pub use audio::{reassemble, AudioError, AudioSegment};
pub use catalog::{CachedCatalog, CatalogSource, VoiceCatalog};
pub use chunk::{chunk, ChunkError, TextChunk, DEFAULT_MAX_CHUNK_BYTES};
pub use pipeline::{synthesize, synthesize_to_file, SynthesisError};
pub use provider::{ProviderError, SpeechProvider};
pub use voice::{
    resolve_voice, Engine, Gender, ResolutionError, ResolvedVoice, Voice, VoiceHints,
};

/// Audio container/encoding requested by the caller.
///
/// `Wav` is assembled locally: the provider is asked for raw `Pcm` and the
/// RIFF header is written once over the reassembled stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Mp3,
    OggVorbis,
    Pcm,
    Wav,
}

impl OutputFormat {
    /// Wire name of the format (`"mp3"`, `"ogg_vorbis"`, `"pcm"`, `"wav"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Mp3 => "mp3",
            OutputFormat::OggVorbis => "ogg_vorbis",
            OutputFormat::Pcm => "pcm",
            OutputFormat::Wav => "wav",
        }
    }

    /// Sample rate used when the request does not specify one.
    pub fn default_sample_rate(&self) -> u32 {
        match self {
            OutputFormat::Mp3 | OutputFormat::OggVorbis => 22050,
            OutputFormat::Pcm | OutputFormat::Wav => 16000,
        }
    }

    /// Sample rates the provider accepts for this format.
    pub fn valid_sample_rates(&self) -> &'static [u32] {
        match self {
            OutputFormat::Mp3 | OutputFormat::OggVorbis => &[8000, 16000, 22050, 24000],
            OutputFormat::Pcm | OutputFormat::Wav => &[8000, 16000],
        }
    }

    /// The format actually sent to the provider. `Wav` maps to `Pcm`; the
    /// container is added during reassembly.
    pub fn provider_format(&self) -> OutputFormat {
        match self {
            OutputFormat::Wav => OutputFormat::Pcm,
            other => *other,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = AudioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mp3" => Ok(OutputFormat::Mp3),
            "ogg_vorbis" => Ok(OutputFormat::OggVorbis),
            "pcm" => Ok(OutputFormat::Pcm),
            "wav" => Ok(OutputFormat::Wav),
            other => Err(AudioError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// One incoming synthesis call: the text plus voice hints and output options.
///
/// Built per request and never persisted. `text` must be non-empty after
/// trimming (enforced by [`chunk`], before any provider call). A missing
/// `sample_rate` falls back to [`OutputFormat::default_sample_rate`].
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
#[builder(setter(into))]
pub struct SynthesisRequest {
    /// Source text to synthesize.
    pub text: String,
    /// Explicit voice id (e.g. `"Joanna"`), matched case-insensitively.
    #[builder(default, setter(strip_option, into))]
    pub voice_id: Option<String>,
    /// Preferred voice gender when no explicit voice id is given.
    #[builder(default, setter(strip_option))]
    pub gender: Option<Gender>,
    /// Full language-region code (e.g. `"en-GB"`); exact match only.
    #[builder(default, setter(strip_option, into))]
    pub language: Option<String>,
    /// Explicit engine tier; absent means auto-select the best supported.
    #[builder(default, setter(strip_option))]
    pub engine: Option<Engine>,
    #[builder(default = "OutputFormat::Mp3")]
    pub format: OutputFormat,
    #[builder(default, setter(strip_option))]
    pub sample_rate: Option<u32>,
}

impl SynthesisRequest {
    /// Start building a request. `text` is the only required field.
    pub fn builder() -> SynthesisRequestBuilder {
        SynthesisRequestBuilder::default()
    }

    /// Hints derived from this request, as consumed by [`resolve_voice`].
    pub fn hints(&self) -> VoiceHints {
        VoiceHints {
            voice_id: self.voice_id.clone(),
            gender: self.gender,
            language: self.language.clone(),
            engine: self.engine,
        }
    }
}
