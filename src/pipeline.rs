//! The synthesis driver: validate, resolve, chunk, call the provider per
//! chunk, reassemble.
//!
//! Chunk calls run sequentially here. A caller that dispatches them
//! concurrently can still use [`crate::reassemble`] directly — segments are
//! re-ordered by chunk index, so completion order does not matter. Either
//! way the operation is all-or-nothing: the first failed chunk aborts the
//! whole request and no partial audio is returned.

use std::path::Path;

use thiserror::Error;

use crate::audio::{reassemble, AudioError, AudioSegment};
use crate::chunk::{chunk, ChunkError, DEFAULT_MAX_CHUNK_BYTES};
use crate::provider::{ProviderError, SpeechProvider};
use crate::voice::{resolve_voice, ResolutionError, Voice};
use crate::{OutputFormat, SynthesisRequest};

/// Everything that can go wrong between a request and its audio bytes.
#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error(transparent)]
    Chunk(#[from] ChunkError),
    #[error(transparent)]
    Resolution(#[from] ResolutionError),
    #[error("sample rate {rate} Hz is not valid for {format} output")]
    InvalidSampleRate { rate: u32, format: OutputFormat },
    #[error("synthesis failed for chunk {index}")]
    ChunkSynthesis {
        index: usize,
        #[source]
        source: ProviderError,
    },
    #[error(transparent)]
    Audio(#[from] AudioError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Synthesize a whole request against `provider`, using the default
/// per-chunk byte budget.
pub fn synthesize<P: SpeechProvider>(
    provider: &P,
    catalog: &[Voice],
    request: &SynthesisRequest,
) -> Result<Vec<u8>, SynthesisError> {
    synthesize_with_limit(provider, catalog, request, DEFAULT_MAX_CHUNK_BYTES)
}

/// [`synthesize`] with an explicit per-chunk byte budget, for providers
/// with non-default request limits.
pub fn synthesize_with_limit<P: SpeechProvider>(
    provider: &P,
    catalog: &[Voice],
    request: &SynthesisRequest,
    max_chunk_bytes: usize,
) -> Result<Vec<u8>, SynthesisError> {
    let sample_rate = request
        .sample_rate
        .unwrap_or_else(|| request.format.default_sample_rate());
    if !request.format.valid_sample_rates().contains(&sample_rate) {
        return Err(SynthesisError::InvalidSampleRate {
            rate: sample_rate,
            format: request.format,
        });
    }

    let resolved = resolve_voice(catalog, &request.hints())?;
    let chunks = chunk(&request.text, max_chunk_bytes)?;
    log::info!(
        "synthesizing {} chunk(s) with voice '{}' ({} engine, {} @ {} Hz)",
        chunks.len(),
        resolved.voice.id,
        resolved.engine,
        request.format,
        sample_rate
    );

    // WAV never reaches the provider; it is asked for raw PCM and the
    // container is written once over the reassembled stream.
    let provider_format = request.format.provider_format();

    let mut segments = Vec::with_capacity(chunks.len());
    for piece in &chunks {
        log::debug!("chunk {}: {} bytes of text", piece.index, piece.text.len());
        let bytes = provider
            .synthesize(
                &piece.text,
                resolved.voice,
                resolved.engine,
                provider_format,
                sample_rate,
            )
            .map_err(|source| SynthesisError::ChunkSynthesis {
                index: piece.index,
                source,
            })?;
        segments.push(AudioSegment {
            index: piece.index,
            bytes,
        });
    }

    Ok(reassemble(request.format, sample_rate, &segments)?)
}

/// Synthesize and write the result to `path`, creating parent directories.
pub fn synthesize_to_file<P: SpeechProvider>(
    provider: &P,
    catalog: &[Voice],
    request: &SynthesisRequest,
    path: &Path,
) -> Result<(), SynthesisError> {
    let bytes = synthesize(provider, catalog, request)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, &bytes)?;
    log::info!("wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}
