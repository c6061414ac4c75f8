//! Reassembly of per-chunk provider audio into one byte stream.
//!
//! Frame-based containers (mp3, ogg) tolerate plain concatenation, so those
//! segments are joined as-is; a seam artifact between chunks is an accepted
//! property of the design. Raw PCM concatenates losslessly, and `wav` output
//! wraps the joined PCM with a single RIFF/WAVE header sized for the whole
//! stream (mono, 16-bit).

use std::io::Cursor;

use thiserror::Error;

use crate::OutputFormat;

/// Audio returned by the provider for one text chunk.
///
/// The index ties the segment back to its [`crate::TextChunk`]; callers that
/// dispatch chunks concurrently may collect segments out of order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioSegment {
    pub index: usize,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("unsupported output format {0:?}")]
    UnsupportedFormat(String),
    #[error("PCM stream of {len} bytes is not a whole number of 16-bit samples")]
    TruncatedPcm { len: usize },
    #[error("WAV container error: {0}")]
    Wav(#[from] hound::Error),
}

/// Join per-chunk audio into one stream, restoring chunk-index order first.
///
/// `sample_rate` is only consulted for the `wav` header; compressed formats
/// carry their own framing.
pub fn reassemble(
    format: OutputFormat,
    sample_rate: u32,
    segments: &[AudioSegment],
) -> Result<Vec<u8>, AudioError> {
    let mut ordered: Vec<&AudioSegment> = segments.iter().collect();
    ordered.sort_by_key(|s| s.index);

    let total: usize = ordered.iter().map(|s| s.bytes.len()).sum();
    let mut joined = Vec::with_capacity(total);
    for segment in &ordered {
        joined.extend_from_slice(&segment.bytes);
    }

    match format {
        OutputFormat::Mp3 | OutputFormat::OggVorbis | OutputFormat::Pcm => Ok(joined),
        OutputFormat::Wav => wrap_wav(&joined, sample_rate),
    }
}

/// Wrap raw 16-bit mono PCM with a RIFF/WAVE header.
fn wrap_wav(pcm: &[u8], sample_rate: u32) -> Result<Vec<u8>, AudioError> {
    if pcm.len() % 2 != 0 {
        return Err(AudioError::TruncatedPcm { len: pcm.len() });
    }

    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    let mut writer = hound::WavWriter::new(&mut cursor, spec)?;
    for sample in pcm.chunks_exact(2) {
        writer.write_sample(i16::from_le_bytes([sample[0], sample[1]]))?;
    }
    writer.finalize()?;

    Ok(cursor.into_inner())
}
