//! Byte-bounded text chunking.
//!
//! Cloud synthesis providers cap the text per request, and the cap is on
//! *encoded bytes*, not characters. [`chunk`] splits input into spans that
//! fit the budget while preferring natural boundaries, so that the
//! concatenated per-chunk audio sounds like one take:
//!
//! 1. last sentence terminator (`.` `!` `?` or newline) inside the window;
//! 2. last whitespace inside the window;
//! 3. hard cut at the largest UTF-8 character boundary that fits.
//!
//! Chunk boundaries therefore never land inside a multi-byte character.

use thiserror::Error;

/// Default per-chunk byte budget.
///
/// The provider's plain-text request limit is ~3000 characters; 2900 leaves
/// a safety margin for boundary trimming.
pub const DEFAULT_MAX_CHUNK_BYTES: usize = 2900;

/// A contiguous sub-span of the input text, sized for one provider call.
///
/// Indices are consecutive from 0 and order the chunks for reassembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChunk {
    pub index: usize,
    pub text: String,
}

/// Failures detected before any provider call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChunkError {
    #[error("no text to synthesize (input is empty after trimming)")]
    EmptyInput,
    #[error("chunk budget of {budget} byte(s) cannot fit character {ch:?} ({required} bytes)")]
    BudgetTooSmall {
        budget: usize,
        required: usize,
        ch: char,
    },
}

/// Split `text` into ordered chunks of at most `max_bytes` UTF-8 bytes each.
///
/// The input is trimmed first; empty or whitespace-only input is rejected.
/// Every returned chunk is non-empty and trimmed, and joining the chunks
/// reproduces the input up to the whitespace consumed at chunk boundaries.
///
/// Text that already fits the budget comes back as exactly one chunk.
pub fn chunk(text: &str, max_bytes: usize) -> Result<Vec<TextChunk>, ChunkError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ChunkError::EmptyInput);
    }

    let mut chunks = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        let at = split_point(rest, max_bytes)?;
        let piece = rest[..at].trim();
        if !piece.is_empty() {
            chunks.push(TextChunk {
                index: chunks.len(),
                text: piece.to_string(),
            });
        }
        rest = rest[at..].trim_start();
    }

    log::debug!(
        "split {} bytes of text into {} chunk(s) (budget {} bytes)",
        text.len(),
        chunks.len(),
        max_bytes
    );
    Ok(chunks)
}

/// Byte offset at which to cut the next chunk off the front of `s`.
///
/// `s` is non-empty and starts with a non-whitespace character. The returned
/// offset is always a character boundary in `1..=max_bytes`, except when the
/// whole remainder fits, in which case it is `s.len()`.
fn split_point(s: &str, max_bytes: usize) -> Result<usize, ChunkError> {
    if s.len() <= max_bytes {
        return Ok(s.len());
    }

    // Largest character boundary that still fits the budget.
    let mut window_end = max_bytes;
    while window_end > 0 && !s.is_char_boundary(window_end) {
        window_end -= 1;
    }
    if window_end == 0 {
        // First character alone exceeds the budget; no valid chunk exists.
        let ch = s.chars().next().unwrap_or('\u{fffd}');
        return Err(ChunkError::BudgetTooSmall {
            budget: max_bytes,
            required: ch.len_utf8(),
            ch,
        });
    }

    let window = &s[..window_end];

    // Sentence terminators are all single-byte, so the cut lands after them.
    if let Some(pos) = window.rfind(is_sentence_terminator) {
        return Ok(pos + 1);
    }

    // Cut before the whitespace; the tail's leading whitespace is trimmed by
    // the caller. pos == 0 cannot happen (the remainder never starts with
    // whitespace) but would make no progress, so it falls through.
    if let Some(pos) = window.rfind(char::is_whitespace) {
        if pos > 0 {
            return Ok(pos);
        }
    }

    // One unbroken word longer than the budget: hard cut.
    Ok(window_end)
}

fn is_sentence_terminator(c: char) -> bool {
    matches!(c, '.' | '!' | '?' | '\n')
}
