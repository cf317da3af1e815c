//! Fixed-stride chunking of file content.
//!
//! Local models have a hard input-size limit, so each file is split into
//! contiguous chunks of at most `chunk_size` characters before prompting.
//! Chunks never split a UTF-8 code point.

/// Default chunk size in characters.
pub const DEFAULT_CHUNK_SIZE: usize = 1900;

/// Split text into contiguous chunks of at most `size` characters.
///
/// The final chunk may be shorter. Empty input yields no chunks.
pub fn split_chunks(text: &str, size: usize) -> Vec<String> {
    assert!(size > 0, "chunk size must be non-zero");

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut count = 0;

    for ch in text.chars() {
        current.push(ch);
        count += 1;
        if count == size {
            chunks.push(std::mem::take(&mut current));
            count = 0;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}
