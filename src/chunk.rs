//! Word-boundary text chunker.
//!
//! Splits note text into passages that respect a configurable `max_chars`
//! budget. Splitting happens between whitespace-delimited words so no word
//! is ever cut in half; a single word longer than the budget becomes its
//! own oversized chunk. Consecutive chunks do not overlap, and rejoining
//! all chunks with single spaces reproduces the original word sequence.

/// Default chunk budget in characters.
pub const DEFAULT_MAX_CHARS: usize = 800;

/// Split `text` into chunks of at most `max_chars` characters, words
/// joined by single spaces. Whitespace-only input yields no chunks.
///
/// The budget check is projective: before a word is added, the chunk
/// length is computed as if extended by that word plus one separator.
/// When the projected length exceeds the budget the current chunk is
/// closed and the word starts a new one.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks: Vec<String> = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        if current_len + word.len() + 1 > max_chars && !current.is_empty() {
            chunks.push(current.join(" "));
            current.clear();
            current_len = 0;
        }
        current.push(word);
        current_len += word.len() + 1;
    }

    if !current.is_empty() {
        chunks.push(current.join(" "));
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_text_single_chunk() {
        let chunks = chunk_text("Hello, world!", DEFAULT_MAX_CHARS);
        assert_eq!(chunks, vec!["Hello, world!"]);
    }

    #[test]
    fn test_empty_text_yields_no_chunks() {
        assert!(chunk_text("", DEFAULT_MAX_CHARS).is_empty());
        assert!(chunk_text("   \n\t  ", DEFAULT_MAX_CHARS).is_empty());
    }

    #[test]
    fn test_budget_boundary_single_letters() {
        // "A B" would already be 3 chars plus the projected separator, so
        // every letter lands in its own chunk.
        let chunks = chunk_text("A B C D E F G H", 3);
        assert_eq!(chunks, vec!["A", "B", "C", "D", "E", "F", "G", "H"]);
    }

    #[test]
    fn test_no_chunk_exceeds_budget() {
        let text = "the quick brown fox jumps over the lazy dog again and again";
        for max in [5, 10, 16, 30] {
            for chunk in chunk_text(text, max) {
                assert!(
                    chunk.len() <= max || !chunk.contains(' '),
                    "chunk {:?} exceeds budget {}",
                    chunk,
                    max
                );
            }
        }
    }

    #[test]
    fn test_oversized_word_kept_whole() {
        let chunks = chunk_text("tiny incomprehensibilities tiny", 10);
        assert!(chunks.contains(&"incomprehensibilities".to_string()));
        // The oversized word sits alone, unsplit.
        for chunk in &chunks {
            assert!(!chunk.contains("incompre") || chunk == "incomprehensibilities");
        }
    }

    #[test]
    fn test_rejoin_preserves_word_sequence() {
        let text = "alpha  beta\n gamma\tdelta epsilon zeta  eta theta";
        let words: Vec<&str> = text.split_whitespace().collect();
        for max in [4, 11, 25, 1000] {
            let chunks = chunk_text(text, max);
            let rejoined = chunks.join(" ");
            let rejoined_words: Vec<&str> = rejoined.split_whitespace().collect();
            assert_eq!(rejoined_words, words, "max_chars = {}", max);
        }
    }

    #[test]
    fn test_deterministic() {
        let text = "one two three four five six seven eight nine ten";
        assert_eq!(chunk_text(text, 12), chunk_text(text, 12));
    }
}
