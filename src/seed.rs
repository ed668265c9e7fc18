//! Word sanitization and seed derivation.
//!
//! A word is folded into a single `u32` seed in two steps: a multiplicative
//! hash stream over the lower-cased word, and a stir that XORs three
//! consecutive stream outputs so very short words still produce well-mixed
//! seeds. The mapping is a pure function of the word; no time or external
//! entropy is involved.

/// Maximum number of Unicode code points kept from the input token.
pub const MAX_WORD_CODE_POINTS: usize = 32;

/// Reduce raw user input to the renderable word: trim surrounding
/// whitespace, keep only the first whitespace-delimited token, and cap it at
/// [`MAX_WORD_CODE_POINTS`] code points. Returns `None` when nothing
/// survives.
///
/// The returned string preserves the original casing; lower-casing happens
/// only inside [`compute_seed`]. Displayed signatures use the verbatim form.
pub fn sanitize_word(raw: &str) -> Option<String> {
    let token = raw.split_whitespace().next()?;
    let word: String = token.chars().take(MAX_WORD_CODE_POINTS).collect();
    if word.is_empty() {
        None
    } else {
        Some(word)
    }
}

/// A seeded 32-bit hash stream.
///
/// Construction mixes every UTF-16 code unit of the input into the state;
/// each [`next`](HashStream::next) call then runs one more avalanche round
/// and returns the result without consuming further input, so an arbitrary
/// number of well-mixed values can be drawn from one string.
///
/// All multiplications wrap to 32 bits so the sequence is bit-identical
/// across platforms.
pub struct HashStream {
    h: u32,
}

impl HashStream {
    /// Fold `s` into the initial stream state.
    pub fn new(s: &str) -> Self {
        let len = s.encode_utf16().count() as u32;
        let mut h: u32 = 1779033703 ^ len;
        for unit in s.encode_utf16() {
            h = (h ^ u32::from(unit)).wrapping_mul(3432918353);
            h = h.rotate_left(13);
        }
        Self { h }
    }

    /// Advance the stream one avalanche round and return the new value.
    pub fn next(&mut self) -> u32 {
        let mut h = self.h;
        h = (h ^ (h >> 16)).wrapping_mul(2246822507);
        h = (h ^ (h >> 13)).wrapping_mul(3266489909);
        h ^= h >> 16;
        self.h = h;
        h
    }
}

/// Derive the render seed for a word.
///
/// The word is lower-cased, hashed into a stream, and the first three stream
/// values are XORed together. This is the only seed ever fed to the
/// generator, and it depends on nothing but the word itself.
pub fn compute_seed(word: &str) -> u32 {
    let mut stream = HashStream::new(&word.to_lowercase());
    let s1 = stream.next();
    let s2 = stream.next();
    let s3 = stream.next();
    s1 ^ s2 ^ s3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_takes_first_token() {
        assert_eq!(sanitize_word("  lotus pond  "), Some("lotus".to_string()));
        assert_eq!(sanitize_word("ocean"), Some("ocean".to_string()));
        assert_eq!(sanitize_word("   "), None);
        assert_eq!(sanitize_word(""), None);
    }

    #[test]
    fn sanitize_caps_code_points() {
        let long = "a".repeat(100);
        let word = sanitize_word(&long).unwrap();
        assert_eq!(word.chars().count(), MAX_WORD_CODE_POINTS);
    }

    #[test]
    fn sanitize_preserves_case() {
        assert_eq!(sanitize_word("Harmony"), Some("Harmony".to_string()));
    }

    #[test]
    fn seed_is_case_insensitive() {
        let s = compute_seed("harmony");
        assert_eq!(s, compute_seed("Harmony"));
        assert_eq!(s, compute_seed("HARMONY"));
        assert_eq!(s, 2052707841);
    }

    #[test]
    fn seed_is_stable_fixture() {
        // Pinned regression value; changing it is a compatibility break.
        assert_eq!(compute_seed("ocean"), 2447940024);
    }

    #[test]
    fn similar_words_avalanche() {
        let cat = compute_seed("cat");
        let bat = compute_seed("bat");
        assert_ne!(cat, bat);
        let differing = (cat ^ bat).count_ones();
        assert!(differing >= 8, "only {differing} bits differ");
    }

    #[test]
    fn stream_draws_are_distinct() {
        let mut stream = HashStream::new("x");
        let a = stream.next();
        let b = stream.next();
        let c = stream.next();
        assert_ne!(a, b);
        assert_ne!(b, c);
    }

    #[test]
    fn non_bmp_input_is_accepted() {
        // Surrogate pairs contribute two code units each; just has to be
        // deterministic, not meaningful.
        let a = compute_seed("\u{1F30A}wave");
        let b = compute_seed("\u{1F30A}wave");
        assert_eq!(a, b);
    }
}
