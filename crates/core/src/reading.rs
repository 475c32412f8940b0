//! Character counts and reading-time estimates for posts.

/// Default reading speed, in words per minute.
pub const DEFAULT_WORDS_PER_MINUTE: u32 = 200;

/// Length statistics for a post body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReadingStats {
    /// Non-whitespace characters.
    pub characters: usize,
    /// Words, with each CJK character counted as one word.
    pub words: usize,
    /// Estimated minutes to read, rounded up.
    pub minutes: u32,
}

/// Computes reading statistics for plain text.
pub fn reading_stats(text: &str, words_per_minute: u32) -> ReadingStats {
    let mut characters = 0;
    let mut words = 0;
    let mut in_word = false;

    for ch in text.chars() {
        if ch.is_whitespace() {
            in_word = false;
            continue;
        }
        characters += 1;
        if is_cjk(ch) {
            words += 1;
            in_word = false;
        } else if !in_word {
            words += 1;
            in_word = true;
        }
    }

    let wpm = words_per_minute.max(1) as usize;
    ReadingStats {
        characters,
        words,
        minutes: words.div_ceil(wpm) as u32,
    }
}

fn is_cjk(ch: char) -> bool {
    matches!(
        ch as u32,
        0x3040..=0x30FF     // Hiragana, Katakana
            | 0x3400..=0x4DBF // CJK Extension A
            | 0x4E00..=0x9FFF // CJK Unified Ideographs
            | 0xAC00..=0xD7AF // Hangul syllables
            | 0xF900..=0xFAFF // CJK Compatibility Ideographs
            | 0x20000..=0x2FA1F
    )
}
