//! Text statistics service.
//!
//! A pure, stateless computation: no I/O, no shared state, bounded CPU
//! time in the input length.

use crate::models::AnalysisResponse;

const VOWELS: &str = "aeiouAEIOU";

/// Analyze a sentence and count its words, vowels, and consonants.
///
/// Words are whitespace-separated tokens of the trimmed sentence. Vowels
/// are the ASCII vowel set (either case); every other alphabetic character
/// counts as a consonant, including non-ASCII letters. Digits and
/// punctuation count as neither.
pub fn analyze(sentence: &str) -> AnalysisResponse {
    let trimmed = sentence.trim();

    let word_count = trimmed.split_whitespace().count();

    let mut vowel_count = 0;
    let mut consonant_count = 0;
    for ch in trimmed.chars() {
        if ch.is_alphabetic() {
            if VOWELS.contains(ch) {
                vowel_count += 1;
            } else {
                consonant_count += 1;
            }
        }
    }

    AnalysisResponse {
        sentence: sentence.to_string(),
        word_count,
        vowel_count,
        consonant_count,
    }
}
