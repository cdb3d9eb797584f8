// Text-level analysis: split a line into tokens and analyse each on its own.

use crate::dictionary::StemLookup;
use crate::forms::FormBuilder;
use crate::morphology::Morphologizer;
use crate::types::TextAnalysis;

/// Analyse every token of a line of Latin text.
pub fn analyze_text<L: StemLookup, B: FormBuilder>(
    input: &str,
    morphologizer: &Morphologizer<L, B>,
) -> TextAnalysis {
    let tokens = split_text(input)
        .iter()
        .map(|token| morphologizer.analyze(token))
        .collect();
    TextAnalysis {
        input: input.to_string(),
        tokens,
    }
}

/// Whitespace-separated tokens with surrounding punctuation removed.
pub fn split_text(input: &str) -> Vec<String> {
    input
        .split_whitespace()
        .map(|w| {
            w.trim_matches(|c: char| {
                matches!(
                    c,
                    '.' | '!' | '?' | ',' | ';' | ':' | '"' | '\'' | '(' | ')' | '[' | ']'
                )
            })
        })
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}
