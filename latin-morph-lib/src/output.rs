// Output formatting for analyses.

use crate::types::{Analysis, Form, TextAnalysis};

/// Segments of a form joined with dashes, e.g. `homin-e`, `se-cum`.
pub fn segmentized(form: &Form) -> String {
    if form.segments.is_empty() {
        return form.string.clone();
    }
    form.segments.join("-")
}

/// One line per token: the token followed by its distinct segmentations.
pub fn analysis_to_segmented(analysis: &Analysis) -> String {
    let mut seen: Vec<String> = Vec::new();
    for form in &analysis.forms {
        let s = segmentized(form);
        if !seen.contains(&s) {
            seen.push(s);
        }
    }
    if seen.is_empty() {
        format!("{}: ?", analysis.token)
    } else {
        format!("{}: {}", analysis.token, seen.join(" | "))
    }
}

pub fn text_to_segmented(text: &TextAnalysis) -> String {
    text.tokens
        .iter()
        .map(analysis_to_segmented)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}
