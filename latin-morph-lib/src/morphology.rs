// Morphologizer: analyses one token at a time.
//
// Closed classes are tried first, in a fixed order. A match flagged unique
// ends the analysis; anything else falls through. What survives the cascade
// goes to the adverb table and to the segment builder, whose requests are
// resolved by the stem lookup and turned into forms by the form builder.

use std::sync::Arc;

use dashmap::DashMap;
use serde::Deserialize;
use tracing::{debug, trace, warn};

use crate::classifier::{self, ClosedMatch};
use crate::dictionary::{Dictionary, DirectCategory, StemLookup};
use crate::errors::Result;
use crate::forms::{FormBuilder, ParadigmBuilder};
use crate::segment::SegmentBuilder;
use crate::tables::ClosedClassTables;
use crate::types::{Analysis, Form, FormKind, RequestFailure};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MorphologizerConfig {
    /// Memoize analyses by token.
    pub cache: bool,
}

pub struct Morphologizer<L = Dictionary, B = ParadigmBuilder> {
    tables: Arc<ClosedClassTables>,
    lookup: L,
    builder: B,
    cache: Option<DashMap<String, Analysis>>,
}

impl Morphologizer {
    /// Embedded tables and lexicon, no cache.
    pub fn new() -> Result<Self> {
        Self::with_config(MorphologizerConfig::default())
    }

    pub fn with_config(config: MorphologizerConfig) -> Result<Self> {
        let tables = Arc::new(ClosedClassTables::load()?);
        Ok(Morphologizer::with_parts(
            tables,
            Dictionary::new(),
            ParadigmBuilder,
            config,
        ))
    }
}

impl<L: StemLookup, B: FormBuilder> Morphologizer<L, B> {
    pub fn with_parts(
        tables: Arc<ClosedClassTables>,
        lookup: L,
        builder: B,
        config: MorphologizerConfig,
    ) -> Self {
        Self {
            tables,
            lookup,
            builder,
            cache: config.cache.then(DashMap::new),
        }
    }

    pub fn tables(&self) -> &ClosedClassTables {
        &self.tables
    }

    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    /// All interpretations of `token`, in discovery order. An empty result
    /// means the word is unknown.
    pub fn analyze(&self, token: &str) -> Analysis {
        let Some(cache) = &self.cache else {
            return self.run(token);
        };
        if let Some(hit) = cache.get(token) {
            trace!(token, "cache hit");
            return hit.value().clone();
        }
        // a racing analysis of the same token computes the same result
        let analysis = self.run(token);
        cache.insert(token.to_string(), analysis.clone());
        analysis
    }

    /// Like [`analyze`](Self::analyze), also adding the forms to `sink`.
    pub fn analyze_into(&self, token: &str, sink: &mut impl Extend<Form>) -> Analysis {
        let analysis = self.analyze(token);
        sink.extend(analysis.forms.iter().cloned());
        analysis
    }

    fn run(&self, token: &str) -> Analysis {
        let mut analysis = Analysis {
            token: token.to_string(),
            ..Analysis::default()
        };
        let word = token.to_lowercase();

        if !self.closed_classes(token, &word, &mut analysis) {
            self.open_classes(token, &word, &mut analysis);
        }

        if analysis.is_unresolved() {
            warn!(token, "missing word");
        } else {
            debug!(token, forms = analysis.forms.len(), "analysed");
        }
        analysis
    }

    /// Runs the closed-class cascade. True when the word is settled.
    fn closed_classes(&self, token: &str, word: &str, analysis: &mut Analysis) -> bool {
        let tables = &*self.tables;

        if take(analysis, classifier::numeral(token)) {
            return true;
        }
        if take(analysis, classifier::preposition(tables, token, word)) {
            return true;
        }
        if take(analysis, classifier::conjunction(tables, token, word)) {
            return true;
        }
        if take(analysis, classifier::subjunction(tables, token, word)) {
            return true;
        }
        if take(analysis, classifier::personal_pronoun(tables, token, word)) {
            return true;
        }
        if take(analysis, classifier::pronoun(tables, token, word)) {
            return true;
        }
        if take(analysis, Some(classifier::irregular_verbs(tables, token, word))) {
            return true;
        }
        take(analysis, classifier::cardinal(tables, token, word))
    }

    fn open_classes(&self, token: &str, word: &str, analysis: &mut Analysis) {
        match self.lookup.direct_lookup(DirectCategory::Adverb, word) {
            Ok(entries) => {
                for entry in entries {
                    let mut form = Form::bare(FormKind::Adverb, token);
                    form.lemma = entry.word;
                    analysis.forms.push(form);
                }
            }
            Err(err) => {
                warn!(word, error = %err, "adverb lookup failed");
                analysis.failures.push(RequestFailure {
                    request: format!("Looking up {word} as adverb"),
                    message: err.to_string(),
                });
            }
        }

        for request in SegmentBuilder::statements(token) {
            let packs = match self.lookup.look_up_stem(&request.to_query()) {
                Ok(packs) => packs,
                Err(err) => {
                    warn!(%request, error = %err, "stem lookup failed");
                    analysis.failures.push(RequestFailure {
                        request: request.to_string(),
                        message: err.to_string(),
                    });
                    continue;
                }
            };
            if packs.is_empty() {
                continue;
            }
            debug!(entries = packs.len(), "found entries for {request}");

            for pack in &packs {
                let forms = self.builder.build(token, pack, &request);
                debug!(lemma = %pack.lemma, forms = forms.len(), "created forms");
                analysis.forms.extend(forms);
            }
        }
    }
}

/// Add a closed-class match to the analysis. True when it settles the word.
fn take(analysis: &mut Analysis, found: Option<ClosedMatch>) -> bool {
    match found {
        Some(m) => {
            analysis.forms.extend(m.forms);
            m.unique
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_closed_class_stops() {
        let m = Morphologizer::new().unwrap();
        let a = m.analyze("in");
        assert_eq!(a.forms.len(), 1);
        assert_eq!(a.forms[0].kind, FormKind::Preposition);
    }

    #[test]
    fn test_unknown_word_is_empty() {
        let m = Morphologizer::new().unwrap();
        let a = m.analyze("xyzzy");
        assert!(a.is_unresolved());
        assert!(a.failures.is_empty());
    }

    #[test]
    fn test_cache_returns_same_analysis() {
        let m = Morphologizer::with_config(MorphologizerConfig { cache: true }).unwrap();
        let first = m.analyze("rosa");
        let second = m.analyze("rosa");
        assert_eq!(first.forms, second.forms);
        assert_eq!(m.cache.as_ref().map(DashMap::len), Some(1));
    }

    #[test]
    fn test_analyze_into_sink() {
        let m = Morphologizer::new().unwrap();
        let mut sink = Vec::new();
        m.analyze_into("cum", &mut sink);
        m.analyze_into("in", &mut sink);
        assert_eq!(sink.len(), 3);
    }

    #[test]
    fn test_config_defaults() {
        let config: MorphologizerConfig = serde_json::from_str("{}").unwrap();
        assert!(!config.cache);
    }
}
