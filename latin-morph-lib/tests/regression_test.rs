// Regression tests for known edge cases.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use latin_morph_lib::dictionary::{DirectCategory, DirectEntry};
use latin_morph_lib::request::StemQuery;
use latin_morph_lib::types::{Casus, Modus, Numerus, Tempus};
use latin_morph_lib::{
    ClosedClassTables, Dictionary, FormKind, LookupError, Morphologizer, MorphologizerConfig,
    ParadigmBuilder, StemLookup, StemPack,
};
use pretty_assertions::assert_eq;

fn morphologizer() -> Morphologizer {
    Morphologizer::new().unwrap()
}

fn with_lookup<L: StemLookup>(lookup: L) -> Morphologizer<L> {
    let tables = Arc::new(ClosedClassTables::load().unwrap());
    Morphologizer::with_parts(tables, lookup, ParadigmBuilder, MorphologizerConfig::default())
}

/// Counts every call before handing it to the embedded lexicon.
struct CountingLookup {
    inner: Dictionary,
    calls: AtomicUsize,
}

impl CountingLookup {
    fn new() -> Self {
        Self {
            inner: Dictionary::new(),
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl StemLookup for CountingLookup {
    fn look_up_stem(&self, query: &StemQuery) -> Result<Vec<StemPack>, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.look_up_stem(query)
    }

    fn direct_lookup(
        &self,
        category: DirectCategory,
        word: &str,
    ) -> Result<Vec<DirectEntry>, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.direct_lookup(category, word)
    }
}

struct OfflineLookup;

impl StemLookup for OfflineLookup {
    fn look_up_stem(&self, _query: &StemQuery) -> Result<Vec<StemPack>, LookupError> {
        Err(LookupError::Unavailable("connection refused".to_string()))
    }

    fn direct_lookup(
        &self,
        _category: DirectCategory,
        _word: &str,
    ) -> Result<Vec<DirectEntry>, LookupError> {
        Err(LookupError::Unavailable("connection refused".to_string()))
    }
}

#[test]
fn form_counts() {
    let m = morphologizer();
    let expected = [
        ("MD", 1),
        ("in", 1),
        ("cum", 2),
        ("rosa", 3),
        ("fili", 1),
        ("fero", 5),
        ("ratio", 2),
        ("homine", 1),
        ("Haeduorum", 2),
        ("Plato", 2),
        ("subito", 5),
        ("laudavit", 1),
        ("miserunt", 1),
        ("audire", 2),
        ("audiri", 1),
        ("monere", 2),
        ("serve", 1),
        ("canare", 2),
        ("canari", 1),
        ("ita", 7),
        ("contulissent", 1),
        ("intulisset", 1),
        ("desum", 1),
        ("maluit", 1),
        ("mavult", 1),
        ("it", 1),
        ("vult", 1),
        ("nolumus", 1),
        ("inito", 4),
        ("quibuscum", 3),
        ("quoquo", 3),
        ("iisdem", 6),
        ("uniuscuiusque", 3),
        ("quisque", 3),
        ("unusquisque", 3),
    ];
    for (token, count) in expected {
        assert_eq!(
            (token, m.analyze(token).forms.len()),
            (token, count),
            "form count of {token}"
        );
    }
}

#[test]
fn roman_numeral_keeps_value() {
    let a = morphologizer().analyze("MD");
    assert_eq!(a.forms[0].kind, FormKind::Cardinal);
    assert_eq!(a.forms[0].decimal, Some(1500));
}

#[test]
fn lowercase_roman_letters_are_not_numerals() {
    let a = morphologizer().analyze("md");
    assert!(a.forms.iter().all(|f| f.decimal.is_none()));
}

#[test]
fn preposition_reports_government() {
    let a = morphologizer().analyze("In");
    assert_eq!(a.forms[0].kind, FormKind::Preposition);
    assert_eq!(a.forms[0].government, Some((true, true)));
    assert_eq!(a.forms[0].string, "In");
}

#[test]
fn cum_is_preposition_and_subjunction() {
    let kinds: Vec<FormKind> = morphologizer()
        .analyze("cum")
        .forms
        .iter()
        .map(|f| f.kind)
        .collect();
    assert_eq!(kinds, vec![FormKind::Preposition, FormKind::Subjunction]);
}

#[test]
fn vocative_of_ius_noun() {
    let a = morphologizer().analyze("fili");
    assert_eq!(a.forms[0].lemma, "filius");
    assert_eq!(a.forms[0].attributes.casus, Some(Casus::Vocative));
}

#[test]
fn consonant_stem_ablative() {
    let a = morphologizer().analyze("homine");
    assert_eq!(a.forms[0].segments, vec!["homin", "e"]);
    assert_eq!(a.forms[0].attributes.casus, Some(Casus::Ablative));
}

#[test]
fn s_perfect() {
    let a = morphologizer().analyze("miserunt");
    assert_eq!(a.forms[0].lemma, "mittere");
    assert_eq!(a.forms[0].attributes.tempus, Some(Tempus::Pf));
    assert_eq!(a.forms[0].segments, vec!["mis", "erunt"]);
}

#[test]
fn contracted_perfect() {
    let a = morphologizer().analyze("audisti");
    assert_eq!(a.forms.len(), 1);
    assert_eq!(a.forms[0].lemma, "audire");
    assert_eq!(a.forms[0].attributes.tempus, Some(Tempus::Pf));
    assert_eq!(a.forms[0].string, "audisti");
    assert_eq!(a.forms[0].segments.concat(), "audisti");

    let a = morphologizer().analyze("amarunt");
    assert_eq!(a.forms.len(), 1);
    assert_eq!(a.forms[0].lemma, "amare");
    assert_eq!(a.forms[0].attributes.tempus, Some(Tempus::Pf));
    assert_eq!(a.forms[0].attributes.persona, Some(3));
    assert_eq!(a.forms[0].attributes.numerus, Some(Numerus::Pl));
    assert_eq!(a.forms[0].segments, vec!["ama", "runt"]);
}

#[test]
fn future_segments_keep_word_order() {
    let a = morphologizer().analyze("laudabit");
    assert_eq!(a.forms.len(), 1);
    assert_eq!(a.forms[0].attributes.tempus, Some(Tempus::Fut));
    assert_eq!(a.forms[0].segments, vec!["lauda", "b", "i", "t"]);
}

#[test]
fn irregular_compound_pluperfect() {
    let a = morphologizer().analyze("contulissent");
    assert_eq!(a.forms.len(), 1);
    assert_eq!(a.forms[0].lemma, "conferre");
    assert_eq!(a.forms[0].segments, vec!["con", "tul", "isse", "nt"]);
    assert_eq!(a.forms[0].attributes.tempus, Some(Tempus::Pqpf));
    assert_eq!(a.forms[0].attributes.modus, Some(Modus::Con));
}

#[test]
fn irregular_perfect_stem() {
    let a = morphologizer().analyze("maluit");
    assert_eq!(a.forms.len(), 1);
    assert_eq!(a.forms[0].lemma, "malle");
    assert_eq!(a.forms[0].segments, vec!["malu", "it"]);
    assert_eq!(a.forms[0].attributes.tempus, Some(Tempus::Pf));
}

#[test]
fn irregular_prefixed_present() {
    let a = morphologizer().analyze("desum");
    assert_eq!(a.forms.len(), 1);
    assert_eq!(a.forms[0].lemma, "deesse");
    assert_eq!(a.forms[0].segments, vec!["de", "s", "u", "m"]);
    assert_eq!(a.forms[0].attributes.persona, Some(1));
}

#[test]
fn ita_is_adverb_and_participle() {
    let a = morphologizer().analyze("ita");
    assert!(a
        .forms
        .iter()
        .any(|f| f.kind == FormKind::Adverb && f.lemma == "ita"));
    assert!(a
        .forms
        .iter()
        .any(|f| f.kind == FormKind::Participle && f.lemma == "ire"));
}

#[test]
fn pronoun_with_enclitic_cum() {
    let a = morphologizer().analyze("quibuscum");
    assert_eq!(a.forms.len(), 3);
    assert!(a
        .forms
        .iter()
        .all(|f| f.attributes.casus == Some(Casus::Ablative)));
}

#[test]
fn present_infinitive() {
    let a = morphologizer().analyze("audiri");
    assert_eq!(a.forms[0].lemma, "audire");
    assert_eq!(a.forms[0].attributes.modus, Some(Modus::Inf));
}

#[test]
fn unique_closed_class_skips_lookups() {
    let lookup = CountingLookup::new();
    let m = with_lookup(&lookup);
    let a = m.analyze("in");
    assert_eq!(a.forms.len(), 1);
    assert_eq!(lookup.calls(), 0);

    m.analyze("sed");
    assert_eq!(lookup.calls(), 0);
}

#[test]
fn homograph_falls_through_to_lexicon() {
    let lookup = CountingLookup::new();
    let m = with_lookup(&lookup);
    let a = m.analyze("fero");
    assert!(lookup.calls() > 0);
    assert_eq!(a.forms[0].kind, FormKind::Verb);
    assert_eq!(a.forms[0].lemma, "ferre");
    assert!(a
        .forms
        .iter()
        .any(|f| f.kind == FormKind::Adjective && f.lemma == "ferus"));
}

#[test]
fn participle_homograph_keeps_adverb() {
    let a = morphologizer().analyze("subito");
    let participles = a
        .forms
        .iter()
        .filter(|f| f.kind == FormKind::Participle)
        .count();
    assert_eq!(participles, 4);
    assert!(a
        .forms
        .iter()
        .any(|f| f.kind == FormKind::Adverb && f.lemma == "subito"));
}

#[test]
fn lookup_failures_are_collected() {
    let m = with_lookup(OfflineLookup);
    let a = m.analyze("rosa");
    assert!(a.forms.is_empty());
    assert!(!a.failures.is_empty());
    assert_eq!(a.failures[0].request, "Looking up rosa as adverb");
    assert!(a.failures[0].message.contains("connection refused"));
    assert!(a
        .failures
        .iter()
        .skip(1)
        .all(|f| f.request.starts_with("Looking up ")));
}

#[test]
fn closed_classes_survive_lookup_outage() {
    let m = with_lookup(OfflineLookup);
    let a = m.analyze("in");
    assert_eq!(a.forms.len(), 1);
    assert!(a.failures.is_empty());
}

#[test]
fn proper_names_keep_case() {
    let m = morphologizer();
    let upper = m.analyze("Plato");
    assert!(upper
        .forms
        .iter()
        .all(|f| f.kind == FormKind::Persona && f.lemma == "Plato"));

    let lower = m.analyze("plato");
    assert!(lower.forms.iter().all(|f| f.kind != FormKind::Persona));
}

#[test]
fn ethnic_genitive_plural() {
    let a = morphologizer().analyze("Haeduorum");
    assert!(a.forms.iter().all(|f| f.kind == FormKind::Ethnic));
    assert!(a
        .forms
        .iter()
        .all(|f| f.attributes.casus == Some(Casus::Genitive)));
}

#[test]
fn unknown_word_is_unresolved() {
    let a = morphologizer().analyze("qwrtz");
    assert!(a.is_unresolved());
    assert!(a.failures.is_empty());
}
