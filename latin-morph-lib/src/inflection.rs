// Inflection class inference.
//
// Given the table a request targets and the current decomposition, decide
// which inflection classes (or perfect compositions) an entry must have to be
// worth looking up. An empty result means the request is not emitted.
//
// Numeric classes: 1..5 are the five declensions (or conjugations, with 5 the
// mixed i-stems of capio). 3 is the consonantal third declension, 31..33 its
// vocalic subgroups.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::segment::{Decomposition, Program};
use crate::types::{Category, PfTag, Restriction, StemRole};

fn suffix(re: &str) -> Regex {
    Regex::new(&format!("(?:{re})$")).expect("class pattern is a valid regex")
}

/// Suffix tests on a string, first match wins.
struct Battery(Vec<(Regex, &'static [u8])>);

impl Battery {
    fn new(rows: &[(&str, &'static [u8])]) -> Self {
        Self(rows.iter().map(|(re, c)| (suffix(re), *c)).collect())
    }

    fn classify(&self, s: &str) -> &'static [u8] {
        self.0
            .iter()
            .find(|(re, _)| re.is_match(s))
            .map(|(_, c)| *c)
            .unwrap_or(&[])
    }
}

static NOUN_NOM: Lazy<Battery> = Lazy::new(|| {
    Battery::new(&[
        ("us", &[3, 4]),
        ("er", &[2, 3]),
        ("es", &[3]),
        ("u", &[4]),
        ("ar", &[3, 31]),
        ("e|al|ar", &[31]),
        ("is", &[3, 32, 33]),
        ("[^aeiou]s", &[3, 33]),
        ("x", &[3, 33]),
        // or, os, o, as, ur, men and whatever else got this far
        ("", &[3]),
    ])
});

static NOUN_STEM: Lazy<Battery> = Lazy::new(|| {
    Battery::new(&[
        ("[^aeou]a", &[1, 2, 3, 31]),
        ("ae|am|arum|as", &[1]),
        ("is", &[1, 2, 3, 31, 32, 33]),
        ("ui", &[2, 4]),
        ("[^aeou]i", &[2, 3, 31, 32, 33]),
        ("um", &[2, 3, 4, 31, 32, 33]),
        ("o|orum|os", &[2]),
        ("ei|erum|ebus", &[5]),
        ("[^aeou]e", &[2, 3, 33, 5]),
        ("es", &[3, 32, 33, 5]),
        ("em", &[3, 33, 5]),
        ("ibus", &[3, 31, 32, 33, 4]),
        ("us|u|ua", &[2, 4]),
        ("im", &[32]),
        ("ia", &[31]),
    ])
});

static ADJECTIVE_NOM: Lazy<Battery> = Lazy::new(|| {
    Battery::new(&[
        ("^maior", &[3]),
        ("us|er|is|[^i]or", &[1, 3, 5]),
        ("ar|s|x", &[3]),
    ])
});

static ADJECTIVE_STEM: Lazy<Battery> =
    Lazy::new(|| Battery::new(&[("ius", &[5]), ("ter", &[3, 5]), ("[a-z]", &[1, 3, 5])]));

static PPP_STEM: Lazy<Regex> = Lazy::new(|| suffix("t|s|x"));
static CONSONANT: Lazy<Regex> = Lazy::new(|| suffix("[^aie]"));
static NON_VOWEL: Lazy<Regex> = Lazy::new(|| suffix("[^aeio]"));
static SIGMATIC: Lazy<Regex> = Lazy::new(|| suffix("s|x"));

/// Classes an entry needs to match the current decomposition, in the order
/// they were inferred, without duplicates.
pub fn admissible_classes(
    program: Program,
    category: Category,
    role: StemRole,
    state: &Decomposition,
) -> Restriction {
    let classes = match (program, category) {
        (Program::Conjugable, _) => return conjugable(role, state),
        (Program::Declinable, Category::Adjective | Category::Ethnic) => {
            adjective_classes(role, state)
        }
        (Program::Declinable, Category::Verb) => verb_classes(role, state),
        (Program::Declinable, _) => noun_classes(role, state),
    };
    Restriction::InflectionClass(dedup(classes))
}

fn dedup(classes: Vec<u8>) -> Vec<u8> {
    let mut out = Vec::with_capacity(classes.len());
    for c in classes {
        if !out.contains(&c) {
            out.push(c);
        }
    }
    out
}

fn noun_classes(role: StemRole, state: &Decomposition) -> Vec<u8> {
    let mut classes = Vec::new();
    match role {
        StemRole::Nom => classes.extend_from_slice(NOUN_NOM.classify(&state.stem)),
        StemRole::Stem if state.ending.is_empty() => {
            // fili, the contracted vocative
            if state.stem.ends_with('i') {
                classes.push(2);
            }
        }
        StemRole::Stem => {
            let word = format!("{}{}", state.stem, state.ending);
            classes.extend_from_slice(NOUN_STEM.classify(&word));
            if state.ending == "erum" {
                classes.push(5);
            }
        }
        _ => {}
    }
    classes
}

fn adjective_classes(role: StemRole, state: &Decomposition) -> Vec<u8> {
    let mut classes = Vec::new();
    match role {
        StemRole::Nom => classes.extend_from_slice(ADJECTIVE_NOM.classify(&state.stem)),
        StemRole::Stem => {
            if !state.ending.is_empty() {
                let word = format!("{}{}", state.stem, state.ending);
                classes.extend_from_slice(ADJECTIVE_STEM.classify(&word));
            }
            if !state.comparison_sign.is_empty() && state.ending.is_empty() {
                classes.extend_from_slice(&[1, 3]);
            }
        }
        _ => {}
    }
    classes
}

fn verb_classes(role: StemRole, state: &Decomposition) -> Vec<u8> {
    let mut classes = Vec::new();
    let stem = state.stem.as_str();

    if role == StemRole::Ppp
        && !state.ending.is_empty()
        && (state.extension.is_empty() || state.extension == "ur")
        && PPP_STEM.is_match(stem)
    {
        classes.extend_from_slice(&[1, 2, 3, 4, 5]);
    }

    let participial = role == StemRole::Pr || (role == StemRole::Ppp && !state.extension.is_empty());
    // amant- needs a case ending, amans is fine on its own
    let bare_n = state.extension == "n" && state.ending != "s";
    if participial && !bare_n {
        if stem.ends_with('a') {
            classes.push(1);
        } else if stem.ends_with('i') {
            classes.push(4);
        } else if stem.ends_with('e') {
            classes.push(2);
        } else if CONSONANT.is_match(stem) {
            if state.thematic == "e" {
                classes.push(3);
            }
            if state.thematic == "ie" || state.ending == "re" {
                classes.push(5);
            }
        }
    }

    if role == StemRole::Pr
        && state.ending == "i"
        && state.extension.is_empty()
        && CONSONANT.is_match(stem)
    {
        classes.extend_from_slice(&[3, 5]);
    }

    if role == StemRole::Pf {
        classes.extend_from_slice(&[1, 2, 3, 4, 5]);
    }
    classes
}

fn conjugable(role: StemRole, state: &Decomposition) -> Restriction {
    let stem = state.stem.as_str();
    match role {
        StemRole::Pf => {
            let mut tags = Vec::new();
            if stem.ends_with('v') {
                tags.push(PfTag::V);
            }
            if stem.ends_with('u') {
                tags.push(PfTag::U);
            }
            if SIGMATIC.is_match(stem) {
                tags.push(PfTag::S);
            }
            if !(stem.ends_with('v') || stem.ends_with('u') || SIGMATIC.is_match(stem)) {
                tags.push(PfTag::Else);
                tags.push(PfTag::Ablaut);
            }
            tags.push(PfTag::Reduplication);
            Restriction::PfComposition(tags)
        }
        StemRole::Pr => {
            let mut classes = Vec::new();
            if stem.ends_with('a') {
                classes.push(1);
            }
            if stem.ends_with('e') {
                classes.push(2);
            }
            if NON_VOWEL.is_match(stem) && state.thematic != "iu" {
                classes.push(3);
            }
            if stem.ends_with('i') {
                classes.push(4);
            }
            if NON_VOWEL.is_match(stem) && state.thematic != "u" {
                classes.push(5);
            }
            Restriction::InflectionClass(classes)
        }
        _ => Restriction::InflectionClass(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(stem: &str, ending: &str) -> Decomposition {
        Decomposition {
            stem: stem.to_string(),
            ending: ending.to_string(),
            ..Decomposition::default()
        }
    }

    fn classes(r: Restriction) -> Vec<u8> {
        match r {
            Restriction::InflectionClass(v) => v,
            Restriction::PfComposition(v) => panic!("unexpected composition {v:?}"),
        }
    }

    #[test]
    fn noun_nominative() {
        let c = |s| {
            classes(admissible_classes(
                Program::Declinable,
                Category::Noun,
                StemRole::Nom,
                &state(s, ""),
            ))
        };
        assert_eq!(c("hortus"), vec![3, 4]);
        assert_eq!(c("Caesar"), vec![3, 31]);
        assert_eq!(c("nox"), vec![3, 33]);
        assert_eq!(c("ratio"), vec![3]);
    }

    #[test]
    fn noun_stem_with_ending() {
        let c = |s, e| {
            classes(admissible_classes(
                Program::Declinable,
                Category::Noun,
                StemRole::Stem,
                &state(s, e),
            ))
        };
        assert_eq!(c("ros", "arum"), vec![1]);
        assert_eq!(c("homin", "e"), vec![2, 3, 33, 5]);
        // rerum hits the um row first, 5 is added on top
        assert_eq!(c("r", "erum"), vec![2, 3, 4, 31, 32, 33, 5]);
        assert_eq!(c("fili", ""), vec![2]);
        assert!(c("ros", "").is_empty());
    }

    #[test]
    fn adjective_classes() {
        let mut st = state("mel", "");
        st.comparison_sign = "ior".to_string();
        let c = classes(admissible_classes(
            Program::Declinable,
            Category::Adjective,
            StemRole::Stem,
            &st,
        ));
        assert_eq!(c, vec![1, 3]);

        let c = classes(admissible_classes(
            Program::Declinable,
            Category::Adjective,
            StemRole::Nom,
            &state("maior", ""),
        ));
        assert_eq!(c, vec![3]);
    }

    #[test]
    fn participle_classes() {
        let mut st = state("reg", "is");
        st.extension = "nt".to_string();
        st.thematic = "e".to_string();
        let c = classes(admissible_classes(
            Program::Declinable,
            Category::Verb,
            StemRole::Pr,
            &st,
        ));
        assert_eq!(c, vec![3]);

        // gerundive stem without ending is not searched
        let mut st = state("lauda", "");
        st.extension = "n".to_string();
        let c = classes(admissible_classes(
            Program::Declinable,
            Category::Verb,
            StemRole::Pr,
            &st,
        ));
        assert!(c.is_empty());
    }

    #[test]
    fn conjugable_present_and_perfect() {
        let c = classes(admissible_classes(
            Program::Conjugable,
            Category::Verb,
            StemRole::Pr,
            &state("reg", "it"),
        ));
        assert_eq!(c, vec![3, 5]);

        let r = admissible_classes(
            Program::Conjugable,
            Category::Verb,
            StemRole::Pf,
            &state("mis", "erunt"),
        );
        assert_eq!(r, Restriction::PfComposition(vec![PfTag::S, PfTag::Reduplication]));

        let r = admissible_classes(
            Program::Conjugable,
            Category::Verb,
            StemRole::Pf,
            &state("fec", "it"),
        );
        assert_eq!(
            r,
            Restriction::PfComposition(vec![PfTag::Else, PfTag::Ablaut, PfTag::Reduplication])
        );
    }
}
