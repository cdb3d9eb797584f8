// Closed-class recognizers. Each returns the forms a table produces for a
// word together with whether the match settles the word's analysis.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::tables::ClosedClassTables;
use crate::types::{Attributes, Casus, Form, FormKind, Modus};

/// Forms from one closed class. `unique` is set when no other reading of
/// the word is possible and the cascade must stop.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClosedMatch {
    pub forms: Vec<Form>,
    pub unique: bool,
}

static ROMAN_NUMERAL: Lazy<Regex> =
    Lazy::new(|| Regex::new("^[IVXLCDM]+$").expect("roman numeral pattern"));

static PERSONAL_PRONOUN_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new("(cum|met|te)$").expect("pronoun suffix pattern"));

const ROMAN_DIGITS: [(u32, &str); 13] = [
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

/// Decimal value of a canonically written roman numeral (1 to 3999).
pub fn roman_value(token: &str) -> Option<u32> {
    if !ROMAN_NUMERAL.is_match(token) {
        return None;
    }
    let digit = |c: char| match c {
        'I' => 1,
        'V' => 5,
        'X' => 10,
        'L' => 50,
        'C' => 100,
        'D' => 500,
        _ => 1000,
    };
    let values: Vec<u32> = token.chars().map(digit).collect();
    let mut total = 0u32;
    for (i, &v) in values.iter().enumerate() {
        match values.get(i + 1) {
            Some(&next) if next > v => total = total.checked_sub(v)?,
            _ => total = total.checked_add(v)?,
        }
    }
    // IIII, VX and friends sum up fine but are not numerals
    (total > 0 && total < 4000 && to_roman(total) == token).then_some(total)
}

fn to_roman(mut n: u32) -> String {
    let mut out = String::new();
    for (value, digits) in ROMAN_DIGITS {
        while n >= value {
            out.push_str(digits);
            n -= value;
        }
    }
    out
}

pub fn numeral(token: &str) -> Option<ClosedMatch> {
    let value = roman_value(token)?;
    let mut form = Form::bare(FormKind::Cardinal, token);
    form.lemma = token.to_string();
    form.decimal = Some(value);
    Some(ClosedMatch {
        forms: vec![form],
        unique: true,
    })
}

pub fn preposition(tables: &ClosedClassTables, token: &str, word: &str) -> Option<ClosedMatch> {
    let entry = tables.prepositions.get(word)?;
    let mut form = Form::bare(FormKind::Preposition, token);
    form.government = Some((entry.takes_accusative, entry.takes_ablative));
    Some(ClosedMatch {
        forms: vec![form],
        unique: !entry.homographic,
    })
}

pub fn conjunction(tables: &ClosedClassTables, token: &str, word: &str) -> Option<ClosedMatch> {
    let homographic = tables.conjunctions.get(word)?;
    Some(ClosedMatch {
        forms: vec![Form::bare(FormKind::Conjunction, token)],
        unique: !homographic,
    })
}

pub fn subjunction(tables: &ClosedClassTables, token: &str, word: &str) -> Option<ClosedMatch> {
    let homographic = tables.subjunctions.get(word)?;
    Some(ClosedMatch {
        forms: vec![Form::bare(FormKind::Subjunction, token)],
        unique: !homographic,
    })
}

/// ego, tu and the reflexive, including the -cum, -met and -te compounds.
pub fn personal_pronoun(
    tables: &ClosedClassTables,
    token: &str,
    word: &str,
) -> Option<ClosedMatch> {
    let entries = tables.personal_pronouns.get(word)?;

    let mut segments = vec![word.to_string()];
    if let Some(m) = PERSONAL_PRONOUN_SUFFIX.find(word) {
        if m.start() > 0 {
            segments = vec![word[..m.start()].to_string(), m.as_str().to_string()];
        }
    }

    let forms = entries
        .iter()
        .map(|entry| {
            let lemma = match entry.person {
                1 => "ego",
                2 => "tu",
                _ => "sui",
            };
            Form {
                lemma: lemma.to_string(),
                segments: segments.clone(),
                attributes: Attributes {
                    persona: Some(entry.person),
                    ..Attributes::nominal(entry.casus, entry.numerus, None)
                },
                ..Form::bare(FormKind::PersonalPronoun, token)
            }
        })
        .collect();

    Some(ClosedMatch {
        forms,
        unique: !tables.homophonic_personal_pronouns.contains(word),
    })
}

/// Pronoun type of a word, e.g. "quendam" => "quidam", and the form to look
/// up in the type's paradigm.
pub fn extract_pronoun_type(tables: &ClosedClassTables, word: &str) -> Option<(String, String)> {
    let caps = tables.pronouns.pattern.captures(word)?;
    let group = |name: &str| caps.name(name).map_or("", |m| m.as_str());
    let prefixed = group("prefixed_particle");
    let stem = group("stem");
    let ending = group("ending");
    let particle = group("particle");

    let stem_and_ending = format!("{stem}{ending}");
    let key = if particle == stem_and_ending {
        "quisquis".to_string()
    } else {
        // quis and quid against qui and quod
        let substantival = if stem == "qu" && (ending.ends_with("is") || ending.ends_with("id")) {
            "_s"
        } else {
            ""
        };
        let head: String = prefixed.chars().take(2).collect();
        format!("{head}{stem}{particle}{substantival}")
    };
    let kind = tables.pronouns.map.get(&key)?;

    let base = if kind == "hic" {
        word.to_string()
    } else {
        let mut base = stem_and_ending;
        // eundem, quendam, quicquam
        if (particle == "dam" || particle == "dem") && base.ends_with('n') {
            base.pop();
            base.push('m');
        } else if particle.starts_with('q') && base.ends_with('c') {
            base.pop();
            base.push('d');
        }
        base
    };
    Some((kind.clone(), base))
}

/// Other pronouns. Only counts as a match when the paradigm has the form.
pub fn pronoun(tables: &ClosedClassTables, token: &str, word: &str) -> Option<ClosedMatch> {
    let (kind, base) = extract_pronoun_type(tables, word)?;
    let caps = tables.pronouns.pattern.captures(word)?;
    let cells_of = |kind: &str| {
        let paradigm = tables.pronouns.bases.get(kind)?;
        tables.pronouns.paradigms.get(paradigm)?.get(&base)
    };

    let mut cells: Vec<Attributes> = cells_of(kind.as_str()).cloned().unwrap_or_default();
    // quisque: substantival quis and adjectival quis(que)
    if let Some(adjectival) = kind.strip_suffix("_s") {
        cells.extend(cells_of(adjectival).into_iter().flatten().cloned());
    }
    // quibuscum, quocum
    if caps.name("particle").is_some_and(|m| m.as_str() == "cum") {
        cells.retain(|cell| cell.casus == Some(Casus::Ablative));
    }
    if cells.is_empty() {
        return None;
    }

    let lemma = kind.trim_end_matches("_s");
    let segments: Vec<String> = ["prefixed_particle", "stem", "ending", "particle"]
        .into_iter()
        .filter_map(|name| caps.name(name))
        .map(|m| m.as_str().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    let forms = cells
        .into_iter()
        .map(|cell| Form {
            lemma: lemma.to_string(),
            segments: segments.clone(),
            attributes: cell,
            ..Form::bare(FormKind::Pronoun, token)
        })
        .collect();

    Some(ClosedMatch {
        forms,
        unique: !tables.homographic_pronouns.contains(word),
    })
}

/// Irregular verbs, tried lemma by lemma. Trying stops after the first lemma
/// that matched without being flagged as a possible homograph.
///
/// Matching runs on the lowercased word so that sentence-initial "Est" is
/// found; the forms keep the token as written.
pub fn irregular_verbs(tables: &ClosedClassTables, token: &str, word: &str) -> ClosedMatch {
    let mut result = ClosedMatch::default();

    for verb in &tables.irregular_verbs {
        if result.unique {
            break;
        }
        let matches = verb.matches(word);
        for m in &matches {
            let segments = m.segments();
            debug!(lemma = %verb.lemma, form = %segments.join("-"), "irregular verb matched");
            for cell in &m.ending.cells {
                let kind = if cell.modus == Some(Modus::Part) {
                    FormKind::Participle
                } else {
                    FormKind::Verb
                };
                result.forms.push(Form {
                    lemma: format!("{}{}", m.prefix, verb.lemma),
                    segments: segments.clone(),
                    attributes: cell.clone(),
                    ..Form::bare(kind, token)
                });
            }
        }
        if !matches.is_empty() && !verb.is_homograph(word) {
            result.unique = true;
        }
    }
    result
}

pub fn cardinal(tables: &ClosedClassTables, token: &str, word: &str) -> Option<ClosedMatch> {
    let entries = tables.cardinals.get(word)?;
    let forms = entries
        .iter()
        .map(|entry| Form {
            attributes: Attributes {
                casus: entry.casus,
                numerus: entry.numerus,
                sexus: entry.sexus,
                ..Attributes::default()
            },
            decimal: Some(entry.decimal),
            ..Form::bare(FormKind::Cardinal, token)
        })
        .collect();
    // no cardinal is known to share its spelling with another word
    Some(ClosedMatch {
        forms,
        unique: true,
    })
}
