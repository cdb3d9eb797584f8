// Closed-class tables: prepositions, particles, pronouns, cardinals and
// irregular verbs. Loaded once from embedded JSON and never mutated.

use std::collections::{HashMap, HashSet};

use regex::Regex;
use serde::Deserialize;

use crate::errors::TableError;
use crate::types::{Attributes, Casus, Genus, Modus, Numerus, Sexus, Tempus};

const EMBEDDED_TABLES: &str = include_str!("../data/closed_classes.json");

/// Case government of a preposition and whether it has other readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preposition {
    pub takes_accusative: bool,
    pub takes_ablative: bool,
    pub homographic: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersonalPronounEntry {
    /// 1 and 2 for the speaker and addressee, 3 for the reflexive.
    pub person: u8,
    pub casus: Casus,
    pub numerus: Numerus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardinalEntry {
    pub decimal: u32,
    pub casus: Option<Casus>,
    pub numerus: Option<Numerus>,
    pub sexus: Option<Sexus>,
}

/// Regex and lookup maps dispatching a word to its pronoun paradigm.
#[derive(Debug)]
pub struct PronounTables {
    pub pattern: Regex,
    /// stem + particle key => pronoun type
    pub map: HashMap<String, String>,
    /// pronoun type => paradigm name
    pub bases: HashMap<String, String>,
    /// paradigm name => base form => cells
    pub paradigms: HashMap<String, HashMap<String, Vec<Attributes>>>,
}

/// One row of an ending table: the ending split into its segments (e.g.
/// "isse", "nt") and the cells it spells.
#[derive(Debug, Clone)]
pub struct IrregularEnding {
    pub segments: Vec<String>,
    pub cells: Vec<Attributes>,
}

impl IrregularEnding {
    fn len(&self) -> usize {
        self.segments.iter().map(String::len).sum()
    }
}

/// Stem alternants sharing one ending table, e.g. vol- with -o, -u-mus.
#[derive(Debug, Clone)]
pub struct StemTable {
    pub stems: Vec<String>,
    pub endings: Vec<IrregularEnding>,
}

/// One way a word splits into a form of an irregular verb.
#[derive(Debug, Clone, Copy)]
pub struct IrregularMatch<'a> {
    pub prefix: &'a str,
    pub stem: &'a str,
    pub ending: &'a IrregularEnding,
}

impl IrregularMatch<'_> {
    /// prefix, stem and ending segments, with an empty prefix left out
    pub fn segments(&self) -> Vec<String> {
        let mut segments = Vec::with_capacity(self.ending.segments.len() + 2);
        if !self.prefix.is_empty() {
            segments.push(self.prefix.to_string());
        }
        segments.push(self.stem.to_string());
        segments.extend(self.ending.segments.iter().cloned());
        segments
    }
}

/// An irregular verb as stem alternants times ending tables. Perfect stems
/// and participle stems share the tables every such verb uses.
#[derive(Debug)]
pub struct IrregularVerb {
    pub lemma: String,
    /// Compound prefixes the forms may carry.
    pub prefixes: Option<Regex>,
    /// Words matching this are also something else and must not end the
    /// closed-class cascade.
    pub homograph: Option<Regex>,
    pub tables: Vec<StemTable>,
}

impl IrregularVerb {
    /// Every split of `word` into an allowed prefix, a stem and an ending.
    pub fn matches<'a>(&'a self, word: &'a str) -> Vec<IrregularMatch<'a>> {
        let mut found = Vec::new();
        for table in &self.tables {
            for ending in &table.endings {
                let Some(at) = word.len().checked_sub(ending.len()) else {
                    continue;
                };
                let Some((head, tail)) = word.get(..at).zip(word.get(at..)) else {
                    continue;
                };
                if !spells(tail, &ending.segments) {
                    continue;
                }
                for stem in &table.stems {
                    let Some(prefix) = head.strip_suffix(stem.as_str()) else {
                        continue;
                    };
                    if prefix.is_empty()
                        || self.prefixes.as_ref().is_some_and(|re| re.is_match(prefix))
                    {
                        found.push(IrregularMatch {
                            prefix,
                            stem: stem.as_str(),
                            ending,
                        });
                    }
                }
            }
        }
        found
    }

    pub fn is_homograph(&self, word: &str) -> bool {
        self.homograph.as_ref().is_some_and(|re| re.is_match(word))
    }
}

fn spells(text: &str, segments: &[String]) -> bool {
    let mut rest = text;
    for segment in segments {
        match rest.strip_prefix(segment.as_str()) {
            Some(r) => rest = r,
            None => return false,
        }
    }
    rest.is_empty()
}

/// All closed-class knowledge the morphologizer consults.
#[derive(Debug)]
pub struct ClosedClassTables {
    pub prepositions: HashMap<String, Preposition>,
    /// word => has other readings
    pub conjunctions: HashMap<String, bool>,
    pub subjunctions: HashMap<String, bool>,
    pub personal_pronouns: HashMap<String, Vec<PersonalPronounEntry>>,
    pub homophonic_personal_pronouns: HashSet<String>,
    pub pronouns: PronounTables,
    pub homographic_pronouns: HashSet<String>,
    pub irregular_verbs: Vec<IrregularVerb>,
    pub cardinals: HashMap<String, Vec<CardinalEntry>>,
}

// ---- raw JSON layout ----

#[derive(Deserialize)]
struct RawTables {
    prepositions: HashMap<String, (bool, bool, bool)>,
    conjunctions: HashMap<String, bool>,
    subjunctions: HashMap<String, bool>,
    personal_pronouns: HashMap<String, Vec<(u8, u8, Numerus)>>,
    homophonic_personal_pronouns: Vec<String>,
    pronouns: RawPronouns,
    homographic_pronouns: Vec<String>,
    irregular_verbs: RawIrregulars,
    cardinals: HashMap<String, Vec<(u32, Option<u8>, Option<Numerus>, Option<Sexus>)>>,
}

#[derive(Deserialize)]
struct RawPronouns {
    pattern: String,
    map: HashMap<String, String>,
    bases: HashMap<String, String>,
    paradigms: HashMap<String, HashMap<String, Vec<String>>>,
}

/// Ending rows as ("seg-ment-ed", cells).
type RawEndings = Vec<(String, Vec<String>)>;

#[derive(Deserialize)]
struct RawIrregulars {
    perfect_endings: RawEndings,
    participle_endings: RawEndings,
    verbs: Vec<RawIrregularVerb>,
}

#[derive(Deserialize)]
struct RawStemTable {
    stems: Vec<String>,
    endings: RawEndings,
}

#[derive(Deserialize)]
struct RawIrregularVerb {
    lemma: String,
    #[serde(default)]
    prefixes: Option<String>,
    #[serde(default)]
    homograph: Option<String>,
    present: Vec<RawStemTable>,
    #[serde(default)]
    perfect: Vec<String>,
    #[serde(default)]
    ppp: Vec<String>,
}

impl ClosedClassTables {
    /// Parse the tables embedded in the library.
    pub fn load() -> Result<Self, TableError> {
        Self::from_json(EMBEDDED_TABLES)
    }

    pub fn from_json(json: &str) -> Result<Self, TableError> {
        let raw: RawTables = serde_json::from_str(json).map_err(|source| TableError::Json {
            table: "closed_classes",
            source,
        })?;

        let prepositions = raw
            .prepositions
            .into_iter()
            .map(|(word, (acc, abl, homographic))| {
                let prep = Preposition {
                    takes_accusative: acc,
                    takes_ablative: abl,
                    homographic,
                };
                (word, prep)
            })
            .collect();

        let mut personal_pronouns = HashMap::new();
        for (word, rows) in raw.personal_pronouns {
            let entries = rows
                .into_iter()
                .map(|(person, casus, numerus)| {
                    Ok(PersonalPronounEntry {
                        person,
                        casus: casus_from_number("personal_pronouns", casus)?,
                        numerus,
                    })
                })
                .collect::<Result<Vec<_>, TableError>>()?;
            personal_pronouns.insert(word, entries);
        }

        let mut cardinals = HashMap::new();
        for (word, rows) in raw.cardinals {
            let entries = rows
                .into_iter()
                .map(|(decimal, casus, numerus, sexus)| {
                    let casus = casus
                        .map(|c| casus_from_number("cardinals", c))
                        .transpose()?;
                    Ok(CardinalEntry {
                        decimal,
                        casus,
                        numerus,
                        sexus,
                    })
                })
                .collect::<Result<Vec<_>, TableError>>()?;
            cardinals.insert(word, entries);
        }

        let perfect_endings = parse_endings(raw.irregular_verbs.perfect_endings)?;
        let participle_endings = parse_endings(raw.irregular_verbs.participle_endings)?;
        let irregular_verbs = raw
            .irregular_verbs
            .verbs
            .into_iter()
            .map(|verb| IrregularVerb::from_raw(verb, &perfect_endings, &participle_endings))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            prepositions,
            conjunctions: raw.conjunctions,
            subjunctions: raw.subjunctions,
            personal_pronouns,
            homophonic_personal_pronouns: raw.homophonic_personal_pronouns.into_iter().collect(),
            pronouns: PronounTables::from_raw(raw.pronouns)?,
            homographic_pronouns: raw.homographic_pronouns.into_iter().collect(),
            irregular_verbs,
            cardinals,
        })
    }
}

impl PronounTables {
    fn from_raw(raw: RawPronouns) -> Result<Self, TableError> {
        let pattern = compile("pronouns", &raw.pattern)?;
        for group in ["prefixed_particle", "stem", "ending", "particle"] {
            if !pattern.capture_names().flatten().any(|name| name == group) {
                return Err(TableError::MissingEntry {
                    table: "pronouns",
                    entry: group.to_string(),
                });
            }
        }

        for kind in raw.map.values() {
            let base = raw.bases.get(kind).ok_or_else(|| TableError::MissingEntry {
                table: "pronouns",
                entry: kind.clone(),
            })?;
            if !raw.paradigms.contains_key(base) {
                return Err(TableError::MissingEntry {
                    table: "pronouns",
                    entry: base.clone(),
                });
            }
        }

        let mut paradigms = HashMap::new();
        for (name, forms) in raw.paradigms {
            let mut parsed = HashMap::new();
            for (form, cells) in forms {
                let cells = cells
                    .iter()
                    .map(|c| nominal_cell("pronouns", c))
                    .collect::<Result<Vec<_>, _>>()?;
                parsed.insert(form, cells);
            }
            paradigms.insert(name, parsed);
        }

        Ok(Self {
            pattern,
            map: raw.map,
            bases: raw.bases,
            paradigms,
        })
    }
}

impl IrregularVerb {
    fn from_raw(
        raw: RawIrregularVerb,
        perfect_endings: &[IrregularEnding],
        participle_endings: &[IrregularEnding],
    ) -> Result<Self, TableError> {
        let prefixes = raw
            .prefixes
            .map(|p| compile("irregular_verbs", &format!("^(?:{p})$")))
            .transpose()?;
        let homograph = raw
            .homograph
            .map(|h| compile("irregular_verbs", &h))
            .transpose()?;

        let mut tables = raw
            .present
            .into_iter()
            .map(|t| {
                Ok(StemTable {
                    stems: t.stems,
                    endings: parse_endings(t.endings)?,
                })
            })
            .collect::<Result<Vec<_>, TableError>>()?;
        for (stems, endings) in [(raw.perfect, perfect_endings), (raw.ppp, participle_endings)] {
            if !stems.is_empty() {
                tables.push(StemTable {
                    stems,
                    endings: endings.to_vec(),
                });
            }
        }

        Ok(Self {
            lemma: raw.lemma,
            prefixes,
            homograph,
            tables,
        })
    }
}

fn parse_endings(rows: RawEndings) -> Result<Vec<IrregularEnding>, TableError> {
    rows.into_iter()
        .map(|(ending, cells)| {
            let cells = cells
                .iter()
                .map(|c| verbal_cell(c))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(IrregularEnding {
                segments: ending
                    .split('-')
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect(),
                cells,
            })
        })
        .collect()
}

fn compile(table: &'static str, pattern: &str) -> Result<Regex, TableError> {
    Regex::new(pattern).map_err(|source| TableError::Pattern {
        table,
        pattern: pattern.to_string(),
        source,
    })
}

fn casus_from_number(table: &'static str, n: u8) -> Result<Casus, TableError> {
    Casus::from_number(n).ok_or_else(|| TableError::Cell {
        table,
        cell: n.to_string(),
    })
}

/// Parse "casus.numerus.sexus", e.g. "4.sg.m".
fn nominal_cell(table: &'static str, cell: &str) -> Result<Attributes, TableError> {
    let malformed = || TableError::Cell {
        table,
        cell: cell.to_string(),
    };
    let parts: Vec<&str> = cell.split('.').collect();
    let [casus, numerus, sexus] = parts.as_slice() else {
        return Err(malformed());
    };
    let casus = casus.parse::<u8>().ok().and_then(Casus::from_number);
    Ok(Attributes::nominal(
        casus.ok_or_else(malformed)?,
        parse_numerus(numerus).ok_or_else(malformed)?,
        Some(parse_sexus(sexus).ok_or_else(malformed)?),
    ))
}

/// Parse verbal cells:
///   "tempus.modus.genus.persona.numerus" for finite forms,
///   "tempus.inf.genus" for infinitives,
///   "tempus.part.genus.casus.numerus.sexus" for participles.
fn verbal_cell(cell: &str) -> Result<Attributes, TableError> {
    let malformed = || TableError::Cell {
        table: "irregular_verbs",
        cell: cell.to_string(),
    };
    let parts: Vec<&str> = cell.split('.').collect();
    let (tempus, modus, genus, rest) = match parts.as_slice() {
        [t, m, g, rest @ ..] => (*t, *m, *g, rest),
        _ => return Err(malformed()),
    };
    let tempus = parse_tempus(tempus).ok_or_else(malformed)?;
    let modus = parse_modus(modus).ok_or_else(malformed)?;
    let genus = parse_genus(genus).ok_or_else(malformed)?;

    let mut attributes = match (modus, rest) {
        (Modus::Inf, []) => Attributes::default(),
        (Modus::Part, [c, n, s]) => nominal_cell("irregular_verbs", &format!("{c}.{n}.{s}"))?,
        (Modus::Ind | Modus::Con | Modus::Imp, [p, n]) => Attributes {
            persona: Some(p.parse::<u8>().map_err(|_| malformed())?),
            numerus: Some(parse_numerus(n).ok_or_else(malformed)?),
            ..Attributes::default()
        },
        _ => return Err(malformed()),
    };
    attributes.tempus = Some(tempus);
    attributes.modus = Some(modus);
    attributes.genus = Some(genus);
    Ok(attributes)
}

fn parse_numerus(s: &str) -> Option<Numerus> {
    match s {
        "sg" => Some(Numerus::Sg),
        "pl" => Some(Numerus::Pl),
        _ => None,
    }
}

fn parse_sexus(s: &str) -> Option<Sexus> {
    match s {
        "m" => Some(Sexus::M),
        "f" => Some(Sexus::F),
        "n" => Some(Sexus::N),
        _ => None,
    }
}

fn parse_tempus(s: &str) -> Option<Tempus> {
    match s {
        "pr" => Some(Tempus::Pr),
        "impf" => Some(Tempus::Impf),
        "fut" => Some(Tempus::Fut),
        "pf" => Some(Tempus::Pf),
        "pqpf" => Some(Tempus::Pqpf),
        "fut2" => Some(Tempus::Fut2),
        _ => None,
    }
}

fn parse_modus(s: &str) -> Option<Modus> {
    match s {
        "ind" => Some(Modus::Ind),
        "con" => Some(Modus::Con),
        "imp" => Some(Modus::Imp),
        "inf" => Some(Modus::Inf),
        "part" => Some(Modus::Part),
        _ => None,
    }
}

fn parse_genus(s: &str) -> Option<Genus> {
    match s {
        "act" => Some(Genus::Act),
        "pass" => Some(Genus::Pass),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_tables_load() {
        let tables = ClosedClassTables::load().unwrap();
        assert!(tables.prepositions["in"].takes_ablative);
        assert!(tables.prepositions["cum"].homographic);
        assert_eq!(tables.subjunctions.get("cum"), Some(&false));
        assert!(tables.homophonic_personal_pronouns.contains("sese"));
        let lemmas: Vec<&str> = tables
            .irregular_verbs
            .iter()
            .map(|v| v.lemma.as_str())
            .collect();
        assert_eq!(
            lemmas,
            ["esse", "posse", "ferre", "ire", "velle", "nolle", "malle", "fieri"]
        );
    }

    fn splits(verb: &IrregularVerb, word: &str) -> Vec<Vec<String>> {
        verb.matches(word).iter().map(IrregularMatch::segments).collect()
    }

    #[test]
    fn test_irregular_prefixes() {
        let tables = ClosedClassTables::load().unwrap();
        let ire = &tables.irregular_verbs[3];
        assert_eq!(splits(ire, "subito"), vec![vec!["sub", "it", "o"]]);
        assert_eq!(ire.matches("subito")[0].ending.cells.len(), 4);
        assert!(ire.is_homograph("subito"));
        assert!(ire.matches("audire").is_empty());
    }

    #[test]
    fn test_irregular_stem_alternants() {
        let tables = ClosedClassTables::load().unwrap();
        let [esse, _, ferre, ire, velle, nolle, malle, _] = tables.irregular_verbs.as_slice() else {
            panic!("eight irregular verbs");
        };
        assert_eq!(splits(esse, "desum"), vec![vec!["de", "s", "u", "m"]]);
        assert_eq!(splits(ire, "it"), vec![vec!["i", "t"]]);
        assert_eq!(splits(velle, "vult"), vec![vec!["vul", "t"]]);
        assert_eq!(splits(nolle, "nolumus"), vec![vec!["nol", "u", "mus"]]);
        assert_eq!(splits(malle, "mavult"), vec![vec!["mavul", "t"]]);
        // compound on the perfect stem
        assert_eq!(
            splits(ferre, "contulissent"),
            vec![vec!["con", "tul", "isse", "nt"]]
        );
        let m = &malle.matches("maluit")[0];
        assert_eq!(m.segments(), vec!["malu", "it"]);
        assert_eq!(m.ending.cells[0].tempus, Some(Tempus::Pf));
        // the prefix must be a known one
        assert!(esse.matches("potest").is_empty());
    }

    #[test]
    fn test_shared_ending_tables() {
        let tables = ClosedClassTables::load().unwrap();
        let ferre = &tables.irregular_verbs[2];
        let m = &ferre.matches("intulisset")[0];
        assert_eq!(m.prefix, "in");
        assert_eq!(m.ending.cells.len(), 1);
        assert_eq!(m.ending.cells[0].tempus, Some(Tempus::Pqpf));
        assert_eq!(m.ending.cells[0].modus, Some(Modus::Con));
        // fut II and perfect subjunctive share -eri-t
        let m = &tables.irregular_verbs[0].matches("fuerit")[0];
        assert_eq!(m.ending.cells.len(), 2);
    }

    #[test]
    fn test_verbal_cells() {
        let a = verbal_cell("pr.ind.act.1.sg").unwrap();
        assert_eq!(a.persona, Some(1));
        assert_eq!(a.numerus, Some(Numerus::Sg));
        let a = verbal_cell("pf.part.pass.6.sg.n").unwrap();
        assert_eq!(a.casus, Some(Casus::Ablative));
        assert_eq!(a.modus, Some(Modus::Part));
        assert!(verbal_cell("pr.inf.act").is_ok());
        assert!(verbal_cell("pr.ind.act").is_err());
        assert!(verbal_cell("xx.ind.act.1.sg").is_err());
    }

    #[test]
    fn test_missing_paradigm_is_fatal() {
        let json = EMBEDDED_TABLES.replace("\"qui_indef\": {", "\"qui_other\": {");
        assert!(matches!(
            ClosedClassTables::from_json(&json),
            Err(TableError::MissingEntry { .. })
        ));
    }
}
