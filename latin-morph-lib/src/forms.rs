// Form builder: checks a decomposition against the paradigm of the entry a
// lookup returned and produces one form per paradigm cell it spells.
//
// The lookup already matched the stem, so a cell is accepted when its
// thematic vowel, extension, comparison sign and ending equal the stripped
// components exactly.

use crate::dictionary::StemPack;
use crate::request::LookupRequest;
use crate::types::{
    Attributes, Casus, Category, Components, Contraction, Degree, Form, FormKind, Genus, Modus,
    Numerus, Sexus, StemRole, Tempus,
};

/// Turns a resolved lexical entry plus the decomposition that found it into
/// finished forms.
pub trait FormBuilder {
    fn build(&self, word: &str, pack: &StemPack, request: &LookupRequest) -> Vec<Form>;
}

/// Builds forms from the regular paradigm tables of each inflection class.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParadigmBuilder;

impl FormBuilder for ParadigmBuilder {
    fn build(&self, word: &str, pack: &StemPack, request: &LookupRequest) -> Vec<Form> {
        let role = request.stem_role();
        let cells = match pack.category {
            Category::Noun | Category::Persona | Category::Place => noun_cells(pack, role),
            Category::Adjective | Category::Ethnic => adjective_cells(pack, role),
            Category::Verb => verb_cells(pack, role),
        };

        let stem = pack.column(role).unwrap_or(request.stem());
        let contraction = request.components().contraction.as_ref();
        cells
            .into_iter()
            .filter(|cell| cell.spells(request.components()))
            .map(|cell| cell.into_form(word, stem, contraction, pack))
            .collect()
    }
}

#[derive(Debug, Clone)]
struct Cell {
    kind: FormKind,
    thematic: &'static str,
    extension: &'static str,
    comparison_sign: &'static str,
    ending: &'static str,
    /// laudabit: the thematic vowel follows the extension
    thematic_last: bool,
    attributes: Attributes,
}

impl Cell {
    fn new(kind: FormKind, ending: &'static str, attributes: Attributes) -> Self {
        Self {
            kind,
            thematic: "",
            extension: "",
            comparison_sign: "",
            ending,
            thematic_last: false,
            attributes,
        }
    }

    fn thematic(mut self, thematic: &'static str) -> Self {
        self.thematic = thematic;
        self
    }

    fn extension(mut self, extension: &'static str) -> Self {
        self.extension = extension;
        self
    }

    fn thematic_after_extension(mut self) -> Self {
        self.thematic_last = true;
        self
    }

    fn comparison(mut self, sign: &'static str) -> Self {
        self.comparison_sign = sign;
        self
    }

    fn spells(&self, components: &Components) -> bool {
        self.thematic == components.thematic()
            && self.extension == components.extension()
            && self.comparison_sign == components.comparison_sign()
            && self.ending == components.ending
    }

    fn into_form(
        self,
        word: &str,
        stem: &str,
        contraction: Option<&Contraction>,
        pack: &StemPack,
    ) -> Form {
        let (first, second) = if self.thematic_last {
            (self.extension, self.thematic)
        } else {
            (self.thematic, self.extension)
        };
        let mut segments: Vec<String> = [stem, first, second, self.comparison_sign, self.ending]
            .into_iter()
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        if let Some(c) = contraction {
            elide(&mut segments, c.position, c.text.len());
        }

        Form {
            kind: self.kind,
            string: word.to_string(),
            lemma: pack.lemma.clone(),
            segments,
            attributes: self.attributes,
            government: None,
            decimal: None,
            stems: Some(pack.clone()),
        }
    }
}

/// Cut `len` bytes at `position` of the joined segments back out (audivisti
/// is written audisti). Segments left empty are dropped.
fn elide(segments: &mut Vec<String>, position: usize, len: usize) {
    let (mut start, mut remaining) = (position, len);
    for segment in segments.iter_mut() {
        if remaining == 0 {
            break;
        }
        if start >= segment.len() {
            start -= segment.len();
            continue;
        }
        let end = (start + remaining).min(segment.len());
        if !segment.is_char_boundary(start) || !segment.is_char_boundary(end) {
            return;
        }
        segment.replace_range(start..end, "");
        remaining -= end - start;
        start = 0;
    }
    segments.retain(|s| !s.is_empty());
}

// ---------------------------------------------------------------------------
// Nominal tables: [singular, plural] in case order 1..6.
// "-" is a cell the stem cannot fill, "|" separates variants.
// ---------------------------------------------------------------------------

type Table = [[&'static str; 6]; 2];

const A_DECLENSION: Table = [
    ["a", "ae", "ae", "am", "a", "a"],
    ["ae", "arum", "is", "as", "ae", "is"],
];
const O_DECLENSION: Table = [
    ["us", "i", "o", "um", "e", "o"],
    ["i", "orum", "is", "os", "i", "is"],
];
const O_DECLENSION_NEUTER: Table = [
    ["um", "i", "o", "um", "um", "o"],
    ["a", "orum", "is", "a", "a", "is"],
];
const CONSONANT_DECLENSION: Table = [
    ["-", "is", "i", "em", "-", "e"],
    ["es", "um", "ibus", "es", "es", "ibus"],
];
const CONSONANT_DECLENSION_NEUTER: Table = [
    ["-", "is", "i", "-", "-", "e"],
    ["a", "um", "ibus", "a", "a", "ibus"],
];
const I_DECLENSION_NEUTER: Table = [
    ["-", "is", "i", "-", "-", "i"],
    ["ia", "ium", "ibus", "ia", "ia", "ibus"],
];
const I_DECLENSION: Table = [
    ["-", "is", "i", "im", "-", "i"],
    ["es", "ium", "ibus", "es|is", "es", "ibus"],
];
const MIXED_DECLENSION: Table = [
    ["-", "is", "i", "em", "-", "e"],
    ["es", "ium", "ibus", "es", "es", "ibus"],
];
const U_DECLENSION: Table = [
    ["us", "us", "ui", "um", "us", "u"],
    ["us", "uum", "ibus", "us", "us", "ibus"],
];
const U_DECLENSION_NEUTER: Table = [
    ["u", "us", "u", "u", "u", "u"],
    ["ua", "uum", "ibus", "ua", "ua", "ibus"],
];
const E_DECLENSION: Table = [
    ["es", "ei", "ei", "em", "es", "e"],
    ["es", "erum", "ebus", "es", "es", "ebus"],
];

const THIRD_ADJECTIVE: Table = [
    ["is", "is", "i", "em", "is", "i"],
    ["es", "ium", "ibus", "es|is", "es", "ibus"],
];
const THIRD_ADJECTIVE_NEUTER: Table = [
    ["e", "is", "i", "e", "e", "i"],
    ["ia", "ium", "ibus", "ia", "ia", "ibus"],
];
const COMPARATIVE: Table = [
    ["", "is", "i", "em", "", "e"],
    ["es", "um", "ibus", "es", "es", "ibus"],
];
// nom, acc and voc singular take -ius instead of -ior
const COMPARATIVE_NEUTER: Table = [
    ["-", "is", "i", "-", "-", "e"],
    ["a", "um", "ibus", "a", "a", "ibus"],
];
const PRESENT_PARTICIPLE: Table = [
    ["-", "is", "i", "em", "-", "e|i"],
    ["es", "ium", "ibus", "es", "es", "ibus"],
];
const PRESENT_PARTICIPLE_NEUTER: Table = [
    ["-", "is", "i", "-", "-", "e|i"],
    ["ia", "ium", "ibus", "ia", "ia", "ibus"],
];

const GENDERS: [Sexus; 3] = [Sexus::M, Sexus::F, Sexus::N];

fn decline(table: &Table, mut emit: impl FnMut(Casus, Numerus, &'static str)) {
    for (numerus, row) in [(Numerus::Sg, &table[0]), (Numerus::Pl, &table[1])] {
        for (casus, cell) in Casus::ALL.into_iter().zip(row.iter()) {
            if *cell == "-" {
                continue;
            }
            for ending in cell.split('|') {
                emit(casus, numerus, ending);
            }
        }
    }
}

/// Singular cells that spell the nominative itself.
fn is_nominative_cell(casus: Casus, numerus: Numerus, sexus: Option<Sexus>) -> bool {
    numerus == Numerus::Sg
        && match casus {
            Casus::Nominative | Casus::Vocative => true,
            Casus::Accusative => sexus == Some(Sexus::N),
            _ => false,
        }
}

fn spelled(stem: &str, ending: &str, nom: &str) -> bool {
    stem.len() + ending.len() == nom.len() && nom.starts_with(stem) && nom.ends_with(ending)
}

fn kind_of(category: Category) -> FormKind {
    match category {
        Category::Noun => FormKind::Noun,
        Category::Adjective => FormKind::Adjective,
        Category::Verb => FormKind::Verb,
        Category::Persona => FormKind::Persona,
        Category::Place => FormKind::Place,
        Category::Ethnic => FormKind::Ethnic,
    }
}

// ---------------------------------------------------------------------------
// Nouns, proper names and places
// ---------------------------------------------------------------------------

fn noun_table(class: u8, sexus: Option<Sexus>) -> Option<&'static Table> {
    let neuter = sexus == Some(Sexus::N);
    Some(match (class, neuter) {
        (1, _) => &A_DECLENSION,
        (2, false) => &O_DECLENSION,
        (2, true) => &O_DECLENSION_NEUTER,
        (3, false) => &CONSONANT_DECLENSION,
        (3, true) => &CONSONANT_DECLENSION_NEUTER,
        (31, _) => &I_DECLENSION_NEUTER,
        (32, _) => &I_DECLENSION,
        (33, _) => &MIXED_DECLENSION,
        (4, false) => &U_DECLENSION,
        (4, true) => &U_DECLENSION_NEUTER,
        (5, _) => &E_DECLENSION,
        _ => return None,
    })
}

/// The nominative is stem + the table's nominative ending, so the nominative
/// column is never used.
fn regular_noun_nominative(pack: &StemPack) -> bool {
    let (Some(nom), Some(stem)) = (pack.nom.as_deref(), pack.stem.as_deref()) else {
        return false;
    };
    noun_table(pack.inflection_class, pack.sexus)
        .is_some_and(|table| table[0][0].split('|').any(|e| e != "-" && spelled(stem, e, nom)))
}

fn noun_cells(pack: &StemPack, role: StemRole) -> Vec<Cell> {
    let kind = kind_of(pack.category);
    let sexus = pack.sexus;
    let mut cells = Vec::new();

    match role {
        StemRole::Nom => {
            if regular_noun_nominative(pack) {
                return cells;
            }
            let mut cases = vec![Casus::Nominative, Casus::Vocative];
            if sexus == Some(Sexus::N) {
                cases.push(Casus::Accusative);
            }
            for casus in cases {
                cells.push(Cell::new(
                    kind,
                    "",
                    Attributes::nominal(casus, Numerus::Sg, sexus),
                ));
            }
        }
        StemRole::Stem => {
            let Some(table) = noun_table(pack.inflection_class, sexus) else {
                return cells;
            };
            let stem = pack.stem.as_deref().unwrap_or_default();
            let nom = pack.nom.as_deref().unwrap_or_default();
            let second_masculine = pack.inflection_class == 2 && sexus != Some(Sexus::N);

            decline(table, |casus, numerus, ending| {
                let mut ending = ending;
                if second_masculine && casus == Casus::Vocative && numerus == Numerus::Sg {
                    // fili, horte; puer has its vocative in the nominative column
                    ending = if nom.ends_with("ius") {
                        ""
                    } else if nom.ends_with("us") {
                        "e"
                    } else {
                        return;
                    };
                } else if is_nominative_cell(casus, numerus, sexus) && !spelled(stem, ending, nom) {
                    return;
                }
                cells.push(Cell::new(
                    kind,
                    ending,
                    Attributes::nominal(casus, numerus, sexus),
                ));
            });
        }
        _ => {}
    }
    cells
}

// ---------------------------------------------------------------------------
// Adjectives and ethnics
// ---------------------------------------------------------------------------

fn with_degree(mut attributes: Attributes, degree: Degree) -> Attributes {
    attributes.degree = Some(degree);
    attributes
}

fn terminations(pack: &StemPack) -> u8 {
    pack.terminations.unwrap_or_else(|| {
        let nom = pack.nom.as_deref().unwrap_or_default();
        let stem = pack.stem.as_deref().unwrap_or_default();
        if spelled(stem, "is", nom) {
            2
        } else {
            1
        }
    })
}

fn adjective_cells(pack: &StemPack, role: StemRole) -> Vec<Cell> {
    let kind = kind_of(pack.category);
    let nom = pack.nom.as_deref().unwrap_or_default();
    let stem = pack.stem.as_deref().unwrap_or_default();
    let mut cells = Vec::new();

    match role {
        StemRole::Nom => {
            let genders: &[Sexus] = match (pack.inflection_class, terminations(pack)) {
                (1 | 5, _) if spelled(stem, "us", nom) => &[],
                (1 | 5, _) => &[Sexus::M],
                (3, 1) => &GENDERS,
                (3, 2) if spelled(stem, "is", nom) => &[],
                (3, 2) => &[Sexus::M, Sexus::F],
                (3, _) => &[Sexus::M],
                _ => &[],
            };
            for &sexus in genders {
                let mut cases = vec![Casus::Nominative, Casus::Vocative];
                if sexus == Sexus::N {
                    cases.push(Casus::Accusative);
                }
                for casus in cases {
                    let attributes = Attributes::nominal(casus, Numerus::Sg, Some(sexus));
                    cells.push(Cell::new(kind, "", with_degree(attributes, Degree::Positive)));
                }
            }
        }
        StemRole::Stem => {
            match pack.inflection_class {
                1 | 5 => o_a_adjective(&mut cells, kind, pack, "", Degree::Positive),
                3 => third_adjective(&mut cells, kind, pack),
                _ => {}
            }
            if matches!(pack.inflection_class, 1 | 3) {
                comparative(&mut cells, kind);
                let sign = superlative_sign(pack);
                o_a_adjective(&mut cells, kind, pack, sign, Degree::Superlative);
            }
        }
        _ => {}
    }
    cells
}

/// First/second declension adjective endings. Also used for superlatives
/// and participles.
fn o_a_adjective(
    cells: &mut Vec<Cell>,
    kind: FormKind,
    pack: &StemPack,
    sign: &'static str,
    degree: Degree,
) {
    let nom = pack.nom.as_deref().unwrap_or_default();
    let stem = pack.stem.as_deref().unwrap_or_default();
    let positive = sign.is_empty();
    let pronominal = positive && pack.inflection_class == 5;

    for sexus in GENDERS {
        let table = match sexus {
            Sexus::M => &O_DECLENSION,
            Sexus::F => &A_DECLENSION,
            Sexus::N => &O_DECLENSION_NEUTER,
        };
        decline(table, |casus, numerus, ending| {
            let mut ending = ending;
            if positive && sexus == Sexus::M && numerus == Numerus::Sg {
                // pulcher: nominative and vocative are the nominative column
                let us_nominative = spelled(stem, "us", nom);
                if matches!(casus, Casus::Nominative | Casus::Vocative) && !us_nominative {
                    return;
                }
            }
            if pronominal && numerus == Numerus::Sg {
                match casus {
                    Casus::Genitive => ending = "ius",
                    Casus::Dative => ending = "i",
                    _ => {}
                }
            }
            let attributes = Attributes::nominal(casus, numerus, Some(sexus));
            cells.push(Cell::new(kind, ending, with_degree(attributes, degree)).comparison(sign));
        });
    }
}

fn third_adjective(cells: &mut Vec<Cell>, kind: FormKind, pack: &StemPack) {
    let nom = pack.nom.as_deref().unwrap_or_default();
    let stem = pack.stem.as_deref().unwrap_or_default();
    let terminations = terminations(pack);

    for sexus in GENDERS {
        let table = if sexus == Sexus::N {
            &THIRD_ADJECTIVE_NEUTER
        } else {
            &THIRD_ADJECTIVE
        };
        decline(table, |casus, numerus, ending| {
            if is_nominative_cell(casus, numerus, Some(sexus)) {
                let accepted = match (terminations, sexus) {
                    (1, _) => false,
                    (_, Sexus::N) => true,
                    // acris, but acer
                    (3, Sexus::F) => true,
                    _ => spelled(stem, ending, nom),
                };
                if !accepted {
                    return;
                }
            }
            let attributes = Attributes::nominal(casus, numerus, Some(sexus));
            cells.push(Cell::new(kind, ending, with_degree(attributes, Degree::Positive)));
        });
    }
}

fn comparative(cells: &mut Vec<Cell>, kind: FormKind) {
    for sexus in GENDERS {
        let table = if sexus == Sexus::N {
            &COMPARATIVE_NEUTER
        } else {
            &COMPARATIVE
        };
        decline(table, |casus, numerus, ending| {
            let attributes = Attributes::nominal(casus, numerus, Some(sexus));
            cells.push(
                Cell::new(kind, ending, with_degree(attributes, Degree::Comparative))
                    .comparison("ior"),
            );
        });
    }
    for casus in [Casus::Nominative, Casus::Accusative, Casus::Vocative] {
        let attributes = Attributes::nominal(casus, Numerus::Sg, Some(Sexus::N));
        cells.push(
            Cell::new(kind, "", with_degree(attributes, Degree::Comparative)).comparison("ius"),
        );
    }
}

// pulcherrimus, facillimus, laetissimus
fn superlative_sign(pack: &StemPack) -> &'static str {
    let nom = pack.nom.as_deref().unwrap_or_default();
    let stem = pack.stem.as_deref().unwrap_or_default();
    if nom.ends_with("er") {
        "rim"
    } else if pack.inflection_class == 3 && stem.ends_with("il") {
        "lim"
    } else {
        "issim"
    }
}

// ---------------------------------------------------------------------------
// Verbs
// ---------------------------------------------------------------------------

const PERSONS: [(u8, Numerus); 6] = [
    (1, Numerus::Sg),
    (2, Numerus::Sg),
    (3, Numerus::Sg),
    (1, Numerus::Pl),
    (2, Numerus::Pl),
    (3, Numerus::Pl),
];

const PRIMARY_ACTIVE: [&str; 6] = ["o", "s", "t", "mus", "tis", "nt"];
const PRIMARY_PASSIVE: [&str; 6] = ["or", "ris", "tur", "mur", "mini", "ntur"];
const SECONDARY_ACTIVE: [&str; 6] = ["m", "s", "t", "mus", "tis", "nt"];
const SECONDARY_PASSIVE: [&str; 6] = ["r", "ris", "tur", "mur", "mini", "ntur"];
const PERFECT: [&str; 6] = ["i", "isti", "it", "imus", "istis", "erunt"];

const SHORT_IMPERATIVES: [&str; 4] = ["dic", "duc", "fac", "fer"];

fn finite(tempus: Tempus, modus: Modus, genus: Genus, persona: u8, numerus: Numerus) -> Attributes {
    Attributes {
        tempus: Some(tempus),
        modus: Some(modus),
        genus: Some(genus),
        persona: Some(persona),
        numerus: Some(numerus),
        ..Attributes::default()
    }
}

fn infinitive(tempus: Tempus, genus: Genus) -> Attributes {
    Attributes {
        tempus: Some(tempus),
        modus: Some(Modus::Inf),
        genus: Some(genus),
        ..Attributes::default()
    }
}

fn participle(tempus: Tempus, genus: Genus, casus: Casus, numerus: Numerus, sexus: Sexus) -> Attributes {
    Attributes {
        tempus: Some(tempus),
        modus: Some(Modus::Part),
        genus: Some(genus),
        ..Attributes::nominal(casus, numerus, Some(sexus))
    }
}

fn verb_cells(pack: &StemPack, role: StemRole) -> Vec<Cell> {
    let mut cells = Vec::new();
    match role {
        StemRole::Pr => {
            present_system(&mut cells, pack);
            if pack.deponens {
                // deponents only have passive forms, apart from participles
                cells.retain(|c| {
                    c.attributes.genus != Some(Genus::Act) || c.attributes.modus == Some(Modus::Part)
                });
            }
        }
        StemRole::Pf => perfect_system(&mut cells),
        StemRole::Ppp => {
            participle_table(&mut cells, "", Tempus::Pf, Genus::Pass);
            participle_table(&mut cells, "ur", Tempus::Fut, Genus::Act);
        }
        _ => {}
    }
    cells
}

/// Thematic vowel of the present indicative.
fn present_thematic(class: u8, persona: u8, numerus: Numerus, genus: Genus) -> &'static str {
    match (persona, numerus) {
        (1, Numerus::Sg) if class == 5 => "i",
        (1, Numerus::Sg) => "",
        (3, Numerus::Pl) => match class {
            3 | 4 => "u",
            5 => "iu",
            _ => "",
        },
        (2, Numerus::Sg) if genus == Genus::Pass => match class {
            3 | 5 => "e",
            _ => "",
        },
        _ => match class {
            3 | 5 => "i",
            _ => "",
        },
    }
}

fn present_system(cells: &mut Vec<Cell>, pack: &StemPack) {
    let class = pack.inflection_class;
    let v = FormKind::Verb;
    let consonantal = matches!(class, 3 | 5);
    let e_if_consonantal = if consonantal { "e" } else { "" };
    let i_if_consonantal = if consonantal { "i" } else { "" };
    let i_if_mixed = if class == 5 { "i" } else { "" };

    let voices = [
        (Genus::Act, PRIMARY_ACTIVE, SECONDARY_ACTIVE),
        (Genus::Pass, PRIMARY_PASSIVE, SECONDARY_PASSIVE),
    ];

    for (genus, primary, secondary) in voices {
        for (&(persona, numerus), (&prim, &sec)) in PERSONS.iter().zip(primary.iter().zip(&secondary)) {
            let first_sg = persona == 1 && numerus == Numerus::Sg;

            // present indicative
            cells.push(
                Cell::new(v, prim, finite(Tempus::Pr, Modus::Ind, genus, persona, numerus))
                    .thematic(present_thematic(class, persona, numerus, genus)),
            );

            // imperfect indicative
            let impf_thematic = match class {
                3 | 4 => "e",
                5 => "ie",
                _ => "",
            };
            cells.push(
                Cell::new(v, sec, finite(Tempus::Impf, Modus::Ind, genus, persona, numerus))
                    .thematic(impf_thematic)
                    .extension("ba"),
            );

            // future
            let future = finite(Tempus::Fut, Modus::Ind, genus, persona, numerus);
            if matches!(class, 1 | 2) {
                let thematic = match (first_sg, persona, numerus, genus) {
                    (true, ..) => "",
                    (_, 3, Numerus::Pl, _) => "u",
                    (_, 2, Numerus::Sg, Genus::Pass) => "e",
                    _ => "i",
                };
                cells.push(
                    Cell::new(v, prim, future)
                        .thematic(thematic)
                        .extension("b")
                        .thematic_after_extension(),
                );
            } else if first_sg {
                cells.push(Cell::new(v, sec, future).thematic(i_if_mixed).extension("a"));
            } else {
                cells.push(Cell::new(v, sec, future).thematic(i_if_mixed).extension("e"));
            }

            // present subjunctive
            let subjunctive = finite(Tempus::Pr, Modus::Con, genus, persona, numerus);
            let mood_sign = if class == 1 { "e" } else { "a" };
            cells.push(
                Cell::new(v, sec, subjunctive)
                    .thematic(i_if_mixed)
                    .extension(mood_sign),
            );

            // imperfect subjunctive
            cells.push(
                Cell::new(v, sec, finite(Tempus::Impf, Modus::Con, genus, persona, numerus))
                    .thematic(e_if_consonantal)
                    .extension("re"),
            );
        }
    }

    // infinitives; -re is also the passive imperative
    cells.push(Cell::new(v, "re", infinitive(Tempus::Pr, Genus::Act)).thematic(e_if_consonantal));
    cells.push(
        Cell::new(v, "re", finite(Tempus::Pr, Modus::Imp, Genus::Pass, 2, Numerus::Sg))
            .thematic(e_if_consonantal),
    );
    let passive_infinitive = if consonantal { "i" } else { "ri" };
    cells.push(Cell::new(v, passive_infinitive, infinitive(Tempus::Pr, Genus::Pass)));

    // imperatives
    let imperative = |tempus, persona, numerus| finite(tempus, Modus::Imp, Genus::Act, persona, numerus);
    cells.push(
        Cell::new(v, "", imperative(Tempus::Pr, 2, Numerus::Sg)).thematic(e_if_consonantal),
    );
    if pack
        .pr
        .as_deref()
        .is_some_and(|pr| SHORT_IMPERATIVES.contains(&pr))
    {
        cells.push(Cell::new(v, "", imperative(Tempus::Pr, 2, Numerus::Sg)));
    }
    cells.push(
        Cell::new(v, "te", imperative(Tempus::Pr, 2, Numerus::Pl)).thematic(i_if_consonantal),
    );
    for persona in [2, 3] {
        cells.push(
            Cell::new(v, "to", imperative(Tempus::Fut, persona, Numerus::Sg))
                .thematic(i_if_consonantal),
        );
    }
    cells.push(
        Cell::new(v, "tote", imperative(Tempus::Fut, 2, Numerus::Pl)).thematic(i_if_consonantal),
    );
    let nto_thematic = match class {
        3 | 4 => "u",
        5 => "iu",
        _ => "",
    };
    cells.push(
        Cell::new(v, "nto", imperative(Tempus::Fut, 3, Numerus::Pl)).thematic(nto_thematic),
    );

    // present participle and gerundive
    let participle_thematic = match class {
        3 | 4 => "e",
        5 => "ie",
        _ => "",
    };
    for sexus in GENDERS {
        let mut nominative = vec![Casus::Nominative, Casus::Vocative];
        if sexus == Sexus::N {
            nominative.push(Casus::Accusative);
        }
        for casus in nominative {
            cells.push(
                Cell::new(
                    FormKind::Participle,
                    "s",
                    participle(Tempus::Pr, Genus::Act, casus, Numerus::Sg, sexus),
                )
                .thematic(participle_thematic)
                .extension("n"),
            );
        }
        let table = if sexus == Sexus::N {
            &PRESENT_PARTICIPLE_NEUTER
        } else {
            &PRESENT_PARTICIPLE
        };
        decline(table, |casus, numerus, ending| {
            cells.push(
                Cell::new(
                    FormKind::Participle,
                    ending,
                    participle(Tempus::Pr, Genus::Act, casus, numerus, sexus),
                )
                .thematic(participle_thematic)
                .extension("nt"),
            );
        });
    }

    let before = cells.len();
    participle_table(cells, "nd", Tempus::Fut, Genus::Pass);
    for cell in &mut cells[before..] {
        cell.thematic = participle_thematic;
    }
}

/// Participles declined like first/second declension adjectives.
fn participle_table(cells: &mut Vec<Cell>, extension: &'static str, tempus: Tempus, genus: Genus) {
    for sexus in GENDERS {
        let table = match sexus {
            Sexus::M => &O_DECLENSION,
            Sexus::F => &A_DECLENSION,
            Sexus::N => &O_DECLENSION_NEUTER,
        };
        decline(table, |casus, numerus, ending| {
            cells.push(
                Cell::new(
                    FormKind::Participle,
                    ending,
                    participle(tempus, genus, casus, numerus, sexus),
                )
                .extension(extension),
            );
        });
    }
}

fn perfect_system(cells: &mut Vec<Cell>) {
    let v = FormKind::Verb;
    let act = Genus::Act;

    for (&(persona, numerus), (&perfect, &secondary)) in
        PERSONS.iter().zip(PERFECT.iter().zip(&SECONDARY_ACTIVE))
    {
        let first_sg = persona == 1 && numerus == Numerus::Sg;

        cells.push(Cell::new(v, perfect, finite(Tempus::Pf, Modus::Ind, act, persona, numerus)));
        cells.push(
            Cell::new(v, secondary, finite(Tempus::Pqpf, Modus::Ind, act, persona, numerus))
                .extension("era"),
        );
        let future_perfect = finite(Tempus::Fut2, Modus::Ind, act, persona, numerus);
        if first_sg {
            cells.push(Cell::new(v, "o", future_perfect).extension("er"));
        } else {
            cells.push(Cell::new(v, secondary, future_perfect).extension("eri"));
        }
        cells.push(
            Cell::new(v, secondary, finite(Tempus::Pf, Modus::Con, act, persona, numerus))
                .extension("eri"),
        );
        cells.push(
            Cell::new(v, secondary, finite(Tempus::Pqpf, Modus::Con, act, persona, numerus))
                .extension("isse"),
        );
    }
    cells.push(Cell::new(v, "ere", finite(Tempus::Pf, Modus::Ind, act, 3, Numerus::Pl)));
    cells.push(Cell::new(v, "isse", infinitive(Tempus::Pf, act)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::{Dictionary, StemLookup};
    use crate::segment::SegmentBuilder;

    /// Every form the builder produces for `word` over all of its requests.
    fn forms(word: &str) -> Vec<Form> {
        let dict = Dictionary::new();
        let builder = ParadigmBuilder;
        let mut out = Vec::new();
        for request in SegmentBuilder::statements(word) {
            for pack in dict.look_up_stem(&request.to_query()).unwrap() {
                out.extend(builder.build(word, &pack, &request));
            }
        }
        out
    }

    fn cases(forms: &[Form]) -> Vec<(Option<Casus>, Option<Numerus>)> {
        forms
            .iter()
            .map(|f| (f.attributes.casus, f.attributes.numerus))
            .collect()
    }

    #[test]
    fn test_first_declension() {
        let found = forms("rosa");
        assert_eq!(
            cases(&found),
            vec![
                (Some(Casus::Nominative), Some(Numerus::Sg)),
                (Some(Casus::Vocative), Some(Numerus::Sg)),
                (Some(Casus::Ablative), Some(Numerus::Sg)),
            ]
        );
        assert_eq!(found[0].segments, vec!["ros", "a"]);
        assert_eq!(found[0].stems.as_ref().map(|p| p.lemma.as_str()), Some("rosa"));
    }

    #[test]
    fn test_third_declension() {
        let found = forms("homine");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].attributes.casus, Some(Casus::Ablative));

        let found = forms("ratio");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].segments, vec!["ratio"]);
    }

    #[test]
    fn test_second_declension_vocatives() {
        let found = forms("fili");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].attributes.casus, Some(Casus::Vocative));

        let found = forms("horte");
        assert_eq!(found.len(), 1);

        let found = forms("puer");
        assert_eq!(
            cases(&found),
            vec![
                (Some(Casus::Nominative), Some(Numerus::Sg)),
                (Some(Casus::Vocative), Some(Numerus::Sg)),
            ]
        );
        assert_eq!(found[0].segments, vec!["puer"]);
    }

    #[test]
    fn test_nominative_is_not_duplicated() {
        // dies is stem di + es; the nominative column adds nothing
        let found = forms("dies");
        let nominatives = found
            .iter()
            .filter(|f| {
                f.attributes.casus == Some(Casus::Nominative)
                    && f.attributes.numerus == Some(Numerus::Sg)
            })
            .count();
        assert_eq!(nominatives, 1);
    }

    #[test]
    fn test_adjectives() {
        let found = forms("fortis");
        // nom/voc sg m/f, gen sg m/f/n, acc pl m/f
        assert_eq!(found.len(), 9);
        assert!(found.iter().all(|f| f.attributes.degree == Some(Degree::Positive)));

        let found = forms("acris");
        assert!(found
            .iter()
            .any(|f| f.attributes.casus == Some(Casus::Nominative)
                && f.attributes.sexus == Some(Sexus::F)));
        assert!(!found
            .iter()
            .any(|f| f.attributes.casus == Some(Casus::Nominative)
                && f.attributes.sexus == Some(Sexus::M)));

        let found = forms("solius");
        assert_eq!(found.len(), 3);
    }

    #[test]
    fn test_comparison() {
        let found = forms("laetior");
        assert!(!found.is_empty());
        assert!(found
            .iter()
            .all(|f| f.attributes.degree == Some(Degree::Comparative)));

        let found = forms("laetius");
        assert_eq!(found.len(), 3);
        assert!(found.iter().all(|f| f.attributes.sexus == Some(Sexus::N)));

        let found = forms("facillimus");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].segments, vec!["facil", "lim", "us"]);
    }

    #[test]
    fn test_present_system() {
        let found = forms("laudabat");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].attributes.tempus, Some(Tempus::Impf));
        assert_eq!(found[0].segments, vec!["lauda", "ba", "t"]);

        let found = forms("capiunt");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].segments, vec!["cap", "iu", "nt"]);

        let found = forms("reget");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].attributes.tempus, Some(Tempus::Fut));

        let found = forms("regam");
        let moods: Vec<Option<Modus>> = found.iter().map(|f| f.attributes.modus).collect();
        assert_eq!(moods, vec![Some(Modus::Ind), Some(Modus::Con)]);
    }

    #[test]
    fn test_future_segments() {
        let found = forms("laudabit");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].attributes.tempus, Some(Tempus::Fut));
        assert_eq!(found[0].segments, vec!["lauda", "b", "i", "t"]);

        let found = forms("laudabunt");
        assert_eq!(found[0].segments, vec!["lauda", "b", "u", "nt"]);
    }

    #[test]
    fn test_infinitives_and_imperatives() {
        assert_eq!(forms("audire").len(), 2);
        assert_eq!(forms("audiri").len(), 1);
        assert_eq!(forms("regi").len(), 1);

        let found = forms("dic");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].attributes.modus, Some(Modus::Imp));
    }

    #[test]
    fn test_deponents_are_passive() {
        let found = forms("hortare");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].attributes.modus, Some(Modus::Imp));
        assert_eq!(found[0].attributes.genus, Some(Genus::Pass));
    }

    #[test]
    fn test_perfect_system() {
        let found = forms("miserunt");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].lemma, "mittere");

        let found = forms("laudaverint");
        let tenses: Vec<(Option<Tempus>, Option<Modus>)> = found
            .iter()
            .map(|f| (f.attributes.tempus, f.attributes.modus))
            .collect();
        assert_eq!(
            tenses,
            vec![
                (Some(Tempus::Fut2), Some(Modus::Ind)),
                (Some(Tempus::Pf), Some(Modus::Con)),
            ]
        );
    }

    #[test]
    fn test_contracted_segments() {
        let found = forms("audisti");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].lemma, "audire");
        assert_eq!(found[0].segments, vec!["audi", "sti"]);

        let found = forms("amarunt");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].segments, vec!["ama", "runt"]);
    }

    #[test]
    fn test_elide_across_segments() {
        let mut segments = vec!["audiv".to_string(), "isti".to_string()];
        elide(&mut segments, 4, 2);
        assert_eq!(segments, vec!["audi", "sti"]);

        let mut segments = vec!["aud".to_string(), "iv".to_string(), "it".to_string()];
        elide(&mut segments, 3, 2);
        assert_eq!(segments, vec!["aud", "it"]);
    }

    #[test]
    fn test_participles() {
        let found = forms("laudantis");
        assert_eq!(found.len(), 3);
        assert!(found.iter().all(|f| f.kind == FormKind::Participle));

        let found = forms("laudatus");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].attributes.tempus, Some(Tempus::Pf));

        let found = forms("laudaturus");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].attributes.tempus, Some(Tempus::Fut));
    }
}
