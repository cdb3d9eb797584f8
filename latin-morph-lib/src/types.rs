use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dictionary::StemPack;

/// Lexical table a stem lookup is directed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Noun,
    Adjective,
    Verb,
    Persona,
    Place,
    Ethnic,
}

impl Category {
    /// Proper-noun tables are searched with the original casing.
    pub fn keeps_case(self) -> bool {
        matches!(self, Category::Persona | Category::Place | Category::Ethnic)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Noun => "noun",
            Category::Adjective => "adjective",
            Category::Verb => "verb",
            Category::Persona => "persona",
            Category::Place => "place",
            Category::Ethnic => "ethnic",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which stem column of an entry a lookup matches against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StemRole {
    /// Nominative form of a nominal.
    Nom,
    /// Oblique stem of a nominal.
    Stem,
    /// Present stem.
    Pr,
    /// Perfect stem.
    Pf,
    /// Perfect passive participle stem.
    Ppp,
}

impl StemRole {
    pub fn as_str(self) -> &'static str {
        match self {
            StemRole::Nom => "nom",
            StemRole::Stem => "stem",
            StemRole::Pr => "pr",
            StemRole::Pf => "pf",
            StemRole::Ppp => "ppp",
        }
    }
}

impl fmt::Display for StemRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Composition type of a perfect stem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PfTag {
    V,
    U,
    S,
    Else,
    Ablaut,
    Reduplication,
}

/// Admissible classes of one lookup. Never mixes numeric classes and
/// perfect composition tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "values", rename_all = "snake_case")]
pub enum Restriction {
    InflectionClass(Vec<u8>),
    PfComposition(Vec<PfTag>),
}

impl Restriction {
    pub fn is_empty(&self) -> bool {
        match self {
            Restriction::InflectionClass(v) => v.is_empty(),
            Restriction::PfComposition(v) => v.is_empty(),
        }
    }

    pub fn admits_class(&self, class: u8) -> bool {
        matches!(self, Restriction::InflectionClass(v) if v.contains(&class))
    }

    pub fn admits_composition(&self, tag: PfTag) -> bool {
        matches!(self, Restriction::PfComposition(v) if v.contains(&tag))
    }
}

impl fmt::Display for Restriction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values: Vec<String> = match self {
            Restriction::InflectionClass(v) => v.iter().map(|c| c.to_string()).collect(),
            Restriction::PfComposition(v) => v
                .iter()
                .map(|t| format!("{t:?}").to_lowercase())
                .collect(),
        };
        f.write_str(&values.join(", "))
    }
}

/// A syncopated substring that was reinserted for analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contraction {
    /// Byte offset of the insertion in the analysed word.
    pub position: usize,
    pub text: String,
}

impl fmt::Display for Contraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} contracted at {}", self.text, self.position)
    }
}

/// Snapshot of the stripped-off components of a decomposition.
///
/// Empty slots are dropped, except the ending, which is always present so that
/// a bare stem never turns into an unrestricted request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Components {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thematic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparison_sign: Option<String>,
    #[serde(default)]
    pub ending: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contraction: Option<Contraction>,
}

impl Components {
    pub fn thematic(&self) -> &str {
        self.thematic.as_deref().unwrap_or("")
    }

    pub fn extension(&self) -> &str {
        self.extension.as_deref().unwrap_or("")
    }

    pub fn comparison_sign(&self) -> &str {
        self.comparison_sign.as_deref().unwrap_or("")
    }
}

// ---------------------------------------------------------------------------
// Grammatical attributes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Casus {
    #[serde(rename = "1")]
    Nominative,
    #[serde(rename = "2")]
    Genitive,
    #[serde(rename = "3")]
    Dative,
    #[serde(rename = "4")]
    Accusative,
    #[serde(rename = "5")]
    Vocative,
    #[serde(rename = "6")]
    Ablative,
}

impl Casus {
    pub const ALL: [Casus; 6] = [
        Casus::Nominative,
        Casus::Genitive,
        Casus::Dative,
        Casus::Accusative,
        Casus::Vocative,
        Casus::Ablative,
    ];

    /// Case number in traditional order (1 = nominative .. 6 = ablative).
    pub fn number(self) -> u8 {
        self as u8 + 1
    }

    pub fn from_number(n: u8) -> Option<Self> {
        Self::ALL.get(usize::from(n).checked_sub(1)?).copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Numerus {
    Sg,
    Pl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sexus {
    M,
    F,
    N,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tempus {
    /// Present.
    Pr,
    /// Imperfect.
    Impf,
    /// Future.
    Fut,
    /// Perfect.
    Pf,
    /// Pluperfect.
    Pqpf,
    /// Future perfect.
    Fut2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modus {
    Ind,
    Con,
    Imp,
    Inf,
    Part,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Genus {
    Act,
    Pass,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Degree {
    Positive,
    Comparative,
    Superlative,
}

/// Inflectional information attached to a form. Fields that do not apply to
/// the form's kind stay empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub casus: Option<Casus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numerus: Option<Numerus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sexus: Option<Sexus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tempus: Option<Tempus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modus: Option<Modus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genus: Option<Genus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persona: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degree: Option<Degree>,
}

impl Attributes {
    pub fn nominal(casus: Casus, numerus: Numerus, sexus: Option<Sexus>) -> Self {
        Self {
            casus: Some(casus),
            numerus: Some(numerus),
            sexus,
            ..Self::default()
        }
    }
}

/// Grammatical kind of a finished form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormKind {
    Noun,
    Adjective,
    Verb,
    Participle,
    Persona,
    Place,
    Ethnic,
    Adverb,
    Preposition,
    Conjunction,
    Subjunction,
    PersonalPronoun,
    Pronoun,
    Cardinal,
}

/// One grammatically valid interpretation of a token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Form {
    pub kind: FormKind,
    /// The surface string as it appeared in the input.
    pub string: String,
    /// Dictionary headword, when known.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub lemma: String,
    /// Morph segments in surface order (stem first).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub segments: Vec<String>,
    #[serde(default)]
    pub attributes: Attributes,
    /// Case government of prepositions: (accusative, ablative).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub government: Option<(bool, bool)>,
    /// Numeric value of cardinals and roman numerals.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decimal: Option<u32>,
    /// The lexical entry this form was built from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stems: Option<StemPack>,
}

impl Form {
    /// A form with no inner structure (particles, adverbs).
    pub fn bare(kind: FormKind, string: &str) -> Self {
        Self {
            kind,
            string: string.to_string(),
            lemma: string.to_lowercase(),
            segments: vec![string.to_string()],
            attributes: Attributes::default(),
            government: None,
            decimal: None,
            stems: None,
        }
    }
}

/// Result of analysing one token.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Analysis {
    pub token: String,
    /// Forms in discovery order.
    pub forms: Vec<Form>,
    /// Lookup requests whose service call failed. Other requests still ran.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<RequestFailure>,
}

impl Analysis {
    /// No interpretation was found for the token.
    pub fn is_unresolved(&self) -> bool {
        self.forms.is_empty()
    }
}

/// A request-scoped stem lookup failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestFailure {
    pub request: String,
    pub message: String,
}

/// Analyses of all tokens of a line of text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextAnalysis {
    pub input: String,
    pub tokens: Vec<Analysis>,
}
