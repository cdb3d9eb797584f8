use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::errors::{LookupError, TableError};
use crate::request::StemQuery;
use crate::types::{Category, PfTag, Restriction, Sexus, StemRole};

const EMBEDDED_LEXICON: &str = include_str!("../data/lexicon.json");

/// Service resolving lookup requests into lexical entries.
///
/// Implementations may sit in front of a database or a remote service. A
/// failure only concerns the request it was raised for.
pub trait StemLookup {
    fn look_up_stem(&self, query: &StemQuery) -> Result<Vec<StemPack>, LookupError>;

    fn direct_lookup(
        &self,
        category: DirectCategory,
        word: &str,
    ) -> Result<Vec<DirectEntry>, LookupError>;
}

impl<T: StemLookup + ?Sized> StemLookup for &T {
    fn look_up_stem(&self, query: &StemQuery) -> Result<Vec<StemPack>, LookupError> {
        (**self).look_up_stem(query)
    }

    fn direct_lookup(
        &self,
        category: DirectCategory,
        word: &str,
    ) -> Result<Vec<DirectEntry>, LookupError> {
        (**self).direct_lookup(category, word)
    }
}

/// Tables of indeclinable words searched by surface string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectCategory {
    Adverb,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectEntry {
    pub word: String,
}

/// A lexical entry with all of its stems.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StemPack {
    pub category: Category,
    pub lemma: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nom: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stem: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pf: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ppp: Option<String>,
    pub inflection_class: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sexus: Option<Sexus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pf_composition: Option<PfTag>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub deponens: bool,
    /// Number of nominative terminations of third declension adjectives.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terminations: Option<u8>,
}

impl StemPack {
    /// The stem stored in the given column.
    pub fn column(&self, role: StemRole) -> Option<&str> {
        match role {
            StemRole::Nom => self.nom.as_deref(),
            StemRole::Stem => self.stem.as_deref(),
            StemRole::Pr => self.pr.as_deref(),
            StemRole::Pf => self.pf.as_deref(),
            StemRole::Ppp => self.ppp.as_deref(),
        }
    }

    fn satisfies(&self, restriction: &Restriction) -> bool {
        match restriction {
            Restriction::InflectionClass(_) => restriction.admits_class(self.inflection_class),
            Restriction::PfComposition(_) => self
                .pf_composition
                .is_some_and(|tag| restriction.admits_composition(tag)),
        }
    }

    fn validate(&self) -> Result<(), TableError> {
        let missing = match self.category {
            Category::Verb if self.pr.is_none() => Some("verb without present stem"),
            Category::Verb => None,
            _ if self.nom.is_none() || self.stem.is_none() => {
                Some("nominal without nominative or stem")
            }
            _ => None,
        };
        match missing {
            Some(reason) => Err(TableError::Entry {
                table: "lexicon",
                entry: self.lemma.clone(),
                reason,
            }),
            None => Ok(()),
        }
    }
}

#[derive(Deserialize)]
struct LexiconData {
    entries: Vec<StemPack>,
    #[serde(default)]
    adverbs: Vec<String>,
}

/// In-memory lexicon loaded once from JSON.
pub struct Dictionary {
    entries: HashMap<Category, Vec<StemPack>>,
    adverbs: HashSet<String>,
}

impl Dictionary {
    /// Load the lexicon embedded in the library.
    pub fn new() -> Self {
        Self::from_json(EMBEDDED_LEXICON).expect("embedded lexicon JSON is invalid")
    }

    /// Load a lexicon from a JSON document of the embedded format.
    pub fn from_json(json: &str) -> Result<Self, TableError> {
        let data: LexiconData = serde_json::from_str(json).map_err(|source| TableError::Json {
            table: "lexicon",
            source,
        })?;

        let mut entries: HashMap<Category, Vec<StemPack>> = HashMap::new();
        for entry in data.entries {
            entry.validate()?;
            entries.entry(entry.category).or_default().push(entry);
        }

        Ok(Self {
            entries,
            adverbs: data.adverbs.into_iter().collect(),
        })
    }

    /// Number of lexical entries, adverbs excluded.
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl StemLookup for Dictionary {
    fn look_up_stem(&self, query: &StemQuery) -> Result<Vec<StemPack>, LookupError> {
        let Some(candidates) = self.entries.get(&query.category) else {
            return Ok(Vec::new());
        };
        Ok(candidates
            .iter()
            .filter(|e| e.column(query.stem_type) == Some(query.stem.as_str()))
            .filter(|e| e.satisfies(&query.restrictions))
            .cloned()
            .collect())
    }

    fn direct_lookup(
        &self,
        category: DirectCategory,
        word: &str,
    ) -> Result<Vec<DirectEntry>, LookupError> {
        match category {
            DirectCategory::Adverb if self.adverbs.contains(word) => Ok(vec![DirectEntry {
                word: word.to_string(),
            }]),
            DirectCategory::Adverb => Ok(Vec::new()),
        }
    }
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::new()
    }
}
