use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{Category, Components, Restriction, StemRole};

/// A candidate stem lookup: search `category` for entries whose `stem_role`
/// column equals `stem` and whose class satisfies the restriction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    category: Category,
    stem: String,
    stem_role: StemRole,
    restriction: Restriction,
    components: Components,
}

/// Wire form of a lookup request, as sent to a stem lookup service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StemQuery {
    #[serde(rename = "type")]
    pub category: Category,
    pub stem: String,
    pub stem_type: StemRole,
    pub restrictions: Restriction,
}

impl LookupRequest {
    pub fn new(
        category: Category,
        stem: String,
        stem_role: StemRole,
        restriction: Restriction,
        components: Components,
    ) -> Self {
        Self {
            category,
            stem,
            stem_role,
            restriction,
            components,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn stem(&self) -> &str {
        &self.stem
    }

    pub fn stem_role(&self) -> StemRole {
        self.stem_role
    }

    pub fn restriction(&self) -> &Restriction {
        &self.restriction
    }

    pub fn components(&self) -> &Components {
        &self.components
    }

    pub fn to_query(&self) -> StemQuery {
        StemQuery {
            category: self.category,
            stem: self.stem.clone(),
            stem_type: self.stem_role,
            restrictions: self.restriction.clone(),
        }
    }
}

impl fmt::Display for LookupRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Looking up {} as {}, {}",
            self.stem, self.category, self.stem_role
        )?;
        let c = &self.components;
        let parts: Vec<String> = [
            ("thematic", c.thematic.as_deref()),
            ("extension", c.extension.as_deref()),
            ("comparison_sign", c.comparison_sign.as_deref()),
            ("ending", Some(c.ending.as_str())),
        ]
        .into_iter()
        .filter_map(|(name, value)| {
            value.map(|v| {
                if v.is_empty() {
                    format!("{name} \"\"")
                } else {
                    format!("{name} {v}")
                }
            })
        })
        .chain(c.contraction.iter().map(|k| format!("contraction {k}")))
        .collect();
        write!(f, " with {}", parts.join(", "))?;
        write!(f, " (classes: {})", self.restriction)
    }
}
