// Pattern rule tables for the segment builder.
//
// A rule is an ordered list of patterns that strip into one component slot.
// The first pattern with a match wins. Within a pattern, the match starting
// leftmost wins, ties going to the earlier alternative. Every match runs to
// the end of the word.
//
// Alternatives may look at the text right before the match without consuming
// it. The context is given as a regex that must match at the end of the text
// preceding the candidate match.

use once_cell::sync::Lazy;
use regex::Regex;

/// Target slot of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Thematic,
    Extension,
    ComparisonSign,
    Ending,
}

impl Slot {
    /// Surface order of the slots after the stem.
    pub const ALL: [Slot; 4] = [
        Slot::Thematic,
        Slot::Extension,
        Slot::ComparisonSign,
        Slot::Ending,
    ];
}

#[derive(Debug)]
enum Context {
    Any,
    After(Regex),
    NotAfter(Regex),
}

#[derive(Debug)]
struct Alternative {
    context: Context,
    body: Regex,
}

impl Alternative {
    fn matches_at(&self, word: &str, start: usize) -> bool {
        if !self.body.is_match(&word[start..]) {
            return false;
        }
        let before = &word[..start];
        match &self.context {
            Context::Any => true,
            Context::After(re) => re.is_match(before),
            Context::NotAfter(re) => !re.is_match(before),
        }
    }
}

/// One right-anchored, context-sensitive pattern.
#[derive(Debug)]
pub struct Pattern {
    alternatives: Vec<Alternative>,
}

impl Pattern {
    /// Byte offset where the leftmost match of this pattern starts.
    pub fn find(&self, word: &str) -> Option<usize> {
        word.char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(word.len()))
            .find(|&start| self.alternatives.iter().any(|a| a.matches_at(word, start)))
    }
}

/// An ordered list of patterns targeting one slot.
#[derive(Debug)]
pub struct Rule {
    pub slot: Slot,
    patterns: Vec<Pattern>,
}

impl Rule {
    /// Start offset of the first pattern that matches.
    pub fn find(&self, word: &str) -> Option<usize> {
        self.patterns.iter().find_map(|p| p.find(word))
    }
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

fn anchored_body(body: &str) -> Regex {
    Regex::new(&format!("^(?:{body})$")).expect("rule body is a valid regex")
}

fn anchored_context(context: &str) -> Regex {
    Regex::new(&format!("(?:{context})$")).expect("rule context is a valid regex")
}

fn alt(body: &str) -> Alternative {
    Alternative {
        context: Context::Any,
        body: anchored_body(body),
    }
}

fn after(context: &str, body: &str) -> Alternative {
    Alternative {
        context: Context::After(anchored_context(context)),
        body: anchored_body(body),
    }
}

fn not_after(context: &str, body: &str) -> Alternative {
    Alternative {
        context: Context::NotAfter(anchored_context(context)),
        body: anchored_body(body),
    }
}

fn pattern(alternatives: Vec<Alternative>) -> Pattern {
    Pattern { alternatives }
}

fn rule(slot: Slot, patterns: Vec<Pattern>) -> Rule {
    Rule { slot, patterns }
}

// ---------------------------------------------------------------------------
// Declinable rules
// ---------------------------------------------------------------------------

// No a and um here: those go through the oblique stem lookup.
pub static NOMINATIVE_ENDING: Lazy<Rule> = Lazy::new(|| {
    rule(
        Slot::Ending,
        vec![pattern(vec![after(
            "us|er|es|u|e|al|ar|is|or|os|o|[^aeio]s|x|as|ur|men",
            "",
        )])],
    )
});

pub static OTHER_CASE_ENDING: Lazy<Rule> = Lazy::new(|| {
    rule(
        Slot::Ending,
        vec![pattern(vec![
            after("ior|ius|nter|iter", ""),
            alt("ae"),
            alt("am"),
            alt("arum"),
            alt("as"),
            alt("is"),
            not_after("aeo", "i"),
            alt("o"),
            alt("orum"),
            alt("os"),
            not_after("aeiou", "e"),
            alt("ei"),
            alt("erum"),
            alt("ebus"),
            alt("es"),
            alt("em"),
            not_after("i", "us"),
            alt("u"),
            alt("uum"),
            alt("ua"),
            alt("ibus"),
            alt("im"),
            alt("ia"),
            alt("ium"),
            after("n", "s"),
            after("nt", "er"),
            alt("iter"),
        ])],
    )
});

// i erased: filium, u erased: suum
pub static UM_ENDING: Lazy<Rule> = Lazy::new(|| {
    rule(
        Slot::Ending,
        vec![pattern(vec![alt("um")]), pattern(vec![alt("ui")])],
    )
});

pub static IUS_ENDING: Lazy<Rule> =
    Lazy::new(|| rule(Slot::Ending, vec![pattern(vec![after("i", "us")])]));

pub static A_ENDING: Lazy<Rule> =
    Lazy::new(|| rule(Slot::Ending, vec![pattern(vec![after("[^ao]", "a")])]));

pub static PRONOMINAL_ENDING: Lazy<Rule> = Lazy::new(|| {
    rule(
        Slot::Ending,
        vec![
            pattern(vec![after("ali", "u[sd]")]),
            pattern(vec![alt("ius")]),
        ],
    )
});

pub static COMPARISON: Lazy<Rule> = Lazy::new(|| {
    rule(
        Slot::ComparisonSign,
        vec![pattern(vec![alt("ior|ius|issim|lim|rim")])],
    )
});

pub static PPA_OR_GERUND: Lazy<Rule> =
    Lazy::new(|| rule(Slot::Extension, vec![pattern(vec![alt("n|nt|nd")])]));

pub static DECL_THEMATIC_VOWEL: Lazy<Rule> =
    Lazy::new(|| rule(Slot::Thematic, vec![pattern(vec![alt("[ue]")])]));

pub static THEMATIC_I_OF_M: Lazy<Rule> =
    Lazy::new(|| rule(Slot::Thematic, vec![pattern(vec![alt("i")])]));

pub static FUTURE_PARTICIPLE: Lazy<Rule> =
    Lazy::new(|| rule(Slot::Extension, vec![pattern(vec![alt("ur")])]));

// ---------------------------------------------------------------------------
// Conjugable rules
// ---------------------------------------------------------------------------

fn sg_1_active() -> Vec<Pattern> {
    vec![
        pattern(vec![not_after(
            r"tud|[^nu][st]i|ment|[bc]ul|[ao]ri|\Apr",
            "o",
        )]),
        pattern(vec![not_after("[^s]u", "m")]),
    ]
}

fn sg_2_active() -> Pattern {
    pattern(vec![after(
        r"[aer]|[^tr]i|[^aeirsl]ti|[^ai]ri|[^t][sft]eri|quiri|quaeri|\A[a-z]peri|[^a-z]geri|[^a-z]pari|[^a-z]meti",
        "s",
    )])
}

fn sg_3_active() -> Pattern {
    pattern(vec![after(r"\S[ae]|[is]", "t")])
}

fn pl_1_active() -> Pattern {
    pattern(vec![not_after("illi|erri|ssi|[^aeiu]", "mus")])
}

fn pl_2_active() -> Pattern {
    pattern(vec![after("[aei]", "tis")])
}

fn pl_3_active() -> Pattern {
    pattern(vec![after("[aeiu]", "nt")])
}

fn sg_1_passive() -> Vec<Pattern> {
    vec![
        pattern(vec![not_after("u", "or")]),
        pattern(vec![not_after("u", "r")]),
    ]
}

fn sg_2_passive() -> Pattern {
    pattern(vec![after(
        "[^p]a|[^afgtpsx]e|[^(qu)]i|[cr][uia]pe|[a-z][tg]e",
        "ris",
    )])
}

fn sg_3_passive() -> Pattern {
    pattern(vec![after("[aei]", "tur")])
}

fn pl_1_passive() -> Pattern {
    pattern(vec![alt("mur")])
}

fn pl_2_passive() -> Pattern {
    pattern(vec![after("[aei]", "mini")])
}

fn pl_3_passive() -> Pattern {
    pattern(vec![after("[aeiu]", "ntur")])
}

pub static PRIMARY_ENDING: Lazy<Rule> = Lazy::new(|| {
    let mut patterns = sg_1_active();
    patterns.extend([
        sg_2_active(),
        sg_3_active(),
        pl_1_active(),
        pl_2_active(),
        pl_3_active(),
    ]);
    patterns.extend(sg_1_passive());
    patterns.extend([
        sg_3_passive(),
        pl_1_passive(),
        pl_2_passive(),
        pl_3_passive(),
    ]);
    rule(Slot::Ending, patterns)
});

pub static PRIMARY_ENDING_SG_2_PASSIVE: Lazy<Rule> =
    Lazy::new(|| rule(Slot::Ending, vec![sg_2_passive()]));

pub static SECONDARY_ENDING: Lazy<Rule> = Lazy::new(|| {
    rule(
        Slot::Ending,
        vec![
            pattern(vec![alt("isti")]),
            pattern(vec![after("[^rnt]", "i")]),
            pattern(vec![alt("it")]),
            pattern(vec![alt("imus")]),
            pattern(vec![alt("istis")]),
            pattern(vec![alt("erunt")]),
            pattern(vec![alt("ere")]),
        ],
    )
});

pub static IMPERATIVE_ENDING: Lazy<Rule> = Lazy::new(|| {
    rule(
        Slot::Ending,
        vec![
            pattern(vec![after("[aei]", "te")]),
            pattern(vec![alt("tote")]),
            pattern(vec![after("[^ieu]a|e|[^min][^uv]i", "")]),
            pattern(vec![after("[^n]", "to")]),
            pattern(vec![alt("nto")]),
            pattern(vec![after("[^n]", "tor")]),
            pattern(vec![alt("ntor")]),
        ],
    )
});

pub static DEP_IMP_ENDING: Lazy<Rule> =
    Lazy::new(|| rule(Slot::Ending, vec![pattern(vec![after("[aei]", "re")])]));

pub static PERFECT_EXTENSIONS: Lazy<Rule> =
    Lazy::new(|| rule(Slot::Extension, vec![pattern(vec![alt("er|er[ai]|isse")])]));

pub static IMPERFECT_BA: Lazy<Rule> =
    Lazy::new(|| rule(Slot::Extension, vec![pattern(vec![alt("ba")])]));

pub static FUTURE_B: Lazy<Rule> =
    Lazy::new(|| rule(Slot::Extension, vec![pattern(vec![alt("b")])]));

pub static FUTURE_OR_SUBJUNCTIVE_A_OR_E: Lazy<Rule> =
    Lazy::new(|| rule(Slot::Extension, vec![pattern(vec![alt("[ae]")])]));

pub static SUBJUNCTIVE_IMPERFECT: Lazy<Rule> =
    Lazy::new(|| rule(Slot::Extension, vec![pattern(vec![alt("re")])]));

pub static CONJ_THEMATIC_VOWEL: Lazy<Rule> =
    Lazy::new(|| rule(Slot::Thematic, vec![pattern(vec![alt("[eiu]")])]));

pub static THEMATIC_E_OF_SUBJUNCTIVE_IMPERFECT: Lazy<Rule> =
    Lazy::new(|| rule(Slot::Thematic, vec![pattern(vec![alt("e")])]));

// (?<=[aei])re is left to the deponent imperative rule.
pub static INFINITIVE_PR: Lazy<Rule> = Lazy::new(|| {
    rule(
        Slot::Ending,
        vec![pattern(vec![
            after("[aei]", "ri"),
            after("[^aeior]", "i"),
            alt("r?ier"),
        ])],
    )
});

pub static INFINITIVE_PF: Lazy<Rule> =
    Lazy::new(|| rule(Slot::Ending, vec![pattern(vec![alt("isse")])]));

// ---------------------------------------------------------------------------
// Contractions
// ---------------------------------------------------------------------------

/// Syncope patterns of perfect stems: the elided text and where it goes.
pub static CONTRACTIONS: Lazy<Vec<(&'static str, Pattern)>> = Lazy::new(|| {
    vec![
        (
            "v",
            pattern(vec![after(
                "[^v]i",
                "er[aiu]nt|er[ia][mst]|er[ia]mus|er[ia]tis|ero",
            )]),
        ),
        (
            "vi",
            pattern(vec![after(
                "[^v][aeio]",
                "stis?|sse[mst]|ssemus|ssetis|ssent|sse",
            )]),
        ),
        (
            "ve",
            pattern(vec![after(
                "[^v][aeo]",
                "r[aiu]nt|r[ia][mst]|r[ia]mus|r[ia]tis|ro",
            )]),
        ),
    ]
});
