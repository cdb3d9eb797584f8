// Segment builder: the mutable decomposition of one token and the primitives
// the declinable and conjugable rule programs are written in.
//
// A decomposition holds the remaining stem and the text stripped into each
// component slot. Nothing is ever lost: the stem followed by the slots in the
// reverse of the order they were stripped spells the word under analysis.

use tracing::{debug, trace};

use crate::inflection;
use crate::request::LookupRequest;
use crate::rules::{Rule, Slot};
use crate::types::{Category, Components, Contraction, StemRole};

/// Which rule program is running; selects the class inference battery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Program {
    Declinable,
    Conjugable,
}

/// Decomposition state of one analysis run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decomposition {
    pub stem: String,
    pub thematic: String,
    pub extension: String,
    pub comparison_sign: String,
    pub ending: String,
    pub contraction: Option<Contraction>,
    /// Stripped pieces as (slot, byte length), most recent last. A slot
    /// stripped twice with another in between holds two pieces.
    pub(crate) strips: Vec<(Slot, usize)>,
}

impl Decomposition {
    pub fn new(word: &str) -> Self {
        Self {
            stem: word.to_string(),
            ..Self::default()
        }
    }

    pub fn slot(&self, slot: Slot) -> &str {
        match slot {
            Slot::Thematic => &self.thematic,
            Slot::Extension => &self.extension,
            Slot::ComparisonSign => &self.comparison_sign,
            Slot::Ending => &self.ending,
        }
    }

    fn slot_mut(&mut self, slot: Slot) -> &mut String {
        match slot {
            Slot::Thematic => &mut self.thematic,
            Slot::Extension => &mut self.extension,
            Slot::ComparisonSign => &mut self.comparison_sign,
            Slot::Ending => &mut self.ending,
        }
    }

    /// Try `rule` against the right edge of the stem. On a match the matched
    /// text moves to the front of the rule's slot.
    pub fn test_and_strip(&mut self, rule: &Rule) -> bool {
        let Some(start) = rule.find(&self.stem) else {
            return false;
        };
        let matched = self.stem.split_off(start);
        self.slot_mut(rule.slot).insert_str(0, &matched);
        self.strips.push((rule.slot, matched.len()));
        true
    }

    /// Give the most recently stripped pieces back to the stem while they
    /// belong to one of `slots`. The stem grows in surface order whatever
    /// order `slots` lists them in; pieces under a slot that stays stripped
    /// stay where they are.
    pub fn restore(&mut self, slots: &[Slot]) {
        while let Some(&(slot, len)) = self.strips.last() {
            if !slots.contains(&slot) {
                break;
            }
            self.strips.pop();
            let rest = self.slot_mut(slot).split_off(len);
            let piece = std::mem::replace(self.slot_mut(slot), rest);
            self.stem.push_str(&piece);
        }
    }

    pub fn restore_all(&mut self) {
        self.restore(&Slot::ALL);
    }

    /// The word this decomposition spells: the stem, then the stripped
    /// pieces from the last back to the first.
    pub fn reconstruct(&self) -> String {
        let mut word = self.stem.clone();
        let mut taken = [0usize; 4];
        for &(slot, len) in self.strips.iter().rev() {
            let i = slot as usize;
            let text = self.slot(slot);
            let start = taken[i].min(text.len());
            let end = (start + len).min(text.len());
            word.push_str(&text[start..end]);
            taken[i] = end;
        }
        // Slots filled without a strip keep surface order.
        for slot in Slot::ALL {
            let text = self.slot(slot);
            if taken[slot as usize] < text.len() {
                word.push_str(&text[taken[slot as usize]..]);
            }
        }
        word
    }

    /// Move the first character of the most recent piece, if it is the
    /// ending, onto the stem.
    fn shift_ending_to_stem(&mut self) {
        let Some((Slot::Ending, len)) = self.strips.last_mut() else {
            return;
        };
        let Some(c) = self.ending.chars().next() else {
            return;
        };
        *len -= c.len_utf8();
        self.ending.remove(0);
        self.stem.push(c);
        if *len == 0 {
            self.strips.pop();
        }
    }

    /// Components with empty slots dropped. The ending is always kept.
    pub fn snapshot(&self) -> Components {
        let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());
        Components {
            thematic: non_empty(&self.thematic),
            extension: non_empty(&self.extension),
            comparison_sign: non_empty(&self.comparison_sign),
            ending: self.ending.clone(),
            contraction: self.contraction.clone(),
        }
    }
}

/// Runs rule programs over one decomposition and collects lookup requests.
#[derive(Debug)]
pub struct SegmentBuilder {
    word: String,
    pub(crate) state: Decomposition,
    program: Program,
    target: Option<(Category, StemRole)>,
    requests: Vec<LookupRequest>,
}

impl SegmentBuilder {
    pub fn new(word: &str) -> Self {
        Self {
            word: word.to_string(),
            state: Decomposition::new(word),
            program: Program::Declinable,
            target: None,
            requests: Vec::new(),
        }
    }

    /// Run the declinable and conjugable programs and return every request
    /// they produced, in discovery order.
    pub fn statements(word: &str) -> Vec<LookupRequest> {
        let mut builder = Self::new(word);
        builder.create_declinables();
        builder.create_conjugables();
        builder.requests
    }

    pub fn state(&self) -> &Decomposition {
        &self.state
    }

    pub fn requests(&self) -> &[LookupRequest] {
        &self.requests
    }

    pub(crate) fn setup(&mut self, program: Program) {
        self.state = Decomposition::new(&self.word);
        self.program = program;
        self.target = None;
    }

    pub(crate) fn has(&mut self, rule: &Rule) -> bool {
        let stripped = self.state.test_and_strip(rule);
        debug_assert_eq!(self.state.reconstruct(), self.spelling());
        stripped
    }

    pub(crate) fn reset(&mut self, slots: &[Slot]) {
        self.state.restore(slots);
        debug_assert_eq!(self.state.reconstruct(), self.spelling());
    }

    pub(crate) fn reset_all(&mut self) {
        self.state.restore_all();
        debug_assert_eq!(self.state.stem, self.spelling());
    }

    /// The text the decomposition must spell: the word, with the elided
    /// piece put back while a contracted form is searched.
    fn spelling(&self) -> String {
        let mut word = self.word.clone();
        if let Some(c) = &self.state.contraction {
            word.insert_str(c.position, &c.text);
        }
        word
    }

    /// Retarget and emit.
    pub(crate) fn look_for(&mut self, category: Category, role: StemRole) {
        self.target = Some((category, role));
        self.emit();
    }

    /// Emit for the current target again.
    pub(crate) fn look_for_same(&mut self) {
        self.emit();
    }

    fn emit(&mut self) {
        let Some((category, role)) = self.target else {
            return;
        };

        if self.program == Program::Declinable
            && category == Category::Adjective
            && role == StemRole::Stem
        {
            repair_vacuus(&mut self.state);
        }

        let restriction =
            inflection::admissible_classes(self.program, category, role, &self.state);
        if restriction.is_empty() {
            trace!(
                stem = %self.state.stem,
                ending = %self.state.ending,
                "{category} {role} has no searchable inflection classes"
            );
            return;
        }

        let components = self.state.snapshot();
        self.push(category, role, &restriction, &components);

        if starts_uppercase(&self.state.stem) {
            match category {
                Category::Noun => {
                    self.push(Category::Persona, role, &restriction, &components);
                    self.push(Category::Place, role, &restriction, &components);
                }
                Category::Adjective if role == StemRole::Stem => {
                    self.push(Category::Ethnic, role, &restriction, &components);
                }
                _ => {}
            }
        }
    }

    fn push(
        &mut self,
        category: Category,
        role: StemRole,
        restriction: &crate::types::Restriction,
        components: &Components,
    ) {
        let stem = if category.keeps_case() {
            self.state.stem.clone()
        } else {
            self.state.stem.to_lowercase()
        };
        let request = LookupRequest::new(
            category,
            stem,
            role,
            restriction.clone(),
            components.clone(),
        );
        debug!("{request}");
        self.requests.push(request);
    }
}

fn starts_uppercase(s: &str) -> bool {
    s.chars().next().is_some_and(char::is_uppercase)
}

// vacui: the ui ending of vacuus gives its u back to the stem.
fn repair_vacuus(state: &mut Decomposition) {
    if state.stem == "vacu" && state.ending == "ui" {
        state.shift_ending_to_stem();
    }
}
