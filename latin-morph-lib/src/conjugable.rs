// Conjugable program: finite verb forms and infinitives.
//
// Runs twice: once over every syncopated perfect the word could be (with the
// elided text put back), then over the word as written.

use tracing::trace;

use crate::rules::{
    Rule, Slot, CONJ_THEMATIC_VOWEL, CONTRACTIONS, DEP_IMP_ENDING, FUTURE_B,
    FUTURE_OR_SUBJUNCTIVE_A_OR_E, IMPERATIVE_ENDING, IMPERFECT_BA, INFINITIVE_PF, INFINITIVE_PR,
    PERFECT_EXTENSIONS, PRIMARY_ENDING, PRIMARY_ENDING_SG_2_PASSIVE, SECONDARY_ENDING,
    SUBJUNCTIVE_IMPERFECT, THEMATIC_E_OF_SUBJUNCTIVE_IMPERFECT, THEMATIC_I_OF_M,
};
use crate::segment::{Program, SegmentBuilder};
use crate::types::{Category, Contraction, StemRole};

const THEMATIC_AND_EXTENSION: [Slot; 2] = [Slot::Thematic, Slot::Extension];

impl SegmentBuilder {
    pub(crate) fn create_conjugables(&mut self) {
        self.setup(Program::Conjugable);
        self.search_contracted_forms();

        self.setup(Program::Conjugable);
        self.conjugable_search();
    }

    /// amarunt, audisti, audierat: put the elided v, vi or ve back and search.
    /// The word is restored exactly afterwards.
    fn search_contracted_forms(&mut self) {
        for (piece, pattern) in CONTRACTIONS.iter() {
            let Some(position) = pattern.find(&self.state.stem) else {
                continue;
            };
            let original = self.state.stem.clone();
            self.state.stem.insert_str(position, piece);
            trace!(word = %original, expanded = %self.state.stem, "trying contracted form");
            self.state.contraction = Some(Contraction {
                position,
                text: piece.to_string(),
            });

            self.conjugable_search();

            self.reset_all();
            self.state.stem = original;
            self.state.contraction = None;
        }
    }

    fn conjugable_search(&mut self) {
        self.secondary_ending();
        self.primary_ending(&PRIMARY_ENDING);
        self.primary_ending(&PRIMARY_ENDING_SG_2_PASSIVE);
        self.imperative();
        self.infinitive();
    }

    fn secondary_ending(&mut self) {
        if self.has(&SECONDARY_ENDING) {
            self.look_for(Category::Verb, StemRole::Pf);
            self.reset_all();
        }
    }

    fn primary_ending(&mut self, ending: &Rule) {
        if !self.has(ending) {
            return;
        }
        self.look_for(Category::Verb, StemRole::Pr);

        if self.has(&IMPERFECT_BA) {
            self.look_for(Category::Verb, StemRole::Pr);
            if self.has(&CONJ_THEMATIC_VOWEL) {
                self.look_for_same();
            }
            if self.has(&THEMATIC_I_OF_M) {
                self.look_for_same();
            }
            self.reset(&THEMATIC_AND_EXTENSION);
        }

        if self.has(&CONJ_THEMATIC_VOWEL) {
            self.look_for_same();
            if self.has(&THEMATIC_I_OF_M) {
                self.look_for_same();
            }
            // laudabit: the thematic i sits after the b
            if self.has(&FUTURE_B) {
                self.look_for_same();
            }
            self.reset(&THEMATIC_AND_EXTENSION);
        }

        if self.has(&FUTURE_B) {
            self.look_for_same();
            self.reset(&THEMATIC_AND_EXTENSION);
        }

        if self.has(&FUTURE_OR_SUBJUNCTIVE_A_OR_E) {
            self.look_for_same();
            self.subjunctive_present_of_a_conjugation();
            if self.has(&THEMATIC_I_OF_M) {
                self.look_for_same();
            }
            self.reset(&THEMATIC_AND_EXTENSION);
        }

        if self.has(&SUBJUNCTIVE_IMPERFECT) {
            self.look_for_same();
            if self.has(&THEMATIC_E_OF_SUBJUNCTIVE_IMPERFECT) {
                self.look_for_same();
            }
        }

        self.first_person_present_of_a_conjugation();

        self.reset(&THEMATIC_AND_EXTENSION);

        // laudavero
        if self.has(&PERFECT_EXTENSIONS) {
            self.look_for(Category::Verb, StemRole::Pf);
        }

        self.reset_all();
    }

    fn imperative(&mut self) {
        if self.short_imperative() {
            return;
        }

        for ending in [&*IMPERATIVE_ENDING, &*DEP_IMP_ENDING] {
            if self.has(ending) {
                self.look_for(Category::Verb, StemRole::Pr);
                if self.has(&CONJ_THEMATIC_VOWEL) {
                    self.look_for_same();
                    if self.has(&THEMATIC_I_OF_M) {
                        self.look_for_same();
                    }
                }
                self.reset_all();
            }
        }
    }

    fn infinitive(&mut self) {
        if self.has(&INFINITIVE_PR) {
            self.look_for(Category::Verb, StemRole::Pr);
            if self.has(&CONJ_THEMATIC_VOWEL) {
                self.look_for_same();
            }
            self.reset_all();
        }

        if self.has(&INFINITIVE_PF) {
            self.look_for(Category::Verb, StemRole::Pf);
            self.reset_all();
        }
    }

    // laudem: the a of the stem is swallowed by the subjunctive e
    fn subjunctive_present_of_a_conjugation(&mut self) {
        if self.state.extension == "e" && !self.state.stem.ends_with('i') {
            self.append_a_and_search();
        }
    }

    // laudo, laudor
    fn first_person_present_of_a_conjugation(&mut self) {
        let ending = &self.state.ending;
        if (ending.ends_with('o') || ending.ends_with("or")) && self.state.extension.is_empty() {
            self.append_a_and_search();
        }
    }

    fn append_a_and_search(&mut self) {
        self.state.stem.push('a');
        self.look_for_same();
        self.state.stem.pop();
    }

    // dic, duc, fac, fer
    fn short_imperative(&mut self) -> bool {
        let stem = &self.state.stem;
        let short = ["dic", "duc", "fac", "fer"]
            .iter()
            .any(|s| stem.ends_with(s));
        if short {
            self.look_for(Category::Verb, StemRole::Pr);
        }
        short
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::segment::{Program, SegmentBuilder};
    use crate::types::{Category, PfTag, Restriction, StemRole};

    fn conjugable(word: &str) -> SegmentBuilder {
        let mut builder = SegmentBuilder::new(word);
        builder.create_conjugables();
        builder
    }

    fn has_request(b: &SegmentBuilder, stem: &str, role: StemRole, class: u8) -> bool {
        b.requests().iter().any(|r| {
            r.category() == Category::Verb
                && r.stem() == stem
                && r.stem_role() == role
                && r.restriction().admits_class(class)
        })
    }

    #[test]
    fn first_conjugation_present() {
        let b = conjugable("laudo");
        assert!(has_request(&b, "lauda", StemRole::Pr, 1));
        let r = b
            .requests()
            .iter()
            .find(|r| r.stem() == "lauda")
            .expect("appended a");
        assert_eq!(r.components().ending, "o");
    }

    #[test]
    fn imperfect_with_thematic() {
        let b = conjugable("capiebat");
        let found = b.requests().iter().any(|r| {
            r.stem() == "cap"
                && r.components().thematic() == "ie"
                && r.components().extension() == "ba"
                && r.restriction().admits_class(5)
        });
        assert!(found);
    }

    #[test]
    fn future_with_b() {
        let b = conjugable("laudabit");
        let found = b.requests().iter().any(|r| {
            r.stem() == "lauda"
                && r.components().extension() == "b"
                && r.components().thematic() == "i"
                && r.components().ending == "t"
        });
        assert!(found);
    }

    #[test]
    fn perfect_stem() {
        let b = conjugable("miserunt");
        let found = b.requests().iter().any(|r| {
            r.stem() == "mis"
                && r.stem_role() == StemRole::Pf
                && r.restriction() == &Restriction::PfComposition(vec![PfTag::S, PfTag::Reduplication])
        });
        assert!(found);
    }

    #[test]
    fn contracted_perfect() {
        let b = conjugable("audierunt");
        let found = b.requests().iter().any(|r| {
            r.stem() == "audiv"
                && r.stem_role() == StemRole::Pf
                && r.components().contraction.as_ref().map(|c| c.position) == Some(4)
        });
        assert!(found);
        // the word is back to normal for the plain search
        assert!(b
            .requests()
            .iter()
            .any(|r| r.stem() == "audi" && r.components().contraction.is_none()));
    }

    #[test]
    fn infinitives() {
        assert!(has_request(&conjugable("audiri"), "audi", StemRole::Pr, 4));
        assert!(has_request(&conjugable("regi"), "reg", StemRole::Pr, 3));
        let b = conjugable("audire");
        assert!(has_request(&b, "audi", StemRole::Pr, 4));
    }

    #[test]
    fn short_imperative_stops_imperative_search() {
        let b = conjugable("dic");
        assert!(has_request(&b, "dic", StemRole::Pr, 3));
    }

    proptest! {
        #[test]
        fn contraction_leaves_word_unchanged(word in "[a-z]{1,6}(erunt|asti|isse|arunt|eram|orunt)") {
            let mut b = SegmentBuilder::new(&word);
            b.setup(Program::Conjugable);
            b.search_contracted_forms();
            prop_assert_eq!(b.state().reconstruct(), word.clone());
            prop_assert_eq!(&b.state().stem, &word);
            prop_assert!(b.state().contraction.is_none());
        }
    }
}
