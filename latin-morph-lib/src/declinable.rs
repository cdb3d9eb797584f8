// Declinable program: nouns, adjectives and participles.

use crate::rules::{
    Slot, A_ENDING, COMPARISON, DECL_THEMATIC_VOWEL, FUTURE_PARTICIPLE, IUS_ENDING,
    NOMINATIVE_ENDING, OTHER_CASE_ENDING, PPA_OR_GERUND, PRONOMINAL_ENDING, THEMATIC_I_OF_M,
    UM_ENDING,
};
use crate::segment::{Program, SegmentBuilder};
use crate::types::{Category, StemRole};

impl SegmentBuilder {
    pub(crate) fn create_declinables(&mut self) {
        self.setup(Program::Declinable);

        self.nominative();
        self.other_case();
        self.um_ending();
        self.ius_ending();
        self.a_ending();
        self.pronominal();
        self.contracted_vocative();
    }

    fn nominative(&mut self) {
        if self.has(&NOMINATIVE_ENDING) {
            self.look_for(Category::Noun, StemRole::Nom);
            self.look_for(Category::Adjective, StemRole::Nom);
            self.reset(&[Slot::Ending]);
        }
    }

    fn other_case(&mut self) {
        if self.has(&OTHER_CASE_ENDING) {
            self.nominal_stems();
            self.reset_all();
        }
    }

    // filium, suum
    fn um_ending(&mut self) {
        if self.has(&UM_ENDING) {
            self.nominal_stems();
            self.reset_all();
        }
    }

    // filius, Gaius
    fn ius_ending(&mut self) {
        if self.has(&IUS_ENDING) {
            self.look_for(Category::Noun, StemRole::Stem);
            self.reset_all();
        }
    }

    fn a_ending(&mut self) {
        if self.has(&A_ENDING) {
            self.nominal_stems();
            self.reset_all();
        }
    }

    // alius, aliud
    fn pronominal(&mut self) {
        if self.has(&PRONOMINAL_ENDING) {
            self.look_for(Category::Adjective, StemRole::Stem);
            self.reset_all();
        }
    }

    fn contracted_vocative(&mut self) {
        if self.state.stem.ends_with('i') {
            self.look_for(Category::Noun, StemRole::Stem);
        }
    }

    fn nominal_stems(&mut self) {
        self.look_for(Category::Noun, StemRole::Stem);
        self.look_for(Category::Adjective, StemRole::Stem);
        self.look_for(Category::Verb, StemRole::Ppp);
        self.comparison_or_verbal_extension();
    }

    fn comparison_or_verbal_extension(&mut self) {
        if self.has(&COMPARISON) {
            self.look_for(Category::Adjective, StemRole::Stem);
        }
        if self.has(&PPA_OR_GERUND) {
            self.look_for(Category::Verb, StemRole::Pr);
            if self.has(&DECL_THEMATIC_VOWEL) {
                self.look_for_same();
                if self.has(&THEMATIC_I_OF_M) {
                    self.look_for_same();
                }
            }
        }
        if self.has(&FUTURE_PARTICIPLE) {
            self.look_for(Category::Verb, StemRole::Ppp);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::segment::SegmentBuilder;
    use crate::types::{Category, StemRole};

    fn declinable(word: &str) -> Vec<(Category, String, StemRole, String)> {
        let mut builder = SegmentBuilder::new(word);
        builder.create_declinables();
        builder
            .requests()
            .iter()
            .map(|r| {
                (
                    r.category(),
                    r.stem().to_string(),
                    r.stem_role(),
                    r.components().ending.clone(),
                )
            })
            .collect()
    }

    #[test]
    fn rosa_is_never_a_nominative_lookup() {
        let requests = declinable("rosa");
        assert!(requests.iter().all(|(_, _, role, _)| *role != StemRole::Nom));
        assert!(requests.contains(&(Category::Noun, "ros".into(), StemRole::Stem, "a".into())));
    }

    #[test]
    fn ratio_searches_nominative() {
        let requests = declinable("ratio");
        assert_eq!(
            requests[0],
            (Category::Noun, "ratio".into(), StemRole::Nom, "".into())
        );
    }

    #[test]
    fn proper_names_add_secondary_tables() {
        let requests = declinable("Plato");
        let tables: Vec<Category> = requests
            .iter()
            .filter(|(_, stem, _, _)| stem == "Plato")
            .map(|(c, _, _, _)| *c)
            .collect();
        assert!(tables.contains(&Category::Persona));
        assert!(tables.contains(&Category::Place));
        // nominal lookups are lowercased
        assert!(requests.iter().any(|(c, s, _, _)| *c == Category::Noun && s == "plato"));
    }

    #[test]
    fn ethnic_follows_adjective_stems() {
        let requests = declinable("Haeduorum");
        assert!(requests.contains(&(
            Category::Ethnic,
            "Haedu".into(),
            StemRole::Stem,
            "orum".into()
        )));
    }

    #[test]
    fn contracted_vocative() {
        let requests = declinable("fili");
        assert!(requests.contains(&(Category::Noun, "fili".into(), StemRole::Stem, "".into())));
    }

    #[test]
    fn present_participle_thematic_vowel() {
        let mut builder = SegmentBuilder::new("regentis");
        builder.create_declinables();
        let found = builder.requests().iter().any(|r| {
            r.category() == Category::Verb
                && r.stem_role() == StemRole::Pr
                && r.stem() == "reg"
                && r.components().thematic() == "e"
                && r.components().extension() == "nt"
        });
        assert!(found);
    }
}
