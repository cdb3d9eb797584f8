pub mod types;
pub mod errors;
pub mod rules;
pub mod segment;
pub mod inflection;
pub mod declinable;
pub mod conjugable;
pub mod request;
pub mod dictionary;
pub mod tables;
pub mod classifier;
pub mod forms;
pub mod morphology;
pub mod sentence;
pub mod output;

pub use dictionary::{Dictionary, StemLookup, StemPack};
pub use errors::{LookupError, MorphError, TableError};
pub use forms::{FormBuilder, ParadigmBuilder};
pub use morphology::{Morphologizer, MorphologizerConfig};
pub use request::LookupRequest;
pub use segment::SegmentBuilder;
pub use sentence::analyze_text;
pub use tables::ClosedClassTables;
pub use types::{Analysis, Form, FormKind, TextAnalysis};
