pub mod coref;
pub mod ontology;
pub mod parser;
pub mod sentiment;

pub use coref::{CorefService, NoopCorefService, StaticCorefService};
pub use ontology::{NoopOntology, OntologyService, WordListOntology};
pub use parser::{HeuristicParser, ParserService};
pub use sentiment::{LocalSentimentService, NoopSentimentService, SentimentScore, SentimentService};
