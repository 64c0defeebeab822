pub mod event;
pub mod mention;
pub mod parse;

pub use event::{ActorMemory, Event, Timeline};
pub use mention::{MentionCluster, MentionSpan};
pub use parse::{DepRel, EntityKind, Pos, Sentence, Token};
