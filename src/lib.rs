// Library surface for the drill engine, the TUI binary and integration tests.
// Rendering stays in the binary.
pub mod app_dirs;
pub mod command;
pub mod config;
pub mod deck;
pub mod error;
pub mod import;
pub mod lexicon;
pub mod proficiency;
pub mod runtime;
pub mod selection;
pub mod session;
pub mod stats;

pub use deck::{Deck, Direction, WordPair};
pub use error::{DrillError, LexiconError, LoadWarning};
pub use lexicon::{Lexicon, LexiconStore};
pub use selection::{PolicyKind, WordPolicy};
pub use session::{AnswerOutcome, Question, QuizSession};
