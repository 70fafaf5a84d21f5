pub mod generator;
pub mod question;
pub mod quiz_session;

// Re-export for convenience
pub use generator::{mix_question, relation_question};
pub use question::{ColorPair, MixQuestion, QuizQuestion, RelationKind, RelationQuestion};
pub use quiz_session::{AnswerOutcome, Feedback, QuizSession};
