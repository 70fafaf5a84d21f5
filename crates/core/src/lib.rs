pub use config::{ConfigError, ConfigFile, ConfigManager, ConfigOption, ConfigSchema, Settings};
pub use mixer::blend::{mix, Mix, MixedColor, GENERIC_BLEND_NAME};
pub use mixer::mix_session::{MixSession, SAME_COLOR_NOTICE};
pub use quiz::generator::{mix_question, relation_question};
pub use quiz::question::{
    ColorPair, MixQuestion, QuizQuestion, RelationKind, RelationQuestion,
};
pub use quiz::quiz_session::{AnswerOutcome, Feedback, QuizSession};
pub use saved_colors::{SaveError, SavedColor, SavedColors};
pub use store::{JsonFileStore, KeyValueStore, MemoryStore};

mod config;
mod mixer;
pub mod quiz;
mod saved_colors;
mod store;
