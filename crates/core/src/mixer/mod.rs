pub mod blend;
pub mod mix_session;

// Re-export for convenience
pub use blend::{mix, Mix, MixedColor, GENERIC_BLEND_NAME};
pub use mix_session::{MixSession, SAME_COLOR_NOTICE};
