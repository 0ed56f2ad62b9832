//! Whitespace-normalizing search over script text.

pub mod engine;
pub mod index;
pub mod lines;
pub mod matcher;
pub mod model;

pub use engine::ScriptSearch;
pub use index::NormalizedText;
pub use lines::{LineMode, LineView};
pub use matcher::{RegexMatcher, SearchOptions};
pub use model::{ByteSpan, Match};

pub mod prelude {
    pub use super::{ByteSpan, LineMode, Match, ScriptSearch, SearchOptions};
}
