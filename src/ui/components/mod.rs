//! Reusable UI components.

mod input;
mod tag_input;

pub use input::TextInput;
pub use tag_input::{Hooks, SearchState, TagInput, TagInputAction};
