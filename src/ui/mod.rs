//! UI components and layout for the tag input.

pub mod components;
pub mod layout;

pub use components::{TagInput, TagInputAction, TextInput};
