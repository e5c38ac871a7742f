//! Event handling for the application.
//!
//! This module converts terminal input into application events and
//! supplies the tick that drives the debounce deadline.

mod handler;

pub use handler::EventHandler;

use crossterm::event::KeyEvent;

/// An event delivered to the main loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A key press.
    Key(KeyEvent),
    /// Text pasted into the terminal.
    Paste(String),
    /// The terminal was resized to (width, height).
    Resize(u16, u16),
    /// No terminal event arrived within the tick rate.
    Tick,
}
