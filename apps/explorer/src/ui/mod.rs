//! Plain-text rendering of explorer state for the terminal shell.

pub mod terminal;
