//! Worker thread owning the file session, fed by the shell's command queue.

pub mod commands;
pub mod runtime;
