//! Controller layer: shell events, error modeling, and command orchestration.

pub mod events;
pub mod orchestration;
