//! Controller layer: user actions, reducer state transitions, and command orchestration.

pub mod events;
pub mod orchestration;
pub mod reducer;
