//! Controller layer: UI actions collected during a frame and their dispatch.

pub mod events;
pub mod orchestration;
