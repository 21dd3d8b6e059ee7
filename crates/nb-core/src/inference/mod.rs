//! Inference engine modules.

pub mod predict;

pub use predict::{predict, EvidenceTerm, Prediction};
