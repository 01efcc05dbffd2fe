//! Trace-driven models of dynamic branch direction predictors.
//!
//! A [Predictor] is configured with a [PredictorConfig], then driven one
//! branch at a time: [BranchPredictor::predict] before the outcome is
//! known, and [BranchPredictor::update] once it has resolved.

pub mod branch;
pub mod config;
pub mod history;
pub mod predictor;
pub mod sim;
pub mod stats;
pub mod synth;
pub mod trace;

pub use branch::*;
pub use config::*;
pub use history::*;
pub use predictor::*;
pub use sim::*;
pub use trace::*;
