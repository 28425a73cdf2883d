//! Assistive features: category prediction, anomaly warnings and quick entry
//!
//! All three are heuristics over the transaction history. No model or
//! network call is involved.

mod anomaly;
mod parser;
mod predictor;

pub use anomaly::{Anomaly, AnomalyConfig, AnomalyDetector};
pub use parser::QuickEntryParser;
pub use predictor::CategoryPredictor;
