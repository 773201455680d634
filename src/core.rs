pub mod analyzer;
pub mod anomaly;
pub mod cells;
pub mod confidence;
pub mod cycles;
pub mod degradation;
pub mod quality;
