/// Points and the distance metric
pub mod coordinates;
/// Numeric traits and dataset helpers
pub mod dataset;
/// Injected randomness
pub mod random;
