/// A single cluster and its members
pub mod cluster;
/// The set of k clusters a driver iterates on
pub mod cluster_set;
/// Clustering parameters
pub mod params;
