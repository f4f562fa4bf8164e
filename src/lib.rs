//! # Rusty-clusters
//!
//! `rusty-clusters` provides the building blocks of centroid-based (k-means style) clustering:
//! points and their squared euclidean distance, cluster initialization, nearest-cluster
//! assignment, recentering and neighbour lookups for cluster-quality diagnostics.
//!
//! The iteration loop itself is left to the caller, who decides when to stop.
//!
//! ## Getting Started
//!
//! To use `rusty-clusters`, add the following to your `Cargo.toml` file:
//!
//! ```toml
//! [dependencies]
//! rusty-clusters = "*"
//! ```
//!
//! ## Example Usage
//!
//! As a quick example, here's how you can run a few iterations over points stored in a matrix:
//!
//! ```rust
//!
//! use rusty_clusters::data::dataset::coordinates_from_matrix;
//! use rusty_clusters::data::random::rng_from_seed;
//! use rusty_clusters::metrics::quality::ClusterMetrics;
//! use rusty_clusters::unsupervised::cluster_set::ClusterSet;
//! use nalgebra::DMatrix;
//!
//! let x = DMatrix::from_row_slice(4, 2, &[0.1, 0.2, 0.15, 0.22, 0.8, 0.9, 0.85, 0.88]);
//! let dataset = coordinates_from_matrix(&x);
//!
//! let mut rng = rng_from_seed(Some(42));
//! let mut clusters = ClusterSet::new_random(2, &dataset, &mut rng).unwrap();
//!
//! for _ in 0..10 {
//!     clusters.reset();
//!     clusters.assign().unwrap();
//!     clusters.recenter().unwrap();
//! }
//!
//! let inertia = clusters.inertia().unwrap();
//! assert!(inertia >= 0.0);
//! ```

/// Points, distances and dataset helpers
pub mod data;
/// Error types
pub mod error;
/// Functions for evaluating cluster quality
pub mod metrics;
/// Clusters and cluster sets
pub mod unsupervised;

pub use error::{ClusterError, Result};
