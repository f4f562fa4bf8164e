use crate::error::{ClusterError, Result};

/// What recentering does with a cluster that ended a pass without members.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EmptyClusterPolicy {
    /// Leave the center where it was.
    #[default]
    Keep,
    /// Move the center onto a randomly chosen dataset point.
    Reseed,
}

#[derive(Clone, Debug)]
pub struct ClusterParams {
    num_clusters: usize,
    empty_cluster_policy: EmptyClusterPolicy,
}

impl Default for ClusterParams {
    fn default() -> Self {
        Self::new()
    }
}

impl ClusterParams {
    pub fn new() -> Self {
        Self {
            num_clusters: 2,
            empty_cluster_policy: EmptyClusterPolicy::Keep,
        }
    }

    pub fn set_num_clusters(&mut self, num_clusters: usize) -> Result<()> {
        if num_clusters < 1 {
            return Err(ClusterError::InvalidInput(
                "The number of clusters must be greater than 0.".into(),
            ));
        }
        self.num_clusters = num_clusters;
        Ok(())
    }

    pub fn set_empty_cluster_policy(&mut self, policy: EmptyClusterPolicy) {
        self.empty_cluster_policy = policy;
    }

    pub fn num_clusters(&self) -> usize {
        self.num_clusters
    }

    pub fn empty_cluster_policy(&self) -> EmptyClusterPolicy {
        self.empty_cluster_policy
    }
}
