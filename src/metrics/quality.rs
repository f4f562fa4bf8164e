use crate::data::coordinates::{average_distance, Observation};
use crate::data::dataset::RealNumber;
use crate::error::{ClusterError, Result};
use crate::unsupervised::cluster_set::ClusterSet;

/// Cluster-quality diagnostics computed from the current membership.
pub trait ClusterMetrics<T: RealNumber> {
    /// Sum over all clusters of the squared distance from each member to its
    /// cluster's center.
    fn inertia(&self) -> Result<T>;

    /// Silhouette of `point` as a member of cluster `cluster_index`.
    ///
    /// With `a` the average distance to the point's own cluster and `b` the
    /// neighbour's average distance, this is `(b - a) / max(a, b)`, or zero
    /// when both are zero. Distances are squared and coincident points are
    /// skipped, as in [`average_distance`].
    fn silhouette<P: Observation<T> + ?Sized>(
        &self,
        point: &P,
        cluster_index: usize,
    ) -> Result<T>;

    /// Mean silhouette over every assigned observation.
    fn mean_silhouette(&self) -> Result<T>;
}

impl<'a, T: RealNumber, O: Observation<T>> ClusterMetrics<T> for ClusterSet<'a, T, O> {
    fn inertia(&self) -> Result<T> {
        let mut total = T::zero();
        for cluster in self.clusters() {
            for observation in cluster.observations() {
                total += observation.distance(cluster.center())?;
            }
        }
        Ok(total)
    }

    fn silhouette<P: Observation<T> + ?Sized>(
        &self,
        point: &P,
        cluster_index: usize,
    ) -> Result<T> {
        let (_, b) = self.neighbour(point, cluster_index)?;
        let own = self.cluster(cluster_index)?;
        let a = average_distance(point, own.observations().iter().copied())?;

        let scale = a.max(b);
        if scale == T::zero() {
            return Ok(T::zero());
        }
        Ok((b - a) / scale)
    }

    fn mean_silhouette(&self) -> Result<T> {
        let mut total = T::zero();
        let mut count = 0usize;

        for (index, cluster) in self.clusters().iter().enumerate() {
            for &observation in cluster.observations() {
                total += self.silhouette(observation, index)?;
                count += 1;
            }
        }

        if count == 0 {
            return Err(ClusterError::EmptyInput(
                "no observation is assigned to a cluster".into(),
            ));
        }
        let n = T::from_usize(count)
            .ok_or(ClusterError::Conversion("couldn't transform from usize"))?;
        Ok(total / n)
    }
}
