use nalgebra::DVector;
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::data::coordinates::{average_distance, Coordinates, Observation};
use crate::data::dataset::{dataset_dimension, RealNumber};
use crate::data::random::{uniform_index, UniformSource};
use crate::error::{ClusterError, Result};
use crate::unsupervised::cluster::Cluster;
use crate::unsupervised::params::{ClusterParams, EmptyClusterPolicy};

/// The `k` clusters a driver iterates on.
///
/// A cluster set borrows its dataset; members of each cluster are references
/// into it. One iteration of the usual driver loop is [`reset`](Self::reset),
/// [`assign`](Self::assign) (or [`nearest`](Self::nearest) plus
/// [`Cluster::append`] per observation), then [`recenter`](Self::recenter).
///
/// # Examples
///
/// ```
/// use rusty_clusters::data::coordinates::Coordinates;
/// use rusty_clusters::unsupervised::cluster_set::ClusterSet;
///
/// let dataset = vec![
///     Coordinates::new(vec![0.0, 0.0]),
///     Coordinates::new(vec![0.0, 1.0]),
///     Coordinates::new(vec![10.0, 10.0]),
///     Coordinates::new(vec![10.0, 11.0]),
/// ];
/// let seeds = vec![
///     Coordinates::new(vec![0.0, 0.0]),
///     Coordinates::new(vec![10.0, 10.0]),
/// ];
///
/// let mut clusters = ClusterSet::new_seeded(2, &dataset, seeds).unwrap();
/// clusters.reset();
/// let assignments = clusters.assign().unwrap();
/// clusters.recenter().unwrap();
///
/// assert_eq!(assignments, vec![0, 0, 1, 1]);
/// assert_eq!(clusters.centers_in_dimension(1).unwrap(), vec![0.5, 10.5]);
/// ```
pub struct ClusterSet<'a, T: RealNumber = f64, O: Observation<T> = Coordinates<T>> {
    dataset: &'a [O],
    clusters: Vec<Cluster<'a, T, O>>,
    empty_cluster_policy: EmptyClusterPolicy,
}

impl<'a, T: RealNumber, O: Observation<T>> ClusterSet<'a, T, O> {
    /// Creates `num_clusters` clusters with centers drawn uniformly from the unit hypercube.
    ///
    /// # Errors
    ///
    /// `InvalidInput` when the dataset is empty, its first observation has no
    /// dimensions, or `num_clusters` is zero.
    pub fn new_random<R: UniformSource + ?Sized>(
        num_clusters: usize,
        dataset: &'a [O],
        rng: &mut R,
    ) -> Result<Self> {
        let dimension = dataset_dimension(num_clusters, dataset)?;

        let clusters = (0..num_clusters)
            .map(|_| -> Result<Cluster<'a, T, O>> {
                let values = (0..dimension)
                    .map(|_| {
                        T::from_f64(rng.next_uniform())
                            .ok_or(ClusterError::Conversion("couldn't transform from f64"))
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(Cluster::new(Coordinates::new(values)))
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(
            num_clusters,
            dimension,
            observations = dataset.len(),
            "seeded clusters randomly"
        );

        Ok(Self {
            dataset,
            clusters,
            empty_cluster_policy: EmptyClusterPolicy::default(),
        })
    }

    /// Creates one cluster per supplied center.
    ///
    /// # Errors
    ///
    /// `InvalidInput` under the same conditions as [`new_random`](Self::new_random)
    /// or when `initial_centers.len() != num_clusters`; `DimensionMismatch`
    /// when a center does not match the dataset's dimensionality.
    pub fn new_seeded(
        num_clusters: usize,
        dataset: &'a [O],
        initial_centers: Vec<Coordinates<T>>,
    ) -> Result<Self> {
        let dimension = dataset_dimension(num_clusters, dataset)?;
        if initial_centers.len() != num_clusters {
            return Err(ClusterError::InvalidInput(
                "the number of initial centers must match k".into(),
            ));
        }
        if let Some(center) = initial_centers
            .iter()
            .find(|center| center.dimension() != dimension)
        {
            return Err(ClusterError::DimensionMismatch {
                expected: dimension,
                actual: center.dimension(),
            });
        }

        debug!(
            num_clusters,
            dimension,
            observations = dataset.len(),
            "seeded clusters from initial centers"
        );

        Ok(Self {
            dataset,
            clusters: initial_centers.into_iter().map(Cluster::new).collect(),
            empty_cluster_policy: EmptyClusterPolicy::default(),
        })
    }

    /// Random construction driven by `params`.
    pub fn with_params<R: UniformSource + ?Sized>(
        params: &ClusterParams,
        dataset: &'a [O],
        rng: &mut R,
    ) -> Result<Self> {
        let mut set = Self::new_random(params.num_clusters(), dataset, rng)?;
        set.empty_cluster_policy = params.empty_cluster_policy();
        Ok(set)
    }

    pub fn dataset(&self) -> &'a [O] {
        self.dataset
    }

    pub fn clusters(&self) -> &[Cluster<'a, T, O>] {
        &self.clusters
    }

    pub fn cluster(&self, index: usize) -> Result<&Cluster<'a, T, O>> {
        let len = self.clusters.len();
        self.clusters
            .get(index)
            .ok_or(ClusterError::IndexOutOfRange { index, len })
    }

    pub fn cluster_mut(&mut self, index: usize) -> Result<&mut Cluster<'a, T, O>> {
        let len = self.clusters.len();
        self.clusters
            .get_mut(index)
            .ok_or(ClusterError::IndexOutOfRange { index, len })
    }

    pub fn centers(&self) -> Vec<&Coordinates<T>> {
        self.clusters.iter().map(Cluster::center).collect()
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    pub fn empty_cluster_policy(&self) -> EmptyClusterPolicy {
        self.empty_cluster_policy
    }

    pub fn set_empty_cluster_policy(&mut self, policy: EmptyClusterPolicy) {
        self.empty_cluster_policy = policy;
    }

    /// Index of the cluster whose center is closest to `point`.
    ///
    /// Ties go to the lowest index.
    pub fn nearest<P: Observation<T> + ?Sized>(&self, point: &P) -> Result<usize> {
        let mut best: Option<(usize, T)> = None;

        for (index, cluster) in self.clusters.iter().enumerate() {
            let dist = point.distance(cluster.center())?;
            let closer = match best {
                Some((_, best_dist)) => dist < best_dist,
                None => true,
            };
            if closer {
                best = Some((index, dist));
            }
        }

        best.map(|(index, _)| index)
            .ok_or_else(|| ClusterError::InvalidInput("there are no clusters".into()))
    }

    /// [`nearest`](Self::nearest) for every observation of the dataset, in dataset order.
    ///
    /// Centers are only read, so observations are processed in parallel.
    pub fn nearest_all(&self) -> Result<Vec<usize>>
    where
        O: Sync,
    {
        self.dataset
            .par_iter()
            .map(|observation| self.nearest(observation))
            .collect()
    }

    /// Appends every observation of the dataset to its nearest cluster.
    ///
    /// Membership is not cleared first; call [`reset`](Self::reset) before a
    /// new pass. Returns the cluster index chosen for each observation. On
    /// error no cluster is modified.
    pub fn assign(&mut self) -> Result<Vec<usize>>
    where
        O: Sync,
    {
        let assignments = self.nearest_all()?;
        let dataset = self.dataset;

        for (observation, &index) in dataset.iter().zip(assignments.iter()) {
            self.clusters[index].append(observation);
        }

        Ok(assignments)
    }

    /// The cluster other than `from_cluster` whose members are closest to
    /// `point` on average, with that average distance.
    ///
    /// # Errors
    ///
    /// `InvalidInput` when there are fewer than two clusters;
    /// `IndexOutOfRange` when `from_cluster` is not a cluster index.
    pub fn neighbour<P: Observation<T> + ?Sized>(
        &self,
        point: &P,
        from_cluster: usize,
    ) -> Result<(usize, T)> {
        if self.clusters.len() < 2 {
            return Err(ClusterError::InvalidInput(
                "a neighbour needs at least two clusters".into(),
            ));
        }
        if from_cluster >= self.clusters.len() {
            return Err(ClusterError::IndexOutOfRange {
                index: from_cluster,
                len: self.clusters.len(),
            });
        }

        let mut best: Option<(usize, T)> = None;
        for (index, cluster) in self.clusters.iter().enumerate() {
            if index == from_cluster {
                continue;
            }

            let dist = average_distance(point, cluster.observations().iter().copied())?;
            let closer = match best {
                Some((_, best_dist)) => dist < best_dist,
                None => true,
            };
            if closer {
                best = Some((index, dist));
            }
        }

        best.ok_or_else(|| ClusterError::InvalidInput("there is no neighbouring cluster".into()))
    }

    /// Clears the members of every cluster.
    pub fn reset(&mut self) {
        for cluster in self.clusters.iter_mut() {
            cluster.clear();
        }
    }

    /// Moves every non-empty cluster's center to the mean of its members.
    ///
    /// Empty clusters keep their center. Either every center is updated or,
    /// on error, none is.
    pub fn recenter(&mut self) -> Result<()> {
        let means = self.means()?;
        self.commit_means(means);
        Ok(())
    }

    /// Recenters, then applies the configured [`EmptyClusterPolicy`].
    ///
    /// Returns the indices of re-seeded clusters, which is always empty under
    /// [`EmptyClusterPolicy::Keep`]. Re-seed points are picked against the
    /// recentered positions before anything is written, so on error no center
    /// moves.
    pub fn recenter_with_policy<R: UniformSource + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<Vec<usize>> {
        let means = self.means()?;
        let picks = match self.empty_cluster_policy {
            EmptyClusterPolicy::Keep => Vec::new(),
            EmptyClusterPolicy::Reseed => {
                let centers = self
                    .clusters
                    .iter()
                    .zip(means.iter())
                    .map(|(cluster, mean)| mean.as_ref().unwrap_or(cluster.center()))
                    .collect::<Vec<_>>();
                self.reseed_picks(&centers, rng)?
            }
        };

        self.commit_means(means);
        Ok(self.commit_reseeds(picks))
    }

    /// Moves the center of every empty cluster onto a randomly picked dataset
    /// point and returns the indices of the moved clusters.
    ///
    /// Points are drawn without replacement and never coincide with another
    /// center, so each moved cluster is the unique nearest cluster of its new
    /// point on the next pass. An empty cluster stays put when no such point
    /// is left.
    pub fn reseed_empty<R: UniformSource + ?Sized>(&mut self, rng: &mut R) -> Result<Vec<usize>> {
        let centers = self.centers();
        let picks = self.reseed_picks(&centers, rng)?;
        Ok(self.commit_reseeds(picks))
    }

    fn means(&self) -> Result<Vec<Option<Coordinates<T>>>> {
        self.clusters
            .iter()
            .map(Cluster::mean)
            .collect::<Result<Vec<_>>>()
    }

    fn commit_means(&mut self, means: Vec<Option<Coordinates<T>>>) {
        for (index, (cluster, mean)) in self.clusters.iter_mut().zip(means).enumerate() {
            match mean {
                Some(mean) => {
                    trace!(cluster = index, members = cluster.len(), "recentered");
                    cluster.set_center(mean);
                }
                None => debug!(cluster = index, "cluster is empty, keeping its center"),
            }
        }
    }

    fn reseed_picks<R: UniformSource + ?Sized>(
        &self,
        centers: &[&Coordinates<T>],
        rng: &mut R,
    ) -> Result<Vec<(usize, Coordinates<T>)>> {
        let mut taken = centers
            .iter()
            .map(|center| center.values())
            .collect::<Vec<&DVector<T>>>();
        let mut picks = Vec::new();

        for (index, cluster) in self.clusters.iter().enumerate() {
            if !cluster.is_empty() {
                continue;
            }

            let candidates = self
                .dataset
                .iter()
                .map(|observation| observation.coordinates().values())
                .filter(|values| !taken.contains(values))
                .collect::<Vec<_>>();
            if candidates.is_empty() {
                debug!(cluster = index, "no free dataset point to re-seed from");
                continue;
            }

            let values = candidates[uniform_index(rng, candidates.len())];
            let dimension = centers[index].dimension();
            if values.len() != dimension {
                return Err(ClusterError::DimensionMismatch {
                    expected: dimension,
                    actual: values.len(),
                });
            }
            taken.push(values);
            picks.push((index, Coordinates::from(values.clone())));
        }

        Ok(picks)
    }

    fn commit_reseeds(&mut self, picks: Vec<(usize, Coordinates<T>)>) -> Vec<usize> {
        let mut indices = Vec::with_capacity(picks.len());
        for (index, center) in picks {
            debug!(cluster = index, "re-seeded empty cluster");
            self.clusters[index].set_center(center);
            indices.push(index);
        }
        indices
    }

    /// Value along dimension `dimension` of every center, in cluster order.
    pub fn centers_in_dimension(&self, dimension: usize) -> Result<Vec<T>> {
        self.clusters
            .iter()
            .map(|cluster| cluster.center().get(dimension))
            .collect()
    }
}
