use std::fmt::{self, Debug, Formatter};

use crate::data::coordinates::{center, Coordinates, Observation};
use crate::data::dataset::RealNumber;
use crate::error::Result;

/// A center and the observations currently assigned to it.
///
/// Members are borrowed from the dataset, never copied or mutated.
pub struct Cluster<'a, T: RealNumber = f64, O: Observation<T> = Coordinates<T>> {
    center: Coordinates<T>,
    observations: Vec<&'a O>,
}

impl<'a, T: RealNumber, O: Observation<T>> Debug for Cluster<'a, T, O> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cluster")
            .field("center", &self.center.values().as_slice())
            .field("observations", &self.observations.len())
            .finish()
    }
}

impl<'a, T: RealNumber, O: Observation<T>> Cluster<'a, T, O> {
    pub fn new(center: Coordinates<T>) -> Self {
        Self {
            center,
            observations: Vec::new(),
        }
    }

    pub fn center(&self) -> &Coordinates<T> {
        &self.center
    }

    pub fn observations(&self) -> &[&'a O] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn append(&mut self, observation: &'a O) {
        self.observations.push(observation);
    }

    pub(crate) fn clear(&mut self) {
        self.observations.clear();
    }

    pub(crate) fn set_center(&mut self, center: Coordinates<T>) {
        self.center = center;
    }

    /// Mean of the current members, or `None` for an empty cluster.
    pub(crate) fn mean(&self) -> Result<Option<Coordinates<T>>> {
        if self.observations.is_empty() {
            return Ok(None);
        }
        center(self.observations.iter().copied()).map(Some)
    }

    /// Moves the center to the mean of the current members.
    ///
    /// An empty cluster keeps its center.
    pub fn recenter(&mut self) -> Result<()> {
        if let Some(mean) = self.mean()? {
            self.center = mean;
        }
        Ok(())
    }

    /// Value along dimension `dimension` of every member, in member order.
    pub fn points_in_dimension(&self, dimension: usize) -> Result<Vec<T>> {
        self.observations
            .iter()
            .map(|observation| observation.coordinates().get(dimension))
            .collect()
    }
}
