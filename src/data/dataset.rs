use nalgebra::DMatrix;
use num_traits::{Float, FromPrimitive, Num, ToPrimitive};
use std::cmp::PartialOrd;
use std::fmt::{Debug, Display};
use std::ops::{AddAssign, DivAssign, MulAssign, SubAssign};

use crate::data::coordinates::{Coordinates, Observation};
use crate::error::{ClusterError, Result};

pub trait DataValue:
    Debug
    + Clone
    + Copy
    + Num
    + FromPrimitive
    + ToPrimitive
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
    + Send
    + Sync
    + Display
    + 'static
{
}

impl<T> DataValue for T where
    T: Debug
        + Clone
        + Copy
        + Num
        + FromPrimitive
        + ToPrimitive
        + AddAssign
        + SubAssign
        + MulAssign
        + DivAssign
        + Send
        + Sync
        + Display
        + 'static
{
}

pub trait Number: DataValue + PartialOrd {}
impl<T> Number for T where T: DataValue + PartialOrd {}

pub trait RealNumber: Number + Float {}
impl<T> RealNumber for T where T: Number + Float {}

/// Splits a matrix into one unlabeled point per row.
pub fn coordinates_from_matrix<T: RealNumber>(x: &DMatrix<T>) -> Vec<Coordinates<T>> {
    x.row_iter()
        .map(|row| Coordinates::from(row.transpose()))
        .collect()
}

/// Checks the preconditions shared by every cluster set constructor and
/// returns the dimensionality of the dataset.
pub fn dataset_dimension<T: RealNumber, O: Observation<T>>(
    num_clusters: usize,
    dataset: &[O],
) -> Result<usize> {
    let dimension = dataset
        .first()
        .map(|observation| observation.coordinates().dimension())
        .unwrap_or(0);
    if dimension == 0 {
        return Err(ClusterError::InvalidInput(
            "there must be at least one dimension in the data set".into(),
        ));
    }
    if num_clusters == 0 {
        return Err(ClusterError::InvalidInput(
            "k must be greater than 0".into(),
        ));
    }
    Ok(dimension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_from_matrix() {
        let x = DMatrix::from_row_slice(3, 2, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let points = coordinates_from_matrix(&x);

        assert_eq!(points.len(), 3);
        assert_eq!(points[1].values().as_slice(), &[3.0, 4.0]);
        assert!(points.iter().all(|point| point.label().is_none()));
    }

    #[test]
    fn test_coordinates_from_empty_matrix() {
        let x = DMatrix::<f64>::zeros(0, 3);
        assert!(coordinates_from_matrix(&x).is_empty());
    }

    #[test]
    fn test_dataset_dimension() {
        let dataset = vec![Coordinates::new(vec![1.0, 2.0, 3.0])];
        assert_eq!(dataset_dimension(2, &dataset), Ok(3));
    }

    #[test]
    fn test_dataset_dimension_rejects_empty_dataset() {
        let dataset: Vec<Coordinates<f64>> = vec![];
        assert!(matches!(
            dataset_dimension(1, &dataset),
            Err(ClusterError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_dataset_dimension_rejects_zero_dimensions() {
        let dataset = vec![Coordinates::<f64>::new(vec![])];
        assert!(matches!(
            dataset_dimension(1, &dataset),
            Err(ClusterError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_dataset_dimension_rejects_zero_clusters() {
        let dataset = vec![Coordinates::new(vec![1.0])];
        assert!(matches!(
            dataset_dimension(0, &dataset),
            Err(ClusterError::InvalidInput(_))
        ));
    }
}
