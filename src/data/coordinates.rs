use nalgebra::DVector;

use crate::data::dataset::RealNumber;
use crate::error::{ClusterError, Result};

/// A point in `D`-dimensional space with an optional label.
///
/// The label is metadata only; it never takes part in distances or means.
///
/// # Examples
///
/// ```
/// use rusty_clusters::data::coordinates::{Coordinates, Observation};
///
/// let a = Coordinates::new(vec![0.0, 0.0]).with_label("origin");
/// let b = Coordinates::new(vec![3.0, 4.0]);
///
/// assert_eq!(a.distance(&b).unwrap(), 25.0);
/// assert_eq!(a.label(), Some("origin"));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Coordinates<T: RealNumber = f64> {
    values: DVector<T>,
    label: Option<String>,
}

impl<T: RealNumber> Coordinates<T> {
    pub fn new(values: Vec<T>) -> Self {
        Self {
            values: DVector::from_vec(values),
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn values(&self) -> &DVector<T> {
        &self.values
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn dimension(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the value along dimension `index`.
    pub fn get(&self, index: usize) -> Result<T> {
        self.values
            .get(index)
            .copied()
            .ok_or(ClusterError::IndexOutOfRange {
                index,
                len: self.values.len(),
            })
    }
}

impl<T: RealNumber> From<Vec<T>> for Coordinates<T> {
    fn from(values: Vec<T>) -> Self {
        Self::new(values)
    }
}

impl<T: RealNumber> From<DVector<T>> for Coordinates<T> {
    fn from(values: DVector<T>) -> Self {
        Self {
            values,
            label: None,
        }
    }
}

/// Anything that can be clustered.
///
/// Implementors report their position as [`Coordinates`] and measure their
/// distance to another position. The default distance is [`squared_euclidean`],
/// so a domain type usually only has to hand out the coordinates it wraps.
pub trait Observation<T: RealNumber = f64> {
    fn coordinates(&self) -> &Coordinates<T>;

    fn distance(&self, to: &Coordinates<T>) -> Result<T> {
        squared_euclidean(self.coordinates(), to)
    }
}

impl<T: RealNumber> Observation<T> for Coordinates<T> {
    fn coordinates(&self) -> &Coordinates<T> {
        self
    }
}

impl<T: RealNumber, O: Observation<T> + ?Sized> Observation<T> for Box<O> {
    fn coordinates(&self) -> &Coordinates<T> {
        (**self).coordinates()
    }

    fn distance(&self, to: &Coordinates<T>) -> Result<T> {
        (**self).distance(to)
    }
}

/// Sum of squared differences between `a` and `b`.
///
/// The square root is never taken: only the ordering of distances matters when
/// picking the nearest center, and callers rely on the squared value.
pub fn squared_euclidean<T: RealNumber>(a: &Coordinates<T>, b: &Coordinates<T>) -> Result<T> {
    if a.dimension() != b.dimension() {
        return Err(ClusterError::DimensionMismatch {
            expected: a.dimension(),
            actual: b.dimension(),
        });
    }

    Ok(a
        .values
        .iter()
        .zip(b.values.iter())
        .fold(T::zero(), |acc, (&x, &y)| {
            let diff = x - y;
            acc + diff * diff
        }))
}

/// Per-dimension arithmetic mean of `observations`.
pub fn center<'o, T, O, I>(observations: I) -> Result<Coordinates<T>>
where
    T: RealNumber,
    O: Observation<T> + ?Sized + 'o,
    I: IntoIterator<Item = &'o O>,
{
    let mut iter = observations.into_iter();
    let first = iter.next().ok_or_else(|| {
        ClusterError::EmptyInput("there is no mean for an empty set of points".into())
    })?;

    let mut sums = first.coordinates().values().clone();
    let mut count = 1usize;

    for observation in iter {
        let values = observation.coordinates().values();
        if values.len() != sums.len() {
            return Err(ClusterError::DimensionMismatch {
                expected: sums.len(),
                actual: values.len(),
            });
        }
        for (sum, &value) in sums.iter_mut().zip(values.iter()) {
            *sum += value;
        }
        count += 1;
    }

    let n = T::from_usize(count).ok_or(ClusterError::Conversion("couldn't transform from usize"))?;
    Ok(Coordinates::from(sums.map(|sum| sum / n)))
}

/// Average distance from `point` to `observations`.
///
/// Observations at distance exactly zero are skipped so a point does not pull
/// the average of its own cluster down. Returns zero when nothing is left.
pub fn average_distance<'o, T, P, O, I>(point: &P, observations: I) -> Result<T>
where
    T: RealNumber,
    P: Observation<T> + ?Sized,
    O: Observation<T> + ?Sized + 'o,
    I: IntoIterator<Item = &'o O>,
{
    let mut total = T::zero();
    let mut count = 0usize;

    for observation in observations {
        let dist = point.distance(observation.coordinates())?;
        if dist == T::zero() {
            continue;
        }
        total += dist;
        count += 1;
    }

    if count == 0 {
        return Ok(T::zero());
    }
    let n = T::from_usize(count).ok_or(ClusterError::Conversion("couldn't transform from usize"))?;
    Ok(total / n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    struct City {
        name: String,
        position: Coordinates,
    }

    impl Observation for City {
        fn coordinates(&self) -> &Coordinates {
            &self.position
        }
    }

    #[test]
    fn test_coordinates_accessors() {
        let point = Coordinates::new(vec![1.0, 2.0, 3.0]).with_label("a");

        assert_eq!(point.dimension(), 3);
        assert!(!point.is_empty());
        assert_eq!(point.label(), Some("a"));
        assert_eq!(point.get(1), Ok(2.0));
        assert_eq!(
            point.get(3),
            Err(ClusterError::IndexOutOfRange { index: 3, len: 3 })
        );
    }

    #[test]
    fn test_distance_is_squared() {
        let a = Coordinates::new(vec![0.0, 0.0]);
        let b = Coordinates::new(vec![3.0, 4.0]);

        assert_abs_diff_eq!(squared_euclidean(&a, &b).unwrap(), 25.0);
    }

    #[test]
    fn test_distance_symmetry_and_identity() {
        let a = Coordinates::new(vec![1.5, -2.0, 7.25]);
        let b = Coordinates::new(vec![-0.5, 4.0, 1.0]);

        assert_relative_eq!(a.distance(&b).unwrap(), b.distance(&a).unwrap());
        assert_eq!(a.distance(&a).unwrap(), 0.0);
    }

    #[test]
    fn test_distance_ignores_label() {
        let a = Coordinates::new(vec![1.0, 1.0]).with_label("left");
        let b = Coordinates::new(vec![1.0, 1.0]).with_label("right");

        assert_eq!(a.distance(&b).unwrap(), 0.0);
    }

    #[test]
    fn test_distance_dimension_mismatch() {
        let a = Coordinates::new(vec![1.0, 2.0]);
        let b = Coordinates::new(vec![1.0, 2.0, 3.0]);

        assert_eq!(
            a.distance(&b),
            Err(ClusterError::DimensionMismatch {
                expected: 2,
                actual: 3
            })
        );
    }

    #[test]
    fn test_center() {
        let points = vec![
            Coordinates::new(vec![0.0, 0.0]),
            Coordinates::new(vec![2.0, 1.0]),
            Coordinates::new(vec![4.0, 5.0]),
        ];

        let mean = center(&points).unwrap();
        assert_eq!(mean.dimension(), 2);
        assert_relative_eq!(mean.get(0).unwrap(), 2.0);
        assert_relative_eq!(mean.get(1).unwrap(), 2.0);
        assert!(mean.label().is_none());
    }

    #[test]
    fn test_center_of_references() {
        let a = Coordinates::new(vec![1.0]);
        let b = Coordinates::new(vec![2.0]);
        let members = vec![&a, &b];

        let mean = center(members.iter().copied()).unwrap();
        assert_relative_eq!(mean.get(0).unwrap(), 1.5);
    }

    #[test]
    fn test_center_empty() {
        let points: Vec<Coordinates> = vec![];
        assert!(matches!(center(&points), Err(ClusterError::EmptyInput(_))));
    }

    #[test]
    fn test_center_dimension_mismatch() {
        let points = vec![
            Coordinates::new(vec![0.0, 0.0]),
            Coordinates::new(vec![1.0]),
        ];

        assert_eq!(
            center(&points),
            Err(ClusterError::DimensionMismatch {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn test_average_distance_skips_coincident_points() {
        let point = Coordinates::new(vec![0.0, 0.0]);
        let others = vec![
            Coordinates::new(vec![0.0, 0.0]),
            Coordinates::new(vec![1.0, 0.0]),
            Coordinates::new(vec![0.0, 3.0]),
        ];

        assert_relative_eq!(average_distance(&point, &others).unwrap(), 5.0);
    }

    #[test]
    fn test_average_distance_all_coincident() {
        let point = Coordinates::new(vec![2.0]);
        let others = vec![Coordinates::new(vec![2.0]), Coordinates::new(vec![2.0])];

        assert_eq!(average_distance(&point, &others).unwrap(), 0.0);

        let nobody: Vec<Coordinates> = vec![];
        assert_eq!(average_distance(&point, &nobody).unwrap(), 0.0);
    }

    #[test]
    fn test_custom_observation() {
        let paris = City {
            name: "Paris".into(),
            position: Coordinates::new(vec![48.85, 2.35]),
        };
        let lyon = City {
            name: "Lyon".into(),
            position: Coordinates::new(vec![45.75, 4.85]),
        };

        assert_eq!(paris.name, "Paris");
        assert_relative_eq!(
            paris.distance(lyon.coordinates()).unwrap(),
            3.1f64.powi(2) + 2.5f64.powi(2),
            epsilon = 1e-9
        );

        let mean = center(&[paris, lyon]).unwrap();
        assert_relative_eq!(mean.get(0).unwrap(), 47.3, epsilon = 1e-9);
    }

    #[test]
    fn test_boxed_observations() {
        let points: Vec<Box<dyn Observation>> = vec![
            Box::new(Coordinates::new(vec![1.0, 1.0])),
            Box::new(Coordinates::new(vec![3.0, 3.0])),
        ];

        let mean = center(&points).unwrap();
        assert_eq!(mean.values().as_slice(), &[2.0, 2.0]);
    }
}
