//! Fixed-dimension feature vectors.

use crate::error::{invalid_argument, Result};
use crate::r#type::IndexableNum;

/// A feature vector together with the index of the image it was extracted from.
///
/// Two points are equal when they have the same image index and the same coordinates.
///
/// ```
/// use feature_kdtree::Point;
///
/// let a = Point::try_new(vec![1., 2.], 0).unwrap();
/// let b = Point::try_new(vec![4., 6.], 1).unwrap();
/// assert_eq!(a.squared_distance(&b).unwrap(), 25.);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Point<N: IndexableNum> {
    coords: Box<[N]>,
    index: usize,
}

impl<N: IndexableNum> Point<N> {
    /// Create a new point. Fails if `coords` is empty.
    pub fn try_new(coords: impl Into<Vec<N>>, index: usize) -> Result<Self> {
        let coords = coords.into();
        if coords.is_empty() {
            return invalid_argument("a point needs at least one coordinate");
        }
        Ok(Self {
            coords: coords.into_boxed_slice(),
            index,
        })
    }

    /// The number of coordinates of this point.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.coords.len()
    }

    /// The image index this point belongs to.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// All coordinates of this point.
    #[inline]
    pub fn coords(&self) -> &[N] {
        &self.coords
    }

    /// The coordinate on `axis`.
    pub fn coord(&self, axis: usize) -> Result<N> {
        match self.coords.get(axis) {
            Some(value) => Ok(*value),
            None => invalid_argument(format!(
                "axis {} out of range for a point of dimension {}",
                axis,
                self.dimension()
            )),
        }
    }

    /// Unchecked variant of [`Point::coord`] for callers that already validated `axis`.
    #[inline]
    pub(crate) fn axis(&self, axis: usize) -> N {
        self.coords[axis]
    }

    /// Squared euclidean distance to another point of the same dimension.
    pub fn squared_distance(&self, other: &Point<N>) -> Result<f64> {
        if self.dimension() != other.dimension() {
            return invalid_argument(format!(
                "cannot measure distance between dimensions {} and {}",
                self.dimension(),
                other.dimension()
            ));
        }
        Ok(sq_dist(&self.coords, &other.coords))
    }
}

#[inline]
pub(crate) fn sq_dist<N: IndexableNum>(a: &[N], b: &[N]) -> f64 {
    a.iter().zip(b).fold(0., |acc, (&x, &y)| {
        let d = x.as_f64() - y.as_f64();
        acc + d * d
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn rejects_empty_point() {
        assert!(Point::<f64>::try_new(vec![], 3).is_err());
    }

    #[test]
    fn accessors() {
        let p = Point::try_new([1.5, -2.0, 7.25], 4).unwrap();
        assert_eq!(p.dimension(), 3);
        assert_eq!(p.index(), 4);
        assert_eq!(p.coord(2).unwrap(), 7.25);
        assert!(p.coord(3).is_err());
    }

    #[test]
    fn equality_includes_index() {
        let a = Point::try_new([1, 2], 0).unwrap();
        let b = Point::try_new([1, 2], 1).unwrap();
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn integer_distance_does_not_overflow() {
        let a = Point::try_new([i32::MIN, 0], 0).unwrap();
        let b = Point::try_new([i32::MAX, 0], 1).unwrap();
        let d = u32::MAX as f64;
        assert_eq!(a.squared_distance(&b).unwrap(), d * d);
    }

    #[test]
    fn distance_requires_same_dimension() {
        let a = Point::try_new([1., 1., 1.], 0).unwrap();
        let b = Point::try_new([2., 3., 4.], 0).unwrap();
        let c = Point::try_new([2., 3.], 0).unwrap();
        assert_eq!(a.squared_distance(&b).unwrap(), 14.);
        assert!(a.squared_distance(&c).is_err());
    }
}
