//! A point set that keeps, for each dimension, the point positions sorted by that dimension.

use std::cmp::Ordering;

use crate::error::{invalid_argument, Result};
use crate::point::Point;
use crate::r#type::IndexableNum;

/// An owned set of points together with a `dimension x len` table of sorted positions.
///
/// Row `d` of the table is a permutation of `0..len` that lists the stored points in
/// non-decreasing order of their `d`-th coordinate. Splitting an array filters every row instead
/// of sorting it again, so a split costs `O(len * dimension)`.
///
/// ```
/// use feature_kdtree::kdtree::KDArray;
/// use feature_kdtree::Point;
///
/// let points = vec![
///     Point::try_new([1., 2.], 0).unwrap(),
///     Point::try_new([123., 70.], 1).unwrap(),
///     Point::try_new([2., 7.], 2).unwrap(),
/// ];
/// let array = KDArray::try_new(&points).unwrap();
/// assert_eq!(array.spread(0).unwrap(), 122.);
/// assert_eq!(array.median(1).unwrap(), 7.);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct KDArray<N: IndexableNum> {
    points: Vec<Point<N>>,
    /// Row-major sorted positions, one row of `points.len()` entries per dimension.
    order: Vec<usize>,
    dimension: usize,
}

/// The two halves produced by [`KDArray::split`].
///
/// `right` is `None` only when the split array held a single point.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitResult<N: IndexableNum> {
    /// The `ceil(len / 2)` points with the smallest values on the split coordinate.
    pub left: KDArray<N>,
    /// The remaining `floor(len / 2)` points.
    pub right: Option<KDArray<N>>,
}

impl<N: IndexableNum> KDArray<N> {
    /// Copy `points` into a new array and sort their positions on every dimension.
    ///
    /// Fails when `points` is empty or when the points do not share one dimension.
    pub fn try_new(points: &[Point<N>]) -> Result<Self> {
        let Some(first) = points.first() else {
            return invalid_argument("cannot index an empty point set");
        };
        let dimension = first.dimension();
        if let Some(p) = points.iter().find(|p| p.dimension() != dimension) {
            return invalid_argument(format!(
                "point with image index {} has dimension {}, expected {}",
                p.index(),
                p.dimension(),
                dimension
            ));
        }

        let len = points.len();
        let mut owned = Vec::new();
        owned.try_reserve_exact(len)?;
        owned.extend(points.iter().cloned());

        let mut order = Vec::new();
        order.try_reserve_exact(table_len(len, dimension)?)?;
        for axis in 0..dimension {
            let start = order.len();
            order.extend(0..len);
            order[start..].sort_by(|&a, &b| compare_axis(&owned, axis, a, b));
        }

        Ok(Self {
            points: owned,
            order,
            dimension,
        })
    }

    /// A deep copy that reports allocation failure instead of aborting.
    pub fn try_clone(&self) -> Result<Self> {
        let mut points = Vec::new();
        points.try_reserve_exact(self.points.len())?;
        points.extend(self.points.iter().cloned());

        let mut order = Vec::new();
        order.try_reserve_exact(self.order.len())?;
        order.extend_from_slice(&self.order);

        Ok(Self {
            points,
            order,
            dimension: self.dimension,
        })
    }

    /// The number of points in this array.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`: an array holds at least one point.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The dimension shared by all points.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// The stored points.
    pub fn points(&self) -> &[Point<N>] {
        &self.points
    }

    /// Positions of the stored points, sorted by their `coordinate` value.
    pub fn order(&self, coordinate: usize) -> Result<&[usize]> {
        self.check_coordinate(coordinate)?;
        Ok(self.row(coordinate))
    }

    /// Split into the lower and upper halves on `coordinate`.
    ///
    /// The left half receives the `ceil(len / 2)` points that come first in the sorted order of
    /// `coordinate`, the right half the rest. Every sorted row of both halves is derived from
    /// the rows of this array, which is left untouched.
    pub fn split(&self, coordinate: usize) -> Result<SplitResult<N>> {
        self.check_coordinate(coordinate)?;

        let len = self.len();
        if len == 1 {
            return Ok(SplitResult {
                left: self.try_clone()?,
                right: None,
            });
        }

        let (left, right) = self.split_in_halves(coordinate)?;
        Ok(SplitResult {
            left,
            right: Some(right),
        })
    }

    /// Split an array of at least two points on a coordinate that was already checked.
    pub(crate) fn split_in_halves(&self, coordinate: usize) -> Result<(Self, Self)> {
        debug_assert!(self.len() > 1 && coordinate < self.dimension);

        let len = self.len();
        let left_len = len.div_ceil(2);
        let mut left = SplitBuilder::try_new(left_len, self.dimension)?;
        let mut right = SplitBuilder::try_new(len - left_len, self.dimension)?;

        // Original position -> (side, position within that side)
        let mut mapping = Vec::new();
        mapping.try_reserve_exact(len)?;
        mapping.resize(len, (Side::Left, 0));

        for (rank, &pos) in self.row(coordinate).iter().enumerate() {
            let (side, builder) = if rank < left_len {
                (Side::Left, &mut left)
            } else {
                (Side::Right, &mut right)
            };
            mapping[pos] = (side, builder.points.len());
            builder.points.push(self.points[pos].clone());
        }

        for axis in 0..self.dimension {
            for &pos in self.row(axis) {
                match mapping[pos] {
                    (Side::Left, new_pos) => left.order.push(new_pos),
                    (Side::Right, new_pos) => right.order.push(new_pos),
                }
            }
        }

        Ok((left.finish(self.dimension), right.finish(self.dimension)))
    }

    /// Difference between the largest and smallest value on `coordinate`, computed in `f64`.
    pub fn spread(&self, coordinate: usize) -> Result<f64> {
        self.check_coordinate(coordinate)?;
        Ok(self.spread_unchecked(coordinate))
    }

    /// The lower median on `coordinate`, i.e. the value at sorted position `(len - 1) / 2`.
    pub fn median(&self, coordinate: usize) -> Result<N> {
        self.check_coordinate(coordinate)?;
        let pos = self.row(coordinate)[(self.len() - 1) / 2];
        Ok(self.points[pos].axis(coordinate))
    }

    /// The dimension with the largest spread. Ties keep the lowest dimension.
    pub fn max_spread_dimension(&self) -> usize {
        let mut best = 0;
        let mut best_spread = self.spread_unchecked(0);
        for axis in 1..self.dimension {
            let spread = self.spread_unchecked(axis);
            if spread > best_spread {
                best = axis;
                best_spread = spread;
            }
        }
        best
    }

    /// Take the point out of a single-point array, or give the array back.
    pub(crate) fn into_leaf(self) -> std::result::Result<Point<N>, Self> {
        let Self {
            points,
            order,
            dimension,
        } = self;
        match <[Point<N>; 1]>::try_from(points) {
            Ok([point]) => Ok(point),
            Err(points) => Err(Self {
                points,
                order,
                dimension,
            }),
        }
    }

    #[inline]
    fn row(&self, axis: usize) -> &[usize] {
        let len = self.len();
        &self.order[axis * len..(axis + 1) * len]
    }

    #[inline]
    fn spread_unchecked(&self, axis: usize) -> f64 {
        let row = self.row(axis);
        let min = self.points[row[0]].axis(axis).as_f64();
        let max = self.points[row[row.len() - 1]].axis(axis).as_f64();
        max - min
    }

    fn check_coordinate(&self, coordinate: usize) -> Result<()> {
        if coordinate >= self.dimension {
            return invalid_argument(format!(
                "coordinate {} out of range for dimension {}",
                coordinate, self.dimension
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
enum Side {
    Left,
    Right,
}

/// One half of a split in progress. All buffers are reserved up front, so filling it cannot
/// fail; dropping it discards everything.
struct SplitBuilder<N: IndexableNum> {
    points: Vec<Point<N>>,
    order: Vec<usize>,
}

impl<N: IndexableNum> SplitBuilder<N> {
    fn try_new(len: usize, dimension: usize) -> Result<Self> {
        let mut points = Vec::new();
        points.try_reserve_exact(len)?;
        let mut order = Vec::new();
        order.try_reserve_exact(table_len(len, dimension)?)?;
        Ok(Self { points, order })
    }

    fn finish(self, dimension: usize) -> KDArray<N> {
        debug_assert_eq!(self.order.len(), self.points.len() * dimension);
        KDArray {
            points: self.points,
            order: self.order,
            dimension,
        }
    }
}

#[inline]
fn compare_axis<N: IndexableNum>(points: &[Point<N>], axis: usize, a: usize, b: usize) -> Ordering {
    points[a]
        .axis(axis)
        .partial_cmp(&points[b].axis(axis))
        .unwrap_or(Ordering::Equal)
}

fn table_len(len: usize, dimension: usize) -> Result<usize> {
    match len.checked_mul(dimension) {
        Some(table_len) => Ok(table_len),
        None => invalid_argument(format!(
            "{} points of dimension {} overflow the order table",
            len, dimension
        )),
    }
}
