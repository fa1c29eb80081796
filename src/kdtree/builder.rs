use std::time::Instant;

use log::{debug, trace};
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};

use crate::error::Result;
use crate::kdtree::split::select_dimension;
use crate::kdtree::traversal::Node;
use crate::kdtree::{KDArray, KDTree, SplitMethod};
use crate::point::Point;
use crate::r#type::IndexableNum;

/// Arrays with at least this many points build their two subtrees in parallel.
#[cfg(feature = "rayon")]
const PARALLEL_MIN_ITEMS: usize = 2048;

/// A builder to create a [`KDTree`].
///
/// ```
/// use feature_kdtree::kdtree::{KDArray, KDTreeBuilder, SplitMethod};
/// use feature_kdtree::Point;
///
/// let points = vec![
///     Point::try_new([1., 60., -5.5], 0).unwrap(),
///     Point::try_new([2., 80., 4.5], 1).unwrap(),
///     Point::try_new([9., 140.5, 7.5], 2).unwrap(),
/// ];
/// let array = KDArray::try_new(&points).unwrap();
/// let tree = KDTreeBuilder::new(SplitMethod::Incremental).finish(array).unwrap();
/// assert_eq!(tree.root().dimension(), Some(0));
/// assert_eq!(tree.num_items(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct KDTreeBuilder {
    split_method: SplitMethod,
    rng: SmallRng,
}

impl KDTreeBuilder {
    /// Create a new builder with the provided split method and an entropy-seeded random source.
    pub fn new(split_method: SplitMethod) -> Self {
        Self::new_with_rng(split_method, SmallRng::from_entropy())
    }

    /// Create a new builder whose random source is seeded with `seed`.
    ///
    /// Trees built with [`SplitMethod::Random`] and the same seed are identical.
    pub fn new_with_seed(split_method: SplitMethod, seed: u64) -> Self {
        Self::new_with_rng(split_method, SmallRng::seed_from_u64(seed))
    }

    /// Create a new builder drawing random split dimensions from `rng`.
    pub fn new_with_rng(split_method: SplitMethod, rng: SmallRng) -> Self {
        Self { split_method, rng }
    }

    /// The split method used by [`KDTreeBuilder::finish`].
    pub fn split_method(&self) -> SplitMethod {
        self.split_method
    }

    /// Copy `points` into a [`KDArray`] and build a tree from it.
    pub fn try_build<N: IndexableNum>(self, points: &[Point<N>]) -> Result<KDTree<N>> {
        let array = KDArray::try_new(points)?;
        self.finish(array)
    }

    /// Consume this builder and `array`, recursively splitting the array into a KDTree.
    ///
    /// On error nothing built so far is kept.
    pub fn finish<N: IndexableNum>(mut self, array: KDArray<N>) -> Result<KDTree<N>> {
        let num_items = array.len();
        let dimension = array.dimension();
        debug!(
            "building k-d tree over {} {} points of dimension {} ({})",
            num_items,
            N::TYPE_NAME,
            dimension,
            self.split_method
        );

        let start = Instant::now();
        let root = build(array, self.split_method, None, &mut self.rng)?;
        debug!(
            "built k-d tree with depth {} in {:?}",
            root.depth(),
            start.elapsed()
        );

        Ok(KDTree {
            root,
            num_items,
            dimension,
            split_method: self.split_method,
        })
    }
}

impl Default for KDTreeBuilder {
    fn default() -> Self {
        Self::new(SplitMethod::default())
    }
}

fn build<N: IndexableNum>(
    array: KDArray<N>,
    method: SplitMethod,
    previous_dimension: Option<usize>,
    rng: &mut SmallRng,
) -> Result<Node<N>> {
    let array = match array.into_leaf() {
        Ok(point) => return Ok(Node::Leaf(point)),
        Err(array) => array,
    };

    let dimension = select_dimension(method, &array, previous_dimension, rng);
    let median = array.median(dimension)?;
    trace!(
        "splitting {} points on dimension {} at {:?}",
        array.len(),
        dimension,
        median
    );

    let (left, right) = array.split_in_halves(dimension)?;
    drop(array);

    // Own generator for the right subtree, so sequential and parallel builds agree
    let mut right_rng = SmallRng::seed_from_u64(rng.next_u64());

    #[cfg(feature = "rayon")]
    let (left, right) = if left.len() + right.len() >= PARALLEL_MIN_ITEMS {
        let (left, right) = rayon::join(
            || build(left, method, Some(dimension), rng),
            || build(right, method, Some(dimension), &mut right_rng),
        );
        (left?, right?)
    } else {
        let left = build(left, method, Some(dimension), rng)?;
        (left, build(right, method, Some(dimension), &mut right_rng)?)
    };

    // The right half is only built once the left half succeeded
    #[cfg(not(feature = "rayon"))]
    let (left, right) = {
        let left = build(left, method, Some(dimension), rng)?;
        (left, build(right, method, Some(dimension), &mut right_rng)?)
    };

    Ok(Node::Inner {
        dimension,
        median,
        left: Box::new(left),
        right: Box::new(right),
    })
}
