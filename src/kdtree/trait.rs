use tinyvec::TinyVec;

use crate::error::{invalid_argument, Result};
use crate::kdtree::{BoundedQueue, Candidate, KDTree, Node};
use crate::point::{sq_dist, Point};
use crate::r#type::IndexableNum;

/// A trait for searching and accessing data out of a KDTree.
pub trait KDTreeIndex<N: IndexableNum>: Sized {
    /// Access the root node of this tree
    fn root(&self) -> &Node<N>;

    /// The number of items in this KDTree
    fn num_items(&self) -> usize;

    /// The dimension of the indexed points
    fn dimension(&self) -> usize;

    /// Search the tree for the points closest to `query`, offering every visited leaf to
    /// `queue`.
    ///
    /// Candidates already in `queue` are kept, so one queue can collect the neighbors of
    /// several trees. A subtree is skipped once `queue` is full and the squared distance from
    /// `query` to the splitting plane exceeds the worst kept distance.
    fn nearest_neighbors_into(&self, query: &Point<N>, queue: &mut BoundedQueue) -> Result<()> {
        if query.dimension() != self.dimension() {
            return invalid_argument(format!(
                "query of dimension {} against a tree of dimension {}",
                query.dimension(),
                self.dimension()
            ));
        }
        let q = query.coords();

        // Use TinyVec to avoid heap allocations
        // Each entry is a subtree and the squared distance from the query to its region.
        let mut stack: TinyVec<[Option<(&Node<N>, f64)>; 32]> = TinyVec::new();
        stack.push(Some((self.root(), 0.)));

        while let Some(entry) = stack.pop() {
            let Some((mut node, bound)) = entry else {
                continue;
            };
            if queue.is_full() && queue.max_distance().is_some_and(|max| bound > max) {
                continue;
            }

            // descend to the nearest leaf, deferring the far halves
            loop {
                match node {
                    Node::Leaf(point) => {
                        queue.push(Candidate {
                            index: point.index(),
                            distance: sq_dist(point.coords(), q),
                        });
                        break;
                    }
                    Node::Inner {
                        dimension,
                        median,
                        left,
                        right,
                    } => {
                        let value = q[*dimension];
                        let (near, far) = if value <= *median {
                            (left, right)
                        } else {
                            (right, left)
                        };
                        let diff = value.as_f64() - median.as_f64();
                        stack.push(Some((far.as_ref(), diff * diff)));
                        node = near.as_ref();
                    }
                }
            }
        }

        Ok(())
    }

    /// Search the tree for the `k` points closest to `query`.
    ///
    /// Returns at most `k` candidates, closest first. Equally distant candidates are ordered by
    /// lower image index.
    ///
    /// ```
    /// use feature_kdtree::kdtree::{KDTreeBuilder, KDTreeIndex, SplitMethod};
    /// use feature_kdtree::Point;
    ///
    /// let points = vec![
    ///     Point::try_new([0., 0.], 0).unwrap(),
    ///     Point::try_new([5., 5.], 1).unwrap(),
    ///     Point::try_new([1., 1.], 2).unwrap(),
    /// ];
    /// let tree = KDTreeBuilder::new(SplitMethod::MaxSpread)
    ///     .try_build(&points)
    ///     .unwrap();
    /// let query = Point::try_new([0.5, 0.], 0).unwrap();
    /// let neighbors = tree.nearest_neighbors(&query, 2).unwrap();
    /// let indices: Vec<_> = neighbors.iter().map(|c| c.index).collect();
    /// assert_eq!(indices, vec![0, 2]);
    /// ```
    fn nearest_neighbors(&self, query: &Point<N>, k: usize) -> Result<Vec<Candidate>> {
        let mut queue = BoundedQueue::try_new(k)?;
        self.nearest_neighbors_into(query, &mut queue)?;
        Ok(queue.into_sorted_vec())
    }

    /// The single closest point to `query`.
    fn nearest_neighbor(&self, query: &Point<N>) -> Result<Candidate> {
        let mut neighbors = self.nearest_neighbors(query, 1)?;
        match neighbors.pop() {
            Some(candidate) => Ok(candidate),
            None => invalid_argument("nearest neighbor search over an empty tree"),
        }
    }
}

impl<N: IndexableNum> KDTreeIndex<N> for KDTree<N> {
    fn root(&self) -> &Node<N> {
        &self.root
    }

    fn num_items(&self) -> usize {
        self.num_items
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}
