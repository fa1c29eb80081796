//! Ranking indexed images by how often their features are among the nearest neighbors of a
//! query image's features.

use crate::error::{invalid_argument, Result};
use crate::kdtree::{BoundedQueue, KDTreeIndex};
use crate::point::Point;
use crate::r#type::IndexableNum;

/// Parameters of [`rank_similar_images`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchParameters {
    /// Neighbors collected per query feature.
    pub knn: usize,
    /// Number of indexed images. Every indexed point must carry an image index below this.
    pub num_images: usize,
    /// Number of image indices to return.
    pub num_similar_images: usize,
}

impl SearchParameters {
    fn validate(&self) -> Result<()> {
        if self.knn == 0 {
            return invalid_argument("knn must be positive");
        }
        if self.num_images == 0 {
            return invalid_argument("num_images must be positive");
        }
        if self.num_similar_images == 0 {
            return invalid_argument("num_similar_images must be positive");
        }
        Ok(())
    }
}

impl Default for SearchParameters {
    fn default() -> Self {
        Self {
            knn: 1,
            num_images: 1,
            num_similar_images: 1,
        }
    }
}

/// Find the images most similar to a query image.
///
/// Every feature of the query casts one vote for each image owning one of its `knn` nearest
/// indexed points. Images are ranked by votes, ties going to the lower image index, and the
/// first `num_similar_images` (at most `num_images`) indices are returned.
///
/// ```
/// use feature_kdtree::kdtree::KDTreeBuilder;
/// use feature_kdtree::similar::{rank_similar_images, SearchParameters};
/// use feature_kdtree::Point;
///
/// let indexed = vec![
///     Point::try_new([0., 0.], 0).unwrap(),
///     Point::try_new([10., 10.], 1).unwrap(),
///     Point::try_new([10., 11.], 1).unwrap(),
/// ];
/// let tree = KDTreeBuilder::default().try_build(&indexed).unwrap();
/// let query = vec![
///     Point::try_new([9., 9.], 0).unwrap(),
///     Point::try_new([11., 12.], 0).unwrap(),
/// ];
/// let params = SearchParameters {
///     knn: 1,
///     num_images: 2,
///     num_similar_images: 2,
/// };
/// assert_eq!(rank_similar_images(&tree, &query, &params).unwrap(), vec![1, 0]);
/// ```
pub fn rank_similar_images<N: IndexableNum, T: KDTreeIndex<N>>(
    tree: &T,
    query_features: &[Point<N>],
    params: &SearchParameters,
) -> Result<Vec<usize>> {
    params.validate()?;
    if query_features.is_empty() {
        return invalid_argument("the query image has no features");
    }

    let mut hits = Vec::new();
    hits.try_reserve_exact(params.num_images)?;
    hits.resize(params.num_images, 0usize);

    let mut queue = BoundedQueue::try_new(params.knn)?;
    for feature in query_features {
        queue.clear();
        tree.nearest_neighbors_into(feature, &mut queue)?;
        for candidate in queue.iter() {
            match hits.get_mut(candidate.index) {
                Some(count) => *count += 1,
                None => {
                    return invalid_argument(format!(
                        "image index {} out of range for {} images",
                        candidate.index, params.num_images
                    ))
                }
            }
        }
    }

    let mut ranked: Vec<usize> = (0..params.num_images).collect();
    // stable, so equal hit counts keep the lower image index first
    ranked.sort_by(|&a, &b| hits[b].cmp(&hits[a]));
    ranked.truncate(params.num_similar_images);
    Ok(ranked)
}
