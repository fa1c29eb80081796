use crate::kdtree::traversal::{Leaves, Node};
use crate::kdtree::SplitMethod;
use crate::r#type::IndexableNum;

/// An owned, immutable k-d tree with one point per leaf.
///
/// Usually this will be created via [`KDTreeBuilder`][crate::kdtree::KDTreeBuilder].
#[derive(Debug, Clone, PartialEq)]
pub struct KDTree<N: IndexableNum> {
    pub(crate) root: Node<N>,
    pub(crate) num_items: usize,
    pub(crate) dimension: usize,
    pub(crate) split_method: SplitMethod,
}

impl<N: IndexableNum> KDTree<N> {
    /// The number of points stored in the leaves.
    #[inline]
    pub fn num_items(&self) -> usize {
        self.num_items
    }

    /// The dimension of the indexed points.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// The split method this tree was built with.
    #[inline]
    pub fn split_method(&self) -> SplitMethod {
        self.split_method
    }

    /// Access the root node of the KDTree for manual traversal.
    #[inline]
    pub fn root(&self) -> &Node<N> {
        &self.root
    }

    /// Iterate over every indexed point, in leaf order.
    pub fn leaves(&self) -> Leaves<'_, N> {
        self.root.leaves()
    }

    /// The number of leaf nodes. Always equal to [`KDTree::num_items`].
    pub fn num_leaves(&self) -> usize {
        self.num_items
    }

    /// The number of inner nodes, `num_items - 1`.
    pub fn num_inner_nodes(&self) -> usize {
        self.num_items - 1
    }

    /// The number of edges on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Consume the tree, returning its root node.
    pub fn into_root(self) -> Node<N> {
        self.root
    }
}
