//! Utilities to traverse the KDTree structure.

use crate::point::Point;
use crate::r#type::IndexableNum;

/// A node of a [`KDTree`][crate::kdtree::KDTree].
#[derive(Debug, Clone, PartialEq)]
pub enum Node<N: IndexableNum> {
    /// A leaf holding exactly one point.
    Leaf(Point<N>),
    /// A split of the points below this node.
    Inner {
        /// The dimension the children are split over.
        dimension: usize,
        /// The lower median of `dimension`, taken before the split.
        median: N,
        /// Points whose `dimension` value ranks in the lower half.
        left: Box<Node<N>>,
        /// Points whose `dimension` value ranks in the upper half.
        right: Box<Node<N>>,
    },
}

impl<N: IndexableNum> Node<N> {
    /// Returns `true` if this is a leaf node without children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    /// Returns `true` if this is an intermediate node with children.
    #[inline]
    pub fn is_parent(&self) -> bool {
        !self.is_leaf()
    }

    /// The split dimension, `None` for leaves.
    pub fn dimension(&self) -> Option<usize> {
        match self {
            Node::Inner { dimension, .. } => Some(*dimension),
            Node::Leaf(_) => None,
        }
    }

    /// The median value of the split dimension, `None` for leaves.
    pub fn median_value(&self) -> Option<N> {
        match self {
            Node::Inner { median, .. } => Some(*median),
            Node::Leaf(_) => None,
        }
    }

    /// The child node representing the lower half.
    pub fn left_child(&self) -> Option<&Node<N>> {
        match self {
            Node::Inner { left, .. } => Some(left.as_ref()),
            Node::Leaf(_) => None,
        }
    }

    /// The child node representing the upper half.
    pub fn right_child(&self) -> Option<&Node<N>> {
        match self {
            Node::Inner { right, .. } => Some(right.as_ref()),
            Node::Leaf(_) => None,
        }
    }

    /// The point stored in a leaf, `None` for inner nodes.
    pub fn leaf_point(&self) -> Option<&Point<N>> {
        match self {
            Node::Leaf(point) => Some(point),
            Node::Inner { .. } => None,
        }
    }

    /// Iterate over the leaf points below this node, left to right.
    pub fn leaves(&self) -> Leaves<'_, N> {
        Leaves { stack: vec![self] }
    }

    /// The number of edges on the longest path from this node to a leaf.
    pub fn depth(&self) -> usize {
        match self {
            Node::Leaf(_) => 0,
            Node::Inner { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }
}

/// Depth-first iterator over the leaf points of a subtree.
#[derive(Debug, Clone)]
pub struct Leaves<'a, N: IndexableNum> {
    stack: Vec<&'a Node<N>>,
}

impl<'a, N: IndexableNum> Iterator for Leaves<'a, N> {
    type Item = &'a Point<N>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            match node {
                Node::Leaf(point) => return Some(point),
                Node::Inner { left, right, .. } => {
                    // Note: pushed in backwards order to what gets popped
                    self.stack.push(right);
                    self.stack.push(left);
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn leaf(x: f64, index: usize) -> Box<Node<f64>> {
        Box::new(Node::Leaf(Point::try_new([x], index).unwrap()))
    }

    #[test]
    fn accessors_follow_variant() {
        let node = Node::Inner {
            dimension: 0,
            median: 1.,
            left: leaf(1., 0),
            right: leaf(2., 1),
        };
        assert!(node.is_parent());
        assert_eq!(node.dimension(), Some(0));
        assert_eq!(node.median_value(), Some(1.));
        assert!(node.leaf_point().is_none());

        let left = node.left_child().unwrap();
        assert!(left.is_leaf());
        assert_eq!(left.dimension(), None);
        assert_eq!(left.median_value(), None);
        assert!(left.left_child().is_none());
        assert!(left.right_child().is_none());
        assert_eq!(left.leaf_point().unwrap().index(), 0);
        assert_eq!(node.right_child().unwrap().leaf_point().unwrap().index(), 1);
    }

    #[test]
    fn leaves_in_order() {
        let node = Node::Inner {
            dimension: 0,
            median: 2.,
            left: Box::new(Node::Inner {
                dimension: 0,
                median: 1.,
                left: leaf(1., 0),
                right: leaf(2., 1),
            }),
            right: leaf(3., 2),
        };
        let indices: Vec<_> = node.leaves().map(|p| p.index()).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(node.depth(), 2);
    }
}
