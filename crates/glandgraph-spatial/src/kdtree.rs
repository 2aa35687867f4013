//! Two-dimensional k-d tree
//!
//! A balanced tree built by recursive median splits along the axis of
//! largest extent. Each node keeps the bounding box of its points so that
//! radius and pair queries can skip whole subtrees.

use crate::{SpatialError, SpatialResult};
use glandgraph_core::Pta;

/// Options for [`KdTree`] construction
#[derive(Debug, Clone)]
pub struct KdTreeOptions {
    /// Maximum number of points per leaf node
    pub leaf_size: usize,
}

impl Default for KdTreeOptions {
    fn default() -> Self {
        Self { leaf_size: 10 }
    }
}

impl KdTreeOptions {
    /// Create default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum leaf size (at least 1)
    pub fn with_leaf_size(mut self, leaf_size: usize) -> Self {
        self.leaf_size = leaf_size.max(1);
        self
    }
}

#[derive(Debug, Clone, Copy)]
enum NodeKind {
    Leaf,
    Split { left: usize, right: usize },
}

#[derive(Debug, Clone)]
struct Node {
    /// Range into `KdTree::order`
    start: usize,
    end: usize,
    lo: [f64; 2],
    hi: [f64; 2],
    kind: NodeKind,
}

impl Node {
    /// Squared distance from a point to this node's box
    fn dist2_to_point(&self, p: [f64; 2]) -> f64 {
        let mut d2 = 0.0;
        for k in 0..2 {
            let d = if p[k] < self.lo[k] {
                self.lo[k] - p[k]
            } else if p[k] > self.hi[k] {
                p[k] - self.hi[k]
            } else {
                0.0
            };
            d2 += d * d;
        }
        d2
    }

    /// Squared distance between the boxes of two nodes
    fn dist2_to_node(&self, other: &Node) -> f64 {
        let mut d2 = 0.0;
        for k in 0..2 {
            let d = (other.lo[k] - self.hi[k]).max(self.lo[k] - other.hi[k]).max(0.0);
            d2 += d * d;
        }
        d2
    }
}

/// Static k-d tree over a set of plane points
#[derive(Debug, Clone)]
pub struct KdTree {
    points: Vec<[f64; 2]>,
    /// Point indices, grouped so that every node covers a contiguous range
    order: Vec<usize>,
    nodes: Vec<Node>,
    options: KdTreeOptions,
}

impl KdTree {
    /// Build a tree with default options.
    pub fn new(points: &Pta) -> SpatialResult<Self> {
        Self::with_options(points, KdTreeOptions::default())
    }

    /// Build a tree.
    ///
    /// # Errors
    ///
    /// Returns [`SpatialError::InvalidInput`] if any coordinate is not
    /// finite.
    pub fn with_options(points: &Pta, options: KdTreeOptions) -> SpatialResult<Self> {
        if !points.is_finite() {
            return Err(SpatialError::InvalidInput(
                "point coordinates must be finite".to_string(),
            ));
        }

        let mut tree = KdTree {
            points: points.iter().map(|(x, y)| [x, y]).collect(),
            order: (0..points.len()).collect(),
            nodes: Vec::new(),
            options,
        };
        if !tree.points.is_empty() {
            tree.build(0, tree.points.len());
        }
        log::debug!(
            "k-d tree: {} points, {} nodes, leaf size {}",
            tree.points.len(),
            tree.nodes.len(),
            tree.options.leaf_size
        );
        Ok(tree)
    }

    /// Number of indexed points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if the tree holds no points
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Builds the node for `order[start..end]` and returns its id.
    fn build(&mut self, start: usize, end: usize) -> usize {
        let mut lo = [f64::INFINITY; 2];
        let mut hi = [f64::NEG_INFINITY; 2];
        for &i in &self.order[start..end] {
            for k in 0..2 {
                lo[k] = lo[k].min(self.points[i][k]);
                hi[k] = hi[k].max(self.points[i][k]);
            }
        }

        let id = self.nodes.len();
        self.nodes.push(Node {
            start,
            end,
            lo,
            hi,
            kind: NodeKind::Leaf,
        });

        let dim = if hi[0] - lo[0] >= hi[1] - lo[1] { 0 } else { 1 };
        // identical points cannot be separated
        if end - start <= self.options.leaf_size || hi[dim] <= lo[dim] {
            return id;
        }

        let mid = start + (end - start) / 2;
        let points = &self.points;
        self.order[start..end].select_nth_unstable_by(mid - start, |&a, &b| {
            points[a][dim].total_cmp(&points[b][dim])
        });

        let left = self.build(start, mid);
        let right = self.build(mid, end);
        self.nodes[id].kind = NodeKind::Split { left, right };
        id
    }

    #[inline]
    fn within(&self, a: usize, b: usize, r2: f64) -> bool {
        let dx = self.points[a][0] - self.points[b][0];
        let dy = self.points[a][1] - self.points[b][1];
        dx * dx + dy * dy <= r2
    }

    /// Indices of all points within `radius` of `(x, y)`, ascending.
    pub fn query_radius(&self, x: f64, y: f64, radius: f64) -> Vec<usize> {
        let mut found = Vec::new();
        if self.nodes.is_empty() || radius.is_nan() || radius < 0.0 {
            return found;
        }
        let p = [x, y];
        let r2 = radius * radius;
        let mut stack = vec![0];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id];
            if node.dist2_to_point(p) > r2 {
                continue;
            }
            match node.kind {
                NodeKind::Leaf => {
                    for &i in &self.order[node.start..node.end] {
                        let dx = self.points[i][0] - x;
                        let dy = self.points[i][1] - y;
                        if dx * dx + dy * dy <= r2 {
                            found.push(i);
                        }
                    }
                }
                NodeKind::Split { left, right } => {
                    stack.push(left);
                    stack.push(right);
                }
            }
        }
        found.sort_unstable();
        found
    }

    /// All unordered pairs `(i, j)`, `i < j`, at distance at most `radius`.
    ///
    /// Pairs are sorted and unique.
    pub fn query_pairs(&self, radius: f64) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        if self.nodes.is_empty() || radius.is_nan() || radius < 0.0 {
            return pairs;
        }
        let r2 = radius * radius;
        let mut stack = vec![(0, 0)];
        while let Some((a, b)) = stack.pop() {
            let (na, nb) = (&self.nodes[a], &self.nodes[b]);
            if na.dist2_to_node(nb) > r2 {
                continue;
            }
            match (na.kind, nb.kind) {
                (NodeKind::Leaf, NodeKind::Leaf) => {
                    self.leaf_pairs(na, nb, a == b, r2, &mut pairs);
                }
                (NodeKind::Split { left, right }, _) if a == b => {
                    stack.push((left, left));
                    stack.push((right, right));
                    stack.push((left, right));
                }
                (NodeKind::Split { left, right }, NodeKind::Leaf) => {
                    stack.push((left, b));
                    stack.push((right, b));
                }
                (_, NodeKind::Split { left, right }) => {
                    stack.push((a, left));
                    stack.push((a, right));
                }
            }
        }
        pairs.sort_unstable();
        pairs.dedup();
        pairs
    }

    fn leaf_pairs(
        &self,
        na: &Node,
        nb: &Node,
        same: bool,
        r2: f64,
        pairs: &mut Vec<(usize, usize)>,
    ) {
        let ia = &self.order[na.start..na.end];
        let ib = &self.order[nb.start..nb.end];
        for (k, &i) in ia.iter().enumerate() {
            let others = if same { &ia[k + 1..] } else { ib };
            for &j in others {
                if self.within(i, j, r2) {
                    pairs.push((i.min(j), i.max(j)));
                }
            }
        }
    }
}
