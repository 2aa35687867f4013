//! Graph - undirected simple graphs over indexed objects
//!
//! Every graph produced by the workspace uses this one representation:
//! vertices `0..n` (vertex `i` is input object `i`), an unordered edge set
//! without self loops or duplicates, and optional named per-vertex
//! attribute columns such as `is_border` or `position`.
//!
//! Edges are stored normalized as `(lo, hi)` with `lo < hi`, so iteration
//! order is deterministic.

use crate::error::{Error, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::ops::Range;

/// A per-vertex attribute column.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValues {
    /// Boolean flags
    Bool(Vec<bool>),
    /// Scalar values
    Float(Vec<f64>),
    /// 2-D positions
    Point(Vec<(f64, f64)>),
}

impl AttributeValues {
    /// Number of values in the column.
    pub fn len(&self) -> usize {
        match self {
            AttributeValues::Bool(v) => v.len(),
            AttributeValues::Float(v) => v.len(),
            AttributeValues::Point(v) => v.len(),
        }
    }

    /// Check if the column is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn drain_range(&mut self, range: Range<usize>) {
        match self {
            AttributeValues::Bool(v) => {
                v.drain(range);
            }
            AttributeValues::Float(v) => {
                v.drain(range);
            }
            AttributeValues::Point(v) => {
                v.drain(range);
            }
        }
    }
}

/// Undirected simple graph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graph {
    vertex_count: usize,
    edges: BTreeSet<(usize, usize)>,
    attributes: BTreeMap<String, AttributeValues>,
}

impl Graph {
    /// Create a graph with `vertex_count` isolated vertices.
    pub fn new(vertex_count: usize) -> Self {
        Self {
            vertex_count,
            ..Self::default()
        }
    }

    /// Create a graph from an edge list.
    ///
    /// Duplicate edges (in either orientation) collapse into one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SelfLoop`] for an edge `(i, i)` and
    /// [`Error::IndexOutOfBounds`] for an endpoint `>= vertex_count`.
    pub fn from_edges<I>(vertex_count: usize, edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut g = Self::new(vertex_count);
        for (a, b) in edges {
            g.add_edge(a, b)?;
        }
        Ok(g)
    }

    /// Get the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Get the number of edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Add the undirected edge `{a, b}`.
    ///
    /// Returns `true` if the edge was not present before.
    ///
    /// # Errors
    ///
    /// See [`Graph::from_edges`].
    pub fn add_edge(&mut self, a: usize, b: usize) -> Result<bool> {
        if a == b {
            return Err(Error::SelfLoop(a));
        }
        let hi = a.max(b);
        if hi >= self.vertex_count {
            return Err(Error::IndexOutOfBounds {
                index: hi,
                len: self.vertex_count,
            });
        }
        Ok(self.edges.insert((a.min(b), hi)))
    }

    /// Check whether `{a, b}` is an edge.
    pub fn has_edge(&self, a: usize, b: usize) -> bool {
        self.edges.contains(&(a.min(b), a.max(b)))
    }

    /// Iterate over edges as `(lo, hi)` pairs in ascending order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.edges.iter().copied()
    }

    /// Collect the neighbors of `v` in ascending order.
    pub fn neighbors(&self, v: usize) -> Vec<usize> {
        let mut out: Vec<usize> = self
            .edges
            .iter()
            .filter_map(|&(a, b)| {
                if a == v {
                    Some(b)
                } else if b == v {
                    Some(a)
                } else {
                    None
                }
            })
            .collect();
        out.sort_unstable();
        out
    }

    /// Get the degree of `v`.
    pub fn degree(&self, v: usize) -> usize {
        self.edges.iter().filter(|&&(a, b)| a == v || b == v).count()
    }

    /// Attach a named attribute column, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AttributeLength`] if the column does not have one
    /// value per vertex.
    pub fn set_attribute(&mut self, name: &str, values: AttributeValues) -> Result<()> {
        if values.len() != self.vertex_count {
            return Err(Error::AttributeLength {
                name: name.to_string(),
                len: values.len(),
                expected: self.vertex_count,
            });
        }
        self.attributes.insert(name.to_string(), values);
        Ok(())
    }

    /// Look up an attribute column by name.
    pub fn attribute(&self, name: &str) -> Option<&AttributeValues> {
        self.attributes.get(name)
    }

    /// Names of the attached attribute columns, sorted.
    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }

    /// Delete a contiguous range of vertices.
    ///
    /// Edges touching a deleted vertex are removed; vertices above the
    /// range are renumbered down by `range.len()`. Attribute columns are
    /// shortened to match.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if the range ends past the last
    /// vertex.
    pub fn delete_vertices(&mut self, range: Range<usize>) -> Result<()> {
        if range.end > self.vertex_count || range.start > range.end {
            return Err(Error::IndexOutOfBounds {
                index: range.end,
                len: self.vertex_count,
            });
        }
        let removed = range.len();
        let shift = |v: usize| if v >= range.end { v - removed } else { v };
        self.edges = self
            .edges
            .iter()
            .filter(|&&(a, b)| !range.contains(&a) && !range.contains(&b))
            .map(|&(a, b)| (shift(a), shift(b)))
            .collect();
        for column in self.attributes.values_mut() {
            column.drain_range(range.clone());
        }
        self.vertex_count -= removed;
        Ok(())
    }
}
