//! Unweighted traversals: edge weights are ignored and every edge counts as one step.

use std::cmp::Reverse;

use rustc_hash::FxHashMap;

use crate::{EdgeId, Graph, GraphError, VertexId};

/// Maps every vertex reached by a traversal to the edge used to reach it (None for the origin).
pub type SearchTree = FxHashMap<VertexId, Option<EdgeId>>;

/// Maps every vertex reached by a breadth-first search to the edge used to reach it and to its
/// level, that is the number of steps from the origin.
pub type SearchLevels = FxHashMap<VertexId, (Option<EdgeId>, usize)>;

impl<V, E> Graph<V, E> {
    /// Explores all the vertices reachable from the origin going as deep as possible along each
    /// branch before backtracking.
    pub fn depth_first_search(&self, origin: VertexId) -> Result<SearchTree, GraphError> {
        let edges = self
            .vertex_edges(origin)
            .ok_or(GraphError::VertexNotFound(origin))?;

        let mut marked = SearchTree::from_iter([(origin, None)]);
        let mut stack = vec![edges];

        while let Some(edges) = stack.last_mut() {
            match edges.next() {
                Some((edge, w)) if !marked.contains_key(&w) => {
                    marked.insert(w, Some(edge));
                    stack.extend(self.vertex_edges(w));
                }
                Some(_) => {}
                None => {
                    stack.pop();
                }
            }
        }

        Ok(marked)
    }

    /// Explores all the vertices reachable from the origin level by level.
    pub fn breadth_first_search(&self, origin: VertexId) -> Result<SearchTree, GraphError> {
        let levels = self.search_levels(origin)?;
        Ok(levels
            .into_iter()
            .map(|(vertex, (edge, _))| (vertex, edge))
            .collect())
    }

    /// Breadth-first search that also records the level at which every vertex is found.
    pub fn search_levels(&self, origin: VertexId) -> Result<SearchLevels, GraphError> {
        if !self.contains_vertex(origin) {
            return Err(GraphError::VertexNotFound(origin));
        }

        let mut marked = SearchLevels::from_iter([(origin, (None, 0))]);
        let mut current = vec![origin];
        let mut level = 0;

        while !current.is_empty() {
            level += 1;
            let mut next = vec![];

            for &v in &current {
                for (edge, w) in self.vertex_edges(v).into_iter().flatten() {
                    if !marked.contains_key(&w) {
                        marked.insert(w, (Some(edge), level));
                        next.push(w);
                    }
                }
            }

            current = next;
        }

        Ok(marked)
    }

    /// Gets the sum of the number of steps needed to reach every vertex from the origin.
    pub fn total_steps(&self, origin: VertexId) -> Result<usize, GraphError> {
        let levels = self.search_levels(origin)?;
        Ok(levels.values().map(|&(_, level)| level).sum())
    }

    /// Gets a vertex that takes the most steps to be reached from the origin, and the number
    /// of steps. Ties are resolved in favour of the lowest vertex ID.
    /// Returns None if no other vertex is reachable from the origin.
    pub fn furthest_vertex(
        &self,
        origin: VertexId,
    ) -> Result<Option<(VertexId, usize)>, GraphError> {
        let levels = self.search_levels(origin)?;
        Ok(levels
            .into_iter()
            .filter(|&(vertex, _)| vertex != origin)
            .map(|(vertex, (_, level))| (vertex, level))
            .max_by_key(|&(vertex, level)| (level, Reverse(vertex))))
    }

    /// Gets the minimum number of steps needed to go from one vertex to the other, None if the
    /// destination cannot be reached.
    pub fn path_length(
        &self,
        origin: VertexId,
        destination: VertexId,
    ) -> Result<Option<usize>, GraphError> {
        let levels = self.search_levels(origin)?;
        Ok(levels.get(&destination).map(|&(_, level)| level))
    }

    /// Gets the smallest eccentricity (steps to the furthest reachable vertex) of the graph and
    /// all the vertices that have it, in ID order. Returns None for an empty graph.
    /// Eccentricities are measured within the connected component of each vertex, an isolated
    /// vertex has eccentricity 0.
    pub fn central_vertex(&self) -> Option<(usize, Vec<VertexId>)> {
        let eccentricities: Vec<_> = self
            .vertices()
            .map(|v| {
                let steps = self.furthest_vertex(v).ok().flatten();
                (v, steps.map_or(0, |(_, steps)| steps))
            })
            .collect();

        let fewest = eccentricities.iter().map(|&(_, steps)| steps).min()?;
        let vertices = eccentricities
            .into_iter()
            .filter(|&(_, steps)| steps == fewest)
            .map(|(v, _)| v)
            .collect();

        Some((fewest, vertices))
    }
}
