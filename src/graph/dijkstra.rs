use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::{AdaptablePriorityQueue, Cost, Graph, GraphError, Handle, VertexId};

/// Single-source shortest paths computed by [`Graph::dijkstra`].
///
/// Maps every vertex reachable from the source to the cost of its shortest path and to the
/// vertex that precedes it on that path (None for the source).
/// Vertices that cannot be reached from the source are not part of the tree.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPathTree {
    source: VertexId,
    paths: FxHashMap<VertexId, (Cost, Option<VertexId>)>,
}

impl ShortestPathTree {
    pub const fn source(&self) -> VertexId {
        self.source
    }

    /// Gets the shortest path cost and the predecessor of the vertex.
    pub fn get(&self, vertex: VertexId) -> Option<(Cost, Option<VertexId>)> {
        self.paths.get(&vertex).copied()
    }

    pub fn cost(&self, vertex: VertexId) -> Option<Cost> {
        self.get(vertex).map(|(cost, _)| cost)
    }

    pub fn predecessor(&self, vertex: VertexId) -> Option<VertexId> {
        self.get(vertex).and_then(|(_, predecessor)| predecessor)
    }

    pub fn contains(&self, vertex: VertexId) -> bool {
        self.paths.contains_key(&vertex)
    }

    /// Gets the number of vertices reachable from the source (source included).
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (VertexId, Cost, Option<VertexId>)> + '_ {
        self.paths
            .iter()
            .map(|(&vertex, &(cost, predecessor))| (vertex, cost, predecessor))
    }

    /// Unpacks the shortest path from the destination back to the source following the
    /// predecessors, and returns it in source to destination order.
    /// Returns None if the destination is not reachable from the source.
    pub fn path_to(&self, destination: VertexId) -> Option<Vec<VertexId>> {
        let mut vertices = vec![destination];
        let mut previous = self.get(destination)?.1;

        while let Some(vertex) = previous {
            vertices.push(vertex);
            previous = self.get(vertex)?.1;
        }

        vertices.reverse();
        Some(vertices)
    }
}

impl<V, E: Copy + Into<Cost>> Graph<V, E> {
    /// Computes the shortest paths from the source to every vertex reachable from it.
    ///
    /// Edge elements are used as weights and must be finite and non-negative, otherwise
    /// [`GraphError::InvalidWeight`] is returned.
    pub fn dijkstra(&self, source: VertexId) -> Result<ShortestPathTree, GraphError> {
        if !self.contains_vertex(source) {
            return Err(GraphError::VertexNotFound(source));
        }

        debug!("Computing shortest paths from {source:?}");

        // discovered vertices that are not closed yet
        let mut open = AdaptablePriorityQueue::with_capacity(self.num_vertices());
        // handle of the queue entry of every open vertex
        let mut locations: FxHashMap<VertexId, Handle> = FxHashMap::default();
        // best known predecessor of every open vertex
        let mut predecessors: FxHashMap<VertexId, Option<VertexId>> = FxHashMap::default();
        // vertices whose shortest path is final
        let mut closed = FxHashMap::default();

        locations.insert(source, open.add(Cost::ZERO, source));
        predecessors.insert(source, None);

        while let Ok((v, v_cost)) = open.remove_min() {
            locations.remove(&v);
            let predecessor = predecessors.remove(&v).flatten();
            trace!("Closing {v:?} with cost {v_cost} from {predecessor:?}");
            closed.insert(v, (v_cost, predecessor));

            for (edge, w) in self.vertex_edges(v).into_iter().flatten() {
                if closed.contains_key(&w) {
                    continue;
                }

                let weight: Cost = self.edges[edge.0].element.into();
                if !weight.is_valid_weight() {
                    return Err(GraphError::InvalidWeight(edge));
                }

                let cost = v_cost + weight;

                match locations.get(&w) {
                    None => {
                        predecessors.insert(w, Some(v));
                        locations.insert(w, open.add(cost, w));
                    }
                    Some(&handle) => {
                        // Relax: we have now found a cheaper way to reach the neighbor
                        if open.get_key(handle).is_some_and(|&current| cost < current) {
                            predecessors.insert(w, Some(v));
                            open.update_key(handle, cost)?;
                        }
                    }
                }
            }
        }

        debug!("Closed {} vertices from {source:?}", closed.len());

        Ok(ShortestPathTree {
            source,
            paths: closed,
        })
    }
}
