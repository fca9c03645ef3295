use std::fmt;

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::{Cost, EdgeId, VertexId};

/// Undirected edge between two vertices of a graph.
/// The vertices are stored in the order they were given when the edge was added.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge<E> {
    vertices: [VertexId; 2],
    element: E,
}

impl<E> Edge<E> {
    /// Gets the ordered pair of vertices of the edge.
    pub const fn vertices(&self) -> [VertexId; 2] {
        self.vertices
    }

    pub const fn start(&self) -> VertexId {
        self.vertices[0]
    }

    pub const fn end(&self) -> VertexId {
        self.vertices[1]
    }

    /// Gets the vertex at the other side of the edge, None if the vertex is not an endpoint.
    pub fn opposite(&self, vertex: VertexId) -> Option<VertexId> {
        match self.vertices {
            [start, end] if start == vertex => Some(end),
            [start, end] if end == vertex => Some(start),
            _ => None,
        }
    }

    /// Gets the data (e.g. the weight) attached to the edge.
    pub const fn element(&self) -> &E {
        &self.element
    }
}

/// Undirected graph backed by adjacency maps.
///
/// Vertices and edges live in arenas owned by the graph and are referenced through their IDs.
/// Every edge is stored once and indexed from both its endpoints, so for any edge between
/// `v` and `w` looking it up from `v` or from `w` returns the same [`EdgeId`].
#[derive(Debug, Clone)]
pub struct Graph<V, E = Cost> {
    vertices: Vec<V>,
    edges: Vec<Edge<E>>,
    /// For each vertex: neighbor -> edge connecting the vertex to the neighbor.
    adjacency: Vec<FxHashMap<VertexId, EdgeId>>,
}

impl<V, E> Default for Graph<V, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, E> Graph<V, E> {
    pub const fn new() -> Self {
        Self {
            vertices: vec![],
            edges: vec![],
            adjacency: vec![],
        }
    }

    pub fn with_capacity(vertices: usize, edges: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            edges: Vec::with_capacity(edges),
            adjacency: Vec::with_capacity(vertices),
        }
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Gets the number of (undirected) edges, each edge is counted once.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn vertices(&self) -> impl ExactSizeIterator<Item = VertexId> + use<V, E> {
        (0..self.vertices.len()).map(VertexId)
    }

    pub fn edges(&self) -> impl ExactSizeIterator<Item = (EdgeId, &Edge<E>)> {
        self.edges
            .iter()
            .enumerate()
            .map(|(i, edge)| (EdgeId(i), edge))
    }

    pub fn contains_vertex(&self, vertex: VertexId) -> bool {
        vertex.0 < self.vertices.len()
    }

    /// Gets the label of the vertex.
    pub fn vertex(&self, vertex: VertexId) -> Option<&V> {
        self.vertices.get(vertex.0)
    }

    pub fn edge(&self, edge: EdgeId) -> Option<&Edge<E>> {
        self.edges.get(edge.0)
    }

    /// Adds a new vertex, even if another vertex with an equal label already exists.
    pub fn add_vertex(&mut self, label: V) -> VertexId {
        let vertex = VertexId(self.vertices.len());
        self.vertices.push(label);
        self.adjacency.push(FxHashMap::default());
        vertex
    }

    /// Adds an edge between two vertices of the graph.
    /// If the vertices are already connected the existing edge is replaced, and its ID is kept.
    /// Returns None if any of the vertices doesn't belong to the graph.
    pub fn add_edge(&mut self, v: VertexId, w: VertexId, element: E) -> Option<EdgeId> {
        if !self.contains_vertex(v) || !self.contains_vertex(w) {
            debug!("Cannot add edge {v:?} -- {w:?}: vertex not in graph");
            return None;
        }

        let edge = Edge {
            vertices: [v, w],
            element,
        };

        if let Some(&id) = self.adjacency[v.0].get(&w) {
            self.edges[id.0] = edge;
            return Some(id);
        }

        let id = EdgeId(self.edges.len());
        self.edges.push(edge);
        self.adjacency[v.0].insert(w, id);
        self.adjacency[w.0].insert(v, id);

        Some(id)
    }

    /// Gets an iterator over all the edges incident to the vertex.
    /// For each edge returns the edge ID and the vertex at the other side of the edge.
    /// Returns None if the vertex doesn't belong to the graph.
    pub fn vertex_edges(
        &self,
        vertex: VertexId,
    ) -> Option<impl Iterator<Item = (EdgeId, VertexId)> + '_> {
        self.adjacency
            .get(vertex.0)
            .map(|edges| edges.iter().map(|(&w, &e)| (e, w)))
    }

    /// Gets all the edges incident to the vertex, None if the vertex doesn't belong to the graph.
    pub fn get_edges(&self, vertex: VertexId) -> Option<Vec<EdgeId>> {
        self.vertex_edges(vertex)
            .map(|edges| edges.map(|(e, _)| e).collect())
    }

    /// Gets the edge between the two vertices, if any.
    pub fn get_edge(&self, v: VertexId, w: VertexId) -> Option<EdgeId> {
        self.adjacency.get(v.0)?.get(&w).copied()
    }

    /// Gets the number of distinct neighbors of the vertex, 0 if the vertex doesn't belong to
    /// the graph.
    pub fn degree(&self, vertex: VertexId) -> usize {
        self.adjacency.get(vertex.0).map_or(0, FxHashMap::len)
    }

    /// Gets the (first) vertex with the highest degree, None if the graph is empty.
    pub fn highest_degree_vertex(&self) -> Option<VertexId> {
        self.vertices().fold(None, |best, v| match best {
            Some(b) if self.degree(b) >= self.degree(v) => Some(b),
            _ => Some(v),
        })
    }
}

impl<V: PartialEq, E> Graph<V, E> {
    /// Gets the first vertex that has the given label (linear scan).
    pub fn get_vertex_by_label(&self, label: &V) -> Option<VertexId> {
        self.vertices.iter().position(|l| l == label).map(VertexId)
    }

    /// Adds a vertex only if no other vertex has an equal label, otherwise returns the
    /// existing vertex.
    pub fn add_vertex_if_new(&mut self, label: V) -> VertexId {
        match self.get_vertex_by_label(&label) {
            Some(vertex) => vertex,
            None => self.add_vertex(label),
        }
    }
}

impl<V, E: Default> Graph<V, E> {
    /// Connects all the given pairs of vertices with edges that carry a default element.
    /// Pairs that reference vertices outside of the graph are skipped.
    pub fn add_edge_pairs(&mut self, pairs: impl IntoIterator<Item = (VertexId, VertexId)>) {
        for (v, w) in pairs {
            self.add_edge(v, w, E::default());
        }
    }
}

impl<V: fmt::Display, E: fmt::Display> fmt::Display for Graph<V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "|V| = {}; |E| = {}", self.num_vertices(), self.num_edges())?;

        write!(f, "\nVertices: ")?;
        for (i, label) in self.vertices.iter().enumerate() {
            if i > 0 {
                write!(f, "-")?;
            }
            write!(f, "{label}")?;
        }

        write!(f, "\nEdges: ")?;
        for (i, edge) in self.edges.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            let [v, w] = edge.vertices;
            write!(
                f,
                "({}--{} : {})",
                self.vertices[v.0], self.vertices[w.0], edge.element
            )?;
        }

        Ok(())
    }
}

pub mod dijkstra;
pub mod traversal;
