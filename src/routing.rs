use std::fmt;
use std::hash::Hash;
use std::ops::Deref;

use rustc_hash::FxHashMap;
use tracing::{debug, info};

use crate::{Coordinate, Cost, EdgeId, Graph, RouteError, ShortestPathTree, VertexId};

pub mod route;

pub use route::{Route, Waypoint};

/// Road network whose vertices are geolocated and can be looked up by label in constant time.
///
/// Wraps a [`Graph`] and dereferences to it for all the read-only queries (including
/// [`Graph::dijkstra`]). Vertices must be added through [`RouteMap::add_vertex`] so that the
/// coordinates and the label index stay in sync with the graph.
#[derive(Debug, Clone)]
pub struct RouteMap<V> {
    graph: Graph<V, Cost>,
    /// Coordinates of every vertex, indexed like the graph vertices.
    coordinates: Vec<Coordinate>,
    labels: FxHashMap<V, VertexId>,
}

impl<V> Default for RouteMap<V> {
    fn default() -> Self {
        Self {
            graph: Graph::new(),
            coordinates: vec![],
            labels: FxHashMap::default(),
        }
    }
}

impl<V> Deref for RouteMap<V> {
    type Target = Graph<V, Cost>;
    fn deref(&self) -> &Self::Target {
        &self.graph
    }
}

impl<V: Clone + Eq + Hash> RouteMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a new vertex at the given coordinate.
    /// If another vertex already has the same label, the label now refers to the new vertex.
    pub fn add_vertex(&mut self, label: V, coordinate: Coordinate) -> VertexId {
        let vertex = self.graph.add_vertex(label.clone());
        self.coordinates.push(coordinate);
        self.labels.insert(label, vertex);
        vertex
    }

    /// Adds a vertex only if no vertex has the same label, otherwise returns the existing one
    /// and ignores the coordinate.
    pub fn add_vertex_if_new(&mut self, label: V, coordinate: Coordinate) -> VertexId {
        match self.get_vertex_by_label(&label) {
            Some(vertex) => vertex,
            None => self.add_vertex(label, coordinate),
        }
    }

    /// Gets the vertex with the given label.
    pub fn get_vertex_by_label(&self, label: &V) -> Option<VertexId> {
        self.labels.get(label).copied()
    }
}

impl<V> RouteMap<V> {
    /// Adds an edge with the given weight, see [`Graph::add_edge`].
    pub fn add_edge(&mut self, v: VertexId, w: VertexId, weight: impl Into<Cost>) -> Option<EdgeId> {
        self.graph.add_edge(v, w, weight.into())
    }

    pub fn coordinate(&self, vertex: VertexId) -> Option<Coordinate> {
        self.coordinates.get(vertex.0).copied()
    }

    pub const fn graph(&self) -> &Graph<V, Cost> {
        &self.graph
    }
}

impl<V: fmt::Display> RouteMap<V> {
    /// Computes the shortest route from the source to the destination.
    ///
    /// The shortest paths previously computed from the source can be given to avoid running
    /// Dijkstra again. Every waypoint of the route is reported in the logs.
    pub fn sp(
        &self,
        source: VertexId,
        destination: VertexId,
        shortest_paths: Option<&ShortestPathTree>,
    ) -> Result<Route, RouteError> {
        debug!("Computing route {source:?} -> {destination:?}");

        let computed;
        let tree = match shortest_paths {
            Some(tree) => tree,
            None => {
                computed = self.graph.dijkstra(source)?;
                &computed
            }
        };

        if tree.source() != source {
            return Err(RouteError::SourceMismatch {
                expected: source,
                found: tree.source(),
            });
        }

        let path = tree
            .path_to(destination)
            .ok_or(RouteError::NoPathFound(source, destination))?;

        let mut waypoints = Vec::with_capacity(path.len());
        for vertex in path {
            let coordinate = self
                .coordinate(vertex)
                .ok_or(RouteError::NoPathFound(source, destination))?;
            let cost = tree
                .cost(vertex)
                .ok_or(RouteError::NoPathFound(source, destination))?;

            if let Some(label) = self.graph.vertex(vertex) {
                info!(
                    "Waypoint {label} at ({}, {}) with cost {cost}",
                    coordinate.lat, coordinate.lon
                );
            }

            waypoints.push(Waypoint {
                vertex,
                coordinate,
                cost,
            });
        }

        Ok(Route::from(waypoints))
    }
}

impl<V: fmt::Display> fmt::Display for RouteMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const MAX_DISPLAYED: usize = 100;

        if self.num_vertices() < MAX_DISPLAYED && self.num_edges() < MAX_DISPLAYED {
            write!(f, "{}", self.graph)
        } else {
            write!(f, "Too many vertices/edges, not printing")
        }
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::GraphError;

    struct SimpleMap {
        map: RouteMap<&'static str>,
        a: VertexId,
        b: VertexId,
        c: VertexId,
        d: VertexId,
        e: VertexId,
    }

    fn simple_map() -> SimpleMap {
        let mut map = RouteMap::new();

        let a = map.add_vertex("a", Coordinate::new(51.89, -8.47));
        let b = map.add_vertex("b", Coordinate::new(51.90, -8.46));
        let c = map.add_vertex("c", Coordinate::new(51.91, -8.45));
        let d = map.add_vertex("d", Coordinate::new(51.92, -8.44));
        let e = map.add_vertex("e", Coordinate::new(51.93, -8.43));

        map.add_edge(a, b, 2.0).unwrap();
        map.add_edge(b, c, 9.0).unwrap();
        map.add_edge(c, d, 7.0).unwrap();
        map.add_edge(d, e, 4.0).unwrap();
        map.add_edge(a, e, 14.0).unwrap();

        SimpleMap { map, a, b, c, d, e }
    }

    #[test]
    fn route_map_add_vertex_001() {
        let SimpleMap { mut map, a, .. } = simple_map();

        assert_eq!(map.get_vertex_by_label(&"a"), Some(a));
        assert_eq!(map.get_vertex_by_label(&"z"), None);
        assert_eq!(map.coordinate(a), Some(Coordinate::new(51.89, -8.47)));
        assert_eq!(map.coordinate(VertexId(10)), None);

        assert_eq!(map.add_vertex_if_new("a", Coordinate::default()), a);
        assert_eq!(map.num_vertices(), 5);

        // the label index always points to the newest vertex
        let a2 = map.add_vertex("a", Coordinate::new(1.0, 1.0));
        assert_ne!(a, a2);
        assert_eq!(map.get_vertex_by_label(&"a"), Some(a2));
        assert_eq!(map.graph().get_vertex_by_label(&"a"), Some(a));
        assert_eq!(map.num_vertices(), 6);
    }

    #[test]
    fn route_map_sp_001() {
        let SimpleMap { map, a, e, .. } = simple_map();

        let route = map.sp(a, e, None).unwrap();

        assert_eq!(route.to_path(), vec![a, e]);
        assert_eq!(route.cost(), Cost::new(14.0));
        assert_eq!(route[1].coordinate, Coordinate::new(51.93, -8.43));
    }

    #[test]
    fn route_map_sp_002() {
        let SimpleMap {
            map, a, b, c, d, ..
        } = simple_map();

        let tree = map.dijkstra(a).unwrap();
        let route = map.sp(a, d, Some(&tree)).unwrap();

        assert_eq!(route.to_path(), vec![a, b, c, d]);
        let costs: Vec<_> = route.iter().map(|w| w.cost.value()).collect();
        assert_eq!(costs, [0.0, 2.0, 11.0, 18.0]);
    }

    #[test]
    fn route_map_sp_003() {
        let SimpleMap { mut map, a, .. } = simple_map();
        let isolated = map.add_vertex("f", Coordinate::default());

        assert_eq!(
            map.sp(a, isolated, None),
            Err(RouteError::NoPathFound(a, isolated))
        );
        assert_eq!(
            map.sp(isolated, a, None),
            Err(RouteError::NoPathFound(isolated, a))
        );
    }

    #[test]
    fn route_map_sp_004() {
        let SimpleMap { map, a, b, d, .. } = simple_map();
        let tree = map.dijkstra(b).unwrap();

        assert_eq!(
            map.sp(a, d, Some(&tree)),
            Err(RouteError::SourceMismatch {
                expected: a,
                found: b
            })
        );
        assert_eq!(
            map.sp(VertexId(42), d, None),
            Err(RouteError::Graph(GraphError::VertexNotFound(VertexId(42))))
        );
    }

    #[test]
    fn route_map_sp_005() {
        let SimpleMap { map, c, .. } = simple_map();

        let route = map.sp(c, c, None).unwrap();
        assert_eq!(route.to_path(), vec![c]);
        assert_eq!(route.cost(), Cost::ZERO);
    }

    #[test]
    fn route_map_display_001() {
        let SimpleMap { mut map, .. } = simple_map();
        assert!(map.to_string().starts_with("|V| = 5; |E| = 5"));

        for i in 0..100 {
            map.add_vertex("x", Coordinate::new(0.0, f64::from(i)));
        }
        assert_eq!(map.to_string(), "Too many vertices/edges, not printing");
    }
}
